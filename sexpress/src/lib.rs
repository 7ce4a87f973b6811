use std::{fmt, sync::Arc};

pub mod token;
pub mod lexer;
pub mod parser;
pub mod expr;
pub mod ast;
pub mod value;
pub mod env;
pub mod eval;
pub mod interpreter;
pub mod session;

use crate::session::SessionId;

#[derive(Clone, Debug)]
pub struct Position {
    pub pos: usize,
    pub line: usize,
    pub col: usize,
}

/// Everything that can go wrong between source text and a result value.
/// Each variant is caused by the caller's input; none is recovered from
/// or defaulted internally.
#[derive(Clone, Debug)]
pub enum Error {
    Syntax { message: String, pos: Option<Position> },
    UndefinedVariable { name: Arc<str> },
    DivisionByZero,
    SessionNotFound { id: SessionId },
    SessionLimit { limit: usize },
}

impl Error {
    pub fn syntax<S>(message: S, pos: Position) -> Self
    where S: Into<String> {
        Self::Syntax { message: message.into(), pos: Some(pos) }
    }

    // arity and dispatch errors are found on the read form, after
    // source positions are gone
    pub fn syntax_no_pos<S>(message: S) -> Self
    where S: Into<String> {
        Self::Syntax { message: message.into(), pos: None }
    }

    /// Whether a transport layer should report this as bad input, as
    /// opposed to an unknown or exhausted session.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, Self::SessionNotFound { .. } | Self::SessionLimit { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { message, pos: Some(pos) } =>
                write!(f, "syntax error: {} (at {},{})", message, pos.line, pos.col),
            Self::Syntax { message, pos: None } =>
                write!(f, "syntax error: {}", message),
            Self::UndefinedVariable { name } =>
                write!(f, "variable '{}' is not defined", name),
            Self::DivisionByZero =>
                f.write_str("division by zero"),
            Self::SessionNotFound { id } =>
                write!(f, "no such session: {}", id),
            Self::SessionLimit { limit } =>
                write!(f, "session limit of {} reached", limit),
        }
    }
}

impl std::error::Error for Error {}
