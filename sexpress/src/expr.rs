use std::{fmt, sync::Arc};

use strum::{Display, EnumString};

use crate::value::Value;

/// The closed set of operators an `Application` may invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum BuiltinOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = "=")]
    Eq,
}

impl BuiltinOp {
    /// Arithmetic operators fold two or more arguments left to right;
    /// comparisons take exactly two.
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }
}

#[derive(Clone)]
pub enum Expr {
    Literal { value: Value },
    Reference { name: Arc<str> },
    Definition { name: Arc<str>, value: Box<Expr> },
    Conditional { test: Box<Expr>, then_branch: Box<Expr>, else_branch: Box<Expr> },
    Application { op: BuiltinOp, args: Vec<Expr> },
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{}", value),
            Self::Reference { name } => f.write_str(name),
            Self::Definition { name, value } => write!(f, "(define {} {:?})", name, value),
            Self::Conditional { test, then_branch, else_branch } =>
                write!(f, "(if {:?} {:?} {:?})", test, then_branch, else_branch),
            Self::Application { op, args } => {
                write!(f, "({}", op)?;
                for arg in args {
                    write!(f, " {:?}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
