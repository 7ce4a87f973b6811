use std::sync::Arc;

use crate::{Error, Position, token::{Token, TokenType}};

pub struct Lexer {
    line: usize,
    col: usize,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    code: Vec<char>,
}

impl Lexer {
    pub fn new(code: &str) -> Self {
        Self { line: 1, col: 1, tokens: vec![], start: 0, current: 0, code: code.chars().collect() }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn at_end(&self) -> bool {
        self.current >= self.code.len()
    }

    fn peek(&self) -> char {
        self.code[self.current]
    }

    fn advance(&mut self, newline: bool) {
        if newline {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.current += 1;
    }

    fn next(&mut self) -> char {
        let c = self.code[self.current];
        self.advance(c == '\n');
        c
    }

    fn add_token(&mut self, ty: TokenType) {
        let text = self.collect_literal();
        self.tokens.push(Token {
            ty,
            text,
            pos: Position {
                pos: self.start,
                line: self.line,
                col: if self.col < (self.current - self.start) {
                    0
                } else {
                    self.col - (self.current - self.start)
                },
            },
        });
    }

    fn mk_error<S>(&self, msg: S) -> Error where S: Into<String> {
        Error::syntax(msg, Position { pos: self.start, line: self.line, col: self.col })
    }

    fn collect_literal(&self) -> String {
        self.code[self.start..self.current].iter().collect::<String>()
    }

    pub fn lex(&mut self) -> Result<(), Error> {
        while !self.at_end() {
            self.start = self.current;
            match self.next() {
                '(' => self.add_token(TokenType::LParen),
                ')' => self.add_token(TokenType::RParen),
                ';' => {
                    while !self.at_end() && self.peek() != '\n' {
                        self.advance(false);
                    }
                },
                ' ' | '\t' | '\r' | '\n' => (),
                _ => self.atom()?,
            }
        }
        Ok(())
    }

    // An atom runs to the next delimiter; whether it is a number or a
    // symbol is decided afterwards. Anything that starts like a number
    // must parse as one.
    fn atom(&mut self) -> Result<(), Error> {
        while !self.at_end() && !is_delimiter(self.peek()) {
            self.advance(false);
        }
        let literal = self.collect_literal();
        if !looks_numeric(&literal) {
            self.add_token(TokenType::Symbol(Arc::from(literal.as_str())));
        } else if literal.contains('.') {
            match literal.parse::<f64>() {
                Ok(x) => self.add_token(TokenType::Float(x)),
                Err(e) => return Err(self.mk_error(format!("error parsing float '{}': {}", literal, e))),
            }
        } else {
            match literal.parse::<i64>() {
                Ok(n) => self.add_token(TokenType::Int(n)),
                Err(e) => return Err(self.mk_error(format!("error parsing integer '{}': {}", literal, e))),
            }
        }
        Ok(())
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | ';' | ' ' | '\t' | '\r' | '\n')
}

// A bare `-` or `+` is an operator symbol; followed by a digit it signs
// a number literal.
fn looks_numeric(literal: &str) -> bool {
    let mut chars = literal.chars();
    match chars.next() {
        Some('0'..='9') => true,
        Some('-' | '+') => matches!(chars.next(), Some('0'..='9')),
        _ => false,
    }
}
