use std::fmt;
use std::error::Error;
use crate::language::LineNo;


// Lexer Errors

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    UnexpectedChar(char),
    UnterminatedString,
    UnterminatedComment,
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    kind: ErrorKind,
    line: LineNo,
}

impl LexerError {
    pub fn new(kind: ErrorKind, line: LineNo) -> Self {
        LexerError { kind, line }
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
    pub fn line(&self) -> LineNo { self.line }
}

impl Error for LexerError { }

impl fmt::Display for LexerError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedChar(ch) => write!(fmt, "unexpected character {:?}", ch),
            ErrorKind::UnterminatedString => fmt.write_str("unterminated string"),
            ErrorKind::UnterminatedComment => fmt.write_str("unterminated block comment"),
            ErrorKind::InvalidNumber(literal) => write!(fmt, "invalid number literal \"{}\"", literal),
        }
    }
}
