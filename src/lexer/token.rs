use std::fmt;
use std::rc::Rc;
use crate::language::{FloatType, LineNo};

// Token Types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters, Separators, punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Dot,
    Semicolon,
    Question,
    Colon,
    
    // Operator Symbols
    OpAdd, OpSub, OpMul, OpDiv,
    OpNot, OpAssign,
    OpLT, OpLE, OpGT, OpGE, OpEQ, OpNE,
    
    // Keywords
    And, Or,
    True, False, Nil,
    Let,
    If, Else,
    While, For,
    Break, Continue, Return,
    Fun, Print,
    Class, This, Super,
    
    // Literals
    Identifier,
    StringLiteral,
    NumberLiteral,
    
    // Misc
    Comment,
    EOF,
}

/// The parsed value of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Number(FloatType),
    String(Rc<str>),
}

impl fmt::Display for Literal {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => fmt.write_str("nil"),
            Self::Boolean(value) => write!(fmt, "{}", value),
            Self::Number(value) => write!(fmt, "{}", value),
            Self::String(value) => write!(fmt, "{:?}", value),
        }
    }
}


/// Token Output
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,           // the exact source text the token was scanned from
    pub literal: Option<Literal>,
    pub line: LineNo,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Literal>, line: LineNo) -> Self {
        Token { kind, lexeme: lexeme.into(), literal, line }
    }
    
    pub fn eof(line: LineNo) -> Self {
        Self::new(TokenKind::EOF, "", None, line)
    }
    
    pub fn is_eof(&self) -> bool { matches!(self.kind, TokenKind::EOF) }
}

impl fmt::Display for Token {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(fmt, "{:?} {} {}", self.kind, self.lexeme, literal),
            None => write!(fmt, "{:?} {}", self.kind, self.lexeme),
        }
    }
}
