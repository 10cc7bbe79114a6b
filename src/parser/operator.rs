use core::fmt;
use crate::lexer::TokenKind;

// Unary Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::OpSub => Some(Self::Neg),
            TokenKind::OpNot => Some(Self::Not),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        };
        fmt.write_str(symbol)
    }
}

// Binary Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // precedence level 1
    Mul, Div,
    
    // precedence level 2
    Add, Sub,
    
    // precedence level 3
    LT, GT, LE, GE,
    
    // precedence level 4
    EQ, NE,
}

pub type Precedence = u8;
pub const PRECEDENCE_END: Precedence = 0; // tightest binding
pub const PRECEDENCE_START: Precedence = 4; // weakest binding

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::OpMul => BinaryOp::Mul,
            TokenKind::OpDiv => BinaryOp::Div,
            TokenKind::OpAdd => BinaryOp::Add,
            TokenKind::OpSub => BinaryOp::Sub,
            TokenKind::OpLT  => BinaryOp::LT,
            TokenKind::OpGT  => BinaryOp::GT,
            TokenKind::OpLE  => BinaryOp::LE,
            TokenKind::OpGE  => BinaryOp::GE,
            TokenKind::OpEQ  => BinaryOp::EQ,
            TokenKind::OpNE  => BinaryOp::NE,
            _ => return None,
        };
        Some(op)
    }
    
    pub const fn precedence_level(&self) -> Precedence {
        match self {
            BinaryOp::Mul | BinaryOp::Div => 1,
            
            BinaryOp::Add | BinaryOp::Sub => 2,
            
            BinaryOp::LT | BinaryOp::GT | BinaryOp::LE | BinaryOp::GE  => 3,
            BinaryOp::EQ | BinaryOp::NE => 4,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Mul    => "*", 
            BinaryOp::Div    => "/", 
            BinaryOp::Add    => "+",
            BinaryOp::Sub    => "-",
            BinaryOp::LT     => "<",
            BinaryOp::GT     => ">",
            BinaryOp::LE     => "<=",
            BinaryOp::GE     => ">=",
            BinaryOp::EQ     => "==",
            BinaryOp::NE     => "!=",
        };
        fmt.write_str(symbol)
    }
}

// Short-circuiting operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And, Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            LogicalOp::And => "and",
            LogicalOp::Or  => "or",
        };
        fmt.write_str(symbol)
    }
}
