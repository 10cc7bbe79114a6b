use crate::language::LineNo;
use crate::lexer::{Literal, Token};
use crate::parser::operator::{UnaryOp, BinaryOp, LogicalOp};
use crate::runtime::strings::StringSymbol;


/// A name as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident {
    pub name: StringSymbol,
    pub line: LineNo,
}

impl Ident {
    pub fn new(name: impl Into<StringSymbol>, line: LineNo) -> Self {
        Self { name: name.into(), line }
    }
}


#[derive(Debug, Clone)]
pub enum Expr {
    
    Literal(Literal),
    
    Variable(Ident),
    
    Assignment {
        target: Ident,
        value: Box<Expr>,
    },
    
    UnaryOp {
        op: UnaryOp,
        line: LineNo,
        operand: Box<Expr>,
    },
    
    BinaryOp {
        op: BinaryOp,
        line: LineNo,
        operands: Box<(Expr, Expr)>,
    },
    
    Logical(LogicalOp, Box<(Expr, Expr)>),
    
    Grouping(Box<Expr>),
    
    Ternary(Box<Ternary>),
    
    Call(Box<Call>),
    
}

#[derive(Debug, Clone)]
pub struct Ternary {
    pub condition: Expr,
    pub then_branch: Expr,
    pub else_branch: Expr,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub callee: Expr,
    pub paren: Token,  // closing paren, used to locate errors
    pub args: Box<[Expr]>,
}

impl Expr {
    /// Only a bare variable reference may be assigned to.
    pub fn as_assignment_target(&self) -> Option<Ident> {
        match self {
            Self::Variable(ident) => Some(*ident),
            _ => None,
        }
    }
}
