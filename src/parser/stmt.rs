use crate::language::LineNo;
use std::rc::Rc;
use crate::parser::expr::{Expr, Ident};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Break,
    Continue,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    
    Expression(Expr),
    
    Print(Expr),
    
    Let {
        name: Ident,
        init: Option<Expr>,
    },
    
    Block(Box<[Stmt]>),
    
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    
    Branch(Branch, LineNo),
    
    Return(LineNo, Option<Expr>),
    
    // function declarations are shared with the closures created from them
    Function(Rc<FunctionDecl>),
    
}

#[derive(Debug)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Box<[Ident]>,
    pub body: Box<[Stmt]>,
}
