use std::fmt;
use std::error::Error;
use crate::language::{LineNo, MAX_ARGUMENTS, MAX_NESTING};
use crate::lexer::Token;
use crate::utils;


pub type ErrorKind = ParserErrorKind;

// Specifies the actual error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorKind {
    ExpectedStartOfExpr,   // expected the start of an expression
    ExpectedOpenParen(ContextTag),
    ExpectedCloseParen(ContextTag),
    ExpectedOpenBrace(ContextTag),
    ExpectedCloseBrace(ContextTag),
    ExpectedSemicolon(ContextTag),
    ExpectedColon,
    ExpectedIdentifier(ContextTag),
    InvalidAssignmentTarget,   // the LHS of an assignment was not a bare variable
    TooManyArguments,
    TooManyParameters,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    ReturnOutsideFunction,
    ReservedKeyword,
    TooDeeplyNested,
}

// Provide information about the type of syntactic construct from which the error originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextTag {
    ExprStmt,
    PrintStmt,
    LetDecl,
    Block,
    IfStmt,
    WhileStmt,
    ForStmt,
    BranchStmt,
    ReturnStmt,
    FunDecl,
    Params,
    CallArgs,
    Group,
}

impl fmt::Display for ContextTag {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExprStmt => "expression statement",
            Self::PrintStmt => "print statement",
            Self::LetDecl => "variable declaration",
            Self::Block => "block",
            Self::IfStmt => "if statement",
            Self::WhileStmt => "while statement",
            Self::ForStmt => "for statement",
            Self::BranchStmt => "loop control statement",
            Self::ReturnStmt => "return statement",
            Self::FunDecl => "function declaration",
            Self::Params => "parameter list",
            Self::CallArgs => "call arguments",
            Self::Group => "parenthesized expression",
        };
        fmt.write_str(name)
    }
}


// Where in the token stream the error was found
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    At(String),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    kind: ErrorKind,
    line: LineNo,
    location: Location,
}

impl ParserError {
    pub fn new(kind: ErrorKind, token: &Token) -> Self {
        let location = 
            if token.is_eof() { Location::End }
            else { Location::At(token.lexeme.clone()) };
        
        ParserError { kind, line: token.line, location }
    }
    
    pub fn kind(&self) -> &ErrorKind { &self.kind }
    pub fn line(&self) -> LineNo { self.line }
    pub fn location(&self) -> &Location { &self.location }
}

impl Error for ParserError { }

impl fmt::Display for ParserError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::ExpectedStartOfExpr => fmt.write_str("expected expression")?,
            ErrorKind::ExpectedOpenParen(ctx) => write!(fmt, "expected '(' in {}", ctx)?,
            ErrorKind::ExpectedCloseParen(ctx) => write!(fmt, "expected ')' after {}", ctx)?,
            ErrorKind::ExpectedOpenBrace(ctx) => write!(fmt, "expected '{{' before {} body", ctx)?,
            ErrorKind::ExpectedCloseBrace(ctx) => write!(fmt, "expected '}}' after {}", ctx)?,
            ErrorKind::ExpectedSemicolon(ctx) => write!(fmt, "expected ';' after {}", ctx)?,
            ErrorKind::ExpectedColon => fmt.write_str("expected ':' in conditional expression")?,
            ErrorKind::ExpectedIdentifier(ctx) => write!(fmt, "expected identifier in {}", ctx)?,
            ErrorKind::InvalidAssignmentTarget => fmt.write_str("invalid assignment target")?,
            ErrorKind::TooManyArguments => write!(fmt, "can't have more than {} arguments", MAX_ARGUMENTS)?,
            ErrorKind::TooManyParameters => write!(fmt, "can't have more than {} parameters", MAX_ARGUMENTS)?,
            ErrorKind::BreakOutsideLoop => fmt.write_str("'break' outside of a loop")?,
            ErrorKind::ContinueOutsideLoop => fmt.write_str("'continue' outside of a loop")?,
            ErrorKind::ReturnOutsideFunction => fmt.write_str("'return' outside of a function")?,
            ErrorKind::ReservedKeyword => fmt.write_str("reserved keyword is not supported")?,
            ErrorKind::TooDeeplyNested => write!(fmt, "can't nest more than {} levels deep", MAX_NESTING)?,
        }
        
        match &self.location {
            Location::At(lexeme) => write!(fmt, " at '{}'", utils::trim_str(lexeme, 32)),
            Location::End => fmt.write_str(" at end"),
        }
    }
}
