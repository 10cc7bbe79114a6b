use std::fmt;
use std::io;
use std::error::Error;

#[macro_use]
mod macros;

pub mod utils;

pub mod source;
pub mod lexer;
pub mod parser;

pub mod language;
pub mod runtime;
pub mod interpreter;
pub mod stdlib;

pub mod frontend;
pub mod debug;



use source::ModuleSource;
use language::LineNo;
use lexer::{LexerError, ErrorKind as LexerErrorKind};
use parser::{ParserError, Location};
use parser::stmt::Stmt;

pub use interpreter::Interpreter;


#[derive(Debug)]
pub enum SyntaxError {
    Lexer(LexerError),
    Parser(ParserError),
}

impl SyntaxError {
    pub fn line(&self) -> LineNo {
        match self {
            Self::Lexer(error) => error.line(),
            Self::Parser(error) => error.line(),
        }
    }
    
    /// True if the error only happened because the input stopped too soon.
    pub fn is_unexpected_end(&self) -> bool {
        match self {
            Self::Parser(error) => matches!(error.location(), Location::End),
            Self::Lexer(error) => matches!(
                error.kind(), LexerErrorKind::UnterminatedString | LexerErrorKind::UnterminatedComment
            ),
        }
    }
}

impl Error for SyntaxError { }

impl fmt::Display for SyntaxError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer(error) => fmt::Display::fmt(error, fmt),
            Self::Parser(error) => fmt::Display::fmt(error, fmt),
        }
    }
}


#[derive(Debug)]
pub enum BuildErrors {
    // depending on which stage the build failed
    Source(io::Error),
    Syntax(Box<[SyntaxError]>),
}

impl BuildErrors {
    /// Input that could still become valid if more text is appended,
    /// such as an unclosed block or string.
    pub fn is_incomplete(&self) -> bool {
        match self {
            Self::Source(..) => false,
            Self::Syntax(errors) => !errors.is_empty() 
                && errors.iter().all(SyntaxError::is_unexpected_end),
        }
    }
}

pub fn build_module(source: &ModuleSource) -> Result<Vec<Stmt>, BuildErrors> {
    let source_text = source.read_text()
        .map_err(BuildErrors::Source)?;
    
    parse_source(&source_text)
}

/// Produce AST from source text. Every lexer diagnostic is collected, 
/// along with the error that stopped the parser if there was one.
pub fn parse_source(source_text: &str) -> Result<Vec<Stmt>, BuildErrors> {
    let (tokens, lexer_errors) = lexer::tokenize(source_text);
    let (program, parser_error) = parser::parse(&tokens);
    
    let mut errors = lexer_errors.into_iter()
        .map(SyntaxError::Lexer)
        .collect::<Vec<_>>();
    
    errors.extend(parser_error.map(SyntaxError::Parser));
    
    if !errors.is_empty() {
        return Err(BuildErrors::Syntax(errors.into_boxed_slice()));
    }
    Ok(program)
}

pub fn print_build_errors(out: &mut impl io::Write, errors: &BuildErrors, source: &ModuleSource) -> io::Result<()> {
    match errors {
        BuildErrors::Source(error) => {
            writeln!(out, "Error reading source {}: {}.", source, error)
        }
        
        BuildErrors::Syntax(errors) => {
            frontend::print_syntax_errors(out, errors)
        }
    }
}
