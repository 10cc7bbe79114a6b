use std::fmt;
use std::error::Error;
use crate::language::LineNo;

mod errorkinds;


pub type ExecResult<T> = Result<T, Box<RuntimeError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NameNotDefined,
    InvalidUnaryOperand,
    InvalidBinaryOperands,
    DivideByZero,
    NotCallable,
    ArityMismatch,
    StackOverflow,
    NativeError,
    IOError,
}

#[derive(Debug)]
pub struct RuntimeError {
    kind: ErrorKind,
    message: String,
    line: Option<LineNo>,
    cause: Option<Box<dyn Error>>,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Box<Self> {
        Box::new(RuntimeError {
            kind,
            message: message.into(),
            line: None,
            cause: None,
        })
    }
    
    pub fn caused_by(mut self: Box<Self>, cause: impl Into<Box<dyn Error>>) -> Box<Self> {
        self.cause.replace(cause.into()); self
    }
    
    /// Attach the source line, unless the error already knows where it came from.
    pub fn at_line(mut self: Box<Self>, line: LineNo) -> Box<Self> {
        self.line.get_or_insert(line); self
    }
    
    pub fn kind(&self) -> ErrorKind { self.kind }
    pub fn message(&self) -> &str { &self.message }
    pub fn line(&self) -> Option<LineNo> { self.line }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Some(error) => write!(fmt, "{}: {}", self.message, error),
            None => fmt.write_str(&self.message),
        }
    }
}
