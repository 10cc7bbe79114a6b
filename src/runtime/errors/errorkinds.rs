//! Error constructor functions

use crate::runtime::Value;
use crate::runtime::strings::StringSymbol;
use crate::runtime::errors::{RuntimeError, ErrorKind};


impl RuntimeError {
    pub fn name_not_defined(name: StringSymbol) -> Box<RuntimeError> {
        RuntimeError::new(
            ErrorKind::NameNotDefined,
            format!("undefined variable '{}'", name),
        )
    }
    
    pub fn invalid_unary_operand(op: &str, operand: &Value) -> Box<RuntimeError> {
        RuntimeError::new(
            ErrorKind::InvalidUnaryOperand,
            format!("operand of '{}' must be a number, not {}", op, operand.type_name()),
        )
    }
    
    pub fn invalid_binary_operands(op: &str, lhs: &Value, rhs: &Value) -> Box<RuntimeError> {
        let expected = if op == "+" { "numbers or strings" } else { "numbers" };
        RuntimeError::new(
            ErrorKind::InvalidBinaryOperands,
            format!(
                "operands of '{}' must be {}, not {} and {}", 
                op, expected, lhs.type_name(), rhs.type_name(),
            ),
        )
    }
    
    pub fn divide_by_zero() -> Box<RuntimeError> {
        RuntimeError::new(ErrorKind::DivideByZero, "division by zero")
    }
    
    pub fn not_callable(value: &Value) -> Box<RuntimeError> {
        RuntimeError::new(
            ErrorKind::NotCallable,
            format!("can only call functions, not {}", value.type_name()),
        )
    }
    
    pub fn arity_mismatch(name: &str, arity: usize, nargs: usize) -> Box<RuntimeError> {
        let message = format!(
            "{}() takes {} {} but {} {} given", 
            name, 
            arity, 
            if arity == 1 { "argument" } else { "arguments" },
            nargs,
            if nargs == 1 { "was" } else { "were" },
        );
        
        RuntimeError::new(ErrorKind::ArityMismatch, message)
    }
    
    pub fn stack_overflow() -> Box<RuntimeError> {
        RuntimeError::new(ErrorKind::StackOverflow, "stack overflow")
    }
    
    pub fn native_error(name: &str, message: impl AsRef<str>) -> Box<RuntimeError> {
        RuntimeError::new(
            ErrorKind::NativeError,
            format!("{}(): {}", name, message.as_ref()),
        )
    }
    
    pub fn io_error(error: std::io::Error) -> Box<RuntimeError> {
        RuntimeError::new(ErrorKind::IOError, "could not write output")
            .caused_by(error)
    }
}
