use core::fmt;
use std::rc::Rc;
use crate::language::FloatType;
use crate::lexer::Literal;
use crate::runtime::function::{Function, NativeFunction, Invoke};


/// A dynamically-typed runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(FloatType),
    String(Rc<str>),
    Function(Rc<Function>),
    NativeFunction(Rc<NativeFunction>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(..) => "bool",
            Self::Number(..) => "number",
            Self::String(..) => "string",
            Self::Function(..) => "function",
            Self::NativeFunction(..) => "native function",
        }
    }
    
    /// Only `nil` and `false` are falsey.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }
    
    pub fn as_invoke(&self) -> Option<&dyn Invoke> {
        match self {
            Self::Function(fun) => Some(fun as &dyn Invoke),
            Self::NativeFunction(fun) => Some(fun as &dyn Invoke),
            _ => None,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Self::Nil,
            Literal::Boolean(value) => Self::Bool(*value),
            Literal::Number(value) => Self::Number(*value),
            Literal::String(value) => Self::String(value.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<FloatType> for Value {
    fn from(value: FloatType) -> Self { Self::Number(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Self::String(Rc::from(value)) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Self::String(Rc::from(value)) }
}


// Equality never coerces between types. NaN compares equal to itself,
// and functions compare by identity.

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::NativeFunction(a), Self::NativeFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}


impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => fmt.write_str("nil"),
            Self::Bool(true) => fmt.write_str("true"),
            Self::Bool(false) => fmt.write_str("false"),
            Self::Number(value) => fmt_number(fmt, *value),
            Self::String(value) => fmt.write_str(value),
            Self::Function(fun) => write!(fmt, "<fn {}>", fun.name()),
            Self::NativeFunction(fun) => write!(fmt, "<native fn {}>", fun.name()),
        }
    }
}


// Shortest round-trip digits. Exponent form for very large or very small
// magnitudes, e.g. `1e+21` and `1e-05`.
fn fmt_number(fmt: &mut fmt::Formatter<'_>, value: FloatType) -> fmt::Result {
    if value.is_nan() {
        return fmt.write_str("NaN");
    }
    if value.is_infinite() {
        return fmt.write_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    }
    
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return write!(fmt, "{}", value),
    };
    
    if (-4..21).contains(&exponent) {
        write!(fmt, "{}", value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(fmt, "{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
