//! Operator semantics. Arithmetic and ordering are defined for numbers only, 
//! except `+` which also concatenates strings, formatting a number operand 
//! the same way `print` would. Equality is defined for every pair of values.

use crate::language::FloatType;
use crate::parser::operator::{UnaryOp, BinaryOp};
use crate::runtime::Value;
use crate::runtime::errors::{ExecResult, RuntimeError};


pub fn eval_unary(op: UnaryOp, operand: &Value) -> ExecResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.truth_value())),
        UnaryOp::Neg => match operand {
            Value::Number(value) => Ok(Value::Number(-value)),
            _ => Err(RuntimeError::invalid_unary_operand("-", operand)),
        },
    }
}

pub fn eval_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> ExecResult<Value> {
    match op {
        BinaryOp::Add => eval_add(lhs, rhs),
        BinaryOp::Sub => eval_arithmetic(op, lhs, rhs, |a, b| Ok(a - b)),
        BinaryOp::Mul => eval_arithmetic(op, lhs, rhs, |a, b| Ok(a * b)),
        BinaryOp::Div => eval_arithmetic(op, lhs, rhs, |a, b| {
            if b == 0.0 {
                return Err(RuntimeError::divide_by_zero());
            }
            Ok(a / b)
        }),
        
        BinaryOp::LT => eval_comparison(op, lhs, rhs, |a, b| a < b),
        BinaryOp::LE => eval_comparison(op, lhs, rhs, |a, b| a <= b),
        BinaryOp::GT => eval_comparison(op, lhs, rhs, |a, b| a > b),
        BinaryOp::GE => eval_comparison(op, lhs, rhs, |a, b| a >= b),
        
        BinaryOp::EQ => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::NE => Ok(Value::Bool(lhs != rhs)),
    }
}

fn eval_add(lhs: &Value, rhs: &Value) -> ExecResult<Value> {
    let value = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        
        (Value::String(..), Value::String(..)) 
        | (Value::String(..), Value::Number(..)) 
        | (Value::Number(..), Value::String(..)) 
            => Value::from(format!("{}{}", lhs, rhs)),
        
        _ => return Err(RuntimeError::invalid_binary_operands("+", lhs, rhs)),
    };
    Ok(value)
}

fn eval_arithmetic<F>(op: BinaryOp, lhs: &Value, rhs: &Value, apply: F) -> ExecResult<Value> 
where F: Fn(FloatType, FloatType) -> ExecResult<FloatType> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => apply(*a, *b).map(Value::Number),
        _ => Err(RuntimeError::invalid_binary_operands(&op.to_string(), lhs, rhs)),
    }
}

fn eval_comparison<F>(op: BinaryOp, lhs: &Value, rhs: &Value, compare: F) -> ExecResult<Value> 
where F: Fn(FloatType, FloatType) -> bool {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(compare(*a, *b))),
        _ => Err(RuntimeError::invalid_binary_operands(&op.to_string(), lhs, rhs)),
    }
}
