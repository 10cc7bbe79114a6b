use std::io::Write;

use crate::language::MAX_CALL_DEPTH;
use crate::parser::expr::{Expr, Call as CallExpr};
use crate::parser::operator::LogicalOp;
use crate::runtime::{Environment, Value, Function, Invoke, Call};
use crate::runtime::errors::{ExecResult, RuntimeError};
use crate::interpreter::{Interpreter, ControlFlow};
use crate::interpreter::ops;


impl<O, E> Interpreter<O, E> where O: Write, E: Write {
    
    /// Evaluate an expression in the current scope.
    pub fn eval(&mut self, expr: &Expr) -> ExecResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            
            Expr::Variable(ident) => self.env.get(ident.name)
                .map_err(|error| error.at_line(ident.line)),
            
            Expr::Assignment { target, value } => {
                let value = self.eval(value)?;
                self.env.assign(target.name, value.clone())
                    .map_err(|error| error.at_line(target.line))?;
                Ok(value)
            },
            
            Expr::UnaryOp { op, line, operand } => {
                let operand = self.eval(operand)?;
                ops::eval_unary(*op, &operand)
                    .map_err(|error| error.at_line(*line))
            },
            
            Expr::BinaryOp { op, line, operands } => {
                let (lhs, rhs) = &**operands;
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                ops::eval_binary(*op, &lhs, &rhs)
                    .map_err(|error| error.at_line(*line))
            },
            
            Expr::Logical(op, operands) => {
                let (lhs, rhs) = &**operands;
                self.eval_short_circuit(*op, lhs, rhs)
            },
            
            Expr::Grouping(inner) => self.eval(inner),
            
            Expr::Ternary(ternary) => {
                if self.eval(&ternary.condition)?.truth_value() {
                    self.eval(&ternary.then_branch)
                } else {
                    self.eval(&ternary.else_branch)
                }
            },
            
            Expr::Call(call) => self.eval_call(call),
        }
    }
    
    // the result is whichever operand decided the outcome, not a bool
    fn eval_short_circuit(&mut self, op: LogicalOp, lhs: &Expr, rhs: &Expr) -> ExecResult<Value> {
        let lhs = self.eval(lhs)?;
        
        let decided = match op {
            LogicalOp::And => !lhs.truth_value(),
            LogicalOp::Or => lhs.truth_value(),
        };
        
        if decided {
            Ok(lhs)
        } else {
            self.eval(rhs)
        }
    }
    
    fn eval_call(&mut self, call: &CallExpr) -> ExecResult<Value> {
        let callee = self.eval(&call.callee)?;
        
        let mut args = Vec::with_capacity(call.args.len());
        for arg in call.args.iter() {
            args.push(self.eval(arg)?);
        }
        
        let line = call.paren.line;
        let result = callee.as_invoke()
            .ok_or_else(|| RuntimeError::not_callable(&callee))
            .and_then(|invoke| invoke.invoke(&args))
            .map_err(|error| error.at_line(line))?;
        
        let value = match result {
            Call::Function(function) => self.call_function(&function, args),
            Call::Native(native) => {
                log::trace!("call native {}", native.name());
                native.call(&args)
            },
        };
        
        value.map_err(|error| error.at_line(line))
    }
    
    fn call_function(&mut self, function: &Function, args: Vec<Value>) -> ExecResult<Value> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::stack_overflow());
        }
        
        // parented to where the function was declared, not where it is called from
        let local_env = Environment::new_local(function.closure());
        for (param, arg) in function.decl().params.iter().zip(args) {
            local_env.define(param.name, arg);
        }
        
        log::trace!("call {} (depth {})", function.decl().name.name, self.call_depth);
        
        self.call_depth += 1;
        let result = self.exec_block(&function.decl().body, local_env);
        self.call_depth -= 1;
        
        match result? {
            ControlFlow::Return(value) => Ok(value),
            _ => Ok(Value::Nil),
        }
    }
}
