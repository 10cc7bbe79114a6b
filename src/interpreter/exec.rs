use std::mem;
use std::rc::Rc;
use std::io::Write;

use crate::parser::stmt::{Stmt, Branch};
use crate::runtime::{Environment, Value, Function};
use crate::runtime::errors::{ExecResult, RuntimeError};
use crate::interpreter::{Interpreter, ControlFlow};


impl<O, E> Interpreter<O, E> where O: Write, E: Write {
    
    pub(super) fn exec(&mut self, stmt: &Stmt) -> ExecResult<ControlFlow> {
        match stmt {
            Stmt::Expression(expr) => {
                // eval an expression just for side effects
                self.eval(expr)?;
            },
            
            Stmt::Print(expr) => {
                let value = self.eval(expr)?;
                writeln!(self.stdout, "{}", value)
                    .map_err(RuntimeError::io_error)?;
            },
            
            Stmt::Let { name, init } => {
                let value = match init {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.env.define(name.name, value);
            },
            
            Stmt::Block(stmts) => {
                let local_env = Environment::new_local(&self.env);
                return self.exec_block(stmts, local_env);
            },
            
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval(condition)?.truth_value() {
                    return self.exec(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec(else_branch);
                }
            },
            
            Stmt::While { condition, body } => {
                while self.eval(condition)?.truth_value() {
                    match self.exec(body)? {
                        ControlFlow::Normal | ControlFlow::Continue => { },
                        ControlFlow::Break => break,
                        control @ ControlFlow::Return(..) => return Ok(control),
                    }
                }
            },
            
            Stmt::Branch(Branch::Break, ..) => return Ok(ControlFlow::Break),
            Stmt::Branch(Branch::Continue, ..) => return Ok(ControlFlow::Continue),
            
            Stmt::Return(_, expr) => {
                let value = match expr {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                return Ok(ControlFlow::Return(value));
            },
            
            Stmt::Function(decl) => {
                let function = Function::new(decl.clone(), self.env.clone());
                self.env.define(decl.name.name, Value::Function(Rc::new(function)));
            },
        }
        
        Ok(ControlFlow::Normal)
    }
    
    /// Execute a sequence of statements within the given scope, stopping at the 
    /// first statement that transfers control. The current scope is restored on every exit path.
    pub(super) fn exec_block(&mut self, stmts: &[Stmt], local_env: Rc<Environment>) -> ExecResult<ControlFlow> {
        let outer_env = mem::replace(&mut self.env, local_env);
        let result = self.exec_suite(stmts);
        let local_env = mem::replace(&mut self.env, outer_env);
        Environment::release(local_env);
        result
    }
    
    fn exec_suite(&mut self, stmts: &[Stmt]) -> ExecResult<ControlFlow> {
        for stmt in stmts.iter() {
            match self.exec(stmt)? {
                ControlFlow::Normal => { },
                control => return Ok(control),
            }
        }
        Ok(ControlFlow::Normal)
    }
}
