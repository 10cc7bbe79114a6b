use std::rc::Rc;
use std::io::Write;

use crate::parser::stmt::Stmt;
use crate::runtime::{Environment, Value};
use crate::runtime::errors::RuntimeError;
use crate::frontend;

mod eval;
mod exec;
mod ops;
mod tests;


/// How control leaves a statement.
#[derive(Debug, Clone)]
pub enum ControlFlow {
    Normal,
    Continue,
    Break,
    Return(Value),
}


/// Tree-walking interpreter. Program output goes to `stdout` and diagnostics to `stderr`.
pub struct Interpreter<O, E> where O: Write, E: Write {
    globals: Rc<Environment>,
    env: Rc<Environment>,  // innermost scope of the code currently executing
    stdout: O,
    stderr: E,
    call_depth: usize,
    error_count: usize,
}

impl<O, E> Interpreter<O, E> where O: Write, E: Write {
    pub fn new(globals: Rc<Environment>, stdout: O, stderr: E) -> Self {
        Interpreter {
            env: globals.clone(),
            globals,
            stdout,
            stderr,
            call_depth: 0,
            error_count: 0,
        }
    }
    
    pub fn globals(&self) -> &Rc<Environment> { &self.globals }
    
    pub fn stdout(&self) -> &O { &self.stdout }
    pub fn stderr(&self) -> &E { &self.stderr }
    
    pub fn into_sinks(self) -> (O, E) { (self.stdout, self.stderr) }
    
    /// Number of runtime errors reported so far.
    pub fn error_count(&self) -> usize { self.error_count }
    
    /// Execute a program. A runtime error abandons the statement that raised it, 
    /// gets written to the error sink, and execution carries on with the next statement.
    pub fn interpret(&mut self, program: &[Stmt]) {
        log::debug!("interpreting {} statements", program.len());
        
        for stmt in program.iter() {
            // a top-level statement always starts from the global scope
            self.env = self.globals.clone();
            self.call_depth = 0;
            
            match self.exec(stmt) {
                Ok(ControlFlow::Normal) => { },
                
                // rejected by the parser, so nothing to unwind into
                Ok(control) => log::debug!("ignoring stray control flow: {:?}", control),
                
                Err(error) => self.report_error(&error),
            }
        }
    }
    
    fn report_error(&mut self, error: &RuntimeError) {
        log::debug!("runtime error: {:?}", error);
        
        self.error_count += 1;
        if let Err(io_error) = frontend::print_runtime_error(&mut self.stderr, error) {
            log::error!("failed to report runtime error: {}", io_error);
        }
    }
}
