use core::fmt;
use std::rc::Rc;
use crate::parser::stmt::FunctionDecl;
use crate::runtime::Value;
use crate::runtime::strings::StringSymbol;
use crate::runtime::environment::Environment;
use crate::runtime::errors::ExecResult;

mod signature;

pub use signature::Signature;


/// Call directive

pub enum Call {
    Function(Rc<Function>),
    Native(Rc<NativeFunction>),
}

pub trait Invoke {
    fn signature(&self) -> &Signature;
    fn as_call(&self) -> Call;
    
    fn name(&self) -> StringSymbol { self.signature().name() }
    fn arity(&self) -> usize { self.signature().arity() }
    
    fn invoke(&self, args: &[Value]) -> ExecResult<Call> {
        self.signature().check_args(args)?;
        Ok(self.as_call())
    }
}


/// A user-defined function together with the environment it was declared in.
pub struct Function {
    signature: Signature,
    decl: Rc<FunctionDecl>,
    closure: Rc<Environment>,
}

impl Function {
    pub fn new(decl: Rc<FunctionDecl>, closure: Rc<Environment>) -> Self {
        let params = decl.params.iter().map(|param| param.name).collect();
        let signature = Signature::new(decl.name.name, params);
        Self { signature, decl, closure }
    }
    
    pub fn decl(&self) -> &FunctionDecl { &self.decl }
    pub fn closure(&self) -> &Rc<Environment> { &self.closure }
}

impl Invoke for Rc<Function> {
    fn signature(&self) -> &Signature { &self.signature }
    
    fn as_call(&self) -> Call {
        Call::Function(self.clone())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Function")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}


pub type NativeFn = Box<dyn Fn(&NativeFunction, &[Value]) -> ExecResult<Value>>;

pub struct NativeFunction {
    signature: Signature,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(signature: Signature, func: NativeFn) -> Self {
        Self { signature, func }
    }
    
    /// Arity is assumed to have been checked by the caller.
    pub fn call(&self, args: &[Value]) -> ExecResult<Value> {
        (self.func)(self, args)
    }
}

impl Invoke for Rc<NativeFunction> {
    fn signature(&self) -> &Signature { &self.signature }
    
    fn as_call(&self) -> Call {
        Call::Native(self.clone())
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("NativeFunction")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}
