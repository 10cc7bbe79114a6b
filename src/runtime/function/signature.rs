use core::fmt;
use crate::runtime::Value;
use crate::runtime::strings::StringSymbol;
use crate::runtime::errors::{ExecResult, RuntimeError};


#[derive(Clone, Debug)]
pub struct Signature {
    name: StringSymbol,
    params: Box<[StringSymbol]>,
}

impl Signature {
    pub fn new(name: impl Into<StringSymbol>, params: Vec<StringSymbol>) -> Self {
        Self {
            name: name.into(),
            params: params.into_boxed_slice(),
        }
    }
    
    pub fn name(&self) -> StringSymbol { self.name }
    pub fn params(&self) -> &[StringSymbol] { &self.params }
    pub fn arity(&self) -> usize { self.params.len() }
    
    pub fn check_args(&self, args: &[Value]) -> ExecResult<()> {
        if args.len() != self.arity() {
            return Err(RuntimeError::arity_mismatch(
                &self.name.to_string(), self.arity(), args.len()
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "fun {}(", self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                fmt.write_str(", ")?;
            }
            param.write(fmt)?;
        }
        fmt.write_str(")")
    }
}
