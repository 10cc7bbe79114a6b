use ahash;
use static_assertions::{assert_impl_all, assert_not_impl_any};
use std::rc::Rc;

pub mod strings;
pub mod value;
pub mod function;
pub mod environment;
pub mod errors;


pub use strings::{StringSymbol, STRING_TABLE};
pub use value::Value;
pub use function::{Function, NativeFunction, NativeFn, Signature, Invoke, Call};
pub use environment::Environment;
pub use errors::{RuntimeError, ErrorKind, ExecResult};


// Default Hasher

pub type DefaultBuildHasher = ahash::RandomState;


// Environments and interned symbols are bound to the thread that created them.
assert_not_impl_any!(StringSymbol: Send, Sync);
assert_not_impl_any!(Rc<Environment>: Send, Sync);
assert_impl_all!(Value: Clone);
