use core::fmt;
use core::cell::RefCell;
use core::marker::PhantomData;
use string_interner::{self, DefaultBackend, DefaultSymbol};
use string_interner::symbol::Symbol;

use crate::runtime::DefaultBuildHasher;


thread_local! {
    pub static STRING_TABLE: RefCell<StringInterner> = RefCell::new(StringInterner::new());
}

type InternSymbol = DefaultSymbol;
type InternBackend = DefaultBackend<InternSymbol>;

pub type StringInterner = string_interner::StringInterner<InternBackend, DefaultBuildHasher>;


// Interned Strings

type PhantomUnsend = PhantomData<*mut ()>;

/// An identifier interned in the thread-local string table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringSymbol(InternSymbol, PhantomUnsend);

// Not Send because we depend on the thread-local string table.

impl StringSymbol {
    fn as_usize(&self) -> usize {
        self.0.to_usize()
    }
    
    /// Interns a string slice, creating a `StringSymbol`
    pub fn intern(string: &str) -> Self {
        let symbol = STRING_TABLE.with(|string_table| string_table.borrow_mut().get_or_intern(string));
        Self(symbol, PhantomData)
    }
    
    pub fn write(&self, buf: &mut impl fmt::Write) -> fmt::Result {
        STRING_TABLE.with(|string_table| {
            match string_table.borrow().resolve(self.0) {
                Some(string) => buf.write_str(string),
                None => Err(fmt::Error),
            }
        })
    }
}

impl From<&str> for StringSymbol {
    fn from(string: &str) -> Self {
        Self::intern(string)
    }
}

impl fmt::Debug for StringSymbol {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "StringSymbol({}, ", self.as_usize())?;
        self.write(fmt)?;
        fmt.write_str(")")
    }
}

impl fmt::Display for StringSymbol {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(fmt)
    }
}
