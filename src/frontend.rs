//! output/error reporting and formatting

use std::fmt;
use std::io::{self, Write};
use crate::utils;
use crate::language::LineNo;
use crate::runtime::RuntimeError;
use crate::SyntaxError;


/// Every diagnostic is presented as `[line N] Error: message`.
pub fn render_error<'a>(line: Option<LineNo>, message: &'a dyn fmt::Display) -> impl fmt::Display + 'a {
    utils::delegate_fmt(move |fmt| fmt_error(fmt, line, message))
}

pub fn fmt_error(fmt: &mut fmt::Formatter<'_>, line: Option<LineNo>, message: &dyn fmt::Display) -> fmt::Result {
    if let Some(line) = line {
        write!(fmt, "[line {}] ", line)?;
    }
    write!(fmt, "Error: {}", message)
}

pub fn print_runtime_error(out: &mut impl Write, error: &RuntimeError) -> io::Result<()> {
    writeln!(out, "{}", render_error(error.line(), error))
}

pub fn print_syntax_errors(out: &mut impl Write, errors: &[SyntaxError]) -> io::Result<()> {
    for error in errors.iter() {
        writeln!(out, "{}", render_error(Some(error.line()), error))?;
    }
    Ok(())
}
