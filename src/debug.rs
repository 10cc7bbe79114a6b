//! Debugging views of the syntax tree.

mod printer;

pub use printer::print_program;
