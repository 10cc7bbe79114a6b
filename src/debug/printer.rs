use core::fmt;
use crate::utils;
use crate::parser::expr::Expr;
use crate::parser::stmt::{Stmt, Branch, FunctionDecl};


/// Renders a program as S-expressions, one top-level statement per line.
pub fn print_program(program: &[Stmt]) -> impl fmt::Display + '_ {
    utils::delegate_fmt(move |fmt| {
        for stmt in program.iter() {
            writeln!(fmt, "{}", stmt)?;
        }
        Ok(())
    })
}


impl fmt::Display for Expr {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(fmt, "{}", literal),
            
            Self::Variable(ident) => write!(fmt, "{}", ident.name),
            
            Self::Assignment { target, value } => write!(fmt, "(= {} {})", target.name, value),
            
            Self::UnaryOp { op, operand, .. } => write!(fmt, "({} {})", op, operand),
            
            Self::BinaryOp { op, operands, .. } => {
                let (lhs, rhs) = &**operands;
                write!(fmt, "({} {} {})", op, lhs, rhs)
            },
            
            Self::Logical(op, operands) => {
                let (lhs, rhs) = &**operands;
                write!(fmt, "({} {} {})", op, lhs, rhs)
            },
            
            Self::Grouping(inner) => write!(fmt, "(group {})", inner),
            
            Self::Ternary(ternary) => write!(
                fmt, "(?: {} {} {})", 
                ternary.condition, ternary.then_branch, ternary.else_branch,
            ),
            
            Self::Call(call) => {
                write!(fmt, "(call {}", call.callee)?;
                for arg in call.args.iter() {
                    write!(fmt, " {}", arg)?;
                }
                fmt.write_str(")")
            },
        }
    }
}


impl fmt::Display for Stmt {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(fmt, "(; {})", expr),
            
            Self::Print(expr) => write!(fmt, "(print {})", expr),
            
            Self::Let { name, init: Some(init) } => write!(fmt, "(let {} {})", name.name, init),
            Self::Let { name, init: None } => write!(fmt, "(let {})", name.name),
            
            Self::Block(stmts) => {
                fmt.write_str("(block")?;
                fmt_suite(fmt, stmts)?;
                fmt.write_str(")")
            },
            
            Self::If { condition, then_branch, else_branch: Some(else_branch) } 
                => write!(fmt, "(if {} {} {})", condition, then_branch, else_branch),
            Self::If { condition, then_branch, else_branch: None } 
                => write!(fmt, "(if {} {})", condition, then_branch),
            
            Self::While { condition, body } => write!(fmt, "(while {} {})", condition, body),
            
            Self::Branch(Branch::Break, ..) => fmt.write_str("(break)"),
            Self::Branch(Branch::Continue, ..) => fmt.write_str("(continue)"),
            
            Self::Return(_, Some(expr)) => write!(fmt, "(return {})", expr),
            Self::Return(_, None) => fmt.write_str("(return)"),
            
            Self::Function(decl) => write!(fmt, "{}", decl),
        }
    }
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "(fun {} (", self.name.name)?;
        utils::fmt_join(fmt, " ", self.params.iter().map(|param| param.name))?;
        fmt.write_str(")")?;
        fmt_suite(fmt, &self.body)?;
        fmt.write_str(")")
    }
}

fn fmt_suite(fmt: &mut fmt::Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    for stmt in stmts.iter() {
        write!(fmt, " {}", stmt)?;
    }
    Ok(())
}
