//! Structural dump of a Raph tree.
//!
//! One line per node: `indent` tabs, the node tag in angle brackets, and the
//! node's literal payload if it has one. Children follow at `indent + 1`.
//! The dump never evaluates anything, so it works on trees that would fail
//! at runtime.

use std::fmt::{self, Write};

use crate::ast::{Expr, ForStmt, Program, Stmt};

fn line<W: Write>(out: &mut W, indent: usize, tag: &str) -> fmt::Result {
    for _ in 0..indent {
        out.write_char('\t')?;
    }
    write!(out, "<{tag}>")
}

impl Program {
    /// Write the dump of the whole program, starting at indent 0.
    pub fn dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        line(out, 0, "Program")?;
        out.write_char('\n')?;
        for stmt in &self.stmts {
            stmt.dump(out, 1)?;
        }
        Ok(())
    }

    pub fn dump_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dump(&mut out);
        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f)
    }
}

impl Stmt {
    pub fn dump<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        line(out, indent, self.kind_name())?;
        match self {
            Stmt::Empty => writeln!(out),
            Stmt::Compound(stmts) => {
                writeln!(out)?;
                for stmt in stmts {
                    stmt.dump(out, indent + 1)?;
                }
                Ok(())
            }
            Stmt::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(out)?;
                condition.dump(out, indent + 1)?;
                then_branch.dump(out, indent + 1)?;
                else_branch.dump(out, indent + 1)
            }
            Stmt::While { condition, body } | Stmt::Until { condition, body } => {
                writeln!(out)?;
                condition.dump(out, indent + 1)?;
                body.dump(out, indent + 1)
            }
            Stmt::For(ForStmt {
                var,
                from,
                to,
                step,
                body,
            }) => {
                writeln!(out, ": {var}")?;
                from.dump(out, indent + 1)?;
                to.dump(out, indent + 1)?;
                step.dump(out, indent + 1)?;
                body.dump(out, indent + 1)
            }
            Stmt::Assign { name, value } => {
                writeln!(out, ": {name}")?;
                value.dump(out, indent + 1)
            }
            Stmt::Expr(expr) => {
                writeln!(out)?;
                expr.dump(out, indent + 1)
            }
        }
    }
}

impl Expr {
    pub fn dump<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        line(out, indent, self.kind_name())?;
        match self {
            Expr::Variable(name) | Expr::Constant(name) => writeln!(out, ": {name}"),
            Expr::Numeric(value) => writeln!(out, ": {value}"),
            Expr::Boolean(value) => writeln!(out, ": {value}"),
            Expr::Vector { x, y } => {
                writeln!(out)?;
                x.dump(out, indent + 1)?;
                y.dump(out, indent + 1)
            }
            Expr::FunctionCall { callee, args } => {
                writeln!(out)?;
                callee.dump(out, indent + 1)?;
                for arg in args {
                    arg.dump(out, indent + 1)?;
                }
                Ok(())
            }
            Expr::ArrayAccess { base, index } => {
                writeln!(out)?;
                base.dump(out, indent + 1)?;
                index.dump(out, indent + 1)
            }
            Expr::Unary { op, operand } => {
                writeln!(out, ": @{op}")?;
                operand.dump(out, indent + 1)
            }
            Expr::Binary { left, op, right } => {
                writeln!(out, ": ${op}")?;
                left.dump(out, indent + 1)?;
                right.dump(out, indent + 1)
            }
        }
    }
}
