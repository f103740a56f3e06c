//! Shared types for the Raph interpreter.
//!
//! This crate defines the AST node types handed over by the parser, the
//! operator enums, and the structural dump used for debugging.

mod dump;
pub mod ast;

pub use ast::{BinOp, Expr, ForStmt, Program, Stmt, UnaryOp, UnknownOperator};
