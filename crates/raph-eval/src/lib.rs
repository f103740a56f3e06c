//! Raph tree-walking evaluator.
//!
//! Executes Raph programs directly from the AST handed over by the parser.
//! The interpreter owns the tree and a scoped environment; expressions reduce
//! to [`Value`]s and statements run for their effect on the environment.
//!
//! Logging goes through `tracing`; install a subscriber in the host to see it.

mod builtins;
mod config;
mod constants;
mod env;
mod error;
mod evaluator;
mod interpreter;
mod operators;
mod value;

pub use builtins::{Builtin, BuiltinFn, BuiltinRegistry};
pub use config::{ConfigError, InterpreterConfig};
pub use constants::ConstantTable;
pub use env::{DefaultBindings, Environment};
pub use error::{EvalError, EvalResult, RunError};
pub use evaluator::Evaluator;
pub use interpreter::Interpreter;
pub use operators::{eval_binary, eval_unary};
pub use value::Value;
