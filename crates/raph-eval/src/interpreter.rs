//! Program driver.
//!
//! Owns the program tree and the evaluator. Each [`Interpreter::run`]
//! starts from a fresh environment seeded with the configured defaults and
//! either completes the whole program or stops at the first error.

use crate::config::InterpreterConfig;
use crate::env::{DefaultBindings, Environment};
use crate::error::{EvalResult, RunError};
use crate::evaluator::Evaluator;
use crate::value::Value;
use raph_types::ast::*;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// Runtime driver for a Raph program.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// The program tree (read-only).
    program: Program,
    /// The evaluator engine.
    eval: Evaluator,
    /// Bindings every fresh environment starts with.
    defaults: DefaultBindings,
}

impl Interpreter {
    /// Create an interpreter with the standard defaults, constants and builtins.
    pub fn new(program: Program) -> Self {
        Self::with_config(program, InterpreterConfig::default())
    }

    /// Create with a custom configuration.
    pub fn with_config(program: Program, config: InterpreterConfig) -> Self {
        let builtins = config.builtins();
        let eval = Evaluator::new(
            Environment::new(&config.defaults),
            config.constants,
            builtins,
        );
        Self {
            program,
            eval,
            defaults: config.defaults,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    // ══════════════════════════════════════════════════════════════════════
    // Execution
    // ══════════════════════════════════════════════════════════════════════

    /// Run the whole program in a fresh environment.
    ///
    /// On failure, the environment keeps whatever the statements before the
    /// error already did; nothing is rolled back.
    pub fn run(&mut self) -> Result<(), RunError> {
        self.reset();
        info!(statements = self.program.stmts.len(), "running program");

        for (index, stmt) in self.program.stmts.iter().enumerate() {
            if let Err(error) = self.eval.exec_stmt(stmt) {
                warn!(statement = index, node = stmt.kind_name(), %error, "program aborted");
                return Err(RunError {
                    statement: index,
                    node: stmt.kind_name(),
                    error,
                });
            }
        }

        info!(bindings = self.eval.env.global_bindings().len(), "program finished");
        Ok(())
    }

    /// Execute one more statement against the retained environment
    /// (REPL-style use).
    pub fn run_incremental(&mut self, stmt: &Stmt) -> EvalResult<()> {
        self.eval.exec_stmt(stmt)
    }

    /// Evaluate an expression against the current environment.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<Value> {
        self.eval.eval_expr(expr)
    }

    /// Discard all bindings and start over from the defaults.
    pub fn reset(&mut self) {
        let globals = self
            .defaults
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        self.eval.env.restore_global(globals);
    }

    // ══════════════════════════════════════════════════════════════════════
    // State access
    // ══════════════════════════════════════════════════════════════════════

    /// Get the current value of a variable.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.eval.env.get(name).copied()
    }

    pub fn environment(&self) -> &Environment {
        &self.eval.env
    }

    /// Get all global bindings as a snapshot.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.eval.env.global_bindings().clone()
    }

    /// Serialize the global bindings to compact JSON.
    ///
    /// JSON has no NaN or infinity: non-finite numbers are written as `null`,
    /// which does not read back as a [`Value`]. Use [`Interpreter::snapshot`]
    /// when those must survive.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.eval.env.global_bindings())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Dump
    // ══════════════════════════════════════════════════════════════════════

    /// Write the structural dump of the program. Does not run anything.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.program.dump(out)
    }

    pub fn dump_string(&self) -> String {
        self.program.dump_string()
    }
}
