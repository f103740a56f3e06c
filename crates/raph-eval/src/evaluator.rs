//! Core expression and statement evaluator.

use crate::builtins::BuiltinRegistry;
use crate::constants::ConstantTable;
use crate::env::{DefaultBindings, Environment};
use crate::error::{EvalError, EvalResult};
use crate::operators::{eval_binary, eval_unary};
use crate::value::Value;
use raph_types::ast::*;
use tracing::{debug, trace};

/// The core evaluator: walks AST nodes and produces Values.
///
/// Expressions are evaluated strictly left-to-right, depth-first, and are
/// never cached: evaluating the same node twice runs it twice. Errors are
/// returned, never recovered from, and bubble up unchanged.
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// Variable environment (scoped).
    pub env: Environment,
    constants: ConstantTable,
    builtins: BuiltinRegistry,
}

impl Evaluator {
    pub fn new(env: Environment, constants: ConstantTable, builtins: BuiltinRegistry) -> Self {
        Self {
            env,
            constants,
            builtins,
        }
    }

    /// Standard defaults, constants and builtins.
    pub fn standard() -> Self {
        Self::new(
            Environment::new(&DefaultBindings::standard()),
            ConstantTable::standard(),
            BuiltinRegistry::standard(),
        )
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a Value. Never writes the environment.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Numeric(n) => Ok(Value::Number(*n)),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Variable(name) => self.eval_variable(name),
            Expr::Constant(name) => self.constants.lookup(name),
            Expr::Vector { x, y } => self.eval_vector(x, y),
            Expr::FunctionCall { callee, args } => self.eval_call(callee, args),
            Expr::ArrayAccess { base, index } => self.eval_array_access(base, index),
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                eval_unary(*op, value)
            }
            Expr::Binary { left, op, right } => self.eval_binary(left, *op, right),
        }
    }

    // ── Names & Literals ─────────────────────────────────────────────────

    fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        self.env
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    fn eval_vector(&self, x: &Expr, y: &Expr) -> EvalResult<Value> {
        let x = self.eval_number(x, "vector x component")?;
        let y = self.eval_number(y, "vector y component")?;
        Ok(Value::vector(x, y))
    }

    // ── Calls & Access ───────────────────────────────────────────────────

    /// Evaluate `callee(args...)`.
    ///
    /// The callee must be a plain name. Any other callee is still evaluated
    /// (so its own errors surface first) and then rejected, since no value
    /// is callable.
    fn eval_call(&self, callee: &Expr, args: &[Expr]) -> EvalResult<Value> {
        let name = match callee {
            Expr::Variable(name) | Expr::Constant(name) => name.as_str(),
            other => {
                let value = self.eval_expr(other)?;
                return Err(EvalError::type_mismatch(
                    "function call",
                    "function name",
                    value.type_name(),
                ));
            }
        };
        let builtin = self
            .builtins
            .get(name)
            .ok_or_else(|| EvalError::UndefinedFunction(name.to_string()))?;

        let mut arg_vals = Vec::with_capacity(args.len());
        for arg in args {
            arg_vals.push(self.eval_expr(arg)?);
        }
        builtin.invoke(&arg_vals)
    }

    /// Evaluate `base[index]`: index 0 is `x`, index 1 is `y`.
    fn eval_array_access(&self, base: &Expr, index: &Expr) -> EvalResult<Value> {
        let base = self.eval_expr(base)?;
        let index = self.eval_number(index, "array index")?.trunc();
        let (x, y) = match base {
            Value::Vector { x, y } => (x, y),
            other => {
                return Err(EvalError::type_mismatch(
                    "array access",
                    "vector",
                    other.type_name(),
                ));
            }
        };
        if index == 0.0 {
            Ok(Value::Number(x))
        } else if index == 1.0 {
            Ok(Value::Number(y))
        } else {
            Err(EvalError::IndexOutOfRange(index))
        }
    }

    // ── Operators ────────────────────────────────────────────────────────

    fn eval_binary(&self, left: &Expr, op: BinOp, right: &Expr) -> EvalResult<Value> {
        // Short-circuit for logical operators: the right operand is not
        // evaluated once the left one decides the result.
        if op.is_logical() {
            let context = format!("operator '{op}'");
            let lv = self.eval_bool(left, &context)?;
            return match (op, lv) {
                (BinOp::And, false) => Ok(Value::Boolean(false)),
                (BinOp::Or, true) => Ok(Value::Boolean(true)),
                _ => Ok(Value::Boolean(self.eval_bool(right, &context)?)),
            };
        }

        let lv = self.eval_expr(left)?;
        let rv = self.eval_expr(right)?;
        eval_binary(op, lv, rv)
    }

    // ── Shape helpers ────────────────────────────────────────────────────

    fn eval_number(&self, expr: &Expr, context: &str) -> EvalResult<f64> {
        match self.eval_expr(expr)? {
            Value::Number(n) => Ok(n),
            other => Err(EvalError::type_mismatch(context, "number", other.type_name())),
        }
    }

    fn eval_bool(&self, expr: &Expr, context: &str) -> EvalResult<bool> {
        match self.eval_expr(expr)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::type_mismatch(context, "boolean", other.type_name())),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Block & Statement execution
    // ══════════════════════════════════════════════════════════════════════

    /// Execute statements in order, stopping at the first error.
    ///
    /// Effects of statements that already ran are kept.
    pub fn exec_block(&mut self, stmts: &[Stmt]) -> EvalResult<()> {
        for stmt in stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Execute a single statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        trace!(node = stmt.kind_name(), "exec");
        match stmt {
            Stmt::Empty => Ok(()),
            Stmt::Compound(stmts) => self.exec_block(stmts),
            Stmt::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_bool(condition, "if condition")? {
                    self.exec_stmt(then_branch)
                } else {
                    self.exec_stmt(else_branch)
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_bool(condition, "while condition")? {
                    self.exec_stmt(body)?;
                }
                Ok(())
            }
            Stmt::Until { condition, body } => {
                while !self.eval_bool(condition, "until condition")? {
                    self.exec_stmt(body)?;
                }
                Ok(())
            }
            Stmt::For(for_stmt) => self.exec_for(for_stmt),
            Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.assign(name, value);
                Ok(())
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }
        }
    }

    /// Execute a counted loop.
    ///
    /// Bounds and step are evaluated once. The step must be finite and
    /// non-zero. The induction variable lives in its own scope, which is
    /// popped on every exit path.
    fn exec_for(&mut self, for_stmt: &ForStmt) -> EvalResult<()> {
        let from = self.eval_number(&for_stmt.from, "for loop start")?;
        let to = self.eval_number(&for_stmt.to, "for loop end")?;
        let step = self.eval_number(&for_stmt.step, "for loop step")?;
        if step == 0.0 {
            return Err(EvalError::ZeroStep);
        }
        if !step.is_finite() {
            return Err(EvalError::DomainError(format!(
                "for loop step must be finite, got {step}"
            )));
        }

        debug!(var = %for_stmt.var, from, to, step, "entering for loop");
        self.env.push_scope();
        self.env.define(&for_stmt.var, Value::Number(from));
        let result = self.run_for_iterations(&for_stmt.var, to, step, &for_stmt.body);
        self.env.pop_scope();
        debug!(var = %for_stmt.var, ok = result.is_ok(), "left for loop");
        result
    }

    fn run_for_iterations(&mut self, var: &str, to: f64, step: f64, body: &Stmt) -> EvalResult<()> {
        loop {
            let current = self.induction_value(var)?;
            let in_range = if step > 0.0 { current <= to } else { current >= to };
            if !in_range {
                return Ok(());
            }
            self.exec_stmt(body)?;
            // Read back: the body may have assigned to the induction variable.
            let current = self.induction_value(var)?;
            let next = current + step;
            if next == current {
                return Err(EvalError::DomainError(format!(
                    "for loop step {step} does not advance {var} past {current}"
                )));
            }
            self.env.set(var, Value::Number(next));
        }
    }

    fn induction_value(&self, var: &str) -> EvalResult<f64> {
        match self.env.get(var) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(EvalError::type_mismatch(
                "for loop variable",
                "number",
                other.type_name(),
            )),
            None => Err(EvalError::UndefinedVariable(var.to_string())),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::standard()
    }
}
