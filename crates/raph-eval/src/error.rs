//! Runtime error types for the Raph evaluator.

use thiserror::Error;

/// Evaluation error. Every kind is fatal to the current run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Variable lookup failed in every scope.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    /// Name not present in the constant table.
    #[error("undefined constant: {0}")]
    UndefinedConstant(String),
    /// Call to a name that is not a registered builtin.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    /// Builtin called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Operand, condition or argument of the wrong shape.
    #[error("type mismatch in {context}: expected {expected}, got {got}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        got: &'static str,
    },
    /// Vector index outside `{0, 1}`.
    #[error("index {0} out of range for vector")]
    IndexOutOfRange(f64),
    #[error("division by zero")]
    DivisionByZero,
    /// `for` loop whose step evaluated to zero.
    #[error("for loop step is zero")]
    ZeroStep,
    /// Builtin argument outside the function's domain, e.g. `sqrt(-1)`.
    #[error("domain error: {0}")]
    DomainError(String),
}

impl EvalError {
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected,
            got,
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// A failed program run, as reported by the driver.
///
/// Names the top-level statement that aborted the run; the underlying
/// [`EvalError`] is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("statement {statement} ({node}) failed: {error}")]
pub struct RunError {
    /// Zero-based index of the failing top-level statement.
    pub statement: usize,
    /// Node tag of the failing statement, e.g. `ForStatement`.
    pub node: &'static str,
    #[source]
    pub error: EvalError,
}
