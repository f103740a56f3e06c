//! Operator semantics over already-evaluated operands.
//!
//! Dispatch is by operand shape: (number, number), (vector, vector),
//! (vector, number) and (boolean, boolean). Every other pairing is a type
//! mismatch. Short-circuiting of `&&`/`||` happens in the evaluator, before
//! the right operand exists; [`eval_binary`] only sees fully evaluated
//! operands.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use raph_types::{BinOp, UnaryOp};

fn context(op: BinOp) -> String {
    format!("operator '{op}'")
}

/// Apply a binary operator to two values.
pub fn eval_binary(op: BinOp, lhs: Value, rhs: Value) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => number_binary(op, a, b),
        (Value::Vector { x: ax, y: ay }, Value::Vector { x: bx, y: by }) => {
            vector_binary(op, (ax, ay), (bx, by))
        }
        (Value::Vector { x, y }, Value::Number(n)) => scale_binary(op, (x, y), n),
        (Value::Boolean(a), Value::Boolean(b)) => bool_binary(op, a, b),
        _ => Err(operand_mismatch(op, lhs, rhs)),
    }
}

/// Apply a unary operator to a value.
pub fn eval_unary(op: UnaryOp, operand: Value) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Neg, Value::Vector { x, y }) => Ok(Value::vector(-x, -y)),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOp::Neg, other) => Err(EvalError::type_mismatch(
            "operator '-'",
            "number or vector",
            other.type_name(),
        )),
        (UnaryOp::Not, other) => Err(EvalError::type_mismatch(
            "operator '!'",
            "boolean",
            other.type_name(),
        )),
    }
}

/// Divide, trapping a zero divisor.
fn checked_div(a: f64, b: f64) -> EvalResult<f64> {
    if b == 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(a / b)
    }
}

fn arith(op: BinOp, a: f64, b: f64) -> Option<EvalResult<f64>> {
    match op {
        BinOp::Add => Some(Ok(a + b)),
        BinOp::Sub => Some(Ok(a - b)),
        BinOp::Mul => Some(Ok(a * b)),
        BinOp::Div => Some(checked_div(a, b)),
        _ => None,
    }
}

fn number_binary(op: BinOp, a: f64, b: f64) -> EvalResult<Value> {
    if let Some(result) = arith(op, a, b) {
        return result.map(Value::Number);
    }
    let result = match op {
        BinOp::Less => a < b,
        BinOp::LessEq => a <= b,
        BinOp::Greater => a > b,
        BinOp::GreaterEq => a >= b,
        BinOp::Eq => a == b,
        BinOp::NotEq => a != b,
        _ => {
            return Err(EvalError::type_mismatch(context(op), "boolean", "number"));
        }
    };
    Ok(Value::Boolean(result))
}

fn vector_binary(op: BinOp, (ax, ay): (f64, f64), (bx, by): (f64, f64)) -> EvalResult<Value> {
    match op {
        BinOp::Eq => return Ok(Value::Boolean(ax == bx && ay == by)),
        BinOp::NotEq => return Ok(Value::Boolean(ax != bx || ay != by)),
        _ => {}
    }
    match (arith(op, ax, bx), arith(op, ay, by)) {
        (Some(x), Some(y)) => Ok(Value::vector(x?, y?)),
        _ if op.is_logical() => Err(EvalError::type_mismatch(context(op), "boolean", "vector")),
        _ => Err(EvalError::type_mismatch(context(op), "number", "vector")),
    }
}

fn scale_binary(op: BinOp, (x, y): (f64, f64), n: f64) -> EvalResult<Value> {
    match (arith(op, x, n), arith(op, y, n)) {
        (Some(x), Some(y)) => Ok(Value::vector(x?, y?)),
        _ if op.is_logical() => Err(EvalError::type_mismatch(context(op), "boolean", "vector")),
        _ => Err(EvalError::type_mismatch(context(op), "vector", "number")),
    }
}

fn bool_binary(op: BinOp, a: bool, b: bool) -> EvalResult<Value> {
    let result = match op {
        BinOp::And => a && b,
        BinOp::Or => a || b,
        BinOp::Eq => a == b,
        BinOp::NotEq => a != b,
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
            return Err(EvalError::type_mismatch(
                context(op),
                "number or vector",
                "boolean",
            ));
        }
        BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq => {
            return Err(EvalError::type_mismatch(context(op), "number", "boolean"));
        }
    };
    Ok(Value::Boolean(result))
}

/// Error for operand pairs with no entry in the operator table.
///
/// The left operand fixes what the right one should have been, unless the
/// left operand itself can never appear on that side of `op`.
fn operand_mismatch(op: BinOp, lhs: Value, rhs: Value) -> EvalError {
    let (expected, got) = if op.is_logical() {
        let got = if lhs.as_bool().is_some() { rhs } else { lhs };
        ("boolean", got.type_name())
    } else {
        match lhs {
            Value::Number(_) => ("number", rhs.type_name()),
            Value::Vector { .. } if op.is_comparison() => ("vector", rhs.type_name()),
            Value::Vector { .. } => ("vector or number", rhs.type_name()),
            Value::Boolean(_) if matches!(op, BinOp::Eq | BinOp::NotEq) => {
                ("boolean", rhs.type_name())
            }
            Value::Boolean(_) if op.is_comparison() => ("number", "boolean"),
            Value::Boolean(_) => ("number or vector", "boolean"),
        }
    };
    EvalError::type_mismatch(context(op), expected, got)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn vec2(x: f64, y: f64) -> Value {
        Value::vector(x, y)
    }

    #[test]
    fn test_number_arithmetic() {
        assert_eq!(eval_binary(BinOp::Add, num(2.0), num(3.0)), Ok(num(5.0)));
        assert_eq!(eval_binary(BinOp::Sub, num(2.0), num(3.0)), Ok(num(-1.0)));
        assert_eq!(eval_binary(BinOp::Mul, num(2.0), num(3.0)), Ok(num(6.0)));
        assert_eq!(eval_binary(BinOp::Div, num(3.0), num(2.0)), Ok(num(1.5)));
    }

    #[test]
    fn test_number_division_by_zero() {
        assert_eq!(
            eval_binary(BinOp::Div, num(1.0), num(0.0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_number_comparisons() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(eval_binary(BinOp::Less, num(1.0), num(2.0)), Ok(t));
        assert_eq!(eval_binary(BinOp::LessEq, num(2.0), num(2.0)), Ok(t));
        assert_eq!(eval_binary(BinOp::Greater, num(1.0), num(2.0)), Ok(f));
        assert_eq!(eval_binary(BinOp::GreaterEq, num(2.0), num(3.0)), Ok(f));
        assert_eq!(eval_binary(BinOp::Eq, num(2.0), num(2.0)), Ok(t));
        assert_eq!(eval_binary(BinOp::NotEq, num(2.0), num(2.0)), Ok(f));
    }

    #[test]
    fn test_vector_componentwise() {
        assert_eq!(
            eval_binary(BinOp::Add, vec2(1.0, 2.0), vec2(3.0, 4.0)),
            Ok(vec2(4.0, 6.0))
        );
        assert_eq!(
            eval_binary(BinOp::Mul, vec2(1.0, 2.0), vec2(3.0, 4.0)),
            Ok(vec2(3.0, 8.0))
        );
        assert_eq!(
            eval_binary(BinOp::Div, vec2(1.0, 2.0), vec2(1.0, 0.0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_vector_equality_only() {
        assert_eq!(
            eval_binary(BinOp::Eq, vec2(1.0, 2.0), vec2(1.0, 2.0)),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            eval_binary(BinOp::NotEq, vec2(1.0, 2.0), vec2(1.0, 3.0)),
            Ok(Value::Boolean(true))
        );
        assert!(matches!(
            eval_binary(BinOp::Less, vec2(1.0, 2.0), vec2(1.0, 3.0)),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_vector_scaled_by_number() {
        assert_eq!(
            eval_binary(BinOp::Mul, vec2(1.0, -2.0), num(3.0)),
            Ok(vec2(3.0, -6.0))
        );
        assert_eq!(
            eval_binary(BinOp::Add, vec2(1.0, -2.0), num(1.0)),
            Ok(vec2(2.0, -1.0))
        );
        assert_eq!(
            eval_binary(BinOp::Div, vec2(1.0, 2.0), num(0.0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_number_times_vector_is_mismatch() {
        assert_eq!(
            eval_binary(BinOp::Mul, num(2.0), vec2(1.0, 1.0)),
            Err(EvalError::type_mismatch("operator '*'", "number", "vector"))
        );
    }

    #[test]
    fn test_vector_number_comparison_is_mismatch() {
        assert_eq!(
            eval_binary(BinOp::Eq, vec2(0.0, 0.0), num(0.0)),
            Err(EvalError::type_mismatch("operator '=='", "vector", "number"))
        );
    }

    #[test]
    fn test_booleans() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(eval_binary(BinOp::And, t, f), Ok(f));
        assert_eq!(eval_binary(BinOp::Or, t, f), Ok(t));
        assert_eq!(eval_binary(BinOp::Eq, f, f), Ok(t));
        assert_eq!(eval_binary(BinOp::NotEq, t, f), Ok(t));
        assert_eq!(
            eval_binary(BinOp::Add, t, f),
            Err(EvalError::type_mismatch(
                "operator '+'",
                "number or vector",
                "boolean"
            ))
        );
        assert_eq!(
            eval_binary(BinOp::Less, t, f),
            Err(EvalError::type_mismatch("operator '<'", "number", "boolean"))
        );
    }

    #[test]
    fn test_logical_on_numbers_is_mismatch() {
        assert_eq!(
            eval_binary(BinOp::And, num(1.0), num(0.0)),
            Err(EvalError::type_mismatch("operator '&&'", "boolean", "number"))
        );
        assert_eq!(
            eval_binary(BinOp::Or, Value::Boolean(true), num(0.0)),
            Err(EvalError::type_mismatch("operator '||'", "boolean", "number"))
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(UnaryOp::Neg, num(2.0)), Ok(num(-2.0)));
        assert_eq!(eval_unary(UnaryOp::Neg, vec2(1.0, -1.0)), Ok(vec2(-1.0, 1.0)));
        assert_eq!(
            eval_unary(UnaryOp::Not, Value::Boolean(true)),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            eval_unary(UnaryOp::Not, num(1.0)),
            Err(EvalError::type_mismatch("operator '!'", "boolean", "number"))
        );
        assert_eq!(
            eval_unary(UnaryOp::Neg, Value::Boolean(true)),
            Err(EvalError::type_mismatch(
                "operator '-'",
                "number or vector",
                "boolean"
            ))
        );
    }
}
