//! Runtime values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Raph runtime value.
///
/// Values are small and `Copy`; every operation produces a new value.
/// Serialized untagged: numbers and booleans as JSON scalars, vectors as
/// `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Vector { x: f64, y: f64 },
}

impl Value {
    pub fn vector(x: f64, y: f64) -> Self {
        Value::Vector { x, y }
    }

    /// Shape name used in type mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Vector { .. } => "vector",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<(f64, f64)> {
        match self {
            Value::Vector { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(f, *n),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Vector { x, y } => {
                f.write_str("(")?;
                fmt_number(f, *x)?;
                f.write_str(", ")?;
                fmt_number(f, *y)?;
                f.write_str(")")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
