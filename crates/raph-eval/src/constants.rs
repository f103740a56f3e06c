//! Read-only table of named constants.
//!
//! Constants live in their own namespace: a `Constant` node never consults
//! the variable environment, and nothing can assign to a constant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantTable {
    values: BTreeMap<String, f64>,
}

impl ConstantTable {
    /// `pi`, `tau`, `e`, `sqrt2`, `ln2`, `ln10`.
    pub fn standard() -> Self {
        use std::f64::consts;

        Self::empty()
            .with("pi", consts::PI)
            .with("tau", consts::TAU)
            .with("e", consts::E)
            .with("sqrt2", consts::SQRT_2)
            .with("ln2", consts::LN_2)
            .with("ln10", consts::LN_10)
    }

    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Add or replace a constant.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Resolve a constant for evaluation.
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.get(name)
            .map(Value::Number)
            .ok_or_else(|| EvalError::UndefinedConstant(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for ConstantTable {
    fn default() -> Self {
        Self::standard()
    }
}
