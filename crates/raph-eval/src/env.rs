//! Scoped variable environment for the Raph evaluator.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The bindings seeded into the global scope of every fresh environment.
///
/// Kept as an explicit table so the defaults can be audited and replaced
/// by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultBindings {
    bindings: BTreeMap<String, Value>,
}

impl DefaultBindings {
    /// `origin = 0`, `rotate = 0`, `scale = 1`.
    pub fn standard() -> Self {
        Self::none()
            .with("origin", Value::Number(0.0))
            .with("rotate", Value::Number(0.0))
            .with("scale", Value::Number(1.0))
    }

    /// No defaults at all.
    pub fn none() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Add or replace a default binding.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for DefaultBindings {
    fn default() -> Self {
        Self::standard()
    }
}

/// A single scope level.
#[derive(Debug, Clone)]
struct Scope {
    bindings: BTreeMap<String, Value>,
}

impl Scope {
    fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }
}

/// Scoped variable environment with push/pop semantics.
///
/// Variables are looked up from innermost scope outward.
/// `define` always creates in the current (innermost) scope.
/// `set` updates the first scope where the variable exists.
/// The global scope is never popped.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// Create a new environment whose global scope holds `defaults`.
    pub fn new(defaults: &DefaultBindings) -> Self {
        let mut global = Scope::new();
        for (name, value) in defaults.iter() {
            global.bindings.insert(name.to_string(), *value);
        }
        Self {
            scopes: vec![global],
        }
    }

    /// Push a new scope (for loop induction variables).
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes on the stack, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Define a variable in the current (innermost) scope.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a variable, searching from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<&Value> {
        for scope in self.scopes.iter().rev() {
            if let Some(v) = scope.bindings.get(name) {
                return Some(v);
            }
        }
        None
    }

    /// Update a variable in the first scope where it exists.
    /// Returns `true` if found and updated, `false` if not found.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.bindings.get_mut(name) {
                *slot = value;
                return true;
            }
        }
        false
    }

    /// Assignment semantics: update the nearest existing binding, or
    /// create one in the innermost scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        if !self.set(name, value) {
            self.define(name, value);
        }
    }

    /// Get all bindings in the global (outermost) scope.
    pub fn global_bindings(&self) -> &BTreeMap<String, Value> {
        &self.scopes[0].bindings
    }

    /// Replace all bindings in the global scope and drop any inner scopes.
    pub fn restore_global(&mut self, bindings: BTreeMap<String, Value>) {
        self.scopes.truncate(1);
        self.scopes[0].bindings = bindings;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(&DefaultBindings::standard())
    }
}
