//! Builtin function registry.
//!
//! Maps a name to a fixed-arity native function. The registry is filled at
//! construction time and only read during execution. Calls are positional,
//! arguments arrive already evaluated, and each call yields one value.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Native implementation of a builtin.
pub type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// A registered builtin: name, arity and implementation.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl Builtin {
    /// Check the argument count, then run the implementation.
    pub fn invoke(&self, args: &[Value]) -> EvalResult<Value> {
        if args.len() != self.arity {
            return Err(EvalError::ArityMismatch {
                name: self.name.to_string(),
                expected: self.arity,
                got: args.len(),
            });
        }
        debug!(function = self.name, argc = args.len(), "calling builtin");
        (self.func)(args)
    }
}

/// Registry mapping function name → [`Builtin`].
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    functions: BTreeMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    /// A registry with no functions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard math and vector builtins.
    pub fn standard() -> Self {
        let mut reg = Self::empty();
        reg.register_trig();
        reg.register_numeric();
        reg.register_vector();
        reg
    }

    /// Register `name`, replacing (and returning) any earlier entry.
    pub fn register(&mut self, name: &'static str, arity: usize, func: BuiltinFn) -> Option<Builtin> {
        self.functions.insert(name, Builtin { name, arity, func })
    }

    /// Look up a builtin by name.
    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Call a builtin by name with already evaluated arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> EvalResult<Value> {
        self.get(name)
            .ok_or_else(|| EvalError::UndefinedFunction(name.to_string()))?
            .invoke(args)
    }

    // ── Standard library ─────────────────────────────────────────────────

    fn register_trig(&mut self) {
        self.register("sin", 1, |args| map_number("sin", args, f64::sin));
        self.register("cos", 1, |args| map_number("cos", args, f64::cos));
        self.register("tan", 1, |args| map_number("tan", args, f64::tan));
        self.register("asin", 1, |args| map_number("asin", args, f64::asin));
        self.register("acos", 1, |args| map_number("acos", args, f64::acos));
        self.register("atan", 1, |args| map_number("atan", args, f64::atan));
        self.register("atan2", 2, |args| zip_numbers("atan2", args, f64::atan2));
        self.register("rad", 1, |args| map_number("rad", args, f64::to_radians));
        self.register("deg", 1, |args| map_number("deg", args, f64::to_degrees));
    }

    fn register_numeric(&mut self) {
        self.register("sqrt", 1, |args| map_number("sqrt", args, f64::sqrt));
        self.register("abs", 1, |args| map_number("abs", args, f64::abs));
        self.register("floor", 1, |args| map_number("floor", args, f64::floor));
        self.register("ceil", 1, |args| map_number("ceil", args, f64::ceil));
        self.register("round", 1, |args| map_number("round", args, f64::round));
        self.register("min", 2, |args| zip_numbers("min", args, f64::min));
        self.register("max", 2, |args| zip_numbers("max", args, f64::max));
        self.register("pow", 2, |args| zip_numbers("pow", args, f64::powf));
    }

    fn register_vector(&mut self) {
        self.register("vec", 2, |args| {
            let x = number_arg("vec", args, 0)?;
            let y = number_arg("vec", args, 1)?;
            Ok(Value::vector(x, y))
        });
        self.register("len", 1, |args| {
            let (x, y) = vector_arg("len", args, 0)?;
            Ok(Value::Number(x.hypot(y)))
        });
        self.register("dot", 2, |args| {
            let (ax, ay) = vector_arg("dot", args, 0)?;
            let (bx, by) = vector_arg("dot", args, 1)?;
            Ok(Value::Number(ax * bx + ay * by))
        });
        self.register("normalize", 1, |args| {
            let (x, y) = vector_arg("normalize", args, 0)?;
            let len = x.hypot(y);
            if len == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::vector(x / len, y / len))
        });
        self.register("rot", 2, |args| {
            let (x, y) = vector_arg("rot", args, 0)?;
            let angle = number_arg("rot", args, 1)?;
            let (sin, cos) = angle.sin_cos();
            Ok(Value::vector(x * cos - y * sin, x * sin + y * cos))
        });
    }
}

// ── Argument helpers ──────────────────────────────────────────────────────────

fn missing(name: &str, args: &[Value], index: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: name.to_string(),
        expected: index + 1,
        got: args.len(),
    }
}

fn number_arg(name: &str, args: &[Value], index: usize) -> EvalResult<f64> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(EvalError::type_mismatch(
            format!("argument {} of {name}", index + 1),
            "number",
            other.type_name(),
        )),
        None => Err(missing(name, args, index)),
    }
}

fn vector_arg(name: &str, args: &[Value], index: usize) -> EvalResult<(f64, f64)> {
    match args.get(index) {
        Some(Value::Vector { x, y }) => Ok((*x, *y)),
        Some(other) => Err(EvalError::type_mismatch(
            format!("argument {} of {name}", index + 1),
            "vector",
            other.type_name(),
        )),
        None => Err(missing(name, args, index)),
    }
}

fn map_number(name: &str, args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    let n = number_arg(name, args, 0)?;
    in_domain(name, &[n], f(n))
}

fn zip_numbers(name: &str, args: &[Value], f: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let a = number_arg(name, args, 0)?;
    let b = number_arg(name, args, 1)?;
    in_domain(name, &[a, b], f(a, b))
}

/// A NaN result from non-NaN arguments means the arguments were outside
/// the function's domain (`sqrt(-1)`, `asin(2)`, `pow(-1, 0.5)`).
fn in_domain(name: &str, inputs: &[f64], result: f64) -> EvalResult<Value> {
    if result.is_nan() && !inputs.iter().any(|n| n.is_nan()) {
        let shown: Vec<String> = inputs.iter().map(f64::to_string).collect();
        return Err(EvalError::DomainError(format!(
            "{name}({}) is undefined",
            shown.join(", ")
        )));
    }
    Ok(Value::Number(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(value: Value, expected: f64) -> bool {
        matches!(value, Value::Number(n) if (n - expected).abs() < 1e-12)
    }

    #[test]
    fn test_standard_registry_contents() {
        let reg = BuiltinRegistry::standard();
        for name in ["sin", "cos", "atan2", "sqrt", "min", "vec", "len", "rot"] {
            assert!(reg.contains(name), "missing builtin {name}");
        }
        assert_eq!(reg.get("atan2").map(|b| b.arity), Some(2));
        assert_eq!(reg.get("sin").map(|b| b.arity), Some(1));
    }

    #[test]
    fn test_names_sorted() {
        let reg = BuiltinRegistry::standard();
        let names: Vec<_> = reg.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), reg.len());
    }

    #[test]
    fn test_call_trig() {
        let reg = BuiltinRegistry::standard();
        assert!(close(reg.call("sin", &[Value::Number(FRAC_PI_2)]).unwrap(), 1.0));
        assert!(close(reg.call("cos", &[Value::Number(PI)]).unwrap(), -1.0));
        assert!(close(
            reg.call("atan2", &[Value::Number(1.0), Value::Number(1.0)]).unwrap(),
            PI / 4.0
        ));
        assert!(close(reg.call("deg", &[Value::Number(PI)]).unwrap(), 180.0));
    }

    #[test]
    fn test_call_unknown() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(
            reg.call("frobnicate", &[]),
            Err(EvalError::UndefinedFunction("frobnicate".into()))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(
            reg.call("sin", &[]),
            Err(EvalError::ArityMismatch {
                name: "sin".into(),
                expected: 1,
                got: 0,
            })
        );
        assert_eq!(
            reg.call("min", &[Value::Number(1.0)]),
            Err(EvalError::ArityMismatch {
                name: "min".into(),
                expected: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn test_argument_type_mismatch() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(
            reg.call("len", &[Value::Number(3.0)]),
            Err(EvalError::type_mismatch("argument 1 of len", "vector", "number"))
        );
        assert_eq!(
            reg.call("pow", &[Value::Number(2.0), Value::Boolean(true)]),
            Err(EvalError::type_mismatch("argument 2 of pow", "number", "boolean"))
        );
    }

    #[test]
    fn test_sqrt_domain() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(reg.call("sqrt", &[Value::Number(9.0)]), Ok(Value::Number(3.0)));
        assert!(matches!(
            reg.call("sqrt", &[Value::Number(-1.0)]),
            Err(EvalError::DomainError(_))
        ));
    }

    #[test]
    fn test_out_of_domain_arguments_are_errors() {
        let reg = BuiltinRegistry::standard();
        for (name, args) in [
            ("asin", vec![Value::Number(2.0)]),
            ("acos", vec![Value::Number(-1.5)]),
            ("pow", vec![Value::Number(-1.0), Value::Number(0.5)]),
        ] {
            assert!(
                matches!(reg.call(name, &args), Err(EvalError::DomainError(_))),
                "{name} should reject {args:?}"
            );
        }
        assert_eq!(
            reg.call("pow", &[Value::Number(-2.0), Value::Number(3.0)]),
            Ok(Value::Number(-8.0))
        );
        assert_eq!(reg.call("asin", &[Value::Number(0.0)]), Ok(Value::Number(0.0)));
    }

    #[test]
    fn test_nan_argument_passes_through() {
        let reg = BuiltinRegistry::standard();
        assert!(matches!(
            reg.call("abs", &[Value::Number(f64::NAN)]),
            Ok(Value::Number(n)) if n.is_nan()
        ));
    }

    #[test]
    fn test_domain_error_message_names_call() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(
            reg.call("sqrt", &[Value::Number(-4.0)]),
            Err(EvalError::DomainError("sqrt(-4) is undefined".into()))
        );
    }

    #[test]
    fn test_vector_builtins() {
        let reg = BuiltinRegistry::standard();
        assert_eq!(
            reg.call("vec", &[Value::Number(3.0), Value::Number(4.0)]),
            Ok(Value::vector(3.0, 4.0))
        );
        assert_eq!(reg.call("len", &[Value::vector(3.0, 4.0)]), Ok(Value::Number(5.0)));
        assert_eq!(
            reg.call("dot", &[Value::vector(1.0, 2.0), Value::vector(3.0, 4.0)]),
            Ok(Value::Number(11.0))
        );
        assert_eq!(
            reg.call("normalize", &[Value::vector(0.0, 2.0)]),
            Ok(Value::vector(0.0, 1.0))
        );
        assert_eq!(
            reg.call("normalize", &[Value::vector(0.0, 0.0)]),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_rot_quarter_turn() {
        let reg = BuiltinRegistry::standard();
        let rotated = reg
            .call("rot", &[Value::vector(1.0, 0.0), Value::Number(FRAC_PI_2)])
            .unwrap();
        let (x, y) = rotated.as_vector().unwrap();
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_register_replaces() {
        let mut reg = BuiltinRegistry::empty();
        assert!(reg.is_empty());
        assert!(reg.register("one", 0, |_| Ok(Value::Number(1.0))).is_none());
        let previous = reg.register("one", 0, |_| Ok(Value::Number(2.0)));
        assert_eq!(previous.map(|b| b.arity), Some(0));
        assert_eq!(reg.call("one", &[]), Ok(Value::Number(2.0)));
    }
}
