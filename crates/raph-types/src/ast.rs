//! AST node types for the Raph language.
//!
//! The tree is produced once by the parser and is read-only afterwards.
//! Every parent exclusively owns its children; recursive variants are boxed.
//! Sequences keep source order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete Raph compilation unit: the root of every tree handed to the
/// interpreter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    /// True if the program contains no statements.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement, executed for its effect on the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `;`
    Empty,
    /// `{ stmts... }`
    Compound(Vec<Stmt>),
    /// `if cond then_branch [else else_branch]`
    ///
    /// A missing `else` is represented by [`Stmt::Empty`].
    Conditional {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    /// `while cond body`
    While { condition: Expr, body: Box<Stmt> },
    /// `until cond body`
    Until { condition: Expr, body: Box<Stmt> },
    /// `for id from a to b step c body`
    For(ForStmt),
    /// `id = expr`
    Assign { name: String, value: Expr },
    /// A bare expression, evaluated for its call effects.
    Expr(Expr),
}

/// `for var from .. to .. step .. body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    /// The induction variable, scoped to the loop.
    pub var: String,
    pub from: Expr,
    pub to: Expr,
    pub step: Expr,
    pub body: Box<Stmt>,
}

impl Stmt {
    pub fn compound(stmts: Vec<Stmt>) -> Self {
        Stmt::Compound(stmts)
    }

    pub fn if_then(condition: Expr, then_branch: Stmt) -> Self {
        Self::if_else(condition, then_branch, Stmt::Empty)
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Stmt) -> Self {
        Stmt::Conditional {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Stmt::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn until_loop(condition: Expr, body: Stmt) -> Self {
        Stmt::Until {
            condition,
            body: Box::new(body),
        }
    }

    pub fn for_range(var: impl Into<String>, from: Expr, to: Expr, step: Expr, body: Stmt) -> Self {
        Stmt::For(ForStmt {
            var: var.into(),
            from,
            to,
            step,
            body: Box::new(body),
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            name: name.into(),
            value,
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    /// The node tag used by the dump and by error reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Empty => "EmptyStatement",
            Stmt::Compound(_) => "CompoundStatement",
            Stmt::Conditional { .. } => "ConditionalStatement",
            Stmt::While { .. } => "WhileStatement",
            Stmt::Until { .. } => "UntilStatement",
            Stmt::For(_) => "ForStatement",
            Stmt::Assign { .. } => "AssignStatement",
            Stmt::Expr(_) => "ExpressionStatement",
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression, reduced to a value by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // ── Names ──
    /// `x`, a mutable variable.
    Variable(String),
    /// `#pi`, a named constant resolved through the constant table.
    Constant(String),

    // ── Literals ──
    /// `42`, `3.14`
    Numeric(f64),
    /// `true` / `false`
    Boolean(bool),
    /// `(x, y)`
    Vector { x: Box<Expr>, y: Box<Expr> },

    // ── Calls & Access ──
    /// `callee(args...)`
    FunctionCall { callee: Box<Expr>, args: Vec<Expr> },
    /// `base[index]`
    ArrayAccess { base: Box<Expr>, index: Box<Expr> },

    // ── Operators ──
    /// `-x`, `!x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `a + b`, `a == b`, `a && b`, etc.
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Expr::Constant(name.into())
    }

    pub fn num(value: f64) -> Self {
        Expr::Numeric(value)
    }

    pub fn bool(value: bool) -> Self {
        Expr::Boolean(value)
    }

    pub fn vector(x: Expr, y: Expr) -> Self {
        Expr::Vector {
            x: Box::new(x),
            y: Box::new(y),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::FunctionCall {
            callee: Box::new(callee),
            args,
        }
    }

    /// `name(args...)`, a call whose callee is a plain name.
    pub fn call_named(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(Expr::Variable(name.into()), args)
    }

    pub fn index(base: Expr, index: Expr) -> Self {
        Expr::ArrayAccess {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// The node tag used by the dump and by error reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Variable(_) => "Variable",
            Expr::Constant(_) => "Constant",
            Expr::Numeric(_) => "Numeric",
            Expr::Boolean(_) => "Boolean",
            Expr::Vector { .. } => "Vector",
            Expr::FunctionCall { .. } => "FunctionCall",
            Expr::ArrayAccess { .. } => "ArrayAccess",
            Expr::Unary { .. } => "UnaryOperation",
            Expr::Binary { .. } => "BinaryOperation",
        }
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// An operator symbol the parser handed over that is not part of the language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

/// Binary operators (in precedence order, lowest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Comparison
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the operator symbol as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "||" => BinOp::Or,
            "&&" => BinOp::And,
            "==" => BinOp::Eq,
            "!=" => BinOp::NotEq,
            "<" => BinOp::Less,
            ">" => BinOp::Greater,
            "<=" => BinOp::LessEq,
            ">=" => BinOp::GreaterEq,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            _ => return None,
        };
        Some(op)
    }

    /// `&&` and `||`, which short-circuit.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq
                | BinOp::NotEq
                | BinOp::Less
                | BinOp::Greater
                | BinOp::LessEq
                | BinOp::GreaterEq
        )
    }
}

impl FromStr for BinOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

impl FromStr for UnaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
