//! Core expression IR: [`Value`] constants and [`Expression`] tree nodes.

use std::fmt;
use std::marker::PhantomData;

use crate::expression::formatter::Formatter;

/// Scalar constants an expression tree can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal (selection counts and comparisons).
    Int(i64),
    /// String literal.
    Str(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Comparison operators available to [`Compare`](ExprKind::Compare) nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Strictly greater.
    Gt,
    /// Greater or equal.
    Ge,
}

/// A reference to a model path, resolved by the runtime binding layer.
///
/// The optional model name selects a named secondary model; `None` addresses
/// the element's default binding context. `target_type` is carried verbatim
/// into single-path bindings so the runtime can attach a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    /// Named model the path is evaluated against, if any.
    pub model: Option<String>,
    /// Path within the model.
    pub path: String,
    /// Optional runtime type annotation for single-path bindings.
    pub target_type: Option<String>,
}

impl PathRef {
    /// Path in the default binding context.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            model: None,
            path: path.into(),
            target_type: None,
        }
    }

    /// Attach a named model.
    pub fn in_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach a runtime target type.
    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }
}

/// Untyped expression kernel.
///
/// The typed [`Expression`] wrapper is the only public construction surface;
/// the kernel stays untyped so heterogeneous sub-trees (comparisons over
/// strings, integer lengths under boolean roots) share one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprKind {
    Constant(Value),
    Path(PathRef),
    Not(Box<ExprKind>),
    And(Vec<ExprKind>),
    Or(Vec<ExprKind>),
    Compare {
        op: CompareOp,
        lhs: Box<ExprKind>,
        rhs: Box<ExprKind>,
    },
    IfElse {
        cond: Box<ExprKind>,
        when_true: Box<ExprKind>,
        when_false: Box<ExprKind>,
    },
    Length(Box<ExprKind>),
    Format {
        parts: Vec<ExprKind>,
        formatter: Formatter,
    },
}

/// Immutable expression tree with a phantom result type.
///
/// `T` never appears in the stored data; it exists so the smart constructors
/// in [`algebra`](crate::expression::algebra) reject ill-typed compositions
/// at compile time. `And`/`Or` operand lists are non-empty after
/// construction; constant-only trees fold down to a single `Constant` node.
pub struct Expression<T> {
    pub(crate) kind: ExprKind,
    _result: PhantomData<fn() -> T>,
}

impl<T> Expression<T> {
    pub(crate) fn from_kind(kind: ExprKind) -> Self {
        Self {
            kind,
            _result: PhantomData,
        }
    }

    /// Return `true` when the tree folded down to a single constant.
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ExprKind::Constant(_))
    }

    /// The folded constant value, if any.
    pub fn constant_value(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Constant(v) => Some(v),
            _ => None,
        }
    }
}

impl Expression<bool> {
    /// The folded boolean value, if the tree is a boolean constant.
    pub fn constant_bool(&self) -> Option<bool> {
        match self.constant_value() {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Expression<bool> {
    fn from(v: bool) -> Self {
        Self::from_kind(ExprKind::Constant(Value::Bool(v)))
    }
}

// Manual impls: deriving would put unnecessary bounds on the phantom `T`.

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self::from_kind(self.kind.clone())
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl<T> PartialEq for Expression<T> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl<T> Eq for Expression<T> {}
