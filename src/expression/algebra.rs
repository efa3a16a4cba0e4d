//! Smart constructors for [`Expression`] trees.
//!
//! Every constructor folds obviously-constant sub-trees at build time:
//! `and`/`or` flatten associative chains and short-circuit on absorbing
//! constants, `if_else` eliminates dead branches, comparisons over two
//! constants collapse to a literal. Downstream code can therefore test
//! [`Expression::is_constant`] and rely on the answer being exact.

use smallvec::SmallVec;

use crate::expression::formatter::Formatter;
use crate::expression::ir::{CompareOp, ExprKind, Expression, PathRef, Value};

/// Wrap a literal.
pub fn constant<T: Into<Value>>(v: T) -> Expression<T> {
    Expression::from_kind(ExprKind::Constant(v.into()))
}

/// Reference a path in a named model (or the default binding context).
///
/// Path references are never foldable; their value is only known to the
/// runtime observer.
pub fn path_in_model<T>(path: impl Into<String>, model: Option<&str>) -> Expression<T> {
    path_ref(PathRef {
        model: model.map(str::to_owned),
        path: path.into(),
        target_type: None,
    })
}

/// Reference a fully specified [`PathRef`].
pub fn path_ref<T>(path: PathRef) -> Expression<T> {
    Expression::from_kind(ExprKind::Path(path))
}

/// Boolean negation. Folds constants and unwraps double negation.
pub fn not(e: impl Into<Expression<bool>>) -> Expression<bool> {
    match e.into().kind {
        ExprKind::Constant(Value::Bool(b)) => constant(!b),
        ExprKind::Not(inner) => Expression::from_kind(*inner),
        kind => Expression::from_kind(ExprKind::Not(Box::new(kind))),
    }
}

/// Boolean conjunction.
///
/// Drops `true` operands, short-circuits to `false` on any constant `false`,
/// flattens nested conjunctions. An empty surviving operand list folds to
/// `true`; a single survivor is returned as-is.
pub fn and<I>(ops: I) -> Expression<bool>
where
    I: IntoIterator,
    I::Item: Into<Expression<bool>>,
{
    let mut out: SmallVec<[ExprKind; 4]> = SmallVec::new();
    for op in ops {
        match op.into().kind {
            ExprKind::Constant(Value::Bool(true)) => {}
            ExprKind::Constant(Value::Bool(false)) => return constant(false),
            ExprKind::And(inner) => out.extend(inner),
            kind => out.push(kind),
        }
    }
    rebuild_variadic(out, true, ExprKind::And)
}

/// Boolean disjunction; exact dual of [`and`].
pub fn or<I>(ops: I) -> Expression<bool>
where
    I: IntoIterator,
    I::Item: Into<Expression<bool>>,
{
    let mut out: SmallVec<[ExprKind; 4]> = SmallVec::new();
    for op in ops {
        match op.into().kind {
            ExprKind::Constant(Value::Bool(false)) => {}
            ExprKind::Constant(Value::Bool(true)) => return constant(true),
            ExprKind::Or(inner) => out.extend(inner),
            kind => out.push(kind),
        }
    }
    rebuild_variadic(out, false, ExprKind::Or)
}

fn rebuild_variadic(
    mut ops: SmallVec<[ExprKind; 4]>,
    empty_value: bool,
    node: fn(Vec<ExprKind>) -> ExprKind,
) -> Expression<bool> {
    match ops.len() {
        0 => constant(empty_value),
        1 => Expression::from_kind(ops.remove(0)),
        _ => Expression::from_kind(node(ops.into_vec())),
    }
}

/// Conditional expression.
///
/// A constant condition selects its branch immediately. Identical branches
/// collapse to either one; boolean-literal branch pairs collapse to the
/// condition itself (or its negation).
pub fn if_else<T>(
    cond: impl Into<Expression<bool>>,
    when_true: Expression<T>,
    when_false: Expression<T>,
) -> Expression<T> {
    let cond = cond.into();
    match cond.kind {
        ExprKind::Constant(Value::Bool(true)) => when_true,
        ExprKind::Constant(Value::Bool(false)) => when_false,
        cond_kind => {
            if when_true.kind == when_false.kind {
                return when_true;
            }
            let t = &when_true.kind;
            let f = &when_false.kind;
            if *t == ExprKind::Constant(Value::Bool(true))
                && *f == ExprKind::Constant(Value::Bool(false))
            {
                return Expression::from_kind(cond_kind);
            }
            if *t == ExprKind::Constant(Value::Bool(false))
                && *f == ExprKind::Constant(Value::Bool(true))
            {
                return Expression::from_kind(
                    not(Expression::<bool>::from_kind(cond_kind)).kind,
                );
            }
            Expression::from_kind(ExprKind::IfElse {
                cond: Box::new(cond_kind),
                when_true: Box::new(when_true.kind),
                when_false: Box::new(when_false.kind),
            })
        }
    }
}

/// Equality comparison; folds when both operands are constants.
pub fn equal<T>(lhs: Expression<T>, rhs: Expression<T>) -> Expression<bool> {
    compare(CompareOp::Eq, lhs.kind, rhs.kind)
}

/// Inequality comparison; folds when both operands are constants.
pub fn not_equal<T>(lhs: Expression<T>, rhs: Expression<T>) -> Expression<bool> {
    compare(CompareOp::Ne, lhs.kind, rhs.kind)
}

/// Strict ordering comparison; folds when both operands are integer constants.
pub fn greater_than<T>(lhs: Expression<T>, rhs: Expression<T>) -> Expression<bool> {
    compare(CompareOp::Gt, lhs.kind, rhs.kind)
}

/// Non-strict ordering comparison; folds when both operands are integer constants.
pub fn greater_or_equal<T>(lhs: Expression<T>, rhs: Expression<T>) -> Expression<bool> {
    compare(CompareOp::Ge, lhs.kind, rhs.kind)
}

fn compare(op: CompareOp, lhs: ExprKind, rhs: ExprKind) -> Expression<bool> {
    if let (ExprKind::Constant(a), ExprKind::Constant(b)) = (&lhs, &rhs) {
        match op {
            CompareOp::Eq => return constant(a == b),
            CompareOp::Ne => return constant(a != b),
            CompareOp::Gt | CompareOp::Ge => {
                if let (Value::Int(x), Value::Int(y)) = (a, b) {
                    let folded = match op {
                        CompareOp::Gt => x > y,
                        _ => x >= y,
                    };
                    return constant(folded);
                }
            }
        }
    }
    Expression::from_kind(ExprKind::Compare {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}

/// Number of entries of a collection-valued operand. Never foldable.
pub fn length<T>(e: Expression<T>) -> Expression<i64> {
    Expression::from_kind(ExprKind::Length(Box::new(e.kind)))
}

/// One operand of a [`format_result`] invocation, type-erased.
pub struct Part(pub(crate) ExprKind);

impl<T> From<Expression<T>> for Part {
    fn from(e: Expression<T>) -> Self {
        Self(e.kind)
    }
}

/// Invoke a registered runtime formatter over the given operands.
///
/// Formatter results are opaque to the algebra: the node is never folded,
/// whatever its operands.
pub fn format_result<T>(parts: impl IntoIterator<Item = Part>, formatter: Formatter) -> Expression<T> {
    Expression::from_kind(ExprKind::Format {
        parts: parts.into_iter().map(|p| p.0).collect(),
        formatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(path: &str) -> Expression<bool> {
        path_in_model(path, None)
    }

    #[test]
    fn and_short_circuits_on_false() {
        let e = and([p("A"), constant(false), p("B")]);
        assert_eq!(e.constant_bool(), Some(false));
    }

    #[test]
    fn and_drops_true_operands() {
        assert_eq!(and([p("A"), constant(true)]), p("A"));
        assert_eq!(and([constant(true), constant(true)]).constant_bool(), Some(true));
    }

    #[test]
    fn or_short_circuits_on_true() {
        let e = or([p("A"), constant(true)]);
        assert_eq!(e.constant_bool(), Some(true));
    }

    #[test]
    fn nested_chains_flatten() {
        let nested = and([p("A"), and([p("B"), p("C")])]);
        let flat = and([p("A"), p("B"), p("C")]);
        assert_eq!(nested, flat);
    }

    #[test]
    fn not_folds_and_unwraps() {
        assert_eq!(not(constant(true)).constant_bool(), Some(false));
        assert_eq!(not(not(p("A"))), p("A"));
    }

    #[test]
    fn if_else_eliminates_constant_branches() {
        assert_eq!(if_else(constant(true), p("A"), p("B")), p("A"));
        assert_eq!(if_else(constant(false), p("A"), p("B")), p("B"));
    }

    #[test]
    fn if_else_collapses_literal_branch_pairs() {
        assert_eq!(if_else(p("C"), constant(true), constant(false)), p("C"));
        assert_eq!(if_else(p("C"), constant(false), constant(true)), not(p("C")));
    }

    #[test]
    fn comparisons_fold_over_constants() {
        assert_eq!(equal(constant(1i64), constant(1i64)).constant_bool(), Some(true));
        assert_eq!(not_equal(constant("a"), constant("b")).constant_bool(), Some(true));
        assert_eq!(greater_than(constant(2i64), constant(1i64)).constant_bool(), Some(true));
        assert_eq!(greater_or_equal(constant(1i64), constant(2i64)).constant_bool(), Some(false));
    }

    #[test]
    fn comparisons_over_paths_stay_symbolic() {
        let e = greater_than(length(p("items")), constant(0i64));
        assert!(!e.is_constant());
    }
}
