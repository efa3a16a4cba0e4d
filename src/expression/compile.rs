//! Lowering from folded [`Expression`] trees to runtime binding strings.
//!
//! Output grammar, rendered by [`CompiledExpression`]'s `Display`:
//!
//! - constants become bare literals: `true`, `42`, `'text'`
//! - a lone path reference becomes a single-path binding: `{ui>/isEditable}`
//!   or `{path:'Items/Deletable',targetType:'bool'}`
//! - anything else becomes a multi-part formatter binding: every distinct
//!   path in the tree is collected in first-seen depth-first order into the
//!   `parts` list, and the boolean/compare/if-else structure is serialized
//!   over `$0..$n` placeholders as the formatter body:
//!   `{parts:[{path:'A'},{path:'B'}],formatter:'bindkit.evaluate',body:'(!($0) && $1)'}`
//!
//! Compilation is referentially transparent: structurally equal trees render
//! byte-identical strings, and part ordering is stable across repeated runs.

use std::fmt;

use crate::expression::formatter::Formatter;
use crate::expression::ir::{CompareOp, ExprKind, Expression, PathRef, Value};
use crate::foundation::error::{BindkitError, BindkitResult};

/// One entry of a multi-part binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPart {
    /// A path part, re-evaluated by the runtime observer.
    Path(String),
    /// A constant part, rendered inline.
    Literal(String),
}

/// Deterministic compiled form of an expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledExpression {
    /// Bare literal.
    Literal(String),
    /// Single-path binding.
    PathBinding {
        /// Model-qualified path.
        path: String,
        /// Runtime type annotation, if the path carried one.
        target_type: Option<String>,
    },
    /// Multi-part named-formatter binding.
    FormatterBinding {
        /// Binding parts in stable first-seen order.
        parts: Vec<CompiledPart>,
        /// Registered runtime formatter name.
        formatter: &'static str,
        /// Serialized expression body for the structural evaluator.
        body: Option<String>,
    },
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::PathBinding {
                path,
                target_type: None,
            } => write!(f, "{{{path}}}"),
            Self::PathBinding {
                path,
                target_type: Some(t),
            } => write!(f, "{{path:'{path}',targetType:'{t}'}}"),
            Self::FormatterBinding {
                parts,
                formatter,
                body,
            } => {
                f.write_str("{parts:[")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    match part {
                        CompiledPart::Path(p) => write!(f, "{{path:'{p}'}}")?,
                        CompiledPart::Literal(l) => f.write_str(l)?,
                    }
                }
                write!(f, "],formatter:'{formatter}'")?;
                if let Some(body) = body {
                    write!(f, ",body:'{body}'")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Lower a fully-folded expression tree into its compiled binding form.
///
/// Constant trees render their exact literal value; a lone path renders a
/// single-path binding; everything else renders a structural formatter
/// binding. A non-constant root that contributes zero binding parts is a
/// bug in the algebra layer and reports [`BindkitError::Construction`].
pub fn compile_expression<T>(expr: &Expression<T>) -> BindkitResult<CompiledExpression> {
    match &expr.kind {
        ExprKind::Constant(v) => Ok(CompiledExpression::Literal(render_value(v))),
        ExprKind::Path(p) => Ok(CompiledExpression::PathBinding {
            path: model_qualified(p),
            target_type: p.target_type.clone(),
        }),
        ExprKind::Format { parts, formatter } => {
            let parts = parts
                .iter()
                .map(|part| match part {
                    ExprKind::Path(p) => Ok(CompiledPart::Path(model_qualified(p))),
                    ExprKind::Constant(v) => Ok(CompiledPart::Literal(render_value(v))),
                    _ => Err(BindkitError::construction(
                        "formatter binding parts must be paths or constants",
                    )),
                })
                .collect::<BindkitResult<Vec<_>>>()?;
            Ok(CompiledExpression::FormatterBinding {
                parts,
                formatter: formatter.runtime_name(),
                body: None,
            })
        }
        kind => {
            let mut paths: Vec<&PathRef> = Vec::new();
            collect_paths(kind, &mut paths);
            if paths.is_empty() {
                debug_assert!(false, "non-constant root without binding parts");
                return Err(BindkitError::construction(
                    "non-constant expression folded to zero binding parts",
                ));
            }
            let body = render_body(kind, &paths);
            Ok(CompiledExpression::FormatterBinding {
                parts: paths
                    .iter()
                    .map(|p| CompiledPart::Path(model_qualified(p)))
                    .collect(),
                formatter: Formatter::Evaluate.runtime_name(),
                body: Some(body),
            })
        }
    }
}

fn model_qualified(p: &PathRef) -> String {
    match &p.model {
        Some(model) => format!("{model}>{}", p.path),
        None => p.path.clone(),
    }
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Str(s) => format!("'{}'", s.replace('\'', "\\'")),
    }
}

/// First-seen depth-first collection of distinct path references.
fn collect_paths<'a>(kind: &'a ExprKind, out: &mut Vec<&'a PathRef>) {
    match kind {
        ExprKind::Constant(_) => {}
        ExprKind::Path(p) => {
            if !out.contains(&p) {
                out.push(p);
            }
        }
        ExprKind::Not(inner) | ExprKind::Length(inner) => collect_paths(inner, out),
        ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::Format { parts: ops, .. } => {
            for op in ops {
                collect_paths(op, out);
            }
        }
        ExprKind::Compare { lhs, rhs, .. } => {
            collect_paths(lhs, out);
            collect_paths(rhs, out);
        }
        ExprKind::IfElse {
            cond,
            when_true,
            when_false,
        } => {
            collect_paths(cond, out);
            collect_paths(when_true, out);
            collect_paths(when_false, out);
        }
    }
}

fn render_body(kind: &ExprKind, paths: &[&PathRef]) -> String {
    match kind {
        ExprKind::Constant(v) => render_value(v),
        ExprKind::Path(p) => {
            // Collected beforehand, so the lookup cannot fail.
            let idx = paths.iter().position(|q| *q == p).unwrap_or(0);
            format!("${idx}")
        }
        ExprKind::Not(inner) => format!("!({})", render_body(inner, paths)),
        ExprKind::And(ops) => render_chain(ops, " && ", paths),
        ExprKind::Or(ops) => render_chain(ops, " || ", paths),
        ExprKind::Compare { op, lhs, rhs } => {
            let sym = match op {
                CompareOp::Eq => "===",
                CompareOp::Ne => "!==",
                CompareOp::Gt => ">",
                CompareOp::Ge => ">=",
            };
            format!(
                "({} {sym} {})",
                render_body(lhs, paths),
                render_body(rhs, paths)
            )
        }
        ExprKind::IfElse {
            cond,
            when_true,
            when_false,
        } => format!(
            "({} ? {} : {})",
            render_body(cond, paths),
            render_body(when_true, paths),
            render_body(when_false, paths)
        ),
        ExprKind::Length(inner) => format!("length({})", render_body(inner, paths)),
        ExprKind::Format { parts, formatter } => {
            let args: Vec<String> = parts.iter().map(|p| render_body(p, paths)).collect();
            format!("{}({})", formatter.runtime_name(), args.join(", "))
        }
    }
}

fn render_chain(ops: &[ExprKind], sep: &str, paths: &[&PathRef]) -> String {
    let rendered: Vec<String> = ops.iter().map(|op| render_body(op, paths)).collect();
    format!("({})", rendered.join(sep))
}
