//! Bindkit is the state-derivation engine of a metadata-driven UI
//! framework.
//!
//! For each standard table action (Create, Delete, Paste, Mass-Edit, the
//! inline creation row) it decides whether the control is templated,
//! visible, and enabled, purely from capability annotations on an entity
//! model plus a handful of runtime-state paths. The pipeline is:
//!
//! - Build an [`ActionContext`] from a [`MetadataSnapshot`] and a
//!   [`TableManifest`](manifest::TableManifest)
//! - Derive per-action boolean [`Expression`] trees, folded at construction
//! - Compile the folded trees into deterministic binding strings with
//!   [`compile_expression`]
//!
//! Everything is synchronous, side-effect-free, and reads the metadata
//! snapshot by shared reference only.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod actions;
pub mod expression;
pub mod manifest;
pub mod metadata;

pub use crate::actions::context::ActionContext;
pub use crate::actions::{ActionDecision, TableActionDecisions, derive_table_actions};
pub use crate::expression::compile::{CompiledExpression, compile_expression};
pub use crate::expression::ir::Expression;
pub use crate::foundation::error::{BindkitError, BindkitResult};
pub use crate::metadata::model::MetadataSnapshot;
pub use crate::metadata::path::PathError;
