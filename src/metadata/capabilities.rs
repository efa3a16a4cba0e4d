//! Derivation of insert/update/delete restriction expressions.
//!
//! Restrictions come in two flavours per capability: `expression` is the
//! restriction as seen from inside the collection's own binding context,
//! `navigation_expression` is the same restriction evaluated one level up,
//! at the parent collection (inline creation rows live there). Both apply
//! the documented default of `constant(true)` when the annotation is absent
//! or cannot be statically resolved: a restriction the engine cannot read
//! must not hide a control the backend may still accept.

use tracing::debug;

use crate::expression::algebra::constant;
use crate::expression::ir::Expression;
use crate::metadata::model::{AnnotationValue, MetadataSnapshot};
use crate::metadata::path::{MetadataPath, ResolveOptions, resolve_in_type, resolve_path};

/// The three standard capability restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Creation of new entities.
    Insertable,
    /// In-place modification.
    Updatable,
    /// Removal of entities.
    Deletable,
}

/// Restriction expressions for one capability, computed once per
/// action-context build.
#[derive(Debug, Clone)]
pub struct RestrictionResult {
    /// Restriction evaluated inside the collection's binding context.
    pub expression: Expression<bool>,
    /// Restriction evaluated at the parent-collection level.
    pub navigation_expression: Expression<bool>,
}

/// Compute both restriction variants for a capability of `collection`.
///
/// Unknown collections behave like unannotated ones: both variants default
/// to `constant(true)`.
pub fn restriction(
    kind: CapabilityKind,
    collection: &str,
    snapshot: &MetadataSnapshot,
    visited: &[String],
) -> RestrictionResult {
    let annotation = snapshot
        .entity_set(collection)
        .map(|set| match kind {
            CapabilityKind::Insertable => set.capabilities.insertable.clone(),
            CapabilityKind::Updatable => set.capabilities.updatable.clone(),
            CapabilityKind::Deletable => set.capabilities.deletable.clone(),
        })
        .unwrap_or_default();

    RestrictionResult {
        expression: local_expression(&annotation, collection, snapshot, visited),
        navigation_expression: navigation_expression(&annotation, collection, snapshot, visited),
    }
}

fn local_expression(
    annotation: &AnnotationValue,
    collection: &str,
    snapshot: &MetadataSnapshot,
    visited: &[String],
) -> Expression<bool> {
    match annotation {
        AnnotationValue::Absent => constant(true),
        AnnotationValue::Bool(b) => constant(*b),
        AnnotationValue::Path(raw) => {
            let path = MetadataPath::from_annotation(collection, raw);
            match resolve_path(&path, snapshot, visited, None) {
                Ok(e) => e,
                Err(err) => {
                    debug!(%err, collection, "capability path unresolvable, defaulting to capable");
                    constant(true)
                }
            }
        }
    }
}

fn navigation_expression(
    annotation: &AnnotationValue,
    collection: &str,
    snapshot: &MetadataSnapshot,
    visited: &[String],
) -> Expression<bool> {
    let raw = match annotation {
        AnnotationValue::Absent => return constant(true),
        AnnotationValue::Bool(b) => return constant(*b),
        AnnotationValue::Path(raw) => raw,
    };

    if let Some(e) = partner_rewrite(raw, collection, snapshot, visited) {
        return e;
    }

    // Fallback ladder: resolve relative to the entity type with an empty
    // visited-segment set, then authorize the unresolvable remainder.
    let type_name = snapshot
        .entity_set(collection)
        .map(|s| s.entity_type.clone())
        .unwrap_or_default();
    let opts = ResolveOptions {
        ignore_target_collection: true,
    };
    match resolve_in_type(&type_name, raw, snapshot, opts) {
        Ok(e) => e,
        Err(err) => {
            debug!(%err, collection, "navigation restriction unresolvable, authorizing");
            constant(true)
        }
    }
}

/// Rewrite a restriction path through the partner navigation property of
/// the last visited segment, so it reads correctly from the parent
/// collection's binding context.
fn partner_rewrite(
    raw: &str,
    collection: &str,
    snapshot: &MetadataSnapshot,
    visited: &[String],
) -> Option<Expression<bool>> {
    let last_segment = visited.last()?;
    let collection_type = snapshot.entity_type_of_set(collection)?;
    let back = collection_type
        .navigation
        .values()
        .find(|nav| nav.partner.as_deref() == Some(last_segment))?;

    let remainder = raw.strip_prefix(&format!("{}/", back.name))?;
    let opts = ResolveOptions {
        ignore_target_collection: true,
    };
    resolve_in_type(&back.target_type, remainder, snapshot, opts).ok()
}
