//! Construction of the per-table derivation context.
//!
//! `ActionContext::build` is the only place annotation lookups happen: it
//! resolves the hidden annotations and the three capability restrictions
//! once, then hands the rule layer a read-only value. Missing annotations
//! resolve to their documented defaults (not hidden, capable) instead of
//! erroring.

use tracing::debug;

use crate::expression::algebra::constant;
use crate::expression::ir::Expression;
use crate::foundation::error::{BindkitError, BindkitResult};
use crate::manifest::TableManifest;
use crate::metadata::capabilities::{CapabilityKind, RestrictionResult, restriction};
use crate::metadata::model::{AnnotationValue, MetadataSnapshot};
use crate::metadata::path::{MetadataPath, resolve_path};

/// Dedicated new-entity action, resolved for rule consumption.
#[derive(Debug, Clone)]
pub struct NewActionInfo {
    /// Fully qualified action name.
    pub name: String,
    /// Availability expression; `constant(true)` when unannotated.
    pub available: Expression<bool>,
}

/// Everything the per-action rules read. Read-only after construction and
/// discarded after one derivation pass.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Entity-set name the table binds to.
    pub collection: String,
    /// Navigation chain from the page root to the collection.
    pub visited_navigation: Vec<String>,
    /// Table configuration flags.
    pub manifest: TableManifest,
    /// Hidden annotation guarding creation controls.
    pub create_hidden: Expression<bool>,
    /// Hidden annotation guarding delete controls.
    pub delete_hidden: Expression<bool>,
    /// Hidden annotation guarding update/mass-edit controls.
    pub update_hidden: Expression<bool>,
    /// Dedicated new-entity action, if declared.
    pub new_action: Option<NewActionInfo>,
    /// The collection participates in a draft or sticky edit session.
    pub draft_or_sticky: bool,
    /// The table shares the page with other visualizations.
    pub multi_visualization: bool,
    /// Insertable restriction pair.
    pub insert_restriction: RestrictionResult,
    /// Updatable restriction pair.
    pub update_restriction: RestrictionResult,
    /// Deletable restriction pair.
    pub delete_restriction: RestrictionResult,
}

impl ActionContext {
    /// Resolve annotations and restrictions for one table instance.
    ///
    /// Fails only when `collection` names no entity set in the snapshot;
    /// partial annotations are absorbed by defaults.
    #[tracing::instrument(skip(snapshot, manifest))]
    pub fn build(
        snapshot: &MetadataSnapshot,
        collection: &str,
        visited_navigation: &[String],
        manifest: &TableManifest,
        multi_visualization: bool,
    ) -> BindkitResult<Self> {
        let Some(entity_type) = snapshot.entity_type_of_set(collection) else {
            return Err(BindkitError::validation(format!(
                "unknown collection '{collection}'"
            )));
        };

        let new_action = entity_type.new_action.as_ref().map(|action| NewActionInfo {
            name: action.name.clone(),
            available: annotation_expression(
                &action.available,
                true,
                collection,
                snapshot,
                visited_navigation,
            ),
        });

        let ctx = Self {
            collection: collection.to_owned(),
            visited_navigation: visited_navigation.to_vec(),
            manifest: manifest.clone(),
            create_hidden: annotation_expression(
                &entity_type.create_hidden,
                false,
                collection,
                snapshot,
                visited_navigation,
            ),
            delete_hidden: annotation_expression(
                &entity_type.delete_hidden,
                false,
                collection,
                snapshot,
                visited_navigation,
            ),
            update_hidden: annotation_expression(
                &entity_type.update_hidden,
                false,
                collection,
                snapshot,
                visited_navigation,
            ),
            new_action,
            draft_or_sticky: entity_type.draft_root || entity_type.sticky_session,
            multi_visualization,
            insert_restriction: restriction(
                CapabilityKind::Insertable,
                collection,
                snapshot,
                visited_navigation,
            ),
            update_restriction: restriction(
                CapabilityKind::Updatable,
                collection,
                snapshot,
                visited_navigation,
            ),
            delete_restriction: restriction(
                CapabilityKind::Deletable,
                collection,
                snapshot,
                visited_navigation,
            ),
        };
        Ok(ctx)
    }
}

/// Resolve one annotation term to an expression, with a documented default
/// for the absent and unresolvable cases.
fn annotation_expression(
    annotation: &AnnotationValue,
    default: bool,
    collection: &str,
    snapshot: &MetadataSnapshot,
    visited: &[String],
) -> Expression<bool> {
    match annotation {
        AnnotationValue::Absent => constant(default),
        AnnotationValue::Bool(b) => constant(*b),
        AnnotationValue::Path(raw) => {
            let path = MetadataPath::from_annotation(collection, raw);
            match resolve_path(&path, snapshot, visited, None) {
                Ok(e) => e,
                Err(err) => {
                    debug!(%err, collection, "annotation path unresolvable, using default");
                    constant(default)
                }
            }
        }
    }
}
