//! Boundary model for the converted-metadata snapshot.
//!
//! The embedding framework's metadata converter produces one immutable
//! [`MetadataSnapshot`] per derivation batch; everything in this crate reads
//! it by shared reference and never mutates it. Annotation terms are a
//! closed sum with an explicit absent case, so the rule layer never probes
//! for existence ad hoc.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::foundation::error::{BindkitError, BindkitResult};

/// Value of a capability or UI-hidden annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    /// The annotation is not present on the model.
    #[default]
    Absent,
    /// Statically annotated boolean.
    Bool(bool),
    /// Dynamic annotation: a metadata-relative path evaluated at runtime.
    Path(String),
}

impl AnnotationValue {
    /// The static boolean value, if the annotation is a constant.
    pub fn static_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Capability restriction annotations of an entity set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityAnnotations {
    /// Whether new entities can be created in the collection.
    #[serde(default)]
    pub insertable: AnnotationValue,
    /// Whether entities of the collection can be updated.
    #[serde(default)]
    pub updatable: AnnotationValue,
    /// Whether entities of the collection can be deleted.
    #[serde(default)]
    pub deletable: AnnotationValue,
}

/// A navigation property of an entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationProperty {
    /// Property name, unique per owning type.
    pub name: String,
    /// Name of the targeted entity type.
    pub target_type: String,
    /// Back-reference navigation property on the target type, if modeled.
    #[serde(default)]
    pub partner: Option<String>,
    /// Whether the property is collection-valued.
    #[serde(default)]
    pub collection: bool,
}

/// Descriptor of a dedicated "new entity" action bound to an entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAction {
    /// Fully qualified action name.
    pub name: String,
    /// Operation availability; absent means available.
    #[serde(default)]
    pub available: AnnotationValue,
}

/// A converted entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityType {
    /// Type name.
    pub name: String,
    /// Navigation properties keyed by name.
    #[serde(default)]
    pub navigation: BTreeMap<String, NavigationProperty>,
    /// UI-hidden annotation guarding entity creation controls.
    #[serde(default)]
    pub create_hidden: AnnotationValue,
    /// UI-hidden annotation guarding delete controls.
    #[serde(default)]
    pub delete_hidden: AnnotationValue,
    /// UI-hidden annotation guarding update/mass-edit controls.
    #[serde(default)]
    pub update_hidden: AnnotationValue,
    /// Dedicated new-entity action, when the type declares one.
    #[serde(default)]
    pub new_action: Option<NewAction>,
    /// Whether the type is a draft root.
    #[serde(default)]
    pub draft_root: bool,
    /// Whether the type participates in a sticky edit session.
    #[serde(default)]
    pub sticky_session: bool,
}

/// A converted entity set (or singleton).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySet {
    /// Set name.
    pub name: String,
    /// Name of the contained entity type.
    pub entity_type: String,
    /// Singletons resolve to absolute binding paths.
    #[serde(default)]
    pub singleton: bool,
    /// Capability restrictions declared on the set.
    #[serde(default)]
    pub capabilities: CapabilityAnnotations,
}

/// Immutable converted-metadata registry for one derivation batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// Entity sets keyed by name.
    #[serde(default)]
    pub entity_sets: BTreeMap<String, EntitySet>,
    /// Entity types keyed by name.
    #[serde(default)]
    pub entity_types: BTreeMap<String, EntityType>,
}

impl MetadataSnapshot {
    /// Deserialize a snapshot from its JSON form.
    pub fn from_json(json: &str) -> BindkitResult<Self> {
        serde_json::from_str(json).map_err(|e| BindkitError::serde(e.to_string()))
    }

    /// Look up an entity set by name.
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.get(name)
    }

    /// Look up an entity type by name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.get(name)
    }

    /// The entity type contained in a named set.
    pub fn entity_type_of_set(&self, set: &str) -> Option<&EntityType> {
        self.entity_set(set)
            .and_then(|s| self.entity_type(&s.entity_type))
    }
}
