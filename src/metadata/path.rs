//! Resolution of metadata-relative annotation paths into binding
//! expressions.
//!
//! Annotation paths are written relative to the entity model; the element
//! hosting a binding already sits inside a navigation context. Resolution
//! rewrites the annotation path against that context: only the **last**
//! visited navigation segment counts as already represented by the
//! element's own binding, earlier segments are stripped. Paths rooted at a
//! singleton entity set resolve to absolute paths instead.

use crate::expression::algebra::path_in_model;
use crate::expression::ir::Expression;
use crate::metadata::model::MetadataSnapshot;

/// Error resolving a metadata-relative annotation path.
///
/// `Unresolvable` is expected and non-fatal: callers supply an explicit
/// fallback. Omitting the fallback is a caller contract violation, not a
/// user-facing failure mode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path cannot be statically resolved against the snapshot.
    #[error("unresolvable metadata path: {0}")]
    Unresolvable(String),
}

/// A metadata-relative annotation path: navigation segments plus a terminal
/// target, rooted at an entity set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPath {
    /// Entity set the path is rooted at.
    pub root: String,
    /// Ordered navigation segments.
    pub segments: Vec<String>,
    /// Terminal property or annotation name.
    pub terminal: String,
}

impl MetadataPath {
    /// Path with no navigation segments.
    pub fn new(root: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            segments: Vec::new(),
            terminal: terminal.into(),
        }
    }

    /// Replace the navigation segments.
    pub fn with_segments(mut self, segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Split a raw slash-separated annotation path into segments + terminal.
    pub fn from_annotation(root: impl Into<String>, raw: &str) -> Self {
        let mut parts: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        let terminal = parts.pop().unwrap_or_default().to_owned();
        Self {
            root: root.into(),
            segments: parts.into_iter().map(str::to_owned).collect(),
            terminal,
        }
    }
}

/// Caller-supplied rewrite of the resolved relative path.
pub type PathVisitor<'a> = &'a dyn Fn(&str) -> String;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ResolveOptions {
    /// Tolerate a collection-valued terminal segment (capability paths
    /// evaluated at the parent-collection level).
    pub(crate) ignore_target_collection: bool,
}

/// The navigation segments a surrounding element's binding context already
/// represents: the last visited segment only.
pub fn represented_segments(visited: &[String]) -> &[String] {
    match visited.len() {
        0 => visited,
        n => &visited[n - 1..],
    }
}

/// Resolve an annotation path against the snapshot and the visited
/// navigation chain.
///
/// Returns a relative binding-path expression, or an absolute one when the
/// root set is a singleton. The snapshot is never mutated. The optional
/// `path_visitor` rewrites the final relative path (singleton-absolute paths
/// are already globally addressable and skip it).
pub fn resolve_path(
    path: &MetadataPath,
    snapshot: &MetadataSnapshot,
    visited: &[String],
    path_visitor: Option<PathVisitor<'_>>,
) -> Result<Expression<bool>, PathError> {
    resolve_with(path, snapshot, visited, path_visitor, ResolveOptions::default())
}

pub(crate) fn resolve_with(
    path: &MetadataPath,
    snapshot: &MetadataSnapshot,
    visited: &[String],
    path_visitor: Option<PathVisitor<'_>>,
    opts: ResolveOptions,
) -> Result<Expression<bool>, PathError> {
    let Some(set) = snapshot.entity_set(&path.root) else {
        return Err(PathError::Unresolvable(format!(
            "unknown entity set '{}'",
            path.root
        )));
    };
    let Some(mut entity_type) = snapshot.entity_type(&set.entity_type) else {
        return Err(PathError::Unresolvable(format!(
            "entity set '{}' references unknown type '{}'",
            path.root, set.entity_type
        )));
    };

    let represented = if set.singleton {
        // Singletons are globally addressable; the surrounding context does
        // not shorten their paths.
        &[][..]
    } else {
        represented_segments(visited)
    };

    let mut remaining: Vec<&str> = Vec::new();
    for (i, segment) in path.segments.iter().enumerate() {
        let Some(nav) = entity_type.navigation.get(segment) else {
            return Err(PathError::Unresolvable(format!(
                "type '{}' has no navigation property '{segment}'",
                entity_type.name
            )));
        };
        let represented_here = i == 0 && represented.first().is_some_and(|s| s == segment);
        let terminal_segment = i + 1 == path.segments.len();
        if nav.collection
            && !represented_here
            && !(terminal_segment && opts.ignore_target_collection)
        {
            return Err(PathError::Unresolvable(format!(
                "collection-valued segment '{segment}' cannot be addressed in a scalar binding"
            )));
        }
        if !represented_here {
            remaining.push(segment);
        }
        entity_type = snapshot.entity_type(&nav.target_type).ok_or_else(|| {
            PathError::Unresolvable(format!(
                "navigation '{segment}' targets unknown type '{}'",
                nav.target_type
            ))
        })?;
    }

    if set.singleton {
        let mut abs = format!("/{}", path.root);
        for segment in &path.segments {
            abs.push('/');
            abs.push_str(segment);
        }
        abs.push('/');
        abs.push_str(&path.terminal);
        return Ok(path_in_model(abs, None));
    }

    let mut rel = remaining.join("/");
    if !rel.is_empty() {
        rel.push('/');
    }
    rel.push_str(&path.terminal);
    if let Some(visitor) = path_visitor {
        rel = visitor(&rel);
    }
    Ok(path_in_model(rel, None))
}

/// Resolve a raw annotation path relative to an entity type, with an empty
/// visited-segment set. Used by the capability resolver's fallback ladder.
pub(crate) fn resolve_in_type(
    type_name: &str,
    raw: &str,
    snapshot: &MetadataSnapshot,
    opts: ResolveOptions,
) -> Result<Expression<bool>, PathError> {
    let Some(mut entity_type) = snapshot.entity_type(type_name) else {
        return Err(PathError::Unresolvable(format!(
            "unknown entity type '{type_name}'"
        )));
    };
    let mut parts: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    let Some(terminal) = parts.pop() else {
        return Err(PathError::Unresolvable("empty annotation path".to_owned()));
    };
    for (i, segment) in parts.iter().enumerate() {
        let Some(nav) = entity_type.navigation.get(*segment) else {
            return Err(PathError::Unresolvable(format!(
                "type '{}' has no navigation property '{segment}'",
                entity_type.name
            )));
        };
        let terminal_segment = i + 1 == parts.len();
        if nav.collection && !(terminal_segment && opts.ignore_target_collection) {
            return Err(PathError::Unresolvable(format!(
                "collection-valued segment '{segment}' cannot be addressed in a scalar binding"
            )));
        }
        entity_type = snapshot.entity_type(&nav.target_type).ok_or_else(|| {
            PathError::Unresolvable(format!(
                "navigation '{segment}' targets unknown type '{}'",
                nav.target_type
            ))
        })?;
    }
    let mut rel = parts.join("/");
    if !rel.is_empty() {
        rel.push('/');
    }
    rel.push_str(terminal);
    Ok(path_in_model(rel, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::algebra::path_in_model;
    use crate::metadata::model::{
        CapabilityAnnotations, EntitySet, EntityType, MetadataSnapshot, NavigationProperty,
    };
    use std::collections::BTreeMap;

    fn snapshot() -> MetadataSnapshot {
        let mut order_nav = BTreeMap::new();
        order_nav.insert(
            "OrderItems".to_owned(),
            NavigationProperty {
                name: "OrderItems".to_owned(),
                target_type: "OrderItem".to_owned(),
                partner: Some("Order".to_owned()),
                collection: true,
            },
        );
        let mut item_nav = BTreeMap::new();
        item_nav.insert(
            "Product".to_owned(),
            NavigationProperty {
                name: "Product".to_owned(),
                target_type: "Product".to_owned(),
                partner: None,
                collection: false,
            },
        );
        item_nav.insert(
            "Order".to_owned(),
            NavigationProperty {
                name: "Order".to_owned(),
                target_type: "Order".to_owned(),
                partner: Some("OrderItems".to_owned()),
                collection: false,
            },
        );

        let types = [
            ("Order", order_nav),
            ("OrderItem", item_nav),
            ("Product", BTreeMap::new()),
            ("Settings", BTreeMap::new()),
        ];
        let mut entity_types = BTreeMap::new();
        for (name, navigation) in types {
            entity_types.insert(
                name.to_owned(),
                EntityType {
                    name: name.to_owned(),
                    navigation,
                    create_hidden: Default::default(),
                    delete_hidden: Default::default(),
                    update_hidden: Default::default(),
                    new_action: None,
                    draft_root: false,
                    sticky_session: false,
                },
            );
        }

        let mut entity_sets = BTreeMap::new();
        for (name, ty, singleton) in [
            ("Orders", "Order", false),
            ("OrderItems", "OrderItem", false),
            ("Settings", "Settings", true),
        ] {
            entity_sets.insert(
                name.to_owned(),
                EntitySet {
                    name: name.to_owned(),
                    entity_type: ty.to_owned(),
                    singleton,
                    capabilities: CapabilityAnnotations::default(),
                },
            );
        }

        MetadataSnapshot {
            entity_sets,
            entity_types,
        }
    }

    #[test]
    fn only_the_last_visited_segment_is_represented() {
        let visited = vec!["OrderItems".to_owned(), "Product".to_owned()];
        assert_eq!(represented_segments(&visited), &["Product".to_owned()][..]);
        assert!(represented_segments(&[]).is_empty());
    }

    #[test]
    fn represented_segment_is_stripped_from_the_binding_path() {
        let snap = snapshot();
        let path = MetadataPath::new("OrderItems", "IsActive").with_segments(["Product"]);
        let resolved = resolve_path(&path, &snap, &["Product".to_owned()], None).unwrap();
        assert_eq!(resolved, path_in_model::<bool>("IsActive", None));
    }

    #[test]
    fn unrepresented_segments_stay_in_the_binding_path() {
        let snap = snapshot();
        let path = MetadataPath::new("OrderItems", "IsActive").with_segments(["Product"]);
        let resolved = resolve_path(&path, &snap, &[], None).unwrap();
        assert_eq!(resolved, path_in_model::<bool>("Product/IsActive", None));
    }

    #[test]
    fn singleton_roots_resolve_absolute() {
        let snap = snapshot();
        let path = MetadataPath::new("Settings", "AllowEditing");
        let resolved = resolve_path(&path, &snap, &["OrderItems".to_owned()], None).unwrap();
        assert_eq!(
            resolved,
            path_in_model::<bool>("/Settings/AllowEditing", None)
        );
    }

    #[test]
    fn unknown_roots_and_segments_are_unresolvable() {
        let snap = snapshot();
        let unknown_root = MetadataPath::new("Nope", "X");
        assert!(matches!(
            resolve_path(&unknown_root, &snap, &[], None),
            Err(PathError::Unresolvable(_))
        ));

        let unknown_segment = MetadataPath::new("Orders", "X").with_segments(["Nope"]);
        assert!(matches!(
            resolve_path(&unknown_segment, &snap, &[], None),
            Err(PathError::Unresolvable(_))
        ));
    }

    #[test]
    fn unrepresented_collection_segments_are_unresolvable() {
        let snap = snapshot();
        let path = MetadataPath::new("Orders", "IsActive").with_segments(["OrderItems"]);
        assert!(matches!(
            resolve_path(&path, &snap, &[], None),
            Err(PathError::Unresolvable(_))
        ));
    }

    #[test]
    fn path_visitor_rewrites_relative_paths() {
        let snap = snapshot();
        let path = MetadataPath::new("Orders", "Deletable");
        let visitor = |p: &str| format!("entity/{p}");
        let resolved = resolve_path(&path, &snap, &[], Some(&visitor)).unwrap();
        assert_eq!(resolved, path_in_model::<bool>("entity/Deletable", None));
    }
}
