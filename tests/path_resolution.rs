use bindkit::metadata::model::MetadataSnapshot;
use bindkit::metadata::path::{MetadataPath, represented_segments, resolve_path};
use bindkit::PathError;

fn snapshot() -> MetadataSnapshot {
    MetadataSnapshot::from_json(include_str!("data/metadata.json")).unwrap()
}

#[test]
fn earlier_navigation_segments_are_stripped() {
    let visited = vec!["OrderItems".to_owned(), "Product".to_owned()];
    assert_eq!(represented_segments(&visited), &["Product".to_owned()][..]);
}

#[test]
fn represented_segment_collapses_out_of_the_binding() {
    let snap = snapshot();
    let path = MetadataPath::new("Orders", "AllowItemChanges").with_segments(["Items"]);
    let resolved = resolve_path(&path, &snap, &["Items".to_owned()], None).unwrap();
    assert_eq!(
        bindkit::compile_expression(&resolved).unwrap().to_string(),
        "{AllowItemChanges}"
    );
}

#[test]
fn singleton_roots_resolve_to_absolute_paths() {
    let mut snap = snapshot();
    // Promote Orders to a singleton for the purpose of this test.
    snap.entity_sets.get_mut("Orders").unwrap().singleton = true;
    let path = MetadataPath::new("Orders", "AllowItemChanges");
    let resolved = resolve_path(&path, &snap, &["Items".to_owned()], None).unwrap();
    let compiled = bindkit::compile_expression(&resolved).unwrap().to_string();
    assert!(compiled.starts_with("{/Orders/"), "{compiled}");
}

#[test]
fn unresolvable_paths_report_instead_of_panicking() {
    let snap = snapshot();
    let path = MetadataPath::new("Orders", "X").with_segments(["NoSuchNavigation"]);
    let err = resolve_path(&path, &snap, &[], None).unwrap_err();
    assert!(matches!(err, PathError::Unresolvable(_)));
}
