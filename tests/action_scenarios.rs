use bindkit::manifest::{CreationMode, TableManifest, TemplateType};
use bindkit::{ActionContext, MetadataSnapshot, derive_table_actions};

fn snapshot() -> MetadataSnapshot {
    MetadataSnapshot::from_json(include_str!("data/metadata.json")).unwrap()
}

fn build(manifest: TableManifest) -> bindkit::TableActionDecisions {
    let snap = snapshot();
    let ctx = ActionContext::build(&snap, "Orders", &[], &manifest, false).unwrap();
    derive_table_actions(&ctx).unwrap()
}

#[test]
fn external_create_on_list_report_is_visible() {
    let decisions = build(TableManifest {
        creation_mode: CreationMode::External,
        template_type: TemplateType::ListReport,
        ..Default::default()
    });
    assert_eq!(decisions.create.visible.to_string(), "true");
    assert_eq!(decisions.create.is_templated.to_string(), "true");
}

#[test]
fn delete_on_analytical_list_page_is_never_visible() {
    let decisions = build(TableManifest {
        template_type: TemplateType::AnalyticalListPage,
        ..Default::default()
    });
    assert_eq!(decisions.delete.visible.to_string(), "false");
    assert_eq!(decisions.delete.is_templated.to_string(), "false");
}

#[test]
fn paste_disabled_in_manifest_is_never_visible() {
    let decisions = build(TableManifest {
        enable_paste: Some(false),
        template_type: TemplateType::ObjectPage,
        ..Default::default()
    });
    assert_eq!(decisions.paste.visible.to_string(), "false");
}

#[test]
fn mass_edit_without_manifest_opt_in_is_never_visible() {
    let decisions = build(TableManifest {
        template_type: TemplateType::ListReport,
        ..Default::default()
    });
    assert_eq!(decisions.mass_edit.visible.to_string(), "false");
}

#[test]
fn delete_on_object_page_binds_to_edit_mode() {
    let decisions = build(TableManifest {
        template_type: TemplateType::ObjectPage,
        ..Default::default()
    });
    assert_eq!(decisions.delete.visible.to_string(), "{ui>/isEditable}");
}

#[test]
fn delete_enablement_is_count_driven() {
    let decisions = build(TableManifest {
        template_type: TemplateType::ListReport,
        ..Default::default()
    });
    let enabled = decisions.delete.enabled.to_string();
    assert!(enabled.contains("internal>deletableContexts"), "{enabled}");
    assert!(enabled.contains("length($0)"), "{enabled}");
    // Draft-session terms only appear on the list page.
    assert!(enabled.contains("internal>unSavedContexts"), "{enabled}");
}

#[test]
fn creation_row_variant_is_templated_only_in_creation_row_mode() {
    let row_mode = build(TableManifest {
        creation_mode: CreationMode::CreationRow,
        template_type: TemplateType::ObjectPage,
        ..Default::default()
    });
    assert_eq!(row_mode.creation_row.is_templated.to_string(), "true");
    assert_eq!(row_mode.create.is_templated.to_string(), "false");

    let button_mode = build(TableManifest {
        creation_mode: CreationMode::Inline,
        template_type: TemplateType::ObjectPage,
        ..Default::default()
    });
    assert_eq!(button_mode.creation_row.is_templated.to_string(), "false");
    assert_eq!(button_mode.create.is_templated.to_string(), "true");
}

#[test]
fn list_report_delete_stays_visible_outside_edit_mode() {
    // Drafts pending cancellation must remain deletable on the list page,
    // so visibility does not bind to edit mode there.
    let decisions = build(TableManifest {
        template_type: TemplateType::ListReport,
        ..Default::default()
    });
    assert_eq!(decisions.delete.visible.to_string(), "true");
}

#[test]
fn inline_creation_rows_reappear_while_creating() {
    let snap = snapshot();
    let manifest = TableManifest::from_json(include_str!("data/table_manifest.json")).unwrap();
    let ctx = ActionContext::build(&snap, "Orders", &[], &manifest, false).unwrap();
    let decisions = derive_table_actions(&ctx).unwrap();
    let visible = decisions.create.visible.to_string();
    assert!(visible.contains("ui>/createMode"), "{visible}");
    assert!(visible.contains("ui>/isEditable"), "{visible}");
}
