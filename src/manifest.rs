//! Table/manifest configuration boundary.
//!
//! Mirrors the camelCase manifest JSON the hosting framework ships; every
//! field is defaulted so a partial manifest deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{BindkitError, BindkitResult};

/// How new rows come into existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationMode {
    /// Navigate to a dedicated creation page.
    #[default]
    External,
    /// Create inline in the table.
    Inline,
    /// Always-present empty rows at the boundary of the table.
    InlineCreationRows,
    /// A dedicated creation-row control above the table body.
    CreationRow,
}

/// The kind of page hosting the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateType {
    /// Entry-point list page.
    #[default]
    ListReport,
    /// Detail page of a single entity.
    ObjectPage,
    /// Hybrid analytical page.
    AnalyticalListPage,
}

/// Concrete table widget flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableType {
    /// Responsive table.
    #[default]
    ResponsiveTable,
    /// Scrollable grid table.
    GridTable,
    /// Hierarchical tree table.
    TreeTable,
    /// Analytical (aggregating) table.
    AnalyticalTable,
}

/// Plain configuration flags of one table instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableManifest {
    /// Paste support; absent counts as enabled.
    pub enable_paste: Option<bool>,
    /// Mass-edit support; absent counts as disabled.
    pub enable_mass_edit: Option<bool>,
    /// Disable the creation-row "add" control while the row holds no data.
    pub disable_add_row_button_for_empty_data: bool,
    /// Hide inline creation rows while the page is in edit mode.
    pub inline_creation_rows_hidden_in_edit_mode: bool,
    /// Table widget flavour.
    #[serde(rename = "type")]
    pub table_type: TableType,
    /// Row-creation mode.
    pub creation_mode: CreationMode,
    /// Hosting page type.
    pub template_type: TemplateType,
}

impl TableManifest {
    /// Deserialize a manifest from its JSON form.
    pub fn from_json(json: &str) -> BindkitResult<Self> {
        serde_json::from_str(json).map_err(|e| BindkitError::serde(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_defaults() {
        let m: TableManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(m.enable_paste, None);
        assert_eq!(m.enable_mass_edit, None);
        assert!(!m.disable_add_row_button_for_empty_data);
        assert_eq!(m.table_type, TableType::ResponsiveTable);
        assert_eq!(m.creation_mode, CreationMode::External);
        assert_eq!(m.template_type, TemplateType::ListReport);
    }

    #[test]
    fn camel_case_keys_deserialize() {
        let m: TableManifest = serde_json::from_str(
            r#"{"enableMassEdit":true,"creationMode":"CreationRow","type":"GridTable"}"#,
        )
        .unwrap();
        assert_eq!(m.enable_mass_edit, Some(true));
        assert_eq!(m.creation_mode, CreationMode::CreationRow);
        assert_eq!(m.table_type, TableType::GridTable);
    }
}
