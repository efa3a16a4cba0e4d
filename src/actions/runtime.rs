//! Typed catalog of runtime-state binding paths.
//!
//! The hosting page publishes a small amount of mutable state (edit mode,
//! selection bookkeeping) through two named models. Keeping the fields a
//! closed enum prevents loose path strings from spreading through the rule
//! layer.

use crate::expression::algebra::{length, path_in_model};
use crate::expression::ir::Expression;

/// Marker type for collection-valued runtime paths.
pub struct Contexts;

/// Runtime-state fields the rule layer may bind against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeField {
    /// The page is in edit mode.
    IsEditable,
    /// The page is actively creating a new entity.
    CreateMode,
    /// The creation row currently holds user-entered data.
    CreationRowHasData,
    /// Currently selected row contexts.
    SelectedContexts,
    /// Selected contexts the backend allows deleting.
    DeletableContexts,
    /// Selected contexts the backend allows updating.
    UpdatableContexts,
    /// Selected drafts whose active sibling is deletable.
    DraftsWithDeletableActive,
    /// Selected contexts with unsaved changes by another user.
    UnsavedContexts,
    /// Selected drafts that can still be cancelled.
    CancelableDrafts,
}

impl RuntimeField {
    /// Named model the field lives in.
    pub fn model(self) -> &'static str {
        match self {
            Self::IsEditable | Self::CreateMode => "ui",
            _ => "internal",
        }
    }

    /// Path within the model.
    pub fn path(self) -> &'static str {
        match self {
            Self::IsEditable => "/isEditable",
            Self::CreateMode => "/createMode",
            Self::CreationRowHasData => "creationRowHasData",
            Self::SelectedContexts => "selectedContexts",
            Self::DeletableContexts => "deletableContexts",
            Self::UpdatableContexts => "updatableContexts",
            Self::DraftsWithDeletableActive => "draftsWithDeletableActive",
            Self::UnsavedContexts => "unSavedContexts",
            Self::CancelableDrafts => "cancelableDrafts",
        }
    }
}

fn field_path<T>(field: RuntimeField) -> Expression<T> {
    path_in_model(field.path(), Some(field.model()))
}

fn contexts(field: RuntimeField) -> Expression<Contexts> {
    field_path(field)
}

/// Edit-mode flag of the hosting page.
pub fn is_editable() -> Expression<bool> {
    field_path(RuntimeField::IsEditable)
}

/// Create-mode flag of the hosting page.
pub fn create_mode() -> Expression<bool> {
    field_path(RuntimeField::CreateMode)
}

/// Whether the creation row currently holds data.
pub fn creation_row_has_data() -> Expression<bool> {
    field_path(RuntimeField::CreationRowHasData)
}

/// Number of selected contexts.
pub fn selected_count() -> Expression<i64> {
    length(contexts(RuntimeField::SelectedContexts))
}

/// Number of selected deletable contexts.
pub fn deletable_count() -> Expression<i64> {
    length(contexts(RuntimeField::DeletableContexts))
}

/// Number of selected updatable contexts.
pub fn updatable_count() -> Expression<i64> {
    length(contexts(RuntimeField::UpdatableContexts))
}

/// Number of selected drafts with a deletable active sibling.
pub fn drafts_with_deletable_active_count() -> Expression<i64> {
    length(contexts(RuntimeField::DraftsWithDeletableActive))
}

/// Number of selected contexts carrying another user's unsaved changes.
pub fn unsaved_count() -> Expression<i64> {
    length(contexts(RuntimeField::UnsavedContexts))
}

/// Number of selected drafts that can still be cancelled.
pub fn cancelable_draft_count() -> Expression<i64> {
    length(contexts(RuntimeField::CancelableDrafts))
}
