//! Per-action derivation rules and the table-level entry point.

pub mod context;
pub mod create;
pub mod delete;
pub mod mass_edit;
pub mod paste;
pub mod runtime;

use tracing::instrument;

use crate::actions::context::ActionContext;
use crate::actions::create::CreateVariant;
use crate::expression::algebra::constant;
use crate::expression::compile::{CompiledExpression, compile_expression};
use crate::expression::ir::Expression;
use crate::foundation::error::BindkitResult;

/// Final derivation output for one action control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDecision {
    /// Whether the control is stamped out at all.
    pub is_templated: CompiledExpression,
    /// Visibility binding.
    pub visible: CompiledExpression,
    /// Enablement binding.
    pub enabled: CompiledExpression,
}

/// Derivation output for the standard actions of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableActionDecisions {
    /// The toolbar Create button.
    pub create: ActionDecision,
    /// The creation-row control.
    pub creation_row: ActionDecision,
    /// The Delete control.
    pub delete: ActionDecision,
    /// The Paste control.
    pub paste: ActionDecision,
    /// The Mass-Edit control.
    pub mass_edit: ActionDecision,
}

/// Derive the full decision set for one table in a single pass.
#[instrument(skip(ctx), fields(collection = %ctx.collection))]
pub fn derive_table_actions(ctx: &ActionContext) -> BindkitResult<TableActionDecisions> {
    let create_visible = create::visible(ctx);
    let create_enabled = create::enabled(ctx);

    let button = decision(
        create::is_templated(ctx, CreateVariant::ToolbarButton, &create_visible),
        create_visible.clone(),
        create_enabled.clone(),
    )?;
    let creation_row = decision(
        create::is_templated(ctx, CreateVariant::CreationRow, &create_visible),
        create_visible.clone(),
        create_enabled,
    )?;

    // Exactly one creation variant is templated; either way the pair counts
    // as templated as soon as the shared visibility can show.
    let insert_update_templated = create_visible.constant_bool() != Some(false);

    let delete_visible = delete::visible(ctx);
    let delete_enabled = delete::enabled(ctx, &delete_visible);
    let delete = decision(
        templated_from_visibility(&delete_visible),
        delete_visible,
        delete_enabled,
    )?;

    let paste_visible = paste::visible(ctx, &create_visible, insert_update_templated);
    let paste_enabled = paste::enabled(ctx);
    let paste = decision(
        templated_from_visibility(&paste_visible),
        paste_visible,
        paste_enabled,
    )?;

    let mass_edit_visible = mass_edit::visible(ctx);
    let mass_edit_enabled = mass_edit::enabled(&mass_edit_visible);
    let mass_edit = decision(
        templated_from_visibility(&mass_edit_visible),
        mass_edit_visible,
        mass_edit_enabled,
    )?;

    Ok(TableActionDecisions {
        create: button,
        creation_row,
        delete,
        paste,
        mass_edit,
    })
}

/// A control is templated unless its visibility folded to `false`.
fn templated_from_visibility(visible: &Expression<bool>) -> Expression<bool> {
    constant(visible.constant_bool() != Some(false))
}

fn decision(
    is_templated: Expression<bool>,
    visible: Expression<bool>,
    enabled: Expression<bool>,
) -> BindkitResult<ActionDecision> {
    Ok(ActionDecision {
        is_templated: compile_expression(&is_templated)?,
        visible: compile_expression(&visible)?,
        enabled: compile_expression(&enabled)?,
    })
}
