//! Visibility, enablement, and templating rules for the Create action and
//! its creation-row variant.

use crate::actions::context::ActionContext;
use crate::actions::runtime;
use crate::expression::algebra::{and, constant, not, or};
use crate::expression::ir::Expression;
use crate::manifest::{CreationMode, TableType, TemplateType};

/// Which creation control is being derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateVariant {
    /// The toolbar "Create" button.
    ToolbarButton,
    /// The dedicated creation-row control.
    CreationRow,
}

/// Visibility of the creation controls.
///
/// External creation mode only honours the hidden annotation (plus edit
/// mode outside the list page). Every other mode first checks a
/// "never visible" disjunction that can short-circuit the whole control
/// away at build time, then falls back to the page-type rule.
pub fn visible(ctx: &ActionContext) -> Expression<bool> {
    let hidden = ctx.create_hidden.clone();
    if ctx.manifest.creation_mode == CreationMode::External {
        let on_list_report = ctx.manifest.template_type == TemplateType::ListReport;
        return and([
            not(hidden),
            or([Expression::from(on_list_report), runtime::is_editable()]),
        ]);
    }

    let never = never_visible(ctx);
    if never.constant_bool() == Some(true) {
        return constant(false);
    }
    let base = match ctx.manifest.template_type {
        TemplateType::ListReport => not(hidden),
        _ => and([not(hidden), runtime::is_editable()]),
    };
    and([not(never), base])
}

/// Conditions under which the creation control can never show.
///
/// Mostly static; the inline-creation-rows term keeps a runtime residue
/// (the control reappears while a row is actively being created).
fn never_visible(ctx: &ActionContext) -> Expression<bool> {
    let new_action_unavailable = ctx
        .new_action
        .as_ref()
        .is_some_and(|action| action.available.constant_bool() == Some(false));
    let not_insertable_without_new_action = ctx.new_action.is_none()
        && ctx.insert_restriction.expression.constant_bool() == Some(false);
    let statically_hidden = ctx.create_hidden.constant_bool() == Some(true);

    let inline_rows_hidden = if ctx.manifest.creation_mode == CreationMode::InlineCreationRows
        && ctx.manifest.table_type == TableType::ResponsiveTable
        && ctx.manifest.inline_creation_rows_hidden_in_edit_mode
    {
        not(runtime::create_mode())
    } else {
        constant(false)
    };

    or([
        Expression::from(new_action_unavailable),
        Expression::from(not_insertable_without_new_action),
        Expression::from(statically_hidden),
        inline_rows_hidden,
    ])
}

/// Whether the given creation control is templated at all.
///
/// The control variant must agree with the configured creation mode (a
/// creation row is only stamped out in creation-row mode, the toolbar
/// button in every other mode), and a control whose visibility folded to
/// `false` is never templated; one that may show at runtime always is.
pub fn is_templated(
    ctx: &ActionContext,
    variant: CreateVariant,
    visible: &Expression<bool>,
) -> Expression<bool> {
    let row_variant = variant == CreateVariant::CreationRow;
    let row_mode = ctx.manifest.creation_mode == CreationMode::CreationRow;
    let variant_matches = row_variant == row_mode;
    let may_show = visible.constant_bool() != Some(false);
    constant(variant_matches && may_show)
}

/// Enablement of the creation controls.
pub fn enabled(ctx: &ActionContext) -> Expression<bool> {
    let row_based = matches!(
        ctx.manifest.creation_mode,
        CreationMode::CreationRow | CreationMode::InlineCreationRows
    );
    if row_based && ctx.manifest.disable_add_row_button_for_empty_data {
        runtime::creation_row_has_data()
    } else {
        constant(true)
    }
}
