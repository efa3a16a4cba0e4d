//! Visibility and enablement rules for the Delete action.

use crate::actions::context::ActionContext;
use crate::actions::runtime;
use crate::expression::algebra::{and, constant, greater_than, not, or};
use crate::expression::ir::Expression;
use crate::manifest::TemplateType;

/// Visibility of the Delete control.
///
/// Analytical list pages never delete. On the list page the control stays
/// visible outside edit mode: drafts pending cancellation must remain
/// deletable there. Everywhere else deletion is an edit-mode operation.
pub fn visible(ctx: &ActionContext) -> Expression<bool> {
    if ctx.manifest.template_type == TemplateType::AnalyticalListPage {
        return constant(false);
    }
    if ctx.delete_restriction.expression.constant_bool() == Some(false) {
        return constant(false);
    }
    if ctx.delete_hidden.constant_bool() == Some(true) {
        return constant(false);
    }
    let hidden = ctx.delete_hidden.clone();
    match ctx.manifest.template_type {
        TemplateType::ListReport => not(hidden),
        _ => and([not(hidden), runtime::is_editable()]),
    }
}

/// Enablement of the Delete control: something deletable must be selected.
///
/// The list page adds draft-session terms (unsaved changes by other users,
/// drafts that can still be cancelled).
pub fn enabled(ctx: &ActionContext, visible: &Expression<bool>) -> Expression<bool> {
    let mut any_deletable = vec![
        greater_than(runtime::deletable_count(), constant(0i64)),
        greater_than(runtime::drafts_with_deletable_active_count(), constant(0i64)),
    ];
    if ctx.manifest.template_type == TemplateType::ListReport && ctx.draft_or_sticky {
        any_deletable.push(greater_than(runtime::unsaved_count(), constant(0i64)));
        any_deletable.push(greater_than(
            runtime::cancelable_draft_count(),
            constant(0i64),
        ));
    }
    and([visible.clone(), or(any_deletable)])
}
