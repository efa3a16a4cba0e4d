//! Visibility and enablement rules for the Mass-Edit action.

use crate::actions::context::ActionContext;
use crate::actions::runtime;
use crate::expression::algebra::{and, constant, greater_than, not};
use crate::expression::ir::Expression;
use crate::manifest::TemplateType;

/// Visibility of the Mass-Edit control.
///
/// Requires an explicit manifest opt-in and a single active visualization
/// (selection semantics differ in split views). Statically non-updatable
/// collections never show it; dynamic updatability only gates enablement.
pub fn visible(ctx: &ActionContext) -> Expression<bool> {
    if ctx.update_restriction.expression.constant_bool() == Some(false) {
        return constant(false);
    }
    if ctx.manifest.enable_mass_edit != Some(true) {
        return constant(false);
    }
    if ctx.multi_visualization {
        return constant(false);
    }
    let page_term = match ctx.manifest.template_type {
        TemplateType::ObjectPage => runtime::is_editable(),
        TemplateType::ListReport => constant(true),
        TemplateType::AnalyticalListPage => constant(false),
    };
    and([page_term, not(ctx.update_hidden.clone())])
}

/// Enablement of the Mass-Edit control: a selection with at least one
/// updatable context.
pub fn enabled(visible: &Expression<bool>) -> Expression<bool> {
    and([
        visible.clone(),
        greater_than(runtime::selected_count(), constant(0i64)),
        greater_than(runtime::updatable_count(), constant(0i64)),
    ])
}
