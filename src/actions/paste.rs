//! Visibility and enablement rules for the Paste action.

use crate::actions::context::ActionContext;
use crate::expression::algebra::and;
use crate::expression::ir::Expression;
use crate::manifest::TemplateType;

/// Visibility of the Paste control.
///
/// Paste rides on the creation controls: it only shows where rows can be
/// created in place, which rules out the list page and analytical pages,
/// and it honours the insertable restriction as seen from the parent
/// collection.
pub fn visible(
    ctx: &ActionContext,
    create_visible: &Expression<bool>,
    insert_update_templated: bool,
) -> Expression<bool> {
    let paste_enabled_in_manifest = ctx.manifest.enable_paste != Some(false);
    let page_supports_paste = !matches!(
        ctx.manifest.template_type,
        TemplateType::ListReport | TemplateType::AnalyticalListPage
    );
    and([
        Expression::from(paste_enabled_in_manifest),
        create_visible.clone(),
        Expression::from(insert_update_templated),
        Expression::from(page_supports_paste),
        ctx.insert_restriction.navigation_expression.clone(),
    ])
}

/// Enablement of the Paste control.
///
/// Clipboard state is owned by the UI layer; what remains here is the
/// insertable restriction at the parent-collection level.
pub fn enabled(ctx: &ActionContext) -> Expression<bool> {
    ctx.insert_restriction.navigation_expression.clone()
}
