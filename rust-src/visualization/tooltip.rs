//! Tooltip placement and content.

use tracing::warn;

use crate::config::TOOLTIP_TEMPLATE_ID;
use crate::scene::Panel;


/// Gap between the pointer and the tooltip corner.
const POINTER_OFFSET: f64 = 12.0;


/// Render `fields` through the panel's tooltip template and show it near `pointer`.
///
/// Returns false (tooltip hidden) when the template is not registered.
pub fn show_tooltip(panel: &mut Panel, fields: &[String], pointer: [f64; 2]) -> bool {
    let Some(html) = panel.templates().render(TOOLTIP_TEMPLATE_ID, fields) else {
        warn!(template = TOOLTIP_TEMPLATE_ID, "tooltip template not found");
        panel.tooltip.hide();
        return false;
    };

    let position = [pointer[0] + POINTER_OFFSET, pointer[1] + POINTER_OFFSET];
    panel.tooltip.show(html, position);
    true
}


pub fn hide_tooltip(panel: &mut Panel) {
    panel.tooltip.hide();
}
