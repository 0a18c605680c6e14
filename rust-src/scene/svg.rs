//! Standalone SVG documents from a panel scene.

use std::fmt::Write;

use crate::format::escape_html;

use super::element::{Animation, Element};
use super::panel::Panel;


const TOOLTIP_WIDTH: f64 = 180.0;
const TOOLTIP_HEIGHT: f64 = 70.0;


/// Serialize a panel to SVG; an uninitialized panel gives an empty document.
pub fn to_svg(panel: &Panel) -> String {
    let Some(scene) = panel.scene() else {
        return r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0"></svg>"#.to_string();
    };

    let mut svg_parts = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" class="{}" id="{}">"#,
            fmt(scene.width), fmt(scene.height), escape_html(&scene.class), escape_html(&panel.id)
        ),
        "<style>".to_string(),
        "  text { font: 11px sans-serif; fill: #6b6b68; }".to_string(),
        "  .chart-tooltip { font: 12px sans-serif; background: #fff; border: 1px solid #ccc; padding: 4px; }".to_string(),
        "</style>".to_string(),
    ];

    for layer in scene.layers() {
        let mut open = format!(r#"<g data-layer="{}""#, escape_html(&layer.name));
        push_attrs(&mut open, layer.attrs.iter());
        open.push('>');
        svg_parts.push(open);

        for element in layer.elements() {
            svg_parts.push(element_to_svg(element));
        }

        svg_parts.push("</g>".to_string());
    }

    if panel.tooltip.visible {
        let [x, y] = panel.tooltip.position;
        svg_parts.push(format!(
            r#"<foreignObject class="tooltip" x="{}" y="{}" width="{}" height="{}"><div xmlns="http://www.w3.org/1999/xhtml">{}</div></foreignObject>"#,
            fmt(x), fmt(y), fmt(TOOLTIP_WIDTH), fmt(TOOLTIP_HEIGHT), panel.tooltip.html
        ));
    }

    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


fn element_to_svg(element: &Element) -> String {
    let tag = element.tag.name();
    let mut out = format!(r#"<{tag} data-key="{}""#, escape_html(&element.key));
    push_attrs(&mut out, element.attrs.iter());

    if element.animations.is_empty() && element.text.is_none() {
        out.push_str("/>");
        return out;
    }

    out.push('>');
    for animation in &element.animations {
        out.push_str(&animation_to_svg(animation));
    }
    if let Some(text) = &element.text {
        out.push_str(&escape_html(text));
    }
    let _ = write!(out, "</{tag}>");
    out
}


/// SMIL animation; a delay is folded into `values`/`keyTimes` so the start
/// value holds until the animation begins.
fn animation_to_svg(animation: &Animation) -> String {
    let timing = animation.timing;
    let attr = escape_html(&animation.attr);
    let from = escape_html(&animation.from);
    let to = escape_html(&animation.to);

    if timing.delay_ms == 0 {
        return format!(
            r#"<animate attributeName="{attr}" from="{from}" to="{to}" dur="{}ms" fill="freeze"/>"#,
            timing.duration_ms.max(1)
        );
    }

    let total = timing.delay_ms + timing.duration_ms.max(1);
    let hold = timing.delay_ms as f64 / total as f64;
    format!(
        r#"<animate attributeName="{attr}" values="{from};{from};{to}" keyTimes="0;{:.3};1" dur="{total}ms" fill="freeze"/>"#,
        hold
    )
}


fn push_attrs<'a>(out: &mut String, attrs: impl Iterator<Item = (&'a String, &'a String)>) {
    for (name, value) in attrs {
        let _ = write!(out, r#" {}="{}""#, name, escape_html(value));
    }
}


fn fmt(value: f64) -> String {
    super::element::fmt_num(value)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, Scene, Tag, Transition};

    fn panel_with_rect(element: Element) -> Panel {
        let mut panel = Panel::new("p1");
        let scene = panel.scene_or_init(|| Scene::new(200.0, 100.0, "bar-chart"));
        let layer = scene.add_layer(Layer::new("marks"));
        layer.set_attr("transform", "translate(50,20)");
        layer.elements.insert(element.key.clone(), element);
        panel
    }

    #[test]
    fn test_uninitialized_panel() {
        let svg = to_svg(&Panel::new("empty"));
        assert!(svg.contains(r#"width="0""#));
    }

    #[test]
    fn test_elements_and_layers() {
        let panel = panel_with_rect(Element::new("a", Tag::Rect).num("width", 10.0).attr("fill", "#000"));
        let svg = to_svg(&panel);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"class="bar-chart""#));
        assert!(svg.contains(r#"<g data-layer="marks" transform="translate(50,20)">"#));
        assert!(svg.contains(r##"<rect data-key="a" fill="#000" width="10"/>"##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_animation_without_delay() {
        let mut element = Element::new("a", Tag::Rect);
        element.animations.push(Animation::new("fill", "#000", "#fff", Transition::new(500)));
        let svg = to_svg(&panel_with_rect(element));

        assert!(svg.contains(r##"<animate attributeName="fill" from="#000" to="#fff" dur="500ms" fill="freeze"/>"##));
    }

    #[test]
    fn test_animation_with_delay_holds_start() {
        let mut element = Element::new("a", Tag::Rect);
        element
            .animations
            .push(Animation::new("height", 0, 50, Transition::new(500).delayed(500)));
        let svg = to_svg(&panel_with_rect(element));

        assert!(svg.contains(r#"values="0;0;50" keyTimes="0;0.500;1" dur="1000ms""#));
    }

    #[test]
    fn test_text_escaped() {
        let svg = to_svg(&panel_with_rect(Element::new("t", Tag::Text).text("a<b")));
        assert!(svg.contains("a&lt;b</text>"));
    }

    #[test]
    fn test_tooltip_rendered_when_visible() {
        let mut panel = panel_with_rect(Element::new("a", Tag::Rect));
        assert!(!to_svg(&panel).contains("foreignObject"));

        panel.tooltip.show("<b>Brazil</b>".to_string(), [10.0, 20.0]);
        let svg = to_svg(&panel);
        assert!(svg.contains(r#"<foreignObject class="tooltip" x="10" y="20""#));
        assert!(svg.contains("<b>Brazil</b>"));
    }
}
