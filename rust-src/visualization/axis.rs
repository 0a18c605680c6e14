//! Axes and grid lines shared by the area and bar charts.

use crate::config::{GLYPH_WIDTH, GRID_STROKE, VALUE_TICKS};
use crate::format::fmt_value;
use crate::models::{Category, FormatKind};
use crate::scale::{category_tick_indices, BandScale, LinearScale};
use crate::scene::{Element, Tag};


/// Which side a value axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}


/// Shorten `label` so it fits in `max_width` pixels.
pub fn truncate_label(label: &str, max_width: f64) -> String {
    let fits = if max_width.is_finite() && max_width > 0.0 {
        (max_width / GLYPH_WIDTH).floor() as usize
    } else {
        0
    };

    let len = label.chars().count();
    if len <= fits {
        return label.to_string();
    }
    if fits == 0 {
        return String::new();
    }

    let mut out: String = label.chars().take(fits - 1).collect();
    out.push('…');
    out
}


/// Text shown for a category on the x-axis and in tooltips.
pub fn category_text(category: &Category, format: Option<FormatKind>) -> String {
    match (category, format) {
        (Category::Label(label), Some(kind)) if kind != FormatKind::Str => label
            .trim()
            .parse::<f64>()
            .map(|value| fmt_value(value, Some(kind)))
            .unwrap_or_else(|_| label.clone()),
        _ => category.to_string(),
    }
}


/// Domain line plus one label per sampled category.
pub fn x_axis(
    categories: &[Category],
    scale: &BandScale,
    n_ticks: usize,
    format: Option<FormatKind>,
    inner_width: f64,
) -> Vec<Element> {
    let mut elements = vec![Element::new("x-domain", Tag::Line)
        .num("x1", 0.0)
        .num("x2", inner_width)
        .num("y1", 0.0)
        .num("y2", 0.0)
        .attr("stroke", GRID_STROKE)];

    let ticks = category_tick_indices(categories.len(), n_ticks);
    if ticks.is_empty() {
        return elements;
    }

    let per_tick = inner_width / ticks.len() as f64;
    for index in ticks {
        let category = &categories[index];
        let key = category.key();
        let Some(x) = scale.center(&key) else { continue };

        elements.push(
            Element::new(format!("x-tick-{key}"), Tag::Text)
                .num("x", x)
                .num("y", 16.0)
                .attr("text-anchor", "middle")
                .text(truncate_label(&category_text(category, format), per_tick)),
        );
    }
    elements
}


/// Tick labels for a value axis.
pub fn y_axis(
    scale: &LinearScale,
    side: Side,
    format: Option<FormatKind>,
    inner_width: f64,
) -> Vec<Element> {
    let (prefix, x, anchor) = match side {
        Side::Left => ("y0", -6.0, "end"),
        Side::Right => ("y1", inner_width + 6.0, "start"),
    };

    scale
        .ticks(VALUE_TICKS)
        .into_iter()
        .map(|value| {
            Element::new(format!("{prefix}-tick-{value}"), Tag::Text)
                .num("x", x)
                .num("y", scale.scale(value))
                .attr("dy", "0.32em")
                .attr("text-anchor", anchor)
                .text(fmt_value(value, format))
        })
        .collect()
}


/// Horizontal grid lines at the value ticks.
pub fn grid(scale: &LinearScale, inner_width: f64) -> Vec<Element> {
    scale
        .ticks(VALUE_TICKS)
        .into_iter()
        .map(|value| {
            let y = scale.scale(value);
            Element::new(format!("grid-{value}"), Tag::Line)
                .num("x1", 0.0)
                .num("x2", inner_width)
                .num("y1", y)
                .num("y2", y)
                .attr("stroke", GRID_STROKE)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn categories(n: usize) -> Vec<Category> {
        (0..n).map(|i| Category::Label(format!("c{i}"))).collect()
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Jan", 70.0), "Jan");
        assert_eq!(truncate_label("Mozilla Firefox", 35.0), "Mozi…");
        assert_eq!(truncate_label("Chrome", 3.0), "");
        assert_eq!(truncate_label("Chrome", f64::NAN), "");
    }

    #[test]
    fn test_category_text_formats_numbers() {
        let bytes = Category::Label("2048".to_string());
        assert_eq!(category_text(&bytes, Some(FormatKind::Bytes)), "2 KiB");
        assert_eq!(category_text(&bytes, None), "2048");

        let label = Category::Label("Chrome".to_string());
        assert_eq!(category_text(&label, Some(FormatKind::Bytes)), "Chrome");
    }

    #[test]
    fn test_x_axis_two_categories() {
        let cats = vec![Category::Label("Jan".into()), Category::Label("Feb".into())];
        let keys: Vec<String> = cats.iter().map(Category::key).collect();
        let scale = BandScale::new(keys, [0.0, 660.0]);

        let elements = x_axis(&cats, &scale, 10, None, 660.0);
        let ticks: Vec<&Element> = elements.iter().filter(|e| e.key.starts_with("x-tick-")).collect();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].text.as_deref(), Some("Jan"));
        assert_eq!(ticks[0].get_attr("x"), Some("165"));
    }

    #[test]
    fn test_x_axis_samples_many_categories() {
        let cats = categories(40);
        let keys: Vec<String> = cats.iter().map(Category::key).collect();
        let scale = BandScale::new(keys, [0.0, 400.0]);

        let elements = x_axis(&cats, &scale, 10, None, 400.0);
        assert_eq!(elements.len(), 1 + 10);
    }

    #[test]
    fn test_y_axis_and_grid() {
        let scale = LinearScale::new([0.0, 20.0], [110.0, 0.0]);
        let labels = y_axis(&scale, Side::Right, None, 660.0);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0].key, "y1-tick-0");
        assert_eq!(labels[0].get_attr("x"), Some("666"));
        assert_eq!(labels[4].text.as_deref(), Some("20"));

        let lines = grid(&scale, 660.0);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4].get_attr("y1"), Some("0"));
    }
}
