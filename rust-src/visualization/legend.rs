//! Map quantile legend and the series legend of the area/bar charts.

use crate::config::{DIMMED_OPACITY, SERIES_COLORS};
use crate::format::fmt_value;
use crate::models::FormatKind;
use crate::scale::QuantileScale;
use crate::scene::{fmt_num, Element, Scene, Tag};


const SWATCH_MAX_WIDTH: f64 = 60.0;
const SWATCH_HEIGHT: f64 = 8.0;
const SERIES_ITEM_WIDTH: f64 = 140.0;


/// Layer names of the two series, indexed like the series.
pub const SERIES_LAYERS: [&str; 2] = ["series-0", "series-1"];


/// One swatch per color bucket, labelled with the bucket's lower bound.
pub fn quantile_legend(
    scale: &QuantileScale<&'static str>,
    format: FormatKind,
    width: f64,
) -> Vec<Element> {
    let colors = scale.range();
    if colors.is_empty() || scale.domain().is_empty() {
        return Vec::new();
    }

    let swatch = (width / colors.len() as f64).min(SWATCH_MAX_WIDTH);
    let bounds = scale.bucket_lower_bounds();
    let mut elements = Vec::with_capacity(colors.len() * 2);

    for (i, (color, bound)) in colors.iter().zip(bounds).enumerate() {
        let x = i as f64 * swatch;
        elements.push(
            Element::new(format!("legend-swatch-{i}"), Tag::Rect)
                .num("x", x)
                .num("y", 0.0)
                .num("width", swatch)
                .num("height", SWATCH_HEIGHT)
                .attr("fill", color),
        );
        elements.push(
            Element::new(format!("legend-label-{i}"), Tag::Text)
                .num("x", x)
                .num("y", SWATCH_HEIGHT + 12.0)
                .text(fmt_value(bound, Some(format))),
        );
    }

    elements
}


/// Swatch and label per series.
pub fn series_legend(labels: &[&str]) -> Vec<Element> {
    labels
        .iter()
        .zip(SERIES_COLORS)
        .enumerate()
        .flat_map(|(i, (label, color))| {
            let x = i as f64 * SERIES_ITEM_WIDTH;
            [
                Element::new(format!("legend-swatch-{i}"), Tag::Rect)
                    .num("x", x)
                    .num("y", -8.0)
                    .num("width", 10.0)
                    .num("height", 10.0)
                    .attr("fill", color)
                    .attr("data-series", i),
                Element::new(format!("legend-label-{i}"), Tag::Text)
                    .num("x", x + 14.0)
                    .num("y", 0.0)
                    .text(*label),
            ]
        })
        .collect()
}


/// Dim every series except `focus`; `None` restores all of them.
pub fn apply_emphasis(scene: &mut Scene, focus: Option<usize>) {
    for (i, name) in SERIES_LAYERS.iter().enumerate() {
        let opacity = match focus {
            Some(f) if f != i => DIMMED_OPACITY,
            _ => 1.0,
        };
        scene.layer_mut(name).set_attr("opacity", fmt_num(opacity));
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAP_PALETTE;
    use crate::scene::Layer;

    #[test]
    fn test_quantile_legend() {
        let scale = QuantileScale::new((1..=10).map(|v| v as f64 * 1024.0), MAP_PALETTE.to_vec());
        let elements = quantile_legend(&scale, FormatKind::Bytes, 760.0);

        assert_eq!(elements.len(), 10);
        assert_eq!(elements[0].get_attr("width"), Some("60"));
        assert_eq!(elements[0].get_attr("fill"), Some(MAP_PALETTE[0]));
        assert_eq!(elements[1].text.as_deref(), Some("1 KiB"));
    }

    #[test]
    fn test_quantile_legend_empty() {
        let scale = QuantileScale::new(Vec::new(), MAP_PALETTE.to_vec());
        assert!(quantile_legend(&scale, FormatKind::Number, 760.0).is_empty());
    }

    #[test]
    fn test_series_legend() {
        let elements = series_legend(&["Hits", "Visitors"]);
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[2].get_attr("fill"), Some(SERIES_COLORS[1]));
        assert_eq!(elements[3].text.as_deref(), Some("Visitors"));
    }

    #[test]
    fn test_emphasis_dims_other_series() {
        let mut scene = Scene::new(100.0, 100.0, "area-chart");
        scene.add_layer(Layer::new(SERIES_LAYERS[0]));
        scene.add_layer(Layer::new(SERIES_LAYERS[1]));

        apply_emphasis(&mut scene, Some(0));
        assert_eq!(scene.layer(SERIES_LAYERS[0]).unwrap().attrs["opacity"], "1");
        assert_eq!(scene.layer(SERIES_LAYERS[1]).unwrap().attrs["opacity"], "0.1");

        apply_emphasis(&mut scene, None);
        assert_eq!(scene.layer(SERIES_LAYERS[1]).unwrap().attrs["opacity"], "1");
    }
}
