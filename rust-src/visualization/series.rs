//! Category charts with one or two value series.
//!
//! The area and bar charts share scales, axes, hover handling and legend
//! emphasis; they only differ in the marks they draw, supplied through
//! [`Marks`].

use std::collections::HashMap;
use std::marker::PhantomData;

use serde_json::Value;

use crate::aggregation::normalize_series;
use crate::config::UPDATE_TRANSITION_MS;
use crate::error::ConfigError;
use crate::format::fmt_value;
use crate::models::{ChartConfig, SeriesDatum};
use crate::scale::{BandScale, LinearScale};
use crate::scene::{
    fmt_num, reconcile, Element, Layer, Panel, Patch, ReconcileOptions, Scene, Tag, Transition,
};

use super::axis::{category_text, grid, x_axis, y_axis, Side};
use super::legend::{apply_emphasis, series_legend, SERIES_LAYERS};
use super::tooltip::{hide_tooltip, show_tooltip};


const GRID_LAYER: &str = "grid";
const X_AXIS_LAYER: &str = "x-axis";
const Y0_AXIS_LAYER: &str = "y0-axis";
const Y1_AXIS_LAYER: &str = "y1-axis";
const INDICATOR_LAYER: &str = "indicator";
const LABELS_LAYER: &str = "labels";
const LEGEND_LAYER: &str = "legend";
const HITS_LAYER: &str = "hits";

const INDICATOR_KEY: &str = "indicator";

/// `nice` tick count used for the value domains.
const NICE_COUNT: usize = 10;


/// Mark geometry of a concrete chart.
pub trait Marks {
    /// CSS class of the root element.
    const CLASS: &'static str;
    /// Inner padding of the category bands.
    const BAND_PADDING: f64;
    /// Added to the largest second-series value before the domain is niced.
    const SECOND_AXIS_PAD: f64;

    /// Marks of `series` (0 or 1) for the current frame.
    fn draw(frame: &SeriesFrame, series: usize) -> Vec<Element>;
}


/// Scales and points derived by one render.
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    pub points: Vec<SeriesDatum>,
    pub x: BandScale,
    pub y0: LinearScale,
    /// Only set for dual-axis charts.
    pub y1: Option<LinearScale>,
    pub inner_width: f64,
    pub inner_height: f64,
}


impl SeriesFrame {
    /// Value scale of `series`.
    pub fn scale(&self, series: usize) -> Option<&LinearScale> {
        match series {
            0 => Some(&self.y0),
            1 => self.y1.as_ref(),
            _ => None,
        }
    }

    /// Value of `series` at a point.
    pub fn value(point: &SeriesDatum, series: usize) -> f64 {
        if series == 0 { point.y0 } else { point.y1.unwrap_or(0.0) }
    }
}


/// A chart drawing `M` marks over a category axis.
#[derive(Debug, Clone)]
pub struct SeriesChart<M> {
    config: ChartConfig,
    frames: HashMap<String, SeriesFrame>,
    marks: PhantomData<M>,
}


impl<M: Marks> SeriesChart<M> {
    pub fn new(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            frames: HashMap::new(),
            marks: PhantomData,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the configuration; it applies from the next render on.
    pub fn configure(&mut self, config: ChartConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Scales of the last render of a panel.
    pub fn frame(&self, panel_id: &str) -> Option<&SeriesFrame> {
        self.frames.get(panel_id)
    }

    /// Bind raw records to `panel` and redraw it.
    pub fn render(&mut self, panel: &mut Panel, raw: &[Value]) -> Patch {
        let config = &self.config;
        let frame = build_frame(config, raw, M::BAND_PADDING, M::SECOND_AXIS_PAD);
        let dual = frame.y1.is_some();

        let scene = panel.scene_or_init(|| skeleton(config, M::CLASS));
        layout(scene, config);

        let (iw, ih) = (frame.inner_width, frame.inner_height);
        let fixed = ReconcileOptions::default();
        let moving = ReconcileOptions::update(Transition::new(UPDATE_TRANSITION_MS))
            .exit(Transition::new(UPDATE_TRANSITION_MS));

        let mut patch = reconcile(scene.layer_mut(GRID_LAYER), grid(&frame.y0, iw), fixed);

        let categories: Vec<_> = frame.points.iter().map(|p| p.category.clone()).collect();
        patch.merge(reconcile(
            scene.layer_mut(X_AXIS_LAYER),
            x_axis(&categories, &frame.x, config.n_ticks, config.format.x, iw),
            fixed,
        ));
        patch.merge(reconcile(
            scene.layer_mut(Y0_AXIS_LAYER),
            y_axis(&frame.y0, Side::Left, config.format.y0, iw),
            fixed,
        ));
        let right_axis = match &frame.y1 {
            Some(scale) => y_axis(scale, Side::Right, config.format.y1, iw),
            None => Vec::new(),
        };
        patch.merge(reconcile(scene.layer_mut(Y1_AXIS_LAYER), right_axis, fixed));

        for (series, layer) in SERIES_LAYERS.iter().enumerate() {
            let marks = if series == 0 || dual { M::draw(&frame, series) } else { Vec::new() };
            patch.merge(reconcile(scene.layer_mut(layer), marks, moving));
        }

        if let Some(indicator) = scene.layer_mut(INDICATOR_LAYER).get_mut(INDICATOR_KEY) {
            indicator.set_attr("y2", fmt_num(ih));
        }

        patch.merge(reconcile(scene.layer_mut(LABELS_LAYER), axis_labels(config, dual), fixed));

        let labels = &config.labels;
        let legend_labels: Vec<&str> = if dual {
            vec![labels.y0.as_str(), labels.y1.as_str()]
        } else {
            vec![labels.y0.as_str()]
        };
        patch.merge(reconcile(scene.layer_mut(LEGEND_LAYER), series_legend(&legend_labels), fixed));

        patch.merge(reconcile(scene.layer_mut(HITS_LAYER), hit_rects(&frame), fixed));

        self.frames.insert(panel.id.clone(), frame);
        patch
    }

    /// Show the tooltip and move the indicator to the hovered category.
    pub fn on_pointer_move(&self, panel: &mut Panel, category_key: &str, pointer: [f64; 2]) -> bool {
        let hovered = self.frames.get(&panel.id).and_then(|frame| {
            let point = frame.points.iter().find(|p| p.category.key() == category_key)?;
            let x = frame.x.center(category_key)?;
            Some((point, x, frame.y1.is_some()))
        });

        let Some((point, x, dual)) = hovered else {
            self.on_pointer_leave(panel);
            return false;
        };

        let fields = self.tooltip_fields(point, dual);
        if let Some(indicator) = panel
            .scene_mut()
            .and_then(|scene| scene.layer_mut(INDICATOR_LAYER).get_mut(INDICATOR_KEY))
        {
            indicator.set_attr("x1", fmt_num(x));
            indicator.set_attr("x2", fmt_num(x));
            indicator.set_attr("opacity", 1);
        }
        show_tooltip(panel, &fields, pointer)
    }

    /// Hide the tooltip and the indicator.
    pub fn on_pointer_leave(&self, panel: &mut Panel) {
        hide_tooltip(panel);
        if let Some(indicator) = panel
            .scene_mut()
            .and_then(|scene| scene.layer_mut(INDICATOR_LAYER).get_mut(INDICATOR_KEY))
        {
            indicator.set_attr("opacity", 0);
        }
    }

    /// Emphasize `series` by dimming the other one (dual-axis charts only).
    pub fn on_legend_hover(&self, panel: &mut Panel, series: usize) {
        if !self.config.opts.dual_y_axis {
            return;
        }
        if let Some(scene) = panel.scene_mut() {
            apply_emphasis(scene, Some(series));
        }
    }

    pub fn on_legend_leave(&self, panel: &mut Panel) {
        if let Some(scene) = panel.scene_mut() {
            apply_emphasis(scene, None);
        }
    }

    fn tooltip_fields(&self, point: &SeriesDatum, dual: bool) -> Vec<String> {
        let config = &self.config;
        let mut fields = vec![
            category_text(&point.category, config.format.x),
            format!("{}: {}", config.labels.y0, fmt_value(point.y0, config.format.y0)),
        ];
        if dual {
            let value = point.y1.unwrap_or(0.0);
            fields.push(format!("{}: {}", config.labels.y1, fmt_value(value, config.format.y1)));
        }
        fields
    }
}


/// Normalize `raw` and derive the category and value scales.
pub fn build_frame(config: &ChartConfig, raw: &[Value], padding: f64, second_pad: f64) -> SeriesFrame {
    let dual = config.opts.dual_y_axis;
    let points = normalize_series(raw, &config.x, &config.y0, dual.then_some(&config.y1));

    let (iw, ih) = (config.inner_width(), config.inner_height());
    let keys = points.iter().map(|p| p.category.key()).collect();
    let x = BandScale::new(keys, [0.0, iw]).padding_inner(padding);

    let max0 = points.iter().map(|p| p.y0).fold(0.0, f64::max);
    let y0 = LinearScale::new([0.0, max0], [ih, 0.0]).nice(NICE_COUNT);

    let y1 = dual.then(|| {
        let max1 = points.iter().map(|p| p.y1.unwrap_or(0.0)).fold(0.0, f64::max);
        LinearScale::new([0.0, max1 + second_pad], [ih, 0.0]).nice(NICE_COUNT)
    });

    SeriesFrame { points, x, y0, y1, inner_width: iw, inner_height: ih }
}


fn skeleton(config: &ChartConfig, class: &str) -> Scene {
    let mut scene = Scene::new(config.width, config.height, class);
    let layers = [
        GRID_LAYER,
        X_AXIS_LAYER,
        Y0_AXIS_LAYER,
        Y1_AXIS_LAYER,
        SERIES_LAYERS[0],
        SERIES_LAYERS[1],
        INDICATOR_LAYER,
        LABELS_LAYER,
        LEGEND_LAYER,
        HITS_LAYER,
    ];
    for name in layers {
        scene.add_layer(Layer::new(name));
    }

    let indicator = Element::new(INDICATOR_KEY, Tag::Line)
        .num("x1", 0.0)
        .num("x2", 0.0)
        .num("y1", 0.0)
        .num("y2", config.inner_height())
        .attr("stroke", "#999999")
        .attr("stroke-dasharray", "3,3")
        .attr("opacity", 0);
    reconcile(scene.layer_mut(INDICATOR_LAYER), vec![indicator], ReconcileOptions::default());

    scene
}


/// Size the scene and position every layer inside the margins.
fn layout(scene: &mut Scene, config: &ChartConfig) {
    scene.width = config.width;
    scene.height = config.height;

    let (left, top) = (config.margin.left, config.margin.top);
    let inner = format!("translate({left},{top})");
    for name in [
        GRID_LAYER,
        Y0_AXIS_LAYER,
        Y1_AXIS_LAYER,
        SERIES_LAYERS[0],
        SERIES_LAYERS[1],
        INDICATOR_LAYER,
        LABELS_LAYER,
        HITS_LAYER,
    ] {
        scene.layer_mut(name).set_attr("transform", &inner);
    }

    let bottom = top + config.inner_height();
    scene
        .layer_mut(X_AXIS_LAYER)
        .set_attr("transform", format!("translate({left},{bottom})"));
    scene
        .layer_mut(LEGEND_LAYER)
        .set_attr("transform", format!("translate({left},{})", config.height - 4.0));
}


fn axis_labels(config: &ChartConfig, dual: bool) -> Vec<Element> {
    let iw = config.inner_width();
    let mut labels = vec![
        Element::new("label-x", Tag::Text)
            .num("x", iw)
            .num("y", config.inner_height() + 30.0)
            .attr("text-anchor", "end")
            .text(config.labels.x.as_str()),
        Element::new("label-y0", Tag::Text)
            .num("x", 0.0)
            .num("y", -8.0)
            .attr("text-anchor", "start")
            .text(config.labels.y0.as_str()),
    ];
    if dual {
        labels.push(
            Element::new("label-y1", Tag::Text)
                .num("x", iw)
                .num("y", -8.0)
                .attr("text-anchor", "end")
                .text(config.labels.y1.as_str()),
        );
    }
    labels
}


/// Invisible full-height column per category for hover.
fn hit_rects(frame: &SeriesFrame) -> Vec<Element> {
    let step = frame.x.step();
    let gap = step - frame.x.bandwidth();

    frame
        .points
        .iter()
        .filter_map(|point| {
            let key = point.category.key();
            let x = frame.x.position(&key)? - gap / 2.0;
            Some(
                Element::new(format!("hit-{key}"), Tag::Rect)
                    .num("x", x)
                    .num("y", 0.0)
                    .num("width", step)
                    .num("height", frame.inner_height)
                    .attr("fill", "transparent")
                    .attr("data-category", key),
            )
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::ChartOpts;

    /// Minimal marks: one rect per point.
    #[derive(Debug)]
    struct Dots;

    impl Marks for Dots {
        const CLASS: &'static str = "dot-chart";
        const BAND_PADDING: f64 = 0.0;
        const SECOND_AXIS_PAD: f64 = 0.0;

        fn draw(frame: &SeriesFrame, series: usize) -> Vec<Element> {
            let Some(scale) = frame.scale(series) else { return Vec::new() };
            frame
                .points
                .iter()
                .map(|p| {
                    Element::new(format!("dot-{series}-{}", p.category.key()), Tag::Circle)
                        .num("cy", scale.scale(SeriesFrame::value(p, series)))
                })
                .collect()
        }
    }

    fn dual_config() -> ChartConfig {
        ChartConfig { opts: ChartOpts { dual_y_axis: true }, ..ChartConfig::default() }
    }

    fn months() -> Vec<Value> {
        vec![json!(["Jan", 10, 2]), json!(["Feb", 20, 5])]
    }

    #[test]
    fn test_skeleton_created_once() {
        let mut chart = SeriesChart::<Dots>::new(dual_config()).unwrap();
        let mut panel = Panel::new("visitors");

        chart.render(&mut panel, &months());
        let first = panel.scene().unwrap().layers().count();
        chart.render(&mut panel, &months());

        assert_eq!(panel.scene().unwrap().layers().count(), first);
        assert_eq!(panel.scene().unwrap().class, "dot-chart");
    }

    #[test]
    fn test_single_axis_draws_one_series() {
        let mut chart = SeriesChart::<Dots>::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("visitors");
        chart.render(&mut panel, &months());

        let scene = panel.scene().unwrap();
        assert_eq!(scene.layer(SERIES_LAYERS[0]).unwrap().len(), 2);
        assert!(scene.layer(SERIES_LAYERS[1]).unwrap().is_empty());
        assert!(scene.layer(Y1_AXIS_LAYER).unwrap().is_empty());
        assert!(chart.frame("visitors").unwrap().y1.is_none());
    }

    #[test]
    fn test_hit_rects_cover_columns() {
        let mut chart = SeriesChart::<Dots>::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("visitors");
        chart.render(&mut panel, &months());

        let hits = panel.scene().unwrap().layer(HITS_LAYER).unwrap();
        let jan = hits.get("hit-Jan").unwrap();
        assert_eq!(jan.get_attr("x"), Some("0"));
        assert_eq!(jan.get_attr("width"), Some("330"));
        assert_eq!(jan.get_attr("height"), Some("110"));
    }

    #[test]
    fn test_hover_moves_indicator_and_shows_tooltip() {
        let mut chart = SeriesChart::<Dots>::new(dual_config()).unwrap();
        let mut panel = Panel::new("visitors");
        chart.render(&mut panel, &months());

        assert!(chart.on_pointer_move(&mut panel, "Feb", [400.0, 60.0]));
        let indicator = panel.scene().unwrap().find(INDICATOR_KEY).unwrap();
        assert_eq!(indicator.get_attr("x1"), Some("495"));
        assert_eq!(indicator.get_attr("opacity"), Some("1"));
        assert!(panel.tooltip.html.contains("Feb"));
        assert!(panel.tooltip.html.contains("Unnamed: 20"));
        assert!(panel.tooltip.html.contains("Unnamed: 5"));

        chart.on_pointer_leave(&mut panel);
        assert!(!panel.tooltip.visible);
        let indicator = panel.scene().unwrap().find(INDICATOR_KEY).unwrap();
        assert_eq!(indicator.get_attr("opacity"), Some("0"));
    }

    #[test]
    fn test_hover_unknown_category() {
        let mut chart = SeriesChart::<Dots>::new(dual_config()).unwrap();
        let mut panel = Panel::new("visitors");
        assert!(!chart.on_pointer_move(&mut panel, "Jan", [0.0, 0.0]));

        chart.render(&mut panel, &months());
        assert!(!chart.on_pointer_move(&mut panel, "Mar", [0.0, 0.0]));
        assert!(!panel.tooltip.visible);
    }

    #[test]
    fn test_legend_emphasis_only_when_dual() {
        let mut chart = SeriesChart::<Dots>::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("visitors");
        chart.render(&mut panel, &months());
        chart.on_legend_hover(&mut panel, 0);
        assert!(!panel.scene().unwrap().layer(SERIES_LAYERS[1]).unwrap().attrs.contains_key("opacity"));

        chart.configure(dual_config()).unwrap();
        chart.render(&mut panel, &months());
        chart.on_legend_hover(&mut panel, 0);
        assert_eq!(panel.scene().unwrap().layer(SERIES_LAYERS[1]).unwrap().attrs["opacity"], "0.1");

        chart.on_legend_leave(&mut panel);
        assert_eq!(panel.scene().unwrap().layer(SERIES_LAYERS[1]).unwrap().attrs["opacity"], "1");
    }

    #[test]
    fn test_configure_rejects_empty_area() {
        let mut chart = SeriesChart::<Dots>::new(ChartConfig::default()).unwrap();
        let bad = ChartConfig { width: 90.0, ..ChartConfig::default() };
        assert!(chart.configure(bad).is_err());
        assert_eq!(chart.config().width, 760.0);
    }

    #[test]
    fn test_update_animates_moved_marks() {
        let mut chart = SeriesChart::<Dots>::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("visitors");
        chart.render(&mut panel, &months());

        let patch = chart.render(&mut panel, &[json!(["Jan", 20, 0]), json!(["Feb", 20, 0])]);
        assert!(patch.updated.iter().any(|k| k == "dot-0-Jan"));
        assert!(patch.entered.is_empty());

        let jan = panel.scene().unwrap().find("dot-0-Jan").unwrap();
        assert_eq!(jan.animations[0].attr, "cy");
        assert_eq!(jan.animations[0].timing, Transition::new(500));
    }
}
