//! Choropleth world map with pan, zoom and globe rotation.

use std::collections::HashMap;

use crate::aggregation::{build_lookup, flatten_regions};
use crate::config::{
    GLOBE_FADE_MS,
    GRATICULE_STROKE,
    LEGEND_HEIGHT,
    MAP_FILL_TRANSITION_MS,
    MAP_PALETTE,
    NO_DATA_FILL,
    OCEAN_FILL,
};
use crate::error::ConfigError;
use crate::format::fmt_value;
use crate::geo::{graticule, Feature, FeatureCollection, GeoPath};
use crate::models::{FormatKind, MapConfig, MapDatum, Metric, ProjectionType};
use crate::scale::QuantileScale;
use crate::scene::{
    reconcile, Animation, Element, Layer, Panel, Patch, ReconcileOptions, Scene, Tag, Transition,
};

use super::gesture::{ViewState, ZoomTransform};
use super::legend::quantile_legend;
use super::tooltip::{hide_tooltip, show_tooltip};


const SPHERE_LAYER: &str = "sphere";
const GRATICULE_LAYER: &str = "graticule";
const COUNTRIES_LAYER: &str = "countries";
const LEGEND_LAYER: &str = "legend";


/// Per-panel state: projection plus the data bound by the last render.
#[derive(Debug, Clone)]
struct MapView {
    state: ViewState,
    lookup: HashMap<String, MapDatum>,
    colors: QuantileScale<&'static str>,
}


/// World map chart; one instance can drive several panels.
#[derive(Debug, Clone)]
pub struct WorldMap {
    config: MapConfig,
    features: FeatureCollection,
    views: HashMap<String, MapView>,
}


impl WorldMap {
    pub fn new(config: MapConfig, features: FeatureCollection) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            features,
            views: HashMap::new(),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Replace the configuration; panels are refitted on their next render.
    pub fn configure(&mut self, config: MapConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Projection state of a panel, once it has been rendered.
    pub fn view(&self, panel_id: &str) -> Option<&ViewState> {
        self.views.get(panel_id).map(|view| &view.state)
    }

    /// Bind `records` to `panel` and redraw it.
    pub fn render(&mut self, panel: &mut Panel, records: &[MapDatum]) -> Patch {
        let config = &self.config;
        let metric = config.metric;

        let leaves = flatten_regions(records);
        let colors = QuantileScale::new(leaves.iter().map(|l| l.value(metric)), MAP_PALETTE.to_vec());
        let lookup = build_lookup(&leaves);

        let (width, height) = (config.inner_width(), config.inner_height());
        let view = self
            .views
            .entry(panel.id.clone())
            .or_insert_with(|| MapView {
                state: ViewState::fit(config.projection, width, height),
                lookup: HashMap::new(),
                colors: QuantileScale::new(Vec::new(), Vec::new()),
            });
        if view.state.kind() != config.projection || view.state.viewport != [width, height] {
            view.state = ViewState::fit(config.projection, width, height);
        }
        view.lookup = lookup;
        view.colors = colors;

        let scene = panel.scene_or_init(|| skeleton(config));
        layout(scene, config);

        let mut patch = draw_geometry(
            scene,
            config,
            &self.features,
            view,
            ReconcileOptions::update(Transition::new(MAP_FILL_TRANSITION_MS))
                .exit(Transition::new(MAP_FILL_TRANSITION_MS)),
        );

        let legend = if config.opts.legend && !leaves.is_empty() {
            quantile_legend(&view.colors, metric_format(metric), width)
        } else {
            Vec::new()
        };
        patch.merge(reconcile(
            scene.layer_mut(LEGEND_LAYER),
            legend,
            ReconcileOptions::default(),
        ));

        patch
    }

    /// Apply a gesture tick and regenerate every path.
    ///
    /// Panels that were never rendered are left alone.
    pub fn on_zoom(&mut self, panel: &mut Panel, transform: ZoomTransform) -> Patch {
        let Some(view) = self.views.get_mut(&panel.id) else {
            return Patch::default();
        };
        let Some(scene) = panel.scene_mut() else {
            return Patch::default();
        };

        view.state.apply(transform);
        draw_geometry(scene, &self.config, &self.features, view, ReconcileOptions::default())
    }

    /// Show the tooltip for the country under the pointer.
    ///
    /// Returns false and hides the tooltip when the country has no data.
    pub fn on_pointer_move(&self, panel: &mut Panel, country_id: &str, pointer: [f64; 2]) -> bool {
        let record = self.views.get(&panel.id).and_then(|view| {
            let feature = self.find_feature(country_id)?;
            let record = match_record(feature, &view.lookup)?;
            Some((feature, record))
        });

        match record {
            Some((feature, record)) => {
                let fields = tooltip_fields(feature, record, self.config.metric);
                show_tooltip(panel, &fields, pointer)
            }
            None => {
                hide_tooltip(panel);
                false
            }
        }
    }

    pub fn on_pointer_leave(&self, panel: &mut Panel) {
        hide_tooltip(panel);
    }

    fn find_feature(&self, country_id: &str) -> Option<&Feature> {
        self.features
            .features
            .iter()
            .find(|f| f.country_id().as_deref() == Some(country_id))
    }
}


fn skeleton(config: &MapConfig) -> Scene {
    let mut scene = Scene::new(config.width, config.height, "world-map");
    for name in [SPHERE_LAYER, GRATICULE_LAYER, COUNTRIES_LAYER, LEGEND_LAYER] {
        scene.add_layer(Layer::new(name));
    }
    scene
}


/// Size the scene and position the layers for the current configuration.
fn layout(scene: &mut Scene, config: &MapConfig) {
    let legend_height = if config.opts.legend { LEGEND_HEIGHT } else { 0.0 };
    scene.width = config.width;
    scene.height = config.height + legend_height;

    let origin = format!("translate({},{})", config.margin.left, config.margin.top);
    for name in [SPHERE_LAYER, GRATICULE_LAYER, COUNTRIES_LAYER] {
        scene.layer_mut(name).set_attr("transform", &origin);
    }
    scene.layer_mut(LEGEND_LAYER).set_attr(
        "transform",
        format!(
            "translate({},{})",
            config.margin.left,
            config.margin.top + config.inner_height() + 10.0
        ),
    );
}


/// Redraw the globe backdrop and the countries from the current projection.
fn draw_geometry(
    scene: &mut Scene,
    config: &MapConfig,
    features: &FeatureCollection,
    view: &MapView,
    country_options: ReconcileOptions,
) -> Patch {
    let path = GeoPath::new(&view.state.projection);
    let fade = Transition::new(GLOBE_FADE_MS);
    let globe_options = ReconcileOptions::default().exit(fade);

    let (sphere, lines) = match view.state.kind() {
        ProjectionType::Orthographic => {
            let outline = Element::new("sphere", Tag::Path)
                .attr("d", path.sphere())
                .attr("fill", OCEAN_FILL)
                .attr("opacity", 1)
                .on_enter(Animation::new("opacity", 0, 1, fade));

            let d: String = graticule(config.opts.graticule_step)
                .iter()
                .map(|line| path.line(line))
                .collect();
            let grid = Element::new("graticule", Tag::Path)
                .attr("d", d)
                .attr("fill", "none")
                .attr("stroke", GRATICULE_STROKE)
                .attr("stroke-width", 0.5)
                .attr("opacity", 1)
                .on_enter(Animation::new("opacity", 0, 1, fade));

            (vec![outline], vec![grid])
        }
        ProjectionType::Mercator => (Vec::new(), Vec::new()),
    };

    let mut patch = reconcile(scene.layer_mut(SPHERE_LAYER), sphere, globe_options);
    patch.merge(reconcile(scene.layer_mut(GRATICULE_LAYER), lines, globe_options));

    let countries = features
        .features
        .iter()
        .filter_map(|feature| {
            let id = feature.country_id()?;
            let fill = match_record(feature, &view.lookup)
                .and_then(|record| view.colors.scale(record.value(config.metric)).copied())
                .unwrap_or(NO_DATA_FILL);

            let mut element = Element::new(id, Tag::Path)
                .attr("d", path.feature(feature))
                .attr("fill", fill)
                .attr("stroke", "#ffffff")
                .attr("stroke-width", 0.5);
            if let Some(name) = feature.name() {
                element.set_attr("data-name", name);
            }
            Some(element)
        })
        .collect();
    patch.merge(reconcile(scene.layer_mut(COUNTRIES_LAYER), countries, country_options));

    patch
}


fn match_record<'a>(feature: &Feature, lookup: &'a HashMap<String, MapDatum>) -> Option<&'a MapDatum> {
    feature.match_keys().iter().find_map(|key| lookup.get(key))
}


fn metric_format(metric: Metric) -> FormatKind {
    match metric {
        Metric::Bytes => FormatKind::Bytes,
        Metric::Hits | Metric::Visitors => FormatKind::Number,
    }
}


fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Hits => "Hits",
        Metric::Visitors => "Visitors",
        Metric::Bytes => "Bytes",
    }
}


/// Country name, the selected metric and, for hits, the visitor count.
fn tooltip_fields(feature: &Feature, record: &MapDatum, metric: Metric) -> Vec<String> {
    let name = feature.name().unwrap_or(&record.data);
    let value = fmt_value(record.value(metric), Some(metric_format(metric)));

    let mut fields = vec![
        name.trim().to_string(),
        format!("{}: {value}", metric_label(metric)),
    ];
    if metric == Metric::Hits {
        let visitors = fmt_value(record.value(Metric::Visitors), Some(FormatKind::Number));
        fields.push(format!("{}: {visitors}", metric_label(Metric::Visitors)));
    }
    fields
}
