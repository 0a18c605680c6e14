//! `tviz render` - draw a chart from data files and export it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::{ChartArgs, MapArgs, OutputArgs};
use crate::config::{get_output_dir, load_json_config, TOOLTIP_TEMPLATE_ID};
use crate::data::{load_features, load_map_data, load_series_data};
use crate::models::{ChartConfig, MapConfig};
use crate::scene::Panel;
use crate::visualization::{
    export_png, export_svg, open_file, AreaMarks, BarMarks, Marks, SeriesChart, WorldMap, ZoomTransform,
};


/// Which series chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Area,
    Bar,
}


impl SeriesKind {
    fn name(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Bar => "bar",
        }
    }
}


/// Render the world map.
pub fn run_map(args: &MapArgs) -> Result<()> {
    let mut config: MapConfig = match &args.config {
        Some(path) => load_json_config(path)?,
        None => MapConfig::default(),
    };
    if let Some(metric) = args.metric {
        config.metric = metric;
    }
    if let Some(projection) = args.projection {
        config.projection = projection;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let records = load_map_data(&args.data)?;
    let features = load_features(&args.world)?;
    if records.is_empty() {
        warn!(path = %args.data.display(), "no map records, every country gets the no-data fill");
    }

    let center = [config.inner_width() / 2.0, config.inner_height() / 2.0];
    let mut map = WorldMap::new(config, features)?;
    let mut panel = new_panel("map", args.tooltip_template.as_deref())?;
    let patch = map.render(&mut panel, &records);
    info!(entered = patch.entered.len(), "map rendered");

    if args.zoom.is_some() || args.pan.is_some() {
        if let Some(last) = map.view(&panel.id).map(|view| view.last) {
            let mut transform = last;
            if let Some(factor) = args.zoom {
                transform.k = last.k * factor;
                map.on_zoom(&mut panel, transform);
            }
            if let Some((dx, dy)) = args.pan {
                let current = map.view(&panel.id).map(|view| view.last).unwrap_or(transform);
                map.on_zoom(&mut panel, ZoomTransform::new(current.x + dx, current.y + dy, current.k));
            }
        }
    }

    if let Some(country) = &args.hover {
        if !map.on_pointer_move(&mut panel, country, center) {
            warn!(country = %country, "no data for hovered country");
        }
    }

    write_output(&panel, "map", &args.output)
}


/// Render an area or bar chart.
pub fn run_series(kind: SeriesKind, args: &ChartArgs) -> Result<()> {
    let mut config: ChartConfig = match &args.config {
        Some(path) => load_json_config(path)?,
        None => ChartConfig::default(),
    };
    if args.dual {
        config.opts.dual_y_axis = true;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let raw = load_series_data(&args.data)?;
    if raw.is_empty() {
        warn!(path = %args.data.display(), "no chart records, drawing empty axes");
    }

    let mut panel = new_panel(kind.name(), args.tooltip_template.as_deref())?;
    let hover = args.hover.as_deref();
    let hovered = match kind {
        SeriesKind::Area => draw_series::<AreaMarks>(config, &raw, &mut panel, hover)?,
        SeriesKind::Bar => draw_series::<BarMarks>(config, &raw, &mut panel, hover)?,
    };
    if let Some(false) = hovered {
        warn!(category = ?args.hover, "no data for hovered category");
    }

    write_output(&panel, kind.name(), &args.output)
}


fn draw_series<M: Marks>(
    config: ChartConfig,
    raw: &[Value],
    panel: &mut Panel,
    hover: Option<&str>,
) -> Result<Option<bool>> {
    let mut chart = SeriesChart::<M>::new(config)?;
    let patch = chart.render(panel, raw);
    info!(class = M::CLASS, entered = patch.entered.len(), "chart rendered");

    Ok(hover.map(|key| {
        let x = chart.frame(&panel.id).and_then(|f| f.x.center(key)).unwrap_or(0.0);
        chart.on_pointer_move(panel, key, [x, 0.0])
    }))
}


/// A panel whose tooltip template is optionally read from `template`.
fn new_panel(id: &str, template: Option<&Path>) -> Result<Panel> {
    let mut panel = Panel::new(id);
    if let Some(path) = template {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tooltip template: {}", path.display()))?;
        panel.templates_mut().register(TOOLTIP_TEMPLATE_ID, content.trim());
    }
    Ok(panel)
}


fn write_output(panel: &Panel, name: &str, output: &OutputArgs) -> Result<()> {
    let extension = if output.png { "png" } else { "svg" };
    let path = match &output.output {
        Some(path) => path.clone(),
        None => default_output_path(name, extension)?,
    };

    println!("Exporting to {}...", extension.to_uppercase());
    if output.png {
        export_png(panel, &path)?;
    } else {
        export_svg(panel, &path)?;
    }
    println!("\x1b[32m+ Exported to: {}\x1b[0m", path.display());

    if output.open {
        println!("Opening {}...", extension.to_uppercase());
        open_file(&path)?;
    }

    Ok(())
}


fn default_output_path(name: &str, extension: &str) -> Result<PathBuf> {
    let dir = get_output_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(output_file(&dir, name, extension))
}


fn output_file(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{name}.{extension}"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_output_file() {
        let path = output_file(Path::new("/tmp/out"), "map", "png");
        assert_eq!(path, PathBuf::from("/tmp/out/map.png"));
    }

    #[test]
    fn test_new_panel_with_custom_template() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>{{0}} / {{1}}</p>\n").unwrap();

        let panel = new_panel("map", Some(file.path())).unwrap();
        let html = panel
            .templates()
            .render(TOOLTIP_TEMPLATE_ID, &["Brazil".to_string(), "Hits: 100".to_string()]);
        assert_eq!(html.as_deref(), Some("<p>Brazil / Hits: 100</p>"));
    }

    #[test]
    fn test_new_panel_missing_template_fails() {
        let err = new_panel("map", Some(Path::new("/nonexistent/tpl.html"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read tooltip template"));
    }

    #[test]
    fn test_new_panel_default_template() {
        let panel = new_panel("bar", None).unwrap();
        assert!(panel.templates().get(TOOLTIP_TEMPLATE_ID).is_some());
    }

    #[test]
    fn test_series_kind_name() {
        assert_eq!(SeriesKind::Area.name(), "area");
        assert_eq!(SeriesKind::Bar.name(), "bar");
    }
}
