//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::models::{Metric, ProjectionType};


/// trafficviz - world map, area and bar charts for web traffic
#[derive(Parser)]
#[command(name = "tviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Render a chart to SVG or PNG
    Render {
        #[command(subcommand)]
        chart: RenderCommands,
    },
}


#[derive(Subcommand)]
enum RenderCommands {
    /// Choropleth world map of per-country traffic
    Map(MapArgs),

    /// Area chart of one or two series
    Area(ChartArgs),

    /// Bar chart of one or two series
    Bar(ChartArgs),
}


/// Options of `render map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Map records (JSON array or JSON lines)
    #[arg(long)]
    pub data: PathBuf,

    /// Country polygons (GeoJSON FeatureCollection)
    #[arg(long)]
    pub world: PathBuf,

    /// Map configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Metric used for coloring: hits, visitors or bytes
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Projection: mercator or orthographic
    #[arg(long)]
    pub projection: Option<ProjectionType>,

    /// Width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Height in pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Zoom factor relative to the fitted view
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Drag by DX,DY pixels (rotates the globe for orthographic)
    #[arg(long, value_parser = parse_pan, allow_hyphen_values = true)]
    pub pan: Option<(f64, f64)>,

    /// Show the tooltip of this country id
    #[arg(long)]
    pub hover: Option<String>,

    /// Tooltip template file with {0}, {1}... placeholders
    #[arg(long)]
    pub tooltip_template: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}


/// Options of `render area` and `render bar`.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Chart records (JSON array or JSON lines)
    #[arg(long)]
    pub data: PathBuf,

    /// Chart configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Plot the second value against its own axis
    #[arg(long)]
    pub dual: bool,

    /// Width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Height in pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Show the tooltip of this category
    #[arg(long)]
    pub hover: Option<String>,

    /// Tooltip template file with {0}, {1}... placeholders
    #[arg(long)]
    pub tooltip_template: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}


/// Where and how the rendered chart is written.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Export as PNG instead of SVG
    #[arg(long)]
    pub png: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open file after export
    #[arg(long)]
    pub open: bool,
}


fn parse_pan(value: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|_| format!("'{part}' is not a number"))
    };
    Ok((parse(dx)?, parse(dy)?))
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render { chart }) => match chart {
            RenderCommands::Map(args) => commands::render::run_map(&args)?,
            RenderCommands::Area(args) => commands::render::run_series(commands::render::SeriesKind::Area, &args)?,
            RenderCommands::Bar(args) => commands::render::run_series(commands::render::SeriesKind::Bar, &args)?,
        },
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
