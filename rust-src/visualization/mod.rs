//! Charts drawn into dashboard panels, plus file export.

mod area_chart;
mod axis;
mod bar_chart;
mod export;
mod gesture;
mod legend;
mod series;
mod tooltip;
mod world_map;

#[allow(unused_imports)]
pub use area_chart::{AreaChart, AreaMarks};
#[allow(unused_imports)]
pub use bar_chart::{BarChart, BarMarks};
pub use export::{export_png, export_svg, open_file};
#[allow(unused_imports)]
pub use gesture::{mercator_pan_delta, ViewState, ZoomBehavior, ZoomTransform};
#[allow(unused_imports)]
pub use series::{Marks, SeriesChart, SeriesFrame};
pub use world_map::WorldMap;
