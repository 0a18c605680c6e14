//! Scales mapping data values to pixel positions and colors.

mod band;
mod linear;
mod quantile;
mod ticks;

pub use band::BandScale;
#[allow(unused_imports)]
pub use linear::{ticks, LinearScale};
#[allow(unused_imports)]
pub use quantile::{quantile_sorted, QuantileScale};
#[allow(unused_imports)]
pub use ticks::{category_tick_indices, category_ticks};
