//! Geographic primitives: features, projections and path generation.

mod features;
mod path;
mod projection;

#[allow(unused_imports)]
pub use features::{Feature, FeatureCollection, Geometry, Ring};
pub use path::{graticule, GeoPath};
#[allow(unused_imports)]
pub use projection::{wrap_degrees, Projection};
