//! Retained scene graph with keyed reconciliation.
//!
//! Charts describe the elements they want; `reconcile` patches the panel's
//! layers to match, and `to_svg` serializes the result.

mod element;
mod layer;
mod panel;
mod reconcile;
mod svg;

#[allow(unused_imports)]
pub use element::{fmt_num, Animation, Element, Tag, Transition};
pub use layer::{Layer, Scene};
pub use panel::{Panel, Tooltip};
pub use reconcile::{reconcile, Patch, ReconcileOptions};
pub use svg::to_svg;
