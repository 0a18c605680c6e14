//! Map view state driven by pan/zoom gestures.
//!
//! A gesture recognizer reports an absolute transform (x, y, k) on every tick.
//! The view keeps the last transform it saw and turns the difference into a
//! zoom, a pan or a globe rotation depending on the projection.

use tracing::debug;

use crate::config::{
    MAX_VISIBLE_LATITUDE,
    MERCATOR_MAX_ZOOM,
    NARROW_MAP_SCALE,
    NARROW_MAP_WIDTH,
    ORTHOGRAPHIC_MAX_ZOOM,
    ROTATION_SENSITIVITY,
    ZOOM_EPSILON,
};
use crate::geo::Projection;
use crate::models::ProjectionType;


/// Sub-pixel slack so repeated clamps settle.
const CLAMP_TOLERANCE: f64 = 1e-6;


/// Gesture transform: translation in pixels and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}


impl ZoomTransform {
    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}


impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}


/// The gesture recognizer's allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBehavior {
    pub scale_extent: [f64; 2],
}


impl ZoomBehavior {
    pub fn new(min: f64, max: f64) -> Self {
        Self { scale_extent: [min, max.max(min)] }
    }

    /// Clamp an incoming transform to the scale extent.
    pub fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let [min, max] = self.scale_extent;
        let k = if transform.k.is_finite() { transform.k.clamp(min, max) } else { min };
        ZoomTransform { k, ..transform }
    }
}


/// Projection state of one map panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub projection: Projection,
    /// Scale of the fitted view, before any zoom.
    pub base_scale: f64,
    pub zoom: ZoomBehavior,
    pub last: ZoomTransform,
    /// Drawing area in pixels.
    pub viewport: [f64; 2],
}


impl ViewState {
    /// Fit a fresh projection to a `width` x `height` drawing area.
    pub fn fit(kind: ProjectionType, width: f64, height: f64) -> Self {
        let center = [width / 2.0, height / 2.0];

        match kind {
            ProjectionType::Mercator => {
                let narrow = width < NARROW_MAP_WIDTH;
                let base_scale = if narrow {
                    NARROW_MAP_SCALE
                } else {
                    width / (2.0 * std::f64::consts::PI)
                };
                let projection = Projection::new(kind).with_scale(base_scale).with_translate(center);

                let min_zoom = if narrow {
                    1.0
                } else {
                    let (top, bottom) = projection.vertical_bounds(MAX_VISIBLE_LATITUDE);
                    let fit_x = width / projection.world_width();
                    let fit_y = height / (bottom - top);
                    fit_x.max(fit_y)
                };

                let mut state = Self {
                    projection,
                    base_scale,
                    zoom: ZoomBehavior::new(min_zoom, MERCATOR_MAX_ZOOM * min_zoom),
                    last: ZoomTransform::new(0.0, 0.0, min_zoom),
                    viewport: [width, height],
                };
                state.projection.set_scale(base_scale * min_zoom);
                state.clamp_vertical();
                state
            }
            ProjectionType::Orthographic => {
                let base_scale = width.min(height) / 2.0;
                Self {
                    projection: Projection::new(kind).with_scale(base_scale).with_translate(center),
                    base_scale,
                    zoom: ZoomBehavior::new(1.0, ORTHOGRAPHIC_MAX_ZOOM),
                    last: ZoomTransform::identity(),
                    viewport: [width, height],
                }
            }
        }
    }

    pub fn kind(&self) -> ProjectionType {
        self.projection.kind()
    }

    /// Apply one gesture tick and remember it for the next one.
    pub fn apply(&mut self, transform: ZoomTransform) {
        let transform = self.zoom.constrain(transform);
        let zooming = (transform.k - self.last.k).abs() > ZOOM_EPSILON;
        let dx = transform.x - self.last.x;
        let dy = transform.y - self.last.y;

        match (self.kind(), zooming) {
            (ProjectionType::Mercator, true) => self.zoom_mercator(transform.k),
            (ProjectionType::Mercator, false) => self.pan_mercator(dx, dy, transform.k),
            (ProjectionType::Orthographic, true) => self.zoom_globe(transform.k),
            (ProjectionType::Orthographic, false) => self.rotate_globe(dx, dy),
        }

        debug!(
            x = transform.x,
            y = transform.y,
            k = transform.k,
            scale = self.projection.scale(),
            "gesture tick"
        );
        self.last = transform;
    }

    /// Zoom around the viewport center, keeping the point under it fixed.
    fn zoom_mercator(&mut self, k: f64) {
        let center = [self.viewport[0] / 2.0, self.viewport[1] / 2.0];
        let anchor = self.projection.invert(center[0], center[1]);

        self.projection.set_scale(self.base_scale * k);

        if let Some([lon, lat]) = anchor {
            if let Some([x, y]) = self.projection.project(lon, lat) {
                let [tx, ty] = self.projection.translate();
                self.projection.set_translate([tx + center[0] - x, ty + center[1] - y]);
            }
        }
        self.clamp_vertical();
    }

    fn pan_mercator(&mut self, dx: f64, dy: f64, k: f64) {
        let [lambda, phi] = self.projection.rotation();
        let delta = mercator_pan_delta(dx, self.viewport[0], k);
        self.projection.set_rotation([lambda + delta, phi]);

        let [tx, ty] = self.projection.translate();
        self.projection.set_translate([tx, ty + dy]);
        self.clamp_vertical();
    }

    fn zoom_globe(&mut self, k: f64) {
        let scale = (self.base_scale * k)
            .clamp(self.base_scale, ORTHOGRAPHIC_MAX_ZOOM * self.base_scale);
        self.projection.set_scale(scale);
    }

    fn rotate_globe(&mut self, dx: f64, dy: f64) {
        let [lambda, phi] = self.projection.rotation();
        self.projection.set_rotation([
            lambda + dx * ROTATION_SENSITIVITY,
            phi - dy * ROTATION_SENSITIVITY,
        ]);
    }

    /// Keep the map covering the viewport vertically.
    ///
    /// Only mercator is clamped; the globe is always fully visible. A map
    /// shorter than the viewport is centered instead.
    pub fn clamp_vertical(&mut self) {
        if self.kind() != ProjectionType::Mercator {
            return;
        }

        let height = self.viewport[1];
        let (top, bottom) = self.projection.vertical_bounds(MAX_VISIBLE_LATITUDE);
        let [tx, ty] = self.projection.translate();

        let shift = if bottom - top <= height {
            (height - top - bottom) / 2.0
        } else if top > CLAMP_TOLERANCE {
            -top
        } else if bottom < height - CLAMP_TOLERANCE {
            height - bottom
        } else {
            0.0
        };

        if shift.abs() > CLAMP_TOLERANCE {
            self.projection.set_translate([tx, ty + shift]);
        }
    }
}


/// Longitude change for a horizontal drag of `dx` pixels at zoom `k`.
pub fn mercator_pan_delta(dx: f64, width: f64, k: f64) -> f64 {
    if width <= 0.0 || k <= 0.0 {
        return 0.0;
    }
    dx / width * 360.0 / k
}
