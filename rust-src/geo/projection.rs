//! Mercator and orthographic projections with rotation.
//!
//! Angles in the public API are degrees; screen y grows downward. A
//! projection is plain state (scale, translate, rotation) so the map can
//! mutate it between gesture ticks.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::models::ProjectionType;


/// Mercator is undefined at the poles; latitudes are capped here when drawing.
const MERCATOR_LAT_LIMIT: f64 = 89.0;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    kind: ProjectionType,
    scale: f64,
    translate: [f64; 2],
    /// Rotation as (longitude, latitude) degrees.
    rotate: [f64; 2],
}


impl Projection {
    pub fn new(kind: ProjectionType) -> Self {
        Self {
            kind,
            scale: 150.0,
            translate: [480.0, 250.0],
            rotate: [0.0, 0.0],
        }
    }

    pub fn kind(&self) -> ProjectionType {
        self.kind
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> [f64; 2] {
        self.translate
    }

    pub fn rotation(&self) -> [f64; 2] {
        self.rotate
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_translate(mut self, translate: [f64; 2]) -> Self {
        self.translate = translate;
        self
    }

    pub fn with_rotation(mut self, rotate: [f64; 2]) -> Self {
        self.set_rotation(rotate);
        self
    }

    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn set_translate(&mut self, translate: [f64; 2]) {
        self.translate = translate;
    }

    /// Set rotation; longitude wraps into [-180, 180), latitude clamps to [-90, 90].
    pub fn set_rotation(&mut self, rotate: [f64; 2]) {
        self.rotate = [wrap_degrees(rotate[0]), rotate[1].clamp(-90.0, 90.0)];
    }

    /// Project lon/lat to screen coordinates.
    ///
    /// `None` for points on the far side of the orthographic globe.
    pub fn project(&self, lon: f64, lat: f64) -> Option<[f64; 2]> {
        let (lambda, phi) = self.rotate_forward(lon.to_radians(), lat.to_radians());
        let [x, y] = match self.kind {
            ProjectionType::Mercator => mercator_raw(lambda, phi),
            ProjectionType::Orthographic => {
                if phi.cos() * lambda.cos() < 0.0 {
                    return None;
                }
                orthographic_raw(lambda, phi)
            }
        };
        Some(self.to_screen(x, y))
    }

    /// Project, pulling hidden orthographic points onto the horizon.
    pub fn project_clamped(&self, lon: f64, lat: f64) -> Option<[f64; 2]> {
        let (lambda, phi) = self.rotate_forward(lon.to_radians(), lat.to_radians());
        let [mut x, mut y] = match self.kind {
            ProjectionType::Mercator => mercator_raw(lambda, phi),
            ProjectionType::Orthographic => orthographic_raw(lambda, phi),
        };

        if self.kind == ProjectionType::Orthographic && phi.cos() * lambda.cos() < 0.0 {
            let norm = x.hypot(y);
            if norm == 0.0 {
                return None;
            }
            x /= norm;
            y /= norm;
        }
        Some(self.to_screen(x, y))
    }

    /// Rotated longitude in radians, unwrapped next to `previous` when given.
    ///
    /// Used by the path generator to keep mercator rings continuous.
    pub(crate) fn project_unwrapped(
        &self,
        lon: f64,
        lat: f64,
        previous: Option<f64>,
    ) -> ([f64; 2], f64) {
        let (mut lambda, phi) = self.rotate_forward(lon.to_radians(), lat.to_radians());
        if let Some(prev) = previous {
            while lambda - prev > PI {
                lambda -= 2.0 * PI;
            }
            while prev - lambda > PI {
                lambda += 2.0 * PI;
            }
        }
        let [x, y] = mercator_raw(lambda, phi);
        (self.to_screen(x, y), lambda)
    }

    /// Screen coordinates back to lon/lat.
    pub fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let rx = (x - self.translate[0]) / self.scale;
        let ry = (self.translate[1] - y) / self.scale;

        let (lambda, phi) = match self.kind {
            ProjectionType::Mercator => (rx, 2.0 * ry.exp().atan() - FRAC_PI_2),
            ProjectionType::Orthographic => {
                let rho = rx.hypot(ry);
                if rho > 1.0 + 1e-9 {
                    return None;
                }
                if rho < 1e-12 {
                    (0.0, 0.0)
                } else {
                    let c = rho.min(1.0).asin();
                    let (sin_c, cos_c) = c.sin_cos();
                    ((rx * sin_c).atan2(rho * cos_c), (ry * sin_c / rho).clamp(-1.0, 1.0).asin())
                }
            }
        };

        let (lon, lat) = self.rotate_backward(lambda, phi);
        Some([wrap_degrees(lon.to_degrees()), lat.to_degrees()])
    }

    /// Vertical screen extent at the current state: (top, bottom).
    ///
    /// Mercator reports the y of `max_lat` and `-max_lat`; the orthographic
    /// globe reports the edge of the sphere.
    pub fn vertical_bounds(&self, max_lat: f64) -> (f64, f64) {
        match self.kind {
            ProjectionType::Mercator => {
                let limit = max_lat.to_radians();
                let top = self.translate[1] - mercator_raw(0.0, limit)[1] * self.scale;
                let bottom = self.translate[1] - mercator_raw(0.0, -limit)[1] * self.scale;
                (top, bottom)
            }
            ProjectionType::Orthographic => {
                (self.translate[1] - self.scale, self.translate[1] + self.scale)
            }
        }
    }

    /// Width of the whole world in pixels (mercator).
    pub fn world_width(&self) -> f64 {
        2.0 * PI * self.scale
    }

    fn to_screen(&self, x: f64, y: f64) -> [f64; 2] {
        [self.translate[0] + x * self.scale, self.translate[1] - y * self.scale]
    }

    fn rotate_forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_radians(lambda + self.rotate[0].to_radians());
        let delta_phi = self.rotate[1].to_radians();
        if delta_phi == 0.0 {
            return (lambda, phi);
        }

        let (sin_dp, cos_dp) = delta_phi.sin_cos();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dp + x * sin_dp;
        (y.atan2(x * cos_dp - z * sin_dp), k.clamp(-1.0, 1.0).asin())
    }

    fn rotate_backward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let delta_phi = self.rotate[1].to_radians();
        let (lambda, phi) = if delta_phi == 0.0 {
            (lambda, phi)
        } else {
            let (sin_dp, cos_dp) = delta_phi.sin_cos();
            let cos_phi = phi.cos();
            let x = lambda.cos() * cos_phi;
            let y = lambda.sin() * cos_phi;
            let z = phi.sin();
            (
                y.atan2(x * cos_dp + z * sin_dp),
                (z * cos_dp - x * sin_dp).clamp(-1.0, 1.0).asin(),
            )
        };
        (wrap_radians(lambda - self.rotate[0].to_radians()), phi)
    }
}


fn mercator_raw(lambda: f64, phi: f64) -> [f64; 2] {
    let limit = MERCATOR_LAT_LIMIT.to_radians();
    let phi = phi.clamp(-limit, limit);
    [lambda, (FRAC_PI_4 + phi / 2.0).tan().ln()]
}


fn orthographic_raw(lambda: f64, phi: f64) -> [f64; 2] {
    [phi.cos() * lambda.sin(), phi.sin()]
}


fn wrap_radians(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped.is_finite() { wrapped } else { 0.0 }
}


/// Wrap degrees into [-180, 180).
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped.is_finite() { wrapped } else { 0.0 }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_mercator_origin_at_translate() {
        let projection = Projection::new(ProjectionType::Mercator)
            .with_scale(100.0)
            .with_translate([300.0, 200.0]);
        let [x, y] = projection.project(0.0, 0.0).unwrap();
        assert_close(x, 300.0, 1e-9);
        assert_close(y, 200.0, 1e-9);
    }

    #[test]
    fn test_mercator_longitude_linear() {
        let projection = Projection::new(ProjectionType::Mercator)
            .with_scale(100.0)
            .with_translate([0.0, 0.0]);
        let [x, _] = projection.project(180.0 - 1e-9, 0.0).unwrap();
        assert_close(x, PI * 100.0, 1e-6);
    }

    #[test]
    fn test_mercator_round_trip() {
        let projection = Projection::new(ProjectionType::Mercator)
            .with_scale(120.0)
            .with_translate([380.0, 175.0])
            .with_rotation([30.0, 0.0]);
        let [x, y] = projection.project(-47.9, -15.8).unwrap();
        let [lon, lat] = projection.invert(x, y).unwrap();
        assert_close(lon, -47.9, 1e-9);
        assert_close(lat, -15.8, 1e-9);
    }

    #[test]
    fn test_orthographic_hides_far_side() {
        let projection = Projection::new(ProjectionType::Orthographic)
            .with_scale(100.0)
            .with_translate([0.0, 0.0]);
        assert!(projection.project(0.0, 0.0).is_some());
        assert!(projection.project(180.0, 0.0).is_none());

        // Clamped projection lands on the horizon circle
        let [x, y] = projection.project_clamped(170.0, 10.0).unwrap();
        assert_close(x.hypot(y), 100.0, 1e-9);
    }

    #[test]
    fn test_orthographic_round_trip_with_tilt() {
        let projection = Projection::new(ProjectionType::Orthographic)
            .with_scale(150.0)
            .with_translate([380.0, 175.0])
            .with_rotation([-20.0, -35.0]);
        let [x, y] = projection.project(10.0, 40.0).unwrap();
        let [lon, lat] = projection.invert(x, y).unwrap();
        assert_close(lon, 10.0, 1e-9);
        assert_close(lat, 40.0, 1e-9);
    }

    #[test]
    fn test_orthographic_invert_outside_globe() {
        let projection = Projection::new(ProjectionType::Orthographic)
            .with_scale(100.0)
            .with_translate([0.0, 0.0]);
        assert!(projection.invert(150.0, 0.0).is_none());
    }

    #[test]
    fn test_rotation_wraps_and_clamps() {
        let mut projection = Projection::new(ProjectionType::Orthographic);
        projection.set_rotation([190.0, 120.0]);
        assert_eq!(projection.rotation(), [-170.0, 90.0]);
        projection.set_rotation([-540.0, -95.0]);
        assert_eq!(projection.rotation(), [-180.0, -90.0]);
    }

    #[test]
    fn test_vertical_bounds_mercator() {
        let projection = Projection::new(ProjectionType::Mercator)
            .with_scale(100.0)
            .with_translate([0.0, 200.0]);
        let (top, bottom) = projection.vertical_bounds(84.0);
        assert!(top < 200.0 && bottom > 200.0);
        assert_close(200.0 - top, bottom - 200.0, 1e-9);
    }

    #[test]
    fn test_set_scale_ignores_invalid() {
        let mut projection = Projection::new(ProjectionType::Mercator).with_scale(100.0);
        projection.set_scale(0.0);
        projection.set_scale(f64::NAN);
        assert_eq!(projection.scale(), 100.0);
    }
}
