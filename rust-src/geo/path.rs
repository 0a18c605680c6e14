//! SVG path data for projected geometry.

use std::f64::consts::PI;
use std::fmt::Write;

use super::features::{Feature, Ring};
use super::projection::Projection;
use crate::models::ProjectionType;


/// Turns lon/lat geometry into SVG path data through a projection.
#[derive(Debug, Clone, Copy)]
pub struct GeoPath<'a> {
    projection: &'a Projection,
}


impl<'a> GeoPath<'a> {
    pub fn new(projection: &'a Projection) -> Self {
        Self { projection }
    }

    /// Path data for every polygon of a feature; empty if nothing is visible.
    pub fn feature(&self, feature: &Feature) -> String {
        let mut d = String::new();
        for polygon in feature.polygons() {
            for ring in &polygon {
                self.push_ring(&mut d, ring);
            }
        }
        d
    }

    /// Outline of the globe (orthographic) or the world rectangle (mercator).
    pub fn sphere(&self) -> String {
        let [cx, cy] = self.projection.translate();
        let r = self.projection.scale();
        match self.projection.kind() {
            ProjectionType::Orthographic => format!(
                "M{},{}A{r},{r} 0 1,1 {},{}A{r},{r} 0 1,1 {},{}Z",
                fmt(cx - r), fmt(cy), fmt(cx + r), fmt(cy), fmt(cx - r), fmt(cy),
                r = fmt(r),
            ),
            ProjectionType::Mercator => {
                let half = PI * r;
                let (top, bottom) = self.projection.vertical_bounds(90.0);
                format!(
                    "M{},{}H{}V{}H{}Z",
                    fmt(cx - half), fmt(top), fmt(cx + half), fmt(bottom), fmt(cx - half),
                )
            }
        }
    }

    /// Open polyline (graticule line); hidden stretches break the line.
    pub fn line(&self, points: &[[f64; 2]]) -> String {
        let mut d = String::new();
        match self.projection.kind() {
            ProjectionType::Orthographic => {
                let mut pen_down = false;
                for &[lon, lat] in points {
                    match self.projection.project(lon, lat) {
                        Some([x, y]) => {
                            let cmd = if pen_down { 'L' } else { 'M' };
                            let _ = write!(d, "{cmd}{},{}", fmt(x), fmt(y));
                            pen_down = true;
                        }
                        None => pen_down = false,
                    }
                }
            }
            ProjectionType::Mercator => {
                let mut previous = None;
                for &[lon, lat] in points {
                    let ([x, y], lambda) = self.projection.project_unwrapped(lon, lat, None);
                    let jumped = previous.is_some_and(|prev: f64| (lambda - prev).abs() > PI);
                    let cmd = if previous.is_none() || jumped { 'M' } else { 'L' };
                    let _ = write!(d, "{cmd}{},{}", fmt(x), fmt(y));
                    previous = Some(lambda);
                }
            }
        }
        d
    }

    fn push_ring(&self, d: &mut String, ring: &Ring) {
        match self.projection.kind() {
            ProjectionType::Orthographic => self.push_ring_orthographic(d, ring),
            ProjectionType::Mercator => self.push_ring_mercator(d, ring),
        }
    }

    fn push_ring_orthographic(&self, d: &mut String, ring: &Ring) {
        // A ring entirely on the far side is skipped
        if !ring.iter().any(|&[lon, lat]| self.projection.project(lon, lat).is_some()) {
            return;
        }

        let points: Vec<[f64; 2]> = ring
            .iter()
            .filter_map(|&[lon, lat]| self.projection.project_clamped(lon, lat))
            .collect();
        push_closed(d, &points, 0.0);
    }

    fn push_ring_mercator(&self, d: &mut String, ring: &Ring) {
        let mut points = Vec::with_capacity(ring.len());
        let mut previous = None;
        let mut min_lambda = f64::INFINITY;
        let mut max_lambda = f64::NEG_INFINITY;

        for &[lon, lat] in ring {
            let (point, lambda) = self.projection.project_unwrapped(lon, lat, previous);
            previous = Some(lambda);
            min_lambda = min_lambda.min(lambda);
            max_lambda = max_lambda.max(lambda);
            points.push(point);
        }
        if points.is_empty() {
            return;
        }

        push_closed(d, &points, 0.0);

        // Rings unwrapped past the antimeridian are repeated on the other side
        let world = self.projection.world_width();
        if min_lambda < -PI {
            push_closed(d, &points, world);
        }
        if max_lambda > PI {
            push_closed(d, &points, -world);
        }
    }
}


fn push_closed(d: &mut String, points: &[[f64; 2]], dx: f64) {
    for (i, [x, y]) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", fmt(x + dx), fmt(*y));
    }
    if !points.is_empty() {
        d.push('Z');
    }
}


/// Graticule lines: meridians and parallels every `step` degrees.
///
/// Meridians stop at ±80° latitude except the ones on the 90° marks, like a
/// conventional minor graticule.
pub fn graticule(step: f64) -> Vec<Vec<[f64; 2]>> {
    let step = if step.is_finite() && step > 0.0 { step } else { 10.0 };
    let precision = 2.5;
    let mut lines = Vec::new();

    let mut lon = -180.0;
    while lon < 180.0 {
        let extent = if (lon % 90.0) == 0.0 { 90.0 } else { 80.0 };
        lines.push(sample(-extent, extent, precision, |lat| [lon, lat]));
        lon += step;
    }

    let mut lat = -80.0;
    while lat <= 80.0 + 1e-9 {
        lines.push(sample(-180.0, 180.0, precision, |lon| [lon, lat]));
        lat += step;
    }

    lines
}


fn sample(start: f64, stop: f64, step: f64, point: impl Fn(f64) -> [f64; 2]) -> Vec<[f64; 2]> {
    let n = ((stop - start) / step).ceil() as usize;
    (0..=n)
        .map(|i| point((start + i as f64 * step).min(stop)))
        .collect()
}


/// Compact coordinate formatting for path data.
fn fmt(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}
