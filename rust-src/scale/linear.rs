//! Continuous linear scale with round-number domains.
//!
//! `nice` and `ticks` follow the usual 1-2-5 step progression so that axis
//! labels land on round values.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)


/// Maps `[d0, d1]` onto `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}


impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Extend the domain outward to round numbers.
    pub fn nice(mut self, count: usize) -> Self {
        let [mut start, mut stop] = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prestep = None;
        loop {
            let step = tick_increment(start, stop, count as f64);
            if prestep == Some(step) || step == 0.0 || !step.is_finite() {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = Some(step);
        }

        self.domain = if reversed { [stop, start] } else { [start, stop] };
        self
    }

    /// Map a domain value to the range.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 || !span.is_finite() { 0.5 } else { (value - d0) / span };
        r0 + (r1 - r0) * t
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.domain;
        ticks(d0.min(d1), d0.max(d1), count)
    }
}


/// Step between ticks; negative values encode the inverse of a fractional step.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}


/// Evenly spaced round values in `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let step = tick_increment(start, stop, count as f64);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    if step > 0.0 {
        let i0 = (start / step).ceil() as i64;
        let i1 = (stop / step).floor() as i64;
        (i0..=i1).map(|i| i as f64 * step).collect()
    } else {
        let inv = -step;
        let i0 = (start * inv).ceil() as i64;
        let i1 = (stop * inv).floor() as i64;
        (i0..=i1).map(|i| i as f64 / inv).collect()
    }
}
