//! Area chart: filled areas with line overlays and points.

use std::fmt::Write;

use crate::config::{LINE_SWEEP_MS, SERIES_COLORS};
use crate::scene::{fmt_num, Animation, Element, Tag, Transition};

use super::series::{Marks, SeriesChart, SeriesFrame};


const POINT_RADIUS: f64 = 3.0;


/// Area, line and point marks.
#[derive(Debug, Clone, Copy)]
pub struct AreaMarks;


pub type AreaChart = SeriesChart<AreaMarks>;


impl Marks for AreaMarks {
    const CLASS: &'static str = "area-chart";
    const BAND_PADDING: f64 = 0.0;
    const SECOND_AXIS_PAD: f64 = 0.0;

    fn draw(frame: &SeriesFrame, series: usize) -> Vec<Element> {
        let Some(scale) = frame.scale(series) else {
            return Vec::new();
        };
        let color = SERIES_COLORS[series % SERIES_COLORS.len()];

        let vertices: Vec<(String, [f64; 2])> = frame
            .points
            .iter()
            .filter_map(|point| {
                let key = point.category.key();
                let x = frame.x.center(&key)?;
                let y = scale.scale(SeriesFrame::value(point, series));
                Some((key, [x, y]))
            })
            .collect();
        if vertices.is_empty() {
            return Vec::new();
        }

        let coords: Vec<[f64; 2]> = vertices.iter().map(|(_, xy)| *xy).collect();
        let line = polyline(&coords);
        let length = path_length(&coords);

        let mut elements = vec![
            Element::new(format!("area-{series}"), Tag::Path)
                .attr("d", area(&coords, frame.inner_height))
                .attr("fill", color)
                .attr("fill-opacity", 0.2)
                .attr("stroke", "none"),
            Element::new(format!("line-{series}"), Tag::Path)
                .attr("d", line)
                .attr("fill", "none")
                .attr("stroke", color)
                .attr("stroke-width", 2)
                .attr("stroke-dasharray", fmt_num(length))
                .attr("stroke-dashoffset", 0)
                .on_enter(Animation::new(
                    "stroke-dashoffset",
                    fmt_num(length),
                    0,
                    Transition::new(LINE_SWEEP_MS),
                )),
        ];

        elements.extend(vertices.iter().map(|(key, [x, y])| {
            Element::new(format!("point-{series}-{key}"), Tag::Circle)
                .num("cx", *x)
                .num("cy", *y)
                .num("r", POINT_RADIUS)
                .attr("fill", color)
        }));

        elements
    }
}


fn polyline(coords: &[[f64; 2]]) -> String {
    let mut d = String::new();
    for (i, [x, y]) in coords.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", fmt_num(*x), fmt_num(*y));
    }
    d
}


/// Closed area between the line and the baseline at `baseline`.
fn area(coords: &[[f64; 2]], baseline: f64) -> String {
    let (Some(first), Some(last)) = (coords.first(), coords.last()) else {
        return String::new();
    };

    let mut d = format!("M{},{}", fmt_num(first[0]), fmt_num(baseline));
    for [x, y] in coords {
        let _ = write!(d, "L{},{}", fmt_num(*x), fmt_num(*y));
    }
    let _ = write!(d, "L{},{}Z", fmt_num(last[0]), fmt_num(baseline));
    d
}


fn path_length(coords: &[[f64; 2]]) -> f64 {
    coords
        .windows(2)
        .map(|pair| (pair[1][0] - pair[0][0]).hypot(pair[1][1] - pair[0][1]))
        .sum()
}
