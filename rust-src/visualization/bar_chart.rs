//! Bar chart: one bar per category, or twin bars when dual-axis.

use crate::config::{BAR_GROW_MS, BAR_STAGGER_MS, SERIES_COLORS};
use crate::scene::{fmt_num, Animation, Element, Tag, Transition};

use super::series::{Marks, SeriesChart, SeriesFrame};


/// Vertical bar marks that grow from the baseline.
#[derive(Debug, Clone, Copy)]
pub struct BarMarks;


pub type BarChart = SeriesChart<BarMarks>;


impl Marks for BarMarks {
    const CLASS: &'static str = "bar-chart";
    const BAND_PADDING: f64 = 0.1;
    // Keeps an all-zero second series off a degenerate domain
    const SECOND_AXIS_PAD: f64 = 0.1;

    fn draw(frame: &SeriesFrame, series: usize) -> Vec<Element> {
        let Some(scale) = frame.scale(series) else {
            return Vec::new();
        };
        let color = SERIES_COLORS[series % SERIES_COLORS.len()];

        let twin = frame.y1.is_some();
        let width = if twin { frame.x.bandwidth() / 2.0 } else { frame.x.bandwidth() };
        let offset = if twin { series as f64 * width } else { 0.0 };

        let baseline = frame.inner_height;
        let count = frame.points.len().max(1) as u32;

        frame
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| {
                let key = point.category.key();
                let x = frame.x.position(&key)? + offset;
                let y = scale.scale(SeriesFrame::value(point, series)).min(baseline);
                let height = baseline - y;
                let grow = Transition::new(BAR_GROW_MS).delayed(stagger_delay(i, count));

                Some(
                    Element::new(format!("bar-{series}-{key}"), Tag::Rect)
                        .num("x", x)
                        .num("y", y)
                        .num("width", width)
                        .num("height", height)
                        .attr("fill", color)
                        .on_enter(Animation::new("y", fmt_num(baseline), fmt_num(y), grow))
                        .on_enter(Animation::new("height", 0, fmt_num(height), grow)),
                )
            })
            .collect()
    }
}


/// Delay of bar `index` out of `count`, spreading the stagger budget evenly.
fn stagger_delay(index: usize, count: u32) -> u32 {
    (index as u32).saturating_mul(BAR_STAGGER_MS) / count.max(1)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::UPDATE_TRANSITION_MS;
    use crate::models::{ChartConfig, ChartOpts};
    use crate::scene::{to_svg, Panel};

    fn dual() -> ChartConfig {
        ChartConfig { opts: ChartOpts { dual_y_axis: true }, ..ChartConfig::default() }
    }

    #[test]
    fn test_zero_second_series_padded() {
        let mut chart = BarChart::new(dual()).unwrap();
        let mut panel = Panel::new("status");
        chart.render(&mut panel, &[json!(["200", 10, 0]), json!(["404", 3, 0])]);

        let frame = chart.frame("status").unwrap();
        assert_eq!(frame.y1.unwrap().domain(), [0.0, 0.1]);
        assert_eq!(frame.y0.domain(), [0.0, 10.0]);
    }

    #[test]
    fn test_twin_bars_split_band() {
        let mut chart = BarChart::new(dual()).unwrap();
        let mut panel = Panel::new("status");
        chart.render(&mut panel, &[json!(["200", 10, 4]), json!(["404", 5, 2])]);

        let frame = chart.frame("status").unwrap();
        let half = frame.x.bandwidth() / 2.0;
        let start = frame.x.position("200").unwrap();

        let scene = panel.scene().unwrap();
        let left = scene.find("bar-0-200").unwrap();
        let right = scene.find("bar-1-200").unwrap();
        assert_eq!(left.get_attr("x"), Some(fmt_num(start).as_str()));
        assert_eq!(right.get_attr("x"), Some(fmt_num(start + half).as_str()));
        assert_eq!(left.get_attr("width"), Some(fmt_num(half).as_str()));

        assert_eq!(left.get_attr("y"), Some("0"));
        assert_eq!(left.get_attr("height"), Some("110"));

        // 4 + 0.1 is niced up to 4.5
        assert_eq!(frame.y1.unwrap().domain(), [0.0, 4.5]);
        assert_eq!(right.get_attr("height"), Some("97.78"));
    }

    #[test]
    fn test_bars_grow_with_stagger() {
        let mut chart = BarChart::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("status");
        let data: Vec<_> = (0..4).map(|i| json!([format!("c{i}"), 10])).collect();
        chart.render(&mut panel, &data);

        let scene = panel.scene().unwrap();
        let first = scene.find("bar-0-c0").unwrap();
        let last = scene.find("bar-0-c3").unwrap();
        assert_eq!(first.animations[0], Animation::new("y", 110, 0, Transition::new(500)));
        assert_eq!(
            last.animations[1],
            Animation::new("height", 0, 110, Transition::new(500).delayed(750))
        );

        // Growth only plays on creation
        chart.render(&mut panel, &data);
        assert!(panel.scene().unwrap().find("bar-0-c3").unwrap().animations.is_empty());
    }

    #[test]
    fn test_removed_bar_fades_out() {
        let mut chart = BarChart::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("status");
        chart.render(&mut panel, &[json!(["200", 10]), json!(["404", 3])]);

        let patch = chart.render(&mut panel, &[json!(["200", 10])]);
        let gone = patch.exited.iter().find(|el| el.key == "bar-0-404").unwrap();
        assert_eq!(
            gone.animations,
            vec![Animation::new("opacity", 1, 0, Transition::new(UPDATE_TRANSITION_MS))]
        );
        assert!(panel.scene().unwrap().find("bar-0-404").is_none());
    }

    #[test]
    fn test_repeated_category_drawn_once() {
        let mut chart = BarChart::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("status");
        let patch = chart.render(&mut panel, &[json!(["Jan", 10]), json!(["Jan", 5]), json!(["Feb", 20])]);

        let frame = chart.frame("status").unwrap();
        assert_eq!(frame.x.domain().len(), 2);
        assert_eq!(patch.entered.iter().filter(|key| *key == "bar-0-Jan").count(), 1);

        let jan = panel.scene().unwrap().find("bar-0-Jan").unwrap();
        assert_eq!(jan.get_attr("x"), Some(fmt_num(frame.x.position_at(0)).as_str()));
        assert_eq!(frame.points[0].y0, 15.0);
    }

    #[test]
    fn test_stagger_delay_budget() {
        assert_eq!(stagger_delay(0, 10), 0);
        assert_eq!(stagger_delay(9, 10), 900);
        assert!(stagger_delay(99, 100) < BAR_STAGGER_MS);
    }

    #[test]
    fn test_single_series_uses_full_band() {
        let mut chart = BarChart::new(ChartConfig::default()).unwrap();
        let mut panel = Panel::new("status");
        chart.render(&mut panel, &[json!(["GET", 5, 100]), json!(["POST", 1, 100])]);

        let frame = chart.frame("status").unwrap();
        assert!(frame.y1.is_none());
        let bar = panel.scene().unwrap().find("bar-0-GET").unwrap();
        assert_eq!(bar.get_attr("width"), Some(fmt_num(frame.x.bandwidth()).as_str()));
        assert!(panel.scene().unwrap().find("bar-1-GET").is_none());
        assert!(to_svg(&panel).contains(r#"class="bar-chart""#));
    }
}
