use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::axis::AxisPlan;
use super::curve::{smooth, CubicSegment, Point};
use crate::stats::DurationMap;

/// Fixed chart geometry in pixels. The label margin is reserved left of and
/// below the plot for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub label_margin: u32,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            padding: 20,
            label_margin: 60,
        }
    }
}

impl CanvasGeometry {
    pub fn plot_left(&self) -> f64 {
        f64::from(self.padding + self.label_margin)
    }

    pub fn plot_right(&self) -> f64 {
        f64::from(self.width.saturating_sub(self.padding))
    }

    pub fn plot_top(&self) -> f64 {
        f64::from(self.padding)
    }

    pub fn plot_bottom(&self) -> f64 {
        f64::from(
            self.height
                .saturating_sub(self.padding + self.label_margin),
        )
    }

    pub fn plot_width(&self) -> f64 {
        (self.plot_right() - self.plot_left()).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.plot_bottom() - self.plot_top()).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// y for hour lines, x for day lines.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub canvas: CanvasGeometry,
    pub hour_lines: Vec<GridLine>,
    pub day_lines: Vec<GridLine>,
    pub points: Vec<Point>,
    pub segments: Vec<CubicSegment>,
}

pub fn day_label(day: NaiveDate) -> String {
    format!("{}.{}.", day.day(), day.month())
}

impl ChartLayout {
    pub fn compute(canvas: CanvasGeometry, plan: &AxisPlan, days: &DurationMap<NaiveDate>) -> Self {
        let left = canvas.plot_left();
        let bottom = canvas.plot_bottom();
        let height = canvas.plot_height();
        let ceiling = f64::from(plan.hour_ceiling);

        let y_for_hours = |hours: f64| {
            if ceiling > 0.0 {
                bottom - hours / ceiling * height
            } else {
                bottom
            }
        };
        let x_for_index = |i: usize| left + i as f64 * plan.gap_pixels;

        let hour_lines = plan
            .hour_lines()
            .map(|h| GridLine {
                position: y_for_hours(f64::from(h)),
                label: format!("{}h", h),
            })
            .collect();

        let dates: Vec<NaiveDate> = days.keys().copied().collect();
        let day_lines = plan
            .day_lines()
            .filter_map(|i| {
                dates.get(i as usize).map(|d| GridLine {
                    position: x_for_index(i as usize),
                    label: day_label(*d),
                })
            })
            .collect();

        let points: Vec<Point> = days
            .values()
            .enumerate()
            .map(|(i, secs)| Point::new(x_for_index(i), y_for_hours(*secs as f64 / 3600.0)))
            .collect();
        let segments = smooth(&points);

        Self {
            canvas,
            hour_lines,
            day_lines,
            points,
            segments,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.canvas.plot_bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(hours: [f64; 7]) -> DurationMap<NaiveDate> {
        NaiveDate::from_ymd_opt(2022, 2, 27)
            .unwrap()
            .iter_days()
            .zip(hours)
            .map(|(d, h)| (d, (h * 3600.0) as i64))
            .collect()
    }

    fn layout_for(days: &DurationMap<NaiveDate>) -> ChartLayout {
        let canvas = CanvasGeometry::default();
        let plan = AxisPlan::plan(days, days.len() as u32, canvas.plot_width());

        ChartLayout::compute(canvas, &plan, days)
    }

    #[test]
    fn default_geometry() {
        let c = CanvasGeometry::default();

        assert_eq!(c.plot_left(), 80.0);
        assert_eq!(c.plot_right(), 1180.0);
        assert_eq!(c.plot_top(), 20.0);
        assert_eq!(c.plot_bottom(), 520.0);
        assert_eq!(c.plot_width(), 1100.0);
    }

    #[test]
    fn one_point_per_day_spanning_the_plot() {
        let days = week([0.0, 1.0, 2.0, 0.0, 3.0, 0.5, 4.0]);
        let layout = layout_for(&days);

        assert_eq!(layout.points.len(), 7);
        assert_eq!(layout.segments.len(), 6);
        assert_eq!(layout.points[0].x, 80.0);
        assert!((layout.points[6].x - 1180.0).abs() < 1e-9);
        assert_eq!(layout.points[0].y, layout.baseline());
        // 4h peak at a 4h ceiling touches the top
        assert_eq!(layout.points[6].y, 20.0);
    }

    #[test]
    fn hour_lines_from_baseline_to_ceiling() {
        let days = week([0.0, 1.0, 2.0, 0.0, 3.0, 0.5, 4.0]);
        let layout = layout_for(&days);

        let labels: Vec<&str> = layout.hour_lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["0h", "1h", "2h", "3h", "4h"]);
        assert_eq!(layout.hour_lines[0].position, layout.baseline());
        assert_eq!(layout.hour_lines[4].position, 20.0);
    }

    #[test]
    fn day_labels_are_day_dot_month() {
        let days = week([1.0; 7]);
        let layout = layout_for(&days);

        let labels: Vec<&str> = layout.day_lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["27.2.", "28.2.", "1.3.", "2.3.", "3.3.", "4.3.", "5.3."]);
    }

    #[test]
    fn idle_week_sits_on_baseline() {
        let days = week([0.0; 7]);
        let layout = layout_for(&days);

        assert_eq!(layout.hour_lines.len(), 1);
        assert!(layout.points.iter().all(|p| p.y == layout.baseline()));
    }
}
