use chrono::NaiveDate;

use crate::stats::DurationMap;

/// Upper bound on the number of day gridlines.
pub const MAX_DAY_LINES: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPlan {
    pub day_count: u32,
    /// Horizontal distance between neighbouring days. Zero for a single day.
    pub gap_pixels: f64,
    pub hour_ceiling: u32,
    pub hour_gap: u32,
    pub day_line_interval: u32,
}

fn hour_gap_for(highest_hours: f64) -> u32 {
    if highest_hours <= 4.0 {
        1
    } else if highest_hours < 12.0 {
        2
    } else {
        4
    }
}

impl AxisPlan {
    pub fn plan(days: &DurationMap<NaiveDate>, day_amount: u32, drawing_width: f64) -> Self {
        let highest_hours = days.values().copied().max().unwrap_or(0) as f64 / 3600.0;
        let hour_gap = hour_gap_for(highest_hours);

        let mut hour_ceiling = 0;
        while f64::from(hour_ceiling) < highest_hours {
            hour_ceiling += hour_gap;
        }

        let mut day_line_interval = 1;
        while f64::from(day_amount) / f64::from(day_line_interval) > f64::from(MAX_DAY_LINES) {
            day_line_interval += 1;
        }

        let gap_pixels = if day_amount > 1 {
            drawing_width / f64::from(day_amount - 1)
        } else {
            0.0
        };

        Self {
            day_count: day_amount,
            gap_pixels,
            hour_ceiling,
            hour_gap,
            day_line_interval,
        }
    }

    /// Hour values that get a gridline, baseline included.
    pub fn hour_lines(&self) -> impl Iterator<Item = u32> {
        (0..=self.hour_ceiling).step_by(self.hour_gap as usize)
    }

    /// Day indices that get a gridline and label.
    pub fn day_lines(&self) -> impl Iterator<Item = u32> {
        (0..self.day_count).step_by(self.day_line_interval as usize)
    }
}
