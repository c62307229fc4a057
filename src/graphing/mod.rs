use chrono::{DateTime, Utc};
use plotters::prelude::{BitMapBackend, IntoDrawingArea};

pub use self::layout::CanvasGeometry;
use self::axis::AxisPlan;
use self::layout::ChartLayout;
use crate::error::{Error, Result};
use crate::model::ActivityRecord;
use crate::stats::{aggregate, DayWindow, Filter, Timeframe};

mod axis;
mod curve;
mod draw;
mod layout;
mod util;

/// Renders per-day activity within `timeframe` as a PNG.
///
/// Returns `None` for the single-day timeframe and whenever the records span
/// fewer than two calendar days of the window, since there is no curve to draw.
pub fn render_chart(
    records: &[ActivityRecord],
    timeframe: Timeframe,
    now: DateTime<Utc>,
    canvas: CanvasGeometry,
) -> Result<Option<Vec<u8>>> {
    if timeframe == Timeframe::Day {
        return Ok(None);
    }

    let filter = Filter::since(timeframe.cutoff(now));
    let in_range: Vec<&ActivityRecord> = filter.apply(records).collect();

    if util::distinct_days(in_range.iter().copied()) < 2 {
        tracing::debug!(%timeframe, "not enough days of activity for a chart");
        return Ok(None);
    }

    let window = DayWindow::resolve(timeframe, records, now)?;
    if window.day_amount < 2 {
        return Ok(None);
    }

    let charted_days = util::distinct_days(
        in_range
            .iter()
            .copied()
            .filter(|r| window.contains(r.start_time.date_naive())),
    );
    if charted_days < 2 {
        tracing::debug!(%timeframe, "not enough days of activity inside the window");
        return Ok(None);
    }

    if canvas.plot_width() <= 0.0 || canvas.plot_height() <= 0.0 {
        return Err(Error::Drawing(format!(
            "canvas {}x{} leaves no room to plot",
            canvas.width, canvas.height
        )));
    }

    let totals = aggregate(in_range, Some(&window));
    let plan = AxisPlan::plan(&totals.days, window.day_amount, canvas.plot_width());
    let layout = ChartLayout::compute(canvas, &plan, &totals.days);

    tracing::debug!(
        %timeframe,
        days = plan.day_count,
        hour_ceiling = plan.hour_ceiling,
        hour_gap = plan.hour_gap,
        day_line_interval = plan.day_line_interval,
        "planned activity chart"
    );

    let mut buffer = vec![0u8; canvas.width as usize * canvas.height as usize * 3];
    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut buffer, (canvas.width, canvas.height)).into_drawing_area();

        draw::draw_activity_graph(&drawing_area, &layout)
            .map_err(|e| Error::Drawing(e.to_string()))?;
        drawing_area
            .present()
            .map_err(|e| Error::Drawing(e.to_string()))?;
    }

    util::encode_png(buffer, canvas).map(Some)
}
