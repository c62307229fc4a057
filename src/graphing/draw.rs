use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::curve::flatten_path;
use super::layout::ChartLayout;

pub const LINE_COLOR: RGBColor = RGBColor(26, 188, 156);
const GRID_COLOR: RGBColor = RGBColor(222, 222, 222);
const LABEL_COLOR: RGBColor = RGBColor(70, 70, 70);

const STROKE_WIDTH: u32 = 3;
const FILL_ALPHA: f64 = 0.25;
const MARKER_RADIUS: i32 = 5;
const FONT_SIZE: u32 = 16;
const LABEL_GAP: i32 = 8;
const CURVE_STEPS: usize = 24;

pub fn draw_activity_graph<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    layout: &ChartLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let canvas = &layout.canvas;
    let left = canvas.plot_left().round() as i32;
    let right = canvas.plot_right().round() as i32;
    let top = canvas.plot_top().round() as i32;
    let bottom = layout.baseline().round() as i32;

    drawing_area.fill(&WHITE)?;

    let label_font = ("sans-serif", FONT_SIZE).into_font().color(&LABEL_COLOR);

    for line in &layout.hour_lines {
        let y = line.position.round() as i32;

        drawing_area.draw(&PathElement::new(
            vec![(left, y), (right, y)],
            GRID_COLOR.stroke_width(1),
        ))?;
        drawing_area.draw(&Text::new(
            line.label.as_str(),
            (left - LABEL_GAP, y),
            label_font.pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    for line in &layout.day_lines {
        let x = line.position.round() as i32;

        drawing_area.draw(&PathElement::new(
            vec![(x, top), (x, bottom)],
            GRID_COLOR.stroke_width(1),
        ))?;
        drawing_area.draw(&Text::new(
            line.label.as_str(),
            (x, bottom + LABEL_GAP),
            label_font.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }

    let path: Vec<(i32, i32)> = flatten_path(&layout.segments, CURVE_STEPS)
        .into_iter()
        .map(|p| p.to_pixel())
        .collect();

    if let (Some(&(first_x, _)), Some(&(last_x, _))) = (path.first(), path.last()) {
        drawing_area.draw(&PathElement::new(
            path.clone(),
            LINE_COLOR.stroke_width(STROKE_WIDTH),
        ))?;

        let mut area_outline = path;
        area_outline.push((last_x, bottom));
        area_outline.push((first_x, bottom));

        drawing_area.draw(&Polygon::new(
            area_outline,
            LINE_COLOR.mix(FILL_ALPHA).filled(),
        ))?;
    }

    for point in &layout.points {
        drawing_area.draw(&Circle::new(
            point.to_pixel(),
            MARKER_RADIUS,
            LINE_COLOR.filled(),
        ))?;
    }

    Ok(())
}
