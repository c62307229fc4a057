use std::ops::{Add, Div, Mul, Sub};

/// Scale applied to the neighbour difference when estimating a tangent:
/// one sixth of the Catmull-Rom difference, damped by 0.75. It yields a slightly
/// slack curve and is part of the chart's look.
pub const TANGENT_DIVISOR: f64 = 6.0;
pub const TANGENT_DAMPING: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Point,
    pub control1: Point,
    pub control2: Point,
    pub to: Point,
}

impl CubicSegment {
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;

        self.from * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.to * (t * t * t)
    }

    /// `steps + 1` points along the segment, both ends included.
    pub fn flatten(&self, steps: usize) -> impl Iterator<Item = Point> + '_ {
        let steps = steps.max(1);
        (0..=steps).map(move |i| self.at(i as f64 / steps as f64))
    }
}

/// Cubic segments through every point, in order. Tangents are estimated from
/// the neighbours, with the end points standing in for missing ones.
pub fn smooth(points: &[Point]) -> Vec<CubicSegment> {
    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (p1, p2) = (pair[0], pair[1]);
            let p0 = if i == 0 { p1 } else { points[i - 1] };
            let p3 = points.get(i + 2).copied().unwrap_or(p2);

            CubicSegment {
                from: p1,
                control1: p1 + (p2 - p0) / TANGENT_DIVISOR * TANGENT_DAMPING,
                control2: p2 - (p3 - p1) / TANGENT_DIVISOR * TANGENT_DAMPING,
                to: p2,
            }
        })
        .collect()
}

/// The whole path as a polyline, with shared end points emitted once.
pub fn flatten_path(segments: &[CubicSegment], steps: usize) -> Vec<Point> {
    let mut path = Vec::new();

    for (i, seg) in segments.iter().enumerate() {
        let skip = if i == 0 { 0 } else { 1 };
        path.extend(seg.flatten(steps).skip(skip));
    }

    path
}
