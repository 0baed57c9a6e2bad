//! Path building: straight and monotone-cubic curves through data points,
//! polyline length, and partial reveal for stroke-draw animations.

use crate::Point;
use serde::{Deserialize, Serialize};

/// Line segments sampled per span of a smoothed curve.
pub const SEGMENTS_PER_SPAN: usize = 12;

/// How consecutive data points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Curve {
    /// Straight segments
    #[default]
    Linear,
    /// Monotone cubic in x: smooth, never overshoots between points
    MonotoneX,
}

impl Curve {
    /// Build a polyline through `points` in order.
    ///
    /// Non-finite points are skipped and the path continues from the last
    /// finite point, so a gap never splits the line.
    #[must_use]
    pub fn build(self, points: &[Point]) -> Vec<Point> {
        let finite: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
        match self {
            Self::Linear => finite,
            Self::MonotoneX => monotone_x(&finite, SEGMENTS_PER_SPAN),
        }
    }
}

/// Sample a monotone cubic Hermite curve through points sorted by x.
///
/// Tangents follow the Steffen-style limiter used by common charting
/// libraries: interior slopes are capped so no segment overshoots its
/// endpoints, and end slopes are taken from the adjacent secant.
#[must_use]
pub fn monotone_x(points: &[Point], segments_per_span: usize) -> Vec<Point> {
    if points.len() < 3 || segments_per_span == 0 {
        return points.to_vec();
    }

    let n = points.len();
    let mut tangents = vec![0.0f32; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);

    let mut out = Vec::with_capacity((n - 1) * segments_per_span + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        let c0 = Point::new(p0.x + dx, dx.mul_add(tangents[i], p0.y));
        let c1 = Point::new(p1.x - dx, (-dx).mul_add(tangents[i + 1], p1.y));
        for s in 1..=segments_per_span {
            let t = s as f32 / segments_per_span as f32;
            out.push(cubic_bezier(p0, c0, c1, p1, t));
        }
    }
    out
}

fn interior_slope(p0: Point, p1: Point, p2: Point) -> f32 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = secant(p1.y - p0.y, h0, h1);
    let s1 = secant(p2.y - p1.y, h1, h0);
    let p = s0.mul_add(h1, s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

fn secant(dy: f32, h: f32, other: f32) -> f32 {
    if h != 0.0 {
        dy / h
    } else if other < 0.0 {
        dy / -0.0
    } else {
        dy / 0.0
    }
}

fn end_slope(p0: Point, p1: Point, neighbour: f32) -> f32 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.y - p0.y) / h - neighbour) / 2.0
    }
}

const fn sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn cubic_bezier(p0: Point, c0: Point, c1: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        b3.mul_add(p1.x, b2.mul_add(c1.x, b0.mul_add(p0.x, b1 * c0.x))),
        b3.mul_add(p1.y, b2.mul_add(c1.y, b0.mul_add(p0.y, b1 * c0.y))),
    )
}

/// Total length of a polyline.
#[must_use]
pub fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// The leading `fraction` of a polyline by arc length.
///
/// `0.0` yields nothing drawable, `1.0` yields the full line. The last
/// point is interpolated inside the segment where the budget runs out.
#[must_use]
pub fn reveal(points: &[Point], fraction: f32) -> Vec<Point> {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    if fraction >= 1.0 || points.len() < 2 {
        return points.to_vec();
    }
    let mut budget = polyline_length(points) * fraction;
    let mut out = vec![points[0]];
    for w in points.windows(2) {
        let seg = w[0].distance(&w[1]);
        if seg >= budget {
            if seg > 0.0 && budget > 0.0 {
                out.push(w[0].lerp(&w[1], budget / seg));
            }
            break;
        }
        budget -= seg;
        out.push(w[1]);
    }
    out
}

/// Close a line into an area down to a horizontal baseline.
#[must_use]
pub fn area_to_baseline(line: &[Point], baseline_y: f32) -> Vec<Point> {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(line.len() + 2);
    polygon.extend_from_slice(line);
    polygon.push(Point::new(last.x, baseline_y));
    polygon.push(Point::new(first.x, baseline_y));
    polygon
}
