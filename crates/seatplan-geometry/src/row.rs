//! Seat placement along a row.
//!
//! A row is a chord from `origin` at angle `orientation`, `(seat_count - 1) * spacing`
//! long. Curved rows bow away from the chord by `curvature * BOW_FACTOR * sin(t * PI)`
//! along the chord normal, so the first and last seats always stay on the chord.
//! Seats keep the row's flat orientation, curved or not.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Multiplier applied to `curvature` to get the bow offset at the row midpoint
pub const BOW_FACTOR: f64 = 4.0;

/// Samples used for guide paths when the caller has no preference
pub const DEFAULT_GUIDE_STEPS: usize = 30;

/// The parameters of a row that determine where its seats go
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub origin: Point,
    /// Degrees, 0 = pointing along +x
    pub orientation: f64,
    pub spacing: f64,
    pub seat_count: u32,
    pub curvature: Option<f64>,
}

/// Position and rotation of one seat centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatPose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl SeatPose {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl RowLayout {
    /// Length of the straight chord from the first to the last seat
    pub fn chord_length(&self) -> f64 {
        self.seat_count.saturating_sub(1) as f64 * self.spacing
    }

    pub fn is_curved(&self) -> bool {
        self.curvature.is_some_and(|c| c != 0.0)
    }

    /// Offset from the chord at parameter `t`; pinned to zero at both ends
    fn bow(&self, t: f64) -> f64 {
        match self.curvature {
            Some(c) if c != 0.0 && t > 0.0 && t < 1.0 => c * BOW_FACTOR * (t * PI).sin(),
            _ => 0.0,
        }
    }

    /// Point `along` units down the chord, displaced by the bow at `t`
    fn place(&self, along: f64, t: f64) -> Point {
        let (sin, cos) = self.orientation.to_radians().sin_cos();
        let bow = self.bow(t);
        Point::new(
            self.origin.x + along * cos - bow * sin,
            self.origin.y + along * sin + bow * cos,
        )
    }

    /// Point on the row curve at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        self.place(t * self.chord_length(), t)
    }
}

/// Seat centres for every seat of the row, in seat-number order
pub fn seat_positions(layout: &RowLayout) -> Vec<SeatPose> {
    let n = layout.seat_count;
    let last = n.saturating_sub(1);
    (0..n)
        .map(|i| {
            let t = if last == 0 { 0.0 } else { i as f64 / last as f64 };
            let p = layout.place(i as f64 * layout.spacing, t);
            SeatPose {
                x: p.x,
                y: p.y,
                rotation: layout.orientation,
            }
        })
        .collect()
}

/// `steps + 1` samples along the row curve, for drawing a guide line
pub fn guide_path(layout: &RowLayout, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|k| layout.point_at(k as f64 / steps as f64))
        .collect()
}

/// Guide path as interleaved `[x0, y0, x1, y1, ...]` coordinates
pub fn guide_path_flat(layout: &RowLayout, steps: usize) -> Vec<f64> {
    guide_path(layout, steps)
        .into_iter()
        .flat_map(|p| [p.x, p.y])
        .collect()
}

/// Mean of all seat centres; the origin for an empty row
pub fn centroid(layout: &RowLayout) -> Point {
    let seats = seat_positions(layout);
    if seats.is_empty() {
        return layout.origin;
    }
    let n = seats.len() as f64;
    let (sx, sy) = seats
        .iter()
        .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
    Point::new(sx / n, sy / n)
}
