//! Parametric seat rows.
//!
//! A [`Row`] never stores seat coordinates. Its seats are produced by
//! [`Row::generate_seats`] from the row parameters through the geometry
//! crate, and the store swaps the whole set in on every row edit.

use serde::{Deserialize, Serialize};

use seatplan_geometry::{centroid, seat_positions, Point, RowLayout};

use crate::element::{Seat, SeatStatus, DEFAULT_SEAT_SIZE};
use crate::ids::{CategoryId, ElementId};

/// Spacing used when placing a new row
pub const DEFAULT_ROW_SPACING: f64 = 25.0;

/// Seat count used when placing a new row
pub const DEFAULT_ROW_SEATS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: ElementId,
    pub label: String,
    pub origin: Point,
    /// Degrees, 0 = along +x
    #[serde(default)]
    pub orientation: f64,
    pub spacing: f64,
    pub seat_count: u32,
    pub category: CategoryId,
    /// Signed bow magnitude; absent or 0 means straight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
    /// Seat width for generated seats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    /// Seat height for generated seats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
}

impl Row {
    pub fn new(id: ElementId, label: impl Into<String>, origin: Point, category: CategoryId) -> Self {
        Self {
            id,
            label: label.into(),
            origin,
            orientation: 0.0,
            spacing: DEFAULT_ROW_SPACING,
            seat_count: DEFAULT_ROW_SEATS,
            category,
            curvature: None,
            w: None,
            h: None,
        }
    }

    pub fn with_seats(mut self, seat_count: u32) -> Self {
        self.seat_count = seat_count;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_orientation(mut self, orientation: f64) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = Some(curvature);
        self
    }

    pub fn with_seat_size(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub fn layout(&self) -> RowLayout {
        RowLayout {
            origin: self.origin,
            orientation: self.orientation,
            spacing: self.spacing,
            seat_count: self.seat_count,
            curvature: self.curvature,
        }
    }

    pub fn seat_size(&self) -> (f64, f64) {
        (
            self.w.unwrap_or(DEFAULT_SEAT_SIZE),
            self.h.unwrap_or(DEFAULT_SEAT_SIZE),
        )
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.layout())
    }

    pub fn seat_id(&self, number: u32) -> ElementId {
        ElementId::seat(&self.id, number)
    }

    /// Label a freshly generated seat gets, e.g. `A3`
    pub fn seat_label(&self, number: u32) -> String {
        format!("{}{}", self.label, number)
    }

    /// Repair values no row can be generated from: non-finite or
    /// non-positive spacing, a zero seat count, non-finite angles and sizes.
    /// In-range parameters are left alone, however large.
    pub fn sanitized(mut self) -> Self {
        if !self.orientation.is_finite() {
            self.orientation = 0.0;
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            self.spacing = DEFAULT_ROW_SPACING;
        }
        self.seat_count = self.seat_count.max(1);
        self.curvature = self.curvature.filter(|c| c.is_finite() && *c != 0.0);
        self.w = self.w.filter(|w| w.is_finite() && *w > 0.0);
        self.h = self.h.filter(|h| h.is_finite() && *h > 0.0);
        self
    }

    /// Sanitize, then bring spacing, seat count and curvature into `limits`
    pub fn clamped(self, limits: &RowLimits) -> Self {
        let mut row = self.sanitized();
        row.spacing = limits.clamp_spacing(row.spacing);
        row.seat_count = limits.clamp_seat_count(row.seat_count);
        row.curvature = row.curvature.map(|c| limits.clamp_curvature(c));
        row
    }

    pub fn apply_patch(&mut self, patch: &RowPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(origin) = patch.origin.filter(|p| p.is_finite()) {
            self.origin = origin;
        }
        if let Some(orientation) = patch.orientation {
            self.orientation = orientation;
        }
        if let Some(spacing) = patch.spacing {
            self.spacing = spacing;
        }
        if let Some(seat_count) = patch.seat_count {
            self.seat_count = seat_count;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(curvature) = patch.curvature {
            self.curvature = Some(curvature);
        }
        if let Some(w) = patch.w {
            self.w = Some(w);
        }
        if let Some(h) = patch.h {
            self.h = Some(h);
        }
    }

    /// Field values of `seats` that differ from what this row would generate
    pub fn seat_overrides<'a>(&self, seats: impl IntoIterator<Item = &'a Seat>) -> Vec<SeatOverride> {
        seats
            .into_iter()
            .filter(|seat| seat.is_override)
            .filter_map(|seat| {
                let number = seat.number?;
                let ov = SeatOverride {
                    number,
                    category: Some(seat.category.clone()).filter(|c| *c != self.category),
                    status: Some(seat.status).filter(|s| *s != SeatStatus::Available),
                    label: seat
                        .label
                        .clone()
                        .filter(|l| *l != self.seat_label(number)),
                };
                (!ov.is_empty()).then_some(ov)
            })
            .collect()
    }

    /// The full derived seat set for the current parameters, with `overrides`
    /// reapplied to seat numbers that still exist.
    pub fn generate_seats(&self, overrides: &[SeatOverride]) -> Vec<Seat> {
        let (w, h) = self.seat_size();
        seat_positions(&self.layout())
            .into_iter()
            .zip(1..)
            .map(|(pose, number)| {
                let mut seat = Seat {
                    id: self.seat_id(number),
                    row_id: Some(self.id.clone()),
                    number: Some(number),
                    x: pose.x,
                    y: pose.y,
                    w: Some(w),
                    h: Some(h),
                    category: self.category.clone(),
                    status: SeatStatus::Available,
                    label: Some(self.seat_label(number)),
                    rotation: Some(pose.rotation),
                    is_override: false,
                };
                if let Some(ov) = overrides.iter().find(|o| o.number == number) {
                    ov.apply(&mut seat);
                }
                seat
            })
            .collect()
    }
}

/// Per-seat deviations carried across regeneration
#[derive(Debug, Clone, PartialEq)]
pub struct SeatOverride {
    pub number: u32,
    pub category: Option<CategoryId>,
    pub status: Option<SeatStatus>,
    pub label: Option<String>,
}

impl SeatOverride {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none() && self.label.is_none()
    }

    fn apply(&self, seat: &mut Seat) {
        if let Some(category) = &self.category {
            seat.category = category.clone();
        }
        if let Some(status) = self.status {
            seat.status = status;
        }
        if let Some(label) = &self.label {
            seat.label = Some(label.clone());
        }
        seat.is_override = true;
    }
}

/// Partial row update; `None` leaves the field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub label: Option<String>,
    pub origin: Option<Point>,
    pub orientation: Option<f64>,
    pub spacing: Option<f64>,
    pub seat_count: Option<u32>,
    pub category: Option<CategoryId>,
    /// `Some(0.0)` straightens the row
    pub curvature: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl RowPatch {
    /// Clamp the fields this patch sets; unset fields stay unset
    pub fn clamped(&self, limits: &RowLimits) -> Self {
        Self {
            spacing: self
                .spacing
                .filter(|s| s.is_finite())
                .map(|s| limits.clamp_spacing(s)),
            seat_count: self.seat_count.map(|n| limits.clamp_seat_count(n)),
            curvature: self
                .curvature
                .filter(|c| c.is_finite())
                .map(|c| limits.clamp_curvature(c)),
            ..self.clone()
        }
    }
}

/// Allowed ranges for row parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowLimits {
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub min_seat_count: u32,
    pub max_seat_count: u32,
    pub max_curvature: f64,
}

impl RowLimits {
    pub fn clamp_spacing(&self, spacing: f64) -> f64 {
        spacing.max(self.min_spacing).min(self.max_spacing)
    }

    pub fn clamp_seat_count(&self, seat_count: u32) -> u32 {
        seat_count
            .min(self.max_seat_count)
            .max(self.min_seat_count)
            .max(1)
    }

    pub fn clamp_curvature(&self, curvature: f64) -> f64 {
        let bow = self.max_curvature.abs();
        curvature.max(-bow).min(bow)
    }
}

impl Default for RowLimits {
    fn default() -> Self {
        Self {
            min_spacing: 20.0,
            max_spacing: 50.0,
            min_seat_count: 1,
            max_seat_count: 50,
            max_curvature: 30.0,
        }
    }
}
