//! Element variants placed on the plan canvas.
//!
//! [`Element`] serializes with a `type` tag so a plan file reads as a flat
//! list of rows, seats, zones and texts. Rows live in [`crate::row`]; the
//! other variants and the partial-update type are here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use seatplan_geometry::Point;

use crate::ids::{CategoryId, ElementId};
use crate::row::Row;

/// Seat width/height when the seat or row leaves them unset
pub const DEFAULT_SEAT_SIZE: f64 = 20.0;

/// Text size when a text element leaves it unset
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Booking status of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Available,
    Unavailable,
}

/// A single seat.
///
/// With `row_id` set the seat is derived: position, rotation and size belong
/// to the row and are rewritten on every regeneration. Without it the seat is
/// orphaned and fully independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Centre x
    pub x: f64,
    /// Centre y
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    pub category: CategoryId,
    #[serde(default)]
    pub status: SeatStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub is_override: bool,
}

impl Seat {
    /// Free-standing seat centred at `center`
    pub fn orphan(id: ElementId, center: Point, category: CategoryId) -> Self {
        Self {
            id,
            row_id: None,
            number: None,
            x: center.x,
            y: center.y,
            w: None,
            h: None,
            category,
            status: SeatStatus::Available,
            label: None,
            rotation: None,
            is_override: false,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.row_id.is_some()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> (f64, f64) {
        (
            self.w.unwrap_or(DEFAULT_SEAT_SIZE),
            self.h.unwrap_or(DEFAULT_SEAT_SIZE),
        )
    }

    /// Merge `patch`, returning whether anything was applied.
    ///
    /// Derived seats only take `category`, `status` and `label`, and any of
    /// those marks the seat as an override.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let mut changed = false;
        if let Some(category) = &patch.category {
            self.category = category.clone();
            changed = true;
        }
        if let Some(status) = patch.status {
            self.status = status;
            changed = true;
        }
        if let Some(label) = &patch.label {
            self.label = Some(label.clone());
            changed = true;
        }

        if self.is_derived() {
            if patch.touches_geometry() {
                debug!(seat = %self.id, "ignoring geometry patch on derived seat");
            }
            if changed {
                self.is_override = true;
            }
            return changed;
        }

        if let Some(x) = finite(patch.x) {
            self.x = x;
            changed = true;
        }
        if let Some(y) = finite(patch.y) {
            self.y = y;
            changed = true;
        }
        if let Some(rotation) = finite(patch.rotation) {
            self.rotation = Some(rotation);
            changed = true;
        }
        if let Some(w) = positive(patch.w) {
            self.w = Some(w);
            changed = true;
        }
        if let Some(h) = positive(patch.h) {
            self.h = Some(h);
            changed = true;
        }
        changed
    }
}

/// Zone outline kind; the meaning of [`Zone::points`] depends on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneShape {
    /// Two opposite corners
    Rect,
    /// Centre, then a point on the circumference
    Circle,
    /// Three or more vertices
    Polygon,
}

/// Area marker such as a stage or standing section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ElementId,
    pub shape: ZoneShape,
    pub points: Vec<Point>,
    pub category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
}

impl Zone {
    pub fn rect(id: ElementId, a: Point, b: Point, category: CategoryId) -> Self {
        Self::with_points(id, ZoneShape::Rect, vec![a, b], category)
    }

    pub fn circle(id: ElementId, center: Point, radius: f64, category: CategoryId) -> Self {
        let edge = center.translated(radius, 0.0);
        Self::with_points(id, ZoneShape::Circle, vec![center, edge], category)
    }

    pub fn polygon(id: ElementId, points: Vec<Point>, category: CategoryId) -> Self {
        Self::with_points(id, ZoneShape::Polygon, points, category)
    }

    fn with_points(id: ElementId, shape: ZoneShape, points: Vec<Point>, category: CategoryId) -> Self {
        Self {
            id,
            shape,
            points,
            category,
            label: None,
            fill_color: None,
            stroke_color: None,
        }
    }

    /// Enough finite points for the shape
    pub fn is_valid(&self) -> bool {
        let needed = match self.shape {
            ZoneShape::Rect | ZoneShape::Circle => 2,
            ZoneShape::Polygon => 3,
        };
        self.points.len() >= needed && self.points.iter().all(|p| p.is_finite())
    }

    /// Circle radius, distance from centre to the edge point
    pub fn radius(&self) -> Option<f64> {
        match (self.shape, self.points.as_slice()) {
            (ZoneShape::Circle, [center, edge, ..]) => Some(center.distance(*edge)),
            _ => None,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.translated(dx, dy);
        }
    }

    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        if patch.shape.is_some() || patch.points.is_some() {
            let mut candidate = self.clone();
            if let Some(points) = &patch.points {
                candidate.points = points.clone();
            }
            if let Some(shape) = patch.shape {
                candidate.shape = shape;
            }
            if !candidate.is_valid() {
                debug!(zone = %self.id, "rejecting zone patch with invalid outline");
                return false;
            }
        }

        let mut changed = false;
        if let Some(shape) = patch.shape {
            self.shape = shape;
            changed = true;
        }
        if let Some(points) = &patch.points {
            self.points = points.clone();
            changed = true;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
            changed = true;
        }
        if let Some(label) = &patch.label {
            self.label = Some(label.clone());
            changed = true;
        }
        if let Some(fill) = &patch.fill_color {
            self.fill_color = Some(fill.clone());
            changed = true;
        }
        if let Some(stroke) = &patch.stroke_color {
            self.stroke_color = Some(stroke.clone());
            changed = true;
        }
        changed
    }
}

/// Free text label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: ElementId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Text {
    pub fn new(id: ElementId, text: impl Into<String>, at: Point) -> Self {
        Self {
            id,
            text: text.into(),
            x: at.x,
            y: at.y,
            font_size: None,
            font_family: None,
            color: None,
            rotation: None,
        }
    }

    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let mut changed = false;
        if let Some(x) = finite(patch.x) {
            self.x = x;
            changed = true;
        }
        if let Some(y) = finite(patch.y) {
            self.y = y;
            changed = true;
        }
        if let Some(rotation) = finite(patch.rotation) {
            self.rotation = Some(rotation);
            changed = true;
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
            changed = true;
        }
        if let Some(size) = positive(patch.font_size) {
            self.font_size = Some(size);
            changed = true;
        }
        if let Some(family) = &patch.font_family {
            self.font_family = Some(family.clone());
            changed = true;
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
            changed = true;
        }
        changed
    }
}

/// Anything that can sit on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Row(Row),
    Seat(Seat),
    Zone(Zone),
    Text(Text),
}

/// Discriminant of [`Element`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Row,
    Seat,
    Zone,
    Text,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Row => "row",
            ElementKind::Seat => "seat",
            ElementKind::Zone => "zone",
            ElementKind::Text => "text",
        }
    }
}

impl Element {
    pub fn id(&self) -> &ElementId {
        match self {
            Element::Row(r) => &r.id,
            Element::Seat(s) => &s.id,
            Element::Zone(z) => &z.id,
            Element::Text(t) => &t.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Row(_) => ElementKind::Row,
            Element::Seat(_) => ElementKind::Seat,
            Element::Zone(_) => ElementKind::Zone,
            Element::Text(_) => ElementKind::Text,
        }
    }

    /// Category reference; texts have none
    pub fn category(&self) -> Option<&CategoryId> {
        match self {
            Element::Row(r) => Some(&r.category),
            Element::Seat(s) => Some(&s.category),
            Element::Zone(z) => Some(&z.category),
            Element::Text(_) => None,
        }
    }

    /// Parent row of a derived seat
    pub fn parent_row(&self) -> Option<&ElementId> {
        match self {
            Element::Seat(s) => s.row_id.as_ref(),
            _ => None,
        }
    }

    pub fn is_derived_seat(&self) -> bool {
        self.parent_row().is_some()
    }

    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Element::Row(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_seat(&self) -> Option<&Seat> {
        match self {
            Element::Seat(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_zone(&self) -> Option<&Zone> {
        match self {
            Element::Zone(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Partial update for a non-row element.
///
/// Fields that do not exist on the target variant are ignored, as are
/// non-finite numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub category: Option<CategoryId>,
    pub status: Option<SeatStatus>,
    pub label: Option<String>,
    pub shape: Option<ZoneShape>,
    pub points: Option<Vec<Point>>,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<String>,
}

impl ElementPatch {
    /// Does the patch carry any position, size or rotation field?
    pub fn touches_geometry(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.rotation.is_some()
            || self.w.is_some()
            || self.h.is_some()
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
