//! Turning transform-handle results into semantic edits.
//!
//! A renderer's transform handle reports position, scale and rotation of
//! the node it wrapped. None of those survive as-is: scale is folded into
//! font size, zone points or nothing at all, and rotation into a text angle,
//! zone outline or row orientation. After resolution the node is back at
//! identity scale and rotation.

use seatplan_core::{
    Element, ElementPatch, Point, Rect, Row, RowPatch, Seat, Text, Zone, ZoneShape,
    DEFAULT_FONT_SIZE,
};
use seatplan_geometry::normalize_degrees;

/// Smallest font size a text resize can produce
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Node state at the end of a transform gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformGesture {
    pub x: f64,
    pub y: f64,
    /// Unscaled node width
    pub width: f64,
    /// Unscaled node height
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees
    pub rotation: f64,
}

impl TransformGesture {
    /// Identity transform of a `width` x `height` node at `(x, y)`
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    pub fn scaled(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.scale_x,
            self.scale_y,
            self.rotation,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    fn max_scale(&self) -> f64 {
        self.scale_x.abs().max(self.scale_y.abs())
    }

    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Store edit a gesture resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResolution {
    Row(RowPatch),
    Element(ElementPatch),
    /// Nothing to apply (derived seat or garbage input)
    Ignored,
}

/// Resolve `gesture` against the element it was applied to
pub fn resolve(element: &Element, gesture: &TransformGesture) -> TransformResolution {
    if !gesture.is_finite() {
        return TransformResolution::Ignored;
    }
    match element {
        Element::Row(row) => TransformResolution::Row(resolve_row(row, gesture)),
        Element::Seat(seat) if seat.is_derived() => TransformResolution::Ignored,
        Element::Seat(seat) => TransformResolution::Element(resolve_seat(seat, gesture)),
        Element::Zone(zone) => match resolve_zone(zone, gesture) {
            Some(patch) => TransformResolution::Element(patch),
            None => TransformResolution::Ignored,
        },
        Element::Text(text) => TransformResolution::Element(resolve_text(text, gesture)),
    }
}

fn resolve_text(text: &Text, g: &TransformGesture) -> ElementPatch {
    let old = text.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    ElementPatch {
        x: Some(g.x),
        y: Some(g.y),
        font_size: Some((old * g.max_scale()).round().max(MIN_FONT_SIZE)),
        rotation: Some(normalize_degrees(g.rotation)),
        ..Default::default()
    }
}

fn resolve_zone(zone: &Zone, g: &TransformGesture) -> Option<ElementPatch> {
    let anchor = g.position();
    let (shape, points) = match zone.shape {
        ZoneShape::Rect => {
            let far = anchor.translated(g.width * g.scale_x, g.height * g.scale_y);
            (ZoneShape::Rect, vec![anchor, far])
        }
        ZoneShape::Circle => {
            let r = g.width / 2.0 * g.max_scale();
            let center = anchor.translated(r, r);
            (ZoneShape::Circle, vec![center, center.translated(r, 0.0)])
        }
        ZoneShape::Polygon => {
            let origin = Rect::from_points(zone.points.iter().copied())?.min();
            let points = zone
                .points
                .iter()
                .map(|p| {
                    Point::new(
                        g.x + (p.x - origin.x) * g.scale_x,
                        g.y + (p.y - origin.y) * g.scale_y,
                    )
                })
                .collect();
            (ZoneShape::Polygon, points)
        }
    };

    let rotation = normalize_degrees(g.rotation);
    let (shape, points) = if rotation == 0.0 {
        (shape, points)
    } else {
        let points = match shape {
            // A rotated rectangle can only be stored as its four corners
            ZoneShape::Rect => Rect::from_corners(points[0], points[1]).corners().to_vec(),
            _ => points,
        };
        let shape = match shape {
            ZoneShape::Rect => ZoneShape::Polygon,
            other => other,
        };
        let rotated = points.into_iter().map(|p| p.rotate_about(anchor, rotation)).collect();
        (shape, rotated)
    };

    Some(ElementPatch {
        shape: Some(shape),
        points: Some(points),
        ..Default::default()
    })
}

fn resolve_row(row: &Row, g: &TransformGesture) -> RowPatch {
    let centroid = row.centroid();
    let origin = row
        .origin
        .rotate_about(centroid, g.rotation)
        .translated(g.x - centroid.x, g.y - centroid.y);
    RowPatch {
        origin: Some(origin),
        orientation: Some(normalize_degrees(row.orientation + g.rotation)),
        ..Default::default()
    }
}

fn resolve_seat(_seat: &Seat, g: &TransformGesture) -> ElementPatch {
    ElementPatch {
        x: Some(g.x),
        y: Some(g.y),
        rotation: Some(normalize_degrees(g.rotation)),
        ..Default::default()
    }
}

/// How the selection may be resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    None,
    AspectLocked,
    Free,
}

/// What the transform handle should offer for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformAffordance {
    pub resize: ResizeMode,
    pub rotate: bool,
}

impl TransformAffordance {
    pub const NONE: TransformAffordance = TransformAffordance {
        resize: ResizeMode::None,
        rotate: false,
    };

    const ROTATE_ONLY: TransformAffordance = TransformAffordance {
        resize: ResizeMode::None,
        rotate: true,
    };

    /// Should a transform handle be shown at all?
    pub fn is_active(&self) -> bool {
        self.rotate || self.resize != ResizeMode::None
    }
}

/// Capabilities for a selection
pub fn affordance(selected: &[&Element]) -> TransformAffordance {
    match selected {
        [] => TransformAffordance::NONE,
        [single] => match single {
            Element::Row(_) => TransformAffordance::ROTATE_ONLY,
            Element::Text(_) => TransformAffordance {
                resize: ResizeMode::AspectLocked,
                rotate: true,
            },
            Element::Zone(_) => TransformAffordance {
                resize: ResizeMode::Free,
                rotate: true,
            },
            Element::Seat(seat) if seat.is_derived() => TransformAffordance::NONE,
            Element::Seat(_) => TransformAffordance::ROTATE_ONLY,
        },
        _ => TransformAffordance::ROTATE_ONLY,
    }
}
