//! Element bounds and hit testing.
//!
//! Bounds are axis-aligned boxes in canvas coordinates, rotated shapes are
//! covered by the box around their rotated corners. Hit tests walk the
//! element list back to front so the topmost element wins.

use seatplan_geometry::{seat_positions, Point, Rect};

use crate::element::{Element, Seat, Text, Zone, ZoneShape};
use crate::plan::SeatPlan;
use crate::row::Row;

/// Approximate glyph advance as a fraction of the font size
const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Bounding box of an element, `None` for degenerate zones
pub fn element_bounds(element: &Element) -> Option<Rect> {
    match element {
        Element::Row(row) => row_bounds(row),
        Element::Seat(seat) => Some(seat_bounds(seat)),
        Element::Zone(zone) => zone_bounds(zone),
        Element::Text(text) => Some(text_bounds(text)),
    }
}

fn seat_box(center: Point, w: f64, h: f64, rotation: f64) -> Rect {
    let rect = Rect::centered(center, w, h);
    if rotation == 0.0 {
        rect
    } else {
        rect.rotated_about(center, rotation)
    }
}

fn row_bounds(row: &Row) -> Option<Rect> {
    let (w, h) = row.seat_size();
    seat_positions(&row.layout())
        .into_iter()
        .map(|pose| seat_box(pose.point(), w, h, pose.rotation))
        .reduce(|a, b| a.union(&b))
}

fn seat_bounds(seat: &Seat) -> Rect {
    let (w, h) = seat.size();
    seat_box(seat.center(), w, h, seat.rotation.unwrap_or(0.0))
}

fn zone_bounds(zone: &Zone) -> Option<Rect> {
    if !zone.is_valid() {
        return None;
    }
    match zone.shape {
        ZoneShape::Rect => Some(Rect::from_corners(zone.points[0], zone.points[1])),
        ZoneShape::Circle => {
            let r = zone.radius()?;
            Some(Rect::centered(zone.points[0], 2.0 * r, 2.0 * r))
        }
        ZoneShape::Polygon => Rect::from_points(zone.points.iter().copied()),
    }
}

fn text_bounds(text: &Text) -> Rect {
    let size = text.font_size();
    let width = text.text.chars().count().max(1) as f64 * size * TEXT_WIDTH_FACTOR;
    let anchor = Point::new(text.x, text.y);
    let rect = Rect::from_corners(anchor, anchor.translated(width, size));
    match text.rotation {
        Some(r) if r != 0.0 => rect.rotated_about(anchor, r),
        _ => rect,
    }
}

/// Topmost element under `point`
pub fn hit_test(plan: &SeatPlan, point: Point) -> Option<&Element> {
    plan.elements
        .iter()
        .rev()
        .find(|e| element_bounds(e).is_some_and(|b| b.contains(point)))
}

/// Every element whose bounds touch `area`, in element order
pub fn elements_in_rect<'a>(plan: &'a SeatPlan, area: &Rect) -> Vec<&'a Element> {
    plan.elements
        .iter()
        .filter(|e| element_bounds(e).is_some_and(|b| b.intersects(area)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CategoryId, ElementId};

    #[test]
    fn seat_hit_beats_row() {
        let plan = SeatPlan::sample();
        // Third seat of row A sits at (170, 200)
        let hit = hit_test(&plan, Point::new(171.0, 201.0)).unwrap();
        assert_eq!(hit.id().as_str(), "row-a-seat-3");
    }

    #[test]
    fn empty_canvas_misses() {
        let plan = SeatPlan::sample();
        assert!(hit_test(&plan, Point::new(1100.0, 700.0)).is_none());
    }

    #[test]
    fn row_bounds_cover_all_seats() {
        let row = Row::new(
            ElementId::new("r"),
            "R",
            Point::new(0.0, 0.0),
            CategoryId::new("standard"),
        )
        .with_spacing(25.0)
        .with_seats(5);
        let b = element_bounds(&Element::Row(row)).unwrap();
        assert_eq!(b, Rect::from_corners(Point::new(-10.0, -10.0), Point::new(110.0, 10.0)));
    }

    #[test]
    fn circle_zone_bounds() {
        let zone = Zone::circle(
            ElementId::new("c"),
            Point::new(50.0, 50.0),
            10.0,
            CategoryId::new("standard"),
        );
        let b = element_bounds(&Element::Zone(zone)).unwrap();
        assert_eq!(b, Rect::from_corners(Point::new(40.0, 40.0), Point::new(60.0, 60.0)));
    }

    #[test]
    fn degenerate_zone_has_no_bounds() {
        let zone = Zone::polygon(
            ElementId::new("p"),
            vec![Point::new(0.0, 0.0)],
            CategoryId::new("standard"),
        );
        assert!(element_bounds(&Element::Zone(zone)).is_none());
    }

    #[test]
    fn marquee_collects_touching_elements() {
        let plan = SeatPlan::sample();
        let area = Rect::from_corners(Point::new(390.0, 90.0), Point::new(410.0, 110.0));
        let ids: Vec<_> = elements_in_rect(&plan, &area)
            .into_iter()
            .map(|e| e.id().as_str())
            .collect();
        assert_eq!(ids, vec!["stage"]);
    }
}
