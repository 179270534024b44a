//! The seat plan document.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use seatplan_geometry::Point;

use crate::category::SeatCategory;
use crate::element::{Element, Seat, SeatStatus, Text, Zone};
use crate::ids::{CategoryId, ElementId, PlanId};
use crate::row::Row;

/// Canvas size and view transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeta {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub zoom: f64,
    /// Screen-space offset: `screen = canvas * zoom + pan`
    pub pan: Point,
}

impl Default for PlanMeta {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            zoom: 1.0,
            pan: Point::default(),
        }
    }
}

impl PlanMeta {
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan.x,
            canvas.y * self.zoom + self.pan.y,
        )
    }
}

/// A complete seating chart.
///
/// `elements` order is paint order; the last element is on top and wins hit
/// tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPlan {
    pub id: PlanId,
    pub name: String,
    #[serde(default)]
    pub meta: PlanMeta,
    pub categories: BTreeMap<CategoryId, SeatCategory>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl SeatPlan {
    /// Empty plan with the stock categories
    pub fn new_default() -> Self {
        let categories = [
            SeatCategory::new("standard", "Standard", "#3b82f6"),
            SeatCategory::new("premium", "Premium", "#f59e0b"),
            SeatCategory::new("vip", "VIP", "#ef4444"),
        ];
        Self {
            id: PlanId::generate("plan"),
            name: "New plan".to_string(),
            meta: PlanMeta::default(),
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            elements: Vec::new(),
        }
    }

    /// Small theatre used for demos and tests
    pub fn sample() -> Self {
        let categories = [
            SeatCategory::new("orchestre", "Orchestre", "#3b82f6"),
            SeatCategory::new("balcon", "Balcon", "#f59e0b"),
            SeatCategory::new("loge", "Loge", "#ef4444"),
        ];

        let rows = [
            Row::new(
                ElementId::new("row-a"),
                "A",
                Point::new(100.0, 200.0),
                CategoryId::new("orchestre"),
            )
            .with_spacing(35.0)
            .with_seats(10),
            Row::new(
                ElementId::new("row-b"),
                "B",
                Point::new(80.0, 150.0),
                CategoryId::new("balcon"),
            )
            .with_spacing(35.0)
            .with_seats(12),
            Row::new(
                ElementId::new("row-vip"),
                "VIP",
                Point::new(300.0, 300.0),
                CategoryId::new("loge"),
            )
            .with_spacing(40.0)
            .with_seats(6)
            .with_curvature(15.0),
        ];

        let mut elements = Vec::new();
        for row in rows {
            let row = row.with_seat_size(30.0, 30.0);
            let mut seats = row.generate_seats(&[]);
            // A couple of seats per row are already sold
            for seat in seats.iter_mut().filter(|s| matches!(s.number, Some(3) | Some(8))) {
                seat.status = SeatStatus::Unavailable;
                seat.is_override = true;
            }
            elements.push(Element::Row(row));
            elements.extend(seats.into_iter().map(Element::Seat));
        }

        let mut stage = Zone::rect(
            ElementId::new("stage"),
            Point::new(400.0, 100.0),
            Point::new(700.0, 200.0),
            CategoryId::new("orchestre"),
        );
        stage.label = Some("Stage".to_string());
        stage.fill_color = Some("#f3f4f6".to_string());
        stage.stroke_color = Some("#6b7280".to_string());
        elements.push(Element::Zone(stage));

        let mut title = Text::new(ElementId::new("title"), "Salle principale", Point::new(400.0, 50.0));
        title.font_size = Some(24.0);
        elements.push(Element::Text(title));

        Self {
            id: PlanId::new("sample"),
            name: "Sample theatre".to_string(),
            meta: PlanMeta::default(),
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            elements,
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    pub fn row(&self, id: &ElementId) -> Option<&Row> {
        self.element(id).and_then(Element::as_row)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.elements.iter().filter_map(Element::as_row)
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.elements.iter().filter_map(Element::as_seat)
    }

    /// Derived seats of `row_id` in element order
    pub fn seats_of<'a>(&'a self, row_id: &ElementId) -> impl Iterator<Item = &'a Seat> + use<'a> {
        let row_id = row_id.clone();
        self.seats().filter(move |s| s.row_id.as_ref() == Some(&row_id))
    }

    /// Category new elements get by default
    pub fn first_category(&self) -> Option<&CategoryId> {
        self.categories.keys().next()
    }

    /// Check the structural invariants a loaded plan must satisfy
    pub fn validate(&self) -> Result<()> {
        for (key, category) in &self.categories {
            if *key != category.id {
                bail!("category {} is stored under key {}", category.id, key);
            }
        }

        let mut ids = HashSet::new();
        for element in &self.elements {
            if !ids.insert(element.id()) {
                bail!("duplicate element id {}", element.id());
            }
            if let Some(category) = element.category() {
                if !self.categories.contains_key(category) {
                    bail!("element {} references unknown category {}", element.id(), category);
                }
            }
        }

        let mut seat_counts: HashMap<&ElementId, u32> = HashMap::new();
        for element in &self.elements {
            match element {
                Element::Row(row) => {
                    if !(row.spacing.is_finite() && row.spacing > 0.0) {
                        bail!("row {} has invalid spacing {}", row.id, row.spacing);
                    }
                    if row.seat_count == 0 {
                        bail!("row {} has no seats", row.id);
                    }
                    if !row.origin.is_finite() {
                        bail!("row {} has a non-finite origin", row.id);
                    }
                }
                Element::Seat(seat) => {
                    let Some(row_id) = &seat.row_id else {
                        continue;
                    };
                    let Some(row) = self.row(row_id) else {
                        bail!("seat {} belongs to missing row {}", seat.id, row_id);
                    };
                    let number = match seat.number {
                        Some(n) if (1..=row.seat_count).contains(&n) => n,
                        _ => bail!("seat {} has number {:?} outside row {}", seat.id, seat.number, row.id),
                    };
                    if seat.id != row.seat_id(number) {
                        bail!("seat {} should be named {}", seat.id, row.seat_id(number));
                    }
                    *seat_counts.entry(row_id).or_default() += 1;
                }
                Element::Zone(zone) => {
                    if !zone.is_valid() {
                        bail!("zone {} has too few points for {:?}", zone.id, zone.shape);
                    }
                }
                Element::Text(_) => {}
            }
        }

        for row in self.rows() {
            let found = seat_counts.get(&row.id).copied().unwrap_or(0);
            if found != row.seat_count {
                bail!("row {} expects {} seats, found {}", row.id, row.seat_count, found);
            }
        }
        Ok(())
    }
}
