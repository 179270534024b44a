//! The live plan plus selection and modified flag.
//!
//! `PlanStore` is the single mutation path for a [`SeatPlan`]. Operations
//! never fail: unknown ids are ignored, numbers are clamped and structural
//! violations (moving a derived seat, deleting the last category) are
//! rejected with a `debug!` line. Nothing here touches undo history; the
//! session decides when an edit is complete.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use seatplan_geometry::Point;

use crate::bounds;
use crate::category::{CategoryDeletePolicy, CategoryPatch, SeatCategory};
use crate::element::{Element, ElementPatch, Seat};
use crate::ids::{CategoryId, ElementId};
use crate::plan::SeatPlan;
use crate::row::{Row, RowLimits, RowPatch};
use crate::selection::Selection;

/// Numeric bounds the store clamps to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanLimits {
    pub rows: RowLimits,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            rows: RowLimits::default(),
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanStore {
    plan: SeatPlan,
    selection: Selection,
    modified: bool,
    limits: PlanLimits,
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new(SeatPlan::new_default())
    }
}

impl PlanStore {
    pub fn new(plan: SeatPlan) -> Self {
        Self::with_limits(plan, PlanLimits::default())
    }

    pub fn with_limits(plan: SeatPlan, limits: PlanLimits) -> Self {
        Self {
            plan,
            selection: Selection::new(),
            modified: false,
            limits,
        }
    }

    /// Replace the document; selection and modified flag start fresh
    pub fn set_plan(&mut self, plan: SeatPlan) {
        debug!(plan = %plan.id, elements = plan.elements.len(), "set plan");
        self.plan = plan;
        self.selection.clear();
        self.modified = false;
    }

    /// Swap in a restored snapshot, keeping the current view
    pub fn restore(&mut self, mut plan: SeatPlan) {
        plan.meta.zoom = self.plan.meta.zoom;
        plan.meta.pan = self.plan.meta.pan;
        self.plan = plan;
        self.selection.clear();
        self.modified = true;
    }

    pub fn plan(&self) -> &SeatPlan {
        &self.plan
    }

    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    pub fn elements(&self) -> &[Element] {
        &self.plan.elements
    }

    pub fn categories(&self) -> impl Iterator<Item = &SeatCategory> {
        self.plan.categories.values()
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.plan.element(id)
    }

    pub fn row(&self, id: &ElementId) -> Option<&Row> {
        self.plan.row(id)
    }

    pub fn seats_of<'a>(&'a self, row_id: &ElementId) -> impl Iterator<Item = &'a Seat> + use<'a> {
        self.plan.seats_of(row_id)
    }

    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        bounds::hit_test(&self.plan, point)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ---------------------------------------------------------------
    // Elements
    // ---------------------------------------------------------------

    /// Append an element. Rows go through [`PlanStore::add_row`]; derived
    /// seats, duplicate ids and degenerate zones are rejected.
    pub fn add_element(&mut self, element: Element) -> bool {
        if self.plan.contains(element.id()) {
            debug!(id = %element.id(), "add rejected: duplicate id");
            return false;
        }
        match element {
            Element::Row(row) => self.add_row(row),
            Element::Seat(seat) if seat.is_derived() => {
                debug!(id = %seat.id, "add rejected: derived seats come from their row");
                false
            }
            Element::Zone(zone) if !zone.is_valid() => {
                debug!(id = %zone.id, "add rejected: degenerate zone");
                false
            }
            element => {
                debug!(id = %element.id(), kind = element.kind().name(), "add element");
                self.plan.elements.push(element);
                self.modified = true;
                true
            }
        }
    }

    /// Merge `patch` into a non-row element
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(index) = self.plan.position(id) else {
            debug!(%id, "update ignored: unknown id");
            return false;
        };
        let changed = match &mut self.plan.elements[index] {
            Element::Row(_) => {
                debug!(%id, "update ignored: rows are edited through update_row");
                false
            }
            Element::Seat(seat) => seat.apply_patch(patch),
            Element::Zone(zone) => zone.apply_patch(patch),
            Element::Text(text) => text.apply_patch(patch),
        };
        if changed {
            self.modified = true;
        }
        changed
    }

    /// Delete elements; rows take their seats along, derived seats of a
    /// surviving row are skipped. Returns how many elements were removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let requested: HashSet<&ElementId> = ids.iter().collect();
        let mut doomed: HashSet<ElementId> = HashSet::new();

        for id in ids {
            match self.plan.element(id) {
                Some(Element::Row(row)) => {
                    doomed.insert(row.id.clone());
                    doomed.extend(self.plan.seats_of(&row.id).map(|s| s.id.clone()));
                }
                Some(Element::Seat(Seat { row_id: Some(row_id), .. }))
                    if self.plan.contains(row_id) && !requested.contains(row_id) =>
                {
                    debug!(%id, row = %row_id, "delete skipped: seat belongs to a row");
                }
                Some(element) => {
                    doomed.insert(element.id().clone());
                }
                None => {}
            }
        }
        self.remove_all(&doomed)
    }

    /// Translate elements by `(dx, dy)`. Rows regenerate their seats; derived
    /// seats never move on their own.
    pub fn move_elements(&mut self, ids: &[ElementId], dx: f64, dy: f64) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            debug!(dx, dy, "move ignored: non-finite delta");
            return false;
        }
        let mut seen = HashSet::new();
        let mut moved_rows = Vec::new();
        let mut moved = false;

        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            let Some(index) = self.plan.position(id) else {
                continue;
            };
            match &mut self.plan.elements[index] {
                Element::Row(row) => moved_rows.push(row.clone()),
                Element::Seat(seat) if seat.is_derived() => {
                    trace!(%id, "move skipped: derived seat");
                }
                Element::Seat(seat) => {
                    seat.x += dx;
                    seat.y += dy;
                    moved = true;
                }
                Element::Zone(zone) => {
                    zone.translate(dx, dy);
                    moved = true;
                }
                Element::Text(text) => {
                    text.x += dx;
                    text.y += dy;
                    moved = true;
                }
            }
        }

        for old in moved_rows {
            let mut row = old.clone();
            row.origin = row.origin.translated(dx, dy);
            self.replace_row(&old, row);
            moved = true;
        }
        if moved {
            self.modified = true;
        }
        moved
    }

    // ---------------------------------------------------------------
    // Rows
    // ---------------------------------------------------------------

    /// Insert a row (clamped) followed by its generated seats
    pub fn add_row(&mut self, row: Row) -> bool {
        if self.plan.contains(&row.id) {
            debug!(id = %row.id, "add_row rejected: duplicate id");
            return false;
        }
        if !row.origin.is_finite() {
            debug!(id = %row.id, "add_row rejected: non-finite origin");
            return false;
        }
        let row = row.clamped(&self.limits.rows);
        let seats = row.generate_seats(&[]);
        debug!(id = %row.id, seats = seats.len(), "add row");

        // Stale seats claiming this row id would collide with the new set
        let row_id = row.id.clone();
        self.plan
            .elements
            .retain(|e| e.parent_row() != Some(&row_id));
        self.selection.retain(|id| !seats.iter().any(|s| &s.id == id));
        self.plan.elements.push(Element::Row(row));
        self.plan.elements.extend(seats.into_iter().map(Element::Seat));
        self.modified = true;
        true
    }

    /// Merge `patch` (clamped to the row limits) and regenerate the row's
    /// seats. Fields the patch leaves unset keep their current values.
    pub fn update_row(&mut self, id: &ElementId, patch: &RowPatch) -> bool {
        let Some(old) = self.plan.row(id).cloned() else {
            debug!(%id, "update_row ignored: not a row");
            return false;
        };
        let mut row = old.clone();
        row.apply_patch(&patch.clamped(&self.limits.rows));
        self.replace_row(&old, row);
        self.modified = true;
        true
    }

    /// Set a row to exactly `row` (id must match), regenerating seats
    pub fn replace_row_with(&mut self, row: Row) -> bool {
        let Some(old) = self.plan.row(&row.id).cloned() else {
            return false;
        };
        self.replace_row(&old, row);
        self.modified = true;
        true
    }

    pub fn delete_row(&mut self, id: &ElementId) -> bool {
        if self.plan.row(id).is_none() {
            debug!(%id, "delete_row ignored: not a row");
            return false;
        }
        self.delete_elements(std::slice::from_ref(id)) > 0
    }

    /// Bring a loaded plan back in line: derived seats whose row is gone are
    /// dropped and every row regenerates its seats. Returns how many
    /// dangling seats were removed.
    pub fn repair(&mut self) -> usize {
        let rows: HashSet<ElementId> = self.plan.rows().map(|r| r.id.clone()).collect();
        let before = self.plan.elements.len();
        self.plan
            .elements
            .retain(|e| e.parent_row().is_none_or(|row| rows.contains(row)));
        let dangling = before - self.plan.elements.len();

        let rows: Vec<Row> = self.plan.rows().cloned().collect();
        for row in rows {
            self.replace_row(&row, row.clone());
        }
        let plan = &self.plan;
        self.selection.retain(|id| plan.contains(id));
        if dangling > 0 {
            debug!(dangling, "dropped seats without a row");
        }
        self.modified = true;
        dangling
    }

    /// Swap `old`'s seats for a fresh set generated from `new`.
    ///
    /// The element vector is rebuilt and assigned once: the row keeps its
    /// slot, its seats follow it directly, overrides carry over by number.
    fn replace_row(&mut self, old: &Row, new: Row) {
        let new = new.sanitized();
        let overrides = old.seat_overrides(self.plan.seats_of(&old.id));
        let seats = new.generate_seats(&overrides);
        trace!(row = %new.id, seats = seats.len(), overrides = overrides.len(), "regenerate seats");

        let live: HashSet<&ElementId> = seats.iter().map(|s| &s.id).collect();
        let stale: HashSet<ElementId> = self
            .plan
            .seats_of(&old.id)
            .filter(|s| !live.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();
        self.selection.retain(|id| !stale.contains(id));

        let row_id = old.id.clone();
        let mut replacement = Some((new, seats));
        let mut elements = Vec::with_capacity(self.plan.elements.len());
        for element in std::mem::take(&mut self.plan.elements) {
            match element {
                Element::Seat(seat) if seat.row_id.as_ref() == Some(&row_id) => {}
                Element::Row(row) if row.id == row_id => {
                    if let Some((row, seats)) = replacement.take() {
                        elements.push(Element::Row(row));
                        elements.extend(seats.into_iter().map(Element::Seat));
                    }
                }
                element => elements.push(element),
            }
        }
        self.plan.elements = elements;
    }

    fn remove_all(&mut self, doomed: &HashSet<ElementId>) -> usize {
        if doomed.is_empty() {
            return 0;
        }
        let before = self.plan.elements.len();
        self.plan.elements.retain(|e| !doomed.contains(e.id()));
        self.selection.retain(|id| !doomed.contains(id));
        let removed = before - self.plan.elements.len();
        if removed > 0 {
            debug!(removed, "delete elements");
            self.modified = true;
        }
        removed
    }

    // ---------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------

    /// Insert or replace a category
    pub fn add_category(&mut self, category: SeatCategory) -> bool {
        debug!(id = %category.id, "add category");
        self.plan.categories.insert(category.id.clone(), category);
        self.modified = true;
        true
    }

    pub fn update_category(&mut self, id: &CategoryId, patch: &CategoryPatch) -> bool {
        let Some(category) = self.plan.categories.get_mut(id) else {
            debug!(%id, "update_category ignored: unknown id");
            return false;
        };
        category.apply_patch(patch);
        self.modified = true;
        true
    }

    /// Remove a category. The last category can never be deleted.
    pub fn delete_category(&mut self, id: &CategoryId, policy: CategoryDeletePolicy) -> bool {
        if !self.plan.categories.contains_key(id) {
            debug!(%id, "delete_category ignored: unknown id");
            return false;
        }
        if self.plan.categories.len() <= 1 {
            debug!(%id, "delete_category rejected: last category");
            return false;
        }
        self.plan.categories.remove(id);
        let Some(fallback) = self.plan.first_category().cloned() else {
            return false;
        };
        debug!(%id, ?policy, %fallback, "delete category");

        match policy {
            CategoryDeletePolicy::Reassign => {
                for element in &mut self.plan.elements {
                    match element {
                        Element::Row(row) if row.category == *id => row.category = fallback.clone(),
                        Element::Seat(seat) if seat.category == *id && !seat.is_derived() => {
                            seat.category = fallback.clone()
                        }
                        Element::Zone(zone) if zone.category == *id => zone.category = fallback.clone(),
                        _ => {}
                    }
                }
                self.reset_derived_seats(id, &fallback);
            }
            CategoryDeletePolicy::RemoveElements => {
                let doomed_rows: Vec<ElementId> = self
                    .plan
                    .rows()
                    .filter(|r| r.category == *id)
                    .map(|r| r.id.clone())
                    .collect();
                let mut doomed: HashSet<ElementId> = HashSet::new();
                for element in &self.plan.elements {
                    let hit = match element {
                        Element::Row(row) => row.category == *id,
                        Element::Seat(seat) => match &seat.row_id {
                            Some(row_id) => doomed_rows.contains(row_id),
                            None => seat.category == *id,
                        },
                        Element::Zone(zone) => zone.category == *id,
                        Element::Text(_) => false,
                    };
                    if hit {
                        doomed.insert(element.id().clone());
                    }
                }
                self.remove_all(&doomed);
                self.reset_derived_seats(id, &fallback);
            }
        }
        self.modified = true;
        true
    }

    /// Derived seats still in the deleted category `id` fall back to their
    /// row's category, or to `fallback` when the row is gone.
    fn reset_derived_seats(&mut self, id: &CategoryId, fallback: &CategoryId) {
        let row_categories: HashMap<ElementId, CategoryId> = self
            .plan
            .rows()
            .map(|r| (r.id.clone(), r.category.clone()))
            .collect();
        for element in &mut self.plan.elements {
            let Element::Seat(seat) = element else {
                continue;
            };
            if seat.category != *id {
                continue;
            }
            let row_category = seat.row_id.as_ref().and_then(|row_id| row_categories.get(row_id));
            seat.category = row_category.unwrap_or(fallback).clone();
        }
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection; unknown ids are dropped
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let plan = &self.plan;
        self.selection = ids.into_iter().filter(|id| plan.contains(id)).collect();
    }

    pub fn add_to_selection(&mut self, id: &ElementId) -> bool {
        self.plan.contains(id) && self.selection.insert(id.clone())
    }

    /// Flip `id` in the selection; returns whether it is now selected
    pub fn toggle_selection(&mut self, id: &ElementId) -> bool {
        if !self.plan.contains(id) {
            return false;
        }
        self.selection.toggle(id.clone())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select every top-level element: rows, zones, texts and orphan seats
    pub fn select_all(&mut self) {
        self.selection = self
            .plan
            .elements
            .iter()
            .filter(|e| !e.is_derived_seat())
            .map(|e| e.id().clone())
            .collect();
    }

    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selection
            .iter()
            .filter_map(|id| self.plan.element(id))
            .collect()
    }

    // ---------------------------------------------------------------
    // View
    // ---------------------------------------------------------------

    pub fn zoom(&self) -> f64 {
        self.plan.meta.zoom
    }

    pub fn pan(&self) -> Point {
        self.plan.meta.pan
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.plan.meta.zoom = zoom.min(self.limits.max_zoom).max(self.limits.min_zoom);
    }

    /// Multiply the zoom by `factor`, keeping the screen point `anchor` over
    /// the same canvas point
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && factor > 0.0 && anchor.is_finite()) {
            return;
        }
        let meta = &self.plan.meta;
        let canvas = meta.screen_to_canvas(anchor);
        let old = meta.zoom;
        self.set_zoom(old * factor);
        let new = self.plan.meta.zoom;
        self.plan.meta.pan = Point::new(anchor.x - canvas.x * new, anchor.y - canvas.y * new);
        trace!(old, new, "zoom");
    }

    /// Shift the view by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.plan.meta.pan = self.plan.meta.pan.translated(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.plan.meta.zoom = 1.0;
        self.plan.meta.pan = Point::default();
    }
}
