//! The editor session: tool state, gestures and committed edits.
//!
//! `Editor` owns the plan store and its history. Every completed edit
//! (placement, drag release, transform end, inspector change, delete)
//! pushes exactly one snapshot. Provisional drag moves go straight to the
//! store and are committed on pointer up.

use tracing::{debug, trace, warn};

use seatplan_core::{
    elements_in_rect, CategoryId, CategoryPatch, Element, ElementId, ElementPatch, PlanStore,
    Point, Rect, Row, RowPatch, SeatCategory, SeatPlan, Text, Zone,
};

use crate::config::EditorConfig;
use crate::history::History;
use crate::input::{Click, Key, KeyInput, Modifiers, Wheel};
use crate::tool::Tool;
use crate::transform::{self, TransformAffordance, TransformGesture, TransformResolution};

/// Pointer gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Dragging the selection; positions are canvas coordinates
    Move {
        ids: Vec<ElementId>,
        last: Point,
        moved: bool,
    },
    /// Rubber-band selection in canvas coordinates
    Marquee {
        start: Point,
        current: Point,
        additive: bool,
    },
    /// Dragging the view; screen coordinates
    Pan { last: Point },
}

pub struct Editor {
    store: PlanStore,
    history: History,
    tool: Tool,
    gesture: Option<Gesture>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_plan(SeatPlan::new_default(), config)
    }

    pub fn with_plan(plan: SeatPlan, config: EditorConfig) -> Self {
        let mut editor = Self {
            store: PlanStore::with_limits(SeatPlan::new_default(), config.limits.clone()),
            history: History::new(config.history_limit),
            tool: Tool::Select,
            gesture: None,
            config,
        };
        editor.set_plan(plan);
        editor
    }

    /// Load a new document; history starts over from it
    pub fn set_plan(&mut self, plan: SeatPlan) {
        self.store.set_plan(plan);
        if let Err(err) = self.history.reset(self.store.plan()) {
            warn!("could not seed history: {err:#}");
        }
        self.tool = Tool::Select;
        self.gesture = None;
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    pub fn plan(&self) -> &SeatPlan {
        self.store.plan()
    }

    pub fn selection(&self) -> &[ElementId] {
        self.store.selection().as_slice()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_modified(&self) -> bool {
        self.store.is_modified()
    }

    pub fn mark_saved(&mut self) {
        self.store.mark_saved();
    }

    fn to_canvas(&self, screen: Point) -> Point {
        self.store.plan().meta.screen_to_canvas(screen)
    }

    fn commit(&mut self, what: &str) {
        debug!(what, "commit");
        if let Err(err) = self.history.push(self.store.plan()) {
            warn!(what, "could not record history: {err:#}");
        }
    }

    // ---------------------------------------------------------------
    // Tools and clicks
    // ---------------------------------------------------------------

    /// Switch tools; leaving `select` drops the selection
    pub fn set_tool(&mut self, tool: Tool) {
        trace!(tool = tool.name(), "set tool");
        if tool != Tool::Select {
            self.store.clear_selection();
        }
        self.cancel_gesture();
        self.tool = tool;
    }

    pub fn click(&mut self, click: &Click) {
        match self.tool {
            Tool::Select => self.select_click(click),
            Tool::Pan => {}
            tool => self.place(tool, self.to_canvas(click.pos)),
        }
    }

    fn select_click(&mut self, click: &Click) {
        let toggle = click.modifiers.toggles();
        let target = match &click.target {
            Some(id) => self.store.element(id),
            None => self.store.hit_test(self.to_canvas(click.pos)),
        };
        let Some(target) = target else {
            if !toggle {
                self.store.clear_selection();
            }
            return;
        };

        let id = target.id().clone();
        let parent = target
            .parent_row()
            .filter(|row| self.store.row(row).is_some())
            .cloned();

        match parent {
            Some(_) if click.count >= 2 => self.store.set_selection([id]),
            Some(row) if toggle => {
                self.store.toggle_selection(&row);
            }
            Some(row) => self.store.set_selection([row]),
            None if toggle => {
                self.store.toggle_selection(&id);
            }
            None => self.store.set_selection([id]),
        }
    }

    /// Select exactly `id`, bypassing the seat-to-row redirect
    pub fn direct_select(&mut self, id: &ElementId) {
        if self.store.element(id).is_some() {
            self.store.set_selection([id.clone()]);
        }
    }

    pub fn select_all(&mut self) {
        self.store.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    /// Drop the selection and any gesture, back to the select tool
    pub fn escape(&mut self) {
        self.store.clear_selection();
        self.cancel_gesture();
        self.tool = Tool::Select;
    }

    fn place(&mut self, tool: Tool, at: Point) {
        let Some(category) = self.store.plan().first_category().cloned() else {
            debug!("placement skipped: plan has no categories");
            return;
        };
        let defaults = &self.config.placement;
        let element = match tool {
            Tool::AddRow => {
                let label = row_label(self.store.plan().rows().count());
                let row = Row::new(ElementId::generate("row"), label, at, category)
                    .with_spacing(defaults.row_spacing)
                    .with_seats(defaults.row_seat_count)
                    .with_seat_size(defaults.seat_size, defaults.seat_size);
                Element::Row(row)
            }
            Tool::AddText => {
                let mut text = Text::new(ElementId::generate("text"), defaults.text.clone(), at);
                text.font_size = Some(defaults.text_size);
                text.font_family = Some(defaults.font_family.clone());
                text.color = Some(defaults.text_color.clone());
                Element::Text(text)
            }
            Tool::AddZone => {
                let half = defaults.zone_size / 2.0;
                Element::Zone(Zone::rect(
                    ElementId::generate("zone"),
                    at.translated(-half, -half),
                    at.translated(half, half),
                    category,
                ))
            }
            Tool::Select | Tool::Pan => return,
        };

        let id = element.id().clone();
        if !self.store.add_element(element) {
            return;
        }
        self.commit(tool.name());
        self.tool = Tool::Select;
        self.store.set_selection([id]);
    }

    // ---------------------------------------------------------------
    // Pointer gestures
    // ---------------------------------------------------------------

    /// Start a gesture; returns whether one began
    pub fn pointer_down(&mut self, pos: Point, modifiers: Modifiers) -> bool {
        self.cancel_gesture();
        match self.tool {
            Tool::Pan => {
                self.gesture = Some(Gesture::Pan { last: pos });
                true
            }
            Tool::Select => {
                let canvas = self.to_canvas(pos);
                match self.store.hit_test(canvas) {
                    Some(hit) => {
                        if !self.can_drag(hit) {
                            trace!(id = %hit.id(), "drag rejected: target not selected");
                            return false;
                        }
                        self.gesture = Some(Gesture::Move {
                            ids: self.store.selection().to_vec(),
                            last: canvas,
                            moved: false,
                        });
                        true
                    }
                    None => {
                        self.gesture = Some(Gesture::Marquee {
                            start: canvas,
                            current: canvas,
                            additive: modifiers.toggles(),
                        });
                        true
                    }
                }
            }
            _ => false,
        }
    }

    /// A selected element, or a seat whose row is selected
    fn can_drag(&self, element: &Element) -> bool {
        let selection = self.store.selection();
        match element.parent_row() {
            Some(row) => selection.contains(row),
            None => selection.contains(element.id()),
        }
    }

    pub fn pointer_move(&mut self, pos: Point) {
        let canvas = self.to_canvas(pos);
        match &mut self.gesture {
            Some(Gesture::Move { ids, last, moved }) => {
                let (dx, dy) = (canvas.x - last.x, canvas.y - last.y);
                if dx == 0.0 && dy == 0.0 {
                    return;
                }
                *last = canvas;
                if self.store.move_elements(ids, dx, dy) {
                    *moved = true;
                }
            }
            Some(Gesture::Marquee { current, .. }) => *current = canvas,
            Some(Gesture::Pan { last }) => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                *last = pos;
                self.store.pan_by(dx, dy);
            }
            None => {}
        }
    }

    /// Finish the gesture; a drag that moved anything records one history entry
    pub fn pointer_up(&mut self, pos: Point) {
        self.pointer_move(pos);
        match self.gesture.take() {
            Some(Gesture::Move { moved: true, .. }) => self.commit("move"),
            Some(Gesture::Marquee {
                start,
                current,
                additive,
            }) => self.finish_marquee(Rect::from_corners(start, current), additive),
            _ => {}
        }
    }

    fn finish_marquee(&mut self, area: Rect, additive: bool) {
        let mut hits: Vec<ElementId> = Vec::new();
        for element in elements_in_rect(self.store.plan(), &area) {
            // Seats stand in for their row
            let id = match element.parent_row() {
                Some(row) if self.store.row(row).is_some() => row,
                _ => element.id(),
            };
            if !hits.contains(id) {
                hits.push(id.clone());
            }
        }
        trace!(hits = hits.len(), additive, "marquee");

        if additive {
            for id in &hits {
                self.store.add_to_selection(id);
            }
        } else if hits.is_empty() {
            self.store.clear_selection();
        } else {
            self.store.set_selection(hits);
        }
    }

    /// Marquee rectangle in canvas coordinates while one is being dragged
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Some(Gesture::Marquee { start, current, .. }) => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }

    /// Abandon the current gesture. An uncommitted drag is rolled back to
    /// the last history entry.
    pub fn cancel_gesture(&mut self) {
        if let Some(Gesture::Move { moved: true, .. }) = self.gesture.take() {
            match self.history.current() {
                Some(plan) => {
                    let selection = self.store.selection().to_vec();
                    self.store.restore(plan);
                    self.store.set_selection(selection);
                }
                None => warn!("drag cancelled without a snapshot to return to"),
            }
        }
    }

    // ---------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------

    pub fn affordance(&self) -> TransformAffordance {
        transform::affordance(&self.store.selected_elements())
    }

    /// Apply the end state of a transform handle to each node; one history
    /// entry for the whole batch
    pub fn transform_end(&mut self, nodes: &[(ElementId, TransformGesture)]) -> bool {
        let mut changed = false;
        for (id, gesture) in nodes {
            let Some(element) = self.store.element(id) else {
                continue;
            };
            changed |= match transform::resolve(element, gesture) {
                TransformResolution::Row(patch) => self.store.update_row(id, &patch),
                TransformResolution::Element(patch) => self.store.update_element(id, &patch),
                TransformResolution::Ignored => {
                    trace!(%id, "transform ignored");
                    false
                }
            };
        }
        if changed {
            self.commit("transform");
        }
        changed
    }

    // ---------------------------------------------------------------
    // Committed edits
    // ---------------------------------------------------------------

    pub fn delete_selection(&mut self) -> usize {
        let ids = self.store.selection().to_vec();
        let removed = self.store.delete_elements(&ids);
        if removed > 0 {
            self.commit("delete");
        }
        removed
    }

    pub fn add_element(&mut self, element: Element) -> bool {
        let added = self.store.add_element(element);
        if added {
            self.commit("add element");
        }
        added
    }

    pub fn edit_row(&mut self, id: &ElementId, patch: &RowPatch) -> bool {
        let changed = self.store.update_row(id, patch);
        if changed {
            self.commit("edit row");
        }
        changed
    }

    pub fn edit_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let changed = self.store.update_element(id, patch);
        if changed {
            self.commit("edit element");
        }
        changed
    }

    pub fn add_category(&mut self, category: SeatCategory) -> bool {
        let added = self.store.add_category(category);
        if added {
            self.commit("add category");
        }
        added
    }

    pub fn edit_category(&mut self, id: &CategoryId, patch: &CategoryPatch) -> bool {
        let changed = self.store.update_category(id, patch);
        if changed {
            self.commit("edit category");
        }
        changed
    }

    /// Delete a category using the configured policy
    pub fn delete_category(&mut self, id: &CategoryId) -> bool {
        let deleted = self
            .store
            .delete_category(id, self.config.category_delete_policy);
        if deleted {
            self.commit("delete category");
        }
        deleted
    }

    // ---------------------------------------------------------------
    // History
    // ---------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.undo() {
            Some(plan) => {
                self.store.restore(plan);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.redo() {
            Some(plan) => {
                self.store.restore(plan);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------
    // View
    // ---------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        let zoom = self.store.zoom() * self.config.zoom_step;
        self.store.set_zoom(zoom);
    }

    pub fn zoom_out(&mut self) {
        let zoom = self.store.zoom() / self.config.zoom_step;
        self.store.set_zoom(zoom);
    }

    pub fn reset_zoom(&mut self) {
        self.store.set_zoom(1.0);
    }

    /// Shift or the pan tool scrolls the view; otherwise zoom toward the
    /// pointer
    pub fn wheel(&mut self, wheel: &Wheel) {
        if wheel.modifiers.shift || self.tool == Tool::Pan {
            self.store.pan_by(-wheel.delta_x, -wheel.delta_y);
            return;
        }
        let factor = if wheel.delta_y < 0.0 {
            self.config.zoom_step
        } else if wheel.delta_y > 0.0 {
            1.0 / self.config.zoom_step
        } else {
            return;
        };
        self.store.zoom_by(factor, wheel.pos);
    }

    // ---------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------

    /// Run the shortcut bound to `input`; returns whether one matched
    pub fn handle_key(&mut self, input: KeyInput) -> bool {
        let mods = input.modifiers;
        match input.key {
            Key::Char(c) if mods.command() => match c.to_ascii_lowercase() {
                'z' if mods.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                'a' => {
                    self.select_all();
                    true
                }
                '+' | '=' => {
                    self.zoom_in();
                    true
                }
                '-' => {
                    self.zoom_out();
                    true
                }
                '0' => {
                    self.reset_zoom();
                    true
                }
                _ => false,
            },
            Key::Char(c) if !mods.alt => match Tool::from_shortcut(c) {
                Some(tool) => {
                    self.set_tool(tool);
                    true
                }
                None => false,
            },
            Key::Char(_) => false,
            Key::Delete | Key::Backspace => {
                self.delete_selection();
                true
            }
            Key::Escape => {
                self.escape();
                true
            }
        }
    }
}

/// Spreadsheet-style row label for the `index`-th row: A..Z, AA, AB, ...
pub fn row_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
