//! Input events the editor consumes.
//!
//! Positions are screen coordinates; the editor maps them to canvas space
//! with the plan's current zoom and pan.

use seatplan_core::{ElementId, Point};

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn ctrl_shift() -> Self {
        Self {
            shift: true,
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl or Cmd
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Modifiers that toggle membership instead of replacing the selection
    pub fn toggles(&self) -> bool {
        self.command() || self.shift
    }
}

/// A completed click
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub pos: Point,
    /// Element under the pointer if the caller already knows it
    pub target: Option<ElementId>,
    /// 1 for a single click, 2 for a double click
    pub count: u32,
    pub modifiers: Modifiers,
}

impl Click {
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            target: None,
            count: 1,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn double(mut self) -> Self {
        self.count = 2;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Scroll wheel / trackpad event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    pub pos: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
}
