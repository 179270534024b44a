//! Editing session for seatplan.
//!
//! [`Editor`] owns a [`seatplan_core::PlanStore`], the undo [`History`] and
//! the tool/gesture state. Input layers feed it clicks, pointer drags, keys
//! and transform results; renderers read the store back out.

pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod tool;
pub mod transform;

pub use config::{EditorConfig, PlacementDefaults};
pub use editor::{Editor, Gesture};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use input::{Click, Key, KeyInput, Modifiers, Wheel};
pub use tool::Tool;
pub use transform::{
    affordance, resolve, ResizeMode, TransformAffordance, TransformGesture, TransformResolution,
};
