use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;

/// Pricing/area category that seats, rows and zones point at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatCategory {
    pub id: CategoryId,
    pub label: String,
    /// CSS colour, e.g. `#3b82f6`
    pub color: String,
}

impl SeatCategory {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Partial update for a category; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub label: Option<String>,
    pub color: Option<String>,
}

impl SeatCategory {
    pub fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
    }
}

/// What happens to elements that reference a deleted category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryDeletePolicy {
    /// Move referencing elements to the first remaining category
    #[default]
    Reassign,
    /// Delete referencing rows, zones and orphan seats outright
    RemoveElements,
}
