//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use seatplan_core::{CategoryDeletePolicy, PlanLimits, DEFAULT_FONT_SIZE, DEFAULT_SEAT_SIZE};

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Parameters for elements created by the placement tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementDefaults {
    pub row_spacing: f64,
    pub row_seat_count: u32,
    pub seat_size: f64,
    pub text: String,
    pub text_size: f64,
    pub font_family: String,
    pub text_color: String,
    /// Side length of a placed rect zone
    pub zone_size: f64,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            row_spacing: 25.0,
            row_seat_count: 10,
            seat_size: DEFAULT_SEAT_SIZE,
            text: "New text".to_string(),
            text_size: DEFAULT_FONT_SIZE,
            font_family: "Arial".to_string(),
            text_color: "#111827".to_string(),
            zone_size: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub history_limit: usize,
    pub limits: PlanLimits,
    /// Factor applied per zoom in/out step
    pub zoom_step: f64,
    pub placement: PlacementDefaults,
    pub category_delete_policy: CategoryDeletePolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            limits: PlanLimits::default(),
            zoom_step: 1.2,
            placement: PlacementDefaults::default(),
            category_delete_policy: CategoryDeletePolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: EditorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Replace nonsensical values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = EditorConfig::default();
        if self.history_limit == 0 {
            self.history_limit = defaults.history_limit;
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            self.zoom_step = defaults.zoom_step;
        }
        let limits = &mut self.limits;
        if !(limits.min_zoom > 0.0 && limits.min_zoom <= limits.max_zoom) {
            limits.min_zoom = defaults.limits.min_zoom;
            limits.max_zoom = defaults.limits.max_zoom;
        }
        let rows = &mut limits.rows;
        if !(rows.min_spacing > 0.0 && rows.min_spacing <= rows.max_spacing) {
            rows.min_spacing = defaults.limits.rows.min_spacing;
            rows.max_spacing = defaults.limits.rows.max_spacing;
        }
        if rows.min_seat_count == 0 || rows.min_seat_count > rows.max_seat_count {
            rows.min_seat_count = defaults.limits.rows.min_seat_count;
            rows.max_seat_count = defaults.limits.rows.max_seat_count;
        }
        if rows.max_curvature.is_nan() || rows.max_curvature < 0.0 {
            rows.max_curvature = defaults.limits.rows.max_curvature;
        }
        self
    }
}
