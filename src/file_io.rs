//! Plan files on disk.
//!
//! A plan file is the `SeatPlan` serialized verbatim as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use seatplan_core::SeatPlan;

/// Read a plan without checking its invariants; callers decide whether to
/// `validate` it
pub fn read_plan(path: &Path) -> Result<SeatPlan> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read from {:?}", path))?;
    let plan = serde_json::from_str(&content)
        .with_context(|| format!("{:?} is not a seat plan", path))?;
    Ok(plan)
}

pub fn save_plan(plan: &SeatPlan, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(plan)?;
    fs::write(path, content).with_context(|| format!("Failed to save to {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let plan = SeatPlan::sample();
        save_plan(&plan, &path).unwrap();

        let loaded = read_plan(&path).unwrap();
        loaded.validate().unwrap();
        assert_eq!(loaded.name, plan.name);
        assert_eq!(loaded.elements.len(), plan.elements.len());
    }

    #[test]
    fn broken_plans_load_but_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut plan = SeatPlan::sample();
        plan.elements.retain(|e| e.id().as_str() != "row-a-seat-2");
        save_plan(&plan, &path).unwrap();

        let loaded = read_plan(&path).unwrap();
        let err = loaded.validate().unwrap_err();
        assert!(format!("{err:#}").contains("row-a"));
    }

    #[test]
    fn garbage_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_plan(&path).unwrap_err();
        assert!(err.to_string().contains("is not a seat plan"));
    }
}
