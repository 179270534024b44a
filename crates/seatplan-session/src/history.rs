//! Undo/redo over serialized plan snapshots.
//!
//! Every entry is a full `SeatPlan` encoded with MessagePack. Entries are a
//! single linear list with a cursor: pushing after an undo drops the redo
//! branch, and the oldest entries fall off once the limit is reached.

use anyhow::{Context, Result};
use tracing::{trace, warn};

use seatplan_core::SeatPlan;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear snapshot history
#[derive(Debug, Clone)]
pub struct History {
    /// Encoded plans, oldest first
    entries: Vec<Vec<u8>>,
    /// Entry matching the live plan
    index: usize,
    /// Maximum number of entries
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    fn encode(plan: &SeatPlan) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(plan).context("failed to encode plan snapshot")
    }

    fn decode(bytes: &[u8]) -> Result<SeatPlan> {
        rmp_serde::from_slice(bytes).context("failed to decode plan snapshot")
    }

    /// Start over with `plan` as the only entry
    pub fn reset(&mut self, plan: &SeatPlan) -> Result<()> {
        let bytes = Self::encode(plan)?;
        self.entries.clear();
        self.entries.push(bytes);
        self.index = 0;
        Ok(())
    }

    /// Record `plan` as the newest state, discarding anything redoable
    pub fn push(&mut self, plan: &SeatPlan) -> Result<()> {
        let bytes = Self::encode(plan)?;
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(bytes);

        let overflow = self.entries.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.entries.drain(..overflow);
        }
        self.index = self.entries.len() - 1;
        trace!(index = self.index, len = self.entries.len(), "history push");
        Ok(())
    }

    /// Step back; `None` at the oldest entry
    pub fn undo(&mut self) -> Option<SeatPlan> {
        if !self.can_undo() {
            return None;
        }
        let plan = self.load(self.index - 1)?;
        self.index -= 1;
        Some(plan)
    }

    /// Step forward; `None` at the newest entry
    pub fn redo(&mut self) -> Option<SeatPlan> {
        if !self.can_redo() {
            return None;
        }
        let plan = self.load(self.index + 1)?;
        self.index += 1;
        Some(plan)
    }

    /// Snapshot at the cursor, the last committed state
    pub fn current(&self) -> Option<SeatPlan> {
        self.load(self.index)
    }

    fn load(&self, index: usize) -> Option<SeatPlan> {
        let bytes = self.entries.get(index)?;
        match Self::decode(bytes) {
            Ok(plan) => Some(plan),
            Err(err) => {
                warn!(index, "history snapshot unreadable: {err:#}");
                None
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
