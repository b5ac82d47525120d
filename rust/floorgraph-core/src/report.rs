use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::FloorError;
use crate::merge::{NodeCollision, WeightStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorSummary {
    pub floor: String,
    pub rooms: usize,
    pub nodes: usize,
    pub connectors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorIssue {
    pub floor: String,
    pub code: &'static str,
    pub message: String,
}

impl FloorIssue {
    pub fn new(floor: &str, err: &FloorError) -> Self {
        Self { floor: floor.to_string(), code: err.code(), message: err.to_string() }
    }
}

/// End-of-run diagnostics: what was merged, what was left out and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub processed: Vec<FloorSummary>,
    pub skipped: Vec<FloorIssue>,
    pub failed: Vec<FloorIssue>,
    pub collisions: Vec<NodeCollision>,
    pub weights: WeightStats,
}

impl RunReport {
    /// `floor` is the floor key, or the building code for a building that
    /// could not be read at all.
    pub fn record_error(&mut self, floor: impl fmt::Display, err: &FloorError) {
        let issue = FloorIssue::new(&floor.to_string(), err);
        if err.is_skip() {
            warn!(%floor, reason = %err, "skipping floor");
            self.skipped.push(issue);
        } else {
            warn!(%floor, error = %err, "floor failed");
            self.failed.push(issue);
        }
    }

    /// True when every floor handed in was merged.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }

    pub fn log(&self) {
        let left_out: Vec<&str> = self.skipped.iter().chain(&self.failed).map(|i| i.floor.as_str()).collect();
        if !left_out.is_empty() {
            warn!(floors = ?left_out, "floors left out of the merged graph");
        }
        info!(
            processed = self.processed.len(),
            skipped = self.skipped.len(),
            failed = self.failed.len(),
            collisions = self.collisions.len(),
            geodesic = self.weights.geodesic,
            vertical = self.weights.vertical,
            intra_floor = self.weights.intra_floor,
            unresolved = self.weights.unresolved,
            "run finished"
        );
    }
}
