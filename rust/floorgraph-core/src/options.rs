use serde::{Deserialize, Serialize};

use crate::errors::OptionsError;
use crate::geometry::GeoRatios;

/// Written in place of a distance on same-building edges between different
/// levels. Never a real measurement: real distances are non-negative.
pub const VERTICAL_CONNECTOR_DISTANCE: f64 = -1.0;

/// What to do when two floors contribute the same node id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later floor replaces the earlier node; the collision is logged and reported.
    #[default]
    LastWriteWins,
    /// The floor introducing a duplicate is rejected as a whole.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub ratios: GeoRatios,
    pub vertical_connector_distance: f64,
    pub duplicate_nodes: DuplicatePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            ratios: GeoRatios::default(),
            vertical_connector_distance: VERTICAL_CONNECTOR_DISTANCE,
            duplicate_nodes: DuplicatePolicy::default(),
        }
    }
}

impl PipelineOptions {
    /// Ratios must be finite and positive, the sentinel finite.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in [
            ("ratios.latitude_m_per_deg", self.ratios.latitude_m_per_deg),
            ("ratios.longitude_m_per_deg", self.ratios.longitude_m_per_deg),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OptionsError::InvalidRatio { name, value });
            }
        }
        if !self.vertical_connector_distance.is_finite() {
            return Err(OptionsError::InvalidVerticalDistance(self.vertical_connector_distance));
        }
        Ok(())
    }
}
