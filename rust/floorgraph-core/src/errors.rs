use thiserror::Error;

use crate::models::FloorId;

/// Why a floor did not make it into the merged outputs.
///
/// None of these abort a run: the pipeline records the floor in its
/// [`RunReport`](crate::report::RunReport) and moves on to the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FloorError {
    #[error("no placements for building {building_code}")]
    MissingBuilding { building_code: String },
    #[error("no placement for level {} of building {}", .floor.level, .floor.building_code)]
    MissingLevel { floor: FloorId },
    #[error("floor {floor} has no room vertices to center on")]
    EmptyRoomSet { floor: FloorId },
    #[error("node {node_id} on floor {floor} was already merged from floor {existing}")]
    DuplicateNode { node_id: String, floor: FloorId, existing: FloorId },
    #[error("malformed {what} for floor {floor}: {reason}")]
    MalformedInput { floor: FloorId, what: &'static str, reason: String },
    #[error("building directory {building_code} could not be read: {reason}")]
    UnreadableBuilding { building_code: String, reason: String },
}

impl FloorError {
    pub fn malformed(floor: &FloorId, what: &'static str, reason: impl Into<String>) -> Self {
        FloorError::MalformedInput { floor: floor.clone(), what, reason: reason.into() }
    }

    /// Missing placements are the expected way for a floor to drop out; the
    /// rest indicate bad data.
    pub fn is_skip(&self) -> bool {
        matches!(self, FloorError::MissingBuilding { .. } | FloorError::MissingLevel { .. })
    }

    pub fn code(&self) -> &'static str {
        match self {
            FloorError::MissingBuilding { .. } | FloorError::MissingLevel { .. } => "missing_placement",
            FloorError::EmptyRoomSet { .. } => "empty_room_set",
            FloorError::DuplicateNode { .. } => "duplicate_node",
            FloorError::MalformedInput { .. } => "malformed_input",
            FloorError::UnreadableBuilding { .. } => "unreadable_building",
        }
    }
}

/// Pipeline options that would poison every coordinate or distance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("{name} must be a finite number above zero, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
    #[error("vertical_connector_distance must be finite, got {0}")]
    InvalidVerticalDistance(f64),
}
