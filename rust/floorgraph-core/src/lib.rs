pub mod connectivity;
pub mod errors;
pub mod floor_center;
pub mod geometry;
pub mod merge;
pub mod models;
pub mod options;
pub mod pipeline;
pub mod placements;
pub mod report;
pub mod rooms;
pub mod transform;

pub use connectivity::FloorConnectivity;
pub use errors::{FloorError, OptionsError};
pub use geometry::{geodesic_distance, position_on_map, rotate, GeoRatios};
pub use merge::GlobalGraph;
pub use models::{ConnectorType, Edge, FloorGraph, FloorId, GeoCoordinate, GraphNode, LocalPoint, Outline, Placement, Room};
pub use options::{DuplicatePolicy, PipelineOptions, VERTICAL_CONNECTOR_DISTANCE};
pub use pipeline::{FloorInput, Pipeline, PipelineOutput};
pub use placements::Placements;
pub use report::RunReport;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
