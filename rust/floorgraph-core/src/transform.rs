use tracing::debug;

use crate::connectivity::FloorConnectivity;
use crate::errors::FloorError;
use crate::geometry::{position_on_map, GeoRatios};
use crate::models::{FloorGraph, FloorId, LocalPoint, Placement};

/// Counts from one floor's transform pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloorTransformStats {
    pub nodes: usize,
    pub edges: usize,
    pub connectors: usize,
}

/// Annotates every node of `graph` in place with its map coordinate, floor and
/// id, and registers each inter-floor edge in `connectivity`.
///
/// Fails if a connector names a target that is not a `BUILDING-LEVEL` floor
/// key; `graph` and `connectivity` may then be partly written.
pub fn transform_floor(
    floor: &FloorId,
    graph: &mut FloorGraph,
    placement: &Placement,
    floor_center: LocalPoint,
    ratios: &GeoRatios,
    connectivity: &mut FloorConnectivity,
) -> Result<FloorTransformStats, FloorError> {
    let floor_key = floor.to_string();
    let mut stats = FloorTransformStats::default();

    for (node_id, node) in graph.iter_mut() {
        node.coordinate = Some(position_on_map(node.pos, placement, floor_center, ratios));
        node.floor = Some(floor.clone());
        node.id = Some(node_id.clone());
        stats.nodes += 1;

        for (neighbor_id, edge) in &node.neighbors {
            stats.edges += 1;
            let Some(info) = &edge.to_floor_info else { continue };
            info.to_floor.parse::<FloorId>().map_err(|e| {
                FloorError::malformed(floor, "connector", format!("{} (node {} -> {})", e, node_id, neighbor_id))
            })?;
            debug!(node = %node_id, neighbor = %neighbor_id, to_floor = %info.to_floor, kind = %info.kind, "connector");
            connectivity.register(&floor_key, &info.to_floor, &info.kind);
            stats.connectors += 1;
        }
    }
    Ok(stats)
}
