use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::FloorError;
use crate::geometry::{geodesic_distance, GeoRatios};
use crate::models::{FloorGraph, FloorId, GraphNode};
use crate::options::DuplicatePolicy;

/// A node id contributed by more than one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeCollision {
    pub node_id: String,
    pub replaced: Option<FloorId>,
    pub by: FloorId,
}

/// Counts from one weighting pass, by the branch each edge took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeightStats {
    pub unresolved: usize,
    pub intra_floor: usize,
    pub vertical: usize,
    pub geodesic: usize,
}

/// How the weighting pass treats one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeWeight {
    /// Target missing, or either end lacks a floor or coordinate.
    Unresolved,
    /// Same floor: the survey distance stands.
    IntraFloor,
    /// Same building, different level.
    Vertical,
    Geodesic(f64),
}

fn classify(node: &GraphNode, neighbor: Option<&GraphNode>, ratios: &GeoRatios) -> EdgeWeight {
    let Some(neighbor) = neighbor else { return EdgeWeight::Unresolved };
    let (Some(from), Some(to)) = (&node.floor, &neighbor.floor) else { return EdgeWeight::Unresolved };
    if from == to {
        return EdgeWeight::IntraFloor;
    }
    if from.same_building(to) {
        return EdgeWeight::Vertical;
    }
    match (node.coordinate, neighbor.coordinate) {
        (Some(a), Some(b)) => EdgeWeight::Geodesic(geodesic_distance(a, b, ratios)),
        _ => EdgeWeight::Unresolved,
    }
}

/// Every floor's nodes in one map keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalGraph(IndexMap<String, GraphNode>);

impl GlobalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one transformed floor into the graph.
    ///
    /// With [`DuplicatePolicy::Reject`] a floor that reuses an existing id is
    /// refused before any of its nodes are merged. Otherwise later floors win
    /// and every overwritten id is returned.
    pub fn absorb(
        &mut self,
        floor: &FloorId,
        graph: FloorGraph,
        policy: DuplicatePolicy,
    ) -> Result<Vec<NodeCollision>, FloorError> {
        if policy == DuplicatePolicy::Reject {
            if let Some((id, existing)) = graph.keys().find_map(|id| self.0.get(id).map(|n| (id, n))) {
                return Err(FloorError::DuplicateNode {
                    node_id: id.clone(),
                    floor: floor.clone(),
                    existing: existing.floor.clone().unwrap_or_else(|| floor.clone()),
                });
            }
        }

        let mut collisions = Vec::new();
        for (id, node) in graph {
            if let Some(old) = self.0.insert(id.clone(), node) {
                warn!(node = %id, %floor, replaced = ?old.floor, "node id collision, keeping the later floor");
                collisions.push(NodeCollision { node_id: id, replaced: old.floor, by: floor.clone() });
            }
        }
        Ok(collisions)
    }

    /// Rewrites edge distances over the fully merged graph.
    ///
    /// * target not in the graph: distance left as found
    /// * same floor: distance left as found
    /// * same building, other level: set to `vertical_distance`
    /// * otherwise: geodesic distance between the two map coordinates
    pub fn apply_weights(&mut self, ratios: &GeoRatios, vertical_distance: f64) -> WeightStats {
        let mut stats = WeightStats::default();
        let mut updates: Vec<(usize, usize, f64)> = Vec::new();

        for (ni, node) in self.0.values().enumerate() {
            for (ei, neighbor_id) in node.neighbors.keys().enumerate() {
                match classify(node, self.0.get(neighbor_id), ratios) {
                    EdgeWeight::Unresolved => {
                        debug!(node = ?node.id, neighbor = %neighbor_id, "leaving unresolved edge as is");
                        stats.unresolved += 1;
                    }
                    EdgeWeight::IntraFloor => stats.intra_floor += 1,
                    EdgeWeight::Vertical => {
                        stats.vertical += 1;
                        updates.push((ni, ei, vertical_distance));
                    }
                    EdgeWeight::Geodesic(d) => {
                        stats.geodesic += 1;
                        updates.push((ni, ei, d));
                    }
                }
            }
        }

        for (ni, ei, dist) in updates {
            if let Some((_, node)) = self.0.get_index_mut(ni) {
                if let Some((_, edge)) = node.neighbors.get_index_mut(ei) {
                    edge.dist = dist;
                }
            }
        }
        stats
    }

    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.0.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&String, &GraphNode)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, GeoCoordinate, LocalPoint};

    fn node(floor: &FloorId, id: &str, coord: GeoCoordinate) -> GraphNode {
        let mut n = GraphNode::new(LocalPoint::default());
        n.floor = Some(floor.clone());
        n.id = Some(id.to_string());
        n.coordinate = Some(coord);
        n
    }

    fn floor_graph(nodes: Vec<GraphNode>) -> FloorGraph {
        nodes.into_iter().map(|n| (n.id.clone().unwrap(), n)).collect()
    }

    #[test]
    fn last_write_wins_reports_collisions() {
        let f1 = FloorId::new("A", "1");
        let f2 = FloorId::new("A", "2");
        let mut g = GlobalGraph::new();
        g.absorb(&f1, floor_graph(vec![node(&f1, "x", GeoCoordinate::default())]), DuplicatePolicy::LastWriteWins)
            .unwrap();
        let collisions = g
            .absorb(&f2, floor_graph(vec![node(&f2, "x", GeoCoordinate::default())]), DuplicatePolicy::LastWriteWins)
            .unwrap();
        assert_eq!(collisions, vec![NodeCollision { node_id: "x".into(), replaced: Some(f1), by: f2.clone() }]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.get("x").unwrap().floor.as_ref(), Some(&f2));
    }

    #[test]
    fn reject_policy_refuses_whole_floor() {
        let f1 = FloorId::new("A", "1");
        let f2 = FloorId::new("A", "2");
        let mut g = GlobalGraph::new();
        g.absorb(&f1, floor_graph(vec![node(&f1, "x", GeoCoordinate::default())]), DuplicatePolicy::Reject)
            .unwrap();
        let err = g
            .absorb(
                &f2,
                floor_graph(vec![node(&f2, "y", GeoCoordinate::default()), node(&f2, "x", GeoCoordinate::default())]),
                DuplicatePolicy::Reject,
            )
            .unwrap_err();
        assert_eq!(err, FloorError::DuplicateNode { node_id: "x".into(), floor: f2, existing: f1.clone() });
        assert!(g.get("y").is_none());
        assert_eq!(g.get("x").unwrap().floor.as_ref(), Some(&f1));
    }

    #[test]
    fn weighting_twice_leaves_intra_floor_edges_alone() {
        let f = FloorId::new("A", "1");
        let mut a = node(&f, "a", GeoCoordinate::new(40.0, -80.0));
        a.neighbors.insert("b".into(), Edge::new(7.25));
        let b = node(&f, "b", GeoCoordinate::new(40.1, -80.1));
        let mut g = GlobalGraph::new();
        g.absorb(&f, floor_graph(vec![a, b]), DuplicatePolicy::LastWriteWins).unwrap();

        let ratios = GeoRatios::default();
        let s1 = g.apply_weights(&ratios, -1.0);
        let s2 = g.apply_weights(&ratios, -1.0);
        assert_eq!(s1.intra_floor, 1);
        assert_eq!(s1, s2);
        assert_eq!(g.get("a").unwrap().neighbors["b"].dist, 7.25);
    }

    #[test]
    fn unannotated_neighbor_is_left_unresolved() {
        let f = FloorId::new("A", "1");
        let mut a = node(&f, "a", GeoCoordinate::new(40.0, -80.0));
        a.neighbors.insert("raw".into(), Edge::new(3.0));
        let mut raw = GraphNode::new(LocalPoint::default());
        raw.id = Some("raw".into());
        let mut g = GlobalGraph::new();
        g.absorb(&f, floor_graph(vec![a, raw]), DuplicatePolicy::LastWriteWins).unwrap();
        let stats = g.apply_weights(&GeoRatios::default(), -1.0);
        assert_eq!(stats.unresolved, 1);
        assert_eq!(g.get("a").unwrap().neighbors["raw"].dist, 3.0);
    }
}
