use std::fmt;

use tracing::info;

use crate::connectivity::FloorConnectivity;
use crate::errors::FloorError;
use crate::floor_center::floor_center;
use crate::merge::GlobalGraph;
use crate::models::{FloorGraph, FloorId, Outline};
use crate::options::PipelineOptions;
use crate::placements::Placements;
use crate::report::{FloorSummary, RunReport};
use crate::rooms::RoomCatalog;
use crate::transform::transform_floor;

/// Everything known about one floor. A floor without a walk graph still
/// contributes its rooms.
#[derive(Debug, Clone)]
pub struct FloorInput {
    pub floor: FloorId,
    pub outline: Outline,
    pub graph: Option<FloorGraph>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub connectivity: FloorConnectivity,
    pub graph: GlobalGraph,
    pub rooms: RoomCatalog,
    pub report: RunReport,
}

/// Accumulates floors one at a time, then weights the merged graph once in
/// [`Pipeline::finish`].
#[derive(Debug)]
pub struct Pipeline {
    placements: Placements,
    options: PipelineOptions,
    connectivity: FloorConnectivity,
    graph: GlobalGraph,
    rooms: RoomCatalog,
    report: RunReport,
}

impl Pipeline {
    pub fn new(placements: Placements, options: PipelineOptions) -> Self {
        Self {
            placements,
            options,
            connectivity: FloorConnectivity::new(),
            graph: GlobalGraph::new(),
            rooms: RoomCatalog::new(),
            report: RunReport::default(),
        }
    }

    /// Transforms and merges one floor. A floor that fails leaves the
    /// accumulated outputs untouched and is recorded in the report.
    pub fn process_floor(&mut self, input: FloorInput) -> Result<FloorSummary, FloorError> {
        let floor = input.floor.clone();
        match self.try_floor(input) {
            Ok(summary) => {
                info!(%floor, rooms = summary.rooms, nodes = summary.nodes, connectors = summary.connectors, "processed floor");
                self.report.processed.push(summary.clone());
                Ok(summary)
            }
            Err(e) => {
                self.report.record_error(&floor, &e);
                Err(e)
            }
        }
    }

    /// Runs every floor in turn. Failures are already in the report.
    pub fn process_all(&mut self, floors: impl IntoIterator<Item = FloorInput>) {
        for input in floors {
            let _ = self.process_floor(input);
        }
    }

    /// Records a floor, or a whole building, that never reached the
    /// pipeline because its documents could not be read.
    pub fn record_failure(&mut self, key: impl fmt::Display, err: &FloorError) {
        self.report.record_error(key, err);
    }

    /// Makes the building show up in the room catalogs even if none of its
    /// floors can be placed.
    pub fn register_building(&mut self, building_code: &str) {
        self.rooms.add_building(building_code);
    }

    fn try_floor(&mut self, input: FloorInput) -> Result<FloorSummary, FloorError> {
        let FloorInput { floor, outline, graph } = input;
        let placement = *self.placements.resolve(&floor)?;
        let center = floor_center(&floor, &outline.rooms)?;
        let ratios = self.options.ratios;

        let mut summary = FloorSummary { floor: floor.to_string(), rooms: 0, nodes: 0, connectors: 0 };
        if let Some(mut graph) = graph {
            let mut links = FloorConnectivity::new();
            let stats = transform_floor(&floor, &mut graph, &placement, center, &ratios, &mut links)?;
            let collisions = self.graph.absorb(&floor, graph, self.options.duplicate_nodes)?;
            self.connectivity.extend(links);
            self.report.collisions.extend(collisions);
            summary.nodes = stats.nodes;
            summary.connectors = stats.connectors;
        }
        summary.rooms = self.rooms.add_floor(&floor, &outline.rooms, &placement, center, &ratios);
        Ok(summary)
    }

    /// Weights every edge of the merged graph and hands back the artifacts.
    pub fn finish(mut self) -> PipelineOutput {
        self.report.weights = self
            .graph
            .apply_weights(&self.options.ratios, self.options.vertical_connector_distance);
        debug_assert!(self.connectivity.is_symmetric());
        self.report.log();
        PipelineOutput {
            connectivity: self.connectivity,
            graph: self.graph,
            rooms: self.rooms,
            report: self.report,
        }
    }
}

/// Runs every floor through a fresh pipeline.
pub fn run(
    placements: Placements,
    floors: impl IntoIterator<Item = FloorInput>,
    options: PipelineOptions,
) -> PipelineOutput {
    let mut pipeline = Pipeline::new(placements, options);
    pipeline.process_all(floors);
    pipeline.finish()
}
