//! Projected room catalogs: the floor plan map drawn by the client and the
//! search map backing room lookup.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::geometry::{position_on_map, GeoRatios};
use crate::models::{FloorId, GeoCoordinate, LocalPoint, Placement, Room};

/// Fields shared by both catalogs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub id: String,
    pub floor: FloorId,
    #[serde(rename = "labelPosition")]
    pub label_position: GeoCoordinate,
    /// First alias, or empty.
    pub alias: String,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlanRoom {
    #[serde(flatten)]
    pub summary: RoomSummary,
    pub coordinates: Vec<Vec<GeoCoordinate>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRoom {
    #[serde(flatten)]
    pub summary: RoomSummary,
    pub aliases: Vec<String>,
}

// Written by the projection itself; stale copies in the source are dropped.
const RESERVED_KEYS: [&str; 5] = ["id", "floor", "alias", "coordinates", "aliases"];

/// Projects one room onto the map. The local polygon is not carried over.
pub fn place_room(
    id: &str,
    room: &Room,
    floor: &FloorId,
    placement: &Placement,
    floor_center: LocalPoint,
    ratios: &GeoRatios,
) -> (FloorPlanRoom, SearchRoom) {
    let project = |p: LocalPoint| position_on_map(p, placement, floor_center, ratios);
    let summary = RoomSummary {
        id: id.to_string(),
        floor: floor.clone(),
        label_position: project(room.label_position),
        alias: room.aliases.first().cloned().unwrap_or_default(),
        extras: room
            .extras
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    let coordinates: Vec<Vec<GeoCoordinate>> = room
        .polygon
        .coordinates
        .iter()
        .map(|ring| ring.iter().map(|[x, y]| project(LocalPoint::new(*x, *y))).collect())
        .collect();
    (
        FloorPlanRoom { summary: summary.clone(), coordinates },
        SearchRoom { summary, aliases: room.aliases.clone() },
    )
}

/// building -> level -> rooms, for both catalogs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomCatalog {
    pub floor_plans: IndexMap<String, IndexMap<String, IndexMap<String, FloorPlanRoom>>>,
    pub search: IndexMap<String, IndexMap<String, Vec<SearchRoom>>>,
}

impl RoomCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty entry for a building whose floors may all be left out.
    pub fn add_building(&mut self, building_code: &str) {
        self.floor_plans.entry(building_code.to_string()).or_default();
        self.search.entry(building_code.to_string()).or_default();
    }

    /// Places every room of a floor. Returns how many rooms were added.
    pub fn add_floor(
        &mut self,
        floor: &FloorId,
        rooms: &IndexMap<String, Room>,
        placement: &Placement,
        floor_center: LocalPoint,
        ratios: &GeoRatios,
    ) -> usize {
        let mut plan = IndexMap::with_capacity(rooms.len());
        let mut search = Vec::with_capacity(rooms.len());
        for (id, room) in rooms {
            let (p, s) = place_room(id, room, floor, placement, floor_center, ratios);
            plan.insert(id.clone(), p);
            search.push(s);
        }
        let added = plan.len();
        self.floor_plans
            .entry(floor.building_code.clone())
            .or_default()
            .insert(floor.level.clone(), plan);
        self.search
            .entry(floor.building_code.clone())
            .or_default()
            .insert(floor.level.clone(), search);
        added
    }

    pub fn room_count(&self) -> usize {
        self.floor_plans.values().flat_map(IndexMap::values).map(IndexMap::len).sum()
    }
}
