use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point in a floor's local drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A single building level. Rendered as `"{building_code}-{level}"` wherever a
/// floor is used as a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FloorId {
    #[serde(rename = "buildingCode")]
    pub building_code: String,
    pub level: String,
}

impl FloorId {
    pub fn new(building_code: impl Into<String>, level: impl Into<String>) -> Self {
        Self { building_code: building_code.into(), level: level.into() }
    }

    pub fn same_building(&self, other: &FloorId) -> bool {
        self.building_code == other.building_code
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.building_code, self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("floor id {0:?} is not of the form BUILDING-LEVEL")]
pub struct FloorIdParseError(pub String);

impl FromStr for FloorId {
    type Err = FloorIdParseError;

    // Building codes never contain '-', levels may (e.g. "GHC-A-1" is level "A-1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((code, level)) if !code.is_empty() && !level.is_empty() => Ok(FloorId::new(code, level)),
            _ => Err(FloorIdParseError(s.to_string())),
        }
    }
}

/// Kind of vertical link between two floors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectorType {
    Stairs,
    Elevator,
    Other(String),
}

impl From<String> for ConnectorType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "stairs" => ConnectorType::Stairs,
            "elevator" => ConnectorType::Elevator,
            _ => ConnectorType::Other(s),
        }
    }
}

impl From<ConnectorType> for String {
    fn from(c: ConnectorType) -> Self {
        match c {
            ConnectorType::Stairs => "stairs".to_string(),
            ConnectorType::Elevator => "elevator".to_string(),
            ConnectorType::Other(s) => s,
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorType::Stairs => f.write_str("stairs"),
            ConnectorType::Elevator => f.write_str("elevator"),
            ConnectorType::Other(s) => f.write_str(s),
        }
    }
}

/// Present only on edges that leave the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToFloorInfo {
    #[serde(rename = "toFloor")]
    pub to_floor: String,
    #[serde(rename = "type")]
    pub kind: ConnectorType,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Meters. Only meaningful once the merged graph has been weighted.
    #[serde(alias = "distance")]
    pub dist: f64,
    #[serde(rename = "toFloorInfo", default, skip_serializing_if = "Option::is_none")]
    pub to_floor_info: Option<ToFloorInfo>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Edge {
    pub fn new(dist: f64) -> Self {
        Self { dist, to_floor_info: None, extras: Map::new() }
    }

    pub fn connector(dist: f64, to_floor: impl Into<String>, kind: ConnectorType) -> Self {
        Self {
            dist,
            to_floor_info: Some(ToFloorInfo { to_floor: to_floor.into(), kind, extras: Map::new() }),
            extras: Map::new(),
        }
    }
}

/// Walk-graph node. `coordinate`, `floor` and `id` are filled in by the floor
/// transform; anything else the survey document carries rides along in `extras`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub pos: LocalPoint,
    #[serde(default)]
    pub neighbors: IndexMap<String, Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoCoordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<FloorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl GraphNode {
    pub fn new(pos: LocalPoint) -> Self {
        Self {
            pos,
            neighbors: IndexMap::new(),
            coordinate: None,
            floor: None,
            id: None,
            extras: Map::new(),
        }
    }

    pub fn with_neighbor(mut self, id: impl Into<String>, edge: Edge) -> Self {
        self.neighbors.insert(id.into(), edge);
        self
    }
}

/// One floor's walk graph, keyed by node id in document order.
pub type FloorGraph = IndexMap<String, GraphNode>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Closed rings of `[x, y]` vertices.
    pub coordinates: Vec<Vec<[f64; 2]>>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub polygon: Polygon,
    #[serde(rename = "labelPosition")]
    pub label_position: LocalPoint,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Room {
    pub fn new(rings: Vec<Vec<[f64; 2]>>, label_position: LocalPoint) -> Self {
        Self {
            polygon: Polygon { coordinates: rings, extras: Map::new() },
            label_position,
            aliases: Vec::new(),
            extras: Map::new(),
        }
    }

    pub fn vertices(&self) -> impl Iterator<Item = LocalPoint> + '_ {
        self.polygon
            .coordinates
            .iter()
            .flatten()
            .map(|[x, y]| LocalPoint::new(*x, *y))
    }
}

/// Rigid transform from a floor's drawing space onto the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Degrees.
    pub angle: f64,
    pub scale: f64,
    /// Where the floor center lands on the map.
    pub center: GeoCoordinate,
}

/// Outline document of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub rooms: IndexMap<String, Room>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Outline {
    pub fn new(rooms: IndexMap<String, Room>) -> Self {
        Self { rooms, placement: None, extras: Map::new() }
    }
}
