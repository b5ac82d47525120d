use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::ConnectorType;

/// Which floors are reachable from which, and by what kind of connector.
///
/// Keys and targets are floor ids in `BUILDING-LEVEL` form. Every registration
/// is stored in both directions, so the map is symmetric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorConnectivity(BTreeMap<String, BTreeSet<(String, ConnectorType)>>);

impl FloorConnectivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `a <-> b`. Repeats of the same pair and type collapse.
    pub fn register(&mut self, a: &str, b: &str, kind: &ConnectorType) {
        self.0.entry(a.to_string()).or_default().insert((b.to_string(), kind.clone()));
        self.0.entry(b.to_string()).or_default().insert((a.to_string(), kind.clone()));
    }

    pub fn extend(&mut self, other: FloorConnectivity) {
        for (floor, links) in other.0 {
            self.0.entry(floor).or_default().extend(links);
        }
    }

    pub fn contains(&self, a: &str, b: &str, kind: &ConnectorType) -> bool {
        self.0
            .get(a)
            .is_some_and(|links| links.contains(&(b.to_string(), kind.clone())))
    }

    pub fn links(&self, floor: &str) -> impl Iterator<Item = &(String, ConnectorType)> {
        self.0.get(floor).into_iter().flatten()
    }

    pub fn floors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_symmetric(&self) -> bool {
        self.0
            .iter()
            .all(|(a, links)| links.iter().all(|(b, kind)| self.contains(b, a, kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
