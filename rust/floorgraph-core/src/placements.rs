use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FloorError;
use crate::models::{FloorId, Outline, Placement};

/// Placement index: building code -> level -> placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placements(IndexMap<String, IndexMap<String, Placement>>);

impl Placements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, floor: &FloorId, placement: Placement) -> Option<Placement> {
        self.0
            .entry(floor.building_code.clone())
            .or_default()
            .insert(floor.level.clone(), placement)
    }

    /// Collects placements embedded in outline documents. Outlines without one
    /// are left out of the index.
    pub fn from_outlines<'a>(outlines: impl IntoIterator<Item = (&'a FloorId, &'a Outline)>) -> Self {
        let mut out = Self::new();
        for (floor, outline) in outlines {
            if let Some(p) = outline.placement {
                out.insert(floor, p);
            }
        }
        out
    }

    /// Looks up and sanity-checks the placement for `floor`.
    pub fn resolve(&self, floor: &FloorId) -> Result<&Placement, FloorError> {
        let levels = self
            .0
            .get(&floor.building_code)
            .ok_or_else(|| FloorError::MissingBuilding { building_code: floor.building_code.clone() })?;
        let placement = levels
            .get(&floor.level)
            .ok_or_else(|| FloorError::MissingLevel { floor: floor.clone() })?;
        validate(floor, placement)?;
        debug!(%floor, angle = placement.angle, scale = placement.scale, "resolved placement");
        Ok(placement)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(floor: &FloorId, p: &Placement) -> Result<(), FloorError> {
    if !p.angle.is_finite() {
        return Err(FloorError::malformed(floor, "placement", format!("angle {} is not finite", p.angle)));
    }
    if !p.scale.is_finite() || p.scale == 0.0 {
        return Err(FloorError::malformed(floor, "placement", format!("scale {} is not usable", p.scale)));
    }
    if !p.center.is_finite() {
        return Err(FloorError::malformed(floor, "placement", "anchor is not finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoCoordinate;
    use serde_json::json;

    fn index() -> Placements {
        serde_json::from_value(json!({
            "GHC": {
                "5": {"angle": 10.0, "scale": 2.0, "center": {"latitude": 40.44, "longitude": -79.94}},
                "A": {"angle": 0.0, "scale": 0.0, "center": {"latitude": 40.44, "longitude": -79.94}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn resolves_known_floor() {
        let p = index().resolve(&FloorId::new("GHC", "5")).copied().unwrap();
        assert_eq!(p.angle, 10.0);
        assert_eq!(p.center, GeoCoordinate::new(40.44, -79.94));
    }

    #[test]
    fn missing_building_and_level_are_distinguished() {
        let idx = index();
        assert_eq!(
            idx.resolve(&FloorId::new("WEH", "5")),
            Err(FloorError::MissingBuilding { building_code: "WEH".into() })
        );
        assert_eq!(
            idx.resolve(&FloorId::new("GHC", "9")),
            Err(FloorError::MissingLevel { floor: FloorId::new("GHC", "9") })
        );
    }

    #[test]
    fn zero_scale_is_malformed() {
        let err = index().resolve(&FloorId::new("GHC", "A")).unwrap_err();
        assert_eq!(err.code(), "malformed_input");
        assert!(!err.is_skip());
    }

    #[test]
    fn aggregates_embedded_placements() {
        let with = FloorId::new("GHC", "5");
        let without = FloorId::new("GHC", "6");
        let mut o1 = Outline::new(IndexMap::new());
        o1.placement = Some(Placement { angle: 1.0, scale: 1.0, center: GeoCoordinate::new(1.0, 2.0) });
        let o2 = Outline::new(IndexMap::new());
        let idx = Placements::from_outlines([(&with, &o1), (&without, &o2)]);
        assert_eq!(idx.len(), 1);
        assert!(idx.resolve(&with).is_ok());
        assert!(matches!(idx.resolve(&without), Err(FloorError::MissingLevel { .. })));
        assert_eq!(idx.buildings().collect::<Vec<_>>(), vec!["GHC"]);
    }
}
