//! Flat-earth projection between floor drawings and latitude/longitude.
//!
//! Valid only over a small region, where one degree of latitude and one degree
//! of longitude can each be treated as a fixed number of meters.

use serde::{Deserialize, Serialize};

use crate::models::{GeoCoordinate, LocalPoint, Placement};

/// Meters per degree of latitude around Pittsburgh.
pub const PITTSBURGH_LATITUDE_M_PER_DEG: f64 = 111318.8450631976;
/// Meters per degree of longitude around Pittsburgh.
pub const PITTSBURGH_LONGITUDE_M_PER_DEG: f64 = 84719.3945182816;

/// Meters-per-degree ratios of the mapped region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRatios {
    pub latitude_m_per_deg: f64,
    pub longitude_m_per_deg: f64,
}

impl Default for GeoRatios {
    fn default() -> Self {
        Self {
            latitude_m_per_deg: PITTSBURGH_LATITUDE_M_PER_DEG,
            longitude_m_per_deg: PITTSBURGH_LONGITUDE_M_PER_DEG,
        }
    }
}

/// Rotates `(x, y)` by `angle_degrees` with the sine negated relative to the
/// usual counter-clockwise rotation. Survey placements are authored against
/// this convention.
#[inline]
pub fn rotate(x: f64, y: f64, angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    (cos * x + sin * y, cos * y - sin * x)
}

/// Maps a point of a floor drawing onto the map: recenter on `floor_center`,
/// rotate by the placement angle, convert meters to degrees, undo the drawing
/// scale and offset by the placement anchor.
pub fn position_on_map(
    local: LocalPoint,
    placement: &Placement,
    floor_center: LocalPoint,
    ratios: &GeoRatios,
) -> GeoCoordinate {
    let (rx, ry) = rotate(local.x - floor_center.x, local.y - floor_center.y, placement.angle);
    GeoCoordinate {
        latitude: ry / ratios.latitude_m_per_deg / placement.scale + placement.center.latitude,
        longitude: rx / ratios.longitude_m_per_deg / placement.scale + placement.center.longitude,
    }
}

/// Distance in meters between two map points. NaN if either point is not finite.
pub fn geodesic_distance(a: GeoCoordinate, b: GeoCoordinate, ratios: &GeoRatios) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    let dlat_m = (b.latitude - a.latitude) * ratios.latitude_m_per_deg;
    let dlon_m = (b.longitude - a.longitude) * ratios.longitude_m_per_deg;
    dlat_m.hypot(dlon_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn identity_placement() -> Placement {
        Placement { angle: 0.0, scale: 1.0, center: GeoCoordinate::new(0.0, 0.0) }
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        assert_eq!(rotate(3.0, -4.0, 0.0), (3.0, -4.0));
    }

    #[test]
    fn rotate_quarter_turn_uses_negated_sine() {
        let (x, y) = rotate(1.0, 0.0, 90.0);
        assert!((x - 0.0).abs() < EPS);
        assert!((y + 1.0).abs() < EPS);
        let (x, y) = rotate(0.0, 1.0, 90.0);
        assert!((x - 1.0).abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn identity_placement_only_divides_by_ratios() {
        let r = GeoRatios::default();
        let g = position_on_map(LocalPoint::new(250.0, 100.0), &identity_placement(), LocalPoint::default(), &r);
        assert_eq!(g.latitude, 100.0 / PITTSBURGH_LATITUDE_M_PER_DEG);
        assert_eq!(g.longitude, 250.0 / PITTSBURGH_LONGITUDE_M_PER_DEG);
    }

    #[test]
    fn floor_center_maps_onto_anchor() {
        let p = Placement { angle: 37.0, scale: 3.5, center: GeoCoordinate::new(40.4433, -79.9436) };
        let c = LocalPoint::new(12.0, -8.0);
        let g = position_on_map(c, &p, c, &GeoRatios::default());
        assert_eq!(g, p.center);
    }

    #[test]
    fn scale_shrinks_offsets_from_anchor() {
        let r = GeoRatios::default();
        let mut p = identity_placement();
        let a = position_on_map(LocalPoint::new(0.0, 200.0), &p, LocalPoint::default(), &r);
        p.scale = 2.0;
        let b = position_on_map(LocalPoint::new(0.0, 200.0), &p, LocalPoint::default(), &r);
        assert!((a.latitude - 2.0 * b.latitude).abs() < EPS);
    }

    #[test]
    fn geodesic_distance_inverts_ratios() {
        let r = GeoRatios::default();
        let a = GeoCoordinate::new(40.0, -80.0);
        let b = GeoCoordinate::new(40.0 + 3.0 / PITTSBURGH_LATITUDE_M_PER_DEG, -80.0 + 4.0 / PITTSBURGH_LONGITUDE_M_PER_DEG);
        assert!((geodesic_distance(a, b, &r) - 5.0).abs() < 1e-6);
        assert_eq!(geodesic_distance(a, a, &r), 0.0);
    }

    #[test]
    fn geodesic_distance_of_non_finite_point_is_nan() {
        let r = GeoRatios::default();
        let bad = GeoCoordinate::new(f64::NAN, 0.0);
        assert!(geodesic_distance(bad, GeoCoordinate::default(), &r).is_nan());
    }

    #[test]
    fn ratios_deserialize_with_defaults() {
        let r: GeoRatios = serde_json::from_value(serde_json::json!({"latitude_m_per_deg": 1.0})).unwrap();
        assert_eq!(r.latitude_m_per_deg, 1.0);
        assert_eq!(r.longitude_m_per_deg, PITTSBURGH_LONGITUDE_M_PER_DEG);
    }
}
