use indexmap::IndexMap;

use crate::errors::FloorError;
use crate::models::{FloorId, LocalPoint, Room};

/// Axis-aligned bounds of a set of local points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: LocalPoint,
    pub max: LocalPoint,
}

impl BoundingBox {
    pub fn of_points(points: impl IntoIterator<Item = LocalPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(BoundingBox { min: p, max: p }),
            Some(b) => Some(BoundingBox {
                min: LocalPoint::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: LocalPoint::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            }),
        })
    }

    pub fn center(&self) -> LocalPoint {
        LocalPoint::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }
}

/// Midpoint of the bounding box over every ring vertex of every room.
///
/// Always derived from the rooms handed in; callers recompute it per floor.
pub fn floor_center(floor: &FloorId, rooms: &IndexMap<String, Room>) -> Result<LocalPoint, FloorError> {
    BoundingBox::of_points(rooms.values().flat_map(Room::vertices))
        .map(|b| b.center())
        .ok_or_else(|| FloorError::EmptyRoomSet { floor: floor.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Room {
        Room::new(
            vec![vec![[x0, y0], [x0 + side, y0], [x0 + side, y0 + side], [x0, y0 + side]]],
            LocalPoint::new(x0 + side / 2.0, y0 + side / 2.0),
        )
    }

    fn floor() -> FloorId {
        FloorId::new("B1", "1")
    }

    #[test]
    fn unit_square_centers_at_five_five() {
        let mut rooms = IndexMap::new();
        rooms.insert("r".to_string(), square(0.0, 0.0, 10.0));
        assert_eq!(floor_center(&floor(), &rooms).unwrap(), LocalPoint::new(5.0, 5.0));
    }

    #[test]
    fn center_spans_all_rooms_and_rings() {
        let mut rooms = IndexMap::new();
        rooms.insert("a".to_string(), square(0.0, 0.0, 10.0));
        let mut b = square(30.0, 20.0, 10.0);
        b.polygon.coordinates.push(vec![[-10.0, -40.0]]);
        rooms.insert("b".to_string(), b);
        // x in [-10, 40], y in [-40, 30]
        assert_eq!(floor_center(&floor(), &rooms).unwrap(), LocalPoint::new(15.0, -5.0));
    }

    #[test]
    fn label_positions_do_not_widen_the_box() {
        let mut r = square(0.0, 0.0, 10.0);
        r.label_position = LocalPoint::new(1000.0, 1000.0);
        let mut rooms = IndexMap::new();
        rooms.insert("r".to_string(), r);
        assert_eq!(floor_center(&floor(), &rooms).unwrap(), LocalPoint::new(5.0, 5.0));
    }

    #[test]
    fn empty_room_set_is_an_error() {
        let rooms = IndexMap::new();
        assert_eq!(
            floor_center(&floor(), &rooms),
            Err(FloorError::EmptyRoomSet { floor: floor() })
        );
    }

    #[test]
    fn rooms_without_vertices_count_as_empty() {
        let mut rooms = IndexMap::new();
        rooms.insert("r".to_string(), Room::new(vec![vec![]], LocalPoint::default()));
        assert!(matches!(floor_center(&floor(), &rooms), Err(FloorError::EmptyRoomSet { .. })));
    }
}
