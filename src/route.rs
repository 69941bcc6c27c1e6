// src/route.rs
use crate::geometry::Point;
use crate::kiosk_config::NodeInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub name: String,
    pub coord: [f64; 2],
}

impl RoutePoint {
    pub fn new(name: &str, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            coord: [x, y],
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.coord[0], self.coord[1])
    }
}

/// Body of `GET /route`. The backend reports a failure with an `error` field
/// and never sends coordinates alongside it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RouteResponse {
    Failed {
        error: String,
    },
    Found {
        coordinates: Vec<RoutePoint>,
        #[serde(default)]
        route: Vec<String>,
    },
}

/// Points of a route that belong to one floor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub points: Vec<RoutePoint>,
    /// Names missing from the node index. These points were skipped.
    pub unresolved: Vec<String>,
}

/// Subsequence of `full_route` that lies on `floor`, in route order.
pub fn visible_segment(
    full_route: &[RoutePoint],
    floor: &str,
    index: &HashMap<String, NodeInfo>,
) -> Partition {
    let mut partition = Partition::default();
    for point in full_route {
        match index.get(&point.name) {
            Some(node) if node.floor == floor => partition.points.push(point.clone()),
            Some(_) => {}
            None => {
                log::warn!(
                    "Route point '{}' has no floor in the node index; skipping it",
                    point.name
                );
                partition.unresolved.push(point.name.clone());
            }
        }
    }
    partition
}

/// Floor the route starts on, if its first point is known.
pub fn start_floor<'a>(
    full_route: &[RoutePoint],
    index: &'a HashMap<String, NodeInfo>,
) -> Option<&'a str> {
    full_route
        .first()
        .and_then(|p| index.get(&p.name))
        .map(|n| n.floor.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> HashMap<String, NodeInfo> {
        let mut index = HashMap::new();
        index.insert("A".to_string(), NodeInfo::on_floor("floor-1", [0.0, 0.0]));
        index.insert("B".to_string(), NodeInfo::on_floor("floor-2", [1.0, 1.0]));
        index.insert("C".to_string(), NodeInfo::on_floor("floor-1", [2.0, 2.0]));
        index
    }

    fn route() -> Vec<RoutePoint> {
        vec![
            RoutePoint::new("A", 0.0, 0.0),
            RoutePoint::new("B", 1.0, 1.0),
            RoutePoint::new("C", 2.0, 2.0),
        ]
    }

    fn names(p: &Partition) -> Vec<&str> {
        p.points.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_partition_preserves_order() {
        let segment = visible_segment(&route(), "floor-1", &index());
        assert_eq!(names(&segment), vec!["A", "C"]);
        assert!(segment.unresolved.is_empty());

        let segment = visible_segment(&route(), "floor-2", &index());
        assert_eq!(names(&segment), vec!["B"]);
    }

    #[test]
    fn test_partition_flags_unknown_points() {
        let mut full = route();
        full.insert(1, RoutePoint::new("ghost", 5.0, 5.0));
        let segment = visible_segment(&full, "floor-1", &index());
        assert_eq!(names(&segment), vec!["A", "C"]);
        assert_eq!(segment.unresolved, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_partition_of_empty_route() {
        let segment = visible_segment(&[], "floor-1", &index());
        assert!(segment.points.is_empty());
    }

    #[test]
    fn test_start_floor() {
        assert_eq!(start_floor(&route(), &index()), Some("floor-1"));
        assert_eq!(start_floor(&route()[1..], &index()), Some("floor-2"));
        assert_eq!(start_floor(&[], &index()), None);
    }

    #[test]
    fn test_decode_route_found() {
        let body = r#"{"route":["A","C"],"coordinates":[{"name":"A","coord":[1,2]},{"name":"C","coord":[3,4]}]}"#;
        let parsed: RouteResponse = serde_json::from_str(body).unwrap();
        match parsed {
            RouteResponse::Found { coordinates, route } => {
                assert_eq!(coordinates.len(), 2);
                assert_eq!(coordinates[1].position(), Point::new(3.0, 4.0));
                assert_eq!(route, vec!["A", "C"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_route_error() {
        let parsed: RouteResponse = serde_json::from_str(r#"{"error":"no path"}"#).unwrap();
        assert_eq!(
            parsed,
            RouteResponse::Failed {
                error: "no path".into()
            }
        );
    }
}
