// src/kiosk_config.rs
use crate::geometry::{Point, ReferenceFrame};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type FloorKey = String;

/// Static data the kiosk is started with. Loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub reference_frame: ReferenceFrame,
    pub floors: Vec<FloorInfo>,
    #[serde(default)]
    pub markers: HashMap<FloorKey, Vec<Marker>>,
    #[serde(default)]
    pub nodes: HashMap<String, NodeInfo>,
    /// Location names listed in the sidebar and pickers before any search.
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorInfo {
    pub key: FloorKey,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A routable location: a shop, or a corridor junction the backend routes
/// through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub floor: FloorKey,
    /// Human readable floor number ("1", "2", ...).
    #[serde(default)]
    pub label: String,
    pub coord: [f64; 2],
}

impl Marker {
    pub fn new(name: &str, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl NodeInfo {
    pub fn on_floor(floor: &str, coord: [f64; 2]) -> Self {
        Self {
            floor: floor.to_string(),
            label: floor.trim_start_matches("floor-").to_string(),
            coord,
        }
    }
}

impl KioskConfig {
    pub fn new(floors: Vec<FloorInfo>) -> Self {
        Self {
            floors,
            ..Default::default()
        }
    }

    pub fn with_markers(mut self, floor: &str, markers: Vec<Marker>) -> Self {
        self.markers.insert(floor.to_string(), markers);
        self
    }

    pub fn with_node(mut self, name: &str, node: NodeInfo) -> Self {
        self.nodes.insert(name.to_string(), node);
        self
    }

    pub fn get_floor(&self, key: &str) -> Option<&FloorInfo> {
        self.floors.iter().find(|f| f.key == key)
    }

    pub fn first_floor(&self) -> Option<&FloorInfo> {
        self.floors.first()
    }

    pub fn markers_on(&self, key: &str) -> &[Marker] {
        self.markers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn floor_of_node(&self, name: &str) -> Option<&str> {
        self.nodes.get(name).map(|n| n.floor.as_str())
    }

    /// Marker with this name and the floor holding it. Names are compared
    /// case-insensitively; floors are searched in display order.
    pub fn find_marker(&self, name: &str) -> Option<(&FloorInfo, &Marker)> {
        let wanted = name.trim().to_lowercase();
        self.floors.iter().find_map(|floor| {
            self.markers_on(&floor.key)
                .iter()
                .find(|m| m.name.to_lowercase() == wanted)
                .map(|m| (floor, m))
        })
    }

    /// Locations offered before the user searches. Falls back to every marker
    /// name when the document lists none.
    pub fn initial_locations(&self) -> Vec<String> {
        if !self.locations.is_empty() {
            return self.locations.clone();
        }
        self.floors
            .iter()
            .flat_map(|f| self.markers_on(&f.key).iter().map(|m| m.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floors() -> Vec<FloorInfo> {
        vec![
            FloorInfo {
                key: "floor-1".into(),
                name: "Floor 1".into(),
                image: "/static/images/floor-1.png".into(),
            },
            FloorInfo {
                key: "floor-2".into(),
                name: "Floor 2".into(),
                image: "/static/images/floor-2.png".into(),
            },
        ]
    }

    #[test]
    fn test_floor_lookup() {
        let config = KioskConfig::new(floors());
        assert_eq!(config.get_floor("floor-2").unwrap().name, "Floor 2");
        assert!(config.get_floor("floor-9").is_none());
        assert_eq!(config.first_floor().unwrap().key, "floor-1");
    }

    #[test]
    fn test_markers_for_unknown_floor_are_empty() {
        let config = KioskConfig::new(floors());
        assert!(config.markers_on("floor-1").is_empty());
    }

    #[test]
    fn test_find_marker_is_case_insensitive() {
        let config = KioskConfig::new(floors())
            .with_markers("floor-1", vec![Marker::new("Aurum Lab", 10.0, 20.0)])
            .with_markers("floor-2", vec![Marker::new("Mothercare", 30.0, 40.0)]);
        let (floor, marker) = config.find_marker("mothercare").unwrap();
        assert_eq!(floor.key, "floor-2");
        assert_eq!(marker.name, "Mothercare");
        assert_eq!(config.find_marker("AURUM LAB").unwrap().0.key, "floor-1");
        assert!(config.find_marker("Unknown").is_none());
    }

    #[test]
    fn test_initial_locations_fall_back_to_markers() {
        let config = KioskConfig::new(floors())
            .with_markers("floor-1", vec![Marker::new("Aldo", 1.0, 1.0)])
            .with_markers("floor-2", vec![Marker::new("Casio", 2.0, 2.0)]);
        assert_eq!(config.initial_locations(), vec!["Aldo", "Casio"]);
    }

    #[test]
    fn test_node_floor_label() {
        let node = NodeInfo::on_floor("floor-2", [1.0, 2.0]);
        assert_eq!(node.label, "2");
        let config = KioskConfig::new(floors()).with_node("Teva", node);
        assert_eq!(config.floor_of_node("Teva"), Some("floor-2"));
        assert_eq!(config.floor_of_node("Nope"), None);
    }

    #[test]
    fn test_parse_bundled_config() {
        let raw = include_str!("../public/kiosk/config.json");
        let config: KioskConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.reference_frame, ReferenceFrame::default());
        assert!(config.floors.len() >= 2);
        for floor in &config.floors {
            for marker in config.markers_on(&floor.key) {
                assert_eq!(
                    config.floor_of_node(&marker.name),
                    Some(floor.key.as_str()),
                    "marker {} missing from node index",
                    marker.name
                );
            }
        }
    }
}
