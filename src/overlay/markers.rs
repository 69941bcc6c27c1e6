// src/overlay/markers.rs
use super::{MarkerHost, MarkerView};
use crate::geometry::{ReferenceFrame, Transform};
use crate::kiosk_config::Marker;
use std::collections::HashMap;

/// DOM id for a marker: `marker-` followed by the name with every whitespace
/// run collapsed to a single `-`. Names must be unique per floor.
pub fn marker_dom_id(name: &str) -> String {
    let mut id = String::from("marker-");
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                id.push('-');
            }
            in_space = true;
        } else {
            id.push(ch);
            in_space = false;
        }
    }
    id
}

/// Replace whatever markers are shown with the ones of `floor`.
/// Returns how many markers were placed.
pub fn render_markers(
    host: &mut dyn MarkerHost,
    floor: &str,
    markers_by_floor: &HashMap<String, Vec<Marker>>,
    scale: f64,
    frame: &ReferenceFrame,
) -> usize {
    host.clear();

    let Some(markers) = markers_by_floor.get(floor) else {
        return 0;
    };

    let transform = Transform::for_markers(scale, frame);
    let mut placed = 0;
    for marker in markers {
        let anchor = transform.marker_anchor(marker.position());
        let view = MarkerView {
            dom_id: marker_dom_id(&marker.name),
            label: marker.name.clone(),
            left: anchor.x,
            top: anchor.y,
        };
        match host.place(view) {
            Ok(()) => placed += 1,
            Err(e) => log::error!("Failed to place marker '{}': {}", marker.name, e),
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::testing::RecordingHost;

    fn markers() -> HashMap<String, Vec<Marker>> {
        let mut map = HashMap::new();
        map.insert(
            "floor-1".to_string(),
            vec![
                Marker::new("Aurum Lab", 100.0, 50.0),
                Marker::new("HMNS", 200.0, 80.0),
                Marker::new("Charles & Keith", 300.0, 90.0),
            ],
        );
        map
    }

    #[test]
    fn test_dom_id_collapses_whitespace() {
        assert_eq!(marker_dom_id("Aurum Lab"), "marker-Aurum-Lab");
        assert_eq!(marker_dom_id("Marks  &\tSpencer"), "marker-Marks-&-Spencer");
        assert_eq!(marker_dom_id(" Seibu"), "marker--Seibu");
        assert_eq!(marker_dom_id("HMNS"), "marker-HMNS");
    }

    #[test]
    fn test_one_view_per_marker() {
        let mut host = RecordingHost::default();
        let frame = ReferenceFrame::default();
        let n = render_markers(&mut host, "floor-1", &markers(), 1.0, &frame);
        assert_eq!(n, 3);
        assert_eq!(host.shown.len(), 3);
        assert_eq!(host.shown[0].dom_id, "marker-Aurum-Lab");
        assert_eq!(host.shown[0].label, "Aurum Lab");
        assert_eq!((host.shown[0].left, host.shown[0].top), (85.0, 20.0));
    }

    #[test]
    fn test_rendering_twice_replaces() {
        let mut host = RecordingHost::default();
        let frame = ReferenceFrame::default();
        render_markers(&mut host, "floor-1", &markers(), 1.0, &frame);
        render_markers(&mut host, "floor-1", &markers(), 1.0, &frame);
        assert_eq!(host.shown.len(), 3);
        assert_eq!(host.clears, 2);
    }

    #[test]
    fn test_unknown_floor_clears_and_renders_nothing() {
        let mut host = RecordingHost::default();
        let frame = ReferenceFrame::default();
        render_markers(&mut host, "floor-1", &markers(), 1.0, &frame);
        let n = render_markers(&mut host, "floor-7", &markers(), 1.0, &frame);
        assert_eq!(n, 0);
        assert!(host.shown.is_empty());
    }

    #[test]
    fn test_positions_follow_scale() {
        let mut host = RecordingHost::default();
        let frame = ReferenceFrame::default();
        render_markers(&mut host, "floor-1", &markers(), 0.5, &frame);
        // 200*0.5 - 5 - 10, 80*0.5 - 20 - 10
        assert_eq!((host.shown[1].left, host.shown[1].top), (85.0, 10.0));
    }
}
