// src/geometry.rs
//
// Mapping between the reference frame the floor data was authored in and the
// size the floor image is actually rendered at.

use serde::{Deserialize, Serialize};

/// Half of the marker icon footprint (20px icon).
pub const MARKER_HALF_SIZE: f64 = 10.0;

/// Gap between a marker and the bottom edge of its tooltip.
pub const TOOLTIP_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered size of the floor image, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageBox {
    pub width: f64,
    pub height: f64,
}

impl ImageBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Coordinate system the marker and route data was captured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceFrame {
    pub width: f64,
    pub height: f64,
    pub marker_offset: Point,
    pub route_offset: Point,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self {
            width: 1150.0,
            height: 610.0,
            marker_offset: Point::new(5.0, 20.0),
            route_offset: Point::new(5.0, 0.0),
        }
    }
}

/// Linear scale between the reference width and the rendered width.
///
/// An image that has not been laid out yet reports a width of zero; in that
/// case the reference width is used, which yields 1.0. The same factor applies
/// to both axes so the plan never stretches.
pub fn resolve_scale(rendered_width: f64, reference_width: f64) -> f64 {
    let rendered = if rendered_width.is_finite() && rendered_width > 0.0 {
        rendered_width
    } else {
        reference_width
    };
    if reference_width > 0.0 {
        rendered / reference_width
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset: Point,
}

impl Transform {
    pub fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    pub fn for_markers(scale: f64, frame: &ReferenceFrame) -> Self {
        Self::new(scale, frame.marker_offset)
    }

    pub fn for_route(scale: f64, frame: &ReferenceFrame) -> Self {
        Self::new(scale, frame.route_offset)
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale - self.offset.x,
            p.y * self.scale - self.offset.y,
        )
    }

    pub fn from_screen(&self, p: Point) -> Point {
        Point::new(
            (p.x + self.offset.x) / self.scale,
            (p.y + self.offset.y) / self.scale,
        )
    }

    /// Top-left corner for a marker icon so its visual center sits on `p`.
    pub fn marker_anchor(&self, p: Point) -> Point {
        let s = self.to_screen(p);
        Point::new(s.x - MARKER_HALF_SIZE, s.y - MARKER_HALF_SIZE)
    }
}

/// Tooltip position centered above a marker whose top-left corner is
/// `marker`. Needs the tooltip's own laid-out size.
pub fn tooltip_position(marker: Point, tooltip_width: f64, tooltip_height: f64) -> Point {
    Point::new(
        marker.x + MARKER_HALF_SIZE - tooltip_width / 2.0,
        marker.y - tooltip_height - TOOLTIP_GAP,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_image_box_laid_out() {
        assert!(ImageBox::new(575.0, 305.0).is_laid_out());
        assert!(!ImageBox::new(0.0, 305.0).is_laid_out());
        assert!(!ImageBox::default().is_laid_out());
    }

    #[test]
    fn test_scale_falls_back_when_not_laid_out() {
        assert_eq!(resolve_scale(0.0, 1150.0), 1.0);
        assert_eq!(resolve_scale(f64::NAN, 1150.0), 1.0);
        assert_eq!(resolve_scale(1150.0, 1150.0), 1.0);
        assert_eq!(resolve_scale(2300.0, 1150.0), 2.0);
        assert_eq!(resolve_scale(575.0, 1150.0), 0.5);
    }

    #[test]
    fn test_marker_anchor_applies_offsets_and_centering() {
        let frame = ReferenceFrame::default();
        let t = Transform::for_markers(2.0, &frame);
        let anchor = t.marker_anchor(Point::new(100.0, 50.0));
        // 100*2 - 5 - 10, 50*2 - 20 - 10
        assert_eq!(anchor, Point::new(185.0, 70.0));
    }

    #[test]
    fn test_route_and_marker_offsets_differ() {
        let frame = ReferenceFrame::default();
        let p = Point::new(10.0, 10.0);
        let m = Transform::for_markers(1.0, &frame).to_screen(p);
        let r = Transform::for_route(1.0, &frame).to_screen(p);
        assert_eq!(m, Point::new(5.0, -10.0));
        assert_eq!(r, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_tooltip_centered_above_marker() {
        let pos = tooltip_position(Point::new(100.0, 200.0), 60.0, 24.0);
        assert_eq!(pos, Point::new(80.0, 168.0));
    }

    proptest! {
        #[test]
        fn transform_round_trips(
            x in -5000.0f64..5000.0,
            y in -5000.0f64..5000.0,
            scale in 0.05f64..8.0,
            ox in -50.0f64..50.0,
            oy in -50.0f64..50.0,
        ) {
            let t = Transform::new(scale, Point::new(ox, oy));
            let back = t.from_screen(t.to_screen(Point::new(x, y)));
            prop_assert!((back.x - x).abs() < 1e-6);
            prop_assert!((back.y - y).abs() < 1e-6);
        }

        #[test]
        fn scale_is_ratio_of_widths(reference in 1.0f64..4000.0, factor in 0.01f64..4.0) {
            let scale = resolve_scale(reference * factor, reference);
            prop_assert!((scale - factor).abs() < 1e-9);
        }
    }
}
