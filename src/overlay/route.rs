// src/overlay/route.rs
use super::{RouteCanvas, ROUTE_STROKE};
use crate::geometry::{ImageBox, Point, ReferenceFrame, Transform};
use crate::route::RoutePoint;

/// Repaint the route layer. The canvas always takes the size of the image box
/// and starts empty; a polyline is stroked only when there are points.
/// Returns whether anything was drawn.
pub fn render_route(
    canvas: &mut dyn RouteCanvas,
    points: &[RoutePoint],
    scale: f64,
    frame: &ReferenceFrame,
    surface: ImageBox,
) -> bool {
    canvas.resize(surface);
    canvas.clear();

    if points.is_empty() {
        return false;
    }

    let transform = Transform::for_route(scale, frame);
    let screen: Vec<Point> = points
        .iter()
        .map(|p| transform.to_screen(p.position()))
        .collect();
    canvas.stroke_polyline(&screen, &ROUTE_STROKE);
    true
}
