// src/overlay/mod.rs
//
// Drawing layers stacked on top of the floor image. Renderers talk to the
// page through the two traits below; `web` holds the browser implementations.

pub mod markers;
pub mod route;
pub mod web;

use crate::error::KioskError;
use crate::geometry::{ImageBox, Point};

/// A marker ready to be placed, already in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub dom_id: String,
    pub label: String,
    /// Top-left corner of the icon.
    pub left: f64,
    pub top: f64,
}

pub trait MarkerHost {
    /// Remove every marker and tooltip currently shown.
    fn clear(&mut self);
    fn place(&mut self, marker: MarkerView) -> Result<(), KioskError>;
    /// Bring a marker forward and show its tooltip for a moment, as if hovered.
    /// Returns false when no marker with that name is on screen.
    fn highlight(&mut self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: &'static str,
    pub width: f64,
    pub dash: [f64; 2],
    pub shadow_color: &'static str,
    pub shadow_blur: f64,
}

pub const ROUTE_STROKE: StrokeStyle = StrokeStyle {
    color: "#2563eb",
    width: 5.0,
    dash: [10.0, 10.0],
    shadow_color: "rgba(37, 99, 235, 0.5)",
    shadow_blur: 10.0,
};

pub trait RouteCanvas {
    fn resize(&mut self, size: ImageBox);
    fn size(&self) -> ImageBox;
    fn clear(&mut self);
    /// Stroke one connected line through `points`. Style changes must not
    /// outlive the call.
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle);
}
