// src/session.rs
//
// State behind the map view: which floor is shown, the last route fetched and
// whether the floor image has been measured yet. Transitions never touch the
// page; they hand back a `Step` describing what to draw or wait for.

use crate::geometry::{resolve_scale, ImageBox};
use crate::kiosk_config::{FloorKey, KioskConfig};
use crate::overlay::markers::render_markers;
use crate::overlay::route::render_route;
use crate::overlay::{MarkerHost, RouteCanvas};
use crate::route::{start_floor, visible_segment, Partition, RoutePoint};
use std::rc::Rc;

/// Monotonic ticket source. Only the most recently issued ticket is current,
/// so responses to superseded requests can be dropped.
#[derive(Debug, Default, Clone)]
pub struct TicketCounter {
    latest: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub floor: FloorKey,
    pub geometry: ImageBox,
    /// Whether the marker layer has to be rebuilt.
    pub markers: bool,
    pub route: Partition,
    pub highlight: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Render(RenderPlan),
    /// A new floor image is being loaded. Call `image_ready` with this
    /// navigation once it is measured.
    AwaitImage { navigation: u64, image: String },
    Idle,
}

pub struct RouteSession {
    config: Rc<KioskConfig>,
    current_floor: Option<FloorKey>,
    full_route: Vec<RoutePoint>,
    /// `None` while the current floor image is loading.
    geometry: Option<ImageBox>,
    navigation: u64,
    pending_highlight: Option<String>,
    routes: TicketCounter,
}

impl RouteSession {
    pub fn new(config: Rc<KioskConfig>) -> Self {
        Self {
            config,
            current_floor: None,
            full_route: Vec::new(),
            geometry: None,
            navigation: 0,
            pending_highlight: None,
            routes: TicketCounter::default(),
        }
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn current_floor(&self) -> Option<&str> {
        self.current_floor.as_deref()
    }

    pub fn full_route(&self) -> &[RoutePoint] {
        &self.full_route
    }

    pub fn is_loading(&self) -> bool {
        self.current_floor.is_some() && self.geometry.is_none()
    }

    pub fn image_src(&self) -> Option<&str> {
        let floor = self.current_floor.as_deref()?;
        self.config.get_floor(floor).map(|f| f.image.as_str())
    }

    pub fn visible_route(&self) -> Partition {
        match &self.current_floor {
            Some(floor) => visible_segment(&self.full_route, floor, &self.config.nodes),
            None => Partition::default(),
        }
    }

    /// Show the first configured floor.
    pub fn start(&mut self) -> Step {
        match self.config.first_floor() {
            Some(floor) => {
                let key = floor.key.clone();
                self.navigate(&key, None)
            }
            None => {
                log::warn!("Kiosk configuration has no floors");
                Step::Idle
            }
        }
    }

    /// Floor picked from the floor selector. The active route is kept and
    /// re-partitioned for the new floor.
    pub fn select_floor(&mut self, floor: &str) -> Step {
        self.navigate(floor, None)
    }

    /// A search result was chosen: show its floor and highlight its marker.
    /// Any active route is dropped.
    pub fn focus_location(&mut self, name: &str) -> Step {
        let Some((floor, marker)) = self.config.find_marker(name) else {
            log::warn!("No marker named '{}' on any floor", name);
            return Step::Idle;
        };
        let floor = floor.key.clone();
        let marker = marker.name.clone();
        self.full_route.clear();
        self.navigate(&floor, Some(marker))
    }

    pub fn begin_route_request(&mut self) -> u64 {
        self.routes.issue()
    }

    /// Install a route returned by the backend. Moves to the floor the route
    /// starts on when that is not the one shown.
    pub fn accept_route(&mut self, ticket: u64, coordinates: Vec<RoutePoint>) -> Step {
        if !self.routes.is_current(ticket) {
            log::debug!("Dropping stale route response #{}", ticket);
            return Step::Idle;
        }
        self.full_route = coordinates;

        let target = start_floor(&self.full_route, &self.config.nodes).map(str::to_string);
        if let Some(target) = target {
            if self.current_floor.as_deref() != Some(target.as_str()) {
                return self.navigate(&target, None);
            }
        }

        match self.plan(false, None) {
            Some(plan) => Step::Render(plan),
            // the pending image load draws the route
            None => Step::Idle,
        }
    }

    /// Window resized: re-project everything from the current state. While an
    /// image load is pending nothing is stored; `image_ready` measures again.
    pub fn resize(&mut self, geometry: ImageBox) -> Option<RenderPlan> {
        self.geometry?;
        self.geometry = Some(geometry);
        self.plan(true, None)
    }

    pub fn image_ready(&mut self, navigation: u64, geometry: ImageBox) -> Option<RenderPlan> {
        if navigation != self.navigation {
            log::debug!(
                "Ignoring image load for navigation #{} (current #{})",
                navigation,
                self.navigation
            );
            return None;
        }
        self.geometry = Some(geometry);
        let highlight = self.pending_highlight.take();
        self.plan(true, highlight)
    }

    /// The floor image for `navigation` failed to load. The overlays are still
    /// drawn, against `measured` if the broken image kept a box and at the
    /// reference size otherwise, so a route stays usable without the plan.
    pub fn image_failed(&mut self, navigation: u64, measured: ImageBox) -> Option<RenderPlan> {
        if navigation != self.navigation {
            return None;
        }
        let frame = &self.config.reference_frame;
        let geometry = if measured.is_laid_out() {
            measured
        } else {
            ImageBox::new(frame.width, frame.height)
        };
        log::warn!(
            "Drawing overlays for navigation #{} without a floor image",
            navigation
        );
        self.geometry = Some(geometry);
        self.pending_highlight = None;
        self.plan(true, None)
    }

    /// Draw a plan onto the page layers.
    pub fn paint(&self, plan: &RenderPlan, host: &mut dyn MarkerHost, canvas: &mut dyn RouteCanvas) {
        let frame = &self.config.reference_frame;
        let scale = resolve_scale(plan.geometry.width, frame.width);

        if plan.markers {
            render_markers(host, &plan.floor, &self.config.markers, scale, frame);
        }
        render_route(canvas, &plan.route.points, scale, frame, plan.geometry);

        if let Some(name) = &plan.highlight {
            if !host.highlight(name) {
                log::warn!("Marker '{}' is not on screen", name);
            }
        }
    }

    fn navigate(&mut self, floor: &str, highlight: Option<String>) -> Step {
        let Some(info) = self.config.get_floor(floor) else {
            log::warn!("Unknown floor '{}'", floor);
            return Step::Idle;
        };
        let image = info.image.clone();

        if self.current_floor.as_deref() == Some(floor) && self.geometry.is_some() {
            return match self.plan(true, highlight) {
                Some(plan) => Step::Render(plan),
                None => Step::Idle,
            };
        }

        log::info!("Switching to {}", floor);
        self.current_floor = Some(floor.to_string());
        self.geometry = None;
        self.navigation += 1;
        self.pending_highlight = highlight;
        Step::AwaitImage {
            navigation: self.navigation,
            image,
        }
    }

    fn plan(&self, markers: bool, highlight: Option<String>) -> Option<RenderPlan> {
        let floor = self.current_floor.clone()?;
        let geometry = self.geometry?;
        Some(RenderPlan {
            route: visible_segment(&self.full_route, &floor, &self.config.nodes),
            floor,
            geometry,
            markers,
            highlight,
        })
    }
}
