// src/components/kiosk.rs
use crate::api;
use crate::components::location_picker::LocationPicker;
use crate::error::KioskError;
use crate::geometry::ImageBox;
use crate::kiosk_config::KioskConfig;
use crate::overlay::web::{await_image_box, measure_image, CanvasSurface, DomMarkerHost};
use crate::route::RoutePoint;
use crate::session::{RenderPlan, RouteSession, Step, TicketCounter};
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct KioskProps {
    pub config: Rc<KioskConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchList {
    Sidebar,
    Start,
    Goal,
}

pub enum KioskMsg {
    SelectFloor(String),
    ImageReady(u64, Result<ImageBox, KioskError>),
    Resized,
    Search(SearchList, String),
    SearchResults(SearchList, u64, Result<Vec<String>, KioskError>),
    Pick(SearchList, String),
    FindRoute,
    RouteLoaded(u64, Result<Vec<RoutePoint>, KioskError>),
}

/// One search box and the results it currently shows.
struct SearchBox {
    results: Vec<String>,
    tickets: TicketCounter,
}

impl SearchBox {
    fn new(initial: Vec<String>) -> Self {
        Self {
            results: initial,
            tickets: TicketCounter::default(),
        }
    }
}

pub struct Kiosk {
    session: RouteSession,
    image_ref: NodeRef,
    canvas_ref: NodeRef,
    markers_ref: NodeRef,
    marker_host: Option<DomMarkerHost>,
    canvas: Option<CanvasSurface>,
    // navigation whose image must be awaited after the next render
    awaiting: Option<u64>,
    sidebar: SearchBox,
    start_box: SearchBox,
    goal_box: SearchBox,
    start: Option<String>,
    goal: Option<String>,
    _resize: EventListener,
}

impl Component for Kiosk {
    type Message = KioskMsg;
    type Properties = KioskProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config.clone();
        let locations = config.initial_locations();

        let resize = {
            let link = ctx.link().clone();
            EventListener::new(&gloo_utils::window(), "resize", move |_| {
                link.send_message(KioskMsg::Resized)
            })
        };

        let mut kiosk = Self {
            session: RouteSession::new(config),
            image_ref: NodeRef::default(),
            canvas_ref: NodeRef::default(),
            markers_ref: NodeRef::default(),
            marker_host: None,
            canvas: None,
            awaiting: None,
            sidebar: SearchBox::new(locations.clone()),
            start_box: SearchBox::new(locations.clone()),
            goal_box: SearchBox::new(locations),
            start: None,
            goal: None,
            _resize: resize,
        };
        let step = kiosk.session.start();
        kiosk.handle_step(step);
        kiosk
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            KioskMsg::SelectFloor(floor) => {
                let step = self.session.select_floor(&floor);
                self.handle_step(step)
            }
            KioskMsg::ImageReady(navigation, Ok(geometry)) => {
                if let Some(plan) = self.session.image_ready(navigation, geometry) {
                    self.paint(&plan);
                }
                true
            }
            KioskMsg::ImageReady(navigation, Err(e)) => {
                log::error!("Navigation #{}: {}", navigation, e);
                let measured = self
                    .image_ref
                    .cast::<HtmlImageElement>()
                    .map(|img| measure_image(&img))
                    .unwrap_or_default();
                if let Some(plan) = self.session.image_failed(navigation, measured) {
                    self.paint(&plan);
                }
                true
            }
            KioskMsg::Resized => {
                let Some(img) = self.image_ref.cast::<HtmlImageElement>() else {
                    return false;
                };
                if let Some(plan) = self.session.resize(measure_image(&img)) {
                    self.paint(&plan);
                }
                false
            }
            KioskMsg::Search(list, query) => {
                let ticket = self.search_box(list).tickets.issue();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::search(&query).await;
                    link.send_message(KioskMsg::SearchResults(list, ticket, result));
                });
                false
            }
            KioskMsg::SearchResults(list, ticket, result) => {
                let search = self.search_box(list);
                if !search.tickets.is_current(ticket) {
                    log::debug!("Dropping stale search response #{}", ticket);
                    return false;
                }
                match result {
                    Ok(names) => {
                        search.results = names;
                        true
                    }
                    Err(e) => {
                        log::error!("Search failed: {}", e);
                        false
                    }
                }
            }
            KioskMsg::Pick(SearchList::Sidebar, name) => {
                let step = self.session.focus_location(&name);
                self.handle_step(step)
            }
            KioskMsg::Pick(SearchList::Start, name) => {
                self.start = Some(name);
                true
            }
            KioskMsg::Pick(SearchList::Goal, name) => {
                self.goal = Some(name);
                true
            }
            KioskMsg::FindRoute => {
                let (start, goal) = match self.validate_route_request() {
                    Ok(pair) => pair,
                    Err(e) => {
                        notify(&e);
                        return false;
                    }
                };
                let ticket = self.session.begin_route_request();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::fetch_route(&start, &goal).await;
                    link.send_message(KioskMsg::RouteLoaded(ticket, result));
                });
                false
            }
            KioskMsg::RouteLoaded(ticket, Ok(coordinates)) => {
                let step = self.session.accept_route(ticket, coordinates);
                self.handle_step(step);
                true
            }
            KioskMsg::RouteLoaded(_, Err(e)) => {
                notify(&e);
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.bind_layers();
        }

        let Some(navigation) = self.awaiting.take() else {
            return;
        };
        let Some(img) = self.image_ref.cast::<HtmlImageElement>() else {
            log::error!("Floor image element missing");
            return;
        };
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = await_image_box(img).await;
            link.send_message(KioskMsg::ImageReady(navigation, result));
        });
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="kiosk">
                { self.render_sidebar(ctx) }
                <main class="kiosk-main">
                    { self.render_route_controls(ctx) }
                    { self.render_floor_selector(ctx) }
                    { self.render_map() }
                </main>
            </div>
        }
    }
}

impl Kiosk {
    fn bind_layers(&mut self) {
        match self.markers_ref.cast::<HtmlElement>() {
            Some(container) => self.marker_host = Some(DomMarkerHost::new(container)),
            None => log::error!("Marker container missing"),
        }
        match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => match CanvasSurface::new(canvas) {
                Ok(surface) => self.canvas = Some(surface),
                Err(e) => log::error!("Route layer unavailable: {}", e),
            },
            None => log::error!("Route canvas missing"),
        }
    }

    /// Returns whether the view has to re-render.
    fn handle_step(&mut self, step: Step) -> bool {
        match step {
            Step::Render(plan) => {
                self.paint(&plan);
                true
            }
            Step::AwaitImage { navigation, image } => {
                log::info!("Loading floor image {}", image);
                self.awaiting = Some(navigation);
                true
            }
            Step::Idle => false,
        }
    }

    fn paint(&mut self, plan: &RenderPlan) {
        match (&mut self.marker_host, &mut self.canvas) {
            (Some(host), Some(canvas)) => self.session.paint(plan, host, canvas),
            _ => log::warn!("Map layers not ready; skipping render"),
        }
    }

    fn search_box(&mut self, list: SearchList) -> &mut SearchBox {
        match list {
            SearchList::Sidebar => &mut self.sidebar,
            SearchList::Start => &mut self.start_box,
            SearchList::Goal => &mut self.goal_box,
        }
    }

    fn validate_route_request(&self) -> Result<(String, String), KioskError> {
        let (Some(start), Some(goal)) = (&self.start, &self.goal) else {
            return Err(KioskError::MissingSelection);
        };
        let config = self.session.config();
        for name in [start, goal] {
            if config.floor_of_node(name).is_none() {
                return Err(KioskError::UnknownLocation(name.clone()));
            }
        }
        Ok((start.clone(), goal.clone()))
    }

    fn render_sidebar(&self, ctx: &Context<Self>) -> Html {
        let onkeypress = ctx.link().batch_callback(|e: KeyboardEvent| {
            if e.key() != "Enter" {
                return None;
            }
            e.target_dyn_into::<HtmlInputElement>()
                .map(|input| KioskMsg::Search(SearchList::Sidebar, input.value()))
        });

        html! {
            <aside class="sidebar">
                <input id="searchBox" type="text" placeholder="Cari toko..." {onkeypress} />
                <ul id="listToko">
                    { for self.sidebar.results.iter().map(|name| {
                        let picked = name.clone();
                        let onclick = ctx.link().callback(move |e: MouseEvent| {
                            e.prevent_default();
                            KioskMsg::Pick(SearchList::Sidebar, picked.clone())
                        });
                        html! {
                            <li class="nav-item">
                                <a href="#" {onclick}>
                                    <i class="fa-solid fa-location-dot"></i>
                                    <span>{ name }</span>
                                </a>
                            </li>
                        }
                    }) }
                </ul>
            </aside>
        }
    }

    fn render_route_controls(&self, ctx: &Context<Self>) -> Html {
        let picker = |id: &'static str, placeholder: &'static str, list: SearchList, selected: &Option<String>, results: &[String]| {
            let link = ctx.link().clone();
            let on_search = link.callback(move |query: String| KioskMsg::Search(list, query));
            let on_pick = link.callback(move |name: String| KioskMsg::Pick(list, name));
            html! {
                <LocationPicker
                    {id}
                    {placeholder}
                    selected={selected.clone()}
                    options={results.to_vec()}
                    {on_search}
                    {on_pick}
                />
            }
        };
        let find_route = ctx.link().callback(|_| KioskMsg::FindRoute);
        let visible = self.session.visible_route().points.len();

        html! {
            <div class="route-controls">
                { picker("lokasiAwal", "Pilih Lokasi Awal", SearchList::Start, &self.start, &self.start_box.results) }
                { picker("lokasiTujuan", "Pilih Lokasi Tujuan", SearchList::Goal, &self.goal, &self.goal_box.results) }
                <button id="cari-rute-btn" onclick={find_route}>{"Cari Rute"}</button>
                { if visible > 0 {
                    html! { <span class="route-summary">{ format!("{} titik di lantai ini", visible) }</span> }
                } else {
                    html! {}
                } }
            </div>
        }
    }

    fn render_floor_selector(&self, ctx: &Context<Self>) -> Html {
        let current = self.session.current_floor().unwrap_or_default();
        let onchange = ctx.link().batch_callback(|e: Event| {
            e.target_dyn_into::<web_sys::HtmlSelectElement>()
                .map(|select| KioskMsg::SelectFloor(select.value()))
        });

        html! {
            <div class="floor-selector">
                <label for="floor-select">{"Lantai: "}</label>
                <select id="floor-select" {onchange}>
                    { for self.session.config().floors.iter().map(|floor| html! {
                        <option value={floor.key.clone()} selected={floor.key == current}>
                            { floor.name.clone() }
                        </option>
                    }) }
                </select>
            </div>
        }
    }

    fn render_map(&self) -> Html {
        let src = self.session.image_src().unwrap_or_default().to_string();
        let loading = self.session.is_loading();

        html! {
            <div class={classes!("peta-container", loading.then_some("loading"))} style="position: relative;">
                <img ref={self.image_ref.clone()} id="floorMap" class="floor-map" {src} alt="Denah lantai" />
                <canvas
                    ref={self.canvas_ref.clone()}
                    style="pointer-events: none; position: absolute; top: 0; left: 0; z-index: 10;"
                ></canvas>
                <div ref={self.markers_ref.clone()} id="marker-container" class="marker-container"></div>
            </div>
        }
    }
}

/// Surface an error the way its kind calls for: a blocking notice for things
/// the user can act on, the console for everything else.
fn notify(err: &KioskError) {
    match err.user_notice() {
        Some(msg) => gloo::dialogs::alert(&msg),
        None => log::error!("Route Error: {}", err),
    }
}
