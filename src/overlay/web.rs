// src/overlay/web.rs
//
// Browser implementations of the overlay layers, plus the image-ready future
// the kiosk awaits after every floor change.

use super::markers::marker_dom_id;
use super::{MarkerHost, MarkerView, RouteCanvas, StrokeStyle};
use crate::error::KioskError;
use crate::geometry::{tooltip_position, ImageBox, Point};
use futures::channel::oneshot;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, HtmlElement, HtmlImageElement};

const MARKER_ICON: &str = "/static/images/ikon-lokasi-20px.png";
const HIGHLIGHT_MS: u32 = 2000;

fn dom_err(err: JsValue) -> KioskError {
    KioskError::Dom(format!("{:?}", err))
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("Could not set {} on element: {:?}", property, e);
    }
}

fn dispatch(el: &Element, kind: &str) {
    match Event::new(kind) {
        Ok(event) => {
            let _ = el.dispatch_event(&event);
        }
        Err(e) => log::warn!("Could not create {} event: {:?}", kind, e),
    }
}

/// Marker icons and their tooltips, absolutely positioned inside a container
/// that overlays the floor image.
pub struct DomMarkerHost {
    container: HtmlElement,
    listeners: Vec<EventListener>,
}

impl DomMarkerHost {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            listeners: Vec::new(),
        }
    }

    fn create_div(class: &str) -> Result<HtmlElement, KioskError> {
        let el = gloo_utils::document()
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| KioskError::Dom("created element is not an HtmlElement".into()))?;
        el.set_class_name(class);
        Ok(el)
    }
}

impl MarkerHost for DomMarkerHost {
    fn clear(&mut self) {
        self.listeners.clear();
        self.container.set_inner_html("");
    }

    fn place(&mut self, marker: MarkerView) -> Result<(), KioskError> {
        let marker_el = Self::create_div("marker")?;
        marker_el.set_id(&marker.dom_id);
        set_style(&marker_el, "left", &format!("{}px", marker.left));
        set_style(&marker_el, "top", &format!("{}px", marker.top));
        set_style(&marker_el, "background-image", &format!("url({})", MARKER_ICON));

        let tooltip = Self::create_div("tooltip")?;
        tooltip.set_text_content(Some(&marker.label));

        let anchor = Point::new(marker.left, marker.top);
        let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();

        let enter = {
            let tooltip = tooltip.clone();
            let frame = frame.clone();
            EventListener::new(&marker_el, "mouseenter", move |_| {
                set_style(&tooltip, "display", "block");
                let tooltip = tooltip.clone();
                // the tooltip has no size until it is laid out
                *frame.borrow_mut() = Some(request_animation_frame(move |_| {
                    let rect = tooltip.get_bounding_client_rect();
                    let pos = tooltip_position(anchor, rect.width(), rect.height());
                    set_style(&tooltip, "left", &format!("{}px", pos.x));
                    set_style(&tooltip, "top", &format!("{}px", pos.y));
                    set_style(&tooltip, "opacity", "1");
                }));
            })
        };

        let leave = {
            let tooltip = tooltip.clone();
            EventListener::new(&marker_el, "mouseleave", move |_| {
                frame.borrow_mut().take();
                set_style(&tooltip, "display", "none");
                set_style(&tooltip, "opacity", "0");
            })
        };

        self.container.append_child(&marker_el).map_err(dom_err)?;
        self.container.append_child(&tooltip).map_err(dom_err)?;
        self.listeners.push(enter);
        self.listeners.push(leave);
        Ok(())
    }

    fn highlight(&mut self, name: &str) -> bool {
        let Some(el) = gloo_utils::document()
            .get_element_by_id(&marker_dom_id(name))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };

        set_style(&el, "z-index", "100");
        dispatch(&el, "mouseenter");

        Timeout::new(HIGHLIGHT_MS, move || {
            set_style(&el, "transform", "scale(1)");
            set_style(&el, "z-index", "30");
            set_style(&el, "filter", "none");
            dispatch(&el, "mouseleave");
        })
        .forget();
        true
    }
}

/// The 2d canvas the route is stroked on.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, KioskError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(dom_err)?
            .ok_or_else(|| KioskError::Dom("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| KioskError::Dom("unexpected canvas context type".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl RouteCanvas for CanvasSurface {
    fn resize(&mut self, size: ImageBox) {
        self.canvas.set_width(size.width.max(0.0).round() as u32);
        self.canvas.set_height(size.height.max(0.0).round() as u32);
    }

    fn size(&self) -> ImageBox {
        ImageBox::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str(style.color);
        ctx.set_line_width(style.width);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_shadow_color(style.shadow_color);
        ctx.set_shadow_blur(style.shadow_blur);
        let dash = js_sys::Array::of2(&JsValue::from(style.dash[0]), &JsValue::from(style.dash[1]));
        if let Err(e) = ctx.set_line_dash(&dash) {
            log::warn!("Could not set route dash pattern: {:?}", e);
        }

        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
        ctx.stroke();

        let _ = ctx.set_line_dash(&js_sys::Array::new());
        ctx.set_shadow_blur(0.0);
        ctx.restore();
    }
}

/// Size the floor image currently occupies on screen.
pub fn measure_image(img: &HtmlImageElement) -> ImageBox {
    ImageBox::new(img.offset_width() as f64, img.offset_height() as f64)
}

/// Resolves once `img` has finished loading its current source, with the
/// size it was laid out at.
pub async fn await_image_box(img: HtmlImageElement) -> Result<ImageBox, KioskError> {
    if img.complete() && img.natural_width() != 0 {
        return Ok(measure_image(&img));
    }

    let (tx, rx) = oneshot::channel::<Result<(), KioskError>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let _on_load = {
        let tx = tx.clone();
        EventListener::once(&img, "load", move |_| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        })
    };
    let _on_error = {
        let src = img.src();
        EventListener::once(&img, "error", move |_| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(KioskError::ImageLoad(src)));
            }
        })
    };

    match rx.await {
        Ok(Ok(())) => Ok(measure_image(&img)),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(KioskError::ImageLoad(img.src())),
    }
}
