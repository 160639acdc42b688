use crate::constants::MAX_PIXEL_RATIO;
use crate::input;
use folio_core::TriggerLayout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Attach a listener that lives as long as the page.
pub fn on(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_event(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `f` once the window `load` event has fired, immediately when it
/// already has. Module start usually races ahead of `load`.
pub fn on_page_load(document: &web::Document, f: impl FnOnce() + 'static) {
    if input::page_loaded(&document.ready_state()) {
        f();
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    let mut once = Some(f);
    on(&window, "load", move || {
        if let Some(f) = once.take() {
            f();
        }
    });
}

/// Elements of a `querySelectorAll` result, in document order.
pub fn elements(list: Result<web::NodeList, JsValue>) -> Vec<web::Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn html(found: Result<Option<web::Element>, JsValue>) -> Option<web::HtmlElement> {
    found
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn scroll_y() -> f64 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (width, height)
}

/// Document-relative layout of the first element matching `selector`.
pub fn measure(document: &web::Document, selector: &str) -> Option<TriggerLayout> {
    let el = document.query_selector(selector).ok().flatten()?;
    Some(element_layout(&el))
}

pub fn element_layout(el: &web::Element) -> TriggerLayout {
    let rect = el.get_bounding_client_rect();
    TriggerLayout {
        top: input::document_top(rect.top(), scroll_y()),
        height: rect.height() as f32,
    }
}

/// Size the canvas backing store to the viewport at a capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = input::capped_pixel_ratio(w.device_pixel_ratio(), MAX_PIXEL_RATIO);
    let (css_w, css_h) = viewport_size();
    let (w_px, h_px) = input::backing_size(css_w, css_h, dpr);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

/// Run `f` once after `ms` milliseconds, without a handle.
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            input::timeout_ms(ms),
        );
    }
    closure.forget();
}

/// Fade an element out, then detach it.
pub fn fade_and_remove(el: &web::HtmlElement, fade_ms: u32) {
    set_style(el, "opacity", "0");
    let el = el.clone();
    after(fade_ms, move || el.remove());
}
