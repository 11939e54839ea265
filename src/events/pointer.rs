use super::EventWiring;
use crate::dom;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Any tap on the page re-anchors the character horizontally.
pub fn wire_anchor_taps(w: &EventWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let viewport = dom::viewport_size();
        let Some(x) = input::pointer_anchor_x(&ev, viewport.width) else {
            return;
        };
        if w.session.borrow_mut().set_anchor_x(x) {
            log::debug!("[events] anchor x -> {:.3}", x);
        }
    }) as Box<dyn FnMut(web::PointerEvent)>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
