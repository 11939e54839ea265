use super::{submit_from_input, EventWiring};
use crate::dom;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Enter in the question field and clicks on the send button both submit.
pub fn wire_question_form(
    w: &EventWiring,
    document: &web::Document,
    input_el: &web::HtmlInputElement,
    send_id: &str,
) {
    {
        let w = w.clone();
        let field = input_el.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if !input::is_submit_key(&ev.key(), ev.is_composing()) {
                    return;
                }
                ev.prevent_default();
                submit_from_input(&w, &field);
            }) as Box<dyn FnMut(web::KeyboardEvent)>);
        _ = input_el.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let w = w.clone();
    let field = input_el.clone();
    dom::add_click_listener(document, send_id, move || submit_from_input(&w, &field));
}
