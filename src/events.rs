// DOM event wiring: taps move the character, Enter or the send button asks a question.

mod keyboard;
mod pointer;

pub use keyboard::wire_question_form;
pub use pointer::wire_anchor_taps;

use crate::core::{Rejection, Session, SubmitOutcome};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Shared state every handler needs.
#[derive(Clone)]
pub struct EventWiring {
    pub session: Rc<RefCell<Session>>,
    pub clock: Instant,
}

impl EventWiring {
    fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }
}

/// Hand the input's text to the session; the field is cleared only when the
/// question was accepted.
pub(crate) fn submit_from_input(w: &EventWiring, input: &web::HtmlInputElement) {
    let text = input.value();
    let outcome = w.session.borrow_mut().submit(&text, w.now());
    match outcome {
        SubmitOutcome::Accepted => input.set_value(""),
        SubmitOutcome::Rejected(Rejection::Empty) => {}
        SubmitOutcome::Rejected(Rejection::Busy) => {
            log::info!("[events] still answering; kept input text");
        }
    }
}
