// Speech bubble DOM element: text, visibility, position and mood styling.

use crate::core::session::BubbleState;
use crate::core::{BubblePlacement, Mood};
use web_sys as web;

#[inline]
pub fn show(el: &web::HtmlElement) {
    _ = el.class_list().remove_1("hidden");
}

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.class_list().add_1("hidden");
}

#[inline]
pub fn is_hidden(el: &web::HtmlElement) -> bool {
    el.class_list().contains("hidden")
}

#[inline]
pub fn set_position(el: &web::HtmlElement, x: f32, y: f32) {
    let style = el.style();
    _ = style.set_property("left", &format!("{:.1}px", x));
    _ = style.set_property("top", &format!("{:.1}px", y));
}

/// Mirrors session bubble state into the DOM, writing only what changed.
pub struct BubbleView {
    el: web::HtmlElement,
    revision: Option<u64>,
    mood: Option<Mood>,
}

impl BubbleView {
    pub fn new(el: web::HtmlElement) -> Self {
        hide(&el);
        Self {
            el,
            revision: None,
            mood: None,
        }
    }

    pub fn sync_text(&mut self, bubble: &BubbleState) {
        if self.revision == Some(bubble.revision()) {
            return;
        }
        self.revision = Some(bubble.revision());
        if let Some(text) = bubble.text() {
            self.el.set_text_content(Some(text));
        }
    }

    pub fn sync_mood(&mut self, mood: Mood) {
        if self.mood == Some(mood) {
            return;
        }
        self.mood = Some(mood);
        _ = self.el.set_attribute("data-mood", mood.as_str());
    }

    pub fn sync_visibility(&self, visible: bool) {
        if visible == is_hidden(&self.el) {
            if visible {
                show(&self.el);
            } else {
                hide(&self.el);
            }
        }
    }

    pub fn place(&self, placement: BubblePlacement) {
        match placement {
            BubblePlacement::At { x, y } => set_position(&self.el, x, y),
            BubblePlacement::Hidden => hide(&self.el),
        }
    }
}
