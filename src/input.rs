use crate::core::constants::{ANCHOR_TAP_SPAN, ANCHOR_X_LIMIT};
use web_sys as web;

/// Map a tap's client x to the anchor's world x.
///
/// The viewport's left edge maps to `-ANCHOR_TAP_SPAN` and the right edge
/// to `+ANCHOR_TAP_SPAN`; taps outside the viewport are clamped. Returns `None` when the
/// input cannot be mapped (zero-width viewport, non-finite coordinates).
#[inline]
pub fn anchor_x_for_tap(client_x: f32, viewport_width: f32) -> Option<f32> {
    if !client_x.is_finite() || !viewport_width.is_finite() || viewport_width <= 0.0 {
        return None;
    }
    let nx = (client_x / viewport_width) * 2.0 - 1.0;
    Some((nx * ANCHOR_TAP_SPAN).clamp(-ANCHOR_X_LIMIT, ANCHOR_X_LIMIT))
}

#[inline]
pub fn pointer_anchor_x(ev: &web::PointerEvent, viewport_width: f32) -> Option<f32> {
    anchor_x_for_tap(ev.client_x() as f32, viewport_width)
}

/// True for a plain Enter press that should submit the question.
///
/// Enter while an IME composition is active only commits the composition.
#[inline]
pub fn is_submit_key(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}
