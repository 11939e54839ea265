// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
}
mod input {
    include!("../src/input.rs");
}

use crate::core::constants::{ANCHOR_TAP_SPAN, ANCHOR_X_LIMIT};
use input::*;

#[test]
fn tap_centre_keeps_anchor_centred() {
    assert_eq!(anchor_x_for_tap(400.0, 800.0), Some(0.0));
}

#[test]
fn tap_edges_map_to_span() {
    let left = anchor_x_for_tap(0.0, 800.0).unwrap();
    let right = anchor_x_for_tap(800.0, 800.0).unwrap();
    assert!((left + ANCHOR_TAP_SPAN).abs() < 1e-6);
    assert!((right - ANCHOR_TAP_SPAN).abs() < 1e-6);
}

#[test]
fn tap_quarter_width() {
    let x = anchor_x_for_tap(200.0, 800.0).unwrap();
    assert!((x + ANCHOR_TAP_SPAN * 0.5).abs() < 1e-6);
}

#[test]
fn taps_outside_viewport_are_clamped() {
    for client_x in [-5000.0, -1.0, 801.0, 1e9] {
        let x = anchor_x_for_tap(client_x, 800.0).unwrap();
        assert!(x.abs() <= ANCHOR_X_LIMIT, "{} -> {}", client_x, x);
    }
    assert_eq!(anchor_x_for_tap(1e9, 800.0), Some(ANCHOR_X_LIMIT));
    assert_eq!(anchor_x_for_tap(-1e9, 800.0), Some(-ANCHOR_X_LIMIT));
}

#[test]
fn unmappable_taps_are_ignored() {
    assert_eq!(anchor_x_for_tap(10.0, 0.0), None);
    assert_eq!(anchor_x_for_tap(10.0, -5.0), None);
    assert_eq!(anchor_x_for_tap(f32::NAN, 800.0), None);
    assert_eq!(anchor_x_for_tap(f32::INFINITY, 800.0), None);
    assert_eq!(anchor_x_for_tap(10.0, f32::NAN), None);
    assert_eq!(anchor_x_for_tap(10.0, f32::INFINITY), None);
}

#[test]
fn enter_submits_unless_composing() {
    assert!(is_submit_key("Enter", false));
    assert!(!is_submit_key("Enter", true));
    assert!(!is_submit_key("a", false));
    assert!(!is_submit_key("NumpadEnter", false));
}
