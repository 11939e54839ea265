// Host-side tests for idle motion and overlay envelopes.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod mood {
        include!("../src/core/mood.rs");
    }
    pub mod blend {
        include!("../src/core/blend.rs");
    }
}

use crate::core::blend::*;
use crate::core::constants::*;
use crate::core::mood::Mood;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn half_sine_envelope_shape() {
    assert_eq!(half_sine(-0.5), 0.0);
    assert_eq!(half_sine(0.0), 0.0);
    assert_eq!(half_sine(1.0), 0.0);
    assert_eq!(half_sine(1.5), 0.0);
    assert!((half_sine(0.5) - 1.0).abs() < 1e-6);
    assert!((half_sine(0.25) - half_sine(0.75)).abs() < 1e-6);
}

#[test]
fn progress_window_is_half_open() {
    assert_eq!(progress(1.0, 1.0, 0.5), Some(0.0));
    assert_eq!(progress(0.99, 1.0, 0.5), None);
    assert_eq!(progress(1.5, 1.0, 0.5), None);
    let mid = progress(1.25, 1.0, 0.5).unwrap();
    assert!((mid - 0.5).abs() < 1e-12);
}

#[test]
fn pop_is_zero_at_both_ends_and_positive_inside() {
    let mut r = rng();
    let start = 0.0;
    let pop = Overlay::Pop { start };
    assert!(pop.delta(start, &mut r).is_identity());
    assert!(pop.delta(start + POP_DURATION_SEC, &mut r).is_identity());
    assert!(pop.delta(start - 0.01, &mut r).is_identity());

    let mid = pop.delta(start + POP_DURATION_SEC / 2.0, &mut r);
    assert!((mid.translation.y - POP_HEIGHT).abs() < 1e-4);
    assert!((mid.scale - (1.0 + POP_SCALE_BOOST)).abs() < 1e-4);

    let early = pop.delta(start + 0.03, &mut r);
    assert!(early.translation.y > 0.0 && early.translation.y < POP_HEIGHT);
}

#[test]
fn nod_is_zero_at_both_ends_and_peaks_mid_way() {
    let mut r = rng();
    let nod = Overlay::Nod { start: 0.0 };
    assert!(nod.delta(0.0, &mut r).is_identity());
    assert!(nod.delta(NOD_DURATION_SEC, &mut r).is_identity());
    let mid = nod.delta(NOD_DURATION_SEC / 2.0, &mut r);
    assert!((mid.rotation.x - NOD_ANGLE).abs() < 1e-4);
    assert_eq!(mid.translation, Vec3::ZERO);
}

#[test]
fn neutral_mood_is_identity() {
    let mut r = rng();
    assert!(Overlay::Mood(Mood::Neutral).delta(0.0, &mut r).is_identity());
}

#[test]
fn angry_jitter_stays_bounded_and_moves() {
    let mut r = rng();
    let angry = Overlay::Mood(Mood::Angry);
    let mut moved = false;
    for i in 0..1000 {
        let d = angry.delta(i as f64 / 60.0, &mut r);
        assert!(d.translation.x.abs() <= ANGRY_JITTER + 1e-7);
        assert!(d.translation.y.abs() <= ANGRY_JITTER + 1e-7);
        assert_eq!(d.translation.z, 0.0);
        moved |= d.translation.x != 0.0;
    }
    assert!(moved);
}

#[test]
fn non_angry_moods_are_deterministic() {
    for mood in [Mood::Happy, Mood::Sad, Mood::Surprised] {
        let a = Overlay::Mood(mood).delta(0.0, &mut StdRng::seed_from_u64(1));
        let b = Overlay::Mood(mood).delta(9.0, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b, "{:?}", mood);
    }
}

#[test]
fn mood_profiles_have_expected_direction() {
    assert!(mood_profile(Mood::Happy).lift > 0.0);
    assert!(mood_profile(Mood::Sad).lift < 0.0);
    assert!(mood_profile(Mood::Sad).scale < 1.0);
    assert!(mood_profile(Mood::Surprised).scale > mood_profile(Mood::Happy).scale);
    assert_eq!(mood_profile(Mood::Angry).jitter, ANGRY_JITTER);
}

#[test]
fn idle_pose_depends_on_time_only() {
    let anchor = Vec3::new(0.1, -0.35, -1.2);
    assert_eq!(idle_pose(anchor, 1.234), idle_pose(anchor, 1.234));

    let p0 = idle_pose(anchor, 0.0);
    assert_eq!(p0.position, anchor);
    assert_eq!(p0.rotation, Vec3::ZERO);
    assert_eq!(p0.scale, BASE_SCALE);

    for i in 0..200 {
        let p = idle_pose(anchor, i as f64 * 0.37);
        assert!((p.position.y - anchor.y).abs() <= IDLE_BOB_AMP + 1e-6);
        assert!(p.rotation.y.abs() <= IDLE_SWAY_AMP + 1e-6);
        assert!(p.rotation.x.abs() <= IDLE_TILT_AMP + 1e-6);
        assert_eq!(p.position.x, anchor.x);
    }
}

#[test]
fn blend_with_neutral_mood_equals_idle() {
    let anchor = ANCHOR_START;
    let pose = blend(anchor, 3.3, &[Overlay::Mood(Mood::Neutral)], &mut rng());
    assert_eq!(pose, idle_pose(anchor, 3.3));
}

#[test]
fn blend_stacks_pop_mood_and_nod() {
    let anchor = ANCHOR_START;
    let now = 10.1;
    let overlays = [
        Overlay::Pop { start: 10.0 },
        Overlay::Mood(Mood::Happy),
        Overlay::Nod { start: 10.0 },
    ];
    let idle = idle_pose(anchor, now);
    let pose = blend(anchor, now, &overlays, &mut rng());
    assert!(pose.position.y > idle.position.y);
    assert!(pose.scale > idle.scale);
    // Happy tilts back, nod tilts forward; both contribute
    let happy = mood_profile(Mood::Happy).tilt_x;
    assert!(pose.rotation.x > idle.rotation.x + happy);
}

#[test]
fn model_matrix_places_origin_at_position() {
    let pose = Pose {
        position: Vec3::new(0.2, -0.3, -1.0),
        rotation: Vec3::new(0.1, 0.5, 0.0),
        scale: 0.6,
    };
    let m = pose.model_matrix();
    let origin = m.transform_point3(Vec3::ZERO);
    assert!((origin - pose.position).length() < 1e-6);
    let unit = m.transform_vector3(Vec3::X).length();
    assert!((unit - 0.6).abs() < 1e-5);
}
