// Host-side tests for the interaction sequence driven by `Session::tick`.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod mood {
        include!("../src/core/mood.rs");
    }
    pub mod chat {
        include!("../src/core/chat.rs");
    }
    pub mod blend {
        include!("../src/core/blend.rs");
    }
    pub mod projection {
        include!("../src/core/projection.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
}

use crate::core::blend::{idle_pose, Overlay};
use crate::core::chat::{FALLBACK_ANSWER, REPLY_RULES};
use crate::core::constants::*;
use crate::core::mood::Mood;
use crate::core::session::{Phase, Rejection, Session, SubmitOutcome};

// Just past the point where the thinking pause ends
const REPLY_AT: f64 = 0.62;

fn loaded_session() -> Session {
    let mut s = Session::new(42);
    s.mark_character_loaded();
    s
}

#[test]
fn new_session_is_idle_and_neutral() {
    let s = Session::new(1);
    assert_eq!(*s.phase(), Phase::Idle);
    assert_eq!(s.mood(0.0), Mood::Neutral);
    assert!(!s.character_loaded());
    assert_eq!(s.anchor(), ANCHOR_START);
    assert!(s.bubble().text().is_none());
}

#[test]
fn empty_or_blank_submission_is_a_no_op() {
    let mut s = loaded_session();
    assert_eq!(s.submit("", 0.0), SubmitOutcome::Rejected(Rejection::Empty));
    assert_eq!(s.submit("   \t", 0.0), SubmitOutcome::Rejected(Rejection::Empty));
    assert_eq!(*s.phase(), Phase::Idle);
    assert_eq!(s.bubble().revision(), 0);
    assert!(!s.nod_active(0.1));
}

#[test]
fn full_sequence_timing() {
    let mut s = loaded_session();
    assert_eq!(s.submit("  kaggle  ", 0.0), SubmitOutcome::Accepted);
    assert_eq!(s.bubble().text(), Some(THINKING_TEXT));
    assert!(s.nod_active(0.1));
    assert!(matches!(s.phase(), Phase::Thinking { question, .. } if question == "kaggle"));

    // Still thinking: the nod is over but the pause is not
    s.tick(0.3);
    assert!(!s.nod_active(0.3));
    s.tick(0.6);
    assert!(matches!(s.phase(), Phase::Thinking { .. }));
    assert_eq!(s.bubble().text(), Some(THINKING_TEXT));

    s.tick(REPLY_AT);
    assert_eq!(*s.phase(), Phase::Responding { since: REPLY_AT });
    assert_eq!(s.bubble().text(), Some(REPLY_RULES[1].answer));
    assert!(s.nod_active(REPLY_AT + 0.1));

    s.tick(REPLY_AT + 0.2);
    assert!(s.is_busy());
    s.tick(REPLY_AT + 0.3);
    assert_eq!(*s.phase(), Phase::Idle);
}

#[test]
fn thanks_pops_and_turns_happy() {
    let mut s = loaded_session();
    s.submit("ありがとう", 0.0);
    s.tick(REPLY_AT);
    assert_eq!(s.bubble().text(), Some(FALLBACK_ANSWER));
    assert!(s.pop_active(REPLY_AT + 0.1));
    assert_eq!(s.mood(REPLY_AT + 1.0), Mood::Happy);

    // Pop lasts 0.3 s, mood 6 s
    s.tick(REPLY_AT + 0.35);
    assert!(!s.pop_active(REPLY_AT + 0.35));
    assert_eq!(s.mood(REPLY_AT + 5.9), Mood::Happy);
    s.tick(REPLY_AT + REPLY_MOOD_SEC + 0.01);
    assert_eq!(s.mood(REPLY_AT + REPLY_MOOD_SEC + 0.01), Mood::Neutral);
}

#[test]
fn sad_reply_does_not_pop() {
    let mut s = loaded_session();
    s.submit("今日は疲れた", 0.0);
    s.tick(REPLY_AT);
    assert_eq!(s.mood(REPLY_AT), Mood::Sad);
    assert!(!s.pop_active(REPLY_AT + 0.1));
}

#[test]
fn mood_expiry_does_not_depend_on_frame_rate() {
    let mut sparse = loaded_session();
    let mut dense = loaded_session();
    sparse.submit("wow", 0.0);
    dense.submit("wow", 0.0);

    sparse.tick(REPLY_AT);
    dense.tick(REPLY_AT);
    let mut t = REPLY_AT;
    while t < REPLY_AT + 7.0 {
        dense.tick(t);
        t += 1.0 / 60.0;
    }
    // One sparse tick long after expiry
    sparse.tick(REPLY_AT + 7.0);
    dense.tick(REPLY_AT + 7.0);
    assert_eq!(sparse.mood(REPLY_AT + 7.0), Mood::Neutral);
    assert_eq!(dense.mood(REPLY_AT + 7.0), Mood::Neutral);
    assert_eq!(sparse.mood(REPLY_AT + 5.0), dense.mood(REPLY_AT + 5.0));
}

#[test]
fn animation_returns_to_idle_once_mood_expires() {
    let mut s = loaded_session();
    s.submit("wow", 0.0);
    s.tick(REPLY_AT);
    assert_eq!(s.mood(REPLY_AT), Mood::Surprised);

    let t = REPLY_AT + REPLY_MOOD_SEC + 0.01;
    s.tick(t);
    let overlays = s.overlays(t);
    assert_eq!(overlays.as_slice(), &[Overlay::Mood(Mood::Neutral)]);
    assert_eq!(s.pose(t), Some(idle_pose(s.anchor(), t)));
}

#[test]
fn thinking_sets_short_neutral_mood() {
    let mut s = loaded_session();
    s.submit("最悪", 0.0);
    s.tick(REPLY_AT);
    assert_eq!(s.mood(REPLY_AT), Mood::Angry);
    s.tick(REPLY_AT + 0.3);

    // A new question clears the angry mood for the thinking window
    assert_eq!(s.submit("kaggle", 1.0), SubmitOutcome::Accepted);
    assert_eq!(s.mood(1.0), Mood::Neutral);
    assert_eq!(s.mood(1.0 + THINK_MOOD_SEC + 0.01), Mood::Neutral);
}

#[test]
fn busy_session_drops_new_questions() {
    let mut s = loaded_session();
    assert_eq!(s.submit("colab", 0.0), SubmitOutcome::Accepted);
    assert_eq!(s.submit("kaggle", 0.1), SubmitOutcome::Rejected(Rejection::Busy));

    s.tick(REPLY_AT);
    // The first question is the one answered
    assert_eq!(s.bubble().text(), Some(REPLY_RULES[0].answer));
    assert_eq!(
        s.submit("kaggle", REPLY_AT + 0.1),
        SubmitOutcome::Rejected(Rejection::Busy)
    );

    s.tick(REPLY_AT + 0.3);
    assert_eq!(s.submit("kaggle", REPLY_AT + 0.4), SubmitOutcome::Accepted);
}

#[test]
fn unloaded_character_only_updates_text() {
    let mut s = Session::new(7);
    assert_eq!(s.submit("ありがとう", 0.0), SubmitOutcome::Accepted);
    assert_eq!(s.bubble().text(), Some(THINKING_TEXT));
    assert!(!s.nod_active(0.1));

    s.tick(REPLY_AT);
    assert_eq!(s.bubble().text(), Some(FALLBACK_ANSWER));
    assert!(!s.pop_active(REPLY_AT + 0.1));
    assert!(!s.nod_active(REPLY_AT + 0.1));
    assert_eq!(s.mood(REPLY_AT + 0.1), Mood::Neutral);
    assert!(s.pose(REPLY_AT + 0.1).is_none());
    assert!(!s.bubble_visible());
}

#[test]
fn anchor_is_clamped_and_needs_a_character() {
    let mut s = Session::new(3);
    assert!(!s.set_anchor_x(0.2));
    assert_eq!(s.anchor(), ANCHOR_START);

    s.mark_character_loaded();
    assert!(s.set_anchor_x(0.2));
    assert_eq!(s.anchor().x, 0.2);
    assert!(s.set_anchor_x(10.0));
    assert_eq!(s.anchor().x, ANCHOR_X_LIMIT);
    assert!(s.set_anchor_x(-10.0));
    assert_eq!(s.anchor().x, -ANCHOR_X_LIMIT);

    assert!(!s.set_anchor_x(f32::NAN));
    assert!(!s.set_anchor_x(f32::INFINITY));
    assert_eq!(s.anchor().x, -ANCHOR_X_LIMIT);
    // y and z never move
    assert_eq!(s.anchor().y, ANCHOR_START.y);
    assert_eq!(s.anchor().z, ANCHOR_START.z);
}

#[test]
fn overlays_are_ordered_pop_mood_nod() {
    let mut s = loaded_session();
    s.submit("ありがとう", 0.0);
    s.tick(REPLY_AT);
    let names: Vec<_> = s
        .overlays(REPLY_AT + 0.1)
        .iter()
        .map(Overlay::name)
        .collect();
    assert_eq!(names, ["pop", "mood", "nod"]);
}

#[test]
fn pose_follows_anchor() {
    let mut s = loaded_session();
    s.set_anchor_x(0.3);
    let pose = s.pose(2.0).expect("loaded character has a pose");
    assert!((pose.position.x - 0.3).abs() < 1e-6);
    assert!((pose.position.z - ANCHOR_START.z).abs() < 1e-6);
    assert!((pose.scale - BASE_SCALE).abs() < 1e-6);
}

#[test]
fn bubble_text_change_bumps_revision_and_unhides() {
    let mut s = loaded_session();
    s.set_bubble("a");
    let r = s.bubble().revision();
    assert!(s.bubble_visible());
    s.set_bubble("b");
    assert!(s.bubble().revision() > r);
    assert_eq!(s.bubble().text(), Some("b"));
}
