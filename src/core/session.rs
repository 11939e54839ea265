// All mutable character state for one page session.
//
// `Session` owns mood, pop, nod, anchor and bubble text, and drives the
// question/answer sequence from the frame tick:
//
// `Idle -> Thinking -> Responding -> Idle`
//
// Time is always passed in as seconds since the session clock started, which
// keeps every transition reproducible in tests.

use super::blend::{self, Overlay, Pose};
use super::chat::{self, Reply};
use super::constants::*;
use super::mood::{Mood, MoodState};
use super::projection::{project_to_screen, BubblePlacement, Camera, Viewport};
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

/// Text and visibility of the speech bubble.
///
/// `revision` bumps on every change so the DOM side can skip redundant writes.
#[derive(Clone, Debug, Default)]
pub struct BubbleState {
    text: Option<String>,
    hidden: bool,
    revision: u64,
}

impl BubbleState {
    /// Replace the text; a new text always un-hides the bubble.
    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.hidden = false;
        self.revision += 1;
    }

    pub fn hide(&mut self) {
        if !self.hidden {
            self.hidden = true;
            self.revision += 1;
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Thinking { since: f64, question: String },
    Responding { since: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Blank after trimming.
    Empty,
    /// Another question is still being answered.
    Busy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(Rejection),
}

pub struct Session {
    mood: MoodState,
    pop: Option<f64>,
    nod: Option<f64>,
    anchor: Vec3,
    bubble: BubbleState,
    character_loaded: bool,
    phase: Phase,
    rng: StdRng,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            mood: MoodState::default(),
            pop: None,
            nod: None,
            anchor: ANCHOR_START,
            bubble: BubbleState::default(),
            character_loaded: false,
            phase: Phase::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn character_loaded(&self) -> bool {
        self.character_loaded
    }

    pub fn mark_character_loaded(&mut self) {
        self.character_loaded = true;
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Move the anchor horizontally. Clamped; non-finite input and an absent
    /// character leave it untouched. Returns whether the anchor changed.
    pub fn set_anchor_x(&mut self, x: f32) -> bool {
        if !self.character_loaded || !x.is_finite() {
            return false;
        }
        self.anchor.x = x.clamp(-ANCHOR_X_LIMIT, ANCHOR_X_LIMIT);
        true
    }

    /// Mood in effect at `now`.
    pub fn mood(&self, now: f64) -> Mood {
        self.mood.current(now)
    }

    pub fn pop_active(&self, now: f64) -> bool {
        self.pop
            .is_some_and(|start| blend::progress(now, start, POP_DURATION_SEC).is_some())
    }

    pub fn nod_active(&self, now: f64) -> bool {
        self.nod
            .is_some_and(|start| blend::progress(now, start, NOD_DURATION_SEC).is_some())
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn bubble(&self) -> &BubbleState {
        &self.bubble
    }

    pub fn set_bubble(&mut self, text: &str) {
        self.bubble.set_text(text);
    }

    /// The bubble is shown only for a loaded character with text that has not
    /// been hidden by the projector.
    pub fn bubble_visible(&self) -> bool {
        self.character_loaded && self.bubble.text().is_some() && !self.bubble.is_hidden()
    }

    /// Start answering a question. Blank input is ignored; a question arriving
    /// while another one is in flight is dropped.
    pub fn submit(&mut self, text: &str, now: f64) -> SubmitOutcome {
        let question = text.trim();
        if question.is_empty() {
            return SubmitOutcome::Rejected(Rejection::Empty);
        }
        if self.is_busy() {
            log::warn!("[session] question already in flight; dropping new one");
            return SubmitOutcome::Rejected(Rejection::Busy);
        }

        self.bubble.set_text(THINKING_TEXT);
        if self.character_loaded {
            self.mood.set(Mood::Neutral, now, THINK_MOOD_SEC);
            self.nod = Some(now);
        }
        self.phase = Phase::Thinking {
            since: now,
            question: question.to_string(),
        };
        log::info!(
            "[session] thinking about {} chars at {:.2}s",
            question.chars().count(),
            now
        );
        SubmitOutcome::Accepted
    }

    /// Advance timers and the interaction sequence. Call once per frame,
    /// before `pose`.
    pub fn tick(&mut self, now: f64) {
        if self.mood.expire(now) {
            log::debug!("[session] mood back to neutral at {:.2}s", now);
        }
        if self.pop.is_some_and(|start| now >= start + POP_DURATION_SEC) {
            self.pop = None;
        }
        if self.nod.is_some_and(|start| now >= start + NOD_DURATION_SEC) {
            self.nod = None;
        }

        let (reply, finished) = match &self.phase {
            Phase::Thinking { since, question }
                if now >= since + NOD_DURATION_SEC + THINK_DELAY_SEC =>
            {
                (Some(chat::reply(question)), false)
            }
            Phase::Responding { since } => (None, now >= since + NOD_DURATION_SEC),
            _ => (None, false),
        };
        if let Some(reply) = reply {
            self.respond(reply, now);
        } else if finished {
            self.phase = Phase::Idle;
        }
    }

    fn respond(&mut self, reply: Reply, now: f64) {
        self.bubble.set_text(reply.answer);
        if self.character_loaded {
            if reply.mood.triggers_pop() {
                self.pop = Some(now);
            }
            self.mood.set(reply.mood, now, REPLY_MOOD_SEC);
            self.nod = Some(now);
        }
        self.phase = Phase::Responding { since: now };
        log::info!("[session] replying with mood={}", reply.mood.as_str());
    }

    /// Overlays active at `now`, in application order.
    pub fn overlays(&self, now: f64) -> SmallVec<[Overlay; 3]> {
        let mut list = SmallVec::new();
        if let Some(start) = self.pop {
            list.push(Overlay::Pop { start });
        }
        list.push(Overlay::Mood(self.mood.current(now)));
        if let Some(start) = self.nod {
            list.push(Overlay::Nod { start });
        }
        list
    }

    /// Character transform for this frame; `None` until the model is loaded.
    pub fn pose(&mut self, now: f64) -> Option<Pose> {
        if !self.character_loaded {
            return None;
        }
        let overlays = self.overlays(now);
        Some(blend::blend(self.anchor, now, &overlays, &mut self.rng))
    }

    /// Project the bubble anchor above the character. Returns `None` when the
    /// bubble should not be touched this frame. Projecting off screen hides
    /// the bubble until its text changes again.
    pub fn place_bubble(
        &mut self,
        pose: Option<&Pose>,
        camera: &Camera,
        viewport: Viewport,
    ) -> Option<BubblePlacement> {
        let pose = pose?;
        if !self.bubble_visible() {
            return None;
        }
        let anchor = pose.position + Vec3::Y * BUBBLE_LIFT;
        let placement = project_to_screen(anchor, camera, viewport);
        if placement == BubblePlacement::Hidden {
            self.bubble.hide();
            log::debug!("[session] bubble anchor off screen; hiding");
        }
        Some(placement)
    }
}
