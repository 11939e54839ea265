// Per-frame character pose: idle motion plus an ordered list of overlays.
//
// Every overlay is a pure function of time (and, for the angry mood, of the
// RNG it is handed) producing a `Delta`. Deltas compose by adding
// translation/rotation and multiplying scale, so the order only matters for
// readability of the overlay list, not for the result.

use super::constants::*;
use super::mood::Mood;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::PI;

/// Character transform for one frame. Rotation is XYZ euler in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Pose {
    pub fn model_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), q, self.position)
    }

    pub fn apply(&mut self, delta: &Delta) {
        self.position += delta.translation;
        self.rotation += delta.rotation;
        self.scale *= delta.scale;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delta {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Delta {
    pub const IDENTITY: Delta = Delta {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Fixed per-mood adjustments.
#[derive(Clone, Copy, Debug)]
pub struct MoodProfile {
    pub lift: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub scale: f32,
    pub jitter: f32,
}

pub fn mood_profile(mood: Mood) -> MoodProfile {
    match mood {
        Mood::Neutral => MoodProfile {
            lift: 0.0,
            tilt_x: 0.0,
            tilt_z: 0.0,
            scale: 1.0,
            jitter: 0.0,
        },
        Mood::Happy => MoodProfile {
            lift: 0.02,
            tilt_x: -0.06,
            tilt_z: 0.0,
            scale: 1.05,
            jitter: 0.0,
        },
        Mood::Angry => MoodProfile {
            lift: 0.0,
            tilt_x: 0.10,
            tilt_z: 0.0,
            scale: 1.03,
            jitter: ANGRY_JITTER,
        },
        Mood::Sad => MoodProfile {
            lift: -0.03,
            tilt_x: 0.18,
            tilt_z: 0.06,
            scale: 0.94,
            jitter: 0.0,
        },
        Mood::Surprised => MoodProfile {
            lift: 0.03,
            tilt_x: -0.12,
            tilt_z: 0.0,
            scale: 1.08,
            jitter: 0.0,
        },
    }
}

/// Half-sine envelope: 0 at `u <= 0`, 1 at `u = 0.5`, 0 again for `u >= 1`.
#[inline]
pub fn half_sine(u: f64) -> f32 {
    if u <= 0.0 || u >= 1.0 {
        return 0.0;
    }
    (u as f32 * PI).sin()
}

/// Progress of a timed effect in `[0, 1)`, or `None` outside its window.
#[inline]
pub fn progress(now: f64, start: f64, duration: f64) -> Option<f64> {
    let u = (now - start) / duration;
    (0.0..1.0).contains(&u).then_some(u)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    Pop { start: f64 },
    Mood(Mood),
    Nod { start: f64 },
}

impl Overlay {
    pub fn name(&self) -> &'static str {
        match self {
            Overlay::Pop { .. } => "pop",
            Overlay::Mood(_) => "mood",
            Overlay::Nod { .. } => "nod",
        }
    }

    pub fn delta<R: Rng>(&self, now: f64, rng: &mut R) -> Delta {
        match *self {
            Overlay::Pop { start } => match progress(now, start, POP_DURATION_SEC) {
                Some(u) => {
                    let s = half_sine(u);
                    Delta {
                        translation: Vec3::new(0.0, POP_HEIGHT * s, 0.0),
                        rotation: Vec3::ZERO,
                        scale: 1.0 + POP_SCALE_BOOST * s,
                    }
                }
                None => Delta::IDENTITY,
            },
            Overlay::Mood(mood) => {
                let p = mood_profile(mood);
                let mut translation = Vec3::new(0.0, p.lift, 0.0);
                if p.jitter > 0.0 {
                    translation.x += rng.gen_range(-p.jitter..=p.jitter);
                    translation.y += rng.gen_range(-p.jitter..=p.jitter);
                }
                Delta {
                    translation,
                    rotation: Vec3::new(p.tilt_x, 0.0, p.tilt_z),
                    scale: p.scale,
                }
            }
            Overlay::Nod { start } => match progress(now, start, NOD_DURATION_SEC) {
                Some(u) => Delta {
                    translation: Vec3::ZERO,
                    rotation: Vec3::new(NOD_ANGLE * half_sine(u), 0.0, 0.0),
                    scale: 1.0,
                },
                None => Delta::IDENTITY,
            },
        }
    }
}

/// Idle bob and sway around the anchor; depends on time only.
pub fn idle_pose(anchor: Vec3, t: f64) -> Pose {
    let t = t as f32;
    Pose {
        position: Vec3::new(
            anchor.x,
            anchor.y + (t * IDLE_BOB_FREQ).sin() * IDLE_BOB_AMP,
            anchor.z,
        ),
        rotation: Vec3::new(
            (t * IDLE_TILT_FREQ).sin() * IDLE_TILT_AMP,
            (t * IDLE_SWAY_FREQ).sin() * IDLE_SWAY_AMP,
            0.0,
        ),
        scale: BASE_SCALE,
    }
}

/// Idle pose with every overlay applied in list order.
pub fn blend<R: Rng>(anchor: Vec3, now: f64, overlays: &[Overlay], rng: &mut R) -> Pose {
    let mut pose = idle_pose(anchor, now);
    for overlay in overlays {
        pose.apply(&overlay.delta(now, rng));
    }
    pose
}
