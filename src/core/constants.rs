use glam::Vec3;

// Character placement and animation tuning shared by the session and the blender.

// Anchor
pub const ANCHOR_START: Vec3 = Vec3::new(0.0, -0.35, -1.2); // in front of the camera
pub const ANCHOR_X_LIMIT: f32 = 0.35; // clamp for tap repositioning
pub const ANCHOR_TAP_SPAN: f32 = 0.35; // world units per unit of normalized tap x

// Idle motion
pub const BASE_SCALE: f32 = 0.6;
pub const IDLE_BOB_FREQ: f32 = 2.2;
pub const IDLE_BOB_AMP: f32 = 0.02;
pub const IDLE_SWAY_FREQ: f32 = 0.7;
pub const IDLE_SWAY_AMP: f32 = 0.18;
pub const IDLE_TILT_FREQ: f32 = 1.1;
pub const IDLE_TILT_AMP: f32 = 0.04;

// Pop (half-sine jump)
pub const POP_DURATION_SEC: f64 = 0.3;
pub const POP_HEIGHT: f32 = 0.08;
pub const POP_SCALE_BOOST: f32 = 0.08;

// Nod (half-sine forward tilt)
pub const NOD_DURATION_SEC: f64 = 0.26;
pub const NOD_ANGLE: f32 = 0.22;

// Angry jitter amplitude on position x/y
pub const ANGRY_JITTER: f32 = 0.008;

// Interaction timing
pub const THINK_DELAY_SEC: f64 = 0.35; // pause after the thinking nod
pub const THINK_MOOD_SEC: f64 = 1.0; // neutral mood window while thinking
pub const REPLY_MOOD_SEC: f64 = 6.0; // mood window after a reply

// Bubble
pub const BUBBLE_LIFT: f32 = 0.45; // world units above the character origin
pub const THINKING_TEXT: &str = "…考え中";
pub const GREETING_TEXT: &str = "やあ。質問してみて（例：ARで吹き出しってどうする？）";
