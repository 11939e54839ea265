pub mod blend;
pub mod chat;
pub mod constants;
pub mod mood;
pub mod projection;
pub mod session;

pub use mood::Mood;
pub use projection::{BubblePlacement, Camera, Viewport};
pub use session::{Rejection, Session, SubmitOutcome};

// Shaders bundled as string constants
pub static CHARACTER_WGSL: &str = include_str!("../../shaders/character.wgsl");
