/// Scene, lighting and page tuning constants for the web frontend.
///
/// Values mirror the look of a small hand-lit scene: one sky/ground hemisphere
/// fill and one warm-white key light, with the camera looking down -Z.
// Camera
pub const CAMERA_FOV_DEG: f32 = 55.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 50.0;
pub const CAMERA_Z: f32 = 1.5;

// Canvas backing store never exceeds this device pixel ratio
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Hemisphere light
pub const HEMI_SKY: [f32; 3] = [1.0, 1.0, 1.0];
pub const HEMI_GROUND: [f32; 3] = [0x22 as f32 / 255.0, 0x33 as f32 / 255.0, 0x44 as f32 / 255.0];
pub const HEMI_INTENSITY: f32 = 1.25;

// Directional light
pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SUN_INTENSITY: f32 = 0.85;
pub const SUN_POSITION: [f32; 3] = [1.2, 1.8, 1.0];

// Material tweak applied on load so the model never renders pitch black
pub const MATERIAL_METALNESS_MAX: f32 = 0.2;
pub const MATERIAL_ROUGHNESS_MIN: f32 = 0.6;

// DOM element ids
pub const VIDEO_ID: &str = "cam";
pub const CANVAS_ID: &str = "gl";
pub const BUBBLE_ID: &str = "bubble";
pub const INPUT_ID: &str = "q";
pub const SEND_ID: &str = "send";

// Asset
pub const DEFAULT_MODEL_URL: &str = "./models/cat2.glb";
pub const DEFAULT_SEED: u64 = 42;
