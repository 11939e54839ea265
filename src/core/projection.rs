// Camera description and world-to-screen projection for the speech bubble.
//
// The projection uses the renderer's clip conventions (right-handed view,
// depth in `[0, 1]`), so a point is on screen exactly when the renderer would
// draw it.

use glam::{Mat4, Vec3};

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// Keep the projection in step with the output surface.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }
}

/// Visible page area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BubblePlacement {
    /// Projected outside the visible depth range.
    Hidden,
    /// Pixel position relative to the viewport's top-left corner.
    At { x: f32, y: f32 },
}

pub fn project_to_screen(point: Vec3, camera: &Camera, viewport: Viewport) -> BubblePlacement {
    let clip = camera.view_projection() * point.extend(1.0);
    if clip.w <= 0.0 || !clip.w.is_finite() {
        return BubblePlacement::Hidden;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return BubblePlacement::Hidden;
    }
    BubblePlacement::At {
        x: (ndc.x * 0.5 + 0.5) * viewport.width,
        y: (-ndc.y * 0.5 + 0.5) * viewport.height,
    }
}
