use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
use crate::core::{Camera, Session, Viewport};
use crate::model::CharacterMesh;
use crate::overlay::BubbleView;
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Camera fixed at `CAMERA_Z` looking down -Z.
pub fn scene_camera(viewport: Viewport) -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, CAMERA_Z),
        target: Vec3::new(0.0, 0.0, CAMERA_Z - 1.0),
        up: Vec3::Y,
        aspect: viewport.aspect(),
        fovy_radians: CAMERA_FOV_DEG.to_radians(),
        znear: CAMERA_NEAR,
        zfar: CAMERA_FAR,
    }
}

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<Session>>,
    pub clock: Instant,
    pub viewport: Rc<RefCell<Viewport>>,

    pub canvas: web::HtmlCanvasElement,
    pub bubble: BubbleView,
    pub camera: Camera,

    pub gpu: Option<render::GpuState<'a>>,
    pub pending_model: Rc<RefCell<Option<CharacterMesh>>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = self.clock.elapsed().as_secs_f64();
        let viewport = *self.viewport.borrow();

        if let Some(mesh) = self.pending_model.borrow_mut().take() {
            if let Some(g) = &mut self.gpu {
                g.upload_character(&mesh);
            }
            self.session.borrow_mut().mark_character_loaded();
            log::info!("[frame] character ready at {:.2}s", now);
        }

        let (pose, placement, mood, visible) = {
            let mut session = self.session.borrow_mut();
            session.tick(now);
            let pose = session.pose(now);
            self.camera.set_viewport(viewport);
            let placement = session.place_bubble(pose.as_ref(), &self.camera, viewport);
            self.bubble.sync_text(session.bubble());
            (pose, placement, session.mood(now), session.bubble_visible())
        };

        self.bubble.sync_mood(mood);
        self.bubble.sync_visibility(visible);
        if let Some(p) = placement {
            self.bubble.place(p);
        }

        let mut disable = false;
        if let Some(g) = &mut self.gpu {
            g.set_camera(&self.camera);
            g.set_character_transform(pose.map(|p| p.model_matrix()));
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render() {
                match render::recovery_for(&e) {
                    render::SurfaceRecovery::Reconfigure => g.reconfigure(),
                    render::SurfaceRecovery::SkipFrame => log::warn!("render skipped: {:?}", e),
                    render::SurfaceRecovery::Disable => {
                        log::error!("render error: {:?}; disabling renderer", e);
                        disable = true;
                    }
                }
            }
        }
        if disable {
            self.gpu = None;
        }
    }

    /// Apply a new viewport right away instead of waiting for the next frame.
    pub fn apply_viewport(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.set_camera(&self.camera);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
