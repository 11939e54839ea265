use crate::constants::{
    HEMI_GROUND, HEMI_INTENSITY, HEMI_SKY, SUN_COLOR, SUN_INTENSITY, SUN_POSITION,
};
use crate::core::Camera;
use crate::model::CharacterMesh;
use glam::{Mat4, Vec3};
use web_sys as web;

mod character;
mod helpers;
mod surface;
mod targets;

pub use surface::{recovery_for, SurfaceRecovery};

use character::{CharacterGpu, CharacterPipeline};
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    eye: [f32; 4],
    sky: [f32; 4],       // rgb + intensity
    ground: [f32; 4],    // rgb
    sun_color: [f32; 4], // rgb + intensity
    sun_dir: [f32; 4],   // towards the light
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    pipeline: CharacterPipeline,
    character: Option<CharacterGpu>,

    width: u32,
    height: u32,
    view_proj: Mat4,
    eye: Vec3,
    model: Option<Mat4>,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The canvas sits on top of the camera video, so it must composite with alpha
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            log::warn!("[render] premultiplied alpha unavailable; video may be covered");
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, width, height);
        let pipeline = character::create_character_pipeline(&device, format);
        log::info!("[render] surface {}x{} {:?} {:?}", width, height, format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            pipeline,
            character: None,
            width,
            height,
            view_proj: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            model: None,
        })
    }

    /// Upload parsed geometry; replaces any previous character.
    pub fn upload_character(&mut self, mesh: &CharacterMesh) {
        self.character = Some(character::upload_character(
            &self.device,
            &self.queue,
            &self.pipeline,
            mesh,
        ));
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection();
        self.eye = camera.eye;
    }

    /// Model matrix for this frame; `None` skips drawing the character.
    pub fn set_character_transform(&mut self, model: Option<Mat4>) {
        self.model = model;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Configure the surface again at its current size, after it was lost
    /// or went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        log::info!("[render] surface reconfigured {}x{}", self.width, self.height);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draw = match (&self.character, self.model) {
            (Some(character), Some(model)) => Some((character, model)),
            _ => None,
        };
        if let Some((_, model)) = draw {
            let uniforms = self.scene_uniforms(model);
            self.queue.write_buffer(
                &self.pipeline.scene_buffer,
                0,
                bytemuck::bytes_of(&uniforms),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some((character, _)) = draw {
                character.draw(&mut rpass, &self.pipeline);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn scene_uniforms(&self, model: Mat4) -> SceneUniforms {
        let sun_dir = Vec3::from(SUN_POSITION).normalize();
        SceneUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
            sky: [HEMI_SKY[0], HEMI_SKY[1], HEMI_SKY[2], HEMI_INTENSITY],
            ground: [HEMI_GROUND[0], HEMI_GROUND[1], HEMI_GROUND[2], 0.0],
            sun_color: [SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2], SUN_INTENSITY],
            sun_dir: sun_dir.extend(0.0).to_array(),
        }
    }
}
