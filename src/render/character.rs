use super::helpers;
use super::targets::DEPTH_FORMAT;
use super::SceneUniforms;
use crate::model::{CharacterMesh, Vertex};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    base_color: [f32; 4],
    params: [f32; 4], // metalness, roughness, unused, unused
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

pub(crate) struct CharacterPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) scene_buffer: wgpu::Buffer,
    pub(crate) scene_bind_group: wgpu::BindGroup,
    pub(crate) material_bgl: wgpu::BindGroupLayout,
    pub(crate) sampler: wgpu::Sampler,
}

pub(crate) fn create_character_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> CharacterPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("character_shader"),
        source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(crate::core::CHARACTER_WGSL)),
    });

    let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("material_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &scene_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: scene_buffer.as_entire_binding(),
        }],
    });

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("character_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("character_layout"),
        bind_group_layouts: &[&scene_bgl, &material_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("character_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Many character exports are single-sided shells; draw both faces
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    CharacterPipeline {
        pipeline,
        scene_buffer,
        scene_bind_group,
        material_bgl,
        sampler,
    }
}

struct DrawRange {
    first_index: u32,
    index_count: u32,
    bind_group: wgpu::BindGroup,
}

/// GPU-resident character: one vertex/index buffer pair, one bind group per primitive.
pub(crate) struct CharacterGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    draws: Vec<DrawRange>,
    _textures: Vec<wgpu::Texture>,
}

pub(crate) fn upload_character(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &CharacterPipeline,
    mesh: &CharacterMesh,
) -> CharacterGpu {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("character_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("character_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let mut textures = Vec::with_capacity(mesh.textures.len() + 1);
    let mut views = Vec::with_capacity(mesh.textures.len());
    for (i, image) in mesh.textures.iter().enumerate() {
        let (tex, view) = helpers::upload_rgba8(
            device,
            queue,
            &format!("character_tex_{}", i),
            image.width,
            image.height,
            &image.pixels,
        );
        textures.push(tex);
        views.push(view);
    }
    // Untextured materials sample this so one pipeline covers both cases
    let (white_tex, white_view) =
        helpers::upload_rgba8(device, queue, "white_tex", 1, 1, &[255; 4]);
    textures.push(white_tex);

    let draws = mesh
        .primitives
        .iter()
        .map(|prim| {
            let m = &prim.material;
            let uniforms = MaterialUniforms {
                base_color: m.base_color,
                params: [m.metalness, m.roughness, 0.0, 0.0],
            };
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("material_uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let view = m.texture.and_then(|i| views.get(i)).unwrap_or(&white_view);
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("material_bg"),
                layout: &pipeline.material_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&pipeline.sampler),
                    },
                ],
            });
            DrawRange {
                first_index: prim.first_index,
                index_count: prim.index_count,
                bind_group,
            }
        })
        .collect();

    log::info!(
        "[render] uploaded character: {} vertices, {} draws",
        mesh.vertices.len(),
        mesh.primitives.len()
    );
    CharacterGpu {
        vertex_buffer,
        index_buffer,
        draws,
        _textures: textures,
    }
}

impl CharacterGpu {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, pipeline: &CharacterPipeline) {
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, &pipeline.scene_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for d in &self.draws {
            rpass.set_bind_group(1, &d.bind_group, &[]);
            rpass.draw_indexed(d.first_index..d.first_index + d.index_count, 0, 0..1);
        }
    }
}
