// Character model loading.
//
// Fetches a glTF binary, walks the default scene applying node transforms and
// flattens every triangle primitive into one shared vertex/index list with a
// draw range per primitive. Only the base colour factor/texture and the
// metal/rough factors are kept from materials.

use crate::constants::{MATERIAL_METALNESS_MAX, MATERIAL_ROUGHNESS_MIN};
use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("glTF parse failed: {0}")]
    Parse(#[from] gltf::Error),

    #[error("model has no triangle geometry")]
    Empty,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Decoded texture image (RGBA8).
pub struct TextureImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    pub metalness: f32,
    pub roughness: f32,
    /// Index into `CharacterMesh::textures`.
    pub texture: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub first_index: u32,
    pub index_count: u32,
    pub material: Material,
}

#[derive(Default)]
pub struct CharacterMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub primitives: Vec<Primitive>,
    pub textures: Vec<TextureImage>,
}

/// Keep materials out of the mirror-black range: low metalness, high roughness.
#[inline]
pub fn tame_material(metalness: f32, roughness: f32) -> (f32, f32) {
    (
        metalness.min(MATERIAL_METALNESS_MAX),
        roughness.max(MATERIAL_ROUGHNESS_MIN),
    )
}

impl CharacterMesh {
    pub fn from_glb(bytes: &[u8]) -> Result<Self, ModelError> {
        let (document, buffers, images) = gltf::import_slice(bytes)?;
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(ModelError::Empty)?;

        let mut mesh = CharacterMesh::default();
        let mut texture_slots: Vec<Option<usize>> = vec![None; images.len()];
        let mut stack: Vec<(gltf::Node, Mat4)> =
            scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
        while let Some((node, parent)) = stack.pop() {
            let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
            if let Some(m) = node.mesh() {
                for prim in m.primitives() {
                    mesh.push_primitive(&prim, &buffers, &images, &mut texture_slots, world);
                }
            }
            stack.extend(node.children().map(|child| (child, world)));
        }

        if mesh.indices.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_primitive(
        &mut self,
        prim: &gltf::Primitive,
        buffers: &[gltf::buffer::Data],
        images: &[gltf::image::Data],
        texture_slots: &mut [Option<usize>],
        world: Mat4,
    ) {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            log::debug!("[model] skipping non-triangle primitive {:?}", prim.mode());
            return;
        }
        let reader = prim.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = match reader.read_positions() {
            Some(iter) => iter.map(Vec3::from).collect(),
            None => return,
        };
        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|iter| iter.map(Vec3::from).collect())
            .unwrap_or_else(|| vec![Vec3::Y; positions.len()]);
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|iter| iter.into_f32().collect())
            .unwrap_or_else(|| vec![[0.0; 2]; positions.len()]);
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        if indices.len() < 3 || indices.iter().any(|&i| i as usize >= positions.len()) {
            log::warn!("[model] skipping primitive with invalid indices");
            return;
        }

        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        let base = self.vertices.len() as u32;
        for (i, p) in positions.iter().enumerate() {
            let n = normals.get(i).copied().unwrap_or(Vec3::Y);
            self.vertices.push(Vertex {
                position: world.transform_point3(*p).to_array(),
                normal: (normal_matrix * n).normalize_or_zero().to_array(),
                uv: uvs.get(i).copied().unwrap_or([0.0; 2]),
            });
        }

        // Drop a trailing partial triangle
        let index_count = indices.len() - indices.len() % 3;
        let first_index = self.indices.len() as u32;
        self.indices
            .extend(indices[..index_count].iter().map(|i| base + i));

        let pbr = prim.material().pbr_metallic_roughness();
        let (metalness, roughness) = tame_material(pbr.metallic_factor(), pbr.roughness_factor());
        let texture = pbr.base_color_texture().and_then(|info| {
            let img_idx = info.texture().source().index();
            let slot = texture_slots.get_mut(img_idx)?;
            if slot.is_none() {
                let img = images.get(img_idx)?;
                self.textures.push(TextureImage {
                    pixels: convert_to_rgba8(img),
                    width: img.width,
                    height: img.height,
                });
                *slot = Some(self.textures.len() - 1);
            }
            *slot
        });

        self.primitives.push(Primitive {
            first_index,
            index_count: index_count as u32,
            material: Material {
                base_color: pbr.base_color_factor(),
                metalness,
                roughness,
                texture,
            },
        });
    }
}

fn convert_to_rgba8(img: &gltf::image::Data) -> Vec<u8> {
    match img.format {
        gltf::image::Format::R8G8B8A8 => img.pixels.clone(),
        gltf::image::Format::R8G8B8 => img
            .pixels
            .chunks(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        gltf::image::Format::R8G8 => img
            .pixels
            .chunks(2)
            .flat_map(|rg| [rg[0], rg[1], 0, 255])
            .collect(),
        gltf::image::Format::R8 => img.pixels.iter().flat_map(|&r| [r, r, r, 255]).collect(),
        _ => {
            log::warn!("[model] unsupported texture format {:?}; using white", img.format);
            vec![255u8; (img.width * img.height * 4) as usize]
        }
    }
}

/// Fetch and parse the character model.
pub async fn fetch_character(url: &str) -> Result<CharacterMesh, ModelError> {
    let window = web::window().ok_or_else(|| ModelError::Fetch("no window".to_string()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ModelError::Fetch(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| ModelError::Fetch(format!("{:?}", e)))?;
    if !response.ok() {
        return Err(ModelError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }
    let body = response
        .array_buffer()
        .map_err(|e| ModelError::Fetch(format!("{:?}", e)))?;
    let buffer = JsFuture::from(body)
        .await
        .map_err(|e| ModelError::Fetch(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::info!("[model] fetched {} bytes from {}", bytes.len(), url);

    let mesh = CharacterMesh::from_glb(&bytes)?;
    log::info!(
        "[model] {} triangles in {} primitives, {} textures",
        mesh.triangle_count(),
        mesh.primitives.len(),
        mesh.textures.len()
    );
    Ok(mesh)
}
