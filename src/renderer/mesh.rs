//! CPU tessellation of the static scene.
//!
//! Every node is tessellated in its local space, transformed to world
//! space, and appended to one of three kinds of batch: opaque geometry,
//! blended geometry, and one batch per billboard texture. The scene never
//! changes after start-up, so the batches are built once and uploaded as
//! plain vertex/index buffers.

use std::f32::consts::TAU;
use std::mem::size_of;

use glam::{Vec2, Vec3};

use crate::scene::{Material, Primitive, Scene, SceneNode, Shading, TextureId, Transform};
use crate::util::color::linear_rgb;

/// Side segments of a tessellated cylinder.
pub const CYLINDER_SEGMENTS: u32 = 24;

/// 64-byte vertex shared by all scene pipelines.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    /// World position.
    pub position: [f32; 3],
    /// World normal.
    pub normal: [f32; 3],
    /// Linear RGB and opacity.
    pub color: [f32; 4],
    /// Texture coordinate (top-left origin).
    pub uv: [f32; 2],
    /// Lit flag, roughness, metalness, unused.
    pub material: [f32; 4],
}

impl SceneVertex {
    /// Vertex buffer layout matching `city.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 40,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 4,
                },
            ],
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertices.
    pub vertices: Vec<SceneVertex>,
    /// Triangle indices into `vertices`, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a node tessellated into world space.
    pub fn append_node(&mut self, node: &SceneNode) {
        let surface = Surface::new(&node.material);
        let mut sink = Sink {
            mesh: self,
            transform: &node.transform,
            surface,
        };
        match node.primitive {
            Primitive::Box {
                width,
                height,
                depth,
            } => sink.cuboid(Vec3::new(width, height, depth) / 2.0),
            Primitive::Plane { width, height } => {
                sink.plane(width, height, node.material.double_sided);
            }
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => sink.cylinder(radius_top, radius_bottom, height),
        }
    }
}

/// Scene geometry grouped by pipeline state.
#[derive(Debug, Clone, Default)]
pub struct SceneBatches {
    /// Opaque, untextured geometry.
    pub opaque: MeshBuffer,
    /// Blended geometry (drawn after opaque, no depth writes).
    pub transparent: MeshBuffer,
    /// Opaque geometry sampling a billboard texture, one batch per texture.
    pub textured: Vec<(TextureId, MeshBuffer)>,
}

/// Tessellate every node of `scene` into batches.
#[must_use]
pub fn bake_scene(scene: &Scene) -> SceneBatches {
    let mut batches = SceneBatches::default();
    for node in &scene.nodes {
        if let Some(texture) = node.material.texture {
            let index = match batches.textured.iter().position(|(id, _)| *id == texture) {
                Some(index) => index,
                None => {
                    batches.textured.push((texture, MeshBuffer::default()));
                    batches.textured.len() - 1
                }
            };
            batches.textured[index].1.append_node(node);
        } else if node.material.is_transparent() {
            batches.transparent.append_node(node);
        } else {
            batches.opaque.append_node(node);
        }
    }
    log::debug!(
        "baked {} opaque, {} transparent, {} textured batches",
        batches.opaque.triangle_count(),
        batches.transparent.triangle_count(),
        batches.textured.len()
    );
    batches
}

#[derive(Clone, Copy)]
struct Surface {
    color: [f32; 4],
    material: [f32; 4],
}

impl Surface {
    fn new(material: &Material) -> Self {
        let [r, g, b] = linear_rgb(material.color);
        let params = match material.shading {
            Shading::Standard {
                roughness,
                metalness,
            } => [1.0, roughness, metalness, 0.0],
            Shading::Unlit => [0.0; 4],
        };
        Self {
            color: [r, g, b, material.opacity],
            material: params,
        }
    }
}

struct Sink<'a> {
    mesh: &'a mut MeshBuffer,
    transform: &'a Transform,
    surface: Surface,
}

impl Sink<'_> {
    fn vertex(&mut self, local: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(SceneVertex {
            position: self.transform.transform_point(local).to_array(),
            normal: self
                .transform
                .transform_vector(normal)
                .normalize_or_zero()
                .to_array(),
            color: self.surface.color,
            uv: uv.to_array(),
            material: self.surface.material,
        });
        index
    }

    /// Quad centered on `center` spanning `±u`, `±v`; front face toward
    /// `u × v`.
    fn quad(&mut self, center: Vec3, u: Vec3, v: Vec3) {
        let normal = u.cross(v).normalize_or_zero();
        let a = self.vertex(center - u - v, normal, Vec2::new(0.0, 1.0));
        let b = self.vertex(center + u - v, normal, Vec2::new(1.0, 1.0));
        let c = self.vertex(center + u + v, normal, Vec2::new(1.0, 0.0));
        let d = self.vertex(center - u + v, normal, Vec2::new(0.0, 0.0));
        self.mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    fn cuboid(&mut self, half: Vec3) {
        let (x, y, z) = (Vec3::X * half.x, Vec3::Y * half.y, Vec3::Z * half.z);
        self.quad(x, -z, y);
        self.quad(-x, z, y);
        self.quad(y, x, -z);
        self.quad(-y, x, z);
        self.quad(z, x, y);
        self.quad(-z, -x, y);
    }

    fn plane(&mut self, width: f32, height: f32, double_sided: bool) {
        let u = Vec3::X * (width / 2.0);
        let v = Vec3::Y * (height / 2.0);
        self.quad(Vec3::ZERO, u, v);
        if double_sided {
            // Back face keeps the front's texture orientation (mirrored)
            let normal = Vec3::NEG_Z;
            let a = self.vertex(-u - v, normal, Vec2::new(0.0, 1.0));
            let b = self.vertex(u - v, normal, Vec2::new(1.0, 1.0));
            let c = self.vertex(u + v, normal, Vec2::new(1.0, 0.0));
            let d = self.vertex(-u + v, normal, Vec2::new(0.0, 0.0));
            self.mesh.indices.extend_from_slice(&[a, c, b, a, d, c]);
        }
    }

    fn cylinder(&mut self, radius_top: f32, radius_bottom: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        let half = height / 2.0;
        let slope = (radius_bottom - radius_top) / height;
        let segments = CYLINDER_SEGMENTS;

        let mut ring = Vec::with_capacity(segments as usize + 1);
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(sin, slope, cos);
            let u = i as f32 / segments as f32;
            let top = self.vertex(
                Vec3::new(radius_top * sin, half, radius_top * cos),
                normal,
                Vec2::new(u, 0.0),
            );
            let bottom = self.vertex(
                Vec3::new(radius_bottom * sin, -half, radius_bottom * cos),
                normal,
                Vec2::new(u, 1.0),
            );
            ring.push((top, bottom));
        }
        for pair in ring.windows(2) {
            let (t0, b0) = pair[0];
            let (t1, b1) = pair[1];
            self.mesh.indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
        }

        self.cap(radius_top, half, Vec3::Y);
        self.cap(radius_bottom, -half, Vec3::NEG_Y);
    }

    fn cap(&mut self, radius: f32, y: f32, normal: Vec3) {
        if radius <= 0.0 {
            return;
        }
        let center = self.vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        let rim: Vec<u32> = (0..=CYLINDER_SEGMENTS)
            .map(|i| {
                let theta = i as f32 / CYLINDER_SEGMENTS as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                self.vertex(
                    Vec3::new(radius * sin, y, radius * cos),
                    normal,
                    Vec2::new(0.5 + sin / 2.0, 0.5 - cos / 2.0),
                )
            })
            .collect();
        for pair in rim.windows(2) {
            if normal.y > 0.0 {
                self.mesh.indices.extend_from_slice(&[center, pair[0], pair[1]]);
            } else {
                self.mesh.indices.extend_from_slice(&[center, pair[1], pair[0]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AtmosphereOptions;
    use crate::util::color::hex_rgb;

    fn node(primitive: Primitive, material: Material, transform: Transform) -> SceneNode {
        SceneNode {
            primitive,
            material,
            transform,
        }
    }

    fn mesh(primitive: Primitive, material: Material) -> MeshBuffer {
        let mut mesh = MeshBuffer::default();
        mesh.append_node(&node(primitive, material, Transform::IDENTITY));
        mesh
    }

    /// Every triangle winds counter-clockwise around its vertex normal.
    fn assert_front_faces_follow_normals(mesh: &MeshBuffer) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let pa = Vec3::from_array(a.position);
            let face = (Vec3::from_array(b.position) - pa).cross(Vec3::from_array(c.position) - pa);
            if face.length() < 1e-6 {
                continue;
            }
            let normal = Vec3::from_array(a.normal);
            assert!(face.dot(normal) > 0.0, "triangle {tri:?} winds against {normal:?}");
        }
    }

    #[test]
    fn box_has_six_outward_faces() {
        let b = mesh(
            Primitive::Box {
                width: 2.0,
                height: 4.0,
                depth: 6.0,
            },
            Material::standard(hex_rgb(0x2a4858), 0.7, 0.1),
        );
        assert_eq!(b.vertices.len(), 24);
        assert_eq!(b.triangle_count(), 12);
        for v in &b.vertices {
            let p = Vec3::from_array(v.position);
            assert!(p.dot(Vec3::from_array(v.normal)) > 0.0);
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 2.0 && p.z.abs() <= 3.0);
        }
        assert_front_faces_follow_normals(&b);
    }

    #[test]
    fn double_sided_plane_gets_a_back_face() {
        let single = mesh(
            Primitive::Plane {
                width: 1.0,
                height: 1.5,
            },
            Material::unlit(hex_rgb(0xffeeaa)),
        );
        let double = mesh(
            Primitive::Plane {
                width: 1.0,
                height: 1.5,
            },
            Material::unlit(hex_rgb(0xffeeaa)).double_sided(),
        );
        assert_eq!(single.triangle_count(), 2);
        assert_eq!(double.triangle_count(), 4);
        assert_front_faces_follow_normals(&double);
    }

    #[test]
    fn plane_uv_origin_is_top_left() {
        let plane = mesh(
            Primitive::Plane {
                width: 10.0,
                height: 6.25,
            },
            Material::unlit([1.0; 3]),
        );
        let top_left = plane
            .vertices
            .iter()
            .find(|v| v.position[0] < 0.0 && v.position[1] > 0.0)
            .map(|v| v.uv);
        assert_eq!(top_left, Some([0.0, 0.0]));
    }

    #[test]
    fn cylinder_is_closed_and_outward() {
        let c = mesh(
            Primitive::Cylinder {
                radius_top: 0.8,
                radius_bottom: 1.0,
                height: 0.5,
            },
            Material::standard(hex_rgb(0x333333), 0.3, 0.9),
        );
        let segments = CYLINDER_SEGMENTS as usize;
        assert_eq!(c.triangle_count(), segments * 2 + segments * 2);
        assert_front_faces_follow_normals(&c);
    }

    #[test]
    fn zero_height_cylinder_is_skipped() {
        let c = mesh(
            Primitive::Cylinder {
                radius_top: 0.3,
                radius_bottom: 0.3,
                height: 0.0,
            },
            Material::standard(hex_rgb(0x333333), 0.3, 0.9),
        );
        assert!(c.is_empty());
    }

    #[test]
    fn transform_moves_vertices_to_world_space() {
        let mut m = MeshBuffer::default();
        m.append_node(&node(
            Primitive::Plane {
                width: 2.0,
                height: 2.0,
            },
            Material::unlit([1.0; 3]),
            Transform::ground(Vec3::new(0.0, 0.02, -10.0)),
        ));
        for v in &m.vertices {
            assert!((v.position[1] - 0.02).abs() < 1e-5);
            assert!((v.normal[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn batches_split_by_texture_and_opacity() {
        let mut scene = Scene::new(&AtmosphereOptions::default());
        let plane = Primitive::Plane {
            width: 1.0,
            height: 1.0,
        };
        scene.add_node(node(plane, Material::unlit([1.0; 3]), Transform::IDENTITY));
        scene.add_node(node(
            plane,
            Material::unlit([1.0; 3]).with_opacity(0.1),
            Transform::IDENTITY,
        ));
        let mut textured = Material::unlit([1.0; 3]);
        textured.texture = Some(TextureId(0));
        scene.add_node(node(plane, textured, Transform::IDENTITY));
        scene.add_node(node(plane, textured, Transform::IDENTITY));

        let batches = bake_scene(&scene);
        assert_eq!(batches.opaque.triangle_count(), 2);
        assert_eq!(batches.transparent.triangle_count(), 2);
        assert_eq!(batches.textured.len(), 1);
        assert_eq!(batches.textured[0].1.triangle_count(), 4);
        assert_eq!(batches.transparent.vertices[0].color[3], 0.1);
    }

    #[test]
    fn unlit_vertices_carry_no_lighting_flag() {
        let m = mesh(
            Primitive::Plane {
                width: 1.0,
                height: 1.0,
            },
            Material::unlit([1.0; 3]),
        );
        assert!(m.vertices.iter().all(|v| v.material[0] == 0.0));
        assert_eq!(size_of::<SceneVertex>(), 64);
    }
}
