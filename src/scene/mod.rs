//! Static scene description.
//!
//! The [`Scene`] is a flat, world-space list of primitives plus the lights,
//! fog, and billboard textures that go with them. It is populated once at
//! session start by the city builder, the billboard factory, and the
//! environment, and never changes afterwards; the renderer bakes it into
//! GPU buffers in one pass.

/// Billboard assembly: frame, screen, pole, base, and local lights.
pub mod billboard;
/// Procedural building and window placement.
pub mod city;
/// Default billboard content.
pub mod content;
/// Ground, road, lane markings, global and street lights.
pub mod environment;

use glam::{Quat, Vec3};

pub use billboard::{BillboardFactory, BillboardInstance, BillboardPart, PartKind};
pub use city::{Building, CityLayout, ProceduralCityBuilder, WindowPane};
pub use content::{default_contents, BillboardContent};

use crate::options::AtmosphereOptions;
use crate::texture::RasterImage;

/// Index of a billboard texture within [`Scene::textures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// Position and orientation of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation applied after rotation.
    pub translation: Vec3,
    /// Rotation about the node origin.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Translation plus a rotation of `yaw` radians about +Y.
    #[must_use]
    pub fn from_yaw(translation: Vec3, yaw: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// A plane lying flat on the ground (its +Z normal turned to +Y).
    #[must_use]
    pub fn ground(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        }
    }

    /// Parent-then-child composition: `self` applied to a transform
    /// expressed in this node's local space.
    #[must_use]
    pub fn then(&self, child: &Self) -> Self {
        Self {
            translation: self.translation + self.rotation * child.translation,
            rotation: self.rotation * child.rotation,
        }
    }

    /// Map a local point into the parent space.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Map a local direction into the parent space.
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }
}

/// Geometric primitive, centered on its node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box.
    Box {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
        /// Extent along Z.
        depth: f32,
    },
    /// Rectangle in the local XY plane facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
    /// Capped cylinder along Y, possibly flared.
    Cylinder {
        /// Radius of the top cap.
        radius_top: f32,
        /// Radius of the bottom cap.
        radius_bottom: f32,
        /// Extent along Y.
        height: f32,
    },
}

/// How a surface responds to light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Lit by scene lights.
    Standard {
        /// Microfacet roughness in `[0, 1]`.
        roughness: f32,
        /// Metalness in `[0, 1]`.
        metalness: f32,
    },
    /// Flat color, ignores lights (fog still applies).
    Unlit,
}

/// Surface appearance of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (sRGB).
    pub color: [f32; 3],
    /// Opacity in `[0, 1]`; below 1 the node is drawn blended.
    pub opacity: f32,
    /// Lighting model.
    pub shading: Shading,
    /// Render both faces of planes.
    pub double_sided: bool,
    /// Billboard texture multiplied into the base color.
    pub texture: Option<TextureId>,
}

impl Material {
    /// Opaque lit material.
    #[must_use]
    pub fn standard(color: [f32; 3], roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            shading: Shading::Standard {
                roughness,
                metalness,
            },
            double_sided: false,
            texture: None,
        }
    }

    /// Opaque unlit material.
    #[must_use]
    pub fn unlit(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            shading: Shading::Unlit,
            double_sided: false,
            texture: None,
        }
    }

    /// Same material with a different opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Same material rendered from both sides.
    #[must_use]
    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Whether the node needs blending.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// A primitive placed in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Shape.
    pub primitive: Primitive,
    /// Appearance.
    pub material: Material,
    /// World transform.
    pub transform: Transform,
}

/// A light source in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light from all directions.
    Ambient {
        /// Color (sRGB).
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Parallel light shining from `position` toward the origin.
    Directional {
        /// Color (sRGB).
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
        /// Point the light shines from.
        position: Vec3,
    },
    /// Omnidirectional light with a cutoff range.
    Point {
        /// Color (sRGB).
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
        /// Distance at which the light fades out.
        range: f32,
        /// World position.
        position: Vec3,
    },
    /// Cone light aimed at a target point.
    Spot {
        /// Color (sRGB).
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
        /// Distance at which the light fades out.
        range: f32,
        /// World position.
        position: Vec3,
        /// World point the cone is aimed at.
        target: Vec3,
        /// Outer cone half-angle in radians.
        angle: f32,
        /// Fraction of the cone that fades at the edge, `[0, 1]`.
        penumbra: f32,
    },
}

impl Light {
    /// The light with positions mapped through `transform`.
    #[must_use]
    pub fn transformed(self, transform: &Transform) -> Self {
        match self {
            Self::Point {
                color,
                intensity,
                range,
                position,
            } => Self::Point {
                color,
                intensity,
                range,
                position: transform.transform_point(position),
            },
            Self::Spot {
                color,
                intensity,
                range,
                position,
                target,
                angle,
                penumbra,
            } => Self::Spot {
                color,
                intensity,
                range,
                position: transform.transform_point(position),
                target: transform.transform_point(target),
                angle,
                penumbra,
            },
            other => other,
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Fog color (sRGB).
    pub color: [f32; 3],
    /// Distance where fog starts.
    pub near: f32,
    /// Distance where fog is opaque.
    pub far: f32,
}

/// A billboard placed in the scene, kept for the text alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBillboard {
    /// Source content.
    pub content: BillboardContent,
    /// Rotation about +Y applied to the whole assembly.
    pub yaw: f32,
    /// Texture shown on the screen.
    pub texture: TextureId,
}

/// Everything the renderer draws.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Clear color (sRGB).
    pub background: [f32; 3],
    /// Distance fog.
    pub fog: Option<Fog>,
    /// World-space primitives.
    pub nodes: Vec<SceneNode>,
    /// World-space lights.
    pub lights: Vec<Light>,
    /// Billboard face textures.
    pub textures: Vec<RasterImage>,
    /// Placed billboards in insertion order.
    pub billboards: Vec<PlacedBillboard>,
}

impl Scene {
    /// An empty scene with background, fog, and global lights from the
    /// atmosphere options.
    #[must_use]
    pub fn new(atmosphere: &AtmosphereOptions) -> Self {
        let mut scene = Self {
            background: atmosphere.background,
            fog: Some(Fog {
                color: atmosphere.fog_color,
                near: atmosphere.fog_near,
                far: atmosphere.fog_far,
            }),
            ..Self::default()
        };
        scene.lights.extend(environment::global_lights(atmosphere));
        scene
    }

    /// Register a texture and return its id.
    pub fn add_texture(&mut self, image: RasterImage) -> TextureId {
        self.textures.push(image);
        TextureId(self.textures.len() - 1)
    }

    /// Add a world-space node.
    pub fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Add a world-space light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Add every building and window of a generated city.
    pub fn add_city(&mut self, city: &CityLayout) {
        for building in &city.buildings {
            self.nodes.push(building.node());
            self.nodes.extend(building.windows.iter().map(WindowPane::node));
        }
    }

    /// Move a billboard into the scene: register its texture, flatten its
    /// parts and lights into world space.
    pub fn add_billboard(&mut self, instance: BillboardInstance) -> TextureId {
        let BillboardInstance {
            content,
            texture,
            transform,
            yaw,
            parts,
            lights,
        } = instance;
        let texture_id = self.add_texture(texture);

        for part in parts {
            let mut material = part.material;
            if part.kind == PartKind::Screen {
                material.texture = Some(texture_id);
            }
            self.nodes.push(SceneNode {
                primitive: part.primitive,
                material,
                transform: transform.then(&part.local),
            });
        }
        self.lights
            .extend(lights.iter().map(|light| light.transformed(&transform)));

        self.billboards.push(PlacedBillboard {
            content,
            yaw,
            texture: texture_id,
        });
        texture_id
    }

    /// Add ground, road, lane markings, and street lights for a corridor
    /// of `length` units.
    pub fn add_environment(&mut self, length: f32, atmosphere: &AtmosphereOptions) {
        self.nodes.extend(environment::ground_nodes(length));
        self.lights.extend(environment::street_lights(
            length,
            atmosphere.street_light_spacing,
        ));
    }

    /// Number of light sources of any kind.
    #[must_use]
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::util::color::hex_rgb;

    #[test]
    fn transform_composition_applies_parent_rotation() {
        let parent = Transform::from_yaw(Vec3::new(10.0, 0.0, 0.0), FRAC_PI_2);
        let child = Transform::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let world = parent.then(&child);
        // +Z rotated a quarter turn about +Y points along +X
        assert!((world.translation - Vec3::new(11.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn ground_transform_turns_plane_normal_up() {
        let t = Transform::ground(Vec3::ZERO);
        let normal = t.transform_vector(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn lights_follow_their_parent() {
        let parent = Transform::from_translation(Vec3::new(0.0, 8.0, -30.0));
        let light = Light::Point {
            color: hex_rgb(0x90cdf4),
            intensity: 0.3,
            range: 15.0,
            position: Vec3::new(0.0, 0.0, 3.0),
        }
        .transformed(&parent);
        assert!(matches!(
            light,
            Light::Point { position, .. } if position == Vec3::new(0.0, 8.0, -27.0)
        ));
    }

    #[test]
    fn new_scene_has_fog_and_global_lights() {
        let atmosphere = AtmosphereOptions::default();
        let scene = Scene::new(&atmosphere);
        assert_eq!(scene.fog.map(|f| f.near), Some(50.0));
        assert_eq!(scene.fog.map(|f| f.far), Some(300.0));
        assert!(scene
            .lights
            .iter()
            .any(|l| matches!(l, Light::Ambient { .. })));
        assert!(scene
            .lights
            .iter()
            .any(|l| matches!(l, Light::Directional { .. })));
    }

    #[test]
    fn material_transparency() {
        let window = Material::unlit(hex_rgb(0xffeeaa));
        assert!(!window.is_transparent());
        assert!(window.with_opacity(0.1).is_transparent());
        assert_eq!(window.with_opacity(4.0).opacity, 1.0);
    }
}
