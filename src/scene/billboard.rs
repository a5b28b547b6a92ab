//! Billboard assemblies.
//!
//! A billboard is a group placed at its content position and turned toward
//! the road: a metallic frame, the textured screen just in front of it, a
//! pole from the frame's bottom edge down to a flared base resting on the
//! ground, a spot light aimed at the screen, and a soft point fill.
//! Parts and lights are expressed in the group's local space.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use glam::Vec3;

use super::{BillboardContent, Light, Material, Primitive, Transform};
use crate::texture::{GlyphFace, RasterImage, TextureComposer};
use crate::util::color::hex_rgb;

/// Frame size (width, height, depth).
pub const FRAME_SIZE: Vec3 = Vec3::new(10.5, 6.75, 0.5);
/// Frame color.
pub const FRAME_COLOR: u32 = 0x1a365d;
/// Pole and base color.
pub const POLE_COLOR: u32 = 0x333333;
/// Screen offset in front of the frame center.
pub const SCREEN_OFFSET: f32 = 0.26;
/// Pole radius.
pub const POLE_RADIUS: f32 = 0.3;
/// Base cap radii (top, bottom) and height.
pub const BASE: (f32, f32, f32) = (0.8, 1.0, 0.5);
/// Spot light color.
pub const SPOT_COLOR: u32 = 0x3182ce;
/// Fill light color.
pub const FILL_COLOR: u32 = 0x90cdf4;

/// Role of a part within the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Textured face.
    Screen,
    /// Box behind the screen.
    Frame,
    /// Vertical support.
    Pole,
    /// Flared foot on the ground.
    Base,
}

/// One piece of a billboard in group-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardPart {
    /// Role.
    pub kind: PartKind,
    /// Shape.
    pub primitive: Primitive,
    /// Appearance. The screen's texture is assigned when the billboard is
    /// added to a scene.
    pub material: Material,
    /// Transform relative to the group.
    pub local: Transform,
}

/// A fully assembled billboard, ready to be added to a scene.
#[derive(Debug, Clone)]
pub struct BillboardInstance {
    /// Source content.
    pub content: BillboardContent,
    /// Composed screen texture.
    pub texture: RasterImage,
    /// Group transform (content position, yaw).
    pub transform: Transform,
    /// Rotation of the group about +Y.
    pub yaw: f32,
    /// Screen, frame, pole, and base.
    pub parts: Vec<BillboardPart>,
    /// Spot and fill light in group-local space.
    pub lights: [Light; 2],
}

impl BillboardInstance {
    /// Find a part by role.
    #[must_use]
    pub fn part(&self, kind: PartKind) -> Option<&BillboardPart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// World-space center of a part.
    #[must_use]
    pub fn part_world_position(&self, kind: PartKind) -> Option<Vec3> {
        self.part(kind)
            .map(|p| self.transform.transform_point(p.local.translation))
    }
}

/// Yaw that turns a billboard toward the road: left-side billboards
/// (negative x) turn by +π/6, the rest by −π/6.
#[must_use]
pub fn facing_yaw(position: Vec3) -> f32 {
    if position.x < 0.0 {
        FRAC_PI_6
    } else {
        -FRAC_PI_6
    }
}

/// Assembles billboards, composing their textures on the way.
#[derive(Debug)]
pub struct BillboardFactory<'a, F> {
    composer: &'a TextureComposer<F>,
}

impl<'a, F: GlyphFace> BillboardFactory<'a, F> {
    /// Factory drawing screens with `composer`.
    #[must_use]
    pub fn new(composer: &'a TextureComposer<F>) -> Self {
        Self { composer }
    }

    /// Assemble one billboard.
    #[must_use]
    pub fn build(&self, content: &BillboardContent) -> BillboardInstance {
        let layout = self.composer.layout();
        let texture = self.composer.compose(&content.title, &content.body);
        let yaw = facing_yaw(content.position);

        let screen_width = layout.screen_width;
        let screen_height = layout.screen_height();
        let frame_bottom = -FRAME_SIZE.y / 2.0;
        let (base_top_radius, base_bottom_radius, base_height) = BASE;
        // Ground is at local y = -position.y
        let ground = -content.position.y;
        let pole_height = (frame_bottom - (ground + base_height)).max(0.0);

        let pole_material = Material::standard(hex_rgb(POLE_COLOR), 0.3, 0.9);
        let parts = vec![
            BillboardPart {
                kind: PartKind::Screen,
                primitive: Primitive::Plane {
                    width: screen_width,
                    height: screen_height,
                },
                material: Material::unlit([1.0; 3]).double_sided(),
                local: Transform::from_translation(Vec3::new(0.0, 0.0, SCREEN_OFFSET)),
            },
            BillboardPart {
                kind: PartKind::Frame,
                primitive: Primitive::Box {
                    width: FRAME_SIZE.x,
                    height: FRAME_SIZE.y,
                    depth: FRAME_SIZE.z,
                },
                material: Material::standard(hex_rgb(FRAME_COLOR), 0.2, 0.8),
                local: Transform::IDENTITY,
            },
            BillboardPart {
                kind: PartKind::Pole,
                primitive: Primitive::Cylinder {
                    radius_top: POLE_RADIUS,
                    radius_bottom: POLE_RADIUS,
                    height: pole_height,
                },
                material: pole_material,
                local: Transform::from_translation(Vec3::new(
                    0.0,
                    frame_bottom - pole_height / 2.0,
                    0.0,
                )),
            },
            BillboardPart {
                kind: PartKind::Base,
                primitive: Primitive::Cylinder {
                    radius_top: base_top_radius,
                    radius_bottom: base_bottom_radius,
                    height: base_height,
                },
                material: pole_material,
                local: Transform::from_translation(Vec3::new(
                    0.0,
                    ground + base_height / 2.0,
                    0.0,
                )),
            },
        ];

        let lights = [
            Light::Spot {
                color: hex_rgb(SPOT_COLOR),
                intensity: 1.0,
                range: 25.0,
                position: Vec3::new(0.0, 5.0, 5.0),
                target: Vec3::new(0.0, 0.0, SCREEN_OFFSET),
                angle: FRAC_PI_4,
                penumbra: 0.5,
            },
            Light::Point {
                color: hex_rgb(FILL_COLOR),
                intensity: 0.3,
                range: 15.0,
                position: Vec3::new(0.0, 0.0, 3.0),
            },
        ];

        BillboardInstance {
            content: content.clone(),
            texture,
            transform: Transform::from_yaw(content.position, yaw),
            yaw,
            parts,
            lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BillboardOptions;
    use crate::scene::Shading;
    use crate::texture::BlockFace;

    fn composer() -> TextureComposer<BlockFace> {
        TextureComposer::new(BlockFace::default(), BillboardOptions::default())
    }

    fn content(x: f32, y: f32) -> BillboardContent {
        BillboardContent::new("b", "Title", "Body text", Vec3::new(x, y, -30.0))
    }

    fn cylinder_height(part: &BillboardPart) -> f32 {
        match part.primitive {
            Primitive::Cylinder { height, .. } => height,
            _ => f32::NAN,
        }
    }

    #[test]
    fn yaw_depends_on_side_only() {
        assert_eq!(facing_yaw(Vec3::new(-15.0, 8.0, -30.0)), FRAC_PI_6);
        assert_eq!(facing_yaw(Vec3::new(20.0, 10.0, -80.0)), -FRAC_PI_6);
        assert_eq!(facing_yaw(Vec3::ZERO), -FRAC_PI_6);
    }

    #[test]
    fn screen_matches_texture_aspect() {
        let composer = composer();
        let b = BillboardFactory::new(&composer).build(&content(-15.0, 8.0));
        let screen = b.part(PartKind::Screen).map(|p| p.primitive);
        assert_eq!(
            screen,
            Some(Primitive::Plane {
                width: 10.0,
                height: 6.25
            })
        );
        let (w, h) = b.texture.dimensions();
        assert_eq!(w as f32 / h as f32, 10.0 / 6.25);
        let material = b.part(PartKind::Screen).map(|p| p.material);
        assert!(material.is_some_and(|m| m.double_sided && m.shading == Shading::Unlit));
    }

    #[test]
    fn pole_spans_frame_to_base_and_base_rests_on_ground() {
        let composer = composer();
        for y in [8.0, 10.0, 13.0] {
            let b = BillboardFactory::new(&composer).build(&content(18.0, y));
            let pole = b.part(PartKind::Pole).copied();
            let base = b.part(PartKind::Base).copied();
            let (Some(pole), Some(base)) = (pole, base) else {
                unreachable!("billboard parts missing");
            };
            let pole_h = cylinder_height(&pole);
            let pole_top = pole.local.translation.y + pole_h / 2.0;
            let pole_bottom = pole.local.translation.y - pole_h / 2.0;
            let base_top = base.local.translation.y + BASE.2 / 2.0;
            let base_bottom_world = y + base.local.translation.y - BASE.2 / 2.0;

            assert!((pole_top - (-FRAME_SIZE.y / 2.0)).abs() < 1e-5);
            assert!((pole_bottom - base_top).abs() < 1e-5);
            assert!(base_bottom_world.abs() < 1e-5);
        }
    }

    #[test]
    fn low_billboard_clamps_pole_height() {
        let composer = composer();
        let b = BillboardFactory::new(&composer).build(&content(5.0, 2.0));
        let pole = b.part(PartKind::Pole).map(cylinder_height);
        assert_eq!(pole, Some(0.0));
    }

    #[test]
    fn spot_light_aims_at_the_screen() {
        let composer = composer();
        let b = BillboardFactory::new(&composer).build(&content(-15.0, 8.0));
        assert!(matches!(
            b.lights[0],
            Light::Spot { target, range, .. } if target.z == SCREEN_OFFSET && range == 25.0
        ));
        assert!(matches!(b.lights[1], Light::Point { range, .. } if range == 15.0));
    }

    #[test]
    fn screen_sits_in_front_of_frame_in_world_space() {
        let composer = composer();
        let b = BillboardFactory::new(&composer).build(&content(-15.0, 8.0));
        let screen = b.part_world_position(PartKind::Screen);
        let frame = b.part_world_position(PartKind::Frame);
        let (Some(screen), Some(frame)) = (screen, frame) else {
            unreachable!("billboard parts missing");
        };
        // Left billboard turned +30 degrees: the screen moves toward +x
        assert!(screen.x > frame.x);
        assert!(((screen - frame).length() - SCREEN_OFFSET).abs() < 1e-5);
    }
}
