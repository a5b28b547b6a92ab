//! The static surroundings of the city: ground, road, lane markings, the
//! ambient and moon lights, and street lights alternating on both sides of
//! the road.

use glam::Vec3;

use super::{Light, Material, Primitive, SceneNode, Transform};
use crate::options::AtmosphereOptions;
use crate::util::color::hex_rgb;

/// Ground color.
pub const GROUND_COLOR: u32 = 0x1a1a2e;
/// Road surface color.
pub const ROAD_COLOR: u32 = 0x2a2a3e;
/// Lane marking color.
pub const LANE_COLOR: u32 = 0xffff88;
/// Width of the ground plane.
pub const GROUND_WIDTH: f32 = 100.0;
/// Width of the road.
pub const ROAD_WIDTH: f32 = 16.0;
/// Extra length of ground and road beyond the corridor.
pub const OVERHANG: f32 = 200.0;
/// Distance between lane markings.
pub const LANE_SPACING: f32 = 10.0;
/// Left street light color (warm).
pub const LEFT_LIGHT_COLOR: u32 = 0xffaa44;
/// Right street light color (cool).
pub const RIGHT_LIGHT_COLOR: u32 = 0x44aaff;

const FIRST_STREET_LIGHT: f32 = -50.0;
const STREET_LIGHT_X: f32 = 12.0;
const STREET_LIGHT_Y: f32 = 8.0;

/// Ambient and moon light.
#[must_use]
pub fn global_lights(atmosphere: &AtmosphereOptions) -> [Light; 2] {
    [
        Light::Ambient {
            color: atmosphere.ambient_color,
            intensity: atmosphere.ambient_intensity,
        },
        Light::Directional {
            color: atmosphere.moon_color,
            intensity: atmosphere.moon_intensity,
            position: Vec3::from_array(atmosphere.moon_position),
        },
    ]
}

/// Ground, road, and dashed lane markings for a corridor of `length`.
#[must_use]
pub fn ground_nodes(length: f32) -> Vec<SceneNode> {
    let center_z = -length / 2.0;
    let span = length + OVERHANG;
    let mut nodes = vec![
        SceneNode {
            primitive: Primitive::Plane {
                width: GROUND_WIDTH,
                height: span,
            },
            material: Material::standard(hex_rgb(GROUND_COLOR), 0.9, 0.0),
            transform: Transform::ground(Vec3::new(0.0, 0.0, center_z)),
        },
        SceneNode {
            primitive: Primitive::Plane {
                width: ROAD_WIDTH,
                height: span,
            },
            material: Material::standard(hex_rgb(ROAD_COLOR), 0.8, 0.0),
            transform: Transform::ground(Vec3::new(0.0, 0.01, center_z)),
        },
    ];

    let end = -length - OVERHANG / 2.0;
    let lane = Material::unlit(hex_rgb(LANE_COLOR));
    nodes.extend(
        (0..)
            .map(|i| -LANE_SPACING * i as f32)
            .take_while(|z| *z > end)
            .map(|z| SceneNode {
                primitive: Primitive::Plane {
                    width: 0.3,
                    height: 5.0,
                },
                material: lane,
                transform: Transform::ground(Vec3::new(0.0, 0.02, z)),
            }),
    );
    nodes
}

/// Pairs of point lights every `spacing` units: warm on the left, cool on
/// the right half a spacing further back.
#[must_use]
pub fn street_lights(length: f32, spacing: f32) -> Vec<Light> {
    if spacing <= 0.0 || !spacing.is_finite() {
        log::warn!("street light spacing {spacing} is not positive, skipping street lights");
        return Vec::new();
    }
    let mut lights = Vec::new();
    let mut z = FIRST_STREET_LIGHT;
    while z > -length {
        lights.push(Light::Point {
            color: hex_rgb(LEFT_LIGHT_COLOR),
            intensity: 0.6,
            range: 50.0,
            position: Vec3::new(-STREET_LIGHT_X, STREET_LIGHT_Y, z),
        });
        lights.push(Light::Point {
            color: hex_rgb(RIGHT_LIGHT_COLOR),
            intensity: 0.6,
            range: 50.0,
            position: Vec3::new(STREET_LIGHT_X, STREET_LIGHT_Y, z + spacing / 2.0),
        });
        z -= spacing;
    }
    lights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shading;

    #[test]
    fn ground_and_road_cover_the_corridor() {
        let nodes = ground_nodes(600.0);
        assert_eq!(
            nodes[0].primitive,
            Primitive::Plane {
                width: 100.0,
                height: 800.0
            }
        );
        assert_eq!(nodes[0].transform.translation.z, -300.0);
        assert!(nodes[1].transform.translation.y > nodes[0].transform.translation.y);
    }

    #[test]
    fn lane_markings_every_ten_units() {
        let nodes = ground_nodes(600.0);
        let lanes: Vec<f32> = nodes[2..].iter().map(|n| n.transform.translation.z).collect();
        // z = 0, -10, ..., -690 (stops before -700)
        assert_eq!(lanes.len(), 70);
        assert_eq!(lanes.first(), Some(&0.0));
        assert_eq!(lanes.last(), Some(&-690.0));
        assert!(nodes[2..]
            .iter()
            .all(|n| n.material.shading == Shading::Unlit));
    }

    #[test]
    fn street_lights_alternate_sides() {
        let lights = street_lights(600.0, 60.0);
        // z = -50, -110, ..., -590
        assert_eq!(lights.len(), 20);
        let positions: Vec<Vec3> = lights
            .iter()
            .filter_map(|l| match l {
                Light::Point { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(positions[0], Vec3::new(-12.0, 8.0, -50.0));
        assert_eq!(positions[1], Vec3::new(12.0, 8.0, -20.0));
        assert!(positions.iter().step_by(2).all(|p| p.x < 0.0));
    }

    #[test]
    fn bad_spacing_yields_no_lights() {
        assert!(street_lights(600.0, 0.0).is_empty());
        assert!(street_lights(600.0, f32::NAN).is_empty());
    }
}
