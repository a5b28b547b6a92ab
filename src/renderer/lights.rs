//! Packing of scene lights, fog, and background into GPU uniforms.

use bytemuck::Zeroable;

use crate::scene::{Fog, Light, Scene};
use crate::util::color::linear_rgb;

/// Lights beyond this count are dropped (with a warning).
pub const MAX_LIGHTS: usize = 64;

const KIND_DIRECTIONAL: f32 = 1.0;
const KIND_POINT: f32 = 2.0;
const KIND_SPOT: f32 = 3.0;

/// One non-ambient light. Must match `Light` in `city.wgsl` (64 bytes).
///
/// WGSL layout:
///   position_range: vec4<f32>       (offset 0)  xyz position, w range (0 = infinite)
///   color_intensity: vec4<f32>      (offset 16) linear rgb, w intensity
///   direction_cos_outer: vec4<f32>  (offset 32) xyz unit direction, w cos(outer cone)
///   params: vec4<f32>               (offset 48) x kind, y cos(inner cone)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    /// Position and range.
    pub position_range: [f32; 4],
    /// Linear color and intensity.
    pub color_intensity: [f32; 4],
    /// Direction the light travels and outer cone cosine.
    pub direction_cos_outer: [f32; 4],
    /// Kind tag and inner cone cosine.
    pub params: [f32; 4],
}

/// Fixed-size light array bound at `@group(0) @binding(2)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// Packed lights; only the first `EnvironmentUniform::ambient_count.w`
    /// are read.
    pub lights: [GpuLight; MAX_LIGHTS],
}

/// Fog, ambient term, and light count (48 bytes).
///
/// WGSL layout:
///   fog_color_near: vec4<f32>  (offset 0)  linear rgb, w fog start
///   fog_far: vec4<f32>         (offset 16) x fog end, y enabled flag
///   ambient_count: vec4<f32>   (offset 32) summed ambient rgb, w light count
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EnvironmentUniform {
    /// Fog color and start distance.
    pub fog_color_near: [f32; 4],
    /// Fog end distance and enabled flag.
    pub fog_far: [f32; 4],
    /// Ambient radiance and number of packed lights.
    pub ambient_count: [f32; 4],
}

/// Uniform contents derived from a scene.
#[derive(Debug, Clone, Copy)]
pub struct PackedLighting {
    /// Fog and ambient parameters.
    pub environment: EnvironmentUniform,
    /// Light array.
    pub lights: LightsUniform,
}

/// Pack the scene's lights and fog.
#[must_use]
pub fn pack_scene(scene: &Scene) -> PackedLighting {
    let mut ambient = [0.0_f32; 3];
    let mut packed = LightsUniform {
        lights: [GpuLight::zeroed(); MAX_LIGHTS],
    };
    let mut count = 0;
    let mut dropped = 0;

    for light in &scene.lights {
        if let Light::Ambient { color, intensity } = *light {
            let linear = linear_rgb(color);
            for (sum, c) in ambient.iter_mut().zip(linear) {
                *sum += c * intensity;
            }
            continue;
        }
        if count == MAX_LIGHTS {
            dropped += 1;
            continue;
        }
        if let Some(gpu) = GpuLight::from_light(light) {
            packed.lights[count] = gpu;
            count += 1;
        }
    }
    if dropped > 0 {
        log::warn!("{dropped} lights exceed the {MAX_LIGHTS}-light limit and are ignored");
    }

    let [ar, ag, ab] = ambient;
    PackedLighting {
        environment: EnvironmentUniform {
            fog_color_near: fog_color_near(scene.fog.as_ref()),
            fog_far: fog_far(scene.fog.as_ref()),
            ambient_count: [ar, ag, ab, count as f32],
        },
        lights: packed,
    }
}

fn fog_color_near(fog: Option<&Fog>) -> [f32; 4] {
    fog.map_or([0.0; 4], |fog| {
        let [r, g, b] = linear_rgb(fog.color);
        [r, g, b, fog.near]
    })
}

fn fog_far(fog: Option<&Fog>) -> [f32; 4] {
    match fog {
        Some(fog) if fog.far > fog.near => [fog.far, 1.0, 0.0, 0.0],
        _ => [0.0; 4],
    }
}

impl GpuLight {
    /// Convert a scene light; ambient lights have no per-light form.
    #[must_use]
    pub fn from_light(light: &Light) -> Option<Self> {
        let color_intensity = |color: [f32; 3], intensity: f32| {
            let [r, g, b] = linear_rgb(color);
            [r, g, b, intensity]
        };
        match *light {
            Light::Ambient { .. } => None,
            Light::Directional {
                color,
                intensity,
                position,
            } => {
                let direction = (-position).normalize_or(glam::Vec3::NEG_Y);
                Some(Self {
                    position_range: position.extend(0.0).to_array(),
                    color_intensity: color_intensity(color, intensity),
                    direction_cos_outer: direction.extend(-1.0).to_array(),
                    params: [KIND_DIRECTIONAL, 1.0, 0.0, 0.0],
                })
            }
            Light::Point {
                color,
                intensity,
                range,
                position,
            } => Some(Self {
                position_range: position.extend(range).to_array(),
                color_intensity: color_intensity(color, intensity),
                direction_cos_outer: [0.0, -1.0, 0.0, -1.0],
                params: [KIND_POINT, 1.0, 0.0, 0.0],
            }),
            Light::Spot {
                color,
                intensity,
                range,
                position,
                target,
                angle,
                penumbra,
            } => {
                let direction = (target - position).normalize_or(glam::Vec3::NEG_Y);
                let outer = angle.cos();
                let inner = (angle * (1.0 - penumbra.clamp(0.0, 1.0))).cos();
                Some(Self {
                    position_range: position.extend(range).to_array(),
                    color_intensity: color_intensity(color, intensity),
                    direction_cos_outer: direction.extend(outer).to_array(),
                    params: [KIND_SPOT, inner.max(outer + 1e-4), 0.0, 0.0],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use glam::Vec3;

    use super::*;
    use crate::options::AtmosphereOptions;

    fn point(z: f32) -> Light {
        Light::Point {
            color: [1.0; 3],
            intensity: 0.6,
            range: 50.0,
            position: Vec3::new(-12.0, 8.0, z),
        }
    }

    #[test]
    fn uniform_sizes_match_shader_layout() {
        assert_eq!(size_of::<GpuLight>(), 64);
        assert_eq!(size_of::<EnvironmentUniform>(), 48);
        assert_eq!(size_of::<LightsUniform>(), 64 * MAX_LIGHTS);
    }

    #[test]
    fn ambient_is_summed_and_not_counted() {
        let scene = Scene::new(&AtmosphereOptions::default());
        let packed = pack_scene(&scene);
        let ambient_lights = scene
            .lights
            .iter()
            .filter(|l| matches!(l, Light::Ambient { .. }))
            .count();
        assert_eq!(
            packed.environment.ambient_count[3] as usize,
            scene.lights.len() - ambient_lights
        );
        assert!(packed.environment.ambient_count[..3].iter().any(|c| *c > 0.0));
    }

    #[test]
    fn excess_lights_are_truncated() {
        let mut scene = Scene::default();
        for i in 0..(MAX_LIGHTS + 10) {
            scene.add_light(point(-(i as f32)));
        }
        let packed = pack_scene(&scene);
        assert_eq!(packed.environment.ambient_count[3] as usize, MAX_LIGHTS);
        assert_eq!(packed.lights.lights[MAX_LIGHTS - 1].position_range[2], -63.0);
    }

    #[test]
    fn spot_cone_inner_is_inside_outer() {
        let light = GpuLight::from_light(&Light::Spot {
            color: [1.0; 3],
            intensity: 1.0,
            range: 25.0,
            position: Vec3::new(0.0, 8.0, 4.0),
            target: Vec3::ZERO,
            angle: FRAC_PI_4,
            penumbra: 0.5,
        });
        let Some(light) = light else {
            unreachable!("spot lights always pack");
        };
        let outer = light.direction_cos_outer[3];
        let inner = light.params[1];
        assert!((outer - FRAC_PI_4.cos()).abs() < 1e-6);
        assert!(inner > outer);
        let dir = Vec3::from_slice(&light.direction_cos_outer[..3]);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.y < 0.0 && dir.z < 0.0);
    }

    #[test]
    fn directional_points_from_position_to_origin() {
        let light = GpuLight::from_light(&Light::Directional {
            color: [1.0; 3],
            intensity: 0.5,
            position: Vec3::new(0.0, 10.0, 0.0),
        });
        assert_eq!(
            light.map(|l| l.direction_cos_outer[..3].to_vec()),
            Some(vec![0.0, -1.0, 0.0])
        );
    }

    #[test]
    fn degenerate_fog_is_disabled() {
        let mut scene = Scene::default();
        scene.fog = Some(Fog {
            color: [0.1; 3],
            near: 100.0,
            far: 50.0,
        });
        assert_eq!(pack_scene(&scene).environment.fog_far[1], 0.0);
    }
}
