//! Buildings along both sides of the corridor.
//!
//! Slots are laid out every [`SLOT_STEP`] units into the city starting at
//! [`FIRST_SLOT`]. Each slot has a building on either side with
//! probability 0.7; sizes, colors, lateral offsets, and jitter are drawn
//! from fixed ranges. Every building carries a grid of window panes on its
//! road-facing wall, each one skipped with probability 0.2 and otherwise
//! lit (bright) or vacant (dim).
//!
//! The random source is injected so generation can be reproduced with a
//! seeded generator; the draw order below is part of the contract.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use rand::Rng;

use super::{Material, Primitive, SceneNode, Transform};
use crate::options::CityOptions;
use crate::util::color::hex_rgb;

/// Building facade colors.
pub const PALETTE: [u32; 5] = [0x2a4858, 0x3d5a6c, 0x1e3a4c, 0x4a6572, 0x2c3e50];

/// Travel-axis position of the first slot.
pub const FIRST_SLOT: f32 = -20.0;
/// Distance between slots along the corridor.
pub const SLOT_STEP: f32 = 15.0;
/// Vertical spacing of window rows.
pub const ROW_SPACING: f32 = 4.0;
/// Horizontal spacing of window columns.
pub const COL_SPACING: f32 = 3.0;
/// Window pane width.
pub const PANE_WIDTH: f32 = 1.0;
/// Window pane height.
pub const PANE_HEIGHT: f32 = 1.5;
/// Window glass color.
pub const WINDOW_COLOR: u32 = 0xffeeaa;
/// Opacity of an inhabited unit's window.
pub const LIT_OPACITY: f32 = 0.8;
/// Opacity of a vacant unit's window.
pub const DIM_OPACITY: f32 = 0.1;

const PLACE_THRESHOLD: f32 = 0.3;
const WINDOW_THRESHOLD: f32 = 0.2;
const LIT_THRESHOLD: f32 = 0.4;

/// A window on a building facade. Positions are in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPane {
    /// Pane center.
    pub position: Vec3,
    /// Rotation about +Y.
    pub yaw: f32,
    /// [`LIT_OPACITY`] or [`DIM_OPACITY`].
    pub opacity: f32,
}

impl WindowPane {
    /// Whether the unit behind the window is lit.
    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.opacity > DIM_OPACITY
    }

    /// The pane as a translucent, unlit scene node.
    #[must_use]
    pub fn node(&self) -> SceneNode {
        SceneNode {
            primitive: Primitive::Plane {
                width: PANE_WIDTH,
                height: PANE_HEIGHT,
            },
            material: Material::unlit(hex_rgb(WINDOW_COLOR))
                .with_opacity(self.opacity)
                .double_sided(),
            transform: Transform::from_yaw(self.position, self.yaw),
        }
    }
}

/// A box-shaped building and its windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
    /// Extent along Z.
    pub depth: f32,
    /// Center in world space; `y` is half the height.
    pub position: Vec3,
    /// Facade color from [`PALETTE`].
    pub color: u32,
    /// `-1` on the left of the road, `+1` on the right.
    pub side: f32,
    /// Facade windows.
    pub windows: Vec<WindowPane>,
}

impl Building {
    /// The building body as a lit scene node.
    #[must_use]
    pub fn node(&self) -> SceneNode {
        SceneNode {
            primitive: Primitive::Box {
                width: self.width,
                height: self.height,
                depth: self.depth,
            },
            material: Material::standard(hex_rgb(self.color), 0.7, 0.1),
            transform: Transform::from_translation(self.position),
        }
    }
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityLayout {
    /// Buildings in slot order, left side first within a slot.
    pub buildings: Vec<Building>,
}

impl CityLayout {
    /// Total number of window panes.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.buildings.iter().map(|b| b.windows.len()).sum()
    }
}

/// Places buildings with facade windows along a corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProceduralCityBuilder {
    /// Corridor length; slots stop before `-length`.
    pub length: f32,
}

impl ProceduralCityBuilder {
    /// Builder for a corridor of `length` units.
    #[must_use]
    pub fn new(length: f32) -> Self {
        Self { length }
    }

    /// Builder from city options.
    #[must_use]
    pub fn from_options(options: &CityOptions) -> Self {
        Self::new(options.length)
    }

    /// Slot positions along the travel axis.
    pub fn slots(&self) -> impl Iterator<Item = f32> {
        let length = self.length;
        (0..)
            .map(|i| FIRST_SLOT - SLOT_STEP * i as f32)
            .take_while(move |z| *z > -length)
    }

    /// Generate a city with `rng` supplying uniform values in `[0, 1)`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> CityLayout {
        let mut buildings = Vec::new();
        for slot in self.slots() {
            for side in [-1.0_f32, 1.0] {
                if rng.random::<f32>() > PLACE_THRESHOLD {
                    buildings.push(Self::building(rng, slot, side));
                }
            }
        }
        let layout = CityLayout { buildings };
        log::debug!(
            "generated {} buildings with {} windows over {} units",
            layout.buildings.len(),
            layout.window_count(),
            self.length
        );
        layout
    }

    fn building<R: Rng + ?Sized>(rng: &mut R, slot: f32, side: f32) -> Building {
        let width = 8.0 + rng.random::<f32>() * 8.0;
        let height = 15.0 + rng.random::<f32>() * 35.0;
        let depth = 8.0 + rng.random::<f32>() * 8.0;
        let color_index =
            ((rng.random::<f32>() * PALETTE.len() as f32) as usize).min(PALETTE.len() - 1);
        let position = Vec3::new(
            side * (35.0 + rng.random::<f32>() * 15.0),
            height / 2.0,
            slot + rng.random::<f32>() * 10.0,
        );

        let mut building = Building {
            width,
            height,
            depth,
            position,
            color: PALETTE[color_index],
            side,
            windows: Vec::new(),
        };
        building.windows = Self::windows(rng, &building);
        building
    }

    fn windows<R: Rng + ?Sized>(rng: &mut R, building: &Building) -> Vec<WindowPane> {
        let rows = (building.height / ROW_SPACING).floor() as u32;
        let cols = (building.width / COL_SPACING).floor() as u32;
        let side = building.side;
        let origin = building.position;

        let mut windows = Vec::new();
        for row in 1..rows {
            for col in 0..cols {
                if rng.random::<f32>() <= WINDOW_THRESHOLD {
                    continue;
                }
                let opacity = if rng.random::<f32>() > LIT_THRESHOLD {
                    LIT_OPACITY
                } else {
                    DIM_OPACITY
                };
                // The grid spans the facade using the building width.
                let position = Vec3::new(
                    origin.x - side * (building.width / 2.0 + 0.1),
                    row as f32 * ROW_SPACING - building.height / 2.0 + origin.y,
                    origin.z - building.width / 2.0 + 2.0 + col as f32 * COL_SPACING,
                );
                windows.push(WindowPane {
                    position,
                    yaw: side * FRAC_PI_2,
                    opacity,
                });
            }
        }
        windows
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn build(seed: u64) -> CityLayout {
        let mut rng = StdRng::seed_from_u64(seed);
        ProceduralCityBuilder::new(600.0).build(&mut rng)
    }

    #[test]
    fn slots_cover_the_corridor() {
        let slots: Vec<f32> = ProceduralCityBuilder::new(600.0).slots().collect();
        assert_eq!(slots.first(), Some(&-20.0));
        assert_eq!(slots.get(1), Some(&-35.0));
        assert!(slots.iter().all(|z| *z > -600.0));
        // -20 - 15 * 38 = -590 is the last slot before -600
        assert_eq!(slots.last(), Some(&-590.0));
        assert_eq!(slots.len(), 39);
    }

    #[test]
    fn same_seed_same_city() {
        assert_eq!(build(7), build(7));
        assert_ne!(build(7), build(8));
    }

    #[test]
    fn buildings_respect_ranges() {
        let city = build(42);
        assert!(!city.buildings.is_empty());
        for b in &city.buildings {
            assert!((8.0..16.0).contains(&b.width));
            assert!((15.0..50.0).contains(&b.height));
            assert!((8.0..16.0).contains(&b.depth));
            assert!(PALETTE.contains(&b.color));
            assert_eq!(b.position.y, b.height / 2.0);
            let lateral = b.position.x.abs();
            assert!((35.0..50.0).contains(&lateral));
            assert_eq!(b.position.x.signum(), b.side);
        }
    }

    #[test]
    fn jitter_stays_within_the_slot() {
        let builder = ProceduralCityBuilder::new(600.0);
        let slots: Vec<f32> = builder.slots().collect();
        let city = build(3);
        for b in &city.buildings {
            assert!(slots
                .iter()
                .any(|slot| b.position.z >= *slot && b.position.z < slot + 10.0));
        }
    }

    #[test]
    fn placement_rate_is_about_seventy_percent() {
        let mut placed = 0usize;
        let mut possible = 0usize;
        for seed in 0..20 {
            placed += build(seed).buildings.len();
            possible += 39 * 2;
        }
        let rate = placed as f32 / possible as f32;
        assert!((0.62..0.78).contains(&rate), "rate {rate}");
    }

    #[test]
    fn windows_sit_on_the_road_facing_wall() {
        let city = build(11);
        for b in &city.buildings {
            let rows = (b.height / ROW_SPACING).floor() as usize;
            let cols = (b.width / COL_SPACING).floor() as usize;
            assert!(b.windows.len() <= rows.saturating_sub(1) * cols);
            for w in &b.windows {
                let wall_x = b.position.x - b.side * (b.width / 2.0 + 0.1);
                assert_eq!(w.position.x, wall_x);
                assert!(w.position.x.abs() < b.position.x.abs());
                assert_eq!(w.yaw, b.side * FRAC_PI_2);
                assert!(w.opacity == LIT_OPACITY || w.opacity == DIM_OPACITY);
                // Row 0 is never used
                assert!(w.position.y >= ROW_SPACING - b.height / 2.0 + b.position.y - 1e-4);
            }
        }
    }

    #[test]
    fn lit_and_vacant_windows_both_appear() {
        let city = build(5);
        let lit = city
            .buildings
            .iter()
            .flat_map(|b| &b.windows)
            .filter(|w| w.is_lit())
            .count();
        let total = city.window_count();
        assert!(lit > 0 && lit < total);
        // 0.8 * 0.6 of cells lit, 0.8 * 0.4 dim: roughly 60% of placed panes
        let share = lit as f32 / total as f32;
        assert!((0.5..0.7).contains(&share), "lit share {share}");
    }

    #[test]
    fn short_corridor_has_no_slots() {
        let mut rng = StdRng::seed_from_u64(1);
        let city = ProceduralCityBuilder::new(20.0).build(&mut rng);
        assert!(city.buildings.is_empty());
    }

    #[test]
    fn windows_become_translucent_nodes() {
        let pane = WindowPane {
            position: Vec3::new(30.0, 10.0, -40.0),
            yaw: -FRAC_PI_2,
            opacity: DIM_OPACITY,
        };
        let node = pane.node();
        assert!(node.material.is_transparent());
        assert!(node.material.double_sided);
    }
}
