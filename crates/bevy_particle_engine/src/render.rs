//! Read-only contract between the simulation and a presentation layer.
//!
//! Drawing itself is left to the host. What lives here is the pure per-particle
//! derivation a sprite renderer needs: lifetime-driven tint and scale, and the
//! sprite-sheet cell to sample.

use bevy::prelude::*;

use crate::data::{BlendMode, SpriteParams};
use crate::particle::Particle;
use crate::sampler::{lerp, lerp_color};

/// What a renderer may read from an emitter between updates.
pub trait RenderDataProvider {
    /// Number of live particles.
    fn particle_count(&self) -> usize;
    /// Live particles, `particle_count()` long.
    fn particles(&self) -> &[Particle];
    /// Static visual parameters.
    fn sprite_params(&self) -> &SpriteParams;

    fn blend_mode(&self) -> BlendMode {
        self.sprite_params().blend_mode
    }

    /// Per-particle draw data in pool order.
    fn draw_data(&self) -> impl Iterator<Item = ParticleDrawData> + '_ {
        let sprite = self.sprite_params();
        self.particles()
            .iter()
            .map(move |p| ParticleDrawData::from_particle(p, sprite))
    }
}

/// Everything needed to draw one particle as a sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDrawData {
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Particle scale multiplied by the lifetime scale.
    pub scale: Vec2,
    /// Lifetime tint multiplied by the particle tint.
    pub tint: LinearRgba,
    pub normalized_age: f32,
    /// Sprite-sheet frame, wrapped to the sheet.
    pub frame: u32,
    pub column: u32,
    pub row: u32,
    /// Normalized texture coordinates of the frame cell.
    pub uv_rect: Rect,
}

impl ParticleDrawData {
    pub fn from_particle(particle: &Particle, sprite: &SpriteParams) -> Self {
        let t = particle.normalized_age();
        let columns = sprite.columns.max(1);
        let rows = sprite.rows.max(1);
        let frame_count = sprite.frame_count();

        let frame = sprite_frame(t, frame_count, sprite.cycles.max(1));
        let column = frame % columns;
        let row = frame / columns;

        let cell = Vec2::new(1.0 / columns as f32, 1.0 / rows as f32);
        let uv_min = Vec2::new(column as f32, row as f32) * cell;

        let lifetime_tint = lerp_color(sprite.start_tint, sprite.end_tint, t);
        let tint = LinearRgba::new(
            lifetime_tint.red * particle.tint.red,
            lifetime_tint.green * particle.tint.green,
            lifetime_tint.blue * particle.tint.blue,
            lifetime_tint.alpha * particle.tint.alpha,
        );

        Self {
            position: particle.position,
            rotation: particle.rotation,
            scale: particle.scale * lerp(sprite.start_scale, sprite.end_scale, t),
            tint,
            normalized_age: t,
            frame,
            column,
            row,
            uv_rect: Rect::from_corners(uv_min, uv_min + cell),
        }
    }
}

/// `floor(t * frames * cycles)`, wrapped so extra cycles replay the sheet.
fn sprite_frame(t: f32, frame_count: u32, cycles: u32) -> u32 {
    let total = u64::from(frame_count) * u64::from(cycles);
    let raw = (f64::from(t.max(0.0)) * total as f64).floor() as u64;
    (raw % u64::from(frame_count)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(age: f32, max_lifetime: f32) -> Particle {
        Particle {
            age,
            max_lifetime,
            scale: Vec2::new(2.0, 1.0),
            tint: LinearRgba::new(0.5, 1.0, 1.0, 1.0),
            ..default()
        }
    }

    #[test]
    fn lifetime_interpolates_tint_and_scale() {
        let sprite = SpriteParams {
            start_tint: LinearRgba::new(1.0, 1.0, 1.0, 1.0),
            end_tint: LinearRgba::new(0.0, 0.0, 0.0, 0.0),
            start_scale: 1.0,
            end_scale: 3.0,
            ..default()
        };
        let data = ParticleDrawData::from_particle(&particle_at(0.5, 1.0), &sprite);
        assert!((data.normalized_age - 0.5).abs() < 1e-6);
        assert!((data.scale - Vec2::new(4.0, 2.0)).length() < 1e-6);
        assert!((data.tint.red - 0.25).abs() < 1e-6);
        assert!((data.tint.alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn frame_walks_the_sheet_row_major() {
        let sprite = SpriteParams {
            rows: 2,
            columns: 3,
            ..default()
        };
        // 6 frames over a lifetime of 6 seconds: one frame per second.
        let data = ParticleDrawData::from_particle(&particle_at(4.5, 6.0), &sprite);
        assert_eq!(data.frame, 4);
        assert_eq!(data.column, 1);
        assert_eq!(data.row, 1);
        assert!((data.uv_rect.min - Vec2::new(1.0 / 3.0, 0.5)).length() < 1e-6);
        assert!((data.uv_rect.max - Vec2::new(2.0 / 3.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn cycles_replay_the_sheet() {
        let sprite = SpriteParams {
            rows: 1,
            columns: 4,
            cycles: 2,
            ..default()
        };
        // 8 frames over 8 seconds; second 5 is frame 1 of the second cycle.
        let data = ParticleDrawData::from_particle(&particle_at(5.5, 8.0), &sprite);
        assert_eq!(data.frame, 1);
        assert_eq!(data.column, 1);
        assert_eq!(data.row, 0);
    }

    #[test]
    fn degenerate_sheet_is_single_frame() {
        let sprite = SpriteParams {
            rows: 0,
            columns: 0,
            cycles: 0,
            ..default()
        };
        let data = ParticleDrawData::from_particle(&particle_at(0.9, 1.0), &sprite);
        assert_eq!(data.frame, 0);
        assert_eq!(data.uv_rect, Rect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn oversized_sheet_stays_in_bounds() {
        let sprite = SpriteParams {
            rows: 70_000,
            columns: 70_000,
            cycles: u32::MAX,
            ..default()
        };
        assert_eq!(sprite.frame_count(), u32::MAX);

        let data = ParticleDrawData::from_particle(&particle_at(0.5, 1.0), &sprite);
        assert!(data.frame < sprite.frame_count());
        assert!(data.column < 70_000);
        assert!(data.row < 70_000);
        assert!(data.uv_rect.max.x <= 1.0 + 1e-4 && data.uv_rect.max.y <= 1.0 + 1e-4);
    }

    #[test]
    fn zero_lifetime_renders_as_fully_aged() {
        let data = ParticleDrawData::from_particle(&particle_at(0.0, 0.0), &SpriteParams::default());
        assert_eq!(data.normalized_age, 1.0);
        assert_eq!(data.frame, 0);
    }
}
