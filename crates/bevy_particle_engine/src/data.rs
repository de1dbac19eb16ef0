//! Serializable data model for particle effects.
//!
//! All types are serializable (serde + RON) and reflectable (Bevy Reflect).
//! The runtime `ParticleEmitter` reads an `EmitterConfig` on every update, so
//! edits made between frames take effect on the next tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Effect definition
// ---------------------------------------------------------------------------

/// Serializable form of a whole `ParticleSystem`.
///
/// Emitter order is render order (back to front).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Reflect)]
#[serde(default)]
pub struct ParticleEffectDef {
    pub emitters: Vec<EmitterDef>,
}

impl ParticleEffectDef {
    /// Single-emitter effect.
    pub fn single(config: EmitterConfig, sprite: SpriteParams) -> Self {
        Self {
            emitters: vec![EmitterDef { config, sprite }],
        }
    }
}

/// One emitter together with the static parameters its renderer needs.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Reflect)]
#[serde(default)]
pub struct EmitterDef {
    pub config: EmitterConfig,
    pub sprite: SpriteParams,
}

// ---------------------------------------------------------------------------
// Range mode
// ---------------------------------------------------------------------------

/// How a vector or color range is sampled.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum RangeMode {
    /// Independent interpolant per axis / channel.
    #[default]
    NonUniform,
    /// One interpolant shared by every axis / channel.
    Uniform,
}

impl RangeMode {
    pub const ALL: [Self; 2] = [Self::NonUniform, Self::Uniform];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NonUniform => "Non-Uniform",
            Self::Uniform => "Uniform",
        }
    }
}

// ---------------------------------------------------------------------------
// Emitter configuration
// ---------------------------------------------------------------------------

/// Spawn, cadence and force settings for a single emitter.
///
/// Every `min_*`/`max_*` pair is sampled by linear interpolation, so an
/// inverted pair (`min > max`) is legal and simply interpolates backwards.
/// Rotations are in radians.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Reflect)]
#[serde(default)]
pub struct EmitterConfig {
    /// Display name (for editor UI and stats).
    pub name: String,

    /// Seconds the emitter stays completely inert after a reset.
    pub start_delay: f32,
    /// Maximum number of live particles. The pool is resized on the next update.
    pub capacity: usize,

    /// Particles spawned per burst.
    pub burst_size: u32,
    /// Number of bursts before the emitter stops spawning. 0 = unlimited.
    pub max_bursts: u32,
    /// Seconds between bursts.
    pub burst_interval: f32,

    pub min_lifetime: f32,
    pub max_lifetime: f32,

    /// Rectangular spawn area, always sampled per axis.
    pub min_position: Vec2,
    pub max_position: Vec2,

    /// Radial offset added on top of the rectangular position sample.
    pub position_min_radius: f32,
    pub position_max_radius: f32,

    pub min_rotation: f32,
    pub max_rotation: f32,

    pub min_scale: Vec2,
    pub max_scale: Vec2,
    pub scale_mode: RangeMode,

    pub min_velocity: Vec2,
    pub max_velocity: Vec2,
    pub velocity_mode: RangeMode,

    pub min_angular_velocity: f32,
    pub max_angular_velocity: f32,

    /// Constant acceleration, sampled once per particle.
    pub min_linear_force: Vec2,
    pub max_linear_force: Vec2,
    pub linear_force_mode: RangeMode,

    pub min_angular_force: f32,
    pub max_angular_force: f32,

    pub min_color: LinearRgba,
    pub max_color: LinearRgba,
    pub color_mode: RangeMode,

    /// Explicit Euler damping. `drag * dt > 1` flips the velocity sign.
    pub drag: f32,
    pub angular_drag: f32,

    /// Spawn-time push away from this point.
    pub radial_impulse_origin: Vec2,
    pub min_radial_impulse: f32,
    pub max_radial_impulse: f32,

    /// Per-tick acceleration away from this point (negative attracts).
    pub radial_force_origin: Vec2,
    pub radial_force: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: "Emitter".to_string(),
            start_delay: 0.0,
            capacity: 1024,
            burst_size: 1,
            max_bursts: 0,
            burst_interval: 0.1,
            min_lifetime: 1.0,
            max_lifetime: 1.0,
            min_position: Vec2::ZERO,
            max_position: Vec2::ZERO,
            position_min_radius: 0.0,
            position_max_radius: 0.0,
            min_rotation: 0.0,
            max_rotation: 0.0,
            min_scale: Vec2::ONE,
            max_scale: Vec2::ONE,
            scale_mode: RangeMode::NonUniform,
            min_velocity: Vec2::ZERO,
            max_velocity: Vec2::ZERO,
            velocity_mode: RangeMode::NonUniform,
            min_angular_velocity: 0.0,
            max_angular_velocity: 0.0,
            min_linear_force: Vec2::ZERO,
            max_linear_force: Vec2::ZERO,
            linear_force_mode: RangeMode::NonUniform,
            min_angular_force: 0.0,
            max_angular_force: 0.0,
            min_color: LinearRgba::WHITE,
            max_color: LinearRgba::WHITE,
            color_mode: RangeMode::NonUniform,
            drag: 0.0,
            angular_drag: 0.0,
            radial_impulse_origin: Vec2::ZERO,
            min_radial_impulse: 0.0,
            max_radial_impulse: 0.0,
            radial_force_origin: Vec2::ZERO,
            radial_force: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Sprite render parameters
// ---------------------------------------------------------------------------

/// Blending used by the presentation layer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum BlendMode {
    /// Straight (non-premultiplied) alpha.
    #[default]
    AlphaBlend,
    Premultiplied,
    Additive,
    Opaque,
}

impl BlendMode {
    pub const ALL: [Self; 4] = [
        Self::AlphaBlend,
        Self::Premultiplied,
        Self::Additive,
        Self::Opaque,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AlphaBlend => "Alpha Blend",
            Self::Premultiplied => "Premultiplied",
            Self::Additive => "Additive",
            Self::Opaque => "Opaque",
        }
    }
}

/// Static visual parameters a sprite renderer applies over particle lifetime.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Reflect)]
#[serde(default)]
pub struct SpriteParams {
    /// Texture asset path (if any).
    pub texture: Option<String>,
    /// Sprite-sheet rows.
    pub rows: u32,
    /// Sprite-sheet columns.
    pub columns: u32,
    /// How many times the sheet is played over one particle lifetime.
    pub cycles: u32,
    pub start_tint: LinearRgba,
    pub end_tint: LinearRgba,
    pub start_scale: f32,
    pub end_scale: f32,
    pub blend_mode: BlendMode,
}

impl Default for SpriteParams {
    fn default() -> Self {
        Self {
            texture: None,
            rows: 1,
            columns: 1,
            cycles: 1,
            start_tint: LinearRgba::WHITE,
            end_tint: LinearRgba::WHITE,
            start_scale: 1.0,
            end_scale: 1.0,
            blend_mode: BlendMode::AlphaBlend,
        }
    }
}

impl SpriteParams {
    /// Total frames in one pass over the sheet. Never zero; saturates on
    /// oversized sheets.
    pub fn frame_count(&self) -> u32 {
        self.rows.max(1).saturating_mul(self.columns.max(1))
    }
}
