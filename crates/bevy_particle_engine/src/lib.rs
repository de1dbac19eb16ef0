//! # bevy_particle_engine
//!
//! CPU particle emitters for 2D effects.
//!
//! Each emitter owns a fixed-capacity pool of particles. Once per frame it
//! spawns bursts of randomized particles (evicting the oldest when full),
//! integrates velocity, forces, drag and radial forces, and swap-removes
//! expired particles. A [`ParticleSystem`] groups emitters in render order;
//! renderers read particles through [`RenderDataProvider`] between updates.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_particle_engine::{ParticleEnginePlugin, ParticleSystem, presets};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ParticleEnginePlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     let (_, def) = presets::default_presets().remove(1);
//!     commands.spawn(ParticleSystem::from_def(&def));
//! }
//! ```
//!
//! Without Bevy scheduling, drive a system directly:
//!
//! ```
//! use bevy_particle_engine::{EmitterConfig, ParticleSystem, SpriteParams};
//!
//! let mut system = ParticleSystem::default();
//! system.add(EmitterConfig::default(), SpriteParams::default());
//! system.update(1.0 / 60.0);
//! assert_eq!(system.total_particles(), 1);
//! ```

pub mod data;
pub mod emitter;
pub mod particle;
pub mod presets;
pub mod render;
pub mod sampler;
pub mod system;

// Re-export core types
pub use data::*;
pub use emitter::ParticleEmitter;
pub use particle::Particle;
pub use render::{ParticleDrawData, RenderDataProvider};
pub use sampler::{sample_color, sample_range, sample_vec2, UniformSource};
pub use system::{EmitterSlot, EmitterStats, ParticleSystem};

use bevy::prelude::*;

/// Marker: reset every emitter of this entity's `ParticleSystem` on the next
/// update. Removed once handled.
#[derive(Component, Default)]
pub struct ResetParticles;

/// Advance every particle system by the frame delta.
pub fn tick_particle_systems(time: Res<Time>, mut query: Query<&mut ParticleSystem>) {
    let dt = time.delta_secs();
    for mut system in &mut query {
        system.update(dt);
    }
}

/// Handle `ResetParticles`: clear particles, counters and timers, then drop the marker.
fn handle_particle_reset(
    mut commands: Commands,
    mut query: Query<(Entity, &mut ParticleSystem), With<ResetParticles>>,
) {
    for (entity, mut system) in &mut query {
        system.reset();
        debug!("Reset particle system on {:?} ({} emitters)", entity, system.len());
        commands.entity(entity).remove::<ResetParticles>();
    }
}

/// Main particle plugin. Registers configuration types and the update systems.
pub struct ParticleEnginePlugin;

impl Plugin for ParticleEnginePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ParticleEffectDef>()
            .register_type::<EmitterDef>()
            .register_type::<EmitterConfig>()
            .register_type::<SpriteParams>()
            .register_type::<RangeMode>()
            .register_type::<BlendMode>()
            .add_systems(
                Update,
                (handle_particle_reset, tick_particle_systems).chain(),
            );
    }
}
