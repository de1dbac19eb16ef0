//! # Bevy Particle Tool
//!
//! Host application layer for `bevy_particle_engine`: a preset library with
//! RON persistence and periodic emitter stats reporting.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_particle_tool::ParticleToolPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(MinimalPlugins)
//!         .add_plugins(ParticleToolPlugin)
//!         .run();
//! }
//! ```

pub mod library;
pub mod stats;

pub use library::{LibraryError, ParticleLibrary, ParticleLibraryDir};
pub use stats::StatsReportInterval;

use bevy::prelude::*;
use bevy_particle_engine::ParticleEnginePlugin;

pub struct ParticleToolPlugin;

impl Plugin for ParticleToolPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ParticleEnginePlugin)
            .init_resource::<ParticleLibrary>()
            .init_resource::<ParticleLibraryDir>()
            .init_resource::<StatsReportInterval>()
            .add_systems(PreStartup, library::init_particle_library)
            .add_systems(
                Update,
                (
                    library::save_edited_presets,
                    stats::report_emitter_stats.after(bevy_particle_engine::tick_particle_systems),
                ),
            );
    }
}
