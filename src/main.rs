//! Headless runner: simulate one preset at a fixed step and log emitter stats.
//!
//! Usage: `bevy_particle_tool [preset] [frames]` (defaults: `Fountain`, 120).

use std::process::ExitCode;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_particle_engine::ParticleSystem;
use bevy_particle_tool::stats::collect_stats;
use bevy_particle_tool::{ParticleLibrary, ParticleToolPlugin};
use clap::Parser;

const FRAME_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Simulate a particle preset at a fixed 60 Hz step and log emitter stats.
#[derive(Parser, Debug)]
#[command(name = "bevy_particle_tool")]
#[command(version, about, long_about = None)]
struct Args {
    /// Preset to simulate
    #[arg(default_value = "Fountain")]
    preset: String,

    /// Number of frames to simulate
    #[arg(default_value_t = 120)]
    frames: u32,
}

/// Preset to spawn at startup.
#[derive(Resource)]
struct SelectedPreset(String);

fn spawn_selected_preset(
    mut commands: Commands,
    library: Res<ParticleLibrary>,
    selected: Res<SelectedPreset>,
) {
    match library.effects.get(&selected.0) {
        Some(def) => {
            info!("Simulating '{}' ({} emitters)", selected.0, def.emitters.len());
            commands.spawn((Name::new(selected.0.clone()), ParticleSystem::from_def(def)));
        }
        None => {
            error!(
                "Unknown particle preset '{}'. Available: {}",
                selected.0,
                library.names().join(", ")
            );
        }
    }
}

fn main() -> ExitCode {
    let Args { preset, frames } = Args::parse();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(ParticleToolPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_STEP))
        .insert_resource(SelectedPreset(preset))
        .add_systems(Startup, spawn_selected_preset);
    app.finish();
    app.cleanup();

    for _ in 0..frames {
        app.update();
    }

    let world = app.world_mut();
    let mut query = world.query::<&ParticleSystem>();
    let stats = collect_stats(query.iter(world));
    if stats.is_empty() {
        return ExitCode::FAILURE;
    }

    info!("Finished after {} frames", frames);
    for s in &stats {
        info!("{} | capacity {} | bursts {}", s, s.capacity, s.bursts_emitted);
    }
    ExitCode::SUCCESS
}
