//! Periodic per-emitter stats logging.

use bevy::prelude::*;
use bevy_particle_engine::{EmitterStats, ParticleSystem};

/// Log emitter stats every N frames. 0 disables reporting.
#[derive(Resource, Clone, Copy, Debug)]
pub struct StatsReportInterval(pub u32);

impl Default for StatsReportInterval {
    fn default() -> Self {
        Self(30)
    }
}

/// Stats for every emitter of every particle system, in query order.
pub fn collect_stats<'a>(systems: impl IntoIterator<Item = &'a ParticleSystem>) -> Vec<EmitterStats> {
    systems.into_iter().flat_map(ParticleSystem::stats).collect()
}

pub(crate) fn report_emitter_stats(
    interval: Res<StatsReportInterval>,
    query: Query<(Entity, &ParticleSystem)>,
    mut frame: Local<u32>,
) {
    *frame += 1;
    if interval.0 == 0 || *frame % interval.0 != 0 {
        return;
    }

    for (entity, system) in &query {
        for stats in system.stats() {
            info!("[{:?}] {}", entity, stats);
        }
    }
}
