use bevy::prelude::*;

/// A single CPU-simulated particle.
///
/// Plain data stored contiguously in its emitter's pool. Slots are relocated
/// by swap-removal on every update, so never keep an index across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    /// Monotonic per-emitter id; survives `reset`.
    pub id: u64,
    /// Seconds since spawn.
    pub age: f32,
    /// Alive while `age < max_lifetime`.
    pub max_lifetime: f32,
    pub tint: LinearRgba,
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    pub scale: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    /// Constant acceleration applied every tick.
    pub linear_force: Vec2,
    pub angular_force: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.age < self.max_lifetime
    }

    /// `age / max_lifetime`, or 1.0 for a particle spawned with no lifetime.
    pub fn normalized_age(&self) -> f32 {
        if self.max_lifetime > 0.0 {
            self.age / self.max_lifetime
        } else {
            1.0
        }
    }
}
