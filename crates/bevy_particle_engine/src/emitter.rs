//! Fixed-capacity particle pool driven by an `EmitterConfig`.
//!
//! Each `update` runs four phases in order: capacity sync, start-delay gate,
//! burst spawning (evicting the oldest particle when the pool is full) and
//! integration. Live particles occupy the front `particle_count` slots of the
//! backing storage; removal swaps the last live particle into the hole.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::{EmitterConfig, RangeMode};
use crate::particle::Particle;
use crate::sampler::{sample_color, sample_range, sample_vec2, UniformSource};

/// Runtime state for one emitter.
#[derive(Clone, Debug)]
pub struct ParticleEmitter<R = fastrand::Rng> {
    /// Live-editable configuration, read on every update.
    pub config: EmitterConfig,
    pool: Vec<Particle>,
    particle_count: usize,
    high_water_mark: usize,
    delay_elapsed: f32,
    bursts_emitted: u32,
    burst_timer: f32,
    next_particle_id: u64,
    rng: R,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl ParticleEmitter {
    /// Emitter with an entropy-seeded random stream.
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_source(config, fastrand::Rng::new())
    }

    /// Emitter with a reproducible random stream.
    pub fn with_seed(config: EmitterConfig, seed: u64) -> Self {
        Self::with_source(config, fastrand::Rng::with_seed(seed))
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }
}

impl<R: UniformSource> ParticleEmitter<R> {
    /// Emitter drawing from an arbitrary uniform source.
    pub fn with_source(config: EmitterConfig, rng: R) -> Self {
        Self {
            config,
            pool: Vec::new(),
            particle_count: 0,
            high_water_mark: 0,
            delay_elapsed: 0.0,
            bursts_emitted: 0,
            burst_timer: 0.0,
            next_particle_id: 0,
            rng,
        }
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Largest live count observed since the last reset.
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    pub fn bursts_emitted(&self) -> u32 {
        self.bursts_emitted
    }

    /// Id the next spawned particle will receive.
    pub fn next_particle_id(&self) -> u64 {
        self.next_particle_id
    }

    /// Live particles. Only stable between updates.
    pub fn particles(&self) -> &[Particle] {
        &self.pool[..self.particle_count]
    }

    /// Whether the emitter is still inside its start delay.
    pub fn is_delayed(&self) -> bool {
        self.delay_elapsed < self.config.start_delay
    }

    /// Whether every allowed burst has fired.
    pub fn is_exhausted(&self) -> bool {
        self.config.max_bursts != 0 && self.bursts_emitted >= self.config.max_bursts
    }

    /// Clear all particles, counters and timers. Configuration and the id
    /// counter are left untouched.
    pub fn reset(&mut self) {
        self.particle_count = 0;
        self.high_water_mark = 0;
        self.bursts_emitted = 0;
        self.burst_timer = 0.0;
        self.delay_elapsed = 0.0;
    }

    /// Advance the emitter by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.sync_capacity();

        // The whole emitter is frozen during the start delay, live particles included.
        if self.delay_elapsed < self.config.start_delay {
            self.delay_elapsed += dt;
            return;
        }

        self.high_water_mark = self.high_water_mark.max(self.particle_count);

        if !self.is_exhausted() {
            self.burst_timer -= dt;
            if self.burst_timer <= 0.0 {
                self.burst_timer = self.config.burst_interval;
                self.bursts_emitted = self.bursts_emitted.saturating_add(1);
                for _ in 0..self.config.burst_size {
                    self.emit();
                }
            }
        }

        self.integrate(dt);
    }

    /// Match the backing storage to `config.capacity`. Shrinking keeps the
    /// first `capacity` slots.
    fn sync_capacity(&mut self) {
        let capacity = self.config.capacity;
        if self.pool.len() != capacity {
            self.pool.resize(capacity, Particle::default());
            self.pool.shrink_to_fit();
        }
        self.particle_count = self.particle_count.min(capacity);
    }

    fn emit(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        if self.particle_count == self.pool.len() {
            let oldest = self.oldest_index().unwrap_or(self.particle_count - 1);
            self.remove(oldest);
        }

        let particle = self.spawn_particle();
        self.pool[self.particle_count] = particle;
        self.particle_count += 1;
    }

    /// Index of the live particle with the greatest age. Later slots win ties.
    fn oldest_index(&self) -> Option<usize> {
        let mut oldest = None;
        let mut oldest_age = 0.0;
        for (i, p) in self.particles().iter().enumerate() {
            if p.age >= oldest_age {
                oldest = Some(i);
                oldest_age = p.age;
            }
        }
        oldest
    }

    /// Swap the last live particle into `index` and shrink the live range.
    fn remove(&mut self, index: usize) {
        self.particle_count -= 1;
        self.pool.swap(index, self.particle_count);
    }

    fn spawn_particle(&mut self) -> Particle {
        let config = &self.config;
        let rng = &mut self.rng;

        let max_lifetime = sample_range(rng, config.min_lifetime, config.max_lifetime);
        let tint = sample_color(rng, config.min_color, config.max_color, config.color_mode);
        let mut position = sample_vec2(
            rng,
            config.min_position,
            config.max_position,
            RangeMode::NonUniform,
        );
        let rotation = sample_range(rng, config.min_rotation, config.max_rotation);
        let scale = sample_vec2(rng, config.min_scale, config.max_scale, config.scale_mode);
        let mut velocity = sample_vec2(
            rng,
            config.min_velocity,
            config.max_velocity,
            config.velocity_mode,
        );
        let angular_velocity = sample_range(
            rng,
            config.min_angular_velocity,
            config.max_angular_velocity,
        );
        let linear_force = sample_vec2(
            rng,
            config.min_linear_force,
            config.max_linear_force,
            config.linear_force_mode,
        );
        let angular_force = sample_range(rng, config.min_angular_force, config.max_angular_force);

        let angle = sample_range(rng, 0.0, TAU);
        let radius = sample_range(rng, config.position_min_radius, config.position_max_radius);
        position += Vec2::from_angle(angle) * radius;

        let away = position - config.radial_impulse_origin;
        if away.length_squared() > f32::EPSILON {
            let impulse = sample_range(rng, config.min_radial_impulse, config.max_radial_impulse);
            velocity += away / away.length() * impulse;
        }

        let id = self.next_particle_id;
        self.next_particle_id += 1;

        Particle {
            id,
            age: 0.0,
            max_lifetime,
            tint,
            position,
            rotation,
            scale,
            velocity,
            angular_velocity,
            linear_force,
            angular_force,
        }
    }

    fn integrate(&mut self, dt: f32) {
        let drag = self.config.drag;
        let angular_drag = self.config.angular_drag;
        let force_origin = self.config.radial_force_origin;
        let radial_force = self.config.radial_force;

        let mut i = 0;
        while i < self.particle_count {
            let p = &mut self.pool[i];
            p.age += dt;
            p.position += p.velocity * dt;
            p.rotation += p.angular_velocity * dt;
            p.velocity += p.linear_force * dt;
            p.angular_velocity += p.angular_force * dt;

            // Explicit Euler damping: not clamped, overshoots when drag * dt > 1.
            p.velocity -= p.velocity * drag * dt;
            p.angular_velocity -= p.angular_velocity * angular_drag * dt;

            let away = p.position - force_origin;
            if away.length_squared() > f32::EPSILON {
                p.velocity += away / away.length() * radial_force * dt;
            }

            if p.age >= p.max_lifetime {
                // Slot `i` now holds the former last particle; visit it next.
                self.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
