//! Ordered collection of emitters updated together.

use bevy::prelude::*;

use crate::data::{EmitterConfig, EmitterDef, ParticleEffectDef, SpriteParams};
use crate::emitter::ParticleEmitter;
use crate::particle::Particle;
use crate::render::RenderDataProvider;

/// An emitter paired with the static parameters its renderer reads.
#[derive(Clone, Debug, Default)]
pub struct EmitterSlot {
    pub emitter: ParticleEmitter,
    pub sprite: SpriteParams,
}

impl EmitterSlot {
    pub fn new(config: EmitterConfig, sprite: SpriteParams) -> Self {
        Self {
            emitter: ParticleEmitter::new(config),
            sprite,
        }
    }

    pub fn name(&self) -> &str {
        &self.emitter.config.name
    }

    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            name: self.emitter.config.name.clone(),
            particle_count: self.emitter.particle_count(),
            high_water_mark: self.emitter.high_water_mark(),
            capacity: self.emitter.config.capacity,
            bursts_emitted: self.emitter.bursts_emitted(),
        }
    }
}

impl RenderDataProvider for EmitterSlot {
    fn particle_count(&self) -> usize {
        self.emitter.particle_count()
    }

    fn particles(&self) -> &[Particle] {
        self.emitter.particles()
    }

    fn sprite_params(&self) -> &SpriteParams {
        &self.sprite
    }
}

/// Snapshot of one emitter's counters, for display and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterStats {
    pub name: String,
    pub particle_count: usize,
    pub high_water_mark: usize,
    pub capacity: usize,
    pub bursts_emitted: u32,
}

impl std::fmt::Display for EmitterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} max particles ({} current)",
            self.name, self.high_water_mark, self.particle_count
        )
    }
}

/// Particle system component. Slot order is render order (back to front).
#[derive(Component, Clone, Debug, Default)]
pub struct ParticleSystem {
    slots: Vec<EmitterSlot>,
}

impl ParticleSystem {
    /// Build fresh emitters from a definition.
    pub fn from_def(def: &ParticleEffectDef) -> Self {
        Self {
            slots: def
                .emitters
                .iter()
                .map(|e| EmitterSlot::new(e.config.clone(), e.sprite.clone()))
                .collect(),
        }
    }

    /// Current configuration of every emitter, in order.
    pub fn to_def(&self) -> ParticleEffectDef {
        ParticleEffectDef {
            emitters: self
                .slots
                .iter()
                .map(|s| EmitterDef {
                    config: s.emitter.config.clone(),
                    sprite: s.sprite.clone(),
                })
                .collect(),
        }
    }

    /// Advance every emitter in order.
    pub fn update(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.emitter.update(dt);
        }
    }

    /// Reset every emitter.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.emitter.reset();
        }
    }

    /// Append an emitter; returns its index.
    pub fn add(&mut self, config: EmitterConfig, sprite: SpriteParams) -> usize {
        self.add_slot(EmitterSlot::new(config, sprite))
    }

    pub fn add_slot(&mut self, slot: EmitterSlot) -> usize {
        debug!("Added emitter '{}' at slot {}", slot.name(), self.slots.len());
        self.slots.push(slot);
        self.slots.len() - 1
    }

    /// Remove and return the emitter at `index`. The caller releases any
    /// renderer resources tied to it.
    pub fn remove(&mut self, index: usize) -> Option<EmitterSlot> {
        if index >= self.slots.len() {
            return None;
        }
        let slot = self.slots.remove(index);
        debug!("Removed emitter '{}' from slot {}", slot.name(), index);
        Some(slot)
    }

    /// Insert a copy of the emitter at `index` right after it. The copy shares
    /// configuration only: fresh random stream, no particles, zeroed counters.
    pub fn duplicate(&mut self, index: usize) -> Option<usize> {
        let source = self.slots.get(index)?;
        let copy = EmitterSlot::new(source.emitter.config.clone(), source.sprite.clone());
        self.slots.insert(index + 1, copy);
        Some(index + 1)
    }

    /// Swap with the previous slot (draw earlier). Returns the new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.slots.len() {
            return None;
        }
        self.slots.swap(index, index - 1);
        Some(index - 1)
    }

    /// Swap with the next slot (draw later). Returns the new index.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.slots.len() {
            return None;
        }
        self.slots.swap(index, index + 1);
        Some(index + 1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EmitterSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EmitterSlot> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmitterSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EmitterSlot> {
        self.slots.iter_mut()
    }

    /// Live particles across all emitters.
    pub fn total_particles(&self) -> usize {
        self.slots.iter().map(|s| s.emitter.particle_count()).sum()
    }

    pub fn stats(&self) -> Vec<EmitterStats> {
        self.slots.iter().map(EmitterSlot::stats).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, burst_size: u32) -> EmitterConfig {
        EmitterConfig {
            name: name.to_string(),
            burst_size,
            min_lifetime: 10.0,
            max_lifetime: 10.0,
            ..default()
        }
    }

    fn names(system: &ParticleSystem) -> Vec<&str> {
        system.iter().map(EmitterSlot::name).collect()
    }

    #[test]
    fn update_and_reset_fan_out() {
        let mut system = ParticleSystem::default();
        system.add(named("a", 2), SpriteParams::default());
        system.add(named("b", 5), SpriteParams::default());

        system.update(0.01);
        assert_eq!(system.get(0).map(|s| s.particle_count()), Some(2));
        assert_eq!(system.get(1).map(|s| s.particle_count()), Some(5));
        assert_eq!(system.total_particles(), 7);

        system.reset();
        assert_eq!(system.total_particles(), 0);
        assert!(system.stats().iter().all(|s| s.high_water_mark == 0));
    }

    #[test]
    fn identical_emitters_are_independent() {
        let mut system = ParticleSystem::default();
        system.add(named("same", 1), SpriteParams::default());
        system.add(named("same", 1), SpriteParams::default());
        system.update(0.01);

        if let Some(slot) = system.get_mut(0) {
            slot.emitter.config.burst_size = 4;
            slot.emitter.reset();
        }
        system.update(0.01);
        assert_eq!(system.get(0).map(|s| s.particle_count()), Some(4));
        assert_eq!(system.get(1).map(|s| s.particle_count()), Some(1));
    }

    #[test]
    fn slot_editing_keeps_order() {
        let mut system = ParticleSystem::default();
        for name in ["back", "middle", "front"] {
            system.add(named(name, 1), SpriteParams::default());
        }

        assert_eq!(system.move_down(0), Some(1));
        assert_eq!(names(&system), ["middle", "back", "front"]);
        assert_eq!(system.move_up(2), Some(1));
        assert_eq!(names(&system), ["middle", "front", "back"]);
        assert_eq!(system.move_up(0), None);
        assert_eq!(system.move_down(2), None);

        assert_eq!(system.duplicate(1), Some(2));
        assert_eq!(names(&system), ["middle", "front", "front", "back"]);

        let removed = system.remove(0);
        assert_eq!(removed.as_ref().map(EmitterSlot::name), Some("middle"));
        assert!(system.remove(10).is_none());
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn duplicate_starts_empty() {
        let mut system = ParticleSystem::default();
        system.add(named("src", 3), SpriteParams::default());
        system.update(0.01);
        system.duplicate(0);

        assert_eq!(system.get(0).map(|s| s.particle_count()), Some(3));
        assert_eq!(system.get(1).map(|s| s.particle_count()), Some(0));
        assert_eq!(system.get(1).map(|s| s.emitter.next_particle_id()), Some(0));
    }

    #[test]
    fn def_round_trip_preserves_configuration() {
        let mut def = ParticleEffectDef::single(named("one", 3), SpriteParams::default());
        def.emitters.push(EmitterDef {
            config: named("two", 1),
            sprite: SpriteParams {
                rows: 4,
                columns: 4,
                ..default()
            },
        });

        let mut system = ParticleSystem::from_def(&def);
        system.update(0.01);
        assert_eq!(system.to_def(), def);
    }

    #[test]
    fn stats_line_matches_tool_format() {
        let mut system = ParticleSystem::default();
        system.add(named("Sparks", 3), SpriteParams::default());
        system.update(0.01);
        system.update(0.01);
        assert_eq!(
            system.stats()[0].to_string(),
            "Sparks - 3 max particles (3 current)"
        );
    }
}
