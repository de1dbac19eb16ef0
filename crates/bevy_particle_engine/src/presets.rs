//! Built-in particle effect presets.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::data::*;

/// Return the built-in particle presets as `(name, effect)` pairs.
pub fn default_presets() -> Vec<(&'static str, ParticleEffectDef)> {
    vec![
        ("Default", ParticleEffectDef::single(editor_default_emitter(), SpriteParams::default())),
        ("Fountain", fountain()),
        ("Explosion", explosion()),
        ("Smoke", smoke()),
        ("Sparks", sparks()),
    ]
}

/// Emitter created by the editor's "New Emitter" action: a 128x128 box
/// spawning one particle every 0.1s.
pub fn editor_default_emitter() -> EmitterConfig {
    EmitterConfig {
        min_position: Vec2::new(-64.0, -64.0),
        max_position: Vec2::new(64.0, 64.0),
        burst_interval: 0.1,
        ..default()
    }
}

/// Upward spray pulled back down by a constant force.
fn fountain() -> ParticleEffectDef {
    ParticleEffectDef::single(
        EmitterConfig {
            name: "Water".to_string(),
            capacity: 512,
            burst_size: 4,
            burst_interval: 0.02,
            min_lifetime: 1.2,
            max_lifetime: 1.8,
            min_position: Vec2::new(-4.0, 0.0),
            max_position: Vec2::new(4.0, 0.0),
            min_velocity: Vec2::new(-40.0, -320.0),
            max_velocity: Vec2::new(40.0, -260.0),
            min_linear_force: Vec2::new(0.0, 400.0),
            max_linear_force: Vec2::new(0.0, 400.0),
            min_scale: Vec2::splat(0.4),
            max_scale: Vec2::splat(0.8),
            scale_mode: RangeMode::Uniform,
            min_color: LinearRgba::new(0.3, 0.5, 1.0, 0.8),
            max_color: LinearRgba::new(0.7, 0.9, 1.0, 1.0),
            color_mode: RangeMode::Uniform,
            ..default()
        },
        SpriteParams {
            texture: Some("textures/particles/droplet.png".into()),
            end_tint: LinearRgba::new(1.0, 1.0, 1.0, 0.0),
            start_scale: 1.0,
            end_scale: 0.5,
            ..default()
        },
    )
}

/// One-shot blast: a flash, a shockwave ring of debris, then lingering embers.
fn explosion() -> ParticleEffectDef {
    ParticleEffectDef {
        emitters: vec![
            // Flash: a handful of large, short-lived sprites at the center
            EmitterDef {
                config: EmitterConfig {
                    name: "Flash".to_string(),
                    capacity: 8,
                    burst_size: 4,
                    max_bursts: 1,
                    min_lifetime: 0.1,
                    max_lifetime: 0.2,
                    min_rotation: 0.0,
                    max_rotation: 2.0 * PI,
                    min_scale: Vec2::splat(3.0),
                    max_scale: Vec2::splat(4.0),
                    scale_mode: RangeMode::Uniform,
                    min_color: LinearRgba::new(1.0, 0.9, 0.6, 1.0),
                    max_color: LinearRgba::new(1.0, 1.0, 0.9, 1.0),
                    ..default()
                },
                sprite: SpriteParams {
                    texture: Some("textures/particles/flare.png".into()),
                    end_tint: LinearRgba::new(1.0, 0.5, 0.1, 0.0),
                    start_scale: 0.5,
                    end_scale: 1.5,
                    blend_mode: BlendMode::Additive,
                    ..default()
                },
            },
            // Debris: spawned on a ring and flung outward, heavy drag
            EmitterDef {
                config: EmitterConfig {
                    name: "Debris".to_string(),
                    capacity: 128,
                    burst_size: 96,
                    max_bursts: 1,
                    min_lifetime: 0.6,
                    max_lifetime: 1.4,
                    position_min_radius: 4.0,
                    position_max_radius: 12.0,
                    min_radial_impulse: 200.0,
                    max_radial_impulse: 450.0,
                    min_angular_velocity: -10.0,
                    max_angular_velocity: 10.0,
                    min_linear_force: Vec2::new(0.0, 150.0),
                    max_linear_force: Vec2::new(0.0, 250.0),
                    drag: 2.5,
                    angular_drag: 1.0,
                    min_color: LinearRgba::new(0.9, 0.3, 0.0, 1.0),
                    max_color: LinearRgba::new(1.0, 0.8, 0.2, 1.0),
                    ..default()
                },
                sprite: SpriteParams {
                    texture: Some("textures/particles/debris_sheet.png".into()),
                    rows: 2,
                    columns: 2,
                    end_tint: LinearRgba::new(0.2, 0.2, 0.2, 0.0),
                    ..default()
                },
            },
            // Embers: slow trickle that starts once the blast has settled
            EmitterDef {
                config: EmitterConfig {
                    name: "Embers".to_string(),
                    start_delay: 0.3,
                    capacity: 64,
                    burst_size: 2,
                    max_bursts: 20,
                    burst_interval: 0.05,
                    min_lifetime: 1.0,
                    max_lifetime: 2.5,
                    position_min_radius: 0.0,
                    position_max_radius: 30.0,
                    min_velocity: Vec2::new(-10.0, -40.0),
                    max_velocity: Vec2::new(10.0, -10.0),
                    min_scale: Vec2::splat(0.2),
                    max_scale: Vec2::splat(0.4),
                    scale_mode: RangeMode::Uniform,
                    drag: 0.5,
                    min_color: LinearRgba::new(1.0, 0.4, 0.0, 1.0),
                    max_color: LinearRgba::new(1.0, 0.7, 0.1, 1.0),
                    color_mode: RangeMode::Uniform,
                    ..default()
                },
                sprite: SpriteParams {
                    end_tint: LinearRgba::new(1.0, 0.2, 0.0, 0.0),
                    blend_mode: BlendMode::Additive,
                    ..default()
                },
            },
        ],
    }
}

/// Soft puffs drifting up and spreading out.
fn smoke() -> ParticleEffectDef {
    ParticleEffectDef::single(
        EmitterConfig {
            name: "Smoke".to_string(),
            capacity: 256,
            burst_size: 1,
            burst_interval: 0.05,
            min_lifetime: 2.0,
            max_lifetime: 4.0,
            min_position: Vec2::new(-8.0, -2.0),
            max_position: Vec2::new(8.0, 2.0),
            min_rotation: 0.0,
            max_rotation: 2.0 * PI,
            min_velocity: Vec2::new(-8.0, -60.0),
            max_velocity: Vec2::new(8.0, -35.0),
            min_angular_velocity: -0.6,
            max_angular_velocity: 0.6,
            min_scale: Vec2::splat(0.6),
            max_scale: Vec2::splat(1.2),
            scale_mode: RangeMode::Uniform,
            min_color: LinearRgba::new(0.35, 0.35, 0.35, 0.6),
            max_color: LinearRgba::new(0.55, 0.55, 0.55, 0.8),
            color_mode: RangeMode::Uniform,
            drag: 0.4,
            angular_drag: 0.2,
            radial_force_origin: Vec2::new(0.0, 40.0),
            radial_force: 12.0,
            ..default()
        },
        SpriteParams {
            texture: Some("textures/particles/smoke_sheet.png".into()),
            rows: 4,
            columns: 4,
            start_scale: 0.5,
            end_scale: 2.5,
            end_tint: LinearRgba::new(1.0, 1.0, 1.0, 0.0),
            ..default()
        },
    )
}

/// Fast streaks pulled toward a point, like sparks into a vortex.
fn sparks() -> ParticleEffectDef {
    ParticleEffectDef::single(
        EmitterConfig {
            name: "Sparks".to_string(),
            capacity: 256,
            burst_size: 8,
            burst_interval: 0.1,
            min_lifetime: 0.3,
            max_lifetime: 0.8,
            min_velocity: Vec2::new(-250.0, -250.0),
            max_velocity: Vec2::new(250.0, 250.0),
            velocity_mode: RangeMode::NonUniform,
            min_scale: Vec2::new(0.6, 0.1),
            max_scale: Vec2::new(1.0, 0.2),
            min_color: LinearRgba::new(1.0, 0.6, 0.1, 1.0),
            max_color: LinearRgba::new(1.0, 1.0, 0.6, 1.0),
            drag: 1.5,
            radial_force_origin: Vec2::ZERO,
            radial_force: -300.0,
            ..default()
        },
        SpriteParams {
            texture: Some("textures/particles/spark.png".into()),
            end_tint: LinearRgba::new(1.0, 0.3, 0.0, 0.0),
            end_scale: 0.2,
            blend_mode: BlendMode::Additive,
            cycles: 1,
            ..default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ParticleSystem;

    #[test]
    fn presets_have_unique_names() {
        let presets = default_presets();
        let mut names: Vec<_> = presets.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), presets.len());
    }

    #[test]
    fn every_preset_simulates_within_capacity() {
        for (name, def) in default_presets() {
            assert!(!def.emitters.is_empty(), "{name} has no emitters");
            let mut system = ParticleSystem::from_def(&def);
            for _ in 0..240 {
                system.update(1.0 / 60.0);
                for slot in system.iter() {
                    assert!(slot.emitter.particle_count() <= slot.emitter.config.capacity);
                }
            }
            assert!(system.stats().iter().any(|s| s.high_water_mark > 0), "{name} never spawned");
        }
    }

    #[test]
    fn explosion_fires_once() {
        let (_, def) = default_presets()
            .into_iter()
            .find(|(n, _)| *n == "Explosion")
            .expect("explosion preset");
        let mut system = ParticleSystem::from_def(&def);
        for _ in 0..600 {
            system.update(1.0 / 60.0);
        }
        let stats = system.stats();
        assert_eq!(stats[0].bursts_emitted, 1);
        assert_eq!(stats[1].bursts_emitted, 1);
        assert_eq!(stats[2].bursts_emitted, 20);
        assert_eq!(system.total_particles(), 0);
    }
}
