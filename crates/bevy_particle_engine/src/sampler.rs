//! Random range sampling for spawn-time particle attributes.
//!
//! Every sample is a linear interpolation between `min` and `max` driven by
//! values drawn from a [`UniformSource`]. Vectors and colors are sampled
//! either per component ([`RangeMode::NonUniform`]) or with one shared
//! interpolant ([`RangeMode::Uniform`]), which keeps the result on the line
//! from `min` to `max`.

use bevy::prelude::*;

use crate::data::RangeMode;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

impl UniformSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

#[inline]
pub(crate) fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

pub(crate) fn lerp_color(min: LinearRgba, max: LinearRgba, t: f32) -> LinearRgba {
    LinearRgba::new(
        lerp(min.red, max.red, t),
        lerp(min.green, max.green, t),
        lerp(min.blue, max.blue, t),
        lerp(min.alpha, max.alpha, t),
    )
}

/// Sample a scalar in `[min, max)` (or `(max, min]` when inverted).
pub fn sample_range(source: &mut impl UniformSource, min: f32, max: f32) -> f32 {
    lerp(min, max, source.next_unit())
}

/// Sample a 2D vector. Consumes two draws in non-uniform mode, one in uniform mode.
pub fn sample_vec2(source: &mut impl UniformSource, min: Vec2, max: Vec2, mode: RangeMode) -> Vec2 {
    match mode {
        RangeMode::Uniform => min.lerp(max, source.next_unit()),
        RangeMode::NonUniform => Vec2::new(
            sample_range(source, min.x, max.x),
            sample_range(source, min.y, max.y),
        ),
    }
}

/// Sample an RGBA color. Consumes four draws in non-uniform mode, one in uniform mode.
pub fn sample_color(
    source: &mut impl UniformSource,
    min: LinearRgba,
    max: LinearRgba,
    mode: RangeMode,
) -> LinearRgba {
    match mode {
        RangeMode::Uniform => lerp_color(min, max, source.next_unit()),
        RangeMode::NonUniform => LinearRgba::new(
            sample_range(source, min.red, max.red),
            sample_range(source, min.green, max.green),
            sample_range(source, min.blue, max.blue),
            sample_range(source, min.alpha, max.alpha),
        ),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of values, cycling when exhausted.
    pub(crate) struct ScriptedSource {
        values: Vec<f32>,
        cursor: usize,
        pub draws: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new(values: &[f32]) -> Self {
            Self {
                values: values.to_vec(),
                cursor: 0,
                draws: 0,
            }
        }

        pub(crate) fn constant(value: f32) -> Self {
            Self::new(&[value])
        }
    }

    impl UniformSource for ScriptedSource {
        fn next_unit(&mut self) -> f32 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            self.draws += 1;
            v
        }
    }

    fn in_closed_range(v: f32, a: f32, b: f32) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        v >= lo - 1e-4 && v <= hi + 1e-4
    }

    #[test]
    fn scalar_samples_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for &(min, max) in &[(0.0, 1.0), (-5.0, 5.0), (3.0, 3.0), (10.0, -2.5), (1e3, 1e3 + 0.5)] {
            for _ in 0..10_000 {
                let v = sample_range(&mut rng, min, max);
                assert!(in_closed_range(v, min, max), "{v} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn vector_and_color_components_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(99);
        let (vmin, vmax) = (Vec2::new(-1.0, 4.0), Vec2::new(2.0, -4.0));
        let (cmin, cmax) = (
            LinearRgba::new(0.0, 0.2, 1.0, 0.5),
            LinearRgba::new(1.0, 0.4, 0.0, 0.5),
        );
        for mode in RangeMode::ALL {
            for _ in 0..10_000 {
                let v = sample_vec2(&mut rng, vmin, vmax, mode);
                assert!(in_closed_range(v.x, vmin.x, vmax.x));
                assert!(in_closed_range(v.y, vmin.y, vmax.y));

                let c = sample_color(&mut rng, cmin, cmax, mode);
                assert!(in_closed_range(c.red, cmin.red, cmax.red));
                assert!(in_closed_range(c.green, cmin.green, cmax.green));
                assert!(in_closed_range(c.blue, cmin.blue, cmax.blue));
                assert!(in_closed_range(c.alpha, cmin.alpha, cmax.alpha));
            }
        }
    }

    #[test]
    fn uniform_vector_uses_one_interpolant() {
        let mut source = ScriptedSource::new(&[0.25, 0.9]);
        let v = sample_vec2(
            &mut source,
            Vec2::new(0.0, 10.0),
            Vec2::new(4.0, 30.0),
            RangeMode::Uniform,
        );
        assert_eq!(source.draws, 1);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y - 15.0).abs() < 1e-6);
    }

    #[test]
    fn non_uniform_vector_draws_per_axis() {
        let mut source = ScriptedSource::new(&[0.25, 0.5]);
        let v = sample_vec2(
            &mut source,
            Vec2::new(0.0, 10.0),
            Vec2::new(4.0, 30.0),
            RangeMode::NonUniform,
        );
        assert_eq!(source.draws, 2);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_color_uses_one_interpolant() {
        let mut source = ScriptedSource::new(&[0.5, 0.0, 1.0]);
        let c = sample_color(
            &mut source,
            LinearRgba::new(0.0, 0.0, 1.0, 0.0),
            LinearRgba::new(1.0, 0.5, 0.0, 1.0),
            RangeMode::Uniform,
        );
        assert_eq!(source.draws, 1);
        assert!((c.red - 0.5).abs() < 1e-6);
        assert!((c.green - 0.25).abs() < 1e-6);
        assert!((c.blue - 0.5).abs() < 1e-6);
        assert!((c.alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn non_uniform_color_draws_per_channel() {
        let mut source = ScriptedSource::new(&[0.0, 0.25, 0.5, 1.0]);
        let c = sample_color(
            &mut source,
            LinearRgba::new(0.0, 0.0, 0.0, 0.0),
            LinearRgba::new(1.0, 1.0, 1.0, 1.0),
            RangeMode::NonUniform,
        );
        assert_eq!(source.draws, 4);
        assert_eq!(c, LinearRgba::new(0.0, 0.25, 0.5, 1.0));
    }

    #[test]
    fn inverted_range_interpolates_backwards() {
        let mut source = ScriptedSource::constant(0.25);
        assert!((sample_range(&mut source, 8.0, 4.0) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = fastrand::Rng::with_seed(1234);
        let mut b = fastrand::Rng::with_seed(1234);
        for _ in 0..100 {
            assert_eq!(sample_range(&mut a, -1.0, 1.0), sample_range(&mut b, -1.0, 1.0));
        }
    }
}
