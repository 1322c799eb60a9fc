//! Noise primitives: seeded simplex source, ridge transform and the fractal
//! combinator that turns them into vertex displacements.
use noise::{NoiseFn, Simplex};

/// A continuous scalar field over 3D coordinates.
///
/// Implementations must be deterministic for identical inputs and free of
/// side effects, so a field can be sampled once per vertex in any order.
/// Base sources return values in [-1, 1]; shaping wrappers may narrow that.
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<N: NoiseField + ?Sized> NoiseField for &N {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample(x, y, z)
    }
}

/// Seeded simplex noise, the base source for all terrain layers.
///
/// The gradient table is fixed at construction; every sample afterwards is a
/// pure read, so a source can be shared freely across threads.
pub struct SimplexSource {
    simplex: Simplex,
}

impl SimplexSource {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }

    /// 2D variant of the field, sampled on the same gradient table.
    /// The displacement path is purely 3D; this feeds the diagnostic maps.
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x, y])
    }
}

impl NoiseField for SimplexSource {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z])
    }
}

/// Ridge transform: folds a signed base field into sharp unsigned ridges.
///
/// `(1 - |base|)²` peaks at 1 where the base crosses zero and falls to 0
/// where the base saturates at ±1, which is what turns smooth rolling noise
/// into mountain-ridge crests.
pub struct Ridge<N> {
    base: N,
}

impl<N: NoiseField> Ridge<N> {
    pub fn new(base: N) -> Self {
        Self { base }
    }
}

impl<N: NoiseField> NoiseField for Ridge<N> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let v = 1.0 - self.base.sample(x, y, z).abs();
        v * v
    }
}

/// Per-call parameters for [`fractal_noise3`].
///
/// Every field has an explicit default; partial overrides use struct-update
/// syntax (`NoiseOptions { octaves: 3, ..Default::default() }`).
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct NoiseOptions {
    /// Scales the first octave's contribution.
    pub amplitude: f64,
    /// Base spatial scale applied to the input coordinates.
    pub frequency: f64,
    /// Number of summed frequency bands. 0 is treated as 1.
    pub octaves: u32,
    /// Per-octave amplitude decay factor.
    pub persistence: f64,
}

impl Default for NoiseOptions {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            octaves: 1,
            persistence: 0.5,
        }
    }
}

/// Fractal combinator: sums `octaves` bands of `field`, doubling frequency
/// and decaying amplitude by `persistence` each band.
///
/// The divisor `2 - 2^-(octaves-1)` is the maximum possible sum for
/// persistence 0.5 and a unit-magnitude field, so output sits near [-1, 1]
/// around the default persistence. For other persistence values the output
/// range drifts from unit scale; that is a documented property of the
/// normalization, not corrected here.
///
/// Cost is exactly `max(octaves, 1)` samples of `field`, no caching.
pub fn fractal_noise3(
    x: f64,
    y: f64,
    z: f64,
    field: &impl NoiseField,
    options: &NoiseOptions,
) -> f64 {
    // Zero octaves would zero the divisor; treat it as a single band.
    let octaves = options.octaves.max(1);
    let mut value = 0.0;
    for octave in 0..octaves {
        let freq = options.frequency * 2f64.powi(octave as i32);
        let amp = options.amplitude * options.persistence.powi(octave as i32);
        value += field.sample(x * freq, y * freq, z * freq) * amp;
    }
    value / (2.0 - 1.0 / 2f64.powi(octaves as i32 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    /// Field returning a fixed constant.
    struct Constant(f64);

    impl NoiseField for Constant {
        fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.0
        }
    }

    /// `x + y + z`, the worked-example stub.
    struct CoordSum;

    impl NoiseField for CoordSum {
        fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
            x + y + z
        }
    }

    /// Counts how many times it is sampled.
    struct Counting {
        calls: Cell<u32>,
    }

    impl NoiseField for Counting {
        fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.calls.set(self.calls.get() + 1);
            0.5
        }
    }

    #[test]
    fn simplex_is_deterministic_for_a_fixed_seed() {
        let a = SimplexSource::new(42);
        let b = SimplexSource::new(42);
        for &(x, y, z) in &[(0.1, 0.2, 0.3), (-7.5, 3.25, 0.0), (100.0, -41.7, 12.125)] {
            assert_eq!(a.sample(x, y, z).to_bits(), a.sample(x, y, z).to_bits());
            assert_eq!(a.sample(x, y, z).to_bits(), b.sample(x, y, z).to_bits());
        }
    }

    #[test]
    fn different_seeds_give_different_fields() {
        let a = SimplexSource::new(1);
        let b = SimplexSource::new(2);
        let differs = (0..32).any(|i| {
            let t = i as f64 * 0.37 + 0.11;
            a.sample(t, -t, t * 2.0) != b.sample(t, -t, t * 2.0)
        });
        assert!(differs);
    }

    #[test]
    fn ridge_stays_within_unit_interval() {
        let ridge = Ridge::new(SimplexSource::new(7));
        for i in 0..256 {
            let t = i as f64 * 0.173 - 22.0;
            let v = ridge.sample(t, t * 0.5, -t);
            assert!((0.0..=1.0).contains(&v), "ridge out of range: {v}");
        }
    }

    #[test]
    fn ridge_fixed_points() {
        // Base 0 → ridge 1; base ±1 → ridge 0.
        assert_relative_eq!(Ridge::new(Constant(0.0)).sample(0.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(Ridge::new(Constant(1.0)).sample(0.0, 0.0, 0.0), 0.0);
        assert_relative_eq!(Ridge::new(Constant(-1.0)).sample(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn single_octave_is_the_identity() {
        let field = SimplexSource::new(3);
        let options = NoiseOptions {
            persistence: 0.9, // irrelevant with one octave
            ..Default::default()
        };
        for &(x, y, z) in &[(0.4, 1.7, -2.2), (5.0, 5.0, 5.0)] {
            assert_relative_eq!(
                fractal_noise3(x, y, z, &field, &options),
                field.sample(x, y, z)
            );
        }
    }

    #[test]
    fn default_options_match_explicit_defaults() {
        let field = SimplexSource::new(11);
        let explicit = NoiseOptions {
            amplitude: 1.0,
            frequency: 1.0,
            octaves: 1,
            persistence: 0.5,
        };
        let v = fractal_noise3(0.3, -0.6, 0.9, &field, &NoiseOptions::default());
        assert_eq!(
            v.to_bits(),
            fractal_noise3(0.3, -0.6, 0.9, &field, &explicit).to_bits()
        );
    }

    #[test]
    fn field_is_sampled_exactly_once_per_octave() {
        for octaves in [1u32, 2, 5, 8] {
            let field = Counting {
                calls: Cell::new(0),
            };
            let options = NoiseOptions {
                octaves,
                ..Default::default()
            };
            fractal_noise3(1.0, 2.0, 3.0, &field, &options);
            assert_eq!(field.calls.get(), octaves);
        }
    }

    #[test]
    fn zero_octaves_is_clamped_to_one() {
        // Unguarded, octaves = 0 would zero the divisor. We clamp instead.
        let field = Constant(0.25);
        let zero = NoiseOptions {
            octaves: 0,
            ..Default::default()
        };
        let one = NoiseOptions {
            octaves: 1,
            ..Default::default()
        };
        let v = fractal_noise3(0.0, 0.0, 0.0, &field, &zero);
        assert!(v.is_finite());
        assert_eq!(
            v.to_bits(),
            fractal_noise3(0.0, 0.0, 0.0, &field, &one).to_bits()
        );
    }

    #[test]
    fn two_octave_worked_example() {
        // Octave 0 samples (1,1,1) → 3, octave 1 samples (2,2,2) → 6.
        // Sum = 3·1 + 6·0.5 = 6; divisor = 2 - 0.5 = 1.5; result = 4.
        let options = NoiseOptions {
            octaves: 2,
            ..Default::default()
        };
        assert_relative_eq!(fractal_noise3(1.0, 1.0, 1.0, &CoordSum, &options), 4.0);
    }

    #[test]
    fn normalization_is_persistence_specific() {
        // With persistence 1.0 and a unit field, two octaves sum to 2.0 but
        // the divisor stays 1.5, so output exceeds 1. Documented drift.
        let options = NoiseOptions {
            octaves: 2,
            persistence: 1.0,
            ..Default::default()
        };
        let v = fractal_noise3(0.0, 0.0, 0.0, &Constant(1.0), &options);
        assert_relative_eq!(v, 2.0 / 1.5);
    }

    #[test]
    fn frequency_scales_the_sample_coordinates() {
        let options = NoiseOptions {
            frequency: 0.5,
            ..Default::default()
        };
        // CoordSum makes coordinate scaling directly observable.
        assert_relative_eq!(fractal_noise3(2.0, 4.0, 6.0, &CoordSum, &options), 6.0);
    }
}
