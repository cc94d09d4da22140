//! Value noise on an integer lattice, using Perlin's permutation hashing.

use std::{array, fmt};

use dream_linalg::Vec3f;

const TABLE_SIZE: usize = 256;

/// Frequency and amplitude of each octave summed by [`PerlinNoise::turbulence`].
///
/// The amplitudes add up to 1.
const OCTAVES: [(f32, f32); 6] = [
    (1.0 / 32.0, 1.0 / 2.0),
    (1.0 / 16.0, 1.0 / 4.0),
    (1.0 / 8.0, 1.0 / 8.0),
    (1.0 / 4.0, 1.0 / 16.0),
    (1.0 / 2.0, 3.0 / 64.0),
    (1.0, 1.0 / 64.0),
];

/// A seeded 3D noise field.
///
/// Every integer lattice point is assigned a pseudo-random value in `[0, 1)`, and the field in
/// between is interpolated trilinearly. The lattice values repeat every 256 units along each axis.
///
/// Two instances created with the same seed produce identical fields. The sampler is immutable
/// after construction and can be shared between threads.
#[derive(Clone)]
pub struct PerlinNoise {
    seed: u64,
    permutation: [u8; TABLE_SIZE],
    values: [f32; TABLE_SIZE],
}

impl PerlinNoise {
    /// Creates a noise field from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut permutation: [u8; TABLE_SIZE] = array::from_fn(|i| i as u8);
        rng.shuffle(&mut permutation);
        let values: [f32; TABLE_SIZE] = array::from_fn(|_| rng.f32());
        log::trace!("created noise tables for seed {seed}");

        Self {
            seed,
            permutation,
            values,
        }
    }

    /// Returns the seed this field was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples the field at `point`, returning a value in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::vec3;
    /// # use dream_noise::PerlinNoise;
    /// let noise = PerlinNoise::new(42);
    /// let value = noise.sample(vec3(1.5, -3.25, 8.0));
    /// assert!((0.0..=1.0).contains(&value));
    /// assert_eq!(value, PerlinNoise::new(42).sample(vec3(1.5, -3.25, 8.0)));
    /// ```
    pub fn sample(&self, point: Vec3f) -> f32 {
        let mut cell = point;
        cell.floor();
        let mut local = point;
        local.frac();

        let [i, j, k] = cell
            .into_array()
            .map(|c| c.rem_euclid(TABLE_SIZE as f32) as usize);
        let corner = |di, dj, dk| self.lattice_value(i + di, j + dj, k + dk);
        let [tx, ty, tz] = local.into_array();

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), tx);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), tx);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), tx);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), tx);
        let y0 = lerp(x00, x10, ty);
        let y1 = lerp(x01, x11, ty);
        lerp(y0, y1, tz)
    }

    /// Samples the field at `point * frequency` and scales the result by `amplitude`.
    pub fn sample_scaled(&self, point: Vec3f, frequency: f32, amplitude: f32) -> f32 {
        self.sample(point * frequency) * amplitude
    }

    /// Sums six octaves of noise, from broad features to fine detail.
    ///
    /// Each octave doubles the frequency of the previous one and (roughly) halves its amplitude.
    /// The result stays within `[0, 1]`.
    pub fn turbulence(&self, point: Vec3f) -> f32 {
        OCTAVES
            .iter()
            .map(|&(frequency, amplitude)| self.sample_scaled(point, frequency, amplitude))
            .sum()
    }

    /// A marble-like pattern: bands along the X axis, distorted by [`PerlinNoise::turbulence`].
    ///
    /// `strength` controls how far the bands are pushed around. The result is in `[0, 1]`.
    pub fn marble(&self, strength: f32, point: Vec3f) -> f32 {
        (1.0 + (point.x() + strength * self.turbulence(point)).sin()) / 2.0
    }

    fn hash(&self, x: usize) -> usize {
        usize::from(self.permutation[x % TABLE_SIZE])
    }

    fn lattice_value(&self, i: usize, j: usize, k: usize) -> f32 {
        self.values[self.hash(i + self.hash(j + self.hash(k)))]
    }
}

impl fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinNoise")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use dream_linalg::{assert_approx_eq, vec3, Vec3f};

    use super::*;

    fn random_point(rng: &mut fastrand::Rng, extent: f32) -> Vec3f {
        Vec3f::from_fn(|_| (rng.f32() * 2.0 - 1.0) * extent)
    }

    #[test]
    fn tables_are_permutations() {
        let noise = PerlinNoise::new(1);
        let mut seen = [false; TABLE_SIZE];
        for &p in &noise.permutation {
            assert!(!seen[usize::from(p)], "{p} appears twice");
            seen[usize::from(p)] = true;
        }
        assert!(noise.values.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn deterministic() {
        let a = PerlinNoise::new(1234);
        let b = PerlinNoise::new(1234);
        let c = PerlinNoise::new(4321);
        let mut rng = fastrand::Rng::with_seed(0);
        let mut differs = false;
        for _ in 0..100 {
            let p = random_point(&mut rng, 300.0);
            assert_eq!(a.sample(p), b.sample(p));
            assert_eq!(a.turbulence(p), b.turbulence(p));
            differs |= a.sample(p) != c.sample(p);
        }
        assert!(differs);
        assert_eq!(a.seed(), 1234);
        assert_eq!(format!("{a:?}"), "PerlinNoise { seed: 1234, .. }");
    }

    #[test]
    fn range() {
        let noise = PerlinNoise::new(99);
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..1000 {
            let p = random_point(&mut rng, 1000.0);
            assert!((0.0..=1.0).contains(&noise.sample(p)));
            assert!((0.0..=1.0).contains(&noise.turbulence(p)));
            assert!((0.0..=1.0).contains(&noise.marble(5.0, p)));
        }
    }

    #[test]
    fn lattice_points() {
        let noise = PerlinNoise::new(7);
        assert_eq!(noise.sample(Vec3f::ZERO), noise.lattice_value(0, 0, 0));
        assert_eq!(noise.sample(vec3(3.0, 1.0, 2.0)), noise.lattice_value(3, 1, 2));
        // negative coordinates wrap around the table
        assert_eq!(
            noise.sample(vec3(-1.0, 0.0, 0.0)),
            noise.lattice_value(TABLE_SIZE - 1, 0, 0)
        );
        // the lattice repeats every 256 units
        assert_eq!(
            noise.sample(vec3(0.5, 0.25, 0.75)),
            noise.sample(vec3(256.5, 0.25, 0.75))
        );
    }

    #[test]
    fn continuous_across_cells() {
        let noise = PerlinNoise::new(11);
        for p in [vec3(1.0, 2.0, 3.0), vec3(-4.0, 0.0, 9.0), vec3(17.0, -3.0, -1.0)] {
            let at = noise.sample(p);
            for offset in [Vec3f::X, Vec3f::Y, Vec3f::Z] {
                assert_approx_eq!(noise.sample(p + offset * 1e-3), at).abs(1e-2);
                assert_approx_eq!(noise.sample(p - offset * 1e-3), at).abs(1e-2);
            }
        }
    }

    #[test]
    fn scaled() {
        let noise = PerlinNoise::new(3);
        let p = vec3(0.3, 0.6, 0.9);
        assert_eq!(noise.sample_scaled(p, 2.0, 0.5), noise.sample(p * 2.0) * 0.5);
        assert_eq!(OCTAVES.iter().map(|&(_, a)| a).sum::<f32>(), 1.0);
    }
}
