//! Procedural noise for textures and terrain.
//!
//! [`PerlinNoise`] assigns seeded pseudo-random values to the points of an integer lattice and
//! interpolates between them. [`PerlinNoise::turbulence`] layers several octaves of that into a
//! fractal pattern, and [`PerlinNoise::marble`] bends a sine wave with it.
//!
//! ```
//! use dream_linalg::vec3;
//! use dream_noise::PerlinNoise;
//!
//! let noise = PerlinNoise::new(0);
//! let shade = noise.marble(4.0, vec3(12.0, 3.5, 0.0));
//! assert!((0.0..=1.0).contains(&shade));
//! ```

mod perlin;

pub use perlin::PerlinNoise;
