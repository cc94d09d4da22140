//! Camera, projection and noise helpers for a small 3D renderer.
//!
//! This crate ties together the [`dream_linalg`] matrix types and the [`dream_noise`] sampler,
//! and adds a [`PointCamera`](camera::PointCamera) that produces view matrices.
//!
//! # 3D Coordinates
//!
//! World and camera space are right-handed: X points to the right, Y points up, and the camera
//! looks down the negative Z axis. [`perspective_matrix`] and [`orthographic_matrix`] map camera
//! space to OpenGL-style clip space.
//!
//! # Environment Variables
//!
//! [`Config::from_env`](config::Config::from_env) reads the following variables. Unset variables
//! use the listed defaults, invalid ones are reported as errors.
//!
//! * `DREAM_NOISE_SEED`: seed of the noise field (an unsigned integer, default `0`).
//! * `DREAM_FOV_DEGREES`: vertical field of view in degrees (default `60`).
//! * `DREAM_ASPECT`: width divided by height of the viewport (default `16/9`, given as a decimal
//!   number).
//! * `DREAM_NEAR`: distance of the near clipping plane (default `0.1`).
//! * `DREAM_FAR`: distance of the far clipping plane (default `100`).
//!
//! Logging goes through the [`log`] crate; set `RUST_LOG` to adjust what [`init_logger!`] prints.

use log::LevelFilter;

pub mod camera;
pub mod config;

pub use dream_linalg::*;
pub use dream_noise::PerlinNoise;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .filter(Some("dream_linalg"), log_level)
        .filter(Some("dream_noise"), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and the `dream` crates log at *debug* level, everything else is off.
/// `RUST_LOG` overrides these defaults.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
