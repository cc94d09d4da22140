//! Fixed-dimension vectors and matrices for 3D transforms.
//!
//! # Overview
//!
//! [`Vector`] and [`Matrix`] carry their dimensions as const generic parameters, so shape errors
//! (multiplying a 3x4 matrix with a 3-vector, inverting a 3x3 matrix, rotating a 2x2 matrix
//! around an arbitrary axis) are rejected by the compiler instead of at runtime.
//!
//! Operations only exist for the shapes where they are well defined:
//!
//! - every matrix can be multiplied, transposed, compared, and exported as raw storage,
//! - square matrices get transform factories like [`Matrix::rotating_matrix`],
//! - only 4x4 matrices implement [`Inverse`],
//! - `N`x`N` matrices can transform `N-1`-dimensional points in homogeneous coordinates via
//!   [`Matrix::transform_point`] (for `N` = 2, 3, 4).
//!
//! [`perspective_matrix`] and [`orthographic_matrix`] build projection matrices following the
//! OpenGL conventions.
//!
//! # Layout
//!
//! Matrices are stored column-major, without padding. Elements are nevertheless always addressed
//! as `(row, column)`; the storage order only becomes visible through [`Matrix::value`], the
//! linear [`Matrix::at_offset`] accessors, and [`bytemuck`] casts. See [`offset`] for the
//! index math.
//!
//! # Floating-point comparison
//!
//! Computed transforms rarely match their exact value bit-for-bit. [`ApproxEq`] compares vectors
//! and matrices element-wise with a tolerance measured in units in the last place, and the
//! [`assert_approx_eq!`] macro makes that usable in tests.
//!
//! ```
//! use dream_linalg::*;
//! use std::f32::consts::FRAC_PI_2;
//!
//! let model = Mat44::translating_matrix(vec3(0.0, 0.0, -5.0))
//!     .rotated_matrix(FRAC_PI_2, Vec3f::Y);
//! let inverse = model.inverse_matrix()?;
//!
//! let p = vec3(1.0, 2.0, 3.0);
//! assert_approx_eq!(inverse * (model * p), p).abs(1e-5);
//! assert_approx_eq!(model * inverse, Mat44::IDENTITY).abs(1e-5);
//! assert!(p.equal_within_default_tolerance(&(p * (1.0 + f32::EPSILON))));
//! # Ok::<(), Error>(())
//! ```

pub mod approx;
mod error;
mod matrix;
pub mod offset;
mod projection;
mod traits;
mod vector;

pub use approx::{ApproxEq, DEFAULT_ULPS};
pub use error::{Error, Result};
pub use matrix::*;
pub use projection::*;
pub use traits::*;
pub use vector::*;

/// The scalar type of the [`Mat22`], [`Mat33`] and [`Mat44`] aliases.
pub type Real = f32;
