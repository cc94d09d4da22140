//! Projection builders and free-standing rotation constructors.
//!
//! The projections follow the OpenGL conventions: right-handed eye space looking down the
//! negative Z axis, mapped to clip space with `w` carrying the depth for the perspective divide.

use crate::{
    traits::{two, Float},
    Mat4, Mat44, Result, Vec3, Vec3f,
};

/// Creates a perspective projection matrix.
///
/// `field_of_view` is the vertical opening angle in radians, `aspect_ratio` is width divided by
/// height, and `near`/`far` are the (positive) distances of the clipping planes from the eye.
///
/// Points on the near plane end up at depth -1, points on the far plane at +1 (after
/// [`Matrix::transform_point`][crate::Matrix::transform_point] performs the perspective divide).
///
/// # Examples
///
/// ```
/// # use dream_linalg::*;
/// use std::f32::consts::FRAC_PI_2;
///
/// let p = perspective_matrix(FRAC_PI_2, 1.0, 1.0, 10.0);
/// assert_approx_eq!(p.at(0, 0), p.at_offset(5));
/// assert_approx_eq!(p * vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0)).abs(1e-6);
/// ```
pub fn perspective_matrix<T: Float>(field_of_view: T, aspect_ratio: T, near: T, far: T) -> Mat4<T> {
    let f = T::ONE / (field_of_view / two::<T>()).tan();
    let n = T::ONE / (near - far);

    let mut result = Mat4::<T>::ZERO;
    *result.at_offset_mut(0) = f / aspect_ratio;
    *result.at_offset_mut(5) = f;
    *result.at_offset_mut(10) = (far + near) * n;
    *result.at_offset_mut(11) = -T::ONE;
    *result.at_offset_mut(14) = two::<T>() * far * near * n;
    result
}

/// Creates an orthographic projection matrix.
///
/// The axes are scaled by `2 / size` (Z mirrored to match the perspective convention) and the
/// scene is shifted by `-translation`.
///
/// # Examples
///
/// ```
/// # use dream_linalg::*;
/// let o = orthographic_matrix(vec3(1.0, 2.0, 3.0), vec3(2.0, 2.0, 2.0));
/// assert_eq!(o.into_diagonal(), vec4(1.0, 1.0, -1.0, 1.0));
/// assert_eq!(o.column(3), vec4(-1.0, -2.0, -3.0, 1.0));
/// ```
pub fn orthographic_matrix<T: Float>(translation: Vec3<T>, size: Vec3<T>) -> Mat4<T> {
    let mut result = Mat4::<T>::ZERO;
    *result.at_offset_mut(0) = two::<T>() / size.x();
    *result.at_offset_mut(5) = two::<T>() / size.y();
    *result.at_offset_mut(10) = -two::<T>() / size.z();
    result.set(0, 3, -translation);
    *result.at_offset_mut(15) = T::ONE;
    result
}

/// Creates a 4x4 rotation by `radians` around the unit axis `normal`.
///
/// Shorthand for [`Matrix::rotating_matrix`][crate::Matrix::rotating_matrix].
pub fn rotation(radians: f32, normal: Vec3f) -> Mat44 {
    Mat44::rotating_matrix(radians, normal)
}

/// Creates a 4x4 rotation by `radians` around the unit axis `normal` passing through `point`.
///
/// Shorthand for [`Matrix::rotating_matrix_about_point`].
///
/// [`Matrix::rotating_matrix_about_point`]: crate::Matrix::rotating_matrix_about_point
pub fn rotation_about_point(radians: f32, normal: Vec3f, point: Vec3f) -> Mat44 {
    Mat44::rotating_matrix_about_point(radians, normal, point)
}

/// Creates the 4x4 rotation turning direction `from` into direction `to`.
///
/// Shorthand for [`Matrix::rotating_matrix_between`], with the same error conditions.
///
/// [`Matrix::rotating_matrix_between`]: crate::Matrix::rotating_matrix_between
///
/// # Examples
///
/// ```
/// # use dream_linalg::*;
/// let m = rotation_between(Vec3f::Z, Vec3f::Y, Vec3f::X)?;
/// assert_approx_eq!(m * Vec3f::Z, Vec3f::Y).abs(1e-6);
/// assert!(rotation_between(Vec3f::ZERO, Vec3f::Y, Vec3f::X).is_err());
/// # Ok::<(), dream_linalg::Error>(())
/// ```
pub fn rotation_between(from: Vec3f, to: Vec3f, normal: Vec3f) -> Result<Mat44> {
    Mat44::rotating_matrix_between(from, to, normal)
}
