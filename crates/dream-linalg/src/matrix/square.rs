//! Transform factories and composers for square matrices.
//!
//! Factories build a fresh matrix (`scaling_matrix`, `rotating_matrix`, ...). Composers apply a
//! new transform to an existing one (`scaled_matrix`, `rotated_matrix`, ...), always as a
//! post-multiplication: `m.translated_matrix(v)` is `m * Matrix::translating_matrix(v)`, so the
//! translation is applied to a point *before* `m` is.
//!
//! Every factory that needs more than a 2D block asserts the minimum dimension at compile time.

use crate::{
    offset::column_major_offset,
    traits::{two, Float, Number, Zero},
    Error, Matrix, Result, Vec3, Vector,
};

/// Unit directions closer than this many machine epsilons (in radians) count as parallel.
const PARALLEL_EPSILONS: u32 = 16;

impl<T, const N: usize> Matrix<T, N, N> {
    /// Transposes the matrix in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let mut m = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// m.transpose().transpose().transpose();
    /// assert_eq!(m, Matrix::from_rows([
    ///     [1, 3],
    ///     [2, 4],
    /// ]));
    /// ```
    pub fn transpose(&mut self) -> &mut Self {
        let storage = self.value_mut();
        for row in 0..N {
            for col in row + 1..N {
                storage.swap(
                    column_major_offset(row, col, N),
                    column_major_offset(col, row, N),
                );
            }
        }
        self
    }

    /// A diagonal matrix with `diagonal` on its diagonal.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Matrix::from_diagonal([2, 3]);
    /// assert_eq!(m * vec2(1, 1), vec2(2, 3));
    /// ```
    pub fn from_diagonal(diagonal: impl Into<Vector<T, N>>) -> Self
    where
        T: Zero + Copy,
    {
        let diagonal = diagonal.into();
        let mut m = Self::ZERO;
        for i in 0..N {
            m[(i, i)] = diagonal[i];
        }
        m
    }

    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self[(i, i)])
    }

    /// Sum of the diagonal elements.
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        self.into_diagonal().dot(Vector::splat(T::ONE))
    }
}

impl<T: Number, const N: usize> Matrix<T, N, N> {
    /// Creates a scaling matrix.
    ///
    /// The first `K` diagonal elements are taken from `scale`, the remaining ones are 1. A
    /// [`Vec3`] therefore scales the spatial axes of a 4x4 transform and leaves `w` alone.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat44::scaling_matrix(vec3(2.0, 3.0, 4.0));
    /// assert_eq!(m * vec4(1.0, 1.0, 1.0, 1.0), vec4(2.0, 3.0, 4.0, 1.0));
    /// ```
    ///
    /// A scale vector longer than the diagonal is rejected at compile time:
    ///
    /// ```compile_fail
    /// # use dream_linalg::*;
    /// let m = Mat33::scaling_matrix(vec4(1.0, 2.0, 3.0, 4.0));
    /// ```
    pub fn scaling_matrix<const K: usize>(scale: Vector<T, K>) -> Self {
        const { assert!(K <= N, "scale vector is longer than the matrix diagonal") };
        Self::from_fn(|row, col| {
            if row != col {
                T::ZERO
            } else if row < K {
                scale[row]
            } else {
                T::ONE
            }
        })
    }

    /// Creates a translation matrix for homogeneous coordinates.
    ///
    /// The result is the identity with `translation` written into the first `K` rows of the last
    /// column.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat44::translating_matrix(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(m * vec3(1.0, 1.0, 1.0), vec3(2.0, 3.0, 4.0));
    /// assert_eq!(m.column(3), vec4(1.0, 2.0, 3.0, 1.0));
    /// ```
    ///
    /// The translation has to leave room for the homogeneous coordinate:
    ///
    /// ```compile_fail
    /// # use dream_linalg::*;
    /// let m = Mat33::translating_matrix(vec3(1.0, 2.0, 3.0));
    /// ```
    pub fn translating_matrix<const K: usize>(translation: Vector<T, K>) -> Self {
        const { assert!(K < N, "translation needs a spare homogeneous coordinate") };
        Self::from_fn(|row, col| {
            if row == col {
                T::ONE
            } else if col == N - 1 && row < K {
                translation[row]
            } else {
                T::ZERO
            }
        })
    }

    /// Returns `self * scaling_matrix(scale)`: points are scaled first, then transformed by
    /// `self`. See [`Matrix::scaling_matrix`].
    pub fn scaled_matrix<const K: usize>(&self, scale: Vector<T, K>) -> Self {
        *self * Self::scaling_matrix(scale)
    }

    /// Returns `self * translating_matrix(translation)`: points are translated first, then
    /// transformed by `self`. See [`Matrix::translating_matrix`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat44::scaling_matrix(vec3(2.0, 2.0, 2.0)).translated_matrix(vec3(1.0, 0.0, 0.0));
    /// // translated first, then scaled
    /// assert_eq!(m * Vec3f::ZERO, vec3(2.0, 0.0, 0.0));
    /// ```
    pub fn translated_matrix<const K: usize>(&self, translation: Vector<T, K>) -> Self {
        *self * Self::translating_matrix(translation)
    }
}

impl<T: Float, const N: usize> Matrix<T, N, N> {
    /// Creates a matrix rotating by `radians` around the axis `normal`.
    ///
    /// Looking from the tip of `normal` towards the origin, the rotation is counterclockwise.
    /// `normal` has to be a unit vector, otherwise the result is not a rotation. Only the upper
    /// left 3x3 block is filled, the rest is identity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// let m = Mat33::rotating_matrix(FRAC_PI_2, Vec3f::Z);
    /// assert_approx_eq!(m * Vec3f::X, Vec3f::Y).abs(1e-6);
    /// ```
    ///
    /// 2x2 matrices have no room for an arbitrary axis, use
    /// [`Matrix::rotating_matrix_around_z`]:
    ///
    /// ```compile_fail
    /// # use dream_linalg::*;
    /// let m = Mat22::rotating_matrix(1.0, Vec3f::Z);
    /// ```
    pub fn rotating_matrix(radians: T, normal: Vec3<T>) -> Self {
        const { assert!(N >= 3, "axis-angle rotation needs at least 3 dimensions") };
        let (sin, cos) = (radians.sin(), radians.cos());
        let t = T::ONE - cos;
        let [x, y, z] = normal.into_array();

        #[rustfmt::skip]
        let rotation = Matrix::from_rows([
            [cos + x * x * t,     x * y * t - z * sin, x * z * t + y * sin],
            [y * x * t + z * sin, cos + y * y * t,     y * z * t - x * sin],
            [z * x * t - y * sin, z * y * t + x * sin, cos + z * z * t    ],
        ]);
        Self::embedding(rotation)
    }

    /// Creates a matrix rotating by `radians` around the axis `normal` through `point`.
    ///
    /// This is `T(point) · R · T(-point)`: the pivot is moved to the origin, rotated, and moved
    /// back, so `point` itself stays in place.
    pub fn rotating_matrix_about_point(radians: T, normal: Vec3<T>, point: Vec3<T>) -> Self {
        const { assert!(N >= 4, "rotation about a point needs homogeneous coordinates") };
        Self::translating_matrix(point)
            * Self::rotating_matrix(radians, normal)
            * Self::translating_matrix(-point)
    }

    /// Creates the rotation that turns the direction `from` into the direction `to`.
    ///
    /// `from` and `to` don't need to be normalized. If they point the same way, the identity is
    /// returned. If they point in opposite directions, the rotation axis is not determined by
    /// them alone; the result is then a half-turn around the part of `normal` that is
    /// perpendicular to `from`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateRotation`] if `from` or `to` has zero length, or if they are
    /// anti-parallel and `normal` is zero or parallel to them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat33::rotating_matrix_between(Vec3f::X, -Vec3f::X, Vec3f::Z)?;
    /// assert_eq!(m * Vec3f::X, -Vec3f::X);
    /// assert_eq!(m * Vec3f::Z, Vec3f::Z);
    /// # Ok::<(), dream_linalg::Error>(())
    /// ```
    pub fn rotating_matrix_between(from: Vec3<T>, to: Vec3<T>, normal: Vec3<T>) -> Result<Self> {
        const { assert!(N >= 3, "axis-angle rotation needs at least 3 dimensions") };
        if from.length2() == T::ZERO || to.length2() == T::ZERO {
            log::debug!("no rotation from {from:?} to {to:?}: zero-length direction");
            return Err(Error::degenerate("zero-length direction"));
        }

        let (from, to) = (from.normalize(), to.normalize());
        let axis = from.cross(to);
        let sin = axis.length();
        let cos = from.dot(to);
        let parallel = T::epsilons(PARALLEL_EPSILONS);
        if sin > parallel {
            return Ok(Self::rotating_matrix(sin.atan2(cos), axis / sin));
        }
        if cos > T::ZERO {
            return Ok(Self::IDENTITY);
        }

        if normal.length2() == T::ZERO {
            log::debug!("no rotation from {from:?} to {to:?}: zero-length normal");
            return Err(Error::degenerate("opposite directions with zero-length normal"));
        }
        let normal = normal.normalize();
        let axis = normal - from * normal.dot(from);
        let len = axis.length();
        if len <= parallel {
            log::debug!("no rotation from {from:?} to {to:?}: normal {normal:?} is parallel");
            return Err(Error::degenerate("opposite directions with parallel normal"));
        }

        // half-turn: 2·a·aᵀ - I
        let a = axis / len;
        let half_turn = Matrix::<T, 3, 3>::from_fn(|row, col| {
            let diagonal = if row == col { T::ONE } else { T::ZERO };
            two::<T>() * a[row] * a[col] - diagonal
        });
        Ok(Self::embedding(half_turn))
    }

    /// Creates a matrix rotating counterclockwise by `radians` around the X axis.
    pub fn rotating_matrix_around_x(radians: T) -> Self {
        const { assert!(N >= 3, "rotation around X needs at least 3 dimensions") };
        let (sin, cos) = (radians.sin(), radians.cos());

        #[rustfmt::skip]
        let rotation = Matrix::from_rows([
            [T::ONE,  T::ZERO, T::ZERO],
            [T::ZERO, cos,     -sin   ],
            [T::ZERO, sin,     cos    ],
        ]);
        Self::embedding(rotation)
    }

    /// Creates a matrix rotating counterclockwise by `radians` around the Y axis.
    pub fn rotating_matrix_around_y(radians: T) -> Self {
        const { assert!(N >= 3, "rotation around Y needs at least 3 dimensions") };
        let (sin, cos) = (radians.sin(), radians.cos());

        #[rustfmt::skip]
        let rotation = Matrix::from_rows([
            [cos,     T::ZERO, sin    ],
            [T::ZERO, T::ONE,  T::ZERO],
            [-sin,    T::ZERO, cos    ],
        ]);
        Self::embedding(rotation)
    }

    /// Creates a matrix rotating counterclockwise by `radians` around the Z axis.
    ///
    /// For 2x2 matrices this is the plain rotation in the XY plane.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// use std::f32::consts::PI;
    ///
    /// let m = Mat22::rotating_matrix_around_z(PI);
    /// assert_approx_eq!(m * vec2(1.0, 2.0), vec2(-1.0, -2.0)).abs(1e-6);
    /// ```
    pub fn rotating_matrix_around_z(radians: T) -> Self {
        const { assert!(N >= 2, "rotation around Z needs at least 2 dimensions") };
        let (sin, cos) = (radians.sin(), radians.cos());

        #[rustfmt::skip]
        let rotation = Matrix::from_rows([
            [cos, -sin],
            [sin, cos ],
        ]);
        Self::embedding(rotation)
    }

    /// Returns `self * rotating_matrix(radians, normal)`: points are rotated first, then
    /// transformed by `self`. See [`Matrix::rotating_matrix`].
    pub fn rotated_matrix(&self, radians: T, normal: Vec3<T>) -> Self {
        *self * Self::rotating_matrix(radians, normal)
    }

    /// Returns `self * rotating_matrix_about_point(radians, normal, point)`: points are rotated
    /// about the pivot first, then transformed by `self`. See
    /// [`Matrix::rotating_matrix_about_point`].
    pub fn rotated_matrix_about_point(&self, radians: T, normal: Vec3<T>, point: Vec3<T>) -> Self {
        *self * Self::rotating_matrix_about_point(radians, normal, point)
    }

    /// Places `block` in the upper left corner of an identity matrix.
    fn embedding<const K: usize>(block: Matrix<T, K, K>) -> Self {
        Self::from_fn(|row, col| {
            if row < K && col < K {
                block.at(row, col)
            } else if row == col {
                T::ONE
            } else {
                T::ZERO
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    use crate::{assert_approx_eq, vec2, vec3, vec4, Mat22, Mat33, Mat44, Vec3f, Vec4f};

    use super::*;

    fn random_unit(rng: &mut fastrand::Rng) -> Vec3f {
        loop {
            let v = Vec3f::from_fn(|_| rng.f32() * 2.0 - 1.0);
            if v.length2() > 0.01 {
                return v.normalize();
            }
        }
    }

    #[test]
    fn transpose_in_place() {
        let mut m = Mat44::ZERO;
        m.load_test_pattern();
        let expected = m.transposed_matrix();
        assert_eq!(*m.transpose(), expected);
        m.transpose();
        assert_eq!(m.transposed_matrix(), expected);
    }

    #[test]
    fn scaling() {
        let m = Mat44::scaling_matrix(vec3(2.0, 3.0, 4.0));
        assert_eq!(m * vec4(1.0, 1.0, 1.0, 1.0), vec4(2.0, 3.0, 4.0, 1.0));
        assert_eq!(m.into_diagonal(), vec4(2.0, 3.0, 4.0, 1.0));
        assert_eq!(Mat33::scaling_matrix(vec3(1.0, 1.0, 1.0)), Mat33::IDENTITY);
        assert_eq!(Mat22::scaling_matrix(vec2(5.0, 6.0)).trace(), 11.0);
    }

    #[test]
    fn translation() {
        let m = Mat44::translating_matrix(vec3(1.0, 2.0, 3.0));
        assert_eq!(m.at_offset(12), 1.0);
        assert_eq!(m.at_offset(13), 2.0);
        assert_eq!(m.at_offset(14), 3.0);
        assert_eq!(m * Vec4f::W, vec4(1.0, 2.0, 3.0, 1.0));
        // directions (w = 0) are unaffected
        assert_eq!(m * Vec4f::X, Vec4f::X);

        let m = Mat33::translating_matrix(vec2(4.0, 5.0));
        assert_eq!(m * vec2(1.0, 1.0), vec2(5.0, 6.0));
    }

    #[test]
    fn rotation_direction() {
        let m = Mat33::rotating_matrix(FRAC_PI_2, Vec3f::Z);
        assert_approx_eq!(m * Vec3f::X, Vec3f::Y).abs(1e-6);
        assert_approx_eq!(m * Vec3f::Y, -Vec3f::X).abs(1e-6);
        assert_approx_eq!(m * Vec3f::Z, Vec3f::Z).abs(1e-6);

        let x = Mat33::rotating_matrix_around_x(FRAC_PI_2);
        let y = Mat33::rotating_matrix_around_y(FRAC_PI_2);
        let z = Mat33::rotating_matrix_around_z(FRAC_PI_2);
        assert_approx_eq!(x * Vec3f::Y, Vec3f::Z).abs(1e-6);
        assert_approx_eq!(y * Vec3f::Z, Vec3f::X).abs(1e-6);
        assert_approx_eq!(z * Vec3f::X, Vec3f::Y).abs(1e-6);
    }

    #[test]
    fn axis_rotations_match_axis_angle() {
        for angle in [0.3, 1.0, -2.5, PI] {
            assert_approx_eq!(
                Mat44::rotating_matrix_around_x(angle),
                Mat44::rotating_matrix(angle, Vec3f::X)
            )
            .abs(1e-6);
            assert_approx_eq!(
                Mat44::rotating_matrix_around_y(angle),
                Mat44::rotating_matrix(angle, Vec3f::Y)
            )
            .abs(1e-6);
            assert_approx_eq!(
                Mat44::rotating_matrix_around_z(angle),
                Mat44::rotating_matrix(angle, Vec3f::Z)
            )
            .abs(1e-6);
        }
    }

    #[test]
    fn half_rotations_compose() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..20 {
            let axis = random_unit(&mut rng);
            let angle = rng.f32() * 2.0 * PI;
            let twice = Mat44::IDENTITY
                .rotated_matrix(angle / 2.0, axis)
                .rotated_matrix(angle / 2.0, axis);
            let once = Mat44::IDENTITY.rotated_matrix(angle, axis);
            assert_approx_eq!(twice, once).abs(1e-5);
        }
    }

    #[test]
    fn rotation_preserves_length() {
        let mut rng = fastrand::Rng::with_seed(0xbad_5eed);
        for _ in 0..50 {
            let axis = random_unit(&mut rng);
            let m = Mat33::rotating_matrix(rng.f32() * 10.0 - 5.0, axis);
            let v = Vec3f::from_fn(|_| rng.f32() * 20.0 - 10.0);
            assert_approx_eq!((m * v).length(), v.length()).abs(1e-4);
            assert_approx_eq!(m.determinant(), 1.0).abs(1e-5);
            // the axis is left in place
            assert_approx_eq!(m * axis, axis).abs(1e-5);
        }
    }

    #[test]
    fn rotation_about_point() {
        let pivot = vec3(3.0, -2.0, 5.0);
        let m = Mat44::rotating_matrix_about_point(FRAC_PI_3, Vec3f::Y, pivot);
        assert_approx_eq!(m * pivot, pivot).abs(1e-5);

        // a point one unit from the pivot stays one unit away
        let p = pivot + Vec3f::X;
        assert_approx_eq!((m * p - pivot).length(), 1.0).abs(1e-5);

        let composed = Mat44::IDENTITY.rotated_matrix_about_point(FRAC_PI_3, Vec3f::Y, pivot);
        assert_eq!(composed, m);
    }

    #[test]
    fn composers_post_multiply() {
        let base = Mat44::rotating_matrix(1.0, Vec3f::X);
        let scale = vec3(1.0, 2.0, 3.0);
        let offset = vec3(-1.0, 0.5, 2.0);
        assert_eq!(base.scaled_matrix(scale), base * Mat44::scaling_matrix(scale));
        assert_eq!(
            base.translated_matrix(offset),
            base * Mat44::translating_matrix(offset)
        );
        assert_eq!(
            base.rotated_matrix(0.5, Vec3f::Z),
            base * Mat44::rotating_matrix(0.5, Vec3f::Z)
        );
    }

    #[test]
    fn between_directions() {
        let m = Mat33::rotating_matrix_between(Vec3f::X, Vec3f::Y, Vec3f::Z).unwrap();
        assert_approx_eq!(m * Vec3f::X, Vec3f::Y).abs(1e-6);

        let same = Mat44::rotating_matrix_between(Vec3f::X, vec3(2.0, 0.0, 0.0), Vec3f::Z).unwrap();
        assert_eq!(same, Mat44::IDENTITY);

        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..20 {
            let from = random_unit(&mut rng);
            let to = random_unit(&mut rng);
            let m = Mat33::rotating_matrix_between(from * 3.0, to, Vec3f::Z).unwrap();
            assert_approx_eq!(m * from, to).abs(1e-5);
        }
    }

    #[test]
    fn between_opposite_directions() {
        let m = Mat33::rotating_matrix_between(Vec3f::X, -Vec3f::X, Vec3f::Z).unwrap();
        assert_eq!(m * Vec3f::X, -Vec3f::X);
        assert_eq!(m * Vec3f::Z, Vec3f::Z);

        // only the part of the normal perpendicular to the directions matters
        let tilted = Mat33::rotating_matrix_between(Vec3f::X, -Vec3f::X, vec3(1.0, 0.0, 1.0));
        assert_approx_eq!(tilted.unwrap(), m).abs(1e-6);

        let m = Mat44::rotating_matrix_between(Vec3f::Y, -Vec3f::Y, Vec3f::X).unwrap();
        assert_eq!(m * Vec3f::Y, -Vec3f::Y);
        assert_eq!(m * Vec3f::X, Vec3f::X);
    }

    #[test]
    fn between_nearly_parallel() {
        let barely = vec3(1.0, 1e-9, 0.0);
        assert_eq!(
            Mat33::rotating_matrix_between(Vec3f::X, barely, Vec3f::Z),
            Ok(Mat33::IDENTITY)
        );

        // well above the parallel threshold, but far below any absolute epsilon
        let to = vec3(1.0, 1e-4, 0.0).normalize();
        let m = Mat33::rotating_matrix_between(Vec3f::X, to, Vec3f::Z).unwrap();
        assert_ne!(m, Mat33::IDENTITY);
        assert_approx_eq!(m * Vec3f::X, to).abs(1e-7);

        // opposite directions with a normal that is almost along them
        let r = Mat33::rotating_matrix_between(Vec3f::X, -Vec3f::X, barely);
        assert!(matches!(r, Err(Error::DegenerateRotation { .. })));
    }

    #[test]
    fn integer_factories() {
        let t = Matrix::<i32, 3, 3>::translating_matrix(vec2(4, 5));
        assert_eq!(t * vec3(1, 1, 1), vec3(5, 6, 1));
        assert_eq!(t * vec2(1, 1), vec2(5, 6));

        let s = Matrix::<i64, 4, 4>::scaling_matrix(vec3(2, 3, 4));
        assert_eq!(s.into_diagonal(), vec4(2, 3, 4, 1));
        assert_eq!(
            s.translated_matrix(vec3(1, 1, 1)),
            s * Matrix::<i64, 4, 4>::translating_matrix(vec3(1, 1, 1))
        );
        assert_eq!(s.scaled_matrix(vec2(5, 5)).trace(), 10 + 15 + 4 + 1);
    }

    #[test]
    fn between_degenerate() {
        let is_degenerate = |r: Result<Mat33>| matches!(r, Err(Error::DegenerateRotation { .. }));
        assert!(is_degenerate(Mat33::rotating_matrix_between(
            Vec3f::ZERO,
            Vec3f::X,
            Vec3f::Z
        )));
        assert!(is_degenerate(Mat33::rotating_matrix_between(
            Vec3f::X,
            Vec3f::ZERO,
            Vec3f::Z
        )));
        assert!(is_degenerate(Mat33::rotating_matrix_between(
            Vec3f::X,
            -Vec3f::X,
            Vec3f::ZERO
        )));
        assert!(is_degenerate(Mat33::rotating_matrix_between(
            Vec3f::X,
            -Vec3f::X,
            vec3(-2.0, 0.0, 0.0)
        )));
        // the normal is only consulted for opposite directions
        assert!(Mat33::rotating_matrix_between(Vec3f::X, Vec3f::Y, Vec3f::ZERO).is_ok());
    }

    #[test]
    fn diagonal() {
        let m = Matrix::from_diagonal([1, 2, 3]);
        assert_eq!(m, Matrix::from_rows([[1, 0, 0], [0, 2, 0], [0, 0, 3]]));
        assert_eq!(m.into_diagonal(), vec3(1, 2, 3));
        assert_eq!(m.trace(), 6);
        assert_eq!(Mat44::IDENTITY.trace(), 4.0);
    }
}
