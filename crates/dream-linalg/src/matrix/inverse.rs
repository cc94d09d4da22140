//! Determinants of small square matrices and closed-form inversion of 4x4 matrices.

use crate::{
    traits::{Float, Number},
    Error, Matrix, Result,
};

/// Matrices that can be inverted.
///
/// Only 4x4 matrices implement this trait. Calling [`Inverse::inverse_matrix`] on any other shape
/// fails to compile.
///
/// ```compile_fail
/// use dream_linalg::{Inverse, Mat33};
///
/// let _ = Mat33::IDENTITY.inverse_matrix();
/// ```
pub trait Inverse: Sized {
    /// Computes the inverse of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Singular`] if `self` is not invertible.
    fn inverse_matrix(&self) -> Result<Self>;
}

impl<T: Number> Matrix<T, 2, 2> {
    pub fn determinant(&self) -> T {
        self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0)
    }
}

impl<T: Number> Matrix<T, 3, 3> {
    /// The scalar triple product of the columns.
    pub fn determinant(&self) -> T {
        self.column(0).dot(self.column(1).cross(self.column(2)))
    }
}

impl<T: Float> Matrix<T, 4, 4> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        let minors = Minors::new(self);
        minors.determinant()
    }
}

/// The twelve 2x2 minors of the upper (`s`) and lower (`c`) row pairs that the Laplace expansion
/// of a 4x4 determinant and adjugate is built from.
struct Minors<T> {
    s: [T; 6],
    c: [T; 6],
}

impl<T: Float> Minors<T> {
    fn new(m: &Matrix<T, 4, 4>) -> Self {
        let a = |row, col| m.at(row, col);
        Self {
            s: [
                a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
                a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
                a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
                a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
                a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
                a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
            ],
            c: [
                a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
                a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
                a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
                a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
                a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
                a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
            ],
        }
    }

    fn determinant(&self) -> T {
        let [s0, s1, s2, s3, s4, s5] = self.s;
        let [c0, c1, c2, c3, c4, c5] = self.c;
        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }
}

impl<T: Float> Inverse for Matrix<T, 4, 4> {
    /// Inverts the matrix via its adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Singular`] if the determinant is zero or not finite. Nearly singular
    /// matrices with a tiny non-zero determinant are inverted, with correspondingly large error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat44::translating_matrix(vec3(1.0, 2.0, 3.0));
    /// let inv = m.inverse_matrix()?;
    /// assert_eq!(inv, Mat44::translating_matrix(vec3(-1.0, -2.0, -3.0)));
    /// assert_approx_eq!(m * inv, Mat44::IDENTITY).default_tolerance();
    /// # Ok::<(), dream_linalg::Error>(())
    /// ```
    fn inverse_matrix(&self) -> Result<Self> {
        let minors = Minors::new(self);
        let det = minors.determinant();
        if det == T::ZERO || !det.is_finite() {
            log::debug!("refusing to invert singular matrix {self:?} (determinant {det:?})");
            return Err(Error::singular(det));
        }

        let [s0, s1, s2, s3, s4, s5] = minors.s;
        let [c0, c1, c2, c3, c4, c5] = minors.c;
        let a = |row, col| self.at(row, col);

        #[rustfmt::skip]
        let adjugate = Matrix::from_rows([
            [
                 a(1, 1) * c5 - a(1, 2) * c4 + a(1, 3) * c3,
                -a(0, 1) * c5 + a(0, 2) * c4 - a(0, 3) * c3,
                 a(3, 1) * s5 - a(3, 2) * s4 + a(3, 3) * s3,
                -a(2, 1) * s5 + a(2, 2) * s4 - a(2, 3) * s3,
            ],
            [
                -a(1, 0) * c5 + a(1, 2) * c2 - a(1, 3) * c1,
                 a(0, 0) * c5 - a(0, 2) * c2 + a(0, 3) * c1,
                -a(3, 0) * s5 + a(3, 2) * s2 - a(3, 3) * s1,
                 a(2, 0) * s5 - a(2, 2) * s2 + a(2, 3) * s1,
            ],
            [
                 a(1, 0) * c4 - a(1, 1) * c2 + a(1, 3) * c0,
                -a(0, 0) * c4 + a(0, 1) * c2 - a(0, 3) * c0,
                 a(3, 0) * s4 - a(3, 1) * s2 + a(3, 3) * s0,
                -a(2, 0) * s4 + a(2, 1) * s2 - a(2, 3) * s0,
            ],
            [
                -a(1, 0) * c3 + a(1, 1) * c1 - a(1, 2) * c0,
                 a(0, 0) * c3 - a(0, 1) * c1 + a(0, 2) * c0,
                -a(3, 0) * s3 + a(3, 1) * s1 - a(3, 2) * s0,
                 a(2, 0) * s3 - a(2, 1) * s1 + a(2, 2) * s0,
            ],
        ]);

        Ok(adjugate * (T::ONE / det))
    }
}
