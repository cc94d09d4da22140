use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::{
    approx::{ApproxEq, Comparison},
    traits::Number,
    Matrix, Vector,
};

/// Element at `(row, column)`.
impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.value()[Self::offset_of(row, col)]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        self.at_mut(row, col)
    }
}

/// Element at a linear storage offset (column-major).
impl<T, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        Self::check_offset(index);
        &self.value()[index]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.at_offset_mut(index)
    }
}

// More general `PartialEq` impl than what the derive generates.
impl<T, U, const R: usize, const C: usize> PartialEq<Matrix<U, R, C>> for Matrix<T, R, C>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U, R, C>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T, const R: usize, const C: usize> Eq for Matrix<T, R, C> where T: Eq {}

impl<T, const R: usize, const C: usize> ApproxEq for Matrix<T, R, C>
where
    T: ApproxEq,
{
    type Tolerance = T::Tolerance;

    fn approx_eq(&self, other: &Self, comparison: Comparison<T::Tolerance>) -> bool {
        self.value().approx_eq(other.value(), comparison)
    }
}

/// Matrix * Column Vector.
impl<T, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Vector<T, R>;

    fn mul(self, rhs: Vector<T, C>) -> Self::Output {
        Vector::from_fn(|row| (0..C).fold(T::ZERO, |acc, col| acc + self.at(row, col) * rhs[col]))
    }
}

/// Matrix * Matrix.
impl<T, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>> for Matrix<T, M, N>
where
    T: Number,
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Self::Output {
        Matrix::from_fn(|i, j| (0..N).fold(T::ZERO, |acc, k| acc + self.at(i, k) * rhs.at(k, j)))
    }
}

/// Matrix * Scalar.
impl<T, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

impl<T, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C>
where
    T: Number,
{
    fn mul_assign(&mut self, rhs: T) {
        self.value_mut().iter_mut().for_each(|elem| *elem = *elem * rhs);
    }
}

/// Post-multiplication, `a *= b` is `a = a * b`.
impl<T, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N>
where
    T: Number,
{
    fn mul_assign(&mut self, rhs: Matrix<T, N, N>) {
        *self = *self * rhs;
    }
}

macro_rules! homogeneous_impls {
    ($($n:literal => $m:literal),+) => {
        $(
            impl<T: Number> Matrix<T, $n, $n> {
                /// Transforms a point given in non-homogeneous coordinates.
                ///
                /// Appends a 1, multiplies, divides by the resulting last coordinate and drops
                /// it again. Affine transforms leave the divisor at 1, projections turn this
                /// into the perspective divide. Points that end up with a divisor of 0 come out
                /// non-finite.
                pub fn transform_point(&self, point: Vector<T, $m>) -> Vector<T, $m> {
                    let out = *self * point.append(T::ONE);
                    let w = out[$m];
                    out.reduce() / w
                }
            }

            /// Homogeneous point transform, see [`Matrix::transform_point`].
            impl<T: Number> Mul<Vector<T, $m>> for Matrix<T, $n, $n> {
                type Output = Vector<T, $m>;

                fn mul(self, rhs: Vector<T, $m>) -> Self::Output {
                    self.transform_point(rhs)
                }
            }
        )+
    };
}
homogeneous_impls!(2 => 1, 3 => 2, 4 => 3);
