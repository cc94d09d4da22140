//! Operator implementations for [`Vector`].
//!
//! Binary operators come in two flavors: component-wise between two vectors of the same
//! dimension, and scaling by a single scalar on the right. A blanket `Op<U> where T: Op<U>` impl
//! would make the two overlap, so only `Op<Vector<T, N>>` and `Op<T>` exist.

use std::ops;

use crate::approx::{ApproxEq, Comparison};

use super::Vector;

impl<T, const N: usize> ops::Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T, const N: usize> ops::IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.0[i]
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<Vector<U, N>> for Vector<T, N> {
    fn eq(&self, rhs: &Vector<U, N>) -> bool {
        self.0.iter().zip(&rhs.0).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const N: usize> Eq for Vector<T, N> {}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Vector<T, N> {
    fn eq(&self, rhs: &[U; N]) -> bool {
        self.0.iter().zip(rhs).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<Vector<U, N>> for [T; N] {
    fn eq(&self, rhs: &Vector<U, N>) -> bool {
        self.iter().zip(&rhs.0).all(|(a, b)| a == b)
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for Vector<T, N> {
    type Tolerance = T::Tolerance;

    fn approx_eq(&self, other: &Self, comparison: Comparison<T::Tolerance>) -> bool {
        self.0.approx_eq(&other.0, comparison)
    }
}

impl<T: ops::Neg, const N: usize> ops::Neg for Vector<T, N> {
    type Output = Vector<T::Output, N>;

    fn neg(self) -> Self::Output {
        self.map(|x| -x)
    }
}

macro_rules! binary_ops {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident;)+) => {
        $(
            impl<T: ops::$op, const N: usize> ops::$op for Vector<T, N> {
                type Output = Vector<T::Output, N>;

                #[inline]
                fn $method(self, rhs: Self) -> Self::Output {
                    self.zip(rhs).map(|(a, b)| ops::$op::$method(a, b))
                }
            }

            impl<T: ops::$op + Copy, const N: usize> ops::$op<T> for Vector<T, N> {
                type Output = Vector<T::Output, N>;

                #[inline]
                fn $method(self, scalar: T) -> Self::Output {
                    self.map(|a| ops::$op::$method(a, scalar))
                }
            }

            impl<T: ops::$assign, const N: usize> ops::$assign for Vector<T, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: Self) {
                    for (a, b) in self.0.iter_mut().zip(rhs.0) {
                        ops::$assign::$assign_method(a, b);
                    }
                }
            }

            impl<T: ops::$assign + Copy, const N: usize> ops::$assign<T> for Vector<T, N> {
                #[inline]
                fn $assign_method(&mut self, scalar: T) {
                    for a in &mut self.0 {
                        ops::$assign::$assign_method(a, scalar);
                    }
                }
            }
        )+
    };
}

binary_ops! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
}

// `2.0 * v` has to be spelled out per scalar type, since `impl<T> Mul<Vector<T, N>> for T` is
// not allowed.
macro_rules! scalar_times_vector {
    ($($ty:ty),+) => {
        $(
            impl<const N: usize> ops::Mul<Vector<$ty, N>> for $ty {
                type Output = Vector<$ty, N>;

                #[inline]
                fn mul(self, v: Vector<$ty, N>) -> Vector<$ty, N> {
                    v * self
                }
            }
        )+
    };
}
scalar_times_vector!(f32, f64);
