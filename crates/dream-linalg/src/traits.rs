//! Scalar element traits.
//!
//! [`Number`] is enough for construction, element access and products. Anything that needs a
//! square root or an angle (lengths, rotations, projections, the 4x4 inverse) requires [`Float`].

use std::{fmt, ops};

use crate::approx::{ApproxEq, Epsilon};

/// Types with an additive identity.
pub trait Zero {
    const ZERO: Self;
}

/// Types with a multiplicative identity.
pub trait One {
    const ONE: Self;
}

/// Scalars supporting the four arithmetic operations and negation.
///
/// Blanket-implemented for every type that qualifies, which includes all signed primitives.
pub trait Number:
    Zero
    + One
    + Copy
    + PartialEq
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
{
}

impl<T> Number for T where
    T: Zero
        + One
        + Copy
        + PartialEq
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
{
}

/// Floating-point scalars, implemented for [`f32`] and [`f64`].
///
/// The methods forward to the inherent methods of the same name. Widening to [`f64`] is used to
/// report determinants in [`Error::Singular`](crate::Error::Singular).
pub trait Float:
    Number + PartialOrd + ApproxEq<Tolerance = Self> + Epsilon + Into<f64> + fmt::Debug
{
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn is_finite(self) -> bool;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

macro_rules! forward {
    ($ty:ty: $($method:ident($($arg:ident),*) -> $ret:ty),+ $(,)?) => {
        $(
            #[inline]
            fn $method(self, $($arg: Self),*) -> $ret {
                <$ty>::$method(self, $($arg),*)
            }
        )+
    };
}

macro_rules! int_impls {
    ($($ty:ty),+) => {
        $(
            impl Zero for $ty {
                const ZERO: Self = 0;
            }

            impl One for $ty {
                const ONE: Self = 1;
            }
        )+
    };
}
int_impls!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_impls {
    ($($ty:ty),+) => {
        $(
            impl Zero for $ty {
                const ZERO: Self = 0.0;
            }

            impl One for $ty {
                const ONE: Self = 1.0;
            }

            impl Float for $ty {
                forward!($ty:
                    sin() -> Self,
                    cos() -> Self,
                    tan() -> Self,
                    acos() -> Self,
                    atan2(other) -> Self,
                    sqrt() -> Self,
                    abs() -> Self,
                    floor() -> Self,
                    is_finite() -> bool,
                    min(other) -> Self,
                    max(other) -> Self,
                );
            }
        )+
    };
}
float_impls!(f32, f64);

#[inline]
pub(crate) fn two<T: Number>() -> T {
    T::ONE + T::ONE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor<T: Float>(x: T) -> T {
        x.floor()
    }

    #[test]
    fn forwarding() {
        assert_eq!(floor(-0.5f32), -1.0);
        assert_eq!(floor(2.75f64), 2.0);
        assert_eq!(Float::max(1.0f32, f32::NAN), 1.0);
        assert_eq!(Float::atan2(1.0f64, 0.0), std::f64::consts::FRAC_PI_2);
        assert!(!Float::is_finite(f32::INFINITY));
    }

    #[test]
    fn constants() {
        assert_eq!(two::<i32>(), 2);
        assert_eq!(two::<f64>(), 2.0);
        assert_eq!(<usize as Zero>::ZERO, 0);
    }
}
