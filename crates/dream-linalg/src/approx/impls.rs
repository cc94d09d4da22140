use super::{ApproxEq, Comparison};

macro_rules! scalar_impls {
    ($($ty:ty => $wide:ty),+) => {
        $(
            impl ApproxEq for $ty {
                type Tolerance = Self;

                fn approx_eq(&self, other: &Self, comparison: Comparison<Self>) -> bool {
                    let (a, b) = (*self, *other);
                    if !a.is_finite() || !b.is_finite() {
                        // infinities match themselves only, NaN nothing
                        return a == b;
                    }

                    match comparison {
                        Comparison::Absolute(tol) => (a - b).abs() <= tol,
                        Comparison::Relative(tol) => (a - b).abs() <= a.abs().max(b.abs()) * tol,
                        Comparison::Ulps(ulps) => {
                            // position on the number line of representable values, `-0.0` and
                            // `+0.0` both sit at 0
                            let key = |x: $ty| {
                                let magnitude = <$wide>::from(x.abs().to_bits());
                                if x.is_sign_negative() { -magnitude } else { magnitude }
                            };
                            key(a).abs_diff(key(b)) <= ulps.into()
                        }
                    }
                }
            }
        )+
    };
}
scalar_impls!(f32 => i64, f64 => i128);

impl<'a, T: ApproxEq<U> + ?Sized, U: ?Sized> ApproxEq<U> for &'a T {
    type Tolerance = T::Tolerance;

    fn approx_eq(&self, other: &U, comparison: Comparison<Self::Tolerance>) -> bool {
        T::approx_eq(self, other, comparison)
    }
}

/// Slices of different lengths never match.
impl<T: ApproxEq<U>, U> ApproxEq<[U]> for [T] {
    type Tolerance = T::Tolerance;

    fn approx_eq(&self, other: &[U], comparison: Comparison<Self::Tolerance>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.approx_eq(b, comparison))
    }
}

impl<T: ApproxEq<U>, U, const N: usize> ApproxEq<[U; N]> for [T; N] {
    type Tolerance = T::Tolerance;

    fn approx_eq(&self, other: &[U; N], comparison: Comparison<Self::Tolerance>) -> bool {
        self[..].approx_eq(&other[..], comparison)
    }
}
