//! Tolerance-based equality for floating-point values and the types built from them.
//!
//! Every comparison is described by a [`Comparison`] and applied to each pair of corresponding
//! scalars. The one used throughout the crate is [`Comparison::Ulps`]: two scalars match if at
//! most `ulps` representable values ([*units in the last place*]) lie between them. There is no
//! absolute floor, so a computed value that should be zero but isn't will not match `0.0`.
//! Compare such values with [`Comparison::Absolute`] instead.
//!
//! [*units in the last place*]: https://en.wikipedia.org/wiki/Unit_in_the_last_place

mod impls;

use std::{fmt, panic::Location};

/// ULP tolerance of [`ApproxEq::equal_within_default_tolerance`].
///
/// Covers the rounding accumulated by a handful of chained 4x4 products. Results that should be
/// exactly zero are not covered, see the [module docs](self).
pub const DEFAULT_ULPS: u32 = 32;

/// A rule for deciding whether two scalars are close enough.
///
/// `F` is the scalar type, [`f32`] or [`f64`]. Infinities only match themselves and `NaN` never
/// matches anything, whichever rule is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison<F> {
    /// `|a - b| <= tolerance`.
    Absolute(F),
    /// `|a - b| <= max(|a|, |b|) * tolerance`.
    Relative(F),
    /// At most this many representable values lie between `a` and `b`. `-0.0` and `+0.0` are
    /// the same point, so they match even with a distance of 0.
    Ulps(u32),
}

/// Scalar types that [`Comparison`]s are expressed in.
pub trait Epsilon: Copy + fmt::Debug {
    /// Difference between 1.0 and the next representable value.
    const EPSILON: Self;

    /// `ulps` machine epsilons.
    fn epsilons(ulps: u32) -> Self;
}

impl Epsilon for f32 {
    const EPSILON: Self = f32::EPSILON;

    fn epsilons(ulps: u32) -> Self {
        ulps as f32 * f32::EPSILON
    }
}

impl Epsilon for f64 {
    const EPSILON: Self = f64::EPSILON;

    fn epsilons(ulps: u32) -> Self {
        f64::from(ulps) * f64::EPSILON
    }
}

/// Types that can be compared for *approximate equality*.
///
/// Compound types ([`Vector`][crate::Vector], [`Matrix`][crate::Matrix], arrays and slices) match
/// if every pair of corresponding scalars does.
///
/// Background on why there is no single right way to do this:
/// <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// The underlying scalar type.
    type Tolerance: Epsilon;

    /// Compares `self` and `other` scalar by scalar using `comparison`.
    fn approx_eq(&self, other: &Rhs, comparison: Comparison<Self::Tolerance>) -> bool;

    /// Compares with [`Comparison::Ulps`].
    ///
    /// ```
    /// # use dream_linalg::{ApproxEq, Mat44};
    /// let m = Mat44::IDENTITY * 3.0;
    /// assert!(m.equal_within_tolerance(&(m * (1.0 + f32::EPSILON)), 4));
    /// assert!(!m.equal_within_tolerance(&Mat44::IDENTITY, 4));
    /// ```
    fn equal_within_tolerance(&self, other: &Rhs, ulps: u32) -> bool {
        self.approx_eq(other, Comparison::Ulps(ulps))
    }

    /// [`ApproxEq::equal_within_tolerance`] with [`DEFAULT_ULPS`].
    fn equal_within_default_tolerance(&self, other: &Rhs) -> bool {
        self.equal_within_tolerance(other, DEFAULT_ULPS)
    }
}

/// Guard returned by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// The assertion runs when the guard is dropped, so the comparisons can be chosen first:
///
/// ```
/// # use dream_linalg::*;
/// assert_approx_eq!(100.0, 99.5).abs(0.1).rel(0.01);
/// ```
///
/// The values are considered equal if *any* chosen comparison matches them. Without a choice,
/// `Absolute(EPSILON)` and `Relative(EPSILON)` are used.
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    left: &'a T,
    right: &'a T,
    expect: Expect,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    comparisons: Vec<Comparison<T::Tolerance>>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        expect: Expect,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            expect,
            location: Location::caller(),
            msg,
            comparisons: Vec::new(),
        }
    }

    /// Also accept values within `tolerance` of each other, see [`Comparison::Absolute`].
    pub fn abs(&mut self, tolerance: T::Tolerance) -> &mut Self {
        self.comparisons.push(Comparison::Absolute(tolerance));
        self
    }

    /// Also accept values within a `tolerance` fraction of each other, see
    /// [`Comparison::Relative`].
    pub fn rel(&mut self, tolerance: T::Tolerance) -> &mut Self {
        self.comparisons.push(Comparison::Relative(tolerance));
        self
    }

    /// Also accept values at most `ulps` representable values apart, see [`Comparison::Ulps`].
    pub fn ulps(&mut self, ulps: u32) -> &mut Self {
        self.comparisons.push(Comparison::Ulps(ulps));
        self
    }

    /// Also accept values that [`ApproxEq::equal_within_tolerance`] accepts. Same as
    /// [`Asserter::ulps`].
    pub fn tolerance(&mut self, ulps: u32) -> &mut Self {
        self.ulps(ulps)
    }

    /// Also accept values that [`ApproxEq::equal_within_default_tolerance`] accepts.
    pub fn default_tolerance(&mut self) -> &mut Self {
        self.tolerance(DEFAULT_ULPS)
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    // `#[track_caller]` does nothing on `drop`, hence the location captured in `new`.
    fn drop(&mut self) {
        if self.comparisons.is_empty() {
            let eps = <T::Tolerance as Epsilon>::EPSILON;
            self.comparisons = vec![Comparison::Absolute(eps), Comparison::Relative(eps)];
        }

        let (left, right) = (self.left, self.right);
        let equal = self.comparisons.iter().any(|&c| left.approx_eq(right, c));
        if equal != (self.expect == Expect::Equal) {
            fail(left, right, self.expect, &self.comparisons, self.location, self.msg);
        }
    }
}

fn fail(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    expect: Expect,
    comparisons: &dyn fmt::Debug,
    location: &Location<'_>,
    msg: Option<fmt::Arguments<'_>>,
) -> ! {
    let what = match expect {
        Expect::Equal => "values differ",
        Expect::NotEqual => "values match",
    };
    let msg = msg.map(|args| format!(": {args}")).unwrap_or_default();
    panic!("{what} under {comparisons:?} at {location}{msg}\n  left: {left:?}\n right: {right:?}");
}

#[doc(hidden)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Equal,
    NotEqual,
}

/// Asserts that two expressions are approximately equal (see [`ApproxEq`]).
///
/// Takes the same arguments as [`assert_eq!`]. The returned [`Asserter`] picks the comparison.
///
/// # Examples
///
/// ```
/// # use dream_linalg::*;
/// let sum = (0..10).map(|_| 0.1).sum::<f64>();
/// assert_approx_eq!(sum, 1.0);
/// assert_approx_eq!(50.0, 49.5).abs(0.5);
/// assert_approx_eq!(50.0, 49.5).rel(0.02);
/// assert_approx_eq!(2.0, 2.0 + 2.0 * f64::EPSILON).ulps(1);
/// assert_approx_eq!(vec3(0.1 + 0.2, 1.0, -0.0), vec3(0.3, 1.0, 0.0)).default_tolerance();
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($($args:tt)+) => {
        $crate::__asserter!(Equal, $($args)+)
    };
}

/// Asserts that two expressions are *not* approximately equal (see [`ApproxEq`]).
///
/// ```
/// # use dream_linalg::*;
/// assert_approx_ne!(50.0, 49.0).abs(0.5);
/// assert_approx_ne!(4.0, 4.0 + 8.0 * f64::EPSILON).ulps(1);
/// assert_approx_ne!(1.0f32, 1.001).tolerance(DEFAULT_ULPS);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($($args:tt)+) => {
        $crate::__asserter!(NotEqual, $($args)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __asserter {
    ($expect:ident, $left:expr, $right:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$left,
            &$right,
            $crate::approx::Expect::$expect,
            ::core::option::Option::None,
        )
    };
    ($expect:ident, $left:expr, $right:expr, $($fmt:tt)+) => {
        $crate::approx::Asserter::new(
            &$left,
            &$right,
            $crate::approx::Expect::$expect,
            ::core::option::Option::Some(::core::format_args!($($fmt)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "values match under [Absolute(")]
    fn identical_values_are_not_unequal() {
        assert_approx_ne!(3.0, 3.0);
    }

    #[test]
    #[should_panic(expected = "values differ under [Ulps(2)]")]
    fn distant_values_fail_ulps() {
        assert_approx_eq!(3.0, 4.0).ulps(2);
    }

    #[test]
    #[should_panic(expected = "row 2 is off")]
    fn failure_message() {
        assert_approx_eq!(3.0, 4.0, "row {} is off", 2);
    }

    #[test]
    fn first_matching_comparison_wins() {
        assert_approx_eq!(2.0, 2.25).ulps(0).abs(0.25);
        assert_approx_ne!(2.0, 2.25).ulps(0).abs(0.2);
    }

    #[test]
    fn relative_tolerance() {
        assert_approx_eq!(10.0, 10.05).rel(0.01);
        assert_approx_eq!(3.0, -3.0).rel(2.0);
        assert_approx_eq!(0.0, 0.001).rel(1.0);
        assert_approx_ne!(0.0, 0.001).rel(0.5);
    }

    #[test]
    fn epsilon_when_nothing_chosen() {
        let above = 1.0 + f32::EPSILON;
        assert_approx_eq!(1.0, above);
        assert_approx_eq!(1.0, above).ulps(1);
        assert_approx_ne!(1.0, above).ulps(0);
        assert_approx_ne!(2.0, -2.0);
    }

    #[test]
    fn tolerance_is_pure_ulps() {
        let a = 1e-3f32;
        let b = a + 3e-6;
        assert!(!a.equal_within_tolerance(&b, DEFAULT_ULPS));
        assert!(!a.equal_within_default_tolerance(&(a * 3.0)));
        assert!(!1e-7f32.equal_within_tolerance(&-1e-7, 4));
        assert!(!0.5f32.equal_within_tolerance(&-0.5, DEFAULT_ULPS));
        assert_approx_ne!(0.0f64, 1e-17).tolerance(1);
        assert_approx_eq!(0.0f64, -0.0).tolerance(0);
    }

    #[test]
    fn tolerance_scales_with_magnitude() {
        let big = 1.0e6f32;
        let next = f32::from_bits(big.to_bits() + 3);
        assert!(big.equal_within_tolerance(&next, 3));
        assert!(!big.equal_within_tolerance(&next, 2));
        assert!(big.equal_within_default_tolerance(&next));
    }

    #[test]
    fn tolerance_symmetric_and_reflexive() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let a = rng.f32() * 200.0 - 100.0;
            let b = a * (1.0 + (rng.f32() - 0.5) * 1e-5);
            assert!(a.equal_within_default_tolerance(&a));
            assert_eq!(
                a.equal_within_default_tolerance(&b),
                b.equal_within_default_tolerance(&a),
            );
        }
    }

    #[test]
    fn signed_zero() {
        assert_approx_eq!(0.0f32, -0.0).ulps(0);
        assert_approx_eq!(-0.0f64, 0.0).abs(0.0);
        assert_approx_eq!(-7.5, -7.5).rel(0.0);
    }

    #[test]
    fn nan() {
        for c in [
            Comparison::Absolute(1.0),
            Comparison::Relative(1.0),
            Comparison::Ulps(100),
        ] {
            assert!(!f32::NAN.approx_eq(&f32::NAN, c), "{c:?}");
            assert!(!f32::NAN.approx_eq(&0.0, c), "{c:?}");
        }
    }

    #[test]
    fn infinities() {
        assert_approx_eq!(f32::INFINITY, f32::INFINITY).abs(0.0);
        assert_approx_eq!(f64::NEG_INFINITY, f64::NEG_INFINITY).tolerance(0);
        assert_approx_ne!(f32::INFINITY, f32::NEG_INFINITY).tolerance(DEFAULT_ULPS);
        // adjacent bit patterns, but infinity only matches itself
        assert_approx_ne!(f32::MAX, f32::INFINITY).ulps(1);
        assert_approx_ne!(f64::MAX, f64::INFINITY).rel(1e4);
    }
}
