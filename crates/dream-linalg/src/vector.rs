use std::{array, fmt};

use crate::traits::{Float, Number, One, Zero};

mod ops;

pub type Vec1<T> = Vector<T, 1>;
pub type Vec2<T> = Vector<T, 2>;
pub type Vec3<T> = Vector<T, 3>;
pub type Vec4<T> = Vector<T, 4>;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Vec4f = Vec4<f32>;

/// A column vector of `N` scalars of type `T`.
///
/// The dimension is a type parameter: adding a [`Vec3f`] to a [`Vec4f`] is a compile error, and
/// so is asking a [`Vec2f`] for its [`z`](Vector::z) component.
///
/// Elementwise `+`, `-`, `*` and `/` are implemented between vectors, and `*` and `/` between a
/// vector and a scalar (on either side for `*`). Indexing panics when out of range, like it does
/// for arrays.
///
/// Points are lifted into homogeneous coordinates with [`append`](Vector::append) and brought back
/// with [`reduce`](Vector::reduce). The layout is that of `[T; N]`, so vectors of [`bytemuck::Pod`]
/// scalars are `Pod` as well.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Zero, const N: usize> Vector<T, N> {
    pub const ZERO: Self = Self([T::ZERO; N]);
}

macro_rules! unit_vectors {
    ($n:literal: $($name:ident = $axis:literal),+) => {
        impl<T: Zero + One + Copy> Vector<T, $n> {
            $(
                #[doc = concat!("Unit vector along axis ", stringify!($name), ".")]
                pub const $name: Self = {
                    let mut v = [T::ZERO; $n];
                    v[$axis] = T::ONE;
                    Self(v)
                };
            )+
        }
    };
}
unit_vectors!(2: X = 0, Y = 1);
unit_vectors!(3: X = 0, Y = 1, Z = 2);
unit_vectors!(4: X = 0, Y = 1, Z = 2, W = 3);

impl<T, const N: usize> Vector<T, N> {
    /// A vector with every element set to `value`.
    pub fn splat(value: T) -> Self
    where
        T: Copy,
    {
        Self([value; N])
    }

    /// Builds a vector by calling `cb` with each element index in turn.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let v = Vector::from_fn(|i| i as f32 * 0.5);
    /// assert_eq!(v, vec3(0.0, 0.5, 1.0));
    /// ```
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    pub fn map<U, F>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Pairs up the elements of `self` and `other`.
    pub fn zip<U>(self, other: Vector<U, N>) -> Vector<(T, U), N> {
        let mut rhs = other.0.into_iter();
        Vector(self.0.map(|lhs| match rhs.next() {
            Some(rhs) => (lhs, rhs),
            // both sides have `N` elements
            None => unreachable!(),
        }))
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

macro_rules! component_accessors {
    ($($name:ident: $index:literal),+) => {
        impl<T: Copy, const N: usize> Vector<T, N> {
            $(
                #[doc = concat!("Element ", $index, ", a compile error for shorter vectors.")]
                #[inline]
                pub fn $name(&self) -> T {
                    const {
                        assert!(
                            N > $index,
                            concat!("vector has no ", stringify!($name), " element"),
                        )
                    };
                    self.0[$index]
                }
            )+
        }
    };
}
component_accessors!(x: 0, y: 1, z: 2, w: 3);

impl<T: Number, const N: usize> Vector<T, N> {
    /// The inner product `Σ self[i] * other[i]`.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// assert_eq!(vec3(1, 3, -5).dot(vec3(4, -2, -1)), 3);
    /// ```
    pub fn dot(self, other: Self) -> T {
        let mut sum = T::ZERO;
        for i in 0..N {
            sum = sum + self.0[i] * other.0[i];
        }
        sum
    }

    /// The squared length, `self · self`.
    pub fn length2(&self) -> T {
        self.dot(*self)
    }
}

impl<T: Float, const N: usize> Vector<T, N> {
    pub fn length(&self) -> T {
        self.length2().sqrt()
    }

    /// Scales `self` to unit length.
    ///
    /// The zero vector has no direction and normalizes to NaN.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// The unsigned angle between `self` and `other` in radians, in `[0, π]`.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let angle = Vec3f::X.abs_angle_to(vec3(1.0, 1.0, 0.0));
    /// assert_approx_eq!(angle, std::f32::consts::FRAC_PI_4).abs(1e-6);
    /// ```
    pub fn abs_angle_to(self, other: Self) -> T {
        let cos = self.dot(other) / (self.length() * other.length());
        // parallel inputs can round to slightly above 1
        cos.max(-T::ONE).min(T::ONE).acos()
    }

    pub fn min(self, other: Self) -> Self {
        self.zip(other).map(|(a, b)| a.min(b))
    }

    pub fn max(self, other: Self) -> Self {
        self.zip(other).map(|(a, b)| a.max(b))
    }

    /// Limits each element to the matching range `lo[i]..=hi[i]`.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Rounds each element down, in place.
    ///
    /// Paired with [`Vector::frac`], splits a point into its lattice cell and its offset inside
    /// the cell:
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let p = vec3(1.5, -0.25, 3.0);
    /// let (mut cell, mut offset) = (p, p);
    /// cell.floor();
    /// offset.frac();
    /// assert_eq!(cell, vec3(1.0, -1.0, 3.0));
    /// assert_eq!(offset, vec3(0.5, 0.75, 0.0));
    /// ```
    pub fn floor(&mut self) -> &mut Self {
        for elem in &mut self.0 {
            *elem = elem.floor();
        }
        self
    }

    /// Replaces each element `x` by `x - floor(x)`, in place. Finite elements end up in `[0, 1)`.
    pub fn frac(&mut self) -> &mut Self {
        for elem in &mut self.0 {
            *elem = *elem - elem.floor();
        }
        self
    }
}

impl<T: Number> Vec3<T> {
    /// The right-handed cross product `self × other`, perpendicular to both.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// assert_eq!(Vec3f::X.cross(Vec3f::Y), Vec3f::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        vec3(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

/// `a × b`, see [`Vector::cross`].
pub fn cross_product<T: Number>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    a.cross(b)
}

/// `a · b`, see [`Vector::dot`].
pub fn dot_product<T: Number, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T {
    a.dot(b)
}

macro_rules! homogeneous_impls {
    ($($n:literal => $m:literal),+) => {
        $(
            impl<T: Copy> Vector<T, $n> {
                /// Adds `last` as a new trailing element.
                pub fn append(self, last: T) -> Vector<T, $m> {
                    Vector::from_fn(|i| if i < $n { self.0[i] } else { last })
                }
            }

            impl<T: Copy> Vector<T, $m> {
                /// Drops the trailing element.
                pub fn reduce(self) -> Vector<T, $n> {
                    Vector::from_fn(|i| self.0[i])
                }
            }
        )+
    };
}
homogeneous_impls!(1 => 2, 2 => 3, 3 => 4);

impl<T: Default, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(elems: [T; N]) -> Self {
        Self(elems)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(v: Vector<T, N>) -> Self {
        v.0
    }
}

impl<T, const N: usize> AsRef<[T]> for Vector<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> AsMut<[T]> for Vector<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

/// Formats as a tuple, `(x, y, z)`.
impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .fold(&mut f.debug_tuple(""), |t, elem| t.field(elem))
            .finish()
    }
}

/// Formats as a tuple, applying the format options to every element.
impl<T: fmt::Display, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(elem, f)?;
        }
        write!(f, ")")
    }
}

pub const fn vec1<T>(x: T) -> Vec1<T> {
    Vector([x])
}

pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}
