use std::{array, fmt};

use crate::{
    offset::column_major_offset,
    traits::{Number, One, Zero},
    Error, Real, Result, Vector,
};

mod inverse;
mod ops;
mod square;

pub use inverse::Inverse;

pub type Mat2<T> = Matrix<T, 2, 2>;
pub type Mat3<T> = Matrix<T, 3, 3>;
pub type Mat4<T> = Matrix<T, 4, 4>;

pub type Mat2f = Mat2<f32>;
pub type Mat3f = Mat3<f32>;
pub type Mat4f = Mat4<f32>;

pub type Mat22 = Mat2<Real>;
pub type Mat33 = Mat3<Real>;
/// The 4x4 transform matrix used by the camera and projection code.
///
/// Its 16 elements are laid out column by column, so the translation part of an affine transform
/// lives at offsets 12, 13 and 14, which is what OpenGL-style uniform uploads expect.
pub type Mat44 = Mat4<Real>;

/// An `R`x`C` matrix of `T`s, stored column-major.
///
/// Elements are always addressed as `(row, column)`:
///
/// ```
/// # use dream_linalg::*;
/// let mut m = Matrix::from_rows([
///     [1, 2, 3],
///     [4, 5, 6],
/// ]);
/// m[(1, 2)] = 60;
/// assert_eq!(m.at(0, 1), 2);
/// assert_eq!(m.get(1, 2), Some(&60));
/// assert_eq!(m.get(2, 0), None);
/// ```
///
/// The storage order only shows through the linear accessors ([`Matrix::at_offset`], indexing
/// with a single `usize`, [`Matrix::value`]), through [`Matrix::set`] and [`Matrix::slice`], and
/// through [`bytemuck`] casts. All of them compute positions with [`column_major_offset`].
///
/// [`Matrix::at`] and indexing panic on out-of-range positions; [`Matrix::get`] and
/// [`Matrix::get_mut`] return `None` instead.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; R]; C]);

unsafe impl<T, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> where
    T: bytemuck::Zeroable
{
}
unsafe impl<T, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> where
    T: bytemuck::Pod
{
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    pub const ZERO: Self = Self([[T::ZERO; R]; C]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Ones on the leading diagonal, zeroes elsewhere. Also defined for non-square shapes.
    pub const IDENTITY: Self = {
        let mut columns = [[T::ZERO; R]; C];
        let mut k = 0;
        while k < R && k < C {
            columns[k][k] = T::ONE;
            k += 1;
        }
        Self(columns)
    };
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Builds a matrix from its rows, given in reading order.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let by_rows = Matrix::from_rows([[1, 2], [3, 4]]);
    /// let by_columns = Matrix::from_columns([vec2(1, 3), vec2(2, 4)]);
    /// assert_eq!(by_rows, by_columns);
    /// ```
    pub fn from_rows<V: Into<Vector<T, C>>>(rows: [V; R]) -> Self
    where
        T: Copy,
    {
        let rows: [Vector<T, C>; R] = rows.map(Into::into);
        Self::from_fn(|row, col| rows[row][col])
    }

    pub fn from_columns<V: Into<Vector<T, R>>>(columns: [V; C]) -> Self {
        Self(columns.map(|column| column.into().into_array()))
    }

    /// Builds a matrix by calling `cb(row, col)` for every position.
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| array::from_fn(|row| cb(row, col))))
    }

    /// Builds a matrix from `R * C` elements in storage (column-major) order, converting each
    /// with [`Into`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::LengthMismatch`] unless `data` holds exactly `R * C` elements.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat22::from_slice(&[1i16, 2, 3, 4])?;
    /// assert_eq!(m.row(0), vec2(1.0, 3.0));
    /// assert!(Mat22::from_slice(&[1.0f32, 2.0]).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_slice<U>(data: &[U]) -> Result<Self>
    where
        U: Into<T> + Copy,
    {
        check_len::<R, C>(data.len())?;
        Ok(Self::from_fn(|row, col| {
            data[column_major_offset(row, col, R)].into()
        }))
    }

    pub fn map<U, F>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(&mut f)))
    }

    /// The `C`x`R` matrix with rows and columns swapped.
    ///
    /// See [`Matrix::transpose`] for the in-place variant on square matrices.
    pub fn transposed_matrix(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Storage offset of `(row, col)`, panicking if it lies outside the matrix.
    #[track_caller]
    fn offset_of(row: usize, col: usize) -> usize {
        if row >= R || col >= C {
            panic!("position ({row}, {col}) is outside of a {R}x{C} matrix");
        }
        column_major_offset(row, col, R)
    }

    #[track_caller]
    fn check_offset(index: usize) {
        if index >= R * C {
            panic!("offset {index} is outside of a {R}x{C} matrix");
        }
    }

    /// # Panics
    ///
    /// Panics if `row >= R` or `col >= C`.
    #[track_caller]
    pub fn at(&self, row: usize, col: usize) -> T
    where
        T: Copy,
    {
        self.value()[Self::offset_of(row, col)]
    }

    /// # Panics
    ///
    /// Panics if `row >= R` or `col >= C`.
    #[track_caller]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.value_mut()[Self::offset_of(row, col)]
    }

    /// Reads the element at storage offset `index`.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Mat44::translating_matrix(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(m.at_offset(13), 2.0);
    /// assert_eq!(m.at_offset(13), m.at(1, 3));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index >= R * C`.
    #[track_caller]
    pub fn at_offset(&self, index: usize) -> T
    where
        T: Copy,
    {
        Self::check_offset(index);
        self.value()[index]
    }

    /// # Panics
    ///
    /// Panics if `index >= R * C`.
    #[track_caller]
    pub fn at_offset_mut(&mut self, index: usize) -> &mut T {
        Self::check_offset(index);
        &mut self.value_mut()[index]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < R && col < C {
            Some(&self.0[col][row])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < R && col < C {
            Some(&mut self.0[col][row])
        } else {
            None
        }
    }

    /// All elements in storage order, one column after the other.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let m = Matrix::from_rows([[1, 2], [3, 4]]);
    /// assert_eq!(m.value(), &[1, 3, 2, 4]);
    /// ```
    #[inline]
    pub fn value(&self) -> &[T] {
        self.0.as_flattened()
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut [T] {
        self.0.as_flattened_mut()
    }

    #[track_caller]
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self.at(row, col))
    }

    #[track_caller]
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        Vector::from(self.0[col])
    }

    /// Writes the elements of `v` to consecutive storage offsets, starting at `(row, col)`.
    ///
    /// With column-major storage this fills a column downwards, wrapping into the next column
    /// when the current one ends:
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let mut m = Mat44::ZERO;
    /// m.set(0, 3, vec3(1.0, 2.0, 3.0));
    /// assert_eq!(m.column(3), vec4(1.0, 2.0, 3.0, 0.0));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of range or `v` runs past the last element.
    #[track_caller]
    pub fn set<const D: usize>(&mut self, row: usize, col: usize, v: Vector<T, D>) {
        self.set_strided(row, col, v, 1);
    }

    /// Like [`Matrix::set`], but moves `element_offset` storage positions between elements.
    ///
    /// An offset of `R` writes along a row:
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let mut m = Mat44::IDENTITY;
    /// m.set_strided(3, 0, vec4(5.0, 6.0, 7.0, 8.0), 4);
    /// assert_eq!(m.row(3), vec4(5.0, 6.0, 7.0, 8.0));
    /// ```
    #[track_caller]
    pub fn set_strided<const D: usize>(
        &mut self,
        row: usize,
        col: usize,
        v: Vector<T, D>,
        element_offset: usize,
    ) {
        let offsets = Self::strided_offsets::<D>(row, col, element_offset);
        let storage = self.value_mut();
        for (offset, elem) in offsets.into_iter().zip(v.into_array()) {
            storage[offset] = elem;
        }
    }

    /// Reads `D` consecutive storage elements starting at `(row, col)`, the reverse of
    /// [`Matrix::set`].
    #[track_caller]
    pub fn slice<const D: usize>(&self, row: usize, col: usize) -> Vector<T, D>
    where
        T: Copy,
    {
        self.slice_strided(row, col, 1)
    }

    /// The reverse of [`Matrix::set_strided`].
    #[track_caller]
    pub fn slice_strided<const D: usize>(
        &self,
        row: usize,
        col: usize,
        element_offset: usize,
    ) -> Vector<T, D>
    where
        T: Copy,
    {
        let offsets = Self::strided_offsets::<D>(row, col, element_offset);
        Vector::from_fn(|i| self.value()[offsets[i]])
    }

    #[track_caller]
    fn strided_offsets<const D: usize>(
        row: usize,
        col: usize,
        element_offset: usize,
    ) -> [usize; D] {
        let start = Self::offset_of(row, col);
        let mut offsets = [0; D];
        for (i, slot) in offsets.iter_mut().enumerate() {
            // a huge stride must not wrap around into the storage
            match i.checked_mul(element_offset).and_then(|delta| start.checked_add(delta)) {
                Some(offset) if offset < R * C => *slot = offset,
                _ => panic!(
                    "{D} elements, {element_offset} apart, from ({row}, {col}) exceed a {R}x{C} \
                     matrix"
                ),
            }
        }
        offsets
    }

    /// Overwrites `self` from `R * C` elements in storage order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::LengthMismatch`] unless `data` holds exactly `R * C` elements. `self`
    /// is unchanged in that case.
    pub fn copy_from_slice<U>(&mut self, data: &[U]) -> Result<()>
    where
        U: Into<T> + Copy,
    {
        check_len::<R, C>(data.len())?;
        for (dst, &src) in self.value_mut().iter_mut().zip(data) {
            *dst = src.into();
        }
        Ok(())
    }

    pub fn zero(&mut self) -> &mut Self
    where
        T: Zero + Copy,
    {
        *self = Self::ZERO;
        self
    }

    /// Resets `self` to `n` times the identity.
    pub fn load_identity(&mut self, n: T) -> &mut Self
    where
        T: Zero + Copy,
    {
        *self = Self::identity_scaled(n);
        self
    }

    /// `n` on the leading diagonal, zeroes elsewhere.
    ///
    /// ```
    /// # use dream_linalg::*;
    /// assert_eq!(Mat33::identity_scaled(2.0), Mat33::IDENTITY * 2.0);
    /// ```
    pub fn identity_scaled(n: T) -> Self
    where
        T: Zero + Copy,
    {
        let mut m = Self::ZERO;
        for k in 0..R.min(C) {
            m.0[k][k] = n;
        }
        m
    }

    /// Numbers the elements 0, 1, 2, ... row by row, in reading order.
    ///
    /// The result is easy to recognize when checking layouts and products:
    ///
    /// ```
    /// # use dream_linalg::*;
    /// let mut m = Matrix::<i32, 2, 3>::ZERO;
    /// m.load_test_pattern();
    /// assert_eq!(m, Matrix::from_rows([[0, 1, 2], [3, 4, 5]]));
    /// ```
    pub fn load_test_pattern(&mut self) -> &mut Self
    where
        T: Number,
    {
        let mut next = T::ZERO;
        for row in 0..R {
            for col in 0..C {
                self[(row, col)] = next;
                next = next + T::ONE;
            }
        }
        self
    }

    /// `self * v`, the same as the operator.
    pub fn multiply(&self, v: Vector<T, C>) -> Vector<T, R>
    where
        T: Number,
    {
        *self * v
    }

    /// `self * other`, the same as the operator.
    ///
    /// The product applies `other` first and `self` second.
    pub fn multiply_matrix<const K: usize>(&self, other: &Matrix<T, C, K>) -> Matrix<T, R, K>
    where
        T: Number,
    {
        *self * *other
    }
}

fn check_len<const R: usize, const C: usize>(actual: usize) -> Result<()> {
    let expected = R * C;
    if actual != expected {
        return Err(Error::LengthMismatch { expected, actual });
    }
    Ok(())
}

impl<T: Default, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

/// Lists the rows in reading order, `[(a, b), (c, d)]`.
impl<T, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C>
where
    T: fmt::Debug + Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..R).map(|row| self.row(row)))
            .finish()
    }
}

/// One row per line, elements separated by a space. Width and precision apply to each element.
impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..R {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..C {
                if col > 0 {
                    f.write_str(" ")?;
                }
                fmt::Display::fmt(&self.0[col][row], f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{vec2, vec3, vec4, Mat44, Vec2f, Vec4f};

    use super::*;

    #[test]
    fn rows_and_columns() {
        let m = Matrix::<i32, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m, Matrix::from_columns([[1, 4], [2, 5], [3, 6]]));
        assert_eq!(m.row(1), vec3(4, 5, 6));
        assert_eq!(m.column(2), vec2(3, 6));
        assert_eq!(m.transposed_matrix().row(2), vec2(3, 6));
    }

    #[test]
    fn formatting() {
        let m = Matrix::from_rows([[0, 1], [2, 3]]);
        assert_eq!(format!("{m:?}"), "[(0, 1), (2, 3)]");
        assert_eq!(format!("{m}"), "0 1\n2 3");
        assert_eq!(format!("{:4.1}", Mat22::IDENTITY), " 1.0  0.0\n 0.0  1.0");
    }

    #[test]
    fn constants() {
        assert!(Mat44::ZERO.value().iter().all(|&e| e == 0.0));
        assert_eq!(Mat44::IDENTITY.value().iter().sum::<f32>(), 4.0);
        assert_eq!(Mat2f::IDENTITY, Matrix::from_rows([[1.0, 0.0], [0.0, 1.0]]));
        assert_eq!(Mat33::default(), Mat33::ZERO);

        // only the leading diagonal of a non-square identity is filled
        assert_eq!(
            Matrix::<i32, 2, 3>::IDENTITY,
            Matrix::from_rows([[1, 0, 0], [0, 1, 0]])
        );
        assert_eq!(
            Matrix::<i32, 3, 2>::identity_scaled(7).transposed_matrix(),
            Matrix::from_rows([[7, 0, 0], [0, 7, 0]])
        );
    }

    #[test]
    fn column_major_layout() {
        let mut m = Mat44::ZERO;
        m.load_test_pattern();
        for row in 0..4 {
            for col in 0..4 {
                let expected = (row * 4 + col) as f32;
                assert_eq!(m.at(row, col), expected);
                assert_eq!(m[(row, col)], expected);
                assert_eq!(m.at_offset(col * 4 + row), expected);
            }
        }
        assert_eq!(m.row(1), vec4(4.0, 5.0, 6.0, 7.0));
        assert_eq!(m.column(1), vec4(1.0, 5.0, 9.0, 13.0));

        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(floats, m.value());
        assert_eq!(floats[..4], [0.0, 4.0, 8.0, 12.0]);
    }

    #[test]
    fn slice_round_trip() {
        let mut m = Mat44::ZERO;
        m.load_test_pattern();
        assert_eq!(Mat44::from_slice(m.value()).unwrap(), m);

        let mut other = Mat44::IDENTITY;
        other.copy_from_slice(m.value()).unwrap();
        assert_eq!(other, m);
    }

    #[test]
    fn slice_length_mismatch() {
        assert_eq!(
            Mat44::from_slice(&[0.0f32; 15]).unwrap_err(),
            Error::LengthMismatch {
                expected: 16,
                actual: 15
            }
        );

        let mut m = Mat22::IDENTITY;
        assert!(m.copy_from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0]).is_err());
        assert_eq!(m, Mat22::IDENTITY);
    }

    #[test]
    fn vector_slices() {
        let mut m = Mat44::ZERO;
        m.set(0, 2, vec4(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.column(2), vec4(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.slice::<4>(0, 2), vec4(1.0, 2.0, 3.0, 4.0));

        m.set_strided(1, 0, vec4(5.0, 6.0, 7.0, 8.0), 4);
        assert_eq!(m.row(1), vec4(5.0, 6.0, 7.0, 8.0));
        assert_eq!(m.slice_strided::<4>(1, 0, 4), vec4(5.0, 6.0, 7.0, 8.0));

        // runs over into the following column
        let mut m = Matrix::<i32, 3, 2>::ZERO;
        m.set(1, 0, vec3(1, 2, 3));
        assert_eq!(m.value(), &[0, 1, 2, 3, 0, 0]);
        assert_eq!(m.slice::<2>(2, 0), vec2(2, 3));
    }

    #[test]
    #[should_panic(expected = "exceed a 4x4 matrix")]
    fn set_past_end() {
        let mut m = Mat44::ZERO;
        m.set(2, 3, Vec4f::ZERO);
    }

    #[test]
    #[should_panic(expected = "exceed a 4x4 matrix")]
    fn set_strided_with_wrapping_stride() {
        let mut m = Mat44::ZERO;
        m.set_strided(1, 0, vec2(5.0, 6.0), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "exceed a 4x4 matrix")]
    fn slice_strided_with_wrapping_stride() {
        // 15 + (usize::MAX - 14) wraps to offset 0
        let _: Vec2f = Mat44::IDENTITY.slice_strided(3, 3, usize::MAX - 14);
    }

    #[test]
        #[should_panic(expected = "outside of a 4x4 matrix")]
    fn at_out_of_range() {
        Mat44::IDENTITY.at(4, 0);
    }

    #[test]
    #[should_panic(expected = "offset 16 is outside")]
    fn at_offset_out_of_range() {
        Mat44::IDENTITY.at_offset(16);
    }

    #[test]
    fn checked_access() {
        let mut m = Matrix::<i32, 2, 3>::ZERO;
        *m.get_mut(1, 2).unwrap() = 5;
        assert_eq!(m.get(1, 2), Some(&5));
        assert_eq!(m.get(2, 1), None);
        assert!(m.get_mut(0, 3).is_none());
    }

    #[test]
    fn mutators() {
        let mut m = Mat33::IDENTITY;
        m.load_identity(5.0);
        assert_eq!(m.row(2), vec3(0.0, 0.0, 5.0));
        *m.at_offset_mut(3) = 1.0;
        assert_eq!(m.at(0, 1), 1.0);
        *m.at_mut(2, 0) = -1.0;
        assert_eq!(m.at_offset(2), -1.0);
        m.zero();
        assert_eq!(m, Mat33::ZERO);
    }

    #[test]
    fn transposed() {
        let mut m = Matrix::<i32, 3, 4>::ZERO;
        m.load_test_pattern();
        let t: Matrix<i32, 4, 3> = m.transposed_matrix();
        assert_eq!(t.at(3, 2), m.at(2, 3));
        assert_eq!(t.transposed_matrix(), m);
    }
}
