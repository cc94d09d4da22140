//! Mapping of logical `(row, column)` positions onto linear storage.
//!
//! [`Matrix`][crate::Matrix] stores its elements column by column and addresses all of them
//! through [`column_major_offset`], with a stride equal to its row count. [`row_major_offset`] is
//! provided for consumers that lay out data the other way (for example when exchanging data with
//! an API that expects rows to be contiguous).

/// Returns the linear index of `(row, col)` in row-major storage with `stride` columns per row.
///
/// ```
/// # use dream_linalg::offset::row_major_offset;
/// assert_eq!(row_major_offset(1, 2, 4), 6);
/// ```
#[inline]
pub const fn row_major_offset(row: usize, col: usize, stride: usize) -> usize {
    row * stride + col
}

/// Returns the linear index of `(row, col)` in column-major storage with `stride` rows per column.
///
/// ```
/// # use dream_linalg::offset::column_major_offset;
/// assert_eq!(column_major_offset(1, 2, 4), 9);
/// ```
#[inline]
pub const fn column_major_offset(row: usize, col: usize, stride: usize) -> usize {
    col * stride + row
}
