//! Recoverable failures of matrix construction and inversion.
//!
//! Out-of-range element access is a programmer error and panics instead (see
//! [`Matrix::at`][crate::Matrix::at]); the checked alternatives return [`Option`].

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by fallible linear-algebra operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The matrix has no inverse.
    ///
    /// Returned by [`Inverse::inverse_matrix`][crate::Inverse::inverse_matrix] when the
    /// determinant is zero or not finite.
    ///
    /// ```
    /// use dream_linalg::{Error, Inverse, Mat44};
    ///
    /// let err = Mat44::ZERO.inverse_matrix().unwrap_err();
    /// assert_eq!(err, Error::Singular { determinant: 0.0 });
    /// assert!(err.to_string().contains("singular"));
    /// ```
    #[error("matrix is singular (determinant {determinant})")]
    Singular {
        /// The offending determinant, widened to `f64`.
        determinant: f64,
    },

    /// No rotation is defined for the given vectors.
    #[error("degenerate rotation: {reason}")]
    DegenerateRotation {
        /// What made the input degenerate.
        reason: &'static str,
    },

    /// A raw slice did not have exactly as many elements as the matrix stores.
    #[error("expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Number of scalars in the matrix (`R * C`)
        expected: usize,
        /// Length of the slice that was passed in
        actual: usize,
    },
}

impl Error {
    pub(crate) fn singular<T: Into<f64>>(determinant: T) -> Self {
        Self::Singular {
            determinant: determinant.into(),
        }
    }

    pub(crate) fn degenerate(reason: &'static str) -> Self {
        Self::DegenerateRotation { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::LengthMismatch {
            expected: 16,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 16 elements, got 3");

        let err = Error::degenerate("zero-length vector");
        assert_eq!(err.to_string(), "degenerate rotation: zero-length vector");

        let err = Error::singular(0.0f32);
        assert_eq!(err, Error::Singular { determinant: 0.0 });
    }

    #[test]
    fn is_std_error() {
        fn check<E: std::error::Error + Send + Sync + 'static>(_: E) {}
        check(Error::singular(f64::NAN));
    }
}
