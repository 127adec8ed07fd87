use thiserror::Error;

use crate::SolverMethod;

/// Error type for this crate.
///
/// Each variant corresponds to a distinct failure
/// of the matrix algebra, of a solver, or of
/// loading a [`Problem`](crate::Problem).
///
/// # Example
///
/// This system is singular, so Gauss elimination
/// gives [`SoleError::SingularMatrix`](crate::SoleError::SingularMatrix).
///
/// ```
/// let a = sole::Matrix::try_from(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
/// let b = sole::Matrix::column(&[1.0, 2.0]);
/// let mut system = sole::LinearSystem::new(a, b);
/// assert!(matches!(
///     system.solve(sole::SolverMethod::GaussElimination),
///     Err(sole::SoleError::SingularMatrix { .. })
/// ));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SoleError {
    /// Operand shapes are incompatible.
    /// Shapes are `(nrows, ncols)`.
    #[error("matrix dimensions must agree: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// The shape required by the operation
        expected: (usize, usize),
        /// The shape that was supplied
        got: (usize, usize),
    },
    /// A requested shape cannot exist.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    /// The pivot at `pivot` is at or below [`EPSILON`](crate::EPSILON)
    /// after partial pivoting.
    #[error("matrix is singular or nearly singular: |pivot {pivot}| = {value}")]
    SingularMatrix {
        /// Index of the pivot row
        pivot: usize,
        /// Absolute value of the pivot
        value: f64,
    },
    /// The method is declared but has no algorithm.
    #[error("solver method not implemented: {0}")]
    NotImplemented(SolverMethod),
    /// The method token is not recognized.
    #[error("unsupported solver method: {0:?}")]
    UnsupportedMethod(String),
    /// Division by zero or a non-finite iterate.
    #[error("domain error: {0}")]
    DomainError(String),
    /// Errors related to input values
    #[error("{0:?}")]
    ValueError(String),
    #[error(transparent)]
    /// Errors coming from `serde_yaml`.
    YamlError(#[from] serde_yaml::Error),
    #[cfg(feature = "json")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
    #[error(transparent)]
    /// Errors coming from `serde_json`.
    JsonError(#[from] serde_json::Error),
}

impl SoleError {
    pub(crate) fn dimension_mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, got }
    }
}
