use serde::{Deserialize, Serialize};

/// The Euclidean norm of the residual `A * X - B`.
///
/// This is a newtype wrapper for [`f64`](std::primitive::f64)
/// and is the single scalar a caller needs to judge
/// the quality of a solution.
///
/// # Examples
///
/// ```
/// let a = sole::Matrix::try_from(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
/// let b = sole::Matrix::column(&[3.0, 5.0]);
/// let mut system = sole::LinearSystem::new(a, b);
/// system.solve(sole::SolverMethod::GaussElimination).unwrap();
/// let residual = system.residual_magnitude().unwrap();
/// assert!(residual < 1e-9);
/// assert!(f64::from(residual) >= 0.0);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(from = "f64", into = "f64")]
pub struct Residual(f64);

impl From<f64> for Residual {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Residual {
    /// `true` if the residual is at or below `tolerance`.
    pub fn is_within(&self, tolerance: f64) -> bool {
        self.0 <= tolerance
    }
}

impl_newtype_traits!(Residual);
