//! Solve systems of linear equations `A * X = B`.
//!
//! A [`LinearSystem`] holds a square coefficient matrix,
//! a right-hand side column, and the current solution.
//! It can be solved directly by Gauss elimination with
//! partial pivoting or refined by a fixed number of
//! Jacobi iterations.
//!
//! ```
//! let a = sole::Matrix::try_from(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let b = sole::Matrix::column(&[3.0, 5.0]);
//! let mut system = sole::LinearSystem::new(a, b);
//! system.solve(sole::SolverMethod::GaussElimination).unwrap();
//! assert!(sole::Matrix::approx_eq(
//!     system.x(),
//!     &sole::Matrix::column(&[0.8, 1.4]),
//!     1e-12
//! ));
//! ```
//!
//! # Logging
//!
//! Solvers report progress through the [`log`] facade.
//! No logger is installed by this crate.
//!
//! # Optional features
//!
//! * `json`: load a [`Problem`] from `JSON` input.

#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]

mod macros;

mod builder;
mod error;
mod matrix;
mod method;
mod problem;
mod residual;
mod system;
mod traits;

use std::io::Read;

pub use builder::SystemBuilder;
pub use error::SoleError;
pub use matrix::Matrix;
pub use method::SolverMethod;
pub use problem::{Problem, Solution};
pub use residual::Residual;
pub use system::{LinearSystem, DEFAULT_INITIAL_GUESS, DEFAULT_ITERATIONS, EPSILON};

/// Load a [`Problem`] from a YAML string.
///
/// # Errors
///
/// [`SoleError`] if the input is not valid YAML,
/// does not describe a problem, or the problem
/// fails [`Problem::validate`].
pub fn loads(yaml: &str) -> Result<Problem, SoleError> {
    Problem::new_from_str(yaml)
}

/// Load a [`Problem`] from a YAML reader.
///
/// # Errors
///
/// See [`loads`].
pub fn load<T: Read>(reader: T) -> Result<Problem, SoleError> {
    Problem::new_from_reader(reader)
}

/// Load a [`Problem`] from a JSON string.
#[cfg(feature = "json")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
pub fn loads_json(json: &str) -> Result<Problem, SoleError> {
    Problem::new_from_json_str(json)
}

/// Load a [`Problem`] from a JSON reader.
#[cfg(feature = "json")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
pub fn load_json<T: Read>(reader: T) -> Result<Problem, SoleError> {
    Problem::new_from_json_reader(reader)
}
