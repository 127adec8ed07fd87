//! Serializable descriptions of a system
//! of linear equations and of its solution.

use crate::builder::validate_system_parts;
use crate::error::SoleError;
use crate::LinearSystem;
use crate::Matrix;
use crate::Residual;
use crate::SolverMethod;
use crate::DEFAULT_ITERATIONS;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A system of linear equations together with
/// the settings needed to solve it.
///
/// # Examples
///
/// ## In a `YAML` record
///
/// ```
/// let yaml = "
/// method: jacobi
/// iterations: 25
/// a: [[4, 1], [2, 3]]
/// b: [[1], [2]]
/// initial_guess: [[0], [0]]
/// ";
/// let problem = sole::loads(yaml).unwrap();
/// let solution = problem.solve().unwrap();
/// assert!(solution.residual < 1e-3);
/// ```
///
/// ## Using rust code
///
/// ```
/// let a = sole::Matrix::try_from(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
/// let b = sole::Matrix::column(&[3.0, 5.0]);
/// let solution = sole::Problem::new(a, b).solve().unwrap();
/// assert_eq!(solution.method, sole::SolverMethod::GaussElimination);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    /// Free text describing the problem.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The solver to use.
    /// If `None`, [`Problem::solve`] uses Gauss elimination.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<SolverMethod>,
    /// Rounds for iterative methods.
    /// If `None`, [`DEFAULT_ITERATIONS`](crate::DEFAULT_ITERATIONS).
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// Coefficient matrix
    pub a: Matrix,
    /// Right-hand side column
    pub b: Matrix,
    /// Starting point for iterative methods.
    /// If `None`, iteration starts from zero.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<Matrix>,
}

impl Problem {
    /// Constructor
    pub fn new(a: Matrix, b: Matrix) -> Self {
        Self {
            description: None,
            method: None,
            iterations: None,
            a,
            b,
            initial_guess: None,
        }
    }

    pub(crate) fn new_from_str(yaml: &'_ str) -> Result<Self, SoleError> {
        let p: Self = serde_yaml::from_str(yaml)?;
        p.validate()?;
        Ok(p)
    }

    pub(crate) fn new_from_reader<T: Read>(reader: T) -> Result<Self, SoleError> {
        let p: Self = serde_yaml::from_reader(reader)?;
        p.validate()?;
        Ok(p)
    }

    #[cfg(feature = "json")]
    pub(crate) fn new_from_json_str(json: &'_ str) -> Result<Self, SoleError> {
        let p: Self = serde_json::from_str(json)?;
        p.validate()?;
        Ok(p)
    }

    #[cfg(feature = "json")]
    pub(crate) fn new_from_json_reader<T: Read>(reader: T) -> Result<Self, SoleError> {
        let p: Self = serde_json::from_reader(reader)?;
        p.validate()?;
        Ok(p)
    }

    /// Check that `a` is square, that `b` and `initial_guess`
    /// are columns of matching length, and that all values are finite.
    pub fn validate(&self) -> Result<(), SoleError> {
        validate_system_parts(&self.a, &self.b, self.initial_guess.as_ref())
    }

    /// The method [`Problem::solve`] will use.
    pub fn method(&self) -> SolverMethod {
        self.method.unwrap_or(SolverMethod::GaussElimination)
    }

    /// Generate a [`LinearSystem`](crate::LinearSystem)
    /// seeded with the initial guess, if any.
    pub fn into_system(self) -> Result<LinearSystem, SoleError> {
        self.validate()?;
        let mut system = LinearSystem::new(self.a, self.b);
        system.set_iterations(self.iterations.unwrap_or(DEFAULT_ITERATIONS));
        if let Some(guess) = self.initial_guess {
            system.reset(guess)?;
        }
        Ok(system)
    }

    /// Solve with [`Problem::method`].
    pub fn solve(self) -> Result<Solution, SoleError> {
        let method = self.method();
        let mut system = self.into_system()?;
        system.solve(method)?;
        Solution::new(method, &system)
    }

    /// Return a representation of the problem as a YAML string.
    pub fn as_string(&self) -> Result<String, SoleError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// The result of solving a [`Problem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// The method used
    pub method: SolverMethod,
    /// Rounds used, zero for direct methods
    pub iterations: usize,
    /// The solution column
    pub x: Matrix,
    /// `|A * X - B|`
    pub residual: Residual,
}

impl Solution {
    /// Record the current state of `system`.
    pub fn new(method: SolverMethod, system: &LinearSystem) -> Result<Self, SoleError> {
        let iterations = if method.is_iterative() {
            system.iterations()
        } else {
            0
        };
        Ok(Self {
            method,
            iterations,
            x: system.x().clone(),
            residual: system.residual_magnitude()?,
        })
    }

    /// Return a representation of the solution as a YAML string.
    pub fn as_string(&self) -> Result<String, SoleError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Return a representation of the solution as a JSON string.
    #[cfg(feature = "json")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
    pub fn as_json_string(&self) -> Result<String, SoleError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.as_string().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_one() -> Problem {
        let yaml = "
a: [[2, 1], [1, 3]]
b: [[3], [5]]
";
        Problem::new_from_str(yaml).unwrap()
    }

    #[test]
    fn defaults() {
        let p = scenario_one();
        assert!(p.method.is_none());
        assert_eq!(p.method(), SolverMethod::GaussElimination);
        let system = p.into_system().unwrap();
        assert_eq!(system.iterations(), DEFAULT_ITERATIONS);
        assert_eq!(system.x(), &Matrix::zeros(2, 1));
    }

    #[test]
    fn gauss_solution_reports_zero_iterations() {
        let s = scenario_one().solve().unwrap();
        assert_eq!(s.iterations, 0);
        assert!(Matrix::approx_eq(&s.x, &Matrix::column(&[0.8, 1.4]), 1e-12));
    }

    #[test]
    fn unknown_field() {
        let yaml = "
a: [[1]]
b: [[1]]
tolerance: 1e-6
";
        assert!(matches!(
            Problem::new_from_str(yaml),
            Err(SoleError::YamlError(_))
        ));
    }

    #[test]
    fn problem_round_trips_through_yaml() {
        let mut p = scenario_one();
        p.method = Some(SolverMethod::JacobiIteration);
        p.iterations = Some(4);
        p.description = Some("2x + y = 3, x + 3y = 5".to_string());
        let yaml = p.as_string().unwrap();
        assert_eq!(Problem::new_from_str(&yaml).unwrap(), p);
    }

    #[test]
    fn display_solution() {
        let s = scenario_one().solve().unwrap();
        let text = format!("{s}");
        assert!(text.contains("method: gauss"));
        assert!(text.contains("residual:"));
    }
}
