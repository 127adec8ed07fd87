use crate::error::SoleError;
use serde::{Deserialize, Serialize};

/// The algorithm used by [`LinearSystem::solve`](crate::LinearSystem::solve).
///
/// # Examples
///
/// Methods can be parsed from their tokens:
///
/// ```
/// let m: sole::SolverMethod = "jacobi".parse().unwrap();
/// assert_eq!(m, sole::SolverMethod::JacobiIteration);
/// assert_eq!(m.to_string(), "jacobi");
/// assert!("cholesky".parse::<sole::SolverMethod>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Direct solution by Gauss elimination with partial pivoting.
    #[serde(rename = "gauss")]
    GaussElimination,
    /// Fixed number of Jacobi iterations.
    #[serde(rename = "jacobi")]
    JacobiIteration,
    /// Gauss-Seidel relaxation.
    ///
    /// Declared so that client code can select it,
    /// but solving with it returns [`SoleError::NotImplemented`].
    #[serde(rename = "gauss-seidel")]
    GaussSeidelRelaxation,
}

impl SolverMethod {
    /// The token identifying this method.
    pub fn token(&self) -> &'static str {
        match self {
            SolverMethod::GaussElimination => "gauss",
            SolverMethod::JacobiIteration => "jacobi",
            SolverMethod::GaussSeidelRelaxation => "gauss-seidel",
        }
    }

    /// `true` for methods that refine the current solution
    /// over [`LinearSystem::iterations`](crate::LinearSystem::iterations) rounds.
    pub fn is_iterative(&self) -> bool {
        match self {
            SolverMethod::GaussElimination => false,
            SolverMethod::JacobiIteration | SolverMethod::GaussSeidelRelaxation => true,
        }
    }
}

impl std::str::FromStr for SolverMethod {
    type Err = SoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gauss" => Ok(Self::GaussElimination),
            "jacobi" => Ok(Self::JacobiIteration),
            "gauss-seidel" => Ok(Self::GaussSeidelRelaxation),
            _ => Err(SoleError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
