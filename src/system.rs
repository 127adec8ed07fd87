use crate::error::SoleError;
use crate::Matrix;
use crate::Residual;
use crate::SolverMethod;

/// Absolute tolerance below which a pivot or
/// diagonal entry is treated as zero.
///
/// # Note
///
/// This is an absolute threshold.
/// A well-posed system whose entries are all
/// of order `EPSILON` or smaller will be reported
/// as singular; rescale such systems before solving.
pub const EPSILON: f64 = 1e-5;

/// Iteration count used for iterative methods
/// when none is given in a [`Problem`](crate::Problem).
pub const DEFAULT_ITERATIONS: usize = 10;

/// Value used by [`LinearSystem::reset_to_constant`]
/// callers that have no better initial guess.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.001;

/// A system of linear equations `A * X = B`.
///
/// The system owns the coefficient matrix `A` (n by n),
/// the right-hand side `B` (n by 1), the current
/// solution estimate `X` (n by 1), and the number of
/// rounds used by iterative methods.
///
/// # Notes
///
/// * `A` and `B` are never modified by [`LinearSystem::solve`].
/// * `X` is only replaced when a solve succeeds.
/// * Iterative methods start from the current `X`.
///   Calling `solve` repeatedly therefore continues
///   to refine the previous result.
///   Use [`LinearSystem::reset`] to start over.
///
/// # Examples
///
/// ```
/// let a = sole::Matrix::try_from(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap();
/// let b = sole::Matrix::column(&[1.0, 2.0]);
/// let mut system = sole::LinearSystem::new(a, b);
/// system.set_iterations(25);
/// system.solve(sole::SolverMethod::JacobiIteration).unwrap();
/// assert!(system.residual_magnitude().unwrap() < 1e-3);
/// ```
#[derive(Clone, Debug)]
pub struct LinearSystem {
    a: Matrix,
    b: Matrix,
    x: Matrix,
    n_iter: usize,
}

impl LinearSystem {
    /// Constructor
    ///
    /// `X` starts as a zero column with one row per column of `a`,
    /// and the iteration count starts at zero.
    pub fn new(a: Matrix, b: Matrix) -> Self {
        let x = Matrix::zeros(a.ncols(), 1);
        Self { a, b, x, n_iter: 0 }
    }

    /// The coefficient matrix.
    pub fn a(&self) -> &Matrix {
        &self.a
    }

    /// The right-hand side.
    pub fn b(&self) -> &Matrix {
        &self.b
    }

    /// The current solution estimate.
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    /// The number of rounds used by iterative methods.
    pub fn iterations(&self) -> usize {
        self.n_iter
    }

    pub fn set_iterations(&mut self, n_iter: usize) {
        self.n_iter = n_iter;
    }

    /// Replace the current solution estimate.
    ///
    /// # Errors
    ///
    /// [`SoleError::DimensionMismatch`] if `seed` does
    /// not have the shape of [`LinearSystem::x`].
    pub fn reset(&mut self, seed: Matrix) -> Result<(), SoleError> {
        if !seed.has_shape_of(&self.x) {
            return Err(SoleError::dimension_mismatch(self.x.shape(), seed.shape()));
        }
        self.x = seed;
        Ok(())
    }

    /// Set every entry of the current solution estimate to `value`.
    pub fn reset_to_constant(&mut self, value: f64) {
        self.x = Matrix::shifted_by(&Matrix::zeros(self.x.nrows(), 1), value);
    }

    /// The residual `A * X - B`.
    ///
    /// This is the zero vector if and only if `X`
    /// solves the system exactly.
    pub fn residual_vector(&self) -> Result<Matrix, SoleError> {
        let ax = Matrix::product(&self.a, &self.x)?;
        Matrix::difference(&ax, &self.b)
    }

    /// The Euclidean norm of [`LinearSystem::residual_vector`].
    pub fn residual_magnitude(&self) -> Result<Residual, SoleError> {
        let r = self.residual_vector()?;
        let sum_of_squares: f64 = r.column_values(0).iter().map(|v| v * v).sum();
        Ok(Residual::from(sum_of_squares.sqrt()))
    }

    /// Solve the system, replacing [`LinearSystem::x`].
    ///
    /// # Errors
    ///
    /// * [`SoleError::DimensionMismatch`] if `A` is not n by n
    ///   or `B` is not n by 1, where n is the length of `X`.
    /// * [`SoleError::SingularMatrix`] from Gauss elimination.
    /// * [`SoleError::DomainError`] from Jacobi iteration.
    /// * [`SoleError::NotImplemented`] for
    ///   [`SolverMethod::GaussSeidelRelaxation`].
    ///
    /// On error, `X` is left unchanged.
    pub fn solve(&mut self, method: SolverMethod) -> Result<(), SoleError> {
        log::debug!(
            "solving {:?} system by {} with {} iterations",
            self.a.shape(),
            method,
            self.n_iter
        );
        let x = match method {
            SolverMethod::GaussElimination => self.gauss_elimination()?,
            SolverMethod::JacobiIteration => self.jacobi_iteration()?,
            SolverMethod::GaussSeidelRelaxation => {
                return Err(SoleError::NotImplemented(method));
            }
        };
        self.x = x;
        if log::log_enabled!(log::Level::Debug) {
            if let Ok(residual) = self.residual_magnitude() {
                log::debug!("solved by {}: |AX - B| = {}", method, residual);
            }
        }
        Ok(())
    }

    /// Solve using the method identified by `token`.
    ///
    /// # Errors
    ///
    /// [`SoleError::UnsupportedMethod`] if the token
    /// is not recognized, leaving `X` unchanged.
    /// Otherwise, see [`LinearSystem::solve`].
    pub fn solve_token(&mut self, token: &str) -> Result<(), SoleError> {
        let method = token.parse::<SolverMethod>().map_err(|e| {
            log::warn!("ignoring unsupported solver method {:?}", token);
            e
        })?;
        self.solve(method)
    }

    fn check_shapes(&self) -> Result<usize, SoleError> {
        let n = self.x.nrows();
        if self.a.shape() != (n, n) {
            return Err(SoleError::dimension_mismatch((n, n), self.a.shape()));
        }
        if self.b.shape() != (n, 1) {
            return Err(SoleError::dimension_mismatch((n, 1), self.b.shape()));
        }
        Ok(n)
    }

    // Works on copies of A and B so that a singular
    // system leaves the stored state untouched.
    fn gauss_elimination(&self) -> Result<Matrix, SoleError> {
        let n = self.check_shapes()?;
        let mut a = self.a.clone();
        let mut b = self.b.clone();

        for p in 0..n {
            // partial pivoting, first row wins ties
            let mut max = p;
            for i in (p + 1)..n {
                if a[(i, p)].abs() > a[(max, p)].abs() {
                    max = i;
                }
            }
            a.swap_rows(p, max);
            b.swap_rows(p, max);

            let pivot = a[(p, p)];
            if pivot.abs() <= EPSILON {
                log::warn!("pivot {} is {}, system is singular", p, pivot);
                return Err(SoleError::SingularMatrix {
                    pivot: p,
                    value: pivot.abs(),
                });
            }

            for i in (p + 1)..n {
                let alpha = a[(i, p)] / pivot;
                let update = alpha * b[(p, 0)];
                b[(i, 0)] -= update;
                for j in p..n {
                    let update = alpha * a[(p, j)];
                    a[(i, j)] -= update;
                }
            }
        }

        let mut x = Matrix::zeros(n, 1);
        for i in (0..n).rev() {
            let sum: f64 = ((i + 1)..n).map(|j| a[(i, j)] * x[(j, 0)]).sum();
            x[(i, 0)] = (b[(i, 0)] - sum) / a[(i, i)];
        }
        Ok(x)
    }

    // Always runs exactly n_iter rounds; there is no convergence test.
    fn jacobi_iteration(&self) -> Result<Matrix, SoleError> {
        let n = self.check_shapes()?;
        let a = &self.a;
        let b = &self.b;

        if self.n_iter > 0 {
            if let Some(i) = (0..n).find(|&i| a[(i, i)].abs() <= EPSILON) {
                return Err(SoleError::DomainError(format!(
                    "diagonal entry {} is {}, cannot divide by it",
                    i,
                    a[(i, i)]
                )));
            }
        }

        let mut previous = self.x.clone();
        let mut current = self.x.clone();

        for round in 0..self.n_iter {
            for i in 0..n {
                let mut value = b[(i, 0)];
                for j in (0..n).filter(|&j| j != i) {
                    value -= a[(i, j)] * previous[(j, 0)];
                }
                value /= a[(i, i)];
                if !value.is_finite() {
                    return Err(SoleError::DomainError(format!(
                        "entry {} became {} in round {}",
                        i, value, round
                    )));
                }
                current[(i, 0)] = value;
            }
            previous.clone_from(&current);
            log::trace!("jacobi round {}: X = {:?}", round, current.column_values(0));
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(a: Vec<Vec<f64>>, b: &[f64]) -> LinearSystem {
        LinearSystem::new(Matrix::try_from(a).unwrap(), Matrix::column(b))
    }

    #[test]
    fn new_system_has_zero_solution() {
        let s = system(vec![vec![2.0, 1.0], vec![1.0, 3.0]], &[3.0, 5.0]);
        assert_eq!(s.x(), &Matrix::zeros(2, 1));
        assert_eq!(s.iterations(), 0);
        // residual of the zero vector is |B|
        assert_eq!(s.residual_vector().unwrap(), Matrix::column(&[-3.0, -5.0]));
    }

    #[test]
    fn gauss_leaves_inputs_untouched() {
        let mut s = system(vec![vec![1.0, 3.0], vec![4.0, 2.0]], &[5.0, 6.0]);
        let a = s.a().clone();
        let b = s.b().clone();
        s.solve(SolverMethod::GaussElimination).unwrap();
        assert_eq!(s.a(), &a);
        assert_eq!(s.b(), &b);
        assert!(Matrix::approx_eq(s.x(), &Matrix::column(&[0.8, 1.4]), 1e-12));
    }

    #[test]
    fn singular_leaves_x_untouched() {
        let mut s = system(vec![vec![1.0, 2.0], vec![2.0, 4.0]], &[1.0, 1.0]);
        s.reset_to_constant(DEFAULT_INITIAL_GUESS);
        let before = s.x().clone();
        let result = s.solve(SolverMethod::GaussElimination);
        assert!(matches!(result, Err(SoleError::SingularMatrix { pivot: 1, .. })));
        assert_eq!(s.x(), &before);
    }

    #[test]
    fn jacobi_zero_rounds_keeps_seed() {
        let mut s = system(vec![vec![0.0, 1.0], vec![1.0, 0.0]], &[1.0, 1.0]);
        s.reset(Matrix::column(&[7.0, 8.0])).unwrap();
        s.solve(SolverMethod::JacobiIteration).unwrap();
        assert_eq!(s.x(), &Matrix::column(&[7.0, 8.0]));
    }

    #[test]
    fn jacobi_uses_previous_round_only() {
        // one round from zero: x_i = b_i / a_ii regardless of row order
        let mut s = system(vec![vec![2.0, 1.0], vec![1.0, 4.0]], &[2.0, 8.0]);
        s.set_iterations(1);
        s.solve(SolverMethod::JacobiIteration).unwrap();
        assert_eq!(s.x(), &Matrix::column(&[1.0, 2.0]));
    }

    #[test]
    fn jacobi_divergence_is_a_domain_error() {
        let mut s = system(vec![vec![1.0, 1e200], vec![1e200, 1.0]], &[1.0, 1.0]);
        s.set_iterations(5);
        let result = s.solve(SolverMethod::JacobiIteration);
        assert!(matches!(result, Err(SoleError::DomainError(_))));
        assert_eq!(s.x(), &Matrix::zeros(2, 1));
    }

    #[test]
    fn reset_requires_matching_shape() {
        let mut s = system(vec![vec![2.0, 1.0], vec![1.0, 3.0]], &[3.0, 5.0]);
        assert!(matches!(
            s.reset(Matrix::zeros(3, 1)),
            Err(SoleError::DimensionMismatch { .. })
        ));
        s.reset_to_constant(0.5);
        assert_eq!(s.x(), &Matrix::column(&[0.5, 0.5]));
    }

    #[test]
    fn non_square_a_is_rejected() {
        let mut s = LinearSystem::new(Matrix::zeros(3, 2), Matrix::zeros(3, 1));
        assert!(matches!(
            s.solve(SolverMethod::GaussElimination),
            Err(SoleError::DimensionMismatch { .. })
        ));
    }
}
