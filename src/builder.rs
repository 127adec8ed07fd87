use crate::error::SoleError;
use crate::traits::Validate;
use crate::LinearSystem;
use crate::Matrix;

/// Check that `a` is n by n, `b` is n by 1, the optional
/// initial guess is n by 1, and all entries are finite.
pub(crate) fn validate_system_parts(
    a: &Matrix,
    b: &Matrix,
    initial_guess: Option<&Matrix>,
) -> Result<(), SoleError> {
    let n = a.nrows();
    if n == 0 {
        return Err(SoleError::ValueError(
            "a system needs at least one equation".to_string(),
        ));
    }
    if a.ncols() != n {
        return Err(SoleError::dimension_mismatch((n, n), a.shape()));
    }
    if b.shape() != (n, 1) {
        return Err(SoleError::dimension_mismatch((n, 1), b.shape()));
    }
    a.validate(SoleError::ValueError)?;
    b.validate(SoleError::ValueError)?;
    if let Some(guess) = initial_guess {
        if guess.shape() != (n, 1) {
            return Err(SoleError::dimension_mismatch((n, 1), guess.shape()));
        }
        guess.validate(SoleError::ValueError)?;
    }
    Ok(())
}

/// This type allows building a [`LinearSystem`](crate::LinearSystem)
/// one equation at a time.
///
/// # Notes
///
/// * [`LinearSystem::new`](crate::LinearSystem::new) trusts
///   its input. The builder is the checked alternative:
///   all error checks are delayed until [`SystemBuilder::resolve`].
///
/// # Examples
///
/// ```
/// let mut b = sole::SystemBuilder::new();
/// // 2x + y = 3
/// b.add_equation(&[2.0, 1.0], 3.0);
/// // x + 3y = 5, given as an augmented row
/// b.add_augmented_row(&[1.0, 3.0, 5.0]);
/// let mut system = b.resolve().unwrap();
/// system.solve(sole::SolverMethod::GaussElimination).unwrap();
/// assert!((system.x()[(0, 0)] - 0.8).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SystemBuilder {
    coefficients: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    initial_guess: Option<Vec<f64>>,
    iterations: Option<usize>,
    invalid_rows: Vec<usize>,
}

impl SystemBuilder {
    /// Constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the equation `coefficients . x = rhs`.
    pub fn add_equation(&mut self, coefficients: &[f64], rhs: f64) {
        self.coefficients.push(coefficients.to_vec());
        self.rhs.push(rhs);
    }

    /// Add an equation from a row of the augmented matrix `[A | B]`.
    ///
    /// The last value is the right-hand side.
    /// An empty row is reported when resolving.
    pub fn add_augmented_row(&mut self, row: &[f64]) {
        match row.split_last() {
            Some((rhs, coefficients)) => self.add_equation(coefficients, *rhs),
            None => self.invalid_rows.push(self.coefficients.len()),
        }
    }

    /// Set the initial guess used by iterative methods.
    pub fn initial_guess(&mut self, values: &[f64]) {
        self.initial_guess = Some(values.to_vec());
    }

    /// Set the number of rounds used by iterative methods.
    pub fn iterations(&mut self, n_iter: usize) {
        self.iterations = Some(n_iter);
    }

    /// Generate and return a [`LinearSystem`](crate::LinearSystem).
    ///
    /// # Errors
    ///
    /// * [`SoleError::ValueError`] if there are no equations,
    ///   rows have different lengths, or a value is not finite.
    /// * [`SoleError::DimensionMismatch`] if the coefficient
    ///   matrix is not square or the initial guess has the
    ///   wrong length.
    pub fn resolve(self) -> Result<LinearSystem, SoleError> {
        if let Some(row) = self.invalid_rows.first() {
            let msg = format!("augmented row {} must contain a right-hand side", row);
            return Err(SoleError::ValueError(msg));
        }
        let a = Matrix::try_from(self.coefficients)?;
        let b = Matrix::column(&self.rhs);
        let guess = self.initial_guess.as_deref().map(Matrix::column);
        validate_system_parts(&a, &b, guess.as_ref())?;

        let mut system = LinearSystem::new(a, b);
        if let Some(n_iter) = self.iterations {
            system.set_iterations(n_iter);
        }
        if let Some(guess) = guess {
            system.reset(guess)?;
        }
        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn new_builder() {
        let b = SystemBuilder::new();
        b.resolve().unwrap();
    }

    #[test]
    fn build_with_guess_and_iterations() {
        let mut b = SystemBuilder::new();
        b.add_equation(&[4.0, 1.0], 1.0);
        b.add_equation(&[2.0, 3.0], 2.0);
        b.initial_guess(&[0.5, 0.5]);
        b.iterations(3);
        let system = b.resolve().unwrap();
        assert_eq!(system.iterations(), 3);
        assert_eq!(system.x(), &Matrix::column(&[0.5, 0.5]));
        assert_eq!(system.b(), &Matrix::column(&[1.0, 2.0]));
    }

    #[test]
    fn ragged_equations() {
        let mut b = SystemBuilder::new();
        b.add_equation(&[4.0, 1.0], 1.0);
        b.add_equation(&[2.0], 2.0);
        assert!(matches!(b.resolve(), Err(SoleError::ValueError(_))));
    }

    #[test]
    fn non_square() {
        let mut b = SystemBuilder::new();
        b.add_equation(&[4.0, 1.0, 1.0], 1.0);
        b.add_equation(&[2.0, 3.0, 1.0], 2.0);
        assert!(matches!(
            b.resolve(),
            Err(SoleError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn wrong_guess_length() {
        let mut b = SystemBuilder::new();
        b.add_augmented_row(&[4.0, 1.0, 1.0]);
        b.add_augmented_row(&[2.0, 3.0, 2.0]);
        b.initial_guess(&[0.0]);
        assert!(matches!(
            b.resolve(),
            Err(SoleError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_augmented_row() {
        let mut b = SystemBuilder::new();
        b.add_augmented_row(&[]);
        assert!(matches!(b.resolve(), Err(SoleError::ValueError(_))));
    }

    #[test]
    fn non_finite_value() {
        let mut b = SystemBuilder::new();
        b.add_equation(&[f64::NAN], 1.0);
        assert!(matches!(b.resolve(), Err(SoleError::ValueError(_))));
    }
}
