use crate::error::SoleError;
use crate::traits::Validate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A dense, row-major matrix of [`f64`](std::primitive::f64).
///
/// A `Matrix` is a value type: every algebraic operation
/// returns a new instance and never modifies its operands.
/// Cells can only be changed in place through
/// [`Matrix::set`], [`IndexMut`](std::ops::IndexMut),
/// or [`Matrix::swap_rows`].
///
/// # Notes
///
/// * All rows have the same length.
///   Input rows of unequal length are rejected
///   by `TryFrom<Vec<Vec<f64>>>`.
/// * The number of columns is the length of the first row,
///   or zero for a matrix without rows.
///
/// # Examples
///
/// ## Using rust code
///
/// ```
/// let a = sole::Matrix::try_from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(a.shape(), (2, 2));
/// let t = sole::Matrix::transpose(&a);
/// assert_eq!(t[(0, 1)], 3.0);
/// let i = sole::Matrix::identity(2);
/// assert_eq!(sole::Matrix::product(&i, &a).unwrap(), a);
/// ```
///
/// ## In a `YAML` record
///
/// A matrix is a sequence of rows:
///
/// ```
/// let a: sole::Matrix = serde_yaml::from_str("[[1, 2], [3, 4]]").unwrap();
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = SoleError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        if let Some(first) = rows.first() {
            let ncols = first.len();
            if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
                let msg = format!(
                    "all rows must have {} columns, row {} has {}",
                    ncols,
                    i,
                    row.len()
                );
                return Err(SoleError::ValueError(msg));
            }
        }
        Ok(Self { rows })
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(value: Matrix) -> Self {
        value.rows
    }
}

impl Matrix {
    /// A matrix of the given shape with every cell set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: f64) -> Self {
        Self {
            rows: vec![vec![value; ncols]; nrows],
        }
    }

    /// A matrix of the given shape with every cell set to zero.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::filled(nrows, ncols, 0.0)
    }

    /// Like [`Matrix::zeros`], for dimensions coming from signed input.
    ///
    /// # Errors
    ///
    /// [`SoleError::InvalidShape`] if either dimension is negative.
    pub fn try_zeros(nrows: i64, ncols: i64) -> Result<Self, SoleError> {
        match (usize::try_from(nrows), usize::try_from(ncols)) {
            (Ok(nrows), Ok(ncols)) => Ok(Self::zeros(nrows, ncols)),
            _ => Err(SoleError::InvalidShape(format!(
                "dimensions must be non-negative, got: ({}, {})",
                nrows, ncols
            ))),
        }
    }

    /// The `n` by `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.rows[i][i] = 1.0;
        }
        m
    }

    /// A column vector, i.e. a `values.len()` by 1 matrix.
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// A matrix whose cells are drawn uniformly from `[0, 1)`.
    ///
    /// Uses the thread-local generator from [`rand::rng`].
    pub fn random(nrows: usize, ncols: usize) -> Self {
        Self::random_with_rng(&mut rand::rng(), nrows, ncols)
    }

    /// Like [`Matrix::random`], drawing from `rng`.
    pub fn random_with_rng<R: Rng + ?Sized>(rng: &mut R, nrows: usize, ncols: usize) -> Self {
        let rows: Vec<Vec<f64>> = (0..nrows)
            .map(|_| (0..ncols).map(|_| rng.random::<f64>()).collect())
            .collect();
        Self { rows }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// `(nrows, ncols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// `true` if `self` and `other` have the same number of rows and columns.
    pub fn has_shape_of(&self, other: &Matrix) -> bool {
        self.shape() == other.shape()
    }

    /// `true` if `a` and `b` agree in dimensions.
    pub fn have_equal_shape(a: &Matrix, b: &Matrix) -> bool {
        a.has_shape_of(b)
    }

    /// The value at `(row, column)`, or `None` if out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Assign the value at `(row, column)`.
    ///
    /// # Panics
    ///
    /// If `(row, column)` is out of range.
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        self.rows[row][column] = value;
    }

    /// # Panics
    ///
    /// If `row` is out of range.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    /// # Panics
    ///
    /// If `row` is out of range.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.rows[row]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Copy out the values of one column.
    ///
    /// # Panics
    ///
    /// If `column` is out of range.
    pub fn column_values(&self, column: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[column]).collect()
    }

    /// # Panics
    ///
    /// If either index is out of range.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j)
    }

    fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&v| f(v)).collect())
                .collect(),
        }
    }

    fn zip_map<F: Fn(f64, f64) -> f64>(a: &Matrix, b: &Matrix, f: F) -> Result<Self, SoleError> {
        if !Self::have_equal_shape(a, b) {
            return Err(SoleError::dimension_mismatch(a.shape(), b.shape()));
        }
        Ok(Self {
            rows: a
                .rows
                .iter()
                .zip(b.rows.iter())
                .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(&x, &y)| f(x, y)).collect())
                .collect(),
        })
    }

    /// Multiply every cell by `k`.
    pub fn scaled_by(a: &Matrix, k: f64) -> Self {
        a.map(|v| v * k)
    }

    /// Add `k` to every cell.
    pub fn shifted_by(a: &Matrix, k: f64) -> Self {
        a.map(|v| v + k)
    }

    /// Elementwise `a + b`.
    ///
    /// # Errors
    ///
    /// [`SoleError::DimensionMismatch`] if the shapes differ.
    pub fn sum(a: &Matrix, b: &Matrix) -> Result<Self, SoleError> {
        Self::zip_map(a, b, |x, y| x + y)
    }

    /// Elementwise `a - b`, computed as `a + (-1 * b)`.
    ///
    /// # Errors
    ///
    /// [`SoleError::DimensionMismatch`] if the shapes differ.
    pub fn difference(a: &Matrix, b: &Matrix) -> Result<Self, SoleError> {
        if !Self::have_equal_shape(a, b) {
            return Err(SoleError::dimension_mismatch(a.shape(), b.shape()));
        }
        Self::sum(a, &Self::scaled_by(b, -1.0))
    }

    pub fn transpose(a: &Matrix) -> Self {
        let (nrows, ncols) = a.shape();
        let mut m = Self::zeros(ncols, nrows);
        for (i, row) in a.rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m.rows[j][i] = v;
            }
        }
        m
    }

    /// The matrix product `a * b`.
    ///
    /// The result has shape `(a.nrows(), b.ncols())`.
    ///
    /// # Errors
    ///
    /// [`SoleError::DimensionMismatch`] unless `a.ncols() == b.nrows()`.
    pub fn product(a: &Matrix, b: &Matrix) -> Result<Self, SoleError> {
        if a.ncols() != b.nrows() {
            return Err(SoleError::dimension_mismatch(
                (a.ncols(), b.ncols()),
                b.shape(),
            ));
        }
        let inner = a.ncols();
        let mut m = Self::zeros(a.nrows(), b.ncols());
        for (ri, row) in m.rows.iter_mut().enumerate() {
            for (ci, cell) in row.iter_mut().enumerate() {
                for k in 0..inner {
                    *cell += a.rows[ri][k] * b.rows[k][ci];
                }
            }
        }
        Ok(m)
    }

    /// The Euclidean (Frobenius) norm over all cells.
    pub fn norm(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt()
    }

    /// `true` if the shapes agree and every pair of cells
    /// differs by at most `tolerance`.
    pub fn approx_eq(a: &Matrix, b: &Matrix, tolerance: f64) -> bool {
        Self::have_equal_shape(a, b)
            && a.rows
                .iter()
                .flatten()
                .zip(b.rows.iter().flatten())
                .all(|(x, y)| (x - y).abs() <= tolerance)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl Validate for Matrix {
    fn validate<F: FnOnce(String) -> SoleError>(&self, err: F) -> Result<(), SoleError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(err(format!(
                "matrix entries must be finite, got: {:?}",
                self.rows
            )))
        }
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        &self.rows[row][column]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][column]
    }
}

impl std::ops::Add for &Matrix {
    type Output = Result<Matrix, SoleError>;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::sum(self, rhs)
    }
}

impl std::ops::Sub for &Matrix {
    type Output = Result<Matrix, SoleError>;

    fn sub(self, rhs: Self) -> Self::Output {
        Matrix::difference(self, rhs)
    }
}

impl std::ops::Mul for &Matrix {
    type Output = Result<Matrix, SoleError>;

    fn mul(self, rhs: Self) -> Self::Output {
        Matrix::product(self, rhs)
    }
}

impl std::ops::Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        Matrix::scaled_by(self, rhs)
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_by_three() -> Matrix {
        Matrix::try_from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn shape_of_empty_matrix() {
        let m = Matrix::default();
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
        let m = Matrix::zeros(3, 0);
        assert_eq!(m.shape(), (3, 0));
    }

    #[test]
    fn ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Matrix::try_from(rows),
            Err(SoleError::ValueError(_))
        ));
    }

    #[test]
    fn negative_shape() {
        assert!(matches!(
            Matrix::try_zeros(-1, 2),
            Err(SoleError::InvalidShape(_))
        ));
        assert!(matches!(
            Matrix::try_zeros(2, -1),
            Err(SoleError::InvalidShape(_))
        ));
        assert_eq!(Matrix::try_zeros(2, 3).unwrap(), Matrix::zeros(2, 3));
    }

    #[test]
    fn random_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(101);
        let m = Matrix::random_with_rng(&mut rng, 10, 7);
        assert_eq!(m.shape(), (10, 7));
        assert!(m.rows().flatten().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn clone_is_deep() {
        let a = two_by_three();
        let mut b = a.clone();
        b.set(0, 0, 100.0);
        b.row_mut(1).fill(-1.0);
        assert_eq!(a[(0, 0)], 1.0);
        assert_eq!(a.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(b[(0, 0)], 100.0);
        assert_eq!(b.row(1), &[-1.0, -1.0, -1.0]);
    }

    #[test]
    fn scale_and_shift() {
        let a = two_by_three();
        let s = Matrix::scaled_by(&a, 2.0);
        assert_eq!(s.row(1), &[8.0, 10.0, 12.0]);
        let s = Matrix::shifted_by(&a, -1.0);
        assert_eq!(s.row(0), &[0.0, 1.0, 2.0]);
        assert_eq!(a, two_by_three());
    }

    #[test]
    fn sum_requires_equal_shape() {
        let a = two_by_three();
        let b = Matrix::transpose(&a);
        match Matrix::sum(&a, &b) {
            Err(SoleError::DimensionMismatch { expected, got }) => {
                assert_eq!(expected, (2, 3));
                assert_eq!(got, (3, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(Matrix::difference(&a, &b).is_err());
    }

    #[test]
    fn transpose_shape_and_cells() {
        let t = Matrix::transpose(&two_by_three());
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.column_values(1), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn product_values() {
        let a = two_by_three();
        let b = Matrix::transpose(&a);
        let p = Matrix::product(&a, &b).unwrap();
        assert_eq!(p.shape(), (2, 2));
        assert_eq!(p.row(0), &[14.0, 32.0]);
        assert_eq!(p.row(1), &[32.0, 77.0]);
    }

    #[test]
    fn product_rejects_inner_mismatch() {
        let a = two_by_three();
        assert!(matches!(
            Matrix::product(&a, &a),
            Err(SoleError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn get_out_of_range() {
        let a = two_by_three();
        assert_eq!(a.get(1, 2), Some(6.0));
        assert!(a.get(2, 0).is_none());
        assert!(a.get(0, 3).is_none());
    }

    #[test]
    fn norm_of_column() {
        let v = Matrix::column(&[3.0, 4.0]);
        assert_eq!(v.norm(), 5.0);
    }

    #[test]
    fn display() {
        let a = Matrix::try_from(vec![vec![1.0, 2.5], vec![-3.0, 4.0]]).unwrap();
        assert_eq!(format!("{a}"), "[1, 2.5]\n[-3, 4]");
    }

    #[test]
    fn validate_finite() {
        let a = Matrix::column(&[1.0, f64::NAN]);
        assert!(a.validate(SoleError::ValueError).is_err());
        assert!(two_by_three().validate(SoleError::ValueError).is_ok());
    }
}
