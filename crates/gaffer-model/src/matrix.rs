// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Validated cost matrices for the assignment problem.
//!
//! A [`CostMatrix`] is built once from caller input, validated eagerly, and
//! never mutated afterwards. Internally the rectangular `rows × cols` input
//! is padded to a `dim × dim` square (`dim = max(rows, cols)`) with
//! zero-valued entries; padding rows absorb excess jobs and padding columns
//! absorb excess workers without ever distorting the optimum over the real
//! entries. The solver trims padding artifacts back out of the result, so
//! callers only ever observe their original coordinate space.
//!
//! Storage is one flat row-major vector of length `dim * dim` rather than
//! nested vectors; the solver's O(n³) scans walk it linearly.

use crate::index::{JobIndex, WorkerIndex};
use num_traits::Float;

#[inline(always)]
fn flatten_index(dim: usize, worker_index: WorkerIndex, job_index: JobIndex) -> usize {
    worker_index.get() * dim + job_index.get()
}

/// Details about a row whose length differs from the first row's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrregularMatrixError {
    /// The index of the offending row.
    pub row_index: usize,
    /// The expected number of columns (the first row's length).
    pub expected_cols: usize,
    /// The actual number of columns found in this row.
    pub actual_cols: usize,
}

impl std::fmt::Display for IrregularMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Irregular cost matrix: row {} has {} columns but the first row has {}",
            self.row_index, self.actual_cols, self.expected_cols
        )
    }
}

impl std::error::Error for IrregularMatrixError {}

/// Details about a structurally empty matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDimensionError {
    /// The number of rows found in the input.
    pub num_rows: usize,
}

impl std::fmt::Display for InvalidDimensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A cost matrix needs at least one row, got {}",
            self.num_rows
        )
    }
}

impl std::error::Error for InvalidDimensionError {}

/// Details about a non-finite cost entry.
///
/// Infinities are reserved as internal scan sentinels by the solver and NaN
/// poisons every comparison downstream, so neither is accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonFiniteCostError {
    /// The row of the offending entry.
    pub row_index: usize,
    /// The column of the offending entry.
    pub col_index: usize,
}

impl std::fmt::Display for NonFiniteCostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cost at ({}, {}) is not finite; costs must be finite real numbers",
            self.row_index, self.col_index
        )
    }
}

impl std::error::Error for NonFiniteCostError {}

/// Details about a flat value buffer whose length does not match the
/// declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatchError {
    /// The expected buffer length (`rows * cols`).
    pub expected: usize,
    /// The actual buffer length.
    pub actual: usize,
}

impl std::fmt::Display for LengthMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flat cost buffer has length {} but the declared shape needs {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for LengthMismatchError {}

/// The error type for cost matrix construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMatrixError {
    /// A row's length differs from the first row's length.
    Irregular(IrregularMatrixError),
    /// The matrix has no rows at all.
    InvalidDimension(InvalidDimensionError),
    /// An entry is NaN or infinite.
    NonFinite(NonFiniteCostError),
    /// A flat value buffer does not match the declared shape.
    Length(LengthMismatchError),
}

impl std::fmt::Display for CostMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Irregular(e) => write!(f, "{}", e),
            Self::InvalidDimension(e) => write!(f, "{}", e),
            Self::NonFinite(e) => write!(f, "{}", e),
            Self::Length(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CostMatrixError {}

impl From<IrregularMatrixError> for CostMatrixError {
    fn from(e: IrregularMatrixError) -> Self {
        Self::Irregular(e)
    }
}

impl From<InvalidDimensionError> for CostMatrixError {
    fn from(e: InvalidDimensionError) -> Self {
        Self::InvalidDimension(e)
    }
}

impl From<NonFiniteCostError> for CostMatrixError {
    fn from(e: NonFiniteCostError) -> Self {
        Self::NonFinite(e)
    }
}

impl From<LengthMismatchError> for CostMatrixError {
    fn from(e: LengthMismatchError) -> Self {
        Self::Length(e)
    }
}

/// The immutable, validated cost matrix of one assignment problem instance.
///
/// This struct holds all pre-validated, queryable data:
/// - `costs[w * dim + j]`: the padded square cost matrix in row-major order,
///   where entries beyond the original `rows × cols` shape are zero.
/// - `num_workers` / `num_jobs`: the caller's original shape.
/// - `dim`: the padded dimension, `max(num_workers, num_jobs)`.
///
/// Construction:
/// - Use [`CostMatrix::from_rows`] for nested-row input or
///   [`CostMatrix::from_flat`] for a flat row-major buffer. Both validate
///   eagerly; see [`CostMatrixError`].
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<T>
where
    T: Float,
{
    costs: Vec<T>, // len = dim * dim
    num_workers: usize,
    num_jobs: usize,
    dim: usize,
}

impl<T> CostMatrix<T>
where
    T: Float,
{
    /// Builds a validated, padded cost matrix from nested rows.
    ///
    /// The input must have at least one row; every row must have the same
    /// length as the first (which may be zero); every entry must be finite.
    /// Rows of length zero describe an instance with workers but no jobs,
    /// which solves to an all-unassigned result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_model::matrix::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]).unwrap();
    /// assert_eq!(matrix.num_workers(), 2);
    /// assert_eq!(matrix.num_jobs(), 3);
    /// assert_eq!(matrix.dim(), 3);
    /// ```
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, CostMatrixError> {
        let num_workers = rows.len();
        if num_workers == 0 {
            return Err(InvalidDimensionError { num_rows: 0 }.into());
        }

        let num_jobs = rows[0].len();
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != num_jobs {
                return Err(IrregularMatrixError {
                    row_index,
                    expected_cols: num_jobs,
                    actual_cols: row.len(),
                }
                .into());
            }
        }

        let dim = num_workers.max(num_jobs);
        let mut costs = vec![T::zero(); dim * dim];
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(NonFiniteCostError {
                        row_index,
                        col_index,
                    }
                    .into());
                }
                costs[row_index * dim + col_index] = value;
            }
        }

        Ok(Self {
            costs,
            num_workers,
            num_jobs,
            dim,
        })
    }

    /// Builds a validated, padded cost matrix from a flat row-major buffer.
    ///
    /// `values.len()` must equal `num_workers * num_jobs`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_model::matrix::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_flat(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(matrix.dim(), 2);
    /// ```
    pub fn from_flat(
        num_workers: usize,
        num_jobs: usize,
        values: Vec<T>,
    ) -> Result<Self, CostMatrixError> {
        if num_workers == 0 {
            return Err(InvalidDimensionError { num_rows: 0 }.into());
        }

        let expected = num_workers * num_jobs;
        if values.len() != expected {
            return Err(LengthMismatchError {
                expected,
                actual: values.len(),
            }
            .into());
        }

        let dim = num_workers.max(num_jobs);
        let mut costs = vec![T::zero(); dim * dim];
        for row_index in 0..num_workers {
            for col_index in 0..num_jobs {
                let value = values[row_index * num_jobs + col_index];
                if !value.is_finite() {
                    return Err(NonFiniteCostError {
                        row_index,
                        col_index,
                    }
                    .into());
                }
                costs[row_index * dim + col_index] = value;
            }
        }

        Ok(Self {
            costs,
            num_workers,
            num_jobs,
            dim,
        })
    }

    /// Returns the number of workers (rows) in the caller's original shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_model::matrix::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_rows(&[vec![1.0], vec![2.0]]).unwrap();
    /// assert_eq!(matrix.num_workers(), 2);
    /// ```
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the number of jobs (columns) in the caller's original shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_model::matrix::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_rows(&[vec![1.0], vec![2.0]]).unwrap();
    /// assert_eq!(matrix.num_jobs(), 1);
    /// ```
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.num_jobs
    }

    /// Returns the padded square dimension, `max(num_workers, num_jobs)`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the cost at `(worker, job)` in the padded coordinate space.
    ///
    /// Padding entries read as zero.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds `0..dim`.
    #[inline]
    pub fn cost(&self, worker_index: WorkerIndex, job_index: JobIndex) -> T {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `CostMatrix::cost` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );
        debug_assert!(
            job_index.get() < self.dim,
            "called `CostMatrix::cost` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.costs[flatten_index(self.dim, worker_index, job_index)]
    }

    /// Returns the cost at `(worker, job)` without bounds checking.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds `0..dim`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that both indices are within bounds `0..dim`.
    #[inline]
    pub unsafe fn cost_unchecked(&self, worker_index: WorkerIndex, job_index: JobIndex) -> T {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `CostMatrix::cost_unchecked` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );
        debug_assert!(
            job_index.get() < self.dim,
            "called `CostMatrix::cost_unchecked` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        unsafe {
            *self
                .costs
                .get_unchecked(flatten_index(self.dim, worker_index, job_index))
        }
    }

    /// Returns the padded square matrix as a flat row-major slice of length
    /// `dim * dim`. This is the buffer the solver copies before reducing.
    #[inline]
    pub fn padded_costs(&self) -> &[T] {
        &self.costs
    }

    /// Checks whether a worker index addresses a padding row (no real worker).
    #[inline]
    pub fn is_padding_worker(&self, worker_index: WorkerIndex) -> bool {
        worker_index.get() >= self.num_workers
    }

    /// Checks whether a job index addresses a padding column (no real job).
    #[inline]
    pub fn is_padding_job(&self, job_index: JobIndex) -> bool {
        job_index.get() >= self.num_jobs
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CostMatrix({} workers x {} jobs, dim: {})",
            self.num_workers, self.num_jobs, self.dim
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wi(i: usize) -> WorkerIndex {
        WorkerIndex::new(i)
    }

    fn ji(i: usize) -> JobIndex {
        JobIndex::new(i)
    }

    #[test]
    fn test_from_rows_square() {
        let matrix = CostMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.num_workers(), 2);
        assert_eq!(matrix.num_jobs(), 2);
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.cost(wi(0), ji(1)), 2.0);
        assert_eq!(matrix.cost(wi(1), ji(0)), 3.0);
    }

    #[test]
    fn test_from_rows_pads_tall_matrix_with_zero_columns() {
        // 3 workers, 1 job: two padding columns absorb the excess workers.
        let matrix = CostMatrix::from_rows(&[vec![5.0], vec![7.0], vec![9.0]]).unwrap();
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.cost(wi(0), ji(0)), 5.0);
        assert_eq!(matrix.cost(wi(0), ji(1)), 0.0);
        assert_eq!(matrix.cost(wi(2), ji(2)), 0.0);
        assert!(matrix.is_padding_job(ji(1)));
        assert!(!matrix.is_padding_job(ji(0)));
    }

    #[test]
    fn test_from_rows_pads_wide_matrix_with_zero_rows() {
        // 1 worker, 3 jobs: two padding rows absorb the excess jobs.
        let matrix = CostMatrix::from_rows(&[vec![5.0, 7.0, 9.0]]).unwrap();
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.cost(wi(0), ji(2)), 9.0);
        assert_eq!(matrix.cost(wi(1), ji(0)), 0.0);
        assert!(matrix.is_padding_worker(wi(1)));
        assert!(!matrix.is_padding_worker(wi(0)));
    }

    #[test]
    fn test_from_rows_accepts_zero_job_rows() {
        // Workers but no jobs: structurally valid, solves to all-unassigned.
        let matrix = CostMatrix::<f64>::from_rows(&[vec![], vec![]]).unwrap();
        assert_eq!(matrix.num_workers(), 2);
        assert_eq!(matrix.num_jobs(), 0);
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.cost(wi(1), ji(1)), 0.0);
    }

    #[test]
    fn test_from_rows_rejects_zero_rows() {
        let err = CostMatrix::<f64>::from_rows(&[]).unwrap_err();
        assert_eq!(
            err,
            CostMatrixError::InvalidDimension(InvalidDimensionError { num_rows: 0 })
        );
    }

    #[test]
    fn test_from_rows_rejects_irregular_rows() {
        let err = CostMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            CostMatrixError::Irregular(IrregularMatrixError {
                row_index: 1,
                expected_cols: 2,
                actual_cols: 1,
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_non_finite_costs() {
        let err = CostMatrix::from_rows(&[vec![1.0, f64::INFINITY]]).unwrap_err();
        assert_eq!(
            err,
            CostMatrixError::NonFinite(NonFiniteCostError {
                row_index: 0,
                col_index: 1,
            })
        );

        let err = CostMatrix::from_rows(&[vec![f64::NAN]]).unwrap_err();
        assert!(matches!(err, CostMatrixError::NonFinite(_)));
    }

    #[test]
    fn test_from_flat_matches_from_rows() {
        let a = CostMatrix::from_flat(2, 3, vec![1.0, 2.0, 3.0, 6.0, 5.0, 4.0]).unwrap();
        let b = CostMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_flat_rejects_length_mismatch() {
        let err = CostMatrix::from_flat(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            CostMatrixError::Length(LengthMismatchError {
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_padded_costs_layout() {
        let matrix = CostMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]).unwrap();
        // dim = 3; the third row is padding.
        assert_eq!(
            matrix.padded_costs(),
            &[1.0, 2.0, 3.0, 6.0, 5.0, 4.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_error_display_messages() {
        let err: CostMatrixError = IrregularMatrixError {
            row_index: 2,
            expected_cols: 4,
            actual_cols: 3,
        }
        .into();
        assert_eq!(
            format!("{}", err),
            "Irregular cost matrix: row 2 has 3 columns but the first row has 4"
        );

        let err: CostMatrixError = InvalidDimensionError { num_rows: 0 }.into();
        assert_eq!(format!("{}", err), "A cost matrix needs at least one row, got 0");
    }

    #[test]
    fn test_display_formatting() {
        let matrix = CostMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]).unwrap();
        assert_eq!(format!("{}", matrix), "CostMatrix(2 workers x 3 jobs, dim: 3)");
    }
}
