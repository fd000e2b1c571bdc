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

//! The solver's mutable working copy of the padded cost matrix.
//!
//! The caller's [`CostMatrix`] is immutable; the row/column reduction
//! heuristic mutates a private copy held here instead. Subtracting a
//! constant from a full row or column never changes which assignment is
//! optimal, so the reduction is free to drive as many entries to zero as it
//! can, which shortens the augmenting-path phases that follow.
//!
//! The buffer is reusable across solves: `initialize` refills it from the
//! next instance without reallocating when capacities suffice.

use crate::num::CostValue;
use gaffer_model::index::{JobIndex, WorkerIndex};
use gaffer_model::matrix::CostMatrix;

/// The reduced (row-min and column-min subtracted) working cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedCosts<T> {
    costs: Vec<T>, // len = dim * dim
    dim: usize,
}

impl<T> ReducedCosts<T>
where
    T: CostValue,
{
    /// Creates an empty working matrix. Call `initialize` before use.
    #[inline]
    pub fn new() -> Self {
        Self {
            costs: Vec::new(),
            dim: 0,
        }
    }

    /// Creates a working matrix with preallocated storage for the given
    /// padded dimension.
    #[inline]
    pub fn preallocated(dim: usize) -> Self {
        Self {
            costs: Vec::with_capacity(dim * dim),
            dim: 0,
        }
    }

    /// Fills the working matrix from a validated cost matrix, reusing the
    /// existing allocation where possible.
    pub fn initialize(&mut self, matrix: &CostMatrix<T>) {
        self.costs.clear();
        self.costs.extend_from_slice(matrix.padded_costs());
        self.dim = matrix.dim();
    }

    /// Returns the padded dimension of the current instance.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the working cost at `(worker, job)`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds `0..dim`.
    #[inline]
    pub fn cost(&self, worker_index: WorkerIndex, job_index: JobIndex) -> T {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `ReducedCosts::cost` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );
        debug_assert!(
            job_index.get() < self.dim,
            "called `ReducedCosts::cost` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.costs[worker_index.get() * self.dim + job_index.get()]
    }

    /// Returns the working cost at `(worker, job)` without bounds checking.
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
            "called `ReducedCosts::cost_unchecked` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );
        debug_assert!(
            job_index.get() < self.dim,
            "called `ReducedCosts::cost_unchecked` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        unsafe {
            *self
                .costs
                .get_unchecked(worker_index.get() * self.dim + job_index.get())
        }
    }

    /// Subtracts each row's minimum from every entry of that row, then each
    /// column's minimum of the row-reduced matrix from every entry of that
    /// column.
    ///
    /// Applying this to an already-reduced matrix changes nothing: all row
    /// and column minima are zero afterwards.
    pub fn reduce(&mut self) {
        let dim = self.dim;

        for w in 0..dim {
            let row = &mut self.costs[w * dim..(w + 1) * dim];

            let mut min = T::infinity();
            for &value in row.iter() {
                if value < min {
                    min = value;
                }
            }
            for value in row.iter_mut() {
                *value -= min;
            }
        }

        let mut min_by_job = vec![T::infinity(); dim];
        for w in 0..dim {
            for j in 0..dim {
                let value = self.costs[w * dim + j];
                if value < min_by_job[j] {
                    min_by_job[j] = value;
                }
            }
        }
        for w in 0..dim {
            for j in 0..dim {
                self.costs[w * dim + j] -= min_by_job[j];
            }
        }
    }

    /// Clears the working matrix, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.costs.clear();
        self.dim = 0;
    }
}

impl<T> Default for ReducedCosts<T>
where
    T: CostValue,
{
    #[inline]
    fn default() -> Self {
        Self::new()
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

    fn working(rows: &[Vec<f64>]) -> ReducedCosts<f64> {
        let matrix = CostMatrix::from_rows(rows).unwrap();
        let mut reduced = ReducedCosts::new();
        reduced.initialize(&matrix);
        reduced
    }

    fn snapshot(reduced: &ReducedCosts<f64>) -> Vec<f64> {
        let dim = reduced.dim();
        let mut values = Vec::with_capacity(dim * dim);
        for w in 0..dim {
            for j in 0..dim {
                values.push(reduced.cost(wi(w), ji(j)));
            }
        }
        values
    }

    #[test]
    fn test_initialize_copies_padded_matrix() {
        let reduced = working(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]);
        assert_eq!(reduced.dim(), 3);
        assert_eq!(reduced.cost(wi(0), ji(2)), 3.0);
        // Padding row reads as zero.
        assert_eq!(reduced.cost(wi(2), ji(0)), 0.0);
    }

    #[test]
    fn test_reduce_subtracts_row_then_column_minima() {
        let mut reduced = working(&[vec![4.0, 6.0], vec![3.0, 3.0]]);
        reduced.reduce();

        // Row reduction: [[0, 2], [0, 0]]; column minima are already zero.
        assert_eq!(snapshot(&reduced), vec![0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reduce_hits_columns_after_rows() {
        let mut reduced = working(&[vec![5.0, 7.0], vec![6.0, 9.0]]);
        reduced.reduce();

        // Rows: [[0, 2], [0, 3]]; column minima: [0, 2] -> [[0, 0], [0, 1]].
        assert_eq!(snapshot(&reduced), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let mut reduced = working(&[
            vec![10.0, 25.0, 15.0, 20.0],
            vec![15.0, 30.0, 5.0, 15.0],
            vec![35.0, 20.0, 12.0, 24.0],
            vec![17.0, 25.0, 24.0, 20.0],
        ]);
        reduced.reduce();
        let once = snapshot(&reduced);

        reduced.reduce();
        let twice = snapshot(&reduced);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_row_and_column_has_a_zero_after_reduce() {
        let mut reduced = working(&[vec![9.0, 11.0, 14.0], vec![6.0, 15.0, 13.0], vec![12.0, 13.0, 6.0]]);
        reduced.reduce();

        let dim = reduced.dim();
        for w in 0..dim {
            assert!((0..dim).any(|j| reduced.cost(wi(w), ji(j)) == 0.0));
        }
        for j in 0..dim {
            assert!((0..dim).any(|w| reduced.cost(wi(w), ji(j)) == 0.0));
        }
    }

    #[test]
    fn test_reuse_across_instances() {
        let mut reduced = working(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        reduced.reduce();

        let next = CostMatrix::from_rows(&[vec![7.0]]).unwrap();
        reduced.initialize(&next);
        assert_eq!(reduced.dim(), 1);
        assert_eq!(reduced.cost(wi(0), ji(0)), 7.0);
    }
}
