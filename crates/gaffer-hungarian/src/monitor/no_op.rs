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

use crate::{
    monitor::solve_monitor::SolveMonitor, num::CostValue, state::SolverState,
    stats::HungarianStatistics,
};
use gaffer_model::{index::WorkerIndex, matrix::CostMatrix};

/// A no-operation monitor that implements the `SolveMonitor` trait but does
/// nothing on any of the events. This is what `HungarianSolver::solve` uses
/// internally when no monitor is supplied.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T>
where
    T: CostValue,
{
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T>
where
    T: CostValue,
{
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> SolveMonitor<T> for NoOperationMonitor<T>
where
    T: CostValue,
{
    #[inline(always)]
    fn on_enter_solve(&mut self, _matrix: &CostMatrix<T>, _statistics: &HungarianStatistics) {}

    #[inline(always)]
    fn on_phase_rooted(
        &mut self,
        _root: WorkerIndex,
        _state: &SolverState<T>,
        _statistics: &HungarianStatistics,
    ) {
    }

    #[inline(always)]
    fn on_relabel(&mut self, _slack: T, _statistics: &HungarianStatistics) {}

    #[inline(always)]
    fn on_augment(&mut self, _state: &SolverState<T>, _statistics: &HungarianStatistics) {}

    #[inline(always)]
    fn on_exit_solve(&mut self, _statistics: &HungarianStatistics) {}

    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_default() {
        let monitor: NoOperationMonitor<f64> = Default::default();
        assert_eq!(monitor.name(), "NoOperationMonitor");
    }
}
