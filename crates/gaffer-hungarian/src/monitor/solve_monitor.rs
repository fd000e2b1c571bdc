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

use crate::{num::CostValue, state::SolverState, stats::HungarianStatistics};
use gaffer_model::{index::WorkerIndex, matrix::CostMatrix};

/// Trait for observing the progress of the Hungarian solver.
///
/// Monitors are purely observational: the algorithm is total and runs to its
/// optimal answer in bounded time, so there is no command channel to abort
/// or redirect the solve. Implementors receive each event together with the
/// statistics accumulated so far.
pub trait SolveMonitor<T>: Send + Sync
where
    T: CostValue,
{
    /// Called once before the solve begins, after the working matrix has
    /// been initialized.
    fn on_enter_solve(&mut self, matrix: &CostMatrix<T>, statistics: &HungarianStatistics);

    /// Called when a new phase is rooted at an unmatched worker.
    fn on_phase_rooted(
        &mut self,
        root: WorkerIndex,
        state: &SolverState<T>,
        statistics: &HungarianStatistics,
    );

    /// Called when the dual labels are updated by a strictly positive slack.
    fn on_relabel(&mut self, slack: T, statistics: &HungarianStatistics);

    /// Called when an augmenting path has been flipped and the matching has
    /// grown by one.
    fn on_augment(&mut self, state: &SolverState<T>, statistics: &HungarianStatistics);

    /// Called when the solve is finished.
    fn on_exit_solve(&mut self, statistics: &HungarianStatistics);

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl<T> std::fmt::Debug for dyn SolveMonitor<T>
where
    T: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SolveMonitor<T>
where
    T: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}
