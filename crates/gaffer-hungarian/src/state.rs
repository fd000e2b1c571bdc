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

//! Solver state management for the Hungarian algorithm.
//!
//! This module provides `SolverState`, a compact, mutable container for the
//! dual labels, the partial matching, and the per-phase alternating-tree
//! bookkeeping of the Kuhn-Munkres algorithm.
//!
//! Key responsibilities:
//! - Maintain the dual labels per worker and per job; the solver keeps
//!   `cost[w][j] - label_by_worker[w] - label_by_job[j] >= 0` at all times.
//! - Maintain the match tables as a mutually consistent partial bijection
//!   (`match_job_by_worker[w] == j` iff `match_worker_by_job[j] == w`) and
//!   count matched workers.
//! - Track the committed worker set, the parent pointer of each committed
//!   job, and the minimum-slack edge reaching each uncommitted job. These
//!   are valid only within one phase and are cleared at phase start.
//!
//! Performance considerations:
//! - Uses `FixedBitSet` to track worker commitments efficiently.
//! - All storage is reused across solves; `reset` resizes without
//!   deallocating when capacities suffice.
//!
//! Safety and invariants:
//! - Debug assertions are used extensively to catch invariant violations in
//!   debug builds.

use crate::num::CostValue;
use fixedbitset::FixedBitSet;
use gaffer_model::index::{JobIndex, JobSlot, WorkerIndex, WorkerSlot};

/// A compact, mutable container holding the labeling, matching, and phase
/// state for the Hungarian solver.
///
/// Invariants (debug-checked where cheap):
/// - `num_matched <= dim`
/// - The match tables are mutually consistent outside of an in-progress
///   augmentation.
#[derive(Debug, Clone)]
pub struct SolverState<T> {
    // Labels: the dual potentials.
    label_by_worker: Vec<T>,
    label_by_job: Vec<T>,

    // Matching: a partial bijection between workers and jobs.
    match_job_by_worker: Vec<JobSlot>,
    match_worker_by_job: Vec<WorkerSlot>,

    // Phase state: valid from `clear_phase` until the phase's augmentation.
    min_slack_value_by_job: Vec<T>,
    min_slack_worker_by_job: Vec<WorkerIndex>,
    parent_worker_by_committed_job: Vec<WorkerSlot>,
    committed_workers: FixedBitSet,

    dim: usize,
    num_matched: usize,
}

impl<T> SolverState<T>
where
    T: CostValue,
{
    /// Creates a new `SolverState` sized for the given padded dimension.
    /// Labels start at zero and every worker and job starts unmatched.
    #[inline]
    pub fn new(dim: usize) -> Self {
        Self {
            label_by_worker: vec![T::zero(); dim],
            label_by_job: vec![T::zero(); dim],
            match_job_by_worker: vec![JobSlot::none(); dim],
            match_worker_by_job: vec![WorkerSlot::none(); dim],
            min_slack_value_by_job: vec![T::zero(); dim],
            min_slack_worker_by_job: vec![WorkerIndex::new(0); dim],
            parent_worker_by_committed_job: vec![WorkerSlot::none(); dim],
            committed_workers: FixedBitSet::with_capacity(dim),
            dim,
            num_matched: 0,
        }
    }

    /// Re-initializes the state for a new solve of the given padded
    /// dimension, reusing existing allocations.
    pub fn reset(&mut self, dim: usize) {
        self.dim = dim;
        self.num_matched = 0;

        self.label_by_worker.clear();
        self.label_by_worker.resize(dim, T::zero());
        self.label_by_job.clear();
        self.label_by_job.resize(dim, T::zero());

        self.match_job_by_worker.clear();
        self.match_job_by_worker.resize(dim, JobSlot::none());
        self.match_worker_by_job.clear();
        self.match_worker_by_job.resize(dim, WorkerSlot::none());

        self.min_slack_value_by_job.clear();
        self.min_slack_value_by_job.resize(dim, T::zero());
        self.min_slack_worker_by_job.clear();
        self.min_slack_worker_by_job.resize(dim, WorkerIndex::new(0));
        self.parent_worker_by_committed_job.clear();
        self.parent_worker_by_committed_job
            .resize(dim, WorkerSlot::none());

        self.committed_workers.grow(dim);
        self.committed_workers.clear();
    }

    /// Returns the padded dimension this state is sized for.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of currently matched workers.
    #[inline]
    pub fn num_matched(&self) -> usize {
        self.num_matched
    }

    /// Checks if every worker index `0..dim` is matched.
    #[inline]
    pub fn is_fully_matched(&self) -> bool {
        self.num_matched == self.dim
    }

    /// Returns the dual label of the specified worker.
    #[inline]
    pub fn worker_label(&self, worker_index: WorkerIndex) -> T {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `SolverState::worker_label` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );

        self.label_by_worker[worker_index.get()]
    }

    /// Returns the dual label of the specified job.
    #[inline]
    pub fn job_label(&self, job_index: JobIndex) -> T {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::job_label` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.label_by_job[job_index.get()]
    }

    /// Sets the dual label of the specified job. Used by the initial
    /// feasible labeling.
    #[inline]
    pub fn set_job_label(&mut self, job_index: JobIndex, value: T) {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::set_job_label` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.label_by_job[job_index.get()] = value;
    }

    /// Returns the job matched to the specified worker, if any.
    #[inline]
    pub fn job_for_worker(&self, worker_index: WorkerIndex) -> JobSlot {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `SolverState::job_for_worker` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );

        self.match_job_by_worker[worker_index.get()]
    }

    /// Returns the worker matched to the specified job, if any.
    #[inline]
    pub fn worker_for_job(&self, job_index: JobIndex) -> WorkerSlot {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::worker_for_job` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.match_worker_by_job[job_index.get()]
    }

    /// Records a matching between the specified worker and job, updating
    /// both tables.
    ///
    /// During an augmentation the worker may already carry a match; its
    /// previous job is re-homed by the next step of the path walk, so the
    /// matched count only grows when the worker was unmatched.
    #[inline]
    pub fn match_pair(&mut self, worker_index: WorkerIndex, job_index: JobIndex) {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `SolverState::match_pair` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::match_pair` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        if self.match_job_by_worker[worker_index.get()].is_none() {
            debug_assert!(
                self.num_matched < self.dim,
                "called `SolverState::match_pair` but the matched count is already at the limit {}",
                self.dim
            );
            self.num_matched += 1;
        }

        self.match_job_by_worker[worker_index.get()] = JobSlot::some(job_index);
        self.match_worker_by_job[job_index.get()] = WorkerSlot::some(worker_index);
    }

    /// Returns the first unmatched worker in index order, if any.
    ///
    /// Index order keeps the solver deterministic: identical inputs always
    /// root their phases at identical workers.
    pub fn first_unmatched_worker(&self) -> Option<WorkerIndex> {
        self.match_job_by_worker
            .iter()
            .position(|slot| slot.is_none())
            .map(WorkerIndex::new)
    }

    /// Clears the per-phase bookkeeping: the committed worker set and every
    /// job's parent pointer.
    pub fn clear_phase(&mut self) {
        self.committed_workers.clear();
        self.parent_worker_by_committed_job.fill(WorkerSlot::none());
    }

    /// Adds a worker to the committed set of the current phase.
    #[inline]
    pub fn commit_worker(&mut self, worker_index: WorkerIndex) {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `SolverState::commit_worker` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );

        self.committed_workers.insert(worker_index.get());
    }

    /// Checks if the specified worker is committed in the current phase.
    #[inline]
    pub fn is_worker_committed(&self, worker_index: WorkerIndex) -> bool {
        debug_assert!(
            worker_index.get() < self.dim,
            "called `SolverState::is_worker_committed` with worker index out of bounds: the dim is {} but the index is {}",
            self.dim,
            worker_index.get()
        );

        self.committed_workers.contains(worker_index.get())
    }

    /// Returns the parent worker of the specified job in the current
    /// phase's alternating tree, if the job is committed.
    #[inline]
    pub fn parent_of_job(&self, job_index: JobIndex) -> WorkerSlot {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::parent_of_job` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.parent_worker_by_committed_job[job_index.get()]
    }

    /// Commits a job to the current phase's alternating tree by recording
    /// its parent worker.
    #[inline]
    pub fn set_parent(&mut self, job_index: JobIndex, worker_index: WorkerIndex) {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::set_parent` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.parent_worker_by_committed_job[job_index.get()] = WorkerSlot::some(worker_index);
    }

    /// Returns the tracked minimum slack value reaching the specified job.
    #[inline]
    pub fn min_slack_value(&self, job_index: JobIndex) -> T {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::min_slack_value` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.min_slack_value_by_job[job_index.get()]
    }

    /// Returns the committed worker providing the tracked minimum slack for
    /// the specified job.
    #[inline]
    pub fn min_slack_worker(&self, job_index: JobIndex) -> WorkerIndex {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::min_slack_worker` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.min_slack_worker_by_job[job_index.get()]
    }

    /// Records the minimum-slack edge reaching the specified job.
    #[inline]
    pub fn set_min_slack(&mut self, job_index: JobIndex, worker_index: WorkerIndex, value: T) {
        debug_assert!(
            job_index.get() < self.dim,
            "called `SolverState::set_min_slack` with job index out of bounds: the dim is {} but the index is {}",
            self.dim,
            job_index.get()
        );

        self.min_slack_value_by_job[job_index.get()] = value;
        self.min_slack_worker_by_job[job_index.get()] = worker_index;
    }

    /// Finds the uncommitted job with the minimum tracked slack, together
    /// with the committed worker providing it and the slack itself.
    ///
    /// Returns `None` only when every job is committed, which a phase never
    /// reaches: it augments at the latest when the last uncommitted job
    /// joins the tree.
    pub fn min_slack_uncommitted_job(&self) -> Option<(JobIndex, WorkerIndex, T)> {
        let mut min_slack_value = T::infinity();
        let mut found: Option<(JobIndex, WorkerIndex)> = None;

        for j in 0..self.dim {
            if self.parent_worker_by_committed_job[j].is_none()
                && self.min_slack_value_by_job[j] < min_slack_value
            {
                min_slack_value = self.min_slack_value_by_job[j];
                found = Some((JobIndex::new(j), self.min_slack_worker_by_job[j]));
            }
        }

        found.map(|(job, worker)| (job, worker, min_slack_value))
    }

    /// Applies one dual relabeling step: raises the label of every committed
    /// worker by `slack`, lowers the label of every committed job by
    /// `slack`, and lowers the tracked slack of every uncommitted job by the
    /// same amount.
    ///
    /// This keeps every edge inside the tree tight and every tracked slack
    /// consistent, while creating at least one new zero-slack edge.
    pub fn apply_relabel(&mut self, slack: T) {
        for w in self.committed_workers.ones() {
            self.label_by_worker[w] += slack;
        }

        for j in 0..self.dim {
            if self.parent_worker_by_committed_job[j].is_some() {
                self.label_by_job[j] -= slack;
            } else {
                self.min_slack_value_by_job[j] -= slack;
            }
        }
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
    fn test_new_state_is_neutral() {
        let state = SolverState::<f64>::new(3);
        assert_eq!(state.dim(), 3);
        assert_eq!(state.num_matched(), 0);
        assert!(!state.is_fully_matched());

        for i in 0..3 {
            assert_eq!(state.worker_label(wi(i)), 0.0);
            assert_eq!(state.job_label(ji(i)), 0.0);
            assert!(state.job_for_worker(wi(i)).is_none());
            assert!(state.worker_for_job(ji(i)).is_none());
            assert!(state.parent_of_job(ji(i)).is_none());
            assert!(!state.is_worker_committed(wi(i)));
        }
    }

    #[test]
    fn test_match_pair_keeps_tables_consistent() {
        let mut state = SolverState::<f64>::new(3);
        state.match_pair(wi(0), ji(2));
        state.match_pair(wi(1), ji(0));

        assert_eq!(state.num_matched(), 2);
        assert_eq!(state.job_for_worker(wi(0)).unwrap(), ji(2));
        assert_eq!(state.worker_for_job(ji(2)).unwrap(), wi(0));
        assert_eq!(state.job_for_worker(wi(1)).unwrap(), ji(0));
        assert_eq!(state.worker_for_job(ji(0)).unwrap(), wi(1));
        assert!(state.worker_for_job(ji(1)).is_none());
    }

    #[test]
    fn test_rematching_a_worker_does_not_inflate_the_count() {
        let mut state = SolverState::<f64>::new(2);
        state.match_pair(wi(0), ji(0));
        // Re-homing the same worker, as the augmentation walk does.
        state.match_pair(wi(0), ji(1));

        assert_eq!(state.num_matched(), 1);
        assert_eq!(state.job_for_worker(wi(0)).unwrap(), ji(1));
    }

    #[test]
    fn test_first_unmatched_worker_scans_in_index_order() {
        let mut state = SolverState::<f64>::new(3);
        assert_eq!(state.first_unmatched_worker(), Some(wi(0)));

        state.match_pair(wi(0), ji(0));
        assert_eq!(state.first_unmatched_worker(), Some(wi(1)));

        state.match_pair(wi(1), ji(1));
        state.match_pair(wi(2), ji(2));
        assert_eq!(state.first_unmatched_worker(), None);
        assert!(state.is_fully_matched());
    }

    #[test]
    fn test_clear_phase_resets_commitments_and_parents() {
        let mut state = SolverState::<f64>::new(2);
        state.commit_worker(wi(1));
        state.set_parent(ji(0), wi(1));

        state.clear_phase();
        assert!(!state.is_worker_committed(wi(1)));
        assert!(state.parent_of_job(ji(0)).is_none());
    }

    #[test]
    fn test_min_slack_selection_prefers_lowest_index_on_ties() {
        let mut state = SolverState::<f64>::new(3);
        state.set_min_slack(ji(0), wi(0), 2.0);
        state.set_min_slack(ji(1), wi(0), 2.0);
        state.set_min_slack(ji(2), wi(0), 5.0);

        let (job, worker, slack) = state.min_slack_uncommitted_job().unwrap();
        assert_eq!(job, ji(0));
        assert_eq!(worker, wi(0));
        assert_eq!(slack, 2.0);
    }

    #[test]
    fn test_min_slack_selection_skips_committed_jobs() {
        let mut state = SolverState::<f64>::new(2);
        state.set_min_slack(ji(0), wi(0), 1.0);
        state.set_min_slack(ji(1), wi(0), 4.0);
        state.set_parent(ji(0), wi(0));

        let (job, _, slack) = state.min_slack_uncommitted_job().unwrap();
        assert_eq!(job, ji(1));
        assert_eq!(slack, 4.0);
    }

    #[test]
    fn test_apply_relabel_moves_labels_and_slacks() {
        let mut state = SolverState::<f64>::new(3);
        state.commit_worker(wi(0));
        state.commit_worker(wi(2));
        state.set_parent(ji(1), wi(0));
        state.set_min_slack(ji(0), wi(0), 3.0);
        state.set_min_slack(ji(2), wi(2), 7.0);

        state.apply_relabel(3.0);

        // Committed workers raised.
        assert_eq!(state.worker_label(wi(0)), 3.0);
        assert_eq!(state.worker_label(wi(2)), 3.0);
        assert_eq!(state.worker_label(wi(1)), 0.0);

        // Committed job lowered, uncommitted jobs keep their labels but
        // their tracked slacks shrink.
        assert_eq!(state.job_label(ji(1)), -3.0);
        assert_eq!(state.job_label(ji(0)), 0.0);
        assert_eq!(state.min_slack_value(ji(0)), 0.0);
        assert_eq!(state.min_slack_value(ji(2)), 4.0);
    }

    #[test]
    fn test_reset_reuses_state_for_a_new_dimension() {
        let mut state = SolverState::<f64>::new(2);
        state.match_pair(wi(0), ji(1));
        state.commit_worker(wi(0));

        state.reset(4);
        assert_eq!(state.dim(), 4);
        assert_eq!(state.num_matched(), 0);
        assert_eq!(state.first_unmatched_worker(), Some(wi(0)));
        for i in 0..4 {
            assert!(state.job_for_worker(wi(i)).is_none());
            assert!(!state.is_worker_committed(wi(i)));
        }
    }
}
