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

//! Hungarian (Kuhn-Munkres) solver for the linear assignment problem.
//!
//! This module implements a stateful O(n³) solver over a validated
//! [`CostMatrix`]. The `HungarianSolver` manages reusable internal buffers
//! (the reduced working matrix and the labeling/matching state), so repeated
//! solves on same-sized instances allocate nothing; a fast `reset` keeps
//! capacities while clearing per-run state.
//!
//! A solve runs three warm-start heuristics before the main loop: the
//! row/column reduction, a tight initial dual labeling, and a greedy pass
//! that matches zero-reduced-cost pairs outright. The remaining unmatched
//! workers are then matched one augmenting-path phase at a time. Each phase
//! grows an alternating tree along zero-slack edges, relabeling the duals
//! whenever the tree runs dry, until it reaches an unmatched job; flipping
//! the path grows the matching by exactly one. A search session object
//! encapsulates per-run state, statistics, and timing. Determinism follows
//! from index-order scans and strict-inequality tie-breaks throughout.

use crate::{
    monitor::{no_op::NoOperationMonitor, solve_monitor::SolveMonitor},
    num::CostValue,
    reduced::ReducedCosts,
    result::HungarianOutcome,
    state::SolverState,
    stats::HungarianStatistics,
};
use gaffer_model::{
    assignment::Assignment,
    index::{JobIndex, JobSlot, WorkerIndex},
    matrix::CostMatrix,
};

/// A solver for the rectangular linear assignment problem.
///
/// The solver owns all working memory and may be reused across solves; every
/// call to [`HungarianSolver::solve`] re-initializes the buffers from the
/// given matrix and clears them afterwards. Callers that need parallel
/// solves use independent solver values, which `&mut self` enforces.
#[derive(Debug, Clone)]
pub struct HungarianSolver<T>
where
    T: CostValue,
{
    reduced: ReducedCosts<T>,
    state: SolverState<T>,
}

impl<T> Default for HungarianSolver<T>
where
    T: CostValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HungarianSolver<T>
where
    T: CostValue,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            reduced: ReducedCosts::new(),
            state: SolverState::new(0),
        }
    }

    /// Creates a new solver instance with preallocated storage for the
    /// given problem shape.
    ///
    /// # Note
    ///
    /// Solving will internally ensure sufficient capacity either way;
    /// preallocating only moves the allocation cost to construction time.
    #[inline]
    pub fn preallocated(num_workers: usize, num_jobs: usize) -> Self {
        let dim = num_workers.max(num_jobs);
        Self {
            reduced: ReducedCosts::preallocated(dim),
            state: SolverState::new(dim),
        }
    }

    /// Solves the given instance, returning the optimal assignment together
    /// with the run's statistics.
    #[inline]
    pub fn solve(&mut self, matrix: &CostMatrix<T>) -> HungarianOutcome<T> {
        self.solve_with_monitor(matrix, NoOperationMonitor::new())
    }

    /// Solves the given instance while reporting progress events to the
    /// provided [`SolveMonitor`].
    pub fn solve_with_monitor<M>(
        &mut self,
        matrix: &CostMatrix<T>,
        mut monitor: M,
    ) -> HungarianOutcome<T>
    where
        M: SolveMonitor<T>,
    {
        let session = HungarianSearchSession::new(self, matrix, &mut monitor);
        let res = session.run();
        self.reset();
        res
    }

    /// Resets the internal state of the solver.
    ///
    /// # Note
    ///
    /// This does not deallocate any memory, but only resets the logical
    /// state of the working buffers.
    #[inline]
    fn reset(&mut self) {
        self.reduced.reset();
        self.state.reset(0);
    }
}

/// A search session for the Hungarian solver. This struct encapsulates the
/// state and logic of a single solve.
struct HungarianSearchSession<'a, T, M>
where
    T: CostValue,
    M: SolveMonitor<T>,
{
    solver: &'a mut HungarianSolver<T>,
    matrix: &'a CostMatrix<T>,
    monitor: &'a mut M,
    stats: HungarianStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, M> HungarianSearchSession<'a, T, M>
where
    T: CostValue,
    M: SolveMonitor<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(solver: &'a mut HungarianSolver<T>, matrix: &'a CostMatrix<T>, monitor: &'a mut M) -> Self {
        Self {
            solver,
            matrix,
            monitor,
            stats: HungarianStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> HungarianOutcome<T> {
        self.initialize();
        self.monitor.on_enter_solve(self.matrix, &self.stats);

        // Heuristics to improve performance: reduce rows and columns by
        // their smallest element, compute an initial non-zero dual feasible
        // labeling, and greedily match zero-reduced-cost pairs.
        self.solver.reduced.reduce();
        self.compute_initial_feasible_labeling();
        self.greedy_match();

        while let Some(root) = self.solver.state.first_unmatched_worker() {
            self.stats.on_phase();
            self.monitor
                .on_phase_rooted(root, &self.solver.state, &self.stats);

            self.initialize_phase(root);
            self.execute_phase();
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_solve(&self.stats);

        self.finalize()
    }

    /// Fill the working matrix and clear the labeling/matching state for
    /// this instance.
    #[inline]
    fn initialize(&mut self) {
        self.solver.reduced.initialize(self.matrix);
        self.solver.state.reset(self.matrix.dim());
    }

    /// The reduced cost of the edge `(worker, job)` under the current
    /// labels. Non-negative for every edge; zero on "tight" edges.
    #[inline]
    fn slack(&self, worker_index: WorkerIndex, job_index: JobIndex) -> T {
        self.solver.reduced.cost(worker_index, job_index)
            - self.solver.state.worker_label(worker_index)
            - self.solver.state.job_label(job_index)
    }

    /// Assign every job a label equal to the minimum working cost among its
    /// incident edges. Worker labels stay at zero, so reduced costs remain
    /// non-negative and the labeling is dual feasible.
    fn compute_initial_feasible_labeling(&mut self) {
        let solver = &mut *self.solver;
        let reduced = &solver.reduced;
        let state = &mut solver.state;
        let dim = state.dim();

        for j in 0..dim {
            let job_index = JobIndex::new(j);

            let mut min = T::infinity();
            for w in 0..dim {
                let value = reduced.cost(WorkerIndex::new(w), job_index);
                if value < min {
                    min = value;
                }
            }
            state.set_job_label(job_index, min);
        }
    }

    /// Find a valid partial matching by greedily selecting among
    /// zero-reduced-cost pairs. This is a heuristic to jump-start the
    /// augmentation phases; every edge it uses already satisfies the
    /// optimality condition, so the final answer is unaffected.
    fn greedy_match(&mut self) {
        let dim = self.solver.state.dim();

        for w in 0..dim {
            let worker_index = WorkerIndex::new(w);
            for j in 0..dim {
                let job_index = JobIndex::new(j);
                if self.solver.state.job_for_worker(worker_index).is_none()
                    && self.solver.state.worker_for_job(job_index).is_none()
                    && self.slack(worker_index, job_index) == T::zero()
                {
                    self.solver.state.match_pair(worker_index, job_index);
                    self.stats.on_greedy_match();
                }
            }
        }
    }

    /// Initialize the next phase by clearing the committed worker set and
    /// the parent pointers, and by seeding the minimum-slack trackers with
    /// the edges of the specified root worker.
    fn initialize_phase(&mut self, root: WorkerIndex) {
        let solver = &mut *self.solver;
        let reduced = &solver.reduced;
        let state = &mut solver.state;

        state.clear_phase();
        state.commit_worker(root);

        let root_label = state.worker_label(root);
        for j in 0..state.dim() {
            let job_index = JobIndex::new(j);
            let slack = reduced.cost(root, job_index) - root_label - state.job_label(job_index);
            state.set_min_slack(job_index, root, slack);
        }
    }

    /// Execute a single phase of the algorithm: grow the alternating tree
    /// along zero-slack edges from the root, relabeling whenever no tight
    /// edge leaves the tree, until an unmatched job is reached and the
    /// matching is augmented.
    ///
    /// The runtime of a single phase is O(n²): each edge is visited at most
    /// once, and every relabeling is O(n) thanks to the maintained
    /// minimum-slack values among uncommitted jobs.
    fn execute_phase(&mut self) {
        loop {
            let (min_slack_job, min_slack_worker, min_slack_value) = self
                .solver
                .state
                .min_slack_uncommitted_job()
                .expect("expected an uncommitted job while the phase has not augmented");

            if min_slack_value > T::zero() {
                self.solver.state.apply_relabel(min_slack_value);
                self.stats.on_relabel();
                self.monitor.on_relabel(min_slack_value, &self.stats);
            }

            self.solver.state.set_parent(min_slack_job, min_slack_worker);

            match self.solver.state.worker_for_job(min_slack_job).into_option() {
                None => {
                    // An augmenting path has been found.
                    self.augment(min_slack_job);
                    self.monitor.on_augment(&self.solver.state, &self.stats);
                    return;
                }
                Some(matched_worker) => {
                    // Update slack values since we increased the size of
                    // the committed worker set.
                    let solver = &mut *self.solver;
                    let reduced = &solver.reduced;
                    let state = &mut solver.state;

                    state.commit_worker(matched_worker);
                    let worker_label = state.worker_label(matched_worker);
                    for j in 0..state.dim() {
                        let job_index = JobIndex::new(j);
                        if state.parent_of_job(job_index).is_none() {
                            let cost =
                                unsafe { reduced.cost_unchecked(matched_worker, job_index) };
                            let slack = cost - worker_label - state.job_label(job_index);
                            if state.min_slack_value(job_index) > slack {
                                state.set_min_slack(job_index, matched_worker, slack);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Walk the alternating path backward from the specified unmatched job,
    /// flipping worker-job matches at each step. The previous match of each
    /// worker along the path becomes the next job to re-home; the walk ends
    /// at the root, whose job slot was still empty.
    fn augment(&mut self, job: JobIndex) {
        let state = &mut self.solver.state;

        let mut committed_job = job;
        loop {
            let parent_worker = state.parent_of_job(committed_job).unwrap();
            let next_job = state.job_for_worker(parent_worker);
            state.match_pair(parent_worker, committed_job);

            match next_job.into_option() {
                Some(j) => committed_job = j,
                None => break,
            }
        }
    }

    /// Trim the matching back to the caller's coordinate space and price it
    /// against the ORIGINAL (unreduced) matrix.
    ///
    /// This is the only place padding artifacts are translated back: any
    /// worker matched to a padding job is reported unassigned, and padding
    /// workers are dropped entirely.
    fn finalize(self) -> HungarianOutcome<T> {
        let num_workers = self.matrix.num_workers();
        let num_jobs = self.matrix.num_jobs();

        let mut jobs = Vec::with_capacity(num_workers);
        let mut objective = T::zero();
        for w in 0..num_workers {
            let worker_index = WorkerIndex::new(w);
            match self.solver.state.job_for_worker(worker_index).into_option() {
                Some(job_index) if job_index.get() < num_jobs => {
                    objective += self.matrix.cost(worker_index, job_index);
                    jobs.push(JobSlot::some(job_index));
                }
                _ => jobs.push(JobSlot::none()),
            }
        }

        HungarianOutcome::new(Assignment::new(objective, jobs), self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::log::LogMonitor;
    use gaffer_model::assignment::Assignment;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    type Cost = f64;

    fn solve(rows: &[Vec<Cost>]) -> Assignment<Cost> {
        let matrix = CostMatrix::from_rows(rows).unwrap();
        let mut solver = HungarianSolver::new();
        solver.solve(&matrix).into_assignment()
    }

    /// The result as raw job indices, with unassigned workers as `None`.
    fn jobs_of(assignment: &Assignment<Cost>) -> Vec<Option<usize>> {
        assignment
            .jobs()
            .iter()
            .map(|slot| slot.into_option().map(|j| j.get()))
            .collect()
    }

    /// Exhaustive minimum over all ways to give each worker a distinct job
    /// (or leave it unassigned via a padding column).
    fn brute_force_objective(rows: &[Vec<Cost>]) -> Cost {
        fn go(
            w: usize,
            rows: &[Vec<Cost>],
            cols: usize,
            dim: usize,
            used: &mut [bool],
            acc: Cost,
            best: &mut Cost,
        ) {
            if w == rows.len() {
                if acc < *best {
                    *best = acc;
                }
                return;
            }
            for j in 0..dim {
                if !used[j] {
                    used[j] = true;
                    let cost = if j < cols { rows[w][j] } else { 0.0 };
                    go(w + 1, rows, cols, dim, used, acc + cost, best);
                    used[j] = false;
                }
            }
        }

        let cols = rows[0].len();
        let dim = rows.len().max(cols);
        let mut used = vec![false; dim];
        let mut best = Cost::INFINITY;
        go(0, rows, cols, dim, &mut used, 0.0, &mut best);
        best
    }

    fn random_rows(rng: &mut StdRng, num_workers: usize, num_jobs: usize) -> Vec<Vec<Cost>> {
        (0..num_workers)
            .map(|_| {
                (0..num_jobs)
                    .map(|_| rng.random_range(0..100) as Cost)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_two_workers_no_jobs() {
        let assignment = solve(&[vec![], vec![]]);
        assert_eq!(jobs_of(&assignment), vec![None, None]);
        assert_eq!(assignment.objective_value(), 0.0);
    }

    #[test]
    fn test_single_entry() {
        let assignment = solve(&[vec![1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0)]);
        assert_eq!(assignment.objective_value(), 1.0);
    }

    #[test]
    fn test_more_workers_than_jobs() {
        let assignment = solve(&[vec![1.0], vec![1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), None]);
        assert_eq!(assignment.objective_value(), 1.0);
    }

    #[test]
    fn test_more_jobs_than_workers() {
        let assignment = solve(&[vec![1.0, 1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0)]);
    }

    #[test]
    fn test_uniform_square() {
        let assignment = solve(&[vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), Some(1)]);
        assert_eq!(assignment.objective_value(), 2.0);
    }

    #[test]
    fn test_uniform_tall() {
        let assignment = solve(&[vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), Some(1), None]);
    }

    #[test]
    fn test_wide_two_by_three() {
        let assignment = solve(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), Some(2)]);
        assert_eq!(assignment.objective_value(), 5.0);
    }

    #[test]
    fn test_three_by_three() {
        let assignment = solve(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0], vec![1.0, 1.0, 1.0]]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), Some(2), Some(1)]);
    }

    #[test]
    fn test_four_by_four() {
        let assignment = solve(&[
            vec![10.0, 25.0, 15.0, 20.0],
            vec![15.0, 30.0, 5.0, 15.0],
            vec![35.0, 20.0, 12.0, 24.0],
            vec![17.0, 25.0, 24.0, 20.0],
        ]);
        assert_eq!(jobs_of(&assignment), vec![Some(0), Some(2), Some(1), Some(3)]);
        assert_eq!(assignment.objective_value(), 55.0);
    }

    #[test]
    fn test_objective_matches_reported_pairs() {
        let rows = vec![
            vec![7.0, 3.0, 1.0],
            vec![2.0, 9.0, 4.0],
            vec![5.0, 6.0, 8.0],
        ];
        let assignment = solve(&rows);

        let recomputed: Cost = assignment
            .assigned_pairs()
            .map(|(w, j)| rows[w.get()][j.get()])
            .sum();
        assert_eq!(assignment.objective_value(), recomputed);
    }

    #[test]
    fn test_optimality_on_random_square_instances() {
        let mut rng = StdRng::seed_from_u64(42);

        for n in 2..=6 {
            for _ in 0..20 {
                let rows = random_rows(&mut rng, n, n);
                let assignment = solve(&rows);
                assert_eq!(
                    assignment.objective_value(),
                    brute_force_objective(&rows),
                    "suboptimal answer for {:?}",
                    rows
                );
            }
        }
    }

    #[test]
    fn test_optimality_on_random_rectangular_instances() {
        let mut rng = StdRng::seed_from_u64(7);

        for &(num_workers, num_jobs) in &[(2, 5), (5, 2), (3, 6), (6, 3), (4, 5)] {
            for _ in 0..20 {
                let rows = random_rows(&mut rng, num_workers, num_jobs);
                let assignment = solve(&rows);
                assert_eq!(
                    assignment.objective_value(),
                    brute_force_objective(&rows),
                    "suboptimal answer for {:?}",
                    rows
                );
            }
        }
    }

    #[test]
    fn test_feasibility_no_job_is_used_twice() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let num_workers = rng.random_range(1..=7);
            let num_jobs = rng.random_range(0..=7);
            let rows = random_rows(&mut rng, num_workers, num_jobs);
            let assignment = solve(&rows);

            let mut seen = vec![false; num_jobs];
            for (_, job) in assignment.assigned_pairs() {
                assert!(job.get() < num_jobs);
                assert!(!seen[job.get()], "job {} assigned twice", job.get());
                seen[job.get()] = true;
            }
        }
    }

    #[test]
    fn test_completeness_by_shape() {
        let mut rng = StdRng::seed_from_u64(123);

        // rows <= cols: everyone is assigned.
        let rows = random_rows(&mut rng, 3, 5);
        assert_eq!(solve(&rows).num_assigned(), 3);

        // rows > cols: exactly rows - cols workers stay unassigned.
        let rows = random_rows(&mut rng, 6, 4);
        let assignment = solve(&rows);
        assert_eq!(assignment.num_assigned(), 4);
        assert_eq!(assignment.num_workers() - assignment.num_assigned(), 2);

        // Square: the result is a permutation.
        let rows = random_rows(&mut rng, 5, 5);
        let assignment = solve(&rows);
        let mut jobs: Vec<usize> = assignment.assigned_pairs().map(|(_, j)| j.get()).collect();
        jobs.sort_unstable();
        assert_eq!(jobs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_determinism() {
        let mut rng = StdRng::seed_from_u64(5);
        let rows = random_rows(&mut rng, 6, 6);
        let matrix = CostMatrix::from_rows(&rows).unwrap();

        let mut first_solver = HungarianSolver::new();
        let mut second_solver = HungarianSolver::new();
        let first = first_solver.solve(&matrix).into_assignment();
        let second = second_solver.solve(&matrix).into_assignment();

        assert_eq!(first, second);
    }

    #[test]
    fn test_solver_reuse_across_instances() {
        let mut solver = HungarianSolver::new();

        let first = CostMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        let outcome = solver.solve(&first);
        assert_eq!(outcome.assignment().objective_value(), 2.0);

        // A second, differently shaped instance on the same solver.
        let second = CostMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![6.0, 5.0, 4.0]]).unwrap();
        let outcome = solver.solve(&second);
        assert_eq!(outcome.assignment().objective_value(), 5.0);

        // And the first again, to make sure nothing leaked.
        let outcome = solver.solve(&first);
        assert_eq!(outcome.assignment().objective_value(), 2.0);
    }

    #[test]
    fn test_greedy_match_covers_uniform_instances() {
        let matrix = CostMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let mut solver = HungarianSolver::new();
        let outcome = solver.solve(&matrix);

        // After reduction the matrix is all zeros, so the greedy pass
        // matches everything and no phase runs.
        assert_eq!(outcome.statistics().greedy_matches, 2);
        assert_eq!(outcome.statistics().phases, 0);
    }

    #[test]
    fn test_statistics_count_phases() {
        // After reduction the zero entries of this matrix admit no perfect
        // matching, so the greedy pass leaves one worker for the phase loop.
        let matrix =
            CostMatrix::from_rows(&[vec![4.0, 1.0, 3.0], vec![2.0, 0.0, 5.0], vec![3.0, 2.0, 2.0]])
                .unwrap();
        let mut solver = HungarianSolver::new();
        let outcome = solver.solve(&matrix);

        assert_eq!(outcome.assignment().objective_value(), 5.0);

        let stats = outcome.statistics();
        // Greedy matching plus one phase per remaining unmatched worker.
        assert_eq!(stats.greedy_matches, 2);
        assert_eq!(stats.phases, 1);
        assert!(stats.relabelings >= 1);
    }

    #[test]
    fn test_solve_with_log_monitor_smoke() {
        let matrix = CostMatrix::from_rows(&[vec![3.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let mut solver = HungarianSolver::new();
        let outcome = solver.solve_with_monitor(&matrix, LogMonitor::default());

        assert_eq!(outcome.assignment().objective_value(), 2.0);
    }

    #[test]
    fn test_preallocated_solver_matches_fresh_solver() {
        let matrix = CostMatrix::from_rows(&[vec![4.0, 2.0, 8.0], vec![4.0, 3.0, 7.0], vec![3.0, 1.0, 6.0]]).unwrap();

        let mut preallocated = HungarianSolver::preallocated(3, 3);
        let mut fresh = HungarianSolver::new();

        assert_eq!(
            preallocated.solve(&matrix).into_assignment(),
            fresh.solve(&matrix).into_assignment()
        );
    }
}
