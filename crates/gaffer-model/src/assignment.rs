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

use crate::index::{JobIndex, JobSlot, WorkerIndex};
use num_traits::Float;

/// The final solution to one assignment problem instance.
///
/// Entry `w` of the job table is the job assigned to worker `w`, or absent
/// when the worker is unassigned (only possible when there are more workers
/// than jobs). The table has exactly one entry per ORIGINAL worker; padding
/// artifacts are already trimmed away.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment<T> {
    /// The total cost of this assignment over the original cost matrix.
    objective_value: T,

    /// The assigned job for each worker.
    /// `jobs[w]` is the job assigned to worker `w`, or absent.
    jobs: Vec<JobSlot>,
}

impl<T> Assignment<T>
where
    T: Float,
{
    /// Constructs a new `Assignment`.
    pub fn new(objective_value: T, jobs: Vec<JobSlot>) -> Self {
        Self {
            objective_value,
            jobs,
        }
    }

    /// Returns the assigned job for a specific worker.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `worker_index` is out of bounds.
    #[inline]
    pub fn job_for_worker(&self, worker_index: WorkerIndex) -> JobSlot {
        let index = worker_index.get();
        debug_assert!(
            index < self.num_workers(),
            "called `Assignment::job_for_worker` with worker index out of bounds: the len is {} but the index is {}",
            self.num_workers(),
            index
        );

        self.jobs[index]
    }

    /// Returns the number of workers in this assignment.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.jobs.len()
    }

    /// Returns the number of workers that actually received a job.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.jobs.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the total objective value of this assignment.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns a slice of assigned jobs for all workers.
    #[inline]
    pub fn jobs(&self) -> &[JobSlot] {
        &self.jobs
    }

    /// Iterates over the `(worker, job)` pairs that are actually matched,
    /// in worker order.
    pub fn assigned_pairs(&self) -> impl Iterator<Item = (WorkerIndex, JobIndex)> + '_ {
        self.jobs
            .iter()
            .enumerate()
            .filter_map(|(w, slot)| slot.into_option().map(|j| (WorkerIndex::new(w), j)))
    }
}

impl<T> std::fmt::Display for Assignment<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assignment Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_workers() == 0 {
            writeln!(f, "   (No workers)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Worker", "Job")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (w, slot) in self.jobs.iter().enumerate() {
            match slot.into_option() {
                Some(job) => writeln!(f, "   {:<10} | {:<10}", w, job.get())?,
                None => writeln!(f, "   {:<10} | {:<10}", w, "-")?,
            }
        }

        Ok(())
    }
}
