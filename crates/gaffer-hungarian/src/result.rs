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

use crate::stats::HungarianStatistics;
use gaffer_model::assignment::Assignment;
use num_traits::Float;

/// Result of the solver after termination.
///
/// Unlike a branch-and-bound search, the Hungarian algorithm is total: every
/// run terminates with a provably optimal assignment, so the outcome is
/// always the assignment plus the run's statistics. There is no infeasible
/// or aborted case.
#[derive(Debug, Clone, PartialEq)]
pub struct HungarianOutcome<T> {
    assignment: Assignment<T>,
    statistics: HungarianStatistics,
}

impl<T> HungarianOutcome<T>
where
    T: Float,
{
    #[inline]
    pub fn new(assignment: Assignment<T>, statistics: HungarianStatistics) -> Self {
        Self {
            assignment,
            statistics,
        }
    }

    /// Returns the optimal assignment.
    #[inline]
    pub fn assignment(&self) -> &Assignment<T> {
        &self.assignment
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &HungarianStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the assignment alone.
    #[inline]
    pub fn into_assignment(self) -> Assignment<T> {
        self.assignment
    }
}

impl<T> std::fmt::Display for HungarianOutcome<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.assignment, self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaffer_model::index::{JobIndex, JobSlot};

    #[test]
    fn test_accessors_and_into_assignment() {
        let assignment = Assignment::new(3.5, vec![JobSlot::some(JobIndex::new(0))]);
        let mut statistics = HungarianStatistics::default();
        statistics.on_phase();

        let outcome = HungarianOutcome::new(assignment.clone(), statistics.clone());
        assert_eq!(outcome.assignment(), &assignment);
        assert_eq!(outcome.statistics(), &statistics);
        assert_eq!(outcome.into_assignment(), assignment);
    }

    #[test]
    fn test_display_includes_assignment_and_stats() {
        let assignment = Assignment::new(1.0, vec![JobSlot::some(JobIndex::new(0))]);
        let outcome = HungarianOutcome::new(assignment, HungarianStatistics::default());

        let displayed = format!("{}", outcome);
        assert!(displayed.contains("Assignment Summary"));
        assert!(displayed.contains("Gaffer Hungarian Solver Statistics"));
    }
}
