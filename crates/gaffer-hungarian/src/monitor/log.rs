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
use std::time::{Duration, Instant};

/// A monitor that periodically prints a progress table for long solves.
///
/// Checking the clock on every phase would dominate small solves, so the
/// monitor only looks at it when the phase counter passes the
/// `clock_check_mask`, and only prints when `log_interval` has elapsed
/// since the last line.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<10} | {:<10} | {:<12} | {:<10}",
            "Elapsed", "Phases", "Matched", "Relabelings", "Greedy"
        );
        println!("{}", "-".repeat(63));
    }

    #[inline(always)]
    fn log_line<T>(&mut self, state: &SolverState<T>, stats: &HungarianStatistics)
    where
        T: CostValue,
    {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<10} | {:<10} | {:<12} | {:<10}",
            elapsed_field,
            stats.phases,
            state.num_matched(),
            stats.relabelings,
            stats.greedy_matches
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 255)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SolveMonitor<T> for LogMonitor
where
    T: CostValue,
{
    fn on_enter_solve(&mut self, matrix: &CostMatrix<T>, _statistics: &HungarianStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        println!(
            "Solving {} workers x {} jobs (dim: {})",
            matrix.num_workers(),
            matrix.num_jobs(),
            matrix.dim()
        );
        self.print_header();
    }

    fn on_phase_rooted(
        &mut self,
        _root: WorkerIndex,
        state: &SolverState<T>,
        statistics: &HungarianStatistics,
    ) {
        if (statistics.phases & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_relabel(&mut self, _slack: T, _statistics: &HungarianStatistics) {}

    fn on_augment(&mut self, _state: &SolverState<T>, _statistics: &HungarianStatistics) {}

    fn on_exit_solve(&mut self, statistics: &HungarianStatistics) {
        println!("{}", statistics);
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        let monitor = LogMonitor::new(Duration::from_secs(2), 63);
        assert_eq!(
            format!("{}", monitor),
            "LogMonitor(log_interval: 2s, clock_check_mask: 63)"
        );
    }

    #[test]
    fn test_default_configuration() {
        let monitor = LogMonitor::default();
        assert_eq!(monitor.log_interval, Duration::from_secs(1));
        assert_eq!(monitor.clock_check_mask, 255);
    }
}
