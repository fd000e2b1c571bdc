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

use std::time::Duration;

/// Statistics collected during the execution of the Hungarian solver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HungarianStatistics {
    /// Matches installed by the zero-cost greedy warm start.
    pub greedy_matches: u64,
    /// Augmenting-path phases executed (one per remaining unmatched worker).
    pub phases: u64,
    /// Dual label updates performed across all phases.
    pub relabelings: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl HungarianStatistics {
    #[inline]
    pub fn on_greedy_match(&mut self) {
        self.greedy_matches = self.greedy_matches.saturating_add(1);
    }

    #[inline]
    pub fn on_phase(&mut self) {
        self.phases = self.phases.saturating_add(1);
    }

    #[inline]
    pub fn on_relabel(&mut self) {
        self.relabelings = self.relabelings.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for HungarianStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Gaffer Hungarian Solver Statistics:")?;
        writeln!(f, "  Greedy matches:       {}", self.greedy_matches)?;
        writeln!(f, "  Phases executed:      {}", self.phases)?;
        writeln!(f, "  Relabelings:          {}", self.relabelings)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
