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

//! Gaffer-Hungarian: O(n³) Kuhn-Munkres for linear assignment
//!
//! High-level crate that implements a deterministic Hungarian solver for
//! the rectangular linear assignment problem. The solver separates the
//! working matrix, the labeling/matching state, monitoring, and outcome
//! reporting so each piece stays small and testable.
//!
//! Core flow
//! - Provide a `gaffer_model::matrix::CostMatrix<T>`.
//! - Run `solver::HungarianSolver::solve`, optionally with a monitor.
//! - Read the optimal `Assignment` and run statistics off the outcome.
//!
//! Design highlights
//! - Warm starts: row/column reduction, a tight initial dual labeling, and
//!   a greedy zero-cost matching shrink the phase loop's work without ever
//!   affecting optimality.
//! - Tight inner loop: state is mutated in place; per-phase slack trackers
//!   keep every relabeling O(n).
//! - Deterministic: index-order scans and strict-inequality tie-breaks,
//!   so identical inputs yield identical assignments.
//!
//! Assumptions and guarantees
//! - Costs are finite reals (the model crate enforces this); minimization
//!   only — negate costs to maximize.
//! - `solve` is total: every run terminates with a provably optimal
//!   assignment within `dim` phases.
//!
//! Module map
//! - `solver`: the solver engine and session orchestration.
//! - `state`: labels, match tables, and per-phase slack bookkeeping.
//! - `reduced`: the mutable working copy of the padded cost matrix.
//! - `monitor`: solve monitors (log, no-op).
//! - `result`: solver outcome bundling assignment and statistics.
//! - `stats`: lightweight counters/timing.
//! - `num`: the numeric bounds the solver asks of its cost type.

pub mod monitor;
pub mod num;
pub mod reduced;
pub mod result;
pub mod solver;
pub mod state;
pub mod stats;
