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

//! # Gaffer Model
//!
//! **The Core Domain Model for the Gaffer Assignment Solver.**
//!
//! This crate defines the fundamental data structures used to represent the
//! **Linear Assignment Problem (LAP)**: a rectangular matrix of real-valued
//! costs relating workers (rows) to jobs (columns). It serves as the data
//! interchange layer between the problem definition (user input) and the
//! solving engine (`gaffer_hungarian`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between **construction** and **solving**:
//!
//! * **`index`**: Provides strongly-typed wrappers (`WorkerIndex`, `JobIndex`) to prevent logical indexing errors.
//! * **`matrix`**: Contains the `CostMatrix` (immutable, validated, internally padded to square).
//! * **`assignment`**: Defines the output format, including the objective value and per-worker job slots.
//! * **`loading`**: A whitespace-token text loader turning instance files into validated matrices.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally use a `WorkerIndex` to address a job column.
//! 2.  **Memory Layout**: The matrix is stored as one flat row-major vector rather than nested vectors to maximize cache locality during the solver's O(n³) scans.
//! 3.  **Fail-Fast**: Constructors validate inputs eagerly (irregular rows, zero rows, non-finite costs) so the solver never encounters an invalid state.

pub mod assignment;
pub mod index;
pub mod loading;
pub mod matrix;
