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

//! # Gaffer Core
//!
//! Foundational utilities for the gaffer assignment-solver ecosystem. This
//! crate consolidates the reusable building blocks that underpin the
//! higher-level model and solver crates, focused on correctness and
//! zero-overhead abstractions.
//!
//! ## Modules
//!
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`) and
//!   the sentinel-encoded optional index (`MaybeIndex<T>`) used to express
//!   "matched to index i" versus "unmatched" without magic values.
//!
//! ## Purpose
//!
//! Assignment solvers juggle two index spaces (workers and jobs) plus a
//! pervasive "absent" case. These primitives make index mix-ups a compile
//! error and absence an explicit, single-machine-word type, keeping the hot
//! loops of the solver free of accidental-signedness bugs while adding no
//! runtime overhead.
//!
//! Refer to each module for detailed APIs and examples.

pub mod utils;
