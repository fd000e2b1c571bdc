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

use gaffer_core::utils::index::{TypedIndex, TypedIndexTag};
use gaffer_core::utils::maybe_index::MaybeIndex;

/// A tag type for worker (row) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WorkerIndexTag;

impl TypedIndexTag for WorkerIndexTag {
    const NAME: &'static str = "WorkerIndex";
}

/// A typed index for workers.
pub type WorkerIndex = TypedIndex<WorkerIndexTag>;

/// An optional worker index; absent means "no worker" (e.g., an unmatched job).
pub type WorkerSlot = MaybeIndex<WorkerIndexTag>;

/// A tag type for job (column) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JobIndexTag;

impl TypedIndexTag for JobIndexTag {
    const NAME: &'static str = "JobIndex";
}

/// A typed index for jobs.
pub type JobIndex = TypedIndex<JobIndexTag>;

/// An optional job index; absent means "no job" (e.g., an unassigned worker).
pub type JobSlot = MaybeIndex<JobIndexTag>;
