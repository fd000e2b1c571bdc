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

use num_traits::Float;
use std::iter::Sum;
use std::ops::{AddAssign, SubAssign};

/// A trait alias bundling every bound the Hungarian solver needs from its
/// cost type.
///
/// Costs are real-valued: the solver relies on `Float` for `zero()`,
/// `infinity()` (the internal "no minimum found yet" scan sentinel), and
/// total-order comparisons over finite values. The assign-ops drive the
/// in-place label updates, and `Sum` folds the final objective.
///
/// # Note
///
/// `f64` and `f32` both qualify. Caller-supplied costs must be finite; the
/// model crate's `CostMatrix` constructors enforce this.
pub trait CostValue:
    Float
    + AddAssign
    + SubAssign
    + Sum<Self>
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
{
}

impl<T> CostValue for T where
    T: Float
        + AddAssign
        + SubAssign
        + Sum<Self>
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
{
}
