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

//! # Sentinel-Encoded Optional Indices
//!
//! `MaybeIndex<T>` is an optional [`TypedIndex<T>`] that stays a single
//! machine word. Instead of `Option<TypedIndex<T>>`, this type uses a
//! sentinel encoding to avoid the additional discriminant that `Option`
//! introduces, which matters in the dense match tables and parent-pointer
//! arrays an assignment solver scans in its hot loops.
//!
//! Encoding:
//! - Any value `< usize::MAX` represents a concrete index.
//! - `usize::MAX` is reserved to indicate absence.
//!
//! This convention assumes valid indices never reach `usize::MAX`, which
//! holds for any matrix that fits in memory.
//!
//! ## Usage
//!
//! ```rust
//! use gaffer_core::utils::index::{TypedIndex, TypedIndexTag};
//! use gaffer_core::utils::maybe_index::MaybeIndex;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug)]
//! struct JobTag;
//! impl TypedIndexTag for JobTag { const NAME: &'static str = "JobIndex"; }
//!
//! type JobIndex = TypedIndex<JobTag>;
//!
//! let unmatched: MaybeIndex<JobTag> = MaybeIndex::none();
//! assert!(unmatched.is_none());
//!
//! let matched = MaybeIndex::some(JobIndex::new(4));
//! assert_eq!(matched.into_option(), Some(JobIndex::new(4)));
//! ```

use crate::utils::index::{TypedIndex, TypedIndexTag};

/// An optional typed index that may be absent.
///
/// See the [module documentation](self) for the encoding and its rationale.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaybeIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MaybeIndex<T> {
    const NONE_SENTINEL: usize = usize::MAX;

    /// Creates a `MaybeIndex` representing `Some`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the index equals the reserved sentinel
    /// value `usize::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # use gaffer_core::utils::maybe_index::MaybeIndex;
    /// # #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// # struct MyTag;
    /// # impl TypedIndexTag for MyTag { const NAME: &'static str = "MyIndex"; }
    ///
    /// let present = MaybeIndex::some(TypedIndex::<MyTag>::new(5));
    /// assert!(present.is_some());
    /// ```
    #[inline]
    pub fn some(index: TypedIndex<T>) -> Self {
        debug_assert!(
            index.get() != Self::NONE_SENTINEL,
            "called `MaybeIndex::some` with the reserved sentinel index"
        );

        Self {
            index: index.get(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates a `MaybeIndex` representing `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_core::utils::index::TypedIndexTag;
    /// # use gaffer_core::utils::maybe_index::MaybeIndex;
    /// # #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// # struct MyTag;
    /// # impl TypedIndexTag for MyTag { const NAME: &'static str = "MyIndex"; }
    ///
    /// let absent: MaybeIndex<MyTag> = MaybeIndex::none();
    /// assert!(absent.is_none());
    /// ```
    #[inline]
    pub const fn none() -> Self {
        Self {
            index: Self::NONE_SENTINEL,
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates a `MaybeIndex` from an `Option<TypedIndex<T>>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # use gaffer_core::utils::maybe_index::MaybeIndex;
    /// # #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// # struct MyTag;
    /// # impl TypedIndexTag for MyTag { const NAME: &'static str = "MyIndex"; }
    ///
    /// let present = MaybeIndex::from_option(Some(TypedIndex::<MyTag>::new(2)));
    /// assert!(present.is_some());
    ///
    /// let absent = MaybeIndex::<MyTag>::from_option(None);
    /// assert!(absent.is_none());
    /// ```
    #[inline]
    pub fn from_option(value: Option<TypedIndex<T>>) -> Self {
        match value {
            Some(index) => Self::some(index),
            None => Self::none(),
        }
    }

    /// Checks if the `MaybeIndex` represents `None`.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.index == Self::NONE_SENTINEL
    }

    /// Checks if the `MaybeIndex` represents `Some`.
    #[inline]
    pub const fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Returns the raw value, including the sentinel if absent.
    #[inline]
    pub const fn raw(&self) -> usize {
        self.index
    }

    /// Converts the `MaybeIndex` back into an `Option<TypedIndex<T>>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use gaffer_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # use gaffer_core::utils::maybe_index::MaybeIndex;
    /// # #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// # struct MyTag;
    /// # impl TypedIndexTag for MyTag { const NAME: &'static str = "MyIndex"; }
    ///
    /// let present = MaybeIndex::some(TypedIndex::<MyTag>::new(4));
    /// assert_eq!(present.into_option(), Some(TypedIndex::<MyTag>::new(4)));
    ///
    /// let absent: MaybeIndex<MyTag> = MaybeIndex::none();
    /// assert_eq!(absent.into_option(), None);
    /// ```
    #[inline]
    pub fn into_option(&self) -> Option<TypedIndex<T>> {
        if self.is_none() {
            None
        } else {
            Some(TypedIndex::new(self.index))
        }
    }

    /// Unwraps the `MaybeIndex`, panicking if it is `None`.
    ///
    /// # Panics
    ///
    /// This function will panic if called on a `MaybeIndex` that represents
    /// `None`.
    pub fn unwrap(&self) -> TypedIndex<T> {
        if self.is_none() {
            panic!("called `MaybeIndex::unwrap()` on a `None` value")
        }
        TypedIndex::new(self.index)
    }

    /// Unwraps the `MaybeIndex`, returning a default index if it is `None`.
    #[inline]
    pub fn unwrap_or(&self, default: TypedIndex<T>) -> TypedIndex<T> {
        if self.is_none() {
            default
        } else {
            TypedIndex::new(self.index)
        }
    }
}

impl<T> Default for MaybeIndex<T> {
    #[inline]
    fn default() -> Self {
        Self::none()
    }
}

impl<T> std::fmt::Debug for MaybeIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "MaybeIndex(None)")
        } else {
            write!(f, "MaybeIndex(Some({}({})))", T::NAME, self.index)
        }
    }
}

impl<T> std::fmt::Display for MaybeIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "{}(None)", T::NAME)
        } else {
            write!(f, "{}({})", T::NAME, self.index)
        }
    }
}

impl<T> From<Option<TypedIndex<T>>> for MaybeIndex<T> {
    #[inline]
    fn from(value: Option<TypedIndex<T>>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<MaybeIndex<T>> for Option<TypedIndex<T>> {
    #[inline]
    fn from(val: MaybeIndex<T>) -> Self {
        val.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIdx";
    }

    type TestIndex = TypedIndex<TestTag>;
    type TestSlot = MaybeIndex<TestTag>;

    #[test]
    fn test_some_and_none() {
        let present = TestSlot::some(TestIndex::new(3));
        assert!(present.is_some());
        assert!(!present.is_none());
        assert_eq!(present.raw(), 3);

        let absent = TestSlot::none();
        assert!(absent.is_none());
        assert!(!absent.is_some());
        assert_eq!(absent.raw(), usize::MAX);
    }

    #[test]
    fn test_option_round_trip() {
        let present = TestSlot::from_option(Some(TestIndex::new(9)));
        assert_eq!(present.into_option(), Some(TestIndex::new(9)));

        let absent = TestSlot::from_option(None);
        assert_eq!(absent.into_option(), None);

        // Via the From impls
        let via_from: TestSlot = Some(TestIndex::new(1)).into();
        let back: Option<TestIndex> = via_from.into();
        assert_eq!(back, Some(TestIndex::new(1)));
    }

    #[test]
    fn test_unwrap_returns_index() {
        let present = TestSlot::some(TestIndex::new(6));
        assert_eq!(present.unwrap(), TestIndex::new(6));
    }

    #[test]
    #[should_panic(expected = "called `MaybeIndex::unwrap()` on a `None` value")]
    fn test_unwrap_panics_on_none() {
        let absent = TestSlot::none();
        let _ = absent.unwrap();
    }

    #[test]
    fn test_unwrap_or() {
        let present = TestSlot::some(TestIndex::new(8));
        assert_eq!(present.unwrap_or(TestIndex::new(0)), TestIndex::new(8));

        let absent = TestSlot::none();
        assert_eq!(absent.unwrap_or(TestIndex::new(0)), TestIndex::new(0));
    }

    #[test]
    fn test_default_is_none() {
        let slot: TestSlot = Default::default();
        assert!(slot.is_none());
    }

    #[test]
    fn test_debug_and_display() {
        let present = TestSlot::some(TestIndex::new(7));
        assert_eq!(format!("{}", present), "TestIdx(7)");
        assert_eq!(format!("{:?}", present), "MaybeIndex(Some(TestIdx(7)))");

        let absent = TestSlot::none();
        assert_eq!(format!("{}", absent), "TestIdx(None)");
        assert_eq!(format!("{:?}", absent), "MaybeIndex(None)");
    }
}
