// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;
use std::str::Utf8Error;

use bytes::Bytes;

use crate::sequence::SequenceIter;
use crate::{ByteSequence, OwnedBytes, digest, semantics};

/// A zero-copy window over caller-owned bytes.
///
/// The view holds a borrow of the backing slice plus an origin and length baked into
/// the borrow itself; it owns nothing. Because the borrow checker rejects mutation of
/// the backing storage while any view over it is alive, the content is guaranteed
/// stable for the view's lifetime and the hash can be cached on first computation -
/// there is no "mutable backing" variant to account for.
///
/// To retain the data beyond the backing slice's lifetime, promote the view with
/// [`detach()`][ByteSequence::detach].
///
/// ```
/// use byteseq::{ByteSequence, SliceView};
///
/// let data = [0x41_u8, 0x42, 0x43, 0x44];
/// let view = SliceView::over_range(&data, 1..3);
///
/// assert_eq!(view.to_string(), "4243");
/// assert_eq!(view.byte_at(0), 0x42);
/// ```
#[derive(Clone)]
pub struct SliceView<'a> {
    data: &'a [u8],
    hash: semantics::HashCache,
}

impl<'a> SliceView<'a> {
    /// Creates a view over the whole of `data`.
    #[must_use]
    pub const fn over(data: &'a [u8]) -> Self {
        Self {
            data,
            hash: semantics::HashCache::new(),
        }
    }

    /// Creates a view over the bytes of `range` within `data`.
    ///
    /// Bounds are validated here, at construction, not deferred to first access.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of `data`.
    #[must_use]
    pub fn over_range<R>(data: &'a [u8], range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        Self::over_range_checked(data, range).expect("provided range out of sequence bounds")
    }

    /// Creates a view over the bytes of `range` within `data`, or `None` if the
    /// range is outside the bounds of `data`.
    #[must_use]
    pub fn over_range_checked<R>(data: &'a [u8], range: R) -> Option<Self>
    where
        R: RangeBounds<usize>,
    {
        semantics::subslice(data, range).map(Self::over)
    }
}

impl ByteSequence for SliceView<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.byte_at_checked(index).expect("provided index out of sequence bounds")
    }

    fn byte_at_checked(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    fn as_slice(&self) -> &[u8] {
        self.data
    }

    fn copied<R: RangeBounds<usize>>(&self, range: R) -> OwnedBytes {
        self.copied_checked(range).expect("provided range out of sequence bounds")
    }

    fn copied_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<OwnedBytes> {
        semantics::subslice(self.data, range).map(OwnedBytes::copy_of)
    }

    fn view<R: RangeBounds<usize>>(&self, range: R) -> SliceView<'_> {
        self.view_checked(range).expect("provided range out of sequence bounds")
    }

    fn view_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<SliceView<'_>> {
        semantics::subslice(self.data, range).map(SliceView::over)
    }

    fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    fn to_shared(&self) -> Bytes {
        // A borrow cannot outlive its backing storage, so producing an independent
        // buffer requires a copy here.
        Bytes::copy_from_slice(self.data)
    }

    fn iter(&self) -> SequenceIter<'_> {
        self.data.iter().copied()
    }

    fn utf8(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.data)
    }

    fn detach(&self) -> OwnedBytes {
        OwnedBytes::copy_of(self.data)
    }

    fn hash_code(&self) -> u32 {
        self.hash.get_or_compute(self.data)
    }

    fn sha1(&self) -> OwnedBytes {
        digest::sha1_of(self.data)
    }
}

impl PartialEq for SliceView<'_> {
    fn eq(&self, other: &Self) -> bool {
        semantics::eq(self.data, other.data)
    }
}

impl Eq for SliceView<'_> {}

impl PartialOrd for SliceView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SliceView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        semantics::compare(self.data, other.data)
    }
}

impl Hash for SliceView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl fmt::Display for SliceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        semantics::fmt_hex(self.data, f)
    }
}

impl fmt::Debug for SliceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SliceView({self})")
    }
}

impl<'a> From<&'a [u8]> for SliceView<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::over(value)
    }
}

impl<'a> IntoIterator for &'a SliceView<'_> {
    type Item = u8;
    type IntoIter = SequenceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SliceView<'static>: Send, Sync);

    #[test]
    fn windows_are_relative_to_origin() {
        let data = [10_u8, 20, 30, 40, 50];
        let view = SliceView::over_range(&data, 1..4);

        assert_eq!(view.len(), 3);
        assert_eq!(view.byte_at(0), 20);
        assert_eq!(view.byte_at(2), 40);
        assert_eq!(view.byte_at_checked(3), None);
        assert_eq!(view.to_vec(), vec![20, 30, 40]);
    }

    #[test]
    fn view_of_view_stacks_windows() {
        let data = [10_u8, 20, 30, 40, 50];
        let outer = SliceView::over_range(&data, 1..5);
        let inner = outer.view(1..3);

        assert_eq!(inner, [30, 40]);
        assert_eq!(inner.as_slice().as_ptr(), data[2..].as_ptr());
    }

    #[test]
    fn construction_bounds_are_validated_eagerly() {
        let data = [1_u8, 2, 3];

        assert!(SliceView::over_range_checked(&data, 0..4).is_none());
        assert!(SliceView::over_range_checked(&data, 3..3).is_some());
    }

    #[should_panic]
    #[test]
    fn out_of_bounds_construction_panics() {
        drop(SliceView::over_range(&[1_u8, 2, 3], 2..5));
    }

    #[test]
    fn empty_window_equals_canonical_empty() {
        let data = [1_u8, 2, 3];
        let view = SliceView::over_range(&data, 0..0);

        assert!(view.is_empty());
        assert_eq!(view, OwnedBytes::new());
    }

    #[test]
    fn detach_produces_independent_copy() {
        let data = vec![1_u8, 2, 3];
        let detached = SliceView::over(&data).detach();

        drop(data);

        assert_eq!(detached, [1, 2, 3]);
    }

    #[test]
    fn to_shared_copies_out_of_the_borrow() {
        let data = [1_u8, 2, 3];
        let view = SliceView::over(&data);
        let shared = view.to_shared();

        assert_eq!(shared.as_ref(), view.as_slice());
        assert_ne!(shared.as_ref().as_ptr(), data.as_ptr());
    }

    #[test]
    fn hash_is_cached_and_stable() {
        let data = [1_u8, 2, 3];
        let view = SliceView::over(&data);

        assert_eq!(view.hash_code(), view.hash_code());
        assert_eq!(view.hash_code(), OwnedBytes::copy_of(&data).hash_code());
    }

    #[test]
    fn copied_is_independent_of_the_backing() {
        let data = vec![1_u8, 2, 3];
        let copy = SliceView::over(&data).copied(..);

        drop(data);

        assert_eq!(copy, [1, 2, 3]);
    }

    #[test]
    fn renders_as_hex() {
        let data = [0xab_u8, 0xcd];
        let view = SliceView::over(&data);

        assert_eq!(view.to_string(), "abcd");
        assert_eq!(format!("{view:?}"), "SliceView(abcd)");
    }
}
