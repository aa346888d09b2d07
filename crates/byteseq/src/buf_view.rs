// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;
use std::str::Utf8Error;

use bytes::Bytes;

use crate::sequence::SequenceIter;
use crate::{ByteSequence, OwnedBytes, SliceView, digest, semantics};

/// A zero-copy window over a [`Bytes`] buffer.
///
/// Construction duplicates the caller's buffer handle, so the view's window is
/// independent of anything the caller does with its own handle afterwards - advancing
/// or slicing the source buffer does not move the view. No data is copied; the view
/// co-owns the buffer's immutable storage by reference count.
///
/// Because [`Bytes`] content cannot be mutated through any handle, the hash is cached
/// permanently on first computation, exactly as for [`OwnedBytes`].
///
/// ```
/// use byteseq::{BufView, ByteSequence};
/// use bytes::Bytes;
///
/// let buffer = Bytes::from_static(b"ABCD");
/// let view = BufView::of_range(&buffer, 1..3);
///
/// assert_eq!(view.to_string(), "4243");
/// ```
#[derive(Clone)]
pub struct BufView {
    data: Bytes,
    hash: semantics::HashCache,
}

impl BufView {
    /// Creates a view over the full contents of `buffer`.
    ///
    /// The buffer handle is duplicated; the caller's handle remains untouched.
    #[must_use]
    pub fn of(buffer: &Bytes) -> Self {
        Self::from_shared(buffer.clone())
    }

    /// Creates a view over the bytes of `range` within `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of `buffer`.
    #[must_use]
    pub fn of_range<R>(buffer: &Bytes, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        Self::of_range_checked(buffer, range).expect("provided range out of sequence bounds")
    }

    /// Creates a view over the bytes of `range` within `buffer`, or `None` if the
    /// range is outside the bounds of `buffer`.
    #[must_use]
    pub fn of_range_checked<R>(buffer: &Bytes, range: R) -> Option<Self>
    where
        R: RangeBounds<usize>,
    {
        let (start, len) = semantics::resolve_range(range, buffer.len())?;

        // In-bounds by construction, so `Bytes::slice` cannot panic here.
        Some(Self::from_shared(buffer.slice(start..start.checked_add(len)?)))
    }

    /// Returns a `BufView` sharing this view's storage, windowed to `range`.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of the view.
    #[must_use]
    pub fn share_range<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        self.share_range_checked(range).expect("provided range out of sequence bounds")
    }

    /// Returns a `BufView` sharing this view's storage, windowed to `range`,
    /// or `None` if the range is outside the bounds of the view.
    #[must_use]
    pub fn share_range_checked<R>(&self, range: R) -> Option<Self>
    where
        R: RangeBounds<usize>,
    {
        Self::of_range_checked(&self.data, range)
    }

    pub(crate) fn from_shared(data: Bytes) -> Self {
        Self {
            data,
            hash: semantics::HashCache::new(),
        }
    }
}

impl ByteSequence for BufView {
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
        self.as_slice().get(index).copied()
    }

    fn as_slice(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn copied<R: RangeBounds<usize>>(&self, range: R) -> OwnedBytes {
        self.copied_checked(range).expect("provided range out of sequence bounds")
    }

    fn copied_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<OwnedBytes> {
        semantics::subslice(self.as_slice(), range).map(OwnedBytes::copy_of)
    }

    fn view<R: RangeBounds<usize>>(&self, range: R) -> SliceView<'_> {
        self.view_checked(range).expect("provided range out of sequence bounds")
    }

    fn view_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<SliceView<'_>> {
        semantics::subslice(self.as_slice(), range).map(SliceView::over)
    }

    fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    fn to_shared(&self) -> Bytes {
        self.data.clone()
    }

    fn iter(&self) -> SequenceIter<'_> {
        self.as_slice().iter().copied()
    }

    fn utf8(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_slice())
    }

    fn detach(&self) -> OwnedBytes {
        // The storage is immutable and reference counted, so sharing it satisfies
        // the independent-lifetime guarantee without a copy.
        OwnedBytes::from_shared(self.data.clone())
    }

    fn hash_code(&self) -> u32 {
        self.hash.get_or_compute(self.data.as_ref())
    }

    fn sha1(&self) -> OwnedBytes {
        digest::sha1_of(self.as_slice())
    }
}

impl PartialEq for BufView {
    fn eq(&self, other: &Self) -> bool {
        semantics::eq(self.as_slice(), other.as_slice())
    }
}

impl Eq for BufView {}

impl PartialOrd for BufView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BufView {
    fn cmp(&self, other: &Self) -> Ordering {
        semantics::compare(self.as_slice(), other.as_slice())
    }
}

impl Hash for BufView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Display for BufView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        semantics::fmt_hex(self.as_slice(), f)
    }
}

impl fmt::Debug for BufView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BufView({self})")
    }
}

impl From<Bytes> for BufView {
    fn from(value: Bytes) -> Self {
        Self::from_shared(value)
    }
}

impl<'a> IntoIterator for &'a BufView {
    type Item = u8;
    type IntoIter = SequenceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Buf;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(BufView: Send, Sync);

    #[test]
    fn window_is_independent_of_the_source_handle() {
        let mut buffer = Bytes::from_static(b"ABCD");
        let view = BufView::of(&buffer);

        // Advancing the caller's handle does not move the view's window.
        buffer.advance(2);

        assert_eq!(view, *b"ABCD");
        assert_eq!(buffer.as_ref(), b"CD");
    }

    #[test]
    fn of_range_windows_without_copying() {
        let buffer = Bytes::from_static(b"ABCD");
        let view = BufView::of_range(&buffer, 1..3);

        assert_eq!(view, *b"BC");
        assert_eq!(view.as_slice().as_ptr(), buffer.as_ref()[1..].as_ptr());
    }

    #[should_panic]
    #[test]
    fn of_range_out_of_bounds_panics() {
        drop(BufView::of_range(&Bytes::from_static(b"ABCD"), 2..6));
    }

    #[test]
    fn share_range_stacks_windows() {
        let buffer = Bytes::from_static(b"ABCDEF");
        let outer = BufView::of_range(&buffer, 1..5);
        let inner = outer.share_range(1..3);

        assert_eq!(inner, *b"CD");
        assert_eq!(outer.share_range_checked(3..5), None);
    }

    #[test]
    fn detach_shares_immutable_storage() {
        let buffer = Bytes::from_static(b"ABCD");
        let view = BufView::of(&buffer);
        let detached = view.detach();

        assert_eq!(detached, *b"ABCD");
        assert_eq!(detached.as_slice().as_ptr(), buffer.as_ref().as_ptr());
    }

    #[test]
    fn equals_and_hashes_like_other_backings() {
        let view = BufView::from(Bytes::from_static(b"abc"));
        let owned = OwnedBytes::copy_of(b"abc");

        assert_eq!(view, owned);
        assert_eq!(view.hash_code(), owned.hash_code());
    }

    #[test]
    fn empty_window_equals_canonical_empty() {
        let view = BufView::of_range(&Bytes::from_static(b"ABCD"), 2..2);

        assert!(view.is_empty());
        assert_eq!(view, OwnedBytes::new());
    }

    #[test]
    fn renders_as_hex() {
        let view = BufView::from(Bytes::from_static(&[0x01, 0xff]));

        assert_eq!(view.to_string(), "01ff");
        assert_eq!(format!("{view:?}"), "BufView(01ff)");
    }
}
