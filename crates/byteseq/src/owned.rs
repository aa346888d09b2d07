// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;
use std::str::Utf8Error;

use bytes::{Buf, Bytes};

use crate::sequence::SequenceIter;
use crate::{BufView, ByteSequence, SequenceBuilder, SliceView, digest, semantics};

/// A sequence that exclusively holds its own backing storage.
///
/// All factory methods copy caller input (or take ownership of it outright), so no
/// caller retains a mutable handle to the backing bytes. The content is immutable for
/// the lifetime of the value, which makes unsynchronized concurrent reads safe and
/// allows the hash to be cached permanently on first computation.
///
/// Cloning is cheap: clones share the immutable backing storage by reference count.
///
/// ```
/// use byteseq::{ByteSequence, OwnedBytes};
///
/// let sequence = OwnedBytes::copy_of(b"ABC");
///
/// assert_eq!(sequence.len(), 3);
/// assert_eq!(sequence.utf8(), Ok("ABC"));
/// assert_eq!(sequence.to_string(), "414243");
/// ```
#[derive(Clone)]
pub struct OwnedBytes {
    data: Bytes,
    hash: semantics::HashCache,
}

impl OwnedBytes {
    /// Returns the canonical empty sequence.
    ///
    /// No allocation takes place - every zero-length factory request funnels here.
    #[cfg_attr(test, mutants::skip)] // Generates no-op mutations, not useful.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: Bytes::new(),
            hash: semantics::HashCache::new(),
        }
    }

    /// Creates a sequence containing an independent copy of `bytes`.
    #[must_use]
    pub fn copy_of(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::new();
        }

        Self::from_shared(Bytes::copy_from_slice(bytes))
    }

    /// Creates a sequence containing an independent copy of the bytes of `range`.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of `bytes`.
    #[must_use]
    pub fn copy_of_range<R>(bytes: &[u8], range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        Self::copy_of_range_checked(bytes, range).expect("provided range out of sequence bounds")
    }

    /// Creates a sequence containing an independent copy of the bytes of `range`,
    /// or `None` if the range is outside the bounds of `bytes`.
    #[must_use]
    pub fn copy_of_range_checked<R>(bytes: &[u8], range: R) -> Option<Self>
    where
        R: RangeBounds<usize>,
    {
        semantics::subslice(bytes, range).map(Self::copy_of)
    }

    /// Creates a sequence from the remaining bytes of a buffer, advancing the
    /// buffer's cursor past them.
    #[must_use]
    pub fn from_buf(mut buf: impl Buf) -> Self {
        let remaining = buf.remaining();

        if remaining == 0 {
            return Self::new();
        }

        Self::from_shared(buf.copy_to_bytes(remaining))
    }

    /// Creates a sequence from the low 8 bits of each element of `values`.
    ///
    /// The upper bits are discarded. This exists for compact construction of test
    /// and literal data from integer tables.
    #[must_use]
    pub fn from_low_bytes(values: &[u32]) -> Self {
        if values.is_empty() {
            return Self::new();
        }

        #[expect(clippy::cast_possible_truncation, reason = "discarding the upper bits is the point")]
        let bytes: Vec<u8> = values.iter().map(|&value| value as u8).collect();

        Self::from_shared(Bytes::from(bytes))
    }

    /// Returns a [`BufView`] sharing this sequence's storage, windowed to `range`.
    ///
    /// This is the zero-copy counterpart of [`copied()`][ByteSequence::copied] for
    /// callers that want a bounded, reference-counted window rather than a borrow.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of the sequence.
    #[must_use]
    pub fn share_range<R>(&self, range: R) -> BufView
    where
        R: RangeBounds<usize>,
    {
        self.share_range_checked(range).expect("provided range out of sequence bounds")
    }

    /// Returns a [`BufView`] sharing this sequence's storage, windowed to `range`,
    /// or `None` if the range is outside the bounds of the sequence.
    #[must_use]
    pub fn share_range_checked<R>(&self, range: R) -> Option<BufView>
    where
        R: RangeBounds<usize>,
    {
        let (start, len) = semantics::resolve_range(range, self.data.len())?;

        // In-bounds by construction, so `Bytes::slice` cannot panic here.
        Some(BufView::from_shared(self.data.slice(start..start.checked_add(len)?)))
    }

    /// Wraps already-immutable storage without copying.
    ///
    /// Not public: the exclusivity claim of this type rests on every public
    /// constructor either copying or taking ownership of its input.
    pub(crate) fn from_shared(data: Bytes) -> Self {
        Self {
            data,
            hash: semantics::HashCache::new(),
        }
    }
}

impl ByteSequence for OwnedBytes {
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
        semantics::subslice(self.as_slice(), range).map(Self::copy_of)
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
        // The wrapped buffer is permanently "cached" by construction - this is a
        // reference count bump, not a copy.
        self.data.clone()
    }

    fn iter(&self) -> SequenceIter<'_> {
        self.as_slice().iter().copied()
    }

    fn utf8(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_slice())
    }

    fn detach(&self) -> OwnedBytes {
        // Already owned - share the immutable backing instead of copying it.
        self.clone()
    }

    fn hash_code(&self) -> u32 {
        self.hash.get_or_compute(self.data.as_ref())
    }

    fn sha1(&self) -> OwnedBytes {
        digest::sha1_of(self.as_slice())
    }
}

impl Default for OwnedBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for OwnedBytes {
    fn eq(&self, other: &Self) -> bool {
        semantics::eq(self.as_slice(), other.as_slice())
    }
}

impl Eq for OwnedBytes {}

impl PartialOrd for OwnedBytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OwnedBytes {
    fn cmp(&self, other: &Self) -> Ordering {
        semantics::compare(self.as_slice(), other.as_slice())
    }
}

impl Hash for OwnedBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Feed the raw bytes so all backings of equal content collide correctly
        // in hashed collections. The contract-level value is `hash_code()`.
        self.as_slice().hash(state);
    }
}

impl fmt::Display for OwnedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        semantics::fmt_hex(self.as_slice(), f)
    }
}

impl fmt::Debug for OwnedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnedBytes({self})")
    }
}

impl FromIterator<u8> for OwnedBytes {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut builder = SequenceBuilder::new();
        builder.append_iter(iter);
        builder.build()
    }
}

impl<'a> IntoIterator for &'a OwnedBytes {
    type Item = u8;
    type IntoIter = SequenceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Cursor;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(OwnedBytes: Send, Sync);

    #[test]
    fn empty_is_canonical() {
        assert_eq!(OwnedBytes::new().len(), 0);
        assert!(OwnedBytes::new().is_empty());
        assert_eq!(OwnedBytes::new(), OwnedBytes::copy_of(&[]));
        assert_eq!(OwnedBytes::new(), OwnedBytes::default());
        assert_eq!(OwnedBytes::new().to_string(), "");
    }

    #[test]
    fn copy_is_independent() {
        let mut source = vec![1_u8, 2, 3];
        let sequence = OwnedBytes::copy_of(&source);

        source[0] = 99;

        assert_eq!(sequence, [1, 2, 3]);

        let snapshot = sequence.to_vec();
        assert_eq!(snapshot, vec![1, 2, 3]);
        assert_ne!(snapshot.as_ptr(), sequence.as_slice().as_ptr());
    }

    #[test]
    fn copy_of_range_windows() {
        let data = [10_u8, 20, 30, 40, 50];

        assert_eq!(OwnedBytes::copy_of_range(&data, 1..4), [20, 30, 40]);
        assert_eq!(OwnedBytes::copy_of_range(&data, ..), data);
        assert_eq!(OwnedBytes::copy_of_range(&data, 2..2), OwnedBytes::new());
        assert_eq!(OwnedBytes::copy_of_range_checked(&data, 3..7), None);
    }

    #[should_panic]
    #[test]
    fn copy_of_range_out_of_bounds_panics() {
        drop(OwnedBytes::copy_of_range(&[1_u8, 2, 3], 1..5));
    }

    #[test]
    fn from_buf_consumes_remaining_bytes() {
        let mut cursor = Cursor::new(vec![1_u8, 2, 3, 4]);
        cursor.set_position(1);

        let sequence = OwnedBytes::from_buf(&mut cursor);

        assert_eq!(sequence, [2, 3, 4]);
        assert!(!cursor.has_remaining());

        assert_eq!(OwnedBytes::from_buf(&mut cursor), OwnedBytes::new());
    }

    #[test]
    fn from_low_bytes_discards_upper_bits() {
        let sequence = OwnedBytes::from_low_bytes(&[0x41, 0x1_42, 0xffff_ff43]);

        assert_eq!(sequence, *b"ABC");
        assert_eq!(OwnedBytes::from_low_bytes(&[]), OwnedBytes::new());
    }

    #[test]
    fn byte_access() {
        let sequence = OwnedBytes::copy_of(b"abc");

        assert_eq!(sequence.byte_at(0), b'a');
        assert_eq!(sequence.byte_at(2), b'c');
        assert_eq!(sequence.byte_at_checked(3), None);
    }

    #[should_panic]
    #[test]
    fn byte_at_len_panics() {
        let sequence = OwnedBytes::copy_of(b"abc");
        _ = sequence.byte_at(sequence.len());
    }

    #[test]
    fn hash_code_is_idempotent_and_lazy() {
        let sequence = OwnedBytes::copy_of(b"hello");

        let first = sequence.hash_code();
        let second = sequence.hash_code();

        assert_eq!(first, second);
        assert_eq!(first, OwnedBytes::copy_of(b"hello").hash_code());
    }

    #[test]
    fn clone_shares_storage_and_compares_equal() {
        let sequence = OwnedBytes::copy_of(b"hello");
        let clone = sequence.clone();

        assert_eq!(sequence, clone);
        assert_eq!(sequence.as_slice().as_ptr(), clone.as_slice().as_ptr());
    }

    #[test]
    fn to_shared_is_zero_copy() {
        let sequence = OwnedBytes::copy_of(b"hello");
        let shared = sequence.to_shared();

        assert_eq!(shared.as_ref(), sequence.as_slice());
        assert_eq!(shared.as_ref().as_ptr(), sequence.as_slice().as_ptr());
    }

    #[test]
    fn share_range_windows_without_copying() {
        let sequence = OwnedBytes::copy_of(b"hello");
        let window = sequence.share_range(1..4);

        assert_eq!(window, *b"ell");
        assert_eq!(window.as_slice().as_ptr(), sequence.as_slice()[1..].as_ptr());
        assert_eq!(sequence.share_range_checked(4..6), None);
    }

    #[test]
    fn scenario_abc() {
        let sequence = OwnedBytes::copy_of(&[0x41, 0x42, 0x43]);

        assert_eq!(sequence.utf8(), Ok("ABC"));
        assert_eq!(sequence.to_string(), "414243");
        assert_eq!(format!("{sequence:?}"), "OwnedBytes(414243)");
    }

    #[test]
    fn utf8_rejects_invalid_content() {
        assert!(OwnedBytes::copy_of(&[0xff, 0xfe]).utf8().is_err());
    }

    #[test]
    fn iteration_is_restartable() {
        let sequence = OwnedBytes::copy_of(b"ab");

        assert_eq!(sequence.iter().collect::<Vec<_>>(), vec![b'a', b'b']);
        assert_eq!(sequence.iter().collect::<Vec<_>>(), vec![b'a', b'b']);
        assert_eq!((&sequence).into_iter().count(), 2);
    }

    #[test]
    fn from_iterator_collects() {
        let sequence: OwnedBytes = (1..=3_u8).collect();

        assert_eq!(sequence, [1, 2, 3]);
    }

    #[test]
    fn usable_in_hashed_collections_across_backings() {
        let mut set = HashSet::new();
        assert!(set.insert(OwnedBytes::copy_of(b"abc")));
        assert!(!set.insert(SliceView::over(b"abc").detach()));
    }

    #[test]
    fn sha1_known_vectors() {
        assert_eq!(
            OwnedBytes::copy_of(b"abc").sha1().to_string(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            OwnedBytes::new().sha1().to_string(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }
}
