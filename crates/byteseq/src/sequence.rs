// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::ops::RangeBounds;
use std::str::Utf8Error;
use std::{iter, slice};

use bytes::Bytes;

use crate::{BufView, OwnedBytes, SliceView, semantics};

/// A lazy, restartable iterator over the bytes of a sequence.
///
/// Each call to [`ByteSequence::iter()`] starts a fresh traversal from the first byte.
pub type SequenceIter<'a> = iter::Copied<slice::Iter<'a, u8>>;

/// The uniform read surface of a fixed-length, read-only sequence of bytes.
///
/// Three backings implement this contract and are mutually substitutable for reading:
///
/// * [`OwnedBytes`] - owns its storage exclusively; created by copying caller input.
/// * [`SliceView`] - a zero-copy window over a caller-owned `&[u8]`.
/// * [`BufView`] - a zero-copy window over a [`Bytes`] buffer.
///
/// Equality, ordering, hashing, and the hex rendering are defined once (see the
/// crate-internal `semantics` module) and apply identically to all backings: two
/// sequences of equal length and identical content are equal, hash equal, and render
/// equal, regardless of how either one is backed.
///
/// The trait deliberately has no default method bodies. Each backing implements every
/// operation explicitly against the shared helpers, so no implementation can drift from
/// the contract by partially overriding an inherited default.
pub trait ByteSequence {
    /// The number of bytes in the sequence.
    fn len(&self) -> usize;

    /// Whether the sequence contains no bytes.
    fn is_empty(&self) -> bool;

    /// Returns the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `[0, len())`.
    fn byte_at(&self, index: usize) -> u8;

    /// Returns the byte at `index`, or `None` if `index` is not in `[0, len())`.
    fn byte_at_checked(&self, index: usize) -> Option<u8>;

    /// References the full content of the sequence as one contiguous slice.
    ///
    /// The slice is windowed to the sequence - for views, indices are relative to the
    /// view's origin, never to the backing storage.
    fn as_slice(&self) -> &[u8];

    /// Returns a new independent sequence containing a copy of the bytes in `range`.
    ///
    /// An empty range yields the canonical empty sequence without allocating.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of the sequence.
    fn copied<R: RangeBounds<usize>>(&self, range: R) -> OwnedBytes;

    /// Returns a new independent sequence containing a copy of the bytes in `range`,
    /// or `None` if the range is outside the bounds of the sequence.
    fn copied_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<OwnedBytes>;

    /// Returns a sequence sharing this sequence's backing storage, windowed to `range`.
    ///
    /// No data is duplicated. The same bounds rules as [`copied()`][Self::copied] apply.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of the sequence.
    fn view<R: RangeBounds<usize>>(&self, range: R) -> SliceView<'_>;

    /// Returns a sequence sharing this sequence's backing storage, windowed to `range`,
    /// or `None` if the range is outside the bounds of the sequence.
    fn view_checked<R: RangeBounds<usize>>(&self, range: R) -> Option<SliceView<'_>>;

    /// Returns an independent snapshot of the full sequence content.
    ///
    /// Subrange snapshots are available by going through [`view()`][Self::view] or
    /// [`copied()`][Self::copied] first.
    fn to_vec(&self) -> Vec<u8>;

    /// Returns a read-only buffer over the content.
    ///
    /// Read-only access is enforced at the type level - [`Bytes`] content cannot be
    /// mutated through any handle. Backings that already hold their content in a
    /// [`Bytes`] return a cheap reference-counted handle; a [`SliceView`] must copy.
    fn to_shared(&self) -> Bytes;

    /// Returns a lazy iterator over the bytes of the sequence.
    ///
    /// The iterator is finite and restartable - each call starts a fresh traversal.
    fn iter(&self) -> SequenceIter<'_>;

    /// Decodes the full sequence content as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`Utf8Error`] if the content is not valid UTF-8.
    fn utf8(&self) -> Result<&str, Utf8Error>;

    /// Promotes this sequence to one with independent lifetime.
    ///
    /// This is the sanctioned escape hatch for retaining data beyond the validity
    /// window of a view: the result owns (or co-owns immutable) storage and is not
    /// tied to the lifetime of any caller-owned slice. Backings that already own
    /// their storage return a cheap handle.
    fn detach(&self) -> OwnedBytes;

    /// The contract-level hash of the sequence: `acc = 31 * acc + byte` over all
    /// bytes in order, with wrapping arithmetic.
    ///
    /// Consistent with equality across all backings. Backings cache the value after
    /// first computation, which is sound because their content is immutable for the
    /// lifetime of the cache.
    fn hash_code(&self) -> u32;

    /// Returns a new owned sequence containing the SHA-1 digest of the content.
    ///
    /// This is a convenience for content fingerprinting, not a security primitive.
    fn sha1(&self) -> OwnedBytes;
}

/// Implements the cross-backing equality and ordering relations.
///
/// All pairs route through the shared semantics helpers, so `a == b` and `a < b` give
/// the same answer for any combination of backings with the same contents.
macro_rules! cross_backing_relations {
    ($lhs:ty, $rhs:ty) => {
        impl PartialEq<$rhs> for $lhs {
            fn eq(&self, other: &$rhs) -> bool {
                semantics::eq(ByteSequence::as_slice(self), ByteSequence::as_slice(other))
            }
        }

        impl PartialOrd<$rhs> for $lhs {
            fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> {
                Some(semantics::compare(ByteSequence::as_slice(self), ByteSequence::as_slice(other)))
            }
        }
    };
}

cross_backing_relations!(OwnedBytes, SliceView<'_>);
cross_backing_relations!(OwnedBytes, BufView);
cross_backing_relations!(SliceView<'_>, OwnedBytes);
cross_backing_relations!(SliceView<'_>, BufView);
cross_backing_relations!(BufView, OwnedBytes);
cross_backing_relations!(BufView, SliceView<'_>);

/// Implements equality against plain byte containers, mostly for test ergonomics.
macro_rules! literal_relations {
    ($seq:ty) => {
        impl PartialEq<[u8]> for $seq {
            fn eq(&self, other: &[u8]) -> bool {
                semantics::eq(ByteSequence::as_slice(self), other)
            }
        }

        impl PartialEq<&[u8]> for $seq {
            fn eq(&self, other: &&[u8]) -> bool {
                semantics::eq(ByteSequence::as_slice(self), other)
            }
        }

        impl<const LEN: usize> PartialEq<[u8; LEN]> for $seq {
            fn eq(&self, other: &[u8; LEN]) -> bool {
                semantics::eq(ByteSequence::as_slice(self), other)
            }
        }

        impl<const LEN: usize> PartialEq<&[u8; LEN]> for $seq {
            fn eq(&self, other: &&[u8; LEN]) -> bool {
                semantics::eq(ByteSequence::as_slice(self), *other)
            }
        }

        impl PartialEq<Vec<u8>> for $seq {
            fn eq(&self, other: &Vec<u8>) -> bool {
                semantics::eq(ByteSequence::as_slice(self), other)
            }
        }
    };
}

literal_relations!(OwnedBytes);
literal_relations!(SliceView<'_>);
literal_relations!(BufView);
