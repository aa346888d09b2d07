// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

//! Shared semantics used by every sequence backing.
//!
//! Equality, ordering, hashing, and hex rendering are defined here once and called
//! explicitly by each concrete backing, so two sequences with identical contents behave
//! identically no matter which backing they use.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::OnceLock;

/// Resolves a `RangeBounds` against a sequence of `len` bytes.
///
/// Returns the start offset and length of the requested window, or `None` if any part
/// of the range falls outside `[0, len)`. Out-of-range requests are never clamped.
pub(crate) fn resolve_range<R>(range: R, len: usize) -> Option<(usize, usize)>
where
    R: RangeBounds<usize>,
{
    let bytes_until_range = match range.start_bound() {
        Bound::Included(&x) => x,
        Bound::Excluded(&x) => x.checked_add(1)?,
        Bound::Unbounded => 0,
    };

    let bytes_in_range = match range.end_bound() {
        Bound::Included(&x) => x.checked_add(1)?.checked_sub(bytes_until_range)?,
        Bound::Excluded(&x) => x.checked_sub(bytes_until_range)?,
        Bound::Unbounded => len.checked_sub(bytes_until_range)?,
    };

    let required_len = bytes_until_range.checked_add(bytes_in_range)?;

    if required_len > len {
        // Did not have enough data to cover the range.
        return None;
    }

    Some((bytes_until_range, bytes_in_range))
}

/// Resolves a range against `bytes` and returns the windowed sub-slice,
/// or `None` if the range is out of bounds.
pub(crate) fn subslice<R>(bytes: &[u8], range: R) -> Option<&[u8]>
where
    R: RangeBounds<usize>,
{
    let (start, len) = resolve_range(range, bytes.len())?;

    bytes.get(start..start.checked_add(len)?)
}

/// Whether two sequences have equal length and identical byte-for-byte content.
pub(crate) fn eq(a: &[u8], b: &[u8]) -> bool {
    a == b
}

/// Unsigned lexicographic byte comparison, shorter-is-less when one sequence is a
/// prefix of the other.
///
/// This matches the ordering of the hex rendering produced by [`fmt_hex`], so sorting
/// sequences and sorting their textual representations agree.
pub(crate) fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// The contract-level hash of a sequence: `acc = 31 * acc + byte` over all bytes
/// in order, with wrapping arithmetic.
///
/// Every backing reports this exact value from `hash_code()`, so equal contents hash
/// equal regardless of backing.
pub(crate) fn hash_code(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0_u32, |acc, &byte| acc.wrapping_mul(31).wrapping_add(u32::from(byte)))
}

/// Renders a sequence as lower-case hex digit pairs, one pair per byte,
/// with no separators or prefix.
pub(crate) fn fmt_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&hex::encode(bytes))
}

/// A lazily computed, permanently cached hash value.
///
/// The cell starts empty and is filled on first query. Filling is idempotent - the
/// backing bytes are immutable for the lifetime of the cell, so concurrent first
/// queries compute the same value and any race is benign. `OnceLock` still gives us
/// proper publication so readers never observe a torn value.
#[derive(Debug, Default)]
pub(crate) struct HashCache {
    cell: OnceLock<u32>,
}

impl HashCache {
    pub(crate) const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Returns the cached hash, computing it from `bytes` on first use.
    pub(crate) fn get_or_compute(&self, bytes: &[u8]) -> u32 {
        *self.cell.get_or_init(|| hash_code(bytes))
    }
}

impl Clone for HashCache {
    fn clone(&self) -> Self {
        let cell = OnceLock::new();

        if let Some(value) = self.cell.get() {
            // Cannot fail - the cell was just created and is not yet shared.
            _ = cell.set(*value);
        }

        Self { cell }
    }
}
