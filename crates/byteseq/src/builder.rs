// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use std::io::{self, Read};
use std::mem;

use bytes::{Buf, Bytes, BytesMut};
use nm::{Event, Magnitude};
use smallvec::SmallVec;

use crate::OwnedBytes;
use crate::constants::{MAX_INLINE_FRAGMENTS, STREAM_CHUNK_SIZE};

/// Accumulates byte fragments and compacts them into one [`OwnedBytes`] on demand.
///
/// Use a builder when the final sequence length is not known in advance: each append
/// stores a fragment, and [`build()`][Self::build] compacts all fragments into a
/// single backing allocation. A builder holding exactly one fragment skips the
/// compaction entirely.
///
/// `build()` consumes the builder, so appending after build or building twice is a
/// compile error rather than unspecified behavior. Start a fresh builder to
/// accumulate a new sequence.
///
/// The builder is a single-owner accumulation object; it is not designed for
/// concurrent use from multiple threads.
///
/// ```
/// use byteseq::{ByteSequence, OwnedBytes, SequenceBuilder};
///
/// let mut builder = SequenceBuilder::new();
/// builder.append_slice(&[0x01]);
/// builder.append_slice(&[0x02, 0x03]);
///
/// assert_eq!(builder.build(), OwnedBytes::copy_of(&[0x01, 0x02, 0x03]));
/// ```
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    /// Fragments in append order. Metadata stays inline until the builder tracks
    /// more than `MAX_INLINE_FRAGMENTS` of them.
    fragments: SmallVec<[Bytes; MAX_INLINE_FRAGMENTS]>,

    /// We track the running total so `build()` can allocate the compacted backing
    /// array in one go.
    len: usize,
}

impl SequenceBuilder {
    /// Returns a builder with no accumulated fragments.
    #[cfg_attr(test, mutants::skip)] // Generates no-op mutations, not useful.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: SmallVec::new_const(),
            len: 0,
        }
    }

    /// The total number of bytes accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        // Sanity check.
        debug_assert_eq!(self.len, self.fragments.iter().map(Bytes::len).sum::<usize>());

        self.len
    }

    /// Whether no bytes have been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a copy of `bytes`.
    ///
    /// The copy is defensive: the caller keeps its slice and may mutate it afterwards
    /// without affecting the accumulated fragment.
    pub fn append_slice(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        self.push_fragment(Bytes::copy_from_slice(bytes));
    }

    /// Appends an already-immutable buffer without copying.
    ///
    /// Sound because [`Bytes`] content cannot change under any handle; the fragment
    /// co-owns the storage by reference count.
    pub fn append_shared(&mut self, bytes: Bytes) {
        if bytes.is_empty() {
            return;
        }

        self.push_fragment(bytes);
    }

    /// Appends the remaining bytes of a buffer, advancing the buffer's cursor
    /// past them.
    pub fn append_buf(&mut self, buf: &mut impl Buf) {
        let remaining = buf.remaining();

        if remaining == 0 {
            return;
        }

        self.push_fragment(buf.copy_to_bytes(remaining));
    }

    /// Appends every byte produced by an iterator.
    ///
    /// The source is drained through an intermediate buffer of
    /// [`STREAM_CHUNK_SIZE`] bytes, so an unbounded iterator accumulates as a series
    /// of bounded fragments instead of one giant allocation.
    pub fn append_iter<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = u8>,
    {
        let mut chunk = Vec::with_capacity(STREAM_CHUNK_SIZE);

        for value in values {
            chunk.push(value);

            if chunk.len() == STREAM_CHUNK_SIZE {
                let full = mem::replace(&mut chunk, Vec::with_capacity(STREAM_CHUNK_SIZE));
                self.append_shared(Bytes::from(full));
            }
        }

        if !chunk.is_empty() {
            self.append_shared(Bytes::from(chunk));
        }
    }

    /// Appends every byte a reader produces until end of stream, returning the
    /// number of bytes appended.
    ///
    /// The reader is drained through an intermediate buffer of
    /// [`STREAM_CHUNK_SIZE`] bytes. Interrupted reads are retried.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the reader; fragments appended before the
    /// error remain accumulated.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn append_reader(&mut self, reader: &mut impl Read) -> io::Result<u64> {
        let mut total: u64 = 0;
        let mut chunk = vec![0_u8; STREAM_CHUNK_SIZE];

        loop {
            let filled = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(filled) => filled,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            };

            self.append_slice(chunk.get(..filled).expect("read never fills more than the buffer length"));

            total = total
                .checked_add(u64::try_from(filled).expect("a single read cannot exceed u64::MAX bytes"))
                .expect("total bytes read overflows u64");
        }

        Ok(total)
    }

    /// Compacts all accumulated fragments into one sequence.
    ///
    /// A builder holding zero fragments yields the canonical empty sequence; one
    /// holding exactly one fragment hands that fragment over without copying. Only
    /// multi-fragment builders pay for compaction.
    #[must_use]
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn build(self) -> OwnedBytes {
        BUILD_FRAGMENTS.with(|x| x.observe(self.fragments.len()));

        if self.fragments.is_empty() {
            BUILD_SHARED.with(|x| x.observe(0));

            return OwnedBytes::new();
        }

        if self.fragments.len() == 1 {
            // A single fragment can always be handed over without copying.
            BUILD_SHARED.with(|x| x.observe(self.len));

            let fragment = self.fragments.into_iter().next().expect("we verified there is one fragment");
            return OwnedBytes::from_shared(fragment);
        }

        let mut compacted = BytesMut::with_capacity(self.len);

        for fragment in &self.fragments {
            compacted.extend_from_slice(fragment);
        }

        debug_assert_eq!(self.len, compacted.len());

        BUILD_COMPACTED.with(|x| x.observe(self.len));

        OwnedBytes::from_shared(compacted.freeze())
    }

    fn push_fragment(&mut self, fragment: Bytes) {
        self.len = self
            .len
            .checked_add(fragment.len())
            .expect("accumulated sequence length overflows usize");

        self.fragments.push(fragment);
    }
}

impl Extend<u8> for SequenceBuilder {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.append_iter(iter);
    }
}

const FRAGMENT_COUNT_BUCKETS: &[Magnitude] = &[0, 1, 2, 4, 8, 16, 32];

thread_local! {
    static BUILD_FRAGMENTS: Event = Event::builder()
        .name("sequence_build_fragments")
        .histogram(FRAGMENT_COUNT_BUCKETS)
        .build();

    static BUILD_SHARED: Event = Event::builder()
        .name("sequence_build_shared")
        .build();

    static BUILD_COMPACTED: Event = Event::builder()
        .name("sequence_build_compacted")
        .build();
}
