// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

/// If a [`SequenceBuilder`][crate::SequenceBuilder] needs to track no more than this many
/// fragments, its metadata (and only its metadata) is stored entirely inline, without a
/// separate heap allocation.
///
/// The idea is that a typical sequence is assembled from a handful of fragments; builders
/// that accumulate more simply spill their bookkeeping to the heap. This is purely an
/// efficiency fine-tuning knob and does not have any effect on correctness.
pub const MAX_INLINE_FRAGMENTS: usize = 8;

/// The size of the intermediate buffer used when appending data from an iterator or reader
/// to a [`SequenceBuilder`][crate::SequenceBuilder].
///
/// Unbounded sources are drained in chunks of this many bytes, so appending a large stream
/// never forces one giant allocation up front.
pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;
