// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Read-only byte sequences with interchangeable backing strategies.
//!
//! A byte sequence is an ordered, fixed-length, read-only run of bytes exposed through
//! one contract, the [`ByteSequence`] trait. Three backings implement the contract and
//! are mutually substitutable for reading:
//!
//! * [`OwnedBytes`] - owns its storage exclusively. Every factory copies caller input
//!   (or takes ownership of it outright), so the content is immutable for the value's
//!   lifetime and results such as the hash are cached permanently.
//! * [`SliceView`] - a zero-copy window over a caller-owned `&[u8]`. The borrow
//!   checker guarantees the backing cannot be mutated while the view is alive.
//! * [`BufView`] - a zero-copy window over a [`bytes::Bytes`] buffer, captured by
//!   duplicating the handle so the caller's own cursor movements do not affect it.
//!
//! Equality, ordering, hashing, and the textual rendering are identical across
//! backings: two sequences with the same bytes are equal, hash equal, and render
//! equal, no matter how either is backed.
//!
//! ```
//! use byteseq::{ByteSequence, OwnedBytes, SliceView};
//!
//! let owned = OwnedBytes::copy_of(b"ABC");
//! let view = SliceView::over(b"ABC");
//!
//! assert_eq!(owned, view);
//! assert_eq!(owned.hash_code(), view.hash_code());
//! assert_eq!(owned.to_string(), "414243");
//! assert_eq!(owned.utf8(), Ok("ABC"));
//! ```
//!
//! # Views and ownership
//!
//! Views avoid copying by sharing storage they do not own. When data read through a
//! view must outlive the backing storage, promote it with
//! [`detach()`][ByteSequence::detach], which yields an [`OwnedBytes`] with independent
//! lifetime:
//!
//! ```
//! use byteseq::{ByteSequence, OwnedBytes};
//!
//! fn keep_for_later(payload: &[u8]) -> OwnedBytes {
//!     let header = byteseq::SliceView::over_range(payload, 0..2);
//!     header.detach()
//! }
//!
//! assert_eq!(keep_for_later(&[1, 2, 3, 4]), OwnedBytes::copy_of(&[1, 2]));
//! ```
//!
//! # Assembling sequences
//!
//! When the final length is unknown in advance, accumulate fragments in a
//! [`SequenceBuilder`] and compact them on demand:
//!
//! ```
//! use byteseq::{ByteSequence, OwnedBytes, SequenceBuilder};
//!
//! let mut builder = SequenceBuilder::new();
//! builder.append_slice(b"hello, ");
//! builder.append_slice(b"world");
//!
//! let sequence = builder.build();
//!
//! assert_eq!(sequence.utf8(), Ok("hello, world"));
//! ```
//!
//! # Ordering and rendering
//!
//! Sequences order by unsigned lexicographic byte comparison, shorter-is-less when one
//! is a prefix of the other. The `Display` rendering is lower-case hex digit pairs
//! with no separators, and the two agree: sorting sequences and sorting their
//! renderings give the same order.
//!
//! # Concurrency
//!
//! [`OwnedBytes`] and [`BufView`] content is immutable, so unsynchronized concurrent
//! reads are safe; the lazy hash cache publishes through a [`std::sync::OnceLock`],
//! making first-use races benign. [`SequenceBuilder`] is a single-owner accumulator.

mod buf_view;
mod builder;
mod constants;
mod digest;
mod owned;
mod semantics;
mod sequence;
mod slice;
mod slice_view;
mod vec;

pub use buf_view::BufView;
pub use builder::SequenceBuilder;
pub use constants::{MAX_INLINE_FRAGMENTS, STREAM_CHUNK_SIZE};
pub use owned::OwnedBytes;
pub use sequence::{ByteSequence, SequenceIter};
pub use slice_view::SliceView;
