// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use sha1::{Digest, Sha1};

use crate::OwnedBytes;

/// Computes the SHA-1 digest of `bytes` as a new owned sequence.
///
/// Content fingerprinting convenience, not a security primitive. The digest
/// implementation is pure Rust and cannot fail at runtime.
pub(crate) fn sha1_of(bytes: &[u8]) -> OwnedBytes {
    OwnedBytes::copy_of(Sha1::digest(bytes).as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ByteSequence;

    #[test]
    fn digest_length_is_twenty_bytes() {
        assert_eq!(sha1_of(b"").len(), 20);
        assert_eq!(sha1_of(b"anything at all").len(), 20);
    }

    #[test]
    fn digest_depends_only_on_content() {
        assert_eq!(sha1_of(b"abc"), sha1_of(b"abc"));
        assert_ne!(sha1_of(b"abc"), sha1_of(b"abd"));
    }
}
