// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use bytes::Bytes;

use crate::OwnedBytes;

impl From<&'static [u8]> for OwnedBytes {
    /// A `'static` slice is immutable for the life of the program, so it can back
    /// an owned sequence directly without copying.
    fn from(value: &'static [u8]) -> Self {
        if value.is_empty() {
            return Self::new();
        }

        Self::from_shared(Bytes::from_static(value))
    }
}

impl<const LEN: usize> From<&'static [u8; LEN]> for OwnedBytes {
    fn from(value: &'static [u8; LEN]) -> Self {
        value.as_slice().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_static_slice() {
        let data: &'static [u8] = b"hello";

        let sequence = OwnedBytes::from(data);

        assert_eq!(sequence, data);
    }

    #[test]
    fn from_static_array() {
        let sequence = OwnedBytes::from(b"world");

        assert_eq!(sequence, b"world");
    }
}
