// Copyright (c) The Byteseq Project Authors.
// Licensed under the MIT License.

use bytes::Bytes;

use crate::{BufView, OwnedBytes};

impl From<Vec<u8>> for OwnedBytes {
    /// Takes ownership of the vector - no copy is needed, because the caller
    /// surrenders its only handle to the storage.
    fn from(value: Vec<u8>) -> Self {
        if value.is_empty() {
            return Self::new();
        }

        Self::from_shared(Bytes::from(value))
    }
}

impl From<Vec<u8>> for BufView {
    fn from(value: Vec<u8>) -> Self {
        Self::from_shared(Bytes::from(value))
    }
}
