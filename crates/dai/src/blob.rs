//! Owned configuration blob.
//!
//! A blob is an opaque, driver-defined byte payload. The device keeps a private
//! copy sized exactly to the caller's buffer; the caller's buffer is never
//! retained.

use alloc::boxed::Box;
use alloc::collections::TryReserveError;
use alloc::vec::Vec;

/// Private copy of one configuration payload.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfigBlob(Box<[u8]>);

impl ConfigBlob {
    /// Copy `bytes` into a fresh allocation.
    ///
    /// Fails instead of aborting when the heap cannot satisfy the request.
    pub fn try_copy_from(bytes: &[u8]) -> Result<Self, TryReserveError> {
        let mut buf = reserve_exact(bytes.len())?;
        buf.extend_from_slice(bytes);
        Ok(Self(buf.into_boxed_slice()))
    }

    /// Payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Empty buffer with room for exactly `len` bytes, or the allocator's refusal.
pub(crate) fn reserve_exact(len: usize) -> Result<Vec<u8>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    Ok(buf)
}

impl AsRef<[u8]> for ConfigBlob {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
