use crate::codec::{ScalarKind, TypeTag, record_len};
use crate::error::{KabanError, Result};
use tracing::{error, warn};

/// Where a container's live record sits, plus the width it was stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordSlot {
    pub offset: usize,
    pub kind: ScalarKind,
}

/// Append-only bytes of encoded records.
///
/// Records are never moved or reclaimed. Replacing one flips its leading
/// tag to `Dead` and counts its length in `dead_bytes`.
#[derive(Debug)]
pub(crate) struct RecordBuffer {
    bytes: Vec<u8>,
    dead_bytes: usize,
}

impl RecordBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            dead_bytes: 0,
        }
    }

    /// Buffer with pre-built contents, for exercising corrupt layouts.
    #[cfg(test)]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            dead_bytes: 0,
        }
    }

    /// Appends `record` and returns its offset.
    #[inline]
    pub fn append(&mut self, record: &[u8]) -> usize {
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(record);
        offset
    }

    /// Flips the leading tag byte at `offset` to `Dead`.
    pub fn tombstone(&mut self, offset: usize) {
        self.dead_bytes += record_len(&self.bytes, offset).unwrap_or(1);
        if let Some(tag) = self.bytes.get_mut(offset) {
            *tag = TypeTag::Dead.as_byte();
        }
    }

    /// Copies the record at `offset` (tag and payload, no terminator).
    ///
    /// Returns `Ok(None)` if the byte at `offset` is not a live tag.
    pub fn copy_record(&self, offset: usize) -> Result<Option<Vec<u8>>> {
        match self.bytes.get(offset).map(|&b| TypeTag::try_from(b)) {
            Some(Ok(tag)) if tag.is_live() => {}
            other => {
                warn!(offset, byte = ?other, "Index points at a non-live byte.");
                return Ok(None);
            }
        }

        let len = record_len(&self.bytes, offset).ok_or_else(|| {
            error!(offset, "Record has no terminator; buffer is corrupt.");
            KabanError::TerminatorNotFound { offset }
        })?;

        Ok(Some(self.bytes[offset..offset + len - 1].to_vec()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    #[inline]
    pub fn dead_bytes(&self) -> usize {
        self.dead_bytes
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
