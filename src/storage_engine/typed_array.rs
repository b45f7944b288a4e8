use crate::codec::{Decode, Scalar, ScalarKind, Value, decode, encode};
use crate::error::{KabanError, Result};
use crate::storage_engine::StoreStats;
use crate::storage_engine::constants::DEFAULT_CONTAINER_CAPACITY;
use crate::storage_engine::record_buffer::{RecordBuffer, RecordSlot};
use serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug)]
struct ArrayState {
    slots: BTreeMap<usize, RecordSlot>,
    records: RecordBuffer,
}

impl ArrayState {
    /// One past the highest stored index.
    #[inline]
    fn span(&self) -> usize {
        self.slots.last_key_value().map_or(0, |(&index, _)| index + 1)
    }

    /// Copies the record at `index`.
    ///
    /// `Ok(None)` marks a hole below the highest index. Indexes past it are
    /// out of bounds.
    fn copy_slot(&self, index: usize) -> Result<Option<(ScalarKind, Vec<u8>)>> {
        let span = self.span();
        if index >= span {
            return Err(KabanError::IndexOutOfBounds { index, len: span });
        }

        match self.slots.get(&index) {
            Some(slot) => Ok(self
                .records
                .copy_record(slot.offset)?
                .map(|record| (slot.kind, record))),
            None => Ok(None),
        }
    }
}

/// Sparse, integer-indexed list of scalars over one append-only buffer.
///
/// Indexes need not be contiguous. Anything below the highest stored index
/// that was never written reads back as a hole (`None` / `null`), anything
/// above it is out of bounds. Each slot remembers the exact width it was
/// stored with.
///
/// ```
/// use kaban::TypedArray;
///
/// let array = TypedArray::new();
/// array.store(0, "first").unwrap();
/// array.store(3, 7u8).unwrap();
///
/// assert_eq!(array.load::<u8>(3).unwrap(), Some(7));
/// assert_eq!(array.load::<u8>(1).unwrap(), None);
/// assert!(array.load::<u8>(4).is_err());
/// assert_eq!(array.to_json().unwrap(), r#"["first",null,null,7]"#);
/// ```
#[derive(Debug)]
pub struct TypedArray {
    state: RwLock<ArrayState>,
}

impl Default for TypedArray {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedArray {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CONTAINER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(ArrayState {
                slots: BTreeMap::new(),
                records: RecordBuffer::with_capacity(capacity),
            }),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, ArrayState>> {
        self.state.read().map_err(|_| KabanError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, ArrayState>> {
        self.state.write().map_err(|_| KabanError::LockPoisoned)
    }

    /// Writes `value` at `index`, tombstoning any previous record there.
    pub fn store<V: Scalar>(&self, index: usize, value: V) -> Result<()> {
        let kind = value.kind();
        let record = encode(&value.into());

        let mut state = self.write_state()?;
        let offset = state.records.append(&record);
        if let Some(prev) = state.slots.insert(index, RecordSlot { offset, kind }) {
            debug!(index, prev_offset = prev.offset, offset, "Overwrote array slot.");
            state.records.tombstone(prev.offset);
        }
        Ok(())
    }

    /// Loads the value at `index`, decoded into `T`.
    ///
    /// # Returns:
    /// - `Ok(Some(value))`: The record decoded into `T`.
    /// - `Ok(None)`: A hole, or a stored `Null`.
    /// - `Err(KabanError::IndexOutOfBounds)`: `index` is past the highest
    ///   stored index.
    /// - `Err(KabanError::TypeMismatch)` / `Err(KabanError::Overflow)`: as
    ///   for [`crate::traits::StoreReader::load`].
    pub fn load<T: Decode>(&self, index: usize) -> Result<Option<T>> {
        let slot = self.read_state()?.copy_slot(index)?;
        match slot {
            Some((_, record)) => decode(&record),
            None => Ok(None),
        }
    }

    /// Loads `index` into `dest`, leaving it untouched on holes and `Null`.
    pub fn load_into<T: Decode>(&self, index: usize, dest: &mut T) -> Result<()> {
        if let Some(value) = self.load(index)? {
            *dest = value;
        }
        Ok(())
    }

    /// Loads the value at `index` at the width it was stored with.
    pub fn load_value(&self, index: usize) -> Result<Value> {
        let slot = self.read_state()?.copy_slot(index)?;
        match slot {
            Some((kind, record)) => kind.decode_value(&record),
            None => Ok(Value::Null),
        }
    }

    /// Width stored at `index`, or `None` for a hole.
    pub fn kind_of(&self, index: usize) -> Result<Option<ScalarKind>> {
        let state = self.read_state()?;
        let span = state.span();
        if index >= span {
            return Err(KabanError::IndexOutOfBounds { index, len: span });
        }
        Ok(state.slots.get(&index).map(|slot| slot.kind))
    }

    /// Removes the value at `index`. Returns `false` if it was a hole.
    ///
    /// Deleting the highest index shrinks [`Self::span`].
    pub fn delete(&self, index: usize) -> Result<bool> {
        let mut state = self.write_state()?;
        match state.slots.remove(&index) {
            Some(slot) => {
                state.records.tombstone(slot.offset);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Stored indexes, ascending.
    pub fn indexes(&self) -> Result<Vec<usize>> {
        Ok(self.read_state()?.slots.keys().copied().collect())
    }

    /// Highest stored index.
    pub fn last_index(&self) -> Result<Option<usize>> {
        Ok(self.read_state()?.slots.last_key_value().map(|(&index, _)| index))
    }

    /// One past the highest stored index, holes included.
    pub fn span(&self) -> Result<usize> {
        Ok(self.read_state()?.span())
    }

    /// Number of stored (non-hole) indexes.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_state()?.slots.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every slot from `0` to the highest index, holes as `Null`.
    pub fn values(&self) -> Result<Vec<Value>> {
        let state = self.read_state()?;
        let mut copied = vec![None; state.span()];
        for (&index, slot) in &state.slots {
            copied[index] = state
                .records
                .copy_record(slot.offset)?
                .map(|record| (slot.kind, record));
        }
        drop(state);

        copied
            .into_iter()
            .map(|slot| match slot {
                Some((kind, record)) => kind.decode_value(&record),
                None => Ok(Value::Null),
            })
            .collect()
    }

    /// Renders the array as one dense JSON array, holes as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.values()?)?)
    }

    /// Buffer counters. `live_keys` counts stored indexes.
    pub fn stats(&self) -> Result<StoreStats> {
        let state = self.read_state()?;
        Ok(StoreStats {
            live_keys: state.slots.len(),
            buffer_len: state.records.len(),
            buffer_capacity: state.records.capacity(),
            dead_bytes: state.records.dead_bytes(),
        })
    }
}

impl Serialize for TypedArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let values = self.values().map_err(S::Error::custom)?;

        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in &values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
