use crate::codec::{Decode, TypeTag, Value, decode, encode};
use crate::error::{KabanError, Result};
use crate::storage_engine::constants::DEFAULT_CAPACITY;
use crate::storage_engine::traits::{StoreReader, StoreWriter};
use crate::storage_engine::record_buffer::RecordBuffer;
use crate::storage_engine::{KeyIndexer, StoreStats};
use crate::utils::hex_dump;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Index and buffer, always guarded together.
#[derive(Debug)]
struct StoreState {
    index: KeyIndexer,
    records: RecordBuffer,
}

impl StoreState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: KeyIndexer::new(),
            records: RecordBuffer::with_capacity(capacity),
        }
    }

    /// Appends `record` at the buffer tail and repoints `key` at it,
    /// tombstoning whatever `key` pointed at before.
    fn append(&mut self, key: &str, record: &[u8]) {
        let offset = self.records.append(record);

        if let Some(prev_offset) = self.index.insert(key, offset) {
            debug!(key, prev_offset, offset, "Overwrote key; previous record tombstoned.");
            self.records.tombstone(prev_offset);
        }
    }
}

/// Concurrency-safe typed key-value store over one append-only buffer.
///
/// Values are encoded into tagged records and appended to a single growable
/// `Vec<u8>`. Overwriting a key marks its old record dead in place and
/// appends a fresh one; dead bytes are never reclaimed.
///
/// A single `RwLock` per store guards the index and the buffer. Writers hold
/// it exclusively for tombstone + append + index update. Readers hold it
/// shared only long enough to copy one record out, then decode unlocked.
#[derive(Debug)]
pub struct TypedStore {
    state: RwLock<StoreState>,
}

impl Default for TypedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedStore {
    /// Creates an empty store with the default capacity hint.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty store whose buffer pre-reserves `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(StoreState::with_capacity(capacity)),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| KabanError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| KabanError::LockPoisoned)
    }

    #[inline]
    fn check_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KabanError::InvalidKey);
        }
        Ok(())
    }

    /// Copies the live record for `key` out of the buffer.
    fn locate(&self, key: &str) -> Result<Vec<u8>> {
        Self::check_key(key)?;

        let state = self.read_state()?;
        let offset = state
            .index
            .get_offset(key)
            .ok_or_else(|| KabanError::not_found(key))?;

        state
            .records
            .copy_record(offset)?
            .ok_or_else(|| KabanError::not_found(key))
    }

    /// Full record bytes for `key`, terminator included.
    pub fn raw_record(&self, key: &str) -> Result<Vec<u8>> {
        let mut record = self.locate(key)?;
        record.push(TypeTag::Terminator.as_byte());
        Ok(record)
    }

    /// Buffer and index counters.
    pub fn stats(&self) -> Result<StoreStats> {
        let state = self.read_state()?;
        Ok(StoreStats {
            live_keys: state.index.len(),
            buffer_len: state.records.len(),
            buffer_capacity: state.records.capacity(),
            dead_bytes: state.records.dead_bytes(),
        })
    }

    /// Hex dump of the whole buffer, dead records included.
    pub fn hex_dump(&self) -> Result<String> {
        let snapshot = self.read_state()?.records.as_bytes().to_vec();
        Ok(hex_dump(&snapshot))
    }

    /// Copies every live `(key, record)` pair under one shared lock.
    pub(crate) fn snapshot_records(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let state = self.read_state()?;
        let mut records = Vec::with_capacity(state.index.len());

        for (key, offset) in state.index.iter() {
            if let Some(record) = state.records.copy_record(offset)? {
                records.push((key.to_string(), record));
            }
        }

        Ok(records)
    }
}

impl StoreWriter for TypedStore {
    fn store<V>(&self, key: &str, value: V) -> Result<()>
    where
        V: TryInto<Value>,
        KabanError: From<V::Error>,
    {
        Self::check_key(key)?;
        let record = encode(&value.try_into()?);

        self.write_state()?.append(key, &record);
        Ok(())
    }

    fn store_all<K, V, I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: TryInto<Value>,
        KabanError: From<V::Error>,
    {
        let encoded = entries
            .into_iter()
            .map(|(key, value)| -> Result<(K, Vec<u8>)> {
                Self::check_key(key.as_ref())?;
                Ok((key, encode(&value.try_into()?)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut state = self.write_state()?;
        for (key, record) in &encoded {
            state.append(key.as_ref(), record);
        }

        Ok(encoded.len())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Self::check_key(key)?;

        let mut state = self.write_state()?;
        match state.index.remove(key) {
            Some(offset) => {
                state.records.tombstone(offset);
                debug!(key, offset, "Deleted key.");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl StoreReader for TypedStore {
    fn load<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        let record = self.locate(key)?;
        decode(&record)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Self::check_key(key)?;
        Ok(self.read_state()?.index.get_offset(key).is_some())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read_state()?.index.len())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .read_state()?
            .index
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }
}
