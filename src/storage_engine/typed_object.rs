use crate::codec::{Decode, Scalar, ScalarKind, Value, decode, encode};
use crate::error::{KabanError, Result};
use crate::storage_engine::StoreStats;
use crate::storage_engine::constants::DEFAULT_CONTAINER_CAPACITY;
use crate::storage_engine::digest::Xxh3BuildHasher;
use crate::storage_engine::record_buffer::{RecordBuffer, RecordSlot};
use crate::storage_engine::traits::StoreReader;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug)]
struct ObjectState {
    slots: HashMap<String, RecordSlot, Xxh3BuildHasher>,
    /// Keys in first-insertion order.
    order: Vec<String>,
    records: RecordBuffer,
}

impl ObjectState {
    fn copy_slot(&self, key: &str) -> Result<(ScalarKind, Vec<u8>)> {
        let slot = self.slots.get(key).ok_or_else(|| KabanError::not_found(key))?;
        let record = self
            .records
            .copy_record(slot.offset)?
            .ok_or_else(|| KabanError::not_found(key))?;
        Ok((slot.kind, record))
    }
}

/// Insertion-ordered map of scalars over one append-only buffer.
///
/// Keys come back in the order they were first stored; overwriting a key
/// keeps its position. Each entry remembers the exact width it was stored
/// with, so [`StoreReader::load_value`] hands an `f32` back as
/// [`Value::Float32`].
///
/// ```
/// use kaban::{TypedObject, traits::StoreReader};
///
/// let object = TypedObject::new();
/// object.store("name", "kaban").unwrap();
/// object.store("ratio", 0.5f32).unwrap();
/// object.store("id", 9u16).unwrap();
///
/// assert_eq!(object.keys().unwrap(), ["name", "ratio", "id"]);
/// assert_eq!(object.load_u16("id").unwrap(), Some(9));
/// assert_eq!(object.to_json().unwrap(), r#"{"name":"kaban","ratio":0.5,"id":9}"#);
/// ```
#[derive(Debug)]
pub struct TypedObject {
    state: RwLock<ObjectState>,
}

impl Default for TypedObject {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedObject {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CONTAINER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(ObjectState {
                slots: HashMap::with_hasher(Xxh3BuildHasher),
                order: Vec::new(),
                records: RecordBuffer::with_capacity(capacity),
            }),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, ObjectState>> {
        self.state.read().map_err(|_| KabanError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, ObjectState>> {
        self.state.write().map_err(|_| KabanError::LockPoisoned)
    }

    #[inline]
    fn check_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KabanError::InvalidKey);
        }
        Ok(())
    }

    /// Writes `value` under `key`, tombstoning any previous record.
    pub fn store<V: Scalar>(&self, key: &str, value: V) -> Result<()> {
        Self::check_key(key)?;
        let kind = value.kind();
        let record = encode(&value.into());

        let mut guard = self.write_state()?;
        let state = &mut *guard;
        let offset = state.records.append(&record);
        let slot = RecordSlot { offset, kind };

        if let Some(existing) = state.slots.get_mut(key) {
            let prev = std::mem::replace(existing, slot);
            debug!(key, prev_offset = prev.offset, offset, "Overwrote object key.");
            state.records.tombstone(prev.offset);
        } else {
            state.slots.insert(key.to_owned(), slot);
            state.order.push(key.to_owned());
        }
        Ok(())
    }

    /// Width stored under `key`.
    pub fn kind_of(&self, key: &str) -> Result<ScalarKind> {
        Self::check_key(key)?;
        self.read_state()?
            .slots
            .get(key)
            .map(|slot| slot.kind)
            .ok_or_else(|| KabanError::not_found(key))
    }

    /// Removes `key`. Returns `false` if it was not present.
    ///
    /// Storing the key again appends it at the end of the order.
    pub fn delete(&self, key: &str) -> Result<bool> {
        Self::check_key(key)?;

        let mut state = self.write_state()?;
        match state.slots.remove(key) {
            Some(slot) => {
                state.records.tombstone(slot.offset);
                state.order.retain(|k| k != key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Every entry in insertion order, at stored width.
    pub fn entries(&self) -> Result<Vec<(String, Value)>> {
        let state = self.read_state()?;
        let copied = state
            .order
            .iter()
            .map(|key| state.copy_slot(key).map(|slot| (key.clone(), slot)))
            .collect::<Result<Vec<_>>>()?;
        drop(state);

        copied
            .into_iter()
            .map(|(key, (kind, record))| Ok((key, kind.decode_value(&record)?)))
            .collect()
    }

    /// Renders the object as one JSON object in insertion order.
    pub fn to_json(&self) -> Result<String> {
        let entries = self.entries()?;

        let mut json = String::with_capacity(entries.len() * 16 + 2);
        json.push('{');
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                json.push(',');
            }
            json.push_str(&serde_json::to_string(key)?);
            json.push(':');
            json.push_str(&serde_json::to_string(value)?);
        }
        json.push('}');

        Ok(json)
    }

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

impl StoreReader for TypedObject {
    fn load<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        Self::check_key(key)?;
        let (_, record) = self.read_state()?.copy_slot(key)?;
        decode(&record)
    }

    fn load_value(&self, key: &str) -> Result<Value> {
        Self::check_key(key)?;
        let (kind, record) = self.read_state()?.copy_slot(key)?;
        kind.decode_value(&record)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Self::check_key(key)?;
        Ok(self.read_state()?.slots.contains_key(key))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read_state()?.slots.len())
    }

    /// Keys in insertion order.
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_state()?.order.clone())
    }
}

impl Serialize for TypedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entries().map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
