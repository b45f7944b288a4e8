use crate::codec::Value;
use crate::error::{KabanError, Result};

pub trait StoreWriter {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The value is converted and encoded before the exclusive lock is
    /// taken, so a failed conversion leaves the store untouched.
    ///
    /// # Parameters:
    /// - `key`: A non-empty key.
    /// - `value`: Anything convertible into a [`Value`]. Native scalars and
    ///   slices convert infallibly; `serde_json::Value` may fail with
    ///   `UnsupportedType`.
    ///
    /// # Returns:
    /// - `Ok(())` once the record is appended and indexed.
    /// - `Err(KabanError::InvalidKey)`: `key` is empty (checked first).
    /// - `Err(KabanError::UnsupportedType)`: The value has no encoding.
    ///
    /// # Notes:
    /// - An existing record for `key` is tombstoned in place; its bytes
    ///   stay in the buffer.
    fn store<V>(&self, key: &str, value: V) -> Result<()>
    where
        V: TryInto<Value>,
        KabanError: From<V::Error>;

    /// Stores several entries under one exclusive lock.
    ///
    /// All keys are validated and all values encoded before anything is
    /// written; a later duplicate key in `entries` supersedes an earlier one.
    ///
    /// # Returns:
    /// - `Ok(count)`: Number of records appended.
    fn store_all<K, V, I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: TryInto<Value>,
        KabanError: From<V::Error>;

    /// Tombstones the live record for `key` and drops it from the index.
    ///
    /// # Returns:
    /// - `Ok(true)`: A live record was removed.
    /// - `Ok(false)`: Nothing was stored under `key`.
    fn delete(&self, key: &str) -> Result<bool>;
}
