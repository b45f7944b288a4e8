use kaban::{Result, TypedStore, Value, traits::StoreWriter};
use tracing::debug;

/// JSON entry points for [`TypedStore`].
///
/// JSON values are mapped through `Value::try_from`, so objects, nested
/// arrays and mixed arrays are rejected with `UnsupportedType`.
pub trait StoreJsonExt {
    /// Stores one JSON value under `key`.
    ///
    /// # Returns:
    /// - `Err(KabanError::UnsupportedType)` if the value has no typed shape.
    fn store_json(&self, key: &str, value: &serde_json::Value) -> Result<()>;

    /// Stores each top-level member of a JSON object.
    ///
    /// Nothing is stored unless every member converts.
    ///
    /// # Returns:
    /// - `Ok(count)`: The number of members stored.
    /// - `Err(KabanError::Json)` if `json` is not an object.
    fn import_json_object(&self, json: &str) -> Result<usize>;
}

impl StoreJsonExt for TypedStore {
    fn store_json(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        self.store(key, Value::try_from(value.clone())?)
    }

    fn import_json_object(&self, json: &str) -> Result<usize> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let stored = self.store_all(object)?;
        debug!(stored, "Imported JSON object.");
        Ok(stored)
    }
}
