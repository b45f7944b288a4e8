use dashmap::DashMap;
use kaban::{KabanError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Concurrent map of key to serialized JSON text.
///
/// Unlike [`kaban::TypedStore`], values may be any `Serialize` type; each one
/// is held as its own JSON document and decoded on load.
#[derive(Debug, Default, Clone)]
pub struct JsonDictionary {
    entries: DashMap<String, String>,
}

impl JsonDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` to JSON and stores it under `key`.
    ///
    /// # Returns:
    /// - `Err(KabanError::InvalidKey)` if `key` is empty.
    /// - `Err(KabanError::Json)` if `value` cannot be serialized.
    pub fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        check_key(key)?;
        let json = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    /// Deserializes the JSON stored under `key`.
    ///
    /// # Returns:
    /// - `Err(KabanError::KeyNotFound)` if `key` is absent.
    /// - `Err(KabanError::Json)` if the stored JSON does not fit `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        check_key(key)?;
        let json = self
            .entries
            .get(key)
            .ok_or_else(|| KabanError::KeyNotFound {
                key: key.to_string(),
            })?;
        Ok(serde_json::from_str(json.value())?)
    }

    /// Removes `key`. Returns whether it was present.
    pub fn delete(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }

    /// Stores every pair. Stops at the first failing pair; earlier pairs
    /// stay stored.
    pub fn store_all<K, T, I>(&self, pairs: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: Serialize,
    {
        let mut count = 0;
        for (key, value) in pairs {
            self.store(key.as_ref(), &value)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every entry of `other` into `self`, overwriting shared keys.
    pub fn merge(&self, other: &JsonDictionary) {
        for entry in other.entries.iter() {
            self.entries.insert(entry.key().clone(), entry.value().clone());
        }
        tracing::debug!(merged = other.len(), total = self.len(), "Merged dictionary.");
    }

    /// Renders all entries as one JSON object with sorted keys.
    pub fn to_json(&self) -> Result<String> {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut json = String::from("{");
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                json.push(',');
            }
            json.push_str(&serde_json::to_string(key)?);
            json.push(':');
            json.push_str(value);
        }
        json.push('}');

        Ok(json)
    }

    /// Builds a dictionary from a JSON object; each member becomes one entry.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let dictionary = Self::new();
        for (key, value) in &object {
            dictionary.store(key, value)?;
        }
        Ok(dictionary)
    }
}

impl fmt::Display for JsonDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => f.write_str(&json),
            Err(err) => write!(f, "{err}"),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KabanError::InvalidKey);
    }
    Ok(())
}
