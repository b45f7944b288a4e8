use crate::codec::{Value, decode};
use crate::error::Result;
use crate::storage_engine::TypedStore;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl TypedStore {
    /// Decodes every live record, sorted by key.
    ///
    /// Records are copied out under one shared lock; decoding happens after
    /// the lock is released (in parallel with the `parallel` feature).
    pub fn entries(&self) -> Result<Vec<(String, Value)>> {
        let records = self.snapshot_records()?;

        #[cfg(feature = "parallel")]
        let iter = records.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = records.into_iter();

        let mut entries = iter
            .map(|(key, record)| -> Result<(String, Value)> {
                let value = decode::<Value>(&record)?.unwrap_or(Value::Null);
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;

        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    /// Renders the store as one JSON object.
    ///
    /// Keys are sorted. Keys and string values are escaped; `Null` becomes
    /// `null`, non-finite floats become `null`, times are RFC 3339 strings,
    /// and slices become arrays.
    ///
    /// # Examples
    /// ```
    /// use kaban::{TypedStore, traits::StoreWriter};
    ///
    /// let store = TypedStore::with_capacity(64);
    /// store.store("name", "say \"hi\"").unwrap();
    /// store.store("n", 42u8).unwrap();
    /// store.store("tags", vec!["a", "b"]).unwrap();
    ///
    /// assert_eq!(
    ///     store.to_json().unwrap(),
    ///     r#"{"n":42,"name":"say \"hi\"","tags":["a","b"]}"#
    /// );
    /// ```
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
}

impl Serialize for TypedStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entries().map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
