use crate::codec::{Decode, Value};
use crate::error::Result;
use chrono::{DateTime, FixedOffset};

pub trait StoreReader {
    /// Loads the live value for `key`, decoded into `T`.
    ///
    /// # Returns:
    /// - `Ok(Some(value))`: The record decoded into `T`.
    /// - `Ok(None)`: The stored value is `Null`.
    /// - `Err(KabanError::InvalidKey)`: `key` is empty.
    /// - `Err(KabanError::KeyNotFound)`: No live record for `key`.
    /// - `Err(KabanError::TypeMismatch)`: The record holds a different type.
    /// - `Err(KabanError::Overflow)`: The stored number does not fit in `T`.
    ///
    /// # Notes:
    /// - The record bytes are copied out under the shared lock and decoded
    ///   after the lock is released.
    fn load<T: Decode>(&self, key: &str) -> Result<Option<T>>;

    /// Loads `key` into `dest`.
    ///
    /// `dest` is only written on success with a non-null value. A `Null`
    /// record or any error leaves it untouched.
    fn load_into<T: Decode>(&self, key: &str, dest: &mut T) -> Result<()> {
        if let Some(value) = self.load(key)? {
            *dest = value;
        }
        Ok(())
    }

    /// Loads whatever is stored under `key`, `Null` included.
    fn load_value(&self, key: &str) -> Result<Value> {
        Ok(self.load::<Value>(key)?.unwrap_or(Value::Null))
    }

    /// Whether `key` currently has a live record.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Number of live keys.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Live keys. `TypedStore` sorts them, `TypedObject` keeps
    /// first-insertion order.
    fn keys(&self) -> Result<Vec<String>>;

    fn load_string(&self, key: &str) -> Result<Option<String>> {
        self.load(key)
    }

    fn load_bool(&self, key: &str) -> Result<Option<bool>> {
        self.load(key)
    }

    fn load_i8(&self, key: &str) -> Result<Option<i8>> {
        self.load(key)
    }

    fn load_i16(&self, key: &str) -> Result<Option<i16>> {
        self.load(key)
    }

    fn load_i32(&self, key: &str) -> Result<Option<i32>> {
        self.load(key)
    }

    fn load_i64(&self, key: &str) -> Result<Option<i64>> {
        self.load(key)
    }

    fn load_isize(&self, key: &str) -> Result<Option<isize>> {
        self.load(key)
    }

    fn load_u8(&self, key: &str) -> Result<Option<u8>> {
        self.load(key)
    }

    fn load_u16(&self, key: &str) -> Result<Option<u16>> {
        self.load(key)
    }

    fn load_u32(&self, key: &str) -> Result<Option<u32>> {
        self.load(key)
    }

    fn load_u64(&self, key: &str) -> Result<Option<u64>> {
        self.load(key)
    }

    fn load_usize(&self, key: &str) -> Result<Option<usize>> {
        self.load(key)
    }

    fn load_f32(&self, key: &str) -> Result<Option<f32>> {
        self.load(key)
    }

    fn load_f64(&self, key: &str) -> Result<Option<f64>> {
        self.load(key)
    }

    fn load_time(&self, key: &str) -> Result<Option<DateTime<FixedOffset>>> {
        self.load(key)
    }

    fn load_strings(&self, key: &str) -> Result<Option<Vec<String>>> {
        self.load(key)
    }

    fn load_ints(&self, key: &str) -> Result<Option<Vec<i64>>> {
        self.load(key)
    }

    fn load_uints(&self, key: &str) -> Result<Option<Vec<u64>>> {
        self.load(key)
    }
}
