use crate::codec::{TypeTag, format_time};
use crate::error::KabanError;
use chrono::{DateTime, FixedOffset, Utc};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Every value shape the store can hold.
///
/// Integers are widened to 64 bits on the way in; the destination width is
/// chosen again (and range-checked) on the way out. Floats keep their source
/// width because the shortest round-trip rendering depends on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Time(DateTime<FixedOffset>),
    Strings(Vec<String>),
    Ints(Vec<i64>),
    Uints(Vec<u64>),
}

impl Value {
    /// Leading tag of the record this value encodes to.
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::String(_) => TypeTag::String,
            Self::Bool(_) => TypeTag::Bool,
            Self::Int(_) => TypeTag::Int,
            Self::Uint(_) => TypeTag::Uint,
            Self::Float32(_) | Self::Float64(_) => TypeTag::Float,
            Self::Time(_) => TypeTag::Time,
            Self::Strings(_) | Self::Ints(_) | Self::Uints(_) => TypeTag::Slice,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        }

        impl From<Vec<$t>> for Value {
            fn from(v: Vec<$t>) -> Self {
                Self::Ints(v.into_iter().map(|n| n as i64).collect())
            }
        }

        impl From<&[$t]> for Value {
            fn from(v: &[$t]) -> Self {
                Self::Ints(v.iter().map(|&n| n as i64).collect())
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Uint(v as u64)
            }
        }

        impl From<Vec<$t>> for Value {
            fn from(v: Vec<$t>) -> Self {
                Self::Uints(v.into_iter().map(|n| n as u64).collect())
            }
        }

        impl From<&[$t]> for Value {
            fn from(v: &[$t]) -> Self {
                Self::Uints(v.iter().map(|&n| n as u64).collect())
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::Time(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v.fixed_offset())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::Strings(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        Self::Strings(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = KabanError;

    /// Maps a dynamically-typed JSON value onto a supported shape.
    ///
    /// Objects, nested arrays, and arrays that are not homogeneous strings or
    /// integers are rejected with [`KabanError::UnsupportedType`].
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Self::Null),
            Json::Bool(b) => Ok(Self::Bool(b)),
            Json::String(s) => Ok(Self::String(s)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Uint(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float64(f))
                } else {
                    Err(KabanError::UnsupportedType(format!("number {n}")))
                }
            }
            Json::Array(items) => array_from_json(items),
            other @ Json::Object(_) => Err(KabanError::UnsupportedType(format!("object {other}"))),
        }
    }
}

fn array_from_json(items: Vec<serde_json::Value>) -> Result<Value, KabanError> {
    use serde_json::Value as Json;

    if items.is_empty() {
        return Ok(Value::Strings(Vec::new()));
    }

    if items.iter().all(Json::is_string) {
        return Ok(Value::Strings(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Json::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ));
    }

    if items.iter().all(Json::is_i64) {
        return Ok(Value::Ints(items.iter().filter_map(Json::as_i64).collect()));
    }

    if items.iter().all(Json::is_u64) {
        return Ok(Value::Uints(items.iter().filter_map(Json::as_u64).collect()));
    }

    Err(KabanError::UnsupportedType(format!(
        "array {}",
        Json::Array(items)
    )))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::String(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Uint(n) => serializer.serialize_u64(*n),
            // JSON has no NaN or infinity
            Self::Float32(f) if !f.is_finite() => serializer.serialize_unit(),
            Self::Float32(f) => serializer.serialize_f32(*f),
            Self::Float64(f) if !f.is_finite() => serializer.serialize_unit(),
            Self::Float64(f) => serializer.serialize_f64(*f),
            Self::Time(t) => serializer.serialize_str(&format_time(t)),
            Self::Strings(items) => serialize_items(serializer, items),
            Self::Ints(items) => serialize_items(serializer, items),
            Self::Uints(items) => serialize_items(serializer, items),
        }
    }
}

fn serialize_items<S: Serializer, T: Serialize>(
    serializer: S,
    items: &[T],
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(item)?;
    }
    seq.end()
}
