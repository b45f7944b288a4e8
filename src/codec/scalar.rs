use crate::codec::{TypeTag, Value, decode};
use crate::error::Result;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

/// Exact Rust type a scalar was stored from.
///
/// Records only carry the coarse [`TypeTag`] (`Int`, `Uint`, `Float`...).
/// Containers that must hand back the original width keep one of these
/// next to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    String,
    Bool,
    Time,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl ScalarKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Time => "time",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Record tag this kind encodes under.
    pub const fn tag(self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::String => TypeTag::String,
            Self::Bool => TypeTag::Bool,
            Self::Time => TypeTag::Time,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize => TypeTag::Int,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize => TypeTag::Uint,
            Self::F32 | Self::F64 => TypeTag::Float,
        }
    }

    /// Decodes `record` as a [`Value`] of this width.
    ///
    /// Only floats differ from a plain `Value` decode: an `F32` record
    /// comes back as [`Value::Float32`].
    pub fn decode_value(self, record: &[u8]) -> Result<Value> {
        let value = match self {
            Self::F32 => decode::<f32>(record)?.map(Value::Float32),
            _ => decode::<Value>(record)?,
        };
        Ok(value.unwrap_or(Value::Null))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single value that remembers its exact width.
///
/// Implemented for the primitive numbers, `bool`, strings, times and
/// `Option` of any of those (`None` is stored as `Null`).
pub trait Scalar: Into<Value> {
    fn kind(&self) -> ScalarKind;
}

macro_rules! scalar {
    ($($t:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $t {
            #[inline]
            fn kind(&self) -> ScalarKind {
                ScalarKind::$kind
            }
        }
    )*};
}

scalar! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
    bool => Bool,
    String => String,
    &str => String,
    DateTime<FixedOffset> => Time,
    DateTime<Utc> => Time,
}

impl<T: Scalar> Scalar for Option<T> {
    #[inline]
    fn kind(&self) -> ScalarKind {
        self.as_ref().map_or(ScalarKind::Null, Scalar::kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn kinds_follow_native_width() {
        assert_eq!(7u16.kind(), ScalarKind::U16);
        assert_eq!((-7isize).kind(), ScalarKind::Isize);
        assert_eq!(1.5f32.kind(), ScalarKind::F32);
        assert_eq!("x".kind(), ScalarKind::String);
        assert_eq!(Some(3i8).kind(), ScalarKind::I8);
        assert_eq!(None::<i8>.kind(), ScalarKind::Null);
        assert_eq!(ScalarKind::U16.tag(), TypeTag::Uint);
    }

    #[test]
    fn f32_kind_decodes_narrow() {
        let record = encode(&Value::from(0.1f32));

        assert_eq!(ScalarKind::F32.decode_value(&record).unwrap(), Value::Float32(0.1));
        assert!(matches!(
            ScalarKind::F64.decode_value(&record).unwrap(),
            Value::Float64(_)
        ));
        assert_eq!(
            ScalarKind::Null.decode_value(&encode(&Value::Null)).unwrap(),
            Value::Null
        );
    }
}
