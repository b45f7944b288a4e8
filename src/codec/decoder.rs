use crate::codec::radix::{parse_i64, parse_u64};
use crate::codec::{TypeTag, Value, parse_time};
use crate::error::{KabanError, Result};
use chrono::{DateTime, FixedOffset, Utc};

/// Borrowed view of one record with the terminator already stripped.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub tag: TypeTag,
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    /// Splits `[tag][payload]` bytes into a record view.
    ///
    /// A trailing terminator, if still present, is dropped.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let (&first, rest) = bytes
            .split_first()
            .ok_or_else(|| KabanError::malformed(TypeTag::Terminator, "empty record"))?;

        let tag = TypeTag::try_from(first).map_err(|byte| {
            KabanError::malformed(TypeTag::Terminator, format!("unknown tag byte {byte:#04X}"))
        })?;

        let payload = match rest.split_last() {
            Some((&last, body)) if last == TypeTag::Terminator.as_byte() => body,
            _ => rest,
        };

        Ok(Self { tag, payload })
    }

    #[inline]
    fn expect(&self, tag: TypeTag, kind: &'static str) -> Result<()> {
        if self.tag == tag {
            Ok(())
        } else {
            Err(KabanError::TypeMismatch {
                expected: kind,
                found: self.tag,
            })
        }
    }

    #[inline]
    fn text(&self) -> Result<&'a str> {
        std::str::from_utf8(self.payload).map_err(|err| KabanError::malformed(self.tag, err))
    }

    /// Element payloads of a slice record whose inner tag must be `inner`.
    fn elements(&self, inner: TypeTag, kind: &'static str) -> Result<Vec<&'a [u8]>> {
        self.expect(TypeTag::Slice, kind)?;

        let (&inner_byte, body) = self
            .payload
            .split_first()
            .ok_or_else(|| KabanError::malformed(TypeTag::Slice, "missing element tag"))?;

        let found = TypeTag::try_from(inner_byte)
            .ok()
            .filter(|tag| tag.is_slice_element())
            .ok_or_else(|| {
                KabanError::malformed(
                    TypeTag::Slice,
                    format!("invalid element tag {inner_byte:#04X}"),
                )
            })?;

        if found != inner {
            return Err(KabanError::TypeMismatch {
                expected: kind,
                found,
            });
        }

        match body.first() {
            None => Ok(Vec::new()),
            // Every element is preceded by the separator, so the first chunk is always empty.
            Some(&b) if b == inner_byte => Ok(body.split(|&b| b == inner_byte).skip(1).collect()),
            Some(_) => Err(KabanError::malformed(
                TypeTag::Slice,
                "element does not start with separator",
            )),
        }
    }
}

/// Destination types a record can be decoded into.
pub trait Decode: Sized {
    /// Human-readable destination name used in errors.
    const KIND: &'static str;

    fn decode_record(record: &Record<'_>) -> Result<Self>;
}

/// Decodes `[tag][payload]` bytes into `T`.
///
/// Returns `Ok(None)` for a `Null` record; the caller decides what "no value"
/// means for its destination.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<Option<T>> {
    let record = Record::parse(bytes)?;

    match record.tag {
        TypeTag::Null => Ok(None),
        TypeTag::Dead | TypeTag::Terminator => Err(KabanError::malformed(
            record.tag,
            "record is not readable",
        )),
        _ => T::decode_record(&record).map(Some),
    }
}

fn parse_signed(tag: TypeTag, digits: &[u8]) -> Result<i64> {
    parse_i64(digits).ok_or_else(|| {
        KabanError::malformed(tag, format!("invalid integer {:?}", String::from_utf8_lossy(digits)))
    })
}

fn parse_unsigned(tag: TypeTag, digits: &[u8]) -> Result<u64> {
    parse_u64(digits).ok_or_else(|| {
        KabanError::malformed(tag, format!("invalid integer {:?}", String::from_utf8_lossy(digits)))
    })
}

fn narrow<W, N>(wide: W, target: &'static str) -> Result<N>
where
    W: Copy + ToString,
    N: TryFrom<W>,
{
    N::try_from(wide).map_err(|_| KabanError::Overflow {
        value: wide.to_string(),
        target,
    })
}

fn decode_string(bytes: &[u8], tag: TypeTag) -> Result<String> {
    // `from_utf8` validates whole code points; a split multi-byte sequence is an error.
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| KabanError::malformed(tag, err))
}

macro_rules! decode_signed {
    ($($t:ty),*) => {$(
        impl Decode for $t {
            const KIND: &'static str = stringify!($t);

            fn decode_record(record: &Record<'_>) -> Result<Self> {
                record.expect(TypeTag::Int, Self::KIND)?;
                narrow(parse_signed(record.tag, record.payload)?, Self::KIND)
            }
        }

        impl Decode for Vec<$t> {
            const KIND: &'static str = concat!("[", stringify!($t), "]");

            fn decode_record(record: &Record<'_>) -> Result<Self> {
                record
                    .elements(TypeTag::Int, Self::KIND)?
                    .into_iter()
                    .map(|chunk| narrow(parse_signed(TypeTag::Slice, chunk)?, stringify!($t)))
                    .collect()
            }
        }
    )*};
}

macro_rules! decode_unsigned {
    ($($t:ty),*) => {$(
        impl Decode for $t {
            const KIND: &'static str = stringify!($t);

            fn decode_record(record: &Record<'_>) -> Result<Self> {
                record.expect(TypeTag::Uint, Self::KIND)?;
                narrow(parse_unsigned(record.tag, record.payload)?, Self::KIND)
            }
        }

        impl Decode for Vec<$t> {
            const KIND: &'static str = concat!("[", stringify!($t), "]");

            fn decode_record(record: &Record<'_>) -> Result<Self> {
                record
                    .elements(TypeTag::Uint, Self::KIND)?
                    .into_iter()
                    .map(|chunk| narrow(parse_unsigned(TypeTag::Slice, chunk)?, stringify!($t)))
                    .collect()
            }
        }
    )*};
}

decode_signed!(i8, i16, i32, i64, isize);
decode_unsigned!(u8, u16, u32, u64, usize);

impl Decode for String {
    const KIND: &'static str = "string";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record.expect(TypeTag::String, Self::KIND)?;
        decode_string(record.payload, record.tag)
    }
}

impl Decode for Vec<String> {
    const KIND: &'static str = "[string]";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record
            .elements(TypeTag::String, Self::KIND)?
            .into_iter()
            .map(|chunk| decode_string(chunk, TypeTag::Slice))
            .collect()
    }
}

impl Decode for bool {
    const KIND: &'static str = "bool";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record.expect(TypeTag::Bool, Self::KIND)?;
        match record.payload {
            b"t" => Ok(true),
            b"f" => Ok(false),
            other => Err(KabanError::malformed(
                record.tag,
                format!("expected 't' or 'f', got {:?}", String::from_utf8_lossy(other)),
            )),
        }
    }
}

impl Decode for f64 {
    const KIND: &'static str = "f64";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record.expect(TypeTag::Float, Self::KIND)?;
        record
            .text()?
            .parse::<f64>()
            .map_err(|err| KabanError::malformed(record.tag, err))
    }
}

impl Decode for f32 {
    const KIND: &'static str = "f32";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record.expect(TypeTag::Float, Self::KIND)?;
        let text = record.text()?;

        // Parsed directly at 32 bits to avoid double rounding through f64.
        let value = text
            .parse::<f32>()
            .map_err(|err| KabanError::malformed(record.tag, err))?;

        if value.is_infinite() {
            let wide = text
                .parse::<f64>()
                .map_err(|err| KabanError::malformed(record.tag, err))?;
            if wide.is_finite() {
                return Err(KabanError::Overflow {
                    value: text.to_string(),
                    target: Self::KIND,
                });
            }
        }

        Ok(value)
    }
}

impl Decode for DateTime<FixedOffset> {
    const KIND: &'static str = "time";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        record.expect(TypeTag::Time, Self::KIND)?;
        parse_time(record.text()?)
    }
}

impl Decode for DateTime<Utc> {
    const KIND: &'static str = "time";

    fn decode_record(record: &Record<'_>) -> Result<Self> {
        DateTime::<FixedOffset>::decode_record(record).map(|t| t.with_timezone(&Utc))
    }
}

impl Decode for Value {
    const KIND: &'static str = "value";

    /// Decodes whatever the record holds. Float records come back as
    /// [`Value::Float64`] since the stored text does not carry its width.
    fn decode_record(record: &Record<'_>) -> Result<Self> {
        Ok(match record.tag {
            TypeTag::Null => Value::Null,
            TypeTag::String => Value::String(String::decode_record(record)?),
            TypeTag::Bool => Value::Bool(bool::decode_record(record)?),
            TypeTag::Int => Value::Int(i64::decode_record(record)?),
            TypeTag::Uint => Value::Uint(u64::decode_record(record)?),
            TypeTag::Float => Value::Float64(f64::decode_record(record)?),
            TypeTag::Time => Value::Time(DateTime::<FixedOffset>::decode_record(record)?),
            TypeTag::Slice => match record.payload.first().map(|&b| TypeTag::try_from(b)) {
                Some(Ok(TypeTag::String)) => Value::Strings(Vec::<String>::decode_record(record)?),
                Some(Ok(TypeTag::Int)) => Value::Ints(Vec::<i64>::decode_record(record)?),
                Some(Ok(TypeTag::Uint)) => Value::Uints(Vec::<u64>::decode_record(record)?),
                _ => {
                    return Err(KabanError::malformed(
                        TypeTag::Slice,
                        "missing or invalid element tag",
                    ));
                }
            },
            TypeTag::Dead | TypeTag::Terminator => {
                return Err(KabanError::malformed(record.tag, "record is not readable"));
            }
        })
    }
}
