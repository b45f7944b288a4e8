use std::fmt;

/// One-byte record tag.
///
/// Every tag lives in the `0xF5..=0xFF` range. Those bytes never occur in
/// valid UTF-8, which is what lets string payloads sit next to tags and the
/// terminator without any escaping.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Superseded record. Written over the leading tag byte on overwrite.
    Dead = 0xFF,
    /// End of value.
    Terminator = 0xFE,
    Null = 0xFD,
    String = 0xFC,
    Bool = 0xFB,
    Int = 0xFA,
    Uint = 0xF9,
    Float = 0xF8,
    Time = 0xF7,
    Slice = 0xF6,
}

/// Lowest byte value reserved for tags (`0xF5` itself is unassigned).
pub const RESERVED_TAG_FLOOR: u8 = 0xF5;

impl TypeTag {
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Tags that may follow a `Slice` tag as the element type.
    #[inline]
    pub const fn is_slice_element(self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Uint)
    }

    /// `true` for tags that start a readable record.
    #[inline]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Dead | Self::Terminator)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::Terminator => "terminator",
            Self::Null => "null",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Time => "time",
            Self::Slice => "slice",
        }
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0xFF => Self::Dead,
            0xFE => Self::Terminator,
            0xFD => Self::Null,
            0xFC => Self::String,
            0xFB => Self::Bool,
            0xFA => Self::Int,
            0xF9 => Self::Uint,
            0xF8 => Self::Float,
            0xF7 => Self::Time,
            0xF6 => Self::Slice,
            other => return Err(other),
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
