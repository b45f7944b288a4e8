use crate::codec::TypeTag;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KabanError {
    #[error("key must not be empty")]
    InvalidKey,

    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: TypeTag,
    },

    #[error("value {value} does not fit in {target}")]
    Overflow { value: String, target: &'static str },

    #[error("malformed {tag} payload: {reason}")]
    MalformedPayload { tag: TypeTag, reason: String },

    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("no terminator after record at offset {offset}")]
    TerminatorNotFound { offset: usize },

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KabanError {
    pub(crate) fn not_found(key: &str) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn malformed(tag: TypeTag, reason: impl ToString) -> Self {
        Self::MalformedPayload {
            tag,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KabanError>;

impl From<std::convert::Infallible> for KabanError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
