//! # Kaban
//!
//! In-memory typed key-value store. Values are encoded into tagged,
//! terminator-delimited records and appended to one growable buffer instead
//! of being boxed per entry. Overwrites tombstone the old record in place.
//!
//! ```
//! use kaban::{TypedStore, traits::{StoreReader, StoreWriter}};
//!
//! let store = TypedStore::new();
//! store.store("answer", 42i64).unwrap();
//! store.store("answer", 300i64).unwrap();
//!
//! assert_eq!(store.load_i64("answer").unwrap(), Some(300));
//! assert!(store.load_i8("answer").is_err());
//! ```

pub mod codec;
pub use codec::{Decode, Scalar, ScalarKind, TypeTag, Value};

pub mod error;
pub use error::{KabanError, Result};

pub mod storage_engine;
pub use storage_engine::*;

pub mod utils;
pub use utils::format_bytes;
