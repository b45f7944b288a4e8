//! Helpers layered on top of [`kaban`]: a JSON-backed dictionary and
//! JSON import for [`kaban::TypedStore`].

mod json_dictionary;
pub use json_dictionary::*;

mod store_json_ext;
pub use store_json_ext::*;
