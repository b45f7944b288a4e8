pub mod constants;
pub use constants::*;

pub mod digest;

mod key_indexer;
pub use key_indexer::KeyIndexer;

mod store_stats;
pub use store_stats::StoreStats;

mod record_buffer;

mod typed_store;
pub use typed_store::TypedStore;

mod typed_array;
pub use typed_array::TypedArray;

mod typed_object;
pub use typed_object::TypedObject;

mod json_projection;

pub mod traits;
