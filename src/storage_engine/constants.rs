/// Initial buffer capacity hint used by `TypedStore::new` (1 MiB).
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Initial buffer capacity hint for `TypedArray` and `TypedObject` (4 KiB).
pub const DEFAULT_CONTAINER_CAPACITY: usize = 4 * 1024;
