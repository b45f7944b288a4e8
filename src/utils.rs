mod format_bytes;
pub use format_bytes::format_bytes;

mod gzip;
pub use gzip::{compress_gzip, decompress_gzip};

mod hex_dump;
pub use hex_dump::hex_dump;

mod parse_buffer_size;
pub use parse_buffer_size::parse_buffer_size;
