mod reader;
pub use reader::StoreReader;

mod writer;
pub use writer::StoreWriter;
