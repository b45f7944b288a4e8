use crate::error::Result;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};

/// Gzip-compresses `data` at the default level.
pub fn compress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflates a gzip stream produced by [`compress_gzip`] (or any gzip writer).
pub fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::with_capacity(data.len() * 2);
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KabanError;

    #[test]
    fn compressed_json_inflates_back() {
        let json = br#"{"a":"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa","b":1}"#;
        let packed = compress_gzip(json).unwrap();
        assert_eq!(decompress_gzip(&packed).unwrap(), json);
    }

    #[test]
    fn garbage_is_an_io_error() {
        assert!(matches!(
            decompress_gzip(b"not gzip"),
            Err(KabanError::Io(_))
        ));
    }
}
