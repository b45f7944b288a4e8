use std::fmt::Write;

const BYTES_PER_ROW: usize = 16;

/// Renders `bytes` as a hex table, 16 bytes per row.
///
/// ```text
///     |00----02----04----06----08----0A----0C----0E---
/// 0000|FC 68 69 FE
/// ```
///
/// The row label is the row number (offset / 16) in hex.
pub fn hex_dump(bytes: &[u8]) -> String {
    let rows = bytes.len().div_ceil(BYTES_PER_ROW);
    let mut out = String::with_capacity(50 + rows * (6 + BYTES_PER_ROW * 3));

    out.push_str("    |00----02----04----06----08----0A----0C----0E---\n");

    for (row, chunk) in bytes.chunks(BYTES_PER_ROW).enumerate() {
        // Writing to a String cannot fail
        let _ = write!(out, "{:04X}|", row);
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02X}", byte);
        }
        out.push('\n');
    }

    out
}
