//! Base-36 integer text, the payload format for `Int`/`Uint` records.

pub const INT_RADIX: u32 = 36;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// u64::MAX needs 13 base-36 digits.
const MAX_DIGITS: usize = 13;

/// Appends the base-36 digits of `value` to `out`.
pub fn push_u64(out: &mut Vec<u8>, mut value: u64) {
    let mut scratch = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;

    loop {
        pos -= 1;
        scratch[pos] = DIGITS[(value % INT_RADIX as u64) as usize];
        value /= INT_RADIX as u64;
        if value == 0 {
            break;
        }
    }

    out.extend_from_slice(&scratch[pos..]);
}

/// Appends `value` as an optional `-` followed by its base-36 magnitude.
pub fn push_i64(out: &mut Vec<u8>, value: i64) {
    if value < 0 {
        out.push(b'-');
    }
    push_u64(out, value.unsigned_abs());
}

#[inline]
fn as_text(digits: &[u8]) -> Option<&str> {
    // `from_str_radix` tolerates a leading `+`, the encoder never writes one
    if digits.first() == Some(&b'+') {
        return None;
    }
    std::str::from_utf8(digits).ok()
}

pub fn parse_i64(digits: &[u8]) -> Option<i64> {
    as_text(digits).and_then(|s| i64::from_str_radix(s, INT_RADIX).ok())
}

pub fn parse_u64(digits: &[u8]) -> Option<u64> {
    as_text(digits).and_then(|s| u64::from_str_radix(s, INT_RADIX).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_i64(value: i64) -> String {
        let mut out = Vec::new();
        push_i64(&mut out, value);
        String::from_utf8(out).unwrap()
    }

    fn render_u64(value: u64) -> String {
        let mut out = Vec::new();
        push_u64(&mut out, value);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_known_values() {
        assert_eq!(render_u64(0), "0");
        assert_eq!(render_u64(35), "z");
        assert_eq!(render_u64(36), "10");
        assert_eq!(render_i64(-987_654_321), "-gc0uy9");
        assert_eq!(render_u64(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn extremes_survive() {
        for value in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX] {
            assert_eq!(parse_i64(render_i64(value).as_bytes()), Some(value));
        }
        for value in [0, 1, u64::MAX - 1, u64::MAX] {
            assert_eq!(parse_u64(render_u64(value).as_bytes()), Some(value));
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_i64(b""), None);
        assert_eq!(parse_i64(b"+1"), None);
        assert_eq!(parse_u64(b"-1"), None);
        assert_eq!(parse_u64(b"!!"), None);
        assert_eq!(parse_u64(b"3w5e11264sgsg"), None);
    }
}
