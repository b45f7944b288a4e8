use crate::codec::radix::{push_i64, push_u64};
use crate::codec::{TypeTag, Value, format_time};
use std::io::Write;

/// Encodes `value` into a self-delimiting record:
/// `[tag][payload][Terminator]`.
///
/// Slice records carry the element tag right after the `Slice` tag and then
/// prefix every element with that same byte, so the decoder can split on it.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut record = Vec::with_capacity(encoded_len_hint(value));
    encode_into(&mut record, value);
    record
}

/// Appends the record for `value` to `out`.
pub fn encode_into(out: &mut Vec<u8>, value: &Value) {
    out.push(value.tag().as_byte());

    match value {
        Value::Null => {}
        Value::String(s) => out.extend_from_slice(s.as_bytes()),
        Value::Bool(b) => out.push(if *b { b't' } else { b'f' }),
        Value::Int(n) => push_i64(out, *n),
        Value::Uint(n) => push_u64(out, *n),
        Value::Float32(f) => push_display(out, format_args!("{f:e}")),
        Value::Float64(f) => push_display(out, format_args!("{f:e}")),
        Value::Time(t) => out.extend_from_slice(format_time(t).as_bytes()),
        Value::Strings(items) => {
            let sep = TypeTag::String.as_byte();
            out.push(sep);
            for item in items {
                out.push(sep);
                out.extend_from_slice(item.as_bytes());
            }
        }
        Value::Ints(items) => {
            let sep = TypeTag::Int.as_byte();
            out.push(sep);
            for &item in items {
                out.push(sep);
                push_i64(out, item);
            }
        }
        Value::Uints(items) => {
            let sep = TypeTag::Uint.as_byte();
            out.push(sep);
            for &item in items {
                out.push(sep);
                push_u64(out, item);
            }
        }
    }

    out.push(TypeTag::Terminator.as_byte());
}

#[inline]
fn push_display(out: &mut Vec<u8>, args: std::fmt::Arguments<'_>) {
    // Writing into a Vec cannot fail
    let _ = out.write_fmt(args);
}

fn encoded_len_hint(value: &Value) -> usize {
    // tag + terminator
    let framing = 2;
    match value {
        Value::Null => framing,
        Value::Bool(_) => framing + 1,
        Value::String(s) => framing + s.len(),
        Value::Int(_) | Value::Uint(_) => framing + 14,
        Value::Float32(_) | Value::Float64(_) => framing + 24,
        Value::Time(_) => framing + 35,
        Value::Strings(items) => framing + 1 + items.iter().map(|s| s.len() + 1).sum::<usize>(),
        Value::Ints(items) => framing + 1 + items.len() * 8,
        Value::Uints(items) => framing + 1 + items.len() * 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const END: u8 = 0xFE;

    #[test]
    fn scalar_layouts_are_byte_exact() {
        assert_eq!(encode(&Value::Null), vec![0xFD, END]);
        assert_eq!(encode(&Value::Bool(true)), vec![0xFB, b't', END]);
        assert_eq!(encode(&Value::Int(-36)), vec![0xFA, b'-', b'1', b'0', END]);
        assert_eq!(encode(&Value::Uint(35)), vec![0xF9, b'z', END]);
        assert_eq!(encode(&Value::from("hi")), vec![0xFC, b'h', b'i', END]);
        assert_eq!(
            encode(&Value::Float64(0.1)),
            [&[0xF8][..], b"1e-1", &[END]].concat()
        );
    }

    #[test]
    fn slice_layout_repeats_inner_tag() {
        assert_eq!(
            encode(&Value::from(vec!["a", "b"])),
            vec![0xF6, 0xFC, 0xFC, b'a', 0xFC, b'b', END]
        );
        assert_eq!(encode(&Value::Ints(vec![])), vec![0xF6, 0xFA, END]);
    }

    #[test]
    fn terminator_appears_exactly_once() {
        let value = Value::from(vec!["あいう", "", "漢字"]);
        let record = encode(&value);
        assert_eq!(record.iter().filter(|&&b| b == END).count(), 1);
        assert_eq!(record.last(), Some(&END));
    }
}
