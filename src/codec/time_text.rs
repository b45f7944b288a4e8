//! Text form of `Time` payloads.
//!
//! `2024-01-02T03:04:05.5+09:00`: the local date and time, then the UTC
//! offset (`Z` when zero). Years outside `0000..=9999` carry a sign
//! (`+10000`, `-0044`) and offsets that are not whole minutes keep their
//! seconds (`+00:00:19`), so every `DateTime<FixedOffset>` round-trips.

use crate::codec::TypeTag;
use crate::error::{KabanError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fmt::Write;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Renders `time` as payload text. Also used for JSON output.
pub fn format_time(time: &DateTime<FixedOffset>) -> String {
    let mut text = time.naive_local().format(LOCAL_FORMAT).to_string();

    let offset = time.offset().local_minus_utc();
    if offset == 0 {
        text.push('Z');
        return text;
    }

    let sign = if offset < 0 { '-' } else { '+' };
    let abs = offset.unsigned_abs();
    // Writing to a String cannot fail
    let _ = write!(text, "{sign}{:02}:{:02}", abs / 3600, abs / 60 % 60);
    if abs % 60 != 0 {
        let _ = write!(text, ":{:02}", abs % 60);
    }

    text
}

/// Parses text produced by [`format_time`].
pub fn parse_time(text: &str) -> Result<DateTime<FixedOffset>> {
    let (local, offset_secs) = match text.strip_suffix('Z') {
        Some(local) => (local, 0),
        None => {
            let split = text
                .find('T')
                .and_then(|t| text[t..].rfind(['+', '-']).map(|i| t + i))
                .ok_or_else(|| malformed(text, "missing UTC offset"))?;
            let offset = parse_offset(&text[split..])
                .ok_or_else(|| malformed(text, "invalid UTC offset"))?;
            (&text[..split], offset)
        }
    };

    let offset =
        FixedOffset::east_opt(offset_secs).ok_or_else(|| malformed(text, "UTC offset out of range"))?;

    NaiveDateTime::parse_from_str(local, LOCAL_FORMAT)
        .map_err(|err| malformed(text, err))?
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| malformed(text, "time out of range"))
}

/// `±hh:mm` or `±hh:mm:ss` in seconds east of UTC.
fn parse_offset(text: &str) -> Option<i32> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };

    let mut parts = rest.split(':');
    let hours = two_digits(parts.next()?)?;
    let minutes = two_digits(parts.next()?)?;
    let seconds = match parts.next() {
        Some(part) => two_digits(part)?,
        None => 0,
    };

    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return None;
    }

    Some(sign * (hours * 3600 + minutes * 60 + seconds))
}

fn two_digits(part: &str) -> Option<i32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn malformed(text: &str, reason: impl std::fmt::Display) -> KabanError {
    KabanError::malformed(TypeTag::Time, format!("{reason} in {text:?}"))
}
