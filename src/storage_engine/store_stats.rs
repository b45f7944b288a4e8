use crate::utils::format_bytes;
use std::fmt;

/// Point-in-time counters for one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Keys with a live record.
    pub live_keys: usize,
    /// Bytes appended so far, dead records included.
    pub buffer_len: usize,
    /// Bytes reserved by the buffer.
    pub buffer_capacity: usize,
    /// Bytes held by tombstoned records. Never reclaimed.
    pub dead_bytes: usize,
}

impl StoreStats {
    /// Bytes belonging to live records.
    pub fn live_bytes(&self) -> usize {
        self.buffer_len.saturating_sub(self.dead_bytes)
    }
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:=^50}", " STORE INFO ")?;
        writeln!(f, "{:<25} {}", "LIVE KEYS:", self.live_keys)?;
        writeln!(f, "{:-<50}", "")?;
        writeln!(f, "{:<25} {}", "BUFFER LENGTH:", format_bytes(self.buffer_len as u64))?;
        writeln!(f, "{:<25} {}", "BUFFER CAPACITY:", format_bytes(self.buffer_capacity as u64))?;
        writeln!(f, "{:<25} {}", "LIVE BYTES:", format_bytes(self.live_bytes() as u64))?;
        writeln!(f, "{:<25} {}", "TOMBSTONED BYTES:", format_bytes(self.dead_bytes as u64))?;
        write!(f, "{:=<50}", "")
    }
}
