//! Content hash value object
//!
//! A validated, immutable 64-bit FNV-1a hash of a file's content, used for
//! change detection in the build manifest. Rendered as exactly 16 lowercase
//! hex digits; parsing tolerates mixed case.

use std::fmt;
use std::hash::Hasher;
use std::io::{self, Read};
use std::path::Path;

use fnv::FnvHasher;

/// Content hash value object
///
/// Wraps the 64-bit FNV-1a digest of a byte stream. A fresh hasher is
/// constructed per file; correctness, not throughput, is the property the
/// manifest depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(u64);

impl ContentHash {
    /// Number of hex digits in the textual form
    pub const HEX_LEN: usize = 16;

    /// Parse a hash from its 16-hex-digit textual form.
    ///
    /// Accepts mixed case; rejects any other length or any non-hex character.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != Self::HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(s, 16).ok().map(Self)
    }

    /// Hash an in-memory byte slice
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = FnvHasher::default();
        hasher.write(bytes);
        Self(hasher.finish())
    }

    /// Hash a byte stream
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = FnvHasher::default();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.write(&buf[..n]);
        }
        Ok(Self(hasher.finish()))
    }

    /// Hash a file's content
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Raw 64-bit value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
