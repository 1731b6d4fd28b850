//! Byte-size quantities such as `20GB`, `512 MiB` or `1.5k`.

use std::fmt;
use std::str::FromStr;

use bytesize::ByteSize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A quantity of bytes, backed by [`bytesize::ByteSize`].
///
/// Parsing accepts a number (optionally fractional) followed by an optional unit, with optional
/// spaces in between. Units are case-insensitive:
/// - `B` or no unit: bytes
/// - `K`, `KB`, `M`, `MB`, `G`, `GB`, `T`, `TB`, `P`, `PB`, `E`, `EB`: powers of 1000
/// - `Ki`, `KiB`, `Mi`, `MiB`, `Gi`, `GiB`, `Ti`, `TiB`, `Pi`, `PiB`, `Ei`, `EiB`: powers of 1024
///
/// `Display` uses decimal units with one fractional digit (`20.0 GB`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(ByteSize);

impl Size {
    pub const B: Size = Size(ByteSize(1));
    pub const KB: Size = Size(ByteSize(1_000));
    pub const MB: Size = Size(ByteSize(1_000_000));
    pub const GB: Size = Size(ByteSize(1_000_000_000));
    pub const TB: Size = Size(ByteSize(1_000_000_000_000));
    pub const KIB: Size = Size(ByteSize(1 << 10));
    pub const MIB: Size = Size(ByteSize(1 << 20));
    pub const GIB: Size = Size(ByteSize(1 << 30));
    pub const TIB: Size = Size(ByteSize(1 << 40));

    pub const fn from_bytes(bytes: u64) -> Self {
        Size(ByteSize(bytes))
    }

    pub const fn as_u64(self) -> u64 {
        self.0.0
    }

    pub const fn as_byte_size(self) -> ByteSize {
        self.0
    }
}

impl From<u64> for Size {
    fn from(bytes: u64) -> Self {
        Size::from_bytes(bytes)
    }
}

impl From<Size> for u64 {
    fn from(size: Size) -> Self {
        size.as_u64()
    }
}

impl From<ByteSize> for Size {
    fn from(size: ByteSize) -> Self {
        Size(size)
    }
}

/// Error returned when a string is not a valid [`Size`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeError {
    input: String,
    reason: String,
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid size `{}`: {}", self.input, self.reason)
    }
}

impl std::error::Error for SizeError {}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason: String| SizeError {
            input: s.to_owned(),
            reason,
        };
        let t = s.trim();
        let size = t.parse::<ByteSize>().map_err(fail)?;
        // The float path saturates instead of overflowing.
        if size.0 == u64::MAX && t != u64::MAX.to_string() {
            return Err(fail("value out of range".to_owned()));
        }
        Ok(Size(size))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display().si())
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_u64())
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Size::from_bytes)
    }
}

crate::registered_target!(Size);
