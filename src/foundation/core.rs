use crate::foundation::error::{FramepaceError, FramepaceResult};

/// Number of frame slots (and therefore composite tiles) the pipeline carries.
pub const STREAM_COUNT: usize = 2;

/// Index of a decoded stream, and of the slot/tile it feeds.
///
/// Only `0` and `1` are representable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct StreamIndex(u8);

impl StreamIndex {
    /// Stream drawn in the top-left tile.
    pub const PRIMARY: Self = Self(0);
    /// Stream drawn in the tile offset by one cell.
    pub const SECONDARY: Self = Self(1);

    /// Create a validated stream index.
    pub fn new(index: usize) -> FramepaceResult<Self> {
        if index >= STREAM_COUNT {
            return Err(FramepaceError::validation(format!(
                "stream index {index} out of range (expected < {STREAM_COUNT})"
            )));
        }
        Ok(Self(index as u8))
    }

    /// Slot position as a `usize`.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// All stream indices in tile order.
    pub fn all() -> [Self; STREAM_COUNT] {
        [Self::PRIMARY, Self::SECONDARY]
    }
}

impl TryFrom<u8> for StreamIndex {
    type Error = FramepaceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value))
    }
}

impl From<StreamIndex> for u8 {
    fn from(value: StreamIndex) -> Self {
        value.0
    }
}

impl std::fmt::Display for StreamIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
