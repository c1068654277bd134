use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Size;
use crate::foundation::error::{FramepaceError, FramepaceResult};

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a decoded frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

impl FrameId {
    fn next() -> Self {
        Self(NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Callback invoked when a frame's pixel memory is released.
pub type ReleaseHook = Arc<dyn Fn(FrameId) + Send + Sync>;

/// A decoded raster image with exactly-once release.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. Release happens in [`Frame::close`],
/// or on drop for frames that are discarded without an explicit close; either way the release
/// hook fires exactly once. A closed frame is moved out, so it cannot be used again.
pub struct Frame {
    id: FrameId,
    size: Size,
    timestamp_us: u64,
    rgba8_premul: Vec<u8>,
    on_release: Option<ReleaseHook>,
}

impl Frame {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> FramepaceResult<Self> {
        let size = Size::new(width, height);
        if rgba8_premul.len() != size.rgba8_len() {
            return Err(FramepaceError::validation(format!(
                "frame byte length {} does not match {size} rgba8",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            id: FrameId::next(),
            size,
            timestamp_us: 0,
            rgba8_premul,
            on_release: None,
        })
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(
        width: u32,
        height: u32,
        mut rgba8: Vec<u8>,
    ) -> FramepaceResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// Uniform frame filled with a straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        let count = (width as usize).saturating_mul(height as usize);
        Self {
            id: FrameId::next(),
            size: Size::new(width, height),
            timestamp_us: 0,
            rgba8_premul: px.repeat(count),
            on_release: None,
        }
    }

    /// Attach a presentation timestamp in microseconds.
    pub fn with_timestamp_us(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }

    /// Attach a hook that observes this frame's release.
    pub fn with_release_hook(mut self, hook: ReleaseHook) -> Self {
        self.on_release = Some(hook);
        self
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn display_width(&self) -> u32 {
        self.size.width
    }

    pub fn display_height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn timestamp_us(&self) -> u64 {
        self.timestamp_us
    }

    /// Premultiplied RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Release the frame's pixel memory.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        self.rgba8_premul = Vec::new();
        if let Some(hook) = self.on_release.take() {
            hook(self.id);
        }
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("timestamp_us", &self.timestamp_us)
            .finish_non_exhaustive()
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/frame.rs"]
mod tests;
