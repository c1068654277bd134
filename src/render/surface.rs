use std::collections::HashMap;

use crate::foundation::core::Size;
use crate::foundation::error::{FramepaceError, FramepaceResult};

/// A rendered destination image as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// A mutable-size raster target backed by a `vello_cpu` pixmap.
///
/// Resizing always reallocates and therefore clears, matching how a canvas element behaves
/// when its dimensions are assigned.
pub struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    pub fn new(size: Size) -> FramepaceResult<Self> {
        let (width, height) = dims_u16(size)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Reallocate to `size`, discarding all pixels.
    pub fn resize(&mut self, size: Size) -> FramepaceResult<()> {
        let (width, height) = dims_u16(size)?;
        *self = Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        };
        Ok(())
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Premultiplied RGBA8 at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = self.pixmap.data_as_u8_slice();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Copy the current pixels out.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Named destination surfaces, looked up by element id when a renderer is built.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface under `id`, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, surface: Surface) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    /// Take ownership of the surface registered under `id`.
    pub fn take(&mut self, id: &str) -> FramepaceResult<Surface> {
        self.surfaces
            .remove(id)
            .ok_or_else(|| FramepaceError::config(format!("destination surface '{id}' not found")))
    }
}

pub(crate) fn dims_u16(size: Size) -> FramepaceResult<(u16, u16)> {
    if size.is_empty() {
        return Err(FramepaceError::render(format!(
            "surface size {size} has zero area"
        )));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| FramepaceError::render("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| FramepaceError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    size: Size,
) -> FramepaceResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(size)?;
    if bytes.len() != size.rgba8_len() {
        return Err(FramepaceError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; frame bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (size.width as usize) * (size.height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
