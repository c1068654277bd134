use std::sync::Arc;

use crate::foundation::core::StreamIndex;
use crate::foundation::error::FramepaceResult;
use crate::media::frame::Frame;
use crate::render::backend::{Renderer, RendererKind};
use crate::render::layout::CompositeLayout;
use crate::render::raster::{context_for, flush_into, image_paint, paint_scaled};
use crate::render::surface::{Surface, pixmap_from_premul_bytes};

/// Paints each frame straight into the destination's raster context.
///
/// Keeps no state besides the destination; the surface is resized (and so cleared) on every
/// draw.
pub struct DirectBlitRenderer {
    surface: Surface,
}

impl DirectBlitRenderer {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }
}

impl Renderer for DirectBlitRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::DirectBlit
    }

    fn draw(&mut self, frame0: Option<Frame>, frame1: Option<Frame>) -> FramepaceResult<()> {
        let Some(layout) = CompositeLayout::for_frames(frame0.as_ref(), frame1.as_ref()) else {
            tracing::debug!(renderer = "direct", "nothing paintable, skipping draw");
            return Ok(());
        };

        self.surface.resize(layout.surface)?;
        let mut ctx = context_for(&self.surface)?;

        for (stream, frame) in [
            (StreamIndex::PRIMARY, frame0),
            (StreamIndex::SECONDARY, frame1),
        ] {
            let Some(frame) = frame else {
                continue;
            };
            if let Some(tile) = layout.tile(stream)
                && !frame.size().is_empty()
            {
                let pixmap = pixmap_from_premul_bytes(frame.pixels(), frame.size())?;
                paint_scaled(
                    &mut ctx,
                    image_paint(Arc::new(pixmap)),
                    frame.size(),
                    tile.to_kurbo(),
                );
            }
            frame.close();
        }

        flush_into(&mut ctx, &mut self.surface);
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
