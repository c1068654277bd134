use crate::foundation::core::{STREAM_COUNT, Size, StreamIndex};
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::Frame;
use crate::render::backend::{Renderer, RendererKind};
use crate::render::blit::blit_scaled_over;
use crate::render::layout::{CompositeLayout, TileRect};
use crate::render::surface::Surface;

/// Copies frames through persistent per-slot intermediates straight into their tiles.
///
/// The destination is only reallocated when the composite size actually changes; it is
/// cleared before every composite so a shrink never leaves remnants behind.
pub struct OptimizedCompositeRenderer {
    surface: Surface,
    cached_size: Size,
    intermediates: [Option<Surface>; STREAM_COUNT],
    destination_resizes: u64,
    intermediate_allocs: u64,
}

impl OptimizedCompositeRenderer {
    pub fn new(surface: Surface) -> Self {
        let cached_size = surface.size();
        Self {
            surface,
            cached_size,
            intermediates: [None, None],
            destination_resizes: 0,
            intermediate_allocs: 0,
        }
    }

    /// How many times the destination was reallocated.
    pub fn destination_resizes(&self) -> u64 {
        self.destination_resizes
    }

    /// How many times a per-slot intermediate was (re)allocated.
    pub fn intermediate_allocs(&self) -> u64 {
        self.intermediate_allocs
    }

    fn stage_and_copy(
        &mut self,
        stream: StreamIndex,
        frame: &Frame,
        tile: TileRect,
    ) -> FramepaceResult<()> {
        let slot = &mut self.intermediates[stream.get()];
        match slot {
            Some(s) if s.size() == frame.size() => {}
            Some(s) => {
                s.resize(frame.size())?;
                self.intermediate_allocs += 1;
            }
            None => {
                *slot = Some(Surface::new(frame.size())?);
                self.intermediate_allocs += 1;
            }
        }
        let Some(staged) = self.intermediates[stream.get()].as_mut() else {
            return Err(FramepaceError::render("intermediate surface missing"));
        };
        staged.data_mut().copy_from_slice(frame.pixels());

        let dst_size = self.surface.size();
        blit_scaled_over(
            self.surface.data_mut(),
            dst_size,
            staged.data(),
            staged.size(),
            tile,
        )
    }
}

impl Renderer for OptimizedCompositeRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::OptimizedComposite
    }

    fn draw(&mut self, frame0: Option<Frame>, frame1: Option<Frame>) -> FramepaceResult<()> {
        let Some(layout) = CompositeLayout::for_frames(frame0.as_ref(), frame1.as_ref()) else {
            tracing::debug!(renderer = "optimized", "nothing paintable, skipping draw");
            return Ok(());
        };

        if self.cached_size != layout.surface {
            self.surface.resize(layout.surface)?;
            self.cached_size = layout.surface;
            self.destination_resizes += 1;
        }
        self.surface.clear();

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
                self.stage_and_copy(stream, &frame, tile)?;
            }
            frame.close();
        }
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
