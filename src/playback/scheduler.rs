use crate::foundation::core::StreamIndex;
use crate::media::frame::Frame;
use crate::playback::slots::FrameSlotBuffer;
use crate::render::backend::Renderer;

/// Counters describing scheduler activity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Ticks requested (at most one outstanding at a time).
    pub ticks_requested: u64,
    /// Ticks that fired.
    pub ticks: u64,
    /// Successful `draw` calls.
    pub renders: u64,
    /// Frames accepted by `submit`.
    pub frames_submitted: u64,
    /// Frames released undrawn because a newer frame replaced them.
    pub frames_superseded: u64,
    /// `draw` calls that failed (the tick is skipped, playback continues).
    pub draw_errors: u64,
}

/// Coalesces frame arrivals into at most one composite per display tick.
///
/// The pending flag is owned by this instance. The display loop asks
/// [`RenderScheduler::is_pending`] at each refresh and calls [`RenderScheduler::on_tick`] when it
/// is set; tests call `on_tick` directly.
pub struct RenderScheduler {
    pending: bool,
    buffer: FrameSlotBuffer,
    renderer: Box<dyn Renderer>,
    stats: RenderStats,
}

impl RenderScheduler {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            pending: false,
            buffer: FrameSlotBuffer::new(),
            renderer,
            stats: RenderStats::default(),
        }
    }

    /// Hand a decoded frame to its stream's slot, requesting a tick if none is outstanding.
    pub fn submit(&mut self, stream: StreamIndex, frame: Frame) {
        self.stats.frames_submitted += 1;
        if self.buffer.submit(stream, frame) {
            self.schedule();
        }
    }

    /// Request the next display tick. Returns `false` if one was already pending.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.stats.ticks_requested += 1;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Run one display tick. Returns `true` if a composite was drawn.
    pub fn on_tick(&mut self) -> bool {
        self.pending = false;
        self.stats.ticks += 1;

        let taken = self.buffer.take();
        if taken.is_empty() {
            return false;
        }

        let (frame0, frame1) = taken.into_pair();
        match self.renderer.draw(frame0, frame1) {
            Ok(()) => {
                self.stats.renders += 1;
                true
            }
            Err(err) => {
                self.stats.draw_errors += 1;
                tracing::warn!(
                    renderer = %self.renderer.kind(),
                    error = %err,
                    "draw failed, skipping tick"
                );
                false
            }
        }
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats {
            frames_superseded: self.buffer.superseded(),
            ..self.stats.clone()
        }
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
