use crate::foundation::core::{STREAM_COUNT, StreamIndex};
use crate::media::frame::Frame;

/// Contents of every slot as of one `take`, ownership transferred to the holder.
#[derive(Debug, Default)]
pub struct TakenFrames {
    frames: [Option<Frame>; STREAM_COUNT],
}

impl TakenFrames {
    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(Option::is_none)
    }

    pub fn occupied(&self) -> usize {
        self.frames.iter().flatten().count()
    }

    pub fn get(&self, stream: StreamIndex) -> Option<&Frame> {
        self.frames[stream.get()].as_ref()
    }

    /// Split into the `(stream 0, stream 1)` pair a renderer consumes.
    pub fn into_pair(self) -> (Option<Frame>, Option<Frame>) {
        let [f0, f1] = self.frames;
        (f0, f1)
    }
}

/// One single-frame holding cell per stream; the latest submission wins.
///
/// A frame replaced before it was taken is released immediately and never drawn.
#[derive(Debug, Default)]
pub struct FrameSlotBuffer {
    slots: [Option<Frame>; STREAM_COUNT],
    // Set by the first submit after a take; that submit is the one that must schedule a tick.
    armed: bool,
    superseded: u64,
}

impl FrameSlotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `frame` in its stream's slot.
    ///
    /// Returns `true` when the caller must request a tick (nothing has been requested since the
    /// last [`FrameSlotBuffer::take`]).
    pub fn submit(&mut self, stream: StreamIndex, frame: Frame) -> bool {
        if let Some(stale) = self.slots[stream.get()].take() {
            tracing::trace!(
                %stream,
                frame = stale.id().0,
                timestamp_us = stale.timestamp_us(),
                "superseded undrawn frame"
            );
            stale.close();
            self.superseded += 1;
        }
        self.slots[stream.get()] = Some(frame);

        let needs_tick = !self.armed;
        self.armed = true;
        needs_tick
    }

    /// Remove and return every slot's contents, leaving the buffer empty.
    pub fn take(&mut self) -> TakenFrames {
        self.armed = false;
        TakenFrames {
            frames: std::mem::take(&mut self.slots),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Frames released without being drawn because a newer one replaced them.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/slots.rs"]
mod tests;
