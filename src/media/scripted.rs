use std::collections::VecDeque;
use std::time::Duration;

use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::Frame;
use crate::media::source::{DecoderConfig, FramePublisher, FrameSource};

/// A synthetic stream: fixed config followed by a fixed frame sequence.
///
/// Used by tests and the `demo` command to drive the pipeline without a container parser or
/// codec.
pub struct ScriptedSource {
    config: DecoderConfig,
    frames: VecDeque<Frame>,
    pacing: Option<Duration>,
    fail_after: Option<usize>,
}

impl ScriptedSource {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            frames: VecDeque::new(),
            pacing: None,
            fail_after: None,
        }
    }

    /// `count` uniform frames of the given size, cycling through a small palette.
    pub fn test_pattern(width: u32, height: u32, count: usize) -> Self {
        const PALETTE: [[u8; 4]; 4] = [
            [220, 60, 60, 255],
            [60, 200, 90, 255],
            [70, 110, 230, 255],
            [240, 200, 40, 255],
        ];
        let config = DecoderConfig {
            codec: "synthetic".to_string(),
            coded_width: width,
            coded_height: height,
        };
        let frames = (0..count).map(|i| {
            Frame::solid(width, height, PALETTE[i % PALETTE.len()]).with_timestamp_us(i as u64)
        });
        Self::new(config).with_frames(frames)
    }

    pub fn with_frames(mut self, frames: impl IntoIterator<Item = Frame>) -> Self {
        self.frames.extend(frames);
        self
    }

    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Report a decode failure after `n` frames have been published.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ScriptedSource {
    fn run(mut self: Box<Self>, publisher: &FramePublisher) -> FramepaceResult<()> {
        if !publisher.publish_config(self.config.clone()) {
            return Ok(());
        }
        let mut published = 0usize;
        loop {
            if self.fail_after == Some(published) {
                return Err(FramepaceError::decode(format!(
                    "scripted failure after {published} frames"
                )));
            }
            let Some(frame) = self.frames.pop_front() else {
                break;
            };
            if !publisher.publish_frame(frame) {
                return Ok(());
            }
            published += 1;
            if let Some(pacing) = self.pacing
                && !publisher.pace(pacing)
            {
                return Ok(());
            }
        }
        Ok(())
    }
}
