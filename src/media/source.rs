use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select};

use crate::foundation::core::StreamIndex;
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::Frame;

/// Stream configuration emitted once by a chunk source before any chunk.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecoderConfig {
    /// Codec identifier string (e.g. `avc1.64001f`, `png`).
    pub codec: String,
    /// Coded width in pixels.
    pub coded_width: u32,
    /// Coded height in pixels.
    pub coded_height: u32,
}

/// One encoded access unit, in presentation order.
#[derive(Clone, Debug)]
pub struct EncodedChunk {
    pub sequence: u64,
    pub timestamp_us: u64,
    pub data: Vec<u8>,
}

/// Demuxer side of a stream: yields its config exactly once, then chunks in presentation order.
pub trait ChunkSource: Send {
    /// Open the source and return its decoder configuration.
    fn open(&mut self, publisher: &FramePublisher) -> FramepaceResult<DecoderConfig>;

    /// Next access unit, or `None` at end of stream.
    fn next_chunk(&mut self) -> FramepaceResult<Option<EncodedChunk>>;
}

/// Decoder side of a stream. `configure` must precede `decode`; any error is terminal.
pub trait Decoder: Send {
    fn configure(&mut self, config: &DecoderConfig) -> FramepaceResult<()>;

    /// Decode one chunk. Output order matches submission order.
    fn decode(&mut self, chunk: EncodedChunk) -> FramepaceResult<Frame>;
}

/// Anything that produces decoded frames for one stream.
///
/// Sources run on their own worker thread and talk to the display loop only through the
/// [`FramePublisher`]. Returning `Err` marks the stream as failed; returning `Ok` marks it
/// finished.
pub trait FrameSource: Send {
    fn run(self: Box<Self>, publisher: &FramePublisher) -> FramepaceResult<()>;
}

/// Event delivered from a source worker to the display loop.
#[derive(Debug)]
pub struct SourceEvent {
    pub stream: StreamIndex,
    pub kind: SourceEventKind,
}

#[derive(Debug)]
pub enum SourceEventKind {
    Config(DecoderConfig),
    Frame(Frame),
    Status { key: String, message: String },
    Failed(String),
    Finished,
}

/// Per-stream handle used by sources to publish onto the display loop channel.
///
/// Every `publish_*` call returns `false` once the display loop has gone away, and
/// [`FramePublisher::pace`] returns `false` as soon as the loop signals shutdown; sources should
/// stop producing at that point.
#[derive(Clone, Debug)]
pub struct FramePublisher {
    stream: StreamIndex,
    tx: Sender<SourceEvent>,
    shutdown: Receiver<()>,
}

impl FramePublisher {
    /// `shutdown` is signalled by disconnecting it (dropping every sender).
    pub fn new(stream: StreamIndex, tx: Sender<SourceEvent>, shutdown: Receiver<()>) -> Self {
        Self {
            stream,
            tx,
            shutdown,
        }
    }

    pub fn stream(&self) -> StreamIndex {
        self.stream
    }

    pub fn publish_config(&self, config: DecoderConfig) -> bool {
        self.send(SourceEventKind::Config(config))
    }

    pub fn publish_frame(&self, frame: Frame) -> bool {
        self.send(SourceEventKind::Frame(frame))
    }

    pub fn publish_status(&self, key: impl Into<String>, message: impl Into<String>) -> bool {
        self.send(SourceEventKind::Status {
            key: key.into(),
            message: message.into(),
        })
    }

    pub fn publish_failed(&self, err: &FramepaceError) -> bool {
        self.send(SourceEventKind::Failed(err.to_string()))
    }

    pub fn publish_finished(&self) -> bool {
        self.send(SourceEventKind::Finished)
    }

    /// Wait `interval` between frames. Returns `false` if shutdown was signalled meanwhile.
    pub fn pace(&self, interval: Duration) -> bool {
        select! {
            recv(self.shutdown) -> _ => false,
            default(interval) => true,
        }
    }

    fn send(&self, kind: SourceEventKind) -> bool {
        // A dropped event drops its frame, which releases it.
        self.tx
            .send(SourceEvent {
                stream: self.stream,
                kind,
            })
            .is_ok()
    }
}

/// Run a source to completion and report its terminal state.
pub fn drive_source(source: Box<dyn FrameSource>, publisher: &FramePublisher) {
    match source.run(publisher) {
        Ok(()) => {
            publisher.publish_finished();
        }
        Err(err) => {
            publisher.publish_failed(&err);
        }
    }
}

/// Adapts a [`ChunkSource`] and a [`Decoder`] into a [`FrameSource`].
pub struct DecodingSource<C, D> {
    chunks: C,
    decoder: D,
    pacing: Option<Duration>,
}

impl<C: ChunkSource, D: Decoder> DecodingSource<C, D> {
    pub fn new(chunks: C, decoder: D) -> Self {
        Self {
            chunks,
            decoder,
            pacing: None,
        }
    }

    /// Sleep between decoded frames to emulate a real-time stream.
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }
}

impl<C: ChunkSource, D: Decoder> FrameSource for DecodingSource<C, D> {
    fn run(mut self: Box<Self>, publisher: &FramePublisher) -> FramepaceResult<()> {
        let config = self.chunks.open(publisher)?;
        if !publisher.publish_config(config.clone()) {
            return Ok(());
        }
        self.decoder.configure(&config)?;

        while let Some(chunk) = self.chunks.next_chunk()? {
            let frame = self.decoder.decode(chunk)?;
            if !publisher.publish_frame(frame) {
                break;
            }
            if let Some(pacing) = self.pacing
                && !publisher.pace(pacing)
            {
                break;
            }
        }
        Ok(())
    }
}

/// Convert a nominal frame rate to a per-frame sleep.
pub fn pacing_for_fps(fps: Option<f64>) -> Option<Duration> {
    fps.filter(|f| f.is_finite() && *f > 0.0)
        .map(|f| Duration::from_secs_f64(1.0 / f))
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
