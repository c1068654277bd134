//! Framepace paces decoded video frames from one or two streams onto a single composite
//! surface, rendering at most once per display refresh.
//!
//! - Frame sources decode on worker threads and publish [`Frame`]s to the display loop
//! - A [`RenderScheduler`] keeps only the newest frame per stream and coalesces ticks
//! - One of three [`Renderer`] strategies composites the frames into tiles
#![forbid(unsafe_code)]

mod foundation;

/// Frames and the sources that produce them.
pub mod media;
/// Display loop, scheduling, status, and session startup.
pub mod playback;
/// Compositing strategies and their surfaces.
pub mod render;

pub use crate::foundation::core::{STREAM_COUNT, Size, StreamIndex};
pub use crate::foundation::error::{FramepaceError, FramepaceResult};

pub use crate::media::frame::{Frame, FrameId, ReleaseHook};
pub use crate::media::image_seq::{ImageDecoder, ImageSequenceSource};
pub use crate::media::scripted::ScriptedSource;
pub use crate::media::source::{
    ChunkSource, Decoder, DecoderConfig, DecodingSource, EncodedChunk, FramePublisher,
    FrameSource, SourceEvent, SourceEventKind,
};
pub use crate::playback::config::{PlaybackConfig, StreamSpec};
pub use crate::playback::player::{PlaybackReport, Player, PlayerOpts, StreamState};
pub use crate::playback::scheduler::{RenderScheduler, RenderStats};
pub use crate::playback::slots::{FrameSlotBuffer, TakenFrames};
pub use crate::playback::startup::{Launched, SourceList, launch};
pub use crate::playback::status::{
    MemoryStatusSink, StatusAggregator, StatusBatch, StatusSink, TracingStatusSink,
};
pub use crate::render::backend::{Renderer, RendererKind, create_renderer};
pub use crate::render::layout::CompositeLayout;
pub use crate::render::surface::{FrameRGBA, Surface, SurfaceRegistry};
