use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{Receiver, select};

use crate::foundation::core::{STREAM_COUNT, StreamIndex};
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::source::{FramePublisher, FrameSource, SourceEvent, SourceEventKind, drive_source};
use crate::playback::scheduler::{RenderScheduler, RenderStats};
use crate::playback::status::{StatusAggregator, StatusSink};
use crate::playback::throughput::ThroughputMeter;
use crate::render::backend::Renderer;
use crate::render::surface::FrameRGBA;

/// Display-loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerOpts {
    /// Display refresh rate driving the tick cadence.
    pub refresh_hz: u32,
    /// Stop after this many display ticks, even if sources are still producing.
    pub max_ticks: Option<u64>,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            refresh_hz: 60,
            max_ticks: None,
        }
    }
}

impl PlayerOpts {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.refresh_hz.max(1)))
    }
}

/// Lifecycle of one stream as seen by the display loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamState {
    #[default]
    Idle,
    Configured,
    Finished,
    Failed,
}

/// Summary returned when playback ends.
#[derive(Clone, Debug)]
pub struct PlaybackReport {
    pub stats: RenderStats,
    pub display_ticks: u64,
    pub frames_received: u64,
    /// Frames that arrived from a stream after it failed or finished.
    pub frames_discarded: u64,
    pub status_flushes: u64,
    pub streams: [StreamState; STREAM_COUNT],
    /// Destination contents after the last draw.
    pub final_frame: FrameRGBA,
}

/// Single-threaded display loop: one scheduler, one status aggregator, per-stream state.
///
/// Frame sources run on worker threads and only reach the slots through events handled here,
/// so each slot has exactly one writer and one reader.
pub struct Player {
    scheduler: RenderScheduler,
    status: StatusAggregator,
    meter: ThroughputMeter,
    streams: [StreamState; STREAM_COUNT],
    opts: PlayerOpts,
    display_ticks: u64,
    frames_received: u64,
    frames_discarded: u64,
}

impl Player {
    pub fn new(
        renderer: Box<dyn Renderer>,
        status_sink: Box<dyn StatusSink>,
        opts: PlayerOpts,
    ) -> Self {
        Self {
            scheduler: RenderScheduler::new(renderer),
            status: StatusAggregator::new(status_sink),
            meter: ThroughputMeter::new(),
            streams: [StreamState::Idle; STREAM_COUNT],
            opts,
            display_ticks: 0,
            frames_received: 0,
            frames_discarded: 0,
        }
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn stream_state(&self, stream: StreamIndex) -> StreamState {
        self.streams[stream.get()]
    }

    /// Process one event from a source worker.
    pub fn handle(&mut self, event: SourceEvent, now: Instant) {
        let stream = event.stream;
        match event.kind {
            SourceEventKind::Config(config) => {
                self.streams[stream.get()] = StreamState::Configured;
                self.status.set(
                    format!("decode[{stream}]"),
                    format!(
                        "{} @ {}x{}",
                        config.codec, config.coded_width, config.coded_height
                    ),
                );
            }
            SourceEventKind::Frame(frame) => {
                if matches!(
                    self.streams[stream.get()],
                    StreamState::Failed | StreamState::Finished
                ) {
                    tracing::debug!(%stream, "frame after end of stream, releasing undrawn");
                    self.frames_discarded += 1;
                    frame.close();
                    return;
                }
                self.frames_received += 1;
                if let Some(fps) = self.meter.record(now) {
                    self.status.set("render", ThroughputMeter::format(fps));
                }
                self.scheduler.submit(stream, frame);
            }
            SourceEventKind::Status { key, message } => {
                self.status.set(key, message);
            }
            SourceEventKind::Failed(error) => {
                tracing::error!(%stream, %error, "decode failed, stream stopped");
                self.streams[stream.get()] = StreamState::Failed;
                self.status
                    .set(format!("decode[{stream}]"), format!("error: {error}"));
            }
            SourceEventKind::Finished => {
                tracing::debug!(%stream, "stream finished");
                self.streams[stream.get()] = StreamState::Finished;
            }
        }
    }

    /// Run one display refresh: render if a tick is pending, then flush status if pending.
    ///
    /// Returns `true` if a composite was drawn.
    pub fn on_display_tick(&mut self) -> bool {
        self.display_ticks += 1;
        let rendered = self.scheduler.is_pending() && self.scheduler.on_tick();
        if self.status.is_pending() {
            self.status.flush();
        }
        rendered
    }

    /// Nothing is waiting for a tick.
    pub fn is_idle(&self) -> bool {
        !self.scheduler.is_pending() && !self.status.is_pending()
    }

    /// Spawn `sources` on worker threads and pace rendering at the display refresh rate until
    /// every source has ended and all pending work is flushed, or `max_ticks` is reached.
    pub fn run(
        mut self,
        sources: Vec<(StreamIndex, Box<dyn FrameSource>)>,
    ) -> FramepaceResult<PlaybackReport> {
        let mut seen = [false; STREAM_COUNT];
        for (stream, _) in &sources {
            if std::mem::replace(&mut seen[stream.get()], true) {
                return Err(FramepaceError::validation(format!(
                    "stream {stream} has more than one source"
                )));
            }
        }

        let (tx, rx) = crossbeam_channel::unbounded::<SourceEvent>();
        // Never sent on; dropping the sender wakes every source out of its pacing wait.
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let mut workers = Vec::with_capacity(sources.len());
        for (stream, source) in sources {
            let publisher = FramePublisher::new(stream, tx.clone(), shutdown_rx.clone());
            let worker = std::thread::Builder::new()
                .name(format!("framepace-source-{stream}"))
                .spawn(move || drive_source(source, &publisher))
                .context("spawn source worker")?;
            workers.push(worker);
        }
        drop(tx);
        drop(shutdown_rx);

        tracing::info!(
            renderer = %self.scheduler.renderer().kind(),
            refresh_hz = self.opts.refresh_hz,
            streams = workers.len(),
            "playback started"
        );
        self.pump(&rx);
        drop(rx);
        drop(shutdown_tx);

        for worker in workers {
            worker
                .join()
                .map_err(|_| FramepaceError::decode("source worker panicked"))?;
        }
        Ok(self.into_report())
    }

    fn pump(&mut self, rx: &Receiver<SourceEvent>) {
        let ticker = crossbeam_channel::tick(self.opts.refresh_interval());
        let closed = crossbeam_channel::never::<SourceEvent>();
        let mut events_open = true;

        loop {
            let events = if events_open { rx } else { &closed };
            select! {
                recv(events) -> msg => match msg {
                    Ok(event) => self.handle(event, Instant::now()),
                    Err(_) => events_open = false,
                },
                recv(ticker) -> _ => {
                    self.on_display_tick();
                    if self.opts.max_ticks.is_some_and(|max| self.display_ticks >= max) {
                        tracing::debug!(ticks = self.display_ticks, "tick limit reached");
                        break;
                    }
                    if !events_open && self.is_idle() {
                        break;
                    }
                }
            }
        }
    }

    pub fn into_report(self) -> PlaybackReport {
        PlaybackReport {
            stats: self.scheduler.stats(),
            display_ticks: self.display_ticks,
            frames_received: self.frames_received,
            frames_discarded: self.frames_discarded,
            status_flushes: self.status.flushes(),
            streams: self.streams,
            final_frame: self.scheduler.renderer().surface().snapshot(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
