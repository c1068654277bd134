use crate::foundation::core::StreamIndex;
use crate::foundation::error::FramepaceResult;
use crate::media::source::FrameSource;
use crate::playback::config::PlaybackConfig;
use crate::playback::player::{PlaybackReport, Player};
use crate::playback::status::StatusSink;
use crate::render::backend::{RendererKind, create_renderer};
use crate::render::surface::SurfaceRegistry;

pub type SourceList = Vec<(StreamIndex, Box<dyn FrameSource>)>;

/// A fully constructed session, ready to play.
pub struct Launched {
    pub player: Player,
    pub sources: SourceList,
}

impl Launched {
    pub fn run(self) -> FramepaceResult<PlaybackReport> {
        self.player.run(self.sources)
    }
}

/// Build a playback session.
///
/// The renderer selection is resolved before anything else is constructed: when it is absent
/// or unrecognized, one `ERROR` event is logged and `make_sources` is never called. A missing
/// destination surface is likewise fatal. Every error returned from here has already been logged
/// exactly once.
pub fn launch<F>(
    config: &PlaybackConfig,
    registry: &mut SurfaceRegistry,
    status_sink: Box<dyn StatusSink>,
    make_sources: F,
) -> FramepaceResult<Launched>
where
    F: FnOnce() -> FramepaceResult<SourceList>,
{
    let kind = match RendererKind::from_selection(config.renderer.as_deref()) {
        Ok(kind) => kind,
        Err(err) => {
            tracing::error!(error = %err, "renderer selection rejected, not starting playback");
            return Err(err);
        }
    };

    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid playback config");
        return Err(err);
    }

    let renderer = match create_renderer(kind, registry, &config.surface_id) {
        Ok(renderer) => renderer,
        Err(err) => {
            tracing::error!(renderer = %kind, error = %err, "renderer construction failed");
            return Err(err);
        }
    };
    let player = Player::new(renderer, status_sink, config.player_opts());

    let sources = match make_sources() {
        Ok(sources) => sources,
        Err(err) => {
            tracing::error!(error = %err, "building frame sources failed");
            return Err(err);
        }
    };
    tracing::debug!(renderer = %kind, streams = sources.len(), "playback session ready");
    Ok(Launched { player, sources })
}
