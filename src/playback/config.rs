use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{STREAM_COUNT, Size, StreamIndex};
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::image_seq::{ImageDecoder, ImageSequenceSource};
use crate::media::scripted::ScriptedSource;
use crate::media::source::{DecodingSource, FrameSource, pacing_for_fps};
use crate::playback::player::PlayerOpts;

/// Environment override for [`PlaybackConfig::refresh_hz`].
pub const REFRESH_HZ_ENV: &str = "FRAMEPACE_REFRESH_HZ";

/// Default destination surface id.
pub const DEFAULT_SURFACE_ID: &str = "videoCanvas";

/// Largest side a surface can have.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

fn fits(side: u32) -> bool {
    (1..=MAX_DIMENSION).contains(&side)
}

/// Where one stream's frames come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamSpec {
    /// Directory of still images decoded in file-name order.
    ImageSequence {
        dir: PathBuf,
        #[serde(default)]
        fps: Option<f64>,
    },
    /// Synthetic uniform frames.
    TestPattern {
        width: u32,
        height: u32,
        frames: usize,
        #[serde(default)]
        fps: Option<f64>,
    },
}

impl StreamSpec {
    pub fn build_source(&self) -> Box<dyn FrameSource> {
        match self {
            Self::ImageSequence { dir, fps } => Box::new(
                DecodingSource::new(
                    ImageSequenceSource::new(dir.clone(), *fps),
                    ImageDecoder::new(),
                )
                .with_pacing(pacing_for_fps(*fps)),
            ),
            Self::TestPattern {
                width,
                height,
                frames,
                fps,
            } => Box::new(
                ScriptedSource::test_pattern(*width, *height, *frames)
                    .with_pacing(pacing_for_fps(*fps)),
            ),
        }
    }
}

/// Playback session settings, usually read from a JSON file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Renderer selection tag; checked at startup.
    #[serde(default)]
    pub renderer: Option<String>,
    /// One source per stream, in stream order.
    #[serde(default)]
    pub streams: Vec<StreamSpec>,
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: u32,
    #[serde(default = "default_surface_id")]
    pub surface_id: String,
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

fn default_refresh_hz() -> u32 {
    60
}

fn default_surface_id() -> String {
    DEFAULT_SURFACE_ID.to_string()
}

fn default_surface_width() -> u32 {
    1280
}

fn default_surface_height() -> u32 {
    960
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            renderer: None,
            streams: Vec::new(),
            refresh_hz: default_refresh_hz(),
            surface_id: default_surface_id(),
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            max_ticks: None,
        }
    }
}

impl PlaybackConfig {
    pub fn from_json_file(path: &Path) -> FramepaceResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FramepaceError::config(format!("parse '{}': {e}", path.display())))?;
        Ok(config)
    }

    /// Apply `FRAMEPACE_REFRESH_HZ` when it holds a positive integer.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(hz) = std::env::var(REFRESH_HZ_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.refresh_hz = hz;
        }
        self
    }

    pub fn validate(&self) -> FramepaceResult<()> {
        if self.streams.is_empty() || self.streams.len() > STREAM_COUNT {
            return Err(FramepaceError::validation(format!(
                "expected 1..={STREAM_COUNT} streams, got {}",
                self.streams.len()
            )));
        }
        if self.refresh_hz == 0 {
            return Err(FramepaceError::validation("refresh_hz must be > 0"));
        }
        if self.surface_id.trim().is_empty() {
            return Err(FramepaceError::validation("surface_id must be non-empty"));
        }
        if !(fits(self.surface_width) && fits(self.surface_height)) {
            return Err(FramepaceError::validation(format!(
                "surface size must be within 1..={MAX_DIMENSION} per side, got {}",
                self.surface_size()
            )));
        }
        for spec in &self.streams {
            if let StreamSpec::TestPattern { width, height, .. } = spec
                && !(fits(*width) && fits(*height))
            {
                return Err(FramepaceError::validation(format!(
                    "test pattern side must be within 1..={MAX_DIMENSION}, got {width}x{height}"
                )));
            }
        }
        Ok(())
    }

    pub fn surface_size(&self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }

    pub fn player_opts(&self) -> PlayerOpts {
        PlayerOpts {
            refresh_hz: self.refresh_hz,
            max_ticks: self.max_ticks,
        }
    }

    /// One source per configured stream; stream index is the position in `streams`.
    pub fn sources(&self) -> FramepaceResult<Vec<(StreamIndex, Box<dyn FrameSource>)>> {
        self.streams
            .iter()
            .enumerate()
            .map(|(i, spec)| Ok((StreamIndex::new(i)?, spec.build_source())))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;
