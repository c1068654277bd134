use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::Frame;
use crate::media::source::{ChunkSource, Decoder, DecoderConfig, EncodedChunk, FramePublisher};

/// Treats a directory of still images as a stream: one file per access unit, in file-name order.
pub struct ImageSequenceSource {
    dir: PathBuf,
    fps: Option<f64>,
    files: Vec<PathBuf>,
    cursor: usize,
    opened: bool,
}

impl ImageSequenceSource {
    pub fn new(dir: impl Into<PathBuf>, fps: Option<f64>) -> Self {
        Self {
            dir: dir.into(),
            fps,
            files: Vec::new(),
            cursor: 0,
            opened: false,
        }
    }

    fn timestamp_us(&self, sequence: u64) -> u64 {
        match self.fps {
            Some(fps) if fps.is_finite() && fps > 0.0 => {
                ((sequence as f64) * 1_000_000.0 / fps).round() as u64
            }
            _ => 0,
        }
    }
}

impl ChunkSource for ImageSequenceSource {
    fn open(&mut self, publisher: &FramePublisher) -> FramepaceResult<DecoderConfig> {
        if self.opened {
            return Err(FramepaceError::decode("image sequence opened twice"));
        }
        self.files = list_image_files(&self.dir)?;
        let first = self.files.first().ok_or_else(|| {
            FramepaceError::decode(format!("no images found in '{}'", self.dir.display()))
        })?;

        let format = image::ImageFormat::from_path(first)
            .with_context(|| format!("detect image format of '{}'", first.display()))?;
        let (coded_width, coded_height) = image::image_dimensions(first)
            .with_context(|| format!("read dimensions of '{}'", first.display()))?;
        let codec = format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("image")
            .to_string();

        self.opened = true;
        publisher.publish_status(
            format!("fetch[{}]", publisher.stream()),
            format!("{} frames from {}", self.files.len(), self.dir.display()),
        );
        Ok(DecoderConfig {
            codec,
            coded_width,
            coded_height,
        })
    }

    fn next_chunk(&mut self) -> FramepaceResult<Option<EncodedChunk>> {
        if !self.opened {
            return Err(FramepaceError::decode("next_chunk called before open"));
        }
        let Some(path) = self.files.get(self.cursor) else {
            return Ok(None);
        };
        let data = std::fs::read(path).map_err(|e| {
            FramepaceError::decode(format!("failed to read '{}': {e}", path.display()))
        })?;
        let sequence = self.cursor as u64;
        self.cursor += 1;
        Ok(Some(EncodedChunk {
            sequence,
            timestamp_us: self.timestamp_us(sequence),
            data,
        }))
    }
}

fn list_image_files(dir: &Path) -> FramepaceResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("list image directory '{}'", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.context("read directory entry")?.path();
        if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decodes still-image chunks into premultiplied frames.
#[derive(Default)]
pub struct ImageDecoder {
    config: Option<DecoderConfig>,
}

impl ImageDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ImageDecoder {
    fn configure(&mut self, config: &DecoderConfig) -> FramepaceResult<()> {
        if image::ImageFormat::from_extension(&config.codec).is_none() {
            return Err(FramepaceError::decode(format!(
                "unsupported codec '{}'",
                config.codec
            )));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn decode(&mut self, chunk: EncodedChunk) -> FramepaceResult<Frame> {
        if self.config.is_none() {
            return Err(FramepaceError::decode("decode called before configure"));
        }
        let dyn_img = image::load_from_memory(&chunk.data)
            .map_err(|e| FramepaceError::decode(format!("chunk {}: {e}", chunk.sequence)))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Frame::from_straight_rgba8(width, height, rgba.into_raw())?
            .with_timestamp_us(chunk.timestamp_us))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/image_seq.rs"]
mod tests;
