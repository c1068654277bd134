use std::str::FromStr;

use crate::foundation::core::Size;
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::Frame;
use crate::render::direct::DirectBlitRenderer;
use crate::render::optimized::OptimizedCompositeRenderer;
use crate::render::scene_graph::SceneGraphRenderer;
use crate::render::surface::{Surface, SurfaceRegistry};

/// Size of a destination surface a strategy allocates for itself.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(1280, 960);

/// A compositing strategy.
///
/// Contract shared by every implementation:
/// - the destination is sized from the frames of *this* call (see
///   [`crate::render::layout::CompositeLayout`]);
/// - stream 0 lands at the origin, stream 1 one cell down and right, each scaled to the cell;
/// - an absent frame paints nothing;
/// - every frame argument is released exactly once before `draw` returns, on success and on
///   error.
pub trait Renderer {
    fn kind(&self) -> RendererKind;

    /// Composite one or two frames onto the destination surface.
    fn draw(&mut self, frame0: Option<Frame>, frame1: Option<Frame>) -> FramepaceResult<()>;

    /// The destination surface as of the last draw.
    fn surface(&self) -> &Surface;
}

/// The available strategies. Chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Paint each frame straight into the destination raster context.
    DirectBlit,
    /// Retained scene graph with one persistent node per slot.
    SceneGraph,
    /// Persistent per-slot intermediates copied directly into tiles.
    OptimizedComposite,
}

impl RendererKind {
    pub const ALL: [Self; 3] = [Self::DirectBlit, Self::SceneGraph, Self::OptimizedComposite];

    /// Canonical selection tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectBlit => "direct",
            Self::SceneGraph => "scene-graph",
            Self::OptimizedComposite => "optimized",
        }
    }

    /// Resolve a startup selection. Absent and unrecognized values are both errors.
    pub fn from_selection(tag: Option<&str>) -> FramepaceResult<Self> {
        match tag {
            Some(tag) => tag.parse(),
            None => Err(FramepaceError::config(
                "no renderer selected (expected one of: direct, scene-graph, optimized)",
            )),
        }
    }

    /// Whether construction requires a pre-registered destination surface.
    pub fn requires_destination(self) -> bool {
        !matches!(self, Self::SceneGraph)
    }
}

impl FromStr for RendererKind {
    type Err = FramepaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "direct-blit" | "canvas2d" => Ok(Self::DirectBlit),
            "scene-graph" | "scenegraph" | "fabric" => Ok(Self::SceneGraph),
            "optimized" | "optimized-composite" | "fabric-optimized" => {
                Ok(Self::OptimizedComposite)
            }
            other => Err(FramepaceError::config(format!(
                "invalid renderer type '{other}' (expected one of: direct, scene-graph, optimized)"
            ))),
        }
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a renderer, taking its destination surface out of `registry`.
///
/// Strategies that need a destination fail with a `Config` error when `surface_id` is not
/// registered. The scene-graph strategy falls back to allocating its own surface.
pub fn create_renderer(
    kind: RendererKind,
    registry: &mut SurfaceRegistry,
    surface_id: &str,
) -> FramepaceResult<Box<dyn Renderer>> {
    match kind {
        RendererKind::DirectBlit => Ok(Box::new(DirectBlitRenderer::new(
            registry.take(surface_id)?,
        ))),
        RendererKind::SceneGraph => {
            let surface = if registry.contains(surface_id) {
                registry.take(surface_id)?
            } else {
                Surface::new(DEFAULT_SURFACE_SIZE)?
            };
            Ok(Box::new(SceneGraphRenderer::new(surface)))
        }
        RendererKind::OptimizedComposite => Ok(Box::new(OptimizedCompositeRenderer::new(
            registry.take(surface_id)?,
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
