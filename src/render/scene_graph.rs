use std::sync::Arc;

use crate::foundation::core::{Size, StreamIndex};
use crate::foundation::error::FramepaceResult;
use crate::media::frame::Frame;
use crate::render::backend::{Renderer, RendererKind};
use crate::render::layout::{CompositeLayout, tile_rect};
use crate::render::raster::{context_for, flush_into, image_paint, paint_scaled};
use crate::render::surface::{Surface, pixmap_from_premul_bytes};

/// A retained drawable: one per slot, created on that slot's first frame.
struct SceneNode {
    stream: StreamIndex,
    raster: Arc<vello_cpu::Pixmap>,
    raster_size: Size,
    bounds: kurbo::Rect,
}

impl SceneNode {
    fn new(stream: StreamIndex, frame: &Frame, cell: Size) -> FramepaceResult<Self> {
        Ok(Self {
            stream,
            raster: Arc::new(pixmap_from_premul_bytes(frame.pixels(), frame.size())?),
            raster_size: frame.size(),
            bounds: tile_rect(stream, cell).to_kurbo(),
        })
    }

    /// Overwrite the backing raster, in place when the size is unchanged.
    fn set_raster(&mut self, frame: &Frame) -> FramepaceResult<()> {
        if self.raster_size == frame.size()
            && let Some(pixmap) = Arc::get_mut(&mut self.raster)
        {
            pixmap.data_as_u8_slice_mut().copy_from_slice(frame.pixels());
            return Ok(());
        }
        self.raster = Arc::new(pixmap_from_premul_bytes(frame.pixels(), frame.size())?);
        self.raster_size = frame.size();
        Ok(())
    }

    fn set_coords(&mut self, cell: Size) {
        self.bounds = tile_rect(self.stream, cell).to_kurbo();
    }
}

/// Nodes in insertion (paint) order.
#[derive(Default)]
struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    fn node_mut(&mut self, stream: StreamIndex) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.stream == stream)
    }

    fn add(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Repaint every node, changed or not.
    fn render_all(&self, surface: &mut Surface) -> FramepaceResult<()> {
        surface.clear();
        let mut ctx = context_for(surface)?;
        for node in &self.nodes {
            paint_scaled(
                &mut ctx,
                image_paint(node.raster.clone()),
                node.raster_size,
                node.bounds,
            );
        }
        flush_into(&mut ctx, surface);
        Ok(())
    }
}

/// Keeps one persistent node per slot in a retained graph and repaints the whole graph on each
/// draw.
///
/// A slot that is absent from a call keeps its node (and its last raster); nodes are always
/// re-placed at their slot's tile for the current cell, so a stale node never overlaps the other
/// tile.
pub struct SceneGraphRenderer {
    surface: Surface,
    graph: SceneGraph,
}

impl SceneGraphRenderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            graph: SceneGraph::default(),
        }
    }

    /// Number of retained nodes.
    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    fn update_node(
        &mut self,
        stream: StreamIndex,
        frame: &Frame,
        cell: Size,
    ) -> FramepaceResult<()> {
        match self.graph.node_mut(stream) {
            Some(node) => {
                node.set_raster(frame)?;
                node.set_coords(cell);
            }
            None => self.graph.add(SceneNode::new(stream, frame, cell)?),
        }
        Ok(())
    }
}

impl Renderer for SceneGraphRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::SceneGraph
    }

    fn draw(&mut self, frame0: Option<Frame>, frame1: Option<Frame>) -> FramepaceResult<()> {
        let Some(layout) = CompositeLayout::for_frames(frame0.as_ref(), frame1.as_ref()) else {
            tracing::debug!(renderer = "scene-graph", "nothing paintable, skipping draw");
            return Ok(());
        };

        self.surface.resize(layout.surface)?;

        for (stream, frame) in [
            (StreamIndex::PRIMARY, frame0),
            (StreamIndex::SECONDARY, frame1),
        ] {
            let Some(frame) = frame else {
                continue;
            };
            if !frame.size().is_empty() {
                self.update_node(stream, &frame, layout.cell)?;
            }
            frame.close();
        }

        for node in &mut self.graph.nodes {
            node.set_coords(layout.cell);
        }
        self.graph.render_all(&mut self.surface)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
