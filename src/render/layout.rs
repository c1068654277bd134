use crate::foundation::core::{STREAM_COUNT, Size, StreamIndex};
use crate::media::frame::Frame;

/// Pixel-aligned rectangle inside the destination surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }
}

/// Placement of one or two frames inside a composite.
///
/// The cell is the per-call maximum of the present frames' sizes. Stream `i` sits at
/// `(i * cell.width, i * cell.height)`, and the destination spans through the last occupied
/// tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeLayout {
    pub cell: Size,
    pub surface: Size,
    pub tiles: [Option<TileRect>; STREAM_COUNT],
}

impl CompositeLayout {
    /// Layout for the frames of one draw call, or `None` when there is nothing paintable.
    pub fn for_frames(frame0: Option<&Frame>, frame1: Option<&Frame>) -> Option<Self> {
        Self::for_sizes([frame0.map(Frame::size), frame1.map(Frame::size)])
    }

    pub fn for_sizes(sizes: [Option<Size>; STREAM_COUNT]) -> Option<Self> {
        let cell = sizes
            .iter()
            .flatten()
            .fold(Size::default(), |acc, s| acc.max(*s));
        if cell.is_empty() {
            return None;
        }

        let mut tiles = [None; STREAM_COUNT];
        let mut last = 0u32;
        for stream in StreamIndex::all() {
            if sizes[stream.get()].is_none() {
                continue;
            }
            tiles[stream.get()] = Some(tile_rect(stream, cell));
            last = stream.get() as u32;
        }

        let span = last + 1;
        Some(Self {
            cell,
            surface: Size::new(
                cell.width.saturating_mul(span),
                cell.height.saturating_mul(span),
            ),
            tiles,
        })
    }

    pub fn tile(&self, stream: StreamIndex) -> Option<TileRect> {
        self.tiles[stream.get()]
    }
}

/// Fixed tile position of `stream` for a given cell size.
pub fn tile_rect(stream: StreamIndex, cell: Size) -> TileRect {
    let i = stream.get() as u32;
    TileRect {
        x: cell.width.saturating_mul(i),
        y: cell.height.saturating_mul(i),
        width: cell.width,
        height: cell.height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
