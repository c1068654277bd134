use super::*;

#[test]
fn two_frames_use_max_cell_and_diagonal_tiles() {
    let layout =
        CompositeLayout::for_sizes([Some(Size::new(640, 480)), Some(Size::new(320, 240))])
            .unwrap();
    assert_eq!(layout.cell, Size::new(640, 480));
    assert_eq!(layout.surface, Size::new(1280, 960));
    assert_eq!(
        layout.tile(StreamIndex::PRIMARY),
        Some(TileRect {
            x: 0,
            y: 0,
            width: 640,
            height: 480
        })
    );
    assert_eq!(
        layout.tile(StreamIndex::SECONDARY),
        Some(TileRect {
            x: 640,
            y: 480,
            width: 640,
            height: 480
        })
    );
}

#[test]
fn cell_takes_max_of_each_axis_independently() {
    let layout =
        CompositeLayout::for_sizes([Some(Size::new(100, 20)), Some(Size::new(50, 80))]).unwrap();
    assert_eq!(layout.cell, Size::new(100, 80));
}

#[test]
fn primary_alone_is_one_cell() {
    let layout = CompositeLayout::for_sizes([Some(Size::new(64, 48)), None]).unwrap();
    assert_eq!(layout.surface, Size::new(64, 48));
    assert!(layout.tile(StreamIndex::SECONDARY).is_none());
}

#[test]
fn secondary_alone_keeps_its_offset() {
    let layout = CompositeLayout::for_sizes([None, Some(Size::new(64, 48))]).unwrap();
    assert_eq!(layout.surface, Size::new(128, 96));
    assert!(layout.tile(StreamIndex::PRIMARY).is_none());
    assert_eq!(layout.tile(StreamIndex::SECONDARY).unwrap().x, 64);
}

#[test]
fn nothing_paintable_yields_none() {
    assert!(CompositeLayout::for_sizes([None, None]).is_none());
    assert!(CompositeLayout::for_sizes([Some(Size::new(0, 0)), None]).is_none());
}

#[test]
fn zero_sized_frame_next_to_real_frame_still_lays_out() {
    let layout =
        CompositeLayout::for_sizes([Some(Size::new(0, 0)), Some(Size::new(10, 10))]).unwrap();
    assert_eq!(layout.cell, Size::new(10, 10));
    assert_eq!(layout.surface, Size::new(20, 20));
}
