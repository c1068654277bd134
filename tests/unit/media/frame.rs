use std::sync::Mutex;

use super::*;

fn recording_hook() -> (ReleaseHook, Arc<Mutex<Vec<FrameId>>>) {
    let released = Arc::new(Mutex::new(Vec::new()));
    let sink = released.clone();
    let hook: ReleaseHook = Arc::new(move |id| sink.lock().unwrap().push(id));
    (hook, released)
}

#[test]
fn close_fires_release_hook_once() {
    let (hook, released) = recording_hook();
    let frame = Frame::solid(4, 4, [255, 0, 0, 255]).with_release_hook(hook);
    let id = frame.id();
    frame.close();
    assert_eq!(released.lock().unwrap().as_slice(), &[id]);
}

#[test]
fn dropping_without_close_still_releases_once() {
    let (hook, released) = recording_hook();
    {
        let _frame = Frame::solid(2, 2, [0, 0, 0, 255]).with_release_hook(hook);
    }
    assert_eq!(released.lock().unwrap().len(), 1);
}

#[test]
fn byte_length_is_validated() {
    assert!(Frame::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    let f = Frame::from_premul_rgba8(2, 2, vec![0; 16]).unwrap();
    assert_eq!(f.display_width(), 2);
    assert_eq!(f.display_height(), 2);
}

#[test]
fn zero_sized_frames_are_representable() {
    let f = Frame::from_premul_rgba8(0, 0, Vec::new()).unwrap();
    assert!(f.size().is_empty());
}

#[test]
fn solid_premultiplies_straight_color() {
    let f = Frame::solid(1, 1, [100, 50, 200, 128]);
    assert_eq!(
        f.pixels(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn frame_ids_are_unique() {
    let a = Frame::solid(1, 1, [0, 0, 0, 255]);
    let b = Frame::solid(1, 1, [0, 0, 0, 255]);
    assert_ne!(a.id(), b.id());
}
