use std::sync::{Arc, Mutex};

use super::*;
use crate::media::frame::{FrameId, ReleaseHook};

fn ledger() -> (ReleaseHook, Arc<Mutex<Vec<FrameId>>>) {
    let released = Arc::new(Mutex::new(Vec::new()));
    let sink = released.clone();
    let hook: ReleaseHook = Arc::new(move |id| sink.lock().unwrap().push(id));
    (hook, released)
}

fn frame(hook: &ReleaseHook) -> Frame {
    Frame::solid(2, 2, [1, 2, 3, 255]).with_release_hook(hook.clone())
}

#[test]
fn only_first_submit_after_take_requests_a_tick() {
    let (hook, _) = ledger();
    let mut buf = FrameSlotBuffer::new();
    assert!(buf.submit(StreamIndex::PRIMARY, frame(&hook)));
    assert!(!buf.submit(StreamIndex::PRIMARY, frame(&hook)));
    assert!(!buf.submit(StreamIndex::SECONDARY, frame(&hook)));
    let _ = buf.take();
    assert!(buf.submit(StreamIndex::SECONDARY, frame(&hook)));
}

#[test]
fn overwrite_releases_previous_occupant_immediately() {
    let (hook, released) = ledger();
    let mut buf = FrameSlotBuffer::new();
    let a = frame(&hook);
    let a_id = a.id();
    let b = frame(&hook);
    let b_id = b.id();

    buf.submit(StreamIndex::PRIMARY, a);
    assert!(released.lock().unwrap().is_empty());
    buf.submit(StreamIndex::PRIMARY, b);
    assert_eq!(released.lock().unwrap().as_slice(), &[a_id]);
    assert_eq!(buf.superseded(), 1);

    let taken = buf.take();
    assert_eq!(taken.get(StreamIndex::PRIMARY).unwrap().id(), b_id);
    assert!(taken.get(StreamIndex::SECONDARY).is_none());
}

#[test]
fn take_clears_and_never_returns_a_frame_twice() {
    let (hook, _) = ledger();
    let mut buf = FrameSlotBuffer::new();
    buf.submit(StreamIndex::PRIMARY, frame(&hook));
    buf.submit(StreamIndex::SECONDARY, frame(&hook));

    let first = buf.take();
    assert_eq!(first.occupied(), 2);
    assert!(buf.is_empty());

    let second = buf.take();
    assert!(second.is_empty());
}

#[test]
fn slots_are_independent() {
    let (hook, released) = ledger();
    let mut buf = FrameSlotBuffer::new();
    buf.submit(StreamIndex::PRIMARY, frame(&hook));
    buf.submit(StreamIndex::SECONDARY, frame(&hook));
    assert!(released.lock().unwrap().is_empty());
    let (f0, f1) = buf.take().into_pair();
    assert!(f0.is_some() && f1.is_some());
}
