use std::sync::{Arc, Mutex};

use super::*;
use crate::foundation::core::Size;
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::media::frame::{FrameId, ReleaseHook};
use crate::render::backend::RendererKind;
use crate::render::surface::Surface;

#[derive(Default)]
struct Calls {
    draws: Vec<(Option<FrameId>, Option<FrameId>)>,
}

struct RecordingRenderer {
    calls: Arc<Mutex<Calls>>,
    surface: Surface,
    fail: bool,
}

impl Renderer for RecordingRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::DirectBlit
    }

    fn draw(&mut self, frame0: Option<Frame>, frame1: Option<Frame>) -> FramepaceResult<()> {
        self.calls
            .lock()
            .unwrap()
            .draws
            .push((frame0.as_ref().map(Frame::id), frame1.as_ref().map(Frame::id)));
        if self.fail {
            return Err(FramepaceError::render("boom"));
        }
        if let Some(f) = frame0 {
            f.close();
        }
        if let Some(f) = frame1 {
            f.close();
        }
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

fn scheduler(fail: bool) -> (RenderScheduler, Arc<Mutex<Calls>>) {
    let calls = Arc::new(Mutex::new(Calls::default()));
    let renderer = RecordingRenderer {
        calls: calls.clone(),
        surface: Surface::new(Size::new(1, 1)).unwrap(),
        fail,
    };
    (RenderScheduler::new(Box::new(renderer)), calls)
}

fn ledger() -> (ReleaseHook, Arc<Mutex<Vec<FrameId>>>) {
    let released = Arc::new(Mutex::new(Vec::new()));
    let sink = released.clone();
    let hook: ReleaseHook = Arc::new(move |id| sink.lock().unwrap().push(id));
    (hook, released)
}

#[test]
fn burst_to_one_slot_draws_only_the_last_frame() {
    let (hook, released) = ledger();
    let (mut sched, calls) = scheduler(false);

    let mut ids = Vec::new();
    for _ in 0..5 {
        let f = Frame::solid(4, 4, [9, 9, 9, 255]).with_release_hook(hook.clone());
        ids.push(f.id());
        sched.submit(StreamIndex::PRIMARY, f);
    }
    assert!(sched.on_tick());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.draws.len(), 1);
    assert_eq!(calls.draws[0], (Some(ids[4]), None));

    let released = released.lock().unwrap();
    assert_eq!(released.len(), 5);
    for id in &ids {
        assert_eq!(released.iter().filter(|r| *r == id).count(), 1);
    }
    assert_eq!(sched.stats().frames_superseded, 4);
}

#[test]
fn many_submits_in_one_window_request_one_tick_and_render_once() {
    let (mut sched, calls) = scheduler(false);
    for i in 0..10 {
        let stream = if i % 2 == 0 {
            StreamIndex::PRIMARY
        } else {
            StreamIndex::SECONDARY
        };
        sched.submit(stream, Frame::solid(2, 2, [0, 0, 0, 255]));
    }
    assert!(sched.is_pending());
    assert_eq!(sched.stats().ticks_requested, 1);

    assert!(sched.on_tick());
    assert!(!sched.is_pending());
    assert!(!sched.on_tick());
    assert_eq!(calls.lock().unwrap().draws.len(), 1);
}

#[test]
fn tick_with_empty_slots_does_not_draw() {
    let (mut sched, calls) = scheduler(false);
    assert!(sched.schedule());
    assert!(!sched.schedule());
    assert!(!sched.on_tick());
    assert!(calls.lock().unwrap().draws.is_empty());
}

#[test]
fn next_window_schedules_again() {
    let (mut sched, _) = scheduler(false);
    sched.submit(StreamIndex::PRIMARY, Frame::solid(1, 1, [0, 0, 0, 255]));
    sched.on_tick();
    sched.submit(StreamIndex::PRIMARY, Frame::solid(1, 1, [0, 0, 0, 255]));
    assert!(sched.is_pending());
    assert_eq!(sched.stats().ticks_requested, 2);
}

#[test]
fn draw_failure_is_counted_and_frames_still_released() {
    let (hook, released) = ledger();
    let (mut sched, _) = scheduler(true);
    sched.submit(
        StreamIndex::PRIMARY,
        Frame::solid(1, 1, [0, 0, 0, 255]).with_release_hook(hook.clone()),
    );
    assert!(!sched.on_tick());
    assert_eq!(sched.stats().draw_errors, 1);
    assert_eq!(released.lock().unwrap().len(), 1);

    sched.submit(StreamIndex::PRIMARY, Frame::solid(1, 1, [0, 0, 0, 255]));
    assert!(sched.is_pending());
}
