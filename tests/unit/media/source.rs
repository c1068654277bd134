use std::time::Instant;

use super::*;

fn publisher() -> (
    FramePublisher,
    crossbeam_channel::Receiver<SourceEvent>,
    Sender<()>,
) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(0);
    (
        FramePublisher::new(StreamIndex::SECONDARY, tx, shutdown_rx),
        rx,
        shutdown_tx,
    )
}

#[test]
fn pace_waits_the_full_interval_while_running() {
    let (publisher, _rx, _shutdown) = publisher();
    let start = Instant::now();
    assert!(publisher.pace(Duration::from_millis(20)));
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn pace_returns_immediately_after_shutdown() {
    let (publisher, _rx, shutdown) = publisher();
    drop(shutdown);
    let start = Instant::now();
    assert!(!publisher.pace(Duration::from_secs(30)));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn pace_is_interrupted_by_shutdown_from_another_thread() {
    let (publisher, _rx, shutdown) = publisher();
    let start = Instant::now();
    let signaller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        drop(shutdown);
    });
    assert!(!publisher.pace(Duration::from_secs(30)));
    assert!(start.elapsed() < Duration::from_secs(5));
    signaller.join().unwrap();
}

#[test]
fn events_are_tagged_with_the_stream() {
    let (publisher, rx, _shutdown) = publisher();
    assert!(publisher.publish_status("fetch[1]", "ok"));
    assert!(publisher.publish_finished());
    let first = rx.recv().unwrap();
    assert_eq!(first.stream, StreamIndex::SECONDARY);
    assert!(matches!(first.kind, SourceEventKind::Status { .. }));
    assert!(matches!(rx.recv().unwrap().kind, SourceEventKind::Finished));
}

#[test]
fn publish_fails_once_the_loop_is_gone() {
    let (publisher, rx, _shutdown) = publisher();
    drop(rx);
    assert!(!publisher.publish_frame(Frame::solid(1, 1, [0, 0, 0, 255])));
}
