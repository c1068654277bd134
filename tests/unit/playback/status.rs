use super::*;

#[test]
fn same_key_twice_before_flush_keeps_second_value() {
    let sink = MemoryStatusSink::new();
    let mut status = StatusAggregator::new(Box::new(sink.clone()));

    assert!(status.set("render", "10 fps"));
    assert!(!status.set("render", "12 fps"));
    assert!(status.flush());

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].get("render").map(String::as_str), Some("12 fps"));
    assert_eq!(batches[0].len(), 1);
}

#[test]
fn distinct_keys_share_one_batch() {
    let sink = MemoryStatusSink::new();
    let mut status = StatusAggregator::new(Box::new(sink.clone()));
    status.set("decode[0]", "png @ 4x4");
    status.set("render", "30 fps");
    status.flush();
    assert_eq!(sink.batches().len(), 1);
    assert_eq!(sink.batches()[0].len(), 2);
}

#[test]
fn flush_without_pending_batch_is_noop() {
    let sink = MemoryStatusSink::new();
    let mut status = StatusAggregator::new(Box::new(sink.clone()));
    assert!(!status.flush());
    assert!(sink.batches().is_empty());
    assert_eq!(status.flushes(), 0);
}

#[test]
fn set_after_flush_starts_new_batch() {
    let sink = MemoryStatusSink::new();
    let mut status = StatusAggregator::new(Box::new(sink.clone()));
    status.set("a", "1");
    status.flush();
    assert!(!status.is_pending());
    assert!(status.set("a", "2"));
    status.flush();
    let batches = sink.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1].get("a").map(String::as_str), Some("2"));
}
