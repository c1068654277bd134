use std::time::Duration;

use super::*;

#[test]
fn first_frame_only_starts_the_clock() {
    let mut m = ThroughputMeter::new();
    assert_eq!(m.record(Instant::now()), None);
}

#[test]
fn rate_is_frames_over_elapsed_seconds() {
    let t0 = Instant::now();
    let mut m = ThroughputMeter::new();
    m.record(t0);
    for i in 1..=30u64 {
        let fps = m.record(t0 + Duration::from_millis(i * 20));
        if i == 30 {
            let fps = fps.unwrap();
            assert!((fps - 50.0).abs() < 1e-9, "fps = {fps}");
        }
    }
}

#[test]
fn zero_elapsed_yields_none() {
    let t0 = Instant::now();
    let mut m = ThroughputMeter::new();
    m.record(t0);
    assert_eq!(m.record(t0), None);
}

#[test]
fn format_drops_fractional_digits() {
    assert_eq!(ThroughputMeter::format(59.94), "60 fps");
    assert_eq!(ThroughputMeter::format(29.4), "29 fps");
}
