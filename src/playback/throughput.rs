use std::time::Instant;

/// Frames received per elapsed second, measured from the first received frame.
#[derive(Debug, Default)]
pub struct ThroughputMeter {
    start: Option<Instant>,
    frames: u64,
}

impl ThroughputMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one received frame at `now`.
    ///
    /// The first frame only starts the clock and yields `None`; later frames yield the running
    /// rate, or `None` while no time has elapsed yet.
    pub fn record(&mut self, now: Instant) -> Option<f64> {
        let Some(start) = self.start else {
            self.start = Some(now);
            return None;
        };
        self.frames += 1;
        let elapsed = now.saturating_duration_since(start).as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }
        Some(self.frames as f64 / elapsed)
    }

    /// Status text for a rate, with no fractional digits.
    pub fn format(fps: f64) -> String {
        format!("{fps:.0} fps")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/throughput.rs"]
mod tests;
