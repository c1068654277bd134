use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Key -> text updates delivered together in one flush.
pub type StatusBatch = BTreeMap<String, String>;

/// Where flushed status batches go.
pub trait StatusSink {
    fn publish(&mut self, batch: &StatusBatch);
}

/// Emits each batch as a single `info` event.
#[derive(Debug, Default)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn publish(&mut self, batch: &StatusBatch) {
        let line = batch
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(target: "framepace::status", "{line}");
    }
}

/// Keeps every published batch; clones share storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatusSink {
    batches: Arc<Mutex<Vec<StatusBatch>>>,
}

impl MemoryStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<StatusBatch> {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StatusSink for MemoryStatusSink {
    fn publish(&mut self, batch: &StatusBatch) {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(batch.clone());
    }
}

/// Batches status updates so repeated keys cost one flush per tick.
pub struct StatusAggregator {
    pending: Option<StatusBatch>,
    sink: Box<dyn StatusSink>,
    flushes: u64,
}

impl StatusAggregator {
    pub fn new(sink: Box<dyn StatusSink>) -> Self {
        Self {
            pending: None,
            sink,
            flushes: 0,
        }
    }

    /// Record `message` under `key` for the next flush; last write wins within a batch.
    ///
    /// Returns `true` when this call started a new batch (and so scheduled a flush).
    pub fn set(&mut self, key: impl Into<String>, message: impl Into<String>) -> bool {
        match &mut self.pending {
            Some(batch) => {
                batch.insert(key.into(), message.into());
                false
            }
            None => {
                self.pending = Some(BTreeMap::from([(key.into(), message.into())]));
                true
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver the pending batch, if any, and clear it.
    pub fn flush(&mut self) -> bool {
        let Some(batch) = self.pending.take() else {
            return false;
        };
        self.sink.publish(&batch);
        self.flushes += 1;
        true
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/status.rs"]
mod tests;
