//! [`EventSink`] implementations.

use accrue_core::traits::EventSink;
use accrue_core::types::CapitalizationEvent;
use parking_lot::Mutex;
use tracing::info;

/// Sink that logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &CapitalizationEvent) {
        match event {
            CapitalizationEvent::Checkpointed { current_rate, at } => {
                info!(%current_rate, at, "event: checkpointed")
            }
            CapitalizationEvent::RateChanged { old, new, at } => {
                info!(%old, %new, at, "event: rate changed")
            }
            CapitalizationEvent::PeriodChanged { old, new, at } => {
                info!(old, new, at, "event: period changed")
            }
        }
    }
}

/// Sink that keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CapitalizationEvent>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far.
    pub fn events(&self) -> Vec<CapitalizationEvent> {
        self.events.lock().clone()
    }

    /// Remove and return all events received so far.
    pub fn drain(&self) -> Vec<CapitalizationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &CapitalizationEvent) {
        self.events.lock().push(event.clone());
    }
}
