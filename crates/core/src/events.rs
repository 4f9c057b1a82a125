//! Event sinks - where engine notifications go.
//!
//! The session queues [`GameEvent`]s while it runs and hands them to a sink
//! when the caller drains it. Sinks must not block; the engine never reads
//! anything back from them.

use std::sync::mpsc;

use crate::types::GameEvent;

/// Consumer of engine notifications
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

/// Collects events in memory (tests, replay of a frame's events)
impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: GameEvent) {}
}

/// Forwards events over a std channel; a closed receiver is ignored
impl EventSink for mpsc::Sender<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}
