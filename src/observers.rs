//! Observers that react to store changes.

use std::{cell::RefCell, rc::Rc};

use crate::events::LendingEvent;

/// Trait for store change observation
pub trait LendingObserver {
    /// Called after a mutation has been applied
    fn on_event(&self, event: &LendingEvent);
}

/// Logs every event through `tracing`
#[derive(Debug)]
pub struct LendingLogger;

impl LendingObserver for LendingLogger {
    fn on_event(&self, event: &LendingEvent) {
        match event {
            LendingEvent::Borrowed { isbn, reader_id, due } => {
                tracing::info!(%isbn, %reader_id, %due, "book borrowed");
            }
            LendingEvent::Returned { isbn, reader_id, on } => {
                tracing::info!(%isbn, %reader_id, %on, "book returned");
            }
            LendingEvent::Extended { isbn, reader_id, due } => {
                tracing::info!(%isbn, %reader_id, %due, "borrowing extended");
            }
            other => tracing::debug!(event = ?other, "catalog changed"),
        }
    }
}

/// Keeps every event it sees, in order
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    /// Shared buffer so a clone can be handed to the store
    events: Rc<RefCell<Vec<LendingEvent>>>,
}

impl EventRecorder {
    /// Create a recorder with no events
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<LendingEvent> {
        self.events.borrow().clone()
    }
}

impl LendingObserver for EventRecorder {
    fn on_event(&self, event: &LendingEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
