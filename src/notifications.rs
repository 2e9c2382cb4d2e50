//! Notifications
//!
//! Cart events are surfaced to the shopper through a [`NotificationSink`]. Sinks
//! are fire-and-forget: a failing sink is logged by the [`Dispatcher`] and
//! never affects cart state.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::cart::CartEvent;

/// Errors a sink can report when it fails to deliver an event.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The sink cannot take events right now.
    #[error("notification sink unavailable")]
    Unavailable,

    /// The sink refused the event.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Receiver of user-facing cart feedback.
pub trait NotificationSink: Send {
    /// Deliver a single event.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] if the event could not be delivered.
    fn notify(&mut self, event: &CartEvent) -> Result<(), NotificationError>;
}

impl<F> NotificationSink for F
where
    F: FnMut(&CartEvent) -> Result<(), NotificationError> + Send,
{
    fn notify(&mut self, event: &CartEvent) -> Result<(), NotificationError> {
        self(event)
    }
}

/// Writes every event to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, event: &CartEvent) -> Result<(), NotificationError> {
        info!(kind = event.kind().as_str(), message = %event, "cart notification");

        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&mut self, _event: &CartEvent) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Keeps delivered events in memory. Clones share the same buffer, so one
/// handle can be given to a store and another kept to read what was sent.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<CartEvent>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered so far, oldest first.
    pub fn events(&self) -> Vec<CartEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Take the delivered events, leaving the buffer empty.
    pub fn take(&self) -> Vec<CartEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, event: &CartEvent) -> Result<(), NotificationError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_poisoned| NotificationError::Unavailable)?;

        events.push(event.clone());

        Ok(())
    }
}

/// Forwards events to a sink, swallowing its failures.
pub struct Dispatcher {
    sink: Box<dyn NotificationSink>,
}

impl Dispatcher {
    /// Create a dispatcher for the given sink.
    pub fn new(sink: impl NotificationSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Deliver events in order. Failures are logged and skipped.
    pub fn dispatch(&mut self, events: &[CartEvent]) {
        for event in events {
            if let Err(err) = self.sink.notify(event) {
                warn!(
                    kind = event.kind().as_str(),
                    error = %err,
                    "failed to deliver cart notification"
                );
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
