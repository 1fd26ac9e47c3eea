//! Testing utilities for mushaf.
//!
//! This module provides utilities to make testing handlers and dispatch order
//! easier.
//!
//! # Features
//!
//! - [`RecordingHandler`]: A handler that records every event it receives
//! - [`OrderLog`]: A shared log that labelled handlers append to, for
//!   asserting invocation order across several handlers

use mushaf_core::{BoxError, Event, Handler};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all events it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// events.listen_handler(Channel::View, recorder.clone());
///
/// events.dispatch(Event::view(5, "Al-Ma'idah"))?;
///
/// assert_eq!(recorder.events(), vec![Event::view(5, "Al-Ma'idah")]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    events: Arc<Mutex<Vec<Event>>>,
    failure: Option<&'static str>,
}

impl RecordingHandler {
    /// Create a new recording handler that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording handler that records, then fails with `message`.
    pub fn failing(message: &'static str) -> Self {
        Self {
            events: Arc::default(),
            failure: Some(message),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Handler for RecordingHandler {
    fn handle(&self, event: &Event) -> Result<(), BoxError> {
        self.events.lock().unwrap().push(event.clone());
        match self.failure {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Order Log
// ============================================================================

/// A shared, append-only log of handler invocations.
#[derive(Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl OrderLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that appends `label` each time it runs.
    pub fn recorder(&self, label: &'static str) -> impl Handler + use<> {
        let entries = self.entries.clone();
        move |_: &Event| -> Result<(), BoxError> {
            entries.lock().unwrap().push(label.to_owned());
            Ok(())
        }
    }

    /// Append an entry by hand.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Snapshot of the entries in append order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}
