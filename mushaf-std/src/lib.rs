//! # mushaf-std
//!
//! Standard implementations for the mushaf event dispatcher.
//!
//! This crate provides:
//! - **Dispatching**: [`EventDispatcher`], [`Subscription`]
//! - **Ordering**: [`RequestSequencer`] for discarding stale async results
//! - **Standard hooks**: tracing wrapper for handlers
//! - **Testing**: recording handlers for order and payload assertions

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use mushaf_core;

// Modules
pub mod dispatcher;
pub mod hooks;
pub mod sequence;
pub mod testing;

pub use dispatcher::{EventDispatcher, Subscription};
pub use sequence::{RequestSequencer, Ticket};
