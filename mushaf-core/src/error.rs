//! Error types for mushaf.
//!
//! This module provides a small error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Errors surfaced by a dispatch call
//! - [`UnknownChannel`] - A channel name that is not part of the closed set

use crate::channel::Channel;
use thiserror::Error;

/// A boxed error type for handler failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during event dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler failed. Handlers after `position` were not invoked.
    #[error("handler #{position} on {channel} failed")]
    Handler {
        /// The channel being dispatched.
        channel: Channel,
        /// Zero-based position of the failing handler in registration order.
        position: usize,
        /// The handler's error.
        #[source]
        source: BoxError,
    },

    /// An untyped context could not be decoded into the channel's payload.
    #[error("invalid context for {channel}")]
    Context {
        /// The channel the context was addressed to.
        channel: Channel,
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },
}

impl DispatchError {
    /// The channel the failed dispatch was addressed to.
    pub fn channel(&self) -> Channel {
        match self {
            DispatchError::Handler { channel, .. } | DispatchError::Context { channel, .. } => {
                *channel
            }
        }
    }
}

/// A channel name outside of the closed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);
