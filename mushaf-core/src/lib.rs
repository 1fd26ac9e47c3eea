//! # mushaf-core
//!
//! Core types for the mushaf event dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! anything that publishes or subscribes to reader events without pulling in
//! the dispatcher implementation from `mushaf-std`.
//!
//! # Building Blocks
//!
//! ## Channels ([`Channel`])
//!
//! A fixed, closed set of four event kinds: `onStart`, `onView`,
//! `onNextPage` and `onPrevPage`. No channel can be added or removed at
//! runtime, so a typo in a channel name can never create a dead channel.
//!
//! ## Events ([`Event`])
//!
//! The payload delivered to handlers. Each channel carries its own payload
//! type, so handlers never have to guess the shape of the context.
//!
//! ## Handlers ([`Handler`])
//!
//! The unit of behavior registered on a channel. Handlers are synchronous from
//! the dispatcher's point of view; any asynchronous work they start is their
//! own business.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Errors surfaced by a dispatch call
//! - [`UnknownChannel`] - A channel name outside the closed set

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod channel;
mod error;
mod event;
mod handler;

// Re-exports
pub use channel::Channel;
pub use error::{BoxError, DispatchError, UnknownChannel};
pub use event::{Event, NextPage, PageNumber, PrevPage, ViewSelected};
pub use handler::Handler;
