//! # Handler
//!
//! The unit of behavior registered on a channel.
//!
//! Handlers run synchronously inside a dispatch call and return as soon as
//! their own function body returns. A handler that needs to talk to the
//! network spawns that work and returns immediately; the dispatcher never
//! waits for it.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|event: &Event| { ...; Ok(()) }`
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//! 3. **Wrapped**: a handler wrapping another one (e.g. a logging wrapper)

use crate::{error::BoxError, event::Event};

/// A callable invoked with the context of the channel it is registered on.
///
/// Returning `Err` stops delivery to the handlers registered after this one
/// and surfaces the error to whoever called `dispatch`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle reader events",
    label = "missing `Handler` implementation",
    note = "Handlers must implement `handle(&self, &Event) -> Result<(), BoxError>`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Executes the handler logic.
    fn handle(&self, event: &Event) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F> Handler for F
where
    F: Fn(&Event) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn handle(&self, event: &Event) -> Result<(), BoxError> {
        (self)(event)
    }
}
