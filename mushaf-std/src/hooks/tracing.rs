use mushaf_core::{BoxError, Event, Handler};

/// A Handler wrapper that instruments each invocation with a `tracing` span.
///
/// The span carries the handler name and the channel; a failing handler is
/// reported at `warn` before the error travels back to the dispatcher.
/// Without the `tracing` feature this is a plain pass-through.
pub struct Traced<H> {
    inner: H,
    name: &'static str,
}

impl<H> Traced<H> {
    /// Wrap `inner` under the given name.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name used in spans.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H: Clone> Clone for Traced<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<H: Handler> Handler for Traced<H> {
    #[cfg(feature = "tracing")]
    fn handle(&self, event: &Event) -> Result<(), BoxError> {
        let span = ::tracing::debug_span!(
            "handler",
            handler = %self.name,
            channel = %event.channel(),
        );
        let _entered = span.enter();

        let result = self.inner.handle(event);
        if let Err(error) = &result {
            ::tracing::warn!(%error, ?event, "handler failed");
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn handle(&self, event: &Event) -> Result<(), BoxError> {
        self.inner.handle(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Clone)]
    struct Counting(Arc<AtomicUsize>);

    impl Handler for Counting {
        fn handle(&self, _event: &Event) -> Result<(), BoxError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    impl Handler for Failing {
        fn handle(&self, _event: &Event) -> Result<(), BoxError> {
            Err("boom".into())
        }
    }

    #[test]
    fn test_traced_passthrough() {
        let count = Arc::new(AtomicUsize::new(0));
        let traced = Traced::new(Counting(count.clone()), "counting").clone();

        traced.handle(&Event::view(1, "Al-Fatihah")).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(traced.name(), "counting");
    }

    #[test]
    fn test_traced_keeps_error() {
        let traced = Traced::new(Failing, "failing");
        let err = traced.handle(&Event::Start).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
