//! Channel registry and dispatch.
//!
//! The dispatcher keeps one ordered handler list per [`Channel`]. Lists only
//! grow through [`EventDispatcher::listen`] and shrink through
//! [`EventDispatcher::unlisten`]; neither ever reorders the remaining entries.
//!
//! Dispatch works on a snapshot of the list taken when the call starts, so a
//! handler may register or remove handlers (or dispatch again) while it runs.
//! Such changes only affect later dispatches.

use mushaf_core::{BoxError, Channel, DispatchError, Event, Handler};
use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Handle returned by [`EventDispatcher::listen`], used to remove exactly
/// that registration later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    channel: Channel,
    id: u64,
}

impl Subscription {
    /// The channel the handler was registered on.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

#[derive(Clone)]
struct Entry {
    id: u64,
    handler: Arc<dyn Handler>,
}

/// A publish/subscribe registry over the closed set of channels.
///
/// # Example
///
/// ```rust,ignore
/// let events = EventDispatcher::new();
/// events.listen(Channel::View, |event: &Event| {
///     println!("{event:?}");
///     Ok(())
/// });
/// events.dispatch(Event::view(5, "Al-Ma'idah"))?;
/// ```
pub struct EventDispatcher {
    channels: Mutex<[Vec<Entry>; Channel::COUNT]>,
    next_id: AtomicU64,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    /// Create a dispatcher with no handlers.
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(Default::default()),
            next_id: AtomicU64::new(0),
        }
    }

    fn registry(&self) -> MutexGuard<'_, [Vec<Entry>; Channel::COUNT]> {
        // Handlers never run while the lock is held, so a poisoned lock still
        // guards a consistent registry.
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a closure after every handler already registered on `channel`.
    pub fn listen<F>(&self, channel: Channel, handler: F) -> Subscription
    where
        F: Fn(&Event) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.listen_handler(channel, handler)
    }

    /// Append a [`Handler`] after every handler already registered on `channel`.
    pub fn listen_handler<H: Handler>(&self, channel: Channel, handler: H) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry()[channel.index()].push(Entry {
            id,
            handler: Arc::new(handler),
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(%channel, id, "handler registered");

        Subscription { channel, id }
    }

    /// Register a closure on a channel given by name.
    ///
    /// Unknown names are ignored: nothing is stored and `None` is returned.
    pub fn listen_named<F>(&self, name: &str, handler: F) -> Option<Subscription>
    where
        F: Fn(&Event) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        match Channel::from_name(name) {
            Some(channel) => Some(self.listen(channel, handler)),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(name, "listen on unknown channel ignored");
                None
            }
        }
    }

    /// Remove one registration. Returns `false` if it was already removed.
    pub fn unlisten(&self, subscription: Subscription) -> bool {
        let mut registry = self.registry();
        let entries = &mut registry[subscription.channel.index()];
        match entries.iter().position(|e| e.id == subscription.id) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    /// Number of handlers currently registered on `channel`.
    pub fn handler_count(&self, channel: Channel) -> usize {
        self.registry()[channel.index()].len()
    }

    /// Invoke every handler registered on the event's channel, in
    /// registration order, passing the same event to each.
    ///
    /// The first handler error stops delivery and is returned; handlers after
    /// it are not invoked. Asynchronous work started by handlers is not
    /// awaited.
    pub fn dispatch(&self, event: Event) -> Result<(), DispatchError> {
        let channel = event.channel();
        let snapshot: Vec<Entry> = self.registry()[channel.index()].clone();

        #[cfg(feature = "tracing")]
        tracing::trace!(%channel, handlers = snapshot.len(), "dispatch");

        for (position, entry) in snapshot.iter().enumerate() {
            entry
                .handler
                .handle(&event)
                .map_err(|source| DispatchError::Handler {
                    channel,
                    position,
                    source,
                })?;
        }
        Ok(())
    }

    /// Dispatch an untyped context to a channel given by name.
    ///
    /// Unknown names are a silent no-op. For known names the context is
    /// decoded with [`Event::from_context`].
    pub fn dispatch_named(
        &self,
        name: &str,
        context: serde_json::Value,
    ) -> Result<(), DispatchError> {
        let Some(channel) = Channel::from_name(name) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(name, "dispatch on unknown channel ignored");
            return Ok(());
        };
        let event = Event::from_context(channel, context)
            .map_err(|source| DispatchError::Context { channel, source })?;
        self.dispatch(event)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry();
        let mut map = f.debug_map();
        for channel in Channel::ALL {
            map.entry(&channel.name(), &registry[channel.index()].len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_unlisten_keeps_order_of_the_rest() {
        let events = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut subs = Vec::new();
        for label in ["h1", "h2", "h3"] {
            let log = log.clone();
            subs.push(events.listen(Channel::NextPage, move |_: &Event| {
                log.lock().unwrap().push(label);
                Ok(())
            }));
        }

        assert!(events.unlisten(subs[1]));
        assert!(!events.unlisten(subs[1]), "second removal is a no-op");
        assert_eq!(events.handler_count(Channel::NextPage), 2);

        events.dispatch(Event::next_page(3)).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["h1", "h3"]);
    }

    #[test]
    fn test_listen_during_dispatch_applies_to_next_pass() {
        let events = Arc::new(EventDispatcher::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&events);
        let counter = late_calls.clone();
        events.listen(Channel::Start, move |_: &Event| {
            if let Some(events) = weak.upgrade() {
                let counter = counter.clone();
                events.listen(Channel::Start, move |_: &Event| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
            Ok(())
        });

        events.dispatch(Event::Start).unwrap();
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
        assert_eq!(events.handler_count(Channel::Start), 2);

        events.dispatch(Event::Start).unwrap();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_from_handler() {
        let events = Arc::new(EventDispatcher::new());
        let views = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&events);
        events.listen(Channel::NextPage, move |event: &Event| {
            if let (Some(events), Event::NextPage(page)) = (weak.upgrade(), event) {
                events.dispatch(Event::view(page.next_page + 1, ""))?;
            }
            Ok(())
        });
        let counter = views.clone();
        events.listen(Channel::View, move |_: &Event| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        events.dispatch(Event::next_page(1)).unwrap();
        assert_eq!(views.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unlisten_during_dispatch_applies_to_next_pass() {
        let events = Arc::new(EventDispatcher::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::default();

        let weak = Arc::downgrade(&events);
        let (first_log, target) = (log.clone(), victim.clone());
        events.listen(Channel::PrevPage, move |_: &Event| {
            first_log.lock().unwrap().push("h1");
            if let (Some(events), Some(sub)) = (weak.upgrade(), target.lock().unwrap().take()) {
                events.unlisten(sub);
            }
            Ok(())
        });
        let second_log = log.clone();
        let sub = events.listen(Channel::PrevPage, move |_: &Event| {
            second_log.lock().unwrap().push("h2");
            Ok(())
        });
        *victim.lock().unwrap() = Some(sub);

        events.dispatch(Event::prev_page(2)).unwrap();
        events.dispatch(Event::prev_page(2)).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["h1", "h2", "h1"]);
        assert_eq!(events.handler_count(Channel::PrevPage), 1);
    }

    #[test]
    fn test_panicking_handler_unwinds_out_of_dispatch() {
        let events = EventDispatcher::new();
        let later = Arc::new(AtomicUsize::new(0));

        events.listen(Channel::View, |_: &Event| Ok(()));
        events.listen(Channel::View, |_: &Event| -> Result<(), BoxError> {
            panic!("handler blew up")
        });
        let counter = later.clone();
        events.listen(Channel::View, move |_: &Event| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            events.dispatch(Event::view(1, "Al-Fatihah"))
        }));

        assert!(outcome.is_err());
        assert_eq!(later.load(Ordering::SeqCst), 0);
        assert_eq!(events.handler_count(Channel::View), 3);
    }

    #[test]
    fn test_debug_lists_channel_counts() {
        let events = EventDispatcher::new();
        events.listen(Channel::View, |_: &Event| Ok(()));
        let rendered = format!("{events:?}");
        assert!(rendered.contains("\"onView\": 1"));
        assert!(rendered.contains("\"onStart\": 0"));
    }
}
