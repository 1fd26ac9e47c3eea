//! # mushaf - Quran Reader on a Closed-Channel Event Dispatcher
//!
//! `mushaf` fetches the surah list and a surah's verses from a remote REST
//! API and shows them in a paginated reading view with a navigation drawer.
//!
//! Every user action goes through an [`EventDispatcher`] with four fixed
//! channels (`onStart`, `onView`, `onNextPage`, `onPrevPage`). Publishers
//! and the handlers reacting to them never know about each other.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mushaf::{App, api::HttpQuranApi, surface::TerminalSurface};
//!
//! let api = Arc::new(HttpQuranApi::new(mushaf::api::DEFAULT_BASE_URL, None)?);
//! let app = App::new(api, Arc::new(TerminalSurface::stdout()), Handle::current());
//! app.start()?;
//! app.controls().run(BufReader::new(tokio::io::stdin())).await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use mushaf_core::{
    // Error types
    BoxError,
    // Channels / events
    Channel,
    DispatchError,
    Event,
    // Handler
    Handler,
    NextPage,
    PageNumber,
    PrevPage,
    UnknownChannel,
    ViewSelected,
};

pub use mushaf_std::{EventDispatcher, RequestSequencer, Subscription, Ticket};

pub mod api;
pub mod app;
pub mod config;
pub mod controls;
pub mod logging;
pub mod pager;
pub mod surface;

pub use app::App;
pub use config::Config;

/// Standard handler wrappers.
pub mod hooks {
    pub use mushaf_std::hooks::Traced;
}

/// Testing utilities.
pub mod testing {
    pub use mushaf_std::testing::{OrderLog, RecordingHandler};
}

/// Prelude module - common imports for mushaf.
///
/// # Usage
///
/// ```rust,ignore
/// use mushaf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Channel, DispatchError, Event, EventDispatcher, Handler, PageNumber,
        Subscription,
    };
}
