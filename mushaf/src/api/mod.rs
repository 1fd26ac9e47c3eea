//! Content API client.
//!
//! The remote service is an external contract: two GET endpoints returning
//! JSON. [`QuranApi`] is the seam the reader talks to; [`HttpQuranApi`] is the
//! real client and [`CachedApi`] keeps successful responses for the session.

mod cache;
mod http;
mod model;

pub use cache::CachedApi;
pub use http::{DEFAULT_BASE_URL, HttpQuranApi};
pub use model::{Ayah, SurahDetail, SurahList, SurahSummary};

use mushaf_core::PageNumber;
use std::{future::Future, pin::Pin};
use thiserror::Error;

/// Errors returned by content API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP client could not be built.
    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request did not complete (connection, TLS, timeout).
    #[error("request to {url} failed")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} answered {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// The body was not the expected JSON shape.
    #[error("unexpected response body from {url}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Source of surah metadata and text.
pub trait QuranApi: Send + Sync + 'static {
    /// `GET /surah`: every surah, in order.
    fn surahs(&self) -> impl Future<Output = Result<Vec<SurahSummary>, ApiError>> + Send;

    /// `GET /surah/{id}`: one surah with its verses.
    fn surah(&self, id: PageNumber) -> impl Future<Output = Result<SurahDetail, ApiError>> + Send;
}

/// A boxed future returned by [`DynQuranApi`].
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Object-safe version of [`QuranApi`], for sharing one client behind an `Arc`.
pub trait DynQuranApi: Send + Sync + 'static {
    /// See [`QuranApi::surahs`].
    fn surahs_dyn(&self) -> ApiFuture<'_, Vec<SurahSummary>>;

    /// See [`QuranApi::surah`].
    fn surah_dyn(&self, id: PageNumber) -> ApiFuture<'_, SurahDetail>;
}

impl<T: QuranApi> DynQuranApi for T {
    fn surahs_dyn(&self) -> ApiFuture<'_, Vec<SurahSummary>> {
        Box::pin(self.surahs())
    }

    fn surah_dyn(&self, id: PageNumber) -> ApiFuture<'_, SurahDetail> {
        Box::pin(self.surah(id))
    }
}
