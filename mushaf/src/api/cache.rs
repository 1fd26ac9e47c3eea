use super::{ApiError, QuranApi, SurahDetail, SurahSummary};
use mushaf_core::PageNumber;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[derive(Default)]
struct Entries {
    list: Option<Vec<SurahSummary>>,
    details: HashMap<PageNumber, SurahDetail>,
}

/// Keeps every successful response for the rest of the session and answers
/// later requests for the same resource from memory. Failures are not cached.
pub struct CachedApi<A> {
    inner: A,
    entries: Mutex<Entries>,
}

impl<A> CachedApi<A> {
    /// Wrap `inner`.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            entries: Mutex::default(),
        }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: QuranApi> QuranApi for CachedApi<A> {
    async fn surahs(&self) -> Result<Vec<SurahSummary>, ApiError> {
        let cached = self.entries().list.clone();
        if let Some(list) = cached {
            tracing::trace!("surah list served from cache");
            return Ok(list);
        }

        let list = self.inner.surahs().await?;
        self.entries().list = Some(list.clone());
        Ok(list)
    }

    async fn surah(&self, id: PageNumber) -> Result<SurahDetail, ApiError> {
        let cached = self.entries().details.get(&id).cloned();
        if let Some(detail) = cached {
            tracing::trace!(id, "surah served from cache");
            return Ok(detail);
        }

        let detail = self.inner.surah(id).await?;
        self.entries().details.insert(id, detail.clone());
        Ok(detail)
    }
}
