#![allow(dead_code)]

use mushaf::{
    App, PageNumber,
    api::{ApiError, Ayah, QuranApi, SurahDetail, SurahSummary},
    pager::LAST_SURAH,
    surface::{Surface, ViewState},
};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::runtime::Handle;

// ============================================================================
// Fake content API
// ============================================================================

/// In-memory content API with per-surah latency and failures.
#[derive(Default)]
pub struct FakeApi {
    pub delays: HashMap<PageNumber, Duration>,
    pub failing: HashSet<PageNumber>,
    pub fail_list: bool,
    pub requests: Mutex<Vec<PageNumber>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, id: PageNumber, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub fn failing_on(mut self, id: PageNumber) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn requests(&self) -> Vec<PageNumber> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn surah_name(id: PageNumber) -> String {
    format!("Surah {id}")
}

impl QuranApi for FakeApi {
    async fn surahs(&self) -> Result<Vec<SurahSummary>, ApiError> {
        if self.fail_list {
            return Err(ApiError::Status {
                url: "/surah".into(),
                status: reqwest::StatusCode::BAD_GATEWAY,
            });
        }
        Ok((1..=LAST_SURAH)
            .map(|number| SurahSummary {
                number,
                name: surah_name(number),
            })
            .collect())
    }

    async fn surah(&self, id: PageNumber) -> Result<SurahDetail, ApiError> {
        self.requests.lock().unwrap().push(id);
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&id) {
            return Err(ApiError::Status {
                url: format!("/surah/{id}"),
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }
        Ok(SurahDetail {
            name: surah_name(id),
            ayahs: vec![
                Ayah {
                    ayah_text: format!("ayah {id}:1"),
                    read_text: format!("reading {id}:1"),
                },
                Ayah {
                    ayah_text: format!("ayah {id}:2"),
                    read_text: format!("reading {id}:2"),
                },
            ],
        })
    }
}

// ============================================================================
// Reader fixture
// ============================================================================

pub struct Reader {
    pub app: App,
    pub api: Arc<FakeApi>,
    pub view: Arc<ViewState>,
}

impl Reader {
    /// Build an app on the current runtime. Must be called inside a tokio test.
    pub fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let view = Arc::new(ViewState::new());
        let surface: Arc<dyn Surface> = view.clone();
        let app = App::new(api.clone(), surface, Handle::current());
        Self { app, api, view }
    }

    /// Build, start and wait for the initial loads.
    pub async fn started(api: FakeApi) -> Self {
        let reader = Self::new(api);
        reader.app.start().unwrap();
        reader.app.settle().await;
        reader
    }
}
