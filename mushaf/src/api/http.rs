use super::{ApiError, QuranApi, SurahDetail, SurahList, SurahSummary};
use mushaf_core::PageNumber;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default content API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://quranapi.idn.sch.id";

const SURAH_PATH: &str = "/surah";

/// reqwest-backed content API client.
#[derive(Debug, Clone)]
pub struct HttpQuranApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpQuranApi {
    /// Create a client for `base_url`.
    ///
    /// With `timeout` unset a request that never answers stays pending
    /// forever.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Http { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Http { url, source }),
        };
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

impl QuranApi for HttpQuranApi {
    async fn surahs(&self) -> Result<Vec<SurahSummary>, ApiError> {
        let list: SurahList = self.get_json(self.url(SURAH_PATH)).await?;
        Ok(list.data)
    }

    async fn surah(&self, id: PageNumber) -> Result<SurahDetail, ApiError> {
        self.get_json(self.url(&format!("{SURAH_PATH}/{id}"))).await
    }
}
