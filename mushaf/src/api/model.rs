//! Response shapes of the content API. Unknown fields are ignored.

use mushaf_core::PageNumber;
use serde::{Deserialize, Serialize};

/// Body of `GET /surah`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahList {
    /// Surahs in order.
    pub data: Vec<SurahSummary>,
}

/// One entry of the surah list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahSummary {
    /// Surah number.
    pub number: PageNumber,
    /// Latin name.
    pub name: String,
}

/// Body of `GET /surah/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahDetail {
    /// Latin name.
    pub name: String,
    /// Verses in order.
    pub ayahs: Vec<Ayah>,
}

/// One verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Arabic text.
    pub ayah_text: String,
    /// Transliteration.
    pub read_text: String,
}
