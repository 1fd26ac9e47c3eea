//! Typed event payloads.
//!
//! Every channel carries its own payload type. The conventional JSON shapes
//! are kept for the string-named entry points:
//!
//! | channel      | context            |
//! |--------------|--------------------|
//! | `onStart`    | none               |
//! | `onView`     | `{"id", "name"}`   |
//! | `onNextPage` | `{"nextPage"}`     |
//! | `onPrevPage` | `{"prevPage"}`     |

use crate::channel::Channel;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// A surah number, 1-based.
pub type PageNumber = u16;

/// Payload of `onView`: the reader picked a surah from the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelected {
    /// Surah number.
    #[serde(deserialize_with = "page_number")]
    pub id: PageNumber,
    /// Surah name as shown in the menu.
    #[serde(default)]
    pub name: String,
}

/// Payload of `onNextPage`: the value currently held by the "next" link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPage {
    /// Page number read from the link.
    #[serde(deserialize_with = "page_number")]
    pub next_page: PageNumber,
}

/// Payload of `onPrevPage`: the value currently held by the "prev" link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevPage {
    /// Page number read from the link.
    #[serde(deserialize_with = "page_number")]
    pub prev_page: PageNumber,
}

/// The context delivered to every handler of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `onStart`, no payload.
    Start,
    /// `onView`.
    View(ViewSelected),
    /// `onNextPage`.
    NextPage(NextPage),
    /// `onPrevPage`.
    PrevPage(PrevPage),
}

impl Event {
    /// Convenience constructor for `onView`.
    pub fn view(id: PageNumber, name: impl Into<String>) -> Self {
        Event::View(ViewSelected {
            id,
            name: name.into(),
        })
    }

    /// Convenience constructor for `onNextPage`.
    pub fn next_page(next_page: PageNumber) -> Self {
        Event::NextPage(NextPage { next_page })
    }

    /// Convenience constructor for `onPrevPage`.
    pub fn prev_page(prev_page: PageNumber) -> Self {
        Event::PrevPage(PrevPage { prev_page })
    }

    /// The channel this event is delivered on.
    pub fn channel(&self) -> Channel {
        match self {
            Event::Start => Channel::Start,
            Event::View(_) => Channel::View,
            Event::NextPage(_) => Channel::NextPage,
            Event::PrevPage(_) => Channel::PrevPage,
        }
    }

    /// Decode an untyped context into the payload of `channel`.
    ///
    /// `onStart` ignores its context entirely. Page numbers may be given as
    /// JSON numbers or as numeric strings.
    pub fn from_context(
        channel: Channel,
        context: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match channel {
            Channel::Start => Event::Start,
            Channel::View => Event::View(serde_json::from_value(context)?),
            Channel::NextPage => Event::NextPage(serde_json::from_value(context)?),
            Channel::PrevPage => Event::PrevPage(serde_json::from_value(context)?),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Float(f64),
    Text(String),
}

fn page_number<'de, D>(deserializer: D) -> Result<PageNumber, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => PageNumber::try_from(n)
            .map_err(|_| D::Error::custom(format!("page number out of range: {n}"))),
        // Whole-valued floats such as `5.0` are accepted; anything else is not a page.
        NumberOrText::Float(f) => {
            if f.fract() == 0.0 && (0.0..=f64::from(PageNumber::MAX)).contains(&f) {
                Ok(f as PageNumber)
            } else {
                Err(D::Error::custom(format!("page number out of range: {f}")))
            }
        }
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not a page number: {text:?}"))),
    }
}
