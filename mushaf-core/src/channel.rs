//! The closed set of event channels.

use crate::error::UnknownChannel;
use std::{fmt, str::FromStr};

/// One of the four named event kinds handlers can subscribe to.
///
/// The set is closed: there is no way to construct a channel outside of these
/// variants, and the string form only accepts the canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Application bootstrap (`onStart`).
    Start,
    /// A surah was picked from the menu (`onView`).
    View,
    /// The "next" page link was followed (`onNextPage`).
    NextPage,
    /// The "prev" page link was followed (`onPrevPage`).
    PrevPage,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Channel; 4] = [
        Channel::Start,
        Channel::View,
        Channel::NextPage,
        Channel::PrevPage,
    ];

    /// Number of channels.
    pub const COUNT: usize = Self::ALL.len();

    /// The canonical channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Start => "onStart",
            Channel::View => "onView",
            Channel::NextPage => "onNextPage",
            Channel::PrevPage => "onPrevPage",
        }
    }

    /// Dense index of the channel, suitable for array-backed registries.
    pub const fn index(self) -> usize {
        match self {
            Channel::Start => 0,
            Channel::View => 1,
            Channel::NextPage => 2,
            Channel::PrevPage => 3,
        }
    }

    /// Look up a channel by its canonical name.
    pub fn from_name(name: &str) -> Option<Channel> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::from_name(s).ok_or_else(|| UnknownChannel(s.to_owned()))
    }
}
