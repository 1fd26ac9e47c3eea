//! Page-link state.
//!
//! The reader has two links. The "next" link holds the surah currently shown;
//! the "prev" link holds the one before it (or 1 on the first surah). The
//! navigation handlers read a link, work out the target surah and reset the
//! links around it.

use mushaf_core::PageNumber;

/// First surah.
pub const FIRST_SURAH: PageNumber = 1;

/// Last surah.
pub const LAST_SURAH: PageNumber = 114;

/// Values held by the prev/next links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    /// Value of the "prev" link.
    pub prev: PageNumber,
    /// Value of the "next" link.
    pub next: PageNumber,
}

impl PageLinks {
    /// Links for a reader showing `state`.
    pub fn at(state: PageNumber) -> Self {
        let prev = if state == FIRST_SURAH {
            FIRST_SURAH
        } else {
            state.saturating_sub(1)
        };
        Self { prev, next: state }
    }
}

impl Default for PageLinks {
    fn default() -> Self {
        Self::at(FIRST_SURAH)
    }
}

/// Where a navigation lands, and the links to install (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Surah to show.
    pub target: PageNumber,
    /// New link values; `None` leaves the links untouched.
    pub links: Option<PageLinks>,
}

/// Follow the "next" link holding `next_page`.
pub fn next_target(next_page: PageNumber) -> Move {
    let target = if next_page >= LAST_SURAH {
        LAST_SURAH
    } else {
        next_page + 1
    };
    Move {
        target,
        links: Some(PageLinks::at(target)),
    }
}

/// Follow the "prev" link holding `prev_page`.
///
/// On the first surah the links are left alone.
pub fn prev_target(prev_page: PageNumber) -> Move {
    if prev_page > FIRST_SURAH {
        Move {
            target: prev_page,
            links: Some(PageLinks::at(prev_page)),
        }
    } else {
        Move {
            target: FIRST_SURAH,
            links: None,
        }
    }
}
