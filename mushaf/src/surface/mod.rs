//! The display the handlers write to.
//!
//! [`Surface`] is everything the reader needs from a screen: a menu of
//! surahs with one active entry, a title, a list of verses, a loading flag, a
//! drawer that can be opened and closed, and the two page links.
//! [`ViewState`] keeps all of that in memory; [`TerminalSurface`] prints it.

mod terminal;
mod view;

pub use terminal::TerminalSurface;
pub use view::{View, ViewState, render};

use crate::pager::PageLinks;
use mushaf_core::PageNumber;

/// One entry of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Surah number.
    pub id: PageNumber,
    /// Surah name.
    pub name: String,
}

/// One rendered verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Arabic text.
    pub text: String,
    /// Transliteration.
    pub reading: String,
}

/// Display operations used by the reader's handlers.
///
/// Methods take `&self`: a surface is shared between the dispatcher's
/// handlers and the tasks they spawn.
pub trait Surface: Send + Sync + 'static {
    /// Show or hide the loading indicator.
    fn set_loading(&self, loading: bool);

    /// Append an entry at the end of the menu.
    fn append_menu_entry(&self, entry: MenuEntry);

    /// Look up a menu entry by surah number.
    fn menu_entry(&self, id: PageNumber) -> Option<MenuEntry>;

    /// Mark the entry for `id` active and every other entry inactive.
    fn set_active_entry(&self, id: PageNumber);

    /// Replace the title.
    fn set_title(&self, title: &str);

    /// Remove every verse.
    fn clear_verses(&self);

    /// Append a verse after the existing ones.
    fn append_verse(&self, verse: Verse);

    /// Replace the values held by the prev/next links.
    fn set_page_links(&self, links: PageLinks);

    /// Values currently held by the prev/next links.
    fn page_links(&self) -> PageLinks;

    /// Open the drawer if closed, close it if open. Returns the new state.
    fn toggle_drawer(&self) -> bool;
}
