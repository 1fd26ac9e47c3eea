use super::{MenuEntry, Surface, Verse};
use crate::pager::PageLinks;
use mushaf_core::PageNumber;
use std::{
    fmt::Write as _,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Everything on screen at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Loading indicator.
    pub loading: bool,
    /// Whether the menu drawer is open.
    pub drawer_open: bool,
    /// Menu entries in insertion order.
    pub menu: Vec<MenuEntry>,
    /// Surah number of the active menu entry.
    pub active: Option<PageNumber>,
    /// Title of the surah being read.
    pub title: String,
    /// Verses in order.
    pub verses: Vec<Verse>,
    /// Prev/next link values.
    pub links: PageLinks,
}

/// In-memory [`Surface`].
#[derive(Debug, Default)]
pub struct ViewState {
    view: Mutex<View>,
}

impl ViewState {
    /// An empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current screen.
    pub fn snapshot(&self) -> View {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for ViewState {
    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }

    fn append_menu_entry(&self, entry: MenuEntry) {
        self.lock().menu.push(entry);
    }

    fn menu_entry(&self, id: PageNumber) -> Option<MenuEntry> {
        self.lock().menu.iter().find(|e| e.id == id).cloned()
    }

    fn set_active_entry(&self, id: PageNumber) {
        let mut view = self.lock();
        let known = view.menu.iter().any(|e| e.id == id);
        if !known {
            tracing::debug!(id, "no menu entry to activate");
        }
        view.active = known.then_some(id);
    }

    fn set_title(&self, title: &str) {
        title.clone_into(&mut self.lock().title);
    }

    fn clear_verses(&self) {
        self.lock().verses.clear();
    }

    fn append_verse(&self, verse: Verse) {
        self.lock().verses.push(verse);
    }

    fn set_page_links(&self, links: PageLinks) {
        self.lock().links = links;
    }

    fn page_links(&self) -> PageLinks {
        self.lock().links
    }

    fn toggle_drawer(&self) -> bool {
        let mut view = self.lock();
        view.drawer_open = !view.drawer_open;
        view.drawer_open
    }
}

/// Render a screen as plain text.
pub fn render(view: &View) -> String {
    let mut out = String::new();

    if view.drawer_open {
        out.push_str("+-- surah --\n");
        for entry in &view.menu {
            let marker = if view.active == Some(entry.id) { '>' } else { ' ' };
            let _ = writeln!(out, "|{marker}{:>4} {}", entry.id, entry.name);
        }
        out.push_str("+-----------\n");
    }

    if view.loading {
        out.push_str("loading...\n");
    }

    if !view.title.is_empty() {
        let _ = writeln!(out, "== {} ==", view.title);
    }
    for verse in &view.verses {
        let _ = writeln!(out, "  {}", verse.text);
        let _ = writeln!(out, "  {}", verse.reading);
        out.push('\n');
    }

    let _ = writeln!(out, "[p] {}  [n] {}", view.links.prev, view.links.next);
    out
}
