use super::{MenuEntry, Surface, Verse, ViewState, render};
use crate::pager::PageLinks;
use mushaf_core::PageNumber;
use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

/// A [`Surface`] that prints the whole screen to a writer whenever loading
/// finishes or the drawer is toggled.
pub struct TerminalSurface<W> {
    state: ViewState,
    out: Mutex<W>,
}

impl TerminalSurface<std::io::Stdout> {
    /// Print to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Print to `out`.
    pub fn new(out: W) -> Self {
        Self {
            state: ViewState::new(),
            out: Mutex::new(out),
        }
    }

    /// The in-memory screen behind this surface.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Print the current screen.
    pub fn redraw(&self) {
        let text = render(&self.state.snapshot());
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(%error, "could not draw screen");
        }
    }
}

impl<W: Write + Send + 'static> Surface for TerminalSurface<W> {
    fn set_loading(&self, loading: bool) {
        self.state.set_loading(loading);
        if !loading {
            self.redraw();
        }
    }

    fn append_menu_entry(&self, entry: MenuEntry) {
        self.state.append_menu_entry(entry);
    }

    fn menu_entry(&self, id: PageNumber) -> Option<MenuEntry> {
        self.state.menu_entry(id)
    }

    fn set_active_entry(&self, id: PageNumber) {
        self.state.set_active_entry(id);
    }

    fn set_title(&self, title: &str) {
        self.state.set_title(title);
    }

    fn clear_verses(&self) {
        self.state.clear_verses();
    }

    fn append_verse(&self, verse: Verse) {
        self.state.append_verse(verse);
    }

    fn set_page_links(&self, links: PageLinks) {
        self.state.set_page_links(links);
    }

    fn page_links(&self) -> PageLinks {
        self.state.page_links()
    }

    fn toggle_drawer(&self) -> bool {
        let open = self.state.toggle_drawer();
        self.redraw();
        open
    }
}
