//! Application bootstrap.
//!
//! [`App::new`] builds the dispatcher and registers the reader's handlers.
//! Handlers run inside `dispatch` and only start network loads; the loads
//! finish later on the tokio runtime and write to the [`Surface`].

use crate::{
    api::DynQuranApi,
    controls::Controls,
    pager::{self, FIRST_SURAH, LAST_SURAH, Move, PageLinks},
    surface::{MenuEntry, Surface, Verse},
};
use mushaf_core::{BoxError, Channel, DispatchError, Event, PageNumber};
use mushaf_std::{EventDispatcher, RequestSequencer, hooks::Traced};
use std::{
    mem,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::{runtime::Handle, task::JoinHandle};

/// Starts content loads and applies their results to the surface.
///
/// Each load takes a ticket from its sequencer when it starts. A result is
/// only applied if no newer load of the same kind was started meanwhile, so
/// the last navigation wins even when responses arrive out of order.
#[derive(Clone)]
pub struct Loader {
    api: Arc<dyn DynQuranApi>,
    surface: Arc<dyn Surface>,
    runtime: Handle,
    views: Arc<RequestSequencer>,
    lists: Arc<RequestSequencer>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Loader {
    /// Create a loader spawning its work on `runtime`.
    pub fn new(api: Arc<dyn DynQuranApi>, surface: Arc<dyn Surface>, runtime: Handle) -> Self {
        Self {
            api,
            surface,
            runtime,
            views: Arc::default(),
            lists: Arc::default(),
            pending: Arc::default(),
        }
    }

    fn track(&self, task: JoinHandle<()>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }

    /// Fill the menu with every surah.
    pub fn load_list(&self) {
        let ticket = self.lists.issue();
        self.surface.set_loading(true);

        let api = Arc::clone(&self.api);
        let surface = Arc::clone(&self.surface);
        let lists = Arc::clone(&self.lists);
        let task = self.runtime.spawn(async move {
            match api.surahs_dyn().await {
                Ok(surahs) => {
                    if !lists.is_current(ticket) {
                        tracing::debug!(ticket = ticket.get(), "stale surah list dropped");
                        return;
                    }
                    tracing::info!(count = surahs.len(), "surah list loaded");
                    for surah in surahs {
                        surface.append_menu_entry(MenuEntry {
                            id: surah.number,
                            name: surah.name,
                        });
                    }
                    surface.set_loading(false);
                }
                Err(error) => tracing::error!(%error, "could not load surah list"),
            }
        });
        self.track(task);
    }

    /// Replace the title and verses with surah `id`.
    pub fn load_view(&self, id: PageNumber) {
        let ticket = self.views.issue();
        self.surface.set_loading(true);

        let api = Arc::clone(&self.api);
        let surface = Arc::clone(&self.surface);
        let views = Arc::clone(&self.views);
        let task = self.runtime.spawn(async move {
            match api.surah_dyn(id).await {
                Ok(detail) => {
                    if !views.is_current(ticket) {
                        tracing::debug!(id, ticket = ticket.get(), "stale surah dropped");
                        return;
                    }
                    tracing::info!(id, verses = detail.ayahs.len(), "surah loaded");
                    surface.set_title(&detail.name);
                    surface.clear_verses();
                    for ayah in detail.ayahs {
                        surface.append_verse(Verse {
                            text: ayah.ayah_text,
                            reading: ayah.read_text,
                        });
                    }
                    surface.set_loading(false);
                }
                Err(error) => tracing::error!(id, %error, "could not load surah"),
            }
        });
        self.track(task);
    }

    /// Wait until every load started so far (and any started while
    /// waiting) has finished.
    pub async fn settle(&self) {
        loop {
            let tasks = mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
            if tasks.is_empty() {
                return;
            }
            for task in tasks {
                if let Err(error) = task.await {
                    tracing::error!(%error, "load task failed");
                }
            }
        }
    }
}

/// Error returned by the `onView` handler for ids outside `1..=114`.
#[derive(thiserror::Error, Debug)]
#[error("surah {0} does not exist")]
pub struct NoSuchSurah(pub PageNumber);

/// The reader: a dispatcher with the reader's handlers registered on it.
pub struct App {
    events: Arc<EventDispatcher>,
    surface: Arc<dyn Surface>,
    loader: Loader,
    armed: Arc<AtomicBool>,
}

impl App {
    /// Build the dispatcher and register the handlers, in order:
    ///
    /// 1. `onStart`: arm the controls
    /// 2. `onStart`: load the menu and surah 1
    /// 3. `onView`: reset the links, load the surah, mark it active
    /// 4. `onNextPage`: step forward (stops at 114)
    /// 5. `onPrevPage`: step back (stops at 1)
    pub fn new(api: Arc<dyn DynQuranApi>, surface: Arc<dyn Surface>, runtime: Handle) -> Self {
        let events = Arc::new(EventDispatcher::new());
        let loader = Loader::new(api, Arc::clone(&surface), runtime);
        let armed = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&armed);
        events.listen_handler(
            Channel::Start,
            Traced::new(
                move |_: &Event| -> Result<(), BoxError> {
                    flag.store(true, Ordering::Release);
                    Ok(())
                },
                "arm_controls",
            ),
        );

        let l = loader.clone();
        events.listen_handler(
            Channel::Start,
            Traced::new(
                move |_: &Event| -> Result<(), BoxError> {
                    l.load_list();
                    l.load_view(FIRST_SURAH);
                    Ok(())
                },
                "initial_load",
            ),
        );

        let (l, s) = (loader.clone(), Arc::clone(&surface));
        events.listen_handler(
            Channel::View,
            Traced::new(
                move |event: &Event| -> Result<(), BoxError> {
                    let Event::View(view) = event else {
                        return Ok(());
                    };
                    if !(FIRST_SURAH..=LAST_SURAH).contains(&view.id) {
                        return Err(NoSuchSurah(view.id).into());
                    }
                    s.set_page_links(PageLinks::at(view.id));
                    l.load_view(view.id);
                    s.set_active_entry(view.id);
                    Ok(())
                },
                "select_view",
            ),
        );

        let (l, s) = (loader.clone(), Arc::clone(&surface));
        events.listen_handler(
            Channel::NextPage,
            Traced::new(
                move |event: &Event| -> Result<(), BoxError> {
                    if let Event::NextPage(page) = event {
                        go(&l, s.as_ref(), pager::next_target(page.next_page));
                    }
                    Ok(())
                },
                "next_page",
            ),
        );

        let (l, s) = (loader.clone(), Arc::clone(&surface));
        events.listen_handler(
            Channel::PrevPage,
            Traced::new(
                move |event: &Event| -> Result<(), BoxError> {
                    if let Event::PrevPage(page) = event {
                        go(&l, s.as_ref(), pager::prev_target(page.prev_page));
                    }
                    Ok(())
                },
                "prev_page",
            ),
        );

        Self {
            events,
            surface,
            loader,
            armed,
        }
    }

    /// Dispatch `onStart`.
    pub fn start(&self) -> Result<(), DispatchError> {
        self.events.dispatch(Event::Start)
    }

    /// The dispatcher, for publishing or adding handlers.
    pub fn events(&self) -> &Arc<EventDispatcher> {
        &self.events
    }

    /// The surface handlers write to.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// Whether `onStart` has armed the controls.
    pub fn controls_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Command adapter publishing to this app's dispatcher.
    pub fn controls(&self) -> Controls {
        Controls::new(
            Arc::clone(&self.events),
            Arc::clone(&self.surface),
            Arc::clone(&self.armed),
        )
    }

    /// Wait for every load started so far. See [`Loader::settle`].
    pub async fn settle(&self) {
        self.loader.settle().await;
    }
}

fn go(loader: &Loader, surface: &dyn Surface, step: Move) {
    if let Some(links) = step.links {
        surface.set_page_links(links);
    }
    loader.load_view(step.target);
    surface.set_active_entry(step.target);
}
