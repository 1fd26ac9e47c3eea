//! Command adapter.
//!
//! Turns typed commands into dispatcher events, the way a click on a page
//! link or a menu entry would. The drawer toggle talks to the surface
//! directly and never goes through the dispatcher.

use crate::surface::Surface;
use mushaf_core::{Event, PageNumber};
use mushaf_std::EventDispatcher;
use std::{
    ops::ControlFlow,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Follow the "next" link.
    Next,
    /// Follow the "prev" link.
    Prev,
    /// Open a surah from the menu.
    View(PageNumber),
    /// Open or close the menu drawer.
    Menu,
    /// Leave the reader.
    Quit,
}

/// Input that is not a [`Command`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line.
    #[error("empty command")]
    Empty,
    /// Unknown command word.
    #[error("unknown command {0:?} (try n, p, v <id>, m or q)")]
    Unknown(String),
    /// `v` without a surah number.
    #[error("missing surah number")]
    MissingId,
    /// `v` with something that is not a surah number.
    #[error("not a surah number: {0:?}")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };
        match word {
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" => Ok(Command::Prev),
            "m" | "menu" => Ok(Command::Menu),
            "q" | "quit" => Ok(Command::Quit),
            "v" | "view" => {
                let id = words.next().ok_or(CommandError::MissingId)?;
                id.parse()
                    .map(Command::View)
                    .map_err(|_| CommandError::InvalidId(id.to_owned()))
            }
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

/// Publishes commands to a dispatcher once `onStart` has armed it.
#[derive(Clone)]
pub struct Controls {
    events: Arc<EventDispatcher>,
    surface: Arc<dyn Surface>,
    armed: Arc<AtomicBool>,
}

impl Controls {
    /// Create an adapter; it ignores commands until `armed` is set.
    pub fn new(
        events: Arc<EventDispatcher>,
        surface: Arc<dyn Surface>,
        armed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            events,
            surface,
            armed,
        }
    }

    /// Carry out one command. Returns `Break` on [`Command::Quit`].
    pub fn execute(&self, command: Command) -> ControlFlow<()> {
        if command == Command::Quit {
            return ControlFlow::Break(());
        }
        if !self.armed.load(Ordering::Acquire) {
            tracing::debug!(?command, "controls not armed yet");
            return ControlFlow::Continue(());
        }

        let event = match command {
            Command::Next => Event::next_page(self.surface.page_links().next),
            Command::Prev => Event::prev_page(self.surface.page_links().prev),
            Command::View(id) => {
                let name = self
                    .surface
                    .menu_entry(id)
                    .map(|entry| entry.name)
                    .unwrap_or_default();
                Event::view(id, name)
            }
            Command::Menu => {
                let open = self.surface.toggle_drawer();
                tracing::debug!(open, "drawer toggled");
                return ControlFlow::Continue(());
            }
            Command::Quit => return ControlFlow::Break(()),
        };

        if let Err(error) = self.events.dispatch(event) {
            match std::error::Error::source(&error) {
                Some(cause) => tracing::error!(%error, %cause, "command failed"),
                None => tracing::error!(%error, "command failed"),
            }
        }
        ControlFlow::Continue(())
    }

    /// Read commands line by line until `quit` or end of input.
    pub async fn run<R>(&self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command).is_break() {
                        break;
                    }
                }
                Err(CommandError::Empty) => {}
                Err(error) => tracing::warn!(%error, "ignored input"),
            }
        }
        Ok(())
    }
}
