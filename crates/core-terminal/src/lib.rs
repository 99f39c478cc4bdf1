//! Terminal session setup: raw mode, alternate screen, and restoration.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::debug;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard restoring the terminal even if the caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enabling raw mode")?;
            execute!(stdout(), EnterAlternateScreen).context("entering alternate screen")?;
            self.entered = true;
            debug!(target: "runtime", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "runtime", "terminal_restored");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        crossterm::terminal::size().context("querying terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    pub fn backend(&mut self) -> &mut CrosstermBackend {
        self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}

/// Best-effort restoration for panic hooks, where no guard is reachable.
pub fn restore_terminal() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
