use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io::{self, Stderr, Write};

use crate::error::Result;
use crate::event::map_event;
use crate::menu::MenuKey;

/// Where the menu loop gets its keys from
pub trait KeySource {
    /// Block until the next key; `None` means the input is closed
    fn next_key(&mut self) -> Result<Option<MenuKey>>;
}

/// Keys read from the terminal through crossterm
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Option<MenuKey>> {
        loop {
            let event = crossterm::event::read()?;
            if let Some(key) = map_event(&event) {
                return Ok(Some(key));
            }
        }
    }
}

/// A fixed key sequence, used for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<MenuKey>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = MenuKey>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<MenuKey>> {
        Ok(self.keys.pop_front())
    }
}

/// Raw mode plus an alternate screen on stderr, restored on drop.
///
/// Stdout is left untouched so the shell wrapper can capture it.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        match Terminal::new(CrosstermBackend::new(stderr)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_terminal(&mut io::stderr());
                Err(e.into())
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }
}

/// Leave the alternate screen and raw mode, logging rather than failing
fn restore_terminal<W: Write>(out: &mut W) {
    if let Err(e) = disable_raw_mode() {
        log::error!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen) {
        log::error!("Failed to leave alternate screen: {}", e);
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}
