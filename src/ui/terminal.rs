//! Terminal session that restores the screen on drop.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode, alternate-screen terminal for the stepper.
///
/// Cleanup runs on normal scope exit, on early returns via `?`, and on
/// panics once [`install_panic_hook`] is in place.
pub struct TerminalSession {
    terminal: TuiTerminal,
    mouse: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, optionally capturing the mouse
    pub fn start(mouse: bool) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        if mouse {
            execute!(stdout, EnableMouseCapture).context("Failed to enable mouse capture")?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        tracing::debug!(mouse, "Terminal session started");
        Ok(Self { terminal, mouse })
    }

    pub fn terminal(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }

    /// Best-effort restore, safe to call more than once
    pub fn restore(mouse: bool) {
        let _ = disable_raw_mode();
        if mouse {
            let _ = execute!(io::stdout(), DisableMouseCapture);
        }
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        Self::restore(self.mouse);
    }
}

/// Install panic hook that restores terminal before printing panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        TerminalSession::restore(true);
        original_hook(panic_info);
    }));
}
