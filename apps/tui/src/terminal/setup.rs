use std::io::{self, Stdout, Write};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::cursor;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, warn};

pub type FleetTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Which parts of the terminal have been switched over and need restoring.
#[derive(Debug, Clone, Copy, Default)]
struct Switched {
    raw_mode: bool,
    alternate_screen: bool,
}

impl Switched {
    fn restore(self) {
        let mut out = io::stdout();

        if let Err(e) = execute!(out, cursor::Show) {
            warn!(error = %e, "failed to show cursor");
        }
        if self.alternate_screen {
            if let Err(e) = execute!(out, DisableMouseCapture, LeaveAlternateScreen) {
                warn!(error = %e, "failed to leave alternate screen");
            }
        }
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                warn!(error = %e, "failed to disable raw mode");
            }
        }

        let _ = execute!(out, cursor::MoveToNextLine(1));
        let _ = out.flush();
    }
}

fn switch_over(state: &mut Switched) -> Result<FleetTerminal> {
    enable_raw_mode().wrap_err("failed to enable raw mode")?;
    state.raw_mode = true;

    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .wrap_err("failed to enter alternate screen")?;
    state.alternate_screen = true;

    Terminal::new(CrosstermBackend::new(out)).wrap_err("failed to create terminal")
}

/// Enters raw mode and the alternate screen with mouse capture. A failure
/// part way through rolls back whatever was already switched.
pub fn setup_terminal() -> Result<FleetTerminal> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    info!(width, height, "setting up terminal");

    let mut state = Switched::default();
    let mut terminal = match switch_over(&mut state) {
        Ok(terminal) => terminal,
        Err(e) => {
            state.restore();
            return Err(e);
        }
    };

    if let Err(e) = terminal.clear() {
        warn!(error = %e, "failed to clear terminal");
    }
    if let Err(e) = terminal.hide_cursor() {
        warn!(error = %e, "failed to hide cursor");
    }

    debug!("terminal ready");
    Ok(terminal)
}

/// Puts the terminal back. Each step runs even when an earlier one fails.
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    Switched {
        raw_mode,
        alternate_screen,
    }
    .restore();
    info!("terminal restored");
}
