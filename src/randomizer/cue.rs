//! Audible feedback for randomize requests
//!
//! Playing the cue is best-effort: failures are logged and never reach the caller.

use std::io::{IsTerminal, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error("stderr is not a terminal, cue suppressed")]
    NotATerminal,

    #[error("failed to play cue: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Cue {
    fn play(&self) -> Result<(), CueError>;
}

/// Rings the terminal bell on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Cue for TerminalBell {
    fn play(&self) -> Result<(), CueError> {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return Err(CueError::NotATerminal);
        }
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl Cue for Muted {
    fn play(&self) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play `cue`, logging and discarding any failure
pub fn notify(cue: &dyn Cue) {
    if let Err(err) = cue.play() {
        tracing::debug!(error = %err, "randomize cue prevented");
    }
}
