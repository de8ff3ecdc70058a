use std::io::{self, IsTerminal, Write};

use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard not supported: stdout is not a terminal")]
    NotSupported,

    #[error("failed to write clipboard sequence: {0}")]
    Io(#[from] io::Error),
}

/// OSC 52 "set clipboard" sequence, wrapped for tmux passthrough when needed
pub fn osc52_sequence(text: &str, in_tmux: bool) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let osc = format!("\x1b]52;c;{}\x07", payload);
    if in_tmux {
        format!("\x1bPtmux;\x1b{}\x1b\\", osc)
    } else {
        osc
    }
}

pub fn write_to<W: Write>(out: &mut W, text: &str, in_tmux: bool) -> Result<(), ClipboardError> {
    out.write_all(osc52_sequence(text, in_tmux).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Ask the terminal to place `text` on the system clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Err(ClipboardError::NotSupported);
    }
    let in_tmux = std::env::var_os("TMUX").is_some();
    write_to(&mut stdout, text, in_tmux)
}
