use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::warn;

use crate::keys::{self, KeyInput};

struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {}", e);
        }
    }
}

/// Blocks for a single key press. `Ok(None)` on cancel or a broken event
/// stream; `Err` only when the terminal cannot enter raw mode.
pub fn read_key() -> io::Result<Option<String>> {
    let _raw = RawMode::enable()?;
    loop {
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => {
                warn!("failed to read key event: {}", e);
                return Ok(None);
            }
        };
        match keys::handle_key_event(key) {
            KeyInput::Text(text) => return Ok(Some(text)),
            KeyInput::Cancel => return Ok(None),
            KeyInput::Ignore => {}
        }
    }
}
