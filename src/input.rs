use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::event;

/// Source of user answers. `None` means the input is gone (end of stream or
/// interrupt) and the caller should wind down.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Keeps SIGINT from killing the shell. At a prompt it ends the session with
/// `farewell` and exit code 0; while a tool runs only the tool sees it.
#[derive(Clone, Default)]
pub struct InterruptGuard {
    reading: Arc<AtomicBool>,
}

impl InterruptGuard {
    #[cfg(unix)]
    pub fn install(farewell: &'static str) -> io::Result<Self> {
        use signal_hook::consts::SIGINT;
        use signal_hook::iterator::Signals;

        let guard = Self::default();
        let reading = Arc::clone(&guard.reading);
        let mut signals = Signals::new([SIGINT])?;
        std::thread::Builder::new()
            .name("sigint".into())
            .spawn(move || {
                for _ in signals.forever() {
                    if reading.load(Ordering::SeqCst) {
                        tracing::info!("interrupted at prompt");
                        println!("\n{farewell}");
                        std::process::exit(0);
                    }
                    debug!("interrupt while a tool is running");
                }
            })?;
        Ok(guard)
    }

    #[cfg(not(unix))]
    pub fn install(_farewell: &'static str) -> io::Result<Self> {
        Ok(Self::default())
    }

    fn reading(&self) -> ReadingScope<'_> {
        self.reading.store(true, Ordering::SeqCst);
        ReadingScope {
            flag: &self.reading,
        }
    }

    #[cfg(test)]
    fn is_reading(&self) -> bool {
        self.reading.load(Ordering::SeqCst)
    }
}

struct ReadingScope<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ReadingScope<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn show_prompt(prompt: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()
}

/// Line-buffered reads from stdin.
pub struct StdinReader {
    interrupts: InterruptGuard,
}

impl StdinReader {
    pub fn new(interrupts: InterruptGuard) -> Self {
        Self { interrupts }
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        show_prompt(prompt).ok()?;
        let _scope = self.interrupts.reading();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => {
                debug!("stdin closed");
                None
            }
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!("failed to read stdin: {}", e);
                None
            }
        }
    }
}

/// Answers each prompt with a single key press, no Enter needed. Falls back
/// to line reads when stdin is not a terminal.
pub struct KeypressReader {
    fallback: StdinReader,
}

impl KeypressReader {
    pub fn new(interrupts: InterruptGuard) -> Self {
        Self {
            fallback: StdinReader::new(interrupts),
        }
    }
}

impl LineReader for KeypressReader {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        show_prompt(prompt).ok()?;
        match event::read_key() {
            Ok(key) => {
                println!("{}", key.as_deref().unwrap_or_default());
                key
            }
            Err(e) => {
                warn!("raw mode unavailable, reading lines instead: {}", e);
                self.fallback.read_line("")
            }
        }
    }
}
