mod adb;
mod app;
mod command;
mod config;
mod event;
mod gradle;
mod input;
mod keys;
mod launch;
mod logging;
mod monitor;
mod platform;
mod process;
#[cfg(test)]
mod testing;

use std::io;

use color_eyre::Result;
use tracing::{info, warn};

use crate::adb::client::AdbClient;
use crate::adb::emulator::Emulator;
use crate::app::{App, Toolbox};
use crate::config::{Config, InputMode};
use crate::gradle::Gradle;
use crate::input::{InterruptGuard, KeypressReader, LineReader, StdinReader};

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let config = Config::new()?;

    let profile = platform::current();
    let sdk_root = platform::resolve_sdk_root(
        |key| std::env::var(key).ok(),
        config.emulator.sdk_root.as_deref(),
        profile,
        &platform::home_dir(),
    );

    let bridge = AdbClient::new(&config.adb);
    let emulator = Emulator::new(&sdk_root, profile);
    let gradle = Gradle::new(&config.build, profile);
    info!(
        "emulator at {}, build tool '{}'",
        emulator.binary().display(),
        gradle.command()
    );

    let interrupts = InterruptGuard::install(app::FAREWELL).unwrap_or_else(|e| {
        warn!("interrupt handling unavailable: {}", e);
        InterruptGuard::default()
    });
    let mut reader: Box<dyn LineReader> = match config.input.mode {
        InputMode::Line => Box::new(StdinReader::new(interrupts)),
        InputMode::Keypress => Box::new(KeypressReader::new(interrupts)),
    };

    let tools = Toolbox {
        bridge: &bridge,
        emulator: &emulator,
        build: &gradle,
    };
    let mut app = App::new(tools, &config);
    app.run(reader.as_mut(), &mut io::stdout())?;
    Ok(())
}
