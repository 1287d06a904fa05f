use std::io::{self, Write};

use tracing::{debug, info, warn};

use crate::adb::client::DeviceBridge;
use crate::adb::emulator::EmulatorTool;
use crate::command::{MenuCommand, is_affirmative};
use crate::config::Config;
use crate::gradle::BuildTool;
use crate::input::LineReader;
use crate::launch::LaunchSequencer;
use crate::monitor::DeviceMonitor;
use crate::process::best_effort;

pub const FAREWELL: &str = "👋 Exiting...";

const RULE: &str = "===================================";

/// The external tools the shell drives.
pub struct Toolbox<'a> {
    pub bridge: &'a dyn DeviceBridge,
    pub emulator: &'a dyn EmulatorTool,
    pub build: &'a dyn BuildTool,
}

pub struct App<'a> {
    pub running: bool,
    tools: Toolbox<'a>,
    monitor: DeviceMonitor,
    install_task: String,
    uninstall_task: String,
}

impl<'a> App<'a> {
    pub fn new(tools: Toolbox<'a>, config: &Config) -> Self {
        Self {
            running: true,
            tools,
            monitor: DeviceMonitor::new(&config.adb),
            install_task: config.build.install_task.clone(),
            uninstall_task: config.build.uninstall_task.clone(),
        }
    }

    /// Offers a launch if no device is up, then runs the menu until the user
    /// quits or input ends. Failed operations are reported and never end the
    /// loop; only an unwritable `out` does.
    pub fn run(&mut self, reader: &mut dyn LineReader, out: &mut dyn Write) -> io::Result<()> {
        self.startup_check(reader, out)?;
        self.run_interactive_loop(reader, out)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn launcher(&self) -> LaunchSequencer<'_> {
        LaunchSequencer::new(self.tools.bridge, self.tools.emulator, &self.monitor)
    }

    fn startup_check(&self, reader: &mut dyn LineReader, out: &mut dyn Write) -> io::Result<()> {
        if self.monitor.is_device_ready(self.tools.bridge) {
            return Ok(());
        }
        let answer = reader.read_line("⚠️ No emulator detected. Launch one? (y/n): ");
        if answer.as_deref().is_some_and(is_affirmative) {
            self.launcher().launch_interactive(reader, out)?;
        }
        Ok(())
    }

    fn run_interactive_loop(
        &mut self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        while self.running {
            render_menu(out)?;
            let command = match reader.read_line("\n👉 Command: ") {
                Some(line) => MenuCommand::parse(&line),
                None => {
                    info!("input closed");
                    MenuCommand::Quit
                }
            };
            self.dispatch(command, reader, out)?;
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        command: MenuCommand,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        debug!("dispatch {:?}", command);
        match command {
            MenuCommand::UpdateApp => self.run_build_task(false, out),
            MenuCommand::LaunchEmulator => self.launcher().launch_interactive(reader, out),
            MenuCommand::RestartBridge => self.restart_bridge(out),
            MenuCommand::CleanInstallApp => self.run_build_task(true, out),
            MenuCommand::Quit => {
                writeln!(out, "\n{FAREWELL}")?;
                self.quit();
                Ok(())
            }
            MenuCommand::Unrecognized => Ok(()),
        }
    }

    /// Installs the app, optionally uninstalling it first. A failed uninstall
    /// is expected when the app was never installed and does not stop the
    /// install.
    pub fn run_build_task(&self, clean_install: bool, out: &mut dyn Write) -> io::Result<()> {
        let build = self.tools.build;

        if clean_install {
            writeln!(out, "\n🧹 Uninstalling old app first...")?;
            out.flush()?;
            let uninstall = build
                .run_task(&self.uninstall_task)
                .and_then(|result| result.into_checked(&self.uninstall_task));
            best_effort(&self.uninstall_task, uninstall);
        }

        writeln!(out, "\n🔨 Building and Updating App...")?;
        out.flush()?;
        match build.run_task(&self.install_task) {
            Ok(result) if result.success() => {
                info!("{} succeeded", self.install_task);
                writeln!(out, "\n🎉 SUCCESS! App updated.")?;
            }
            Ok(result) => {
                warn!("{} exited with {:?}", self.install_task, result.code);
                writeln!(out, "\n💥 BUILD FAILED.")?;
            }
            Err(e) => {
                warn!("{} could not run: {}", self.install_task, e);
                writeln!(out, "\n💥 BUILD FAILED: {e}")?;
            }
        }
        Ok(())
    }

    fn restart_bridge(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\n🔄 Restarting ADB server...")?;
        out.flush()?;
        best_effort("adb kill-server", self.tools.bridge.kill_server());
        match best_effort("adb start-server", self.tools.bridge.start_server()) {
            Some(()) => writeln!(out, "✅ ADB server restarted.")?,
            None => writeln!(out, "❌ Could not start the ADB server.")?,
        }
        Ok(())
    }
}

fn render_menu(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "   🤖 ANDROID COMMAND CENTER")?;
    writeln!(out, "{RULE}")?;
    for (key, label) in MenuCommand::menu_entries() {
        writeln!(out, " [{key}] {label}")?;
    }
    out.flush()
}
