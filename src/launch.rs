use std::io::{self, Write};

use strum::{EnumMessage, IntoEnumIterator};
use tracing::{info, warn};

use crate::adb::client::DeviceBridge;
use crate::adb::emulator::{BootMode, EmulatorTool};
use crate::command::select_index;
use crate::input::LineReader;
use crate::monitor::{DeviceMonitor, Readiness};
use crate::process::ToolError;

/// Picks an image and a boot mode, starts the emulator in the background and
/// waits for the device transport. Every failure ends the sequence with a
/// printed message.
pub struct LaunchSequencer<'a> {
    bridge: &'a dyn DeviceBridge,
    emulator: &'a dyn EmulatorTool,
    monitor: &'a DeviceMonitor,
}

impl<'a> LaunchSequencer<'a> {
    pub fn new(
        bridge: &'a dyn DeviceBridge,
        emulator: &'a dyn EmulatorTool,
        monitor: &'a DeviceMonitor,
    ) -> Self {
        Self {
            bridge,
            emulator,
            monitor,
        }
    }

    pub fn launch_interactive(
        &self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        if let Readiness::Ready { serial } = self.monitor.readiness(self.bridge) {
            match serial {
                Some(serial) => writeln!(out, "\n✅ Emulator is already running ({serial}).")?,
                None => writeln!(out, "\n✅ Emulator is already running.")?,
            }
            return Ok(());
        }

        let avds = match self.emulator.list_avds() {
            Ok(avds) => avds,
            Err(ToolError::NotFound(path)) => {
                warn!("emulator binary missing at {}", path.display());
                writeln!(out, "❌ Error: Emulator tool not found ({}).", path.display())?;
                return Ok(());
            }
            Err(e) => {
                warn!("listing images failed: {}", e);
                writeln!(out, "❌ Error: could not list emulators: {e}")?;
                return Ok(());
            }
        };
        if avds.is_empty() {
            writeln!(out, "❌ No emulators found.")?;
            return Ok(());
        }

        let avd = self.select_avd(&avds, reader, out)?;
        let mode = self.select_boot_mode(avd, reader, out)?;

        match mode {
            BootMode::QuickBoot => writeln!(out, "\n🚀 Launching {avd}...")?,
            BootMode::ColdBoot => writeln!(out, "\n❄️  Cold booting {avd}...")?,
            BootMode::WipeData => writeln!(out, "\n🧨 Wiping data for {avd}...")?,
        }
        if let Err(e) = self.emulator.launch(avd, mode) {
            warn!("launch of {} failed: {}", avd, e);
            writeln!(out, "❌ Failed to start emulator: {e}")?;
            return Ok(());
        }

        writeln!(out, "⏳ Waiting for boot...")?;
        match self.bridge.wait_for_device() {
            Ok(()) => {
                info!("{} is attached", avd);
                writeln!(out, "✅ Ready!")?;
            }
            Err(e) => {
                warn!("wait-for-device failed: {}", e);
                writeln!(out, "❌ Could not wait for the device: {e}")?;
            }
        }
        Ok(())
    }

    fn select_avd<'l>(
        &self,
        avds: &'l [String],
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> io::Result<&'l str> {
        writeln!(out, "\n📲 Found {} devices:", avds.len())?;
        for (i, avd) in avds.iter().enumerate() {
            writeln!(out, "[{}] {}", i + 1, avd)?;
        }
        out.flush()?;

        let answer = reader
            .read_line("\nSelect device (default 1): ")
            .unwrap_or_default();
        Ok(avds[select_index(&answer, avds.len())].as_str())
    }

    fn select_boot_mode(
        &self,
        avd: &str,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> io::Result<BootMode> {
        writeln!(out, "\n⚙️  Boot Options for {avd}:")?;
        for (i, mode) in BootMode::iter().enumerate() {
            writeln!(
                out,
                " [{}] {}  <-- {}",
                i + 1,
                mode.get_message().unwrap_or_default(),
                mode.get_detailed_message().unwrap_or_default()
            )?;
        }
        out.flush()?;

        let answer = reader
            .read_line("\n👉 Select mode (default 1): ")
            .unwrap_or_default();
        Ok(BootMode::from_selection(&answer))
    }
}
