use std::path::{Path, PathBuf};
use std::process::Command;

use strum::{Display, EnumIter, EnumMessage, IntoEnumIterator};
use tracing::info;

use crate::command::select_index;
use crate::platform::PlatformProfile;
use crate::process::{self, ToolError};

/// Startup policy for a virtual device.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumMessage)]
pub enum BootMode {
    #[default]
    #[strum(
        to_string = "Quick Boot",
        message = "🚀 Quick Boot (Standard)",
        detailed_message = "Fastest"
    )]
    QuickBoot,
    #[strum(
        to_string = "Cold Boot",
        message = "❄️  Cold Boot (No Snapshot)",
        detailed_message = "Use if app is glitching"
    )]
    ColdBoot,
    #[strum(
        to_string = "Wipe Data",
        message = "🧨 Wipe Data (Factory Reset)",
        detailed_message = "Use if app crashes on launch"
    )]
    WipeData,
}

impl BootMode {
    /// Extra launcher flag; quick boot resumes from the snapshot and needs none.
    pub fn extra_flag(self) -> Option<&'static str> {
        match self {
            Self::QuickBoot => None,
            Self::ColdBoot => Some("-no-snapshot-load"),
            Self::WipeData => Some("-wipe-data"),
        }
    }

    /// 1-based pick from the boot menu; anything else is quick boot.
    pub fn from_selection(input: &str) -> Self {
        let modes: Vec<Self> = Self::iter().collect();
        modes[select_index(input, modes.len())]
    }
}

pub fn parse_avd_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

pub fn launch_args(avd: &str, mode: BootMode) -> Vec<String> {
    let mut args = vec!["-avd".to_string(), avd.to_string()];
    if let Some(flag) = mode.extra_flag() {
        args.push(flag.to_string());
    }
    args
}

/// The emulator launcher commands the shell relies on.
pub trait EmulatorTool {
    /// Device images in the order the launcher lists them.
    fn list_avds(&self) -> Result<Vec<String>, ToolError>;
    /// Starts the image in the background and returns without waiting.
    fn launch(&self, avd: &str, mode: BootMode) -> Result<(), ToolError>;
}

pub struct Emulator {
    binary: PathBuf,
}

impl Emulator {
    pub fn new(sdk_root: &Path, profile: &dyn PlatformProfile) -> Self {
        let binary = sdk_root
            .join("emulator")
            .join(format!("emulator{}", profile.executable_suffix()));
        Self { binary }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn ensure_available(&self) -> Result<(), ToolError> {
        if self.binary.exists() {
            Ok(())
        } else {
            Err(ToolError::NotFound(self.binary.clone()))
        }
    }
}

impl EmulatorTool for Emulator {
    fn list_avds(&self) -> Result<Vec<String>, ToolError> {
        self.ensure_available()?;
        let result = process::capture(Command::new(&self.binary).arg("-list-avds"))?;
        let avds = parse_avd_list(&result.stdout);
        info!("emulator lists {} images", avds.len());
        Ok(avds)
    }

    fn launch(&self, avd: &str, mode: BootMode) -> Result<(), ToolError> {
        self.ensure_available()?;
        info!("launching {} ({})", avd, mode);
        process::spawn_detached(Command::new(&self.binary).args(launch_args(avd, mode)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::platform::{Linux, Windows};

    #[test]
    fn parse_avd_list_drops_blank_lines() {
        let avds = parse_avd_list("Pixel_5\n\nPixel_7\n");
        assert_eq!(avds, vec!["Pixel_5", "Pixel_7"]);
    }

    #[test]
    fn parse_avd_list_empty() {
        assert!(parse_avd_list("").is_empty());
        assert!(parse_avd_list("\n  \n").is_empty());
    }

    #[test]
    fn parse_avd_list_trims_and_keeps_order() {
        let output = "\n  Pixel_6_Pro_API_33  \n\n  Pixel_4_API_30\n\n";
        let avds = parse_avd_list(output);
        assert_eq!(avds, vec!["Pixel_6_Pro_API_33", "Pixel_4_API_30"]);
    }

    #[test]
    fn boot_mode_selection() {
        assert_eq!(BootMode::from_selection("1"), BootMode::QuickBoot);
        assert_eq!(BootMode::from_selection("2"), BootMode::ColdBoot);
        assert_eq!(BootMode::from_selection(" 3 "), BootMode::WipeData);
    }

    #[test]
    fn boot_mode_invalid_selection_is_quick_boot() {
        for input in ["", "0", "4", "-2", "cold", "2.0"] {
            assert_eq!(BootMode::from_selection(input), BootMode::QuickBoot, "input {input:?}");
        }
    }

    #[test]
    fn boot_mode_flags() {
        assert_eq!(BootMode::from_selection("2").extra_flag(), Some("-no-snapshot-load"));
        assert_eq!(BootMode::from_selection("3").extra_flag(), Some("-wipe-data"));
        assert_eq!(BootMode::from_selection("").extra_flag(), None);
    }

    #[test]
    fn launch_args_per_mode() {
        assert_eq!(launch_args("Pixel_5", BootMode::QuickBoot), vec!["-avd", "Pixel_5"]);
        assert_eq!(
            launch_args("Pixel_5", BootMode::ColdBoot),
            vec!["-avd", "Pixel_5", "-no-snapshot-load"]
        );
        assert_eq!(
            launch_args("Pixel_5", BootMode::WipeData),
            vec!["-avd", "Pixel_5", "-wipe-data"]
        );
    }

    #[test]
    fn boot_menu_labels() {
        let labels: Vec<&str> = BootMode::iter().filter_map(|m| m.get_message()).collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(BootMode::ColdBoot.get_detailed_message(), Some("Use if app is glitching"));
    }

    #[test]
    fn binary_path_follows_platform() {
        let emulator = Emulator::new(Path::new("/sdk"), &Linux);
        assert_eq!(emulator.binary(), Path::new("/sdk/emulator/emulator"));

        let emulator = Emulator::new(Path::new("/sdk"), &Windows);
        assert_eq!(emulator.binary(), Path::new("/sdk/emulator/emulator.exe"));
    }

    #[test]
    fn missing_binary_is_not_found() {
        let emulator = Emulator::new(Path::new("/nonexistent/droidctl-sdk"), &Linux);
        let err = emulator.list_avds().unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref p) if p == emulator.binary()));
        assert!(matches!(
            emulator.launch("Pixel_5", BootMode::QuickBoot),
            Err(ToolError::NotFound(_))
        ));
    }
}
