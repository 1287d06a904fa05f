use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::AdbConfig;
use crate::process::{self, ToolError};

/// The device-bridge commands the shell relies on.
pub trait DeviceBridge {
    /// Raw stdout of `adb devices`.
    fn devices(&self) -> Result<String, ToolError>;
    /// Blocks until a device transport is attached. No timeout.
    fn wait_for_device(&self) -> Result<(), ToolError>;
    fn kill_server(&self) -> Result<(), ToolError>;
    fn start_server(&self) -> Result<(), ToolError>;
}

pub struct AdbClient {
    adb_path: String,
}

impl AdbClient {
    pub fn new(config: &AdbConfig) -> Self {
        let adb_path = std::env::var("ADB").unwrap_or_else(|_| config.path.clone());
        debug!("using adb at '{}'", adb_path);
        Self { adb_path }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.adb_path);
        cmd.args(args);
        cmd
    }

    /// Runs a subcommand to completion. Only a failure to start is an error;
    /// the exit code is logged and otherwise ignored.
    fn run_awaited(&self, subcommand: &str) -> Result<(), ToolError> {
        let result = process::status(&mut self.command(&[subcommand]))?;
        if !result.success() {
            warn!("'adb {}' exited with {:?}", subcommand, result.code);
        }
        Ok(())
    }
}

impl DeviceBridge for AdbClient {
    fn devices(&self) -> Result<String, ToolError> {
        let result = process::capture(&mut self.command(&["devices"]))?;
        if !result.success() {
            warn!("'adb devices' failed: {}", result.stderr.trim());
        }
        let result = result.into_checked("adb devices")?;
        Ok(result.stdout)
    }

    fn wait_for_device(&self) -> Result<(), ToolError> {
        info!("waiting for device transport");
        process::status(&mut self.command(&["wait-for-device"]))?
            .into_checked("adb wait-for-device")?;
        Ok(())
    }

    fn kill_server(&self) -> Result<(), ToolError> {
        info!("killing adb server");
        self.run_awaited("kill-server")
    }

    fn start_server(&self) -> Result<(), ToolError> {
        info!("starting adb server");
        self.run_awaited("start-server")
    }
}
