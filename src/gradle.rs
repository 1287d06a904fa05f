use std::process::{Command, Stdio};

use tracing::info;

use crate::config::BuildConfig;
use crate::platform::PlatformProfile;
use crate::process::{self, ProcessResult, ToolError};

/// Runs named build tasks; only the exit code is inspected.
pub trait BuildTool {
    fn run_task(&self, task: &str) -> Result<ProcessResult, ToolError>;
}

pub struct Gradle {
    command: String,
}

impl Gradle {
    pub fn new(config: &BuildConfig, profile: &dyn PlatformProfile) -> Self {
        let command = config
            .command
            .clone()
            .unwrap_or_else(|| profile.build_tool_command().to_string());
        Self { command }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl BuildTool for Gradle {
    fn run_task(&self, task: &str) -> Result<ProcessResult, ToolError> {
        info!("{} {}", self.command, task);
        // Output streams straight to the terminal; stdin is detached so the
        // build cannot consume menu input.
        let result = process::status(Command::new(&self.command).arg(task).stdin(Stdio::null()))?;
        info!("{} finished with {:?}", task, result.code);
        Ok(result)
    }
}
