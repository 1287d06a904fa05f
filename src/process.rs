use std::io;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

/// Failure to run one of the external tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("'{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' exited with status {code}")]
    Failed { program: String, code: i32 },
}

/// Outcome of a finished tool invocation. `stdout`/`stderr` stay empty when
/// the streams were inherited instead of captured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    #[cfg(test)]
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turns a nonzero exit into `ToolError::Failed`.
    pub fn into_checked(self, program: &str) -> Result<Self, ToolError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ToolError::Failed {
                program: program.to_string(),
                code: self.code.unwrap_or(-1),
            })
        }
    }

    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn program_name(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().to_string()
}

fn spawn_error(cmd: &Command, source: io::Error) -> ToolError {
    if source.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound(PathBuf::from(cmd.get_program()))
    } else {
        ToolError::Io {
            program: program_name(cmd),
            source,
        }
    }
}

/// Runs to completion with stdout/stderr captured.
pub fn capture(cmd: &mut Command) -> Result<ProcessResult, ToolError> {
    debug!("capture: {:?}", cmd);
    let output = cmd.output().map_err(|e| spawn_error(cmd, e))?;
    Ok(ProcessResult::from_output(output))
}

/// Runs to completion with stdout/stderr inherited from the shell.
pub fn status(cmd: &mut Command) -> Result<ProcessResult, ToolError> {
    debug!("run: {:?}", cmd);
    let status = cmd.status().map_err(|e| spawn_error(cmd, e))?;
    Ok(ProcessResult {
        code: status.code(),
        ..ProcessResult::default()
    })
}

/// Starts the process with all standard streams detached and hands it off.
/// The child is never waited on.
pub fn spawn_detached(cmd: &mut Command) -> Result<(), ToolError> {
    debug!("spawn detached: {:?}", cmd);
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| spawn_error(cmd, e))?;
    debug!("detached pid {}", child.id());
    Ok(())
}

/// Runs an operation that is expected to fail sometimes. A failure is logged
/// and never reaches the caller.
pub fn best_effort<T>(label: &str, result: Result<T, ToolError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} failed (ignored): {}", label, e);
            None
        }
    }
}
