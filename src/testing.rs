//! Recording fakes for the external tools.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::adb::client::DeviceBridge;
use crate::adb::emulator::{BootMode, EmulatorTool};
use crate::config::{AdbConfig, BuildConfig, Config, EmulatorConfig, InputConfig};
use crate::gradle::BuildTool;
use crate::input::LineReader;
use crate::process::{ProcessResult, ToolError};

pub fn adb_config() -> AdbConfig {
    AdbConfig {
        path: "adb".into(),
        emulator_marker: "emulator".into(),
        ready_marker: "device".into(),
    }
}

pub fn test_config() -> Config {
    Config {
        build: BuildConfig {
            install_task: "installDebug".into(),
            uninstall_task: "uninstallDebug".into(),
            command: None,
        },
        adb: adb_config(),
        emulator: EmulatorConfig::default(),
        input: InputConfig::default(),
    }
}

/// `devices_output: None` behaves like a missing adb binary.
pub struct FakeBridge {
    devices_output: Option<String>,
    wait_exit: i32,
    pub devices_calls: Cell<usize>,
    pub wait_calls: Cell<usize>,
    pub calls: RefCell<Vec<&'static str>>,
}

impl FakeBridge {
    fn new(devices_output: Option<String>) -> Self {
        Self {
            devices_output,
            wait_exit: 0,
            devices_calls: Cell::new(0),
            wait_calls: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_devices(output: &str) -> Self {
        Self::new(Some(output.to_string()))
    }

    pub fn not_ready() -> Self {
        Self::with_devices("List of devices attached\n\n")
    }

    pub fn missing() -> Self {
        Self::new(None)
    }

    /// Not ready, and `wait-for-device` exits with `code`.
    pub fn wait_exits_with(code: i32) -> Self {
        Self {
            wait_exit: code,
            ..Self::not_ready()
        }
    }

    fn available(&self) -> Result<(), ToolError> {
        match self.devices_output {
            Some(_) => Ok(()),
            None => Err(ToolError::NotFound(PathBuf::from("adb"))),
        }
    }
}

impl DeviceBridge for FakeBridge {
    fn devices(&self) -> Result<String, ToolError> {
        self.devices_calls.set(self.devices_calls.get() + 1);
        self.available()?;
        Ok(self.devices_output.clone().unwrap_or_default())
    }

    fn wait_for_device(&self) -> Result<(), ToolError> {
        self.wait_calls.set(self.wait_calls.get() + 1);
        self.available()?;
        ProcessResult::exited(self.wait_exit).into_checked("adb wait-for-device")?;
        Ok(())
    }

    fn kill_server(&self) -> Result<(), ToolError> {
        self.calls.borrow_mut().push("kill-server");
        self.available()
    }

    fn start_server(&self) -> Result<(), ToolError> {
        self.calls.borrow_mut().push("start-server");
        self.available()
    }
}

/// `avds: None` behaves like a missing emulator binary.
pub struct FakeEmulator {
    avds: Option<Vec<String>>,
    pub list_calls: Cell<usize>,
    pub launches: RefCell<Vec<(String, BootMode)>>,
}

impl FakeEmulator {
    pub fn with_avds(avds: &[&str]) -> Self {
        Self {
            avds: Some(avds.iter().map(|a| a.to_string()).collect()),
            list_calls: Cell::new(0),
            launches: RefCell::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            avds: None,
            list_calls: Cell::new(0),
            launches: RefCell::new(Vec::new()),
        }
    }
}

impl EmulatorTool for FakeEmulator {
    fn list_avds(&self) -> Result<Vec<String>, ToolError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.avds
            .clone()
            .ok_or_else(|| ToolError::NotFound(PathBuf::from("/sdk/emulator/emulator")))
    }

    fn launch(&self, avd: &str, mode: BootMode) -> Result<(), ToolError> {
        self.launches.borrow_mut().push((avd.to_string(), mode));
        Ok(())
    }
}

/// Tasks listed in `failing` exit with 1; everything else exits with 0.
pub struct FakeBuild {
    failing: Vec<String>,
    missing: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBuild {
    pub fn succeeding() -> Self {
        Self::failing(&[])
    }

    pub fn failing(tasks: &[&str]) -> Self {
        Self {
            failing: tasks.iter().map(|t| t.to_string()).collect(),
            missing: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::succeeding()
        }
    }

    pub fn count(&self, task: &str) -> usize {
        self.calls.borrow().iter().filter(|t| *t == task).count()
    }
}

impl BuildTool for FakeBuild {
    fn run_task(&self, task: &str) -> Result<ProcessResult, ToolError> {
        self.calls.borrow_mut().push(task.to_string());
        if self.missing {
            return Err(ToolError::NotFound(PathBuf::from("./gradlew")));
        }
        let code = if self.failing.iter().any(|t| t == task) { 1 } else { 0 };
        Ok(ProcessResult::exited(code))
    }
}

/// Replays canned answers, then reports closed input.
pub struct ScriptedReader {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
    }
}
