use std::{env, path::PathBuf};

use color_eyre::Result;
use config::{ConfigBuilder, File, FileFormat, builder::DefaultState};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../.config/config.json5");

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

#[derive(Clone, Debug, Deserialize)]
pub struct BuildConfig {
    pub install_task: String,
    pub uninstall_task: String,
    /// Overrides the platform's build tool command.
    pub command: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdbConfig {
    pub path: String,
    pub emulator_marker: String,
    pub ready_marker: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmulatorConfig {
    pub sdk_root: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Line,
    Keypress,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub mode: InputMode,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub build: BuildConfig,
    pub adb: AdbConfig,
    #[serde(default)]
    pub emulator: EmulatorConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    pub fn new() -> Result<Self> {
        let config_dir = get_config_dir();
        let mut builder = defaults();

        let config_files = [
            ("config.json5", FileFormat::Json5),
            ("config.json", FileFormat::Json),
            ("config.yaml", FileFormat::Yaml),
            ("config.toml", FileFormat::Toml),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                debug!("loading config from {}", path.display());
            }
            builder = builder.add_source(
                File::from(path)
                    .format(*format)
                    .required(false),
            );
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Json5))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "droidctl", env!("CARGO_PKG_NAME"))
}
