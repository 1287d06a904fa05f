use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

/// OS-specific naming of the external tools, chosen once at startup.
pub trait PlatformProfile {
    fn build_tool_command(&self) -> &'static str;
    fn default_sdk_root(&self, home: &Path) -> PathBuf;
    fn executable_suffix(&self) -> &'static str {
        ""
    }
}

pub struct Windows;
pub struct MacOs;
pub struct Linux;

impl PlatformProfile for Windows {
    fn build_tool_command(&self) -> &'static str {
        "gradlew.bat"
    }

    fn default_sdk_root(&self, home: &Path) -> PathBuf {
        home.join("AppData").join("Local").join("Android").join("Sdk")
    }

    fn executable_suffix(&self) -> &'static str {
        ".exe"
    }
}

impl PlatformProfile for MacOs {
    fn build_tool_command(&self) -> &'static str {
        "./gradlew"
    }

    fn default_sdk_root(&self, home: &Path) -> PathBuf {
        home.join("Library").join("Android").join("sdk")
    }
}

impl PlatformProfile for Linux {
    fn build_tool_command(&self) -> &'static str {
        "./gradlew"
    }

    fn default_sdk_root(&self, home: &Path) -> PathBuf {
        home.join("Android").join("Sdk")
    }
}

pub fn current() -> &'static dyn PlatformProfile {
    if cfg!(windows) {
        &Windows
    } else if cfg!(target_os = "macos") {
        &MacOs
    } else {
        &Linux
    }
}

pub fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// SDK root: `ANDROID_HOME`, then `ANDROID_SDK_ROOT`, then the configured
/// path, then the platform default under `home`.
pub fn resolve_sdk_root(
    env: impl Fn(&str) -> Option<String>,
    configured: Option<&Path>,
    profile: &dyn PlatformProfile,
    home: &Path,
) -> PathBuf {
    let from_env = ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
        .into_iter()
        .find_map(|key| env(key).filter(|v| !v.trim().is_empty()));

    let root = match (from_env, configured) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => path.to_path_buf(),
        (None, None) => profile.default_sdk_root(home),
    };
    debug!("sdk root: {}", root.display());
    root
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn android_home_wins() {
        let env = env_of(&[("ANDROID_HOME", "/opt/sdk"), ("ANDROID_SDK_ROOT", "/other")]);
        let root = resolve_sdk_root(env, Some(Path::new("/cfg")), &Linux, Path::new("/home/u"));
        assert_eq!(root, PathBuf::from("/opt/sdk"));
    }

    #[test]
    fn sdk_root_env_is_second() {
        let env = env_of(&[("ANDROID_HOME", ""), ("ANDROID_SDK_ROOT", "/other")]);
        let root = resolve_sdk_root(env, None, &Linux, Path::new("/home/u"));
        assert_eq!(root, PathBuf::from("/other"));
    }

    #[test]
    fn configured_path_before_default() {
        let root = resolve_sdk_root(env_of(&[]), Some(Path::new("/cfg")), &Linux, Path::new("/h"));
        assert_eq!(root, PathBuf::from("/cfg"));
    }

    #[test]
    fn platform_defaults() {
        let home = Path::new("/h");
        assert_eq!(
            resolve_sdk_root(env_of(&[]), None, &Linux, home),
            PathBuf::from("/h/Android/Sdk")
        );
        assert_eq!(
            resolve_sdk_root(env_of(&[]), None, &MacOs, home),
            PathBuf::from("/h/Library/Android/sdk")
        );
        assert_eq!(
            Windows.default_sdk_root(home),
            home.join("AppData").join("Local").join("Android").join("Sdk")
        );
    }

    #[test]
    fn build_tool_per_platform() {
        assert_eq!(Windows.build_tool_command(), "gradlew.bat");
        assert_eq!(Linux.build_tool_command(), "./gradlew");
        assert_eq!(MacOs.executable_suffix(), "");
        assert_eq!(Windows.executable_suffix(), ".exe");
    }
}
