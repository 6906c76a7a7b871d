//! Configuration loading and root folder resolution

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{Error, Result};

/// Environment variable naming the root folder
pub const ROOT_ENV_VAR: &str = "SOUNDBLOOM_ROOT";

/// Sub-directory of the root folder holding category directories
pub const SOUNDS_DIR_NAME: &str = "sounds";

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 5780;

/// Optional settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read the platform config file
    ///
    /// Missing files are normal and yield `None`; unreadable or invalid
    /// files are logged and also yield `None` so startup continues on
    /// defaults.
    pub fn load() -> Option<Self> {
        let path = config_file_path().ok()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };
        match Self::parse(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: Option<&TomlConfig>,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(root_folder) = toml_config.and_then(|c| c.root_folder.clone()) {
        return root_folder;
    }

    default_root_folder()
}

/// Category directories live under `<root>/sounds`
pub fn sounds_dir(root_folder: &Path) -> PathBuf {
    root_folder.join(SOUNDS_DIR_NAME)
}

/// Get the configuration file path for the platform
///
/// On Linux the user file wins over `/etc/soundbloom/config.toml`.
pub fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("soundbloom").join("config.toml"));

    if let Some(path) = user_config.as_ref().filter(|p| p.exists()) {
        return Ok(path.clone());
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/soundbloom/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("soundbloom"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/soundbloom"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("soundbloom"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/soundbloom"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("soundbloom"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\soundbloom"))
    } else {
        PathBuf::from("./soundbloom_data")
    }
}
