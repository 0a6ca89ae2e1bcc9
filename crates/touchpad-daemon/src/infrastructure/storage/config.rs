//! TOML configuration for the daemon.
//!
//! Location: `$XDG_CONFIG_HOME/touchpad/config.toml`, falling back to
//! `~/.config/touchpad/config.toml`.  A missing file yields
//! [`AppConfig::default()`]; every field has a serde default, so a partial file
//! only overrides what it names.
//!
//! ```toml
//! [device]
//! path = "/dev/input/event2"
//! layout = "native"            # "native" | "wide" | "narrow"
//!
//! [translator]
//! slide_policy = "press-only"  # "press-only" | "release-on-leave"
//!
//! [log]
//! level = "info"
//!
//! [[buttons]]                  # declared order is hit-test priority
//! name = "a"
//! kind = "circle"
//! center_x = 683
//! center_y = 224
//! radius = 20
//! ```
//!
//! An empty `buttons` list selects the built-in layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use touchpad_core::{Button, GeometryError, GeometryTable, RecordLayout};

use crate::application::translate_keys::SlidePolicy;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `[[buttons]]` entries do not form a valid table.
    #[error("invalid button layout: {0}")]
    Geometry(#[from] GeometryError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// Input device settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Event device node to read.
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
    /// Record layout of the stream; `native` follows this host's word size.
    #[serde(default)]
    pub layout: RecordLayout,
}

/// Key Action Translator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub slide_policy: SlidePolicy,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device_path() -> PathBuf {
    PathBuf::from("/dev/input/event2")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
            layout: RecordLayout::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Defaults with the built-in layout written out, as a starting point for
    /// hand editing.
    pub fn with_builtin_buttons() -> Self {
        Self {
            buttons: GeometryTable::builtin().buttons().cloned().collect(),
            ..Self::default()
        }
    }

    /// Builds the geometry table, falling back to the built-in layout when no
    /// buttons are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] for duplicate or empty button names.
    pub fn geometry_table(&self) -> Result<GeometryTable, ConfigError> {
        if self.buttons.is_empty() {
            return Ok(GeometryTable::builtin());
        }
        Ok(GeometryTable::new(self.buttons.clone())?)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if neither `XDG_CONFIG_HOME`
/// nor `HOME` is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join("touchpad").join("config.toml"))
}

/// Loads the config from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
