// SPDX-License-Identifier: MPL-2.0
//! This module handles the configuration, loading and saving it from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - defaults applied to every `show` call
//! - `[diagnostics]` - lifecycle journal settings
//!
//! Every field is optional; a missing file or section yields the defaults
//! from [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use toastkit::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.notifications.default_duration_ms = Some(8000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::notification::{AutoDismiss, ExitDuration};
use crate::error::{Error, Result};
use crate::notifications::{Position, Severity, ToastDefaults};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Defaults for notifications shown without explicit options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationsConfig {
    /// Auto-dismiss delay in milliseconds; `0` or negative means never.
    #[serde(
        default = "default_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_duration_ms: Option<i64>,

    /// Exit transition in milliseconds (clamped to 0–5000).
    #[serde(
        default = "default_exit_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_duration_ms: Option<u64>,

    /// Screen anchor for toasts that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_position: Option<Position>,

    /// Severity for toasts that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_severity: Option<Severity>,

    /// Whether hovering pauses the countdown.
    #[serde(default = "default_pausable", skip_serializing_if = "Option::is_none")]
    pub pausable: Option<bool>,

    /// Whether users may dismiss toasts.
    #[serde(default = "default_closeable", skip_serializing_if = "Option::is_none")]
    pub closeable: Option<bool>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            exit_duration_ms: default_exit_duration_ms(),
            default_position: Some(Position::default()),
            default_severity: Some(Severity::default()),
            pausable: default_pausable(),
            closeable: default_closeable(),
        }
    }
}

/// Lifecycle journal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Record lifecycle events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Number of events kept (clamped to 16–4096).
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: Some(false),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Resolves the `[notifications]` section into validated defaults.
    #[must_use]
    pub fn toast_defaults(&self) -> ToastDefaults {
        let section = &self.notifications;
        ToastDefaults {
            severity: section.default_severity.unwrap_or_default(),
            auto_dismiss: AutoDismiss::from_millis(
                section.default_duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            ),
            position: section.default_position.unwrap_or_default(),
            pausable: section.pausable.unwrap_or(DEFAULT_PAUSABLE),
            closeable: section.closeable.unwrap_or(DEFAULT_CLOSEABLE),
            exit: ExitDuration::from_millis(
                section.exit_duration_ms.unwrap_or(DEFAULT_EXIT_DURATION_MS),
            ),
        }
    }

    #[must_use]
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics.enabled.unwrap_or(false)
    }

    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics
                .buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_duration_ms() -> Option<i64> {
    Some(DEFAULT_DURATION_MS)
}

fn default_exit_duration_ms() -> Option<u64> {
    Some(DEFAULT_EXIT_DURATION_MS)
}

fn default_pausable() -> Option<bool> {
    Some(DEFAULT_PAUSABLE)
}

fn default_closeable() -> Option<bool> {
    Some(DEFAULT_CLOSEABLE)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Load Functions
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "ignoring {}: {}; using defaults",
                            path.display(),
                            err
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
