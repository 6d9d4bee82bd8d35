// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`config_dir_with_override`]
//!    (CLI flag or tests)
//! 2. **Environment variable** - `TOASTKIT_CONFIG_DIR`, if set and non-empty
//! 3. **Platform default** - `dirs::config_dir()` with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "toastkit";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOASTKIT_CONFIG_DIR";

/// Returns the config directory, honouring the environment override.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}

/// Returns the config directory with an optional explicit override, which
/// takes priority over everything else.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching the process environment must not interleave.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_override_wins() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/from/env");

        let path = config_dir_with_override(Some(PathBuf::from("/explicit")));

        std::env::remove_var(ENV_CONFIG_DIR);
        assert_eq!(path, Some(PathBuf::from("/explicit")));
    }

    #[test]
    fn env_var_overrides_platform_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/from/env");

        let path = config_dir();

        std::env::remove_var(ENV_CONFIG_DIR);
        assert_eq!(path, Some(PathBuf::from("/from/env")));
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        let path = config_dir();

        std::env::remove_var(ENV_CONFIG_DIR);
        if let Some(path) = path {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
