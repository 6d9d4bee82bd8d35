// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! Single source of truth for the values written into a fresh
//! `settings.toml`. The clamping bounds themselves live next to the domain
//! newtypes; tests below keep both in sync.

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default auto-dismiss delay in milliseconds.
pub const DEFAULT_DURATION_MS: i64 = 5000;

/// Default exit (fade-out) transition in milliseconds.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 300;

/// Longest exit transition accepted from configuration.
pub const MAX_EXIT_DURATION_MS: u64 = 5000;

/// Whether hovering a toast pauses its countdown unless told otherwise.
pub const DEFAULT_PAUSABLE: bool = true;

/// Whether toasts can be dismissed by the user unless told otherwise.
pub const DEFAULT_CLOSEABLE: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept by the journal.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum journal capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum journal capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 4096;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::buffer_capacity_bounds;
    use crate::domain::notification::{exit_duration_bounds, DEFAULT_AUTO_DISMISS_MS};

    #[test]
    fn notification_defaults_match_domain() {
        assert_eq!(DEFAULT_DURATION_MS, DEFAULT_AUTO_DISMISS_MS);
        assert_eq!(DEFAULT_EXIT_DURATION_MS, exit_duration_bounds::DEFAULT_MS);
        assert_eq!(MAX_EXIT_DURATION_MS, exit_duration_bounds::MAX_MS);
    }

    #[test]
    fn diagnostics_defaults_match_domain() {
        assert_eq!(
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
            buffer_capacity_bounds::DEFAULT
        );
        assert_eq!(MIN_DIAGNOSTICS_BUFFER_CAPACITY, buffer_capacity_bounds::MIN);
        assert_eq!(MAX_DIAGNOSTICS_BUFFER_CAPACITY, buffer_capacity_bounds::MAX);
    }
}
