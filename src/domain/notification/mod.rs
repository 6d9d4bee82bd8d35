// SPDX-License-Identifier: MPL-2.0
//! Notification timing value objects.

mod newtypes;

pub use newtypes::{exit_duration_bounds, AutoDismiss, ExitDuration, DEFAULT_AUTO_DISMISS_MS};
