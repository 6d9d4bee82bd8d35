// SPDX-License-Identifier: MPL-2.0
//! Notification timing newtypes.
//!
//! Callers hand us raw millisecond integers (possibly zero or negative);
//! these types turn them into something the lifecycle controller can use
//! without re-checking.

use std::time::Duration;

/// Auto-dismiss delay used when a caller does not provide one.
pub const DEFAULT_AUTO_DISMISS_MS: i64 = 5000;

// =============================================================================
// AutoDismiss
// =============================================================================

/// How long a toast stays up before it starts exiting on its own.
///
/// A non-positive millisecond count means the toast never expires and can
/// only leave through a manual dismiss.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use toastkit::domain::notification::AutoDismiss;
///
/// assert_eq!(
///     AutoDismiss::from_millis(3000).duration(),
///     Some(Duration::from_millis(3000))
/// );
/// assert!(AutoDismiss::from_millis(0).is_never());
/// assert!(AutoDismiss::from_millis(-1).is_never());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
    /// Stays until dismissed.
    Never,
    /// Starts exiting once this much running time has elapsed.
    After(Duration),
}

impl AutoDismiss {
    /// Builds an auto-dismiss policy from a signed millisecond count.
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        match u64::try_from(ms) {
            Ok(ms) if ms > 0 => Self::After(Duration::from_millis(ms)),
            _ => Self::Never,
        }
    }

    /// Returns the countdown length, or `None` for [`AutoDismiss::Never`].
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) => Some(d),
        }
    }

    /// Returns the policy as signed milliseconds (`0` for never).
    #[must_use]
    pub fn as_millis(self) -> i64 {
        match self {
            Self::Never => 0,
            Self::After(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        }
    }

    #[must_use]
    pub fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }
}

impl Default for AutoDismiss {
    fn default() -> Self {
        Self::from_millis(DEFAULT_AUTO_DISMISS_MS)
    }
}

// =============================================================================
// Exit Duration Bounds
// =============================================================================

/// Exit transition bounds (0 to 5000 milliseconds).
pub mod exit_duration_bounds {
    /// Minimum exit transition (instant removal).
    pub const MIN_MS: u64 = 0;
    /// Maximum exit transition.
    pub const MAX_MS: u64 = 5000;
    /// Default exit transition, long enough for a fade-out.
    pub const DEFAULT_MS: u64 = 300;
}

// =============================================================================
// ExitDuration
// =============================================================================

/// Length of the exiting phase between "dismissed" and "removed".
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (0–5000 ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDuration(Duration);

impl ExitDuration {
    /// Creates a new exit duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms.clamp(
            exit_duration_bounds::MIN_MS,
            exit_duration_bounds::MAX_MS,
        )))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(exit_duration_bounds::MAX_MS)
    }
}

impl Default for ExitDuration {
    fn default() -> Self {
        Self::from_millis(exit_duration_bounds::DEFAULT_MS)
    }
}
