// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the notification record ([`Toast`]), its closed
//! enumerations ([`Severity`], [`Position`], [`Phase`]) and the options a
//! caller passes to `show`.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::lifecycle::Lifecycle;
use crate::domain::notification::{AutoDismiss, ExitDuration};

/// Unique identifier for a notification.
///
/// Identifiers are allocated by the [`Registry`](super::Registry) and are
/// never reused by the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl ToastId {
    /// Wraps a raw identifier, e.g. one typed by a user on a console.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level, used by the presentation layer for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Screen anchor a toast is stacked at.
///
/// Positions partition the active toasts into independent display groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Position {
    /// All anchors, in the order read models list them.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopRight,
        Position::TopCenter,
        Position::BottomLeft,
        Position::BottomRight,
        Position::BottomCenter,
    ];

    /// Stable slot of this anchor within [`Position::ALL`].
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopRight => 1,
            Position::TopCenter => 2,
            Position::BottomLeft => 3,
            Position::BottomRight => 4,
            Position::BottomCenter => 5,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::TopCenter => "top-center",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::BottomCenter => "bottom-center",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when parsing a [`Severity`] or [`Position`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Where a toast is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Visible; the countdown (if any) is ticking.
    Running,
    /// Visible; the countdown is frozen under the pointer.
    Paused,
    /// Fading out; removal is scheduled.
    Exiting,
    /// Gone from the registry. Terminal.
    Removed,
}

/// Fired once when a toast is removed, so the host can release resources.
pub type RemovedCallback = Box<dyn FnOnce(ToastId) + Send>;

/// Values used for any field a caller leaves unset in [`ShowOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastDefaults {
    pub severity: Severity,
    pub auto_dismiss: AutoDismiss,
    pub position: Position,
    pub pausable: bool,
    pub closeable: bool,
    pub exit: ExitDuration,
}

impl Default for ToastDefaults {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            auto_dismiss: AutoDismiss::default(),
            position: Position::default(),
            pausable: true,
            closeable: true,
            exit: ExitDuration::default(),
        }
    }
}

/// Per-call options for `show`.
///
/// Every field is optional; unset fields fall back to [`ToastDefaults`].
///
/// ```
/// use toastkit::notifications::{Position, Severity, ShowOptions};
///
/// let options = ShowOptions::new()
///     .severity(Severity::Success)
///     .duration_ms(3000)
///     .position(Position::BottomLeft);
/// ```
#[derive(Default)]
pub struct ShowOptions {
    severity: Option<Severity>,
    duration_ms: Option<i64>,
    position: Option<Position>,
    pausable: Option<bool>,
    closeable: Option<bool>,
    on_removed: Option<RemovedCallback>,
}

impl ShowOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Auto-dismiss delay; `0` or negative keeps the toast until dismissed.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn pausable(mut self, pausable: bool) -> Self {
        self.pausable = Some(pausable);
        self
    }

    #[must_use]
    pub fn closeable(mut self, closeable: bool) -> Self {
        self.closeable = Some(closeable);
        self
    }

    /// Registers a completion signal fired once when the toast is removed.
    #[must_use]
    pub fn on_removed(mut self, callback: impl FnOnce(ToastId) + Send + 'static) -> Self {
        self.on_removed = Some(Box::new(callback));
        self
    }

    /// Fills unset fields from `defaults`.
    pub(crate) fn resolve(self, defaults: &ToastDefaults) -> ResolvedOptions {
        ResolvedOptions {
            severity: self.severity.unwrap_or(defaults.severity),
            auto_dismiss: self
                .duration_ms
                .map_or(defaults.auto_dismiss, AutoDismiss::from_millis),
            position: self.position.unwrap_or(defaults.position),
            pausable: self.pausable.unwrap_or(defaults.pausable),
            closeable: self.closeable.unwrap_or(defaults.closeable),
            exit: defaults.exit,
            on_removed: self.on_removed,
        }
    }
}

impl fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowOptions")
            .field("severity", &self.severity)
            .field("duration_ms", &self.duration_ms)
            .field("position", &self.position)
            .field("pausable", &self.pausable)
            .field("closeable", &self.closeable)
            .field("on_removed", &self.on_removed.is_some())
            .finish()
    }
}

pub(crate) struct ResolvedOptions {
    pub severity: Severity,
    pub auto_dismiss: AutoDismiss,
    pub position: Position,
    pub pausable: bool,
    pub closeable: bool,
    pub exit: ExitDuration,
    pub on_removed: Option<RemovedCallback>,
}

/// One active notification: payload, display attributes and lifecycle.
pub struct Toast<M> {
    pub(crate) id: ToastId,
    message: M,
    severity: Severity,
    position: Position,
    auto_dismiss: AutoDismiss,
    pub(crate) lifecycle: Lifecycle,
    on_removed: Option<RemovedCallback>,
}

impl<M> Toast<M> {
    /// Builds an unregistered record; the registry assigns its id.
    pub(crate) fn new(message: M, options: ResolvedOptions) -> Self {
        Self {
            id: ToastId(0),
            message,
            severity: options.severity,
            position: options.position,
            auto_dismiss: options.auto_dismiss,
            lifecycle: Lifecycle::new(
                options.auto_dismiss,
                options.exit,
                options.pausable,
                options.closeable,
            ),
            on_removed: options.on_removed,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &M {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The auto-dismiss policy the toast was created with.
    #[must_use]
    pub fn auto_dismiss(&self) -> AutoDismiss {
        self.auto_dismiss
    }

    #[must_use]
    pub fn pausable(&self) -> bool {
        self.lifecycle.pausable()
    }

    #[must_use]
    pub fn closeable(&self) -> bool {
        self.lifecycle.closeable()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Countdown left at `now`; `None` when the toast never expires.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.lifecycle.remaining(now)
    }

    pub(crate) fn take_on_removed(&mut self) -> Option<RemovedCallback> {
        self.on_removed.take()
    }
}

impl<M: fmt::Debug> fmt::Debug for Toast<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("severity", &self.severity)
            .field("position", &self.position)
            .field("auto_dismiss", &self.auto_dismiss)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
