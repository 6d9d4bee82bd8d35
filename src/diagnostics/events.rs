// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event types recorded by the diagnostics journal.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::notifications::{Phase, Position, Severity, ToastId};

/// A host event that arrived in a phase where it does not apply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredEvent {
    Dismiss,
    PointerEnter,
    PointerLeave,
}

/// What happened to a toast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToastEventKind {
    /// The toast was registered and its countdown armed.
    Shown {
        severity: Severity,
        position: Position,
        /// Requested auto-dismiss delay; `0` means never.
        duration_ms: i64,
    },

    /// Countdown frozen under the pointer.
    Paused {
        #[serde(skip_serializing_if = "Option::is_none")]
        remaining_ms: Option<u64>,
    },

    /// Countdown re-armed after the pointer left.
    Resumed {
        #[serde(skip_serializing_if = "Option::is_none")]
        remaining_ms: Option<u64>,
    },

    /// Countdown reached zero.
    Expired,

    /// Closed by the user or the host.
    Dismissed,

    /// Exit transition finished; the toast is gone.
    Removed,

    /// Removed by a registry-wide clear.
    Cleared,

    /// Phase-gated no-op. `phase` is `None` when the toast no longer exists.
    Ignored {
        event: IgnoredEvent,
        #[serde(skip_serializing_if = "Option::is_none")]
        phase: Option<Phase>,
    },
}

impl ToastEventKind {
    pub(crate) fn remaining_ms(remaining: Option<Duration>) -> Option<u64> {
        remaining.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// A lifecycle event with its timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred, on the manager's clock.
    pub timestamp: Instant,
    pub toast: ToastId,
    pub kind: ToastEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(timestamp: Instant, toast: ToastId, kind: ToastEventKind) -> Self {
        Self {
            timestamp,
            toast,
            kind,
        }
    }
}
