// SPDX-License-Identifier: MPL-2.0
//! Diagnostics journal for notification lifecycles.
//!
//! Every transition the [`Manager`](crate::notifications::Manager) performs,
//! and every event it ignores, can be reported to a memory-bounded journal
//! and exported as JSON for debugging timing issues.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: ring buffer with configurable capacity
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: channel-fed store
//! - [`ToastEventKind`]: what happened to a toast

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, IgnoredEvent, ToastEventKind};
