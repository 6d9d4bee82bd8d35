// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for lifecycle events.
//!
//! The manager reports through a cloneable [`DiagnosticsHandle`]; events
//! travel over a bounded channel and are drained into a
//! [`CircularBuffer`] by [`DiagnosticsCollector::process_pending`].
//!
//! The channel holds as many events as the journal does. When it fills up
//! before a drain, the oldest queued event makes room for the newest, so a
//! late drain still ends with the most recent history.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, ToastEventKind};
use crate::notifications::ToastId;

/// Handle for sending lifecycle events to the collector.
///
/// Cheap to clone and `Send`. Sending never blocks: when the channel is
/// full the oldest queued event is discarded instead.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    overflowed: Arc<AtomicUsize>,
}

impl DiagnosticsHandle {
    /// Records an event, evicting the oldest queued one if the channel is
    /// full.
    pub fn log(&self, timestamp: Instant, toast: ToastId, kind: ToastEventKind) {
        let mut event = DiagnosticEvent::new(timestamp, toast, kind);
        loop {
            match self.event_tx.try_send(event) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.event_rx.try_recv().is_ok() {
                        self.overflowed.fetch_add(1, Ordering::Relaxed);
                    }
                    event = rejected;
                }
            }
        }
    }

    /// Records an event, reporting whether it was accepted.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the channel buffer is full, or
    /// `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(&self, event: DiagnosticEvent) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(event)
    }
}

/// Central store for lifecycle events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Events discarded from a full channel before they were drained.
    overflowed: Arc<AtomicUsize>,
    /// Monotonic origin for event offsets.
    collection_started_at: Instant,
    /// Wall-clock origin for exported reports.
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::starting_at(capacity, Instant::now())
    }

    /// Creates a collector whose offsets are measured from `origin`, e.g.
    /// the `now()` of a simulated clock.
    #[must_use]
    pub fn starting_at(capacity: BufferCapacity, origin: Instant) -> Self {
        let (event_tx, event_rx) = bounded(capacity.value());

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            overflowed: Arc::new(AtomicUsize::new(0)),
            collection_started_at: origin,
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
            event_rx: self.event_rx.clone(),
            overflowed: Arc::clone(&self.overflowed),
        }
    }

    /// Moves every queued event into the buffer. Returns how many moved.
    pub fn process_pending(&mut self) -> usize {
        let mut moved = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            moved += 1;
        }
        moved
    }

    /// Stores an event directly, bypassing the channel.
    pub fn record(&mut self, event: DiagnosticEvent) {
        self.buffer.push(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Stored events concerning one toast, oldest first.
    pub fn events_for(&self, toast: ToastId) -> impl Iterator<Item = &ToastEventKind> {
        self.buffer
            .iter()
            .filter(move |event| event.toast == toast)
            .map(|event| &event.kind)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Events discarded because the channel filled up between two drains.
    #[must_use]
    pub fn overflowed(&self) -> usize {
        self.overflowed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Time since collection started, on the real clock.
    #[must_use]
    pub fn collection_duration(&self) -> Duration {
        self.collection_started_at.elapsed()
    }

    /// Serializes the journal as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let events = self
            .buffer
            .iter()
            .map(|event| ExportedEvent {
                offset_ms: u64::try_from(
                    event
                        .timestamp
                        .saturating_duration_since(self.collection_started_at)
                        .as_millis(),
                )
                .unwrap_or(u64::MAX),
                toast: event.toast,
                kind: &event.kind,
            })
            .collect();

        serde_json::to_string_pretty(&ExportedJournal {
            collection_started_at: self.collection_started_at_utc.to_rfc3339(),
            event_count: self.buffer.len(),
            overflowed: self.overflowed(),
            events,
        })
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[derive(Serialize)]
struct ExportedJournal<'a> {
    collection_started_at: String,
    event_count: usize,
    overflowed: usize,
    events: Vec<ExportedEvent<'a>>,
}

#[derive(Serialize)]
struct ExportedEvent<'a> {
    offset_ms: u64,
    toast: ToastId,
    #[serde(flatten)]
    kind: &'a ToastEventKind,
}
