// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` ties the [`Registry`] to the per-toast [`Lifecycle`]: it
//! allocates records on `show`, routes pointer and dismiss events to the
//! right state machine, fires due timers and removes records once their
//! exit transition ends.
//!
//! [`Lifecycle`]: super::lifecycle::Lifecycle

use std::time::Instant;

use log::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::lifecycle::Timer;
use super::notification::{Phase, Position, ShowOptions, Toast, ToastDefaults, ToastId};
use super::registry::Registry;
use super::timers::TimerQueue;
use super::view::{Snapshot, ToastView};
use crate::diagnostics::{DiagnosticsHandle, IgnoredEvent, ToastEventKind};

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Close a specific notification.
    Dismiss(ToastId),
    /// The pointer moved over a notification.
    PointerEntered(ToastId),
    /// The pointer left a notification.
    PointerLeft(ToastId),
    /// Time passed; fire whatever timers are due.
    Tick,
}

/// Owns the active notifications and their timers.
pub struct Manager<M, C = SystemClock> {
    clock: C,
    registry: Registry<M>,
    timers: TimerQueue<Timer>,
    defaults: ToastDefaults,
    /// Optional journal for lifecycle events.
    diagnostics: Option<DiagnosticsHandle>,
}

impl<M> Manager<M, SystemClock> {
    /// Creates an empty manager on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<M> Default for Manager<M, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, C: Clock> Manager<M, C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            registry: Registry::new(),
            timers: TimerQueue::new(),
            defaults: ToastDefaults::default(),
            diagnostics: None,
        }
    }

    /// Replaces the values used for unset [`ShowOptions`] fields.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ToastDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets the diagnostics handle for journaling lifecycle events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn defaults(&self) -> &ToastDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Shows a notification and starts its countdown.
    pub fn show(&mut self, message: M, options: ShowOptions) -> ToastId {
        let now = self.clock.now();
        let toast = Toast::new(message, options.resolve(&self.defaults));
        let (severity, position, auto_dismiss) =
            (toast.severity(), toast.position(), toast.auto_dismiss());

        let id = self.registry.add(toast);
        if let Some(toast) = self.registry.get_mut(id) {
            toast.lifecycle.start(id, now, &mut self.timers);
        }

        debug!("toast {id} shown: {severity} at {position}, auto-dismiss {auto_dismiss:?}");
        self.report(
            now,
            id,
            ToastEventKind::Shown {
                severity,
                position,
                duration_ms: auto_dismiss.as_millis(),
            },
        );
        id
    }

    /// Requests a manual close.
    ///
    /// Returns `true` if the toast started exiting. Dismissing a toast that
    /// is not closeable, already exiting, or gone does nothing.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let now = self.clock.now();
        let closed = self
            .registry
            .get_mut(id)
            .is_some_and(|toast| toast.lifecycle.close(id, now, &mut self.timers));

        if closed {
            debug!("toast {id} dismissed");
            self.report(now, id, ToastEventKind::Dismissed);
        } else {
            self.ignored(now, id, IgnoredEvent::Dismiss);
        }
        closed
    }

    /// Pauses the countdown of a pausable, running toast.
    pub fn pointer_enter(&mut self, id: ToastId) -> bool {
        let now = self.clock.now();
        let paused = self
            .registry
            .get_mut(id)
            .is_some_and(|toast| toast.lifecycle.pause(now, &mut self.timers));

        if paused {
            let remaining = self.remaining_of(id, now);
            debug!("toast {id} paused with {remaining:?} left");
            self.report(
                now,
                id,
                ToastEventKind::Paused {
                    remaining_ms: ToastEventKind::remaining_ms(remaining),
                },
            );
        } else {
            self.ignored(now, id, IgnoredEvent::PointerEnter);
        }
        paused
    }

    /// Resumes a paused toast for exactly the time it had left.
    pub fn pointer_leave(&mut self, id: ToastId) -> bool {
        let now = self.clock.now();
        let resumed = self
            .registry
            .get_mut(id)
            .is_some_and(|toast| toast.lifecycle.resume(id, now, &mut self.timers));

        if resumed {
            let remaining = self.remaining_of(id, now);
            debug!("toast {id} resumed with {remaining:?} left");
            self.report(
                now,
                id,
                ToastEventKind::Resumed {
                    remaining_ms: ToastEventKind::remaining_ms(remaining),
                },
            );
        } else {
            self.ignored(now, id, IgnoredEvent::PointerLeave);
        }
        resumed
    }

    /// Fires every timer whose deadline has passed.
    ///
    /// Timers armed while processing (an exit transition following an
    /// expiry) are fired in the same pass if they are already due. Returns
    /// the number of timers fired.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(expired) = self.timers.pop_due(now) {
            fired += 1;
            let id = expired.key.toast;
            let Some(toast) = self.registry.get_mut(id) else {
                continue;
            };
            match toast.lifecycle.on_timer(&expired, &mut self.timers) {
                Some(Phase::Exiting) => {
                    debug!("toast {id} expired");
                    self.report(expired.deadline, id, ToastEventKind::Expired);
                }
                Some(Phase::Removed) => {
                    self.remove(id, expired.deadline, ToastEventKind::Removed);
                }
                _ => trace!("stale timer for toast {id}"),
            }
        }
        fired
    }

    /// When [`Manager::run_due_timers`] next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Removes every toast immediately, without exit transitions.
    ///
    /// Each toast's completion signal still fires once. Returns the number
    /// of toasts removed.
    pub fn clear(&mut self) -> usize {
        let now = self.clock.now();
        let ids = self.registry.ids();
        for &id in &ids {
            self.remove(id, now, ToastEventKind::Cleared);
        }
        ids.len()
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match *message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::PointerEntered(id) => {
                self.pointer_enter(id);
            }
            Message::PointerLeft(id) => {
                self.pointer_leave(id);
            }
            Message::Tick => {
                self.run_due_timers();
            }
        }
    }

    /// Current phase, or `None` once the toast has been removed.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> Option<Phase> {
        self.registry.get(id).map(Toast::phase)
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<ToastView<&M>> {
        let now = self.clock.now();
        self.registry.get(id).map(|toast| ToastView::of(toast, now))
    }

    /// Active toasts at `position`, first shown first.
    #[must_use]
    pub fn list_by_position(&self, position: Position) -> Vec<ToastView<&M>> {
        let now = self.clock.now();
        self.registry
            .list_by_position(position)
            .map(|toast| ToastView::of(toast, now))
            .collect()
    }

    /// Owned copy of the whole read model.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<M>
    where
        M: Clone,
    {
        let groups = Position::ALL.map(|position| {
            self.list_by_position(position)
                .iter()
                .map(ToastView::to_owned_view)
                .collect()
        });
        Snapshot::from_groups(groups)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry<M> {
        &self.registry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn remove(&mut self, id: ToastId, at: Instant, kind: ToastEventKind) {
        let Some(mut toast) = self.registry.remove(id) else {
            return;
        };
        toast.lifecycle.release(&mut self.timers);
        debug!("toast {id} removed");
        self.report(at, id, kind);
        if let Some(on_removed) = toast.take_on_removed() {
            on_removed(id);
        }
    }

    fn remaining_of(&self, id: ToastId, now: Instant) -> Option<std::time::Duration> {
        self.registry.get(id).and_then(|toast| toast.remaining(now))
    }

    fn ignored(&self, now: Instant, id: ToastId, event: IgnoredEvent) {
        let phase = self.phase(id);
        trace!("ignored {event:?} for toast {id} in phase {phase:?}");
        self.report(now, id, ToastEventKind::Ignored { event, phase });
    }

    fn report(&self, at: Instant, id: ToastId, kind: ToastEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(at, id, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::diagnostics::DiagnosticsCollector;
    use crate::domain::notification::{AutoDismiss, ExitDuration};
    use crate::notifications::clock::ManualClock;
    use crate::notifications::Severity;

    const EXIT_MS: u64 = 300;

    fn manager() -> (Manager<&'static str, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Manager::with_clock(clock.clone()), clock)
    }

    /// Advances the clock and fires everything that became due.
    fn advance(manager: &mut Manager<&'static str, ManualClock>, clock: &ManualClock, ms: u64) {
        clock.advance_ms(ms);
        manager.run_due_timers();
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce(ToastId) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move |_: ToastId| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn new_manager_is_empty() {
        let (manager, _) = manager();
        assert!(manager.is_empty());
        assert_eq!(manager.next_deadline(), None);
    }

    #[test]
    fn show_registers_running_toast() {
        let (mut manager, _) = manager();
        let id = manager.show("hello", ShowOptions::new());

        let view = manager.get(id).expect("toast is active");
        assert_eq!(*view.message, "hello");
        assert_eq!(view.phase, Phase::Running);
        assert_eq!(view.severity, Severity::Info);
        assert_eq!(view.position, Position::TopRight);
        assert_eq!(view.remaining, Some(Duration::from_millis(5000)));
    }

    #[test]
    fn expires_then_removes_after_exit_transition() {
        let (mut manager, clock) = manager();
        let id = manager.show("saved", ShowOptions::new().duration_ms(3000));

        advance(&mut manager, &clock, 2999);
        assert_eq!(manager.phase(id), Some(Phase::Running));

        advance(&mut manager, &clock, 1);
        assert_eq!(manager.phase(id), Some(Phase::Exiting));

        advance(&mut manager, &clock, EXIT_MS - 1);
        assert_eq!(manager.phase(id), Some(Phase::Exiting));

        advance(&mut manager, &clock, 1);
        assert_eq!(manager.phase(id), None);
        assert!(manager.is_empty());
    }

    #[test]
    fn dismiss_starts_exit_immediately() {
        let (mut manager, clock) = manager();
        let id = manager.show("bye", ShowOptions::new().duration_ms(0));

        assert!(manager.dismiss(id));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));

        advance(&mut manager, &clock, EXIT_MS);
        assert_eq!(manager.phase(id), None);
    }

    #[test]
    fn dismiss_twice_fires_completion_once() {
        let (mut manager, clock) = manager();
        let (count, on_removed) = counter();
        let id = manager.show("x", ShowOptions::new().on_removed(on_removed));

        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));
        advance(&mut manager, &clock, EXIT_MS);
        assert!(!manager.dismiss(id));
        advance(&mut manager, &clock, 10_000);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dismiss_unknown_id_is_noop() {
        let (mut manager, _) = manager();
        assert!(!manager.dismiss(ToastId::from_raw(42)));
    }

    #[test]
    fn pointer_events_after_exit_are_ignored() {
        let (mut manager, _) = manager();
        let id = manager.show("x", ShowOptions::new());
        manager.dismiss(id);

        assert!(!manager.pointer_enter(id));
        assert!(!manager.pointer_leave(id));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
    }

    #[test]
    fn pointer_leave_without_enter_is_ignored() {
        let (mut manager, _) = manager();
        let id = manager.show("x", ShowOptions::new());

        assert!(!manager.pointer_leave(id));
        assert_eq!(manager.phase(id), Some(Phase::Running));
    }

    #[test]
    fn non_pausable_toast_keeps_counting_under_pointer() {
        let (mut manager, clock) = manager();
        let id = manager.show("x", ShowOptions::new().duration_ms(1000).pausable(false));

        assert!(!manager.pointer_enter(id));
        advance(&mut manager, &clock, 1000);
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
    }

    #[test]
    fn handle_message_routes_events() {
        let (mut manager, clock) = manager();
        let id = manager.show("x", ShowOptions::new().duration_ms(1000));

        manager.handle_message(&Message::PointerEntered(id));
        assert_eq!(manager.phase(id), Some(Phase::Paused));

        manager.handle_message(&Message::PointerLeft(id));
        assert_eq!(manager.phase(id), Some(Phase::Running));

        manager.handle_message(&Message::Dismiss(id));
        clock.advance_ms(EXIT_MS);
        manager.handle_message(&Message::Tick);
        assert_eq!(manager.phase(id), None);
    }

    #[test]
    fn clear_removes_everything_and_signals_each() {
        let (mut manager, _) = manager();
        let (count, first) = counter();
        let second = {
            let count = Arc::clone(&count);
            move |_: ToastId| {
                count.fetch_add(1, Ordering::SeqCst);
            }
        };
        manager.show("a", ShowOptions::new().on_removed(first));
        manager.show(
            "b",
            ShowOptions::new()
                .position(Position::BottomLeft)
                .on_removed(second),
        );

        assert_eq!(manager.clear(), 2);
        assert!(manager.is_empty());
        assert_eq!(manager.next_deadline(), None);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn configured_defaults_apply() {
        let clock = ManualClock::new();
        let mut manager = Manager::with_clock(clock.clone()).with_defaults(ToastDefaults {
            severity: Severity::Warning,
            auto_dismiss: AutoDismiss::from_millis(1000),
            position: Position::BottomCenter,
            pausable: false,
            closeable: false,
            exit: ExitDuration::from_millis(0),
        });
        let id = manager.show("x", ShowOptions::new());

        let view = manager.get(id).expect("active");
        assert_eq!(view.severity, Severity::Warning);
        assert_eq!(view.position, Position::BottomCenter);
        assert!(!view.pausable);
        assert!(!view.closeable);

        clock.advance_ms(1000);
        manager.run_due_timers();
        assert_eq!(manager.phase(id), None);
    }

    #[test]
    fn snapshot_groups_by_position() {
        let (mut manager, _) = manager();
        let a = manager.show("a", ShowOptions::new().position(Position::TopLeft));
        let b = manager.show("b", ShowOptions::new());
        let c = manager.show("c", ShowOptions::new().position(Position::TopLeft));

        let snapshot = manager.snapshot();
        let top_left: Vec<_> = snapshot.at(Position::TopLeft).iter().map(|v| v.id).collect();
        assert_eq!(top_left, vec![a, c]);
        assert_eq!(snapshot.at(Position::TopRight)[0].id, b);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.find(c).map(|v| v.message), Some("c"));
    }

    #[test]
    fn diagnostics_journal_records_lifecycle() {
        let (mut manager, clock) = manager();
        let mut collector = DiagnosticsCollector::starting_at(Default::default(), clock.now());
        manager.set_diagnostics(collector.handle());

        let id = manager.show("x", ShowOptions::new().duration_ms(1000));
        manager.pointer_enter(id);
        manager.pointer_enter(id);
        manager.pointer_leave(id);
        advance(&mut manager, &clock, 1000 + EXIT_MS);
        collector.process_pending();

        let kinds: Vec<_> = collector.events_for(id).cloned().collect();
        assert_eq!(
            kinds,
            vec![
                ToastEventKind::Shown {
                    severity: Severity::Info,
                    position: Position::TopRight,
                    duration_ms: 1000,
                },
                ToastEventKind::Paused {
                    remaining_ms: Some(1000)
                },
                ToastEventKind::Ignored {
                    event: IgnoredEvent::PointerEnter,
                    phase: Some(Phase::Paused),
                },
                ToastEventKind::Resumed {
                    remaining_ms: Some(1000)
                },
                ToastEventKind::Expired,
                ToastEventKind::Removed,
            ]
        );
    }
}
