// SPDX-License-Identifier: MPL-2.0
//! Per-toast lifecycle state machine.
//!
//! ```text
//!            pointer-enter            countdown / close
//!  Running ───────────────► Paused ───────────────┐
//!     │  ◄───────────────                          │
//!     │    pointer-leave                           ▼
//!     └──────── countdown / close ──────────► Exiting ── exit timer ──► Removed
//! ```
//!
//! The countdown is deadline based: pausing snapshots `deadline - now`,
//! resuming arms a fresh deadline `now + snapshot`. Paused time never counts
//! and repeated cycles cannot drift.
//!
//! Every transition is gated on the current phase. An event that does not
//! apply (pointer-leave while exiting, a second close, a stale timer) returns
//! `false` and changes nothing.

use std::time::{Duration, Instant};

use super::notification::{Phase, ToastId};
use super::timers::{Expired, TimerId, TimerQueue};
use crate::domain::notification::{AutoDismiss, ExitDuration};

/// What a scheduled timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Countdown,
    Exit,
}

/// Key stored in the shared timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub toast: ToastId,
    pub kind: TimerKind,
}

/// Timing state of one toast.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
    exit: ExitDuration,
    pausable: bool,
    closeable: bool,
    /// Countdown left when not running; `None` for toasts that never expire.
    remaining: Option<Duration>,
    /// Absolute countdown target while running.
    deadline: Option<Instant>,
    /// The one timer (countdown or exit) currently armed for this toast.
    timer: Option<TimerId>,
}

impl Lifecycle {
    pub(crate) fn new(
        auto_dismiss: AutoDismiss,
        exit: ExitDuration,
        pausable: bool,
        closeable: bool,
    ) -> Self {
        Self {
            phase: Phase::Running,
            exit,
            pausable,
            closeable,
            remaining: auto_dismiss.duration(),
            deadline: None,
            timer: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn pausable(&self) -> bool {
        self.pausable
    }

    #[must_use]
    pub fn closeable(&self) -> bool {
        self.closeable
    }

    /// Countdown left at `now`. `None` means the toast never expires.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Running => match self.deadline {
                Some(deadline) => Some(deadline.saturating_duration_since(now)),
                None => self.remaining,
            },
            Phase::Paused => self.remaining,
            Phase::Exiting | Phase::Removed => self.remaining.map(|_| Duration::ZERO),
        }
    }

    /// Arms the initial countdown. Toasts that never expire get no timer.
    pub(crate) fn start(&mut self, id: ToastId, now: Instant, timers: &mut TimerQueue<Timer>) {
        if self.phase == Phase::Running && self.timer.is_none() {
            self.arm_countdown(id, now, timers);
        }
    }

    /// Running → Paused. Ignored for non-pausable toasts.
    pub(crate) fn pause(&mut self, now: Instant, timers: &mut TimerQueue<Timer>) -> bool {
        if !self.pausable || self.phase != Phase::Running {
            return false;
        }
        self.disarm(timers);
        if let Some(deadline) = self.deadline.take() {
            self.remaining = Some(deadline.saturating_duration_since(now));
        }
        self.phase = Phase::Paused;
        true
    }

    /// Paused → Running, re-armed for exactly the remaining snapshot.
    pub(crate) fn resume(
        &mut self,
        id: ToastId,
        now: Instant,
        timers: &mut TimerQueue<Timer>,
    ) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        self.arm_countdown(id, now, timers);
        true
    }

    /// Manual close: Running or Paused → Exiting.
    pub(crate) fn close(
        &mut self,
        id: ToastId,
        now: Instant,
        timers: &mut TimerQueue<Timer>,
    ) -> bool {
        if !self.closeable || !matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        self.begin_exit(id, now, timers);
        true
    }

    /// Handles a fired timer. Returns the phase entered, or `None` when the
    /// timer is stale or does not apply to the current phase.
    pub(crate) fn on_timer(
        &mut self,
        expired: &Expired<Timer>,
        timers: &mut TimerQueue<Timer>,
    ) -> Option<Phase> {
        if self.timer != Some(expired.id) {
            return None;
        }
        match (self.phase, expired.key.kind) {
            (Phase::Running, TimerKind::Countdown) => {
                self.timer = None;
                // Measured from the deadline so a late wake-up keeps the
                // exit transition on schedule.
                self.begin_exit(expired.key.toast, expired.deadline, timers);
                Some(Phase::Exiting)
            }
            (Phase::Exiting, TimerKind::Exit) => {
                self.timer = None;
                self.phase = Phase::Removed;
                Some(Phase::Removed)
            }
            _ => None,
        }
    }

    /// Drops any armed timer and marks the toast removed, skipping the exit
    /// transition.
    pub(crate) fn release(&mut self, timers: &mut TimerQueue<Timer>) {
        self.disarm(timers);
        self.deadline = None;
        self.phase = Phase::Removed;
    }

    fn begin_exit(&mut self, id: ToastId, at: Instant, timers: &mut TimerQueue<Timer>) {
        self.disarm(timers);
        self.deadline = None;
        self.remaining = self.remaining.map(|_| Duration::ZERO);
        self.phase = Phase::Exiting;
        self.timer = Some(timers.schedule_after(
            at,
            self.exit.as_duration(),
            Timer {
                toast: id,
                kind: TimerKind::Exit,
            },
        ));
    }

    fn arm_countdown(&mut self, id: ToastId, now: Instant, timers: &mut TimerQueue<Timer>) {
        let Some(remaining) = self.remaining else {
            return;
        };
        let deadline = now + remaining;
        self.deadline = Some(deadline);
        self.timer = Some(timers.schedule_at(
            deadline,
            Timer {
                toast: id,
                kind: TimerKind::Countdown,
            },
        ));
    }

    fn disarm(&mut self, timers: &mut TimerQueue<Timer>) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: ToastId = ToastId::from_raw(1);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn lifecycle(duration_ms: i64) -> Lifecycle {
        Lifecycle::new(
            AutoDismiss::from_millis(duration_ms),
            ExitDuration::from_millis(300),
            true,
            true,
        )
    }

    /// Fires every timer due at `now`, returning the phases entered.
    fn fire(
        lifecycle: &mut Lifecycle,
        timers: &mut TimerQueue<Timer>,
        now: Instant,
    ) -> Vec<Phase> {
        let mut entered = Vec::new();
        while let Some(expired) = timers.pop_due(now) {
            entered.extend(lifecycle.on_timer(&expired, timers));
        }
        entered
    }

    #[test]
    fn countdown_then_exit_then_removed() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(1000);
        lc.start(ID, t0, &mut timers);

        assert!(fire(&mut lc, &mut timers, t0 + ms(999)).is_empty());
        assert_eq!(fire(&mut lc, &mut timers, t0 + ms(1000)), vec![Phase::Exiting]);
        assert_eq!(lc.remaining(t0 + ms(1000)), Some(Duration::ZERO));
        assert!(fire(&mut lc, &mut timers, t0 + ms(1299)).is_empty());
        assert_eq!(fire(&mut lc, &mut timers, t0 + ms(1300)), vec![Phase::Removed]);
        assert!(timers.is_empty());
    }

    #[test]
    fn late_wake_up_catches_up_in_one_pass() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(1000);
        lc.start(ID, t0, &mut timers);

        let entered = fire(&mut lc, &mut timers, t0 + ms(5000));
        assert_eq!(entered, vec![Phase::Exiting, Phase::Removed]);
    }

    #[test]
    fn never_expiring_toast_arms_nothing() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(0);
        lc.start(ID, t0, &mut timers);

        assert!(timers.is_empty());
        assert_eq!(lc.remaining(t0), None);
        assert_eq!(lc.phase(), Phase::Running);
    }

    #[test]
    fn pause_snapshots_remaining_and_resume_rearms_it() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(5000);
        lc.start(ID, t0, &mut timers);

        assert!(lc.pause(t0 + ms(1000), &mut timers));
        assert!(timers.is_empty());
        assert_eq!(lc.remaining(t0 + ms(9000)), Some(ms(4000)));

        assert!(lc.resume(ID, t0 + ms(11_000), &mut timers));
        assert_eq!(timers.next_deadline(), Some(t0 + ms(15_000)));
    }

    #[test]
    fn non_pausable_ignores_pointer() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = Lifecycle::new(
            AutoDismiss::from_millis(1000),
            ExitDuration::default(),
            false,
            true,
        );
        lc.start(ID, t0, &mut timers);

        assert!(!lc.pause(t0, &mut timers));
        assert!(!lc.resume(ID, t0, &mut timers));
        assert_eq!(lc.phase(), Phase::Running);
    }

    #[test]
    fn close_from_paused_enters_exiting() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(5000);
        lc.start(ID, t0, &mut timers);
        lc.pause(t0 + ms(100), &mut timers);

        assert!(lc.close(ID, t0 + ms(200), &mut timers));
        assert_eq!(lc.phase(), Phase::Exiting);
        assert_eq!(timers.next_deadline(), Some(t0 + ms(500)));
    }

    #[test]
    fn exiting_ignores_pointer_and_second_close() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(5000);
        lc.start(ID, t0, &mut timers);
        lc.close(ID, t0, &mut timers);

        assert!(!lc.pause(t0, &mut timers));
        assert!(!lc.resume(ID, t0, &mut timers));
        assert!(!lc.close(ID, t0, &mut timers));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn close_denied_when_not_closeable() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = Lifecycle::new(AutoDismiss::Never, ExitDuration::default(), true, false);
        lc.start(ID, t0, &mut timers);

        assert!(!lc.close(ID, t0, &mut timers));
        assert_eq!(lc.phase(), Phase::Running);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(1000);
        lc.start(ID, t0, &mut timers);
        let stale = timers.pop_due(t0 + ms(1000)).expect("countdown due");

        // A pause/resume cycle re-arms under a new timer id.
        let mut lc_resumed = lc.clone();
        lc_resumed.timer = None;
        lc_resumed.phase = Phase::Paused;
        lc_resumed.remaining = Some(ms(500));
        lc_resumed.resume(ID, t0, &mut timers);

        assert_eq!(lc_resumed.on_timer(&stale, &mut timers), None);
        assert_eq!(lc_resumed.phase(), Phase::Running);
    }

    #[test]
    fn release_cancels_pending_timer() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut lc = lifecycle(1000);
        lc.start(ID, t0, &mut timers);

        lc.release(&mut timers);

        assert!(timers.is_empty());
        assert_eq!(lc.phase(), Phase::Removed);
    }
}
