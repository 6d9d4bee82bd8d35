// SPDX-License-Identifier: MPL-2.0
//! Read model handed to the presentation layer.

use std::time::{Duration, Instant};

use super::notification::{Phase, Position, Severity, Toast, ToastId};

/// Render-relevant state of one toast at a point in time.
///
/// `M` is `&Message` for borrowed views and the message itself for owned
/// snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView<M> {
    pub id: ToastId,
    pub message: M,
    pub severity: Severity,
    pub position: Position,
    pub phase: Phase,
    /// Countdown left; `None` for toasts that never expire.
    pub remaining: Option<Duration>,
    pub pausable: bool,
    pub closeable: bool,
}

impl<'a, M> ToastView<&'a M> {
    pub(crate) fn of(toast: &'a Toast<M>, now: Instant) -> Self {
        Self {
            id: toast.id(),
            message: toast.message(),
            severity: toast.severity(),
            position: toast.position(),
            phase: toast.phase(),
            remaining: toast.remaining(now),
            pausable: toast.pausable(),
            closeable: toast.closeable(),
        }
    }

    /// Clones the message into an owned view.
    #[must_use]
    pub fn to_owned_view(&self) -> ToastView<M>
    where
        M: Clone,
    {
        ToastView {
            id: self.id,
            message: self.message.clone(),
            severity: self.severity,
            position: self.position,
            phase: self.phase,
            remaining: self.remaining,
            pausable: self.pausable,
            closeable: self.closeable,
        }
    }
}

/// Owned copy of every active toast, grouped by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<M> {
    groups: [Vec<ToastView<M>>; 6],
}

impl<M> Snapshot<M> {
    pub(crate) fn from_groups(groups: [Vec<ToastView<M>>; 6]) -> Self {
        Self { groups }
    }

    /// Toasts at `position`, first shown first.
    #[must_use]
    pub fn at(&self, position: Position) -> &[ToastView<M>] {
        &self.groups[position.index()]
    }

    /// Every position with its toasts, in [`Position::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &[ToastView<M>])> {
        Position::ALL
            .into_iter()
            .map(move |position| (position, self.at(position)))
    }

    pub fn find(&self, id: ToastId) -> Option<&ToastView<M>> {
        self.groups.iter().flatten().find(|view| view.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }
}

impl<M> Default for Snapshot<M> {
    fn default() -> Self {
        Self {
            groups: Default::default(),
        }
    }
}
