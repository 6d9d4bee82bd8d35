// SPDX-License-Identifier: MPL-2.0
//! Membership and display order of active toasts.
//!
//! The registry owns every live [`Toast`] and the per-position order they
//! were shown in. It knows nothing about time; the lifecycle decides when a
//! record leaves.

use std::collections::HashMap;

use super::notification::{Position, Toast, ToastId};

/// Active toasts, grouped by [`Position`] in insertion order.
#[derive(Debug)]
pub struct Registry<M> {
    next_id: u64,
    toasts: HashMap<ToastId, Toast<M>>,
    /// One ordered group per anchor, indexed by [`Position::index`].
    groups: [Vec<ToastId>; 6],
}

impl<M> Registry<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            toasts: HashMap::new(),
            groups: Default::default(),
        }
    }

    /// Stores a record under a fresh id, at the end of its position group.
    pub fn add(&mut self, mut toast: Toast<M>) -> ToastId {
        let id = ToastId::from_raw(self.next_id);
        self.next_id += 1;
        toast.id = id;
        self.groups[toast.position().index()].push(id);
        self.toasts.insert(id, toast);
        id
    }

    /// Deletes a record. An unknown id is not an error: duplicate dismisses
    /// land here.
    pub fn remove(&mut self, id: ToastId) -> Option<Toast<M>> {
        let toast = self.toasts.remove(&id)?;
        let group = &mut self.groups[toast.position().index()];
        if let Some(slot) = group.iter().position(|&member| member == id) {
            group.remove(slot);
        }
        Some(toast)
    }

    /// Live records at `position`, first shown first.
    pub fn list_by_position(&self, position: Position) -> impl Iterator<Item = &Toast<M>> {
        self.groups[position.index()]
            .iter()
            .filter_map(|id| self.toasts.get(id))
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast<M>> {
        self.toasts.get(&id)
    }

    pub fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast<M>> {
        self.toasts.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.toasts.contains_key(&id)
    }

    /// Every live id, position by position in canonical order.
    #[must_use]
    pub fn ids(&self) -> Vec<ToastId> {
        self.groups.iter().flatten().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}
