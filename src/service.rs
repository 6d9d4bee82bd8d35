// SPDX-License-Identifier: MPL-2.0
//! Async driver for a notification [`Manager`].
//!
//! The manager itself never sleeps. [`ToastService`] owns it inside a tokio
//! task and waits on two things at once: commands arriving from any number of
//! [`ServiceHandle`]s, and the earliest armed deadline. After each wake-up it
//! fires due timers and publishes an owned [`Snapshot`] through a `watch`
//! channel, so renderers only ever see settled state.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use toastkit::notifications::{Manager, ShowOptions, TokioClock};
//! use toastkit::service;
//!
//! let (handle, task) = service::spawn(Manager::with_clock(TokioClock));
//! let id = handle.show("Saved".to_string(), ShowOptions::new()).await.unwrap();
//! assert!(handle.snapshot().find(id).is_some());
//!
//! handle.shutdown().await.unwrap();
//! let last = task.await.unwrap();
//! assert_eq!(last.len(), 1);
//! # }
//! ```

use std::fmt;
use std::time::Instant;

use log::{debug, trace};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep_until;

use crate::notifications::{Manager, ShowOptions, Snapshot, ToastId, TokioClock};

/// Pending commands buffered per service before senders wait.
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// The service task has stopped and can no longer take commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceClosed;

impl fmt::Display for ServiceClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification service has shut down")
    }
}

impl std::error::Error for ServiceClosed {}

/// What travels over the command channel.
enum Request<M> {
    Command(Command<M>),
    Shutdown,
}

/// A state change applied to the manager.
enum Command<M> {
    Show {
        message: M,
        options: ShowOptions,
        reply: oneshot::Sender<ToastId>,
    },
    Dismiss(ToastId),
    PointerEnter(ToastId),
    PointerLeave(ToastId),
    Clear,
}

/// A `show` reply held back until the matching snapshot is published.
type PendingReply = (oneshot::Sender<ToastId>, ToastId);

impl<M> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show { options, .. } => f.debug_struct("Show").field("options", options).finish(),
            Self::Dismiss(id) => f.debug_tuple("Dismiss").field(id).finish(),
            Self::PointerEnter(id) => f.debug_tuple("PointerEnter").field(id).finish(),
            Self::PointerLeave(id) => f.debug_tuple("PointerLeave").field(id).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

/// Cloneable front door to a running [`ToastService`].
pub struct ServiceHandle<M> {
    requests: mpsc::Sender<Request<M>>,
    snapshot: watch::Receiver<Snapshot<M>>,
}

impl<M> Clone for ServiceHandle<M> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<M> ServiceHandle<M> {
    /// Shows a notification and waits for its identifier.
    ///
    /// The identifier arrives only after a snapshot containing the new
    /// toast has been published, so [`ServiceHandle::snapshot`] sees it.
    pub async fn show(&self, message: M, options: ShowOptions) -> Result<ToastId, ServiceClosed> {
        let (reply, id) = oneshot::channel();
        self.send(Command::Show {
            message,
            options,
            reply,
        })
        .await?;
        id.await.map_err(|_| ServiceClosed)
    }

    pub async fn dismiss(&self, id: ToastId) -> Result<(), ServiceClosed> {
        self.send(Command::Dismiss(id)).await
    }

    pub async fn pointer_enter(&self, id: ToastId) -> Result<(), ServiceClosed> {
        self.send(Command::PointerEnter(id)).await
    }

    pub async fn pointer_leave(&self, id: ToastId) -> Result<(), ServiceClosed> {
        self.send(Command::PointerLeave(id)).await
    }

    /// Removes every toast without exit transitions.
    pub async fn clear(&self) -> Result<(), ServiceClosed> {
        self.send(Command::Clear).await
    }

    /// Stops the service even while other handles are alive.
    pub async fn shutdown(&self) -> Result<(), ServiceClosed> {
        self.requests
            .send(Request::Shutdown)
            .await
            .map_err(|_| ServiceClosed)
    }

    /// Receiver notified each time the service publishes new state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<M>> {
        self.snapshot.clone()
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<M>
    where
        M: Clone,
    {
        self.snapshot.borrow().clone()
    }

    async fn send(&self, command: Command<M>) -> Result<(), ServiceClosed> {
        self.requests
            .send(Request::Command(command))
            .await
            .map_err(|_| ServiceClosed)
    }
}

/// Event loop owning a [`Manager`] on tokio time.
pub struct ToastService<M> {
    manager: Manager<M, TokioClock>,
    requests: mpsc::Receiver<Request<M>>,
    snapshot: watch::Sender<Snapshot<M>>,
}

impl<M: Clone> ToastService<M> {
    /// Wraps `manager` and returns the service with its first handle.
    pub fn new(manager: Manager<M, TokioClock>) -> (Self, ServiceHandle<M>) {
        let (request_tx, request_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(manager.snapshot());
        let service = Self {
            manager,
            requests: request_rx,
            snapshot: snapshot_tx,
        };
        let handle = ServiceHandle {
            requests: request_tx,
            snapshot: snapshot_rx,
        };
        (service, handle)
    }

    /// Runs until [`ServiceHandle::shutdown`] or until every handle is
    /// dropped, returning the state at that moment.
    pub async fn run(mut self) -> Snapshot<M> {
        debug!("notification service started");
        loop {
            let deadline = self.manager.next_deadline();
            let reply = tokio::select! {
                request = self.requests.recv() => match request {
                    Some(Request::Command(command)) => self.apply(command),
                    Some(Request::Shutdown) | None => break,
                },
                () = sleep_until_optional(deadline) => {
                    trace!("notification deadline reached");
                    None
                }
            };
            self.manager.run_due_timers();
            self.snapshot.send_replace(self.manager.snapshot());
            if let Some((reply, id)) = reply {
                // The caller may have given up waiting; the toast stays.
                let _ = reply.send(id);
            }
        }
        debug!(
            "notification service stopped with {} active toasts",
            self.manager.len()
        );
        self.manager.snapshot()
    }

    fn apply(&mut self, command: Command<M>) -> Option<PendingReply> {
        trace!("notification command: {command:?}");
        match command {
            Command::Show {
                message,
                options,
                reply,
            } => {
                let id = self.manager.show(message, options);
                return Some((reply, id));
            }
            Command::Dismiss(id) => {
                self.manager.dismiss(id);
            }
            Command::PointerEnter(id) => {
                self.manager.pointer_enter(id);
            }
            Command::PointerLeave(id) => {
                self.manager.pointer_leave(id);
            }
            Command::Clear => {
                self.manager.clear();
            }
        }
        None
    }
}

/// Spawns a [`ToastService`] on the current runtime.
pub fn spawn<M>(manager: Manager<M, TokioClock>) -> (ServiceHandle<M>, JoinHandle<Snapshot<M>>)
where
    M: Clone + Send + Sync + 'static,
{
    let (service, handle) = ToastService::new(manager);
    (handle, tokio::spawn(service.run()))
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}
