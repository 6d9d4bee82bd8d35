// SPDX-License-Identifier: MPL-2.0
//! Toast notification core.
//!
//! Notifications appear temporarily, stack per screen anchor, pause while
//! hovered and fade out before they disappear. This module holds the state
//! behind that behaviour; drawing them is left to the host.
//!
//! # Components
//!
//! - [`notification`] - `Toast` record, `Severity`, `Position`, `Phase`, `ShowOptions`
//! - [`registry`] - `Registry`, active toasts grouped by position
//! - [`lifecycle`] - per-toast countdown / pause / exit state machine
//! - [`timers`] - deadline-ordered `TimerQueue`
//! - [`clock`] - `Clock` capability with wall, tokio and manual sources
//! - [`manager`] - `Manager` facade combining all of the above
//!
//! # Usage
//!
//! ```
//! use toastkit::notifications::{ManualClock, Manager, Phase, Severity, ShowOptions};
//!
//! let clock = ManualClock::new();
//! let mut manager = Manager::with_clock(clock.clone());
//!
//! let id = manager.show(
//!     "Saved",
//!     ShowOptions::new().severity(Severity::Success).duration_ms(3000),
//! );
//!
//! clock.advance_ms(3000);
//! manager.run_due_timers();
//! assert_eq!(manager.phase(id), Some(Phase::Exiting));
//!
//! clock.advance_ms(300);
//! manager.run_due_timers();
//! assert_eq!(manager.phase(id), None);
//! ```

pub mod clock;
pub mod lifecycle;
pub mod manager;
pub mod notification;
pub mod registry;
pub mod timers;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{
    Phase, Position, RemovedCallback, Severity, ShowOptions, Toast, ToastDefaults, ToastId,
    UnknownVariant,
};
pub use registry::Registry;
pub use timers::{TimerId, TimerQueue};
pub use view::{Snapshot, ToastView};
