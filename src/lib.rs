// SPDX-License-Identifier: MPL-2.0
//! `toastkit` is the state core of a toast notification system.
//!
//! It keeps the active notifications grouped by screen position, runs each
//! one through a pausable countdown and a timed exit transition, and hands a
//! per-position read model to whatever draws them. Time comes from an
//! injectable [`Clock`](notifications::Clock), so the whole stack can be
//! fast-forwarded deterministically.
//!
//! - [`notifications`] - registry, lifecycle and the `Manager` facade
//! - [`service`] - tokio driver that fires timers and publishes snapshots
//! - [`diagnostics`] - bounded journal of lifecycle events
//! - [`config`] - `settings.toml` defaults
//! - [`console`] - command language of the `toastkit` binary

#![doc(html_root_url = "https://docs.rs/toastkit/0.1.0")]

pub mod config;
pub mod console;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod service;
