// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! Types here are plain `std` so they can be shared by the notification core,
//! the configuration layer and the diagnostics journal without pulling any
//! of them into each other.
//!
//! # Modules
//!
//! - [`diagnostics`]: [`BufferCapacity`](diagnostics::BufferCapacity)
//! - [`notification`]: [`AutoDismiss`](notification::AutoDismiss),
//!   [`ExitDuration`](notification::ExitDuration)

pub mod diagnostics;
pub mod notification;
