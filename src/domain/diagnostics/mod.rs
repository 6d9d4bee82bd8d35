// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`BufferCapacity`]: how many lifecycle events the journal keeps

mod newtypes;

pub use newtypes::{buffer_capacity_bounds, BufferCapacity};
