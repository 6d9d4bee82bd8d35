// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

/// Journal capacity bounds (16 to 4096 events).
pub mod buffer_capacity_bounds {
    /// Minimum journal capacity.
    pub const MIN: usize = 16;
    /// Maximum journal capacity.
    pub const MAX: usize = 4096;
    /// Default journal capacity.
    pub const DEFAULT: usize = 256;
}

/// Number of lifecycle events retained by the diagnostics journal.
///
/// Out-of-range values are clamped rather than rejected, so a hand-edited
/// config file can never make the journal unbounded or empty.
///
/// ```
/// use toastkit::domain::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(512).value(), 512);
/// assert_eq!(BufferCapacity::new(1).value(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}
