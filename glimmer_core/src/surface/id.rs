// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device handle type.

use core::fmt;

/// Sentinel slot index meaning "no device".
pub(crate) const INVALID: u32 = u32::MAX;

/// A handle to a device in a [`Surface`](super::Surface).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a device is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl DeviceHandle {
    /// A handle that never refers to a device.
    pub const INVALID: Self = Self {
        idx: INVALID,
        generation: 0,
    };

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Rebuilds a handle from its raw parts, e.g. when decoding a trace.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceHandle({}@gen{})", self.idx, self.generation)
    }
}
