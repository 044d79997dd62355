// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface configuration.

/// Configuration for a [`Surface`](super::Surface).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Threshold used by
    /// [`by_region_default`](super::Surface::by_region_default): the
    /// fraction of an LED's own area a region must cover for it to match.
    pub default_min_overlay: f64,
    /// Flush a device in full on the update after a failed write, since the
    /// hardware may hold any mix of old and new colors.
    pub flush_after_failure: bool,
}

impl SurfaceConfig {
    /// The default configuration: half coverage, flush after failure.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_min_overlay: 0.5,
            flush_after_failure: true,
        }
    }

    /// Sets [`default_min_overlay`](Self::default_min_overlay).
    #[must_use]
    pub const fn with_default_min_overlay(mut self, min_overlay: f64) -> Self {
        self.default_min_overlay = min_overlay;
        self
    }

    /// Sets [`flush_after_failure`](Self::flush_after_failure).
    #[must_use]
    pub const fn with_flush_after_failure(mut self, flush: bool) -> Self {
        self.flush_after_failure = flush;
        self
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
