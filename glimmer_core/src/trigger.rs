// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update triggers: deciding *when* a surface update runs.
//!
//! The core never schedules work on its own. A host loop asks an
//! [`UpdateTrigger`] whether to update, passing the current [`HostTime`],
//! and calls [`Surface::update`](crate::surface::Surface::update) (or
//! [`Surface::drive`](crate::surface::Surface::drive), which does both) when
//! it fires.
//!
//! - [`ManualTrigger`] fires once per explicit request (on demand, or from an
//!   event handler).
//! - [`IntervalTrigger`] fires periodically.

use crate::time::{Duration, HostTime};

/// What a fired trigger asks the surface to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateRequest {
    /// Push every LED, dirty or not.
    pub flush_all: bool,
}

/// Decides when updates run.
pub trait UpdateTrigger {
    /// Returns a request if an update should run at `now`.
    fn poll(&mut self, now: HostTime) -> Option<UpdateRequest>;
}

/// Fires once for each batch of explicit requests.
///
/// Requests made between two polls coalesce into one; a flush request wins
/// over a plain one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualTrigger {
    pending: Option<UpdateRequest>,
}

impl ManualTrigger {
    /// Creates a trigger with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Requests an incremental update.
    pub fn request(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(UpdateRequest::default());
        }
    }

    /// Requests a full flush.
    pub fn request_flush(&mut self) {
        self.pending = Some(UpdateRequest { flush_all: true });
    }

    /// Returns `true` if the next poll will fire.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl UpdateTrigger for ManualTrigger {
    fn poll(&mut self, now: HostTime) -> Option<UpdateRequest> {
        _ = now;
        self.pending.take()
    }
}

/// Fires at most once per interval.
///
/// The first poll always fires. Afterwards a poll fires when at least one
/// interval has elapsed since the previous firing. A late poll fires once;
/// missed intervals are not caught up.
#[derive(Clone, Copy, Debug)]
pub struct IntervalTrigger {
    interval: Duration,
    last: Option<HostTime>,
    flush_all: bool,
}

impl IntervalTrigger {
    /// Creates a trigger that fires every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            flush_all: false,
        }
    }

    /// Makes every firing a full flush, for hardware that drops state.
    #[must_use]
    pub const fn flushing(mut self) -> Self {
        self.flush_all = true;
        self
    }

    /// Returns the interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Forgets the last firing so the next poll fires.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl UpdateTrigger for IntervalTrigger {
    fn poll(&mut self, now: HostTime) -> Option<UpdateRequest> {
        if let Some(last) = self.last
            && now.saturating_duration_since(last) < self.interval
        {
            return None;
        }
        self.last = Some(now);
        Some(UpdateRequest {
            flush_all: self.flush_all,
        })
    }
}
