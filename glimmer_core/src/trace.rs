// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the update loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! update-loop instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call) and
//!   the buffering of [`LayoutEvent`]s between updates.
//! - `trace-rich` (implies `trace`): gates [`LedChange`] events plus the
//!   corresponding `TraceSink` method.

use crate::error::WriteErrorKind;
use crate::geometry::Rect;
use crate::surface::DeviceHandle;
use crate::time::HostTime;
#[cfg(feature = "trace-rich")]
use crate::color::Color;
#[cfg(feature = "trace-rich")]
use crate::led::LedId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to a device's place on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutChange {
    /// The device was added.
    Added,
    /// The device was removed.
    Removed,
    /// The device's location was set.
    Moved,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per surface update, before any device is touched.
#[derive(Clone, Copy, Debug)]
pub struct UpdateBeginEvent {
    /// Monotonic update counter.
    pub update_index: u64,
    /// Number of devices on the surface.
    pub device_count: usize,
    /// Whether the caller asked for a full flush.
    pub flush_all: bool,
    /// Layout events discarded since the previous traced update because the
    /// surface's buffer was full.
    pub layout_events_dropped: usize,
}

/// Emitted after a device successfully wrote at least one LED.
#[derive(Clone, Copy, Debug)]
pub struct DeviceFlushEvent {
    /// Update counter.
    pub update_index: u64,
    /// The device.
    pub device: DeviceHandle,
    /// LEDs handed to the writer.
    pub leds_written: usize,
    /// Whether every LED was written, dirty or not.
    pub full_flush: bool,
}

/// Emitted when a device's writer failed.
#[derive(Clone, Copy, Debug)]
pub struct DeviceFailureEvent {
    /// Update counter.
    pub update_index: u64,
    /// The device.
    pub device: DeviceHandle,
    /// Category of the writer error.
    pub kind: WriteErrorKind,
}

/// Per-update totals, emitted last.
#[derive(Clone, Copy, Debug)]
pub struct UpdateSummary {
    /// Update counter.
    pub update_index: u64,
    /// Devices that wrote at least one LED.
    pub devices_updated: usize,
    /// Devices whose writer failed.
    pub devices_failed: usize,
    /// LEDs written across all devices.
    pub leds_written: usize,
}

/// Emitted when an update trigger fires.
#[derive(Clone, Copy, Debug)]
pub struct TriggerFiredEvent {
    /// Host time passed to the trigger.
    pub now: HostTime,
    /// Whether the trigger asked for a full flush.
    pub flush_all: bool,
}

/// A device was added, removed, or moved.
///
/// Buffered by the surface and reported at the start of the next traced
/// update. Consecutive moves of one device collapse into a single event
/// carrying the latest bounds.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// The update the change precedes.
    pub update_index: u64,
    /// The device.
    pub device: DeviceHandle,
    /// What happened.
    pub change: LayoutChange,
    /// Surface bounds right after the change.
    pub bounds: Rect,
}

/// One LED's committed color transition.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedChange {
    /// The LED.
    pub led: LedId,
    /// Color before the update.
    pub from: Color,
    /// Color after the update.
    pub to: Color,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the update loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a surface update.
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        _ = e;
    }

    /// Called after a device wrote LEDs.
    fn on_device_flush(&mut self, e: &DeviceFlushEvent) {
        _ = e;
    }

    /// Called when a device's writer failed.
    fn on_device_failure(&mut self, e: &DeviceFailureEvent) {
        _ = e;
    }

    /// Called with per-update totals.
    fn on_update_summary(&mut self, s: &UpdateSummary) {
        _ = s;
    }

    /// Called when an update trigger fires.
    fn on_trigger_fired(&mut self, e: &TriggerFiredEvent) {
        _ = e;
    }

    /// Called for each buffered layout change.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called with the LEDs a device committed (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_led_changes(&mut self, update_index: u64, device: DeviceHandle, changes: &[LedChange]) {
        _ = (update_index, device, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns `true` if events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits an [`UpdateBeginEvent`].
    #[inline]
    pub fn update_begin(&mut self, e: &UpdateBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeviceFlushEvent`].
    #[inline]
    pub fn device_flush(&mut self, e: &DeviceFlushEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_device_flush(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeviceFailureEvent`].
    #[inline]
    pub fn device_failure(&mut self, e: &DeviceFailureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_device_failure(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UpdateSummary`].
    #[inline]
    pub fn update_summary(&mut self, s: &UpdateSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_update_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`TriggerFiredEvent`].
    #[inline]
    pub fn trigger_fired(&mut self, e: &TriggerFiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_trigger_fired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits committed LED changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn led_changes(&mut self, update_index: u64, device: DeviceHandle, changes: &[LedChange]) {
        if let Some(s) = &mut self.sink {
            s.on_led_changes(update_index, device, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
