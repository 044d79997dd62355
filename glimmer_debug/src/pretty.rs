// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Trigger
//! times are converted to microseconds using a [`Timebase`].

use std::io::Write;

use glimmer_core::error::WriteErrorKind;
use glimmer_core::surface::DeviceHandle;
use glimmer_core::time::{HostTime, Timebase};
use glimmer_core::trace::{
    DeviceFailureEvent, DeviceFlushEvent, LayoutChange, LayoutEvent, LedChange, TraceSink,
    TriggerFiredEvent, UpdateBeginEvent, UpdateSummary,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            verbose: false,
        }
    }

    /// Also prints one line per committed LED color change.
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        t.to_nanos(self.timebase) as f64 / 1000.0
    }
}

fn device(h: DeviceHandle) -> String {
    format!("{}@{}", h.index(), h.generation())
}

fn failure_name(kind: WriteErrorKind) -> &'static str {
    match kind {
        WriteErrorKind::Disconnected => "disconnected",
        WriteErrorKind::Timeout => "timeout",
        WriteErrorKind::Rejected => "rejected",
    }
}

fn change_name(change: LayoutChange) -> &'static str {
    match change {
        LayoutChange::Added => "added",
        LayoutChange::Removed => "removed",
        LayoutChange::Moved => "moved",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        let _ = write!(
            self.writer,
            "[update] index={} devices={} flush_all={}",
            e.update_index, e.device_count, e.flush_all,
        );
        if e.layout_events_dropped > 0 {
            let _ = write!(self.writer, " dropped_layout={}", e.layout_events_dropped);
        }
        let _ = writeln!(self.writer);
    }

    fn on_device_flush(&mut self, e: &DeviceFlushEvent) {
        let mode = if e.full_flush { "full" } else { "dirty" };
        let _ = writeln!(
            self.writer,
            "[flush] index={} device={} leds={} mode={mode}",
            e.update_index,
            device(e.device),
            e.leds_written,
        );
    }

    fn on_device_failure(&mut self, e: &DeviceFailureEvent) {
        let _ = writeln!(
            self.writer,
            "[failure] index={} device={} error={}",
            e.update_index,
            device(e.device),
            failure_name(e.kind),
        );
    }

    fn on_update_summary(&mut self, s: &UpdateSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] index={} updated={} failed={} leds={}",
            s.update_index, s.devices_updated, s.devices_failed, s.leds_written,
        );
    }

    fn on_trigger_fired(&mut self, e: &TriggerFiredEvent) {
        let _ = writeln!(
            self.writer,
            "[trigger] now={:.1}µs flush_all={}",
            self.host_us(e.now),
            e.flush_all,
        );
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] before={} device={} {} bounds=({:.1}, {:.1})-({:.1}, {:.1})",
            e.update_index,
            device(e.device),
            change_name(e.change),
            e.bounds.x0,
            e.bounds.y0,
            e.bounds.x1,
            e.bounds.y1,
        );
    }

    fn on_led_changes(&mut self, update_index: u64, handle: DeviceHandle, changes: &[LedChange]) {
        let _ = writeln!(
            self.writer,
            "[leds] index={update_index} device={} changes={}",
            device(handle),
            changes.len(),
        );
        if self.verbose {
            for c in changes {
                let _ = writeln!(self.writer, "  {} {} -> {}", c.led, c.from, c.to);
            }
        }
    }
}
