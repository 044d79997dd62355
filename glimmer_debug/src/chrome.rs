// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Only trigger events carry a host time. Every other event is stamped with
//! the time of the most recent trigger before it (zero if none), so updates
//! started through [`Surface::drive`](glimmer_core::surface::Surface::drive)
//! line up with the trigger that fired them. Device events use the device's
//! slot index as the thread id.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use glimmer_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Trigger times are converted to microseconds using the provided
/// [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::TriggerFired(e) => {
                ts = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Trigger",
                    "cat": "Trigger",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "flush_all": e.flush_all,
                    }
                }));
            }
            RecordedEvent::UpdateBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Update",
                    "cat": "Surface",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "update_index": e.update_index,
                        "device_count": e.device_count,
                        "flush_all": e.flush_all,
                        "layout_events_dropped": e.layout_events_dropped,
                    }
                }));
            }
            RecordedEvent::DeviceFlush(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DeviceFlush",
                    "cat": "Device",
                    "ts": ts,
                    "pid": 0,
                    "tid": e.device.index(),
                    "s": "t",
                    "args": {
                        "update_index": e.update_index,
                        "generation": e.device.generation(),
                        "leds_written": e.leds_written,
                        "full_flush": e.full_flush,
                    }
                }));
            }
            RecordedEvent::DeviceFailure(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DeviceFailure",
                    "cat": "Device",
                    "ts": ts,
                    "pid": 0,
                    "tid": e.device.index(),
                    "s": "t",
                    "args": {
                        "update_index": e.update_index,
                        "generation": e.device.generation(),
                        "kind": format!("{:?}", e.kind),
                    }
                }));
            }
            RecordedEvent::UpdateSummary(s) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Update",
                    "cat": "Surface",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "update_index": s.update_index,
                        "devices_updated": s.devices_updated,
                        "devices_failed": s.devices_failed,
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "LedsWritten",
                    "ts": ts,
                    "pid": 0,
                    "args": {
                        "leds": s.leds_written,
                    }
                }));
            }
            RecordedEvent::Layout(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.change),
                    "cat": "Layout",
                    "ts": ts,
                    "pid": 0,
                    "tid": e.device.index(),
                    "s": "p",
                    "args": {
                        "update_index": e.update_index,
                        "bounds": [e.bounds.x0, e.bounds.y0, e.bounds.x1, e.bounds.y1],
                    }
                }));
            }
            RecordedEvent::LedChangesCount {
                update_index,
                device,
                count,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LedChanges",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": device.index(),
                    "s": "t",
                    "args": {
                        "update_index": update_index,
                        "count": count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}
