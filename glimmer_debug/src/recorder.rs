// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Counts (`usize` in the event structs) are stored as `u32`, saturating.
//! [`on_led_changes`](TraceSink::on_led_changes) stores only the number of
//! changes.

use glimmer_core::error::WriteErrorKind;
use glimmer_core::geometry::Rect;
use glimmer_core::surface::DeviceHandle;
use glimmer_core::time::HostTime;
use glimmer_core::trace::{
    DeviceFailureEvent, DeviceFlushEvent, LayoutChange, LayoutEvent, LedChange, TraceSink,
    TriggerFiredEvent, UpdateBeginEvent, UpdateSummary,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_UPDATE_BEGIN: u8 = 1;
const TAG_DEVICE_FLUSH: u8 = 2;
const TAG_DEVICE_FAILURE: u8 = 3;
const TAG_UPDATE_SUMMARY: u8 = 4;
const TAG_TRIGGER_FIRED: u8 = 5;
const TAG_LAYOUT: u8 = 6;
const TAG_LED_CHANGES_COUNT: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_count(&mut self, n: usize) {
        self.write_u32(u32::try_from(n).unwrap_or(u32::MAX));
    }

    fn write_handle(&mut self, h: DeviceHandle) {
        self.write_u32(h.index());
        self.write_u32(h.generation());
    }

    fn write_rect(&mut self, r: Rect) {
        self.write_f64(r.x0);
        self.write_f64(r.y0);
        self.write_f64(r.x1);
        self.write_f64(r.y1);
    }

    fn write_error_kind(&mut self, k: WriteErrorKind) {
        self.write_u8(match k {
            WriteErrorKind::Disconnected => 0,
            WriteErrorKind::Timeout => 1,
            WriteErrorKind::Rejected => 2,
        });
    }

    fn write_change(&mut self, c: LayoutChange) {
        self.write_u8(match c {
            LayoutChange::Added => 0,
            LayoutChange::Removed => 1,
            LayoutChange::Moved => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_update_begin(&mut self, e: &UpdateBeginEvent) {
        self.write_u8(TAG_UPDATE_BEGIN);
        self.write_u64(e.update_index);
        self.write_count(e.device_count);
        self.write_bool(e.flush_all);
        self.write_count(e.layout_events_dropped);
    }

    fn on_device_flush(&mut self, e: &DeviceFlushEvent) {
        self.write_u8(TAG_DEVICE_FLUSH);
        self.write_u64(e.update_index);
        self.write_handle(e.device);
        self.write_count(e.leds_written);
        self.write_bool(e.full_flush);
    }

    fn on_device_failure(&mut self, e: &DeviceFailureEvent) {
        self.write_u8(TAG_DEVICE_FAILURE);
        self.write_u64(e.update_index);
        self.write_handle(e.device);
        self.write_error_kind(e.kind);
    }

    fn on_update_summary(&mut self, s: &UpdateSummary) {
        self.write_u8(TAG_UPDATE_SUMMARY);
        self.write_u64(s.update_index);
        self.write_count(s.devices_updated);
        self.write_count(s.devices_failed);
        self.write_count(s.leds_written);
    }

    fn on_trigger_fired(&mut self, e: &TriggerFiredEvent) {
        self.write_u8(TAG_TRIGGER_FIRED);
        self.write_u64(e.now.ticks());
        self.write_bool(e.flush_all);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_u64(e.update_index);
        self.write_handle(e.device);
        self.write_change(e.change);
        self.write_rect(e.bounds);
    }

    fn on_led_changes(&mut self, update_index: u64, device: DeviceHandle, changes: &[LedChange]) {
        self.write_u8(TAG_LED_CHANGES_COUNT);
        self.write_u64(update_index);
        self.write_handle(device);
        self.write_count(changes.len());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// An [`UpdateBeginEvent`].
    UpdateBegin(UpdateBeginEvent),
    /// A [`DeviceFlushEvent`].
    DeviceFlush(DeviceFlushEvent),
    /// A [`DeviceFailureEvent`].
    DeviceFailure(DeviceFailureEvent),
    /// An [`UpdateSummary`].
    UpdateSummary(UpdateSummary),
    /// A [`TriggerFiredEvent`].
    TriggerFired(TriggerFiredEvent),
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
    /// LED-change count for one device in one update.
    LedChangesCount {
        /// Update counter.
        update_index: u64,
        /// The device.
        device: DeviceHandle,
        /// Number of committed LED changes.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag, unknown enum value, or truncated
/// record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_count(&mut self) -> Option<usize> {
        usize::try_from(self.read_u32()?).ok()
    }

    fn read_handle(&mut self) -> Option<DeviceHandle> {
        Some(DeviceHandle::from_raw(self.read_u32()?, self.read_u32()?))
    }

    fn read_rect(&mut self) -> Option<Rect> {
        Some(Rect::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    fn read_error_kind(&mut self) -> Option<WriteErrorKind> {
        match self.read_u8()? {
            0 => Some(WriteErrorKind::Disconnected),
            1 => Some(WriteErrorKind::Timeout),
            2 => Some(WriteErrorKind::Rejected),
            _ => None,
        }
    }

    fn read_change(&mut self) -> Option<LayoutChange> {
        match self.read_u8()? {
            0 => Some(LayoutChange::Added),
            1 => Some(LayoutChange::Removed),
            2 => Some(LayoutChange::Moved),
            _ => None,
        }
    }

    fn decode_update_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::UpdateBegin(UpdateBeginEvent {
            update_index: self.read_u64()?,
            device_count: self.read_count()?,
            flush_all: self.read_bool()?,
            layout_events_dropped: self.read_count()?,
        }))
    }

    fn decode_device_flush(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DeviceFlush(DeviceFlushEvent {
            update_index: self.read_u64()?,
            device: self.read_handle()?,
            leds_written: self.read_count()?,
            full_flush: self.read_bool()?,
        }))
    }

    fn decode_device_failure(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DeviceFailure(DeviceFailureEvent {
            update_index: self.read_u64()?,
            device: self.read_handle()?,
            kind: self.read_error_kind()?,
        }))
    }

    fn decode_update_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::UpdateSummary(UpdateSummary {
            update_index: self.read_u64()?,
            devices_updated: self.read_count()?,
            devices_failed: self.read_count()?,
            leds_written: self.read_count()?,
        }))
    }

    fn decode_trigger_fired(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TriggerFired(TriggerFiredEvent {
            now: HostTime(self.read_u64()?),
            flush_all: self.read_bool()?,
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            update_index: self.read_u64()?,
            device: self.read_handle()?,
            change: self.read_change()?,
            bounds: self.read_rect()?,
        }))
    }

    fn decode_led_changes_count(&mut self) -> Option<RecordedEvent> {
        let update_index = self.read_u64()?;
        let device = self.read_handle()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::LedChangesCount {
            update_index,
            device,
            count,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_UPDATE_BEGIN => self.decode_update_begin(),
            TAG_DEVICE_FLUSH => self.decode_device_flush(),
            TAG_DEVICE_FAILURE => self.decode_device_failure(),
            TAG_UPDATE_SUMMARY => self.decode_update_summary(),
            TAG_TRIGGER_FIRED => self.decode_trigger_fired(),
            TAG_LAYOUT => self.decode_layout(),
            TAG_LED_CHANGES_COUNT => self.decode_led_changes_count(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use glimmer_core::color::Color;
    use glimmer_core::led::{LedId, VendorId};

    use super::*;

    fn handle() -> DeviceHandle {
        DeviceHandle::from_raw(3, 2)
    }

    #[test]
    fn device_flush_survives_recording() {
        let mut rec = RecorderSink::new();
        rec.on_device_flush(&DeviceFlushEvent {
            update_index: 9,
            device: handle(),
            leds_written: 104,
            full_flush: true,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::DeviceFlush(e) => {
                assert_eq!(e.update_index, 9);
                assert_eq!(e.device, handle());
                assert_eq!(e.leds_written, 104);
                assert!(e.full_flush);
            }
            other => panic!("expected DeviceFlush, got {other:?}"),
        }
    }

    #[test]
    fn layout_event_keeps_bounds_and_change() {
        let mut rec = RecorderSink::new();
        rec.on_layout(&LayoutEvent {
            update_index: 1,
            device: handle(),
            change: LayoutChange::Removed,
            bounds: Rect::new(-5.0, 0.0, 120.5, 20.0),
        });

        match decode(rec.as_bytes()).next() {
            Some(RecordedEvent::Layout(e)) => {
                assert_eq!(e.change, LayoutChange::Removed);
                assert_eq!(e.bounds, Rect::new(-5.0, 0.0, 120.5, 20.0));
                assert_eq!(e.device, handle());
            }
            other => panic!("expected Layout, got {other:?}"),
        }
    }

    #[test]
    fn failure_kind_is_preserved() {
        let mut rec = RecorderSink::new();
        for kind in [
            WriteErrorKind::Disconnected,
            WriteErrorKind::Timeout,
            WriteErrorKind::Rejected,
        ] {
            rec.on_device_failure(&DeviceFailureEvent {
                update_index: 0,
                device: handle(),
                kind,
            });
        }
        let kinds: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::DeviceFailure(f) => f.kind,
                other => panic!("expected DeviceFailure, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                WriteErrorKind::Disconnected,
                WriteErrorKind::Timeout,
                WriteErrorKind::Rejected
            ]
        );
    }

    #[test]
    fn unknown_enum_byte_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_trigger_fired(&TriggerFiredEvent {
            now: HostTime(5),
            flush_all: false,
        });
        rec.on_device_failure(&DeviceFailureEvent {
            update_index: 0,
            device: handle(),
            kind: WriteErrorKind::Timeout,
        });
        let mut bytes = rec.into_bytes();
        // The error kind is the last byte of a failure record.
        *bytes.last_mut().unwrap() = 9;
        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RecordedEvent::TriggerFired(_)));

        let mut rec = RecorderSink::new();
        rec.on_layout(&LayoutEvent {
            update_index: 0,
            device: handle(),
            change: LayoutChange::Added,
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
        });
        let mut bytes = rec.into_bytes();
        // tag, update index, handle, then the change byte.
        bytes[1 + 8 + 8] = 3;
        assert_eq!(decode(&bytes).count(), 0);
    }

    #[test]
    fn dropped_layout_count_is_recorded() {
        let mut rec = RecorderSink::new();
        rec.on_update_begin(&UpdateBeginEvent {
            update_index: 3,
            device_count: 1,
            flush_all: false,
            layout_events_dropped: 42,
        });
        match decode(rec.as_bytes()).next() {
            Some(RecordedEvent::UpdateBegin(e)) => {
                assert_eq!(e.update_index, 3);
                assert_eq!(e.layout_events_dropped, 42);
            }
            other => panic!("expected UpdateBegin, got {other:?}"),
        }
    }

    #[test]
    fn full_update_sequence_decodes_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_trigger_fired(&TriggerFiredEvent {
            now: HostTime(1_000),
            flush_all: false,
        });
        rec.on_update_begin(&UpdateBeginEvent {
            update_index: 0,
            device_count: 2,
            flush_all: false,
            layout_events_dropped: 0,
        });
        rec.on_led_changes(
            0,
            handle(),
            &[LedChange {
                led: LedId::new(VendorId(1), 1),
                from: Color::TRANSPARENT,
                to: Color::WHITE,
            }],
        );
        rec.on_update_summary(&UpdateSummary {
            update_index: 0,
            devices_updated: 1,
            devices_failed: 0,
            leds_written: 1,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::TriggerFired(_)));
        assert!(matches!(events[1], RecordedEvent::UpdateBegin(_)));
        assert!(matches!(
            events[2],
            RecordedEvent::LedChangesCount { count: 1, .. }
        ));
        match &events[3] {
            RecordedEvent::UpdateSummary(s) => {
                assert_eq!(s.devices_updated, 1);
                assert_eq!(s.leds_written, 1);
            }
            other => panic!("expected UpdateSummary, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_trigger_fired(&TriggerFiredEvent {
            now: HostTime(5),
            flush_all: true,
        });
        rec.on_trigger_fired(&TriggerFiredEvent {
            now: HostTime(6),
            flush_all: true,
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn clear_discards_recording() {
        let mut rec = RecorderSink::new();
        rec.on_update_begin(&UpdateBeginEvent {
            update_index: 0,
            device_count: 0,
            flush_all: false,
            layout_events_dropped: 0,
        });
        assert!(!rec.as_bytes().is_empty());
        rec.clear();
        assert!(rec.as_bytes().is_empty());
    }
}
