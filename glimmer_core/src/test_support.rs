// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

use crate::backend::LedWriter;
use crate::color::Color;
use crate::device::{DeviceLayout, LedLayout};
use crate::error::WriteError;
use crate::geometry::Rect;
use crate::led::{Led, LedId, VendorId};

pub(crate) fn led_id(code: u32) -> LedId {
    LedId::new(VendorId(1), code)
}

/// A single row of `n` 10x10 LEDs starting at the origin, ids `0..n`.
pub(crate) fn keyboard_layout(n: u32) -> DeviceLayout {
    (0..n).fold(DeviceLayout::new(), |layout, i| {
        let x = f64::from(i) * 10.0;
        layout.with_led(LedLayout::new(
            led_id(i),
            Rect::from_origin_size((x, 0.0), (10.0, 10.0)),
        ))
    })
}

#[derive(Debug, Default)]
struct Recorded {
    batches: Vec<Vec<(LedId, Color)>>,
    released: bool,
}

/// Records every batch; clones share the record.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingWriter(Arc<Mutex<Recorded>>);

impl RecordingWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn batches(&self) -> usize {
        self.0.lock().unwrap().batches.len()
    }

    pub(crate) fn last_batch(&self) -> Vec<(LedId, Color)> {
        self.0.lock().unwrap().batches.last().cloned().unwrap_or_default()
    }

    pub(crate) fn released(&self) -> bool {
        self.0.lock().unwrap().released
    }
}

impl LedWriter for RecordingWriter {
    fn write(&mut self, leds: &[&Led]) -> Result<(), WriteError> {
        let batch = leds.iter().map(|l| (l.id(), l.requested_color())).collect();
        self.0.lock().unwrap().batches.push(batch);
        Ok(())
    }

    fn release(&mut self) {
        self.0.lock().unwrap().released = true;
    }
}

#[derive(Debug)]
struct Failing {
    error: Option<WriteError>,
    attempts: usize,
}

/// Fails every write with a fixed error until [`recover`](Self::recover)
/// is called; clones share state.
#[derive(Clone, Debug)]
pub(crate) struct FailingWriter(Arc<Mutex<Failing>>);

impl FailingWriter {
    pub(crate) fn new(error: WriteError) -> Self {
        Self(Arc::new(Mutex::new(Failing {
            error: Some(error),
            attempts: 0,
        })))
    }

    pub(crate) fn attempts(&self) -> usize {
        self.0.lock().unwrap().attempts
    }

    pub(crate) fn recover(&self) {
        self.0.lock().unwrap().error = None;
    }
}

impl LedWriter for FailingWriter {
    fn write(&mut self, leds: &[&Led]) -> Result<(), WriteError> {
        _ = leds;
        let mut state = self.0.lock().unwrap();
        state.attempts += 1;
        match &state.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}
