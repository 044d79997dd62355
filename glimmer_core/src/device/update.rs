// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase device update and teardown.
//!
//! [`Device::update`] first hands the pending LEDs to the hardware writer and
//! only commits them once the writer succeeded. A failed write leaves every
//! LED exactly as it was, so the next update retries the same work.

use alloc::vec::Vec;

use crate::error::WriteError;
use crate::led::Led;
use crate::observer::LedProperty;

use super::store::Device;

impl Device {
    /// Returns the LEDs the next [`update`](Self::update) would write, in
    /// layout order: all of them when `flush_all`, otherwise the dirty ones.
    pub fn pending(&self, flush_all: bool) -> impl Iterator<Item = &Led> + '_ {
        self.leds
            .iter()
            .filter(move |l| flush_all || l.is_dirty())
    }

    /// Pushes pending LEDs to the hardware and commits them.
    ///
    /// With nothing pending the writer is not called and `Ok(0)` is
    /// returned. Otherwise returns the number of LEDs written.
    ///
    /// # Errors
    ///
    /// Propagates the writer's [`WriteError`]. Nothing is committed in that
    /// case and the failure is remembered in
    /// [`last_write_failed`](Self::last_write_failed).
    pub fn update(&mut self, flush_all: bool) -> Result<usize, WriteError> {
        let batch: Vec<&Led> = self
            .leds
            .iter()
            .filter(|l| flush_all || l.is_dirty())
            .collect();
        if batch.is_empty() {
            return Ok(0);
        }
        let written = batch.len();

        if let Err(e) = self.writer.write(&batch) {
            self.last_write_failed = true;
            return Err(e);
        }
        self.last_write_failed = false;

        for led in &mut self.leds {
            if led.commit() {
                self.observers.led_changed(led.id(), LedProperty::Color);
            }
        }
        Ok(written)
    }

    /// Resets every LED to clean transparent and unlocked.
    pub fn reset_leds(&mut self) {
        for led in &mut self.leds {
            let changes = led.reset();
            let id = led.id();
            if changes.requested {
                self.observers.led_changed(id, LedProperty::RequestedColor);
            }
            if changes.color {
                self.observers.led_changed(id, LedProperty::Color);
            }
            if changes.locked {
                self.observers.led_changed(id, LedProperty::Locked);
            }
        }
    }

    /// Tears the device down: resets every LED and releases the writer.
    ///
    /// The device stays queryable afterwards, but its writer must not be
    /// used again.
    pub fn release(&mut self) {
        self.reset_leds();
        self.writer.release();
    }
}
