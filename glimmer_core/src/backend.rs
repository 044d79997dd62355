// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for hardware integrations.
//!
//! Vendor-specific work lives outside the core, behind two seams:
//!
//! - **Writer**: Each device owns a [`LedWriter`] that transmits a batch of
//!   changed LEDs to the hardware. The writer decides what to do with fully
//!   transparent LEDs; [`visible_leds`] is available for writers that skip
//!   them.
//!
//! - **Provider**: A [`DeviceProvider`] talks to a vendor SDK, discovers
//!   devices, and builds [`Device`]s with their writers attached. Providers
//!   are ordinary values with an explicit lifecycle
//!   (`initialize` / `reset_devices` / `dispose`); nothing in the core keeps
//!   a global instance.
//!
//! # Update loop pseudocode
//!
//! ```rust,ignore
//! let mut surface = Surface::new();
//! surface.load_devices(&mut provider)?;
//!
//! loop {
//!     // Write: composite colors onto pending state
//!     surface.color_region(region, 0.5, Color::argb(128, 255, 0, 0));
//!
//!     // Flush: when the trigger fires, push dirty LEDs per device
//!     if let Some(report) = surface.drive(&mut trigger, now()) {
//!         for failed in report.failures() {
//!             log_failure(failed);
//!         }
//!     }
//! }
//! ```

use alloc::vec::Vec;

use crate::device::Device;
use crate::error::{ProviderError, WriteError};
use crate::led::Led;

/// Transmits changed LEDs to one device's hardware.
///
/// Called synchronously from [`Device::update`]. A returned error abandons
/// the update for that device: nothing is committed and the LEDs stay dirty.
/// Timeouts and retries are the writer's own policy.
///
/// Writers are `Send` so a [`Device`] can be updated on another thread.
pub trait LedWriter: Send {
    /// Pushes `leds` (current rectangle, requested color) to the hardware.
    ///
    /// The slice is never empty.
    fn write(&mut self, leds: &[&Led]) -> Result<(), WriteError>;

    /// Releases hardware resources. Called once from [`Device::release`].
    fn release(&mut self) {}
}

/// A [`LedWriter`] that accepts every batch and sends it nowhere.
///
/// Useful for virtual devices and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardWriter;

impl LedWriter for DiscardWriter {
    fn write(&mut self, leds: &[&Led]) -> Result<(), WriteError> {
        _ = leds;
        Ok(())
    }
}

/// Returns the LEDs of `batch` whose requested color is not fully
/// transparent.
///
/// Some vendor SDKs treat alpha as meaningless and would light a
/// transparent LED at full brightness; their writers filter first.
pub fn visible_leds<'a>(batch: &[&'a Led]) -> Vec<&'a Led> {
    batch
        .iter()
        .copied()
        .filter(|led| !led.requested_color().is_transparent())
        .collect()
}

/// Discovers devices through a vendor SDK and owns the SDK session.
pub trait DeviceProvider {
    /// Opens the SDK session and returns every device it reports, fully
    /// constructed with writers attached.
    ///
    /// Calling it again after [`dispose`](Self::dispose) starts a new session.
    fn initialize(&mut self) -> Result<Vec<Device>, ProviderError>;

    /// Asks the SDK to restore the devices' own lighting state.
    fn reset_devices(&mut self) {}

    /// Closes the SDK session.
    fn dispose(&mut self) {}
}
