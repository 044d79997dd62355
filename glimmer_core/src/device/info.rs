// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device identity and category metadata.

use alloc::string::String;
use core::fmt;

/// Broad category of a lighting device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Not reported by the vendor.
    #[default]
    Unknown,
    /// A keyboard.
    Keyboard,
    /// A mouse.
    Mouse,
    /// A headset.
    Headset,
    /// A mousepad.
    Mousepad,
    /// A free-standing LED strip.
    LedStripe,
}

/// Identity metadata of a device, as reported by its provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeviceInfo {
    /// Device category.
    pub device_type: DeviceType,
    /// Vendor name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Stable index assigned by the provider (distinguishes identical models).
    pub index: u32,
    /// Image reference for presentation layers.
    pub image: Option<String>,
}

impl DeviceInfo {
    /// Creates device metadata with index 0 and no image.
    #[must_use]
    pub fn new(
        device_type: DeviceType,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            device_type,
            manufacturer: manufacturer.into(),
            model: model.into(),
            index: 0,
            image: None,
        }
    }

    /// Sets the provider index.
    #[must_use]
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.model)
    }
}
