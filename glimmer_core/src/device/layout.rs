// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout records a device is built from.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::error::LayoutError;
use crate::geometry::{Rect, Size, bounding_box, is_valid_size};
use crate::led::{LedId, Shape};

use super::info::DeviceInfo;

/// Placement and presentation data for one LED.
#[derive(Clone, Debug, PartialEq)]
pub struct LedLayout {
    /// LED id, unique within the layout.
    pub id: LedId,
    /// Rectangle relative to the device origin.
    pub rect: Rect,
    /// Outline shape.
    pub shape: Shape,
    /// Outline data for [`Shape::Custom`].
    pub shape_data: Option<String>,
    /// Image reference.
    pub image: Option<String>,
}

impl LedLayout {
    /// Creates a rectangular LED record with no shape data or image.
    #[must_use]
    pub fn new(id: LedId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            shape: Shape::Rectangle,
            shape_data: None,
            image: None,
        }
    }

    /// Sets the outline shape.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the custom outline data.
    #[must_use]
    pub fn with_shape_data(mut self, data: impl Into<String>) -> Self {
        self.shape_data = Some(data.into());
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// The ordered LED records of a device plus an optional explicit size.
///
/// Record order becomes the device's LED order, which decides `by_point`
/// ties and `by_region` result order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceLayout {
    /// Explicit device size. Derived from the LED rectangles when `None`.
    pub size: Option<Size>,
    /// LED records in layout order.
    pub leds: Vec<LedLayout>,
}

impl DeviceLayout {
    /// Creates an empty layout without an explicit size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Appends an LED record.
    #[must_use]
    pub fn with_led(mut self, led: LedLayout) -> Self {
        self.leds.push(led);
        self
    }

    /// Applies `overrides` on top of a hardware-reported `defaults` layout.
    ///
    /// The result keeps exactly the LEDs of `defaults`, in their order. For
    /// every id that `overrides` also lists, the rectangle and shape are taken
    /// from the override, and shape data and image are taken from it when
    /// present. Override records for ids the hardware did not report are
    /// dropped. An explicit override size wins over the default one.
    #[must_use]
    pub fn merge(defaults: Self, overrides: Self) -> Self {
        let by_id: HashMap<LedId, LedLayout> = overrides
            .leds
            .into_iter()
            .map(|led| (led.id, led))
            .collect();

        let leds = defaults
            .leds
            .into_iter()
            .map(|base| match by_id.get(&base.id) {
                Some(o) => LedLayout {
                    id: base.id,
                    rect: o.rect,
                    shape: o.shape,
                    shape_data: o.shape_data.clone().or(base.shape_data),
                    image: o.image.clone().or(base.image),
                },
                None => base,
            })
            .collect();

        Self {
            size: overrides.size.or(defaults.size),
            leds,
        }
    }

    /// Checks ids for uniqueness and extents for sign.
    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        if self.size.is_some_and(|s| !is_valid_size(s)) {
            return Err(LayoutError::NegativeSize);
        }
        let mut seen = HashSet::with_capacity(self.leds.len());
        for led in &self.leds {
            if !is_valid_size(led.rect.size()) {
                return Err(LayoutError::NegativeSize);
            }
            if !seen.insert(led.id) {
                return Err(LayoutError::DuplicateLed(led.id));
            }
        }
        Ok(())
    }

    /// Returns the explicit size, or the extent from the device origin to
    /// the far corner of the LED bounding box.
    #[must_use]
    pub fn resolved_size(&self) -> Size {
        self.size.unwrap_or_else(|| {
            let bb = bounding_box(self.leds.iter().map(|l| l.rect));
            Size::new(bb.x1.max(0.0), bb.y1.max(0.0))
        })
    }
}

/// Supplies per-device layout overrides at construction time.
///
/// Typically backed by layout files shipped per device model. Returning
/// `None` means the hardware-reported layout is used unchanged.
pub trait LayoutProvider {
    /// Returns the override layout for `info`, if one exists.
    fn layout(&self, info: &DeviceInfo) -> Option<DeviceLayout>;
}
