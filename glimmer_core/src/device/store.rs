// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device construction, placement, and observer management.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::backend::LedWriter;
use crate::error::LayoutError;
use crate::geometry::{Point, Rect, Size};
use crate::led::{Led, LedId};
use crate::observer::{DeviceProperty, ObserverId, Observers, PropertyObserver};

use super::info::DeviceInfo;
use super::layout::{DeviceLayout, LayoutProvider};

/// One physical lighting unit and the LEDs it owns.
///
/// The LED set, their ids, and their rectangles are fixed at construction.
pub struct Device {
    pub(super) info: DeviceInfo,
    pub(super) location: Point,
    pub(super) size: Size,
    pub(super) leds: Vec<Led>,
    pub(super) index: HashMap<LedId, usize>,
    pub(super) writer: Box<dyn LedWriter>,
    pub(super) observers: Observers<dyn PropertyObserver>,
    pub(super) last_write_failed: bool,
}

impl Device {
    /// Builds a device at the origin from a layout and a hardware writer.
    ///
    /// Without an explicit layout size, the size spans from the device
    /// origin to the far corner of the LED bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateLed`] if two records share an id and
    /// [`LayoutError::NegativeSize`] if any extent is negative or not finite.
    pub fn new(
        info: DeviceInfo,
        layout: DeviceLayout,
        writer: Box<dyn LedWriter>,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;
        let size = layout.resolved_size();

        let mut index = HashMap::with_capacity(layout.leds.len());
        let mut leds = Vec::with_capacity(layout.leds.len());
        for (i, record) in layout.leds.into_iter().enumerate() {
            index.insert(record.id, i);
            leds.push(Led::from_layout(record));
        }

        Ok(Self {
            info,
            location: Point::ORIGIN,
            size,
            leds,
            index,
            writer,
            observers: Observers::new(),
            last_write_failed: false,
        })
    }

    /// Builds a device from its hardware-reported layout, applying the
    /// provider's override layout for `info` when there is one.
    ///
    /// # Errors
    ///
    /// See [`Device::new`].
    pub fn from_provider(
        info: DeviceInfo,
        hardware: DeviceLayout,
        provider: &dyn LayoutProvider,
        writer: Box<dyn LedWriter>,
    ) -> Result<Self, LayoutError> {
        let layout = match provider.layout(&info) {
            Some(overrides) => DeviceLayout::merge(hardware, overrides),
            None => hardware,
        };
        Self::new(info, layout, writer)
    }

    /// Places the device before it is added to a surface.
    #[must_use]
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    // -- Accessors --

    /// Returns the identity metadata.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns the device origin in surface coordinates.
    #[must_use]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Returns the device size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the device rectangle in surface coordinates.
    #[must_use]
    pub fn rectangle(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size)
    }

    /// Returns all LEDs in layout order.
    #[must_use]
    pub fn leds(&self) -> &[Led] {
        &self.leds
    }

    /// Returns the number of LEDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    /// Returns `true` if the device has no LEDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// Returns `true` if the device has an LED with the given id.
    #[must_use]
    pub fn contains(&self, id: LedId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the number of LEDs with a pending color change.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.leds.iter().filter(|l| l.is_dirty()).count()
    }

    /// Returns `true` if the most recent hardware write failed.
    #[must_use]
    pub fn last_write_failed(&self) -> bool {
        self.last_write_failed
    }

    // -- Placement --

    /// Moves the device origin. Only the surface may call this so that its
    /// bounds stay in sync.
    pub(crate) fn set_location(&mut self, location: Point) -> bool {
        if self.location == location {
            return false;
        }
        self.location = location;
        self.observers.device_changed(DeviceProperty::Location);
        true
    }

    // -- Observers --

    /// Subscribes to property changes of this device and its LEDs.
    pub fn observe(&mut self, observer: Box<dyn PropertyObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Removes a property observer. Returns `false` if it was not subscribed.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id).is_some()
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("info", &self.info)
            .field("location", &self.location)
            .field("size", &self.size)
            .field("leds", &self.leds.len())
            .field("observers", &self.observers)
            .field("last_write_failed", &self.last_write_failed)
            .finish_non_exhaustive()
    }
}
