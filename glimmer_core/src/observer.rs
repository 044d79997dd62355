// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications for presentation layers.
//!
//! Two kinds of observers exist:
//!
//! - [`PropertyObserver`] is attached to a single device and hears about
//!   LED property mutations and device relocation.
//! - [`LayoutObserver`] is attached to the surface and hears about device
//!   membership and placement changes.
//!
//! Both are notified synchronously, after the mutation has been fully
//! applied, in subscription order. The core's own correctness never depends
//! on them. Observers are `Send` so devices and surfaces can move between
//! threads with their subscriptions.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::geometry::Rect;
use crate::led::LedId;
use crate::surface::DeviceHandle;

/// An observable property of a LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedProperty {
    /// The pending color changed (a write was composited).
    RequestedColor,
    /// The committed color changed (an update or reset).
    Color,
    /// The outline shape changed.
    Shape,
    /// The custom outline data changed.
    ShapeData,
    /// The lock flag changed.
    Locked,
    /// The image reference changed.
    Image,
}

/// An observable property of a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceProperty {
    /// The device origin moved on the surface.
    Location,
}

/// Receives property changes from one device and its LEDs.
pub trait PropertyObserver: Send {
    /// Called after a property of the LED `led` changed.
    fn on_led_changed(&mut self, led: LedId, property: LedProperty) {
        _ = (led, property);
    }

    /// Called after a property of the device itself changed.
    fn on_device_changed(&mut self, property: DeviceProperty) {
        _ = property;
    }
}

/// Payload of a layout-changed notification.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutChangedEvent {
    /// The devices the change concerns.
    pub devices: Vec<DeviceHandle>,
    /// A device was added (as opposed to removed or moved).
    pub device_added: bool,
    /// A device's location changed.
    pub device_location_changed: bool,
    /// Surface bounds after the change.
    pub bounds: Rect,
}

/// Receives surface layout changes.
pub trait LayoutObserver: Send {
    /// Called after a device was added, removed, or moved.
    fn on_layout_changed(&mut self, event: &LayoutChangedEvent);
}

impl<F> LayoutObserver for F
where
    F: FnMut(&LayoutChangedEvent) + Send,
{
    fn on_layout_changed(&mut self, event: &LayoutChangedEvent) {
        self(event);
    }
}

/// Token returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

impl fmt::Debug for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}

/// An ordered list of subscribed observers.
pub struct Observers<T: ?Sized> {
    entries: Vec<(ObserverId, Box<T>)>,
    next: u32,
}

impl<T: ?Sized> Observers<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    /// Adds an observer and returns its id.
    pub fn subscribe(&mut self, observer: Box<T>) -> ObserverId {
        let id = ObserverId(self.next);
        self.next = self.next.wrapping_add(1);
        self.entries.push((id, observer));
        id
    }

    /// Removes and returns the observer with the given id.
    pub fn unsubscribe(&mut self, id: ObserverId) -> Option<Box<T>> {
        let pos = self.entries.iter().position(|(e, _)| *e == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Returns the number of subscribed observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Observers<dyn PropertyObserver> {
    pub(crate) fn led_changed(&mut self, led: LedId, property: LedProperty) {
        for (_, o) in &mut self.entries {
            o.on_led_changed(led, property);
        }
    }

    pub(crate) fn device_changed(&mut self, property: DeviceProperty) {
        for (_, o) in &mut self.entries {
            o.on_device_changed(property);
        }
    }
}

impl Observers<dyn LayoutObserver> {
    pub(crate) fn layout_changed(&mut self, event: &LayoutChangedEvent) {
        for (_, o) in &mut self.entries {
            o.on_layout_changed(event);
        }
    }
}
