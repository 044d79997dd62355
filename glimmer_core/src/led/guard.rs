// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guarded mutable access to a single LED.

use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use crate::color::Color;
use crate::observer::{LedProperty, Observers, PropertyObserver};

use super::element::Led;
use super::shape::Shape;

/// Mutable access to one LED.
///
/// Handed out by [`Device`](crate::device::Device) and
/// [`Surface`](crate::surface::Surface) lookups. Every mutation that changes
/// a value notifies the owning device's property observers before returning.
/// Reads are available through `Deref<Target = Led>`.
pub struct LedMut<'a> {
    led: &'a mut Led,
    observers: &'a mut Observers<dyn PropertyObserver>,
}

impl<'a> LedMut<'a> {
    pub(crate) fn new(led: &'a mut Led, observers: &'a mut Observers<dyn PropertyObserver>) -> Self {
        Self { led, observers }
    }

    fn notify(&mut self, changed: bool, property: LedProperty) {
        if changed {
            self.observers.led_changed(self.led.id(), property);
        }
    }

    /// Composites `applied` over the pending color.
    ///
    /// Silently ignored while the LED is locked.
    pub fn color(&mut self, applied: Color) -> &mut Self {
        let changed = self.led.apply_color(applied);
        self.notify(changed, LedProperty::RequestedColor);
        self
    }

    /// Sets whether incoming color writes are dropped.
    pub fn set_locked(&mut self, locked: bool) -> &mut Self {
        let changed = self.led.set_locked(locked);
        self.notify(changed, LedProperty::Locked);
        self
    }

    /// Replaces the outline shape.
    pub fn set_shape(&mut self, shape: Shape) -> &mut Self {
        let changed = self.led.set_shape(shape);
        self.notify(changed, LedProperty::Shape);
        self
    }

    /// Replaces the custom outline data.
    pub fn set_shape_data(&mut self, data: Option<String>) -> &mut Self {
        let changed = self.led.set_shape_data(data);
        self.notify(changed, LedProperty::ShapeData);
        self
    }

    /// Replaces the image reference.
    pub fn set_image(&mut self, image: Option<String>) -> &mut Self {
        let changed = self.led.set_image(image);
        self.notify(changed, LedProperty::Image);
        self
    }
}

impl Deref for LedMut<'_> {
    type Target = Led;

    fn deref(&self) -> &Led {
        self.led
    }
}

impl fmt::Debug for LedMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LedMut").field(&*self.led).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use std::sync::Mutex;

    use super::*;
    use crate::device::LedLayout;
    use crate::geometry::Rect;
    use crate::led::{LedId, VendorId};

    struct Log(Arc<Mutex<Vec<LedProperty>>>);

    impl PropertyObserver for Log {
        fn on_led_changed(&mut self, _led: LedId, property: LedProperty) {
            self.0.lock().unwrap().push(property);
        }
    }

    fn fixture() -> (Led, Observers<dyn PropertyObserver>, Arc<Mutex<Vec<LedProperty>>>) {
        let led = Led::from_layout(LedLayout::new(
            LedId::new(VendorId(2), 9),
            Rect::from_origin_size((0.0, 0.0), (4.0, 4.0)),
        ));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers: Observers<dyn PropertyObserver> = Observers::new();
        observers.subscribe(Box::new(Log(Arc::clone(&seen))));
        (led, observers, seen)
    }

    #[test]
    fn effective_mutations_notify() {
        let (mut led, mut observers, seen) = fixture();
        LedMut::new(&mut led, &mut observers)
            .color(Color::WHITE)
            .set_locked(true)
            .set_shape(Shape::Circle)
            .set_shape_data(Some("M0 0".to_string()))
            .set_image(Some("key.png".to_string()));

        assert_eq!(
            *seen.lock().unwrap(),
            [
                LedProperty::RequestedColor,
                LedProperty::Locked,
                LedProperty::Shape,
                LedProperty::ShapeData,
                LedProperty::Image,
            ]
        );
        assert_eq!(led.shape(), Shape::Circle);
        assert_eq!(led.shape_data(), Some("M0 0"));
        assert_eq!(led.image(), Some("key.png"));
    }

    #[test]
    fn no_op_mutations_are_silent() {
        let (mut led, mut observers, seen) = fixture();
        let mut guard = LedMut::new(&mut led, &mut observers);
        guard.set_locked(false).set_shape(Shape::Rectangle);
        guard.color(Color::TRANSPARENT);
        guard.set_locked(true).color(Color::WHITE);

        assert_eq!(*seen.lock().unwrap(), [LedProperty::Locked]);
        assert!(!guard.is_dirty(), "locked write was dropped");
    }
}
