// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface-wide lookups, fanned out over devices in addition order.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::led::{Led, LedId, LedMut};

use super::id::DeviceHandle;
use super::store::Surface;

impl Surface {
    /// Returns the LED with `id` on the device `handle`.
    #[must_use]
    pub fn led(&self, handle: DeviceHandle, id: LedId) -> Option<&Led> {
        self.device(handle)?.by_id(id)
    }

    /// Returns a mutable guard for the LED with `id` on the device `handle`.
    pub fn led_mut(&mut self, handle: DeviceHandle, id: LedId) -> Option<LedMut<'_>> {
        self.device_slot_mut(handle)?.by_id_mut(id)
    }

    /// Returns the first LED containing `p`, searching devices in addition
    /// order and each device in layout order.
    #[must_use]
    pub fn by_point(&self, p: Point) -> Option<(DeviceHandle, &Led)> {
        self.devices()
            .find_map(|(h, d)| d.by_point(p).map(|led| (h, led)))
    }

    /// Mutable variant of [`by_point`](Self::by_point).
    pub fn by_point_mut(&mut self, p: Point) -> Option<(DeviceHandle, LedMut<'_>)> {
        let handle = self
            .devices()
            .find_map(|(h, d)| d.by_point(p).map(|_| h))?;
        let led = self.device_slot_mut(handle)?.by_point_mut(p)?;
        Some((handle, led))
    }

    /// Returns every LED covered by `region` for at least `min_overlay` of
    /// its own area, devices in addition order, LEDs in layout order.
    pub fn by_region(
        &self,
        region: Rect,
        min_overlay: f64,
    ) -> impl Iterator<Item = (DeviceHandle, &Led)> + '_ {
        self.devices().flat_map(move |(h, d)| {
            d.by_region(region, min_overlay).map(move |led| (h, led))
        })
    }

    /// [`by_region`](Self::by_region) with the configured default threshold.
    pub fn by_region_default(
        &self,
        region: Rect,
    ) -> impl Iterator<Item = (DeviceHandle, &Led)> + '_ {
        self.by_region(region, self.config.default_min_overlay)
    }

    /// Calls `f` for every LED [`by_region`](Self::by_region) would return,
    /// in the same order. Returns how many LEDs matched.
    pub fn region_mut<F>(&mut self, region: Rect, min_overlay: f64, mut f: F) -> usize
    where
        F: FnMut(DeviceHandle, LedMut<'_>),
    {
        let mut matched = 0;
        for k in 0..self.order.len() {
            let idx = self.order[k];
            let handle = self.handle_at(idx);
            if let Some(device) = self.slots[idx as usize].as_mut() {
                matched += device.region_mut(region, min_overlay, |led| f(handle, led));
            }
        }
        matched
    }

    /// Composites `color` onto every LED in `region`. Returns how many LEDs
    /// matched.
    pub fn color_region(&mut self, region: Rect, min_overlay: f64, color: Color) -> usize {
        self.region_mut(region, min_overlay, |_, mut led| {
            led.color(color);
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use super::*;
    use crate::backend::DiscardWriter;
    use crate::device::{Device, DeviceInfo, DeviceType};
    use crate::test_support::{keyboard_layout, led_id};

    fn device(leds: u32, at: (f64, f64)) -> Device {
        Device::new(
            DeviceInfo::new(DeviceType::Keyboard, "Test", "K"),
            keyboard_layout(leds),
            Box::new(DiscardWriter),
        )
        .unwrap()
        .with_location(Point::new(at.0, at.1))
    }

    #[test]
    fn by_point_resolves_translated_led() {
        let mut s = Surface::new();
        let h = s.add_device(device(1, (5.0, 5.0)));
        let (hit, led) = s.by_point(Point::new(7.0, 7.0)).unwrap();
        assert_eq!(hit, h);
        assert_eq!(led.id(), led_id(0));
        assert!(s.by_point(Point::new(20.0, 20.0)).is_none());
    }

    #[test]
    fn earliest_added_device_wins_overlap() {
        let mut s = Surface::new();
        let a = s.add_device(device(1, (0.0, 0.0)));
        let _b = s.add_device(device(1, (5.0, 5.0)));
        assert_eq!(s.by_point(Point::new(7.0, 7.0)).map(|(h, _)| h), Some(a));
    }

    #[test]
    fn by_point_mut_writes_through() {
        let mut s = Surface::new();
        s.add_device(device(2, (0.0, 0.0)));
        let h = s.add_device(device(2, (100.0, 0.0)));
        {
            let (hit, mut led) = s.by_point_mut(Point::new(115.0, 5.0)).unwrap();
            assert_eq!(hit, h);
            led.color(Color::WHITE);
        }
        assert!(s.led(h, led_id(1)).unwrap().is_dirty());
        assert!(!s.led(h, led_id(0)).unwrap().is_dirty());
    }

    #[test]
    fn by_region_spans_devices_in_order() {
        let mut s = Surface::new();
        let a = s.add_device(device(2, (0.0, 0.0)));
        let b = s.add_device(device(2, (20.0, 0.0)));
        let hits: Vec<(DeviceHandle, u32)> = s
            .by_region(Rect::new(10.0, 0.0, 30.0, 10.0), 0.5)
            .map(|(h, l)| (h, l.id().code))
            .collect();
        assert_eq!(hits, [(a, 1), (b, 0)]);
    }

    #[test]
    fn default_threshold_comes_from_config() {
        use crate::surface::SurfaceConfig;

        let region = Rect::new(0.0, 0.0, 13.0, 10.0);
        let mut strict = Surface::new();
        strict.add_device(device(2, (0.0, 0.0)));
        assert_eq!(strict.by_region_default(region).count(), 1);

        let mut loose = Surface::with_config(SurfaceConfig::new().with_default_min_overlay(0.0));
        loose.add_device(device(2, (0.0, 0.0)));
        assert_eq!(loose.by_region_default(region).count(), 2);
    }

    #[test]
    fn color_region_fans_out() {
        let mut s = Surface::new();
        let a = s.add_device(device(2, (0.0, 0.0)));
        let b = s.add_device(device(2, (20.0, 0.0)));
        let n = s.color_region(Rect::new(10.0, 0.0, 30.0, 10.0), 0.5, Color::WHITE);
        assert_eq!(n, 2);
        assert_eq!(s.device(a).unwrap().dirty_count(), 1);
        assert_eq!(s.device(b).unwrap().dirty_count(), 1);
    }

    #[test]
    fn led_lookup_with_stale_handle_is_none() {
        let mut s = Surface::new();
        let h = s.add_device(device(1, (0.0, 0.0)));
        s.remove_device(h);
        assert!(s.led(h, led_id(0)).is_none());
        assert!(s.led_mut(h, led_id(0)).is_none());
    }
}
