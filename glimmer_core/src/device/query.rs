// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial and id lookup on a device.

use crate::color::Color;
use crate::geometry::{Point, Rect, overlap_percentage};
use crate::led::{Led, LedId, LedMut};

use super::store::Device;

/// Returns `true` if `led_rect` is covered by `region` enough to match.
///
/// Zero overlap never matches, so threshold 0 means "overlaps at all".
fn covered(region: Rect, led_rect: Rect, min_overlay: f64) -> bool {
    let pct = overlap_percentage(region, led_rect);
    pct > 0.0 && pct >= min_overlay
}

impl Device {
    fn to_local_point(&self, p: Point) -> Point {
        p - self.location.to_vec2()
    }

    fn to_local_rect(&self, r: Rect) -> Rect {
        r - self.location.to_vec2()
    }

    fn point_index(&self, p: Point) -> Option<usize> {
        let local = self.to_local_point(p);
        self.leds.iter().position(|l| l.rectangle().contains(local))
    }

    /// Returns the LED with the given id.
    #[must_use]
    pub fn by_id(&self, id: LedId) -> Option<&Led> {
        self.index.get(&id).map(|&i| &self.leds[i])
    }

    /// Returns a mutable guard for the LED with the given id.
    pub fn by_id_mut(&mut self, id: LedId) -> Option<LedMut<'_>> {
        let i = *self.index.get(&id)?;
        Some(LedMut::new(&mut self.leds[i], &mut self.observers))
    }

    /// Returns the first LED, in layout order, containing the surface-space
    /// point `p`.
    #[must_use]
    pub fn by_point(&self, p: Point) -> Option<&Led> {
        self.point_index(p).map(|i| &self.leds[i])
    }

    /// Mutable variant of [`by_point`](Self::by_point).
    pub fn by_point_mut(&mut self, p: Point) -> Option<LedMut<'_>> {
        let i = self.point_index(p)?;
        Some(LedMut::new(&mut self.leds[i], &mut self.observers))
    }

    /// Returns, in layout order, every LED that the surface-space `region`
    /// covers for at least `min_overlay` of the LED's own area.
    pub fn by_region(&self, region: Rect, min_overlay: f64) -> impl Iterator<Item = &Led> + '_ {
        let local = self.to_local_rect(region);
        self.leds
            .iter()
            .filter(move |l| covered(local, l.rectangle(), min_overlay))
    }

    /// Calls `f` with a guard for every LED [`by_region`](Self::by_region)
    /// would return, in the same order. Returns how many LEDs matched.
    pub fn region_mut<F>(&mut self, region: Rect, min_overlay: f64, mut f: F) -> usize
    where
        F: FnMut(LedMut<'_>),
    {
        let local = self.to_local_rect(region);
        let mut matched = 0;
        for led in &mut self.leds {
            if covered(local, led.rectangle(), min_overlay) {
                matched += 1;
                f(LedMut::new(led, &mut self.observers));
            }
        }
        matched
    }

    /// Composites `color` onto every LED in `region`. Returns how many LEDs
    /// matched, locked ones included.
    pub fn color_region(&mut self, region: Rect, min_overlay: f64, color: Color) -> usize {
        self.region_mut(region, min_overlay, |mut led| {
            led.color(color);
        })
    }

    /// Composites `color` onto every LED of the device.
    pub fn color_all(&mut self, color: Color) {
        for led in &mut self.leds {
            LedMut::new(led, &mut self.observers).color(color);
        }
    }
}
