// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device slots, membership, placement, and layout notifications.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::device::Device;
use crate::geometry::{Point, Rect, Size, bounding_box};
use crate::observer::{LayoutChangedEvent, LayoutObserver, ObserverId, Observers};
use crate::trace::LayoutChange;
#[cfg(feature = "trace")]
use crate::trace::LayoutEvent;

use super::config::SurfaceConfig;
use super::id::DeviceHandle;

/// Most layout events held for the next traced update.
#[cfg(feature = "trace")]
pub(super) const MAX_PENDING_LAYOUT: usize = 1024;

/// All devices in one coordinate space.
///
/// Devices are addressed by [`DeviceHandle`]. Removed devices free their
/// slot for reuse, and generation counters reject stale handles.
#[derive(Debug)]
pub struct Surface {
    // -- Allocation --
    pub(super) slots: Vec<Option<Device>>,
    pub(super) generation: Vec<u32>,
    pub(super) free_list: Vec<u32>,

    // -- Membership --
    /// Live slot indices in addition order.
    pub(super) order: Vec<u32>,
    pub(super) bounds: Rect,

    pub(super) config: SurfaceConfig,
    pub(super) layout_observers: Observers<dyn LayoutObserver>,
    pub(super) update_index: u64,

    /// Layout changes not yet reported to a tracer.
    #[cfg(feature = "trace")]
    pub(super) pending_layout: Vec<LayoutEvent>,
    /// Layout changes discarded because `pending_layout` was full.
    #[cfg(feature = "trace")]
    pub(super) layout_events_dropped: usize,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Creates an empty surface with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SurfaceConfig::default())
    }

    /// Creates an empty surface with the given configuration.
    #[must_use]
    pub fn with_config(config: SurfaceConfig) -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            bounds: Rect::ZERO,
            config,
            layout_observers: Observers::new(),
            update_index: 0,
            #[cfg(feature = "trace")]
            pending_layout: Vec::new(),
            #[cfg(feature = "trace")]
            layout_events_dropped: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    // -- Membership --

    /// Adds a device at its current location and returns its handle.
    pub fn add_device(&mut self, device: Device) -> DeviceHandle {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on removal.
            self.slots[idx as usize] = Some(device);
            idx
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "device count stays far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Some(device));
            self.generation.push(0);
            idx
        };
        self.order.push(idx);

        let handle = self.handle_at(idx);
        self.recompute_bounds();
        self.layout_changed(handle, LayoutChange::Added);
        handle
    }

    /// Removes a device and returns it with all LEDs reset.
    ///
    /// Returns `None` for a stale handle. The returned device's writer is
    /// still open; call [`Device::release`] to tear it down.
    pub fn remove_device(&mut self, handle: DeviceHandle) -> Option<Device> {
        if !self.contains(handle) {
            return None;
        }
        let idx = handle.idx;
        let mut device = self.slots[idx as usize].take()?;
        device.reset_leds();

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] = self.generation[idx as usize].wrapping_add(1);
        self.free_list.push(idx);
        self.order.retain(|&i| i != idx);

        self.recompute_bounds();
        self.layout_changed(handle, LayoutChange::Removed);
        Some(device)
    }

    /// Moves a device's origin. Returns `false` for a stale handle.
    ///
    /// Observers are notified even if the location did not change.
    pub fn set_location(&mut self, handle: DeviceHandle, location: Point) -> bool {
        let Some(device) = self.device_slot_mut(handle) else {
            return false;
        };
        device.set_location(location);
        self.recompute_bounds();
        self.layout_changed(handle, LayoutChange::Moved);
        true
    }

    /// Removes every device, in addition order, and returns them reset.
    pub fn clear(&mut self) -> Vec<Device> {
        let handles: Vec<DeviceHandle> = self.handles().collect();
        handles
            .into_iter()
            .filter_map(|h| self.remove_device(h))
            .collect()
    }

    // -- Access --

    /// Returns whether the handle refers to a live device.
    #[must_use]
    pub fn contains(&self, handle: DeviceHandle) -> bool {
        let i = handle.idx as usize;
        i < self.slots.len() && self.generation[i] == handle.generation && self.slots[i].is_some()
    }

    /// Returns the device for a handle.
    #[must_use]
    pub fn device(&self, handle: DeviceHandle) -> Option<&Device> {
        if !self.contains(handle) {
            return None;
        }
        self.slots[handle.idx as usize].as_ref()
    }

    /// Returns the device for a handle, mutably.
    ///
    /// Placement is not reachable through this reference; use
    /// [`set_location`](Self::set_location) so bounds stay correct.
    pub fn device_mut(&mut self, handle: DeviceHandle) -> Option<&mut Device> {
        self.device_slot_mut(handle)
    }

    /// Iterates over live devices in addition order.
    pub fn devices(&self) -> impl Iterator<Item = (DeviceHandle, &Device)> + '_ {
        self.order.iter().filter_map(move |&i| {
            self.slots[i as usize]
                .as_ref()
                .map(|d| (self.handle_at(i), d))
        })
    }

    /// Iterates over live devices mutably, in addition order.
    ///
    /// The references are disjoint, so devices can be handed to separate
    /// threads and updated concurrently. As with
    /// [`device_mut`](Self::device_mut), placement is not reachable.
    pub fn devices_mut(&mut self) -> impl Iterator<Item = (DeviceHandle, &mut Device)> + '_ {
        let mut rank = vec![usize::MAX; self.slots.len()];
        for (r, &i) in self.order.iter().enumerate() {
            rank[i as usize] = r;
        }
        let generation = &self.generation;
        let mut live: Vec<(usize, DeviceHandle, &mut Device)> = self
            .slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| {
                let device = slot.as_mut()?;
                let idx = u32::try_from(i).ok()?;
                let handle = DeviceHandle {
                    idx,
                    generation: generation[i],
                };
                Some((rank[i], handle, device))
            })
            .collect();
        live.sort_unstable_by_key(|e| e.0);
        live.into_iter().map(|(_, h, d)| (h, d))
    }

    /// Iterates over live device handles in addition order.
    pub fn handles(&self) -> impl Iterator<Item = DeviceHandle> + '_ {
        self.order.iter().map(move |&i| self.handle_at(i))
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the surface has no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the bounding box of all device rectangles.
    ///
    /// [`Rect::ZERO`] when the surface is empty.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the size of [`bounds`](Self::bounds).
    #[must_use]
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    // -- Observers --

    /// Subscribes to layout changes.
    pub fn subscribe(&mut self, observer: Box<dyn LayoutObserver>) -> ObserverId {
        self.layout_observers.subscribe(observer)
    }

    /// Removes a layout observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.layout_observers.unsubscribe(id).is_some()
    }

    // -- Internals --

    pub(super) fn handle_at(&self, idx: u32) -> DeviceHandle {
        DeviceHandle {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    pub(super) fn device_slot_mut(&mut self, handle: DeviceHandle) -> Option<&mut Device> {
        if !self.contains(handle) {
            return None;
        }
        self.slots[handle.idx as usize].as_mut()
    }

    fn recompute_bounds(&mut self) {
        let slots = &self.slots;
        self.bounds = bounding_box(
            self.order
                .iter()
                .filter_map(|&i| slots[i as usize].as_ref())
                .map(Device::rectangle),
        );
    }

    fn layout_changed(&mut self, handle: DeviceHandle, change: LayoutChange) {
        #[cfg(feature = "trace")]
        self.buffer_layout_event(LayoutEvent {
            update_index: self.update_index,
            device: handle,
            change,
            bounds: self.bounds,
        });

        let event = LayoutChangedEvent {
            devices: vec![handle],
            device_added: change == LayoutChange::Added,
            device_location_changed: change == LayoutChange::Moved,
            bounds: self.bounds,
        };
        self.layout_observers.layout_changed(&event);
    }

    /// Queues a layout event for the next traced update.
    ///
    /// A move directly following a move of the same device replaces it. Once
    /// [`MAX_PENDING_LAYOUT`] events are queued, further events are counted
    /// and dropped.
    #[cfg(feature = "trace")]
    fn buffer_layout_event(&mut self, event: LayoutEvent) {
        if event.change == LayoutChange::Moved
            && let Some(last) = self.pending_layout.last_mut()
            && last.change == LayoutChange::Moved
            && last.device == event.device
        {
            *last = event;
            return;
        }
        if self.pending_layout.len() >= MAX_PENDING_LAYOUT {
            self.layout_events_dropped = self.layout_events_dropped.saturating_add(1);
            return;
        }
        self.pending_layout.push(event);
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::backend::DiscardWriter;
    use crate::color::Color;
    use crate::device::{DeviceInfo, DeviceType};
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

    fn recorder(surface: &mut Surface) -> Arc<Mutex<Vec<LayoutChangedEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        surface.subscribe(Box::new(move |e: &LayoutChangedEvent| {
            sink.lock().unwrap().push(e.clone());
        }));
        seen
    }

    #[test]
    fn empty_surface_has_zero_bounds() {
        let s = Surface::new();
        assert!(s.is_empty());
        assert_eq!(s.bounds(), Rect::ZERO);
        assert_eq!(s.size(), Size::ZERO);
    }

    #[test]
    fn bounds_cover_all_devices() {
        let mut s = Surface::new();
        s.add_device(device(2, (0.0, 0.0)));
        s.add_device(device(1, (50.0, 30.0)));
        assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 60.0, 40.0));
        assert_eq!(s.size(), Size::new(60.0, 40.0));
    }

    #[test]
    fn add_then_remove_restores_bounds_and_notifies_twice() {
        let mut s = Surface::new();
        s.add_device(device(2, (0.0, 0.0)));
        let before = s.size();
        let seen = recorder(&mut s);

        let h = s.add_device(device(3, (100.0, 100.0)));
        assert_ne!(s.size(), before);
        assert!(s.remove_device(h).is_some());
        assert_eq!(s.size(), before);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].device_added && !seen[0].device_location_changed);
        assert!(!seen[1].device_added && !seen[1].device_location_changed);
        assert_eq!(seen[0].devices, [h]);
        assert_eq!(seen[1].bounds.size(), before);
    }

    #[test]
    fn removed_device_comes_back_reset() {
        let mut s = Surface::new();
        let h = s.add_device(device(2, (0.0, 0.0)));
        s.device_mut(h).unwrap().color_all(Color::WHITE);
        s.device_mut(h)
            .unwrap()
            .by_id_mut(led_id(0))
            .unwrap()
            .set_locked(true);

        let d = s.remove_device(h).unwrap();
        assert_eq!(d.dirty_count(), 0);
        assert!(d.leds().iter().all(|l| !l.is_locked()));
    }

    #[test]
    fn stale_handles_are_rejected_after_slot_reuse() {
        let mut s = Surface::new();
        let a = s.add_device(device(1, (0.0, 0.0)));
        s.remove_device(a);
        let b = s.add_device(device(1, (0.0, 0.0)));

        assert_eq!(a.index(), b.index(), "slot reused");
        assert_ne!(a, b);
        assert!(!s.contains(a));
        assert!(s.device(a).is_none());
        assert!(s.remove_device(a).is_none());
        assert!(!s.set_location(a, Point::ORIGIN));
        assert!(s.contains(b));
        assert!(!s.contains(DeviceHandle::INVALID));
    }

    #[test]
    fn set_location_moves_bounds_and_notifies() {
        let mut s = Surface::new();
        let h = s.add_device(device(1, (0.0, 0.0)));
        let seen = recorder(&mut s);

        assert!(s.set_location(h, Point::new(20.0, 5.0)));
        assert_eq!(s.bounds(), Rect::new(20.0, 5.0, 30.0, 15.0));
        assert_eq!(s.device(h).unwrap().location(), Point::new(20.0, 5.0));

        // Unchanged location still notifies.
        s.set_location(h, Point::new(20.0, 5.0));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|e| e.device_location_changed && !e.device_added));
    }

    #[test]
    fn devices_iterate_in_addition_order() {
        let mut s = Surface::new();
        let a = s.add_device(device(1, (0.0, 0.0)));
        let b = s.add_device(device(1, (10.0, 0.0)));
        let c = s.add_device(device(1, (20.0, 0.0)));
        s.remove_device(a);
        let d = s.add_device(device(1, (30.0, 0.0)));

        let order: Vec<DeviceHandle> = s.devices().map(|(h, _)| h).collect();
        assert_eq!(order, [b, c, d]);
        assert_eq!(s.handles().collect::<Vec<_>>(), [b, c, d]);
    }

    #[test]
    fn devices_mut_follows_addition_order() {
        let mut surface = Surface::new();
        let a = surface.add_device(device(1, (0.0, 0.0)));
        let b = surface.add_device(device(2, (30.0, 0.0)));
        surface.remove_device(a);
        // Reuses slot 0 but comes after `b`.
        let c = surface.add_device(device(3, (60.0, 0.0)));

        let seen: Vec<DeviceHandle> = surface.devices_mut().map(|(h, _)| h).collect();
        assert_eq!(seen, [b, c]);

        for (_, d) in surface.devices_mut() {
            d.color_all(Color::WHITE);
        }
        assert!(surface.devices().all(|(_, d)| d.dirty_count() == d.len()));
    }

    #[cfg(feature = "trace")]
    #[derive(Default)]
    struct LayoutLog {
        moves: Vec<LayoutEvent>,
        changes: usize,
        dropped: usize,
    }

    #[cfg(feature = "trace")]
    impl crate::trace::TraceSink for LayoutLog {
        fn on_layout(&mut self, e: &LayoutEvent) {
            self.changes += 1;
            if e.change == LayoutChange::Moved {
                self.moves.push(*e);
            }
        }
        fn on_update_begin(&mut self, e: &crate::trace::UpdateBeginEvent) {
            self.dropped = e.layout_events_dropped;
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn repeated_moves_collapse_to_latest() {
        use crate::trace::Tracer;

        let mut surface = Surface::new();
        let h = surface.add_device(device(2, (0.0, 0.0)));
        for i in 0..100_000_u32 {
            surface.set_location(h, Point::new(f64::from(i % 500), 0.0));
        }
        assert_eq!(surface.pending_layout.len(), 2);

        let mut log = LayoutLog::default();
        surface.update_traced(false, &mut Tracer::new(&mut log));
        assert_eq!(log.changes, 2);
        assert_eq!(log.dropped, 0);
        assert_eq!(log.moves.len(), 1);
        assert_eq!(log.moves[0].bounds, Rect::new(499.0, 0.0, 519.0, 10.0));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn full_layout_buffer_counts_drops() {
        use crate::trace::Tracer;

        let mut surface = Surface::new();
        let a = surface.add_device(device(1, (0.0, 0.0)));
        let b = surface.add_device(device(1, (20.0, 0.0)));
        // Alternating devices defeats coalescing.
        for i in 0..1_000_u32 {
            let x = f64::from(i);
            surface.set_location(a, Point::new(x, 0.0));
            surface.set_location(b, Point::new(x, 20.0));
        }
        assert_eq!(surface.pending_layout.len(), MAX_PENDING_LAYOUT);

        let mut log = LayoutLog::default();
        surface.update_traced(false, &mut Tracer::new(&mut log));
        assert_eq!(log.changes, MAX_PENDING_LAYOUT);
        assert_eq!(log.dropped, 2_002 - MAX_PENDING_LAYOUT);

        let mut log = LayoutLog::default();
        surface.update_traced(false, &mut Tracer::new(&mut log));
        assert_eq!(log.changes, 0);
        assert_eq!(log.dropped, 0, "counter resets after reporting");
    }

    #[test]
    fn clear_empties_surface() {
        let mut s = Surface::new();
        s.add_device(device(1, (0.0, 0.0)));
        s.add_device(device(2, (10.0, 0.0)));
        let seen = recorder(&mut s);

        let removed = s.clear();
        assert_eq!(removed.len(), 2);
        assert!(s.is_empty());
        assert_eq!(s.bounds(), Rect::ZERO);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn unsubscribed_observer_stops_hearing() {
        let mut s = Surface::new();
        let count = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&count);
        let id = s.subscribe(Box::new(move |_: &LayoutChangedEvent| {
            *sink.lock().unwrap() += 1;
        }));
        s.add_device(device(1, (0.0, 0.0)));
        assert!(s.unsubscribe(id));
        s.add_device(device(1, (0.0, 0.0)));
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
