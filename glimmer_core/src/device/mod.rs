// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Devices: one physical lighting unit and the LEDs it owns.
//!
//! A [`Device`] is built once from a [`DeviceLayout`] and keeps its LED set
//! for its whole life. It has:
//!
//! - Identity metadata ([`DeviceInfo`]).
//! - A **location**: the device origin in the surface's coordinate space.
//!   LED rectangles are relative to it; point and region queries translate
//!   into device-local space before matching.
//! - A **size**: either given by the layout or derived from the LED
//!   rectangles at construction.
//! - An ordered LED collection (layout order) with an O(1) id index.
//! - A hardware writer ([`LedWriter`](crate::backend::LedWriter)) that
//!   receives the changed LEDs on [`update`](Device::update).
//!
//! # Queries
//!
//! - [`by_id`](Device::by_id): exact id match.
//! - [`by_point`](Device::by_point): first LED, in layout order, whose
//!   rectangle contains the point.
//! - [`by_region`](Device::by_region): every LED whose rectangle is covered
//!   by the region for at least `min_overlay` of its own area. An LED with
//!   no overlap at all never matches, even at threshold 0.
//!
//! Mutable variants return [`LedMut`](crate::led::LedMut) guards so that the
//! device's [`PropertyObserver`](crate::observer::PropertyObserver)s see
//! every change.

mod info;
mod layout;
mod query;
mod store;
mod update;

pub use info::{DeviceInfo, DeviceType};
pub use layout::{DeviceLayout, LayoutProvider, LedLayout};
pub use store::Device;
