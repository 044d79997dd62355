// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface: all devices in one shared coordinate space.
//!
//! A [`Surface`] owns its devices and addresses them through generational
//! [`DeviceHandle`]s that become stale when the device is removed. It:
//!
//! - Keeps devices in **addition order**. Point and region queries fan out
//!   in that order, so the earliest-added device wins a point tie.
//! - Maintains **bounds**, the bounding box of every device rectangle in
//!   surface coordinates, recomputed on every add, remove, and move.
//! - Notifies [`LayoutObserver`](crate::observer::LayoutObserver)s after
//!   each of those mutations.
//! - Drives [`update`](Surface::update) across all devices, isolating
//!   failures: one device's writer error never stops the others.

mod config;
mod id;
mod query;
mod store;
mod update;

pub use config::SurfaceConfig;
pub use id::DeviceHandle;
pub use store::Surface;
pub use update::{DeviceUpdate, SurfaceUpdate};
