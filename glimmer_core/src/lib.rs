// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial LED canvas with alpha compositing and incremental device updates.
//!
//! `glimmer_core` models a lighting *surface* made of heterogeneous devices
//! (keyboards, mice, headsets, LED strips). Every device exposes a fixed set
//! of individually colorable LEDs placed in a shared 2-D coordinate space.
//! Client code writes colors per LED, by point, or by region; writes are
//! composited onto a pending color, and only LEDs whose pending color
//! differs from the last committed one are pushed to hardware on update.
//! It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   client writes ──► LedMut::color() ──► Led::requested (blend)
//!                                              │
//!   UpdateTrigger::poll() ──► Surface::update()│
//!                                  │           ▼
//!                                  ├──► Device::update() ── dirty LEDs ──► LedWriter::write()
//!                                  │                                          │
//!                                  │           ┌──────────────────────────────┘
//!                                  │           ▼
//!                                  │      Led::commit() (requested → current)
//!                                  ▼
//!                             SurfaceUpdate (per-device results)
//! ```
//!
//! **[`geometry`]**: Points, sizes, and rectangles (via `kurbo`) plus the
//! overlap and bounding-box math used by spatial queries.
//!
//! **[`color`]**: ARGB color with straight-alpha "over" blending.
//!
//! **[`led`]**: A single addressable LED with pending/current color,
//! derived dirty state, and a lock flag.
//!
//! **[`device`]**: An ordered LED collection owned by one physical unit,
//! with id/point/region lookup and a two-phase update.
//!
//! **[`surface`]**: Aggregates devices into one coordinate space, tracks
//! placement, and drives updates with per-device failure isolation.
//!
//! **[`backend`]**: The [`LedWriter`](backend::LedWriter) trait hardware
//! integrations implement, and the [`DeviceProvider`](backend::DeviceProvider)
//! lifecycle contract.
//!
//! **[`observer`]**: Layout-change and property-change notification traits.
//!
//! **[`trigger`]**: Decides *when* a surface update fires (on demand or
//! periodically).
//!
//! **[`time`]**: Monotonic host time used by triggers and tracing.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! update instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-LED
//!   change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod backend;
pub mod color;
pub mod device;
pub mod error;
pub mod geometry;
pub mod led;
pub mod observer;
pub mod surface;
pub mod time;
pub mod trace;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_support;
