// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Addressable LED elements.
//!
//! An [`Led`] is one colorable cell of a device. It has:
//!
//! - An identity ([`LedId`]): an opaque, hashable, vendor-namespaced code
//!   that is unique within its device.
//! - A fixed rectangle relative to the device origin, plus [`Shape`]
//!   metadata for presentation layers.
//! - A **requested** color that accumulates writes through
//!   [`Color::blend`](crate::color::Color::blend), and a **current** color
//!   that holds the last value pushed to hardware.
//! - A lock flag that silently drops incoming writes while set.
//!
//! # Color lifecycle
//!
//! ```text
//!   Clean (requested == current) ── color() ──► Dirty (requested != current)
//!         ▲                                            │
//!         └────────── device update / commit ──────────┘
//!
//!   reset(): any state ──► Clean at transparent, unlocked
//! ```
//!
//! Dirtiness is derived on every call, never stored. Locking only gates the
//! `color()` transition.
//!
//! LEDs are created by their device and mutated through [`LedMut`], which
//! the device hands out so that property observers see every change.

mod element;
mod guard;
mod id;
mod shape;

pub use element::Led;
pub use guard::LedMut;
pub use id::{LedId, VendorId};
pub use shape::Shape;
