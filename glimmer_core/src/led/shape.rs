// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LED outline metadata.

/// The outline of an LED, used by presentation layers only.
///
/// Spatial queries always use the LED's rectangle, whatever its shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Fills its rectangle.
    #[default]
    Rectangle,
    /// An ellipse inscribed in its rectangle.
    Circle,
    /// A custom outline described by the LED's shape data.
    Custom,
}
