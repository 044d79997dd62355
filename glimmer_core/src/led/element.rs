// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The LED element and its color state machine.

use alloc::string::String;
use core::fmt;

use crate::color::Color;
use crate::device::LedLayout;
use crate::geometry::Rect;

use super::id::LedId;
use super::shape::Shape;

/// A single addressable LED.
///
/// Identity and rectangle are fixed at device initialization. All mutation
/// goes through [`LedMut`](super::LedMut) or the owning device.
#[derive(Clone, PartialEq)]
pub struct Led {
    id: LedId,
    rect: Rect,
    shape: Shape,
    shape_data: Option<String>,
    image: Option<String>,
    current: Color,
    requested: Color,
    locked: bool,
}

impl Led {
    pub(crate) fn from_layout(layout: LedLayout) -> Self {
        Self {
            id: layout.id,
            rect: layout.rect,
            shape: layout.shape,
            shape_data: layout.shape_data,
            image: layout.image,
            current: Color::TRANSPARENT,
            requested: Color::TRANSPARENT,
            locked: false,
        }
    }

    // -- Getters --

    /// Returns the id of this LED.
    #[inline]
    #[must_use]
    pub fn id(&self) -> LedId {
        self.id
    }

    /// Returns the physical rectangle of this LED relative to its device's
    /// origin.
    #[inline]
    #[must_use]
    pub fn rectangle(&self) -> Rect {
        self.rect
    }

    /// Returns the outline shape.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the outline data for [`Shape::Custom`], if any.
    #[inline]
    #[must_use]
    pub fn shape_data(&self) -> Option<&str> {
        self.shape_data.as_deref()
    }

    /// Returns the image reference supplied by the layout, if any.
    #[inline]
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the color last pushed to hardware.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.current
    }

    /// Returns the color this LED will be set to on the next update.
    #[inline]
    #[must_use]
    pub fn requested_color(&self) -> Color {
        self.requested
    }

    /// Returns whether incoming color writes are currently dropped.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns whether the requested color differs from the current one.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.requested != self.current
    }

    // -- Mutation (crate-internal; returns whether anything changed) --

    /// Composites `applied` onto the requested color unless locked.
    pub(crate) fn apply_color(&mut self, applied: Color) -> bool {
        if self.locked {
            return false;
        }
        let blended = self.requested.blend(applied);
        let changed = blended != self.requested;
        self.requested = blended;
        changed
    }

    /// Makes the requested color current.
    pub(crate) fn commit(&mut self) -> bool {
        let changed = self.current != self.requested;
        self.current = self.requested;
        changed
    }

    /// Clears both colors to transparent and unlocks.
    pub(crate) fn reset(&mut self) -> ResetChanges {
        let changes = ResetChanges {
            color: self.current != Color::TRANSPARENT,
            requested: self.requested != Color::TRANSPARENT,
            locked: self.locked,
        };
        self.current = Color::TRANSPARENT;
        self.requested = Color::TRANSPARENT;
        self.locked = false;
        changes
    }

    pub(crate) fn set_locked(&mut self, locked: bool) -> bool {
        let changed = self.locked != locked;
        self.locked = locked;
        changed
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) -> bool {
        let changed = self.shape != shape;
        self.shape = shape;
        changed
    }

    pub(crate) fn set_shape_data(&mut self, data: Option<String>) -> bool {
        let changed = self.shape_data != data;
        self.shape_data = data;
        changed
    }

    pub(crate) fn set_image(&mut self, image: Option<String>) -> bool {
        let changed = self.image != image;
        self.image = image;
        changed
    }
}

/// Which observable properties a [`Led::reset`] touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ResetChanges {
    pub(crate) color: bool,
    pub(crate) requested: bool,
    pub(crate) locked: bool,
}

impl fmt::Debug for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Led")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("color", &self.current)
            .field("requested", &self.requested)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.current)
    }
}
