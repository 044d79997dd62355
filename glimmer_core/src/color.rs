// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARGB colors and alpha compositing.
//!
//! [`Color`] stores straight (non-premultiplied) 8-bit channels. Color state
//! on an LED only ever advances through [`Color::blend`]: a newly applied
//! color is composited *over* the pending one, so repeated partial writes
//! accumulate instead of overwriting each other.
//!
//! Equality is exact per channel. Dirty tracking relies on it, so there is no
//! tolerance.

use core::fmt;

/// An 8-bit-per-channel ARGB color.
///
/// The default value is [`Color::TRANSPARENT`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Alpha channel; 0 is fully transparent, 255 fully opaque.
    pub a: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Fully transparent black. The neutral element of [`blend`](Self::blend).
    pub const TRANSPARENT: Self = Self::argb(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from alpha, red, green, and blue channels.
    #[inline]
    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates an opaque color from red, green, and blue channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn from_argb_u32(packed: u32) -> Self {
        let [a, r, g, b] = packed.to_be_bytes();
        Self { a, r, g, b }
    }

    /// Packs the color as `0xAARRGGBB`.
    #[inline]
    #[must_use]
    pub const fn to_argb_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Returns this color with its alpha channel replaced.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns `true` if the alpha channel is 0.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Composites `applied` over `self` and returns the result.
    ///
    /// For each color channel `c`:
    ///
    /// ```text
    /// c   = applied.c * applied.a / 255 + self.c * self.a * (255 - applied.a) / 255 / 255
    /// a   = applied.a + self.a * (255 - applied.a) / 255
    /// ```
    ///
    /// Integer division truncates at every step. Applying a fully transparent
    /// color leaves `self` untouched; applying a fully opaque color replaces
    /// it. Blending is not commutative: later writes land on top.
    #[must_use]
    pub const fn blend(self, applied: Self) -> Self {
        if applied.a == 0 {
            return self;
        }

        let top_a = applied.a as u32;
        let base_a = self.a as u32;
        let remaining = 255 - top_a;

        Self {
            a: narrow(top_a + base_a * remaining / 255),
            r: blend_channel(applied.r, top_a, self.r, base_a, remaining),
            g: blend_channel(applied.g, top_a, self.g, base_a, remaining),
            b: blend_channel(applied.b, top_a, self.b, base_a, remaining),
        }
    }
}

/// One channel of the "over" operator. The result never exceeds the blended
/// alpha, so it always fits in a byte.
#[inline]
const fn blend_channel(top: u8, top_a: u32, base: u8, base_a: u32, remaining: u32) -> u8 {
    let top = top as u32 * top_a / 255;
    let base = base as u32 * base_a * remaining / 255 / 255;
    narrow(top + base)
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the u8 range first"
)]
const fn narrow(v: u32) -> u8 {
    if v > 255 { 255 } else { v as u8 }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_argb_u32(packed)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[A: {}, R: {}, G: {}, B: {}]",
            self.a, self.r, self.g, self.b
        )
    }
}
