// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LED identity types.

use core::fmt;

/// Namespace for LED codes, one per vendor id scheme.
///
/// Two vendors may reuse the same raw code; the namespace keeps them apart.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VendorId(pub u16);

impl fmt::Debug for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VendorId({})", self.0)
    }
}

/// Identifies one LED within a device.
///
/// The raw `code` is whatever the vendor SDK uses to address the LED (a key
/// code, a row/column pair packed into an integer, a strip index). Core code
/// only hashes and compares it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedId {
    /// The vendor namespace of `code`.
    pub vendor: VendorId,
    /// The vendor-defined LED code.
    pub code: u32,
}

impl LedId {
    /// Creates an id from a vendor namespace and raw code.
    #[inline]
    #[must_use]
    pub const fn new(vendor: VendorId, code: u32) -> Self {
        Self { vendor, code }
    }
}

impl fmt::Debug for LedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedId({}:{})", self.vendor.0, self.code)
    }
}

impl fmt::Display for LedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor.0, self.code)
    }
}
