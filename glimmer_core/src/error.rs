// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Lookups that miss (unknown LED id, stale device handle, empty point) are
//! not errors; they return `None`. Errors are reserved for collaborator
//! failures ([`WriteError`], [`ProviderError`]) and malformed layout data
//! ([`LayoutError`]).

use alloc::string::String;

use crate::led::LedId;

/// A hardware writer failed to transmit an update.
///
/// The device that reported it keeps its dirty LEDs dirty; nothing is
/// committed for that update.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// The device is no longer reachable.
    #[error("device disconnected")]
    Disconnected,
    /// The transfer did not complete in time.
    #[error("write timed out")]
    Timeout,
    /// The device or its SDK refused the update.
    #[error("write rejected: {reason}")]
    Rejected {
        /// Vendor-supplied description.
        reason: String,
    },
}

impl WriteError {
    /// Returns the payload-free category of this error.
    #[must_use]
    pub const fn kind(&self) -> WriteErrorKind {
        match self {
            Self::Disconnected => WriteErrorKind::Disconnected,
            Self::Timeout => WriteErrorKind::Timeout,
            Self::Rejected { .. } => WriteErrorKind::Rejected,
        }
    }
}

/// The category of a [`WriteError`], without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteErrorKind {
    /// See [`WriteError::Disconnected`].
    Disconnected,
    /// See [`WriteError::Timeout`].
    Timeout,
    /// See [`WriteError::Rejected`].
    Rejected,
}

/// Layout data could not be turned into a device.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Two layout records share an id.
    #[error("duplicate LED id {0:?} in layout")]
    DuplicateLed(LedId),
    /// A rectangle or the overall size has a negative or non-finite extent.
    #[error("layout contains a negative or non-finite size")]
    NegativeSize,
}

/// A device provider could not bring up its devices.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The vendor SDK could not be loaded.
    #[error("vendor SDK unavailable")]
    SdkUnavailable,
    /// The SDK was loaded but refused the session.
    #[error("SDK handshake failed: {reason}")]
    Handshake {
        /// Vendor-supplied description.
        reason: String,
    },
    /// A discovered device had unusable layout data.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
