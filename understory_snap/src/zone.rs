// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed intervals of input values.

/// A closed interval `[min, max]` of input values on one axis.
///
/// Zones are produced by zone negotiation and consumed by evaluation. Either
/// bound may be infinite; the default zone covers the whole axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zone {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Zone {
    /// The zone covering `(-∞, +∞)`.
    pub const ENTIRE: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Creates a zone from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `value` lies within the zone, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `true` if both bounds are infinite.
    #[must_use]
    pub fn is_entire(&self) -> bool {
        self.min == f64::NEG_INFINITY && self.max == f64::INFINITY
    }

    /// Returns the distance between the bounds.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::ENTIRE
    }
}

impl From<Zone> for (f64, f64) {
    fn from(zone: Zone) -> Self {
        (zone.min, zone.max)
    }
}

impl From<(f64, f64)> for Zone {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}
