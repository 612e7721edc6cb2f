// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection-wide configuration.

/// Default tolerance for floating-point equality, in axis units.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Configuration for a [`SnapPoints`](crate::SnapPoints) collection.
///
/// The configuration is fixed when the collection is created. The same
/// tolerance is used both when deciding whether two snap points coincide
/// (and must be combined) and when deciding whether a value sits on a snap
/// point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapConfig {
    epsilon: f64,
}

impl SnapConfig {
    /// Creates a configuration with [`DEFAULT_EPSILON`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Returns a copy of this configuration with the given equality tolerance.
    ///
    /// Negative tolerances are treated as their absolute value. A tolerance
    /// of zero makes every comparison exact.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon < 0.0 { -epsilon } else { epsilon };
        self
    }

    /// Returns the equality tolerance.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::new()
    }
}
