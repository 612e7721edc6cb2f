// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Total order over snap points.

use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Sort key of a snap point.
///
/// Irregular points use `(value, value, 0)` and repeated points use
/// `(start, end, 1)`, all alignment-adjusted. Keys compare lexicographically,
/// so an irregular point always sorts before a repeated point that starts at
/// the same location. That makes the irregular point the left neighbor of the
/// range, which keeps zone negotiation direction deterministic.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct SortKey {
    /// Actual value, or actual start for repeated points.
    pub primary: f64,
    /// Actual value, or actual end for repeated points.
    pub secondary: f64,
    /// `0` for irregular points, `1` for repeated points.
    pub tertiary: u8,
}

impl SortKey {
    /// Tertiary key of irregular snap points.
    pub const IRREGULAR: u8 = 0;
    /// Tertiary key of repeated snap points.
    pub const REPEATED: u8 = 1;

    /// Lexicographic total order, using [`f64::total_cmp`] for the float fields.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| self.tertiary.cmp(&other.tertiary))
    }

    /// Returns `true` if both keys designate the same snap location.
    ///
    /// The float fields must each differ by less than `epsilon` and the
    /// tertiary fields must match.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.primary - other.primary).abs() < epsilon
            && (self.secondary - other.secondary).abs() < epsilon
            && self.tertiary == other.tertiary
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use super::SortKey;

    fn key(primary: f64, secondary: f64, tertiary: u8) -> SortKey {
        SortKey {
            primary,
            secondary,
            tertiary,
        }
    }

    #[test]
    fn irregular_sorts_before_repeated_at_same_location() {
        let irregular = key(10.0, 10.0, SortKey::IRREGULAR);
        let repeated = key(10.0, 10.0, SortKey::REPEATED);
        assert_eq!(irregular.total_cmp(&repeated), Ordering::Less);
        assert!(irregular < repeated);
    }

    #[test]
    fn secondary_breaks_primary_ties() {
        assert_eq!(
            key(0.0, 40.0, 1).total_cmp(&key(0.0, 50.0, 1)),
            Ordering::Less
        );
    }

    #[test]
    fn approx_eq_requires_matching_tertiary() {
        let a = key(30.0, 30.0, 0);
        let b = key(30.000_000_1, 30.000_000_1, 0);
        assert!(a.approx_eq(&b, 1e-5));
        assert!(!a.approx_eq(&key(30.0, 30.0, 1), 1e-5));
        assert!(!a.approx_eq(&key(30.1, 30.1, 0), 1e-5));
    }
}
