// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{SnapPoint, update_adjustment};
use crate::alignment::SnapPointAlignment;
use crate::error::{SnapError, SnapPointKind};
use crate::sort_key::SortKey;
use crate::zone::Zone;

/// A snap point designating a single resting value.
///
/// Its applicable zone extends halfway toward each neighbor, or to infinity
/// at either end of a collection. When a half-range is declared with
/// [`with_applicable_range`](Self::with_applicable_range), the zone is
/// additionally clamped to `value ± range`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IrregularSnapPoint {
    value: f64,
    alignment: SnapPointAlignment,
    alignment_adjustment: f64,
    applicable_range: Option<f64>,
}

impl IrregularSnapPoint {
    /// Creates a near-aligned snap point at `value` with no declared range.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            alignment: SnapPointAlignment::Near,
            alignment_adjustment: 0.0,
            applicable_range: None,
        }
    }

    /// Returns this point with the given viewport alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: SnapPointAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns this point with a declared half-range.
    ///
    /// A declared range makes the point optional: input values further than
    /// `range` from the point do not snap to it even when no neighbor claims
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::NonPositiveApplicableRange`] if `range` is not
    /// greater than zero.
    pub fn with_applicable_range(mut self, range: f64) -> Result<Self, SnapError> {
        if range.is_nan() || range <= 0.0 {
            return Err(SnapError::NonPositiveApplicableRange { range });
        }
        self.applicable_range = Some(range);
        Ok(self)
    }

    /// Returns the declared value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the declared value plus the alignment adjustment.
    #[must_use]
    pub fn actual_value(&self) -> f64 {
        self.value + self.alignment_adjustment
    }

    /// Returns the viewport alignment.
    #[must_use]
    pub fn alignment(&self) -> SnapPointAlignment {
        self.alignment
    }

    /// Returns the offset currently applied to the value.
    #[must_use]
    pub fn alignment_adjustment(&self) -> f64 {
        self.alignment_adjustment
    }

    /// Returns the declared half-range, if any.
    #[must_use]
    pub fn applicable_range(&self) -> Option<f64> {
        self.applicable_range
    }

    pub(crate) fn sort_key(&self) -> SortKey {
        let actual = self.actual_value();
        SortKey {
            primary: actual,
            secondary: actual,
            tertiary: SortKey::IRREGULAR,
        }
    }

    pub(crate) fn on_update_viewport(&mut self, viewport: f64) -> bool {
        update_adjustment(self.alignment, &mut self.alignment_adjustment, viewport)
    }

    pub(crate) fn influence(&self, edge: f64) -> f64 {
        let actual = self.actual_value();
        let midpoint = (actual + edge) / 2.0;
        match self.applicable_range {
            Some(range) if actual <= edge => (actual + range).min(midpoint),
            Some(range) => (actual - range).max(midpoint),
            None => midpoint,
        }
    }

    pub(crate) fn impulse_influence(&self, edge: f64, ignored: Option<f64>) -> f64 {
        let actual = self.actual_value();
        let midpoint = (actual + edge) / 2.0;
        match ignored {
            None => midpoint,
            // Resting here: give up the whole half-interval toward the neighbor.
            Some(_) if actual <= edge => actual.min(midpoint),
            Some(_) => actual.max(midpoint),
        }
    }

    pub(crate) fn determine_applicable_zone(
        &self,
        previous: Option<&SnapPoint>,
        next: Option<&SnapPoint>,
    ) -> Result<Zone, SnapError> {
        let actual = self.actual_value();
        let min = match previous {
            None => self
                .applicable_range
                .map_or(f64::NEG_INFINITY, |range| actual - range),
            Some(previous) => {
                let influence = previous.influence(actual)?;
                self.applicable_range
                    .map_or(influence, |range| influence.max(actual - range))
            }
        };
        let max = match next {
            None => self
                .applicable_range
                .map_or(f64::INFINITY, |range| actual + range),
            Some(next) => {
                let influence = next.influence(actual)?;
                self.applicable_range
                    .map_or(influence, |range| influence.min(actual + range))
            }
        };
        Ok(Zone::new(min, max))
    }

    pub(crate) fn determine_impulse_zone(
        &self,
        previous: Option<&SnapPoint>,
        next: Option<&SnapPoint>,
        ignored: Option<f64>,
        previous_ignored: Option<f64>,
        next_ignored: Option<f64>,
    ) -> Result<Zone, SnapError> {
        let actual = self.actual_value();
        let min = match previous {
            None => f64::NEG_INFINITY,
            Some(previous) => {
                let influence = previous.impulse_influence(actual, previous_ignored)?;
                if ignored.is_some() {
                    influence.max(actual)
                } else {
                    influence
                }
            }
        };
        let max = match next {
            None => f64::INFINITY,
            Some(next) => {
                let influence = next.impulse_influence(actual, next_ignored)?;
                if ignored.is_some() {
                    influence.min(actual)
                } else {
                    influence
                }
            }
        };
        Ok(Zone::new(min, max))
    }

    pub(crate) fn combine(
        &mut self,
        combination_count: &mut usize,
        other: &SnapPoint,
    ) -> Result<(), SnapError> {
        let SnapPoint::Irregular(other) = other else {
            return Err(SnapError::IncompatibleCombination {
                existing: SnapPointKind::Irregular,
                other: other.kind(),
            });
        };
        // An undeclared range is infinite, so it absorbs any declared one.
        self.applicable_range = match (self.applicable_range, other.applicable_range) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        *combination_count += 1;
        Ok(())
    }

    pub(crate) fn evaluate(&self, zone: Zone, value: f64) -> f64 {
        if zone.contains(value) {
            self.actual_value()
        } else {
            value
        }
    }
}
