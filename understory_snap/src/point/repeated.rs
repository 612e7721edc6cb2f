// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::{SnapPoint, update_adjustment};
use crate::alignment::SnapPointAlignment;
use crate::error::SnapError;
use crate::sort_key::SortKey;
use crate::zone::Zone;

/// A snap point designating the values `offset + k * interval` within
/// `[start, end]`.
///
/// The applicable zone of a repeated point is always exactly its
/// (alignment-adjusted) `[start, end]`: it never borrows input values from its
/// neighbors, and no neighbor may designate a value strictly inside it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RepeatedSnapPoint {
    offset: f64,
    interval: f64,
    start: f64,
    end: f64,
    alignment: SnapPointAlignment,
    alignment_adjustment: f64,
    applicable_range: Option<f64>,
}

impl RepeatedSnapPoint {
    /// Creates a near-aligned repeated snap point with no declared range.
    ///
    /// # Errors
    ///
    /// - [`SnapError::NonFiniteValue`] if any argument is NaN or infinite.
    /// - [`SnapError::EmptyRange`] if `end <= start`.
    /// - [`SnapError::OffsetOutOfRange`] if `offset` is outside `[start, end]`.
    /// - [`SnapError::NonPositiveInterval`] if `interval <= 0`.
    pub fn new(offset: f64, interval: f64, start: f64, end: f64) -> Result<Self, SnapError> {
        if let Some(value) = [offset, interval, start, end]
            .into_iter()
            .find(|value| !value.is_finite())
        {
            return Err(SnapError::NonFiniteValue { value });
        }
        if end <= start {
            return Err(SnapError::EmptyRange { start, end });
        }
        if offset < start || offset > end {
            return Err(SnapError::OffsetOutOfRange { offset, start, end });
        }
        if interval <= 0.0 {
            return Err(SnapError::NonPositiveInterval { interval });
        }
        Ok(Self {
            offset,
            interval,
            start,
            end,
            alignment: SnapPointAlignment::Near,
            alignment_adjustment: 0.0,
            applicable_range: None,
        })
    }

    /// Returns this point with the given viewport alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: SnapPointAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns this point with a declared half-range.
    ///
    /// Values further than `range` from the nearest candidate do not snap.
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

    /// Returns the declared offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the spacing between consecutive values.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Returns the declared start of the range.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the declared end of the range.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the viewport alignment.
    #[must_use]
    pub fn alignment(&self) -> SnapPointAlignment {
        self.alignment
    }

    /// Returns the offset currently applied to offset, start and end.
    #[must_use]
    pub fn alignment_adjustment(&self) -> f64 {
        self.alignment_adjustment
    }

    /// Returns the declared half-range, if any.
    #[must_use]
    pub fn applicable_range(&self) -> Option<f64> {
        self.applicable_range
    }

    /// Returns the alignment-adjusted offset.
    #[must_use]
    pub fn actual_offset(&self) -> f64 {
        self.offset + self.alignment_adjustment
    }

    /// Returns the alignment-adjusted start.
    #[must_use]
    pub fn actual_start(&self) -> f64 {
        self.start + self.alignment_adjustment
    }

    /// Returns the alignment-adjusted end.
    #[must_use]
    pub fn actual_end(&self) -> f64 {
        self.end + self.alignment_adjustment
    }

    /// Returns the smallest sequence value that is not below the start.
    #[must_use]
    pub fn first_value(&self) -> f64 {
        let offset = self.actual_offset();
        offset - ((offset - self.actual_start()) / self.interval).floor() * self.interval
    }

    /// Returns the largest sequence value that is not above the end.
    #[must_use]
    pub fn last_value(&self) -> f64 {
        let offset = self.actual_offset();
        offset + ((self.actual_end() - offset) / self.interval).floor() * self.interval
    }

    pub(crate) fn snap_count(&self) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The quotient is non-negative and already floored."
        )]
        {
            ((self.end - self.start) / self.interval).floor() as usize
        }
    }

    pub(crate) fn sort_key(&self) -> SortKey {
        SortKey {
            primary: self.actual_start(),
            secondary: self.actual_end(),
            tertiary: SortKey::REPEATED,
        }
    }

    pub(crate) fn on_update_viewport(&mut self, viewport: f64) -> bool {
        update_adjustment(self.alignment, &mut self.alignment_adjustment, viewport)
    }

    fn inside_error(&self, value: f64) -> SnapError {
        SnapError::InsideRepeatedRange {
            value,
            start: self.actual_start(),
            end: self.actual_end(),
        }
    }

    pub(crate) fn influence(&self, edge: f64) -> Result<f64, SnapError> {
        let start = self.actual_start();
        let end = self.actual_end();
        if edge <= start {
            Ok(start)
        } else if edge >= end {
            Ok(end)
        } else {
            Err(self.inside_error(edge))
        }
    }

    pub(crate) fn impulse_influence(
        &self,
        edge: f64,
        ignored: Option<f64>,
    ) -> Result<f64, SnapError> {
        if edge <= self.actual_start() {
            let first = self.first_value();
            Ok(if ignored == Some(first) {
                first
            } else {
                self.actual_start()
            })
        } else if edge >= self.actual_end() {
            let last = self.last_value();
            Ok(if ignored == Some(last) {
                last
            } else {
                self.actual_end()
            })
        } else {
            Err(self.inside_error(edge))
        }
    }

    pub(crate) fn determine_applicable_zone(
        &self,
        previous: Option<&SnapPoint>,
        next: Option<&SnapPoint>,
        epsilon: f64,
    ) -> Result<Zone, SnapError> {
        let start = self.actual_start();
        let end = self.actual_end();

        // Neighbors cannot move our bounds; asking for their influence only
        // checks that they stay out of our range.
        if let Some(previous) = previous {
            previous.influence(start)?;
        }
        if let Some(next) = next {
            next.influence(end)?;
            // Checking `next` alone is enough: every pair is visited once from its left side.
            if self.sort_key().approx_eq(&next.sort_key(), epsilon) {
                return Err(SnapError::DuplicateRepeatedRange { start, end });
            }
        }
        Ok(Zone::new(start, end))
    }

    pub(crate) fn determine_impulse_zone(
        &self,
        previous: Option<&SnapPoint>,
        next: Option<&SnapPoint>,
        ignored: Option<f64>,
        previous_ignored: Option<f64>,
        next_ignored: Option<f64>,
    ) -> Result<Zone, SnapError> {
        let min = match previous {
            Some(_) if ignored == Some(self.first_value()) => self.first_value(),
            Some(previous) if previous_ignored.is_some() => {
                previous.impulse_influence(self.actual_start(), previous_ignored)?
            }
            _ => self.actual_start(),
        };
        let max = match next {
            Some(_) if ignored == Some(self.last_value()) => self.last_value(),
            Some(next) if next_ignored.is_some() => {
                next.impulse_influence(self.actual_end(), next_ignored)?
            }
            _ => self.actual_end(),
        };
        Ok(Zone::new(min, max))
    }

    pub(crate) fn evaluate(&self, zone: Zone, value: f64) -> f64 {
        if !zone.contains(value) || value < self.actual_start() || value > self.actual_end() {
            return value;
        }
        // Candidates are limited to [first_value, last_value].
        let first = self.first_value();
        let last_index = ((self.last_value() - first) / self.interval).round();
        let passed = ((value - first) / self.interval).floor().min(last_index);
        let previous = (passed >= 0.0).then(|| passed * self.interval + first);
        let next = (passed + 1.0 <= last_index).then(|| (passed + 1.0) * self.interval + first);
        let nearest = match (previous, next) {
            (Some(previous), Some(next)) if value - previous <= next - value => previous,
            (_, Some(next)) => next,
            (Some(previous), None) => previous,
            (None, None) => return value,
        };

        let range = self.applicable_range.unwrap_or(f64::INFINITY);
        if (value - nearest).abs() <= range {
            nearest
        } else {
            value
        }
    }
}
