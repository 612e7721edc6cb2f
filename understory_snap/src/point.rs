// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap point descriptors and the capability set used by zone negotiation.
//!
//! A [`SnapPoint`] is either a single resting value ([`IrregularSnapPoint`])
//! or an evenly spaced sequence of values clipped to a range
//! ([`RepeatedSnapPoint`]). Both shapes answer the same questions:
//!
//! - where they sort ([`SnapPoint::sort_key`]),
//! - where they pull a shared boundary toward a neighbor ([`SnapPoint::influence`],
//!   [`SnapPoint::impulse_influence`]),
//! - which zone of input values they claim given their neighbors
//!   ([`SnapPoint::determine_applicable_zone`],
//!   [`SnapPoint::determine_impulse_zone`]),
//! - and what a value inside that zone snaps to ([`SnapPoint::evaluate`]).
//!
//! Descriptors are plain values. A collection copies the descriptor it is
//! given, so the same logical point can be inserted into several collections
//! without any of them observing the others' zones.

mod irregular;
mod repeated;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

pub use irregular::IrregularSnapPoint;
pub use repeated::RepeatedSnapPoint;

use crate::alignment::SnapPointAlignment;
use crate::error::{SnapError, SnapPointKind};
use crate::sort_key::SortKey;
use crate::zone::Zone;

/// A snap point of either shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SnapPoint {
    /// A single resting value.
    Irregular(IrregularSnapPoint),
    /// An evenly spaced sequence of resting values.
    Repeated(RepeatedSnapPoint),
}

impl SnapPoint {
    /// Creates a near-aligned irregular snap point at `value`.
    #[must_use]
    pub const fn irregular(value: f64) -> Self {
        Self::Irregular(IrregularSnapPoint::new(value))
    }

    /// Creates a near-aligned repeated snap point.
    ///
    /// See [`RepeatedSnapPoint::new`] for the validation rules.
    pub fn repeated(offset: f64, interval: f64, start: f64, end: f64) -> Result<Self, SnapError> {
        RepeatedSnapPoint::new(offset, interval, start, end).map(Self::Repeated)
    }

    /// Returns the shape of this snap point.
    #[must_use]
    pub fn kind(&self) -> SnapPointKind {
        match self {
            Self::Irregular(_) => SnapPointKind::Irregular,
            Self::Repeated(_) => SnapPointKind::Repeated,
        }
    }

    /// Returns the viewport alignment of this snap point.
    #[must_use]
    pub fn alignment(&self) -> SnapPointAlignment {
        match self {
            Self::Irregular(p) => p.alignment(),
            Self::Repeated(p) => p.alignment(),
        }
    }

    /// Returns the offset currently applied to this point's values.
    #[must_use]
    pub fn alignment_adjustment(&self) -> f64 {
        match self {
            Self::Irregular(p) => p.alignment_adjustment(),
            Self::Repeated(p) => p.alignment_adjustment(),
        }
    }

    /// Returns the declared half-range, if any.
    #[must_use]
    pub fn applicable_range(&self) -> Option<f64> {
        match self {
            Self::Irregular(p) => p.applicable_range(),
            Self::Repeated(p) => p.applicable_range(),
        }
    }

    /// Returns the key used to order snap points within a collection.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        match self {
            Self::Irregular(p) => p.sort_key(),
            Self::Repeated(p) => p.sort_key(),
        }
    }

    /// Updates the alignment adjustment for a new viewport extent.
    ///
    /// Returns `true` when the point is viewport-sensitive and its zones must
    /// be recomputed.
    pub fn on_update_viewport(&mut self, viewport: f64) -> bool {
        match self {
            Self::Irregular(p) => p.on_update_viewport(viewport),
            Self::Repeated(p) => p.on_update_viewport(viewport),
        }
    }

    /// Returns where this point pulls the boundary it shares with a neighbor
    /// whose boundary-facing value is `edge`.
    ///
    /// # Errors
    ///
    /// Repeated points return [`SnapError::InsideRepeatedRange`] when `edge`
    /// lies strictly inside their range.
    pub fn influence(&self, edge: f64) -> Result<f64, SnapError> {
        match self {
            Self::Irregular(p) => Ok(p.influence(edge)),
            Self::Repeated(p) => p.influence(edge),
        }
    }

    /// Like [`influence`](Self::influence), for impulse zones.
    ///
    /// `ignored` is the value this point's collection entry is currently
    /// resting on, if any.
    ///
    /// # Errors
    ///
    /// Repeated points return [`SnapError::InsideRepeatedRange`] when `edge`
    /// lies strictly inside their range.
    pub fn impulse_influence(&self, edge: f64, ignored: Option<f64>) -> Result<f64, SnapError> {
        match self {
            Self::Irregular(p) => Ok(p.impulse_influence(edge, ignored)),
            Self::Repeated(p) => p.impulse_influence(edge, ignored),
        }
    }

    /// Negotiates the applicable zone of this point with its sorted neighbors.
    ///
    /// `epsilon` is the collection's equality tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::InsideRepeatedRange`] when a neighbor claims a
    /// value strictly inside a repeated range, and
    /// [`SnapError::DuplicateRepeatedRange`] when this point and `next` are
    /// repeated points covering the same range.
    pub fn determine_applicable_zone(
        &self,
        previous: Option<&Self>,
        next: Option<&Self>,
        epsilon: f64,
    ) -> Result<Zone, SnapError> {
        match self {
            Self::Irregular(p) => p.determine_applicable_zone(previous, next),
            Self::Repeated(p) => p.determine_applicable_zone(previous, next, epsilon),
        }
    }

    /// Negotiates the impulse zone of this point with its sorted neighbors.
    ///
    /// `ignored`, `previous_ignored` and `next_ignored` are the values the
    /// respective collection entries are resting on, if any. With no ignored
    /// values anywhere the result follows the same rules as the applicable
    /// zone.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::InsideRepeatedRange`] under the same conditions as
    /// [`determine_applicable_zone`](Self::determine_applicable_zone).
    pub fn determine_impulse_zone(
        &self,
        previous: Option<&Self>,
        next: Option<&Self>,
        ignored: Option<f64>,
        previous_ignored: Option<f64>,
        next_ignored: Option<f64>,
    ) -> Result<Zone, SnapError> {
        match self {
            Self::Irregular(p) => {
                p.determine_impulse_zone(previous, next, ignored, previous_ignored, next_ignored)
            }
            Self::Repeated(p) => {
                p.determine_impulse_zone(previous, next, ignored, previous_ignored, next_ignored)
            }
        }
    }

    /// Folds a coincident snap point into this one.
    ///
    /// On success `combination_count` is incremented and, for irregular
    /// points, the declared range is widened to the larger of the two.
    ///
    /// # Errors
    ///
    /// Repeated points never combine. Two coincident repeated points return
    /// [`SnapError::DuplicateRepeatedRange`]; any other pair of mismatched
    /// shapes returns [`SnapError::IncompatibleCombination`].
    pub fn combine(
        &mut self,
        combination_count: &mut usize,
        other: &Self,
    ) -> Result<(), SnapError> {
        match self {
            Self::Irregular(p) => p.combine(combination_count, other),
            Self::Repeated(p) => Err(match other {
                Self::Repeated(_) => SnapError::DuplicateRepeatedRange {
                    start: p.actual_start(),
                    end: p.actual_end(),
                },
                Self::Irregular(_) => SnapError::IncompatibleCombination {
                    existing: SnapPointKind::Repeated,
                    other: SnapPointKind::Irregular,
                },
            }),
        }
    }

    /// Checks that the point designates finite values.
    ///
    /// Repeated points are checked on construction; irregular points are
    /// built by a `const fn` and checked here instead.
    pub(crate) fn check_finite(&self) -> Result<(), SnapError> {
        match self {
            Self::Irregular(p) if !p.value().is_finite() => {
                Err(SnapError::NonFiniteValue { value: p.value() })
            }
            _ => Ok(()),
        }
    }

    /// Returns how many resting values this point designates.
    #[must_use]
    pub fn snap_count(&self) -> usize {
        match self {
            Self::Irregular(_) => 1,
            Self::Repeated(p) => p.snap_count(),
        }
    }

    /// Returns the value `value` snaps to, or `value` itself when it lies
    /// outside `zone`.
    #[must_use]
    pub fn evaluate(&self, zone: Zone, value: f64) -> f64 {
        match self {
            Self::Irregular(p) => p.evaluate(zone, value),
            Self::Repeated(p) => p.evaluate(zone, value),
        }
    }

    /// Returns `true` if `value` lies in `zone` and already sits on one of
    /// this point's resting values, within `epsilon`.
    #[must_use]
    pub fn snaps_at(&self, zone: Zone, value: f64, epsilon: f64) -> bool {
        if !zone.contains(value) {
            return false;
        }
        (value - self.evaluate(zone, value)).abs() < epsilon
    }
}

impl From<IrregularSnapPoint> for SnapPoint {
    fn from(point: IrregularSnapPoint) -> Self {
        Self::Irregular(point)
    }
}

impl From<RepeatedSnapPoint> for SnapPoint {
    fn from(point: RepeatedSnapPoint) -> Self {
        Self::Repeated(point)
    }
}

/// Shared viewport update for both shapes.
fn update_adjustment(
    alignment: SnapPointAlignment,
    adjustment: &mut f64,
    viewport: f64,
) -> bool {
    if !alignment.is_viewport_sensitive() {
        debug_assert!(*adjustment == 0.0, "near-aligned points are never adjusted");
        return false;
    }
    *adjustment = alignment.adjustment(viewport);
    true
}
