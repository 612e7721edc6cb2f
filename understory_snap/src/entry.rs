// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection-scoped state attached to a snap point.

use crate::error::SnapError;
use crate::point::SnapPoint;
use crate::zone::Zone;

/// A snap point as seen by one [`SnapPoints`](crate::SnapPoints) collection.
///
/// The entry owns everything that depends on the collection: the negotiated
/// zones, how many coincident points were folded into it, and the value the
/// collection is currently resting on for this point, if any.
#[derive(Clone, Debug)]
pub struct SnapPointEntry {
    /// The descriptor as inserted, alignment-adjusted for the current viewport.
    descriptor: SnapPoint,
    /// The descriptor after absorbing coincident points.
    point: SnapPoint,
    applicable_zone: Zone,
    impulse_zone: Zone,
    combination_count: usize,
    ignored_value: Option<f64>,
    /// Slot of the entry this one was folded into.
    combined_into: Option<usize>,
    generation: u32,
    sequence: u64,
}

impl SnapPointEntry {
    pub(crate) fn new(descriptor: SnapPoint, generation: u32, sequence: u64) -> Self {
        Self {
            descriptor,
            point: descriptor,
            applicable_zone: Zone::ENTIRE,
            impulse_zone: Zone::ENTIRE,
            combination_count: 0,
            ignored_value: None,
            combined_into: None,
            generation,
            sequence,
        }
    }

    /// Returns the snap point as inserted, with the current alignment adjustment.
    #[must_use]
    pub fn descriptor(&self) -> &SnapPoint {
        &self.descriptor
    }

    /// Returns the effective snap point after combination.
    #[must_use]
    pub fn point(&self) -> &SnapPoint {
        &self.point
    }

    /// Returns the zone of input values that snap to this point.
    #[must_use]
    pub fn applicable_zone(&self) -> Zone {
        self.applicable_zone
    }

    /// Returns the zone used during inertia that follows an impulse.
    #[must_use]
    pub fn impulse_zone(&self) -> Zone {
        self.impulse_zone
    }

    /// Returns how many coincident points were folded into this one.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.combination_count
    }

    /// Returns the resting value excluded from impulse snapping, if any.
    #[must_use]
    pub fn ignored_value(&self) -> Option<f64> {
        self.ignored_value
    }

    /// Returns `true` if this entry was folded into a coincident one and takes
    /// no part in zone negotiation.
    #[must_use]
    pub fn is_combined(&self) -> bool {
        self.combined_into.is_some()
    }

    /// Returns the value `value` snaps to through this entry.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> f64 {
        self.point.evaluate(self.applicable_zone, value)
    }

    /// Returns `true` if `value` already rests on this entry.
    #[must_use]
    pub fn snaps_at(&self, value: f64, epsilon: f64) -> bool {
        self.point.snaps_at(self.applicable_zone, value, epsilon)
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn combined_into(&self) -> Option<usize> {
        self.combined_into
    }

    pub(crate) fn descriptor_mut(&mut self) -> &mut SnapPoint {
        &mut self.descriptor
    }

    /// Clears everything derived by the previous full pass.
    pub(crate) fn reset(&mut self) {
        self.point = self.descriptor;
        self.combination_count = 0;
        self.combined_into = None;
        self.applicable_zone = Zone::ENTIRE;
        self.impulse_zone = Zone::ENTIRE;
    }

    pub(crate) fn absorb(&mut self, other: &SnapPoint) -> Result<(), SnapError> {
        self.point.combine(&mut self.combination_count, other)
    }

    pub(crate) fn mark_combined_into(&mut self, slot: usize) {
        self.combined_into = Some(slot);
    }

    pub(crate) fn set_zones(&mut self, applicable: Option<Zone>, impulse: Zone) {
        if let Some(applicable) = applicable {
            self.applicable_zone = applicable;
        }
        self.impulse_zone = impulse;
    }

    pub(crate) fn set_ignored_value(&mut self, value: f64) {
        debug_assert!(!value.is_nan(), "ignored values must be numbers");
        self.ignored_value = Some(value);
    }

    pub(crate) fn clear_ignored_value(&mut self) -> bool {
        self.ignored_value.take().is_some()
    }
}
