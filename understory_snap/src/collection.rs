// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owning collection and its recompute pipeline.

use alloc::vec::Vec;
use core::mem;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::SnapConfig;
use crate::entry::SnapPointEntry;
use crate::error::SnapError;
use crate::expression::{ExpressionBuilder, ExpressionInputs, SnapExpressions};
use crate::point::SnapPoint;
use crate::zone::Zone;

/// Identifier for a snap point inserted into a [`SnapPoints`] collection.
///
/// This is a small, copyable handle that stays stable across recomputes but
/// becomes invalid when the snap point is removed. It consists of a slot
/// index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `SnapPointId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct id.
///
/// Stale ids never alias a different live snap point because the generation
/// must match. Queries with a stale id return `None`, and mutations are no-ops.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SnapPointId(pub(crate) u32, pub(crate) u32);

impl SnapPointId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which part of the zone pass to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Recompute {
    /// Re-sort, re-combine and renegotiate both applicable and impulse zones.
    #[default]
    Full,
    /// Renegotiate impulse zones only, keeping the current order and
    /// applicable zones.
    ///
    /// This is enough after an ignored value was set or cleared.
    ImpulseOnly,
}

/// A collection of snap points on one axis.
///
/// The collection owns a [`SnapPointEntry`] per inserted point and keeps the
/// entries' zones up to date:
///
/// 1. Entries are sorted by [`SortKey`](crate::SortKey).
/// 2. Adjacent entries whose keys are equal within the configured epsilon are
///    combined; the later ones are folded into the first and take no further
///    part in negotiation.
/// 3. Each remaining entry negotiates its applicable and impulse zones with
///    its previous and next neighbor.
///
/// Inserting, removing and viewport changes run the full pass. Setting or
/// clearing an ignored value only renegotiates impulse zones.
///
/// ## Example
///
/// ```rust
/// use understory_snap::{SnapPoint, SnapPoints, Zone};
///
/// let mut points = SnapPoints::new();
/// let a = points.insert(SnapPoint::irregular(10.0)).unwrap();
/// let b = points.insert(SnapPoint::irregular(50.0)).unwrap();
/// let c = points.insert(SnapPoint::irregular(90.0)).unwrap();
///
/// assert_eq!(points.zone(a), Some(Zone::new(f64::NEG_INFINITY, 30.0)));
/// assert_eq!(points.zone(b), Some(Zone::new(30.0, 70.0)));
/// assert_eq!(points.zone(c), Some(Zone::new(70.0, f64::INFINITY)));
///
/// assert_eq!(points.evaluate(65.0), 50.0);
/// assert!(points.snaps_at(90.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SnapPoints {
    config: SnapConfig,
    entries: Vec<Option<SnapPointEntry>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    /// Slots of the entries taking part in negotiation, in sort order.
    order: Vec<usize>,
    scratch: Vec<(SnapPoint, u64, usize)>,
    viewport: Option<f64>,
    next_sequence: u64,
}

impl SnapPoints {
    /// Creates an empty collection with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SnapConfig::default())
    }

    /// Creates an empty collection with the given configuration.
    #[must_use]
    pub fn with_config(config: SnapConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            scratch: Vec::new(),
            viewport: None,
            next_sequence: 0,
        }
    }

    /// Returns the configuration this collection was created with.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Returns the last viewport extent passed to
    /// [`update_viewport`](Self::update_viewport).
    #[must_use]
    pub fn viewport(&self) -> Option<f64> {
        self.viewport
    }

    /// Returns the number of live snap points, combined ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }

    /// Returns `true` if the collection holds no snap points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` refers to a live snap point.
    #[must_use]
    pub fn is_alive(&self, id: SnapPointId) -> bool {
        self.entry(id).is_some()
    }

    /// Inserts a snap point and recomputes all zones.
    ///
    /// If the collection has seen a viewport extent, the point's alignment
    /// adjustment is applied before it is sorted.
    ///
    /// # Errors
    ///
    /// Returns the error of the recompute pass when the new point cannot
    /// coexist with the current ones: it lies inside a repeated range, or it
    /// coincides with a point it cannot be combined with. The point is not
    /// inserted in that case.
    ///
    /// Returns [`SnapError::NonFiniteValue`] for an irregular point whose
    /// value is NaN or infinite.
    pub fn insert(&mut self, point: SnapPoint) -> Result<SnapPointId, SnapError> {
        point.check_finite()?;
        let mut descriptor = point;
        if let Some(viewport) = self.viewport {
            descriptor.on_update_viewport(viewport);
        }
        let id = self.allocate(descriptor);
        if let Err(err) = self.recompute(Recompute::Full) {
            self.release(id);
            // Restores the zones of the previous configuration.
            if self.recompute(Recompute::Full).is_err() {
                #[cfg(feature = "tracing")]
                tracing::debug!("previous snap point configuration is invalid; zones left unspecified");
            }
            return Err(err);
        }
        Ok(id)
    }

    /// Removes a snap point and recomputes all zones.
    ///
    /// Returns the removed descriptor, or `None` if `id` is stale.
    ///
    /// # Errors
    ///
    /// Propagates an error from the recompute pass. Removing a point never
    /// invalidates a valid configuration, so this only happens when the
    /// collection was already invalid, for example after a viewport change.
    pub fn remove(&mut self, id: SnapPointId) -> Result<Option<SnapPoint>, SnapError> {
        let Some(removed) = self.release(id) else {
            return Ok(None);
        };
        self.recompute(Recompute::Full)?;
        Ok(Some(removed))
    }

    /// Runs the zone pass.
    ///
    /// # Errors
    ///
    /// - [`SnapError::IncompatibleCombination`] when coincident points cannot be combined.
    /// - [`SnapError::InsideRepeatedRange`] when a point lies inside a repeated range.
    /// - [`SnapError::DuplicateRepeatedRange`] when two repeated points share a range.
    ///
    /// Zones are left in an unspecified state on error.
    pub fn recompute(&mut self, scope: Recompute) -> Result<(), SnapError> {
        let result = match scope {
            Recompute::Full => self
                .rebuild_order()
                .and_then(|()| self.negotiate(Recompute::Full)),
            Recompute::ImpulseOnly => self.negotiate(Recompute::ImpulseOnly),
        };
        #[cfg(feature = "tracing")]
        match &result {
            Ok(()) => tracing::trace!(
                points = self.order.len(),
                ?scope,
                "recomputed snap point zones"
            ),
            Err(err) => tracing::debug!(%err, ?scope, "snap point configuration rejected"),
        }
        result
    }

    /// Applies a new viewport extent to alignment-sensitive snap points.
    ///
    /// Returns `true` if any point was sensitive to the viewport, in which
    /// case all zones were recomputed.
    ///
    /// # Errors
    ///
    /// Propagates an error from the recompute pass, for example when the
    /// adjustment moves a point into a repeated range.
    pub fn update_viewport(&mut self, viewport: f64) -> Result<bool, SnapError> {
        self.viewport = Some(viewport);
        let mut sensitive = false;
        for entry in self.entries.iter_mut().flatten() {
            sensitive |= entry.descriptor_mut().on_update_viewport(viewport);
        }
        if sensitive {
            self.recompute(Recompute::Full)?;
        }
        Ok(sensitive)
    }

    /// Marks `value` as the value the collection is resting on for `id`.
    ///
    /// Impulse zones are renegotiated so that a flick starting from `value`
    /// does not settle back on it. If `id` was combined into a coincident
    /// point, the value is recorded on that point.
    ///
    /// # Errors
    ///
    /// Propagates an error from the impulse pass.
    pub fn set_ignored_value(&mut self, id: SnapPointId, value: f64) -> Result<(), SnapError> {
        let Some(entry) = self.resolve_slot(id).and_then(|slot| self.slot_mut(slot)) else {
            return Ok(());
        };
        entry.set_ignored_value(value);
        self.recompute(Recompute::ImpulseOnly)
    }

    /// Clears the ignored value of `id`.
    ///
    /// Returns `true` if a value was cleared, in which case impulse zones
    /// were renegotiated.
    ///
    /// # Errors
    ///
    /// Propagates an error from the impulse pass.
    pub fn clear_ignored_value(&mut self, id: SnapPointId) -> Result<bool, SnapError> {
        let Some(entry) = self.resolve_slot(id).and_then(|slot| self.slot_mut(slot)) else {
            return Ok(false);
        };
        if !entry.clear_ignored_value() {
            return Ok(false);
        }
        self.recompute(Recompute::ImpulseOnly)?;
        Ok(true)
    }

    /// Returns the entry inserted under `id`.
    ///
    /// For a point that was combined into a coincident one, this is its own
    /// entry; its zones are not maintained. The other accessors resolve to
    /// the combined entry instead.
    #[must_use]
    pub fn entry(&self, id: SnapPointId) -> Option<&SnapPointEntry> {
        let entry = self.entries.get(id.idx())?.as_ref()?;
        (entry.generation() == id.1).then_some(entry)
    }

    /// Returns the effective snap point for `id`, after combination.
    #[must_use]
    pub fn point(&self, id: SnapPointId) -> Option<&SnapPoint> {
        self.resolve(id).map(SnapPointEntry::point)
    }

    /// Returns the applicable zone for `id`.
    #[must_use]
    pub fn zone(&self, id: SnapPointId) -> Option<Zone> {
        self.resolve(id).map(SnapPointEntry::applicable_zone)
    }

    /// Returns the impulse zone for `id`.
    #[must_use]
    pub fn impulse_zone(&self, id: SnapPointId) -> Option<Zone> {
        self.resolve(id).map(SnapPointEntry::impulse_zone)
    }

    /// Returns how many coincident points were folded together with `id`.
    #[must_use]
    pub fn combination_count(&self, id: SnapPointId) -> Option<usize> {
        self.resolve(id).map(SnapPointEntry::combination_count)
    }

    /// Returns the ignored value recorded for `id`.
    #[must_use]
    pub fn ignored_value(&self, id: SnapPointId) -> Option<f64> {
        self.resolve(id).and_then(SnapPointEntry::ignored_value)
    }

    /// Evaluates `value` against the snap point `id` alone.
    #[must_use]
    pub fn evaluate_point(&self, id: SnapPointId, value: f64) -> Option<f64> {
        self.resolve(id).map(|entry| entry.evaluate(value))
    }

    /// Returns the value `value` snaps to within this collection.
    ///
    /// Among the snap points whose applicable zone contains `value`, the one
    /// resting closest to `value` decides; on a tie the first in sort order
    /// wins. Values outside every zone are returned unchanged.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> f64 {
        self.select(value)
            .map_or(value, |entry| entry.evaluate(value))
    }

    /// Returns `true` if `value` already rests on the snap point
    /// [`evaluate`](Self::evaluate) selects for it.
    #[must_use]
    pub fn snaps_at(&self, value: f64) -> bool {
        let epsilon = self.config.epsilon();
        self.select(value)
            .is_some_and(|entry| entry.snaps_at(value, epsilon))
    }

    /// Iterates over the entries taking part in negotiation, in sort order.
    ///
    /// Points folded into a coincident one are skipped; use [`iter`](Self::iter)
    /// to visit every live entry.
    pub fn entries(&self) -> impl Iterator<Item = (SnapPointId, &SnapPointEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|&slot| Some((self.id_of(slot), self.slot(slot)?)))
    }

    /// Iterates over every live entry in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SnapPointId, &SnapPointEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|e| (self.id_of(slot), e)))
    }

    /// Builds expressions for every entry taking part in negotiation.
    ///
    /// `target` and `scale` identify the animated property and its scale
    /// factor; they are passed through to `builder` untouched.
    pub fn build_expressions<B: ExpressionBuilder>(
        &self,
        builder: &mut B,
        target: &str,
        scale: &str,
    ) -> Vec<SnapExpressions<B::Expression>> {
        self.entries()
            .map(|(id, entry)| {
                let inputs = ExpressionInputs {
                    point: entry.point(),
                    applicable_zone: entry.applicable_zone(),
                    impulse_zone: entry.impulse_zone(),
                    ignored_value: entry.ignored_value(),
                    target,
                    scale,
                };
                SnapExpressions {
                    id,
                    conditional: builder.conditional(&inputs),
                    resting_point: builder.resting_point(&inputs),
                }
            })
            .collect()
    }

    // --- internals ---

    fn allocate(&mut self, descriptor: SnapPoint) -> SnapPointId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(SnapPointEntry::new(descriptor, generation, sequence));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.entries
                .push(Some(SnapPointEntry::new(descriptor, generation, sequence)));
            self.generations.push(generation);
            (self.entries.len() - 1, generation)
        };
        #[expect(clippy::cast_possible_truncation, reason = "slots are 32-bit")]
        let idx = idx as u32;
        SnapPointId::new(idx, generation)
    }

    fn release(&mut self, id: SnapPointId) -> Option<SnapPoint> {
        self.entry(id)?;
        let entry = self.entries[id.idx()].take()?;
        self.free_list.push(id.idx());
        Some(*entry.descriptor())
    }

    fn id_of(&self, slot: usize) -> SnapPointId {
        #[expect(clippy::cast_possible_truncation, reason = "slots are 32-bit")]
        let idx = slot as u32;
        SnapPointId::new(idx, self.generations[slot])
    }

    /// Maps `id` to the slot of the entry that negotiates on its behalf.
    fn resolve_slot(&self, id: SnapPointId) -> Option<usize> {
        let entry = self.entry(id)?;
        Some(entry.combined_into().unwrap_or(id.idx()))
    }

    fn resolve(&self, id: SnapPointId) -> Option<&SnapPointEntry> {
        self.slot(self.resolve_slot(id)?)
    }

    fn slot(&self, slot: usize) -> Option<&SnapPointEntry> {
        self.entries.get(slot)?.as_ref()
    }

    fn slot_mut(&mut self, slot: usize) -> Option<&mut SnapPointEntry> {
        self.entries.get_mut(slot)?.as_mut()
    }

    /// Entries whose applicable zone contains `value`, in sort order.
    fn containing(&self, value: f64) -> impl Iterator<Item = &SnapPointEntry> + '_ {
        let first = self.order.partition_point(|&slot| {
            self.slot(slot)
                .is_some_and(|entry| entry.applicable_zone().max < value)
        });
        self.order[first..]
            .iter()
            .filter_map(|&slot| self.slot(slot))
            .take_while(move |entry| entry.applicable_zone().contains(value))
    }

    /// The entry deciding where `value` rests.
    fn select(&self, value: f64) -> Option<&SnapPointEntry> {
        let mut best: Option<(&SnapPointEntry, f64)> = None;
        for entry in self.containing(value) {
            let distance = (entry.evaluate(value) - value).abs();
            if best.is_none_or(|(_, nearest)| distance < nearest) {
                best = Some((entry, distance));
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Sorts live entries and folds coincident neighbors together.
    fn rebuild_order(&mut self) -> Result<(), SnapError> {
        let epsilon = self.config.epsilon();
        let mut sorted = mem::take(&mut self.scratch);
        sorted.clear();
        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if let Some(entry) = entry {
                entry.reset();
                sorted.push((*entry.point(), entry.sequence(), slot));
            }
        }
        // Insertion order breaks ties, so the first inserted point absorbs the rest.
        sorted.sort_by(|(a, a_seq, _), (b, b_seq, _)| {
            a.sort_key()
                .total_cmp(&b.sort_key())
                .then(a_seq.cmp(b_seq))
        });

        self.order.clear();
        let mut result = Ok(());
        let mut previous: Option<SnapPoint> = None;
        for &(point, _, slot) in &sorted {
            let coincident = previous
                .is_some_and(|previous| previous.sort_key().approx_eq(&point.sort_key(), epsilon));
            previous = Some(point);
            if let (true, Some(&representative)) = (coincident, self.order.last()) {
                if let Some(entry) = self.slot_mut(representative) {
                    if let Err(err) = entry.absorb(&point) {
                        result = Err(err);
                        break;
                    }
                }
                if let Some(entry) = self.slot_mut(slot) {
                    entry.mark_combined_into(representative);
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(slot, representative, "combined coincident snap points");
                continue;
            }
            self.order.push(slot);
        }
        self.scratch = sorted;
        result
    }

    /// Negotiates zones between neighbors in the current order.
    fn negotiate(&mut self, scope: Recompute) -> Result<(), SnapError> {
        let epsilon = self.config.epsilon();
        for i in 0..self.order.len() {
            let slot = self.order[i];
            let Some(entry) = self.slot(slot) else {
                continue;
            };
            let previous = i.checked_sub(1).and_then(|j| self.slot(self.order[j]));
            let next = self.order.get(i + 1).and_then(|&j| self.slot(j));

            let applicable = match scope {
                Recompute::Full => Some(entry.point().determine_applicable_zone(
                    previous.map(SnapPointEntry::point),
                    next.map(SnapPointEntry::point),
                    epsilon,
                )?),
                Recompute::ImpulseOnly => None,
            };
            let impulse = entry.point().determine_impulse_zone(
                previous.map(SnapPointEntry::point),
                next.map(SnapPointEntry::point),
                entry.ignored_value(),
                previous.and_then(SnapPointEntry::ignored_value),
                next.and_then(SnapPointEntry::ignored_value),
            )?;
            if let Some(entry) = self.slot_mut(slot) {
                entry.set_zones(applicable, impulse);
            }
        }
        Ok(())
    }
}
