// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seam for hosts that express snapping as declarative animations.
//!
//! A host animation system usually wants two expressions per snap point: a
//! condition that selects the point for a given animated target, and the
//! resting value the target settles on once selected. This crate does not
//! know any expression language; it hands the negotiated zones to an
//! [`ExpressionBuilder`] and collects whatever the builder produces.

use crate::collection::SnapPointId;
use crate::point::SnapPoint;
use crate::zone::Zone;

/// Everything an [`ExpressionBuilder`] needs to describe one snap point.
#[derive(Clone, Copy, Debug)]
pub struct ExpressionInputs<'a> {
    /// The effective snap point, after combination and alignment.
    pub point: &'a SnapPoint,
    /// Zone selecting this point outside of impulse-driven inertia.
    pub applicable_zone: Zone,
    /// Zone selecting this point during impulse-driven inertia.
    pub impulse_zone: Zone,
    /// The value the collection is resting on for this point, if any.
    pub ignored_value: Option<f64>,
    /// Host name of the animated target value.
    pub target: &'a str,
    /// Host name of the scale factor applied to snap values.
    pub scale: &'a str,
}

impl ExpressionInputs<'_> {
    /// Returns the zone to use for the given inertia mode.
    #[must_use]
    pub fn zone_for(&self, from_impulse: bool) -> Zone {
        if from_impulse {
            self.impulse_zone
        } else {
            self.applicable_zone
        }
    }
}

/// Produces host expressions from negotiated snap point zones.
pub trait ExpressionBuilder {
    /// The host's expression type.
    type Expression;

    /// Builds the condition selecting this snap point.
    fn conditional(&mut self, inputs: &ExpressionInputs<'_>) -> Self::Expression;

    /// Builds the value the target rests on once this snap point is selected.
    fn resting_point(&mut self, inputs: &ExpressionInputs<'_>) -> Self::Expression;
}

/// The pair of expressions built for one snap point.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapExpressions<E> {
    /// The snap point the expressions were built for.
    pub id: SnapPointId,
    /// Output of [`ExpressionBuilder::conditional`].
    pub conditional: E,
    /// Output of [`ExpressionBuilder::resting_point`].
    pub resting_point: E,
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{ExpressionBuilder, ExpressionInputs};
    use crate::collection::SnapPoints;
    use crate::point::SnapPoint;
    use crate::zone::Zone;

    #[derive(Default)]
    struct Text {
        calls: usize,
    }

    impl ExpressionBuilder for Text {
        type Expression = String;

        fn conditional(&mut self, inputs: &ExpressionInputs<'_>) -> String {
            self.calls += 1;
            let Zone { min, max } = inputs.applicable_zone;
            format!("{t} >= {min} * {s} && {t} <= {max} * {s}", t = inputs.target, s = inputs.scale)
        }

        fn resting_point(&mut self, inputs: &ExpressionInputs<'_>) -> String {
            self.calls += 1;
            match inputs.point {
                SnapPoint::Irregular(p) => format!("{} * {}", p.actual_value(), inputs.scale),
                SnapPoint::Repeated(p) => format!("repeat({}) * {}", p.interval(), inputs.scale),
            }
        }
    }

    #[test]
    fn builds_one_pair_per_representative() {
        let mut points = SnapPoints::new();
        let a = points.insert(SnapPoint::irregular(0.0)).unwrap();
        points.insert(SnapPoint::irregular(0.0)).unwrap();
        let b = points.insert(SnapPoint::irregular(100.0)).unwrap();

        let mut builder = Text::default();
        let built = points.build_expressions(&mut builder, "x", "scale");

        assert_eq!(builder.calls, 4);
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].id, a);
        assert_eq!(built[0].conditional, "x >= -inf * scale && x <= 50 * scale");
        assert_eq!(built[0].resting_point, "0 * scale");
        assert_eq!(built[1].id, b);
        assert_eq!(built[1].resting_point, "100 * scale");
    }

    #[test]
    fn zone_for_switches_on_impulse() {
        let mut points = SnapPoints::new();
        let a = points.insert(SnapPoint::irregular(0.0)).unwrap();
        points.insert(SnapPoint::irregular(100.0)).unwrap();
        points.set_ignored_value(a, 0.0).unwrap();

        let (_, entry) = points.entries().nth(1).unwrap();
        let inputs = ExpressionInputs {
            point: entry.point(),
            applicable_zone: entry.applicable_zone(),
            impulse_zone: entry.impulse_zone(),
            ignored_value: entry.ignored_value(),
            target: "x",
            scale: "1",
        };
        assert_eq!(inputs.zone_for(false), Zone::new(50.0, f64::INFINITY));
        assert_eq!(inputs.zone_for(true), Zone::new(0.0, f64::INFINITY));
    }
}
