// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios for the `understory_snap` crate.
//!
//! These exercise the public API the way a scrolling container drives it:
//! insert points, read back zones, and evaluate resting values.

use kurbo::Size;
use understory_snap::{
    IrregularSnapPoint, RepeatedSnapPoint, ScrollSnapPoints, SnapAxes, SnapAxis, SnapError,
    SnapErrorKind, SnapPoint, SnapPointAlignment, SnapPoints, Zone,
};

#[test]
fn irregular_points_split_the_axis_at_midpoints() {
    let mut points = SnapPoints::new();
    let a = points.insert(SnapPoint::irregular(10.0)).unwrap();
    let b = points.insert(SnapPoint::irregular(50.0)).unwrap();
    let c = points.insert(SnapPoint::irregular(90.0)).unwrap();

    assert_eq!(points.zone(a), Some(Zone::new(f64::NEG_INFINITY, 30.0)));
    assert_eq!(points.zone(b), Some(Zone::new(30.0, 70.0)));
    assert_eq!(points.zone(c), Some(Zone::new(70.0, f64::INFINITY)));

    assert_eq!(points.evaluate_point(b, 65.0), Some(50.0));
    // 65 is outside the zone of 90.
    assert_eq!(points.evaluate_point(c, 65.0), Some(65.0));
}

#[test]
fn repeated_point_snaps_to_nearest_candidate() {
    let point = RepeatedSnapPoint::new(5.0, 10.0, 0.0, 47.0).unwrap();
    assert_eq!(point.first_value(), 5.0);
    assert_eq!(point.last_value(), 45.0);

    let point = SnapPoint::from(point);
    assert_eq!(point.snap_count(), 4);
    assert_eq!(point.evaluate(Zone::ENTIRE, 16.0), 15.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 20.0), 15.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 21.0), 25.0);
}

#[test]
fn repeated_point_with_declared_range_leaves_far_values_alone() {
    let point = SnapPoint::from(
        RepeatedSnapPoint::new(5.0, 10.0, 0.0, 47.0)
            .unwrap()
            .with_applicable_range(2.0)
            .unwrap(),
    );
    assert_eq!(point.evaluate(Zone::ENTIRE, 16.0), 15.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 17.0), 15.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 18.0), 18.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 23.0), 25.0);
    assert_eq!(point.evaluate(Zone::ENTIRE, 22.0), 22.0);
}

#[test]
fn nearly_equal_points_are_combined() {
    let mut points = SnapPoints::new();
    let a = points.insert(SnapPoint::irregular(30.000_000_1)).unwrap();
    let b = points.insert(SnapPoint::irregular(30.000_000_1)).unwrap();

    assert_eq!(points.combination_count(a), Some(1));
    assert_eq!(points.combination_count(b), Some(1));
    assert_eq!(points.entries().count(), 1);
    assert_eq!(points.len(), 2);
    assert_eq!(points.zone(a), Some(Zone::ENTIRE));
}

#[test]
fn point_inside_repeated_range_is_rejected() {
    let mut points = SnapPoints::new();
    points
        .insert(SnapPoint::repeated(0.0, 10.0, 0.0, 50.0).unwrap())
        .unwrap();

    let err = points.insert(SnapPoint::irregular(25.0)).unwrap_err();
    assert_eq!(
        err,
        SnapError::InsideRepeatedRange {
            value: 25.0,
            start: 0.0,
            end: 50.0,
        }
    );
    assert_eq!(err.kind(), SnapErrorKind::InvalidConfiguration);
    assert_eq!(points.len(), 1);
}

#[test]
fn resting_on_own_value_keeps_it_reachable() {
    let mut points = SnapPoints::new();
    let a = points.insert(SnapPoint::irregular(10.0)).unwrap();
    let b = points.insert(SnapPoint::irregular(50.0)).unwrap();

    assert_eq!(points.impulse_zone(b), Some(Zone::new(30.0, f64::INFINITY)));
    points.set_ignored_value(b, 50.0).unwrap();
    assert_eq!(points.impulse_zone(b), Some(Zone::new(50.0, f64::INFINITY)));
    // The neighbor takes over everything below the resting value.
    assert_eq!(
        points.impulse_zone(a),
        Some(Zone::new(f64::NEG_INFINITY, 50.0))
    );
}

#[test]
fn resting_on_first_repeated_value_keeps_it_reachable() {
    let mut points = SnapPoints::new();
    let before = points.insert(SnapPoint::irregular(-20.0)).unwrap();
    let pages = points
        .insert(SnapPoint::repeated(5.0, 10.0, 0.0, 47.0).unwrap())
        .unwrap();

    assert_eq!(points.impulse_zone(pages), Some(Zone::new(0.0, 47.0)));
    points.set_ignored_value(pages, 5.0).unwrap();
    assert_eq!(points.impulse_zone(pages), Some(Zone::new(5.0, 47.0)));
    assert_eq!(points.impulse_zone(before), Some(Zone::new(f64::NEG_INFINITY, 5.0)));
    // Applicable zones never see ignored values.
    assert_eq!(points.zone(pages), Some(Zone::new(0.0, 47.0)));
}

#[test]
fn construction_errors_are_invalid_arguments() {
    for err in [
        RepeatedSnapPoint::new(0.0, 0.0, 0.0, 10.0).unwrap_err(),
        RepeatedSnapPoint::new(0.0, 1.0, 10.0, 10.0).unwrap_err(),
        RepeatedSnapPoint::new(11.0, 1.0, 0.0, 10.0).unwrap_err(),
        IrregularSnapPoint::new(0.0)
            .with_applicable_range(-1.0)
            .unwrap_err(),
        RepeatedSnapPoint::new(f64::NAN, 1.0, 0.0, 10.0).unwrap_err(),
        RepeatedSnapPoint::new(0.0, 1.0, 0.0, f64::INFINITY).unwrap_err(),
        SnapPoints::new()
            .insert(SnapPoint::irregular(f64::NAN))
            .unwrap_err(),
    ] {
        assert_eq!(err.kind(), SnapErrorKind::InvalidArgument, "{err}");
    }
}

#[test]
fn identical_repeated_ranges_are_rejected() {
    let mut points = SnapPoints::new();
    points
        .insert(SnapPoint::repeated(0.0, 10.0, 0.0, 50.0).unwrap())
        .unwrap();
    let err = points
        .insert(SnapPoint::repeated(5.0, 10.0, 0.0, 50.0).unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        SnapError::DuplicateRepeatedRange {
            start: 0.0,
            end: 50.0,
        }
    );
    assert_eq!(err.kind(), SnapErrorKind::InvalidConfiguration);
    assert_eq!(points.len(), 1);
}

#[test]
fn optional_irregular_points_leave_gaps() {
    let mut points = SnapPoints::new();
    let a = points
        .insert(
            IrregularSnapPoint::new(0.0)
                .with_applicable_range(5.0)
                .unwrap()
                .into(),
        )
        .unwrap();
    points.insert(SnapPoint::irregular(100.0)).unwrap();

    assert_eq!(points.zone(a), Some(Zone::new(-5.0, 5.0)));
    assert_eq!(points.evaluate(-10.0), -10.0);
    assert_eq!(points.evaluate(4.0), 0.0);
    assert_eq!(points.evaluate(30.0), 100.0);
}

#[test]
fn container_aligns_scroll_axes_only() {
    let mut snap = ScrollSnapPoints::new();
    let item = snap
        .axis_mut(SnapAxis::Vertical)
        .insert(
            IrregularSnapPoint::new(1000.0)
                .with_alignment(SnapPointAlignment::Far)
                .into(),
        )
        .unwrap();
    snap.axis_mut(SnapAxis::Horizontal)
        .insert(SnapPoint::irregular(0.0))
        .unwrap();
    snap.axis_mut(SnapAxis::Zoom)
        .insert(SnapPoint::irregular(1.0))
        .unwrap();

    assert_eq!(
        snap.set_viewport(Size::new(320.0, 480.0)),
        Ok(SnapAxes::VERTICAL)
    );
    let vertical = snap.axis(SnapAxis::Vertical);
    assert_eq!(
        vertical.point(item).map(SnapPoint::alignment_adjustment),
        Some(-480.0)
    );
    assert_eq!(snap.evaluate(SnapAxis::Vertical, 0.0), 520.0);
    assert_eq!(snap.evaluate(SnapAxis::Zoom, 3.0), 1.0);
}
