// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_snap --heading-base-level=0

//! Understory Snap: snap point zones for scrolling and zooming.
//!
//! Given a set of resting positions on one axis, this crate decides which
//! position a continuous value (a drag offset, the end of an inertia
//! animation, a zoom factor) settles on.
//!
//! - Each snap point claims an *applicable zone* of input values, negotiated
//!   with its neighbors in sort order.
//! - A second *impulse zone* is used during inertia started by a flick, so
//!   that the value the content is resting on can be skipped.
//! - Coincident points are combined and behave as one.
//!
//! ## Snap point shapes
//!
//! - [`IrregularSnapPoint`]: a single value. Its zone extends halfway toward each
//!   neighbor, or to infinity at the ends of the collection.
//! - [`RepeatedSnapPoint`]: the values `offset + k * interval` within `[start, end]`.
//!   Its zone is exactly `[start, end]`, and no other point may lie strictly inside it.
//!
//! Both can be aligned to the near edge, the center or the far edge of the
//! viewport with [`SnapPointAlignment`]. Aligned points move when the viewport
//! extent changes.
//!
//! ## API overview
//!
//! - [`SnapPoints`]: one axis worth of snap points, with zone negotiation and evaluation.
//! - [`SnapPointId`]: generational handle of an inserted point.
//! - [`SnapPointEntry`]: collection-scoped state (zones, combination count, ignored value).
//! - [`ScrollSnapPoints`]: horizontal, vertical and zoom collections fed from a [`kurbo::Size`] viewport.
//! - [`ExpressionBuilder`]: seam for hosts that express snapping as declarative animations.
//! - [`SnapError`]: invalid arguments and configurations.
//!
//! Key operations:
//! - [`SnapPoints::insert`] / [`SnapPoints::remove`] recompute every zone.
//! - [`SnapPoints::set_ignored_value`] / [`SnapPoints::clear_ignored_value`] recompute impulse zones only.
//! - [`SnapPoints::update_viewport`] re-applies alignment.
//! - [`SnapPoints::evaluate`] and [`SnapPoints::snaps_at`] answer where a value rests.
//!
//! ## Example
//!
//! ```rust
//! use understory_snap::{SnapPoint, SnapPoints, Zone};
//!
//! let mut points = SnapPoints::new();
//! points.insert(SnapPoint::irregular(0.0)).unwrap();
//! let pages = points
//!     .insert(SnapPoint::repeated(100.0, 100.0, 100.0, 500.0).unwrap())
//!     .unwrap();
//!
//! assert_eq!(points.zone(pages), Some(Zone::new(100.0, 500.0)));
//! assert_eq!(points.evaluate(40.0), 0.0);
//! assert_eq!(points.evaluate(260.0), 300.0);
//! assert_eq!(points.evaluate(900.0), 900.0);
//! ```
//!
//! Values beyond the last repeated range are not claimed by any point and
//! evaluate to themselves.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//! - `tracing`: emits `tracing` events from the recompute pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alignment;
mod collection;
mod config;
mod container;
mod entry;
mod error;
mod expression;
mod point;
mod sort_key;
mod zone;

pub use alignment::SnapPointAlignment;
pub use collection::{Recompute, SnapPointId, SnapPoints};
pub use config::{DEFAULT_EPSILON, SnapConfig};
pub use container::{ScrollSnapPoints, SnapAxes, SnapAxis};
pub use entry::SnapPointEntry;
pub use error::{SnapError, SnapErrorKind, SnapPointKind};
pub use expression::{ExpressionBuilder, ExpressionInputs, SnapExpressions};
pub use point::{IrregularSnapPoint, RepeatedSnapPoint, SnapPoint};
pub use sort_key::SortKey;
pub use zone::Zone;
