// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis snap point collections of a scrolling container.

use kurbo::Size;

use crate::collection::SnapPoints;
use crate::config::SnapConfig;
use crate::error::SnapError;

/// One of the axes a scrolling container snaps on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapAxis {
    /// Horizontal scroll offset.
    Horizontal,
    /// Vertical scroll offset.
    Vertical,
    /// Zoom factor.
    Zoom,
}

bitflags::bitflags! {
    /// Set of axes, as reported by [`ScrollSnapPoints::set_viewport`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SnapAxes: u8 {
        /// The horizontal collection.
        const HORIZONTAL = 0b0000_0001;
        /// The vertical collection.
        const VERTICAL   = 0b0000_0010;
        /// The zoom collection.
        const ZOOM       = 0b0000_0100;
    }
}

impl From<SnapAxis> for SnapAxes {
    fn from(axis: SnapAxis) -> Self {
        match axis {
            SnapAxis::Horizontal => Self::HORIZONTAL,
            SnapAxis::Vertical => Self::VERTICAL,
            SnapAxis::Zoom => Self::ZOOM,
        }
    }
}

/// The three independent snap point collections of a scrolling container.
///
/// Axes never interact: each collection negotiates its own zones. The
/// container only routes the viewport extent to the scroll axes; zoom
/// snap points are never adjusted for the viewport.
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use understory_snap::{IrregularSnapPoint, ScrollSnapPoints, SnapAxes, SnapAxis, SnapPointAlignment};
///
/// let mut snap = ScrollSnapPoints::new();
/// snap.axis_mut(SnapAxis::Vertical)
///     .insert(
///         IrregularSnapPoint::new(500.0)
///             .with_alignment(SnapPointAlignment::Center)
///             .into(),
///     )
///     .unwrap();
///
/// let changed = snap.set_viewport(Size::new(300.0, 200.0)).unwrap();
/// assert_eq!(changed, SnapAxes::VERTICAL);
/// assert_eq!(snap.axis(SnapAxis::Vertical).evaluate(0.0), 400.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScrollSnapPoints {
    horizontal: SnapPoints,
    vertical: SnapPoints,
    zoom: SnapPoints,
}

impl ScrollSnapPoints {
    /// Creates empty collections with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty collections sharing `config`.
    #[must_use]
    pub fn with_config(config: SnapConfig) -> Self {
        Self {
            horizontal: SnapPoints::with_config(config),
            vertical: SnapPoints::with_config(config),
            zoom: SnapPoints::with_config(config),
        }
    }

    /// Returns the collection for `axis`.
    #[must_use]
    pub fn axis(&self, axis: SnapAxis) -> &SnapPoints {
        match axis {
            SnapAxis::Horizontal => &self.horizontal,
            SnapAxis::Vertical => &self.vertical,
            SnapAxis::Zoom => &self.zoom,
        }
    }

    /// Returns the collection for `axis`, mutably.
    pub fn axis_mut(&mut self, axis: SnapAxis) -> &mut SnapPoints {
        match axis {
            SnapAxis::Horizontal => &mut self.horizontal,
            SnapAxis::Vertical => &mut self.vertical,
            SnapAxis::Zoom => &mut self.zoom,
        }
    }

    /// Forwards a new viewport to the scroll axes.
    ///
    /// The width goes to the horizontal collection and the height to the
    /// vertical one. Returns the axes whose zones were recomputed.
    ///
    /// # Errors
    ///
    /// Propagates the first recompute error. The horizontal axis is updated
    /// before the vertical one.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<SnapAxes, SnapError> {
        let mut changed = SnapAxes::empty();
        if self.horizontal.update_viewport(viewport.width)? {
            changed |= SnapAxes::HORIZONTAL;
        }
        if self.vertical.update_viewport(viewport.height)? {
            changed |= SnapAxes::VERTICAL;
        }
        Ok(changed)
    }

    /// Snaps `value` on `axis`.
    #[must_use]
    pub fn evaluate(&self, axis: SnapAxis, value: f64) -> f64 {
        self.axis(axis).evaluate(value)
    }
}
