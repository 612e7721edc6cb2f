// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-relative alignment of scroll snap points.

/// Which edge of the viewport a snap point value refers to.
///
/// Snap point values are expressed in content coordinates. A `Near` point
/// rests when the viewport's near edge (left/top) reaches the value; `Center`
/// and `Far` points rest when the viewport center or far edge reaches it,
/// which shifts the resting scroll offset by half or all of the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SnapPointAlignment {
    /// Align with the near edge of the viewport.
    #[default]
    Near,
    /// Align with the center of the viewport.
    Center,
    /// Align with the far edge of the viewport.
    Far,
}

impl SnapPointAlignment {
    /// Returns the offset applied to snap point values for a viewport extent.
    ///
    /// `Near` yields `0`, `Center` yields `-viewport / 2` and `Far` yields
    /// `-viewport`.
    #[must_use]
    pub fn adjustment(self, viewport: f64) -> f64 {
        match self {
            Self::Near => 0.0,
            Self::Center => -viewport / 2.0,
            Self::Far => -viewport,
        }
    }

    /// Returns `true` if the adjustment depends on the viewport extent.
    #[must_use]
    pub fn is_viewport_sensitive(self) -> bool {
        !matches!(self, Self::Near)
    }
}
