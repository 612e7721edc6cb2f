// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while constructing snap points or computing their zones.

use core::fmt;

/// The two structurally distinct shapes of snap point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapPointKind {
    /// A single resting value.
    Irregular,
    /// An evenly spaced sequence of resting values clipped to a range.
    Repeated,
}

impl fmt::Display for SnapPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular => f.write_str("irregular"),
            Self::Repeated => f.write_str("repeated"),
        }
    }
}

/// Broad classes of [`SnapError`].
///
/// None of them are transient: every error stems from caller-supplied
/// configuration, so retrying the same operation fails the same way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapErrorKind {
    /// A snap point was constructed from invalid arguments.
    InvalidArgument,
    /// A set of snap points cannot be partitioned into zones.
    InvalidConfiguration,
    /// Two coincident snap points of different shapes cannot be merged.
    IncompatibleCombination,
}

/// Error type for snap point construction and zone negotiation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SnapError {
    /// A repeated snap point was given an interval that is not positive.
    #[error("snap point interval must be positive, got {interval}")]
    NonPositiveInterval {
        /// The rejected interval.
        interval: f64,
    },
    /// A repeated snap point was given an end that does not exceed its start.
    #[error("snap point end ({end}) must be greater than its start ({start})")]
    EmptyRange {
        /// The requested start.
        start: f64,
        /// The requested end.
        end: f64,
    },
    /// A repeated snap point offset lies outside of `[start, end]`.
    #[error("snap point offset ({offset}) must lie within [{start}, {end}]")]
    OffsetOutOfRange {
        /// The rejected offset.
        offset: f64,
        /// The range start.
        start: f64,
        /// The range end.
        end: f64,
    },
    /// A snap point was given a NaN or infinite value.
    #[error("snap point values must be finite, got {value}")]
    NonFiniteValue {
        /// The rejected value.
        value: f64,
    },
    /// A declared applicable range is not positive.
    #[error("snap point applicable range must be positive, got {range}")]
    NonPositiveApplicableRange {
        /// The rejected range.
        range: f64,
    },
    /// A neighboring snap point falls strictly inside a repeated range.
    #[error("value {value} lies inside the repeated snap point range ({start}, {end})")]
    InsideRepeatedRange {
        /// The offending neighbor value.
        value: f64,
        /// Actual start of the repeated range.
        start: f64,
        /// Actual end of the repeated range.
        end: f64,
    },
    /// Two repeated snap points cover the same range.
    #[error("two repeated snap points share the range [{start}, {end}]")]
    DuplicateRepeatedRange {
        /// Actual start of the shared range.
        start: f64,
        /// Actual end of the shared range.
        end: f64,
    },
    /// Two coincident snap points cannot be merged.
    #[error("cannot combine {existing} snap point with coincident {other} snap point")]
    IncompatibleCombination {
        /// Shape of the snap point absorbing the other one.
        existing: SnapPointKind,
        /// Shape of the snap point being absorbed.
        other: SnapPointKind,
    },
}

impl SnapError {
    /// Returns the class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> SnapErrorKind {
        match self {
            Self::NonPositiveInterval { .. }
            | Self::EmptyRange { .. }
            | Self::OffsetOutOfRange { .. }
            | Self::NonFiniteValue { .. }
            | Self::NonPositiveApplicableRange { .. } => SnapErrorKind::InvalidArgument,
            Self::InsideRepeatedRange { .. } | Self::DuplicateRepeatedRange { .. } => {
                SnapErrorKind::InvalidConfiguration
            }
            Self::IncompatibleCombination { .. } => SnapErrorKind::IncompatibleCombination,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{SnapError, SnapErrorKind, SnapPointKind};

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            SnapError::NonPositiveInterval { interval: 0.0 }.kind(),
            SnapErrorKind::InvalidArgument
        );
        assert_eq!(
            SnapError::InsideRepeatedRange {
                value: 25.0,
                start: 0.0,
                end: 50.0,
            }
            .kind(),
            SnapErrorKind::InvalidConfiguration
        );
        assert_eq!(
            SnapError::NonFiniteValue { value: f64::NAN }.kind(),
            SnapErrorKind::InvalidArgument
        );
        assert_eq!(
            SnapError::DuplicateRepeatedRange {
                start: 0.0,
                end: 50.0,
            }
            .kind(),
            SnapErrorKind::InvalidConfiguration
        );
        assert_eq!(
            SnapError::IncompatibleCombination {
                existing: SnapPointKind::Repeated,
                other: SnapPointKind::Irregular,
            }
            .kind(),
            SnapErrorKind::IncompatibleCombination
        );
    }

    #[test]
    fn display_names_both_shapes() {
        let err = SnapError::IncompatibleCombination {
            existing: SnapPointKind::Irregular,
            other: SnapPointKind::Repeated,
        };
        assert_eq!(
            err.to_string(),
            "cannot combine irregular snap point with coincident repeated snap point"
        );
    }
}
