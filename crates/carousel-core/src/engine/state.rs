//! Driver state and navigation outcomes

use std::fmt;

use serde::Serialize;

use crate::window::WrapCorrection;

/// Phase of the transition driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DriverState {
    /// Nothing in flight
    Idle,
    /// An animated step has not settled yet
    Animating,
    /// The step settled and a wrap-teleport is pending
    AwaitingTeleport,
}

/// Why a navigation request did nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    /// The previous accepted step was less than the throttle interval ago
    Throttled,
    /// The track is not attached to the page
    NotMounted,
    /// The track has no measurable width yet
    NotMeasurable,
    /// Jump target outside `[0, N)`
    OutOfRange,
    /// Jump target is the current slide
    AlreadyCurrent,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Throttled => "throttled",
            Rejection::NotMounted => "track not mounted",
            Rejection::NotMeasurable => "track not measurable",
            Rejection::OutOfRange => "target out of range",
            Rejection::AlreadyCurrent => "already at target",
        };
        f.write_str(reason)
    }
}

/// Result of a navigation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The track moved
    Moved {
        /// New current slide in `[0, N)`
        current: usize,
        /// New left slide count
        left: usize,
        /// Wrap-teleport scheduled for after the animation
        teleport: Option<WrapCorrection>,
    },
    /// Nothing happened
    Rejected(Rejection),
}

impl NavOutcome {
    /// Check if the track moved
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }

    /// New current slide, if the track moved
    pub fn current(&self) -> Option<usize> {
        match self {
            NavOutcome::Moved { current, .. } => Some(*current),
            NavOutcome::Rejected(_) => None,
        }
    }

    /// Rejection reason, if nothing happened
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            NavOutcome::Rejected(reason) => Some(*reason),
            NavOutcome::Moved { .. } => None,
        }
    }

    /// Scheduled wrap-teleport, if any
    pub fn teleport(&self) -> Option<WrapCorrection> {
        match self {
            NavOutcome::Moved { teleport, .. } => *teleport,
            NavOutcome::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let moved = NavOutcome::Moved {
            current: 1,
            left: 8,
            teleport: None,
        };
        assert!(moved.is_moved());
        assert_eq!(moved.current(), Some(1));
        assert_eq!(moved.rejection(), None);

        let rejected = NavOutcome::Rejected(Rejection::Throttled);
        assert!(!rejected.is_moved());
        assert_eq!(rejected.current(), None);
        assert_eq!(rejected.rejection(), Some(Rejection::Throttled));
    }

    #[test]
    fn test_rejection_serialization() {
        let json = serde_json::to_string(&Rejection::AlreadyCurrent).unwrap();
        assert_eq!(json, r#""alreadyCurrent""#);
        assert_eq!(Rejection::Throttled.to_string(), "throttled");
    }
}
