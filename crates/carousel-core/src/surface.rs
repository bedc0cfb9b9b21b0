//! Rendering surface abstraction
//!
//! The controller never touches a DOM directly. Everything it needs from the
//! host page goes through [`TrackSurface`], which allows the engine to run
//! against a real browser (`carousel-web`) or an in-memory mock in tests.

use crate::transition::Easing;

/// How an offset change is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackTransition {
    /// Animate to the new offset
    Animated {
        /// Animation length in milliseconds
        duration_ms: u32,
        /// Timing curve
        easing: Easing,
    },
    /// Jump to the new offset with transitions disabled
    Instant,
}

impl TrackTransition {
    /// Check if the change is animated
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, TrackTransition::Animated { .. })
    }
}

/// Host surface holding the slide track and the pagination dots
///
/// Slide indices address the whole track (`0..3N`), dot indices address
/// the ring (`0..N`).
pub trait TrackSurface {
    /// Whether the track element is attached to the page
    fn is_mounted(&self) -> bool;

    /// Rendered width of the whole track in pixels, 0 if not laid out
    fn track_width_px(&self) -> f64;

    /// Computed CSS transform of the track (`none`, `matrix(...)`), if any
    fn rendered_transform(&self) -> Option<String>;

    /// Replace the slides and pagination dots
    ///
    /// Every slide starts dimmed and every dot inactive.
    fn rebuild(&mut self, slides: &[String], dots: usize);

    /// Size the track so that `visible` slides fill the viewport, and move
    /// it without animation to the start of the middle copy
    fn set_track_layout(&mut self, ring_size: usize, visible: usize);

    /// Translate the track horizontally
    fn apply_offset(&mut self, offset_px: f64, transition: TrackTransition);

    /// Dim or undim one slide
    fn set_slide_dimmed(&mut self, index: usize, dimmed: bool);

    /// Activate or deactivate one pagination dot
    fn set_dot_active(&mut self, index: usize, active: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_kind() {
        let animated = TrackTransition::Animated {
            duration_ms: 200,
            easing: Easing::EaseInOut,
        };
        assert!(animated.is_animated());
        assert!(!TrackTransition::Instant.is_animated());
    }
}
