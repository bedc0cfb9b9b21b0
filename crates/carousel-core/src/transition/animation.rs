//! Offset animation for one carousel step

use super::Easing;

/// In-flight track animation
///
/// Mirrors the CSS transition the host applies, so the controller can tell
/// when the step has settled and report the visual offset in between.
#[derive(Clone, Debug)]
pub struct TrackAnimation {
    /// Offset at the start of the step (px)
    from_px: f64,
    /// Offset at the end of the step (px)
    to_px: f64,
    /// Start time (ms timestamp)
    start_ms: f64,
    /// Duration (ms)
    duration_ms: u32,
    easing: Easing,
}

impl TrackAnimation {
    /// Create a new track animation
    pub fn new(from_px: f64, to_px: f64, start_ms: f64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from_px,
            to_px,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Get the progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = (now_ms - self.start_ms) as f32;
        (elapsed / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Check if animation is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Time at which the animation settles
    pub fn end_ms(&self) -> f64 {
        self.start_ms + f64::from(self.duration_ms)
    }

    /// Get the current offset
    pub fn current(&self, now_ms: f64) -> f64 {
        let t = f64::from(self.easing.apply(self.progress(now_ms)));
        self.from_px + (self.to_px - self.from_px) * t
    }

    /// Get final offset
    pub fn final_offset(&self) -> f64 {
        self.to_px
    }

    /// Get starting offset
    pub fn start_offset(&self) -> f64 {
        self.from_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_animation() {
        let anim = TrackAnimation::new(-700.0, -800.0, 1000.0, 200, Easing::EaseInOut);

        assert!((anim.current(1000.0) - (-700.0)).abs() < 0.001);
        assert!((anim.current(1100.0) - (-750.0)).abs() < 0.001);
        assert!(anim.is_complete(1200.0));
        assert!((anim.current(1500.0) - (-800.0)).abs() < 0.001);
        assert!((anim.end_ms() - 1200.0).abs() < 0.001);
    }

    #[test]
    fn test_track_animation_progress() {
        let anim = TrackAnimation::new(0.0, 100.0, 0.0, 200, Easing::Linear);

        assert!((anim.progress(0.0) - 0.0).abs() < 0.001);
        assert!((anim.progress(50.0) - 0.25).abs() < 0.001);
        assert!(!anim.is_complete(199.0));
        assert!((anim.start_offset() - 0.0).abs() < 0.001);
        assert!((anim.final_offset() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let anim = TrackAnimation::new(0.0, 50.0, 10.0, 0, Easing::Linear);
        assert!(anim.is_complete(10.0));
        assert!((anim.current(10.0) - 50.0).abs() < 0.001);
    }
}
