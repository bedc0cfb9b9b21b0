//! Easing functions for track animations

/// Ease-in-out cubic function
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Timing curve of an animated offset change
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Slow start and end (CSS `ease-in-out`)
    #[default]
    EaseInOut,
    /// Constant speed
    Linear,
}

impl Easing {
    /// Sample the curve at `t` in `[0, 1]`
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseInOut => ease_in_out(t),
            Easing::Linear => linear(t),
        }
    }

    /// CSS timing function keyword
    pub fn css(self) -> &'static str {
        match self {
            Easing::EaseInOut => "ease-in-out",
            Easing::Linear => "linear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out() {
        assert!((ease_in_out(0.0) - 0.0).abs() < 0.001);
        assert!((ease_in_out(1.0) - 1.0).abs() < 0.001);
        assert!((ease_in_out(0.5) - 0.5).abs() < 0.001);
        // Slow start
        assert!(ease_in_out(0.1) < 0.1);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::EaseInOut.apply(-1.0) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(2.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_css_keywords() {
        assert_eq!(Easing::EaseInOut.css(), "ease-in-out");
        assert_eq!(Easing::Linear.css(), "linear");
    }
}
