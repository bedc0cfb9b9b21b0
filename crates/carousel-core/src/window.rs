//! Window arithmetic over the tripled track
//!
//! The track holds three copies of the ring so that a step in either
//! direction always has real slides to move into. The controller keeps the
//! leftmost visible slide inside the middle copy `[N, 2N)`; once a step
//! leaves it, a wrap-teleport moves the track back by one copy width
//! without animation.

/// Number of ring copies rendered into the track
pub const TRACK_COPIES: usize = 3;

/// Slack for offsets read back from rounded layout values
const SLIDE_EPSILON: f64 = 1e-3;

/// Length of the track for a ring of `ring_size` items
#[inline]
pub fn track_len(ring_size: usize) -> usize {
    ring_size * TRACK_COPIES
}

/// Left slide count of a freshly laid out track (start of the middle copy)
#[inline]
pub fn home_left(ring_size: usize) -> usize {
    ring_size
}

/// Reduce an index into `[0, ring_size)`
///
/// Equal to the mathematical modulo. A ring of size 0 maps everything to 0.
#[inline]
pub fn normalize_to_ring(index: usize, ring_size: usize) -> usize {
    if ring_size == 0 {
        return 0;
    }
    index % ring_size
}

/// Number of whole slides scrolled past the left edge
///
/// `floor(-offset / slide_width)`, clamped into the track. Returns 0 when
/// the slide width is not measurable.
pub fn left_slide_count(offset_px: f64, slide_width_px: f64, ring_size: usize) -> usize {
    if !slide_width_px.is_finite() || slide_width_px <= 0.0 || !offset_px.is_finite() {
        return 0;
    }
    let slides = (-offset_px / slide_width_px + SLIDE_EPSILON).floor();
    if slides <= 0.0 {
        return 0;
    }
    let last = track_len(ring_size).saturating_sub(1);
    (slides as usize).min(last)
}

/// Non-animated correction applied after a step leaves the middle copy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapCorrection {
    /// The window ran into the last copy; move back by one copy width
    Backward,
    /// The window ran into the first copy; move forward by one copy width
    Forward,
}

impl WrapCorrection {
    /// Left slide count after the correction
    pub fn apply(self, left: usize, ring_size: usize) -> usize {
        match self {
            WrapCorrection::Backward => left.saturating_sub(ring_size),
            WrapCorrection::Forward => left + ring_size,
        }
    }
}

/// Check whether the left slide count requires a wrap-teleport
///
/// `None` for every position in the middle copy, so a corrected position
/// never triggers another correction.
pub fn wrap_correction(left: usize, ring_size: usize) -> Option<WrapCorrection> {
    if ring_size == 0 {
        None
    } else if left >= 2 * ring_size {
        Some(WrapCorrection::Backward)
    } else if left < ring_size {
        Some(WrapCorrection::Forward)
    } else {
        None
    }
}

/// The `visible` consecutive ring items starting at `start`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleWindow {
    /// First visible ring index, in `[0, ring_size)`
    pub start: usize,
    /// Number of visible items
    pub len: usize,
    /// Ring size
    pub ring_size: usize,
}

impl VisibleWindow {
    /// Window starting at `target`, reduced into the ring
    pub fn at(target: usize, ring_size: usize, visible: usize) -> Self {
        Self {
            start: normalize_to_ring(target, ring_size),
            len: visible.min(ring_size),
            ring_size,
        }
    }

    /// Ring indices of the active pagination dots
    pub fn dots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |j| normalize_to_ring(self.start + j, self.ring_size))
    }

    /// Track indices of the undimmed slides, `len` per copy
    ///
    /// Positions past the end of the track are skipped.
    pub fn slides(&self) -> impl Iterator<Item = usize> + '_ {
        let total = track_len(self.ring_size);
        (0..TRACK_COPIES)
            .flat_map(move |copy| (0..self.len).map(move |j| copy * self.ring_size + self.start + j))
            .filter(move |&i| i < total)
    }

    /// Check if ring item `dot` is in the window
    pub fn contains_dot(&self, dot: usize) -> bool {
        self.dots().any(|d| d == dot)
    }

    /// Check if track slide `slide` is undimmed by the window
    pub fn contains_slide(&self, slide: usize) -> bool {
        self.slides().any(|s| s == slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_to_ring() {
        assert_eq!(normalize_to_ring(0, 7), 0);
        assert_eq!(normalize_to_ring(6, 7), 6);
        assert_eq!(normalize_to_ring(7, 7), 0);
        assert_eq!(normalize_to_ring(20, 7), 6);
        assert_eq!(normalize_to_ring(300, 7), 300 % 7);
        assert_eq!(normalize_to_ring(5, 0), 0);
    }

    #[test]
    fn test_left_slide_count() {
        assert_eq!(left_slide_count(-700.0, 100.0, 7), 7);
        assert_eq!(left_slide_count(-750.0, 100.0, 7), 7);
        assert_eq!(left_slide_count(0.0, 100.0, 7), 0);
        assert_eq!(left_slide_count(50.0, 100.0, 7), 0);
    }

    #[test]
    fn test_left_slide_count_tolerates_rounding() {
        // 3 * 33.333 rounds just short of a whole slide
        assert_eq!(left_slide_count(-99.99999, 33.33333, 7), 3);
    }

    #[test]
    fn test_left_slide_count_unmeasurable() {
        assert_eq!(left_slide_count(-700.0, 0.0, 7), 0);
        assert_eq!(left_slide_count(f64::NAN, 100.0, 7), 0);
    }

    #[test]
    fn test_left_slide_count_clamped_to_track() {
        assert_eq!(left_slide_count(-10_000.0, 100.0, 7), 20);
    }

    #[test]
    fn test_wrap_correction() {
        assert_eq!(wrap_correction(7, 7), None);
        assert_eq!(wrap_correction(13, 7), None);
        assert_eq!(wrap_correction(14, 7), Some(WrapCorrection::Backward));
        assert_eq!(wrap_correction(6, 7), Some(WrapCorrection::Forward));
        assert_eq!(WrapCorrection::Backward.apply(14, 7), 7);
        assert_eq!(WrapCorrection::Forward.apply(6, 7), 13);
    }

    #[test]
    fn test_corrected_positions_are_stable() {
        for n in 1..10 {
            for left in 0..track_len(n) {
                let corrected = match wrap_correction(left, n) {
                    Some(c) => c.apply(left, n),
                    None => left,
                };
                assert!(corrected >= n && corrected < 2 * n);
                assert_eq!(wrap_correction(corrected, n), None);
            }
        }
    }

    #[test]
    fn test_window_dots_wrap() {
        let window = VisibleWindow::at(12, 7, 3);
        assert_eq!(window.start, 5);
        assert_eq!(window.dots().collect::<Vec<_>>(), vec![5, 6, 0]);
        assert!(window.contains_dot(0));
        assert!(!window.contains_dot(1));
    }

    #[test]
    fn test_window_slides_per_copy() {
        let window = VisibleWindow::at(0, 7, 3);
        assert_eq!(
            window.slides().collect::<Vec<_>>(),
            vec![0, 1, 2, 7, 8, 9, 14, 15, 16]
        );
    }

    #[test]
    fn test_window_slides_skip_past_track_end() {
        let window = VisibleWindow::at(6, 7, 3);
        assert_eq!(
            window.slides().collect::<Vec<_>>(),
            vec![6, 7, 8, 13, 14, 15, 20]
        );
        assert!(window.contains_slide(20));
        assert!(!window.contains_slide(0));
    }
}
