//! Mock track surface for testing
//!
//! Lays out `visible` slides across a viewport of fixed width, renders
//! offsets as `matrix(...)` transforms and records every call.

use crate::surface::{TrackSurface, TrackTransition};
use crate::window::track_len;

/// A call made on the surface
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    /// Slides and dots replaced
    Rebuild {
        /// Number of slides
        slides: usize,
        /// Number of dots
        dots: usize,
    },
    /// Track sized and moved to the middle copy
    Layout {
        /// Ring size
        ring_size: usize,
        /// Visible slides
        visible: usize,
    },
    /// Track translated
    Offset {
        /// Offset (px)
        px: f64,
        /// Presentation
        transition: TrackTransition,
    },
    /// Slide dimmed or undimmed
    SlideDimmed {
        /// Track index
        index: usize,
        /// New state
        dimmed: bool,
    },
    /// Dot activated or deactivated
    DotActive {
        /// Ring index
        index: usize,
        /// New state
        active: bool,
    },
}

/// In-memory track surface
///
/// Starts mounted and measurable. The track is only laid out (and has a
/// width) after [`TrackSurface::set_track_layout`].
#[derive(Clone, Debug)]
pub struct MockSurface {
    /// Viewport width (px)
    viewport_px: f64,
    mounted: bool,
    measurable: bool,
    ring_size: usize,
    visible: usize,
    /// Current offset, `None` until the first layout
    offset_px: Option<f64>,
    slides: Vec<String>,
    dimmed: Vec<bool>,
    active: Vec<bool>,
    calls: Vec<SurfaceCall>,
}

impl MockSurface {
    /// Create a mounted surface with a viewport of `viewport_px`
    pub fn new(viewport_px: f64) -> Self {
        Self {
            viewport_px,
            mounted: true,
            measurable: true,
            ring_size: 0,
            visible: 0,
            offset_px: None,
            slides: Vec::new(),
            dimmed: Vec::new(),
            active: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Attach or detach the track
    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Make the track report a width of 0 (not laid out)
    pub fn set_measurable(&mut self, measurable: bool) {
        self.measurable = measurable;
    }

    /// Change the viewport width
    pub fn set_viewport_px(&mut self, viewport_px: f64) {
        self.viewport_px = viewport_px;
    }

    /// Width of one slide (px)
    pub fn slide_width_px(&self) -> f64 {
        if self.visible == 0 {
            0.0
        } else {
            self.viewport_px / self.visible as f64
        }
    }

    /// Current offset (px), 0 before the first layout
    pub fn offset_px(&self) -> f64 {
        self.offset_px.unwrap_or(0.0)
    }

    /// Number of visible slides of the last layout
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Slides of the last rebuild
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Number of dots
    pub fn dot_count(&self) -> usize {
        self.active.len()
    }

    /// Undimmed slide indices
    pub fn undimmed_slides(&self) -> Vec<usize> {
        (0..self.dimmed.len()).filter(|&i| !self.dimmed[i]).collect()
    }

    /// Active dot indices
    pub fn active_dots(&self) -> Vec<usize> {
        (0..self.active.len()).filter(|&i| self.active[i]).collect()
    }

    /// Recorded calls
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Recorded offset changes
    pub fn offsets(&self) -> Vec<(f64, TrackTransition)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Offset { px, transition } => Some((*px, *transition)),
                _ => None,
            })
            .collect()
    }
}

impl TrackSurface for MockSurface {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn track_width_px(&self) -> f64 {
        if !self.mounted || !self.measurable {
            return 0.0;
        }
        self.slide_width_px() * track_len(self.ring_size) as f64
    }

    fn rendered_transform(&self) -> Option<String> {
        if !self.mounted {
            return None;
        }
        Some(match self.offset_px {
            Some(px) => format!("matrix(1, 0, 0, 1, {px}, 0)"),
            None => "none".to_string(),
        })
    }

    fn rebuild(&mut self, slides: &[String], dots: usize) {
        self.slides = slides.to_vec();
        self.dimmed = vec![true; slides.len()];
        self.active = vec![false; dots];
        self.ring_size = dots;
        self.calls.push(SurfaceCall::Rebuild {
            slides: slides.len(),
            dots,
        });
    }

    fn set_track_layout(&mut self, ring_size: usize, visible: usize) {
        self.ring_size = ring_size;
        self.visible = visible;
        self.offset_px = Some(-(ring_size as f64) * self.slide_width_px());
        self.calls.push(SurfaceCall::Layout { ring_size, visible });
    }

    fn apply_offset(&mut self, offset_px: f64, transition: TrackTransition) {
        self.offset_px = Some(offset_px);
        self.calls.push(SurfaceCall::Offset {
            px: offset_px,
            transition,
        });
    }

    fn set_slide_dimmed(&mut self, index: usize, dimmed: bool) {
        if let Some(slot) = self.dimmed.get_mut(index) {
            *slot = dimmed;
        }
        self.calls.push(SurfaceCall::SlideDimmed { index, dimmed });
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.active.get_mut(index) {
            *slot = active;
        }
        self.calls.push(SurfaceCall::DotActive { index, active });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{current_offset_px, measured_slide_width_px};

    #[test]
    fn test_layout_geometry() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        assert!((surface.track_width_px() - 0.0).abs() < 0.001);
        assert_eq!(surface.rendered_transform().as_deref(), Some("none"));

        surface.set_track_layout(7, 3);
        assert!((surface.track_width_px() - 6300.0).abs() < 0.001);
        assert!((measured_slide_width_px(&surface, 7) - 300.0).abs() < 0.001);
        assert!((current_offset_px(&surface) - (-2100.0)).abs() < 0.001);
    }

    #[test]
    fn test_rebuild_resets_state() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 6], 2);
        surface.set_slide_dimmed(1, false);
        surface.set_dot_active(0, true);
        assert_eq!(surface.undimmed_slides(), vec![1]);
        assert_eq!(surface.active_dots(), vec![0]);

        surface.rebuild(&vec![String::new(); 6], 2);
        assert!(surface.undimmed_slides().is_empty());
        assert!(surface.active_dots().is_empty());
        assert_eq!(surface.dot_count(), 2);
    }

    #[test]
    fn test_unmounted() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        surface.set_track_layout(7, 3);
        surface.set_mounted(false);
        assert!(!surface.is_mounted());
        assert_eq!(surface.rendered_transform(), None);
        assert!((surface.track_width_px() - 0.0).abs() < 0.001);
    }
}
