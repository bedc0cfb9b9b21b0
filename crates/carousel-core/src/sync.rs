//! Sync layer for slide dimming and pagination dots
//!
//! [`toggle_visibility`] and [`update_pagination`] flip state in windows:
//! calling either twice with the same arguments restores the previous
//! state. The [`SyncLayer`] only uses them on scratch masks to find the
//! entries that differ between the outgoing and incoming window, then sets
//! each of those explicitly from the incoming window. The surface is
//! always driven with absolute values, so a missed call can never leave it
//! permanently out of step.

use crate::surface::TrackSurface;
use crate::window::{track_len, VisibleWindow};

/// Fixed-size set of flags with window toggles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleMask {
    bits: Vec<bool>,
}

impl ToggleMask {
    /// Create a mask of `len` cleared flags
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Create a mask of `len` set flags
    pub fn filled(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// Number of flags
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the mask holds no flags
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Read one flag (out of range reads as cleared)
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Write one flag, ignoring out of range indices
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip one flag, ignoring out of range indices
    pub fn toggle(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Indices of the set flags
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &bit)| bit.then_some(i))
    }
}

/// Flip the dimmed state of the slides a window at `target` covers
///
/// `mask` spans the whole track (`3 * ring_size` flags). For each copy the
/// `visible` slides starting at the normalized target are flipped.
pub fn toggle_visibility(mask: &mut ToggleMask, target: usize, ring_size: usize, visible: usize) {
    for slide in VisibleWindow::at(target, ring_size, visible).slides() {
        mask.toggle(slide);
    }
}

/// Flip the active state of the dots a window at `current` covers
pub fn update_pagination(mask: &mut ToggleMask, current: usize, ring_size: usize, visible: usize) {
    for dot in VisibleWindow::at(current, ring_size, visible).dots() {
        mask.toggle(dot);
    }
}

/// Authoritative slide and dot state of one carousel
#[derive(Clone, Debug)]
pub struct SyncLayer {
    ring_size: usize,
    /// Dimmed slides as last written to the surface
    dimmed: ToggleMask,
    /// Active dots as last written to the surface
    active: ToggleMask,
    /// Window the slides currently reflect (None until revealed)
    slide_window: Option<VisibleWindow>,
    /// Window the dots currently reflect
    dot_window: Option<VisibleWindow>,
    /// Whether slide dimming follows the window yet
    revealed: bool,
}

impl SyncLayer {
    /// State of a freshly rebuilt track: all slides dimmed, no dot active
    pub fn new(ring_size: usize) -> Self {
        Self {
            ring_size,
            dimmed: ToggleMask::filled(track_len(ring_size)),
            active: ToggleMask::new(ring_size),
            slide_window: None,
            dot_window: None,
            revealed: false,
        }
    }

    /// Ring size the layer was built for
    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    /// Check if slide dimming has been revealed
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Check if a track slide is dimmed
    pub fn is_dimmed(&self, slide: usize) -> bool {
        self.dimmed.get(slide)
    }

    /// Check if a pagination dot is active
    pub fn is_active(&self, dot: usize) -> bool {
        self.active.get(dot)
    }

    /// Active dot indices
    pub fn active_dots(&self) -> Vec<usize> {
        self.active.ones().collect()
    }

    /// Undimmed slide indices
    pub fn undimmed_slides(&self) -> Vec<usize> {
        (0..self.dimmed.len()).filter(|&i| !self.dimmed.get(i)).collect()
    }

    /// Show `window`: dots always, slides once revealed
    pub fn show<S: TrackSurface + ?Sized>(&mut self, window: VisibleWindow, surface: &mut S) {
        self.sync_dots(window, surface);
        if self.revealed {
            self.sync_slides(window, surface);
        }
    }

    /// Start following the window with slide dimming
    pub fn reveal<S: TrackSurface + ?Sized>(&mut self, window: VisibleWindow, surface: &mut S) {
        self.revealed = true;
        self.sync_slides(window, surface);
        self.sync_dots(window, surface);
    }

    /// Dim every slide and deactivate every dot, without a rebuild
    pub fn conceal<S: TrackSurface + ?Sized>(&mut self, surface: &mut S) {
        for slide in 0..self.dimmed.len() {
            if !self.dimmed.get(slide) {
                self.dimmed.set(slide, true);
                surface.set_slide_dimmed(slide, true);
            }
        }
        let active: Vec<usize> = self.active.ones().collect();
        for dot in active {
            self.active.set(dot, false);
            surface.set_dot_active(dot, false);
        }
        self.slide_window = None;
        self.dot_window = None;
        self.revealed = false;
    }

    fn sync_slides<S: TrackSurface + ?Sized>(&mut self, window: VisibleWindow, surface: &mut S) {
        let mut delta = ToggleMask::new(self.dimmed.len());
        if let Some(old) = self.slide_window {
            toggle_visibility(&mut delta, old.start, self.ring_size, old.len);
        }
        toggle_visibility(&mut delta, window.start, self.ring_size, window.len);

        for slide in delta.ones() {
            let dimmed = !window.contains_slide(slide);
            if self.dimmed.get(slide) != dimmed {
                self.dimmed.set(slide, dimmed);
                surface.set_slide_dimmed(slide, dimmed);
            }
        }
        self.slide_window = Some(window);
    }

    fn sync_dots<S: TrackSurface + ?Sized>(&mut self, window: VisibleWindow, surface: &mut S) {
        let mut delta = ToggleMask::new(self.active.len());
        if let Some(old) = self.dot_window {
            update_pagination(&mut delta, old.start, self.ring_size, old.len);
        }
        update_pagination(&mut delta, window.start, self.ring_size, window.len);

        for dot in delta.ones() {
            let active = window.contains_dot(dot);
            if self.active.get(dot) != active {
                self.active.set(dot, active);
                surface.set_dot_active(dot, active);
            }
        }
        self.dot_window = Some(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSurface;

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut mask = ToggleMask::filled(21);
        let before = mask.clone();

        toggle_visibility(&mut mask, 9, 7, 3);
        assert_ne!(mask, before);
        toggle_visibility(&mut mask, 9, 7, 3);
        assert_eq!(mask, before);
    }

    #[test]
    fn test_toggle_visibility_normalizes_target() {
        let mut a = ToggleMask::new(21);
        let mut b = ToggleMask::new(21);
        toggle_visibility(&mut a, 2, 7, 3);
        toggle_visibility(&mut b, 16, 7, 3);
        assert_eq!(a, b);
        assert_eq!(a.ones().collect::<Vec<_>>(), vec![2, 3, 4, 9, 10, 11, 16, 17, 18]);
    }

    #[test]
    fn test_update_pagination_wraps() {
        let mut mask = ToggleMask::new(7);
        update_pagination(&mut mask, 6, 7, 3);
        assert_eq!(mask.ones().collect::<Vec<_>>(), vec![0, 1, 6]);
        update_pagination(&mut mask, 6, 7, 3);
        assert_eq!(mask.ones().count(), 0);
    }

    #[test]
    fn test_dots_follow_before_reveal() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        let mut sync = SyncLayer::new(7);

        sync.show(VisibleWindow::at(0, 7, 3), &mut surface);
        assert_eq!(sync.active_dots(), vec![0, 1, 2]);
        assert!(sync.undimmed_slides().is_empty());
        assert_eq!(surface.active_dots(), vec![0, 1, 2]);
    }

    #[test]
    fn test_reveal_then_move() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        let mut sync = SyncLayer::new(7);

        sync.reveal(VisibleWindow::at(0, 7, 3), &mut surface);
        assert_eq!(sync.undimmed_slides(), vec![0, 1, 2, 7, 8, 9, 14, 15, 16]);

        sync.show(VisibleWindow::at(1, 7, 3), &mut surface);
        assert_eq!(sync.undimmed_slides(), vec![1, 2, 3, 8, 9, 10, 15, 16, 17]);
        assert_eq!(sync.active_dots(), vec![1, 2, 3]);
        assert_eq!(surface.undimmed_slides(), sync.undimmed_slides());
        assert_eq!(surface.active_dots(), sync.active_dots());
    }

    #[test]
    fn test_same_window_writes_nothing() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        let mut sync = SyncLayer::new(7);
        sync.reveal(VisibleWindow::at(3, 7, 3), &mut surface);
        surface.clear_calls();

        sync.show(VisibleWindow::at(10, 7, 3), &mut surface);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_conceal() {
        let mut surface = MockSurface::new(900.0);
        surface.rebuild(&vec![String::new(); 21], 7);
        let mut sync = SyncLayer::new(7);
        sync.reveal(VisibleWindow::at(0, 7, 3), &mut surface);

        sync.conceal(&mut surface);
        assert!(!sync.is_revealed());
        assert!(sync.undimmed_slides().is_empty());
        assert!(sync.active_dots().is_empty());
        assert!(surface.undimmed_slides().is_empty());
        assert!(surface.active_dots().is_empty());
    }
}
