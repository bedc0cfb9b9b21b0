//! Track building, relayout and resize handling

use log::{debug, warn};

use crate::config::clamp_visible;
use crate::geometry::{measured_slide_width_px, offset_for_left};
use crate::render::Track;
use crate::surface::{TrackSurface, TrackTransition};
use crate::sync::SyncLayer;
use crate::transition::REVEAL_DELAY_MS;
use crate::window::home_left;
use super::{Carousel, Task};

/// Clamp a viewport size into `[1, N - 1]`, warning on a clamp
pub(super) fn checked_visible(visible: usize, ring_size: usize) -> usize {
    let (checked, warning) = clamp_visible(visible, ring_size);
    if let Some(warning) = warning {
        warn!("{warning}");
    }
    checked
}

impl<S: TrackSurface> Carousel<S> {
    /// Replace the track and the viewport size
    ///
    /// Rebuilds slides and dots and returns to the first slide. Pending
    /// teleports and reveals are cancelled; auto-rotation keeps running.
    pub fn reconfigure(&mut self, track: Track, visible: usize, now_ms: f64) {
        self.visible = checked_visible(visible, track.ring_size());
        self.track = track;
        self.rebuild_track(now_ms);
        debug!(
            "reconfigured carousel: ring size {}, {} visible",
            self.ring_size(),
            self.visible
        );
    }

    /// Change the viewport size without rebuilding the slides
    ///
    /// Dims every slide, returns to the first slide and reveals the new
    /// window after the reveal delay.
    pub fn relayout(&mut self, visible: usize, now_ms: f64) {
        self.visible = checked_visible(visible, self.ring_size());
        self.sync.conceal(&mut self.surface);
        self.reset_position(now_ms);
    }

    /// React to a viewport resize
    ///
    /// A changed viewport size resets the carousel to the first slide and
    /// returns `true`. Otherwise the track is realigned to the new slide
    /// width without animation.
    pub fn resize(&mut self, visible: usize, now_ms: f64) -> bool {
        let visible = checked_visible(visible, self.ring_size());
        if visible != self.visible {
            self.relayout(visible, now_ms);
            true
        } else {
            self.realign();
            false
        }
    }

    /// Jump the track to the offset of the current position
    pub fn realign(&mut self) {
        self.animation = None;
        let slide_width = measured_slide_width_px(&self.surface, self.ring_size());
        self.surface
            .apply_offset(offset_for_left(self.left, slide_width), TrackTransition::Instant);
    }

    pub(super) fn rebuild_track(&mut self, now_ms: f64) {
        self.surface.rebuild(self.track.slides(), self.track.ring_size());
        self.sync = SyncLayer::new(self.track.ring_size());
        self.reset_position(now_ms);
    }

    fn reset_position(&mut self, now_ms: f64) {
        for task in [self.teleport_task.take(), self.reveal_task.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(task);
        }
        self.animation = None;
        self.surface.set_track_layout(self.ring_size(), self.visible);
        self.left = home_left(self.ring_size());

        let window = self.window();
        self.sync.show(window, &mut self.surface);
        self.reveal_task = Some(
            self.scheduler
                .schedule(now_ms + f64::from(REVEAL_DELAY_MS), Task::Reveal),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigWarning;

    #[test]
    fn test_checked_visible() {
        assert_eq!(checked_visible(3, 7), 3);
        assert_eq!(checked_visible(7, 7), 6);
        assert_eq!(checked_visible(0, 7), 1);
        assert_eq!(checked_visible(3, 1), 1);
        assert_eq!(checked_visible(1, 1), 1);
    }

    #[test]
    fn test_checked_visible_reports_clamp() {
        assert_eq!(clamp_visible(3, 7), (3, None));
        assert_eq!(
            clamp_visible(7, 7),
            (
                6,
                Some(ConfigWarning::VisibleNotBelowRing {
                    requested: 7,
                    ring_size: 7,
                    used: 6,
                })
            )
        );
        assert_eq!(clamp_visible(0, 7), (1, Some(ConfigWarning::ZeroVisible)));
    }
}
