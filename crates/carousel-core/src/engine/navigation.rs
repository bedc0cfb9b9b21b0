//! Navigation: animated steps, jumps and wrap-teleports

use log::debug;

use crate::geometry::{measured_slide_width_px, offset_for_left};
use crate::input::{KeyCommand, SwipeDirection};
use crate::surface::{TrackSurface, TrackTransition};
use crate::transition::{
    Easing, TrackAnimation, NAVIGATION_THROTTLE_MS, SLIDE_ANIMATION_MS, TELEPORT_DELAY_MS,
};
use crate::window::{track_len, wrap_correction, WrapCorrection};
use super::{Carousel, Interaction, NavOutcome, Rejection, Task};

impl<S: TrackSurface> Carousel<S> {
    /// Step one slide forward
    pub fn next(&mut self, now_ms: f64) -> NavOutcome {
        self.step(1, now_ms)
    }

    /// Step one slide backward
    pub fn prev(&mut self, now_ms: f64) -> NavOutcome {
        self.step(-1, now_ms)
    }

    /// Jump directly to item `target`
    ///
    /// Does nothing when `target` is outside `[0, N)` or already current.
    /// Otherwise the whole distance is covered by one animated step. Jumps
    /// are not throttled and leave the throttle anchor alone.
    pub fn goto_slide(&mut self, target: usize, now_ms: f64) -> NavOutcome {
        if target >= self.ring_size() {
            return NavOutcome::Rejected(Rejection::OutOfRange);
        }
        let current = self.current_slide();
        if target == current {
            return NavOutcome::Rejected(Rejection::AlreadyCurrent);
        }
        self.shift(target as isize - current as isize, now_ms)
    }

    /// Run a keyboard command
    pub fn handle_key(&mut self, command: KeyCommand, now_ms: f64) -> NavOutcome {
        match command {
            KeyCommand::Next => self.next(now_ms),
            KeyCommand::Prev => self.prev(now_ms),
            KeyCommand::First => self.goto_slide(0, now_ms),
            KeyCommand::Last => self.goto_slide(self.ring_size().saturating_sub(1), now_ms),
        }
    }

    /// Step in the direction of a recognized swipe
    pub fn handle_swipe(&mut self, direction: SwipeDirection, now_ms: f64) -> NavOutcome {
        match direction {
            SwipeDirection::Left => self.next(now_ms),
            SwipeDirection::Right => self.prev(now_ms),
        }
    }

    /// First touch point of a gesture; suspends auto-rotation
    pub fn touch_start(&mut self, x: f64, y: f64, now_ms: f64) {
        self.swipe.begin(x, y);
        self.set_interaction(Interaction::Touch, true, now_ms);
    }

    /// Touch point moved
    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.swipe.moved(x, y);
    }

    /// Gesture finished; steps if it was a swipe and resumes auto-rotation
    pub fn touch_end(&mut self, now_ms: f64) -> Option<NavOutcome> {
        if !self.swipe.is_tracking() {
            return None;
        }
        let outcome = self
            .swipe
            .end()
            .map(|direction| self.handle_swipe(direction, now_ms));
        self.set_interaction(Interaction::Touch, false, now_ms);
        outcome
    }

    /// Gesture cancelled by the browser; never steps
    pub fn touch_cancel(&mut self, now_ms: f64) {
        if !self.swipe.is_tracking() {
            return;
        }
        self.swipe.cancel();
        self.set_interaction(Interaction::Touch, false, now_ms);
    }

    /// Check if a step at `now_ms` would be throttled
    pub fn is_throttled(&self, now_ms: f64) -> bool {
        self.anchor_ms
            .map_or(false, |anchor| now_ms - anchor < f64::from(NAVIGATION_THROTTLE_MS))
    }

    fn step(&mut self, delta: isize, now_ms: f64) -> NavOutcome {
        if self.surface.is_mounted() && self.is_throttled(now_ms) {
            debug!("step throttled");
            return NavOutcome::Rejected(Rejection::Throttled);
        }
        let outcome = self.shift(delta, now_ms);
        if outcome.is_moved() {
            self.anchor_ms = Some(now_ms);
        }
        outcome
    }

    /// Move the track by `delta` slides with the step animation
    fn shift(&mut self, delta: isize, now_ms: f64) -> NavOutcome {
        if !self.surface.is_mounted() {
            return NavOutcome::Rejected(Rejection::NotMounted);
        }
        let ring_size = self.ring_size();
        let slide_width = measured_slide_width_px(&self.surface, ring_size);
        if slide_width <= 0.0 {
            return NavOutcome::Rejected(Rejection::NotMeasurable);
        }

        // A late host timer must not let a correction pile onto the next step
        self.flush_teleport();

        let last = track_len(ring_size).saturating_sub(1) as isize;
        let target = (self.left as isize + delta).clamp(0, last) as usize;
        let from_px = offset_for_left(self.left, slide_width);
        let to_px = offset_for_left(target, slide_width);

        self.surface.apply_offset(
            to_px,
            TrackTransition::Animated {
                duration_ms: SLIDE_ANIMATION_MS,
                easing: Easing::EaseInOut,
            },
        );
        self.animation = Some(TrackAnimation::new(
            from_px,
            to_px,
            now_ms,
            SLIDE_ANIMATION_MS,
            Easing::EaseInOut,
        ));
        self.left = target;

        let window = self.window();
        self.sync.show(window, &mut self.surface);

        let teleport = wrap_correction(self.left, ring_size);
        if let Some(correction) = teleport {
            let due = now_ms + f64::from(TELEPORT_DELAY_MS);
            self.teleport_task = Some(self.scheduler.schedule(due, Task::Teleport(correction)));
        }

        let current = self.current_slide();
        debug!(
            "step {delta:+}: left {} current {current} teleport {:?}",
            self.left, teleport
        );
        self.notify_slide_change(current);

        NavOutcome::Moved {
            current,
            left: self.left,
            teleport,
        }
    }

    /// Apply a pending wrap-teleport right away
    fn flush_teleport(&mut self) {
        if let Some(id) = self.teleport_task.take() {
            if let Some(Task::Teleport(correction)) = self.scheduler.task(id) {
                self.scheduler.cancel(id);
                self.apply_teleport(correction);
            }
        }
    }

    pub(super) fn apply_teleport(&mut self, correction: WrapCorrection) {
        let ring_size = self.ring_size();
        self.left = correction.apply(self.left, ring_size);
        self.animation = None;

        let slide_width = measured_slide_width_px(&self.surface, ring_size);
        self.surface
            .apply_offset(offset_for_left(self.left, slide_width), TrackTransition::Instant);
        debug!("teleport {:?}: left {}", correction, self.left);
    }
}
