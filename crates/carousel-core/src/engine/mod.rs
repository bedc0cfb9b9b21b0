//! Slide window controller coordinating all components
//!
//! This module is split into focused submodules:
//! - `layout`: Track (re)building, relayout and resize handling
//! - `navigation`: Animated steps, jumps, throttling and wrap-teleports
//! - `rotation`: Auto-rotation timer and its suspension
//! - `schedule`: Deferred task queue
//! - `state`: Driver state and navigation outcomes

mod layout;
mod navigation;
mod rotation;
mod schedule;
mod state;

use log::debug;

use crate::geometry::{current_offset_px, measured_slide_width_px, offset_for_left};
use crate::input::SwipeTracker;
use crate::render::Track;
use crate::surface::TrackSurface;
use crate::sync::SyncLayer;
use crate::transition::TrackAnimation;
use crate::window::{home_left, left_slide_count, normalize_to_ring, VisibleWindow};

pub use rotation::{Interaction, RotationSettings};
pub use schedule::{Scheduler, Task, TaskId};
pub use state::{DriverState, NavOutcome, Rejection};

use rotation::RotationState;

/// Slide window controller of one mounted carousel
///
/// This is the main entry point for carousel operations, managing:
/// - The logical position (left slide count) and the offset derived from it
/// - The in-flight step animation and pending wrap-teleport
/// - The sync layer (dimmed slides, active dots)
/// - Auto-rotation and its suspension by user interaction
/// - Deferred tasks, polled by the host through [`Carousel::tick`]
pub struct Carousel<S: TrackSurface> {
    /// Host surface
    surface: S,
    /// Rendered slides
    track: Track,
    /// Number of visible slides (X)
    visible: usize,
    /// Leftmost visible slide on the track, in `[0, 3N)`
    left: usize,
    /// Time of the last accepted navigation step
    anchor_ms: Option<f64>,
    /// Step animation, kept until replaced or teleported away
    animation: Option<TrackAnimation>,
    /// Slide and dot state
    sync: SyncLayer,
    /// Deferred tasks
    scheduler: Scheduler,
    /// Pending wrap-teleport
    teleport_task: Option<TaskId>,
    /// Pending reveal of slide dimming
    reveal_task: Option<TaskId>,
    /// Auto-rotation settings, suspension flags and timer
    rotation: RotationState,
    /// Touch gesture in progress
    swipe: SwipeTracker,
    /// Called with the new current slide after every accepted step
    on_slide_change: Option<Box<dyn FnMut(usize)>>,
}

impl<S: TrackSurface> Carousel<S> {
    /// Mount a track on `surface`
    ///
    /// Builds the slides and dots, moves the track to the start of the
    /// middle copy and schedules the reveal of slide dimming. `visible` is
    /// clamped into `[1, N - 1]`.
    pub fn mount(
        surface: S,
        track: Track,
        visible: usize,
        rotation: RotationSettings,
        now_ms: f64,
    ) -> Self {
        let ring_size = track.ring_size();
        let mut carousel = Self {
            surface,
            visible: layout::checked_visible(visible, ring_size),
            left: home_left(ring_size),
            track,
            anchor_ms: None,
            animation: None,
            sync: SyncLayer::new(ring_size),
            scheduler: Scheduler::new(),
            teleport_task: None,
            reveal_task: None,
            rotation: RotationState::new(rotation),
            swipe: SwipeTracker::new(),
            on_slide_change: None,
        };
        carousel.rebuild_track(now_ms);
        carousel.arm_rotation(now_ms);
        debug!(
            "mounted carousel: ring size {}, {} visible",
            carousel.ring_size(),
            carousel.visible
        );
        carousel
    }

    /// Register the slide change callback
    pub fn set_on_slide_change(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_slide_change = Some(Box::new(callback));
    }

    /// Remove the slide change callback
    pub fn clear_on_slide_change(&mut self) {
        self.on_slide_change = None;
    }

    /// Host surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host surface (mutable)
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Rendered slides
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Number of distinct items (N)
    pub fn ring_size(&self) -> usize {
        self.track.ring_size()
    }

    /// Number of visible slides (X)
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Leftmost visible slide on the track
    pub fn left_slide_count(&self) -> usize {
        self.left
    }

    /// Logical index of the leftmost visible item, in `[0, N)`
    pub fn current_slide(&self) -> usize {
        normalize_to_ring(self.left, self.ring_size())
    }

    /// Window of items currently in view
    pub fn window(&self) -> VisibleWindow {
        VisibleWindow::at(self.left, self.ring_size(), self.visible)
    }

    /// Time of the last accepted navigation step
    pub fn anchor_ms(&self) -> Option<f64> {
        self.anchor_ms
    }

    /// Slide and dot state
    pub fn sync(&self) -> &SyncLayer {
        &self.sync
    }

    /// Pending deferred tasks
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Phase of the transition driver at `now_ms`
    pub fn state(&self, now_ms: f64) -> DriverState {
        let animating = self
            .animation
            .as_ref()
            .map_or(false, |a| !a.is_complete(now_ms));
        if animating {
            DriverState::Animating
        } else if self.teleport_task.is_some() {
            DriverState::AwaitingTeleport
        } else {
            DriverState::Idle
        }
    }

    /// Offset (px) the track rests at for the current position
    pub fn offset_px(&self) -> f64 {
        offset_for_left(self.left, measured_slide_width_px(&self.surface, self.ring_size()))
    }

    /// Offset (px) the track shows at `now_ms`, following the step animation
    pub fn visual_offset_px(&self, now_ms: f64) -> f64 {
        match &self.animation {
            Some(animation) if !animation.is_complete(now_ms) => animation.current(now_ms),
            _ => self.offset_px(),
        }
    }

    /// Left slide count read back from the rendered track
    ///
    /// Matches [`Carousel::left_slide_count`] whenever the track is at rest
    /// and the host applied every offset.
    pub fn rendered_left_slide_count(&self) -> usize {
        let ring_size = self.ring_size();
        left_slide_count(
            current_offset_px(&self.surface),
            measured_slide_width_px(&self.surface, ring_size),
            ring_size,
        )
    }

    /// Earliest time the host should call [`Carousel::tick`]
    pub fn next_deadline(&self) -> Option<f64> {
        self.scheduler.next_deadline()
    }

    /// Run every task due at `now_ms`, returning how many ran
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let mut ran = 0;
        while let Some((id, task)) = self.scheduler.pop_due(now_ms) {
            ran += 1;
            match task {
                Task::Teleport(correction) => {
                    if self.teleport_task == Some(id) {
                        self.teleport_task = None;
                        self.apply_teleport(correction);
                    }
                }
                Task::Reveal => {
                    if self.reveal_task == Some(id) {
                        self.reveal_task = None;
                        let window = self.window();
                        self.sync.reveal(window, &mut self.surface);
                    }
                }
                Task::AutoRotate => self.rotate(id, now_ms),
            }
        }
        ran
    }

    /// Cancel all pending work and hand the surface back for teardown
    pub fn destroy(mut self) -> S {
        self.scheduler.clear();
        self.on_slide_change = None;
        debug!("destroyed carousel");
        self.surface
    }

    fn notify_slide_change(&mut self, current: usize) {
        if let Some(callback) = self.on_slide_change.as_mut() {
            callback(current);
        }
    }
}
