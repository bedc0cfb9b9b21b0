//! Auto-rotation timer and its suspension

use log::debug;

use crate::surface::TrackSurface;
use crate::transition::{AUTO_ROTATE_DELAY_MS, AUTO_ROTATE_IDLE_MS};
use super::{Carousel, Task, TaskId};

/// Auto-rotation configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationSettings {
    /// Whether the timer runs
    pub enabled: bool,
    /// Interval between ticks (ms)
    pub delay_ms: u32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: AUTO_ROTATE_DELAY_MS,
        }
    }
}

impl RotationSettings {
    /// Create rotation settings
    pub fn new(enabled: bool, delay_ms: u32) -> Self {
        Self {
            enabled,
            delay_ms: delay_ms.max(1),
        }
    }

    /// Rotation switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// User or page condition that suspends auto-rotation while active
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer over the widget
    Hover,
    /// Focus inside the widget
    Focus,
    /// Finger on the widget
    Touch,
    /// Document hidden
    Hidden,
}

#[derive(Clone, Debug)]
pub(super) struct RotationState {
    settings: RotationSettings,
    hovered: bool,
    focused: bool,
    touching: bool,
    hidden: bool,
    /// Pending timer tick
    task: Option<TaskId>,
}

impl RotationState {
    pub(super) fn new(settings: RotationSettings) -> Self {
        Self {
            settings: RotationSettings::new(settings.enabled, settings.delay_ms),
            hovered: false,
            focused: false,
            touching: false,
            hidden: false,
            task: None,
        }
    }

    fn is_suspended(&self) -> bool {
        self.hovered || self.focused || self.touching || self.hidden
    }

    fn set(&mut self, interaction: Interaction, active: bool) {
        match interaction {
            Interaction::Hover => self.hovered = active,
            Interaction::Focus => self.focused = active,
            Interaction::Touch => self.touching = active,
            Interaction::Hidden => self.hidden = active,
        }
    }
}

impl<S: TrackSurface> Carousel<S> {
    /// Enable auto-rotation and restart its timer
    pub fn start_auto_rotation(&mut self, now_ms: f64) {
        self.rotation.settings.enabled = true;
        self.arm_rotation(now_ms);
    }

    /// Disable auto-rotation
    pub fn stop_auto_rotation(&mut self) {
        self.rotation.settings.enabled = false;
        self.disarm_rotation();
    }

    /// Change the rotation interval, restarting a running timer
    pub fn set_rotation_delay(&mut self, delay_ms: u32, now_ms: f64) {
        self.rotation.settings.delay_ms = delay_ms.max(1);
        if self.rotation.task.is_some() {
            self.arm_rotation(now_ms);
        }
    }

    /// Current rotation settings
    pub fn rotation_settings(&self) -> RotationSettings {
        self.rotation.settings
    }

    /// Check if the rotation timer is running
    pub fn is_auto_rotating(&self) -> bool {
        self.rotation.task.is_some()
    }

    /// Check if an interaction currently suspends rotation
    pub fn is_rotation_suspended(&self) -> bool {
        self.rotation.is_suspended()
    }

    /// Report the start or end of a suspending interaction
    ///
    /// Rotation stops while any interaction is active and restarts with a
    /// full interval once all have cleared, if it is enabled.
    pub fn set_interaction(&mut self, interaction: Interaction, active: bool, now_ms: f64) {
        self.rotation.set(interaction, active);
        if self.rotation.is_suspended() {
            self.disarm_rotation();
        } else if self.rotation.task.is_none() {
            self.arm_rotation(now_ms);
        }
    }

    pub(super) fn arm_rotation(&mut self, now_ms: f64) {
        self.disarm_rotation();
        if !self.rotation.settings.enabled || self.rotation.is_suspended() {
            return;
        }
        let due = now_ms + f64::from(self.rotation.settings.delay_ms);
        self.rotation.task = Some(self.scheduler.schedule(due, Task::AutoRotate));
    }

    fn disarm_rotation(&mut self) {
        if let Some(task) = self.rotation.task.take() {
            self.scheduler.cancel(task);
        }
    }

    /// Timer tick: re-arm, then step unless a navigation happened recently
    pub(super) fn rotate(&mut self, id: TaskId, now_ms: f64) {
        if self.rotation.task != Some(id) {
            return;
        }
        self.rotation.task = None;
        self.arm_rotation(now_ms);

        let idle = self
            .anchor_ms
            .map_or(true, |anchor| now_ms - anchor >= f64::from(AUTO_ROTATE_IDLE_MS));
        if idle {
            let outcome = self.next(now_ms);
            debug!("auto-rotate: {:?}", outcome);
        }
    }
}
