//! Transition timing and animation module
//!
//! Provides the timing constants of the transition driver, easing curves
//! and the in-flight track animation.

mod animation;
mod easing;

pub use animation::TrackAnimation;
pub use easing::{ease_in_out, linear, Easing};

/// Duration of one animated step in milliseconds
pub const SLIDE_ANIMATION_MS: u32 = 200;

/// Delay before a wrap-teleport is applied, after the step animation settles
pub const TELEPORT_DELAY_MS: u32 = 250;

/// Minimum time between two accepted navigation steps
pub const NAVIGATION_THROTTLE_MS: u32 = 400;

/// Delay before slide dimming is revealed after a (re)build
pub const REVEAL_DELAY_MS: u32 = 100;

/// Default interval of the auto-rotation timer
pub const AUTO_ROTATE_DELAY_MS: u32 = 5000;

/// Auto-rotation skips a tick if a navigation happened more recently than this
pub const AUTO_ROTATE_IDLE_MS: u32 = 3000;
