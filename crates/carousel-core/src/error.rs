//! Error types for the carousel
//!
//! [`CarouselError`] aborts construction. [`ConfigWarning`] describes a
//! constraint that was clamped; construction proceeds and the warning is
//! logged and reported back to the caller.

/// Fatal configuration errors
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    /// No mount target selector was given.
    #[error("no container selector given")]
    MissingSelector,

    /// The selector did not match any element on the page.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// No item source was given.
    #[error("no items given")]
    MissingItems,

    /// The item source is empty.
    #[error("items must be a non-empty array")]
    EmptyItems,

    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The host page could not provide a required facility.
    #[error("DOM unavailable: {0}")]
    DomUnavailable(String),
}

impl From<serde_json::Error> for CarouselError {
    fn from(e: serde_json::Error) -> Self {
        CarouselError::InvalidOptions(e.to_string())
    }
}

/// A constraint that was violated and clamped
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    /// A ring size of 0 was requested.
    #[error("totalItems must be at least 1, using {used}")]
    ZeroRingSize { used: usize },

    /// More items were requested than are available.
    #[error("totalItems ({requested}) exceeds available items ({available}), using {available}")]
    RingSizeExceedsItems { requested: usize, available: usize },

    /// The viewport would show the whole ring or more.
    #[error("visible items ({requested}) must be less than totalItems ({ring_size}), using {used}")]
    VisibleNotBelowRing {
        requested: usize,
        ring_size: usize,
        used: usize,
    },

    /// A viewport of 0 slides was requested.
    #[error("visible items must be at least 1")]
    ZeroVisible,

    /// The auto-rotation interval is unusable.
    #[error("autoRotateDelay must be positive, using {used} ms")]
    InvalidRotationDelay { used: u32 },

    /// A structural element was missing and a fallback was built.
    #[error("missing {0} element, created a fallback")]
    MissingElement(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CarouselError::ContainerNotFound("#slider".into()).to_string(),
            "container not found: #slider"
        );
        assert_eq!(
            ConfigWarning::RingSizeExceedsItems { requested: 9, available: 4 }.to_string(),
            "totalItems (9) exceeds available items (4), using 4"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(CarouselError::from(err), CarouselError::InvalidOptions(_)));
    }
}
