//! Host Events
//!
//! Diagnostic events the engine dispatches to the host element so the
//! surrounding application can observe failures the engine recovers from.

/// Error notification attached to a host element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Human-readable description of what failed
    pub message: String,
    /// Rendered form of the causing failure
    pub error: String,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_event() {
        let event = ErrorEvent::new("Failed to render element", "invalid value");
        assert_eq!(event.message, "Failed to render element");
        assert_eq!(event.error, "invalid value");
    }
}
