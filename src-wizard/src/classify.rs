//! Mapping of gateway failures onto what the user is shown

use deboard_gateway::GatewayError;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Unable to connect to the server. Please check your internet connection and try again.";

pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to start simulation. Please try again.";

pub const QUEUE_FULL_TITLE: &str = "Simulation Queue Full";

pub const QUEUE_FULL_MESSAGE: &str = "The current simulation queue is full. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Shown as a modal, never as the inline banner
    QueueFull,
    /// No response from the backend
    Network,
    /// Any other rejection; carries the banner text
    Rejected(String),
}

impl SubmissionFailure {
    /// Inline banner text; `None` for the modal case
    pub fn banner_message(&self) -> Option<&str> {
        match self {
            SubmissionFailure::QueueFull => None,
            SubmissionFailure::Network => Some(NETWORK_ERROR_MESSAGE),
            SubmissionFailure::Rejected(message) => Some(message),
        }
    }
}

fn mentions_queue_full(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("queue") || lower.contains("full")
}

/// Queue-full first (status 503 or a server message mentioning "queue" or
/// "full"), then transport failures, then everything else.
pub fn classify(error: &GatewayError) -> SubmissionFailure {
    match error {
        GatewayError::Http { status: 503, .. } => SubmissionFailure::QueueFull,
        GatewayError::Http {
            message: Some(message),
            ..
        } if mentions_queue_full(message) => SubmissionFailure::QueueFull,
        GatewayError::Network(_) => SubmissionFailure::Network,
        GatewayError::Http {
            message: Some(message),
            ..
        } if !message.trim().is_empty() => SubmissionFailure::Rejected(message.clone()),
        _ => SubmissionFailure::Rejected(SUBMISSION_FALLBACK_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: Option<&str>) -> GatewayError {
        GatewayError::Http {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_503_is_queue_full_whatever_the_message() {
        assert_eq!(classify(&http(503, None)), SubmissionFailure::QueueFull);
        assert_eq!(
            classify(&http(503, Some("maintenance"))),
            SubmissionFailure::QueueFull
        );
    }

    #[test]
    fn test_queue_or_full_in_message() {
        assert_eq!(
            classify(&http(429, Some("Job QUEUE saturated"))),
            SubmissionFailure::QueueFull
        );
        assert_eq!(
            classify(&http(400, Some("Disk is Full"))),
            SubmissionFailure::QueueFull
        );
    }

    #[test]
    fn test_network() {
        let failure = classify(&GatewayError::Network("connection refused".into()));
        assert_eq!(failure, SubmissionFailure::Network);
        assert_eq!(failure.banner_message(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn test_server_message_or_fallback() {
        assert_eq!(
            classify(&http(400, Some("Invalid dimension"))),
            SubmissionFailure::Rejected("Invalid dimension".to_string())
        );
        assert_eq!(
            classify(&http(500, None)).banner_message(),
            Some(SUBMISSION_FALLBACK_MESSAGE)
        );
        assert_eq!(
            classify(&http(500, Some("  "))).banner_message(),
            Some(SUBMISSION_FALLBACK_MESSAGE)
        );
        assert_eq!(
            classify(&GatewayError::Decode("expected value".into())).banner_message(),
            Some(SUBMISSION_FALLBACK_MESSAGE)
        );
    }

    #[test]
    fn test_queue_full_has_no_banner() {
        assert!(SubmissionFailure::QueueFull.banner_message().is_none());
    }
}
