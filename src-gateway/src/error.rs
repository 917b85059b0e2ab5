use crate::token::TokenStoreError;

/// Failure of a gateway call
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// No response was received at all
    #[error("Network error: {0}")]
    Network(String),

    /// Success status but the body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Simulation id that cannot be used as a path segment
    #[error("Invalid simulation id: '{0}'")]
    InvalidId(String),

    #[error(transparent)]
    Token(#[from] TokenStoreError),

    #[error(transparent)]
    Env(#[from] deboard_env::EnvError),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = GatewayError::Http {
            status: 503,
            message: Some("Queue is full".to_string()),
        };
        assert_eq!(e.to_string(), "HTTP 503: Queue is full");
        assert_eq!(e.status(), Some(503));

        let e = GatewayError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(e.to_string(), "HTTP 500: no message");
        assert!(e.server_message().is_none());

        assert!(GatewayError::Network("refused".into()).is_network());
    }
}
