use thiserror::Error;

/// Errors raised while talking to the chat-completion API
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Chat API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Chat API rate limited, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenAiError {
    /// Whether the request may succeed if sent again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api {
                status_code: Some(code),
                ..
            } => *code >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for chat API operations
pub type GenAiResult<T> = Result<T, GenAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GenAiError::RateLimited { retry_after: None }.is_transient());
        assert!(GenAiError::Api {
            message: "bad gateway".to_string(),
            status_code: Some(502),
        }
        .is_transient());
        assert!(!GenAiError::Api {
            message: "bad request".to_string(),
            status_code: Some(400),
        }
        .is_transient());
        assert!(!GenAiError::InvalidConfig("no key".to_string()).is_transient());
    }
}
