//! Task API-specific error types.

/// Errors that can occur during task API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned a non-success response
    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Base URL could not be used to build request URLs
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Return the `message` field of the server's error body, if the server
    /// sent one.
    ///
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_server_display() {
        let error = ApiError::Server {
            status: 400,
            message: Some("Title is required".to_string()),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("400"));
        assert!(error_str.contains("Title is required"));

        let error = ApiError::Server {
            status: 502,
            message: None,
        };
        assert!(error.to_string().contains("no message"));
    }

    #[test]
    fn test_server_message() {
        let error = ApiError::Server {
            status: 422,
            message: Some("X".to_string()),
        };
        assert_eq!(error.server_message(), Some("X"));

        let error = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(error.server_message(), None);

        let error = ApiError::InvalidBaseUrl("nope".to_string());
        assert_eq!(error.server_message(), None);
        assert!(error.to_string().contains("Invalid base URL"));
    }
}
