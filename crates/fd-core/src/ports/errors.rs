use thiserror::Error;

/// Shown when an error carries no human readable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Failure reported by the REST API client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a notification, falling back to a generic text
    /// when the server sent none.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_server_message_falls_back() {
        let err = ApiError::Server {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_server_message_is_kept() {
        let err = ApiError::Server {
            status: 422,
            message: "Name already taken".to_string(),
        };
        assert_eq!(err.user_message(), "Name already taken");
    }
}
