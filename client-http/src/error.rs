use thiserror::Error;

/// Why a request was rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    /// Transport status other than 200.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Status 200 with a failing business envelope.
    #[error("{message}")]
    Business { code: Option<i64>, message: String },

    /// No response at all: timeout, DNS, refused connection.
    #[error("{message}")]
    Network { message: String, description: String },
}

impl RequestError {
    pub fn message(&self) -> &str {
        match self {
            RequestError::Http { message, .. }
            | RequestError::Business { message, .. }
            | RequestError::Network { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
