//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers treat "the todo does
//! not exist" differently from other failures (a delete of an absent id is
//! not an error). Every other non-2xx response lands in `Http` with the raw
//! status and body. `Network` covers requests that never produced a response.

/// Errors returned by `TodoClient`, transports and `RemoteStore`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected before any request was built.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The server returned 404 for the requested todo.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be completed (connect, DNS, TLS, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_reports_404() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
    }

    #[test]
    fn network_has_no_status() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn http_carries_status_and_body() {
        let err = ApiError::Http {
            status: 422,
            body: "bad".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "HTTP 422: bad");
    }
}
