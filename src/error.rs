//! The error taxonomy shared by every operation in this crate.

use reqwest::Error as ReqwestError;

/// Everything that can go wrong when talking to the MedEvents backend.
///
/// Every endpoint function and the upload sub-path fail with this one type so
/// callers can branch on the variant instead of sniffing message strings.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request exceeded the configured timeout.
    #[error("Request timeout - server took too long to respond")]
    Timeout,
    /// No response was received at all (DNS failure, refused connection,
    /// unreachable host).
    #[error("Network error - check your connection and server status")]
    Network(#[source] Option<ReqwestError>),
    /// The server answered 404 on a path that should exist.
    #[error("Endpoint not found - please check the server configuration")]
    NotFound,
    /// Any other non-2xx answer. The raw body is kept verbatim so the caller
    /// can surface or inspect whatever the backend said.
    #[error("request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// A required argument was missing or empty. Raised before any network
    /// traffic happens.
    #[error("{0}")]
    Validation(String),
    /// The server said 2xx but the body was not valid JSON.
    #[error("invalid server response: {body}")]
    ParseFailure { body: String },
    /// The in-flight request was aborted through a [`CancelHandle`].
    ///
    /// [`CancelHandle`]: crate::CancelHandle
    #[error("the request was cancelled")]
    Cancelled,
}

impl ApiError {
    pub(crate) fn required(field: &str) -> ApiError {
        ApiError::Validation(format!("{} is required", field))
    }

    /// Classify a transport-level failure from the HTTP client.
    ///
    /// Status-bearing failures never reach this path; they are turned into
    /// [`ApiError::HttpStatus`] after the body has been read.
    pub(crate) fn from_transport(err: ReqwestError) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(Some(err))
        }
    }

    /// Classify a non-2xx response once its body has been drained.
    pub(crate) fn from_status(status: u16, body: String) -> ApiError {
        if status == 404 {
            ApiError::NotFound
        } else {
            ApiError::HttpStatus { status, body }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            ApiError::Timeout.to_string(),
            "Request timeout - server took too long to respond"
        );
        assert_eq!(
            ApiError::Network(None).to_string(),
            "Network error - check your connection and server status"
        );
        assert_eq!(
            ApiError::NotFound.to_string(),
            "Endpoint not found - please check the server configuration"
        );
    }

    #[test]
    fn http_status_keeps_status_and_body() {
        let err = ApiError::from_status(500, String::from("server error"));
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("server error"));
    }

    #[test]
    fn not_found_is_special_cased() {
        match ApiError::from_status(404, String::new()) {
            ApiError::NotFound => {},
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn required_names_the_field() {
        assert_eq!(
            ApiError::required("Event ID").to_string(),
            "Event ID is required"
        );
    }
}
