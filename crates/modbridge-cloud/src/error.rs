//! Mapping of HTTP client failures into domain errors

use modbridge_core::{truncate_chars, DomainError, DIAGNOSTIC_LIMIT};
use reqwest::Response;

/// Map a transport-level failure (connect, timeout, decode) to a domain error
pub fn map_transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Transport(format!("request timed out: {err}"))
    } else if err.is_connect() {
        DomainError::Transport(format!("connection failed: {err}"))
    } else {
        DomainError::Transport(err.to_string())
    }
}

/// Read a failed response's body as a bounded diagnostic string
pub async fn response_detail(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    truncate_chars(body.trim(), DIAGNOSTIC_LIMIT)
}
