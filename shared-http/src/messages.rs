//! Canonical user-facing messages for failed requests.

pub const TIMEOUT_MESSAGE: &str = "Request timed out, please check your network connection";
pub const CONNECTION_FAILED_MESSAGE: &str = "Network connection failed, please check your network";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again later";

/// Message for a transport status other than 200.
pub fn http_status_message(status: u16) -> String {
    let canonical = match status {
        400 => "Bad request parameters",
        401 => "Unauthorized, please log in again",
        403 => "Access denied",
        404 => "Requested resource not found",
        405 => "Request method not allowed",
        408 => "Request timed out",
        500 => "Internal server error",
        502 => "Bad gateway",
        503 => "Service unavailable",
        504 => "Gateway timeout",
        _ => return format!("Request failed ({})", status),
    };
    canonical.to_string()
}

/// Classify a transport failure by its description.
pub fn network_failure_message(description: &str) -> &'static str {
    if description.contains("timeout") {
        TIMEOUT_MESSAGE
    } else if description.contains("fail") {
        CONNECTION_FAILED_MESSAGE
    } else {
        NETWORK_ERROR_MESSAGE
    }
}
