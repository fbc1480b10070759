use cashier_core::ProcessorError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Errors raised while constructing a [`StripeClient`](crate::StripeClient)
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Stripe REST error body: `{ "error": { "type", "code", "message", "param" } }`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

/// Map a non-success response onto a processor error family
pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> ProcessorError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => from_details(status, envelope.error),
        Err(_) => from_status(status, String::from_utf8_lossy(body).trim().to_owned()),
    }
}

/// Map a transport failure (connect, TLS, timeout, reading the body)
pub(crate) fn from_transport(error: &reqwest::Error) -> ProcessorError {
    ProcessorError::Service {
        status: error.status().map(|s| s.as_u16()),
        message: error.to_string(),
    }
}

fn from_details(status: StatusCode, details: ErrorDetails) -> ProcessorError {
    let message = details
        .message
        .unwrap_or_else(|| format!("{} returned without a message", details.error_type));

    // Rejected keys come back as 401 with an `invalid_request_error` type
    if status == StatusCode::UNAUTHORIZED {
        return ProcessorError::Authentication { message };
    }

    match details.error_type.as_str() {
        "card_error" => ProcessorError::Card {
            error_type: details.error_type,
            code: details.code,
            message,
        },
        "invalid_request_error" => ProcessorError::InvalidRequest {
            error_type: details.error_type,
            message,
            param: details.param,
        },
        "authentication_error" => ProcessorError::Authentication { message },
        "api_error" | "api_connection_error" | "rate_limit_error" => ProcessorError::Service {
            status: Some(status.as_u16()),
            message,
        },
        _ => from_status(status, format!("{}: {message}", details.error_type)),
    }
}

fn from_status(status: StatusCode, message: String) -> ProcessorError {
    if status == StatusCode::UNAUTHORIZED {
        ProcessorError::Authentication { message }
    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        ProcessorError::Service {
            status: Some(status.as_u16()),
            message,
        }
    } else {
        ProcessorError::Unknown(format!("HTTP {status}: {message}"))
    }
}
