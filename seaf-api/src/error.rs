use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised by a [`Transport`](crate::Transport) before any reply
/// could be read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-2xx status, or no reply at all.
    Transport,
    /// The body arrived but could not be decoded.
    Decode,
    /// The reply violates a protocol invariant (bad `oid`, bad wrapped url).
    MalformedResponse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiErrorKind::Transport => "transport error",
            ApiErrorKind::Decode => "decode error",
            ApiErrorKind::MalformedResponse => "malformed response",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorClass {
    Auth,
    RateLimit,
    Transient,
    Permanent,
}

/// Terminal error of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", detail(.http_status, .message))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub http_status: Option<u16>,
    pub message: Option<String>,
}

impl ApiError {
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        Self {
            kind: ApiErrorKind::Transport,
            http_status: Some(status),
            message: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            http_status: None,
            message: Some(message.into()),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::MalformedResponse,
            http_status: None,
            message: Some(message.into()),
        }
    }

    /// Catch-all for a reply that could not be used for any other reason.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            http_status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
            message: Some(message.into()),
        }
    }

    pub fn classification(&self) -> Option<ApiErrorClass> {
        if self.kind != ApiErrorKind::Transport {
            return None;
        }
        let status = StatusCode::from_u16(self.http_status?).ok()?;
        Some(classify_api_status(status))
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let http_status = match &err {
            TransportError::Request(inner) => inner.status().map(|status| status.as_u16()),
            TransportError::Url(_) => None,
        };
        Self {
            kind: ApiErrorKind::Transport,
            http_status,
            message: Some(err.to_string()),
        }
    }
}

fn detail(http_status: &Option<u16>, message: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(status) = http_status {
        out.push_str(&format!(" (status {status})"));
    }
    if let Some(message) = message {
        out.push_str(": ");
        out.push_str(message);
    }
    out
}

fn classify_api_status(status: StatusCode) -> ApiErrorClass {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        ApiErrorClass::Auth
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ApiErrorClass::RateLimit
    } else if status.is_server_error()
        || matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::CONFLICT | StatusCode::TOO_EARLY
        )
    {
        ApiErrorClass::Transient
    } else {
        ApiErrorClass::Permanent
    }
}
