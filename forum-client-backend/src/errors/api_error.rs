//! Backend request error types.
//!
//! This module defines the unified error type for every request sent to the
//! forum backend, from transport failures to structured server rejections.

use serde::Deserialize;
use thiserror::Error;

/// Message shown when the backend answers 401 without a readable body.
const DEFAULT_UNAUTHENTICATED_MESSAGE: &str = "User unauthenticated";

/// Unified errors from backend requests.
///
/// The `Display` output of each variant is the text shown to the user by the
/// error surface: server messages are shown verbatim and unparseable payloads
/// are shown as their raw stringified form.
///
/// The type is `Clone` so that a single failed request can be handed to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete (offline, timeout, connection refused).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend rejected the request because the session is missing or expired.
    #[error("{message}")]
    Unauthenticated { message: String },

    /// The backend rejected the request with a structured error body.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The backend failed with a payload that is not a structured error.
    #[error("{0}")]
    Unparseable(String),

    /// A successful response carried a body of an unexpected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Structured error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl ApiError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a server error without a domain code.
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: msg.into(),
            code: None,
        }
    }

    /// Classify a non-2xx response from its status and raw body.
    ///
    /// A body of the form `{"message": ..., "code": ...}` becomes a `Server`
    /// error (or `Unauthenticated` for 401). Any other body is kept as an
    /// opaque `Unparseable` error holding the stringified response.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if status == 401 => Self::Unauthenticated {
                message: parsed.message,
            },
            Ok(parsed) => Self::Server {
                status,
                message: parsed.message,
                code: parsed.code,
            },
            Err(_) if status == 401 => Self::Unauthenticated {
                message: DEFAULT_UNAUTHENTICATED_MESSAGE.to_string(),
            },
            Err(_) => {
                let data = serde_json::from_str::<serde_json::Value>(body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));
                Self::Unparseable(serde_json::json!({ "status": status, "data": data }).to_string())
            }
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { .. } => Some(401),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Domain-specific error code such as `INVALID-JSON-ERROR`, when provided.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
