// ── Core error types ──
//
// User-facing errors from homelist-core. Consumers never see reqwest
// errors or JSON parse failures directly; `From<homelist_api::Error>`
// translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::form::FormErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach listings API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Listings API request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Invalid listing: {errors}")]
    Validation { errors: FormErrors },

    #[error("Could not save favorites: {message}")]
    Persistence { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Per-field validation failures, if this is a validation error.
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<homelist_api::Error> for CoreError {
    fn from(err: homelist_api::Error) -> Self {
        match err {
            homelist_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            homelist_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            homelist_api::Error::Api { status: 404, message } => CoreError::NotFound {
                resource: message,
            },
            homelist_api::Error::Api { status, message } => CoreError::Api {
                message: format!("HTTP {status}: {message}"),
                status: Some(status),
            },
            homelist_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from listings API: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_404_becomes_not_found() {
        let err = CoreError::from(homelist_api::Error::Api {
            status: 404,
            message: "Not Found".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn api_status_is_kept() {
        let err = CoreError::from(homelist_api::Error::Api {
            status: 500,
            message: "boom".into(),
        });
        match err {
            CoreError::Api { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "HTTP 500: boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
