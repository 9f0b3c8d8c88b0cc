use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Shown when nothing more specific can be said about a failure.
pub const GENERIC_FAILURE: &str = "Could not fetch data. Make sure the backend is reachable.";

const MAX_DETAIL_LEN: usize = 200;

/// The endpoints exposed by the diagnostics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MyIp,
    CheckPort,
    Ping,
    Geolocate,
    Whois,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::MyIp => "/my-ip",
            Endpoint::CheckPort => "/check-port",
            Endpoint::Ping => "/ping",
            Endpoint::Geolocate => "/geolocate",
            Endpoint::Whois => "/whois",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::MyIp => "client IP lookup",
            Endpoint::CheckPort => "port check",
            Endpoint::Ping => "ping",
            Endpoint::Geolocate => "geolocation",
            Endpoint::Whois => "WHOIS lookup",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("{endpoint} timed out after {}s", .after.as_secs_f64())]
    Timeout { endpoint: Endpoint, after: Duration },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: Option<String>,
    },

    #[error("{endpoint} request failed")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned a malformed body")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ApiError::Client(_) => None,
            ApiError::Timeout { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }

    /// Best-effort text for the error banner.
    ///
    /// Prefers what the server said, then the HTTP status, then a generic hint.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Status { status, .. } => format!("HTTP {status}"),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Pulls a human readable reason out of an error body.
///
/// JSON bodies are searched for `detail`, `error` and `message` (FastAPI style
/// validation lists contribute their first `msg`). Plain text bodies are used
/// as-is, trimmed and capped.
pub fn extract_detail(body: &str) -> Option<String> {
    let body: &str = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["detail", "error", "message"]
            .iter()
            .find_map(|key| detail_from_value(value.get(*key)?)),
        Err(_) => Some(truncate(body)),
    }
}

fn detail_from_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(truncate(s.trim())),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(detail_from_value)),
        _ => None,
    }
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(MAX_DETAIL_LEN) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_detail_prefers_known_fields() {
        assert_eq!(
            extract_detail(r#"{"detail":"Port must be numeric"}"#).as_deref(),
            Some("Port must be numeric")
        );
        assert_eq!(
            extract_detail(r#"{"error":"lookup failed"}"#).as_deref(),
            Some("lookup failed")
        );
        assert_eq!(
            extract_detail(r#"{"message":"rate limited"}"#).as_deref(),
            Some("rate limited")
        );
    }

    #[test]
    fn extract_detail_reads_validation_lists() {
        let body = r#"{"detail":[{"loc":["query","port"],"msg":"field required","type":"missing"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required"));
    }

    #[test]
    fn extract_detail_falls_back_to_text() {
        assert_eq!(
            extract_detail("  Bad Gateway \n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_detail(""), None);
        assert_eq!(extract_detail(r#"{"status":"error"}"#), None);
        assert_eq!(extract_detail(r#"{"detail":"   "}"#), None);

        let long: String = "x".repeat(500);
        let detail: String = extract_detail(&long).unwrap();
        assert_eq!(detail.chars().count(), MAX_DETAIL_LEN + 1);
        assert!(detail.ends_with('…'));
    }

    #[test]
    fn user_message_order() {
        let with_detail = ApiError::Status {
            endpoint: Endpoint::CheckPort,
            status: 422,
            detail: Some("field required".to_string()),
        };
        assert_eq!(with_detail.user_message(), "field required");

        let bare = ApiError::Status {
            endpoint: Endpoint::Ping,
            status: 502,
            detail: None,
        };
        assert_eq!(bare.user_message(), "HTTP 502");
        assert_eq!(bare.to_string(), "ping returned HTTP 502");

        let timeout = ApiError::Timeout {
            endpoint: Endpoint::Whois,
            after: Duration::from_secs(5),
        };
        assert_eq!(timeout.user_message(), GENERIC_FAILURE);
        assert_eq!(timeout.to_string(), "WHOIS lookup timed out after 5s");
        assert_eq!(timeout.endpoint(), Some(Endpoint::Whois));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::MyIp.path(), "/my-ip");
        assert_eq!(Endpoint::CheckPort.path(), "/check-port");
        assert_eq!(Endpoint::Geolocate.path(), "/geolocate");
    }
}
