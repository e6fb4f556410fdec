// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the aurasniff recon pipeline
//!
//! Every pipeline stage fails fast with a typed error carrying enough
//! context (stage, URL, underlying cause) for the caller to render a
//! single actionable diagnostic line. The core never prints.

use thiserror::Error;

/// Result type alias for aurasniff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the recon pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Network/IO failure on a single request. No retries: these are
    /// exploratory probes against possibly broken targets.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body was not valid JSON
    #[error("non-JSON response from {url}: {source} (body: {body})")]
    ProtocolDecode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Aura answered with a protocol-level exception envelope
    #[error("Aura exception event in response from {url}")]
    AuraException {
        url: String,
        envelope: serde_json::Value,
    },

    /// Envelope parsed but is missing the expected action shape
    #[error("malformed Aura envelope from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// None of the candidate Aura endpoint paths answered
    #[error("no live Aura endpoint under {base_url} (probed {probed:?})")]
    NoEndpointFound {
        base_url: String,
        probed: Vec<String>,
    },

    /// Landing page has no embedded Aura bootstrap data
    #[error("no fwuid marker in page at {url}: not an Aura page (Visualforce redirect?)")]
    NoFwuidFound { url: String },

    /// Scraped config blob lacks required handshake fields
    #[error("Aura config at {url} is missing required fields: {missing:?}")]
    MissingAuraFields {
        url: String,
        missing: Vec<&'static str>,
    },

    /// Bootstrap script tag could not be extracted from the landing page
    #[error("no bootstrap script URL in page at {url}: {reason}")]
    BootstrapScript { url: String, reason: String },

    /// Bootstrap URL does not carry a decodable aura.attributes blob
    #[error("no aura.attributes blob in bootstrap URL {url}: {reason}")]
    BootstrapAttributes { url: String, reason: String },

    /// Bootstrap script body has no recognizable routes map
    #[error("no routes map in bootstrap script at {url}")]
    RoutesNotFound { url: String },

    /// Component tree nested past the walk's depth cap
    #[error("component response nested past depth {limit}")]
    TooDeep { limit: usize },

    /// Action issued before endpoint and context were resolved
    #[error("session not ready: {missing} not resolved yet, run discovery first")]
    SessionNotReady { missing: &'static str },

    /// Payload/context serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error for a URL
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.into(),
            source,
        }
    }

    /// Create a protocol decode error, keeping the raw body for diagnostics
    pub fn protocol_decode(
        url: impl Into<String>,
        body: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Error::ProtocolDecode {
            url: url.into(),
            body: body.into(),
            source,
        }
    }

    /// Create a malformed-response error
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a bootstrap script extraction error
    pub fn bootstrap_script(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::BootstrapScript {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a bootstrap attributes error
    pub fn bootstrap_attributes(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::BootstrapAttributes {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a transport-level (network/IO) error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if this is a protocol-level Aura failure, as opposed to an
    /// HTTP-level one
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Error::ProtocolDecode { .. }
                | Error::AuraException { .. }
                | Error::MalformedResponse { .. }
        )
    }

    /// Get the URL this error relates to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Transport { url, .. } => Some(url),
            Error::ProtocolDecode { url, .. } => Some(url),
            Error::AuraException { url, .. } => Some(url),
            Error::MalformedResponse { url, .. } => Some(url),
            Error::NoEndpointFound { base_url, .. } => Some(base_url),
            Error::NoFwuidFound { url } => Some(url),
            Error::MissingAuraFields { url, .. } => Some(url),
            Error::BootstrapScript { url, .. } => Some(url),
            Error::BootstrapAttributes { url, .. } => Some(url),
            Error::RoutesNotFound { url } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_endpoint_error() {
        let err = Error::NoEndpointFound {
            base_url: "https://acme.my.site.com".to_string(),
            probed: vec!["aura".to_string(), "s/aura".to_string()],
        };

        assert_eq!(err.url(), Some("https://acme.my.site.com"));
        assert!(!err.is_protocol());
        assert!(err.to_string().contains("s/aura"));
    }

    #[test]
    fn test_protocol_decode_keeps_body() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = Error::protocol_decode("https://x/aura", "<html>", source);

        assert!(err.is_protocol());
        assert!(err.to_string().contains("<html>"));
    }

    #[test]
    fn test_missing_fields_lists_names() {
        let err = Error::MissingAuraFields {
            url: "https://x".to_string(),
            missing: vec!["fwuid", "loaded"],
        };

        assert!(err.to_string().contains("fwuid"));
        assert!(err.to_string().contains("loaded"));
    }
}
