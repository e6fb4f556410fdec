// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Recon session state
//!
//! The state shared across pipeline stages, threaded explicitly instead
//! of mutated ambiently: only the orchestrator writes it, each stage
//! reads what earlier stages resolved. Lives for one invocation, never
//! persisted.

use std::collections::BTreeSet;

use crate::aura::AuraContext;
use crate::error::{Error, Result};
use crate::recon::Route;

/// Mutable state of one recon run against a single site
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Normalized base URL (no trailing `/s` or `/`)
    pub base_url: String,
    /// Aura bearer-style token, empty when unauthenticated
    pub aura_token: String,
    /// Resolved active endpoint URL; None until probing succeeds
    pub active_endpoint: Option<String>,
    /// Handshake context; None until config extraction succeeds
    pub context: Option<AuraContext>,
    /// Bootstrap script URL scraped from the landing page
    pub bootstrap_url: Option<String>,
    /// Discovered routes, in source order
    pub routes: Vec<Route>,
    /// Discovered custom component descriptors, deduplicated
    pub components: BTreeSet<String>,
}

impl Session {
    /// Create a session for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the Aura token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.aura_token = token.into();
        self
    }

    /// Enforce the action-request invariant: endpoint and context must
    /// both be resolved before any action goes out
    pub fn require_ready(&self) -> Result<(&str, &AuraContext)> {
        let endpoint = self
            .active_endpoint
            .as_deref()
            .ok_or(Error::SessionNotReady {
                missing: "active endpoint",
            })?;
        let context = self.context.as_ref().ok_or(Error::SessionNotReady {
            missing: "Aura context",
        })?;
        Ok((endpoint, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_ready_until_both_resolved() {
        let mut session = Session::new("https://acme.my.site.com");
        assert!(matches!(
            session.require_ready(),
            Err(Error::SessionNotReady { missing: "active endpoint" })
        ));

        session.active_endpoint = Some("https://acme.my.site.com/s/sfsites/aura".to_string());
        assert!(matches!(
            session.require_ready(),
            Err(Error::SessionNotReady { missing: "Aura context" })
        ));

        session.context = Some(AuraContext::new("ABC", "one", json!({})));
        let (endpoint, context) = session.require_ready().unwrap();
        assert_eq!(endpoint, "https://acme.my.site.com/s/sfsites/aura");
        assert_eq!(context.fwuid, "ABC");
    }
}
