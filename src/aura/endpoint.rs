// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Aura endpoint probing and selection
//!
//! Tries a fixed candidate list of endpoint paths against the base URL.
//! A 200 body containing [`INVALID_SESSION_MARKER`] means "this is a
//! live Aura endpoint", not an actual session check. Runs the probes
//! unauthenticated even when a session cookie is configured.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::{ENDPOINT_CANDIDATES, INVALID_SESSION_MARKER, PREFERRED_ENDPOINT_PATTERN};
use crate::error::{Error, Result};
use crate::http::HttpClient;

/// How many candidate probes run in flight at once
const PROBE_CONCURRENCY: usize = 4;

/// Probes candidate Aura endpoint paths and selects the preferred one
pub struct EndpointProber<'a> {
    client: &'a HttpClient,
}

impl<'a> EndpointProber<'a> {
    /// Create a prober over a shared client
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Probe all candidates under `base_url` and return the active endpoint URL
    ///
    /// Fails with [`Error::NoEndpointFound`] when no candidate answers with
    /// the Aura invalid-session signature. Individual probe failures
    /// (refused connection, timeout) only mark that candidate unavailable.
    pub async fn select(&self, base_url: &str) -> Result<String> {
        let available = self.check_availability(base_url).await;

        if available.is_empty() {
            return Err(Error::NoEndpointFound {
                base_url: base_url.to_string(),
                probed: ENDPOINT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            });
        }

        debug!(?available, "available Aura endpoints");
        let active = Self::select_preferred(&available).to_string();
        info!(endpoint = %active, "active Aura endpoint selected");
        Ok(active)
    }

    /// Check all candidates concurrently, preserving candidate order
    async fn check_availability(&self, base_url: &str) -> Vec<String> {
        let probes = ENDPOINT_CANDIDATES
            .iter()
            .map(|candidate| {
                let url = format!("{}/{}", base_url, candidate);
                async move {
                    let available = self.is_available(&url).await;
                    (url, available)
                }
            })
            .collect::<Vec<_>>();

        stream::iter(probes)
            .buffered(PROBE_CONCURRENCY)
            .filter_map(|(url, available)| async move { available.then_some(url) })
            .collect()
            .await
    }

    /// One probe: empty POST, look for the invalid-session signature
    async fn is_available(&self, url: &str) -> bool {
        debug!(url, "probing candidate endpoint");
        match self.client.post_form(url, &[], false).await {
            Ok(body) => body.contains(INVALID_SESSION_MARKER),
            Err(e) => {
                // Unreachable candidates are simply unavailable.
                debug!(url, error = %e, "probe failed");
                false
            }
        }
    }

    /// Prefer the first `s/sfsites/` candidate, else the first available
    fn select_preferred(available: &[String]) -> &str {
        available
            .iter()
            .find(|url| url.contains(PREFERRED_ENDPOINT_PATTERN))
            .unwrap_or(&available[0])
    }
}
