// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The recon pipeline orchestrator
//!
//! Runs the stages in their only valid order (endpoint probe, config
//! extraction, route collection, component mining) and is the sole
//! writer of the [`Session`]. Stages themselves only read the session
//! state resolved before them.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::info;

use crate::aura::ActionClient;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::recon::{ComponentMiner, Route, Session};

/// One recon run against a single Experience Cloud site
pub struct Recon {
    client: HttpClient,
    session: Session,
}

impl Recon {
    /// Create a recon run for a normalized base URL
    pub fn new(base_url: impl Into<String>, config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_config(config)?,
            session: Session::new(base_url),
        })
    }

    /// Set the Aura token for authenticated actions
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.session.aura_token = token.into();
        self
    }

    /// Read access to the session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stage 1+2: resolve the active endpoint and the Aura config
    ///
    /// Skips whatever is already resolved; the context is immutable once
    /// built for the life of the session.
    pub async fn discover(&mut self) -> Result<()> {
        if self.session.active_endpoint.is_none() {
            let endpoint = crate::aura::EndpointProber::new(&self.client)
                .select(&self.session.base_url)
                .await?;
            self.session.active_endpoint = Some(endpoint);
        }

        if self.session.context.is_none() {
            let config = crate::aura::ConfigExtractor::new(&self.client)
                .load(&self.session.base_url)
                .await?;
            self.session.context = Some(config.context);
            self.session.bootstrap_url = Some(config.bootstrap_url);
        }

        info!(
            endpoint = self.session.active_endpoint.as_deref().unwrap_or(""),
            "discovery complete"
        );
        Ok(())
    }

    /// Stage 3: collect routes from the bootstrap script
    pub async fn collect_routes(&mut self) -> Result<&[Route]> {
        if self.session.bootstrap_url.is_none() {
            self.discover().await?;
        }
        let bootstrap_url = match self.session.bootstrap_url.clone() {
            Some(url) => url,
            None => {
                return Err(Error::SessionNotReady {
                    missing: "bootstrap URL",
                })
            }
        };

        let routes = crate::recon::RouteCollector::new(&self.client)
            .collect(&bootstrap_url)
            .await?;
        self.session.routes = routes;
        Ok(&self.session.routes)
    }

    /// Stage 4: mine custom component descriptors across all routes
    pub async fn mine_components(&mut self) -> Result<&BTreeSet<String>> {
        if self.session.routes.is_empty() {
            self.collect_routes().await?;
        }

        let components = ComponentMiner::new(&self.client)
            .collect(&self.session)
            .await?;
        self.session.components = components;
        Ok(&self.session.components)
    }

    /// Issue one Aura action against the discovered surface
    ///
    /// Requires discovery to have run. `raw` returns the whole envelope
    /// instead of the unwrapped `returnValue`.
    pub async fn send_action(&self, payload: &Value, raw: bool) -> Result<Value> {
        let (endpoint, context) = self.session.require_ready()?;
        let actions = ActionClient::new(&self.client);
        if raw {
            actions
                .send_raw(endpoint, payload, context, &self.session.aura_token)
                .await
        } else {
            actions
                .send(endpoint, payload, context, &self.session.aura_token)
                .await
        }
    }
}
