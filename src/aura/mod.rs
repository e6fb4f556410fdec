// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Aura wire-protocol layer
//!
//! Everything that talks the undocumented Aura protocol: endpoint
//! probing, config/bootstrap scraping, and the action RPC envelope.
//! The literals below are protocol fixtures; change any of them and
//! live Experience Cloud sites stop answering.

mod action;
mod bootstrap;
mod context;
mod endpoint;
pub mod payload;

pub use action::ActionClient;
pub use bootstrap::{AuraConfig, ConfigDetails, ConfigExtractor};
pub use context::AuraContext;
pub use endpoint::EndpointProber;

/// Candidate Aura endpoint path suffixes, in probe order
pub const ENDPOINT_CANDIDATES: [&str; 4] = ["aura", "s/aura", "s/sfsites/aura", "sfsites/aura"];

/// Endpoint path pattern preferred when more than one candidate answers
pub const PREFERRED_ENDPOINT_PATTERN: &str = "s/sfsites/";

/// Body marker of a live Aura endpoint rejecting an unauthenticated call.
///
/// Brittleness risk: this is a heuristic tied to current Aura server
/// behavior. If Salesforce changes the error text, probing silently
/// reports zero endpoints.
pub const INVALID_SESSION_MARKER: &str = "aura:invalidSession";

/// Prefix of component descriptors in getPageComponent responses
pub const MARKUP_PREFIX: &str = "markup://";

/// Marker preceding the URL-encoded aura.attributes blob in bootstrap URLs
pub const BOOTSTRAP_ATTRIBUTES_MARKER: &str = "bootstrap.js?aura.attributes=";

/// Marker terminating the aura.attributes blob
pub const BOOTSTRAP_JWT_MARKER: &str = "&jwt=";
