// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Aurasniff - Experience Cloud Recon Client
//!
//! A reconnaissance client for Salesforce Experience Cloud (Aura)
//! sites. Reconstructs enough protocol state from the undocumented
//! client-rendered framework to speak the Aura wire protocol:
//!
//! - Endpoint probing: find live Aura RPC endpoints by signature
//! - Config extraction: scrape fwuid/app/loaded out of the landing page
//! - Route collection: decode the site's routes map from the bootstrap script
//! - Component mining: walk getPageComponent responses for custom descriptors
//! - Action requests: issue authenticated Aura actions against the surface
//!
//! ## Example
//!
//! ```rust,no_run
//! use aurasniff::{HttpClientConfig, Recon};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut recon = Recon::new(
//!         "https://acme.my.site.com",
//!         HttpClientConfig::default(),
//!     )?;
//!
//!     recon.discover().await?;
//!     let components = recon.mine_components().await?;
//!     for descriptor in components {
//!         println!("custom component: {}", descriptor);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aura;
pub mod error;
pub mod http;
pub mod recon;

// Re-exports for convenience

// Aura protocol
pub use aura::{
    ActionClient, AuraConfig, AuraContext, ConfigDetails, ConfigExtractor, EndpointProber,
};

// Discovery
pub use recon::{ComponentMiner, Recon, Route, RouteCollector, Session};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig};

/// Aurasniff version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
