// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Aura context handshake object
//!
//! A fixed-shape token built once from the scraped framework config and
//! sent, serialized, with every action request. Immutable for the life
//! of a session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The `aura.context` handshake object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraContext {
    /// Framework mode; always "PROD" for Experience Cloud sites
    pub mode: String,
    /// Framework version identifier scraped from the landing page
    pub fwuid: String,
    /// Aura application descriptor
    pub app: String,
    /// Loaded component map as served by the site
    pub loaded: Value,
    pub dn: Vec<Value>,
    pub globals: serde_json::Map<String, Value>,
    pub uad: bool,
}

impl AuraContext {
    /// Build a context from the validated config fields
    pub fn new(fwuid: impl Into<String>, app: impl Into<String>, loaded: Value) -> Self {
        Self {
            mode: "PROD".to_string(),
            fwuid: fwuid.into(),
            app: app.into(),
            loaded,
            dn: Vec::new(),
            globals: serde_json::Map::new(),
            uad: false,
        }
    }

    /// Serialize to the wire form sent in the `aura.context` form field
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
