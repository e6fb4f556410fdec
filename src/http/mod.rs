// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer
//!
//! A deliberately small wrapper around reqwest: fixed user agent,
//! optional Salesforce `sid` session cookie, single attempt per call.
//! Everything the Aura pipeline sends goes through here.

mod client;

pub use client::{HttpClient, HttpClientConfig};

/// Default user agent string, matches a desktop Chrome build
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_2_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.150 Safari/537.36";
