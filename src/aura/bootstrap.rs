// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Framework config and bootstrap URL extraction
//!
//! Scrapes the Aura handshake material (fwuid/app/loaded) and the
//! bootstrap script URL out of the site's landing page. The scraping is
//! regex-based and coupled to an undocumented, versioned front end;
//! everything fragile lives behind [`ConfigExtractor::extract_config`]
//! so the strategy can be swapped without touching callers.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use super::AuraContext;
use crate::error::{Error, Result};
use crate::http::HttpClient;

/// Validated framework config fields scraped from the page
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDetails {
    pub fwuid: String,
    pub app: String,
    pub loaded: Value,
}

/// Output of the extraction stage
#[derive(Debug, Clone)]
pub struct AuraConfig {
    /// The handshake context built from the scraped fields
    pub context: AuraContext,
    /// Absolute URL of the site's bootstrap script
    pub bootstrap_url: String,
}

/// Scrapes Aura config and bootstrap URL from a site's landing page
pub struct ConfigExtractor<'a> {
    client: &'a HttpClient,
    redirect_regex: Regex,
    config_regex: Regex,
    script_regex: Regex,
}

impl<'a> ConfigExtractor<'a> {
    /// Create an extractor over a shared client
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            // Single-quoted assignment target of a client-side JS redirect
            redirect_regex: Regex::new(r"window\.location\.href ='([^']+)").unwrap(),
            // URL-encoded JSON config blob embedded in resource paths
            config_regex: Regex::new(r"/s/sfsites/l/([^/]+fwuid[^/]+)").unwrap(),
            // Script tag attribute blocks; the bootstrap script is the last tag
            script_regex: Regex::new(r"(?s)<script([^>]*)?>.*?</script>").unwrap(),
        }
    }

    /// Fetch the landing page and extract `{auraContext, bootstrapUrl}`
    ///
    /// Follows at most one client-side login redirect (re-fetched without
    /// the session cookie; redirect targets are public login pages). The
    /// config blob is scraped from the post-redirect body, the bootstrap
    /// script URL from the original landing page.
    pub async fn load(&self, base_url: &str) -> Result<AuraConfig> {
        info!(url = base_url, "loading Aura config");
        let landing = self.client.get(base_url, true).await?;
        let redirected = self.follow_login_redirect(base_url, &landing).await?;
        let config_body = redirected.as_deref().unwrap_or(&landing);

        let details = self.extract_config(config_body, base_url)?;
        debug!(fwuid = %details.fwuid, app = %details.app, "Aura config scraped");

        let context = AuraContext::new(details.fwuid, details.app, details.loaded);
        let bootstrap_url = self.extract_bootstrap_url(base_url, &landing)?;
        debug!(url = %bootstrap_url, "bootstrap script URL");

        Ok(AuraConfig {
            context,
            bootstrap_url,
        })
    }

    /// One-shot hop over a client-side login redirect
    ///
    /// Detected only when the assignment target starts with the base URL;
    /// the second fetch is never re-checked for further redirects.
    async fn follow_login_redirect(
        &self,
        base_url: &str,
        landing: &str,
    ) -> Result<Option<String>> {
        let marker = format!("window.location.href ='{}", base_url);
        if !landing.contains(&marker) {
            return Ok(None);
        }

        let target = match self
            .redirect_regex
            .captures(landing)
            .and_then(|c| c.get(1))
        {
            Some(m) => m.as_str().to_string(),
            None => return Ok(None),
        };

        info!(url = %target, "following login page redirect");
        let body = self.client.get(&target, false).await?;
        Ok(Some(body))
    }

    /// Narrow extraction seam: scrape and validate the config blob
    ///
    /// `url` is only used for error context.
    pub fn extract_config(&self, html: &str, url: &str) -> Result<ConfigDetails> {
        if !html.contains("fwuid") {
            return Err(Error::NoFwuidFound {
                url: url.to_string(),
            });
        }

        let details = match self.config_regex.captures(html).and_then(|c| c.get(1)) {
            Some(encoded) => {
                let decoded = percent_decode_str(encoded.as_str())
                    .decode_utf8()
                    .map_err(|e| {
                        Error::malformed(url, format!("config blob is not UTF-8: {}", e))
                    })?;
                serde_json::from_str::<Value>(&decoded)
                    .unwrap_or_else(|_| Value::Object(Default::default()))
            }
            None => Value::Object(Default::default()),
        };

        Self::validate_details(&details, url)
    }

    /// Require fwuid, app and loaded; anything less is not a usable handshake
    fn validate_details(details: &Value, url: &str) -> Result<ConfigDetails> {
        let fwuid = details["fwuid"].as_str().unwrap_or("");
        let app = details["app"].as_str().unwrap_or("");
        let loaded = &details["loaded"];

        let mut missing = Vec::new();
        if fwuid.is_empty() {
            missing.push("fwuid");
        }
        if app.is_empty() {
            missing.push("app");
        }
        if loaded.is_null() {
            missing.push("loaded");
        }
        if !missing.is_empty() {
            return Err(Error::MissingAuraFields {
                url: url.to_string(),
                missing,
            });
        }

        Ok(ConfigDetails {
            fwuid: fwuid.to_string(),
            app: app.to_string(),
            loaded: loaded.clone(),
        })
    }

    /// Take the last `<script>` tag's src and resolve it against the
    /// scheme+host of the base URL
    ///
    /// The last-tag choice is a convention of the Aura page shell
    /// (the bootstrap script is emitted last); deliberately not made
    /// smarter.
    fn extract_bootstrap_url(&self, base_url: &str, html: &str) -> Result<String> {
        let last = self
            .script_regex
            .captures_iter(html)
            .last()
            .ok_or_else(|| Error::bootstrap_script(base_url, "no script tags in page"))?;

        let attrs = last.get(1).map(|m| m.as_str()).unwrap_or("");
        let src = attrs
            .replace("src=\"", "")
            .replace('"', "")
            .replace(' ', "");
        if src.is_empty() {
            return Err(Error::bootstrap_script(
                base_url,
                "last script tag has no src attribute",
            ));
        }

        let parsed = url::Url::parse(base_url)?;
        Ok(format!("{}{}", parsed.origin().ascii_serialization(), src))
    }
}
