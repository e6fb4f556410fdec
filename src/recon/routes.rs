// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Route discovery from the bootstrap script
//!
//! The bootstrap URL carries page-layout attributes as a URL-encoded
//! JSON blob in its query string; the script body embeds the site's
//! routes map as a JSON fragment. Both are scraped here and merged into
//! [`Route`] records.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aura::{BOOTSTRAP_ATTRIBUTES_MARKER, BOOTSTRAP_JWT_MARKER};
use crate::error::{Error, Result};
use crate::http::HttpClient;

/// One navigable view plus the layout metadata needed to request its
/// components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub id: String,
    pub event: String,
    pub route_uddid: String,
    pub view_uuid: String,
    #[serde(rename = "themeLayoutType")]
    pub theme_layout_type: String,
    #[serde(rename = "publishedChangelistNum")]
    pub published_changelist_num: i64,
    #[serde(rename = "brandingSetId")]
    pub branding_set_id: String,
}

/// Per-route fields as they appear in the routes map
#[derive(Debug, Deserialize)]
struct RouteInfo {
    id: String,
    event: String,
    route_uddid: String,
    view_uuid: String,
}

/// Bootstrap-wide attributes decoded from the bootstrap URL
#[derive(Debug, Deserialize)]
struct BootstrapAttributes {
    #[serde(rename = "themeLayoutType")]
    theme_layout_type: String,
    #[serde(rename = "publishedChangelistNum")]
    published_changelist_num: i64,
    #[serde(rename = "brandingSetId")]
    branding_set_id: String,
}

/// Collects routes from a site's bootstrap script
pub struct RouteCollector<'a> {
    client: &'a HttpClient,
    routes_regex: Regex,
}

impl<'a> RouteCollector<'a> {
    /// Create a collector over a shared client
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            // The routes map fragment, non-greedy, tolerant of one level
            // of nested braces. Applied after whitespace collapsing.
            routes_regex: Regex::new(r#"routes":\{.+?,\s?.+?\}\s?\}"#).unwrap(),
        }
    }

    /// Fetch the bootstrap script and extract the route list
    ///
    /// Output order follows the routes map's insertion order.
    pub async fn collect(&self, bootstrap_url: &str) -> Result<Vec<Route>> {
        info!(url = bootstrap_url, "collecting routes");
        let attributes = Self::decode_attributes(bootstrap_url)?;
        let body = self.client.get(bootstrap_url, false).await?;
        let routes = self.extract_routes(&body, &attributes, bootstrap_url)?;
        debug!(count = routes.len(), "routes collected");
        Ok(routes)
    }

    /// Decode the aura.attributes blob between the bootstrap URL markers
    fn decode_attributes(bootstrap_url: &str) -> Result<BootstrapAttributes> {
        let (_, tail) = bootstrap_url
            .split_once(BOOTSTRAP_ATTRIBUTES_MARKER)
            .ok_or_else(|| {
                Error::bootstrap_attributes(bootstrap_url, "no aura.attributes marker")
            })?;
        let encoded = tail
            .split_once(BOOTSTRAP_JWT_MARKER)
            .map(|(blob, _)| blob)
            .ok_or_else(|| Error::bootstrap_attributes(bootstrap_url, "no jwt marker"))?;

        let decoded = percent_decode_str(encoded).decode_utf8().map_err(|e| {
            Error::bootstrap_attributes(bootstrap_url, format!("blob is not UTF-8: {}", e))
        })?;
        serde_json::from_str(&decoded).map_err(|e| {
            Error::bootstrap_attributes(bootstrap_url, format!("blob is not valid JSON: {}", e))
        })
    }

    /// Locate and parse the embedded routes map
    fn extract_routes(
        &self,
        body: &str,
        attributes: &BootstrapAttributes,
        bootstrap_url: &str,
    ) -> Result<Vec<Route>> {
        // Collapse all whitespace runs, newlines included, so the
        // fragment regex sees one line.
        let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");

        let fragment = self
            .routes_regex
            .find(&collapsed)
            .ok_or_else(|| Error::RoutesNotFound {
                url: bootstrap_url.to_string(),
            })?
            .as_str();
        let routes_json = fragment.trim_start_matches("routes\":");

        // preserve_order keeps the map's insertion order.
        let routes_map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(routes_json)?;

        let mut routes = Vec::with_capacity(routes_map.len());
        for (path, value) in routes_map {
            let info: RouteInfo = serde_json::from_value(value)?;
            routes.push(Route {
                path,
                id: info.id,
                event: info.event,
                route_uddid: info.route_uddid,
                view_uuid: info.view_uuid,
                theme_layout_type: attributes.theme_layout_type.clone(),
                published_changelist_num: attributes.published_changelist_num,
                branding_set_id: attributes.branding_set_id.clone(),
            });
        }
        Ok(routes)
    }
}
