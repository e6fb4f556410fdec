// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Custom component discovery
//!
//! Issues a siteforce `getPageComponent` action per route and walks the
//! arbitrarily nested JSON response for `markup://` component
//! descriptors. Standard Salesforce namespaces are filtered out; only
//! org-authored components survive.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::aura::payload::DEFAULT_IGNORED_NAMESPACES;
use crate::aura::{payload, ActionClient, MARKUP_PREFIX};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::recon::{Route, Session};

/// Depth cap for the descriptor walk. The JSON tree is finite, but it is
/// target-controlled; a pathological response must not blow the stack.
pub const MAX_WALK_DEPTH: usize = 128;

/// How many route scans run in flight at once
const SCAN_CONCURRENCY: usize = 4;

/// Mines component descriptors out of per-route page component responses
pub struct ComponentMiner<'a> {
    actions: ActionClient<'a>,
    ignored: Vec<String>,
    template: Value,
}

impl<'a> ComponentMiner<'a> {
    /// Create a miner with the default payload template and ignore list
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            actions: ActionClient::new(client),
            ignored: DEFAULT_IGNORED_NAMESPACES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            template: payload::get_page_component(),
        }
    }

    /// Replace the ignored-namespace substrings
    pub fn with_ignored(mut self, ignored: Vec<String>) -> Self {
        self.ignored = ignored;
        self
    }

    /// Replace the getPageComponent payload template
    pub fn with_template(mut self, template: Value) -> Self {
        self.template = template;
        self
    }

    /// Scan every route and return the deduplicated descriptor set
    ///
    /// Routes are scanned concurrently over the shared client; the result
    /// set is accumulated behind a lock and handed back only after all
    /// scans finish. Requires a ready session (endpoint + context).
    pub async fn collect(&self, session: &Session) -> Result<BTreeSet<String>> {
        let (endpoint, context) = session.require_ready()?;
        info!(routes = session.routes.len(), "scanning routes for components");

        let found = Arc::new(RwLock::new(BTreeSet::new()));
        let scans = session
            .routes
            .iter()
            .map(|route| {
                let payload = self.payload_for(route);
                let found = Arc::clone(&found);
                async move {
                    let envelope = self
                        .actions
                        .send_raw(endpoint, &payload, context, &session.aura_token)
                        .await?;
                    let descriptors = Self::find_descriptors(&envelope)?;
                    debug!(path = %route.path, count = descriptors.len(), "route scanned");

                    let mut set = found.write();
                    for descriptor in descriptors {
                        if !self.is_ignored(&descriptor) {
                            set.insert(descriptor);
                        }
                    }
                    Ok::<_, Error>(())
                }
            })
            .collect::<Vec<_>>();

        let results: Vec<Result<()>> = stream::iter(scans).buffered(SCAN_CONCURRENCY).collect().await;
        for result in results {
            result?;
        }

        let components = found.read().clone();
        info!(count = components.len(), "custom components discovered");
        Ok(components)
    }

    /// Build the per-route payload from the template
    fn payload_for(&self, route: &Route) -> Value {
        let mut payload = self.template.clone();
        let params = &mut payload["actions"][0]["params"];
        params["attributes"]["viewId"] = json!(route.id);
        params["attributes"]["routeType"] = json!(route.event);
        params["attributes"]["themeLayoutType"] = json!(route.theme_layout_type);
        params["attributes"]["params"]["viewid"] = json!(route.view_uuid);
        params["publishedChangelistNum"] = json!(route.published_changelist_num);
        params["brandingSetId"] = json!(route.branding_set_id);
        payload
    }

    fn is_ignored(&self, descriptor: &str) -> bool {
        self.ignored.iter().any(|ns| descriptor.contains(ns.as_str()))
    }

    /// Recursively collect `markup://` descriptors from a JSON tree
    ///
    /// Recurses into nested objects and into objects inside lists;
    /// scalars and non-object list items are skipped. The `markup://`
    /// prefix is stripped from recorded descriptors.
    pub fn find_descriptors(value: &Value) -> Result<Vec<String>> {
        let mut out = Vec::new();
        Self::walk(value, 0, &mut out)?;
        Ok(out)
    }

    fn walk(value: &Value, depth: usize, out: &mut Vec<String>) -> Result<()> {
        if depth > MAX_WALK_DEPTH {
            return Err(Error::TooDeep {
                limit: MAX_WALK_DEPTH,
            });
        }

        let map = match value {
            Value::Object(map) => map,
            _ => return Ok(()),
        };

        for (key, nested) in map {
            if key == "descriptor" {
                if let Some(stripped) = nested.as_str().and_then(|s| s.strip_prefix(MARKUP_PREFIX))
                {
                    out.push(stripped.to_string());
                }
            }
            match nested {
                Value::Object(_) => Self::walk(nested, depth + 1, out)?,
                Value::Array(items) => {
                    for item in items {
                        if item.is_object() {
                            Self::walk(item, depth + 1, out)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::AuraContext;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn nested_response() -> Value {
        json!({
            "actions": [{
                "state": "SUCCESS",
                "returnValue": {
                    "descriptor": "markup://siteforce:loader",
                    "components": [
                        {
                            "descriptor": "markup://c:OrderLookup",
                            "children": [
                                { "descriptor": "markup://c:OrderRow" },
                                "a-scalar-item",
                                [ { "descriptor": "markup://c:Hidden" } ]
                            ]
                        },
                        { "descriptor": "markup://ui:button" },
                        { "descriptor": "not-a-markup-descriptor" }
                    ]
                }
            }]
        })
    }

    #[test]
    fn test_walk_collects_at_any_depth() {
        let descriptors = ComponentMiner::find_descriptors(&nested_response()).unwrap();

        assert!(descriptors.contains(&"c:OrderLookup".to_string()));
        assert!(descriptors.contains(&"c:OrderRow".to_string()));
        assert!(descriptors.contains(&"siteforce:loader".to_string()));
        assert!(descriptors.contains(&"ui:button".to_string()));
        // Non-markup strings are never descriptors.
        assert!(!descriptors.iter().any(|d| d.contains("not-a-markup")));
        // Lists of lists are not descended into.
        assert!(!descriptors.contains(&"c:Hidden".to_string()));
    }

    #[test]
    fn test_walk_depth_cap() {
        let mut value = json!({ "descriptor": "markup://c:Leaf" });
        for _ in 0..(MAX_WALK_DEPTH + 2) {
            value = json!({ "nested": value });
        }

        let err = ComponentMiner::find_descriptors(&value).unwrap_err();
        assert!(matches!(err, Error::TooDeep { .. }));
    }

    #[tokio::test]
    async fn test_collect_dedups_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/s/sfsites/aura"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(nested_response().to_string()),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let mut session = Session::new(server.uri());
        session.active_endpoint = Some(format!("{}/s/sfsites/aura", server.uri()));
        session.context = Some(AuraContext::new("ABC", "one", json!({})));
        // Two routes answered by the same mock: dedup must collapse them.
        for n in 0..2 {
            session.routes.push(Route {
                path: format!("/r{}", n),
                id: format!("id{}", n),
                event: "routeChange".to_string(),
                route_uddid: format!("u{}", n),
                view_uuid: format!("v{}", n),
                theme_layout_type: "Inner".to_string(),
                published_changelist_num: 7,
                branding_set_id: "b".to_string(),
            });
        }

        let miner = ComponentMiner::new(&client);
        let first = miner.collect(&session).await.unwrap();
        let second = miner.collect(&session).await.unwrap();

        // Standard namespaces filtered, customs kept, dedup across routes.
        assert_eq!(
            first.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["c:OrderLookup", "c:OrderRow"]
        );
        // Idempotent across identical runs.
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_collect_requires_ready_session() {
        let client = HttpClient::new().unwrap();
        let session = Session::new("https://x");
        let err = ComponentMiner::new(&client).collect(&session).await.unwrap_err();
        assert!(matches!(err, Error::SessionNotReady { .. }));
    }
}
