// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Action payload templates
//!
//! Ready-made payload skeletons for the Aura actions the pipeline
//! issues itself. Callers with their own payloads pass them in as
//! already-parsed [`serde_json::Value`]s; the core never touches the
//! filesystem.

use lazy_static::lazy_static;
use serde_json::{json, Value};

lazy_static! {
    static ref GET_PAGE_COMPONENT: Value = json!({
        "actions": [
            {
                "id": "1;a",
                "descriptor": "serviceComponent://ui.comm.runtime.components.aura.components.siteforce.controller.PubliclyCacheableComponentLoaderController/ACTION$getPageComponent",
                "callingDescriptor": "UNKNOWN",
                "params": {
                    "attributes": {
                        "viewId": "",
                        "routeType": "",
                        "themeLayoutType": "",
                        "params": { "viewid": "" }
                    },
                    "publishedChangelistNum": 0,
                    "brandingSetId": ""
                }
            }
        ]
    });
}

/// Standard-namespace substrings excluded from mined descriptors.
///
/// Anything shipped by Salesforce itself is noise for recon; only
/// org-authored namespaces are interesting.
pub const DEFAULT_IGNORED_NAMESPACES: &[&str] = &[
    "aura:",
    "ui:",
    "force:",
    "forceChatter:",
    "forceCommunity:",
    "forceContent:",
    "forceKnowledge:",
    "forceSearch:",
    "forceTopic:",
    "flowruntime:",
    "instrumentation:",
    "interop:",
    "lightning:",
    "lightningcommunity:",
    "one:",
    "performance:",
    "setup:",
    "siteforce:",
    "community_builder:",
    "embeddedService:",
];

/// Template for the siteforce `getPageComponent` loader action
///
/// The component miner overrides the view/route/layout fields per route.
pub fn get_page_component() -> Value {
    GET_PAGE_COMPONENT.clone()
}
