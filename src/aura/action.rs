// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Aura action requests
//!
//! One logical RPC per call: the payload JSON goes out as the `message`
//! form field next to `aura.context` and `aura.token`, and the response
//! envelope comes back as `{exceptionEvent, actions: [{state,
//! returnValue, error}]}`.

use serde_json::Value;
use tracing::debug;

use super::AuraContext;
use crate::error::{Error, Result};
use crate::http::HttpClient;

/// Sends Aura action payloads to a resolved endpoint
pub struct ActionClient<'a> {
    client: &'a HttpClient,
}

impl<'a> ActionClient<'a> {
    /// Create an action client over a shared transport
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Send an action and unwrap `actions[0].returnValue`
    ///
    /// Fails with [`Error::AuraException`] on an exception envelope and
    /// [`Error::MalformedResponse`] when the envelope lacks the expected
    /// action shape.
    pub async fn send(
        &self,
        endpoint: &str,
        payload: &Value,
        context: &AuraContext,
        token: &str,
    ) -> Result<Value> {
        let envelope = self.send_raw(endpoint, payload, context, token).await?;
        Self::unwrap_envelope(endpoint, envelope)
    }

    /// Send an action and return the parsed envelope unmodified
    ///
    /// Callers that must read per-action `error` fields alongside
    /// `returnValue` (Apex invocation, component mining) use this mode.
    pub async fn send_raw(
        &self,
        endpoint: &str,
        payload: &Value,
        context: &AuraContext,
        token: &str,
    ) -> Result<Value> {
        let message = serde_json::to_string(payload)?;
        let context_wire = context.to_wire()?;
        debug!(endpoint, "sending Aura action");

        let body = self
            .client
            .post_form(
                endpoint,
                &[
                    ("message", message.as_str()),
                    ("aura.context", context_wire.as_str()),
                    ("aura.token", token),
                ],
                true,
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| Error::protocol_decode(endpoint, body, e))
    }

    fn unwrap_envelope(endpoint: &str, envelope: Value) -> Result<Value> {
        if envelope["exceptionEvent"] == Value::Bool(true) {
            return Err(Error::AuraException {
                url: endpoint.to_string(),
                envelope,
            });
        }

        let first = match envelope.get("actions").and_then(|a| a.get(0)) {
            Some(action) => action,
            None => return Err(Error::malformed(endpoint, "no actions in envelope")),
        };
        if first.get("state").is_none() {
            return Err(Error::malformed(endpoint, "first action has no state"));
        }

        Ok(first.get("returnValue").cloned().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> AuraContext {
        AuraContext::new("ABC", "one", json!({}))
    }

    async fn respond_with(body: &str) -> (MockServer, String) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/s/sfsites/aura"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        let endpoint = format!("{}/s/sfsites/aura", server.uri());
        (server, endpoint)
    }

    #[tokio::test]
    async fn test_success_envelope_unwraps_return_value() {
        let (_server, endpoint) =
            respond_with(r#"{"actions":[{"state":"SUCCESS","returnValue":{"x":1}}]}"#).await;

        let client = HttpClient::new().unwrap();
        let value = ActionClient::new(&client)
            .send(&endpoint, &json!({"actions": []}), &ctx(), "")
            .await
            .unwrap();
        assert_eq!(value, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_exception_event_fails() {
        let (_server, endpoint) =
            respond_with(r#"{"exceptionEvent":true,"event":{"descriptor":"markup://aura:invalidSession"}}"#)
                .await;

        let client = HttpClient::new().unwrap();
        let err = ActionClient::new(&client)
            .send(&endpoint, &json!({"actions": []}), &ctx(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AuraException { .. }));
    }

    #[tokio::test]
    async fn test_missing_state_is_malformed() {
        let (_server, endpoint) = respond_with(r#"{"actions":[{"returnValue":null}]}"#).await;

        let client = HttpClient::new().unwrap();
        let err = ActionClient::new(&client)
            .send(&endpoint, &json!({"actions": []}), &ctx(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_protocol_decode() {
        let (_server, endpoint) = respond_with("<html>maintenance</html>").await;

        let client = HttpClient::new().unwrap();
        let err = ActionClient::new(&client)
            .send(&endpoint, &json!({"actions": []}), &ctx(), "")
            .await
            .unwrap_err();

        match err {
            Error::ProtocolDecode { body, .. } => assert!(body.contains("maintenance")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_raw_mode_returns_envelope() {
        let (_server, endpoint) = respond_with(
            r#"{"exceptionEvent":false,"actions":[{"state":"ERROR","returnValue":null,"error":[{"message":"boom"}]}]}"#,
        )
        .await;

        let client = HttpClient::new().unwrap();
        let envelope = ActionClient::new(&client)
            .send_raw(&endpoint, &json!({"actions": []}), &ctx(), "")
            .await
            .unwrap();
        assert_eq!(envelope["actions"][0]["error"][0]["message"], "boom");
    }

    #[tokio::test]
    async fn test_wire_fields_are_posted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aura"))
            .and(body_string_contains("message="))
            .and(body_string_contains("aura.context="))
            .and(body_string_contains("aura.token=tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"actions":[{"state":"SUCCESS","returnValue":1}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let endpoint = format!("{}/aura", server.uri());
        let value = ActionClient::new(&client)
            .send(&endpoint, &json!({"actions": []}), &ctx(), "tok")
            .await
            .unwrap();
        assert_eq!(value, json!(1));
    }
}
