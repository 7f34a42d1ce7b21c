use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// GitHub's v4 API endpoint; overridable for tests and GHE installs.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Synchronous GraphQL client speaking the `{ data, errors }` envelope
/// convention. Calls block the caller, which is what the single-threaded
/// session loop wants.
pub struct GraphClient {
    endpoint: String,
    token: String,
    agent: ureq::Agent,
}

impl GraphClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cardwall/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            agent,
        }
    }

    /// POST one operation and return the envelope's `data` payload.
    pub fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(json!({ "query": query, "variables": variables }))?;
        let body = response.into_string()?;
        decode_body(&body)
    }
}

// Keep the bearer token out of debug output.
impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<EnvelopeError>>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    message: String,
}

/// Parse a response body and unwrap the GraphQL envelope. Any entry in
/// `errors` fails the whole operation, even when partial data came back.
fn decode_body(body: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(Error::Api(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
    }
    envelope
        .data
        .ok_or_else(|| Error::MissingData("response carried no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_returns_data_payload() {
        let data = decode_body(r#"{"data": {"user": {"id": "U_1"}}}"#).unwrap();
        assert_eq!(data["user"]["id"], "U_1");
    }

    #[test]
    fn decode_surfaces_error_messages() {
        let body = r#"{
            "data": null,
            "errors": [
                {"message": "Could not resolve to a User"},
                {"message": "rate limited"}
            ]
        }"#;
        match decode_body(body) {
            Err(Error::Api(messages)) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].contains("Could not resolve"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn decode_errors_win_over_partial_data() {
        let body = r#"{"data": {"user": null}, "errors": [{"message": "partial"}]}"#;
        assert!(matches!(decode_body(body), Err(Error::Api(_))));
    }

    #[test]
    fn decode_rejects_missing_data() {
        assert!(matches!(
            decode_body(r#"{"errors": []}"#),
            Err(Error::MissingData(_))
        ));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(decode_body("<html>"), Err(Error::Decode(_))));
    }
}
