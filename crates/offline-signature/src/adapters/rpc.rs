//! # JSON-RPC Access Key Directory
//!
//! Queries a ledger node with `query` / `view_access_key` and classifies the
//! answer. Two error dialects are understood:
//!
//! - Structured: `error.cause.name` is `UNKNOWN_ACCESS_KEY` or `UNKNOWN_ACCOUNT`
//! - Legacy: `result.error` (or `error.data`) is a string ending in
//!   "does not exist while viewing"
//!
//! Either form means "not found". Anything else is a transport error.

use crate::domain::access_key::{AccessKeyLookup, AccessKeyPermission};
use crate::domain::errors::LookupError;
use crate::domain::keys::PublicKey;
use crate::ports::outbound::AccessKeyDirectory;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

/// Request id sent with every query.
pub const REQUEST_ID: &str = "offline-signature";

/// Sends one JSON-RPC request and returns the raw response body.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, request: Value) -> Result<Value, LookupError>;
}

/// [`AccessKeyDirectory`] over any [`RpcTransport`].
#[derive(Debug, Clone)]
pub struct JsonRpcAccessKeyDirectory<T: RpcTransport> {
    transport: T,
    finality: String,
}

impl<T: RpcTransport> JsonRpcAccessKeyDirectory<T> {
    /// Query at `final` finality.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            finality: "final".to_string(),
        }
    }

    #[must_use]
    pub fn with_finality(mut self, finality: impl Into<String>) -> Self {
        self.finality = finality.into();
        self
    }
}

#[async_trait]
impl<T: RpcTransport> AccessKeyDirectory for JsonRpcAccessKeyDirectory<T> {
    async fn query_access_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyLookup, LookupError> {
        let request = build_request(account_id, public_key, &self.finality);
        let response = self.transport.call(request).await?;
        trace!(account_id, "[offline-sig] access key response received");
        classify_response(&response)
    }
}

/// `view_access_key` query for `account_id` / `public_key`.
pub fn build_request(account_id: &str, public_key: &PublicKey, finality: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": REQUEST_ID,
        "method": "query",
        "params": {
            "request_type": "view_access_key",
            "finality": finality,
            "account_id": account_id,
            "public_key": public_key.encode(),
        }
    })
}

/// Map a JSON-RPC response body to a lookup outcome.
pub fn classify_response(response: &Value) -> Result<AccessKeyLookup, LookupError> {
    if let Some(error) = response.get("error") {
        if let Some(cause) = error.pointer("/cause/name").and_then(Value::as_str) {
            if let Some(lookup) = not_found_by_cause(cause) {
                return Ok(lookup);
            }
        }
        if let Some(lookup) = error
            .get("data")
            .and_then(Value::as_str)
            .and_then(not_found_by_message)
        {
            return Ok(lookup);
        }
        return Err(LookupError::Transport(format!("rpc error: {error}")));
    }

    let result = response
        .get("result")
        .ok_or_else(|| LookupError::Transport("response has neither result nor error".into()))?;

    // Legacy nodes report a missing key inside a successful result
    if let Some(message) = result.get("error").and_then(Value::as_str) {
        return not_found_by_message(message)
            .ok_or_else(|| LookupError::Transport(format!("rpc error: {message}")));
    }

    let permission = result
        .get("permission")
        .ok_or_else(|| LookupError::Transport("result has no permission".into()))?;
    parse_permission(permission).map(AccessKeyLookup::Found)
}

fn not_found_by_cause(cause: &str) -> Option<AccessKeyLookup> {
    match cause {
        "UNKNOWN_ACCESS_KEY" => Some(AccessKeyLookup::NotFound),
        "UNKNOWN_ACCOUNT" => Some(AccessKeyLookup::AccountNotFound),
        _ => None,
    }
}

fn not_found_by_message(message: &str) -> Option<AccessKeyLookup> {
    if !message.contains("does not exist") {
        return None;
    }
    if message.starts_with("access key") {
        Some(AccessKeyLookup::NotFound)
    } else if message.starts_with("account") {
        Some(AccessKeyLookup::AccountNotFound)
    } else {
        None
    }
}

fn parse_permission(permission: &Value) -> Result<AccessKeyPermission, LookupError> {
    AccessKeyPermission::deserialize(permission)
        .map_err(|e| LookupError::Transport(format!("invalid permission {permission}: {e}")))
}

// =============================================================================
// HTTP TRANSPORT
// =============================================================================

/// POSTs requests to a JSON-RPC endpoint with `reqwest`.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpRpcTransport {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpRpcTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn call(&self, request: Value) -> Result<Value, LookupError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        // Structured node errors arrive with non-2xx statuses; the body decides
        response
            .json::<Value>()
            .await
            .map_err(|e| LookupError::Transport(format!("invalid response body: {e}")))
    }
}
