//! Procedure store backed by a PostgREST-compatible RPC endpoint
//!
//! Procedures are invoked as `POST {base}/rest/v1/rpc/{name}` with an empty
//! JSON object as arguments, authenticated with the service key.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::StoreConfig;
use crate::constants::{RPC_PATH, STORE_USER_AGENT};
use crate::error::{CronError, Result};
use crate::storage::traits::{ProcedureStore, StoreConnector};

/// Error body returned by the RPC endpoint on failure
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Builds a new HTTP client per invocation from a fixed store configuration
#[derive(Debug, Clone)]
pub struct RestStoreConnector {
    config: StoreConfig,
}

impl RestStoreConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

impl StoreConnector for RestStoreConnector {
    fn connect(&self) -> Result<Box<dyn ProcedureStore>> {
        let store = RestProcedureStore::new(&self.config)?;
        Ok(Box::new(store))
    }
}

/// A single connection to the store's RPC endpoint
pub struct RestProcedureStore {
    client: reqwest::Client,
    rpc_base: Url,
    service_key: String,
}

impl RestProcedureStore {
    /// Create a store connection
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(STORE_USER_AGENT)
            .build()
            .map_err(|e| CronError::StoreError(format!("Failed to build store client: {}", e)))?;

        let rpc_base = config.url.join(RPC_PATH)?;

        Ok(Self {
            client,
            rpc_base,
            service_key: config.service_key.clone(),
        })
    }

    /// Resolve the RPC URL for a procedure name
    pub fn procedure_url(&self, procedure: &str) -> Result<Url> {
        let valid = !procedure.is_empty()
            && procedure
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(CronError::StoreError(format!(
                "Invalid procedure name: {:?}",
                procedure
            )));
        }

        Ok(self.rpc_base.join(procedure)?)
    }
}

/// Extract the most specific failure message from an error response
fn failure_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<RpcErrorBody>(body) {
        log::debug!(
            "RPC error body: code={:?} details={:?} hint={:?}",
            parsed.code,
            parsed.details,
            parsed.hint
        );
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }

    let raw = String::from_utf8_lossy(body).trim().to_string();
    if !raw.is_empty() {
        return raw;
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[async_trait]
impl ProcedureStore for RestProcedureStore {
    async fn call_procedure(&self, procedure: &str) -> Result<Value> {
        let url = self.procedure_url(procedure)?;
        log::debug!("Calling remote procedure {}", procedure);

        let response = self
            .client
            .post(url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(CronError::ProcedureFailed {
                procedure: procedure.to_string(),
                message: failure_message(status, &body),
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            CronError::StoreError(format!(
                "Failed to decode result of {}: {}",
                procedure, e
            ))
        })
    }
}
