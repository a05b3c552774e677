//! Abstract interfaces for the remote procedure store
//!
//! The store owns all penalty and expiry rules. This layer only knows
//! procedure names and passes their results through untouched.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A live connection able to execute named stored procedures
#[async_trait]
pub trait ProcedureStore: Send + Sync {
    /// Invoke a parameterless procedure and return its raw result.
    ///
    /// Fails with `CronError::ProcedureFailed` when the store reports an
    /// error for the call, and `CronError::StoreError` when the call could
    /// not be completed or its result could not be decoded.
    async fn call_procedure(&self, procedure: &str) -> Result<Value>;
}

/// Opens a fresh store connection for each cron invocation
pub trait StoreConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn ProcedureStore>>;
}
