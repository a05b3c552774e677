//! Cron endpoint handlers
//!
//! Every endpoint follows the same shape: gate the request, run the job's
//! pipeline against a fresh store connection, and shape the JSON reply.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;
use uuid::Uuid;
use warp::http::{HeaderMap, Method, StatusCode};
use warp::reply::Response;
use warp::Reply;

use crate::config::ServerConfig;
use crate::core::{CronJob, ErrorEnvelope, SuccessEnvelope};
use crate::error::{CronError, Result};
use crate::handlers::gate::check_request;
use crate::security::with_api_security_headers;
use crate::storage::{RestStoreConnector, StoreConnector};

/// Everything a cron handler needs, fixed at construction
pub struct CronContext {
    cron_secret: String,
    connector: Arc<dyn StoreConnector>,
}

impl CronContext {
    pub fn new(cron_secret: impl Into<String>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            cron_secret: cron_secret.into(),
            connector,
        }
    }

    /// Context backed by the REST store described in the configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        let connector = RestStoreConnector::new(config.store.clone());
        Self::new(config.cron_secret.clone(), Arc::new(connector))
    }
}

/// Serialize a body with the given status and API security headers
fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> Response {
    let reply = warp::reply::with_status(warp::reply::json(body), status);
    with_api_security_headers(reply).into_response()
}

fn error_reply(err: &CronError) -> Response {
    json_reply(&ErrorEnvelope::new(err.client_message()), err.status_code())
}

/// Run a job's pipeline once, logging failures to the operational log
pub async fn run_job(
    job: CronJob,
    connector: &dyn StoreConnector,
    invocation_id: Uuid,
) -> Result<SuccessEnvelope> {
    let store = connector.connect().map_err(|e| {
        error!("[{}] Unexpected error: {}", invocation_id, e);
        e
    })?;

    match job.pipeline().run(store.as_ref()).await {
        Ok(outcomes) => Ok(SuccessEnvelope::new(outcomes, Utc::now())),
        Err(failure) => {
            error!(
                "[{}] {} error: {}",
                invocation_id,
                failure.step.procedure,
                failure.error.client_message()
            );
            if failure.is_partial() {
                let applied: Vec<&str> =
                    failure.applied.iter().map(|o| o.step.procedure).collect();
                warn!(
                    "[{}] {} partially applied: {:?} completed before {} failed",
                    invocation_id, job, applied, failure.step.procedure
                );
            }
            Err(failure.error)
        }
    }
}

/// Handle one request to `/api/cron/{job}`
pub async fn handle_cron(
    job: CronJob,
    method: Method,
    headers: HeaderMap,
    ctx: Arc<CronContext>,
) -> std::result::Result<Response, warp::Rejection> {
    let invocation_id = Uuid::new_v4();

    let authorization = headers
        .get(warp::http::header::AUTHORIZATION)
        .map(|value| value.as_bytes());

    if let Err(e) = check_request(&method, authorization, &ctx.cron_secret) {
        warn!("[{}] {} {} rejected: {}", invocation_id, method, job, e);
        return Ok(error_reply(&e));
    }

    info!("[{}] Running {}", invocation_id, job);

    match run_job(job, ctx.connector.as_ref(), invocation_id).await {
        Ok(envelope) => {
            info!("[{}] {} completed", invocation_id, job);
            Ok(json_reply(&envelope, StatusCode::OK))
        }
        Err(e) => Ok(error_reply(&e)),
    }
}
