//! Request handlers and route composition

pub mod cron;
pub mod gate;

use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::constants::{API_PATH, CRON_PATH, HEALTH_PATH};
use crate::core::CronJob;

pub use cron::{handle_cron, run_job, CronContext};
pub use gate::check_request;

// Helper function to include the cron context in requests
fn with_context(
    ctx: Arc<CronContext>,
) -> impl Filter<Extract = (Arc<CronContext>,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

/// `/api/cron/{slug}` for every known job, any method
pub fn cron_routes(
    ctx: Arc<CronContext>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path(API_PATH)
        .and(warp::path(CRON_PATH))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and_then(|slug: String| async move {
            CronJob::from_slug(&slug).ok_or_else(warp::reject::not_found)
        })
        .and(warp::method())
        .and(warp::header::headers_cloned())
        .and(with_context(ctx))
        .and_then(handle_cron)
}

/// Liveness probe
pub fn health_route() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path(HEALTH_PATH)
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "OK")
}

/// All routes served by the binary
pub fn routes(ctx: Arc<CronContext>) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    cron_routes(ctx)
        .or(health_route())
        .with(warp::log("maintenance_crons::http"))
}
