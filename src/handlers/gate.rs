//! Request gate for cron endpoints
//!
//! Only `GET` is accepted, and the `authorization` header must be exactly
//! `Bearer <secret>`. The method is checked first so that a wrong method
//! is reported as 405 whatever credentials accompany it.
//!
//! The header is compared as raw bytes, so secrets outside visible ASCII
//! still match and undecodable header values simply fail to match.

use warp::http::Method;

use crate::error::{CronError, Result};
use crate::security::digest_eq;

/// Build the only authorization value the gate accepts
pub fn expected_authorization(secret: &str) -> String {
    format!("Bearer {}", secret)
}

/// Validate method and shared-secret bearer token
pub fn check_request(method: &Method, authorization: Option<&[u8]>, secret: &str) -> Result<()> {
    if *method != Method::GET {
        return Err(CronError::MethodNotAllowed);
    }

    let expected = expected_authorization(secret);
    match authorization {
        Some(provided) if digest_eq(provided, expected.as_bytes()) => Ok(()),
        _ => Err(CronError::Unauthorized),
    }
}
