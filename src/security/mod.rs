//! Security utilities

pub mod headers;
pub mod timing;

pub use headers::with_api_security_headers;
pub use timing::{constant_time_eq_bytes, digest_eq};
