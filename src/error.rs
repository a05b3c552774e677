use std::error::Error;
use std::fmt;

use warp::http::StatusCode;

#[derive(Debug)]
pub enum CronError {
    // Request gate errors
    MethodNotAllowed,
    Unauthorized,

    // Remote procedure errors
    ProcedureFailed { procedure: String, message: String },

    // Connection, transport and decoding errors against the store
    StoreError(String),

    // Configuration errors
    ConfigError(String),
}

impl CronError {
    /// HTTP status reported to the caller for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ProcedureFailed { .. } | Self::StoreError(_) | Self::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text placed in the `error` field of the response body.
    ///
    /// Procedure failures surface the store's own message untouched.
    pub fn client_message(&self) -> String {
        match self {
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::ProcedureFailed { message, .. } => message.clone(),
            Self::StoreError(msg) | Self::ConfigError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for CronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::ProcedureFailed { procedure, message } => {
                write!(f, "Procedure {} failed: {}", procedure, message)
            }
            Self::StoreError(msg) => write!(f, "Store error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for CronError {}

impl From<reqwest::Error> for CronError {
    fn from(err: reqwest::Error) -> Self {
        CronError::StoreError(err.to_string())
    }
}

impl From<url::ParseError> for CronError {
    fn from(err: url::ParseError) -> Self {
        CronError::ConfigError(format!("Invalid URL: {}", err))
    }
}

// Generic result type for the cron service
pub type Result<T> = std::result::Result<T, CronError>;
