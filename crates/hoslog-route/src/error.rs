//! Routing errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Routing API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Routing service returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("No routes found for the given locations")]
    NoRoutes,

    #[error("Malformed routing response: {0}")]
    Malformed(String),
}

impl From<RouteError> for hoslog_util::HoslogError {
    fn from(e: RouteError) -> Self {
        hoslog_util::HoslogError::routing(e.to_string())
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
