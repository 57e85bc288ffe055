//! Error types for hoslog

use thiserror::Error;

use crate::TripId;

/// Core error type for hoslog operations
#[derive(Debug, Error)]
pub enum HoslogError {
    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Routing error: {0}")]
    RoutingError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HoslogError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    pub fn routing(msg: impl Into<String>) -> Self {
        Self::RoutingError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, HoslogError>;
