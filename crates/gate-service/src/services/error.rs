//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use gate_core::{DomainError, GatewayError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or entity-store failure
    Domain(DomainError),

    /// The messaging platform failed us; retryable from the caller's side
    Upstream(GatewayError),

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Upstream(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the initiating actor should be told to simply try again
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream(_) => true,
            Self::Domain(e) => matches!(e, DomainError::DatabaseError(_)),
            _ => false,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        Self::Upstream(err)
    }
}

impl From<ServiceError> for gate_common::AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => gate_common::AppError::Domain(e),
            ServiceError::Upstream(e) => gate_common::AppError::ExternalService(e.to_string()),
            ServiceError::Validation(msg) => gate_common::AppError::Validation(msg),
            ServiceError::Internal(msg) => {
                gate_common::AppError::Internal(anyhow::anyhow!(msg))
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
