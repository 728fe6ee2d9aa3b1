use std::time::Duration;

use thiserror::Error;

use crate::entities::{GraphQLResponse, Method};

/// Errors that can occur while configuring or running the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The HTTP request could not be turned into a GraphQL request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Missing GraphQL query")]
    MissingQuery,

    #[error("Malformed variables: {0}")]
    MalformedVariables(String),

    #[error("Malformed query string: {0}")]
    MalformedQueryString(String),

    #[error("Method {0} is not supported for GraphQL requests")]
    UnsupportedMethod(Method),
}

/// A decoded request failed a structural check before reaching the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The execution engine failed in a way that is not a GraphQL error
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to convert engine response: {0}")]
    Conversion(String),
}

/// Why a pipeline run ended on the failure path
#[derive(Error, Debug)]
pub enum Failure {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `detail` is logged, never sent to the client
    #[error("Internal server error")]
    Internal { detail: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl Failure {
    pub fn internal(detail: impl Into<String>) -> Self {
        Failure::Internal {
            detail: detail.into(),
        }
    }

    /// HTTP status code for this failure
    pub fn status(&self) -> u16 {
        match self {
            Failure::Decode(DecodeError::UnsupportedMethod(_)) => 405,
            Failure::Decode(_) | Failure::Validation(_) => 400,
            Failure::Internal { .. } => 500,
            Failure::Timeout(_) => 504,
        }
    }
}

impl From<EngineError> for Failure {
    fn from(e: EngineError) -> Self {
        Failure::internal(e.to_string())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        Failure::internal(format!("JSON serialization failed: {e}"))
    }
}

/// Result of handing a request to the execution stage
pub type ExecutionOutcome = Result<GraphQLResponse, Failure>;
