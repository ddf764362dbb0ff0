use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures talking to the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unable to connect to the database after {attempts} attempts: {source}")]
    Unavailable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("database operation failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// The expense operation a request was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    List,
    Update,
    Delete,
}

impl Operation {
    /// Message returned to the caller. Never carries the underlying cause.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => "Error saving expense to database",
            Operation::List => "Error fetching expenses",
            Operation::Update => "Error updating expense",
            Operation::Delete => "Error deleting expense",
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request payload")]
    InvalidPayload,

    #[error("Username is required")]
    UsernameRequired,

    #[error("{}: {source}", .operation.failure_message())]
    Failed {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn failed(operation: Operation) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Failed { operation, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidPayload | ApiError::UsernameRequired => {
                tracing::debug!(error = %self, "rejected request");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Failed { operation, source } => {
                tracing::error!(error = %source, "{}", operation.failure_message());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    operation.failure_message(),
                )
                    .into_response()
            }
        }
    }
}
