//! Service error type and its HTTP mapping.
//!
//! Services return `Result<T, ShopError>`; handlers propagate it with `?` and
//! the `IntoResponse` impl turns it into a status code plus `{"error": ...}`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::aggregates::OrderError;
use crate::domain::value_objects::IdError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("invalid `{param}`: {source}")]
    InvalidIdentifier { param: &'static str, #[source] source: IdError },

    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("{}", .0.body_text())]
    MalformedQuery(#[from] QueryRejection),

    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("cart is empty")]
    EmptyCart,

    #[error("at most {0} addresses are allowed")]
    AddressLimit(usize),

    #[error("{0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for ShopError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, id } => Self::NotFound(format!("{kind} {id}")),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            other => Self::StoreUnavailable(other),
        }
    }
}

impl From<OrderError> for ShopError {
    fn from(e: OrderError) -> Self {
        match e { OrderError::NoItems => Self::EmptyCart }
    }
}

impl ShopError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier { .. } | Self::MissingParameter(_) | Self::MalformedQuery(_) | Self::MalformedBody(_) | Self::Validation(_) | Self::EmptyCart | Self::AddressLimit(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::StoreUnavailable(source) => {
                tracing::error!(error = %source, "store operation failed");
                "internal server error".to_string()
            }
            _ => {
                tracing::debug!(error = %self, %status, "request rejected");
                self.to_string()
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
