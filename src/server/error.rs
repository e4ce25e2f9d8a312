use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{catalog::GetRecipeError, domain::RatioError};

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// The `quantity` query parameter is not a finite, positive number.
    #[error("invalid 'quantity' query parameter")]
    InvalidQuantity(String),

    /// The query string could not be decoded, e.g. a parameter was repeated.
    #[error("invalid query string")]
    InvalidQuery(#[from] QueryRejection),

    /// Looking up or scaling the recipe failed.
    #[error(transparent)]
    Recipe(#[from] GetRecipeError),
}

impl AppError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuantity(_)
            | Self::InvalidQuery(_)
            | Self::Recipe(GetRecipeError::Ratio(RatioError::InvalidRatio(_))) => {
                StatusCode::BAD_REQUEST
            }
            Self::Recipe(
                GetRecipeError::NotFound(_)
                | GetRecipeError::Ratio(RatioError::ConstraintNotFound(_)),
            ) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = ?self, "request failed");

        (status, self.to_string()).into_response()
    }
}
