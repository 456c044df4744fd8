use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Libspots(#[from] libspots::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("Required parameter '{0}' is missing")]
    RequiredParameterMissing(String),
    #[error("The upload could not be processed: {0}")]
    InvalidUpload(String),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Error::Libspots(
                libspots::Error::LatitudeOutOfRange { .. }
                | libspots::Error::LongitudeOutOfRange { .. },
            ) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            Error::Libspots(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Library error".to_string()),
            Error::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error".to_string(),
            ),
            Error::RequiredParameterMissing(param) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing parameter '{param}'"),
            ),
            Error::InvalidUpload(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        let (status, message) = self.to_client_status();
        (status, message).into_response()
    }
}
