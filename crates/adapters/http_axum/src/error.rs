//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lumina_domain::error::{LuminaError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`LuminaError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(LuminaError);

impl From<LuminaError> for ApiError {
    fn from(err: LuminaError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LuminaError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            LuminaError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            LuminaError::Delivery(err) => {
                tracing::warn!(error = %err, "event delivery failed");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            LuminaError::Time(_) | LuminaError::Actuation(_) | LuminaError::Schedule(_) => {
                tracing::error!(error = ?self.0, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use lumina_domain::error::{DeliveryError, NotFoundError};

    use super::*;

    fn status_of(err: LuminaError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_errors_to_status_codes() {
        assert_eq!(
            status_of(ValidationError::UnknownTrigger("NOON".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                NotFoundError {
                    entity: "Light",
                    id: "porch".into(),
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                DeliveryError::MailboxClosed {
                    light: "porch".into(),
                }
                .into()
            ),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(LuminaError::Schedule(Box::new(ValidationError::EmptyHost))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
