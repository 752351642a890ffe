//! RPC adapter error types.

use lumina_domain::error::LuminaError;

/// Error code a controller answers with when the referenced object does not exist.
pub const NOT_FOUND_CODE: i64 = -103;

/// Errors specific to the RPC adapter.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed")]
    Http(#[source] reqwest::Error),

    /// The controller answered with an RPC error.
    #[error("controller returned error {code}: {message}")]
    Remote { code: i64, message: String },

    /// The controller answered with a non-success status and no RPC error body.
    #[error("controller answered with HTTP status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("malformed controller response")]
    MalformedResponse(#[source] serde_json::Error),

    /// A domain-level error (validation, etc.).
    #[error("domain error")]
    Domain(#[source] LuminaError),
}

impl RpcError {
    /// Whether the controller reported the referenced object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { code, .. } if *code == NOT_FOUND_CODE)
    }

    /// Convert into a [`LuminaError::Actuation`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> LuminaError {
        match self {
            Self::Domain(err) => err,
            other => LuminaError::Actuation(Box::new(other)),
        }
    }

    /// Convert into a [`LuminaError::Schedule`].
    pub fn into_schedule(self) -> LuminaError {
        match self {
            Self::Domain(err) => err,
            other => LuminaError::Schedule(Box::new(other)),
        }
    }
}

impl From<RpcError> for LuminaError {
    fn from(err: RpcError) -> Self {
        err.into_domain()
    }
}
