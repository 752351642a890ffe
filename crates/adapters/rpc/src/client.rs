//! Thin HTTP client for the controllers' RPC interface.
//!
//! Two call styles are used:
//! - `GET {scheme}://{host}/rpc/{Method}?k=v…` for flat parameters
//! - `POST {scheme}://{host}/rpc` with a JSON-RPC frame for nested ones
//!
//! Both report failures as `{"code": …, "message": …}`; a JSON-RPC frame
//! carries it under `"error"`.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::RpcConfig;
use crate::error::RpcError;

#[derive(Debug, Deserialize)]
struct Failure {
    code: i64,
    #[serde(default)]
    message: String,
}

impl From<Failure> for RpcError {
    fn from(failure: Failure) -> Self {
        Self::Remote {
            code: failure.code,
            message: failure.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Failure>,
}

/// Shared, cheaply clonable RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    scheme: String,
}

impl RpcClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &RpcConfig) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(RpcError::Http)?;
        Ok(Self {
            http,
            scheme: config.scheme.clone(),
        })
    }

    fn method_url(&self, host: &str, method: &str) -> String {
        format!("{}://{host}/rpc/{method}", self.scheme)
    }

    fn frame_url(&self, host: &str) -> String {
        format!("{}://{host}/rpc", self.scheme)
    }

    /// Call `method` on `host` with flat query parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`RpcError`] for transport failures and controller errors.
    #[tracing::instrument(skip(self, params))]
    pub async fn get(
        &self,
        host: &str,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<Value, RpcError> {
        let response = self
            .http
            .get(self.method_url(host, method))
            .query(params)
            .send()
            .await
            .map_err(RpcError::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(RpcError::Http)?;
        parse_response(status.as_u16(), &body)
    }

    /// Call `method` on `host` with a JSON-RPC frame.
    ///
    /// # Errors
    ///
    /// Returns an [`RpcError`] for transport failures and controller errors.
    #[tracing::instrument(skip(self, params))]
    pub async fn call(&self, host: &str, method: &str, params: Value) -> Result<Value, RpcError> {
        let frame = json!({ "id": 1, "method": method, "params": params });
        let response = self
            .http
            .post(self.frame_url(host))
            .json(&frame)
            .send()
            .await
            .map_err(RpcError::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(RpcError::Http)?;
        parse_frame(parse_response(status.as_u16(), &body)?)
    }
}

/// Decode a plain response body. An empty body means `null`.
fn parse_response(status: u16, body: &[u8]) -> Result<Value, RpcError> {
    if (200..300).contains(&status) {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(body).map_err(RpcError::MalformedResponse);
    }
    match serde_json::from_slice::<Failure>(body) {
        Ok(failure) => Err(failure.into()),
        Err(_) => Err(RpcError::Status(status)),
    }
}

/// Unwrap a JSON-RPC frame into its result.
fn parse_frame(value: Value) -> Result<Value, RpcError> {
    let frame: Frame = serde_json::from_value(value).map_err(RpcError::MalformedResponse)?;
    match frame.error {
        Some(failure) => Err(failure.into()),
        None => Ok(frame.result.unwrap_or(Value::Null)),
    }
}
