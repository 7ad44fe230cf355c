//! Shared request/response handling.

use crate::error::{ClientError, Result};
use crate::types::ApiError;
use reqwest::header::HeaderName;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Token header to attach to a request, if a token is present.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenHeader<'a> {
    name: &'a HeaderName,
    value: Option<&'a str>,
}

impl<'a> TokenHeader<'a> {
    pub(crate) fn new(name: &'a HeaderName, value: Option<&'a str>) -> Self {
        Self { name, value }
    }

    /// Attach the token; without one the request goes out unauthenticated.
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.value {
            Some(token) => builder.header(self.name, token),
            None => builder,
        }
    }
}

/// Send a request, separating "server unreachable" from other failures.
pub(crate) async fn send(builder: RequestBuilder) -> Result<Response> {
    builder.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Decode a successful JSON body.
pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Decode a successful JSON body that must be an array.
pub(crate) async fn json_list<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<Vec<T>> {
    let value: serde_json::Value = json(response, what).await?;
    if !value.is_array() {
        return Err(ClientError::UnexpectedFormat(format!(
            "expected a list of {}, got {}",
            what,
            json_type(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Turn a non-success response into an error.
pub(crate) async fn error_for(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    match status {
        StatusCode::UNAUTHORIZED => ClientError::AuthRequired,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the `error` text out of a backend error body, or return the raw body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(api_error) => api_error.error,
        Err(_) => body.trim().to_string(),
    }
}
