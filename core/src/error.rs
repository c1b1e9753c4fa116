//! Error types for the DPI API client.
//!
//! # Design
//! Every non-2xx response collapses into `Request` with the raw status and
//! body text; the views never distinguish one failure from another when they
//! notify the user, but the detail is kept for logging.

/// Errors returned by `DpiClient` parse methods and by `Transport`s.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside 2xx.
    #[error("request failed with HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("failed to deserialize response: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Invalid `ClientConfig` values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} cannot be empty")]
    Empty { name: &'static str },

    #[error("{name} must start with http:// or https://, got `{value}`")]
    NotHttp { name: &'static str, value: String },
}
