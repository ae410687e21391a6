//! Error types for the Etherpad API client.
//!
//! # Design
//! Four failure classes, one variant each:
//! - `Validation`: a local argument check failed and nothing was sent.
//! - `Protocol`: the server answered with something that is not an envelope
//!   object, or whose payload does not have the expected shape.
//! - `Api`: a well-formed envelope with a non-zero `code`.
//! - `Transport`: the exchange itself failed. The transport's own error is
//!   kept as the source, untranslated.
//!
//! None of them are retried by the client.

use thiserror::Error;

/// Error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by `EtherpadClient` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument failed a local precondition before any request was made.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The response was not a JSON object, or `data` did not decode into the
    /// expected payload. `raw` holds the offending body or value verbatim.
    #[error("unexpected response from API: {raw}")]
    Protocol { raw: String },

    /// The server reported failure through the envelope (`code != 0`).
    /// `code` is `None` when the envelope had no integer code at all.
    #[error("API error: {message}")]
    Api { code: Option<i64>, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn protocol(raw: impl Into<String>) -> Self {
        Self::Protocol { raw: raw.into() }
    }

    /// Server-provided message for `Api` errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
