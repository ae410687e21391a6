//! HTTP exchange types shared by the client and its transports.
//!
//! # Design
//! Requests and responses are plain data. `EtherpadClient::build_request`
//! produces an `HttpRequest` without touching the network, a `Transport`
//! executes it, and `EtherpadClient::parse_response` interprets the resulting
//! `HttpResponse`. Keeping the two ends as data lets tests swap the transport
//! for a recorder and inspect exactly what would have gone over the wire.
//!
//! Every administrative API call is a form-encoded POST, so there is no
//! method field.

use std::time::Duration;

/// Content type of every request body sent to the API.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL: `{base_url}/{api_version}/{operation}`.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-url-encoded parameters.
    pub body: String,
    /// Upper bound on the whole exchange, from `ClientConfig::timeout`.
    pub timeout: Duration,
}

/// An HTTP response described as plain data.
///
/// `body` holds raw bytes; whether they form a valid envelope is decided by
/// envelope decoding, not by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A 200 response with the given body, mostly useful for transport doubles.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
