//! Generic operation dispatcher for the Etherpad administrative API.
//!
//! # Design
//! `EtherpadClient` holds immutable configuration plus a `Transport` and has
//! no per-call mutable state, so `&EtherpadClient` can be used from many
//! threads at once. A call runs in three steps:
//! - `build_request` merges the call parameters over the configured base
//!   parameters and form-encodes them. No I/O.
//! - the transport executes the request exactly once.
//! - `parse_response` decodes the envelope. No I/O.
//!
//! `invoke` chains the three steps. The per-domain convenience methods live in
//! `groups`, `authors`, `sessions` and `pads`, each a thin wrapper over
//! `invoke_as` or `invoke_unit`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse, FORM_CONTENT_TYPE};
use crate::transport::{Transport, UreqTransport};

/// Call-specific parameters: `(key, value)` pairs, later keys winning.
pub type Params<'a> = [(&'a str, &'a str)];

/// Blocking, stateless client for the Etherpad administrative API.
#[derive(Debug, Clone)]
pub struct EtherpadClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl EtherpadClient<UreqTransport> {
    /// Client using the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> EtherpadClient<T> {
    pub fn with_transport(mut config: ClientConfig, transport: T) -> Self {
        let trimmed = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(trimmed);
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `operation` without sending it.
    pub fn build_request(&self, operation: &str, params: &Params<'_>) -> HttpRequest {
        let mut merged: BTreeMap<&str, &str> = self
            .config
            .base_params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        merged.extend(params.iter().copied());

        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(merged)
            .finish();

        HttpRequest {
            url: format!(
                "{}/{}/{operation}",
                self.config.base_url, self.config.api_version
            ),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body,
            timeout: self.config.timeout,
        }
    }

    /// Decode a response into the envelope's `data`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Option<Value>> {
        envelope::decode(&response.body)
    }

    /// Call `operation` once and return its `data` (`None` when null/absent).
    ///
    /// The operation name is not checked locally; unknown names surface as
    /// whatever `Api` error the server returns.
    pub fn invoke(&self, operation: &str, params: &Params<'_>) -> Result<Option<Value>> {
        let request = self.build_request(operation, params);
        debug!(operation, url = %request.url, "invoking API operation");

        let response = self.transport.execute(&request).map_err(|err| {
            debug!(operation, error = %err, "transport failed");
            Error::Transport(err)
        })?;

        let status = response.status;
        let result = self.parse_response(response);
        match &result {
            Ok(_) => debug!(operation, status, "operation succeeded"),
            Err(err) => debug!(operation, status, error = %err, "operation failed"),
        }
        result
    }

    /// `invoke`, then decode `data` into `D`. A null/absent payload is fed to
    /// `D` as JSON `null`, so `Option<_>` and `()` targets accept it.
    pub fn invoke_as<D: DeserializeOwned>(&self, operation: &str, params: &Params<'_>) -> Result<D> {
        let data = self.invoke(operation, params)?.unwrap_or(Value::Null);
        D::deserialize(&data).map_err(|_| Error::protocol(data.to_string()))
    }

    /// `invoke` for operations whose payload carries nothing the caller needs.
    pub fn invoke_unit(&self, operation: &str, params: &Params<'_>) -> Result<()> {
        self.invoke(operation, params).map(drop)
    }
}
