//! Blocking client for the Etherpad HTTP/JSON administrative API.
//!
//! # Overview
//! Every remote operation is a form-encoded POST to
//! `{base_url}/{api_version}/{operation}` answered by a
//! `{code, message, data}` envelope. `EtherpadClient::invoke` performs one
//! such call; the typed methods (`create_group`, `get_text`, ...) wrap it
//! with fixed arguments and decode `data` into the matching `types` DTO.
//!
//! # Design
//! - `EtherpadClient` is stateless apart from its immutable `ClientConfig`,
//!   so one instance can be shared by concurrent callers.
//! - Request building and envelope parsing are pure functions of their
//!   input. The network sits behind the `Transport` trait, implemented by
//!   `UreqTransport` by default and by recording doubles in tests.
//! - No retries, no caching: each call is exactly one request.
//!
//! ```no_run
//! use etherpad_core::{ClientConfig, EtherpadClient};
//!
//! let client = EtherpadClient::new(ClientConfig::default().with_api_key("secret"));
//! let group = client.create_group_if_not_exists_for("team-7")?;
//! client.create_group_pad(&group.group_id, "notes", Some("hello"))?;
//! # Ok::<(), etherpad_core::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod pad;
pub mod transport;
pub mod types;

mod authors;
mod groups;
mod pads;
mod sessions;

pub use client::{EtherpadClient, Params};
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use pad::PadHandle;
pub use transport::{Transport, UreqTransport};
pub use types::*;
