//! Session-aware client for the Deluge web JSON-RPC endpoint.
//!
//! [`DelugeClient`] logs in on first use, re-checks the session before every
//! call, logs in again once if it expired, and refuses daemon-bound calls when
//! the WebUI has no daemon attached.
//!
//! # Example
//!
//! ```ignore
//! use deluge::{ClientConfig, DelugeClient, Destination};
//!
//! let client = DelugeClient::new(
//!     ClientConfig::new("http://localhost:8112/json", "deluge").with_download_location("/data"),
//! )?;
//! client.set_credentials([("https://private.example/", "uid=1; pass=abc")]);
//! client.add("https://private.example/dl/42.torrent", Destination::Default).await?;
//! ```

pub mod client;
pub mod config;
pub mod cookie_jar;
pub mod error;
pub mod rpc;
pub mod sequencer;
pub mod session;
pub mod submitter;
pub mod transport;

pub use client::DelugeClient;
pub use config::ClientConfig;
pub use cookie_jar::CredentialJar;
pub use deluge_protocol as protocol;
pub use deluge_protocol::{HostEntry, TorrentOptions, UiUpdate};
pub use error::{Error, Result};
pub use rpc::{RpcClient, RpcReply};
pub use sequencer::RequestIdSequencer;
pub use session::{SessionManager, SessionState, SessionStatus};
pub use submitter::{Destination, TorrentRef, TorrentSubmitter};
pub use transport::{HttpTransport, Transport, TransportResponse};
