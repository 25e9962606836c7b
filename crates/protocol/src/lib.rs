//! Wire types for the Deluge web JSON-RPC endpoint.
//!
//! This crate contains the serde-serializable shapes exchanged with the
//! WebUI's `/json` endpoint. These types represent the "protocol layer":
//! the data as it appears on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with protocol: Match the WebUI's JSON-RPC envelopes
//! * Stable: Changes only when the wire protocol changes
//!
//! Session handling and request gating are built on top of these types in `deluge-rs`.

pub mod envelope;
pub mod methods;
pub mod options;
pub mod types;

pub use envelope::*;
pub use options::*;
pub use types::*;
