//! Wire format for the validator activity protocol.
//!
//! The monitor talks to the beacon client over a message channel carrying JSON
//! objects. Outbound messages are small requests keyed by a validator public
//! key. Inbound messages share one flat shape whose `message` field decides
//! which of the remaining fields carry meaning.
//!
//! The flat inbound shape is converted into the tagged [`Inbound`] union as
//! soon as it is decoded, so consumers match exhaustively on message kinds
//! instead of inspecting string fields at each use site.
//!
//! # Forward compatibility
//!
//! Unknown message kinds and unknown status codes decode successfully and are
//! surfaced as [`Inbound::Unknown`] and [`StatusCode::Other`]. Only bytes that
//! are not a JSON object of the expected shape fail to decode.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod errors;
pub mod inbound;
pub mod message;
pub mod pubkey;

pub use codec::{decode, decode_inbound, encode};
pub use errors::{ProtocolError, PubkeyError, Result};
pub use inbound::{Inbound, StatusCode};
pub use message::{ClientKind, ClientMessage, ServerMessage, ServerStatus};
pub use pubkey::{PUBKEY_LEN, ValidatorPubkey};
