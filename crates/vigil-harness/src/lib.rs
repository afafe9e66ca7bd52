//! Deterministic simulation harness for activity monitor testing.
//!
//! Scripted [`vigil_app::Driver`] implementation, frame builders for every
//! server message kind, and a scenario API that runs the real dispatch loop
//! and hands the final state to a mandatory oracle.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod frames;
pub mod scenario;
pub mod sim_driver;

pub use sim_driver::{SimDriver, SimError};

use vigil_proto::{PUBKEY_LEN, ValidatorPubkey};

/// Test key made of one repeated byte.
pub fn pubkey(byte: u8) -> ValidatorPubkey {
    ValidatorPubkey::new([byte; PUBKEY_LEN])
}
