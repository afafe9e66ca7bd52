//! Scenario testing with the Oracle Pattern.
//!
//! A scenario declares the monitored validators and a script of connection
//! events and inbound frames. Running it drives the real [`vigil_app::Runtime`]
//! over a [`crate::SimDriver`] and then passes the resulting [`World`] to an
//! oracle. A scenario cannot be run without an oracle.
//!
//! ```ignore
//! Scenario::new("activity after status")
//!     .validator(pubkey(0xaa))
//!     .connect()
//!     .status(pubkey(0xaa), "active")
//!     .epoch()
//!     .oracle(oracle::activity_sent_to(vec![pubkey(0xaa)]))
//!     .run()?;
//! ```

mod builder;
pub mod oracle;
mod world;

pub use builder::{RunnableScenario, Scenario, Step};
pub use world::World;

/// Verification function run against the final world state.
pub type OracleFn = Box<dyn Fn(&World) -> Result<(), String>>;
