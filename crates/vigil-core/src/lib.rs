//! Validator activity monitor core logic
//!
//! Pure state machine logic for the activity monitor, decoupled from I/O.
//!
//! # Architecture
//!
//! The tracker is a deterministic state machine. It never touches a socket,
//! a clock or a channel. Every input is passed in by the caller and every
//! intended effect comes back as an [`activity::ActivityAction`] for a runtime
//! to execute. The same tracker therefore runs unchanged in production, in unit
//! tests and in the simulation harness.
//!
//! # Components
//!
//! - [`activity`]: Liveness tracking and activity decisions
//! - [`registry`]: Ordered set of monitored validators
//! - [`event`]: Events fed to the tracker by the dispatch loop
//! - [`error`]: Registry and tracker error types

pub mod activity;
pub mod error;
pub mod event;
pub mod registry;

pub use activity::{ActivityAction, ActivityTracker, Liveness, ReconnectPolicy, TrackerConfig};
pub use error::{RegistryError, TrackerError};
pub use event::MonitorEvent;
pub use registry::ValidatorRegistry;
