//! Application layer for the activity monitor
//!
//! Generic runtime that feeds connection events to the activity tracker and
//! executes the actions it returns. The runtime is the only place tracker state
//! is mutated, so the same orchestration code runs in the monitor binary and in
//! deterministic simulation.
//!
//! # Components
//!
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Single-consumer dispatch loop using a Driver
//! - [`EventSources`]: Fan-in of the two subscription topics
//! - [`ChannelDriver`]: Driver backed by in-process channels

mod driver;
mod runtime;
mod sources;

pub use driver::Driver;
pub use runtime::{Runtime, RuntimeStats};
pub use sources::{ChannelDriver, EventPublisher, EventSources, SendError, event_channel};
pub use vigil_core::MonitorEvent;
