//! Events consumed by the dispatch loop.

/// Event delivered to the monitor by the connection provider.
///
/// The two variants correspond to the two subscription topics. The payload
/// shape is fixed at the source, so the loop matches on this enum rather than
/// inspecting an opaque value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// A connection to the beacon client was (re)established
    Connected,

    /// A frame arrived from the beacon client
    Message(Vec<u8>),
}
