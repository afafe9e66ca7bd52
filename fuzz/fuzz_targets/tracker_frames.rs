//! Feed arbitrary frames to the tracker.
//!
//! Input is split on newlines into frames. Every frame is either discarded
//! with an error or accepted, and accepted frames only ever produce messages
//! addressed to monitored validators.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vigil_core::{ActivityAction, ActivityTracker, TrackerConfig, ValidatorRegistry};
use vigil_proto::{PUBKEY_LEN, ValidatorPubkey};

fuzz_target!(|data: &[u8]| {
    let registry: ValidatorRegistry =
        (1..=3u8).map(|b| ValidatorPubkey::new([b; PUBKEY_LEN])).collect();
    let mut tracker = ActivityTracker::new(registry.clone(), TrackerConfig::default());

    let _ = tracker.on_connected();
    for frame in data.split(|&b| b == b'\n') {
        if let Ok(actions) = tracker.handle_frame(frame) {
            for ActivityAction::SendMessage(message) in actions {
                assert!(registry.contains(&message.pubkey));
            }
        }
    }
    assert!(tracker.active_count() <= registry.len());
});
