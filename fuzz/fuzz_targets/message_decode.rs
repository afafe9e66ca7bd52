//! Decoding arbitrary bytes must never panic, and anything that decodes must
//! classify into an inbound message.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = vigil_proto::decode(data) {
        let _ = message.into_inbound();
    }
    let _ = vigil_proto::decode_inbound(data);
});
