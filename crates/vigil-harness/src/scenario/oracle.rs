//! Reusable oracle functions.

use vigil_core::Liveness;
use vigil_proto::{ClientKind, ValidatorPubkey};

use crate::scenario::{OracleFn, World};

/// Run every oracle, failing on the first error.
pub fn all_of(oracles: Vec<OracleFn>) -> OracleFn {
    Box::new(move |world: &World| oracles.iter().try_for_each(|oracle| oracle(world)))
}

/// Exactly these validators received activity, in this order, over the run.
pub fn activity_sent_to(expected: Vec<ValidatorPubkey>) -> OracleFn {
    Box::new(move |world: &World| {
        let actual = world.sent_to(ClientKind::Activity);
        if actual == expected {
            Ok(())
        } else {
            Err(format!("activity sent to {actual:?}, expected {expected:?}"))
        }
    })
}

/// Exactly these validators received status requests, in this order.
pub fn status_requested_for(expected: Vec<ValidatorPubkey>) -> OracleFn {
    Box::new(move |world: &World| {
        let actual = world.sent_to(ClientKind::GetValidatorStatus);
        if actual == expected {
            Ok(())
        } else {
            Err(format!("status requested for {actual:?}, expected {expected:?}"))
        }
    })
}

/// Final liveness of a validator (`None` meaning Unknown).
pub fn liveness_is(pubkey: ValidatorPubkey, expected: Option<Liveness>) -> OracleFn {
    Box::new(move |world: &World| {
        let actual = world.liveness(&pubkey);
        if actual == expected {
            Ok(())
        } else {
            Err(format!("{pubkey:?} liveness is {actual:?}, expected {expected:?}"))
        }
    })
}

/// Nothing was sent during the whole run.
pub fn nothing_sent() -> OracleFn {
    Box::new(|world: &World| {
        let sent = world.sent();
        if sent.is_empty() { Ok(()) } else { Err(format!("unexpected messages: {sent:?}")) }
    })
}
