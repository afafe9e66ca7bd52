//! Scenario tests for the activity monitor.
//!
//! Each scenario runs the real dispatch loop over a scripted driver and checks
//! the outcome with an oracle.

use vigil_core::{Liveness, ReconnectPolicy};
use vigil_harness::{
    frames, pubkey,
    scenario::{Scenario, World, oracle},
};
use vigil_proto::ClientKind;

#[test]
fn connect_status_epoch_walkthrough() {
    let aa = pubkey(0xaa);
    let bb = pubkey(0xbb);

    let result = Scenario::new("walkthrough")
        .validator(aa)
        .validator(bb)
        .connect()
        .status(aa, "active")
        .epoch()
        .oracle(Box::new(move |world: &World| {
            // Connect: one status request per validator, registry order
            let requests: Vec<_> = world.sent_at(0).iter().map(|m| (m.kind, m.pubkey)).collect();
            assert_eq!(requests, vec![
                (ClientKind::GetValidatorStatus, aa),
                (ClientKind::GetValidatorStatus, bb),
            ]);

            // Status reply sends nothing
            assert!(world.sent_at(1).is_empty());
            assert_eq!(world.liveness(&aa), Some(Liveness::Active));
            assert_eq!(world.liveness(&bb), None);

            // Epoch: activity for AA only, BB is still Unknown
            let activity: Vec<_> = world.sent_at(2).iter().map(|m| (m.kind, m.pubkey)).collect();
            assert_eq!(activity, vec![(ClientKind::Activity, aa)]);

            Ok(())
        }))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn status_for_foreign_validator_changes_nothing() {
    let ours = pubkey(0x01);
    let foreign = pubkey(0x02);

    let result = Scenario::new("foreign status")
        .validator(ours)
        .status(foreign, "active")
        .epoch()
        .oracle(oracle::all_of(vec![
            oracle::liveness_is(ours, None),
            oracle::liveness_is(foreign, None),
            oracle::nothing_sent(),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn repeated_status_ends_in_last_reported() {
    let v = pubkey(0x10);

    let result = Scenario::new("overwrite")
        .validator(v)
        .status(v, "active")
        .status(v, "inactive")
        .status(v, "active")
        .epoch()
        .oracle(oracle::all_of(vec![
            oracle::liveness_is(v, Some(Liveness::Active)),
            oracle::activity_sent_to(vec![v]),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn exit_codes_stop_activity() {
    for code in ["exited", "withdrawable", "withdrawn", "inactive"] {
        let v = pubkey(0x20);

        let result = Scenario::new(format!("exit via {code}"))
            .validator(v)
            .status(v, "active")
            .epoch()
            .status(v, code)
            .epoch()
            .oracle(oracle::all_of(vec![
                oracle::liveness_is(v, Some(Liveness::Inactive)),
                // Only the first epoch produced activity
                oracle::activity_sent_to(vec![v]),
            ]))
            .run();

        assert!(result.is_ok(), "scenario should succeed: {:?}", result);
    }
}

#[test]
fn unknown_status_code_keeps_previous_state() {
    let v = pubkey(0x30);

    let result = Scenario::new("unknown code")
        .validator(v)
        .status(v, "active")
        .status(v, "pending_initialized")
        .epoch()
        .oracle(oracle::activity_sent_to(vec![v]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn malformed_frames_change_nothing() {
    let v = pubkey(0x40);

    let result = Scenario::new("malformed frames")
        .validator(v)
        .frame(b"\xff\xfe".to_vec())
        .frame(b"{\"message\": \"validator_status\"".to_vec())
        .frame(b"[]".to_vec())
        .oracle(Box::new(move |world: &World| {
            assert_eq!(world.stats().frames_discarded, 3);
            assert_eq!(world.liveness(&v), None);
            assert!(world.sent().is_empty());
            Ok(())
        }))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn informational_messages_are_inert() {
    let v = pubkey(0x50);

    let result = Scenario::new("informational")
        .validator(v)
        .frame(frames::success("process_activity"))
        .frame(frames::error("beacon node syncing"))
        .frame(frames::unknown("head"))
        .oracle(oracle::all_of(vec![oracle::liveness_is(v, None), oracle::nothing_sent()]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn reconnect_requeries_everyone_regardless_of_state() {
    let a = pubkey(0x61);
    let b = pubkey(0x62);

    let result = Scenario::new("reconnect requery")
        .validator(a)
        .validator(b)
        .connect()
        .status(a, "active")
        .status(b, "exited")
        .connect()
        .oracle(oracle::status_requested_for(vec![a, b, a, b]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn reconnect_with_reset_sends_no_stale_activity() {
    let v = pubkey(0x70);

    let result = Scenario::new("reset on reconnect")
        .validator(v)
        .connect()
        .status(v, "active")
        .connect()
        // Epoch arrives before the fresh status reply
        .epoch()
        .status(v, "active")
        .epoch()
        .oracle(Box::new(move |world: &World| {
            assert!(world.sent_at(3).is_empty(), "no activity on stale state");
            assert_eq!(world.sent_at(5).len(), 1);
            Ok(())
        }))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn reconnect_preserving_state_keeps_sending() {
    let v = pubkey(0x71);

    let result = Scenario::new("preserve on reconnect")
        .validator(v)
        .reconnect_policy(ReconnectPolicy::PreserveLastKnown)
        .connect()
        .status(v, "active")
        .connect()
        .epoch()
        .oracle(oracle::all_of(vec![
            oracle::activity_sent_to(vec![v]),
            oracle::liveness_is(v, Some(Liveness::Active)),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn send_failure_for_one_validator_does_not_block_others() {
    let a = pubkey(0x81);
    let b = pubkey(0x82);
    let c = pubkey(0x83);

    let result = Scenario::new("partial send failure")
        .validator(a)
        .validator(b)
        .validator(c)
        .fail_sends_for(b)
        .connect()
        .status(a, "active")
        .status(b, "active")
        .status(c, "active")
        .epoch()
        .oracle(Box::new(move |world: &World| {
            assert_eq!(world.sent_to(ClientKind::GetValidatorStatus), vec![a, c]);
            assert_eq!(world.sent_to(ClientKind::Activity), vec![a, c]);
            assert_eq!(world.failed_sends(), 2);
            assert_eq!(world.stats().send_failures, 2);
            // State is still tracked for the validator we cannot reach
            assert_eq!(world.liveness(&b), Some(Liveness::Active));
            Ok(())
        }))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {:?}", result);
}

#[test]
fn oracle_failures_are_reported() {
    let v = pubkey(0x90);

    let result = Scenario::new("wrong expectation")
        .validator(v)
        .status(v, "active")
        .epoch()
        .oracle(oracle::nothing_sent())
        .run();

    let err = result.expect_err("oracle should reject");
    assert!(err.starts_with("Scenario 'wrong expectation': unexpected messages"), "{err}");
}
