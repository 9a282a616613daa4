//! Concurrency tests for the shared keeper.

use std::sync::Arc;
use std::thread;

use accrue_core::constants::SECONDS_PER_DAY;
use accrue_core::types::CapitalizationEvent;
use accrue_tests::helpers::*;

const T0: u64 = 1_700_000_000;
const DAY: u64 = SECONDS_PER_DAY;

// ============================================================================
// Readers and writers at a fixed instant
// ============================================================================

#[test]
fn readers_agree_while_writers_checkpoint() {
    let (keeper, clock, _sink) = shared_keeper(rate_bps(10), DAY, T0);
    clock.advance(30 * DAY + 7);
    let expected = keeper.current_rate().unwrap();
    let keeper = Arc::new(keeper);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let k = Arc::clone(&keeper);
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(k.current_rate().unwrap(), expected);
            }
        }));
    }
    for _ in 0..2 {
        let k = Arc::clone(&keeper);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                assert_eq!(k.checkpoint().unwrap(), expected);
                // same rate again: no value change at this instant
                k.set_rate(rate_bps(10)).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let state = keeper.snapshot();
    assert_eq!(state.current_rate, expected);
    assert_eq!(state.last_update, T0 + 30 * DAY + 7);
}

// ============================================================================
// Event ordering
// ============================================================================

#[test]
fn events_follow_commit_order() {
    let (keeper, clock, sink) = shared_keeper(rate_bps(1), DAY, T0);
    let keeper = Arc::new(keeper);

    let mut handles = Vec::new();
    for i in 0..8u64 {
        let k = Arc::clone(&keeper);
        let c = Arc::clone(&clock);
        handles.push(thread::spawn(move || {
            for j in 0..25u64 {
                c.advance(1);
                k.set_rate(rate_bps(i * 100 + j)).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let events = sink.drain();
    assert_eq!(events.len(), 200);
    // timestamps never go backwards and each event's old rate is the
    // previous event's new rate
    for pair in events.windows(2) {
        assert!(pair[0].at() <= pair[1].at());
        match (&pair[0], &pair[1]) {
            (
                CapitalizationEvent::RateChanged { new, .. },
                CapitalizationEvent::RateChanged { old, .. },
            ) => assert_eq!(new, old),
            other => panic!("unexpected events {other:?}"),
        }
    }
    let last_new = match events.last() {
        Some(CapitalizationEvent::RateChanged { new, .. }) => *new,
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(keeper.snapshot().rate, last_new);
}
