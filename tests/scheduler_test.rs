//! Event ordering tests for the scheduler

use proptest::prelude::*;
use roadsim::simulation::{Action, IntersectionId, Prng, Scheduler, SimError, SimId};

fn departure(n: usize) -> Action {
    Action::Departure(IntersectionId(SimId(n)))
}

#[test]
fn test_events_come_out_in_time_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(3.0, departure(0));
    scheduler.schedule(1.0, departure(1));
    scheduler.schedule(2.5, departure(2));
    scheduler.schedule(0.0, departure(3));

    let order: Vec<Action> = std::iter::from_fn(|| scheduler.pop())
        .map(|e| e.action())
        .collect();
    assert_eq!(order, vec![departure(3), departure(1), departure(2), departure(0)]);
    assert!(scheduler.is_empty());
}

#[test]
fn test_equal_times_are_first_in_first_out() {
    let mut scheduler = Scheduler::new();
    for n in 0..5 {
        scheduler.schedule(4.0, departure(n));
    }
    scheduler.schedule(1.0, departure(99));

    assert_eq!(scheduler.pop().map(|e| e.action()), Some(departure(99)));
    for n in 0..5 {
        assert_eq!(scheduler.pop().map(|e| e.action()), Some(departure(n)));
    }
    assert!(scheduler.pop().is_none());
}

#[test]
fn test_events_scheduled_while_draining_are_seen() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(1.0, departure(0));

    let mut times = Vec::new();
    while let Some(event) = scheduler.pop() {
        times.push(event.time());
        if event.action() == departure(0) && event.time() < 4.0 {
            // Same-time follow-up, then one later
            scheduler.schedule(event.time(), departure(1));
            scheduler.schedule(event.time() + 2.0, departure(0));
        }
    }

    assert_eq!(times, vec![1.0, 1.0, 3.0, 3.0, 5.0]);
}

#[test]
fn test_peek_leaves_event_queued() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(2.0, departure(0));

    assert_eq!(scheduler.peek().map(|e| e.time()), Some(2.0));
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn test_prng_is_reproducible_and_bounded() {
    let mut a = Prng::new(42);
    let mut b = Prng::new(42);
    for _ in 0..100 {
        let x = a.from_zero_to(7).unwrap();
        assert_eq!(Some(x), b.from_zero_to(7).ok());
        assert!(x < 7);
    }
    assert_eq!(a.from_zero_to(1), Ok(0));
}

#[test]
fn test_prng_rejects_empty_range() {
    let mut prng = Prng::default();
    assert_eq!(prng.from_zero_to(0), Err(SimError::EmptyRange));
}

proptest! {
    #[test]
    fn prop_drain_is_ordered_by_time_then_schedule_order(times in prop::collection::vec(0u8..20, 0..64)) {
        let mut scheduler = Scheduler::new();
        for (n, t) in times.iter().enumerate() {
            scheduler.schedule(f32::from(*t), departure(n));
        }

        let drained: Vec<_> = std::iter::from_fn(|| scheduler.pop()).collect();
        prop_assert_eq!(drained.len(), times.len());
        for pair in drained.windows(2) {
            prop_assert!(pair[0].time() <= pair[1].time());
            if pair[0].time() == pair[1].time() {
                prop_assert!(pair[0].seq() < pair[1].seq());
            }
        }
    }
}
