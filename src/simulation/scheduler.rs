//! Virtual-time event queue
//!
//! Events are ordered by time and, for equal times, by the order in which
//! they were scheduled.

use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::types::{IntersectionId, RoadId, SimTime};

/// What happens when an event is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A vehicle leaves the intersection
    Departure(IntersectionId),
    /// A stoplight switches to its next green direction
    LightChange(IntersectionId),
    /// A vehicle reaches the far end of the road
    RoadExit(RoadId),
}

/// A scheduled action
#[derive(Debug, Clone, Copy)]
pub struct Event {
    time: OrderedFloat<SimTime>,
    seq: u64,
    action: Action,
}

impl Event {
    pub fn time(&self) -> SimTime {
        self.time.into_inner()
    }

    /// Position of this event in scheduling order
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn action(&self) -> Action {
        self.action
    }

    fn key(&self) -> (OrderedFloat<SimTime>, u64) {
        (self.time, self.seq)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Holds every event that has been scheduled and not yet triggered
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Event>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run at virtual time `time`
    pub fn schedule(&mut self, time: SimTime, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Event {
            time: OrderedFloat(time),
            seq,
            action,
        }));
    }

    /// Removes and returns the earliest pending event
    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop().map(|Reverse(event)| event)
    }

    /// The earliest pending event, left in place
    pub fn peek(&self) -> Option<&Event> {
        self.queue.peek().map(|Reverse(event)| event)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
