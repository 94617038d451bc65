//! Roads carry vehicles from one intersection to the next

use std::fmt;

use super::scheduler::{Action, Scheduler};
use super::trace::Tracer;
use super::types::{DisplayTime, IntersectionId, RoadId, SimTime};

/// A one-way road with a fixed travel time
#[derive(Debug, Clone)]
pub struct SimRoad {
    pub id: RoadId,
    pub source: IntersectionId,
    pub destination: IntersectionId,
    pub travel_time: SimTime,
    /// Position of this road among the destination's incoming roads
    pub direction: usize,
    source_name: String,
    destination_name: String,
}

impl SimRoad {
    pub fn new(
        id: RoadId,
        source: (IntersectionId, &str),
        destination: (IntersectionId, &str),
        travel_time: SimTime,
        direction: usize,
    ) -> Self {
        Self {
            id,
            source: source.0,
            destination: destination.0,
            travel_time,
            direction,
            source_name: source.1.to_string(),
            destination_name: destination.1.to_string(),
        }
    }

    /// A vehicle starts down this road at `time`; it comes off the far end
    /// `travel_time` later
    pub fn entry_event(&self, time: SimTime, scheduler: &mut Scheduler, tracer: &mut Tracer) {
        tracer.entered(self, time);
        scheduler.schedule(time + self.travel_time, Action::RoadExit(self.id));
    }
}

impl fmt::Display for SimRoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Road {} {} {}",
            self.source_name,
            self.destination_name,
            DisplayTime(self.travel_time)
        )
    }
}
