//! Main simulation world that ties everything together
//!
//! `SimWorld` owns the topology, the event queue, the random source, the
//! trace and the diagnostics for one simulation. Building the network
//! schedules the first events; [`SimWorld::run`] then drains the queue.

use log::{debug, info};

use super::diagnostics::Diagnostics;
use super::error::SimError;
use super::intersection::{Control, EventContext, NoStop, SimIntersection, Source, StopLight};
use super::prng::Prng;
use super::road_network::SimRoadNetwork;
use super::scheduler::{Action, Event, Scheduler};
use super::trace::{TraceEvent, Tracer};
use super::types::{IntersectionId, RoadId, SimTime};

/// What a finished run looked like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Events taken off the queue and triggered
    pub events_triggered: u64,
    /// Time of the last triggered event, 0 if none fired
    pub final_time: SimTime,
    /// Events still queued (only nonzero after `run_until`)
    pub events_pending: usize,
}

/// The main simulation world
pub struct SimWorld {
    /// Intersections and roads
    pub road_network: SimRoadNetwork,

    scheduler: Scheduler,

    rng: Prng,

    tracer: Tracer,

    diagnostics: Diagnostics,

    /// Time of the event being handled, or of the last one handled
    time: SimTime,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(rng: Prng) -> Self {
        Self {
            road_network: SimRoadNetwork::new(),
            scheduler: Scheduler::new(),
            rng,
            tracer: Tracer::default(),
            diagnostics: Diagnostics::new(),
            time: 0.0,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(Prng::default())
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(Prng::new(seed))
    }

    /// Keep trace lines in memory as well as printing them
    pub fn record_trace(&mut self) {
        self.tracer.record();
    }

    /// Stop printing trace lines
    pub fn silence_trace(&mut self) {
        self.tracer.silence();
    }

    /// Trace lines recorded since `record_trace` was called
    pub fn trace(&self) -> &[TraceEvent] {
        self.tracer.recorded()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Number of events waiting in the queue
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Current virtual time
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn intersection(&self, id: IntersectionId) -> Option<&SimIntersection> {
        self.road_network.get_intersection(id)
    }

    /// Add an intersection with no control
    pub fn add_no_stop(&mut self, name: &str, delay: SimTime) -> Result<IntersectionId, SimError> {
        let id = self
            .road_network
            .add_intersection(name, Control::NoStop(NoStop::new(delay)))?;
        if delay < 0.0 {
            self.warn_about(id, "Negative delay");
        }
        Ok(id)
    }

    /// Add a stoplight; its light starts changing at time 0
    pub fn add_stop_light(
        &mut self,
        name: &str,
        delay: SimTime,
        light_interval: SimTime,
    ) -> Result<IntersectionId, SimError> {
        let id = self.road_network.add_intersection(
            name,
            Control::StopLight(StopLight::new(delay, light_interval)),
        )?;
        if delay < 0.0 {
            self.warn_about(id, "Negative delay");
        }
        if light_interval <= 0.0 {
            self.warn_about(id, "Light interval not positive");
        }
        self.scheduler.schedule(0.0, Action::LightChange(id));
        Ok(id)
    }

    /// Add a source; its first vehicle leaves at `start_time`
    pub fn add_source(
        &mut self,
        name: &str,
        start_time: SimTime,
        num_cars: i32,
        departure_interval: SimTime,
    ) -> Result<IntersectionId, SimError> {
        let id = self.road_network.add_intersection(
            name,
            Control::Source(Source::new(start_time, num_cars, departure_interval)),
        )?;
        if start_time < 0.0 {
            self.warn_about(id, "Negative start time");
        }
        if num_cars <= 0 {
            self.warn_about(id, "Never produces");
        }
        if departure_interval < 0.0 {
            self.warn_about(id, "Negative departure interval");
        }
        if num_cars > 0 {
            self.scheduler.schedule(start_time, Action::Departure(id));
        }
        Ok(id)
    }

    /// Add a sink
    pub fn add_sink(&mut self, name: &str) -> Result<IntersectionId, SimError> {
        self.road_network.add_intersection(name, Control::Sink)
    }

    /// Add a one-way road between intersections
    pub fn add_road(
        &mut self,
        source: IntersectionId,
        destination: IntersectionId,
        travel_time: SimTime,
    ) -> Result<RoadId, SimError> {
        let id = self
            .road_network
            .add_road(source, destination, travel_time)?;
        if travel_time < 0.0 {
            if let Some(road) = self.road_network.get_road(id) {
                self.diagnostics
                    .warn(format!("Negative travel time: {}", road));
            }
        }
        Ok(id)
    }

    /// Add a road between intersections given by name
    pub fn add_road_between(
        &mut self,
        source: &str,
        destination: &str,
        travel_time: SimTime,
    ) -> Result<RoadId, SimError> {
        let source = self
            .road_network
            .find_intersection(source)
            .ok_or_else(|| SimError::UnknownIntersection(source.to_string()))?;
        let destination = self
            .road_network
            .find_intersection(destination)
            .ok_or_else(|| SimError::UnknownIntersection(destination.to_string()))?;
        self.add_road(source, destination, travel_time)
    }

    /// Warn about intersections that cannot work as built
    pub fn check_topology(&mut self) {
        for id in self.road_network.dead_ends() {
            self.warn_about(id, "No outgoing roads");
        }
        for id in self.road_network.unfed_stop_lights() {
            self.warn_about(id, "No incoming roads");
        }
        for id in self.road_network.unreachable_from_sources() {
            if let Some(intersection) = self.road_network.get_intersection(id) {
                info!("Never reached by any vehicle: {}", intersection);
            }
        }
    }

    fn warn_about(&mut self, id: IntersectionId, problem: &str) {
        if let Some(intersection) = self.road_network.get_intersection(id) {
            self.diagnostics
                .warn(format!("{}: {}", problem, intersection));
        }
    }

    /// Schedule an action directly
    pub fn schedule(&mut self, time: SimTime, action: Action) {
        self.scheduler.schedule(time, action);
    }

    /// Trigger events until none are left
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        self.run_until(SimTime::INFINITY)
    }

    /// Trigger events in time order, stopping before the first event later
    /// than `horizon`. Such an event stays queued.
    pub fn run_until(&mut self, horizon: SimTime) -> Result<RunSummary, SimError> {
        info!(
            "Running simulation: {} intersections, {} roads, {} events queued",
            self.road_network.intersection_count(),
            self.road_network.road_count(),
            self.scheduler.len()
        );

        let mut events_triggered = 0;
        while let Some(next) = self.scheduler.peek() {
            if next.time() > horizon {
                break;
            }
            let Some(event) = self.scheduler.pop() else {
                break;
            };
            events_triggered += 1;
            self.trigger(event)?;
        }

        let summary = RunSummary {
            events_triggered,
            final_time: self.time,
            events_pending: self.scheduler.len(),
        };
        info!(
            "Simulation stopped at {} after {} events ({} pending)",
            summary.final_time, summary.events_triggered, summary.events_pending
        );
        Ok(summary)
    }

    /// Run one event's action
    pub fn trigger(&mut self, event: Event) -> Result<(), SimError> {
        self.time = event.time();
        debug!(
            "t={} #{} {:?} ({} queued)",
            event.time(),
            event.seq(),
            event.action(),
            self.scheduler.len()
        );

        match event.action() {
            Action::Departure(id) => {
                let (intersection, roads) = self
                    .road_network
                    .handler_parts(id)
                    .ok_or(SimError::MissingIntersection(id))?;
                let mut cx = EventContext {
                    scheduler: &mut self.scheduler,
                    rng: &mut self.rng,
                    tracer: &mut self.tracer,
                    roads,
                };
                intersection.departure_event(event.time(), &mut cx)
            }
            Action::LightChange(id) => {
                let (intersection, roads) = self
                    .road_network
                    .handler_parts(id)
                    .ok_or(SimError::MissingIntersection(id))?;
                let mut cx = EventContext {
                    scheduler: &mut self.scheduler,
                    rng: &mut self.rng,
                    tracer: &mut self.tracer,
                    roads,
                };
                intersection.light_change_event(event.time(), &mut cx)
            }
            Action::RoadExit(road_id) => {
                let road = self
                    .road_network
                    .get_road(road_id)
                    .ok_or(SimError::MissingRoad(road_id))?;
                let (destination, direction) = (road.destination, road.direction);
                let (intersection, roads) = self
                    .road_network
                    .handler_parts(destination)
                    .ok_or(SimError::MissingIntersection(destination))?;
                let mut cx = EventContext {
                    scheduler: &mut self.scheduler,
                    rng: &mut self.rng,
                    tracer: &mut self.tracer,
                    roads,
                };
                intersection.arrival_event(event.time(), direction, &mut cx)
            }
        }
    }

    /// A vehicle enters `road_id` at `time`
    pub fn enter_road(&mut self, road_id: RoadId, time: SimTime) -> Result<(), SimError> {
        let road = self
            .road_network
            .get_road(road_id)
            .ok_or(SimError::MissingRoad(road_id))?;
        road.entry_event(time, &mut self.scheduler, &mut self.tracer);
        Ok(())
    }
}
