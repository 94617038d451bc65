//! Intersection logic for the traffic simulation
//!
//! Every intersection answers the same two questions, what happens when a
//! vehicle arrives and what happens when one departs. How it answers depends
//! on its [`Control`].

use std::fmt;

use super::error::SimError;
use super::prng::Prng;
use super::road::SimRoad;
use super::scheduler::{Action, Scheduler};
use super::trace::Tracer;
use super::types::{DisplayTime, IntersectionId, RoadId, SimTime};

/// Everything a handler may touch besides its own intersection
pub struct EventContext<'a> {
    pub scheduler: &'a mut Scheduler,
    pub rng: &'a mut Prng,
    pub tracer: &'a mut Tracer,
    pub roads: &'a [SimRoad],
}

/// No control at all: vehicles cross one at a time, `delay` apart
#[derive(Debug, Clone)]
pub struct NoStop {
    pub delay: SimTime,
    occupants: u32,
}

impl NoStop {
    pub fn new(delay: SimTime) -> Self {
        Self {
            delay,
            occupants: 0,
        }
    }

    /// Vehicles inside the intersection, including the ones waiting to cross
    pub fn occupants(&self) -> u32 {
        self.occupants
    }

    fn arrive(&mut self) -> Option<SimTime> {
        let was_idle = self.occupants == 0;
        self.occupants += 1;
        was_idle.then_some(self.delay)
    }

    fn depart(&mut self) -> Option<SimTime> {
        self.occupants -= 1;
        (self.occupants > 0).then_some(self.delay)
    }
}

/// A light that turns each incoming direction green in turn
#[derive(Debug, Clone)]
pub struct StopLight {
    pub delay: SimTime,
    pub light_interval: SimTime,
    light_dir: usize,
    /// Waiting vehicles per direction, sized on first use
    queues: Vec<u32>,
    occupants: u32,
}

impl StopLight {
    pub fn new(delay: SimTime, light_interval: SimTime) -> Self {
        Self {
            delay,
            light_interval,
            light_dir: 0,
            queues: Vec::new(),
            occupants: 0,
        }
    }

    /// The direction that currently has the green light
    pub fn light_direction(&self) -> usize {
        self.light_dir
    }

    pub fn occupants(&self) -> u32 {
        self.occupants
    }

    pub fn queue_depths(&self) -> &[u32] {
        &self.queues
    }

    fn queue_mut(&mut self, dir: usize, directions: usize) -> &mut u32 {
        let len = directions.max(dir + 1);
        if self.queues.len() < len {
            self.queues.resize(len, 0);
        }
        &mut self.queues[dir]
    }

    /// Let the next vehicle waiting on green into an empty intersection
    fn admit_waiting(&mut self, directions: usize) -> Option<SimTime> {
        if self.occupants > 0 {
            return None;
        }
        let queue = self.queue_mut(self.light_dir, directions);
        if *queue == 0 {
            return None;
        }
        *queue -= 1;
        self.occupants += 1;
        Some(self.delay)
    }

    fn change(&mut self, directions: usize) -> Option<SimTime> {
        if directions == 0 {
            return None;
        }
        self.light_dir = (self.light_dir + 1) % directions;
        self.admit_waiting(directions)
    }

    fn arrive(&mut self, dir: usize, directions: usize) -> Option<SimTime> {
        if dir == self.light_dir && self.occupants == 0 {
            self.occupants += 1;
            return Some(self.delay);
        }
        *self.queue_mut(dir, directions) += 1;
        None
    }

    fn depart(&mut self, directions: usize) -> Option<SimTime> {
        self.occupants -= 1;
        self.admit_waiting(directions)
    }
}

/// Releases `num_cars` vehicles, one every `departure_interval`
#[derive(Debug, Clone)]
pub struct Source {
    pub start_time: SimTime,
    pub num_cars: i32,
    pub departure_interval: SimTime,
    remaining: i32,
}

impl Source {
    pub fn new(start_time: SimTime, num_cars: i32, departure_interval: SimTime) -> Self {
        Self {
            start_time,
            num_cars,
            departure_interval,
            remaining: num_cars,
        }
    }

    /// Vehicles still to be released
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    fn depart(&mut self) -> Option<SimTime> {
        self.remaining -= 1;
        (self.remaining > 0).then_some(self.departure_interval)
    }
}

/// How an intersection treats the vehicles that reach it
#[derive(Debug, Clone)]
pub enum Control {
    NoStop(NoStop),
    StopLight(StopLight),
    Source(Source),
    /// Absorbs every vehicle that arrives
    Sink,
}

/// An intersection in the traffic simulation
#[derive(Debug, Clone)]
pub struct SimIntersection {
    pub id: IntersectionId,
    pub name: String,
    pub outgoing: Vec<RoadId>,
    /// Incoming roads in registration order; the position is the direction
    pub incoming: Vec<RoadId>,
    pub control: Control,
}

impl SimIntersection {
    pub fn new(id: IntersectionId, name: impl Into<String>, control: Control) -> Self {
        Self {
            id,
            name: name.into(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            control,
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self.control, Control::Sink)
    }

    pub fn is_source(&self) -> bool {
        matches!(self.control, Control::Source(_))
    }

    /// A vehicle comes off an incoming road from direction `dir`
    pub fn arrival_event(
        &mut self,
        time: SimTime,
        dir: usize,
        cx: &mut EventContext<'_>,
    ) -> Result<(), SimError> {
        if self.is_source() {
            return Err(SimError::ArrivalAtSource(self.to_string()));
        }
        cx.tracer.arrived(&*self, time);

        let directions = self.incoming.len();
        let crossing = match &mut self.control {
            Control::NoStop(state) => state.arrive(),
            Control::StopLight(state) => state.arrive(dir, directions),
            Control::Source(_) | Control::Sink => None,
        };
        if let Some(delay) = crossing {
            cx.scheduler.schedule(time + delay, Action::Departure(self.id));
        }
        Ok(())
    }

    /// A vehicle leaves onto a randomly chosen outgoing road
    pub fn departure_event(
        &mut self,
        time: SimTime,
        cx: &mut EventContext<'_>,
    ) -> Result<(), SimError> {
        let has_vehicle = match &self.control {
            Control::NoStop(state) => state.occupants > 0,
            Control::StopLight(state) => state.occupants > 0,
            Control::Source(state) => state.remaining > 0,
            Control::Sink => return Err(SimError::DepartureFromSink(self.to_string())),
        };
        if !has_vehicle {
            return Err(SimError::DepartureFromEmpty(self.to_string()));
        }
        self.send_onward(time, cx)?;

        let directions = self.incoming.len();
        let next = match &mut self.control {
            Control::NoStop(state) => state.depart(),
            Control::StopLight(state) => state.depart(directions),
            Control::Source(state) => state.depart(),
            Control::Sink => None,
        };
        if let Some(wait) = next {
            cx.scheduler.schedule(time + wait, Action::Departure(self.id));
        }
        Ok(())
    }

    /// Switch a stoplight to its next direction and book the following switch
    pub fn light_change_event(
        &mut self,
        time: SimTime,
        cx: &mut EventContext<'_>,
    ) -> Result<(), SimError> {
        let directions = self.incoming.len();
        let light = match &mut self.control {
            Control::StopLight(light) => light,
            _ => return Err(SimError::NotAStopLight(self.to_string())),
        };
        if let Some(delay) = light.change(directions) {
            cx.scheduler.schedule(time + delay, Action::Departure(self.id));
        }
        cx.scheduler
            .schedule(time + light.light_interval, Action::LightChange(self.id));
        Ok(())
    }

    /// Pick an outgoing road at random
    pub fn pick_road<'r>(&self, cx: &mut EventContext<'r>) -> Result<&'r SimRoad, SimError> {
        if self.outgoing.is_empty() {
            return Err(SimError::NoOutgoingRoad(self.to_string()));
        }
        let pick = cx.rng.from_zero_to(self.outgoing.len())?;
        let road_id = self.outgoing[pick];
        let roads: &'r [SimRoad] = cx.roads;
        roads
            .get(road_id.index())
            .ok_or(SimError::MissingRoad(road_id))
    }

    fn send_onward(&self, time: SimTime, cx: &mut EventContext<'_>) -> Result<(), SimError> {
        let road = self.pick_road(cx)?;
        road.entry_event(time, cx.scheduler, cx.tracer);
        Ok(())
    }
}

impl fmt::Display for SimIntersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Intersection {}", self.name)?;
        match &self.control {
            Control::NoStop(state) => write!(f, " nostop {}", DisplayTime(state.delay)),
            Control::StopLight(state) => write!(
                f,
                " stoplight {} {}",
                DisplayTime(state.delay),
                DisplayTime(state.light_interval)
            ),
            Control::Source(state) => write!(
                f,
                " source {} {} {}",
                DisplayTime(state.start_time),
                state.num_cars,
                DisplayTime(state.departure_interval)
            ),
            Control::Sink => write!(f, " sink"),
        }
    }
}
