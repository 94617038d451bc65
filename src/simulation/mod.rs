//! Discrete-event traffic simulation
//!
//! Vehicles leave sources, travel down roads, cross intersections and are
//! absorbed by sinks. Nothing moves except through events taken off the
//! scheduler in virtual-time order.

mod diagnostics;
mod error;
mod intersection;
mod prng;
mod road;
mod road_network;
mod scheduler;
mod trace;
mod types;
mod world;

pub use diagnostics::{fatal, Diagnostics};
pub use error::SimError;
pub use intersection::{Control, EventContext, NoStop, SimIntersection, Source, StopLight};
pub use prng::{Prng, DEFAULT_SEED};
pub use road::SimRoad;
pub use road_network::SimRoadNetwork;
pub use scheduler::{Action, Event, Scheduler};
pub use trace::{TraceEvent, Tracer};
pub use types::{DisplayTime, IntersectionId, RoadId, SimId, SimTime};
pub use world::{RunSummary, SimWorld};
