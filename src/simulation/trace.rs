//! Console trace of vehicle movements

use std::fmt;

use super::types::{DisplayTime, SimTime};

/// One line of the trace
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A vehicle reached an intersection
    Arrived { intersection: String, time: SimTime },
    /// A vehicle started down a road
    Entered { road: String, time: SimTime },
}

impl TraceEvent {
    pub fn time(&self) -> SimTime {
        match self {
            TraceEvent::Arrived { time, .. } | TraceEvent::Entered { time, .. } => *time,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Arrived { intersection, time } => {
                write!(f, "Vehicle arrived at {} at {}", intersection, DisplayTime(*time))
            }
            TraceEvent::Entered { road, time } => {
                write!(f, "Vehicle entered {} at {}", road, DisplayTime(*time))
            }
        }
    }
}

/// Prints trace lines to stdout and optionally keeps them
#[derive(Debug)]
pub struct Tracer {
    echo: bool,
    recorded: Option<Vec<TraceEvent>>,
}

impl Default for Tracer {
    fn default() -> Self {
        Self {
            echo: true,
            recorded: None,
        }
    }
}

impl Tracer {
    /// Stop printing to stdout
    pub fn silence(&mut self) {
        self.echo = false;
    }

    /// Keep every line from now on
    pub fn record(&mut self) {
        self.recorded.get_or_insert_with(Vec::new);
    }

    pub fn recorded(&self) -> &[TraceEvent] {
        self.recorded.as_deref().unwrap_or(&[])
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if self.echo {
            println!("{}", event);
        }
        if let Some(recorded) = &mut self.recorded {
            recorded.push(event);
        }
    }

    pub fn arrived(&mut self, intersection: impl fmt::Display, time: SimTime) {
        self.emit(TraceEvent::Arrived {
            intersection: intersection.to_string(),
            time,
        });
    }

    pub fn entered(&mut self, road: impl fmt::Display, time: SimTime) {
        self.emit(TraceEvent::Entered {
            road: road.to_string(),
            time,
        });
    }
}
