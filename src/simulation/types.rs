//! Core types for the traffic simulation

use std::fmt;

/// Virtual simulation time, in seconds
pub type SimTime = f32;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for intersection IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntersectionId(pub SimId);

impl IntersectionId {
    pub fn index(self) -> usize {
        self.0 .0
    }
}

/// A wrapper type for road IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadId(pub SimId);

impl RoadId {
    pub fn index(self) -> usize {
        self.0 .0
    }
}

/// Writes a time the way descriptions and trace lines show it: `2.0`, `7.5`
pub struct DisplayTime(pub SimTime);

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
