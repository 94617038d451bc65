//! Road network simulation library
//!
//! Reads a road network description and simulates vehicles moving through
//! it, one event at a time.

pub mod description;
pub mod simulation;
