//! Road network topology
//!
//! Intersections and roads live in index arenas; everything else refers to
//! them by [`IntersectionId`] and [`RoadId`]. A petgraph mirror of the same
//! graph answers the structural questions asked before a run.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::SimError;
use super::intersection::{Control, SimIntersection};
use super::road::SimRoad;
use super::types::{IntersectionId, RoadId, SimId, SimTime};

/// The finished graph of intersections and roads
#[derive(Default)]
pub struct SimRoadNetwork {
    /// The underlying petgraph directed graph (one-way roads)
    graph: DiGraph<IntersectionId, RoadId>,

    /// Maps intersection IDs to their node indices in the graph
    intersection_to_node: HashMap<IntersectionId, NodeIndex>,

    /// Maps intersection names to their IDs
    names: HashMap<String, IntersectionId>,

    /// All intersections, indexed by `IntersectionId`
    intersections: Vec<SimIntersection>,

    /// All roads, indexed by `RoadId`
    roads: Vec<SimRoad>,
}

impl SimRoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection under a name no other intersection uses
    pub fn add_intersection(
        &mut self,
        name: &str,
        control: Control,
    ) -> Result<IntersectionId, SimError> {
        if self.names.contains_key(name) {
            return Err(SimError::DuplicateIntersection(name.to_string()));
        }

        let id = IntersectionId(SimId(self.intersections.len()));
        let node_index = self.graph.add_node(id);
        self.intersection_to_node.insert(id, node_index);
        self.names.insert(name.to_string(), id);
        self.intersections
            .push(SimIntersection::new(id, name, control));
        Ok(id)
    }

    /// Adds a road and registers it with both of its intersections.
    /// The road's direction is its position among the destination's
    /// incoming roads.
    pub fn add_road(
        &mut self,
        source: IntersectionId,
        destination: IntersectionId,
        travel_time: SimTime,
    ) -> Result<RoadId, SimError> {
        let source_node = *self
            .intersection_to_node
            .get(&source)
            .ok_or(SimError::MissingIntersection(source))?;
        let destination_node = *self
            .intersection_to_node
            .get(&destination)
            .ok_or(SimError::MissingIntersection(destination))?;

        let id = RoadId(SimId(self.roads.len()));
        let direction = self.intersections[destination.index()].incoming.len();
        let road = SimRoad::new(
            id,
            (source, &self.intersections[source.index()].name),
            (destination, &self.intersections[destination.index()].name),
            travel_time,
            direction,
        );

        self.intersections[source.index()].outgoing.push(id);
        self.intersections[destination.index()].incoming.push(id);
        self.graph.add_edge(source_node, destination_node, id);
        self.roads.push(road);
        Ok(id)
    }

    /// Finds an intersection by name
    pub fn find_intersection(&self, name: &str) -> Option<IntersectionId> {
        self.names.get(name).copied()
    }

    pub fn get_intersection(&self, id: IntersectionId) -> Option<&SimIntersection> {
        self.intersections.get(id.index())
    }

    pub fn get_road(&self, id: RoadId) -> Option<&SimRoad> {
        self.roads.get(id.index())
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Splits the network so one intersection can be mutated while the
    /// roads are read
    pub(crate) fn handler_parts(
        &mut self,
        id: IntersectionId,
    ) -> Option<(&mut SimIntersection, &[SimRoad])> {
        let intersection = self.intersections.get_mut(id.index())?;
        Some((intersection, &self.roads))
    }

    /// Intersections that would have to send a vehicle onward but have no
    /// road to send it down
    pub fn dead_ends(&self) -> Vec<IntersectionId> {
        self.graph
            .node_indices()
            .filter(|node| self.graph.neighbors(*node).next().is_none())
            .map(|node| self.graph[node])
            .filter(|id| !self.intersections[id.index()].is_sink())
            .collect()
    }

    /// Stoplights with no incoming road to turn green
    pub fn unfed_stop_lights(&self) -> Vec<IntersectionId> {
        self.intersections
            .iter()
            .filter(|i| matches!(i.control, Control::StopLight(_)) && i.incoming.is_empty())
            .map(|i| i.id)
            .collect()
    }

    /// Intersections no vehicle from any source can ever reach
    pub fn unreachable_from_sources(&self) -> Vec<IntersectionId> {
        let mut reached = HashSet::new();
        for source in self.intersections.iter().filter(|i| i.is_source()) {
            let start = self.intersection_to_node[&source.id];
            let mut dfs = Dfs::new(&self.graph, start);
            while let Some(node) = dfs.next(&self.graph) {
                reached.insert(self.graph[node]);
            }
        }

        self.intersections
            .iter()
            .map(|i| i.id)
            .filter(|id| !reached.contains(id))
            .collect()
    }
}

/// Lists every intersection, then every road, the way they are described
impl fmt::Display for SimRoadNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for intersection in &self.intersections {
            writeln!(f, "{}", intersection)?;
        }
        for road in &self.roads {
            writeln!(f, "{}", road)?;
        }
        Ok(())
    }
}
