// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{find_route, CostTable, EdgeId, RoadGraph, Route, RouteError};

/// Decides when a vehicle is close enough to the end of its current edge
/// to be given a new route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplanPolicy {
    /// Fraction of the lane length after which a vehicle is replanned.
    pub threshold: f32,
}

impl Default for ReplanPolicy {
    fn default() -> Self {
        Self { threshold: 0.9 }
    }
}

impl ReplanPolicy {
    pub fn is_due(&self, lane_position: f32, lane_length: f32) -> bool {
        lane_position >= self.threshold * lane_length
    }
}

/// Snapshot of a vehicle's position, as reported by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState<'a> {
    /// Id of the edge the vehicle is on. Inside junctions this is an internal
    /// edge id (like `":J1_0"`), which is not part of any [RoadGraph].
    pub road_id: &'a str,

    /// Distance from the start of the current lane, in meters.
    pub lane_position: f32,

    /// Length of the current lane, in meters.
    pub lane_length: f32,
}

/// Keeps a single vehicle on the cheapest route to its destination,
/// while the costs of edges change during a simulation.
///
/// The simulation loop is expected to call [Rerouter::on_step] after every
/// step with a fresh cost snapshot, and hand any returned [Route] back
/// to the simulation.
#[derive(Debug)]
pub struct Rerouter<'g> {
    g: &'g RoadGraph,
    destination: EdgeId,
    policy: ReplanPolicy,
    replans: usize,
}

impl<'g> Rerouter<'g> {
    /// Creates a rerouter for a vehicle heading to `destination`,
    /// which must be an edge of the graph.
    pub fn new(
        g: &'g RoadGraph,
        destination: EdgeId,
        policy: ReplanPolicy,
    ) -> Result<Self, RouteError> {
        if !g.contains(destination) {
            return Err(RouteError::InvalidReference(destination));
        }

        Ok(Self {
            g,
            destination,
            policy,
            replans: 0,
        })
    }

    /// Returns the edge all produced routes end at.
    pub fn destination(&self) -> EdgeId {
        self.destination
    }

    /// Returns how many routes were produced so far.
    pub fn replan_count(&self) -> usize {
        self.replans
    }

    /// Computes a new route from the vehicle's current edge, if the vehicle is on
    /// a known edge and has passed the [ReplanPolicy] threshold. A vehicle remains
    /// past the threshold for a few steps, and gets a new route on each of them.
    pub fn on_step<C: CostTable + ?Sized>(
        &mut self,
        vehicle: &VehicleState<'_>,
        costs: &C,
    ) -> Result<Option<Route>, RouteError> {
        let edge = match vehicle.road_id.parse::<EdgeId>() {
            Ok(edge) if self.g.contains(edge) => edge,
            _ => return Ok(None),
        };

        if !self
            .policy
            .is_due(vehicle.lane_position, vehicle.lane_length)
        {
            return Ok(None);
        }

        let route = find_route(self.g, edge, self.destination, costs)?;
        self.replans += 1;
        log::info!(
            "rerouted from {} to {}: {} edges, cost {}",
            edge,
            self.destination,
            route.edges.len(),
            route.cost,
        );

        Ok(Some(route))
    }
}
