// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Dynamic vehicle rerouting over [SUMO](https://eclipse.dev/sumo/) road networks.
//!
//! A `*.net.xml` network description is converted into a directed graph of
//! [edges](EdgeId), where each edge may be followed by the edges listed in the
//! network's connections. Over that graph the crate runs Dijkstra's algorithm
//! with live, externally supplied [costs](CostTable) to replan a vehicle's route,
//! and a double-sweep heuristic to estimate the network's diameter.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! let options = reroute::net::Options::default();
//! let g = reroute::net::load_graph_from_file(&options, "path/to/random.net.xml")
//!     .expect("failed to load random.net.xml");
//!
//! let from: reroute::EdgeId = "12".parse().unwrap();
//! let to: reroute::EdgeId = "-7".parse().unwrap();
//! let costs: HashMap<reroute::EdgeId, f32> = g.free_flow_costs();
//!
//! let route = reroute::find_route(&g, from, to, &costs).expect("failed to find route");
//! println!("Route: {}", route);
//! ```

mod graph;
pub mod net;
mod rerouter;
mod route;
mod sweep;

pub use graph::{ConsistencyError, RoadGraph};
pub use rerouter::{ReplanPolicy, Rerouter, VehicleState};
pub use route::{find_route, CostTable, Route, RouteError};
pub use sweep::{estimate_diameter, farthest_edge, Diameter, FarthestEdge, SweepError};

/// Identifies a directed road segment of the network.
///
/// SUMO encodes both directions of one physical road as signed integers,
/// `"12"` and `"-12"`. The identifier is stored as a magnitude and a direction
/// flag, so that `"0"` and `"-0"` remain two distinct edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    magnitude: u64,
    negative: bool,
}

impl EdgeId {
    pub const fn new(magnitude: u64, negative: bool) -> Self {
        Self {
            magnitude,
            negative,
        }
    }

    /// Returns the opposite direction of the same physical segment.
    ///
    /// `e.reversed().reversed() == e` and `e.reversed() != e` hold for every edge.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self {
            magnitude: self.magnitude,
            negative: !self.negative,
        }
    }

    /// Returns the unsigned number of the physical segment,
    /// shared by both of its directions.
    pub const fn magnitude(self) -> u64 {
        self.magnitude
    }

    /// Returns `true` for the direction written with a leading `-`.
    pub const fn is_negative(self) -> bool {
        self.negative
    }
}

impl From<i64> for EdgeId {
    fn from(value: i64) -> Self {
        Self::new(value.unsigned_abs(), value < 0)
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

/// Error returned when a string is not a signed integer edge identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid edge id: {0:?}")]
pub struct ParseEdgeIdError(pub String);

impl std::str::FromStr for EdgeId {
    type Err = ParseEdgeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        // u64::from_str would also accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseEdgeIdError(s.to_string()));
        }

        let magnitude = digits
            .parse()
            .map_err(|_| ParseEdgeIdError(s.to_string()))?;
        Ok(Self::new(magnitude, negative))
    }
}
