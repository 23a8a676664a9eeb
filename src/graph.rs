// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::net::NetworkDescription;
use crate::EdgeId;

/// Returned by [RoadGraph::from_description] when the description
/// refers to edges it never declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("connection {from} -> {to} refers to unknown edge {missing}")]
    UnknownEdge {
        from: EdgeId,
        to: EdgeId,
        missing: EdgeId,
    },
}

/// Represents a road network as a set of directed [edges](EdgeId)
/// and the connections between them.
///
/// The graph is immutable - if the underlying network changes, it should be
/// rebuilt from a fresh [NetworkDescription].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoadGraph {
    order: Vec<EdgeId>,
    edges: HashMap<EdgeId, (f32, Vec<EdgeId>)>,
}

impl RoadGraph {
    /// Builds a graph from a parsed description, checking that every
    /// connection endpoint is a declared edge.
    ///
    /// Connections are checked in the order of [NetworkDescription::sources],
    /// so the reported error is the first offending connection of the document.
    /// Sources missing from that list (in descriptions built by hand) are
    /// checked afterwards, in ascending order.
    pub fn from_description(desc: NetworkDescription) -> Result<Self, ConsistencyError> {
        let NetworkDescription {
            edges: order,
            lengths,
            mut connections,
            sources,
        } = desc;

        let known: HashSet<EdgeId> = order.iter().cloned().collect();

        let listed: HashSet<EdgeId> = sources.iter().cloned().collect();
        let mut unlisted: Vec<EdgeId> = connections
            .keys()
            .filter(|e| !listed.contains(*e))
            .cloned()
            .collect();
        unlisted.sort();

        for &from in sources.iter().chain(unlisted.iter()) {
            let successors = connections.get(&from).map(Vec::as_slice).unwrap_or_default();

            if !known.contains(&from) {
                return Err(ConsistencyError::UnknownEdge {
                    from,
                    to: successors.first().cloned().unwrap_or(from),
                    missing: from,
                });
            }

            if let Some(&to) = successors.iter().find(|e| !known.contains(*e)) {
                return Err(ConsistencyError::UnknownEdge {
                    from,
                    to,
                    missing: to,
                });
            }
        }

        let edges = order
            .iter()
            .map(|&e| {
                let length = lengths.get(&e).cloned().unwrap_or(0.0);
                let successors = connections.remove(&e).unwrap_or_default();
                (e, (length, successors))
            })
            .collect();

        Ok(Self { order, edges })
    }

    /// Returns the number of edges in the graph.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns an iterator over all edges, in the order they were declared.
    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.order.iter().cloned()
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Gets all edges which may directly follow the provided edge.
    pub fn successors(&self, edge: EdgeId) -> &[EdgeId] {
        self.edges
            .get(&edge)
            .map(|(_, s)| s.as_slice())
            .unwrap_or_default()
    }

    /// Gets the length of an edge, in meters.
    pub fn length(&self, edge: EdgeId) -> Option<f32> {
        self.edges.get(&edge).map(|&(length, _)| length)
    }

    /// Returns the opposite direction of the provided edge. The result
    /// is not guaranteed to be in the graph, as one-way roads only
    /// have a single direction.
    #[inline]
    pub fn reverse(&self, edge: EdgeId) -> EdgeId {
        edge.reversed()
    }

    /// Creates a cost table with the length of every edge,
    /// useful for routing in an empty network.
    pub fn free_flow_costs(&self) -> HashMap<EdgeId, f32> {
        self.edges
            .iter()
            .map(|(&e, &(length, _))| (e, length))
            .collect()
    }
}
