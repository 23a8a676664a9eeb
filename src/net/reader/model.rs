// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::EdgeId;

/// Everything the router needs to know about a network, as read from
/// a [SUMO network file](https://sumo.dlr.de/docs/Networks/SUMO_Road_Networks.html).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NetworkDescription {
    /// All normal (non-internal) edges, in document order.
    pub edges: Vec<EdgeId>,

    /// Length of every edge, in meters.
    pub lengths: HashMap<EdgeId, f32>,

    /// Edges which may directly follow a given edge,
    /// in order of appearance in the document.
    pub connections: HashMap<EdgeId, Vec<EdgeId>>,

    /// Keys of [NetworkDescription::connections], in order of their first
    /// connection in the document.
    pub sources: Vec<EdgeId>,
}

/// Represents an `<edge>` start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,

    /// Value of the `function` attribute, `None` for normal edges.
    pub function: Option<String>,
}

impl Edge {
    pub fn is_normal(&self) -> bool {
        matches!(self.function.as_deref(), None | Some("normal"))
    }
}

/// Represents a `<connection>` between two lanes of two edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

/// Union over all elements of a network file relevant for routing.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Edge(Edge),

    /// A `<lane>` of the most recent [Element::Edge], with its length.
    Lane(f32),

    /// Closes the most recent [Element::Edge].
    EdgeEnd,

    Connection(Connection),
}
