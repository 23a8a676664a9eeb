// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::EdgeId;

/// Error conditions which may occur during [find_route](crate::find_route).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The start or end edges don't exist in a graph.
    #[error("invalid edge: {0}")]
    InvalidReference(EdgeId),

    /// The cost table has no entry for an edge the search needed to enter.
    #[error("no cost for edge {0}")]
    MissingCost(EdgeId),

    /// Costs must be finite and non-negative.
    #[error("invalid cost for edge {0}: {1}")]
    InvalidCost(EdgeId, f32),

    /// No sequence of connections leads from `from` to `to`.
    #[error("edge {to} is unreachable from edge {from}")]
    Unreachable { from: EdgeId, to: EdgeId },
}
