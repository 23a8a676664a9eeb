// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod cost;
mod dijkstra;
mod error;

pub use cost::CostTable;
pub use dijkstra::{find_route, Route};
pub use error::RouteError;
