// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::{CostTable, EdgeId, RoadGraph, RouteError};

/// Sequence of edges from a source to a destination, as returned by [find_route].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Edges to traverse, starting with the source and ending with the destination.
    pub edges: Vec<EdgeId>,

    /// Sum of the costs of all edges entered along the route.
    /// The cost of the source edge is not included. Accumulated in `f64`,
    /// so a sum of finite `f32` costs stays finite.
    pub cost: f64,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut edges = self.edges.iter().peekable();
        while let Some(edge) = edges.next() {
            write!(f, "{}", edge)?;
            if edges.peek().is_some() {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: EdgeId,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Ties are broken by edge id to keep the search deterministic.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.at.cmp(&self.at))
    }
}

fn reconstruct_path(came_from: &HashMap<EdgeId, EdgeId>, mut last: EdgeId) -> Vec<EdgeId> {
    let mut path = vec![last];

    while let Some(&e) = came_from.get(&last) {
        path.push(e);
        last = e;
    }

    path.reverse();
    path
}

fn entry_cost<C: CostTable + ?Sized>(costs: &C, edge: EdgeId) -> Result<f32, RouteError> {
    match costs.cost(edge) {
        Some(c) if c.is_finite() && c >= 0.0 => Ok(c),
        Some(c) => Err(RouteError::InvalidCost(edge, c)),
        None => Err(RouteError::MissingCost(edge)),
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest route between two edges of the provided graph.
///
/// Moving from one edge onto its successor costs `costs[successor]` - the cost
/// of entering an edge. Only edges actually entered during the search need to
/// have a cost; a missing or invalid (negative, infinite or NaN) cost of such an
/// edge is reported as an error.
///
/// If `from == to`, the route consists of just that edge. If no route exists,
/// [RouteError::Unreachable] is returned - a route is never empty and always
/// starts at `from`.
pub fn find_route<C: CostTable + ?Sized>(
    g: &RoadGraph,
    from: EdgeId,
    to: EdgeId,
    costs: &C,
) -> Result<Route, RouteError> {
    if !g.contains(from) {
        return Err(RouteError::InvalidReference(from));
    }
    if !g.contains(to) {
        return Err(RouteError::InvalidReference(to));
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<EdgeId, EdgeId> = HashMap::default();
    let mut known_costs: HashMap<EdgeId, f64> = HashMap::default();

    queue.push(QueueItem { at: from, cost: 0.0 });
    known_costs.insert(from, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to {
            return Ok(Route {
                edges: reconstruct_path(&came_from, to),
                cost: item.cost,
            });
        }

        // Instead of decreasing keys, an edge may be pushed multiple times.
        // Only the cheapest entry is expanded, the rest are stale.
        if item.cost > known_costs.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        for &next in g.successors(item.at) {
            let next_cost = item.cost + f64::from(entry_cost(costs, next)?);
            if next_cost < known_costs.get(&next).cloned().unwrap_or(f64::INFINITY) {
                came_from.insert(next, item.at);
                known_costs.insert(next, next_cost);
                queue.push(QueueItem {
                    at: next,
                    cost: next_cost,
                });
            }
        }
    }

    Err(RouteError::Unreachable { from, to })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::tests::graph_from;

    fn costs(entries: &[(i64, f32)]) -> HashMap<EdgeId, f32> {
        entries.iter().map(|&(e, c)| (EdgeId::from(e), c)).collect()
    }

    fn edges(ids: &[i64]) -> Vec<EdgeId> {
        ids.iter().map(|&e| EdgeId::from(e)).collect()
    }

    #[test]
    fn test_cheaper_detour() {
        // 1 -> 2 -> 4 costs 1 + 1, 1 -> 3 -> 4 costs 100 + 1
        let g = graph_from(&[1, 2, 3, 4], &[(1, 2), (2, 4), (1, 3), (3, 4)]);
        let c = costs(&[(1, 5.0), (2, 1.0), (3, 100.0), (4, 1.0)]);

        let route = find_route(&g, EdgeId::from(1), EdgeId::from(4), &c).unwrap();
        assert_eq!(route.edges, edges(&[1, 2, 4]));
        assert_eq!(route.cost, 2.0);
    }

    #[test]
    fn test_direct_connection() {
        // Entering 3 costs the same from 1 and from 2, so the direct connection wins
        let g = graph_from(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
        let c = costs(&[(2, 1.0), (3, 1.0)]);

        let route = find_route(&g, EdgeId::from(1), EdgeId::from(3), &c).unwrap();
        assert_eq!(route.edges, edges(&[1, 3]));
        assert_eq!(route.cost, 1.0);
    }

    #[test]
    fn test_costs_change_between_calls() {
        let g = graph_from(&[1, 2, 3, 4], &[(1, 2), (2, 4), (1, 3), (3, 4)]);

        let before = costs(&[(2, 1.0), (3, 10.0), (4, 1.0)]);
        let route = find_route(&g, EdgeId::from(1), EdgeId::from(4), &before).unwrap();
        assert_eq!(route.edges, edges(&[1, 2, 4]));

        let after = costs(&[(2, 50.0), (3, 10.0), (4, 1.0)]);
        let route = find_route(&g, EdgeId::from(1), EdgeId::from(4), &after).unwrap();
        assert_eq!(route.edges, edges(&[1, 3, 4]));
        assert_eq!(route.cost, 11.0);
    }

    #[test]
    fn test_idempotent() {
        // Two routes of equal cost
        let g = graph_from(&[1, 2, 3, 4], &[(1, 2), (2, 4), (1, 3), (3, 4)]);
        let c = costs(&[(2, 1.0), (3, 1.0), (4, 1.0)]);

        let first = find_route(&g, EdgeId::from(1), EdgeId::from(4), &c).unwrap();
        let second = find_route(&g, EdgeId::from(1), EdgeId::from(4), &c).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cost, 2.0);
    }

    #[test]
    fn test_same_source_and_destination() {
        let g = graph_from(&[1, 2], &[(1, 2), (2, 1)]);
        let route = find_route(&g, EdgeId::from(1), EdgeId::from(1), &costs(&[])).unwrap();
        assert_eq!(route.edges, edges(&[1]));
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_unreachable() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (3, 1)]);
        let c = costs(&[(1, 1.0), (2, 1.0), (3, 1.0)]);

        assert_eq!(
            find_route(&g, EdgeId::from(1), EdgeId::from(3), &c),
            Err(RouteError::Unreachable {
                from: EdgeId::from(1),
                to: EdgeId::from(3),
            })
        );
    }

    #[test]
    fn test_invalid_reference() {
        let g = graph_from(&[1, 2], &[(1, 2)]);
        let c = costs(&[(2, 1.0)]);

        assert_eq!(
            find_route(&g, EdgeId::from(-1), EdgeId::from(2), &c),
            Err(RouteError::InvalidReference(EdgeId::from(-1)))
        );
        assert_eq!(
            find_route(&g, EdgeId::from(1), EdgeId::from(3), &c),
            Err(RouteError::InvalidReference(EdgeId::from(3)))
        );
    }

    #[test]
    fn test_missing_cost() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let c = costs(&[(2, 1.0)]);

        assert_eq!(
            find_route(&g, EdgeId::from(1), EdgeId::from(3), &c),
            Err(RouteError::MissingCost(EdgeId::from(3)))
        );
    }

    #[test]
    fn test_invalid_cost() {
        let g = graph_from(&[1, 2], &[(1, 2)]);

        assert_eq!(
            find_route(&g, EdgeId::from(1), EdgeId::from(2), &costs(&[(2, -1.0)])),
            Err(RouteError::InvalidCost(EdgeId::from(2), -1.0))
        );
        assert!(matches!(
            find_route(&g, EdgeId::from(1), EdgeId::from(2), &costs(&[(2, f32::INFINITY)])),
            Err(RouteError::InvalidCost(_, _))
        ));
    }

    #[test]
    fn test_duplicate_connections() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (1, 2), (2, 3), (2, 3)]);
        let c = costs(&[(2, 2.0), (3, 3.0)]);

        let route = find_route(&g, EdgeId::from(1), EdgeId::from(3), &c).unwrap();
        assert_eq!(route.edges, edges(&[1, 2, 3]));
        assert_eq!(route.cost, 5.0);
    }

    #[test]
    fn test_costs_beyond_f32_range() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let c = costs(&[(2, f32::MAX), (3, f32::MAX)]);

        let route = find_route(&g, EdgeId::from(1), EdgeId::from(3), &c).unwrap();
        assert_eq!(route.edges, edges(&[1, 2, 3]));
        assert_eq!(route.cost, 2.0 * f64::from(f32::MAX));
    }

    #[test]
    fn test_btree_costs() {
        let g = graph_from(&[1, -1, 2], &[(1, 2), (-1, 2)]);
        let c: BTreeMap<EdgeId, f32> = BTreeMap::from_iter([(EdgeId::from(2), 4.5)]);

        let route = find_route(&g, EdgeId::from(-1), EdgeId::from(2), &c).unwrap();
        assert_eq!(route.edges, edges(&[-1, 2]));
        assert_eq!(route.to_string(), "-1 2");
    }
}
