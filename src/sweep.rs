// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::{EdgeId, RoadGraph};

/// Error conditions which may occur during [farthest_edge].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SweepError {
    /// The source edge doesn't exist in a graph.
    #[error("invalid edge: {0}")]
    InvalidReference(EdgeId),
}

/// Result of [farthest_edge].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarthestEdge {
    /// The reached edge with the greatest hop distance from the source.
    pub edge: EdgeId,

    /// Number of connections between the source and [FarthestEdge::edge].
    pub distance: usize,

    /// The accumulator passed to [farthest_edge], extended with the source
    /// and every edge the traversal went through.
    pub visited: HashSet<EdgeId>,
}

/// Two distant edges of a graph, as returned by [estimate_diameter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diameter {
    pub source: EdgeId,
    pub destination: EdgeId,

    /// Number of connections between the two edges.
    pub distance: usize,
}

/// Explores all edges reachable from `source` with a depth-first traversal,
/// and returns the one with the greatest hop distance.
///
/// Distances are assigned when an edge is first discovered, so on graphs with
/// cycles they are not necessarily the shortest ones. Both directions of a road
/// are one physical segment: discovering an edge also marks its
/// [reverse](EdgeId::reversed) as reached, and the reverse direction is never
/// traversed afterwards.
///
/// Only traversed edges are candidates for the farthest edge; a reverse
/// direction which was merely marked as reached never is. Returning such an
/// edge would start the second sweep of [estimate_diameter] at the wrong end of
/// its segment, and the estimate would then depend on the seed.
///
/// Ties are broken by the order of edges in the graph. A source without
/// successors is its own farthest edge, at distance 0.
///
/// `visited` is an accumulator for sweeps over the whole graph; it is returned
/// in [FarthestEdge::visited] together with the source and all newly traversed edges.
pub fn farthest_edge(
    g: &RoadGraph,
    source: EdgeId,
    visited: HashSet<EdgeId>,
) -> Result<FarthestEdge, SweepError> {
    if g.contains(source) {
        Ok(probe(g, source, visited))
    } else {
        Err(SweepError::InvalidReference(source))
    }
}

fn probe(g: &RoadGraph, source: EdgeId, mut visited: HashSet<EdgeId>) -> FarthestEdge {
    let mut distances: HashMap<EdgeId, usize> = HashMap::default();
    let mut reached: HashSet<EdgeId> = HashSet::default();
    let mut stack: Vec<(EdgeId, usize)> = vec![(source, 0)];

    distances.insert(source, 0);
    reached.insert(source);
    visited.insert(source);

    while let Some((edge, distance)) = stack.pop() {
        for &next in g.successors(edge) {
            if !reached.insert(next) {
                continue;
            }
            reached.insert(g.reverse(next));

            distances.insert(next, distance + 1);
            visited.insert(next);
            stack.push((next, distance + 1));
        }
    }

    let (edge, distance) = g
        .iter()
        .filter_map(|e| distances.get(&e).map(|&d| (e, d)))
        .fold((source, 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    FarthestEdge {
        edge,
        distance,
        visited,
    }
}

/// Approximates the two most distant edges of the graph with the
/// double-sweep heuristic.
///
/// Every edge not yet traversed by an earlier sweep seeds a [farthest_edge]
/// search, whose result `s` is then used to start a second, independent search
/// from the reverse of `s`. The pair with the greatest distance found by the second
/// searches is returned. On a tree-like network this is usually the true diameter;
/// in general it's only a lower bound.
///
/// If `s` has no reverse direction in the graph (one-way roads), the first search
/// is used as the candidate instead.
///
/// Returns `None` for an empty graph.
pub fn estimate_diameter(g: &RoadGraph) -> Option<Diameter> {
    let mut visited: HashSet<EdgeId> = HashSet::default();
    let mut best: Option<Diameter> = None;

    for seed in g.iter() {
        if visited.contains(&seed) {
            continue;
        }

        let forward = probe(g, seed, visited);
        visited = forward.visited;

        let reverse = g.reverse(forward.edge);
        let candidate = if g.contains(reverse) {
            let backward = probe(g, reverse, HashSet::default());
            Diameter {
                source: forward.edge,
                destination: backward.edge,
                distance: backward.distance,
            }
        } else {
            Diameter {
                source: seed,
                destination: forward.edge,
                distance: forward.distance,
            }
        };

        log::debug!(
            "seed: {}, source: {}, destination: {}, distance: {}, visited: {}",
            seed,
            candidate.source,
            candidate.destination,
            candidate.distance,
            visited.len(),
        );

        if best.map_or(true, |b| candidate.distance > b.distance) {
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::graph_from;

    const ONE_WAY_CHAIN: &[(i64, i64)] = &[(1, 2), (2, 3), (3, 4)];

    /// 1 -> 2 -> 3 -> 4 and -4 -> -3 -> -2 -> -1
    const TWO_WAY_CHAIN: &[(i64, i64)] = &[
        (1, 2),
        (2, 3),
        (3, 4),
        (-4, -3),
        (-3, -2),
        (-2, -1),
    ];

    fn rotations(edges: &[i64]) -> Vec<Vec<i64>> {
        (0..edges.len())
            .map(|i| {
                let mut rotated = edges.to_vec();
                rotated.rotate_left(i);
                rotated
            })
            .collect()
    }

    #[test]
    fn test_farthest_edge_chain() {
        let g = graph_from(&[1, 2, 3, 4], ONE_WAY_CHAIN);
        let result = farthest_edge(&g, EdgeId::from(1), HashSet::default()).unwrap();

        assert_eq!(result.edge, EdgeId::from(4));
        assert_eq!(result.distance, 3);
        assert_eq!(
            result.visited,
            HashSet::from_iter([1, 2, 3, 4].map(EdgeId::from))
        );
    }

    #[test]
    fn test_farthest_edge_two_way_chain() {
        let g = graph_from(&[1, -1, 2, -2, 3, -3, 4, -4], TWO_WAY_CHAIN);
        let result = farthest_edge(&g, EdgeId::from(2), HashSet::default()).unwrap();

        // -3 and -4 are reached through 3 and 4, but never traversed
        assert_eq!(result.edge, EdgeId::from(4));
        assert_eq!(result.distance, 2);
        assert_eq!(
            result.visited,
            HashSet::from_iter([2, 3, 4].map(EdgeId::from))
        );
    }

    #[test]
    fn test_farthest_edge_skips_reverse_direction() {
        // 3 -> -2 is a u-turn back onto the segment of 2
        let g = graph_from(&[1, -1, 2, -2, 3], &[(1, 2), (2, 3), (3, -2), (-2, -1)]);
        let result = farthest_edge(&g, EdgeId::from(1), HashSet::default()).unwrap();

        assert_eq!(result.edge, EdgeId::from(3));
        assert_eq!(result.distance, 2);
        assert_eq!(
            result.visited,
            HashSet::from_iter([1, 2, 3].map(EdgeId::from))
        );
    }

    #[test]
    fn test_farthest_edge_no_successors() {
        let g = graph_from(&[1, 2, 3], &[(2, 3)]);
        let result = farthest_edge(&g, EdgeId::from(1), HashSet::default()).unwrap();

        assert_eq!(result.edge, EdgeId::from(1));
        assert_eq!(result.distance, 0);
        assert_eq!(result.visited, HashSet::from_iter([EdgeId::from(1)]));
    }

    #[test]
    fn test_farthest_edge_cycle_back_to_source() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let result = farthest_edge(&g, EdgeId::from(1), HashSet::default()).unwrap();

        assert_eq!(result.edge, EdgeId::from(3));
        assert_eq!(result.distance, 2);
    }

    #[test]
    fn test_farthest_edge_keeps_accumulator() {
        let g = graph_from(&[1, 2, 3], &[(1, 2)]);
        let visited = HashSet::from_iter([EdgeId::from(3)]);
        let result = farthest_edge(&g, EdgeId::from(1), visited).unwrap();

        assert_eq!(
            result.visited,
            HashSet::from_iter([1, 2, 3].map(EdgeId::from))
        );
    }

    #[test]
    fn test_farthest_edge_duplicate_connections() {
        let g = graph_from(&[1, 2, 3], &[(1, 2), (1, 2), (2, 3), (2, 3)]);
        let result = farthest_edge(&g, EdgeId::from(1), HashSet::default()).unwrap();

        assert_eq!(result.edge, EdgeId::from(3));
        assert_eq!(result.distance, 2);
    }

    #[test]
    fn test_farthest_edge_invalid_reference() {
        let g = graph_from(&[1], &[]);
        assert_eq!(
            farthest_edge(&g, EdgeId::from(-1), HashSet::default()),
            Err(SweepError::InvalidReference(EdgeId::from(-1)))
        );
    }

    #[test]
    fn test_diameter_two_way_chain() {
        for edges in rotations(&[1, -1, 2, -2, 3, -3, 4, -4]) {
            let g = graph_from(&edges, TWO_WAY_CHAIN);
            let d = estimate_diameter(&g).unwrap();

            assert_eq!(d.distance, 3, "edge order: {:?}", edges);

            // Endpoints are the two ends of the chain, in any direction
            let mut ends = [d.source.magnitude(), d.destination.magnitude()];
            ends.sort();
            assert_eq!(ends, [1, 4], "edge order: {:?}", edges);
        }
    }

    #[test]
    fn test_diameter_one_way_chain() {
        for edges in rotations(&[1, 2, 3, 4]) {
            let g = graph_from(&edges, ONE_WAY_CHAIN);
            let d = estimate_diameter(&g).unwrap();

            assert_eq!(
                d,
                Diameter {
                    source: EdgeId::from(1),
                    destination: EdgeId::from(4),
                    distance: 3,
                },
                "edge order: {:?}",
                edges
            );
        }
    }

    #[test]
    fn test_diameter_disconnected() {
        // 1 -> 2 and 3 -> 4 -> 5
        let g = graph_from(&[1, 2, 3, 4, 5], &[(1, 2), (3, 4), (4, 5)]);
        let d = estimate_diameter(&g).unwrap();

        assert_eq!(d.source, EdgeId::from(3));
        assert_eq!(d.destination, EdgeId::from(5));
        assert_eq!(d.distance, 2);
    }

    #[test]
    fn test_diameter_empty() {
        let g = graph_from(&[], &[]);
        assert_eq!(estimate_diameter(&g), None);
    }

    #[test]
    fn test_diameter_isolated_edge() {
        let g = graph_from(&[7], &[]);
        assert_eq!(
            estimate_diameter(&g),
            Some(Diameter {
                source: EdgeId::from(7),
                destination: EdgeId::from(7),
                distance: 0,
            })
        );
    }
}
