//! Single-source shortest path over the discovered maze graph.

use maze_core::{Heading, MouseError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{MazeGraph, NodeId};

/// Shortest known route from start to goal, as one exit heading per edge.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannedPath {
    pub start: NodeId,
    pub goal: NodeId,
    /// Total corridor length in forward moves.
    pub distance: u32,
    pub headings: Vec<Heading>,
}

impl PlannedPath {
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

/// Dijkstra with a linear-scan frontier; graphs here hold tens of nodes.
///
/// Writes distance and path onto every node it reaches and stops once the
/// goal is finalized. Equal distances resolve to the earliest-discovered
/// node.
pub fn plan_shortest_path(graph: &mut MazeGraph, start: NodeId, goal: NodeId) -> Result<PlannedPath> {
    graph.try_node(start)?;
    let goal_coord = graph.try_node(goal)?.coord();

    graph.clear_routes();
    graph.try_node_mut(start)?.set_route(0, Vec::new());
    let mut finalized = vec![false; graph.node_count()];

    loop {
        let mut current: Option<(NodeId, u32)> = None;
        for (id, node) in graph.nodes() {
            if finalized[id.index()] {
                continue;
            }
            let Some(distance) = node.distance() else {
                continue;
            };
            if current.map_or(true, |(_, best)| distance < best) {
                current = Some((id, distance));
            }
        }

        let Some((current, distance)) = current else {
            return Err(MouseError::DisconnectedGoal { goal: goal_coord });
        };
        finalized[current.index()] = true;

        if current == goal {
            let headings = graph.try_node(goal)?.path().to_vec();
            return Ok(PlannedPath {
                start,
                goal,
                distance,
                headings,
            });
        }

        let route = graph.try_node(current)?.path().to_vec();
        let relaxations: Vec<_> = graph
            .edges_of(current)
            .filter_map(|edge| {
                Some((
                    edge.other(current)?,
                    edge.heading_at(current)?,
                    edge.distance(),
                ))
            })
            .collect();

        for (neighbor, heading, length) in relaxations {
            let candidate = distance.saturating_add(length);
            let node = graph.try_node_mut(neighbor)?;
            if node.distance().map_or(true, |known| candidate < known) {
                let mut path = route.clone();
                path.push(heading);
                node.set_route(candidate, path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Coord;

    /// Two routes from start to goal: a direct long corridor and a
    /// shorter two-hop detour.
    fn diamond() -> (MazeGraph, NodeId, NodeId) {
        let mut graph = MazeGraph::new();
        let s = graph.create_node(Coord::new(0, 0)).unwrap();
        let a = graph.create_node(Coord::new(0, 2)).unwrap();
        let g = graph.create_node(Coord::new(3, 2)).unwrap();
        graph.link(s, Heading::East, g, Heading::South, 9).unwrap();
        graph.link(s, Heading::North, a, Heading::South, 2).unwrap();
        graph.link(a, Heading::East, g, Heading::West, 3).unwrap();
        (graph, s, g)
    }

    #[test]
    fn prefers_the_shorter_detour() {
        let (mut graph, s, g) = diamond();
        let plan = plan_shortest_path(&mut graph, s, g).unwrap();
        assert_eq!(plan.distance, 5);
        assert_eq!(plan.headings, vec![Heading::North, Heading::East]);
        assert_eq!(graph.node(g).unwrap().distance(), Some(5));
    }

    #[test]
    fn start_equal_to_goal_yields_an_empty_path() {
        let (mut graph, s, _) = diamond();
        let plan = plan_shortest_path(&mut graph, s, s).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.distance, 0);
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let (mut graph, s, _) = diamond();
        let island = graph.create_node(Coord::new(5, 5)).unwrap();
        assert_eq!(
            plan_shortest_path(&mut graph, s, island),
            Err(MouseError::DisconnectedGoal {
                goal: Coord::new(5, 5)
            })
        );
    }

    #[test]
    fn ties_resolve_to_the_first_discovered_route() {
        let mut graph = MazeGraph::new();
        let s = graph.create_node(Coord::new(0, 0)).unwrap();
        let a = graph.create_node(Coord::new(0, 2)).unwrap();
        let b = graph.create_node(Coord::new(2, 0)).unwrap();
        let g = graph.create_node(Coord::new(2, 2)).unwrap();
        graph.link(s, Heading::North, a, Heading::South, 2).unwrap();
        graph.link(s, Heading::East, b, Heading::West, 2).unwrap();
        graph.link(a, Heading::East, g, Heading::West, 2).unwrap();
        graph.link(b, Heading::North, g, Heading::South, 2).unwrap();

        let plan = plan_shortest_path(&mut graph, s, g).unwrap();
        assert_eq!(plan.headings, vec![Heading::North, Heading::East]);
    }

    #[test]
    fn replanning_starts_from_clean_routes() {
        let (mut graph, s, g) = diamond();
        let first = plan_shortest_path(&mut graph, s, g).unwrap();
        let second = plan_shortest_path(&mut graph, s, g).unwrap();
        assert_eq!(first, second);
    }
}
