//! Topological map of the maze: intersections and the corridors joining them.
//!
//! Nodes and edges live in arenas and refer to each other by index, so the
//! graph only ever grows and never holds dangling references.

use std::collections::{HashMap, VecDeque};

use maze_core::{Coord, Heading, MouseError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arena index of a node. Ids are assigned in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// The start cell is always the first node discovered.
    pub const START: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A discovered intersection, or the start/goal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    coord: Coord,
    explored: [bool; 4],
    distance: Option<u32>,
    path: Vec<Heading>,
    edges: Vec<EdgeId>,
}

impl Node {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            explored: [false; 4],
            distance: None,
            path: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_explored(&self, heading: Heading) -> bool {
        self.explored[heading.index()]
    }

    /// Flags only ever go from unexplored to explored.
    pub fn mark_explored(&mut self, heading: Heading) {
        self.explored[heading.index()] = true;
    }

    pub fn is_fully_explored(&self) -> bool {
        self.explored.iter().all(|e| *e)
    }

    /// Lowest unexplored exit in N, E, S, W order.
    pub fn first_unexplored(&self) -> Option<Heading> {
        Heading::ALL.into_iter().find(|h| !self.is_explored(*h))
    }

    /// Shortest known distance from start; `None` until planned (infinite).
    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    /// Exit headings taken at each node from start to here.
    pub fn path(&self) -> &[Heading] {
        &self.path
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub(crate) fn set_route(&mut self, distance: u32, path: Vec<Heading>) {
        self.distance = Some(distance);
        self.path = path;
    }

    pub(crate) fn clear_route(&mut self) {
        self.distance = None;
        self.path.clear();
    }
}

/// Undirected corridor between two distinct nodes.
///
/// Each end stores the heading that leaves its node into the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    a: NodeId,
    heading_at_a: Heading,
    b: NodeId,
    heading_at_b: Heading,
    distance: u32,
}

impl Edge {
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Corridor length in forward moves.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn heading_at(&self, node: NodeId) -> Option<Heading> {
        if node == self.a {
            Some(self.heading_at_a)
        } else if node == self.b {
            Some(self.heading_at_b)
        } else {
            None
        }
    }

    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "GraphRepr", from = "GraphRepr"))]
pub struct MazeGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_coord: HashMap<Coord, NodeId>,
}

impl MazeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub(crate) fn try_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(MouseError::UnknownNode { node: id.0 })
    }

    pub(crate) fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(MouseError::UnknownNode { node: id.0 })
    }

    pub fn find_node_at(&self, coord: Coord) -> Option<NodeId> {
        self.by_coord.get(&coord).copied()
    }

    pub fn create_node(&mut self, coord: Coord) -> Result<NodeId> {
        if self.by_coord.contains_key(&coord) {
            return Err(MouseError::DuplicateNode { at: coord });
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(coord));
        self.by_coord.insert(coord, id);
        Ok(id)
    }

    /// Join two nodes with a corridor and mark both exits explored.
    pub fn link(
        &mut self,
        a: NodeId,
        heading_at_a: Heading,
        b: NodeId,
        heading_at_b: Heading,
        distance: u32,
    ) -> Result<EdgeId> {
        if a == b {
            return Err(MouseError::SelfLink { node: a.0 });
        }
        self.try_node(a)?;
        self.try_node(b)?;

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            a,
            heading_at_a,
            b,
            heading_at_b,
            distance,
        });

        let node_a = self.try_node_mut(a)?;
        node_a.edges.push(id);
        node_a.mark_explored(heading_at_a);

        let node_b = self.try_node_mut(b)?;
        node_b.edges.push(id);
        node_b.mark_explored(heading_at_b);

        Ok(id)
    }

    /// Incident edges of `node`, in the order they were linked.
    pub fn edges_of(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.node(node)
            .map(|n| n.edges.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.edge(*id))
    }

    /// First edge on `from` that reaches `to`.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges_of(from).find(|e| e.connects(from, to))
    }

    /// Whether every node is reachable from the first (start) node.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([NodeId::START]);
        seen[0] = true;
        while let Some(current) = queue.pop_front() {
            for edge in self.edges_of(current) {
                let Some(next) = edge.other(current) else {
                    continue;
                };
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    pub(crate) fn clear_routes(&mut self) {
        for node in &mut self.nodes {
            node.clear_route();
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GraphRepr {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

#[cfg(feature = "serde")]
impl From<MazeGraph> for GraphRepr {
    fn from(graph: MazeGraph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

#[cfg(feature = "serde")]
impl From<GraphRepr> for MazeGraph {
    fn from(repr: GraphRepr) -> Self {
        let by_coord = repr
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.coord, NodeId(i as u32)))
            .collect();
        Self {
            nodes: repr.nodes,
            edges: repr.edges,
            by_coord,
        }
    }
}
