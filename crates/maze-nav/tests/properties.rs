use std::collections::BTreeSet;

use maze_nav::{
    plan_shortest_path, Coord, Heading, MazeGraph, Micromouse, MouseConfig, MouseError, NodeId,
    Phase, Termination,
};
use maze_sim::{Maze, SimMouse};
use proptest::prelude::*;

/// Cells reachable from the start through open walls.
fn reachable(maze: &Maze) -> BTreeSet<Coord> {
    let mut seen = BTreeSet::from([Coord::ORIGIN]);
    let mut frontier = vec![Coord::ORIGIN];
    while let Some(cell) = frontier.pop() {
        for heading in Heading::ALL {
            let next = cell.step(heading);
            if !maze.has_wall(cell, heading) && seen.insert(next) {
                frontier.push(next);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn carved_mazes_are_explored_and_solved(
        width in 2u32..9,
        height in 2u32..9,
        seed in any::<u64>(),
        openings in 0usize..12,
    ) {
        let maze = Maze::carve(width, height, seed, openings);
        let goal = maze.goals().next().expect("carved goal");
        let cells = reachable(&maze);
        let mut mouse = SimMouse::new(maze);
        let mut mm = Micromouse::new(MouseConfig::default());

        while mm.phase() == Phase::Exploring {
            mm.tick(&mut mouse).expect("explore tick");
            let graph = mm.graph();
            prop_assert!(graph.is_connected());
            let coords: BTreeSet<Coord> = graph.nodes().map(|(_, n)| n.coord()).collect();
            prop_assert_eq!(coords.len(), graph.node_count());
            prop_assert!(cells.contains(&mm.tracker().position()));
        }

        for (_, node) in mm.graph().nodes() {
            prop_assert!(node.is_fully_explored());
        }

        let explore_moves = mouse.moves();
        let termination = mm.run_to_end(&mut mouse).expect("run");
        prop_assert_eq!(termination, Termination::Completed);
        prop_assert_eq!(mouse.position(), goal);
        prop_assert_eq!(mouse.bumps(), 0);

        let plan = mm.plan().expect("plan");
        prop_assert_eq!(mouse.moves() - explore_moves, u64::from(plan.distance));

        let bound = 16 * u64::from(width * height) + 16;
        prop_assert!(mm.ticks() <= bound, "{} ticks for {}x{}", mm.ticks(), width, height);
    }

    #[test]
    fn planner_matches_exhaustive_search(
        nodes in 2usize..9,
        raw_edges in prop::collection::vec((0usize..9, 0usize..9, 1u32..20), 0..20),
        goal in 0usize..9,
    ) {
        let goal = goal % nodes;
        let mut graph = MazeGraph::new();
        for i in 0..nodes {
            graph.create_node(Coord::new(i as i32, 0)).expect("distinct coords");
        }
        let mut edges = Vec::new();
        for (a, b, length) in raw_edges {
            let (a, b) = (a % nodes, b % nodes);
            if a == b {
                continue;
            }
            graph
                .link(NodeId(a as u32), Heading::North, NodeId(b as u32), Heading::South, length)
                .expect("link");
            edges.push((a, b, length));
        }

        let expected = shortest_by_enumeration(nodes, &edges, 0, goal);
        let planned = plan_shortest_path(&mut graph, NodeId::START, NodeId(goal as u32));

        match expected {
            Some(distance) => {
                let plan = planned.expect("reachable goal");
                prop_assert_eq!(plan.distance, distance);
                prop_assert_eq!(
                    graph.node(NodeId(goal as u32)).and_then(|n| n.distance()),
                    Some(distance)
                );
                prop_assert!(plan.len() < nodes);
            }
            None => {
                prop_assert_eq!(
                    planned,
                    Err(MouseError::DisconnectedGoal { goal: Coord::new(goal as i32, 0) })
                );
            }
        }
    }
}

/// Minimum over every simple path; fine for graphs this small.
fn shortest_by_enumeration(
    nodes: usize,
    edges: &[(usize, usize, u32)],
    start: usize,
    goal: usize,
) -> Option<u32> {
    fn walk(
        at: usize,
        goal: usize,
        edges: &[(usize, usize, u32)],
        visited: &mut Vec<bool>,
        so_far: u32,
        best: &mut Option<u32>,
    ) {
        if at == goal {
            *best = Some(best.map_or(so_far, |b| b.min(so_far)));
            return;
        }
        for &(a, b, length) in edges {
            let next = if a == at {
                b
            } else if b == at {
                a
            } else {
                continue;
            };
            if visited[next] {
                continue;
            }
            visited[next] = true;
            walk(next, goal, edges, visited, so_far + length, best);
            visited[next] = false;
        }
    }

    let mut visited = vec![false; nodes];
    visited[start] = true;
    let mut best = None;
    walk(start, goal, edges, &mut visited, 0, &mut best);
    best
}
