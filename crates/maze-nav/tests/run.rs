use maze_core::{HeadingTracker, TickContext};
use maze_nav::{
    Coord, GoalDetection, Heading, Micromouse, MouseConfig, MouseError, Phase, PlannedPath,
    Runner, NodeId, Termination,
};
use maze_sim::{Maze, SimMouse};

const LOOP_MAZE: &str = "\
+---+---+---+---+
|               |
+   +---+   +   +
|   | G         |
+   +---+---+---+
|   |   |   |   |
+   +---+---+---+
|   |   |   |   |
+---+---+---+---+
";

/// A three-cell loop hanging off the fork at (0, 2); walking it from the
/// fork means three right turns in a row.
const STREAK_MAZE: &str = "\
+---+---+
|       |
+   +   +
|       |
+   +---+
|   |   |
+   +---+
|   |   |
+---+---+
";

fn explore_and_plan(mm: &mut Micromouse, mouse: &mut SimMouse) {
    while mm.phase() != Phase::RunningShortestPath {
        mm.tick(mouse).expect("tick");
        assert!(!mm.is_finished(), "ended before running: {mm:?}");
    }
}

#[test]
fn replay_takes_the_planned_route_to_the_goal() {
    let mut mouse = SimMouse::new(Maze::parse(LOOP_MAZE).expect("parses"));
    let mut mm = Micromouse::new(MouseConfig::default());

    explore_and_plan(&mut mm, &mut mouse);
    let plan = mm.plan().cloned().expect("plan");
    assert_eq!(plan.headings, vec![Heading::North, Heading::South, Heading::West]);
    assert_eq!(plan.distance, 7);

    mouse.clear_trail();
    let moves_before = mouse.moves();
    let termination = mm.run_to_end(&mut mouse).expect("run");

    assert_eq!(termination, Termination::Completed);
    assert_eq!(
        mouse.trail(),
        &[
            Coord::new(0, 1),
            Coord::new(0, 2),
            Coord::new(0, 3),
            Coord::new(1, 3),
            Coord::new(2, 3),
            Coord::new(2, 2),
            Coord::new(1, 2),
        ]
    );
    assert_eq!(mouse.moves() - moves_before, u64::from(plan.distance));
    assert_eq!(mm.runner().map(|r| r.index()), Some(plan.len()));
    assert_eq!(mouse.bumps(), 0);
}

#[test]
fn host_messages_follow_the_phase_order() {
    let mut mouse = SimMouse::new(Maze::parse(LOOP_MAZE).expect("parses"));
    let mut mm = Micromouse::new(MouseConfig::default());

    mm.run_to_end(&mut mouse).expect("run");

    assert_eq!(
        mouse.ui_lines(),
        &[
            "Found finish!".to_string(),
            "Exploration complete. Running shortest path next.".to_string(),
            "Calculating shortest path...".to_string(),
            "Shortest path calculated!".to_string(),
            "Done.".to_string(),
        ]
    );
    assert_eq!(mouse.finish_signals(), 2);
}

#[test]
fn turn_streak_detection_finds_the_loop_fork() {
    let mut mouse = SimMouse::new(Maze::parse(STREAK_MAZE).expect("parses"));
    let config = MouseConfig::default().with_goal(GoalDetection::TurnStreak { turns: 3 });
    let mut mm = Micromouse::new(config);

    let termination = mm.run_to_end(&mut mouse).expect("run");

    assert_eq!(termination, Termination::Completed);
    assert_eq!(mm.goal_cell(), Some(Coord::new(0, 2)));
    let plan = mm.plan().expect("plan");
    assert_eq!(plan.headings, vec![Heading::North]);
    assert_eq!(plan.distance, 2);
    assert_eq!(mouse.position(), Coord::new(0, 2));
}

#[test]
fn host_signal_detection_ignores_turn_streaks() {
    let mut mouse = SimMouse::new(Maze::parse(STREAK_MAZE).expect("parses"));
    let mut mm = Micromouse::new(MouseConfig::default());

    assert_eq!(
        mm.run_to_end(&mut mouse).expect("run"),
        Termination::NoDestination
    );
    assert_eq!(mm.goal_cell(), None);
}

#[test]
fn goal_on_the_start_cell_completes_without_moving() {
    let mut mouse = SimMouse::new(Maze::open(2, 2));
    let config = MouseConfig::default().with_goal(GoalDetection::TurnStreak { turns: 3 });
    let mut mm = Micromouse::new(config);

    explore_and_plan(&mut mm, &mut mouse);
    assert!(mm.plan().expect("plan").is_empty());
    let moves = mouse.moves();

    assert_eq!(mm.run_to_end(&mut mouse), Ok(Termination::Completed));
    assert_eq!(mouse.moves(), moves);
    assert_eq!(mouse.position(), Coord::ORIGIN);
}

#[test]
fn fork_past_the_end_of_the_plan_is_reported() {
    let plan = PlannedPath {
        start: NodeId::START,
        goal: NodeId(1),
        distance: 0,
        headings: Vec::new(),
    };
    let mut runner = Runner::new(plan, Coord::new(2, 2));
    let mut tracker = HeadingTracker::new();
    let mut mouse = SimMouse::new(Maze::open(3, 3));

    assert_eq!(
        runner.step(&TickContext::new(0), &mut tracker, &mut mouse),
        Err(MouseError::PathIndexOutOfRange { index: 0, len: 0 })
    );
    assert_eq!(mouse.moves(), 0);
}
