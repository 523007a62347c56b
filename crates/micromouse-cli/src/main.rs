//! Micromouse CLI.
//!
//! - `micromouse run` - explore a maze file, plan, and replay the shortest path
//! - `micromouse explore` - explore only and print the discovered graph

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use maze_nav::{Micromouse, Phase};
use maze_sim::{Maze, SimMouse};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "micromouse")]
#[command(about = "Micromouse maze explorer and solver", version)]
struct Cli {
    /// Config file (defaults to ./micromouse.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore, plan, and run the shortest path
    Run {
        /// Maze file in the ASCII wall format
        #[arg(short, long)]
        maze: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explore only and print the maze graph as JSON
    Explore {
        /// Maze file in the ASCII wall format
        #[arg(short, long)]
        maze: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct RunSummary {
    termination: String,
    ticks: u64,
    nodes: usize,
    edges: usize,
    goal: Option<(i32, i32)>,
    path_forks: Option<usize>,
    path_distance: Option<u32>,
    moves: u64,
    turns: u64,
}

impl RunSummary {
    fn collect(mm: &Micromouse, mouse: &SimMouse) -> Self {
        Self {
            termination: mm
                .termination()
                .map(|t| t.to_string())
                .unwrap_or_else(|| mm.phase().to_string()),
            ticks: mm.ticks(),
            nodes: mm.graph().node_count(),
            edges: mm.graph().edge_count(),
            goal: mm.goal_cell().map(|c| (c.x, c.y)),
            path_forks: mm.plan().map(|p| p.len()),
            path_distance: mm.plan().map(|p| p.distance),
            moves: mouse.moves(),
            turns: mouse.turns(),
        }
    }

    fn print(&self) {
        println!("Micromouse Run");
        println!("==============");
        println!();
        println!("Result:  {}", self.termination);
        println!("Ticks:   {}", self.ticks);
        println!("Graph:   {} nodes, {} edges", self.nodes, self.edges);
        match self.goal {
            Some((x, y)) => println!("Goal:    ({x}, {y})"),
            None => println!("Goal:    not found"),
        }
        if let (Some(forks), Some(distance)) = (self.path_forks, self.path_distance) {
            println!("Path:    {forks} forks, {distance} cells");
        }
        println!("Moves:   {} forward, {} turns", self.moves, self.turns);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            CliConfig::load_from_dir(&cwd)?
        }
    };

    match cli.command {
        Commands::Run { maze, json } => {
            let path = maze_path(maze, &config)?;
            run_maze(&path, &config, json)
        }
        Commands::Explore { maze } => {
            let path = maze_path(maze, &config)?;
            explore_maze(&path, &config)
        }
    }
}

fn maze_path(arg: Option<PathBuf>, config: &CliConfig) -> Result<PathBuf> {
    match arg.or_else(|| config.maze.clone()) {
        Some(path) => Ok(path),
        None => bail!("no maze given; pass --maze or set `maze` in the config"),
    }
}

fn load_maze(path: &Path) -> Result<Maze> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read maze from {}", path.display()))?;
    let maze = Maze::parse(&text)
        .with_context(|| format!("Failed to parse maze from {}", path.display()))?;
    tracing::info!(
        maze = %path.display(),
        width = maze.width(),
        height = maze.height(),
        goals = maze.goals().count(),
        "Loaded maze"
    );
    Ok(maze)
}

fn run_maze(path: &Path, config: &CliConfig, json: bool) -> Result<()> {
    let mut mouse = SimMouse::new(load_maze(path)?);
    let mut mm = Micromouse::new(config.controller);

    let outcome = mm.run_to_end(&mut mouse);
    for line in mouse.ui_lines() {
        tracing::debug!(ui = %line, "mouse display");
    }

    let summary = RunSummary::collect(&mm, &mouse);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }

    outcome.context("Run aborted")?;
    Ok(())
}

fn explore_maze(path: &Path, config: &CliConfig) -> Result<()> {
    let mut mouse = SimMouse::new(load_maze(path)?);
    let mut mm = Micromouse::new(config.controller);

    while mm.phase() == Phase::Exploring {
        mm.tick(&mut mouse).context("Exploration aborted")?;
    }
    tracing::info!(
        nodes = mm.graph().node_count(),
        edges = mm.graph().edge_count(),
        ticks = mm.ticks(),
        "Exploration finished"
    );

    println!("{}", serde_json::to_string_pretty(mm.graph())?);
    Ok(())
}
