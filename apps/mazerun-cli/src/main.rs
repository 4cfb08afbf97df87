use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use mazerun_common::CellCoord;
use mazerun_input::Action;
use mazerun_kernel::{Maze, MazeGenerator, SeededRng};
use mazerun_nav::PathFinder;
use mazerun_render::{AsciiRenderer, RenderView, Renderer};
use mazerun_session::{GameConfig, GameSession};
use mazerun_tools::{MazeInspector, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mazerun-cli", about = "Generate, solve and play mazes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML game config; flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MazeArgs {
    /// Cells along x
    #[arg(short = 'W', long)]
    width: Option<usize>,
    /// Cells along y
    #[arg(short = 'D', long)]
    depth: Option<usize>,
    /// RNG seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Carve a perfect maze without loop injection
    #[arg(long)]
    no_shortcuts: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a maze and print it
    Generate {
        #[command(flatten)]
        maze: MazeArgs,
        /// Mark the shortest path from start to end
        #[arg(long)]
        solve: bool,
        /// Print the maze as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the shortest path between two cells
    Path {
        #[command(flatten)]
        maze: MazeArgs,
        /// Source cell as `x,y` (default: start)
        #[arg(long, value_parser = parse_cell)]
        from: Option<CellCoord>,
        /// Destination cell as `x,y` (default: end)
        #[arg(long, value_parser = parse_cell)]
        to: Option<CellCoord>,
    },
    /// Generate many mazes and check their structural invariants
    Validate {
        #[command(flatten)]
        maze: MazeArgs,
        /// Number of consecutive seeds to check
        #[arg(short = 'n', long, default_value = "100")]
        count: u64,
    },
    /// Run a game session from a script of actions
    Play {
        /// Script file, one action per line (stdin when omitted)
        script: Option<PathBuf>,
        /// RNG seed for the session
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("mazerun-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "maze: {}x{} timer={}s growth={} max_dimension={}",
                config.width, config.depth, config.timer_secs, config.growth, config.max_dimension
            );
            println!("config:\n{}", config.to_yaml()?);
        }
        Commands::Generate { maze, solve, json } => {
            let mut maze = build_maze(&config, &maze)?;
            if solve {
                let start = maze.start();
                PathFinder::mark_to_end(&mut maze, start)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&maze)?);
            } else {
                print!("{}", AsciiRenderer::new().render(&maze, &RenderView::default()));
                println!("{}", MazeInspector::summary(&maze));
            }
        }
        Commands::Path { maze, from, to } => {
            let mut maze = build_maze(&config, &maze)?;
            let from = from.unwrap_or(maze.start());
            let to = to.unwrap_or(maze.end());
            let path = PathFinder::mark(&mut maze, from, to)?;
            print!("{}", AsciiRenderer::new().render(&maze, &RenderView::default()));
            let cells: Vec<String> = path.cells().iter().map(ToString::to_string).collect();
            println!("Path {from} -> {to}: {} hops", path.hops());
            println!("{}", cells.join(" "));
        }
        Commands::Validate { maze, count } => {
            let first = maze.seed.unwrap_or(0);
            let mut failures = 0;
            for seed in first..first.saturating_add(count) {
                let args = MazeArgs {
                    seed: Some(seed),
                    ..maze
                };
                let generated = build_maze(&config, &args)?;
                let violations = validate(&generated);
                if !violations.is_empty() {
                    failures += 1;
                    println!("seed {seed}:");
                    for violation in violations {
                        println!("  {violation}");
                    }
                }
            }
            println!("Validated {count} mazes: {failures} with violations");
            if failures > 0 {
                bail!("{failures} mazes violated invariants");
            }
        }
        Commands::Play { script, seed } => {
            let input: Box<dyn BufRead> = match &script {
                Some(path) => Box::new(BufReader::new(
                    std::fs::File::open(path)
                        .with_context(|| format!("opening script {}", path.display()))?,
                )),
                None => Box::new(std::io::stdin().lock()),
            };
            play(config, seed, input)?;
        }
    }

    Ok(())
}

fn build_maze(config: &GameConfig, args: &MazeArgs) -> anyhow::Result<Maze> {
    let mut generator = config.generator.clone();
    if args.no_shortcuts {
        generator.shortcuts.enabled = false;
    }
    let width = args.width.unwrap_or(config.width);
    let depth = args.depth.unwrap_or(config.depth);
    let seed = args
        .seed
        .unwrap_or_else(|| SeededRng::from_entropy().seed());
    Ok(MazeGenerator::new(width, depth, generator)?.generate_seeded(seed))
}

/// Script lines are actions, `wait SECS`, or `#` comments.
fn play(config: GameConfig, seed: Option<u64>, input: Box<dyn BufRead>) -> anyhow::Result<()> {
    let mut session = GameSession::new(config, seed)?;
    tracing::info!(seed = ?session.maze().seed(), "session started");
    for event in session.take_events() {
        println!("{event:?}");
    }

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(secs) = line.strip_prefix("wait ") {
            let secs: f32 = secs
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad wait `{secs}`", number + 1))?;
            if let Some(event) = session.tick(secs) {
                println!("{event:?}");
            }
            continue;
        }
        let action: Action = line
            .parse()
            .with_context(|| format!("line {}", number + 1))?;
        for event in session.handle(action)? {
            println!("{event:?}");
        }
    }

    let view = RenderView {
        player: session.navigator().player(),
    };
    print!("{}", AsciiRenderer::new().render(session.maze(), &view));
    let bonuses = session.bonuses();
    println!(
        "level={} time_left={:.1}s over={} jump_bonus={} speed_bonus={}",
        session.level(),
        session.countdown().remaining(),
        session.is_over(),
        bonuses.jump,
        bonuses.speed
    );
    Ok(())
}

fn parse_cell(s: &str) -> Result<CellCoord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(CellCoord::new(x, y))
}
