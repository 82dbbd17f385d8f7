//! Mill-Rust: a Nine Men's Morris engine.
//!
//! ## Usage
//!
//! - `mill-rust` - Show a demo
//! - `mill-rust play` - Play against the engine on the terminal
//! - `mill-rust selfplay` - Let the engine play itself (or a random mover)
//! - `mill-rust count` - Count positions a few plies into the game
//!
//! Set `RUST_LOG=debug` to see search statistics.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use mill_rust::board::Color;
use mill_rust::constants::{DEFAULT_DEPTH, MAX_GAME_PLIES};
use mill_rust::game::{GameSession, game_result};
use mill_rust::position::{Move, Position};
use mill_rust::search::{MoveSelector, count_positions, evaluate};

/// Mill-Rust: a Nine Men's Morris engine
#[derive(Parser)]
#[command(name = "mill-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine, reading commands from stdin
    Play {
        /// Search depth of the engine (0 looks one move ahead)
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Side played by the human
        #[arg(long, value_enum, default_value_t = Side::White)]
        human: Side,
    },
    /// Let the engine play a full game
    Selfplay {
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Stop after this many plies
        #[arg(long, default_value_t = MAX_GAME_PLIES)]
        max_plies: usize,
        /// Replace this side with a random mover
        #[arg(long, value_enum)]
        random: Option<Side>,
        /// Seed for the random mover
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Count the positions reachable from the start
    Count {
        #[arg(short, long, default_value_t = 4)]
        plies: usize,
    },
    /// Run a short demo of the engine
    Demo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { depth, human }) => {
            let mut session = GameSession::new(human.into(), MoveSelector::new(depth));
            session.run().context("reading commands from stdin")?;
        }
        Some(Commands::Selfplay {
            depth,
            max_plies,
            random,
            seed,
        }) => {
            run_selfplay(depth, max_plies, random.map(Color::from), seed)?;
        }
        Some(Commands::Count { plies }) => run_count(plies),
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_selfplay(depth: u32, max_plies: usize, random: Option<Color>, seed: u64) -> Result<()> {
    let selector = MoveSelector::new(depth);
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut pos = Position::initial();

    for ply in 1..=max_plies {
        if let Some(winner) = game_result(&pos) {
            println!("{pos}");
            println!("{winner} wins after {} plies", ply - 1);
            return Ok(());
        }

        let next = if random == Some(pos.current_color()) {
            let mut successors = pos.generate_next_states();
            let index = rng.usize(..successors.len());
            successors.swap_remove(index)
        } else {
            match selector.select(&pos) {
                Some(next) => next,
                None => bail!("no legal move for {} at ply {ply}", pos.current_color()),
            }
        };

        let description = Move::between(&pos, &next)
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "-".to_string());
        info!(
            "ply {ply}: {} plays {description} (material {})",
            pos.current_color(),
            evaluate(&next)
        );
        pos = next;
    }

    println!("{pos}");
    println!("No result after {max_plies} plies");
    Ok(())
}

fn run_count(plies: usize) {
    let counts = count_positions(&Position::initial(), plies);
    for (ply, count) in counts.iter().enumerate() {
        println!(
            "ply {:>2}: {:>10} generated {:>10} distinct",
            ply + 1,
            count.generated,
            count.distinct
        );
    }
}

fn run_demo() -> Result<()> {
    println!("Mill-Rust: Nine Men's Morris engine\n");

    let pos = Position::initial();
    println!("{pos}");
    println!("{} legal first moves\n", pos.generate_next_states().len());

    println!("=== Engine vs engine, first 6 plies ===");
    let selector = MoveSelector::new(DEFAULT_DEPTH);
    let mut pos = pos;
    for _ in 0..6 {
        let Some(next) = selector.select(&pos) else {
            bail!("engine found no move");
        };
        if let Some(mv) = Move::between(&pos, &next) {
            println!("{} plays {mv}", pos.current_color());
        }
        pos = next;
    }
    println!("\n{pos}");
    Ok(())
}
