//! Self-play battle CLI
//!
//! Pits two heuristic players against each other for a number of games
//! and reports wins per color, draws and timing.

use std::time::Instant;

use anyhow::Context;
use arena::{self_play, SelfPlayConfig, Stone, TargetLength};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Connect4,
    Gomoku,
    Connect6,
}

impl Variant {
    fn target(self) -> TargetLength {
        match self {
            Variant::Connect4 => TargetLength::CONNECT_FOUR,
            Variant::Gomoku => TargetLength::GOMOKU,
            Variant::Connect6 => TargetLength::CONNECT_SIX,
        }
    }
}

#[derive(Parser)]
#[command(about = "Heuristic self-play for Connect-4, Gomoku and Connect-6")]
struct Args {
    /// Which N-in-a-row variant to play
    #[arg(long, value_enum, default_value = "gomoku")]
    game: Variant,
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 10)]
    games: u32,
    /// Board side length
    #[arg(long, default_value_t = arena::DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Seed for reproducible runs; random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final board of every game
    #[arg(long)]
    show_board: bool,
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Debug, Default)]
struct Totals {
    black: u32,
    white: u32,
    draws: u32,
    moves: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let config = SelfPlayConfig {
        board_size: args.size,
        target: args.game.target(),
    };
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    info!(
        game = ?args.game,
        size = args.size,
        games = args.games,
        "starting self-play"
    );

    let start = Instant::now();
    let mut totals = Totals::default();
    for i in 0..args.games {
        let outcome =
            self_play(config, &mut rng).with_context(|| format!("game {} failed", i + 1))?;
        match outcome.winner {
            Some(Stone::Black) => totals.black += 1,
            Some(_) => totals.white += 1,
            None => totals.draws += 1,
        }
        totals.moves += outcome.moves;
        debug!(game = i + 1, winner = ?outcome.winner, moves = outcome.moves, "game finished");

        if args.show_board {
            println!("Game {} ({:?}, {} moves):", i + 1, outcome.winner, outcome.moves);
            println!("{}", outcome.engine.grid());
        }
    }
    let elapsed = start.elapsed();

    println!("{} games of {} on {}x{}", args.games, config.target, args.size, args.size);
    println!("  Black wins: {}", totals.black);
    println!("  White wins: {}", totals.white);
    println!("  Draws:      {}", totals.draws);
    if args.games > 0 {
        println!(
            "  Avg moves:  {:.1}",
            totals.moves as f64 / f64::from(args.games)
        );
    }
    println!("  Time:       {}ms", elapsed.as_millis());

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
