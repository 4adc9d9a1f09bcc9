use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use mulligan_sim::card::{format_pool, total_cards, CardSpec};
use mulligan_sim::cli::run_session;
use mulligan_sim::config::{resolve_pool, PoolConfig};
use mulligan_sim::simulation::{run_batch, BatchConfig, MulliganEngine};
use std::io;

#[derive(Parser)]
#[command(name = "mulligan-sim")]
#[command(about = "Opening-hand mulligan simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// JSON file with a list of {cost, name, count} entries
    #[arg(short, long, global = true)]
    pool: Option<String>,

    /// Saved deck-code API response to build the pool from
    #[arg(long, global = true)]
    deck_json: Option<String>,

    /// Reject malformed card entries instead of skipping them
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mulligan (default)
    Play,

    /// Run many automated mulligans and report final-hand statistics
    Simulate {
        /// Number of rounds to simulate
        #[arg(short = 'n', long = "games", default_value = "10000")]
        num_games: usize,

        /// Exchange every opening-hand card costing at least this much
        #[arg(short, long, default_value = "4")]
        exchange_min_cost: i32,

        /// Report how often this card ends up in the final hand
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Print the resolved card pool
    Pool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = PoolConfig {
        deck_json: cli.deck_json.clone(),
        pool_file: cli.pool.clone(),
        strict: cli.strict,
    };
    let (source, pool) = match resolve_pool(&config) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    eprintln!("✓ Using {} ({} cards)", source, total_cards(&pool));

    match cli.command {
        Some(Commands::Simulate {
            num_games,
            exchange_min_cost,
            target,
        }) => {
            simulate(&pool, cli.seed, num_games, exchange_min_cost, target);
        }
        Some(Commands::Pool) => {
            print!("{}", format_pool(&pool));
        }
        Some(Commands::Play) | None => {
            play(&pool, cli.seed);
        }
    }
}

fn play(pool: &[CardSpec], seed: Option<u64>) {
    let mut engine = MulliganEngine::with_seed(pool, seed);
    println!("\n=== Mulligan Simulator ===  (seed {}, 'h' for help)\n", engine.seed());

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_session(&mut engine, stdin.lock(), stdout.lock()) {
        error!("Session ended: {}", e);
        std::process::exit(1);
    }
}

fn simulate(pool: &[CardSpec], seed: Option<u64>, num_games: usize, exchange_min_cost: i32, target: Option<String>) {
    let base_seed = seed.unwrap_or_else(rand::random);

    println!("\n=== Mulligan Batch ===\n");
    println!("Rounds: {}", num_games);
    println!("Exchange cost >= {}", exchange_min_cost);
    println!("Seed: {}", base_seed);
    println!();

    let pb = ProgressBar::new(num_games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} ({eta})") {
        pb.set_style(style);
    }

    let config = BatchConfig {
        num_games,
        exchange_min_cost,
        base_seed,
        target,
    };

    let start = std::time::Instant::now();
    let results = run_batch(pool, &config, Some(&pb));
    let elapsed = start.elapsed();
    pb.finish_and_clear();

    println!("=== Results ===\n");
    println!("Average cards exchanged: {:.2}", results.avg_exchanged());
    if let (Some(name), Some(hits)) = (&config.target, results.target_hits) {
        println!(
            "Holding '{}': {:.1}% ({}/{})",
            name,
            results.hold_rate(name) * 100.0,
            hits,
            num_games
        );
    }
    println!();

    println!("Final-hand presence:");
    for (name, count) in results.ranked() {
        let pct = count as f64 / num_games.max(1) as f64 * 100.0;
        let bar = "█".repeat((pct / 2.0) as usize);
        println!("  {:5.1}% {} {} ({})", pct, bar, name, count);
    }

    println!();
    println!(
        "Simulation completed in {:.2?} ({:.0} rounds/sec)",
        elapsed,
        num_games as f64 / elapsed.as_secs_f64()
    );
}
