use clap::Parser;
use log::info;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_with_options, Algorithm, SearchOptions, Strategy};
use npuzzle_solver::utils::{read_puzzle_pair, write_search_results, SearchReport};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy to run
    #[clap(short, long, value_enum, default_value_t = Algorithm::Astar)]
    strategy: Algorithm,

    /// Distance estimate used by the gbf and astar strategies
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Give up after this many configurations have been visited
    #[clap(short, long)]
    node_limit: Option<usize>,

    /// Write the results to this file instead of standard output
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// File with the initial board (9, 16 or 25 tiles, `X` for the empty cell)
    initial_file: PathBuf,

    /// File with the goal board
    goal_file: PathBuf,
}

fn run(args: &Args) -> Result<(), String> {
    let (initial, goal) = read_puzzle_pair(&args.initial_file, &args.goal_file)
        .map_err(|e| format!("Invalid input: {}", e))?;
    info!(
        "Loaded {}x{} boards from {} and {}",
        initial.side(),
        initial.side(),
        args.initial_file.display(),
        args.goal_file.display()
    );

    let strategy = Strategy::new(args.strategy, args.heuristic);
    let options = SearchOptions {
        node_limit: args.node_limit,
    };

    info!("Searching with {}...", strategy);
    let start = Instant::now();
    let outcome = solve_with_options(&initial, &goal, strategy, &options);
    let elapsed = start.elapsed();
    info!(
        "Search finished in {:.4}s after visiting {} configurations",
        elapsed.as_secs_f64(),
        outcome.visited()
    );

    let report = SearchReport {
        strategy,
        outcome: &outcome,
        elapsed: Some(elapsed),
    };

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            let mut out = BufWriter::new(file);
            write_search_results(&mut out, &report).and_then(|_| out.flush())
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_search_results(&mut out, &report)
        }
    };
    written.map_err(|e| format!("Failed to write results: {}", e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(message) = run(&args) {
        eprintln!("{}", message);
        process::exit(1);
    }
}
