use clap::Parser;
use log::{info, warn};
use npuzzle_solver::engine::Puzzle;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_with_options, SearchOptions, SearchOutcome, Strategy};
use std::process;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares the search strategies on scrambled boards", long_about = None)]
struct Args {
    /// Number of scrambled boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random slides applied to the goal to produce each board
    #[clap(long, default_value_t = 30)]
    steps: usize,

    /// Seed of the first board; board `i` uses `seed + i`
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Board side length (3, 4 or 5)
    #[clap(long, default_value_t = 3)]
    side: usize,

    /// Distance estimate for the informed strategies
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Per-run cap on visited configurations
    #[clap(short, long, default_value_t = 2_000_000)]
    node_limit: usize,
}

/// Per-strategy sums. Moves, visited counts and times only include solved
/// runs so the averages describe the same set of boards.
#[derive(Debug, Default)]
struct Totals {
    solved: usize,
    unsolved: usize,
    moves: u64,
    visited: u64,
    elapsed: Duration,
}

impl Totals {
    fn record(&mut self, outcome: &SearchOutcome, elapsed: Duration) {
        match outcome {
            SearchOutcome::Solved(solution) => {
                self.solved += 1;
                self.moves += u64::from(solution.depth());
                self.visited += solution.visited() as u64;
                self.elapsed += elapsed;
            }
            SearchOutcome::Exhausted { .. } | SearchOutcome::LimitReached { .. } => {
                self.unsolved += 1;
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let goal = match Puzzle::ordered(args.side) {
        Ok(goal) => goal,
        Err(e) => {
            eprintln!("Invalid board side {}: {}", args.side, e);
            process::exit(1);
        }
    };

    let strategies = Strategy::all(args.heuristic);
    let options = SearchOptions {
        node_limit: Some(args.node_limit),
    };
    let mut totals: Vec<Totals> = strategies.iter().map(|_| Totals::default()).collect();

    info!(
        "Starting strategy evaluation on {} {}x{} boards ({} scramble steps)",
        args.boards, args.side, args.side, args.steps
    );

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx as u64;
        let initial = goal.scramble(args.steps, seed);
        println!("\nBoard {} (Seed: {})\n{}", board_idx, seed, initial);

        for (strategy, total) in strategies.iter().zip(totals.iter_mut()) {
            let start = Instant::now();
            let outcome = solve_with_options(&initial, &goal, *strategy, &options);
            let elapsed = start.elapsed();
            total.record(&outcome, elapsed);

            match &outcome {
                SearchOutcome::Solved(solution) => {
                    println!(
                        "  Strategy: {:<16} Moves: {:<6} Visited: {:<9} Time: {:.4}s",
                        strategy.to_string(),
                        solution.depth(),
                        solution.visited(),
                        elapsed.as_secs_f64()
                    );
                }
                other => {
                    warn!(
                        "{} gave up on board {} (seed {}) after {} configurations",
                        strategy,
                        board_idx,
                        seed,
                        other.visited()
                    );
                    println!(
                        "  Strategy: {:<16} Unsolved after {} configurations",
                        strategy.to_string(),
                        other.visited()
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    for (strategy, total) in strategies.iter().zip(&totals) {
        if total.solved == 0 {
            println!("Strategy {:<16}: No boards solved.", strategy.to_string());
            continue;
        }
        let n = total.solved as f64;
        println!(
            "Strategy {:<16}: Solved = {}/{} ({} unsolved), Moves = {:.2}, Visited = {:.1}, Time = {:.4}s",
            strategy.to_string(),
            total.solved,
            args.boards,
            total.unsolved,
            total.moves as f64 / n,
            total.visited as f64 / n,
            total.elapsed.as_secs_f64() / n
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_ignore_unsolved_runs() {
        let goal = Puzzle::ordered(3).unwrap();
        let initial = Puzzle::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        let strategy = Strategy::BreadthFirst;
        let solved = solve_with_options(&initial, &goal, strategy, &SearchOptions::default());
        let visited = solved.visited() as u64;

        let mut total = Totals::default();
        total.record(&solved, Duration::from_millis(10));
        total.record(
            &SearchOutcome::LimitReached { visited: 2_000_000 },
            Duration::from_secs(30),
        );
        total.record(&SearchOutcome::Exhausted { visited: 181_440 }, Duration::from_secs(1));

        assert_eq!(total.solved, 1);
        assert_eq!(total.unsolved, 2);
        assert_eq!(total.moves, 1);
        assert_eq!(total.visited, visited);
        assert_eq!(total.elapsed, Duration::from_millis(10));
    }
}
