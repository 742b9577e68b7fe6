//! # N-Puzzle Solver Library
//!
//! This library explores the state space of the sliding-tile puzzle (8-, 15- and
//! 24-puzzle) to find a sequence of slides from an initial configuration to a
//! goal configuration.
//!
//! It is used by two binaries:
//! - `solve`: Reads an initial and a goal board from files, runs the chosen
//!   strategy and prints (or writes) the path found.
//! - `strategy_benchmark`: Runs every strategy on seeded scrambled boards and
//!   compares path lengths, visited counts and running times.
//!
//! All four strategies (depth-first, breadth-first, greedy best-first and A*)
//! share one traversal loop and differ only in the frontier they hand it.
//!
//! ## Modules
//! - `engine`: The board representation (`Puzzle`) and successor generation.
//! - `heuristics`: Admissible distance estimates (`Heuristic`, `GoalDistance`).
//! - `tree`: The arena search tree recording each node's parent (`SearchTree`).
//! - `frontier`: The `Frontier` trait and its stack, queue and priority implementations.
//! - `solver`: The generic search loop and the strategy bindings.
//! - `utils`: Parsing boards from text and rendering search results.

pub mod engine;
pub mod frontier;
pub mod heuristics;
pub mod solver;
pub mod tree;
pub mod utils;

// Items from sub-modules should be accessed via their full path, e.g.,
// `npuzzle_solver::solver::solve()`.
