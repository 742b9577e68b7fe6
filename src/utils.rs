use crate::engine::{Direction, Puzzle, PuzzleError, EMPTY};
use crate::solver::{SearchOutcome, Strategy};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Reasons puzzle text cannot be turned into a `Puzzle`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid tile '{token}' at position {position}")]
    InvalidTile { token: String, position: usize },

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("initial board has {initial} tiles but goal board has {goal}")]
    SizeMismatch { initial: usize, goal: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parses a puzzle from whitespace-separated tokens.
///
/// Tokens are tile numbers, with `X` (either case) or `0` for the empty cell.
/// Line breaks carry no meaning; the board side is derived from the token
/// count, which must be 9, 16 or 25.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::puzzle_from_str;
///
/// let puzzle = puzzle_from_str("1 2 3\n8 X 4\n7 6 5").unwrap();
/// assert_eq!(puzzle.side(), 3);
/// assert_eq!(puzzle.empty_position(), (1, 1));
///
/// assert!(puzzle_from_str("1 2 3 X").is_err());
/// assert!(puzzle_from_str("1 2 3 8 ? 4 7 6 5").is_err());
/// ```
pub fn puzzle_from_str(s: &str) -> Result<Puzzle, ParseError> {
    let tiles = s
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| match token {
            "X" | "x" => Ok(EMPTY),
            _ => token.parse::<u8>().map_err(|_| ParseError::InvalidTile {
                token: token.to_string(),
                position,
            }),
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(Puzzle::new(tiles)?)
}

/// Parses an initial and a goal board and checks that they have the same size.
pub fn parse_puzzle_pair(initial: &str, goal: &str) -> Result<(Puzzle, Puzzle), ParseError> {
    let initial = puzzle_from_str(initial)?;
    let goal = puzzle_from_str(goal)?;
    if initial.tiles().len() != goal.tiles().len() {
        return Err(ParseError::SizeMismatch {
            initial: initial.tiles().len(),
            goal: goal.tiles().len(),
        });
    }
    Ok((initial, goal))
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the puzzle stored in the file at `path`.
pub fn read_puzzle_file(path: &Path) -> Result<Puzzle, ParseError> {
    puzzle_from_str(&read_file(path)?)
}

/// Reads the initial and goal boards from two files.
pub fn read_puzzle_pair(initial: &Path, goal: &Path) -> Result<(Puzzle, Puzzle), ParseError> {
    parse_puzzle_pair(&read_file(initial)?, &read_file(goal)?)
}

/// Everything needed to render the result of one search run.
#[derive(Debug)]
pub struct SearchReport<'a> {
    pub strategy: Strategy,
    pub outcome: &'a SearchOutcome,
    pub elapsed: Option<Duration>,
}

fn direction_letter(direction: Direction) -> char {
    match direction {
        Direction::Left => 'L',
        Direction::Right => 'R',
        Direction::Up => 'U',
        Direction::Down => 'D',
    }
}

/// Writes a search report as plain text.
///
/// A solved run lists the move count, the visited count, the peak frontier
/// length, the slides of the empty cell and then every board on the path,
/// separated by blank lines. An unsolved run states why it ended and how many
/// configurations were visited.
pub fn write_search_results<W: Write>(out: &mut W, report: &SearchReport<'_>) -> io::Result<()> {
    writeln!(out, "strategy: {}", report.strategy)?;

    let solution = match report.outcome {
        SearchOutcome::Solved(solution) => {
            writeln!(out, "moves: {}", solution.depth())?;
            writeln!(out, "visited: {}", solution.visited())?;
            writeln!(out, "max frontier: {}", solution.max_frontier())?;
            Some(solution)
        }
        SearchOutcome::Exhausted { visited } => {
            writeln!(out, "no solution found")?;
            writeln!(out, "visited: {}", visited)?;
            None
        }
        SearchOutcome::LimitReached { visited } => {
            writeln!(out, "no solution found (node limit reached)")?;
            writeln!(out, "visited: {}", visited)?;
            None
        }
    };

    if let Some(elapsed) = report.elapsed {
        writeln!(out, "time: {:.4}s", elapsed.as_secs_f64())?;
    }

    if let Some(solution) = solution {
        let slides: String = solution.directions().into_iter().map(direction_letter).collect();
        writeln!(out, "slides: {}", slides)?;
        for puzzle in solution.path() {
            writeln!(out)?;
            writeln!(out, "{}", puzzle)?;
        }
    }
    Ok(())
}
