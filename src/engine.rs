//! Core state model for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Puzzle`: An immutable square grid of tiles with exactly one empty cell.
//! - `Direction`: The four ways the empty cell can slide, in the fixed order used
//!   to generate successors.
//! - `PuzzleError`: Reasons a grid is rejected when constructing a `Puzzle`.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;

/// The sentinel value stored in the empty cell.
pub const EMPTY: u8 = 0;

/// Board side lengths that a `Puzzle` may have (8-, 15- and 24-puzzles).
pub const SUPPORTED_SIDES: [usize; 3] = [3, 4, 5];

/// Returns the side length for a board holding `count` cells, if supported.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::side_for_count;
/// assert_eq!(side_for_count(16), Some(4));
/// assert_eq!(side_for_count(12), None);
/// ```
pub fn side_for_count(count: usize) -> Option<usize> {
    SUPPORTED_SIDES
        .iter()
        .copied()
        .find(|side| side * side == count)
}

/// Reasons a tile grid cannot be turned into a `Puzzle`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("unsupported tile count {count}; expected 9, 16 or 25")]
    InvalidTileCount { count: usize },

    #[error("row {row} has {len} tiles, expected {side}")]
    RaggedRow { row: usize, len: usize, side: usize },

    #[error("tile {value} is out of range for a {side}x{side} board")]
    TileOutOfRange { value: u8, side: usize },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },
}

/// One of the four axis-aligned slides of the empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in successor-generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Row and column offset applied to the empty cell.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// The direction that undoes this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// A sliding-tile puzzle configuration.
///
/// The grid is stored row-major. Every value in `0..side*side` appears exactly
/// once and `EMPTY` marks the hole. A `Puzzle` never changes after construction;
/// moves produce new values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Puzzle {
    side: usize,
    tiles: Box<[u8]>,
    empty: usize,
}

impl Puzzle {
    /// Creates a puzzle from row-major tiles.
    ///
    /// # Arguments
    /// * `tiles`: Row-major cell values; its length must be 9, 16 or 25.
    ///
    /// # Returns
    /// * `Ok(Puzzle)` when the tiles form a permutation of `0..tiles.len()`.
    /// * `Err(PuzzleError)` when the count is unsupported, a value is out of range,
    ///   or a value repeats.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Puzzle;
    /// let puzzle = Puzzle::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// assert_eq!(puzzle.side(), 3);
    /// assert_eq!(puzzle.empty_position(), (2, 2));
    ///
    /// assert!(Puzzle::new(vec![1, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
    /// ```
    pub fn new(tiles: Vec<u8>) -> Result<Self, PuzzleError> {
        let count = tiles.len();
        let side = side_for_count(count).ok_or(PuzzleError::InvalidTileCount { count })?;

        let mut seen = vec![false; count];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(PuzzleError::TileOutOfRange { value, side })?;
            if *slot {
                return Err(PuzzleError::DuplicateTile { value });
            }
            *slot = true;
        }

        // A full permutation of 0..count always contains EMPTY.
        let empty = tiles
            .iter()
            .position(|&v| v == EMPTY)
            .ok_or(PuzzleError::InvalidTileCount { count })?;

        Ok(Puzzle {
            side,
            tiles: tiles.into_boxed_slice(),
            empty,
        })
    }

    /// Creates a puzzle from a slice of rows.
    ///
    /// Every row must be as long as there are rows.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, PuzzleError> {
        let side = rows.len();
        let mut tiles = Vec::with_capacity(side * side);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != side {
                return Err(PuzzleError::RaggedRow {
                    row,
                    len: cells.len(),
                    side,
                });
            }
            tiles.extend_from_slice(cells);
        }
        Puzzle::new(tiles)
    }

    /// The goal layout `1, 2, ..., n²-1` followed by the empty cell.
    ///
    /// Sides outside `SUPPORTED_SIDES` are rejected before anything is allocated.
    pub fn ordered(side: usize) -> Result<Self, PuzzleError> {
        if !SUPPORTED_SIDES.contains(&side) {
            return Err(PuzzleError::InvalidTileCount {
                count: side.saturating_mul(side),
            });
        }
        let count = side * side;
        let mut tiles: Vec<u8> = (1..count).map(|v| v as u8).collect();
        tiles.push(EMPTY);
        Puzzle::new(tiles)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major view of all cells.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not smaller than `side()`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        assert!(r < self.side && c < self.side, "cell ({r}, {c}) is off the board");
        self.tiles[r * self.side + c]
    }

    /// Row and column of the empty cell.
    pub fn empty_position(&self) -> (usize, usize) {
        (self.empty / self.side, self.empty % self.side)
    }

    /// Row and column holding `value`, or `None` when `value` is not on the board.
    pub fn position_of(&self, value: u8) -> Option<(usize, usize)> {
        self.tiles
            .iter()
            .position(|&v| v == value)
            .map(|i| (i / self.side, i % self.side))
    }

    /// Slides the empty cell one step in `direction`.
    ///
    /// # Returns
    /// The resulting configuration, or `None` if the empty cell sits on the edge
    /// it would have to cross.
    pub fn slide(&self, direction: Direction) -> Option<Puzzle> {
        let (r, c) = self.empty_position();
        let (dr, dc) = direction.offset();
        let nr = r.checked_add_signed(dr).filter(|&nr| nr < self.side)?;
        let nc = c.checked_add_signed(dc).filter(|&nc| nc < self.side)?;

        let target = nr * self.side + nc;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.empty, target);
        Some(Puzzle {
            side: self.side,
            tiles,
            empty: target,
        })
    }

    /// Returns every configuration reachable with a single slide.
    ///
    /// The order is always left, right, up, down (skipping slides that would leave
    /// the board), so equal inputs yield equal successor lists. Corners have 2
    /// successors, edges 3 and inner cells 4.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Puzzle;
    /// let corner = Puzzle::from_rows(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap();
    /// let next = corner.successors();
    /// assert_eq!(next.len(), 2);
    /// assert_eq!(next[0].tiles(), &[1, 0, 2, 3, 4, 5, 6, 7, 8]);
    /// ```
    pub fn successors(&self) -> Vec<Puzzle> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.slide(direction))
            .collect()
    }

    /// Tells whether `goal` lies in the same half of the state space as `self`.
    ///
    /// A slide is a transposition that also moves the empty cell by one, so the
    /// parity of the permutation between the two boards must match the parity of
    /// the empty cell's Manhattan displacement. The search engine never calls this;
    /// unsolvable inputs simply exhaust the frontier.
    pub fn is_solvable_towards(&self, goal: &Puzzle) -> bool {
        if self.side != goal.side {
            return false;
        }

        let mut goal_index = vec![0usize; self.tiles.len()];
        for (i, &v) in goal.tiles.iter().enumerate() {
            goal_index[v as usize] = i;
        }
        let permutation: Vec<usize> = self.tiles.iter().map(|&v| goal_index[v as usize]).collect();

        let mut seen = vec![false; permutation.len()];
        let mut cycles = 0;
        for start in 0..permutation.len() {
            if seen[start] {
                continue;
            }
            cycles += 1;
            let mut i = start;
            while !seen[i] {
                seen[i] = true;
                i = permutation[i];
            }
        }
        let permutation_parity = (permutation.len() - cycles) % 2;

        let (r1, c1) = self.empty_position();
        let (r2, c2) = goal.empty_position();
        let empty_parity = (r1.abs_diff(r2) + c1.abs_diff(c2)) % 2;

        permutation_parity == empty_parity
    }

    /// Produces a configuration `steps` random slides away from `self`.
    ///
    /// The walk never immediately undoes its previous slide, and the same `seed`
    /// always yields the same board. The result is always reachable from `self`.
    pub fn scramble(&self, steps: usize, seed: u64) -> Puzzle {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut current = self.clone();
        let mut previous: Option<Direction> = None;

        for _ in 0..steps {
            let mut candidates: Vec<(Direction, Puzzle)> = Direction::ALL
                .iter()
                .filter(|&&d| previous.map_or(true, |p| d != p.opposite()))
                .filter_map(|&d| current.slide(d).map(|next| (d, next)))
                .collect();
            // Every cell has at least two neighbours, so one survives the back-step filter.
            let (direction, next) = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            previous = Some(direction);
            current = next;
        }
        current
    }
}

impl fmt::Display for Puzzle {
    /// Formats the board as one line per row, `X` marking the empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for (r, row) in self.tiles.chunks(self.side).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if value == EMPTY {
                    write!(f, "{:>width$}", "X")?;
                } else {
                    write!(f, "{:>width$}", value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tiles: &[u8]) -> Vec<u8> {
        let mut v = tiles.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_new_rejects_bad_tile_counts() {
        assert_eq!(
            Puzzle::new(vec![0, 1, 2, 3]),
            Err(PuzzleError::InvalidTileCount { count: 4 })
        );
        assert_eq!(
            Puzzle::new((0..12).collect()),
            Err(PuzzleError::InvalidTileCount { count: 12 })
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_and_duplicates() {
        assert_eq!(
            Puzzle::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 0]),
            Err(PuzzleError::TileOutOfRange { value: 9, side: 3 })
        );
        assert_eq!(
            Puzzle::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 0]),
            Err(PuzzleError::DuplicateTile { value: 0 })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows: [&[u8]; 3] = [&[1, 2, 3], &[4, 5], &[6, 7, 8, 0]];
        assert_eq!(
            Puzzle::from_rows(&rows),
            Err(PuzzleError::RaggedRow { row: 1, len: 2, side: 3 })
        );
    }

    #[test]
    fn test_supported_sides() {
        for side in SUPPORTED_SIDES {
            let puzzle = Puzzle::ordered(side).unwrap();
            assert_eq!(puzzle.side(), side);
            assert_eq!(puzzle.empty_position(), (side - 1, side - 1));
            assert_eq!(puzzle.get_tile(0, 0), 1);
        }
    }

    #[test]
    fn test_ordered_rejects_unsupported_sides() {
        assert_eq!(
            Puzzle::ordered(2),
            Err(PuzzleError::InvalidTileCount { count: 4 })
        );
        assert_eq!(
            Puzzle::ordered(0),
            Err(PuzzleError::InvalidTileCount { count: 0 })
        );
        assert!(Puzzle::ordered(60_000).is_err());
        assert_eq!(
            Puzzle::ordered(usize::MAX),
            Err(PuzzleError::InvalidTileCount { count: usize::MAX })
        );
    }

    #[test]
    fn test_position_of() {
        let puzzle = Puzzle::from_rows(&[[1, 2, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
        assert_eq!(puzzle.position_of(4), Some((1, 2)));
        assert_eq!(puzzle.position_of(EMPTY), Some((1, 1)));
        assert_eq!(puzzle.position_of(9), None);
    }

    #[test]
    fn test_successor_order_is_left_right_up_down() {
        let center = Puzzle::from_rows(&[[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
        let next = center.successors();
        assert_eq!(next.len(), 4);
        assert_eq!(next[0].empty_position(), (1, 0));
        assert_eq!(next[1].empty_position(), (1, 2));
        assert_eq!(next[2].empty_position(), (0, 1));
        assert_eq!(next[3].empty_position(), (2, 1));
        assert_eq!(next, center.successors(), "successor order must be stable");
    }

    #[test]
    fn test_successor_counts_and_conservation() {
        // Walk the empty cell over every position of every supported board.
        for side in SUPPORTED_SIDES {
            let goal = Puzzle::ordered(side).unwrap();
            for seed in 0..40 {
                let puzzle = goal.scramble(seed as usize * 3, seed);
                let (er, ec) = puzzle.empty_position();
                let next = puzzle.successors();
                assert!((2..=4).contains(&next.len()));

                let on_row_edge = er == 0 || er == side - 1;
                let on_col_edge = ec == 0 || ec == side - 1;
                let expected = 4 - on_row_edge as usize - on_col_edge as usize;
                assert_eq!(next.len(), expected);

                for succ in &next {
                    let (sr, sc) = succ.empty_position();
                    assert_eq!(sr.abs_diff(er) + sc.abs_diff(ec), 1);
                    assert_eq!(sorted(succ.tiles()), sorted(puzzle.tiles()));
                    // The moved tile now sits where the hole was.
                    assert_eq!(succ.get_tile(er, ec), puzzle.get_tile(sr, sc));
                }
            }
        }
    }

    #[test]
    fn test_slide_off_edge_is_none() {
        let corner = Puzzle::from_rows(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap();
        assert!(corner.slide(Direction::Left).is_none());
        assert!(corner.slide(Direction::Up).is_none());
        assert!(corner.slide(Direction::Right).is_some());
        assert!(corner.slide(Direction::Down).is_some());
    }

    #[test]
    fn test_scramble_is_deterministic_and_solvable() {
        let goal = Puzzle::ordered(4).unwrap();
        let a = goal.scramble(50, 7);
        let b = goal.scramble(50, 7);
        assert_eq!(a, b);
        assert!(a.is_solvable_towards(&goal));
        assert_eq!(goal.scramble(0, 7), goal);
    }

    #[test]
    fn test_is_solvable_towards_detects_odd_permutation() {
        let goal = Puzzle::from_rows(&[[1, 2, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
        let swapped = Puzzle::from_rows(&[[2, 1, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
        assert!(goal.is_solvable_towards(&goal));
        assert!(!swapped.is_solvable_towards(&goal));

        let goal4 = Puzzle::ordered(4).unwrap();
        let mut tiles = goal4.tiles().to_vec();
        tiles.swap(13, 14);
        let swapped4 = Puzzle::new(tiles).unwrap();
        assert!(!swapped4.is_solvable_towards(&goal4));
        assert!(goal4.scramble(31, 2).is_solvable_towards(&goal4));
    }

    #[test]
    fn test_display() {
        let puzzle = Puzzle::from_rows(&[[1, 2, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
        assert_eq!(puzzle.to_string(), "1 2 3\n8 X 4\n7 6 5");

        let big = Puzzle::ordered(4).unwrap();
        assert!(big.to_string().ends_with("13 14 15  X"));
    }
}
