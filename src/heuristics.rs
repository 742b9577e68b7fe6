//! Distance estimates used by the informed search strategies.
//!
//! Both estimates are admissible and consistent: a single slide changes the
//! Manhattan sum by exactly one and the misplaced count by at most one, and
//! neither counts the empty cell.
use crate::engine::{Puzzle, EMPTY};
use clap::ValueEnum;

/// Selects which estimate guides greedy best-first and A* search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Heuristic {
    /// Sum of grid distances between each tile and its goal cell.
    #[default]
    Manhattan,
    /// Number of tiles not on their goal cell.
    #[value(name = "misplaced")]
    MisplacedTiles,
}

impl Heuristic {
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::MisplacedTiles => "misplaced",
        }
    }

    /// Estimates the number of slides needed to turn `src` into `dst`.
    ///
    /// Builds the goal position table on every call. Callers estimating many
    /// boards against one goal should build a `GoalDistance` once with
    /// `towards()` and call `estimate` on it.
    ///
    /// # Panics
    /// Panics if the two boards have different side lengths.
    pub fn distance(self, src: &Puzzle, dst: &Puzzle) -> u32 {
        self.towards(dst).estimate(src)
    }

    /// Builds an estimator bound to `goal`, with the goal's tile positions
    /// looked up once instead of on every call.
    pub fn towards(self, goal: &Puzzle) -> GoalDistance {
        GoalDistance::new(self, goal)
    }
}

/// Sums, over every non-empty tile of `src`, the row and column distance to the
/// cell holding the same value in `dst`.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Puzzle;
/// use npuzzle_solver::heuristics::manhattan_distance;
///
/// let goal = Puzzle::from_rows(&[[1, 2, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
/// let start = Puzzle::from_rows(&[[0, 1, 2], [7, 8, 3], [6, 5, 4]]).unwrap();
/// assert_eq!(manhattan_distance(&goal, &goal), 0);
/// assert_eq!(manhattan_distance(&start, &goal), 8);
/// ```
pub fn manhattan_distance(src: &Puzzle, dst: &Puzzle) -> u32 {
    Heuristic::Manhattan.distance(src, dst)
}

/// Counts the non-empty tiles of `src` that are not where `dst` has them.
pub fn misplaced_tiles(src: &Puzzle, dst: &Puzzle) -> u32 {
    Heuristic::MisplacedTiles.distance(src, dst)
}

/// A heuristic paired with a precomputed value-to-cell table for one goal.
///
/// One `GoalDistance` is built per search call and dropped with it.
#[derive(Clone, Debug)]
pub struct GoalDistance {
    heuristic: Heuristic,
    side: usize,
    goal_positions: Vec<(usize, usize)>,
}

impl GoalDistance {
    pub fn new(heuristic: Heuristic, goal: &Puzzle) -> Self {
        let side = goal.side();
        let mut goal_positions = vec![(0, 0); goal.tiles().len()];
        for (i, &value) in goal.tiles().iter().enumerate() {
            goal_positions[value as usize] = (i / side, i % side);
        }
        GoalDistance {
            heuristic,
            side,
            goal_positions,
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Where `value` sits on the goal board.
    pub fn goal_position(&self, value: u8) -> Option<(usize, usize)> {
        self.goal_positions.get(value as usize).copied()
    }

    /// Estimated slides from `src` to the bound goal.
    ///
    /// # Panics
    /// Panics if `src` is not the same size as the goal.
    pub fn estimate(&self, src: &Puzzle) -> u32 {
        assert_eq!(
            src.side(),
            self.side,
            "heuristic called on a {}x{} board against a {}x{} goal",
            src.side(),
            src.side(),
            self.side,
            self.side
        );

        let cells = src
            .tiles()
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != EMPTY)
            .map(|(i, &value)| ((i / self.side, i % self.side), self.goal_positions[value as usize]));

        match self.heuristic {
            Heuristic::Manhattan => cells
                .map(|((r, c), (gr, gc))| (r.abs_diff(gr) + c.abs_diff(gc)) as u32)
                .sum(),
            Heuristic::MisplacedTiles => cells.filter(|(here, goal)| here != goal).count() as u32,
        }
    }
}
