use crate::engine::{Direction, Puzzle};
use crate::frontier::{AStar, AStarFrontier, Frontier, Greedy, GreedyFrontier, Queue, Stack};
use crate::heuristics::Heuristic;
use crate::tree::{NodeId, SearchTree};
use clap::ValueEnum;
use log::{debug, trace, warn};
use std::collections::HashSet;
use std::fmt;

/// Search algorithm as selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    /// Depth-first search.
    Dfs,
    /// Breadth-first search.
    Bfs,
    /// Greedy best-first search.
    Gbf,
    /// A* search.
    Astar,
}

/// A fully configured search strategy.
///
/// Informed strategies carry the heuristic they are guided by, so a greedy or
/// A* search can never be started without one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    DepthFirst,
    BreadthFirst,
    GreedyBestFirst(Heuristic),
    AStar(Heuristic),
}

impl Strategy {
    /// Combines an algorithm with a heuristic; uninformed algorithms ignore it.
    pub fn new(algorithm: Algorithm, heuristic: Heuristic) -> Self {
        match algorithm {
            Algorithm::Dfs => Strategy::DepthFirst,
            Algorithm::Bfs => Strategy::BreadthFirst,
            Algorithm::Gbf => Strategy::GreedyBestFirst(heuristic),
            Algorithm::Astar => Strategy::AStar(heuristic),
        }
    }

    /// All four strategies, informed ones using `heuristic`.
    pub fn all(heuristic: Heuristic) -> [Strategy; 4] {
        [
            Strategy::DepthFirst,
            Strategy::BreadthFirst,
            Strategy::GreedyBestFirst(heuristic),
            Strategy::AStar(heuristic),
        ]
    }

    pub fn heuristic(&self) -> Option<Heuristic> {
        match *self {
            Strategy::DepthFirst | Strategy::BreadthFirst => None,
            Strategy::GreedyBestFirst(h) | Strategy::AStar(h) => Some(h),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DepthFirst => write!(f, "DFS"),
            Strategy::BreadthFirst => write!(f, "BFS"),
            Strategy::GreedyBestFirst(h) => write!(f, "GBF ({})", h.name()),
            Strategy::AStar(h) => write!(f, "A* ({})", h.name()),
        }
    }
}

/// Limits applied to a single search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop once this many configurations have been visited. `None` searches
    /// until the goal is found or the frontier runs dry.
    pub node_limit: Option<usize>,
}

/// A goal node together with the tree it was found in.
#[derive(Clone, Debug)]
pub struct Solution {
    tree: SearchTree,
    node: NodeId,
    visited: usize,
    max_frontier: usize,
}

impl Solution {
    /// The node holding the goal configuration.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Number of distinct configurations ever put on the frontier, the initial
    /// one included.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Largest number of nodes waiting on the frontier at any one time.
    pub fn max_frontier(&self) -> usize {
        self.max_frontier
    }

    /// Number of slides from the initial configuration to the goal.
    pub fn depth(&self) -> u32 {
        self.tree.depth(self.node)
    }

    /// Configurations from the initial one to the goal, both included.
    pub fn path(&self) -> Vec<&Puzzle> {
        self.tree.path_puzzles(self.node)
    }

    /// The slide of the empty cell taken at each step of `path()`.
    pub fn directions(&self) -> Vec<Direction> {
        self.path()
            .windows(2)
            .filter_map(|pair| {
                let (r0, c0) = pair[0].empty_position();
                let (r1, c1) = pair[1].empty_position();
                Direction::ALL.iter().copied().find(|d| {
                    let (dr, dc) = d.offset();
                    r0.checked_add_signed(dr) == Some(r1) && c0.checked_add_signed(dc) == Some(c1)
                })
            })
            .collect()
    }

    pub fn display_lineage(&self) -> String {
        self.tree.display_lineage(self.node)
    }
}

/// How a search run ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// The goal was reached.
    Solved(Solution),
    /// Every configuration reachable from the initial one was visited without
    /// meeting the goal.
    Exhausted { visited: usize },
    /// `SearchOptions::node_limit` was reached first.
    LimitReached { visited: usize },
}

impl SearchOutcome {
    pub fn visited(&self) -> usize {
        match self {
            SearchOutcome::Solved(solution) => solution.visited(),
            SearchOutcome::Exhausted { visited } | SearchOutcome::LimitReached { visited } => {
                *visited
            }
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Searches from `initial` to `goal`, expanding nodes in the order `frontier` dictates.
///
/// Returns `None` when the goal cannot be reached.
pub fn search<F: Frontier>(initial: &Puzzle, goal: &Puzzle, frontier: F) -> Option<Solution> {
    search_with_options(initial, goal, frontier, &SearchOptions::default()).into_solution()
}

/// The traversal loop shared by every strategy.
///
/// Each configuration enters the frontier at most once: it is recorded as
/// visited the moment its node is inserted, not when it is expanded.
pub fn search_with_options<F: Frontier>(
    initial: &Puzzle,
    goal: &Puzzle,
    mut frontier: F,
    options: &SearchOptions,
) -> SearchOutcome {
    let mut tree = SearchTree::new(initial.clone());
    frontier.insert(tree.root(), &tree);

    let mut visited: HashSet<Puzzle> = HashSet::new();
    visited.insert(initial.clone());
    let mut max_frontier = frontier.len();

    while let Some(node) = frontier.extract() {
        if tree.puzzle(node) == goal {
            return SearchOutcome::Solved(Solution {
                tree,
                node,
                visited: visited.len(),
                max_frontier,
            });
        }

        if let Some(limit) = options.node_limit {
            if visited.len() >= limit {
                warn!(
                    "node limit {} reached with {} nodes still on the frontier",
                    limit,
                    frontier.len()
                );
                return SearchOutcome::LimitReached {
                    visited: visited.len(),
                };
            }
        }

        trace!("expanding node {} at depth {}", node.index(), tree.depth(node));
        for next in tree.puzzle(node).successors() {
            if visited.contains(&next) {
                continue;
            }
            visited.insert(next.clone());
            let child = tree.add_child(node, next);
            frontier.insert(child, &tree);
        }
        max_frontier = max_frontier.max(frontier.len());
    }

    SearchOutcome::Exhausted {
        visited: visited.len(),
    }
}

/// Runs `strategy` from `initial` to `goal` without limits.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Puzzle;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::solver::{solve, Strategy};
///
/// let initial = Puzzle::from_rows(&[[1, 2, 3], [4, 5, 6], [0, 7, 8]]).unwrap();
/// let goal = Puzzle::ordered(3).unwrap();
/// let solution = solve(&initial, &goal, Strategy::AStar(Heuristic::Manhattan)).unwrap();
/// assert_eq!(solution.depth(), 2);
/// assert_eq!(solution.path().len(), 3);
/// ```
pub fn solve(initial: &Puzzle, goal: &Puzzle, strategy: Strategy) -> Option<Solution> {
    solve_with_options(initial, goal, strategy, &SearchOptions::default()).into_solution()
}

/// Runs `strategy` from `initial` to `goal` under `options`.
pub fn solve_with_options(
    initial: &Puzzle,
    goal: &Puzzle,
    strategy: Strategy,
    options: &SearchOptions,
) -> SearchOutcome {
    debug!(
        "starting {} search on a {}x{} board",
        strategy,
        initial.side(),
        initial.side()
    );

    let outcome = match strategy {
        Strategy::DepthFirst => search_with_options(initial, goal, Stack::new(), options),
        Strategy::BreadthFirst => search_with_options(initial, goal, Queue::new(), options),
        Strategy::GreedyBestFirst(h) => {
            let frontier = GreedyFrontier::new(Greedy(h.towards(goal)));
            search_with_options(initial, goal, frontier, options)
        }
        Strategy::AStar(h) => {
            let frontier = AStarFrontier::new(AStar(h.towards(goal)));
            search_with_options(initial, goal, frontier, options)
        }
    };

    match &outcome {
        SearchOutcome::Solved(solution) => debug!(
            "{} found the goal at depth {} after visiting {} configurations",
            strategy,
            solution.depth(),
            solution.visited()
        ),
        SearchOutcome::Exhausted { visited } => {
            debug!("{} exhausted the frontier after {} configurations", strategy, visited)
        }
        SearchOutcome::LimitReached { visited } => {
            debug!("{} stopped at the node limit after {} configurations", strategy, visited)
        }
    }
    outcome
}

/// Depth-first search. Terminates thanks to the visited set but rarely finds a short path.
pub fn search_with_dfs(initial: &Puzzle, goal: &Puzzle) -> Option<Solution> {
    solve(initial, goal, Strategy::DepthFirst)
}

/// Breadth-first search. Always returns a path with the fewest slides.
pub fn search_with_bfs(initial: &Puzzle, goal: &Puzzle) -> Option<Solution> {
    solve(initial, goal, Strategy::BreadthFirst)
}

/// Greedy best-first search: always expands the node that looks closest to the goal.
///
/// Usually fast, but a path that looks promising early can turn out long.
pub fn search_with_gbf(initial: &Puzzle, goal: &Puzzle, heuristic: Heuristic) -> Option<Solution> {
    solve(initial, goal, Strategy::GreedyBestFirst(heuristic))
}

/// A* search: expands the node with the smallest moves-so-far plus estimate.
///
/// Returns a shortest path since both heuristics are admissible and consistent.
pub fn search_with_astar(initial: &Puzzle, goal: &Puzzle, heuristic: Heuristic) -> Option<Solution> {
    solve(initial, goal, Strategy::AStar(heuristic))
}
