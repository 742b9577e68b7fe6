//! Containers of nodes waiting to be expanded.
//!
//! The order in which a `Frontier` hands nodes back is what distinguishes the
//! search strategies; the traversal loop in `solver` is the same for all of them.
use crate::heuristics::GoalDistance;
use crate::tree::{NodeId, SearchTree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

/// Insertion and extraction policy over pending search nodes.
pub trait Frontier {
    /// Adds `node` to the frontier. `tree` gives access to its configuration and depth.
    fn insert(&mut self, node: NodeId, tree: &SearchTree);

    /// Removes and returns the next node to expand, or `None` when empty.
    fn extract(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out. Drives depth-first search.
#[derive(Debug, Default)]
pub struct Stack {
    nodes: Vec<NodeId>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Stack {
    fn insert(&mut self, node: NodeId, _tree: &SearchTree) {
        self.nodes.push(node);
    }

    fn extract(&mut self) -> Option<NodeId> {
        self.nodes.pop()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// First in, first out: pushed at the front, popped from the back.
/// Drives breadth-first search.
#[derive(Debug, Default)]
pub struct Queue {
    nodes: VecDeque<NodeId>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Queue {
    fn insert(&mut self, node: NodeId, _tree: &SearchTree) {
        self.nodes.push_front(node);
    }

    fn extract(&mut self) -> Option<NodeId> {
        self.nodes.pop_back()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Computes the key a node is ranked by; lower keys are expanded first.
pub trait Priority {
    type Key: Ord + Copy + fmt::Debug;

    fn priority(&self, node: NodeId, tree: &SearchTree) -> Self::Key;
}

/// Ranks by estimated remaining distance only.
#[derive(Clone, Debug)]
pub struct Greedy(pub GoalDistance);

impl Priority for Greedy {
    type Key = u32;

    fn priority(&self, node: NodeId, tree: &SearchTree) -> u32 {
        self.0.estimate(tree.puzzle(node))
    }
}

/// Ranks by moves made so far plus estimated remaining distance, then by
/// moves made so far.
///
/// Configurations are never re-queued once seen, so among nodes with equal
/// totals the shallower one must go first for the first path found to a
/// configuration to also be a shortest one.
#[derive(Clone, Debug)]
pub struct AStar(pub GoalDistance);

impl Priority for AStar {
    type Key = (u32, u32);

    fn priority(&self, node: NodeId, tree: &SearchTree) -> (u32, u32) {
        let depth = tree.depth(node);
        (depth + self.0.estimate(tree.puzzle(node)), depth)
    }
}

/// Min-priority queue of nodes.
///
/// The key is computed once, on insertion. Equal keys come out in insertion
/// order.
#[derive(Debug)]
pub struct PriorityFrontier<P: Priority> {
    priority: P,
    heap: BinaryHeap<Reverse<(P::Key, u64, NodeId)>>,
    inserted: u64,
}

pub type GreedyFrontier = PriorityFrontier<Greedy>;
pub type AStarFrontier = PriorityFrontier<AStar>;

impl<P: Priority> PriorityFrontier<P> {
    pub fn new(priority: P) -> Self {
        PriorityFrontier {
            priority,
            heap: BinaryHeap::new(),
            inserted: 0,
        }
    }

    /// Key of the node that `extract` would return next.
    pub fn peek_priority(&self) -> Option<P::Key> {
        self.heap.peek().map(|Reverse((key, _, _))| *key)
    }
}

impl<P: Priority> Frontier for PriorityFrontier<P> {
    fn insert(&mut self, node: NodeId, tree: &SearchTree) {
        let key = self.priority.priority(node, tree);
        self.heap.push(Reverse((key, self.inserted, node)));
        self.inserted += 1;
    }

    fn extract(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, node))| node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Direction, Puzzle};
    use crate::heuristics::Heuristic;

    /// A root with one child per possible slide, in successor order.
    fn fan_out() -> (SearchTree, Vec<NodeId>) {
        let start = Puzzle::from_rows(&[[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
        let mut tree = SearchTree::new(start.clone());
        let root = tree.root();
        let children = start
            .successors()
            .into_iter()
            .map(|next| tree.add_child(root, next))
            .collect();
        (tree, children)
    }

    fn drain(frontier: &mut impl Frontier) -> Vec<NodeId> {
        std::iter::from_fn(|| frontier.extract()).collect()
    }

    #[test]
    fn test_stack_is_lifo() {
        let (tree, children) = fan_out();
        let mut stack = Stack::new();
        for &child in &children {
            stack.insert(child, &tree);
        }
        assert_eq!(stack.len(), 4);
        let order = drain(&mut stack);
        assert_eq!(order, children.iter().rev().copied().collect::<Vec<_>>());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_queue_is_fifo() {
        let (tree, children) = fan_out();
        let mut queue = Queue::new();
        for &child in &children {
            queue.insert(child, &tree);
        }
        assert_eq!(drain(&mut queue), children);
        assert_eq!(queue.extract(), None);
    }

    #[test]
    fn test_greedy_pops_smallest_estimate_first() {
        let goal = Puzzle::from_rows(&[[1, 2, 3], [4, 5, 0], [6, 7, 8]]).unwrap();
        let (tree, children) = fan_out();
        let mut frontier = GreedyFrontier::new(Greedy(Heuristic::Manhattan.towards(&goal)));
        for &child in &children {
            frontier.insert(child, &tree);
        }

        assert_eq!(frontier.peek_priority(), Some(0));
        // Sliding right reaches the goal itself.
        assert_eq!(frontier.extract(), Some(children[1]));

        let mut last = 0;
        while let Some(node) = frontier.extract() {
            let key = Heuristic::Manhattan.distance(tree.puzzle(node), &goal);
            assert!(key >= last);
            last = key;
        }
    }

    #[test]
    fn test_equal_priorities_come_out_in_insertion_order() {
        let (tree, children) = fan_out();
        let goal = tree.puzzle(tree.root()).clone();
        let mut frontier = GreedyFrontier::new(Greedy(Heuristic::Manhattan.towards(&goal)));
        for &child in &children {
            frontier.insert(child, &tree);
        }
        // Every single slide away from the goal costs exactly 1.
        assert_eq!(drain(&mut frontier), children);
    }

    #[test]
    fn test_astar_adds_depth_to_estimate() {
        let start = Puzzle::from_rows(&[[1, 2, 3], [4, 0, 5], [6, 7, 8]]).unwrap();
        let goal = start.clone();
        let mut tree = SearchTree::new(start.clone());
        let shallow = tree.add_child(tree.root(), start.slide(Direction::Left).unwrap());
        let back = tree.puzzle(shallow).slide(Direction::Right).unwrap();
        // Same configuration as the root, but two moves deep.
        let deep = tree.add_child(shallow, back);

        let astar = AStar(Heuristic::Manhattan.towards(&goal));
        let greedy = Greedy(Heuristic::Manhattan.towards(&goal));
        assert_eq!(greedy.priority(shallow, &tree), 1);
        assert_eq!(astar.priority(shallow, &tree), (2, 1));
        assert_eq!(greedy.priority(deep, &tree), 0);
        assert_eq!(astar.priority(deep, &tree), (2, 2));

        // Equal totals: the shallower node wins even though it was inserted last.
        let mut frontier = AStarFrontier::new(astar);
        frontier.insert(deep, &tree);
        frontier.insert(shallow, &tree);
        assert_eq!(frontier.peek_priority(), Some((2, 1)));
        assert_eq!(frontier.extract(), Some(shallow));
        assert_eq!(frontier.extract(), Some(deep));
        assert!(frontier.is_empty());
    }
}
