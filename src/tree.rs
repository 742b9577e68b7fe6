//! Search tree recording how every enqueued configuration was reached.
//!
//! Nodes live in an arena owned by `SearchTree` and refer to each other by
//! `NodeId`. A node's parent is fixed when it is created and nodes are never
//! removed, so the structure is always a tree and is released as a whole.
use crate::engine::Puzzle;

/// Index of a node inside its `SearchTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    puzzle: Puzzle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Parent-hop count, fixed at creation because parents never change.
    depth: u32,
}

/// Arena of search nodes rooted at the initial configuration.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Creates a tree holding a single parentless node for `root`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Puzzle;
    /// use npuzzle_solver::tree::SearchTree;
    ///
    /// let tree = SearchTree::new(Puzzle::ordered(3).unwrap());
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.depth(tree.root()), 0);
    /// ```
    pub fn new(root: Puzzle) -> Self {
        SearchTree {
            nodes: vec![Node {
                puzzle: root,
                parent: None,
                children: Vec::new(),
                depth: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a new node for `puzzle` under `parent` and returns it.
    ///
    /// Calling this twice with the same configuration creates two distinct
    /// nodes; keeping configurations unique is the caller's job.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, puzzle: Puzzle) -> NodeId {
        let depth = self.node(parent).depth + 1;
        let child = NodeId(self.nodes.len());
        self.nodes.push(Node {
            puzzle,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        });
        self.nodes[parent.0].children.push(child);
        child
    }

    pub fn puzzle(&self, id: NodeId) -> &Puzzle {
        &self.node(id).puzzle
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of `id` in the order they were added.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Number of parent links between `id` and the root; the root is at depth 0.
    pub fn depth(&self, id: NodeId) -> u32 {
        self.node(id).depth
    }

    /// Follows parent links from `id` up to the node without a parent.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Nodes from the root down to `id`, both included.
    ///
    /// The result always has `depth(id) + 1` entries.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path
    }

    /// Configurations from the root down to `id`.
    pub fn path_puzzles(&self, id: NodeId) -> Vec<&Puzzle> {
        self.path(id).into_iter().map(|n| self.puzzle(n)).collect()
    }

    /// Renders every configuration on the path to `id` with its depth,
    /// tagging the root and `id` itself.
    pub fn display_lineage(&self, id: NodeId) -> String {
        let own_depth = self.depth(id);
        let mut output = String::new();
        for node in self.path(id) {
            let depth = self.depth(node);
            let postfix = if depth == 0 {
                " <-- root"
            } else if depth == own_depth {
                " <-- self"
            } else {
                ""
            };
            output.push_str(&format!("depth: {}{}\n{}\n", depth, postfix, self.puzzle(node)));
        }
        output
    }

    /// `id` followed by each of its ancestors, ending at the root.
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
