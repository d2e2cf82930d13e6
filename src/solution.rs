//! The solver's output: labels and optimal moves for every reachable node.

use ego_tree::Tree;
use rustc_hash::FxHashMap;

use crate::graph::{GraphStore, NodeIndex};

/// A proven label together with the moves that achieve it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedNode<L> {
    pub label: L,
    /// Successors that achieve `label`. Empty for terminal nodes.
    pub moves: Vec<NodeIndex>,
}

/// The graph of proven-optimal moves.
///
/// It shares node indices with the move graph it was solved from. A node is present exactly
/// when its label has been proven, and nodes and edges are only ever added.
#[derive(Debug, Clone)]
pub struct OptimalMoveGraph<L> {
    nodes: FxHashMap<NodeIndex, SolvedNode<L>>,
}

impl<L> Default for OptimalMoveGraph<L> {
    fn default() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }
}

impl<L: Copy> OptimalMoveGraph<L> {
    /// Records a terminal node, labelled directly by the rule set.
    pub fn insert_terminal(&mut self, index: NodeIndex, label: L) {
        self.nodes.entry(index).or_insert(SolvedNode {
            label,
            moves: Vec::new(),
        });
    }

    /// Records a node resolved by backward induction, with its witness move.
    pub fn insert_solved(&mut self, index: NodeIndex, label: L, witness: NodeIndex) {
        self.nodes.entry(index).or_insert(SolvedNode {
            label,
            moves: vec![witness],
        });
    }

    /// Adds another optimal move to an already solved node.
    pub fn add_move(&mut self, index: NodeIndex, to: NodeIndex) {
        if let Some(solved) = self.nodes.get_mut(&index) {
            if !solved.moves.contains(&to) {
                solved.moves.push(to);
            }
        }
    }

    /// Whether `index` has a proven label.
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.nodes.contains_key(&index)
    }

    /// Returns the proven label of `index`.
    pub fn label(&self, index: NodeIndex) -> Option<L> {
        self.nodes.get(&index).map(|solved| solved.label)
    }

    /// Returns the label and optimal moves of `index`.
    pub fn get(&self, index: NodeIndex) -> Option<&SolvedNode<L>> {
        self.nodes.get(&index)
    }

    /// Optimal moves out of `index`; empty for terminal or unsolved nodes.
    pub fn moves(&self, index: NodeIndex) -> &[NodeIndex] {
        self.nodes
            .get(&index)
            .map(|solved| solved.moves.as_slice())
            .unwrap_or(&[])
    }

    /// Number of solved nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of optimal moves recorded.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|solved| solved.moves.len()).sum()
    }
}

/// A fully solved game.
///
/// Owns the move graph built from the rule set and the optimal-move graph computed from it.
/// Queries take nodes by value; nodes that were never reached return `None` or empty results.
#[derive(Debug, Clone)]
pub struct SolvedGame<N, L, G> {
    graph: G,
    optimal: OptimalMoveGraph<L>,
    root: NodeIndex,
    _node: std::marker::PhantomData<N>,
}

impl<N, L, G> SolvedGame<N, L, G>
where
    N: Clone,
    L: Copy,
    G: GraphStore<N>,
{
    pub(crate) fn new(graph: G, optimal: OptimalMoveGraph<L>, root: NodeIndex) -> Self {
        Self {
            graph,
            optimal,
            root,
            _node: std::marker::PhantomData,
        }
    }

    /// Returns the start node.
    pub fn root(&self) -> &N {
        self.graph.node(self.root)
    }

    /// Returns the proven label of the start node.
    pub fn root_label(&self) -> Option<L> {
        self.optimal.label(self.root)
    }

    /// Returns the proven label of `node`.
    pub fn label(&self, node: &N) -> Option<L> {
        self.graph
            .index_of(node)
            .and_then(|index| self.optimal.label(index))
    }

    /// Returns the first optimal successor of `node`.
    pub fn best_move(&self, node: &N) -> Option<&N> {
        self.best_moves(node).into_iter().next()
    }

    /// Returns every optimal successor recorded for `node`.
    ///
    /// Holds a single witness unless the game was solved with
    /// [`with_keep_all_solutions`](crate::solver::SolverBuilder::with_keep_all_solutions).
    pub fn best_moves(&self, node: &N) -> Vec<&N> {
        let Some(index) = self.graph.index_of(node) else {
            return Vec::new();
        };
        self.optimal
            .moves(index)
            .iter()
            .map(|&next| self.graph.node(next))
            .collect()
    }

    /// Returns all legal successors of `node`, optimal or not.
    pub fn successors(&self, node: &N) -> Vec<&N> {
        let Some(index) = self.graph.index_of(node) else {
            return Vec::new();
        };
        self.graph
            .successors(index)
            .iter()
            .map(|&next| self.graph.node(next))
            .collect()
    }

    /// Whether `node` was labelled directly by the rule set.
    pub fn is_terminal(&self, node: &N) -> bool {
        self.graph
            .index_of(node)
            .and_then(|index| self.optimal.get(index))
            .is_some_and(|solved| solved.moves.is_empty())
    }

    /// Follows the first optimal move from `node` until a terminal node.
    ///
    /// The line starts with `node` itself. Empty if `node` is unknown.
    pub fn principal_line(&self, node: &N) -> Vec<&N> {
        let Some(mut index) = self.graph.index_of(node) else {
            return Vec::new();
        };

        let mut line = vec![self.graph.node(index)];
        while let Some(&next) = self.optimal.moves(index).first() {
            line.push(self.graph.node(next));
            index = next;
        }
        line
    }

    /// Unfolds every recorded optimal move from the root into a tree.
    ///
    /// Nodes reachable along several optimal lines appear once per line.
    pub fn strategy_tree(&self) -> Tree<N> {
        let mut tree = Tree::new(self.root().clone());
        let mut stack = vec![(tree.root().id(), self.root)];

        while let Some((tree_id, index)) = stack.pop() {
            for &next in self.optimal.moves(index) {
                let Some(mut parent) = tree.get_mut(tree_id) else {
                    continue;
                };
                let child = parent.append(self.graph.node(next).clone()).id();
                stack.push((child, next));
            }
        }

        tree
    }

    /// Number of nodes in the move graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of nodes with a proven label.
    pub fn solved_count(&self) -> usize {
        self.optimal.node_count()
    }

    /// The full move graph, every legal move included.
    pub fn move_graph(&self) -> &G {
        &self.graph
    }

    /// The graph of optimal moves, sharing node indices with [`move_graph`](Self::move_graph).
    pub fn optimal_move_graph(&self) -> &OptimalMoveGraph<L> {
        &self.optimal
    }

    /// Consumes the solved game, returning the move graph and the optimal-move graph.
    pub fn into_parts(self) -> (G, OptimalMoveGraph<L>) {
        (self.graph, self.optimal)
    }
}
