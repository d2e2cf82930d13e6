use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Handle of a node inside a [`GraphStore`].
///
/// Indices are dense and handed out in insertion order, so the first node added is `NodeIndex(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage for the move graph.
///
/// The solver only talks to the graph through this trait, so any adjacency-list backed
/// structure can be plugged in with [`with_graph`](crate::solver::SolverBuilder::with_graph).
/// Successor and predecessor lists must keep insertion order: the solver breaks ties
/// between equally good moves by taking the first successor in that order.
pub trait GraphStore<N>: Default {
    /// Adds `node` unless an equal node is already present.
    /// Returns the node's index and whether it was newly inserted.
    fn add_node(&mut self, node: N) -> (NodeIndex, bool);

    /// Adds the directed edge `from -> to`. Both indices must come from this graph.
    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex);

    /// Looks a node up by value.
    fn index_of(&self, node: &N) -> Option<NodeIndex>;

    /// Returns the node stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not handed out by this graph.
    fn node(&self, index: NodeIndex) -> &N;

    /// Number of nodes added so far.
    fn node_count(&self) -> usize;

    /// Targets of the edges leaving `index`, in insertion order.
    fn successors(&self, index: NodeIndex) -> &[NodeIndex];

    /// Sources of the edges entering `index`, in insertion order.
    fn predecessors(&self, index: NodeIndex) -> &[NodeIndex];

    /// Whether an equal node is already stored.
    fn contains(&self, node: &N) -> bool {
        self.index_of(node).is_some()
    }

    /// Total number of edges.
    fn edge_count(&self) -> usize {
        (0..self.node_count())
            .map(|i| self.successors(NodeIndex(i)).len())
            .sum()
    }
}

/// The default [`GraphStore`]: node vector plus a hash index and both adjacency directions.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<N> {
    nodes: Vec<N>,
    index: FxHashMap<N, NodeIndex>,
    successors: Vec<Vec<NodeIndex>>,
    predecessors: Vec<Vec<NodeIndex>>,
}

impl<N> Default for AdjacencyGraph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> GraphStore<N> for AdjacencyGraph<N> {
    fn add_node(&mut self, node: N) -> (NodeIndex, bool) {
        if let Some(&existing) = self.index.get(&node) {
            return (existing, false);
        }

        let index = NodeIndex(self.nodes.len());
        self.index.insert(node.clone(), index);
        self.nodes.push(node);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        (index, true)
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.successors[from.0].push(to);
        self.predecessors[to.0].push(from);
    }

    fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    fn node(&self, index: NodeIndex) -> &N {
        &self.nodes[index.0]
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn successors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.successors[index.0]
    }

    fn predecessors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.predecessors[index.0]
    }
}
