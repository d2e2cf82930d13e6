//! Breadth-first construction of the move graph.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeIndex};
use crate::random::RandomGenerator;
use crate::solution::OptimalMoveGraph;
use crate::variant::Variant;

/// Output of [`build_state_space`]: the complete move graph and its terminal nodes.
#[derive(Debug, Clone)]
pub struct StateSpace<G, L> {
    /// Every node reachable from the root, with an edge for every legal move.
    pub graph: G,
    /// Seeded with the terminal nodes and their labels.
    pub optimal: OptimalMoveGraph<L>,
    /// Terminal nodes in discovery order.
    pub terminals: Vec<NodeIndex>,
    /// Index of the start node.
    pub root: NodeIndex,
}

/// Explores every node reachable from the variant's root.
///
/// Terminal nodes are labelled on discovery and never expanded. When `audit` is given,
/// every terminal test is repeated with the state of another, already discovered node
/// standing in for the prior state, and a different answer is reported as
/// [`Error::ContractViolation`].
#[instrument(skip_all)]
pub fn build_state_space<V, G, K>(
    variant: &V,
    mut audit: Option<&mut K>,
) -> Result<StateSpace<G, V::Label>>
where
    V: Variant,
    G: GraphStore<V::Node>,
    K: RandomGenerator,
{
    let mut graph = G::default();
    let mut optimal = OptimalMoveGraph::default();
    let mut terminals = Vec::new();

    let (root, _) = graph.add_node(variant.root());
    let mut queue = VecDeque::from([root]);
    let mut expanded = 0usize;

    while let Some(current) = queue.pop_front() {
        let node = graph.node(current).clone();
        let candidates = variant.expand(&node);
        expanded += 1;

        if current == root && candidates.is_empty() {
            // A root without moves is scored as its own successor.
            if let Some(label) = variant.terminal_label(&node, &node) {
                trace!(?label, "root has no legal moves");
                optimal.insert_terminal(root, label);
                terminals.push(root);
            }
            continue;
        }

        let mut linked = FxHashSet::default();
        for candidate in candidates {
            let next = match graph.index_of(&candidate) {
                Some(existing) => existing,
                None => {
                    let label = variant.terminal_label(&node, &candidate);
                    if let Some(rng) = audit.as_deref_mut() {
                        audit_terminal_test(variant, &graph, current, &candidate, label, rng)?;
                    }

                    let (index, _) = graph.add_node(candidate);
                    match label {
                        Some(label) => {
                            trace!(node = %index, ?label, "terminal");
                            optimal.insert_terminal(index, label);
                            terminals.push(index);
                        }
                        None => queue.push_back(index),
                    }
                    index
                }
            };

            if linked.insert(next) {
                graph.add_edge(current, next);
            }
        }

        if expanded % 10_000 == 0 {
            debug!(expanded, discovered = graph.node_count(), queued = queue.len());
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        terminals = terminals.len(),
        "state space built"
    );

    Ok(StateSpace {
        graph,
        optimal,
        terminals,
        root,
    })
}

fn audit_terminal_test<V, G, K>(
    variant: &V,
    graph: &G,
    current: NodeIndex,
    candidate: &V::Node,
    expected: Option<V::Label>,
    rng: &mut K,
) -> Result<()>
where
    V: Variant,
    G: GraphStore<V::Node>,
    K: RandomGenerator,
{
    let count = graph.node_count();
    if count < 2 {
        return Ok(());
    }

    // Draw from every node but `current`.
    let mut pick = rng.next_range(0, count - 1);
    if pick >= current.index() {
        pick += 1;
    }

    let from = graph.node(current);
    let prior = graph.node(NodeIndex(pick));
    let found = variant.terminal_label_after(from, prior, candidate);
    if found == expected {
        return Ok(());
    }

    warn!(?candidate, ?prior, ?expected, ?found, "terminal test depends on the prior state");
    Err(Error::ContractViolation {
        state: format!("{candidate:?}"),
        expected: format!("{expected:?}"),
        found: format!("{found:?}"),
    })
}
