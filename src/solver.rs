use std::marker::PhantomData;

use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument, warn};

use crate::builder::{StateSpace, build_state_space};
use crate::error::{Error, Result};
use crate::graph::{AdjacencyGraph, GraphStore, NodeIndex};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rules::{OnePlayerRules, Position, TwoPlayerRules};
use crate::solution::{OptimalMoveGraph, SolvedGame};
use crate::variant::{OnePlayer, Resolution, TwoPlayer, Variant};

/// Switches that change what a solve run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    /// Record every optimal move of a node instead of a single witness.
    pub keep_all_solutions: bool,
    /// Re-run every terminal test with a different prior state and fail on a mismatch.
    pub contract_check: bool,
}

/// Builds the move graph of a game and solves it by backward induction.
///
/// `V` selects the one- or two-player semantics, `K` feeds the contract audit and
/// `G` stores the move graph.
pub struct Solver<V: Variant, K: RandomGenerator, G: GraphStore<V::Node>> {
    variant: V,
    random: K,
    config: SolverConfig,
    _graph: PhantomData<G>,
}

/// A builder for creating instances of `Solver`.
pub struct SolverBuilder<V: Variant, K: RandomGenerator, G: GraphStore<V::Node>> {
    variant: V,
    random_generator: K,
    config: SolverConfig,
    _graph: PhantomData<G>,
}

impl<V, K, G> SolverBuilder<V, K, G>
where
    V: Variant,
    K: RandomGenerator,
    G: GraphStore<V::Node>,
{
    /// Enables or disables recording of every tied optimal move.
    pub fn with_keep_all_solutions(mut self, keep_all: bool) -> Self {
        self.config.keep_all_solutions = keep_all;
        self
    }

    /// Enables or disables the audit of the terminal-test contract.
    pub fn with_contract_check(mut self, check: bool) -> Self {
        self.config.contract_check = check;
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the random number generator used by the contract audit.
    pub fn with_random_generator<K2: RandomGenerator>(self, rg: K2) -> SolverBuilder<V, K2, G> {
        SolverBuilder {
            variant: self.variant,
            random_generator: rg,
            config: self.config,
            _graph: PhantomData,
        }
    }

    /// Stores the move graph in `G2` instead of the default [`AdjacencyGraph`].
    pub fn with_graph<G2: GraphStore<V::Node>>(self) -> SolverBuilder<V, K, G2> {
        SolverBuilder {
            variant: self.variant,
            random_generator: self.random_generator,
            config: self.config,
            _graph: PhantomData,
        }
    }

    /// Creates the configured `Solver`.
    pub fn build(self) -> Solver<V, K, G> {
        Solver::new(self.variant, self.random_generator, self.config)
    }
}

impl<V: Variant> Solver<V, StandardRandomGenerator, AdjacencyGraph<V::Node>> {
    /// Returns a new builder for `Solver`.
    pub fn builder(variant: V) -> SolverBuilder<V, StandardRandomGenerator, AdjacencyGraph<V::Node>> {
        SolverBuilder {
            variant,
            random_generator: StandardRandomGenerator,
            config: SolverConfig::default(),
            _graph: PhantomData,
        }
    }
}

impl<R: OnePlayerRules>
    Solver<OnePlayer<R>, StandardRandomGenerator, AdjacencyGraph<R::State>>
{
    /// Returns a builder for a one-player puzzle.
    pub fn one_player(
        rules: R,
    ) -> SolverBuilder<OnePlayer<R>, StandardRandomGenerator, AdjacencyGraph<R::State>> {
        Solver::builder(OnePlayer::new(rules))
    }
}

impl<R: TwoPlayerRules>
    Solver<TwoPlayer<R>, StandardRandomGenerator, AdjacencyGraph<Position<R::State>>>
{
    /// Returns a builder for a two-player game.
    pub fn two_player(
        rules: R,
    ) -> SolverBuilder<TwoPlayer<R>, StandardRandomGenerator, AdjacencyGraph<Position<R::State>>>
    {
        Solver::builder(TwoPlayer::new(rules))
    }
}

impl<V, K, G> Solver<V, K, G>
where
    V: Variant,
    K: RandomGenerator,
    G: GraphStore<V::Node>,
{
    /// Creates a new `Solver`.
    ///
    /// It is recommended to use the builder pattern via `Solver::builder()` instead.
    pub fn new(variant: V, random: K, config: SolverConfig) -> Self {
        Self {
            variant,
            random,
            config,
            _graph: PhantomData,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Returns the variant being solved.
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Builds the move graph and labels every node in it.
    ///
    /// Fails with [`Error::NotSolved`] if backward induction stops before every node is
    /// labelled, and with [`Error::ContractViolation`] if the contract audit is on and the
    /// rule set's terminal test looks at the prior state.
    #[instrument(skip_all, fields(keep_all = self.config.keep_all_solutions))]
    pub fn solve(&mut self) -> Result<SolvedGame<V::Node, V::Label, G>> {
        let audit = self.config.contract_check.then_some(&mut self.random);
        let StateSpace {
            graph,
            mut optimal,
            terminals,
            root,
        } = build_state_space::<V, G, K>(&self.variant, audit)?;

        self.backward_induction(&graph, &mut optimal, terminals);

        let total = graph.node_count();
        let solved = optimal.node_count();
        if solved != total {
            warn!(total, solved, "backward induction stalled");
            return Err(Error::NotSolved { total, solved });
        }

        if self.config.keep_all_solutions {
            record_all_optimal_moves::<V::Node, _, _>(&graph, &mut optimal);
        }

        info!(
            nodes = total,
            optimal_moves = optimal.edge_count(),
            root = ?optimal.label(root),
            "game solved"
        );
        Ok(SolvedGame::new(graph, optimal, root))
    }

    /// Propagates labels from the frontier to unsolved predecessors until nothing changes.
    fn backward_induction(
        &self,
        graph: &G,
        optimal: &mut OptimalMoveGraph<V::Label>,
        terminals: Vec<NodeIndex>,
    ) {
        let mut frontier = terminals;
        let mut round = 0usize;

        while !frontier.is_empty() {
            round += 1;

            let mut queued = FxHashSet::default();
            let mut candidates = Vec::new();
            for &solved in &frontier {
                for &predecessor in graph.predecessors(solved) {
                    if !optimal.contains(predecessor) && queued.insert(predecessor) {
                        candidates.push(predecessor);
                    }
                }
            }

            let mut next_frontier = Vec::new();
            for candidate in candidates.iter().copied() {
                let successors: Vec<_> = graph
                    .successors(candidate)
                    .iter()
                    .map(|&next| (next, optimal.label(next)))
                    .collect();

                match self.variant.resolve(graph.node(candidate), &successors) {
                    Resolution::Solved { label, witness } => {
                        optimal.insert_solved(candidate, label, witness);
                        next_frontier.push(candidate);
                    }
                    Resolution::Deferred => {}
                }
            }

            debug!(
                round,
                candidates = candidates.len(),
                resolved = next_frontier.len(),
                solved = optimal.node_count()
            );
            frontier = next_frontier;
        }
    }
}

/// Adds an edge to every successor whose label ties the node's own label.
fn record_all_optimal_moves<N, L, G>(graph: &G, optimal: &mut OptimalMoveGraph<L>)
where
    L: Copy + PartialEq,
    G: GraphStore<N>,
{
    for index in (0..graph.node_count()).map(NodeIndex) {
        let Some(label) = optimal.label(index) else {
            continue;
        };
        let ties: Vec<NodeIndex> = graph
            .successors(index)
            .iter()
            .copied()
            .filter(|&next| optimal.label(next) == Some(label))
            .collect();
        for next in ties {
            optimal.add_move(index, next);
        }
    }
}
