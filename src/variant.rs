//! The two specializations of the shared build-and-solve skeleton.
//!
//! A [`Variant`] tells the builder how to expand and label nodes, and tells the solver
//! how to resolve a node once its successors carry labels. [`OnePlayer`] maximizes a
//! score, [`TwoPlayer`] ranks outcomes as mover-wins > draw > mover-loses.

use std::fmt::Debug;
use std::hash::Hash;

use crate::graph::NodeIndex;
use crate::rules::{OnePlayerRules, Outcome, Player, Position, Score, TwoPlayerRules};

/// What the solver learned about a candidate node in one induction round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<L> {
    /// At least one successor is still unsolved.
    Deferred,
    /// The node's optimal label, with the first successor that achieves it.
    Solved { label: L, witness: NodeIndex },
}

/// Player-count specific behavior of the solver.
pub trait Variant {
    /// A move-graph node.
    type Node: Clone + Eq + Hash + Debug;
    /// The value carried by a solved node.
    type Label: Copy + PartialEq + Debug;

    /// Returns the start node.
    fn root(&self) -> Self::Node;

    /// Returns the successors of `node`, in the order the rule set produced them.
    fn expand(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Returns the label of `to` if the move `from -> to` ends the game.
    fn terminal_label(&self, from: &Self::Node, to: &Self::Node) -> Option<Self::Label>;

    /// Same question as [`terminal_label`](Self::terminal_label), but the rule set sees the
    /// state of `prior` in place of the state of `from`. Everything else is kept.
    fn terminal_label_after(
        &self,
        from: &Self::Node,
        prior: &Self::Node,
        to: &Self::Node,
    ) -> Option<Self::Label>;

    /// Resolves `node` from its successors' labels, listed in successor order.
    fn resolve(
        &self,
        node: &Self::Node,
        successors: &[(NodeIndex, Option<Self::Label>)],
    ) -> Resolution<Self::Label>;
}

/// Adapts a [`OnePlayerRules`] puzzle: nodes are states, labels are scores.
#[derive(Debug, Clone)]
pub struct OnePlayer<R> {
    rules: R,
}

impl<R: OnePlayerRules> OnePlayer<R> {
    /// Wraps `rules`.
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    /// Returns the wrapped rule set.
    pub fn rules(&self) -> &R {
        &self.rules
    }
}

impl<R: OnePlayerRules> Variant for OnePlayer<R> {
    type Node = R::State;
    type Label = Score;

    fn root(&self) -> Self::Node {
        self.rules.initial_state()
    }

    fn expand(&self, node: &Self::Node) -> Vec<Self::Node> {
        self.rules.next_states(node)
    }

    fn terminal_label(&self, from: &Self::Node, to: &Self::Node) -> Option<Score> {
        self.rules.final_score(from, to)
    }

    fn terminal_label_after(
        &self,
        _from: &Self::Node,
        prior: &Self::Node,
        to: &Self::Node,
    ) -> Option<Score> {
        self.rules.final_score(prior, to)
    }

    fn resolve(
        &self,
        _node: &Self::Node,
        successors: &[(NodeIndex, Option<Score>)],
    ) -> Resolution<Score> {
        let mut best: Option<(Score, NodeIndex)> = None;
        for &(index, label) in successors {
            let Some(score) = label else {
                return Resolution::Deferred;
            };
            match best {
                Some((best_score, _)) if best_score >= score => {}
                _ => best = Some((score, index)),
            }
        }

        match best {
            Some((label, witness)) => Resolution::Solved { label, witness },
            None => Resolution::Deferred,
        }
    }
}

/// Adapts a [`TwoPlayerRules`] game: nodes are [`Position`]s, labels are [`Outcome`]s.
#[derive(Debug, Clone)]
pub struct TwoPlayer<R> {
    rules: R,
}

impl<R: TwoPlayerRules> TwoPlayer<R> {
    /// Wraps `rules`.
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    /// Returns the wrapped rule set.
    pub fn rules(&self) -> &R {
        &self.rules
    }
}

impl<R: TwoPlayerRules> Variant for TwoPlayer<R> {
    type Node = Position<R::State>;
    type Label = Outcome;

    fn root(&self) -> Self::Node {
        Position::new(Player::One, self.rules.initial_state())
    }

    fn expand(&self, node: &Self::Node) -> Vec<Self::Node> {
        let next_mover = node.mover.opponent();
        self.rules
            .next_states(node.mover, &node.state)
            .into_iter()
            .map(|state| Position::new(next_mover, state))
            .collect()
    }

    fn terminal_label(&self, from: &Self::Node, to: &Self::Node) -> Option<Outcome> {
        self.rules.winner(from.mover, &from.state, &to.state)
    }

    fn terminal_label_after(
        &self,
        from: &Self::Node,
        prior: &Self::Node,
        to: &Self::Node,
    ) -> Option<Outcome> {
        self.rules.winner(from.mover, &prior.state, &to.state)
    }

    fn resolve(
        &self,
        node: &Self::Node,
        successors: &[(NodeIndex, Option<Outcome>)],
    ) -> Resolution<Outcome> {
        if successors.iter().any(|(_, label)| label.is_none()) {
            return Resolution::Deferred;
        }

        let mover = node.mover;
        let mut best: Option<(Outcome, NodeIndex)> = None;
        for (index, outcome) in successors
            .iter()
            .filter_map(|&(index, label)| label.map(|outcome| (index, outcome)))
        {
            if outcome == Outcome::Win(mover) {
                return Resolution::Solved {
                    label: outcome,
                    witness: index,
                };
            }
            match best {
                Some((best_outcome, _))
                    if best_outcome.rank_for(mover) >= outcome.rank_for(mover) => {}
                _ => best = Some((outcome, index)),
            }
        }

        match best {
            Some((label, witness)) => Resolution::Solved { label, witness },
            None => Resolution::Deferred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OnePlayer, Resolution, TwoPlayer, Variant};
    use crate::graph::NodeIndex;
    use crate::rules::{OnePlayerRules, Outcome, Player, Position, Score, TwoPlayerRules};

    struct Countdown;

    impl OnePlayerRules for Countdown {
        type State = u8;

        fn initial_state(&self) -> u8 {
            2
        }

        fn next_states(&self, state: &u8) -> Vec<u8> {
            (0..*state).collect()
        }

        fn final_score(&self, _state: &u8, next_state: &u8) -> Option<Score> {
            (*next_state == 0).then_some(0)
        }
    }

    struct Nim;

    impl TwoPlayerRules for Nim {
        type State = u8;

        fn initial_state(&self) -> u8 {
            3
        }

        fn next_states(&self, _mover: Player, state: &u8) -> Vec<u8> {
            (1..=2).filter(|take| take <= state).map(|take| state - take).collect()
        }

        fn winner(&self, mover: Player, _state: &u8, next_state: &u8) -> Option<Outcome> {
            (*next_state == 0).then_some(Outcome::Win(mover))
        }
    }

    #[test]
    fn one_player_takes_first_maximum() {
        let variant = OnePlayer::new(Countdown);
        let successors = [
            (NodeIndex(3), Some(4)),
            (NodeIndex(1), Some(7)),
            (NodeIndex(2), Some(7)),
        ];
        assert_eq!(
            variant.resolve(&5, &successors),
            Resolution::Solved {
                label: 7,
                witness: NodeIndex(1)
            }
        );
    }

    #[test]
    fn one_player_defers_on_unsolved_successor() {
        let variant = OnePlayer::new(Countdown);
        assert_eq!(variant.root(), variant.rules().initial_state());
        let successors = [(NodeIndex(1), Some(9)), (NodeIndex(2), None)];
        assert_eq!(variant.resolve(&5, &successors), Resolution::Deferred);
    }

    #[test]
    fn two_player_positions_alternate_movers() {
        let variant = TwoPlayer::new(Nim);
        let root = variant.root();
        assert_eq!(root, Position::new(Player::One, 3));
        assert_eq!(
            variant.expand(&root),
            vec![Position::new(Player::Two, 2), Position::new(Player::Two, 1)]
        );
    }

    #[test]
    fn two_player_prefers_win_then_draw() {
        let variant = TwoPlayer::new(Nim);
        let node = Position::new(Player::Two, 3);
        let lose = Some(Outcome::Win(Player::One));

        let with_draw = [
            (NodeIndex(1), lose),
            (NodeIndex(2), Some(Outcome::Draw)),
            (NodeIndex(3), Some(Outcome::Draw)),
        ];
        assert_eq!(
            variant.resolve(&node, &with_draw),
            Resolution::Solved {
                label: Outcome::Draw,
                witness: NodeIndex(2)
            }
        );

        let with_win = [
            (NodeIndex(1), Some(Outcome::Draw)),
            (NodeIndex(4), Some(Outcome::Win(Player::Two))),
        ];
        assert_eq!(
            variant.resolve(&node, &with_win),
            Resolution::Solved {
                label: Outcome::Win(Player::Two),
                witness: NodeIndex(4)
            }
        );

        let all_lost = [(NodeIndex(5), lose), (NodeIndex(6), lose)];
        assert_eq!(
            variant.resolve(&node, &all_lost),
            Resolution::Solved {
                label: Outcome::Win(Player::One),
                witness: NodeIndex(5)
            }
        );
    }

    #[test]
    fn two_player_defers_even_when_a_win_is_known() {
        let variant = TwoPlayer::new(Nim);
        let node = Position::new(Player::One, 3);
        let successors = [
            (NodeIndex(1), Some(Outcome::Win(Player::One))),
            (NodeIndex(2), None),
        ];
        assert_eq!(variant.resolve(&node, &successors), Resolution::Deferred);
    }
}
