use proptest::prelude::*;
use retro_solver::rules::{OnePlayerRules, Outcome, Player, Position, Score, TwoPlayerRules};
use retro_solver::solver::Solver;

/// A random game played over `edges.len()` layers of `width` positions each.
///
/// The state is `(layer, index)`; the start is `(0, 0)` and every position in the last
/// layer is terminal.
#[derive(Debug, Clone)]
struct Layered<T> {
    edges: Vec<Vec<Vec<usize>>>,
    terminal: Vec<T>,
}

impl<T> Layered<T> {
    fn depth(&self) -> usize {
        self.edges.len()
    }

    fn moves(&self, &(layer, index): &(usize, usize)) -> Vec<(usize, usize)> {
        if layer >= self.depth() {
            return Vec::new();
        }
        self.edges[layer][index]
            .iter()
            .map(|&next| (layer + 1, next))
            .collect()
    }

    fn reachable(&self) -> Vec<(usize, usize)> {
        let mut seen = vec![(0, 0)];
        let mut i = 0;
        while i < seen.len() {
            for next in self.moves(&seen[i]) {
                if !seen.contains(&next) {
                    seen.push(next);
                }
            }
            i += 1;
        }
        seen
    }
}

impl OnePlayerRules for Layered<Score> {
    type State = (usize, usize);

    fn initial_state(&self) -> Self::State {
        (0, 0)
    }

    fn next_states(&self, state: &Self::State) -> Vec<Self::State> {
        self.moves(state)
    }

    fn final_score(&self, _state: &Self::State, next_state: &Self::State) -> Option<Score> {
        (next_state.0 == self.depth()).then(|| self.terminal[next_state.1])
    }
}

impl TwoPlayerRules for Layered<Outcome> {
    type State = (usize, usize);

    fn initial_state(&self) -> Self::State {
        (0, 0)
    }

    fn next_states(&self, _mover: Player, state: &Self::State) -> Vec<Self::State> {
        self.moves(state)
    }

    fn winner(&self, _mover: Player, _state: &Self::State, next: &Self::State) -> Option<Outcome> {
        (next.0 == self.depth()).then(|| self.terminal[next.1])
    }
}

fn best_score(game: &Layered<Score>, state: (usize, usize)) -> Score {
    if state.0 == game.depth() {
        return game.terminal[state.1];
    }
    game.moves(&state)
        .into_iter()
        .map(|next| best_score(game, next))
        .max()
        .unwrap_or(Score::MIN)
}

fn minimax(game: &Layered<Outcome>, state: (usize, usize), mover: Player) -> Outcome {
    if state.0 == game.depth() {
        return game.terminal[state.1];
    }
    game.moves(&state)
        .into_iter()
        .map(|next| minimax(game, next, mover.opponent()))
        .max_by_key(|outcome| outcome.rank_for(mover))
        .unwrap_or(Outcome::Draw)
}

fn mover_at(layer: usize) -> Player {
    if layer % 2 == 0 { Player::One } else { Player::Two }
}

fn layered<T: Clone + std::fmt::Debug>(
    terminal: impl Strategy<Value = T> + Clone,
) -> impl Strategy<Value = Layered<T>> {
    (1usize..5, 1usize..5).prop_flat_map(move |(depth, width)| {
        let edges = prop::collection::vec(
            prop::collection::vec(prop::collection::vec(0..width, 1..4), width),
            depth,
        );
        let terminal = prop::collection::vec(terminal.clone(), width);
        (edges, terminal).prop_map(|(edges, terminal)| Layered { edges, terminal })
    })
}

fn outcome() -> impl Strategy<Value = Outcome> + Clone {
    prop_oneof![
        Just(Outcome::Draw),
        Just(Outcome::Win(Player::One)),
        Just(Outcome::Win(Player::Two)),
    ]
}

proptest! {
    #[test]
    fn one_player_labels_match_exhaustive_search(game in layered(-10i64..10)) {
        let solved = Solver::one_player(game.clone()).build().solve().unwrap();

        prop_assert_eq!(solved.node_count(), solved.solved_count());
        prop_assert_eq!(solved.node_count(), game.reachable().len());
        for state in game.reachable() {
            let best = best_score(&game, state);
            prop_assert_eq!(solved.label(&state), Some(best));
            if let Some(next) = solved.best_move(&state) {
                prop_assert_eq!(solved.label(next), Some(best));
            }
        }
    }

    #[test]
    fn keep_all_solutions_lists_exactly_the_ties(game in layered(-3i64..3)) {
        let solved = Solver::one_player(game.clone())
            .with_keep_all_solutions(true)
            .build()
            .solve()
            .unwrap();

        for state in game.reachable() {
            let best = best_score(&game, state);
            let mut expected = Vec::new();
            for next in game.moves(&state) {
                if best_score(&game, next) == best && !expected.contains(&next) {
                    expected.push(next);
                }
            }
            let found: Vec<_> = solved.best_moves(&state).into_iter().copied().collect();
            prop_assert_eq!(found.len(), expected.len());
            for next in expected {
                prop_assert!(found.contains(&next));
            }
        }
    }

    #[test]
    fn two_player_labels_match_minimax(game in layered(outcome())) {
        let solved = Solver::two_player(game.clone()).build().solve().unwrap();

        prop_assert_eq!(solved.node_count(), solved.solved_count());
        for state in game.reachable() {
            let mover = mover_at(state.0);
            let expected = minimax(&game, state, mover);
            let node = Position::new(mover, state);
            prop_assert_eq!(solved.label(&node), Some(expected));

            // Following the witnesses never changes the proven result.
            for step in solved.principal_line(&node) {
                prop_assert_eq!(solved.label(step), Some(expected));
            }
        }
    }

    #[test]
    fn solving_twice_gives_the_same_labels(game in layered(outcome())) {
        let mut solver = Solver::two_player(game.clone()).with_contract_check(true).build();
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();

        for state in game.reachable() {
            let node = Position::new(mover_at(state.0), state);
            prop_assert_eq!(first.label(&node), second.label(&node));
        }
    }
}
