use std::fmt::Debug;
use std::hash::Hash;

/// Final score of a one-player game. Higher is better.
pub type Score = i64;

/// The rule set of a one-player puzzle.
///
/// To solve a custom puzzle, this trait must be implemented.
/// The solver only stores and compares states, so equality and hashing must be exact:
/// two equal states have to be interchangeable for move generation and scoring.
pub trait OnePlayerRules {
    /// A game position. Symmetric positions should be folded into one canonical
    /// representative before they are returned from [`next_states`](Self::next_states).
    type State: Clone + Eq + Hash + Debug;

    /// Returns the starting position.
    fn initial_state(&self) -> Self::State;

    /// Returns every position reachable from `state` in one legal move.
    ///
    /// Duplicates are allowed, the solver collapses them.
    fn next_states(&self, state: &Self::State) -> Vec<Self::State>;

    /// Returns the final score if the game is over at `next_state`, `None` otherwise.
    ///
    /// The answer must depend on `next_state` alone. `state` is only passed for
    /// convenience; the solver can audit this with
    /// [`with_contract_check`](crate::solver::SolverBuilder::with_contract_check).
    fn final_score(&self, state: &Self::State, next_state: &Self::State) -> Option<Score>;
}

/// The rule set of a two-player win/lose/draw game.
pub trait TwoPlayerRules {
    /// A game position, canonicalized the same way as [`OnePlayerRules::State`].
    type State: Clone + Eq + Hash + Debug;

    /// Returns the starting position, from which [`Player::One`] moves first.
    fn initial_state(&self) -> Self::State;

    /// Returns every position `mover` can reach from `state` in one legal move.
    fn next_states(&self, mover: Player, state: &Self::State) -> Vec<Self::State>;

    /// Returns the result if the game is over once `mover` has moved to `next_state`.
    ///
    /// The answer must depend on `mover` and `next_state` only, never on `state`.
    fn winner(&self, mover: Player, state: &Self::State, next_state: &Self::State)
    -> Option<Outcome>;
}

/// Represents the players of a two-player game.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum Player {
    /// The player who moves from the initial position.
    One = 1,
    /// The other player.
    Two = 2,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Represents the proven result of a two-player position.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Outcome {
    /// Neither player can force a win.
    Draw,
    /// The given player wins under optimal play.
    Win(Player),
}

impl Outcome {
    /// Ranks the outcome from the point of view of `player`: win > draw > loss.
    pub fn rank_for(self, player: Player) -> u8 {
        match self {
            Outcome::Win(winner) if winner == player => 2,
            Outcome::Draw => 1,
            Outcome::Win(_) => 0,
        }
    }
}

/// A two-player node: the position together with the player about to move from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position<S> {
    /// The player whose turn it is at `state`.
    pub mover: Player,
    /// The game position.
    pub state: S,
}

impl<S> Position<S> {
    /// Creates a node where `mover` is to move at `state`.
    pub fn new(mover: Player, state: S) -> Self {
        Self { mover, state }
    }
}
