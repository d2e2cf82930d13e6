//! Exhaustive solver for finite, perfect-information combinatorial games.
//!
//! The crate builds the full graph of positions reachable from a game's start with a
//! breadth-first search, then labels every position by backward induction from the
//! terminal ones. One-player puzzles get the best final score reachable from each position,
//! two-player games get the win/lose/draw outcome under optimal play. Every position also
//! gets at least one optimal move.
//!
//! A game is described by implementing [`rules::OnePlayerRules`] or [`rules::TwoPlayerRules`].
//! The whole state space must fit in memory, and the move graph must be acyclic.
//!
//! # Example
//!
//! ```rust
//! use retro_solver::games::tic_tac_toe::TicTacToe;
//! use retro_solver::rules::Outcome;
//! use retro_solver::solver::Solver;
//!
//! # fn main() -> Result<(), retro_solver::Error> {
//! // Classic 3×3 tic-tac-toe
//! let rules = TicTacToe::new(3)?;
//!
//! // Configure and run the solver
//! let mut solver = Solver::two_player(rules)
//!     .with_keep_all_solutions(false)
//!     .build();
//! let solved = solver.solve()?;
//!
//! // Perfect play from both sides ends in a draw
//! assert_eq!(solved.root_label(), Some(Outcome::Draw));
//!
//! let best_opening = solved.best_move(solved.root());
//! println!("A best opening is: {:?}", best_opening);
//! # Ok(())
//! # }
//! ```

/// Breadth-first construction of the move graph.
pub mod builder;
/// Error types.
pub mod error;
/// Pre-made rule sets for common games.
pub mod games;
/// The move-graph storage trait and its default implementation.
pub mod graph;
/// Random number generation for the rule contract audit.
pub mod random;
/// The rule-set traits a game implements, and the shared player and outcome types.
pub mod rules;
/// The solved game and its optimal-move graph.
pub mod solution;
/// The central module of the library, containing the `Solver` and its builder.
pub mod solver;
/// One-player and two-player specializations of the solver.
pub mod variant;

pub use error::{Error, Result};
