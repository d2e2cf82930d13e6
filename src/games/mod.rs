//! Ready-made rule sets.

/// N×N tic-tac-toe, a two-player game.
pub mod tic_tac_toe;
/// Triangle peg solitaire, a one-player puzzle.
pub mod triangle_peg_board;
