use std::fmt;

use crate::error::{Error, Result};
use crate::rules::{Outcome, Player, TwoPlayerRules};

/// Tic-tac-toe on an N×N board; N marks in a row, column or diagonal win.
///
/// Positions are folded under the eight symmetries of the square, so rotated and
/// mirrored boards share one node.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    size: usize,
    /// `symmetries[k][i]` is the cell that lands on cell `i` under the k-th symmetry.
    symmetries: Vec<Vec<usize>>,
    lines: Vec<Vec<usize>>,
}

impl TicTacToe {
    /// Creates an empty `size`×`size` board. Fails for a size of zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "tic-tac-toe board needs at least one cell".to_string(),
            });
        }

        Ok(Self {
            size,
            symmetries: square_symmetries(size),
            lines: winning_lines(size),
        })
    }

    /// Length of a side of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the canonical representative of `cells`.
    pub fn canonical(&self, cells: &[Option<Player>]) -> Grid {
        let cells = self
            .symmetries
            .iter()
            .map(|symmetry| symmetry.iter().map(|&from| cells[from]).collect::<Vec<_>>())
            .min()
            .unwrap_or_else(|| cells.to_vec());
        Grid {
            size: self.size,
            cells,
        }
    }

    fn has_line(&self, grid: &Grid, player: Player) -> bool {
        self.lines
            .iter()
            .any(|line| line.iter().all(|&cell| grid.cells[cell] == Some(player)))
    }
}

impl TwoPlayerRules for TicTacToe {
    type State = Grid;

    fn initial_state(&self) -> Grid {
        Grid {
            size: self.size,
            cells: vec![None; self.size * self.size],
        }
    }

    fn next_states(&self, mover: Player, state: &Grid) -> Vec<Grid> {
        state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| {
                let mut cells = state.cells.clone();
                cells[i] = Some(mover);
                self.canonical(&cells)
            })
            .collect()
    }

    fn winner(&self, mover: Player, _state: &Grid, next_state: &Grid) -> Option<Outcome> {
        // Only the player who just moved can have completed a line.
        if self.has_line(next_state, mover) {
            return Some(Outcome::Win(mover));
        }

        if next_state.cells.iter().all(|cell| cell.is_some()) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

/// A tic-tac-toe board, row-major. Player one plays `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Grid {
    /// The cells in row-major order, `None` for empty.
    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells
    }

    /// Number of marks placed by either player.
    pub fn marks(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let symbol = match cell {
                    None => '.',
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn square_symmetries(n: usize) -> Vec<Vec<usize>> {
    let last = n - 1;
    let maps: [fn(usize, usize, usize) -> (usize, usize); 8] = [
        |r, c, _| (r, c),
        |r, c, last| (last - c, r),
        |r, c, last| (last - r, last - c),
        |r, c, last| (c, last - r),
        |r, c, _| (c, r),
        |r, c, last| (last - c, last - r),
        |r, c, last| (r, last - c),
        |r, c, last| (last - r, c),
    ];

    maps.iter()
        .map(|map| {
            (0..n * n)
                .map(|cell| {
                    let (row, col) = map(cell / n, cell % n, last);
                    row * n + col
                })
                .collect()
        })
        .collect()
}

fn winning_lines(n: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::with_capacity(2 * n + 2);
    for i in 0..n {
        lines.push((0..n).map(|j| i * n + j).collect());
        lines.push((0..n).map(|j| j * n + i).collect());
    }
    lines.push((0..n).map(|i| i * n + i).collect());
    lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());
    lines
}
