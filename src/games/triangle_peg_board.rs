use crate::error::{Error, Result};
use crate::rules::{OnePlayerRules, Score};

/// Largest board whose holes fit in the 64-bit peg mask.
pub const MAX_ROWS: usize = 10;

/// Peg solitaire on a triangular board with rows of 1, 2, ..., N holes.
///
/// The apex starts empty and every other hole holds a peg. A move jumps one peg over an
/// adjacent peg into an empty hole along any of the three line directions, removing the
/// jumped peg. Once no jump is left the score is minus the number of pegs remaining.
/// Positions are folded under the six symmetries of the triangle.
#[derive(Debug, Clone)]
pub struct TrianglePegBoard {
    rows: usize,
    holes: usize,
    /// `symmetries[k][i]` is the hole that lands on hole `i` under the k-th symmetry.
    symmetries: Vec<Vec<usize>>,
    /// Every three holes in a straight line, in order.
    jumps: Vec<[usize; 3]>,
}

/// Occupied holes of a [`TrianglePegBoard`], one bit per hole in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pegs(pub u64);

impl Pegs {
    /// Number of pegs left on the board.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether `hole` holds a peg.
    pub fn has(self, hole: usize) -> bool {
        self.0 & (1u64 << hole) != 0
    }
}

impl TrianglePegBoard {
    /// Creates a board with `rows` rows, between 1 and [`MAX_ROWS`].
    pub fn new(rows: usize) -> Result<Self> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(Error::InvalidConfiguration {
                message: format!("triangle peg board needs 1 to {MAX_ROWS} rows, got {rows}"),
            });
        }

        let rotations = [
            rotation(rows, |k, j| (k, j)),
            rotation(rows, |k, j| (rows - 1 - k + j, rows - 1 - k)),
            rotation(rows, |k, j| (rows - 1 - j, k - j)),
        ];

        let mut symmetries = Vec::with_capacity(6);
        for rotated in &rotations {
            let mirrored = (0..rotated.len())
                .map(|hole| {
                    let (k, j) = coordinates(hole);
                    rotated[hole_index(k, k - j)]
                })
                .collect();
            symmetries.push(rotated.clone());
            symmetries.push(mirrored);
        }

        let mut jumps = Vec::new();
        for rotated in &rotations {
            for k in 2..rows {
                for j in 0..=k - 2 {
                    jumps.push([
                        rotated[hole_index(k, j)],
                        rotated[hole_index(k, j + 1)],
                        rotated[hole_index(k, j + 2)],
                    ]);
                }
            }
        }

        Ok(Self {
            rows,
            holes: rows * (rows + 1) / 2,
            symmetries,
            jumps,
        })
    }

    /// Number of rows; the last row has this many holes.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of holes on the board.
    pub fn holes(&self) -> usize {
        self.holes
    }

    /// Returns the canonical representative of `pegs`.
    pub fn canonical(&self, pegs: Pegs) -> Pegs {
        self.symmetries
            .iter()
            .map(|symmetry| {
                let mask = symmetry
                    .iter()
                    .enumerate()
                    .filter(|&(_, &from)| pegs.has(from))
                    .fold(0u64, |mask, (hole, _)| mask | 1u64 << hole);
                Pegs(mask)
            })
            .min()
            .unwrap_or(pegs)
    }

    /// Every position one jump away from `pegs`, before canonicalization.
    fn jumps_from(&self, pegs: Pegs) -> impl Iterator<Item = Pegs> + '_ {
        self.jumps.iter().flat_map(move |&[a, b, c]| {
            let forward = (pegs.has(a) && pegs.has(b) && !pegs.has(c)).then_some((a, c));
            let backward = (pegs.has(c) && pegs.has(b) && !pegs.has(a)).then_some((c, a));
            [forward, backward].into_iter().flatten().map(move |(from, to)| {
                Pegs((pegs.0 & !(1u64 << from) & !(1u64 << b)) | (1u64 << to))
            })
        })
    }
}

impl OnePlayerRules for TrianglePegBoard {
    type State = Pegs;

    fn initial_state(&self) -> Pegs {
        let full = (1u64 << self.holes) - 1;
        // A one-hole board has no apex to clear.
        if self.holes == 1 {
            Pegs(full)
        } else {
            Pegs(full & !1)
        }
    }

    fn next_states(&self, state: &Pegs) -> Vec<Pegs> {
        self.jumps_from(*state)
            .map(|next| self.canonical(next))
            .collect()
    }

    fn final_score(&self, _state: &Pegs, next_state: &Pegs) -> Option<Score> {
        if self.jumps_from(*next_state).next().is_some() {
            None
        } else {
            Some(-Score::from(next_state.count()))
        }
    }
}

fn hole_index(row: usize, col: usize) -> usize {
    row * (row + 1) / 2 + col
}

fn coordinates(hole: usize) -> (usize, usize) {
    let mut row = 0;
    while hole_index(row + 1, 0) <= hole {
        row += 1;
    }
    (row, hole - hole_index(row, 0))
}

/// Lists, for every hole `(k, j)` of the rotated board, the original hole it comes from.
fn rotation(rows: usize, source: impl Fn(usize, usize) -> (usize, usize)) -> Vec<usize> {
    (0..rows)
        .flat_map(|k| (0..=k).map(move |j| (k, j)))
        .map(|(k, j)| {
            let (row, col) = source(k, j);
            hole_index(row, col)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::games::triangle_peg_board::{Pegs, TrianglePegBoard};
    use crate::rules::OnePlayerRules;
    use crate::solver::Solver;

    #[test]
    fn test1_single_hole_is_over_at_once() {
        // arrange
        let rules = TrianglePegBoard::new(1).unwrap();

        // act
        let solved = Solver::one_player(rules).build().solve().unwrap();

        // assert
        assert_eq!(solved.root_label(), Some(-1));
        assert!(solved.successors(solved.root()).is_empty());
        assert!(solved.is_terminal(solved.root()));
        assert_eq!(solved.node_count(), 1);
    }

    #[test]
    fn test2_three_rows_strand_two_pegs() {
        let rules = TrianglePegBoard::new(3).unwrap();
        let solved = Solver::one_player(rules).build().solve().unwrap();
        assert_eq!(solved.root_label(), Some(-2));
        // Both opening jumps are mirror images of each other.
        assert_eq!(solved.successors(solved.root()).len(), 1);
    }

    #[test]
    fn test3_fifteen_holes_clear_to_one_peg() {
        // arrange
        let rules = TrianglePegBoard::new(5).unwrap();

        // act
        let solved = Solver::one_player(rules).build().solve().unwrap();

        // assert
        assert_eq!(solved.root_label(), Some(-1));
        let line = solved.principal_line(solved.root());
        assert_eq!(line.len(), 14);
        assert_eq!(line.last().unwrap().count(), 1);
    }

    #[test]
    fn starts_with_apex_empty() {
        let rules = TrianglePegBoard::new(4).unwrap();
        assert_eq!(rules.rows(), 4);
        assert_eq!(rules.holes(), 10);
        let start = rules.initial_state();
        assert!(!start.has(0));
        assert_eq!(start.count(), 9);
    }

    #[test]
    fn symmetries_are_permutations() {
        let rules = TrianglePegBoard::new(5).unwrap();
        assert_eq!(rules.symmetries.len(), 6);
        for symmetry in &rules.symmetries {
            let mut sorted = symmetry.clone();
            sorted.sort();
            assert_eq!(sorted, (0..rules.holes()).collect::<Vec<_>>());
        }
        // Three directions, rows of length 3, 4 and 5 give 1 + 2 + 3 triples each.
        assert_eq!(rules.jumps.len(), 18);
    }

    #[test]
    fn corners_share_a_canonical_form() {
        let rules = TrianglePegBoard::new(4).unwrap();
        // Apex, bottom-left and bottom-right corners.
        let corners = [0, 6, 9].map(|hole| rules.canonical(Pegs(1 << hole)));
        assert_eq!(corners[0], corners[1]);
        assert_eq!(corners[1], corners[2]);
        assert_ne!(rules.canonical(Pegs(1 << 4)), corners[0]);
    }

    #[test]
    fn jump_moves_one_peg_and_removes_the_jumped_one() {
        let rules = TrianglePegBoard::new(3).unwrap();
        let mut next: Vec<_> = rules.jumps_from(rules.initial_state()).collect();
        next.sort();
        // 3 over 1 into the apex, or 5 over 2 into the apex.
        let expected = [0b01_1011, 0b11_0101].map(Pegs);
        assert_eq!(next, expected);
        assert!(next.iter().all(|pegs| pegs.has(0) && pegs.count() == 4));
    }

    #[test]
    fn score_only_once_stuck() {
        let rules = TrianglePegBoard::new(3).unwrap();
        let start = rules.initial_state();
        assert_eq!(rules.final_score(&start, &start), None);
        // Pegs on holes 3 and 5 only: nothing left to jump.
        let stuck = Pegs(1 << 3 | 1 << 5);
        assert_eq!(rules.final_score(&start, &stuck), Some(-2));
    }

    #[test]
    fn rejects_unusable_sizes() {
        assert!(TrianglePegBoard::new(0).is_err());
        assert!(TrianglePegBoard::new(11).is_err());
        assert!(TrianglePegBoard::new(10).is_ok());
    }
}
