//! Error types for the solver and the bundled rule sets.

use thiserror::Error;

/// Main error type of the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Backward induction reached its fixed point without labelling every node.
    ///
    /// Usually the rule set produced a cycle, or a position with no legal moves
    /// that was never reported as terminal.
    #[error("game not solved: {solved} of {total} nodes labelled")]
    NotSolved { total: usize, solved: usize },

    /// A terminal test gave a different answer once the prior state was swapped out.
    #[error(
        "terminal test for {state} depends on the prior state: expected {expected}, got {found}"
    )]
    ContractViolation {
        state: String,
        expected: String,
        found: String,
    },

    /// A rule set was built with parameters it cannot represent.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn not_solved_reports_both_counts() {
        let err = Error::NotSolved {
            total: 12,
            solved: 7,
        };
        assert_eq!(err.to_string(), "game not solved: 7 of 12 nodes labelled");
    }
}
