use thiserror::Error;

use crate::hex::Coords;

/// Errors raised while assembling a path finder or editing a board. Searching itself never
/// fails: a run that cannot complete reports a [SearchOutcome](crate::search::SearchOutcome)
/// and keeps its partial results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathFinderError {
    #[error("path finder is missing its {0} strategy")]
    MissingStrategy(&'static str),

    #[error("coordinates {0} are not on the board")]
    OffBoard(Coords),
}

pub type Result<T> = std::result::Result<T, PathFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PathFinderError::MissingStrategy("comparator");
        assert_eq!(err.to_string(), "path finder is missing its comparator strategy");
        let err = PathFinderError::OffBoard(Coords::new(-1, 3));
        assert!(err.to_string().contains("(-1, 3)"));
    }
}
