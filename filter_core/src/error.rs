use crate::editor::ClauseId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Apply was requested while every clause value is blank.
    #[error("Fill in at least one filter")]
    NoActiveClauses,
    /// At least one clause row must always remain.
    #[error("The last filter cannot be removed")]
    LastClause,
    #[error("No filter with id {0}")]
    UnknownClause(ClauseId),
}
