use crate::entity::EntityId;
use crate::rule::RuleId;

/// Alias for `Result<T, FabulaError>`.
pub type FabulaResult<T> = Result<T, FabulaError>;

/// Errors raised while turning content into a [`crate::Story`].
///
/// Running a story never fails; only malformed content is rejected.
#[derive(Debug, thiserror::Error)]
pub enum FabulaError {
    /// The same id was declared more than once, possibly under different kinds.
    #[error("entity id declared more than once: \"{0}\"")]
    DuplicateId(EntityId),

    /// A rule has a blank summary and could not be labelled in a graph.
    #[error("rule {0} has an empty summary")]
    EmptyRuleSummary(RuleId),

    /// The story definition could not be parsed.
    #[error("invalid story definition: {0}")]
    Parse(#[from] serde_json::Error),
}
