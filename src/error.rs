use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("status must be one of locked, unlocked, completed (got {0:?})")]
    UnknownStatus(String),
    #[error("level must be a non-negative integer (got {0})")]
    NegativeLevel(i64),
    #[error("level of a {status} skill must be 0 (got {level}); only completed skills carry stars")]
    LevelRequiresCompletion { status: String, level: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("skill {name:?} is not initialised, cannot draw it")]
    NotInitialised { name: String },
    #[error("skill {node:?} depends on {dependency:?}, which is not in the tree")]
    UnresolvedDependency { node: String, dependency: String },
}
