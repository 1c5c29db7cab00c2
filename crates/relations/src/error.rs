use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationError {
    #[error("Invalid course code: {0}")]
    InvalidCode(String),
}
