use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// A point, rectangle or radius was malformed: non-finite coordinates, inverted rectangle
    /// bounds, or a point outside the tree's domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
