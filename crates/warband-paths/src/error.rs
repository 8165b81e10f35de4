use thiserror::Error;

/// Rejected input at the pathfinding boundary.
///
/// Unreachable targets are *not* errors: they produce single-point paths.
/// These variants only cover garbage numbers and misconfiguration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A NaN or infinite world coordinate.
    #[error("{what} position is not finite: ({x}, {y})")]
    NonFinite { what: &'static str, x: f32, y: f32 },
    /// A size or radius option that is negative or not finite.
    #[error("option `{name}` must be finite and non-negative, got {value}")]
    InvalidOption { name: &'static str, value: f32 },
    /// The map reports an unusable cell size.
    #[error("map cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),
    /// A [`PathfinderConfig`](crate::PathfinderConfig) field is out of range.
    #[error("invalid pathfinder config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, PathError>;
