use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Rule lookups are total and density is clamped, so the only failure is
/// asking for a grid with no cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimension { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
