//! Error types for U-Packing.

use thiserror::Error;

/// Result type alias for U-Packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when preparing a packing run.
///
/// Packing itself never fails: items that cannot be placed are reported in
/// the result, not as errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item provided.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid box provided.
    #[error("Invalid box: {0}")]
    InvalidBox(String),
}
