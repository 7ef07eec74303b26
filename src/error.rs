//! Error types for the editor core.

use thiserror::Error;

/// Rejections raised by the editor core.
///
/// Every variant is an invalid-argument condition: core operations are total
/// over their typed domains and only fail when handed a value outside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A grid was requested with a radius below zero.
    #[error("grid radius must be non-negative, got {0}")]
    NegativeRadius(i32),
    /// A tile type identifier was empty.
    #[error("tile type identifier must not be empty")]
    EmptyTileType,
}
