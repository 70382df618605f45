//! Error types.
//!
//! Almost everything in this crate fails soft: an undecomposable chain name
//! yields no legs and compares as unordered. The one parse failure that is
//! surfaced is a leg carrying more than one distinct L1 override block.

use thiserror::Error;

/// Errors raised by chain parsing and the surrounding I/O surface.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// A leg named more than one L1 seed that differs from the chain seed.
    #[error("chain {chain}: leg {leg} has more than one L1 override ({blocks:?})")]
    MultipleL1Overrides {
        chain: String,
        leg: String,
        blocks: Vec<String>,
    },

    /// A chain filter carried a pattern that is not a valid regex.
    #[error("invalid match pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A chain filter failed validation.
    #[error("invalid chain filter: {0}")]
    InvalidFilter(String),

    /// A period name that is not part of the period table.
    #[error("unknown period name: {0}")]
    UnknownPeriod(String),

    /// JSON encoding or decoding failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// The record source could not provide a period.
    #[error("record source: {0}")]
    Source(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TriggerError>;
