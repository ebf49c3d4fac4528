//! # Pool Error Types
//!
//! All errors that can occur in the allocation layer.

use thiserror::Error;

/// Errors that can occur in the pooled allocation layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// A write filled the largest vertex buffer tier.
    ///
    /// The chunk produced more geometry than any tier can hold. This is a
    /// capacity-planning bug, not a recoverable runtime condition; the
    /// build must abort rather than truncate geometry.
    #[error("vertex buffer tier {tier} exhausted at cursor {cursor}: no larger tier exists")]
    TierExhausted {
        /// The tier that overflowed (the largest defined tier).
        tier: usize,
        /// Write cursor position at the point of exhaustion.
        cursor: usize,
    },

    /// A buffer was requested for a tier that does not exist.
    #[error("invalid vertex buffer tier {tier}: only {count} tiers are defined")]
    InvalidTier {
        /// The requested tier.
        tier: usize,
        /// Number of defined tiers.
        count: usize,
    },
}

/// Result type for allocation layer operations.
pub type CoreResult<T> = Result<T, PoolError>;
