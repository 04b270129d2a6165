//! Error types for Centella operations
//!
//! Two semantically different conditions surface as errors here: a
//! differential disagreement between a candidate kernel and its naive
//! reference (a correctness bug in the library), and an environment
//! precondition violation (asking to downgrade a capability tier the host
//! never had, which would silently fake fallback coverage). They are kept
//! as distinct variants so callers can intercept either instead of
//! crashing; the battery driver chooses to abort on both.

use thiserror::Error;

use crate::Tier;

/// Result type for Centella operations
pub type Result<T> = std::result::Result<T, CentellaError>;

/// Errors that can occur while driving a differential battery
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CentellaError {
    /// A capability tier scheduled for downgrade was never available on
    /// this host, so the "fallback under downgrade" coverage the battery
    /// would claim did not actually happen.
    #[error(
        "capability tier {tier:?} was never available on this host; \
         downgrade coverage would be incomplete. Set {}=1 to acknowledge \
         running on a downlevel host.",
        crate::caps::DOWNLEVEL_ENV
    )]
    TierUnavailable {
        /// The tier that was requested for downgrade
        tier: Tier,
    },

    /// The candidate implementation disagreed with the naive reference.
    #[error("differential mismatch in {op}: expected {expected}, actual {actual}")]
    Mismatch {
        /// Which operation (and element/position, where relevant) diverged
        op: String,
        /// Result of the trusted naive implementation
        expected: String,
        /// Result of the candidate implementation
        actual: String,
    },
}
