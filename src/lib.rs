//! Centella: SIMD slice algorithms with a differential fuzz harness
//!
//! **Centella** (Spanish: "flash of lightning") pairs a small family of
//! potentially-vectorized bulk-data slice algorithms (`count`, `find`,
//! `mismatch`, `search`, `reverse`, min/max element, ...) with the harness
//! needed to trust them: a seeded, reproducible differential fuzzer that
//! compares every vectorized code path against a naive reference
//! implementation, then deliberately downgrades instruction-set capability
//! tiers one at a time so the SSE and scalar fallback paths get the same
//! random battery as the AVX2 fast path.
//!
//! # Design Principles
//!
//! - **Explicit capability state**: algorithms consult an injected
//!   [`CapabilitySet`], not a hidden global, so a battery can narrow the
//!   enabled tiers and rerun without process-wide tricks.
//! - **Monotonic downgrade**: tiers are only ever disabled, never
//!   re-enabled, within one battery run.
//! - **Reproducibility first**: the exact seed words are printed before any
//!   other test output, so a reported failure can be replayed bit-for-bit.
//! - **Errors are values at the seams**: an equivalence mismatch and an
//!   environment precondition violation are distinct error kinds; only the
//!   top-level driver turns them into a process abort.
//! - **Zero unsafe in public API**: `unsafe` is isolated in the per-tier
//!   kernels under [`backends`].
//!
//! # Quick Start
//!
//! ```rust
//! use centella::{algo, CapabilitySet};
//!
//! let caps = CapabilitySet::full();
//! let hay = [5u8, 3, 3, 7, 1, 9];
//!
//! assert_eq!(algo::count_u8(&caps, &hay, 3), 2);
//! assert_eq!(algo::find_u8(&caps, &hay, 3), Some(1));
//! ```

pub mod algo;
pub mod backends;
pub mod battery;
pub mod caps;
pub mod cases;
pub mod diff;
pub mod error;
pub mod reference;
pub mod seed;

pub use battery::{run_battery_with, run_randomized_battery};
pub use caps::{CapabilitySet, DownlevelPolicy, DOWNLEVEL_ENV};
pub use error::{CentellaError, Result};
pub use seed::{SeedMaterial, SEED_WORDS};

/// A hardware instruction-set capability tier.
///
/// Tiers are hierarchical: a tier enables its own instruction set plus
/// everything below it, so dispatch consults the highest enabled tier and
/// a kernel compiled for a lower tier is always legal to run under a
/// higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// SSE2 (x86_64 baseline, 128-bit)
    Sse2,
    /// SSE4.2 (128-bit plus string/text compare instructions)
    Sse42,
    /// AVX2 (256-bit)
    Avx2,
}

impl Tier {
    /// Tiers in battery downgrade order, most capable first.
    ///
    /// Empty on architectures without runtime-queryable capability tiers;
    /// there the battery runs exactly once and dispatch is always scalar.
    #[cfg(target_arch = "x86_64")]
    pub const DOWNGRADE_ORDER: &'static [Tier] = &[Tier::Avx2, Tier::Sse42, Tier::Sse2];
    /// Tiers in battery downgrade order, most capable first.
    #[cfg(not(target_arch = "x86_64"))]
    pub const DOWNGRADE_ORDER: &'static [Tier] = &[];

    /// Runtime host capability detection for this tier.
    pub fn host_available(self) -> bool {
        #[cfg(target_arch = "x86_64")]
        {
            match self {
                Tier::Sse2 => is_x86_feature_detected!("sse2"),
                Tier::Sse42 => is_x86_feature_detected!("sse4.2"),
                Tier::Avx2 => is_x86_feature_detected!("avx2"),
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = self;
            false
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Tier::Sse2 => 1 << 0,
            Tier::Sse42 => 1 << 1,
            Tier::Avx2 => 1 << 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrade_order_is_most_capable_first() {
        for pair in Tier::DOWNGRADE_ORDER.windows(2) {
            assert!(pair[0] > pair[1], "downgrade order must strictly descend");
        }
    }

    #[test]
    fn tier_bits_are_distinct() {
        assert_ne!(Tier::Sse2.bit(), Tier::Sse42.bit());
        assert_ne!(Tier::Sse42.bit(), Tier::Avx2.bit());
        assert_ne!(Tier::Sse2.bit(), Tier::Avx2.bit());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_is_baseline_on_x86_64() {
        assert!(Tier::Sse2.host_available());
    }

    #[test]
    fn host_detection_is_deterministic() {
        for &tier in Tier::DOWNGRADE_ORDER {
            assert_eq!(tier.host_available(), tier.host_available());
        }
    }
}
