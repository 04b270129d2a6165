//! Process-wide capability tier state, made explicit
//!
//! The enabled-tier set is an ordinary value passed by reference into
//! dispatch, rather than a hidden global, so a test battery (or several
//! independent ones) can narrow it and rerun without cross-talk.
//!
//! The one safety rail lives here: disabling a tier the host never had is
//! refused by default, because the battery would then claim "fallback
//! exercised under a genuine downgrade" for a path that was going to run
//! anyway. An operator testing on a host known to lack a tier can
//! acknowledge that explicitly via [`DOWNLEVEL_ENV`].

use tracing::debug;

use crate::error::{CentellaError, Result};
use crate::Tier;

/// Environment variable that, when set to a nonzero integer, acknowledges
/// a downlevel host and suppresses the absent-tier refusal in
/// [`CapabilitySet::disable`].
pub const DOWNLEVEL_ENV: &str = "CENTELLA_TEST_DOWNLEVEL_HOST";

/// What to do when asked to disable a tier the host never had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownlevelPolicy {
    /// Refuse: report [`CentellaError::TierUnavailable`] (strict default).
    Enforce,
    /// Operator has acknowledged a downlevel host; clear the bit anyway.
    Acknowledge,
}

impl DownlevelPolicy {
    /// Read the policy from [`DOWNLEVEL_ENV`]. Absent, non-numeric, or
    /// zero means strict enforcement.
    pub fn from_env() -> Self {
        match std::env::var(DOWNLEVEL_ENV) {
            Ok(raw) if raw.trim().parse::<i64>().map_or(false, |n| n != 0) => {
                DownlevelPolicy::Acknowledge
            }
            _ => DownlevelPolicy::Enforce,
        }
    }
}

/// The set of currently enabled capability tiers.
///
/// Constructed from host detection, then only ever narrowed: there is no
/// operation that sets a bit after construction, so the enabled set after
/// N `disable` calls is always a subset of the set after N-1.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    enabled: u8,
    policy: DownlevelPolicy,
}

impl CapabilitySet {
    /// Full host capability, with the downlevel policy taken from the
    /// environment.
    pub fn full() -> Self {
        Self::with_policy(DownlevelPolicy::from_env())
    }

    /// Full host capability with an explicit downlevel policy.
    pub fn with_policy(policy: DownlevelPolicy) -> Self {
        let mut enabled = 0;
        for &tier in Tier::DOWNGRADE_ORDER {
            if tier.host_available() {
                enabled |= tier.bit();
            }
        }
        Self { enabled, policy }
    }

    /// Whether `tier` is still enabled.
    pub fn is_enabled(&self, tier: Tier) -> bool {
        self.enabled & tier.bit() != 0
    }

    /// Disable one capability tier.
    ///
    /// Verifies first that the tier was actually available on this host;
    /// "disabling" an already-absent tier would give false confidence that
    /// a fallback path was exercised under a genuine downgrade, so it is
    /// refused unless the policy acknowledges a downlevel host. Under
    /// [`DownlevelPolicy::Acknowledge`] the bit is still cleared.
    ///
    /// Never re-enables anything; callers are expected to proceed from
    /// most-capable to least-capable tier.
    pub fn disable(&mut self, tier: Tier) -> Result<()> {
        self.disable_if_available(tier, tier.host_available())
    }

    fn disable_if_available(&mut self, tier: Tier, host_available: bool) -> Result<()> {
        if !host_available && self.policy == DownlevelPolicy::Enforce {
            return Err(CentellaError::TierUnavailable { tier });
        }
        debug!(?tier, "capability tier disabled");
        self.enabled &= !tier.bit();
        Ok(())
    }

    /// Number of tiers still enabled.
    pub fn enabled_count(&self) -> u32 {
        self.enabled.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acknowledged() -> CapabilitySet {
        CapabilitySet::with_policy(DownlevelPolicy::Acknowledge)
    }

    #[test]
    fn full_matches_host_detection() {
        let caps = CapabilitySet::full();
        for &tier in Tier::DOWNGRADE_ORDER {
            assert_eq!(caps.is_enabled(tier), tier.host_available());
        }
    }

    #[test]
    fn downgrade_is_monotonic() {
        let mut caps = acknowledged();
        let mut previous = caps.enabled;
        for &tier in Tier::DOWNGRADE_ORDER {
            caps.disable(tier).unwrap();
            // Every bit still set was set before: subset, never superset.
            assert_eq!(caps.enabled & !previous, 0);
            assert!(!caps.is_enabled(tier));
            previous = caps.enabled;
        }
        assert_eq!(caps.enabled_count(), 0);
    }

    #[test]
    fn disabling_twice_is_harmless() {
        let mut caps = acknowledged();
        if let Some(&tier) = Tier::DOWNGRADE_ORDER.first() {
            caps.disable(tier).unwrap();
            caps.disable(tier).unwrap();
            assert!(!caps.is_enabled(tier));
        }
    }

    #[test]
    fn absent_tier_is_refused_under_enforce() {
        let mut caps = CapabilitySet::with_policy(DownlevelPolicy::Enforce);
        let err = caps
            .disable_if_available(Tier::Avx2, false)
            .expect_err("absent tier must be refused");
        assert_eq!(err, CentellaError::TierUnavailable { tier: Tier::Avx2 });
    }

    #[test]
    fn absent_tier_still_clears_under_acknowledge() {
        let mut caps = acknowledged();
        caps.disable_if_available(Tier::Avx2, false).unwrap();
        assert!(!caps.is_enabled(Tier::Avx2));
    }

    // Env-var parsing is covered in a single test so nothing races on the
    // process environment.
    #[test]
    fn downlevel_policy_env_parsing() {
        std::env::remove_var(DOWNLEVEL_ENV);
        assert_eq!(DownlevelPolicy::from_env(), DownlevelPolicy::Enforce);

        std::env::set_var(DOWNLEVEL_ENV, "0");
        assert_eq!(DownlevelPolicy::from_env(), DownlevelPolicy::Enforce);

        std::env::set_var(DOWNLEVEL_ENV, "not a number");
        assert_eq!(DownlevelPolicy::from_env(), DownlevelPolicy::Enforce);

        std::env::set_var(DOWNLEVEL_ENV, "1");
        assert_eq!(DownlevelPolicy::from_env(), DownlevelPolicy::Acknowledge);

        std::env::set_var(DOWNLEVEL_ENV, " 2 ");
        assert_eq!(DownlevelPolicy::from_env(), DownlevelPolicy::Acknowledge);

        std::env::remove_var(DOWNLEVEL_ENV);
    }
}
