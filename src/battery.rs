//! Test-battery driver
//!
//! Runs a caller-supplied battery once at full host capability, then once
//! more per capability tier as that tier is disabled, so every dispatch
//! path from the best vectorized kernel down to the scalar fallback sees
//! randomized differential coverage. The generator is seeded once and
//! carried forward across runs: each downgraded rerun explores new random
//! territory instead of replaying the same cases.

use std::io;
use std::process;

use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::caps::CapabilitySet;
use crate::error::{CentellaError, Result};
use crate::seed::SeedMaterial;
use crate::Tier;

/// Drive one battery across the downgrade schedule, with errors as values.
///
/// Invokes `battery` once with the capability set as given, then for each
/// tier in [`Tier::DOWNGRADE_ORDER`] disables it and invokes `battery`
/// again, sharing one generator throughout. The first error — a
/// differential mismatch or a refused downgrade — stops the schedule and
/// is returned to the caller.
pub fn run_battery_with<F>(
    seed: &SeedMaterial,
    caps: &mut CapabilitySet,
    mut battery: F,
) -> Result<()>
where
    F: FnMut(&mut ChaCha8Rng, &CapabilitySet) -> Result<()>,
{
    let mut rng = seed.rng();
    battery(&mut rng, caps)?;
    for &tier in Tier::DOWNGRADE_ORDER {
        caps.disable(tier)?;
        info!(?tier, "rerunning battery with capability tier disabled");
        battery(&mut rng, caps)?;
    }
    Ok(())
}

/// Seed, announce, and drive a full randomized battery; abort on failure.
///
/// This is the top-level entry for unattended runs: the seed banner goes
/// to stdout before anything else, and any error — mismatch or refused
/// downgrade — is printed and turned into an abnormal process termination
/// so a failing case is never silently skipped.
pub fn run_randomized_battery<F>(battery: F)
where
    F: FnMut(&mut ChaCha8Rng, &CapabilitySet) -> Result<()>,
{
    let seed = SeedMaterial::from_entropy();
    let mut stdout = io::stdout();
    if let Err(err) = seed.announce(&mut stdout) {
        eprintln!("failed to announce seed material: {err}");
        process::abort();
    }

    let mut caps = CapabilitySet::full();
    if let Err(err) = run_battery_with(&seed, &mut caps, battery) {
        fail(&err);
    }
}

fn fail(err: &CentellaError) -> ! {
    eprintln!("{err}");
    process::abort();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::DownlevelPolicy;
    use rand::RngCore;

    fn seed() -> SeedMaterial {
        SeedMaterial::from_words([1, 2, 3, 4, 5, 6, 7, 8])
    }

    #[test]
    fn battery_runs_once_per_tier_plus_full() {
        let mut caps = CapabilitySet::with_policy(DownlevelPolicy::Acknowledge);
        let mut invocations = 0;
        run_battery_with(&seed(), &mut caps, |_, _| {
            invocations += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(invocations, 1 + Tier::DOWNGRADE_ORDER.len());
        assert_eq!(caps.enabled_count(), 0);
    }

    #[test]
    fn generator_state_carries_across_reruns() {
        // The values observed across all invocations must form one
        // continuous stream from the seed, proving no re-seeding happens
        // between downgrades.
        let mut observed = Vec::new();
        let mut caps = CapabilitySet::with_policy(DownlevelPolicy::Acknowledge);
        run_battery_with(&seed(), &mut caps, |rng, _| {
            observed.push(rng.next_u64());
            observed.push(rng.next_u64());
            Ok(())
        })
        .unwrap();

        let mut expected_rng = seed().rng();
        let expected: Vec<u64> = (0..observed.len()).map(|_| expected_rng.next_u64()).collect();
        assert_eq!(observed, expected);
    }

    #[test]
    fn first_error_stops_the_schedule() {
        let mut caps = CapabilitySet::with_policy(DownlevelPolicy::Acknowledge);
        let mut invocations = 0;
        let err = run_battery_with(&seed(), &mut caps, |_, _| {
            invocations += 1;
            Err(CentellaError::Mismatch {
                op: "count_u8".to_string(),
                expected: "1".to_string(),
                actual: "0".to_string(),
            })
        })
        .expect_err("battery error must propagate");
        assert_eq!(invocations, 1);
        assert!(matches!(err, CentellaError::Mismatch { .. }));
    }

    #[test]
    fn battery_sees_progressively_narrower_capability() {
        let mut caps = CapabilitySet::with_policy(DownlevelPolicy::Acknowledge);
        let mut counts = Vec::new();
        run_battery_with(&seed(), &mut caps, |_, caps| {
            counts.push(caps.enabled_count());
            Ok(())
        })
        .unwrap();
        for pair in counts.windows(2) {
            assert!(pair[1] <= pair[0], "capability must only narrow");
        }
        assert_eq!(counts.last().copied(), Some(0));
    }
}
