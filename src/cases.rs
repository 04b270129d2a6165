//! Randomized and structured case generation
//!
//! Vectorized kernels fail at the seams: lengths below one block, exactly
//! one block, many-blocks-plus-tail, and runs of equal values stitched
//! across a block boundary. The generators here aim randomness at those
//! seams instead of relying on uniform noise to find them.

use rand::Rng;

use crate::error::Result;

/// Element budget for one growing battery instance.
pub const DATA_COUNT: usize = 1024;

/// Upper bound of the match-biased value domain: uniform sampling over
/// `0..=SPARSE_DOMAIN_MAX` across a [`DATA_COUNT`]-element input yields
/// roughly ten occurrences of any given value, so count/find cases see
/// both zero-match and several-match territory.
pub const SPARSE_DOMAIN_MAX: u8 = 100;

/// Match-biased random byte.
pub fn sparse_u8<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(0..=SPARSE_DOMAIN_MAX)
}

/// Match-biased random i32.
pub fn sparse_i32<R: Rng>(rng: &mut R) -> i32 {
    rng.gen_range(0..=i32::from(SPARSE_DOMAIN_MAX))
}

/// Full-range random i32, for order-extremum and mutating cases.
pub fn any_i32<R: Rng>(rng: &mut R) -> i32 {
    rng.gen()
}

/// Random f32 drawn from a pool that deliberately includes the domain's
/// special values: both zero signs and both infinities are always
/// candidates, never left to chance. NaN is excluded; the ordering
/// contract under test is not defined for it.
pub fn special_f32<R: Rng>(rng: &mut R) -> f32 {
    const POOL: [f32; 10] = [
        0.0,
        -0.0,
        1.0,
        -1.0,
        0.5,
        -2.5,
        f32::MIN,
        f32::MAX,
        f32::INFINITY,
        f32::NEG_INFINITY,
    ];
    POOL[rng.gen_range(0..POOL.len())]
}

/// Grow an input one element at a time, re-checking after every growth
/// step, so every intermediate length `0..=budget` is exercised — lengths
/// smaller than one vector block, exactly one block, and many blocks plus
/// remainder all included.
pub fn grow<T, R, S, C>(rng: &mut R, budget: usize, mut sample: S, mut check: C) -> Result<()>
where
    R: Rng,
    S: FnMut(&mut R) -> T,
    C: FnMut(&[T], &mut R) -> Result<()>,
{
    let mut input = Vec::with_capacity(budget);
    check(&input, rng)?;
    for _ in 0..budget {
        let element = sample(rng);
        input.push(element);
        check(&input, rng)?;
    }
    Ok(())
}

/// Inputs where a run of `value` straddles the boundary between two
/// vectorized processing blocks of `block` elements, over an otherwise
/// uniform `background`. A block-boundary stitching bug in a prospective
/// kernel shows up here even when uniform randomness would miss it.
pub fn straddling_runs_u8(block: usize, value: u8, background: u8) -> Vec<Vec<u8>> {
    debug_assert!(block >= 2);
    let total = block * 4;
    let mut out = Vec::new();
    for run in [1, block / 2, block - 1, block, block + 1, block * 2] {
        if run == 0 {
            continue;
        }
        for boundary in 1..4 {
            let start = (boundary * block).saturating_sub(run / 2 + 1);
            let mut case = vec![background; total];
            for slot in case.iter_mut().skip(start).take(run) {
                *slot = value;
            }
            out.push(case);
        }
    }
    out
}
