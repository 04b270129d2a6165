//! Capability-dispatched slice algorithms
//!
//! The public algorithm surface. Every operation takes the enabled
//! capability set explicitly and routes to the best enabled tier that has
//! a kernel for it, falling through tier by tier to the portable scalar
//! implementation. Because tiers are hierarchical, an operation with no
//! kernel at the active tier may legally run a lower tier's kernel.
//!
//! Position conventions follow the classic iterator contracts:
//! `find`-family results are first occurrences, `min_element` and
//! `max_element` return the first extremum, and `minmax_element` returns
//! the first minimum paired with the *last* maximum.

use std::cmp::Ordering;

use crate::backends::scalar;
#[cfg(target_arch = "x86_64")]
use crate::backends::{avx2, sse2, sse42};
use crate::caps::CapabilitySet;
use crate::Tier;

/// Highest enabled tier, the dispatch anchor for one operation.
fn active_tier(caps: &CapabilitySet) -> Option<Tier> {
    #[cfg(target_arch = "x86_64")]
    {
        for &tier in Tier::DOWNGRADE_ORDER {
            if caps.is_enabled(tier) {
                return Some(tier);
            }
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = caps;
    None
}

/// Occurrences of `value` in `hay`.
pub fn count_u8(caps: &CapabilitySet, hay: &[u8], value: u8) -> usize {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::count_u8(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::count_u8(hay, value) },
        _ => scalar::count_u8(hay, value),
    }
}

/// Index of the first occurrence of `value`.
pub fn find_u8(caps: &CapabilitySet, hay: &[u8], value: u8) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_u8(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) => unsafe { sse42::find_u8(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse2) => unsafe { sse2::find_u8(hay, value) },
        _ => scalar::find_u8(hay, value),
    }
}

/// Index of the last occurrence of `value`.
pub fn find_last_u8(caps: &CapabilitySet, hay: &[u8], value: u8) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_last_u8(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::find_last_u8(hay, value) },
        _ => scalar::find_last_u8(hay, value),
    }
}

/// Length of the common prefix of `a` and `b` (compared over the shorter
/// length, like `mismatch` over two ranges).
pub fn mismatch_u8(caps: &CapabilitySet, a: &[u8], b: &[u8]) -> usize {
    let limit = a.len().min(b.len());
    let (a, b) = (&a[..limit], &b[..limit]);
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::mismatch_u8(a, b) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::mismatch_u8(a, b) },
        _ => scalar::mismatch_u8(a, b),
    }
}

/// Lexicographic ordering of `a` relative to `b`, built on the mismatch
/// kernel: compare the first diverging elements, or the lengths if one
/// input is a prefix of the other.
pub fn lex_compare_u8(caps: &CapabilitySet, a: &[u8], b: &[u8]) -> Ordering {
    let split = mismatch_u8(caps, a, b);
    match (a.get(split), b.get(split)) {
        (Some(x), Some(y)) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Index of the first occurrence of `needle` as a subslice of `hay`.
///
/// Skips ahead through the tier-dispatched [`find_u8`] on the needle
/// head, so the exercised code path varies with the capability set. An
/// empty needle matches at index 0.
pub fn search_u8(caps: &CapabilitySet, hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    let head = needle[0];
    let last_start = hay.len() - needle.len();
    let mut base = 0;
    loop {
        let offset = find_u8(caps, &hay[base..], head)?;
        let start = base + offset;
        if start > last_start {
            return None;
        }
        if hay[start..start + needle.len()] == *needle {
            return Some(start);
        }
        base = start + 1;
    }
}

/// Index of the first run of at least `count` consecutive occurrences of
/// `value`. A zero count matches at index 0.
pub fn search_n_u8(caps: &CapabilitySet, hay: &[u8], count: usize, value: u8) -> Option<usize> {
    if count == 0 {
        return Some(0);
    }
    if count > hay.len() {
        return None;
    }
    let mut base = 0;
    while base + count <= hay.len() {
        let offset = find_u8(caps, &hay[base..], value)?;
        let start = base + offset;
        if start + count > hay.len() {
            return None;
        }
        let mut run = 1;
        while run < count && hay[start + run] == value {
            run += 1;
        }
        if run == count {
            return Some(start);
        }
        // run ended on a non-matching element; resume the scan there
        base = start + run;
    }
    None
}

/// Reverse a byte slice in place.
pub fn reverse_u8(caps: &CapabilitySet, values: &mut [u8]) {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::reverse_u8(values) },
        // byte-granular shuffles below AVX2 buy nothing over the
        // library reversal
        _ => scalar::reverse_u8(values),
    }
}

/// Reverse an i32 slice in place.
pub fn reverse_i32(caps: &CapabilitySet, values: &mut [i32]) {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::reverse_i32(values) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::reverse_i32(values) },
        _ => scalar::reverse_i32(values),
    }
}

/// Exchange the contents of two ranges element-wise.
///
/// # Panics
///
/// Panics if the ranges differ in length; mismatched ranges are a caller
/// bug, not a recoverable condition.
pub fn swap_ranges_i32(caps: &CapabilitySet, a: &mut [i32], b: &mut [i32]) {
    assert_eq!(a.len(), b.len(), "swap_ranges requires equal lengths");
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::swap_ranges_i32(a, b) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::swap_ranges_i32(a, b) },
        _ => scalar::swap_ranges_i32(a, b),
    }
}

fn find_i32(caps: &CapabilitySet, hay: &[i32], value: i32) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_i32(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::find_i32(hay, value) },
        _ => scalar::find_i32(hay, value),
    }
}

fn find_last_i32(caps: &CapabilitySet, hay: &[i32], value: i32) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_last_i32(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::find_last_i32(hay, value) },
        _ => scalar::find_last_i32(hay, value),
    }
}

fn min_value_i32(caps: &CapabilitySet, values: &[i32]) -> i32 {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::min_i32(values) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::min_i32(values) },
        _ => scalar::min_i32(values),
    }
}

fn max_value_i32(caps: &CapabilitySet, values: &[i32]) -> i32 {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::max_i32(values) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::max_i32(values) },
        _ => scalar::max_i32(values),
    }
}

/// Index of the first smallest element.
///
/// Two vectorized passes: reduce to the extreme value, then find its
/// first position. The position pass makes the first-occurrence contract
/// hold by construction.
pub fn min_element_i32(caps: &CapabilitySet, values: &[i32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    find_i32(caps, values, min_value_i32(caps, values))
}

/// Index of the first largest element.
pub fn max_element_i32(caps: &CapabilitySet, values: &[i32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    find_i32(caps, values, max_value_i32(caps, values))
}

/// Indices of the first smallest and last largest element.
pub fn minmax_element_i32(caps: &CapabilitySet, values: &[i32]) -> Option<(usize, usize)> {
    if values.is_empty() {
        return None;
    }
    let min_pos = find_i32(caps, values, min_value_i32(caps, values))?;
    let max_pos = find_last_i32(caps, values, max_value_i32(caps, values))?;
    Some((min_pos, max_pos))
}

fn find_f32(caps: &CapabilitySet, hay: &[f32], value: f32) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_f32(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::find_f32(hay, value) },
        _ => scalar::find_f32(hay, value),
    }
}

fn find_last_f32(caps: &CapabilitySet, hay: &[f32], value: f32) -> Option<usize> {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::find_last_f32(hay, value) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::find_last_f32(hay, value) },
        _ => scalar::find_last_f32(hay, value),
    }
}

fn min_value_f32(caps: &CapabilitySet, values: &[f32]) -> f32 {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::min_f32(values) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::min_f32(values) },
        _ => scalar::min_f32(values),
    }
}

fn max_value_f32(caps: &CapabilitySet, values: &[f32]) -> f32 {
    match active_tier(caps) {
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Avx2) => unsafe { avx2::max_f32(values) },
        #[cfg(target_arch = "x86_64")]
        Some(Tier::Sse42) | Some(Tier::Sse2) => unsafe { sse2::max_f32(values) },
        _ => scalar::max_f32(values),
    }
}

/// Index of the first smallest element under `<` ordering.
///
/// Inputs must be NaN-free. Signed zeros compare equal, so with both
/// zero signs present the position is the first zero of either sign —
/// matching the naive reference, which is exactly what the battery
/// checks.
pub fn min_element_f32(caps: &CapabilitySet, values: &[f32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    find_f32(caps, values, min_value_f32(caps, values))
}

/// Index of the first largest element under `>` ordering (NaN-free).
pub fn max_element_f32(caps: &CapabilitySet, values: &[f32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    find_f32(caps, values, max_value_f32(caps, values))
}

/// Indices of the first smallest and last largest element (NaN-free).
pub fn minmax_element_f32(caps: &CapabilitySet, values: &[f32]) -> Option<(usize, usize)> {
    if values.is_empty() {
        return None;
    }
    let min_pos = find_f32(caps, values, min_value_f32(caps, values))?;
    let max_pos = find_last_f32(caps, values, max_value_f32(caps, values))?;
    Some((min_pos, max_pos))
}
