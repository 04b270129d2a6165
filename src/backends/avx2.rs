//! AVX2 kernels (x86_64 advanced SIMD, 256-bit)
//!
//! The widest tier. Reversal needs a two-step dance because
//! `vpshufb` shuffles within 128-bit lanes only: reverse bytes inside
//! each lane, then swap the lanes.
//!
//! # Safety
//!
//! Every function requires the `avx2` target feature; dispatch routes
//! here only while the AVX2 capability tier is both host-available and
//! enabled.

use std::arch::x86_64::*;

const LANES_U8: usize = 32;
const LANES_I32: usize = 8;

#[target_feature(enable = "avx2")]
pub unsafe fn count_u8(hay: &[u8], value: u8) -> usize {
    let needle = _mm256_set1_epi8(value as i8);
    let mut total = 0usize;
    let mut i = 0;
    while i + LANES_U8 <= hay.len() {
        let chunk = _mm256_loadu_si256(hay.as_ptr().add(i) as *const __m256i);
        let mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(chunk, needle)) as u32;
        total += mask.count_ones() as usize;
        i += LANES_U8;
    }
    total + hay[i..].iter().filter(|&&b| b == value).count()
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_u8(hay: &[u8], value: u8) -> Option<usize> {
    let needle = _mm256_set1_epi8(value as i8);
    let mut i = 0;
    while i + LANES_U8 <= hay.len() {
        let chunk = _mm256_loadu_si256(hay.as_ptr().add(i) as *const __m256i);
        let mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_U8;
    }
    hay[i..].iter().position(|&b| b == value).map(|p| i + p)
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_last_u8(hay: &[u8], value: u8) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_U8;
    if let Some(p) = hay[tail_start..].iter().rposition(|&b| b == value) {
        return Some(tail_start + p);
    }
    let needle = _mm256_set1_epi8(value as i8);
    let mut i = tail_start;
    while i >= LANES_U8 {
        i -= LANES_U8;
        let chunk = _mm256_loadu_si256(hay.as_ptr().add(i) as *const __m256i);
        let mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

/// Length of the common prefix. Caller guarantees equal lengths.
#[target_feature(enable = "avx2")]
pub unsafe fn mismatch_u8(a: &[u8], b: &[u8]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    let mut i = 0;
    while i + LANES_U8 <= a.len() {
        let va = _mm256_loadu_si256(a.as_ptr().add(i) as *const __m256i);
        let vb = _mm256_loadu_si256(b.as_ptr().add(i) as *const __m256i);
        let mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(va, vb)) as u32;
        if mask != u32::MAX {
            return i + (!mask).trailing_zeros() as usize;
        }
        i += LANES_U8;
    }
    i + a[i..]
        .iter()
        .zip(&b[i..])
        .take_while(|(x, y)| x == y)
        .count()
}

// vpshufb reverses within each 128-bit lane; vperm2i128 then swaps lanes.
#[target_feature(enable = "avx2")]
unsafe fn reverse_block_u8(v: __m256i) -> __m256i {
    #[rustfmt::skip]
    let lane_reverse = _mm256_setr_epi8(
        15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
        15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
    );
    let within_lanes = _mm256_shuffle_epi8(v, lane_reverse);
    _mm256_permute2x128_si256::<0x01>(within_lanes, within_lanes)
}

#[target_feature(enable = "avx2")]
pub unsafe fn reverse_u8(values: &mut [u8]) {
    let n = values.len();
    let mut lo = 0;
    let mut hi = n;
    let p = values.as_mut_ptr();
    while hi - lo >= 2 * LANES_U8 {
        let front = _mm256_loadu_si256(p.add(lo) as *const __m256i);
        let back = _mm256_loadu_si256(p.add(hi - LANES_U8) as *const __m256i);
        _mm256_storeu_si256(p.add(lo) as *mut __m256i, reverse_block_u8(back));
        _mm256_storeu_si256(p.add(hi - LANES_U8) as *mut __m256i, reverse_block_u8(front));
        lo += LANES_U8;
        hi -= LANES_U8;
    }
    values[lo..hi].reverse();
}

#[target_feature(enable = "avx2")]
pub unsafe fn reverse_i32(values: &mut [i32]) {
    let reversal = _mm256_setr_epi32(7, 6, 5, 4, 3, 2, 1, 0);
    let n = values.len();
    let mut lo = 0;
    let mut hi = n;
    let p = values.as_mut_ptr();
    while hi - lo >= 2 * LANES_I32 {
        let front = _mm256_loadu_si256(p.add(lo) as *const __m256i);
        let back = _mm256_loadu_si256(p.add(hi - LANES_I32) as *const __m256i);
        _mm256_storeu_si256(
            p.add(lo) as *mut __m256i,
            _mm256_permutevar8x32_epi32(back, reversal),
        );
        _mm256_storeu_si256(
            p.add(hi - LANES_I32) as *mut __m256i,
            _mm256_permutevar8x32_epi32(front, reversal),
        );
        lo += LANES_I32;
        hi -= LANES_I32;
    }
    values[lo..hi].reverse();
}

#[target_feature(enable = "avx2")]
pub unsafe fn swap_ranges_i32(a: &mut [i32], b: &mut [i32]) {
    debug_assert_eq!(a.len(), b.len());
    let mut i = 0;
    while i + LANES_I32 <= a.len() {
        let va = _mm256_loadu_si256(a.as_ptr().add(i) as *const __m256i);
        let vb = _mm256_loadu_si256(b.as_ptr().add(i) as *const __m256i);
        _mm256_storeu_si256(a.as_mut_ptr().add(i) as *mut __m256i, vb);
        _mm256_storeu_si256(b.as_mut_ptr().add(i) as *mut __m256i, va);
        i += LANES_I32;
    }
    a[i..].swap_with_slice(&mut b[i..]);
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_i32(hay: &[i32], value: i32) -> Option<usize> {
    let needle = _mm256_set1_epi32(value);
    let mut i = 0;
    while i + LANES_I32 <= hay.len() {
        let chunk = _mm256_loadu_si256(hay.as_ptr().add(i) as *const __m256i);
        let eq = _mm256_cmpeq_epi32(chunk, needle);
        let mask = _mm256_movemask_ps(_mm256_castsi256_ps(eq)) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_I32;
    }
    hay[i..].iter().position(|&v| v == value).map(|p| i + p)
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_last_i32(hay: &[i32], value: i32) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_I32;
    if let Some(p) = hay[tail_start..].iter().rposition(|&v| v == value) {
        return Some(tail_start + p);
    }
    let needle = _mm256_set1_epi32(value);
    let mut i = tail_start;
    while i >= LANES_I32 {
        i -= LANES_I32;
        let chunk = _mm256_loadu_si256(hay.as_ptr().add(i) as *const __m256i);
        let eq = _mm256_cmpeq_epi32(chunk, needle);
        let mask = _mm256_movemask_ps(_mm256_castsi256_ps(eq)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

/// Smallest value. Caller guarantees a non-empty slice.
#[target_feature(enable = "avx2")]
pub unsafe fn min_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], i32::min);
    }
    let mut acc = _mm256_loadu_si256(values.as_ptr() as *const __m256i);
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        let chunk = _mm256_loadu_si256(values.as_ptr().add(i) as *const __m256i);
        acc = _mm256_min_epi32(acc, chunk);
        i += LANES_I32;
    }
    let mut lanes = [0i32; LANES_I32];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], i32::min);
    values[i..].iter().copied().fold(horizontal, i32::min)
}

/// Largest value. Caller guarantees a non-empty slice.
#[target_feature(enable = "avx2")]
pub unsafe fn max_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], i32::max);
    }
    let mut acc = _mm256_loadu_si256(values.as_ptr() as *const __m256i);
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        let chunk = _mm256_loadu_si256(values.as_ptr().add(i) as *const __m256i);
        acc = _mm256_max_epi32(acc, chunk);
        i += LANES_I32;
    }
    let mut lanes = [0i32; LANES_I32];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], i32::max);
    values[i..].iter().copied().fold(horizontal, i32::max)
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_f32(hay: &[f32], value: f32) -> Option<usize> {
    let needle = _mm256_set1_ps(value);
    let mut i = 0;
    while i + LANES_I32 <= hay.len() {
        let chunk = _mm256_loadu_ps(hay.as_ptr().add(i));
        let eq = _mm256_cmp_ps::<_CMP_EQ_OQ>(chunk, needle);
        let mask = _mm256_movemask_ps(eq) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_I32;
    }
    hay[i..].iter().position(|&v| v == value).map(|p| i + p)
}

#[target_feature(enable = "avx2")]
pub unsafe fn find_last_f32(hay: &[f32], value: f32) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_I32;
    if let Some(p) = hay[tail_start..].iter().rposition(|&v| v == value) {
        return Some(tail_start + p);
    }
    let needle = _mm256_set1_ps(value);
    let mut i = tail_start;
    while i >= LANES_I32 {
        i -= LANES_I32;
        let chunk = _mm256_loadu_ps(hay.as_ptr().add(i));
        let mask = _mm256_movemask_ps(_mm256_cmp_ps::<_CMP_EQ_OQ>(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

/// Smallest value under `<` ordering (NaN-free inputs only).
#[target_feature(enable = "avx2")]
pub unsafe fn min_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    let scalar_min = |best: f32, v: f32| if v < best { v } else { best };
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], scalar_min);
    }
    let mut acc = _mm256_loadu_ps(values.as_ptr());
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        acc = _mm256_min_ps(acc, _mm256_loadu_ps(values.as_ptr().add(i)));
        i += LANES_I32;
    }
    let mut lanes = [0f32; LANES_I32];
    _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], scalar_min);
    values[i..].iter().copied().fold(horizontal, scalar_min)
}

/// Largest value under `>` ordering (NaN-free inputs only).
#[target_feature(enable = "avx2")]
pub unsafe fn max_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    let scalar_max = |best: f32, v: f32| if v > best { v } else { best };
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], scalar_max);
    }
    let mut acc = _mm256_loadu_ps(values.as_ptr());
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        acc = _mm256_max_ps(acc, _mm256_loadu_ps(values.as_ptr().add(i)));
        i += LANES_I32;
    }
    let mut lanes = [0f32; LANES_I32];
    _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], scalar_max);
    values[i..].iter().copied().fold(horizontal, scalar_max)
}
