//! SSE2 kernels (x86_64 baseline SIMD, 128-bit)
//!
//! SSE2 is the guaranteed floor on x86_64, so these kernels are the last
//! vectorized stop before the scalar fallback. i32 min/max has no native
//! instruction at this tier and is built from compare-and-blend.
//!
//! # Safety
//!
//! Every function here requires the `sse2` target feature, which is part
//! of the x86_64 baseline; dispatch still routes here only while the SSE2
//! capability tier is enabled.

use std::arch::x86_64::*;

const LANES_U8: usize = 16;
const LANES_I32: usize = 4;

#[target_feature(enable = "sse2")]
pub unsafe fn count_u8(hay: &[u8], value: u8) -> usize {
    let needle = _mm_set1_epi8(value as i8);
    let mut total = 0usize;
    let mut i = 0;
    while i + LANES_U8 <= hay.len() {
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let eq = _mm_cmpeq_epi8(chunk, needle);
        let mask = _mm_movemask_epi8(eq) as u32;
        total += mask.count_ones() as usize;
        i += LANES_U8;
    }
    total + hay[i..].iter().filter(|&&b| b == value).count()
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_u8(hay: &[u8], value: u8) -> Option<usize> {
    let needle = _mm_set1_epi8(value as i8);
    let mut i = 0;
    while i + LANES_U8 <= hay.len() {
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_U8;
    }
    hay[i..].iter().position(|&b| b == value).map(|p| i + p)
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_last_u8(hay: &[u8], value: u8) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_U8;
    if let Some(p) = hay[tail_start..].iter().rposition(|&b| b == value) {
        return Some(tail_start + p);
    }
    let needle = _mm_set1_epi8(value as i8);
    let mut i = tail_start;
    while i >= LANES_U8 {
        i -= LANES_U8;
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

/// Length of the common prefix. Caller guarantees equal lengths.
#[target_feature(enable = "sse2")]
pub unsafe fn mismatch_u8(a: &[u8], b: &[u8]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    let mut i = 0;
    while i + LANES_U8 <= a.len() {
        let va = _mm_loadu_si128(a.as_ptr().add(i) as *const __m128i);
        let vb = _mm_loadu_si128(b.as_ptr().add(i) as *const __m128i);
        let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(va, vb)) as u32;
        if mask != 0xFFFF {
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

#[target_feature(enable = "sse2")]
pub unsafe fn reverse_i32(values: &mut [i32]) {
    let n = values.len();
    let mut lo = 0;
    let mut hi = n;
    let p = values.as_mut_ptr();
    while hi - lo >= 2 * LANES_I32 {
        let front = _mm_loadu_si128(p.add(lo) as *const __m128i);
        let back = _mm_loadu_si128(p.add(hi - LANES_I32) as *const __m128i);
        _mm_storeu_si128(p.add(lo) as *mut __m128i, _mm_shuffle_epi32::<0x1B>(back));
        _mm_storeu_si128(
            p.add(hi - LANES_I32) as *mut __m128i,
            _mm_shuffle_epi32::<0x1B>(front),
        );
        lo += LANES_I32;
        hi -= LANES_I32;
    }
    values[lo..hi].reverse();
}

#[target_feature(enable = "sse2")]
pub unsafe fn swap_ranges_i32(a: &mut [i32], b: &mut [i32]) {
    debug_assert_eq!(a.len(), b.len());
    let mut i = 0;
    while i + LANES_I32 <= a.len() {
        let va = _mm_loadu_si128(a.as_ptr().add(i) as *const __m128i);
        let vb = _mm_loadu_si128(b.as_ptr().add(i) as *const __m128i);
        _mm_storeu_si128(a.as_mut_ptr().add(i) as *mut __m128i, vb);
        _mm_storeu_si128(b.as_mut_ptr().add(i) as *mut __m128i, va);
        i += LANES_I32;
    }
    a[i..].swap_with_slice(&mut b[i..]);
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_i32(hay: &[i32], value: i32) -> Option<usize> {
    let needle = _mm_set1_epi32(value);
    let mut i = 0;
    while i + LANES_I32 <= hay.len() {
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let eq = _mm_cmpeq_epi32(chunk, needle);
        let mask = _mm_movemask_ps(_mm_castsi128_ps(eq)) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_I32;
    }
    hay[i..].iter().position(|&v| v == value).map(|p| i + p)
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_last_i32(hay: &[i32], value: i32) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_I32;
    if let Some(p) = hay[tail_start..].iter().rposition(|&v| v == value) {
        return Some(tail_start + p);
    }
    let needle = _mm_set1_epi32(value);
    let mut i = tail_start;
    while i >= LANES_I32 {
        i -= LANES_I32;
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let eq = _mm_cmpeq_epi32(chunk, needle);
        let mask = _mm_movemask_ps(_mm_castsi128_ps(eq)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

// SSE2 has no packed i32 min/max; select via compare-and-blend.
#[target_feature(enable = "sse2")]
unsafe fn select_min_epi32(acc: __m128i, chunk: __m128i) -> __m128i {
    let acc_greater = _mm_cmpgt_epi32(acc, chunk);
    _mm_or_si128(
        _mm_and_si128(acc_greater, chunk),
        _mm_andnot_si128(acc_greater, acc),
    )
}

#[target_feature(enable = "sse2")]
unsafe fn select_max_epi32(acc: __m128i, chunk: __m128i) -> __m128i {
    let chunk_greater = _mm_cmpgt_epi32(chunk, acc);
    _mm_or_si128(
        _mm_and_si128(chunk_greater, chunk),
        _mm_andnot_si128(chunk_greater, acc),
    )
}

/// Smallest value. Caller guarantees a non-empty slice.
#[target_feature(enable = "sse2")]
pub unsafe fn min_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], i32::min);
    }
    let mut acc = _mm_loadu_si128(values.as_ptr() as *const __m128i);
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        let chunk = _mm_loadu_si128(values.as_ptr().add(i) as *const __m128i);
        acc = select_min_epi32(acc, chunk);
        i += LANES_I32;
    }
    let mut lanes = [0i32; LANES_I32];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], i32::min);
    values[i..].iter().copied().fold(horizontal, i32::min)
}

/// Largest value. Caller guarantees a non-empty slice.
#[target_feature(enable = "sse2")]
pub unsafe fn max_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], i32::max);
    }
    let mut acc = _mm_loadu_si128(values.as_ptr() as *const __m128i);
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        let chunk = _mm_loadu_si128(values.as_ptr().add(i) as *const __m128i);
        acc = select_max_epi32(acc, chunk);
        i += LANES_I32;
    }
    let mut lanes = [0i32; LANES_I32];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], i32::max);
    values[i..].iter().copied().fold(horizontal, i32::max)
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_f32(hay: &[f32], value: f32) -> Option<usize> {
    let needle = _mm_set1_ps(value);
    let mut i = 0;
    while i + LANES_I32 <= hay.len() {
        let chunk = _mm_loadu_ps(hay.as_ptr().add(i));
        let mask = _mm_movemask_ps(_mm_cmpeq_ps(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + mask.trailing_zeros() as usize);
        }
        i += LANES_I32;
    }
    hay[i..].iter().position(|&v| v == value).map(|p| i + p)
}

#[target_feature(enable = "sse2")]
pub unsafe fn find_last_f32(hay: &[f32], value: f32) -> Option<usize> {
    let n = hay.len();
    let tail_start = n - n % LANES_I32;
    if let Some(p) = hay[tail_start..].iter().rposition(|&v| v == value) {
        return Some(tail_start + p);
    }
    let needle = _mm_set1_ps(value);
    let mut i = tail_start;
    while i >= LANES_I32 {
        i -= LANES_I32;
        let chunk = _mm_loadu_ps(hay.as_ptr().add(i));
        let mask = _mm_movemask_ps(_mm_cmpeq_ps(chunk, needle)) as u32;
        if mask != 0 {
            return Some(i + (31 - mask.leading_zeros()) as usize);
        }
    }
    None
}

/// Smallest value under `<` ordering (NaN-free inputs only).
#[target_feature(enable = "sse2")]
pub unsafe fn min_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    let scalar_min = |best: f32, v: f32| if v < best { v } else { best };
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], scalar_min);
    }
    let mut acc = _mm_loadu_ps(values.as_ptr());
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        acc = _mm_min_ps(acc, _mm_loadu_ps(values.as_ptr().add(i)));
        i += LANES_I32;
    }
    let mut lanes = [0f32; LANES_I32];
    _mm_storeu_ps(lanes.as_mut_ptr(), acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], scalar_min);
    values[i..].iter().copied().fold(horizontal, scalar_min)
}

/// Largest value under `>` ordering (NaN-free inputs only).
#[target_feature(enable = "sse2")]
pub unsafe fn max_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    let n = values.len();
    let scalar_max = |best: f32, v: f32| if v > best { v } else { best };
    if n < LANES_I32 {
        return values.iter().copied().fold(values[0], scalar_max);
    }
    let mut acc = _mm_loadu_ps(values.as_ptr());
    let mut i = LANES_I32;
    while i + LANES_I32 <= n {
        acc = _mm_max_ps(acc, _mm_loadu_ps(values.as_ptr().add(i)));
        i += LANES_I32;
    }
    let mut lanes = [0f32; LANES_I32];
    _mm_storeu_ps(lanes.as_mut_ptr(), acc);
    let horizontal = lanes.iter().copied().fold(lanes[0], scalar_max);
    values[i..].iter().copied().fold(horizontal, scalar_max)
}
