//! SSE4.2 kernels (string-compare search)
//!
//! SSE4.2's packed-compare string instructions give `find` a different
//! shape than the SSE2 compare-and-movemask loop: `pcmpestri` reports the
//! least-significant matching byte index directly. Only full 16-byte
//! chunks go through the instruction; the load itself must stay inside
//! the slice, so the tail is scalar.

use std::arch::x86_64::*;

const CHUNK: usize = 16;

const FIND_FLAGS: i32 = _SIDD_UBYTE_OPS | _SIDD_CMP_EQUAL_ANY | _SIDD_LEAST_SIGNIFICANT;

#[target_feature(enable = "sse4.2")]
pub unsafe fn find_u8(hay: &[u8], value: u8) -> Option<usize> {
    let needle = _mm_cvtsi32_si128(i32::from(value));
    let mut i = 0;
    while i + CHUNK <= hay.len() {
        let chunk = _mm_loadu_si128(hay.as_ptr().add(i) as *const __m128i);
        let index = _mm_cmpestri::<FIND_FLAGS>(needle, 1, chunk, CHUNK as i32);
        if index < CHUNK as i32 {
            return Some(i + index as usize);
        }
        i += CHUNK;
    }
    hay[i..].iter().position(|&b| b == value).map(|p| i + p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;
    use crate::Tier;

    #[test]
    fn find_matches_reference_across_tail_lengths() {
        if !Tier::Sse42.host_available() {
            return;
        }
        let base: Vec<u8> = (0..97u8).map(|i| i % 7).collect();
        for len in 0..base.len() {
            let hay = &base[..len];
            for value in 0..8u8 {
                unsafe {
                    assert_eq!(find_u8(hay, value), reference::find(hay, &value));
                }
            }
        }
    }

    #[test]
    fn finds_match_in_every_chunk_position() {
        if !Tier::Sse42.host_available() {
            return;
        }
        for pos in 0..48 {
            let mut hay = vec![0u8; 48];
            hay[pos] = 0xAB;
            unsafe {
                assert_eq!(find_u8(&hay, 0xAB), Some(pos));
            }
        }
    }
}
