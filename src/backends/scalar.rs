//! Scalar (non-SIMD) fallback kernels
//!
//! Portable implementations of every operation, used whenever no SIMD
//! tier is enabled (or the target has none). These lean on iterator
//! adaptors and `slice` built-ins, which the compiler may well
//! auto-vectorize — that is fine; the differential battery cares about
//! results, and the explicit-loop ground truth lives in
//! [`crate::reference`], not here.

pub fn count_u8(hay: &[u8], value: u8) -> usize {
    hay.iter().filter(|&&b| b == value).count()
}

pub fn find_u8(hay: &[u8], value: u8) -> Option<usize> {
    hay.iter().position(|&b| b == value)
}

pub fn find_last_u8(hay: &[u8], value: u8) -> Option<usize> {
    hay.iter().rposition(|&b| b == value)
}

/// Length of the common prefix. Caller guarantees equal lengths.
pub fn mismatch_u8(a: &[u8], b: &[u8]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

pub fn reverse_u8(values: &mut [u8]) {
    values.reverse();
}

pub fn reverse_i32(values: &mut [i32]) {
    values.reverse();
}

pub fn swap_ranges_i32(a: &mut [i32], b: &mut [i32]) {
    debug_assert_eq!(a.len(), b.len());
    a.swap_with_slice(b);
}

pub fn find_i32(hay: &[i32], value: i32) -> Option<usize> {
    hay.iter().position(|&v| v == value)
}

pub fn find_last_i32(hay: &[i32], value: i32) -> Option<usize> {
    hay.iter().rposition(|&v| v == value)
}

/// Smallest value. Caller guarantees a non-empty slice.
pub fn min_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    values.iter().copied().fold(values[0], i32::min)
}

/// Largest value. Caller guarantees a non-empty slice.
pub fn max_i32(values: &[i32]) -> i32 {
    debug_assert!(!values.is_empty());
    values.iter().copied().fold(values[0], i32::max)
}

pub fn find_f32(hay: &[f32], value: f32) -> Option<usize> {
    hay.iter().position(|&v| v == value)
}

pub fn find_last_f32(hay: &[f32], value: f32) -> Option<usize> {
    hay.iter().rposition(|&v| v == value)
}

/// Smallest value under strict `<` ordering (NaN-free inputs only, by
/// the battery's contract). Signed zeros are one value class here.
pub fn min_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    values
        .iter()
        .copied()
        .fold(values[0], |best, v| if v < best { v } else { best })
}

/// Largest value under strict `>` ordering (NaN-free inputs only).
pub fn max_f32(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    values
        .iter()
        .copied()
        .fold(values[0], |best, v| if v > best { v } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_searches() {
        let hay = b"abracadabra";
        assert_eq!(count_u8(hay, b'a'), 5);
        assert_eq!(find_u8(hay, b'c'), Some(4));
        assert_eq!(find_last_u8(hay, b'b'), Some(8));
        assert_eq!(find_u8(hay, b'z'), None);
        assert_eq!(find_u8(&[], b'a'), None);
    }

    #[test]
    fn mismatch_prefix() {
        assert_eq!(mismatch_u8(b"abcd", b"abxd"), 2);
        assert_eq!(mismatch_u8(b"abcd", b"abcd"), 4);
        assert_eq!(mismatch_u8(b"", b""), 0);
    }

    #[test]
    fn i32_extrema() {
        assert_eq!(min_i32(&[3, -7, 9, -7]), -7);
        assert_eq!(max_i32(&[3, -7, 9, 9]), 9);
        assert_eq!(min_i32(&[42]), 42);
    }

    #[test]
    fn f32_extrema_with_specials() {
        let v = [1.0f32, -0.0, 0.0, f32::NEG_INFINITY, f32::INFINITY];
        assert_eq!(min_f32(&v), f32::NEG_INFINITY);
        assert_eq!(max_f32(&v), f32::INFINITY);

        let zeros = [0.0f32, -0.0];
        // zeros are equal under the ordering; the fold keeps the first
        assert_eq!(min_f32(&zeros).to_bits(), 0.0f32.to_bits());
        assert_eq!(find_f32(&zeros, -0.0), Some(0));
    }
}
